//! Layout math shared by the staggered and hexagonal topologies. Both lay out
//! their cells in **lines** (rows for [CellAxis::Y], columns for
//! [CellAxis::X]) where every other line is shifted by half a tile. They only
//! differ in how far apart consecutive lines are: staggered lines are one full
//! tile apart, hexagonal lines overlap.
//!
//! Much of the math here is written in terms of two directions:
//!
//! - **along**: the direction a line runs in (x for rows, y for columns)
//! - **across**: the direction lines are stacked in (y for rows, x for
//!   columns)

use crate::{
    cells::{clamp_visible_index, CellAxis, CellIndex},
    geometry::{RectF, RectI, Vector2f, Vector2i},
};

/// Neighbor offsets for a cell in an unshifted row, clockwise starting east
const ROW_UNSHIFTED: [(i32, i32); 6] =
    [(1, 0), (0, 1), (-1, 1), (-1, 0), (-1, -1), (0, -1)];
/// Neighbor offsets for a cell in a shifted row, clockwise starting east
const ROW_SHIFTED: [(i32, i32); 6] =
    [(1, 0), (1, 1), (0, 1), (-1, 0), (0, -1), (1, -1)];
/// Neighbor offsets for a cell in an unshifted column, clockwise starting
/// north
const COLUMN_UNSHIFTED: [(i32, i32); 6] =
    [(0, -1), (1, -1), (1, 0), (0, 1), (-1, 0), (-1, -1)];
/// Neighbor offsets for a cell in a shifted column, clockwise starting north
const COLUMN_SHIFTED: [(i32, i32); 6] =
    [(0, -1), (1, 0), (1, 1), (0, 1), (-1, 1), (-1, 0)];

/// Placement of cells in a staggered grid of lines
#[derive(Copy, Clone, Debug, PartialEq)]
pub(super) struct StaggerLayout {
    pub tile_size: Vector2f,
    pub axis: CellAxis,
    pub index: CellIndex,
    /// Distance between the starts of two consecutive lines
    pub line_step: f32,
}

impl StaggerLayout {
    /// Is the given row/column shifted by half a tile?
    pub fn is_shifted(&self, line: i32) -> bool {
        let odd = line.rem_euclid(2) == 1;
        match self.index {
            CellIndex::Odd => odd,
            CellIndex::Even => !odd,
        }
    }

    /// Split a cell coordinate into `(along, across)` components. The across
    /// component is the number of the line the cell sits in.
    pub fn split_coords(&self, coords: Vector2i) -> (i32, i32) {
        match self.axis {
            CellAxis::X => (coords.y, coords.x),
            CellAxis::Y => (coords.x, coords.y),
        }
    }

    /// Inverse of [Self::split_coords]
    pub fn join_coords(&self, along: i32, across: i32) -> Vector2i {
        match self.axis {
            CellAxis::X => Vector2i::new(across, along),
            CellAxis::Y => Vector2i::new(along, across),
        }
    }

    /// Split a world vector into `(along, across)` components
    pub fn split(&self, vector: Vector2f) -> (f32, f32) {
        match self.axis {
            CellAxis::X => (vector.y, vector.x),
            CellAxis::Y => (vector.x, vector.y),
        }
    }

    /// Inverse of [Self::split]
    pub fn join(&self, along: f32, across: f32) -> Vector2f {
        match self.axis {
            CellAxis::X => Vector2f::new(across, along),
            CellAxis::Y => Vector2f::new(along, across),
        }
    }

    /// Tile size as `(along, across)`
    pub fn tile_extent(&self) -> (f32, f32) {
        self.split(self.tile_size)
    }

    /// Distance that shifted lines get pushed along their own direction
    pub fn shift_amount(&self, line: i32) -> f32 {
        if self.is_shifted(line) {
            self.tile_extent().0 / 2.0
        } else {
            0.0
        }
    }

    pub fn cell_bounds(&self, coords: Vector2i) -> RectF {
        let (along, across) = self.split_coords(coords);
        let (tile_along, _) = self.tile_extent();
        let position = self.join(
            along as f32 * tile_along + self.shift_amount(across),
            across as f32 * self.line_step,
        );
        RectF::new(position, self.tile_size)
    }

    /// Exact union of the bounds of every cell in the layer
    pub fn bounds(&self, layer_size: Vector2i) -> RectF {
        if layer_size.x <= 0 || layer_size.y <= 0 {
            return RectF::zero();
        }

        let (along_count, line_count) = self.split_coords(layer_size);
        let (tile_along, tile_across) = self.tile_extent();
        // Parity alternates, so the first two lines tell us everything
        let first_lines = 0..line_count.min(2);
        let has_shifted = first_lines.clone().any(|line| self.is_shifted(line));
        let has_unshifted =
            first_lines.clone().any(|line| !self.is_shifted(line));

        let along_min = if has_unshifted { 0.0 } else { tile_along / 2.0 };
        let along_max = along_count as f32 * tile_along
            + if has_shifted { tile_along / 2.0 } else { 0.0 };
        let across_max = (line_count - 1) as f32 * self.line_step + tile_across;

        RectF::from_min_max(
            self.join(along_min, 0.0),
            self.join(along_max, across_max),
        )
    }

    /// Over-approximate the cells whose bounds intersect `local`
    pub fn visible_area(&self, local: &RectF) -> RectI {
        let (tile_along, tile_across) = self.tile_extent();
        let (min_along, min_across) = self.split(local.min());
        let (max_along, max_across) = self.split(local.max());

        // Line `l` covers [l * step, l * step + tile_across]
        let across_lo = ((min_across - tile_across) / self.line_step).floor();
        let across_hi = (max_across / self.line_step).ceil();
        // Cell `a` covers [a * tile + shift, (a + 1) * tile + shift], where
        // shift is at most half a tile
        let along_lo = ((min_along - tile_along * 1.5) / tile_along).floor();
        let along_hi = (max_along / tile_along).ceil();

        let min = self.join_coords(
            clamp_visible_index(along_lo),
            clamp_visible_index(across_lo),
        );
        let max = self.join_coords(
            clamp_visible_index(along_hi),
            clamp_visible_index(across_hi),
        );
        // Both ends are inclusive, but cell ranges are half-open
        RectI::from_min_max(min, max + Vector2i::new(1, 1))
    }

    /// Neighbor offsets for a cell, chosen by axis and whether the cell's line
    /// is shifted
    pub fn neighbor_offsets(&self, coords: Vector2i) -> &'static [(i32, i32)] {
        let (_, line) = self.split_coords(coords);
        match (self.axis, self.is_shifted(line)) {
            (CellAxis::X, false) => &COLUMN_UNSHIFTED,
            (CellAxis::X, true) => &COLUMN_SHIFTED,
            (CellAxis::Y, false) => &ROW_UNSHIFTED,
            (CellAxis::Y, true) => &ROW_SHIFTED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(axis: CellAxis, index: CellIndex) -> StaggerLayout {
        StaggerLayout {
            tile_size: Vector2f::new(20.0, 10.0),
            axis,
            index,
            line_step: 10.0,
        }
    }

    #[test]
    fn test_is_shifted() {
        let odd = layout(CellAxis::Y, CellIndex::Odd);
        let even = layout(CellAxis::Y, CellIndex::Even);
        for line in -3..4 {
            assert_ne!(odd.is_shifted(line), even.is_shifted(line));
        }
        assert!(odd.is_shifted(1));
        assert!(odd.is_shifted(-1));
        assert!(!odd.is_shifted(-2));
        assert!(even.is_shifted(0));
    }

    #[test]
    fn test_split_join() {
        let layout = layout(CellAxis::X, CellIndex::Odd);
        let coords = Vector2i::new(3, 7);
        let (along, across) = layout.split_coords(coords);
        assert_eq!((along, across), (7, 3));
        assert_eq!(layout.join_coords(along, across), coords);
    }

    #[test]
    fn test_bounds_single_line() {
        // One unshifted row: no overhang at all
        let odd = layout(CellAxis::Y, CellIndex::Odd);
        assert_eq!(
            odd.bounds(Vector2i::new(3, 1)),
            RectF::from_size(Vector2f::new(60.0, 10.0))
        );
        // One shifted row: the whole layer moves right
        let even = layout(CellAxis::Y, CellIndex::Even);
        assert_eq!(
            even.bounds(Vector2i::new(3, 1)),
            RectF::new(Vector2f::new(10.0, 0.0), Vector2f::new(60.0, 10.0))
        );
    }

    #[test]
    fn test_bounds_empty() {
        let layout = layout(CellAxis::Y, CellIndex::Odd);
        assert_eq!(layout.bounds(Vector2i::new(0, 5)), RectF::zero());
        assert_eq!(layout.bounds(Vector2i::new(5, -1)), RectF::zero());
    }

    #[test]
    fn test_visible_area_huge() {
        let local = RectF::new(
            Vector2f::new(-1e12, -1e12),
            Vector2f::new(2e12, 2e12),
        );
        for axis in [CellAxis::X, CellAxis::Y] {
            let area = layout(axis, CellIndex::Even).visible_area(&local);
            assert!(area.contains(Vector2i::new(0, 0)));
            assert!(area.contains(Vector2i::new(-500_000_000, 500_000_000)));
        }
    }

    #[test]
    fn test_neighbor_tables_symmetric() {
        // Every offset from a shifted line must be undone by an offset from
        // the unshifted line it lands in, and vice versa
        let pairs = [
            (&ROW_UNSHIFTED, &ROW_SHIFTED, CellAxis::Y),
            (&COLUMN_UNSHIFTED, &COLUMN_SHIFTED, CellAxis::X),
        ];
        for (unshifted, shifted, axis) in pairs {
            for (from, to) in [(unshifted, shifted), (shifted, unshifted)] {
                for &(dx, dy) in from.iter() {
                    let crosses_line = match axis {
                        CellAxis::X => dx != 0,
                        CellAxis::Y => dy != 0,
                    };
                    let back_table = if crosses_line { to } else { from };
                    assert!(
                        back_table.contains(&(-dx, -dy)),
                        "offset ({}, {}) has no inverse",
                        dx,
                        dy
                    );
                }
            }
        }
    }
}
