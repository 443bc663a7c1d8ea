//! Cell topologies. Each topology knows how to lay out the cells of a layer in
//! world space, how to find the cell under a point, and which cells are
//! adjacent to each other.
//!
//! There are three topologies:
//!
//! - [OrthogonalCells]: plain square (or rectangular) cells
//! - [StaggeredCells]: rectangular cells where every other row (or column) is
//!   shifted by half a tile, like a brick wall
//! - [HexagonalCells]: hexagons, pointy-topped or flat-topped
//!
//! All of them implement [Cells], and [AnyCells] wraps whichever one a layer
//! uses. Every operation is a pure function of the construction parameters and
//! its arguments, so instances can be shared freely between threads.
//!
//! ## Staggering
//!
//! Staggered and hexagonal layouts share the same vocabulary. The [CellAxis]
//! picks which **lines** are staggered: rows for [CellAxis::Y], columns for
//! [CellAxis::X]. The [CellIndex] picks which lines get shifted: odd or even.
//! A shifted row moves half a tile to the right, a shifted column moves half a
//! tile down.
//!
//! ```
//! use tilecells::{
//!     CellAxis, CellIndex, Cells, HexagonalCells, NeighborQuery, Vector2i,
//! };
//!
//! let cells = HexagonalCells::regular(10.0, CellAxis::Y, CellIndex::Odd);
//! let neighbors = cells.compute_neighbors(
//!     Vector2i::new(0, 0),
//!     Vector2i::new(8, 8),
//!     NeighborQuery::VALID,
//! );
//! assert_eq!(neighbors.len(), 2);
//! ```

mod hexagonal;
mod orthogonal;
mod stagger;
mod staggered;

pub use self::{
    hexagonal::HexagonalCells, orthogonal::OrthogonalCells,
    staggered::StaggeredCells,
};

use crate::geometry::{Polyline, RectF, RectI, Vector2f, Vector2i};
use derive_more::{BitAnd, BitAndAssign, BitOr, BitOrAssign, From};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use strum::{Display, EnumIter, EnumString};

/// Modifiers for [Cells::compute_neighbors]. Combine with `|`.
///
/// ```
/// use tilecells::NeighborQuery;
///
/// let flags = NeighborQuery::VALID | NeighborQuery::DIAGONAL;
/// assert!(flags.contains(NeighborQuery::VALID));
/// assert!(!NeighborQuery::NONE.contains(NeighborQuery::DIAGONAL));
/// ```
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    BitAnd,
    BitOr,
    BitAndAssign,
    BitOrAssign,
)]
pub struct NeighborQuery(u8);

impl NeighborQuery {
    /// No modifiers: orthogonal neighbors only, no bounds filtering
    pub const NONE: Self = Self(0x00);
    /// Only return neighbors inside `[0, layer_size)`
    pub const VALID: Self = Self(0x01);
    /// Include diagonal neighbors. Only the orthogonal topology has any; the
    /// staggered and hexagonal topologies ignore this flag.
    pub const DIAGONAL: Self = Self(0x02);

    /// Are all the flags in `other` set in `self`?
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn bits(self) -> u8 {
        self.0
    }
}

/// Which lines of a staggered or hexagonal layout are offset. This also picks
/// the hexagon orientation.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CellAxis {
    /// Columns are staggered, shifted columns move down. Hexagons are
    /// flat-topped.
    X,
    /// Rows are staggered, shifted rows move right. Hexagons are
    /// pointy-topped.
    Y,
}

/// Which parity of rows/columns gets shifted in a staggered or hexagonal
/// layout
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CellIndex {
    Odd,
    Even,
}

/// The geometric properties of a grid of cells. One implementation per
/// topology; see the module docs for the list.
///
/// Every operation is total. Coordinates outside of any layer are computed
/// as if the grid extended forever, and nothing here ever fails at runtime.
pub trait Cells: Debug + Send + Sync {
    /// Bounding box of an entire layer of `layer_size` cells. This is exactly
    /// the union of [Self::compute_cell_bounds] over every cell of the layer.
    /// An empty layer gets the zero rectangle.
    fn compute_bounds(&self, layer_size: Vector2i) -> RectF;

    /// The range of cells that could be visible through the world-space
    /// rectangle `local`. This may include some cells that aren't actually
    /// visible, but will **never** leave out a cell whose bounds intersect
    /// `local`.
    fn compute_visible_area(&self, local: &RectF) -> RectI;

    /// Bounding box of a single cell
    fn compute_cell_bounds(&self, coords: Vector2i) -> RectF;

    /// The cell containing a world-space point. The center of any cell's
    /// bounds maps back to that cell.
    fn compute_coordinates(&self, position: Vector2f) -> Vector2i;

    /// Closed outline of a cell. Vertices are always in clockwise order, and
    /// every cell of a topology starts from the same vertex.
    fn compute_polyline(&self, coords: Vector2i) -> Polyline;

    /// Cells adjacent to `coords`, in a fixed clockwise order. See
    /// [NeighborQuery] for the available modifiers. `layer_size` is only used
    /// when [NeighborQuery::VALID] is set.
    fn compute_neighbors(
        &self,
        coords: Vector2i,
        layer_size: Vector2i,
        flags: NeighborQuery,
    ) -> Vec<Vector2i>;
}

/// Any one of the cell topologies. This is what a layer holds when its
/// topology is only known at runtime (e.g. loaded from a
/// [CellsConfig](crate::CellsConfig)).
#[derive(Copy, Clone, Debug, PartialEq, From)]
pub enum AnyCells {
    Orthogonal(OrthogonalCells),
    Staggered(StaggeredCells),
    Hexagonal(HexagonalCells),
}

/// Forward a method call to whichever topology is inside an [AnyCells]
macro_rules! dispatch {
    ($self:ident, $cells:ident => $ex:expr) => {
        match $self {
            AnyCells::Orthogonal($cells) => $ex,
            AnyCells::Staggered($cells) => $ex,
            AnyCells::Hexagonal($cells) => $ex,
        }
    };
}

impl Cells for AnyCells {
    fn compute_bounds(&self, layer_size: Vector2i) -> RectF {
        dispatch!(self, cells => cells.compute_bounds(layer_size))
    }

    fn compute_visible_area(&self, local: &RectF) -> RectI {
        dispatch!(self, cells => cells.compute_visible_area(local))
    }

    fn compute_cell_bounds(&self, coords: Vector2i) -> RectF {
        dispatch!(self, cells => cells.compute_cell_bounds(coords))
    }

    fn compute_coordinates(&self, position: Vector2f) -> Vector2i {
        dispatch!(self, cells => cells.compute_coordinates(position))
    }

    fn compute_polyline(&self, coords: Vector2i) -> Polyline {
        dispatch!(self, cells => cells.compute_polyline(coords))
    }

    fn compute_neighbors(
        &self,
        coords: Vector2i,
        layer_size: Vector2i,
        flags: NeighborQuery,
    ) -> Vec<Vector2i> {
        dispatch!(self, cells => {
            cells.compute_neighbors(coords, layer_size, flags)
        })
    }
}

/// Is the cell inside a layer of the given size?
pub fn is_in_layer(coords: Vector2i, layer_size: Vector2i) -> bool {
    RectI::from_size(layer_size).contains(coords)
}

/// Furthest cell index a visible area can reach in any direction. Keeps
/// `max + 1` and `max - min` within i32.
const MAX_VISIBLE_INDEX: f32 = (1 << 29) as f32;

/// Convert an already-rounded cell index from a visible area computation to an
/// integer, clamping it to [MAX_VISIBLE_INDEX] so that arbitrarily large view
/// rectangles still produce a usable range
fn clamp_visible_index(index: f32) -> i32 {
    index.clamp(-MAX_VISIBLE_INDEX, MAX_VISIBLE_INDEX) as i32
}

/// Apply a list of relative offsets to a cell, dropping the results that fall
/// outside the layer if [NeighborQuery::VALID] is set. Order is preserved.
fn offset_neighbors(
    coords: Vector2i,
    offsets: &[(i32, i32)],
    layer_size: Vector2i,
    flags: NeighborQuery,
) -> Vec<Vector2i> {
    let valid_only = flags.contains(NeighborQuery::VALID);
    offsets
        .iter()
        .map(|&(dx, dy)| coords + Vector2i::new(dx, dy))
        .filter(|neighbor| !valid_only || is_in_layer(*neighbor, layer_size))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_neighbor_query_flags() {
        let both = NeighborQuery::VALID | NeighborQuery::DIAGONAL;
        assert!(both.contains(NeighborQuery::VALID));
        assert!(both.contains(NeighborQuery::DIAGONAL));
        assert!(both.contains(NeighborQuery::NONE));
        assert_eq!(both.bits(), 0x03);
        assert_eq!(both & NeighborQuery::DIAGONAL, NeighborQuery::DIAGONAL);

        let mut flags = NeighborQuery::default();
        assert_eq!(flags, NeighborQuery::NONE);
        flags |= NeighborQuery::VALID;
        assert!(flags.contains(NeighborQuery::VALID));
        assert!(!flags.contains(NeighborQuery::DIAGONAL));
    }

    #[test]
    fn test_offset_neighbors_valid() {
        let offsets = [(-1, 0), (1, 0), (0, 5)];
        let coords = Vector2i::new(0, 0);
        let layer_size = Vector2i::new(2, 2);
        assert_eq!(
            offset_neighbors(coords, &offsets, layer_size, NeighborQuery::NONE),
            vec![
                Vector2i::new(-1, 0),
                Vector2i::new(1, 0),
                Vector2i::new(0, 5)
            ]
        );
        assert_eq!(
            offset_neighbors(
                coords,
                &offsets,
                layer_size,
                NeighborQuery::VALID
            ),
            vec![Vector2i::new(1, 0)]
        );
    }

    #[test]
    fn test_clamp_visible_index() {
        assert_eq!(clamp_visible_index(-3.0), -3);
        assert_eq!(clamp_visible_index(1e12), 1 << 29);
        assert_eq!(clamp_visible_index(f32::NEG_INFINITY), -(1 << 29));
        // Both ends of a clamped range can be widened without overflow
        let max = clamp_visible_index(f32::MAX);
        let min = clamp_visible_index(f32::MIN);
        assert!((max + 1).checked_sub(min).is_some());
    }

    #[test]
    fn test_enum_strings() {
        assert_eq!(CellAxis::from_str("x").unwrap(), CellAxis::X);
        assert_eq!(CellIndex::from_str("even").unwrap(), CellIndex::Even);
        assert_eq!(CellIndex::Odd.to_string(), "odd");
        assert!(CellAxis::from_str("z").is_err());
    }
}
