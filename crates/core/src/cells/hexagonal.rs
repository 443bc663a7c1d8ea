use crate::{
    cells::{
        offset_neighbors, stagger::StaggerLayout, CellAxis, CellIndex, Cells,
        NeighborQuery,
    },
    geometry::{Polyline, RectF, RectI, Vector2f, Vector2i},
};

/// sqrt(3). `f32::sqrt` isn't const
const SQRT_3: f32 = 1.732_050_8;

/// Hexagonal cells. [CellAxis::Y] gives pointy-topped hexagons in staggered
/// rows, [CellAxis::X] gives flat-topped hexagons in staggered columns.
///
/// Each hexagon fits in a `tile_size` bounding box. `side_length` is the
/// length of the two edges that run parallel to the staggered lines (the
/// vertical edges of a pointy-topped hexagon, the horizontal edges of a
/// flat-topped one). Consecutive lines overlap, so they are
/// `(tile + side_length) / 2` apart instead of a full tile. For a regular
/// hexagon that's three quarters of a tile.
///
/// See this page for a great explanation of hex grids, including the offset
/// and cube coordinate systems used here:
/// https://www.redblobgames.com/grids/hexagons/
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HexagonalCells {
    layout: StaggerLayout,
    side_length: f32,
}

impl HexagonalCells {
    /// Hexagons with an arbitrary bounding box. Tile size and side length
    /// must be positive, and the side length can't be longer than the tile
    /// across the staggered lines.
    pub fn new(
        tile_size: Vector2f,
        side_length: f32,
        axis: CellAxis,
        index: CellIndex,
    ) -> Self {
        debug_assert!(
            tile_size.x > 0.0 && tile_size.y > 0.0,
            "tile size must be positive, got {:?}",
            tile_size
        );
        debug_assert!(
            side_length > 0.0,
            "side length must be positive, got {}",
            side_length
        );
        let tile_across = match axis {
            CellAxis::X => tile_size.x,
            CellAxis::Y => tile_size.y,
        };
        debug_assert!(
            side_length <= tile_across,
            "side length {} is longer than the tile across lines ({})",
            side_length,
            tile_across
        );
        Self {
            layout: StaggerLayout {
                tile_size,
                axis,
                index,
                line_step: (tile_across + side_length) / 2.0,
            },
            side_length,
        }
    }

    /// Regular hexagons with the given circumradius (center-to-vertex
    /// distance, which is also the side length)
    pub fn regular(radius: f32, axis: CellAxis, index: CellIndex) -> Self {
        Self::new(Self::compute_regular_size(axis, radius), radius, axis, index)
    }

    /// Get the bounding box size of a regular hexagon. The hexagon is `2 *
    /// radius` long between its two pointy vertices and `sqrt(3) * radius`
    /// between its two flat sides.
    pub fn compute_regular_size(axis: CellAxis, radius: f32) -> Vector2f {
        match axis {
            // Flat top, points left and right
            CellAxis::X => Vector2f::new(2.0 * radius, SQRT_3 * radius),
            // Pointy top
            CellAxis::Y => Vector2f::new(SQRT_3 * radius, 2.0 * radius),
        }
    }

    pub fn tile_size(&self) -> Vector2f {
        self.layout.tile_size
    }

    pub fn side_length(&self) -> f32 {
        self.side_length
    }

    pub fn axis(&self) -> CellAxis {
        self.layout.axis
    }

    pub fn index(&self) -> CellIndex {
        self.layout.index
    }

    /// The cell whose center is nearest to `position` after scaling the
    /// layout onto a regular hexagon lattice. For regular hexagons this is
    /// exactly the cell containing the point.
    fn nearest_lattice_cell(&self, position: Vector2f) -> Vector2i {
        // Everything happens in (along, across) space. In that space, both
        // axes look like pointy-topped hexagons in staggered rows (a
        // flat-topped layout is the same thing mirrored across the diagonal),
        // so there's only one set of formulas.
        let layout = &self.layout;
        let (tile_along, _) = layout.tile_extent();
        let origin = layout.cell_bounds(Vector2i::new(0, 0)).center();
        let (along, across) = layout.split(position - origin);

        // Scale so that cell centers land on the lattice of a regular hexagon
        // grid with radius 1. For regular hexagons this is a uniform scale
        let x = along / tile_along * SQRT_3;
        let y = across / layout.line_step * 1.5;

        // Pixel to fractional axial, then round in cube space
        let q = SQRT_3 / 3.0 * x - y / 3.0;
        let r = 2.0 / 3.0 * y;
        let (q, r) = cube_round(q, r);

        // Axial back to offset. Cell (0, 0) is the axial origin, and lines
        // of the opposite parity are shifted relative to it.
        let cell = if layout.is_shifted(0) {
            // Even lines shifted, so odd lines sit back half a tile
            q + (r + (r & 1)) / 2
        } else {
            q + (r - (r & 1)) / 2
        };
        layout.join_coords(cell, r)
    }
}

impl Cells for HexagonalCells {
    fn compute_bounds(&self, layer_size: Vector2i) -> RectF {
        self.layout.bounds(layer_size)
    }

    fn compute_visible_area(&self, local: &RectF) -> RectI {
        self.layout.visible_area(local)
    }

    fn compute_cell_bounds(&self, coords: Vector2i) -> RectF {
        self.layout.cell_bounds(coords)
    }

    fn compute_coordinates(&self, position: Vector2f) -> Vector2i {
        // The lattice only matches the outlines exactly for regular hexagons.
        // Otherwise it can be off by one cell near the vertices, so the
        // outlines of the guess and its neighbors have the final say.
        let guess = self.nearest_lattice_cell(position);
        let neighbors = self
            .layout
            .neighbor_offsets(guess)
            .iter()
            .map(|&(dx, dy)| guess + Vector2i::new(dx, dy));
        std::iter::once(guess)
            .chain(neighbors)
            .find(|&coords| {
                outline_contains(&self.compute_polyline(coords), position)
            })
            // Only reachable through float error right on an edge
            .unwrap_or(guess)
    }

    fn compute_polyline(&self, coords: Vector2i) -> Polyline {
        let bounds = self.compute_cell_bounds(coords);
        let (x, y) = (bounds.position.x, bounds.position.y);
        let (w, h) = (bounds.size.x, bounds.size.y);
        let s = self.side_length;

        // Clockwise (y points down). For regular hexagons the first vertex is
        // at 0° (flat) or 30° (pointy), then each one 60° further
        let points = match self.layout.axis {
            CellAxis::X => vec![
                Vector2f::new(x + w, y + h / 2.0),
                Vector2f::new(x + (w + s) / 2.0, y + h),
                Vector2f::new(x + (w - s) / 2.0, y + h),
                Vector2f::new(x, y + h / 2.0),
                Vector2f::new(x + (w - s) / 2.0, y),
                Vector2f::new(x + (w + s) / 2.0, y),
            ],
            CellAxis::Y => vec![
                Vector2f::new(x + w, y + (h + s) / 2.0),
                Vector2f::new(x + w / 2.0, y + h),
                Vector2f::new(x, y + (h + s) / 2.0),
                Vector2f::new(x, y + (h - s) / 2.0),
                Vector2f::new(x + w / 2.0, y),
                Vector2f::new(x + w, y + (h - s) / 2.0),
            ],
        };
        Polyline::closed(points)
    }

    fn compute_neighbors(
        &self,
        coords: Vector2i,
        layer_size: Vector2i,
        flags: NeighborQuery,
    ) -> Vec<Vector2i> {
        offset_neighbors(
            coords,
            self.layout.neighbor_offsets(coords),
            layer_size,
            flags,
        )
    }
}

/// Is the point inside (or on the edge of) a convex outline? The outline must
/// be wound clockwise on screen, like every cell outline.
fn outline_contains(outline: &Polyline, point: Vector2f) -> bool {
    outline.segments().all(|(start, end)| {
        let edge = end - start;
        let offset = point - start;
        // With y pointing down, the inside is on the right of each edge
        edge.x * offset.y - edge.y * offset.x >= 0.0
    })
}

/// Round fractional axial coordinates to the nearest hexagon. Each cube
/// component `(q, r, s)` is rounded on its own, which can break `q + r + s =
/// 0`. Whichever component moved the most gets recomputed from the other two.
/// https://www.redblobgames.com/grids/hexagons/#rounding
fn cube_round(q: f32, r: f32) -> (i32, i32) {
    let s = -q - r;
    let mut rq = q.round();
    let mut rr = r.round();
    let rs = s.round();

    let dq = (rq - q).abs();
    let dr = (rr - r).abs();
    let ds = (rs - s).abs();

    if dq > dr && dq > ds {
        rq = -rr - rs;
    } else if dr > ds {
        rr = -rq - rs;
    }
    // Otherwise s was the worst, and we don't return it anyway

    (rq as i32, rr as i32)
}
