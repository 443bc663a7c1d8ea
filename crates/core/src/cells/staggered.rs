use crate::{
    cells::{
        offset_neighbors, stagger::StaggerLayout, CellAxis, CellIndex, Cells,
        NeighborQuery,
    },
    geometry::{Polyline, RectF, RectI, Vector2f, Vector2i},
};

/// Rectangular cells laid out like bricks in a wall: every other row (or
/// column) is shifted by half a tile. See the [module docs](crate::cells) for
/// how [CellAxis] and [CellIndex] pick the shifted lines.
///
/// Each cell shares an edge with 6 others: two in its own line and two in
/// each neighboring line. That adjacency already covers the cells an
/// orthogonal grid would call diagonal, so [NeighborQuery::DIAGONAL] changes
/// nothing here.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StaggeredCells {
    layout: StaggerLayout,
}

impl StaggeredCells {
    /// Both tile size components must be positive
    pub fn new(tile_size: Vector2f, axis: CellAxis, index: CellIndex) -> Self {
        debug_assert!(
            tile_size.x > 0.0 && tile_size.y > 0.0,
            "tile size must be positive, got {:?}",
            tile_size
        );
        let line_step = match axis {
            CellAxis::X => tile_size.x,
            CellAxis::Y => tile_size.y,
        };
        Self {
            layout: StaggerLayout {
                tile_size,
                axis,
                index,
                line_step,
            },
        }
    }

    pub fn tile_size(&self) -> Vector2f {
        self.layout.tile_size
    }

    pub fn axis(&self) -> CellAxis {
        self.layout.axis
    }

    pub fn index(&self) -> CellIndex {
        self.layout.index
    }
}

impl Cells for StaggeredCells {
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
        let layout = &self.layout;
        let (tile_along, _) = layout.tile_extent();
        let (along, across) = layout.split(position);
        // Find the line first, that tells us how much it's been shifted
        let line = (across / layout.line_step).floor() as i32;
        let cell = ((along - layout.shift_amount(line)) / tile_along).floor();
        layout.join_coords(cell as i32, line)
    }

    fn compute_polyline(&self, coords: Vector2i) -> Polyline {
        let bounds = self.compute_cell_bounds(coords);
        let min = bounds.min();
        let max = bounds.max();
        Polyline::closed(vec![
            min,
            Vector2f::new(max.x, min.y),
            max,
            Vector2f::new(min.x, max.y),
        ])
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
