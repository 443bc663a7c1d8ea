use crate::{
    cells::{clamp_visible_index, offset_neighbors, Cells, NeighborQuery},
    geometry::{Polyline, RectF, RectI, Vector2f, Vector2i},
};
use serde::{Deserialize, Serialize};

/// North, east, south, west
const CARDINAL_OFFSETS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];
/// Cardinals followed by northeast, southeast, southwest, northwest
const ALL_OFFSETS: [(i32, i32); 8] = [
    (0, -1),
    (1, 0),
    (0, 1),
    (-1, 0),
    (1, -1),
    (1, 1),
    (-1, 1),
    (-1, -1),
];

/// Square (or rectangular) cells in a plain grid. Cell `(x, y)` sits at
/// `(x, y) * tile_size`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrthogonalCells {
    tile_size: Vector2f,
}

impl OrthogonalCells {
    /// Both tile size components must be positive
    pub fn new(tile_size: Vector2f) -> Self {
        debug_assert!(
            tile_size.x > 0.0 && tile_size.y > 0.0,
            "tile size must be positive, got {:?}",
            tile_size
        );
        Self { tile_size }
    }

    pub fn tile_size(&self) -> Vector2f {
        self.tile_size
    }
}

impl Cells for OrthogonalCells {
    fn compute_bounds(&self, layer_size: Vector2i) -> RectF {
        if layer_size.x <= 0 || layer_size.y <= 0 {
            return RectF::zero();
        }
        RectF::from_size(
            layer_size.map(|c| c as f32).component_mul(&self.tile_size),
        )
    }

    fn compute_visible_area(&self, local: &RectF) -> RectI {
        let min = local
            .min()
            .component_div(&self.tile_size)
            .map(|c| clamp_visible_index(c.floor()));
        let max = local
            .max()
            .component_div(&self.tile_size)
            .map(|c| clamp_visible_index(c.ceil()));
        // `max` is inclusive
        RectI::from_min_max(min, max + Vector2i::new(1, 1))
    }

    fn compute_cell_bounds(&self, coords: Vector2i) -> RectF {
        RectF::new(
            coords.map(|c| c as f32).component_mul(&self.tile_size),
            self.tile_size,
        )
    }

    fn compute_coordinates(&self, position: Vector2f) -> Vector2i {
        position
            .component_div(&self.tile_size)
            .map(|c| c.floor() as i32)
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
        let offsets: &[(i32, i32)] =
            if flags.contains(NeighborQuery::DIAGONAL) {
                &ALL_OFFSETS
            } else {
                &CARDINAL_OFFSETS
            };
        offset_neighbors(coords, offsets, layer_size, flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells() -> OrthogonalCells {
        OrthogonalCells::new(Vector2f::new(32.0, 32.0))
    }

    #[test]
    fn test_bounds() {
        assert_eq!(
            cells().compute_bounds(Vector2i::new(10, 4)),
            RectF::from_size(Vector2f::new(320.0, 128.0))
        );
        assert_eq!(cells().compute_bounds(Vector2i::new(0, 4)), RectF::zero());
    }

    #[test]
    fn test_cell_bounds() {
        assert_eq!(
            cells().compute_cell_bounds(Vector2i::new(2, 3)),
            RectF::new(Vector2f::new(64.0, 96.0), Vector2f::new(32.0, 32.0))
        );
        // Negative coordinates are fine too
        assert_eq!(
            cells().compute_cell_bounds(Vector2i::new(-1, 0)).position,
            Vector2f::new(-32.0, 0.0)
        );
    }

    #[test]
    fn test_coordinates() {
        let cells = cells();
        assert_eq!(
            cells.compute_coordinates(Vector2f::new(0.0, 0.0)),
            Vector2i::new(0, 0)
        );
        assert_eq!(
            cells.compute_coordinates(Vector2f::new(31.9, 32.0)),
            Vector2i::new(0, 1)
        );
        assert_eq!(
            cells.compute_coordinates(Vector2f::new(-0.1, 70.0)),
            Vector2i::new(-1, 2)
        );
    }

    #[test]
    fn test_visible_area() {
        let area = cells().compute_visible_area(&RectF::new(
            Vector2f::new(40.0, -10.0),
            Vector2f::new(50.0, 20.0),
        ));
        // x: floor(40/32)=1 to ceil(90/32)=3, y: floor(-10/32)=-1 to
        // ceil(10/32)=1
        assert_eq!(area, RectI::new(Vector2i::new(1, -1), Vector2i::new(3, 3)));
    }

    #[test]
    fn test_visible_area_huge() {
        let area = cells().compute_visible_area(&RectF::new(
            Vector2f::new(-1e12, -1e12),
            Vector2f::new(2e12, 2e12),
        ));
        assert!(area.contains(Vector2i::new(0, 0)));
        assert!(area.contains(Vector2i::new(-500_000_000, 500_000_000)));
    }

    #[test]
    fn test_polyline() {
        let polyline = cells().compute_polyline(Vector2i::new(1, 0));
        assert!(polyline.is_closed());
        assert_eq!(
            polyline.points(),
            &[
                Vector2f::new(32.0, 0.0),
                Vector2f::new(64.0, 0.0),
                Vector2f::new(64.0, 32.0),
                Vector2f::new(32.0, 32.0),
            ]
        );
    }

    #[test]
    fn test_neighbors() {
        let cells = cells();
        let coords = Vector2i::new(1, 1);
        let layer_size = Vector2i::new(3, 3);
        assert_eq!(
            cells.compute_neighbors(coords, layer_size, NeighborQuery::VALID),
            vec![
                Vector2i::new(1, 0),
                Vector2i::new(2, 1),
                Vector2i::new(1, 2),
                Vector2i::new(0, 1),
            ]
        );
        assert_eq!(
            cells
                .compute_neighbors(coords, layer_size, NeighborQuery::DIAGONAL)
                .len(),
            8
        );
    }

    #[test]
    fn test_neighbors_corner() {
        let cells = cells();
        let origin = Vector2i::new(0, 0);
        let layer_size = Vector2i::new(3, 3);
        assert_eq!(
            cells.compute_neighbors(origin, layer_size, NeighborQuery::NONE),
            vec![
                Vector2i::new(0, -1),
                Vector2i::new(1, 0),
                Vector2i::new(0, 1),
                Vector2i::new(-1, 0),
            ]
        );
        assert_eq!(
            cells.compute_neighbors(
                origin,
                layer_size,
                NeighborQuery::VALID | NeighborQuery::DIAGONAL
            ),
            vec![Vector2i::new(1, 0), Vector2i::new(0, 1), Vector2i::new(1, 1)]
        );
    }
}
