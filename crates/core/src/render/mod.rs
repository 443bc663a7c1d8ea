//! Whole-layer geometry, built on top of the per-cell [Cells] operations. This
//! is everything a presentation layer needs to draw a layer's grid: the line
//! segments of the grid outline and the outline of every cell.
//!
//! Unlike the per-cell operations, everything here is linear in the number of
//! cells in the layer.

#[cfg(feature = "svg")]
pub mod svg;

use crate::{
    cells::{AnyCells, Cells},
    geometry::{Polyline, RectF, RectI, Vector2f, Vector2i},
    timed,
};
use log::debug;
use serde::{Deserialize, Serialize};

/// A single straight line, as `(start, end)`
pub type Segment = (Vector2f, Vector2f);

/// The line segments that outline every cell of a layer.
///
/// For orthogonal cells, edges shared between cells line up into full-length
/// lines, so the grid is `width + 1` vertical lines followed by `height + 1`
/// horizontal ones. For every other topology, each cell's outline is emitted
/// edge by edge, so edges shared by two cells show up twice.
#[derive(Clone, Debug, PartialEq)]
pub struct GridLines {
    segments: Vec<Segment>,
    local_bounds: RectF,
}

impl GridLines {
    pub fn new(
        cells: &AnyCells,
        layer_size: Vector2i,
        line_width: f32,
    ) -> Self {
        let segments = timed!("Grid line generation", {
            match cells {
                AnyCells::Orthogonal(_) => full_length_lines(cells, layer_size),
                _ => RectI::from_size(layer_size)
                    .iter()
                    .flat_map(|coords| {
                        cells
                            .compute_polyline(coords)
                            .segments()
                            .collect::<Vec<_>>()
                    })
                    .collect(),
            }
        });
        debug!(
            "Generated {} grid line segments for {}x{} layer",
            segments.len(),
            layer_size.x,
            layer_size.y
        );

        Self {
            segments,
            local_bounds: cells.compute_bounds(layer_size).grow(line_width),
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The area covered by the grid lines once they're drawn. This is the
    /// layer bounds, grown by the line width on every side.
    pub fn local_bounds(&self) -> RectF {
        self.local_bounds
    }
}

/// Grid lines for a rectangular grid, where each row/column boundary is one
/// straight line across the entire layer
fn full_length_lines(cells: &AnyCells, layer_size: Vector2i) -> Vec<Segment> {
    if layer_size.x <= 0 || layer_size.y <= 0 {
        return Vec::new();
    }
    let bounds = cells.compute_bounds(layer_size);
    let min = bounds.min();
    let max = bounds.max();

    // Cell (n, n) starts at the n-th line in both directions, including the
    // cell one past the end of the layer
    let line_start =
        |n: i32| cells.compute_cell_bounds(Vector2i::new(n, n)).position;
    let vertical = (0..=layer_size.x).map(|column| {
        let x = line_start(column).x;
        (Vector2f::new(x, min.y), Vector2f::new(x, max.y))
    });
    let horizontal = (0..=layer_size.y).map(|row| {
        let y = line_start(row).y;
        (Vector2f::new(min.x, y), Vector2f::new(max.x, y))
    });
    vertical.chain(horizontal).collect()
}

/// Geometry of a single cell
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CellGeometry {
    pub coords: Vector2i,
    pub bounds: RectF,
    pub polyline: Polyline,
}

/// Pre-computed geometry for every cell of a layer, row by row. Mostly useful
/// for exporting to other tools.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayerGeometry {
    pub layer_size: Vector2i,
    pub bounds: RectF,
    pub cells: Vec<CellGeometry>,
}

impl LayerGeometry {
    pub fn new(cells: &impl Cells, layer_size: Vector2i) -> Self {
        let cell_geometry = timed!("Layer geometry", {
            RectI::from_size(layer_size)
                .iter()
                .map(|coords| CellGeometry {
                    coords,
                    bounds: cells.compute_cell_bounds(coords),
                    polyline: cells.compute_polyline(coords),
                })
                .collect()
        });
        Self {
            layer_size,
            bounds: cells.compute_bounds(layer_size),
            cells: cell_geometry,
        }
    }

    /// Serialize to pretty-printed JSON
    #[cfg(feature = "json")]
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cells::{
        CellAxis, CellIndex, HexagonalCells, OrthogonalCells, StaggeredCells,
    };

    fn orthogonal() -> AnyCells {
        OrthogonalCells::new(Vector2f::new(32.0, 32.0)).into()
    }

    #[test]
    fn test_orthogonal_grid_lines() {
        let lines = GridLines::new(&orthogonal(), Vector2i::new(3, 2), 2.0);
        let segments = lines.segments();
        assert_eq!(segments.len(), 4 + 3);
        assert_eq!(
            segments[0],
            (Vector2f::new(0.0, 0.0), Vector2f::new(0.0, 64.0))
        );
        assert_eq!(
            segments[3],
            (Vector2f::new(96.0, 0.0), Vector2f::new(96.0, 64.0))
        );
        assert_eq!(
            segments[6],
            (Vector2f::new(0.0, 64.0), Vector2f::new(96.0, 64.0))
        );
        assert_eq!(
            lines.local_bounds(),
            RectF::new(Vector2f::new(-2.0, -2.0), Vector2f::new(100.0, 68.0))
        );
    }

    #[test]
    fn test_cell_outline_grid_lines() {
        let layer_size = Vector2i::new(2, 2);
        let hexagonal: AnyCells =
            HexagonalCells::regular(10.0, CellAxis::Y, CellIndex::Odd).into();
        assert_eq!(
            GridLines::new(&hexagonal, layer_size, 1.0).segments().len(),
            4 * 6
        );
        let staggered: AnyCells = StaggeredCells::new(
            Vector2f::new(20.0, 10.0),
            CellAxis::X,
            CellIndex::Odd,
        )
        .into();
        assert_eq!(
            GridLines::new(&staggered, layer_size, 1.0).segments().len(),
            4 * 4
        );
    }

    #[test]
    fn test_empty_layer() {
        for layer_size in [Vector2i::new(0, 0), Vector2i::new(5, 0)] {
            let lines = GridLines::new(&orthogonal(), layer_size, 1.0);
            assert!(lines.segments().is_empty());
        }
    }

    #[test]
    fn test_layer_geometry() {
        let cells = orthogonal();
        let geometry = LayerGeometry::new(&cells, Vector2i::new(2, 3));
        assert_eq!(geometry.cells.len(), 6);
        assert_eq!(geometry.bounds, cells.compute_bounds(Vector2i::new(2, 3)));
        // Row by row
        assert_eq!(geometry.cells[1].coords, Vector2i::new(1, 0));
        assert_eq!(geometry.cells[2].coords, Vector2i::new(0, 1));
        for cell in &geometry.cells {
            assert_eq!(cell.bounds, cells.compute_cell_bounds(cell.coords));
            assert_eq!(cell.polyline.len(), 4);
        }
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_layer_geometry_json() {
        let geometry = LayerGeometry::new(&orthogonal(), Vector2i::new(1, 1));
        let json = geometry.to_json().unwrap();
        let parsed: LayerGeometry = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, geometry);
    }
}
