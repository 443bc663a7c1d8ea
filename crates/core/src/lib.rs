//! Tilecells is the grid-geometry engine of a tile map. It converts between
//! cell coordinates and world positions, and answers adjacency queries, for
//! three grid topologies: orthogonal (square), staggered (brick wall) and
//! hexagonal. Rendering, pathfinding and map storage are left to other layers;
//! this crate only supplies the geometry they're built on.
//!
//! ```
//! use tilecells::{Cells, NeighborQuery, OrthogonalCells, Vector2f, Vector2i};
//!
//! let cells = OrthogonalCells::new(Vector2f::new(32.0, 32.0));
//! let coords = cells.compute_coordinates(Vector2f::new(70.0, 100.0));
//! assert_eq!(coords, Vector2i::new(2, 3));
//!
//! let neighbors = cells.compute_neighbors(
//!     coords,
//!     Vector2i::new(3, 4),
//!     NeighborQuery::VALID,
//! );
//! assert_eq!(neighbors.len(), 2);
//! ```
//!
//! Layers whose topology is only known at runtime can be described with a
//! [CellsConfig], which builds an [AnyCells]. See [crate::cells] for details
//! on each topology, and [crate::geometry] for the coordinate spaces.

pub mod cells;
mod config;
pub mod geometry;
mod render;
mod util;

pub use crate::{
    cells::{
        is_in_layer, AnyCells, CellAxis, CellIndex, Cells, HexagonalCells,
        NeighborQuery, OrthogonalCells, StaggeredCells,
    },
    config::{CellOrientation, CellsConfig, LayerConfig},
    geometry::{Polyline, PolylineKind, Rect, RectF, RectI, Vector2f, Vector2i},
    render::{CellGeometry, GridLines, LayerGeometry, Segment},
    util::parse_vector2,
};

#[cfg(feature = "svg")]
pub use crate::render::svg::layer_to_svg;
