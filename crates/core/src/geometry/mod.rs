//! Value types shared by every cell topology: vectors, rectangles and
//! polylines.
//!
//! ## Coordinate Spaces
//!
//! Two spaces show up everywhere in this crate:
//!
//! - **World space** is continuous, measured in whatever unit the tile size is
//!   given in (usually pixels). Positions and sizes in world space are
//!   [Vector2f]s. The `y` axis points **down**, so "clockwise" in this crate
//!   always means clockwise as seen on a screen.
//! - **Cell space** is discrete. Every cell of a layer has integer coordinates
//!   `(x, y)` = `(column, row)`, stored as a [Vector2i]. Layer dimensions are
//!   also [Vector2i]s, in number of cells.
//!
//! The topologies in [crate::cells] convert between the two.

mod polyline;
mod rect;

pub use self::{
    polyline::{Polyline, PolylineKind},
    rect::{Rect, RectF, RectI},
};

/// A position or size in world space
pub type Vector2f = nalgebra::Vector2<f32>;

/// Cell coordinates, or layer dimensions in cells
pub type Vector2i = nalgebra::Vector2<i32>;
