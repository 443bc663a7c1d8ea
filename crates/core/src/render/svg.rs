use crate::{
    cells::{AnyCells, Cells},
    geometry::{RectI, Vector2i},
};
use svg::{
    node::{
        element::{Group, Polygon},
        Comment,
    },
    Document,
};

const LINE_COLOR: &str = "#202020";

/// Render the grid of a layer as an SVG. Each cell is drawn as an unfilled
/// polygon outline, and the view box covers the whole grid including the
/// thickness of the outline. That's the same area as
/// [crate::GridLines::local_bounds].
pub fn layer_to_svg(
    cells: &AnyCells,
    layer_size: Vector2i,
    line_width: f32,
) -> Document {
    let view_box = cells.compute_bounds(layer_size).grow(line_width);

    let mut grid = Group::new()
        .set("fill", "none")
        .set("stroke", LINE_COLOR)
        .set("stroke-width", line_width);
    for coords in RectI::from_size(layer_size).iter() {
        grid = grid.add(draw_cell(cells, coords));
    }

    Document::new()
        .set(
            "viewBox",
            (
                // Top-left corner
                view_box.position.x,
                view_box.position.y,
                // Width and height
                view_box.size.x,
                view_box.size.y,
            ),
        )
        .add(Comment::new(format!("\n{:#?}\n", cells)))
        .add(grid)
}

/// Generate an SVG polygon for a single cell
fn draw_cell(cells: &AnyCells, coords: Vector2i) -> Polygon {
    let points = cells
        .compute_polyline(coords)
        .points()
        .iter()
        .map(|point| (point.x, point.y))
        .collect::<Vec<_>>();
    Polygon::new()
        .set("points", points)
        .set("data-coords", format!("{},{}", coords.x, coords.y))
}
