use crate::geometry::Vector2f;
use serde::{Deserialize, Serialize};

/// Is the polyline open or closed?
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolylineKind {
    /// Open line, the last point is not connected back to the first
    Chain,
    /// Closed line, the last point connects back to the first. Cell outlines
    /// are always loops.
    Loop,
}

/// An ordered sequence of points in world space
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    kind: PolylineKind,
    points: Vec<Vector2f>,
}

impl Polyline {
    pub fn new(kind: PolylineKind, points: Vec<Vector2f>) -> Self {
        Self { kind, points }
    }

    /// Shorthand for a closed polyline
    pub fn closed(points: Vec<Vector2f>) -> Self {
        Self::new(PolylineKind::Loop, points)
    }

    pub fn kind(&self) -> PolylineKind {
        self.kind
    }

    pub fn is_closed(&self) -> bool {
        self.kind == PolylineKind::Loop
    }

    pub fn points(&self) -> &[Vector2f] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate over each segment of the line as `(start, end)`. For closed
    /// lines this includes the segment from the last point back to the first.
    pub fn segments(&self) -> impl Iterator<Item = (Vector2f, Vector2f)> + '_ {
        let closing =
            match (self.kind, self.points.first(), self.points.last()) {
                // A single point doesn't make a segment with itself
                (PolylineKind::Loop, Some(first), Some(last))
                    if self.points.len() > 1 =>
                {
                    Some((*last, *first))
                }
                _ => None,
            };
        self.points
            .windows(2)
            .map(|pair| (pair[0], pair[1]))
            .chain(closing)
    }
}
