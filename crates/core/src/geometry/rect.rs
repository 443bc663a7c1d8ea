use nalgebra::{Scalar, Vector2};
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle, stored as its top-left corner plus its size.
///
/// Float rectangles ([RectF]) are bounding boxes in world space. Integer
/// rectangles ([RectI]) are ranges of cells, and are **half-open**: a
/// [RectI] covers every coordinate `c` with `position <= c < position + size`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect<T: Scalar> {
    pub position: Vector2<T>,
    pub size: Vector2<T>,
}

/// A bounding box in world space
pub type RectF = Rect<f32>;

/// A half-open range of cell coordinates
pub type RectI = Rect<i32>;

/// Implement the arithmetic-dependent parts of [Rect] for a concrete
/// component type. nalgebra's generic numeric bounds are a pain to spell out
/// and we only ever need these two.
macro_rules! impl_rect {
    ($t:ty, $zero:expr) => {
        impl Rect<$t> {
            pub fn new(position: Vector2<$t>, size: Vector2<$t>) -> Self {
                Self { position, size }
            }

            /// A rectangle anchored at the origin
            pub fn from_size(size: Vector2<$t>) -> Self {
                Self::new(Vector2::new($zero, $zero), size)
            }

            /// A rectangle spanning from `min` to `max`. If `max` is less than
            /// `min` on either axis, the size is negative on that axis and the
            /// rectangle is empty.
            pub fn from_min_max(min: Vector2<$t>, max: Vector2<$t>) -> Self {
                Self::new(min, max - min)
            }

            /// The empty rectangle at the origin
            pub fn zero() -> Self {
                Self::from_size(Vector2::new($zero, $zero))
            }

            /// The top-left corner
            pub fn min(&self) -> Vector2<$t> {
                self.position
            }

            /// The bottom-right corner
            pub fn max(&self) -> Vector2<$t> {
                self.position + self.size
            }

            pub fn is_empty(&self) -> bool {
                self.size.x <= $zero || self.size.y <= $zero
            }

            /// Does this rectangle contain the point? Inclusive on the min
            /// side, exclusive on the max side.
            pub fn contains(&self, point: Vector2<$t>) -> bool {
                let min = self.min();
                let max = self.max();
                min.x <= point.x
                    && point.x < max.x
                    && min.y <= point.y
                    && point.y < max.y
            }

            /// Do the two rectangles overlap with a non-zero area? Rectangles
            /// that only share an edge do **not** intersect.
            pub fn intersects(&self, other: &Self) -> bool {
                let (min_a, max_a) = (self.min(), self.max());
                let (min_b, max_b) = (other.min(), other.max());
                min_a.x < max_b.x
                    && min_b.x < max_a.x
                    && min_a.y < max_b.y
                    && min_b.y < max_a.y
            }

            /// The smallest rectangle containing both of these
            pub fn union(&self, other: &Self) -> Self {
                let (min_a, max_a) = (self.min(), self.max());
                let (min_b, max_b) = (other.min(), other.max());
                Self::from_min_max(
                    Vector2::new(
                        if min_a.x < min_b.x { min_a.x } else { min_b.x },
                        if min_a.y < min_b.y { min_a.y } else { min_b.y },
                    ),
                    Vector2::new(
                        if max_a.x > max_b.x { max_a.x } else { max_b.x },
                        if max_a.y > max_b.y { max_a.y } else { max_b.y },
                    ),
                )
            }
        }
    };
}

impl_rect!(f32, 0.0);
impl_rect!(i32, 0);

impl RectF {
    pub fn center(&self) -> Vector2<f32> {
        self.position + self.size / 2.0
    }

    /// Grow the rectangle by `amount` on every side
    pub fn grow(&self, amount: f32) -> Self {
        Self::new(
            self.position - Vector2::new(amount, amount),
            self.size + Vector2::new(amount, amount) * 2.0,
        )
    }
}

impl RectI {
    /// Iterate over every cell coordinate in this range, row by row. Empty
    /// ranges yield nothing.
    pub fn iter(&self) -> impl Iterator<Item = Vector2<i32>> {
        let min = self.min();
        let max = self.max();
        (min.y..max.y).flat_map(move |y| {
            (min.x..max.x).map(move |x| Vector2::new(x, y))
        })
    }
}
