//! Finite line segments, the output shape of Voronoi construction.

use super::Point2;
use num_traits::Float;

/// A straight segment between two points.
///
/// Voronoi edges are reported this way, clipped to the diagram's box. The
/// orientation of a reported edge carries no meaning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment2<F> {
    pub start: Point2<F>,
    pub end: Point2<F>,
}

impl<F: Float> Segment2<F> {
    #[inline]
    pub fn new(start: Point2<F>, end: Point2<F>) -> Self {
        Self { start, end }
    }

    /// Shorthand for `Segment2::new(Point2::new(x1, y1), Point2::new(x2, y2))`.
    #[inline]
    pub fn from_coords(x1: F, y1: F, x2: F, y2: F) -> Self {
        Self::new(Point2::new(x1, y1), Point2::new(x2, y2))
    }

    #[inline]
    pub fn midpoint(self) -> Point2<F> {
        self.start.midpoint(self.end)
    }
}
