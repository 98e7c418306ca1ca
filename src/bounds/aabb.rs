//! Axis-aligned bounding box.

use crate::primitives::{Point2, Vec2};
use num_traits::Float;

/// A 2D axis-aligned bounding box.
///
/// Defined by minimum and maximum corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb2<F> {
    /// Minimum corner (smallest x and y values).
    pub min: Point2<F>,
    /// Maximum corner (largest x and y values).
    pub max: Point2<F>,
}

impl<F: Float> Aabb2<F> {
    /// Creates a new AABB from min and max corners.
    ///
    /// Does not validate that min <= max.
    #[inline]
    pub fn new(min: Point2<F>, max: Point2<F>) -> Self {
        Self { min, max }
    }

    /// Creates an AABB containing a single point.
    #[inline]
    pub fn from_point(p: Point2<F>) -> Self {
        Self { min: p, max: p }
    }

    /// Creates an AABB from an iterator of points.
    ///
    /// Returns `None` if the iterator is empty.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point2<F>>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;

        let mut aabb = Self::from_point(first);
        for p in iter {
            aabb = aabb.expand_to_include(p);
        }
        Some(aabb)
    }

    /// Returns the width of the AABB.
    #[inline]
    pub fn width(self) -> F {
        self.max.x - self.min.x
    }

    /// Returns the height of the AABB.
    #[inline]
    pub fn height(self) -> F {
        self.max.y - self.min.y
    }

    /// Returns the center point of the AABB.
    #[inline]
    pub fn center(self) -> Point2<F> {
        self.min.midpoint(self.max)
    }

    /// Returns a new AABB expanded to include the given point.
    #[inline]
    pub fn expand_to_include(self, p: Point2<F>) -> Self {
        Self {
            min: Point2::new(self.min.x.min(p.x), self.min.y.min(p.y)),
            max: Point2::new(self.max.x.max(p.x), self.max.y.max(p.y)),
        }
    }

    /// Returns a new AABB grown by `dx` on the left and right and by `dy`
    /// on the bottom and top.
    #[inline]
    pub fn expanded_by(self, dx: F, dy: F) -> Self {
        Self {
            min: Point2::new(self.min.x - dx, self.min.y - dy),
            max: Point2::new(self.max.x + dx, self.max.y + dy),
        }
    }

    /// Returns `true` if this AABB contains the given point (boundary included).
    #[inline]
    pub fn contains_point(self, p: Point2<F>) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Clips the line `origin + t * dir` against the box with the slab
    /// method, returning the parameter range `(t_enter, t_exit)` inside it.
    ///
    /// Returns `None` if the line misses the box or `dir` is zero.
    pub fn clip_line(self, origin: Point2<F>, dir: Vec2<F>) -> Option<(F, F)> {
        if dir.x == F::zero() && dir.y == F::zero() {
            return None;
        }

        let mut t_enter = F::neg_infinity();
        let mut t_exit = F::infinity();

        for (o, d, lo, hi) in [
            (origin.x, dir.x, self.min.x, self.max.x),
            (origin.y, dir.y, self.min.y, self.max.y),
        ] {
            if d == F::zero() {
                // Parallel to this slab: must already be inside it.
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }
            let t1 = (lo - o) / d;
            let t2 = (hi - o) / d;
            t_enter = t_enter.max(t1.min(t2));
            t_exit = t_exit.min(t1.max(t2));
        }

        if t_exit < t_enter {
            return None;
        }
        Some((t_enter, t_exit))
    }

    /// Returns the point where the ray `origin + t * dir` (`t >= 0`) leaves
    /// the box.
    ///
    /// Returns `None` if the ray never touches the box or `dir` is zero.
    pub fn ray_exit(self, origin: Point2<F>, dir: Vec2<F>) -> Option<Point2<F>> {
        let (_, t_exit) = self.clip_line(origin, dir)?;
        if t_exit < F::zero() {
            return None;
        }
        Some(origin + dir * t_exit)
    }
}
