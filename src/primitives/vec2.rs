//! Displacements between points: edge directions and breakpoint headings.

use num_traits::Float;
use std::ops::{Add, Mul, Sub};

/// A 2D displacement, generic over `f32` or `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec2<F> {
    pub x: F,
    pub y: F,
}

impl<F: Float> Vec2<F> {
    #[inline]
    pub fn new(x: F, y: F) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn dot(self, other: Self) -> F {
        self.x * other.x + self.y * other.y
    }

    /// z component of the 3D cross product. Positive when `other` turns
    /// counter-clockwise from `self`; twice the signed triangle area.
    #[inline]
    pub fn cross(self, other: Self) -> F {
        self.x * other.y - self.y * other.x
    }

    /// Euclidean length.
    #[inline]
    pub fn magnitude(self) -> F {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction, or `None` when the length does
    /// not exceed machine epsilon.
    pub fn normalize(self) -> Option<Self> {
        let len = self.magnitude();
        (len > F::epsilon()).then(|| Self::new(self.x / len, self.y / len))
    }

    /// Quarter turn clockwise: `(x, y) -> (y, -x)`.
    ///
    /// For foci `a` below `b` on the beach line, `(b - a).perpendicular_cw()`
    /// is the direction their breakpoint travels as the sweep advances.
    #[inline]
    pub fn perpendicular_cw(self) -> Self {
        Self::new(self.y, -self.x)
    }
}

impl<F: Float> Add for Vec2<F> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl<F: Float> Sub for Vec2<F> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl<F: Float> Mul<F> for Vec2<F> {
    type Output = Self;

    #[inline]
    fn mul(self, t: F) -> Self {
        Self::new(self.x * t, self.y * t)
    }
}
