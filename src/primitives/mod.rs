//! Floating-point geometric primitives.

mod point2;
mod segment2;
mod vec2;

pub use point2::Point2;
pub use segment2::Segment2;
pub use vec2::Vec2;

use num_traits::Float;

/// Converts an `f64` constant into `F`.
///
/// Every `Float` type can represent (or round) a finite `f64`, so the
/// fallback is never taken for `f32`/`f64`.
#[inline]
pub(crate) fn constant<F: Float>(value: f64) -> F {
    F::from(value).unwrap_or_else(F::nan)
}
