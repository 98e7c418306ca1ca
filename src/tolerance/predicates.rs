//! Geometric predicates shared by the Delaunay and Voronoi builders.

use crate::primitives::Point2;
use num_traits::Float;

/// Result of an orientation test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Points are counter-clockwise (positive area).
    CounterClockwise,
    /// Points are clockwise (negative area).
    Clockwise,
    /// Points are collinear (within tolerance).
    Collinear,
}

/// Computes the orientation of three points with tolerance.
///
/// The test is based on the signed area of triangle `a`, `b`, `c`. If the
/// absolute value of twice the signed area does not exceed `eps`, the points
/// are considered collinear. Passing `eps = 0` gives the plain sign test.
#[inline]
pub fn orient2d<F: Float>(a: Point2<F>, b: Point2<F>, c: Point2<F>, eps: F) -> Orientation {
    // Twice the signed area of triangle ABC
    let cross = (b - a).cross(c - a);

    if cross > eps {
        Orientation::CounterClockwise
    } else if cross < -eps {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

/// Tests if a point lies strictly inside the circumcircle of a triangle.
///
/// The sign of the determinant
///
/// ```text
/// | ax-px  ay-py  (ax-px)²+(ay-py)² |
/// | bx-px  by-py  (bx-px)²+(by-py)² |
/// | cx-px  cy-py  (cx-px)²+(cy-py)² |
/// ```
///
/// is positive iff `p` is inside, provided `a`, `b`, `c` wind
/// counter-clockwise. A clockwise triangle flips the answer; the caller is
/// responsible for a consistent winding.
///
/// # Example
///
/// ```
/// use dualgeom::tolerance::in_circumcircle;
/// use dualgeom::Point2;
///
/// let a = Point2::new(0.0_f64, 0.0);
/// let b = Point2::new(1.0, 0.0);
/// let c = Point2::new(0.5, 0.866);
///
/// assert!(in_circumcircle(Point2::new(0.5, 0.29), a, b, c));
/// assert!(!in_circumcircle(Point2::new(10.0, 10.0), a, b, c));
/// ```
pub fn in_circumcircle<F: Float>(p: Point2<F>, a: Point2<F>, b: Point2<F>, c: Point2<F>) -> bool {
    let ax = a.x - p.x;
    let ay = a.y - p.y;
    let bx = b.x - p.x;
    let by = b.y - p.y;
    let cx = c.x - p.x;
    let cy = c.y - p.y;

    let aa = ax * ax + ay * ay;
    let bb = bx * bx + by * by;
    let cc = cx * cx + cy * cy;

    let det = aa * (bx * cy - by * cx) - bb * (ax * cy - ay * cx) + cc * (ax * by - ay * bx);

    det > F::zero()
}

/// Computes the circumcenter of a triangle.
///
/// Returns `None` only when the denominator is exactly zero (collinear
/// points). The denominator scales with the square of the coordinates, so
/// any fixed threshold would reject small but valid triangles.
///
/// # Example
///
/// ```
/// use dualgeom::tolerance::circumcenter;
/// use dualgeom::Point2;
///
/// let center = circumcenter(
///     Point2::new(0.0_f64, 0.0),
///     Point2::new(1.0, 0.0),
///     Point2::new(0.0, 1.0),
/// )
/// .unwrap();
/// assert!((center.x - 0.5).abs() < 1e-12);
/// assert!((center.y - 0.5).abs() < 1e-12);
/// ```
pub fn circumcenter<F: Float>(a: Point2<F>, b: Point2<F>, c: Point2<F>) -> Option<Point2<F>> {
    let two = F::one() + F::one();

    let d = two * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
    if d == F::zero() {
        return None;
    }

    let aa = a.x * a.x + a.y * a.y;
    let bb = b.x * b.x + b.y * b.y;
    let cc = c.x * c.x + c.y * c.y;

    let ux = (aa * (b.y - c.y) + bb * (c.y - a.y) + cc * (a.y - b.y)) / d;
    let uy = (aa * (c.x - b.x) + bb * (a.x - c.x) + cc * (b.x - a.x)) / d;

    Some(Point2::new(ux, uy))
}
