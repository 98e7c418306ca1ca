//! Circle-event prediction for three consecutive beach-line arcs.

use crate::primitives::Point2;
use crate::tolerance::{circumcenter, orient2d, Orientation};
use num_traits::Float;

/// Where and when three arcs' breakpoints meet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Convergence<F> {
    /// Sweep coordinate at which the middle arc vanishes.
    pub x: F,
    /// The meeting point, a Voronoi vertex.
    pub center: Point2<F>,
}

/// Predicts when the middle arc (focus `b`) between arcs `a` (below) and
/// `c` (above) shrinks to a point.
///
/// Only a right turn `a -> b -> c` converges. A left turn means the two
/// breakpoints move apart and collinear foci have no circumcircle; both
/// yield `None`. The turn is an exact sign test, so the answer does not
/// depend on the scale of the input.
pub(crate) fn convergence<F: Float>(
    a: Point2<F>,
    b: Point2<F>,
    c: Point2<F>,
) -> Option<Convergence<F>> {
    if orient2d(a, b, c, F::zero()) != Orientation::Clockwise {
        return None;
    }
    let center = circumcenter(a, b, c)?;
    let radius = center.distance(b);
    Some(Convergence {
        x: center.x + radius,
        center,
    })
}
