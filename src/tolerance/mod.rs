//! Geometric predicates.
//!
//! Tolerances are explicit parameters; there are no hidden epsilons.

mod predicates;

pub use predicates::{circumcenter, in_circumcircle, orient2d, Orientation};
