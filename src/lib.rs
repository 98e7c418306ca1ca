//! dualgeom - Delaunay triangulations and Voronoi diagrams of planar points
//!
//! Two constructions of the same duality: an incremental Bowyer-Watson
//! triangulator producing Delaunay edges, and a Fortune sweep-line builder
//! producing Voronoi edges clipped to a box around the input. Every Voronoi
//! edge lies on the perpendicular bisector of a Delaunay edge.
//!
//! All geometry is generic over `F: num_traits::Float`.
//!
//! # Example
//!
//! ```
//! use dualgeom::{delaunay_edges, voronoi_segments, Point2};
//!
//! let points: Vec<Point2<f64>> = vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(10.0, 0.0),
//!     Point2::new(5.0, 10.0),
//! ];
//!
//! assert_eq!(delaunay_edges(&points).len(), 3);
//! assert_eq!(voronoi_segments(&points).len(), 3);
//! ```

pub mod bounds;
pub mod error;
pub mod primitives;
pub mod tolerance;
pub mod triangulation;
pub mod voronoi;

pub use error::{DualError, Result};
pub use primitives::{Point2, Segment2, Vec2};
pub use triangulation::{delaunay_edges, DelaunayBuilder, DelaunayConfig, Edge, Triangle};
pub use voronoi::{voronoi_segments, FortuneVoronoiBuilder, VoronoiConfig};
