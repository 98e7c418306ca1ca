//! Delaunay triangulation of point sets.

mod delaunay;

pub use delaunay::{
    delaunay_edges, delaunay_triangulation, DelaunayBuilder, DelaunayConfig, Edge, Triangle,
};
