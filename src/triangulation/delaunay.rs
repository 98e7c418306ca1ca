//! Delaunay triangulation using the Bowyer-Watson algorithm.
//!
//! No input point lies inside the circumcircle of any output triangle.
//!
//! # Algorithm
//!
//! 1. Start with a super-triangle containing all points
//! 2. Insert points one at a time: remove every triangle whose circumcircle
//!    contains the point and re-triangulate the cavity from its boundary
//! 3. Remove triangles connected to the super-triangle vertices
//!
//! # Complexity
//!
//! O(n²): every insertion scans all live triangles. Good enough for
//! interactive point counts.
//!
//! # Degenerate input
//!
//! General position is assumed. Triangles take their winding from the
//! cavity boundary they were cut from and are never re-oriented, so fully
//! collinear or cocircular inputs may yield zero-area or misclassified
//! triangles.
//!
//! # Example
//!
//! ```
//! use dualgeom::triangulation::{delaunay_edges, Edge};
//! use dualgeom::Point2;
//!
//! let points: Vec<Point2<f64>> = vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(10.0, 0.0),
//!     Point2::new(5.0, 10.0),
//! ];
//!
//! let edges = delaunay_edges(&points);
//! assert_eq!(edges.len(), 3);
//! assert!(edges.contains(&Edge::new(points[1], points[0])));
//! ```

use crate::bounds::Aabb2;
use crate::error::{check_finite, DualError, Result};
use crate::primitives::{constant, Point2};
use crate::tolerance::in_circumcircle;
use num_traits::Float;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// A triangle represented by indices into a point array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Triangle {
    /// First vertex index
    pub a: usize,
    /// Second vertex index
    pub b: usize,
    /// Third vertex index
    pub c: usize,
}

impl Triangle {
    /// Creates a new triangle from vertex indices.
    #[inline]
    pub fn new(a: usize, b: usize, c: usize) -> Self {
        Self { a, b, c }
    }

    /// Returns the three directed edges of this triangle as pairs of indices.
    #[inline]
    pub fn edges(&self) -> [(usize, usize); 3] {
        [(self.a, self.b), (self.b, self.c), (self.c, self.a)]
    }

    /// Checks if the triangle contains a specific vertex index.
    #[inline]
    pub fn contains_vertex(&self, v: usize) -> bool {
        self.a == v || self.b == v || self.c == v
    }
}

/// An undirected Delaunay edge between two input coordinates.
///
/// Endpoints are canonicalized on construction so that `start` is the
/// lexicographically smaller point (x first, then y). Two edges discovered
/// in opposite directions therefore compare equal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge<F> {
    pub start: Point2<F>,
    pub end: Point2<F>,
}

impl<F: Float> Edge<F> {
    /// Creates a canonicalized edge between `p` and `q`.
    pub fn new(p: Point2<F>, q: Point2<F>) -> Self {
        if q.lex_cmp(&p) == Ordering::Less {
            Self { start: q, end: p }
        } else {
            Self { start: p, end: q }
        }
    }

    /// Total order used to sort edge sets: by `start`, then by `end`.
    pub fn lex_cmp(&self, other: &Self) -> Ordering {
        self.start
            .lex_cmp(&other.start)
            .then_with(|| self.end.lex_cmp(&other.end))
    }

    /// Midpoint of the edge.
    #[inline]
    pub fn midpoint(&self) -> Point2<F> {
        self.start.midpoint(self.end)
    }
}

/// An index edge, normalized so the smaller index comes first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct EdgeKey(usize, usize);

impl EdgeKey {
    fn new(a: usize, b: usize) -> Self {
        if a < b {
            EdgeKey(a, b)
        } else {
            EdgeKey(b, a)
        }
    }
}

/// Options for [`DelaunayBuilder`].
#[derive(Debug, Clone, Copy)]
pub struct DelaunayConfig<F> {
    /// Half-size of the super-triangle, as a multiple of the largest
    /// extent of the input bounding box, measured from its center.
    pub super_triangle_scale: F,
}

impl<F: Float> Default for DelaunayConfig<F> {
    fn default() -> Self {
        Self {
            super_triangle_scale: constant(3.0),
        }
    }
}

impl<F: Float> DelaunayConfig<F> {
    /// Creates options with the given super-triangle scale.
    pub fn with_super_triangle_scale(super_triangle_scale: F) -> Self {
        Self {
            super_triangle_scale,
        }
    }

    /// Checks that the super-triangle still encloses the bounding box.
    ///
    /// The box corner `(c.x - d/2, c.y + d/2)` stays strictly inside only
    /// when the scale exceeds 1.5.
    pub fn validate(&self) -> Result<()> {
        let s = self.super_triangle_scale;
        if !s.is_finite() || s <= constant(1.5) {
            return Err(DualError::InvalidConfig {
                name: "super_triangle_scale",
                reason: "must be finite and greater than 1.5",
            });
        }
        Ok(())
    }
}

/// Incremental Bowyer-Watson triangulator.
///
/// Holds only configuration; every call rebuilds from scratch.
#[derive(Debug, Clone, Copy)]
pub struct DelaunayBuilder<F> {
    config: DelaunayConfig<F>,
}

impl<F: Float> Default for DelaunayBuilder<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> DelaunayBuilder<F> {
    /// Creates a builder with default options.
    pub fn new() -> Self {
        Self {
            config: DelaunayConfig::default(),
        }
    }

    /// Creates a builder with the given options.
    pub fn with_config(config: DelaunayConfig<F>) -> Self {
        Self { config }
    }

    /// Returns the builder's options.
    pub fn config(&self) -> &DelaunayConfig<F> {
        &self.config
    }

    /// Computes the deduplicated Delaunay edge set of `points`.
    ///
    /// Returns an empty vector for fewer than 3 points. The result is
    /// sorted by [`Edge::lex_cmp`] and contains each undirected edge once,
    /// so it can be compared directly against another run's output.
    pub fn compute(&self, points: &[Point2<F>]) -> Vec<Edge<F>> {
        let triangles = self.triangulate(points);

        let mut seen: HashSet<EdgeKey> = HashSet::new();
        let mut edges: Vec<Edge<F>> = Vec::with_capacity(triangles.len() * 2);
        for tri in &triangles {
            for (a, b) in tri.edges() {
                if seen.insert(EdgeKey::new(a, b)) {
                    edges.push(Edge::new(points[a], points[b]));
                }
            }
        }

        // Coincident input points produce distinct index edges with the same
        // coordinates; sorting then dedup collapses them.
        edges.sort_by(|a, b| a.lex_cmp(b));
        edges.dedup();

        tracing::debug!(
            points = points.len(),
            triangles = triangles.len(),
            edges = edges.len(),
            "delaunay: edge set built"
        );
        edges
    }

    /// Like [`compute`](Self::compute), but rejects invalid options and
    /// non-finite coordinates up front.
    pub fn try_compute(&self, points: &[Point2<F>]) -> Result<Vec<Edge<F>>> {
        self.config.validate()?;
        check_finite(points)?;
        Ok(self.compute(points))
    }

    /// Computes the Delaunay triangles of `points` as index triples.
    ///
    /// Returns an empty vector if fewer than 3 points are provided.
    pub fn triangulate(&self, points: &[Point2<F>]) -> Vec<Triangle> {
        if points.len() < 3 {
            return Vec::new();
        }

        let bounds = match Aabb2::from_points(points.iter().copied()) {
            Some(b) => b,
            None => return Vec::new(),
        };

        // Super-triangle around the bounding box center
        let delta = bounds.width().max(bounds.height()) * self.config.super_triangle_scale;
        let center = bounds.center();
        let super_a = Point2::new(center.x - delta, center.y - delta);
        let super_b = Point2::new(center.x + delta, center.y - delta);
        let super_c = Point2::new(center.x, center.y + delta);

        let n = points.len();
        let mut all_points: Vec<Point2<F>> = points.to_vec();
        all_points.push(super_a);
        all_points.push(super_b);
        all_points.push(super_c);

        let mut triangles: Vec<Triangle> = vec![Triangle::new(n, n + 1, n + 2)];

        for (i, &p) in points.iter().enumerate() {
            let mut bad_triangles: Vec<usize> = Vec::new();
            for (ti, tri) in triangles.iter().enumerate() {
                if in_circumcircle(p, all_points[tri.a], all_points[tri.b], all_points[tri.c]) {
                    bad_triangles.push(ti);
                }
            }

            // Boundary of the cavity: edges used by exactly one bad triangle.
            // The directed edge is kept so new triangles inherit its winding.
            let mut edge_count: HashMap<EdgeKey, usize> = HashMap::new();
            let mut directed: Vec<(usize, usize)> = Vec::with_capacity(bad_triangles.len() * 3);
            for &ti in &bad_triangles {
                for (ea, eb) in triangles[ti].edges() {
                    *edge_count.entry(EdgeKey::new(ea, eb)).or_insert(0) += 1;
                    directed.push((ea, eb));
                }
            }

            // Remove bad triangles (in reverse order to preserve indices)
            bad_triangles.sort_unstable();
            for &ti in bad_triangles.iter().rev() {
                triangles.swap_remove(ti);
            }

            for (ea, eb) in directed {
                if edge_count[&EdgeKey::new(ea, eb)] == 1 {
                    triangles.push(Triangle::new(ea, eb, i));
                }
            }
        }

        triangles.retain(|tri| {
            !tri.contains_vertex(n) && !tri.contains_vertex(n + 1) && !tri.contains_vertex(n + 2)
        });

        tracing::debug!(
            points = n,
            triangles = triangles.len(),
            "delaunay: triangulation complete"
        );
        triangles
    }
}

/// Computes the Delaunay edge set of `points` with default options.
///
/// Shorthand for `DelaunayBuilder::new().compute(points)`.
pub fn delaunay_edges<F: Float>(points: &[Point2<F>]) -> Vec<Edge<F>> {
    DelaunayBuilder::new().compute(points)
}

/// Computes the Delaunay triangles of `points` with default options.
///
/// # Example
///
/// ```
/// use dualgeom::triangulation::delaunay_triangulation;
/// use dualgeom::Point2;
///
/// // Square with center point
/// let points: Vec<Point2<f64>> = vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(1.0, 0.0),
///     Point2::new(1.0, 1.0),
///     Point2::new(0.0, 1.0),
///     Point2::new(0.5, 0.5),
/// ];
///
/// assert_eq!(delaunay_triangulation(&points).len(), 4);
/// ```
pub fn delaunay_triangulation<F: Float>(points: &[Point2<F>]) -> Vec<Triangle> {
    DelaunayBuilder::new().triangulate(points)
}
