//! Cross-checks between the Delaunay and Voronoi builders.

use approx::assert_relative_eq;
use dualgeom::bounds::Aabb2;
use dualgeom::{
    delaunay_edges, voronoi_segments, DelaunayBuilder, Edge, FortuneVoronoiBuilder, Point2,
    Segment2,
};

/// Deterministic xorshift point cloud in `[0, scale)^2`.
fn scattered_points(count: usize, seed: u64, scale: f64) -> Vec<Point2<f64>> {
    let mut state = seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) | 1;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        (state >> 11) as f64 / (1u64 << 53) as f64
    };

    (0..count)
        .map(|_| {
            let x = next() * scale;
            let y = next() * scale;
            Point2::new(x, y)
        })
        .collect()
}

/// The two sites nearest to `p`, as a canonical edge, with their distances.
fn nearest_pair(points: &[Point2<f64>], p: Point2<f64>) -> (Edge<f64>, f64, f64) {
    let mut by_distance: Vec<Point2<f64>> = points.to_vec();
    by_distance.sort_by(|a, b| a.distance(p).total_cmp(&b.distance(p)));
    let (a, b) = (by_distance[0], by_distance[1]);
    (Edge::new(a, b), a.distance(p), b.distance(p))
}

#[test]
fn test_two_sites_single_bisector() {
    let points = [Point2::new(0.0_f64, 0.0), Point2::new(10.0, 0.0)];
    let bounds = FortuneVoronoiBuilder::new().clip_bounds(&points).unwrap();
    let segments = voronoi_segments(&points);

    assert_eq!(segments.len(), 1);
    let s = segments[0];
    assert_relative_eq!(s.start.x, 5.0, epsilon = 1e-12);
    assert_relative_eq!(s.end.x, 5.0, epsilon = 1e-12);
    assert_relative_eq!(s.start.y.min(s.end.y), bounds.min.y, epsilon = 1e-12);
    assert_relative_eq!(s.start.y.max(s.end.y), bounds.max.y, epsilon = 1e-12);

    // Delaunay needs a third point.
    assert!(delaunay_edges(&points).is_empty());
}

#[test]
fn test_single_site_is_empty() {
    assert!(voronoi_segments(&[Point2::new(1.0_f64, 1.0)]).is_empty());
    assert!(delaunay_edges(&[Point2::new(1.0_f64, 1.0)]).is_empty());
}

#[test]
fn test_triangle_duality() {
    let points = [
        Point2::new(0.0_f64, 0.0),
        Point2::new(10.0, 0.0),
        Point2::new(5.0, 10.0),
    ];
    let edges = delaunay_edges(&points);
    let segments = voronoi_segments(&points);
    assert_eq!(edges.len(), segments.len());

    for s in &segments {
        let (pair, da, db) = nearest_pair(&points, s.midpoint());
        assert_relative_eq!(da, db, max_relative = 1e-9);
        assert!(edges.contains(&pair), "{:?} has no dual edge", s);
    }
}

#[test]
fn test_segments_lie_on_delaunay_bisectors() {
    for seed in [1_u64, 2, 3, 5, 8, 13, 21] {
        let points = scattered_points(8 + seed as usize * 3, seed, 100.0);
        let edges = delaunay_edges(&points);
        let segments = voronoi_segments(&points);
        let bounds: Aabb2<f64> = FortuneVoronoiBuilder::new().clip_bounds(&points).unwrap();

        let mut duals: Vec<Edge<f64>> = Vec::with_capacity(segments.len());
        for s in &segments {
            let mid = s.midpoint();
            let (pair, da, db) = nearest_pair(&points, mid);
            assert_relative_eq!(da, db, max_relative = 1e-6);

            // Edges far outside the box may pair hull sites the bounded
            // super-triangle does not connect.
            if bounds.contains_point(mid) {
                assert!(edges.contains(&pair), "seed {}: {:?} has no dual", seed, s);
            }
            duals.push(pair);
        }

        for e in &edges {
            assert!(duals.contains(e), "seed {}: {:?} has no Voronoi edge", seed, e);
        }
    }
}

#[test]
fn test_voronoi_has_one_edge_per_site_pair() {
    let points = scattered_points(30, 4, 50.0);
    let segments = voronoi_segments(&points);

    let mut duals: Vec<Edge<f64>> = segments
        .iter()
        .map(|s| nearest_pair(&points, s.midpoint()).0)
        .collect();
    duals.sort_by(|a, b| a.lex_cmp(b));
    duals.dedup();
    assert_eq!(duals.len(), segments.len());
}

#[test]
fn test_repeated_runs_are_identical() {
    let points = scattered_points(50, 9, 100.0);

    let first: Vec<Segment2<f64>> = voronoi_segments(&points);
    let second: Vec<Segment2<f64>> = voronoi_segments(&points);
    assert_eq!(first, second);

    let builder = DelaunayBuilder::new();
    assert_eq!(builder.compute(&points), builder.compute(&points));
}

#[test]
fn test_delaunay_order_independent() {
    let points = scattered_points(25, 11, 100.0);
    let mut reversed = points.clone();
    reversed.reverse();

    assert_eq!(delaunay_edges(&points), delaunay_edges(&reversed));
}

#[test]
fn test_small_scale_matches_unit_scale() {
    let unit = voronoi_segments(&scattered_points(8, 3, 1.0));

    for scale in [1e-6, 1e-9] {
        let points = scattered_points(8, 3, scale);
        let segments = voronoi_segments(&points);
        assert_eq!(segments.len(), unit.len(), "scale {}", scale);

        for s in &segments {
            let (_, da, db) = nearest_pair(&points, s.midpoint());
            assert_relative_eq!(da, db, max_relative = 1e-6);
        }
    }
}

#[test]
fn test_repeated_sites_match_distinct_sites() {
    let points = scattered_points(12, 7, 100.0);
    let mut repeated = points.clone();
    repeated.extend([points[3], points[0], points[3], points[11]]);
    repeated.reverse();

    let expected = voronoi_segments(&points);
    assert!(!expected.is_empty());
    assert_eq!(voronoi_segments(&repeated), expected);
}
