//! Voronoi edges using Fortune's sweep-line algorithm.
//!
//! A vertical sweep line moves across the sites in increasing x. The beach
//! line (the lower envelope of parabolas equidistant from each visited site
//! and the sweep line) changes at two kinds of events:
//!
//! - **Site events**: the sweep line reaches a site and a new arc appears,
//!   splitting the arc above it
//! - **Circle events**: an arc shrinks to a point, a Voronoi vertex
//!
//! Breakpoints between neighbouring arcs trace the Voronoi edges. Edges
//! still open when the sweep ends are clipped to a box around the input.
//!
//! # Complexity
//!
//! O(n log n) events; locating the arc above a site walks the beach line,
//! so the worst case is O(n²).
//!
//! # Example
//!
//! ```
//! use dualgeom::voronoi::voronoi_segments;
//! use dualgeom::Point2;
//!
//! let points: Vec<Point2<f64>> = vec![Point2::new(0.0, 0.0), Point2::new(10.0, 0.0)];
//! let segments = voronoi_segments(&points);
//!
//! assert_eq!(segments.len(), 1);
//! assert!((segments[0].start.x - 5.0).abs() < 1e-12);
//! ```

use super::beach::{parabola_x, Arc, ArcId, BeachLine};
use super::circle::convergence;
use super::events::{Event, EventQueue};
use super::segments::SegmentAccumulator;
use crate::bounds::Aabb2;
use crate::error::{check_finite, DualError, Result};
use crate::primitives::{constant, Point2, Segment2};
use num_traits::Float;

/// Options for [`FortuneVoronoiBuilder`].
#[derive(Debug, Clone, Copy)]
pub struct VoronoiConfig<F> {
    /// Margin added on each side of the input bounding box, as a fraction
    /// of the padded extent along that axis.
    pub margin_fraction: F,
    /// Added to each axis extent before the margin is taken, so a zero-width
    /// axis still gets a box of positive size.
    pub min_extent: F,
}

impl<F: Float> Default for VoronoiConfig<F> {
    fn default() -> Self {
        Self {
            margin_fraction: constant(0.2),
            min_extent: F::one(),
        }
    }
}

impl<F: Float> VoronoiConfig<F> {
    /// Returns these options with a different margin fraction.
    pub fn with_margin_fraction(mut self, margin_fraction: F) -> Self {
        self.margin_fraction = margin_fraction;
        self
    }

    /// Returns these options with a different minimum extent.
    pub fn with_min_extent(mut self, min_extent: F) -> Self {
        self.min_extent = min_extent;
        self
    }

    /// Checks that both values are finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        if !self.margin_fraction.is_finite() || self.margin_fraction < F::zero() {
            return Err(DualError::InvalidConfig {
                name: "margin_fraction",
                reason: "must be finite and non-negative",
            });
        }
        if !self.min_extent.is_finite() || self.min_extent < F::zero() {
            return Err(DualError::InvalidConfig {
                name: "min_extent",
                reason: "must be finite and non-negative",
            });
        }
        Ok(())
    }
}

/// Fortune sweep-line Voronoi builder.
///
/// Holds only configuration; every call runs a fresh sweep.
#[derive(Debug, Clone, Copy)]
pub struct FortuneVoronoiBuilder<F> {
    config: VoronoiConfig<F>,
}

impl<F: Float> Default for FortuneVoronoiBuilder<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> FortuneVoronoiBuilder<F> {
    /// Creates a builder with default options.
    pub fn new() -> Self {
        Self {
            config: VoronoiConfig::default(),
        }
    }

    /// Creates a builder with the given options.
    pub fn with_config(config: VoronoiConfig<F>) -> Self {
        Self { config }
    }

    /// Returns the builder's options.
    pub fn config(&self) -> &VoronoiConfig<F> {
        &self.config
    }

    /// The box unbounded edges are clipped to: the input bounding box grown
    /// on each side by `margin_fraction * (extent + min_extent)` per axis.
    ///
    /// Returns `None` for an empty input.
    pub fn clip_bounds(&self, points: &[Point2<F>]) -> Option<Aabb2<F>> {
        let bounds = Aabb2::from_points(points.iter().copied())?;
        let VoronoiConfig {
            margin_fraction,
            min_extent,
        } = self.config;
        let dx = (bounds.width() + min_extent) * margin_fraction;
        let dy = (bounds.height() + min_extent) * margin_fraction;
        Some(bounds.expanded_by(dx, dy))
    }

    /// Computes the Voronoi edges of `points`.
    ///
    /// Returns an empty vector for fewer than 2 distinct points. Repeated
    /// sites are treated as one. Edges that would be
    /// unbounded end on [`clip_bounds`](Self::clip_bounds). Order of the
    /// output is not significant, but identical input always yields
    /// identical output.
    pub fn construct(&self, points: &[Point2<F>]) -> Vec<Segment2<F>> {
        if points.len() < 2 {
            return Vec::new();
        }
        let bounds = match self.clip_bounds(points) {
            Some(b) => b,
            None => return Vec::new(),
        };

        tracing::debug!(sites = points.len(), "voronoi: sweep started");
        let segments = Sweep::new(bounds).run(points);
        tracing::debug!(
            sites = points.len(),
            segments = segments.len(),
            "voronoi: sweep complete"
        );
        segments
    }

    /// Like [`construct`](Self::construct), but rejects invalid options and
    /// non-finite coordinates up front.
    pub fn try_construct(&self, points: &[Point2<F>]) -> Result<Vec<Segment2<F>>> {
        self.config.validate()?;
        check_finite(points)?;
        Ok(self.construct(points))
    }
}

/// Computes the Voronoi edges of `points` with default options.
///
/// Shorthand for `FortuneVoronoiBuilder::new().construct(points)`.
pub fn voronoi_segments<F: Float>(points: &[Point2<F>]) -> Vec<Segment2<F>> {
    FortuneVoronoiBuilder::new().construct(points)
}

/// State of one sweep. Dropped when the sweep returns.
struct Sweep<F> {
    bounds: Aabb2<F>,
    beach: BeachLine<F>,
    sites: EventQueue<F>,
    circles: EventQueue<F>,
    segments: SegmentAccumulator<F>,
}

impl<F: Float> Sweep<F> {
    fn new(bounds: Aabb2<F>) -> Self {
        Self {
            bounds,
            beach: BeachLine::new(),
            sites: EventQueue::new(),
            circles: EventQueue::new(),
            segments: SegmentAccumulator::new(),
        }
    }

    fn run(mut self, points: &[Point2<F>]) -> Vec<Segment2<F>> {
        // Same-x sites then pop bottom to top.
        let mut sorted = points.to_vec();
        sorted.sort_by(|a, b| a.lex_cmp(b));
        sorted.dedup();
        if sorted.len() < points.len() {
            tracing::debug!(
                duplicates = points.len() - sorted.len(),
                "voronoi: repeated sites ignored"
            );
        }
        for point in sorted {
            self.sites.push(Event::Site { x: point.x, point });
        }

        while let Some(site_x) = self.sites.peek().map(|e| e.x()) {
            let circle_first = matches!(self.circles.peek(), Some(e) if e.x() <= site_x);
            let event = if circle_first {
                self.circles.pop()
            } else {
                self.sites.pop()
            };
            self.handle(event);
        }
        while !self.circles.is_empty() {
            let event = self.circles.pop();
            self.handle(event);
        }

        self.finish();
        tracing::debug!(
            arcs = self.beach.len(),
            segments = self.segments.len(),
            "voronoi: beach line finalized"
        );
        self.segments.into_segments()
    }

    fn handle(&mut self, event: Event<F>) {
        match event {
            Event::Site { x, point } => {
                tracing::trace!(
                    x = x.to_f64().unwrap_or(f64::NAN),
                    arcs = self.beach.len(),
                    "voronoi: site event"
                );
                self.insert_arc(point);
            }
            Event::Circle { x, center, arc } => {
                tracing::trace!(
                    x = x.to_f64().unwrap_or(f64::NAN),
                    pending = self.circles.len(),
                    "voronoi: circle event"
                );
                self.remove_arc(arc, center);
            }
        }
    }

    fn insert_arc(&mut self, site: Point2<F>) {
        let l = site.x;
        let located = match self.beach.locate(site.y, l) {
            Some(id) => id,
            None => {
                self.beach.insert_first(site);
                return;
            }
        };
        let focus = self.beach.arc(located).focus;

        if focus.x == l {
            self.insert_beside(located, site);
            return;
        }

        // located | new | copy, with copy inheriting the upper boundary.
        let outer = self.beach.arc(located).right;
        let copy = self.beach.insert_after(located, focus);
        self.beach.arc_mut(copy).right = outer;
        let new = self.beach.insert_after(located, site);

        let start = Point2::new(parabola_x(focus, site.y, l), site.y);
        let (lower, upper) = self.segments.start_pair(start);
        self.beach.arc_mut(located).right = Some(lower);
        let arc = self.beach.arc_mut(new);
        arc.left = Some(lower);
        arc.right = Some(upper);
        self.beach.arc_mut(copy).left = Some(upper);

        self.check_circle_event(new);
        self.check_circle_event(located);
        self.check_circle_event(copy);
    }

    /// Adds `site` next to an arc whose focus lies on the sweep line. That
    /// parabola is a horizontal ray, so nothing is split and the new edge
    /// is horizontal, entering from the left side of the box.
    fn insert_beside(&mut self, located: ArcId, site: Point2<F>) {
        let focus = self.beach.arc(located).focus;
        let mid_y = (focus.y + site.y) / (F::one() + F::one());
        let seg = self.segments.start(Point2::new(self.bounds.min.x, mid_y));

        let new = if site.y >= focus.y {
            let outer = self.beach.arc(located).right;
            let new = self.beach.insert_after(located, site);
            self.beach.arc_mut(located).right = Some(seg);
            let arc = self.beach.arc_mut(new);
            arc.left = Some(seg);
            arc.right = outer;
            new
        } else {
            let outer = self.beach.arc(located).left;
            let new = self.beach.insert_before(located, site);
            self.beach.arc_mut(located).left = Some(seg);
            let arc = self.beach.arc_mut(new);
            arc.right = Some(seg);
            arc.left = outer;
            new
        };

        let Arc { prev, next, .. } = *self.beach.arc(new);
        self.check_circle_event(new);
        for neighbour in [prev, next].into_iter().flatten() {
            self.check_circle_event(neighbour);
        }
    }

    fn remove_arc(&mut self, arc: ArcId, center: Point2<F>) {
        let Arc {
            prev,
            next,
            left,
            right,
            ..
        } = *self.beach.arc(arc);

        for seg in [left, right].into_iter().flatten() {
            self.segments.complete(seg, center);
        }
        self.beach.remove(arc);

        if let (Some(p), Some(n)) = (prev, next) {
            let seg = self.segments.start(center);
            self.beach.arc_mut(p).right = Some(seg);
            self.beach.arc_mut(n).left = Some(seg);
        }
        for neighbour in [prev, next].into_iter().flatten() {
            self.check_circle_event(neighbour);
        }
    }

    /// Drops the pending event of `arc` and schedules a new one if its
    /// current neighbours converge.
    fn check_circle_event(&mut self, arc: ArcId) {
        if let Some(stale) = self.beach.arc_mut(arc).event.take() {
            self.circles.invalidate(stale);
        }

        let Arc {
            focus, prev, next, ..
        } = *self.beach.arc(arc);
        let (Some(prev), Some(next)) = (prev, next) else {
            return;
        };
        let below = self.beach.arc(prev).focus;
        let above = self.beach.arc(next).focus;

        if let Some(c) = convergence(below, focus, above) {
            let id = self.circles.push(Event::Circle {
                x: c.x,
                center: c.center,
                arc,
            });
            self.beach.arc_mut(arc).event = Some(id);
        }
    }

    /// Clips every edge still traced by a breakpoint. A breakpoint between
    /// foci `a` (below) and `b` (above) heads along `(b - a)` rotated
    /// clockwise.
    fn finish(&mut self) {
        let open: Vec<_> = self
            .beach
            .iter()
            .filter_map(|id| {
                let arc = self.beach.arc(id);
                let seg = arc.right?;
                let next = self.beach.arc(arc.next?);
                Some((seg, (next.focus - arc.focus).perpendicular_cw()))
            })
            .collect();
        self.segments.finalize(&open, self.bounds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn has_endpoint(segment: &Segment2<f64>, p: Point2<f64>) -> bool {
        segment.start.approx_eq(p, 1e-9) || segment.end.approx_eq(p, 1e-9)
    }

    #[test]
    fn test_config_defaults_and_validation() {
        let config: VoronoiConfig<f64> = VoronoiConfig::default();
        assert_eq!(config.margin_fraction, 0.2);
        assert_eq!(config.min_extent, 1.0);
        assert!(config.validate().is_ok());

        let bad = config.with_margin_fraction(-0.1);
        assert_eq!(
            bad.validate(),
            Err(DualError::InvalidConfig {
                name: "margin_fraction",
                reason: "must be finite and non-negative",
            })
        );
        assert!(config.with_min_extent(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_clip_bounds() {
        let builder = FortuneVoronoiBuilder::new();
        let bounds = builder
            .clip_bounds(&[Point2::new(0.0_f64, 0.0), Point2::new(10.0, 0.0)])
            .unwrap();

        assert_relative_eq!(bounds.min.x, -2.2, epsilon = 1e-12);
        assert_relative_eq!(bounds.max.x, 12.2, epsilon = 1e-12);
        assert_relative_eq!(bounds.min.y, -0.2, epsilon = 1e-12);
        assert_relative_eq!(bounds.max.y, 0.2, epsilon = 1e-12);
        assert!(builder.clip_bounds(&[]).is_none());
    }

    #[test]
    fn test_too_few_sites() {
        let builder = FortuneVoronoiBuilder::new();
        assert!(builder.construct(&[]).is_empty());
        assert!(builder.construct(&[Point2::new(3.0_f64, 4.0)]).is_empty());
    }

    #[test]
    fn test_two_sites() {
        let segments = voronoi_segments(&[Point2::new(0.0_f64, 0.0), Point2::new(10.0, 0.0)]);
        assert_eq!(segments.len(), 1);

        let s = segments[0];
        assert_abs_diff_eq!(s.start.x, 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(s.end.x, 5.0, epsilon = 1e-12);
        assert_relative_eq!(s.start.y.min(s.end.y), -0.2, epsilon = 1e-12);
        assert_relative_eq!(s.start.y.max(s.end.y), 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_two_sites_same_x() {
        let segments = voronoi_segments(&[Point2::new(0.0_f64, 10.0), Point2::new(0.0, 0.0)]);
        assert_eq!(segments.len(), 1);

        // Horizontal bisector y = 5 from the left edge of the box to the right.
        let s = segments[0];
        assert_abs_diff_eq!(s.start.y, 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(s.end.y, 5.0, epsilon = 1e-12);
        assert_relative_eq!(s.start.x, -0.2, epsilon = 1e-12);
        assert_relative_eq!(s.end.x, 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_three_sites_meet_at_circumcenter() {
        let points = [
            Point2::new(0.0_f64, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(5.0, 10.0),
        ];
        let segments = voronoi_segments(&points);
        assert_eq!(segments.len(), 3);

        let vertex = Point2::new(5.0, 3.75);
        for s in &segments {
            assert!(has_endpoint(s, vertex), "{:?} does not touch {:?}", s, vertex);
        }

        // The bisector of the bottom pair runs down to the box edge.
        let bottom = segments
            .iter()
            .find(|s| (s.start.x - 5.0).abs() < 1e-9 && (s.end.x - 5.0).abs() < 1e-9)
            .unwrap();
        assert_relative_eq!(bottom.start.y.min(bottom.end.y), -2.2, epsilon = 1e-9);
    }

    #[test]
    fn test_horizontal_collinear_sites() {
        let points = [
            Point2::new(20.0_f64, 0.0),
            Point2::new(0.0, 0.0),
            Point2::new(30.0, 0.0),
            Point2::new(10.0, 0.0),
        ];
        let mut segments = voronoi_segments(&points);
        assert_eq!(segments.len(), 3);

        segments.sort_by(|a, b| a.start.x.total_cmp(&b.start.x));
        for (s, x) in segments.iter().zip([5.0, 15.0, 25.0]) {
            assert_abs_diff_eq!(s.start.x, x, epsilon = 1e-9);
            assert_abs_diff_eq!(s.end.x, x, epsilon = 1e-9);
            assert_relative_eq!(s.start.y.min(s.end.y), -0.2, epsilon = 1e-9);
            assert_relative_eq!(s.start.y.max(s.end.y), 0.2, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_diagonal_collinear_sites() {
        let points: Vec<Point2<f64>> = (0..5).map(|i| Point2::new(i as f64, i as f64)).collect();
        let segments = voronoi_segments(&points);
        assert_eq!(segments.len(), 4);

        for s in &segments {
            // Perpendicular to the line of sites.
            let d = s.end - s.start;
            assert_abs_diff_eq!(d.x + d.y, 0.0, epsilon = 1e-9);

            let mid = s.midpoint();
            let mut dist: Vec<f64> = points.iter().map(|p| p.distance(mid)).collect();
            dist.sort_by(|a, b| a.total_cmp(b));
            assert_relative_eq!(dist[0], dist[1], max_relative = 1e-9);
        }
    }

    #[test]
    fn test_vertical_collinear_sites() {
        let points = [
            Point2::new(0.0_f64, 5.0),
            Point2::new(0.0, 10.0),
            Point2::new(0.0, 0.0),
        ];
        let mut segments = voronoi_segments(&points);
        assert_eq!(segments.len(), 2);

        segments.sort_by(|a, b| a.start.y.total_cmp(&b.start.y));
        for (s, y) in segments.iter().zip([2.5, 7.5]) {
            assert_abs_diff_eq!(s.start.y, y, epsilon = 1e-9);
            assert_abs_diff_eq!(s.end.y, y, epsilon = 1e-9);
            assert_relative_eq!(s.start.x.min(s.end.x), -0.2, epsilon = 1e-9);
            assert_relative_eq!(s.start.x.max(s.end.x), 0.2, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_repeated_sites_are_ignored() {
        let unique = [
            Point2::new(0.0_f64, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(5.0, 10.0),
        ];
        let repeated = [
            Point2::new(5.0_f64, 10.0),
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(5.0, 10.0),
            Point2::new(0.0, 0.0),
        ];
        assert_eq!(voronoi_segments(&repeated), voronoi_segments(&unique));

        let same = [Point2::new(1.0_f64, 1.0), Point2::new(1.0, 1.0)];
        assert!(voronoi_segments(&same).is_empty());
    }

    #[test]
    fn test_cocircular_sites_share_one_vertex() {
        // All four lie on the circle of radius sqrt(5) around (2, 3).
        let points = [
            Point2::new(1.0_f64, 1.0),
            Point2::new(4.0, 2.0),
            Point2::new(3.0, 5.0),
            Point2::new(0.0, 4.0),
        ];
        let segments = voronoi_segments(&points);
        assert_eq!(segments.len(), 4);

        let vertex = Point2::new(2.0, 3.0);
        for s in &segments {
            assert!(!s.start.approx_eq(s.end, 1e-9), "degenerate {:?}", s);
            assert!(has_endpoint(s, vertex), "{:?} does not touch {:?}", s, vertex);
        }
    }

    #[test]
    fn test_square_has_central_vertex() {
        let points = [
            Point2::new(0.0_f64, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
            Point2::new(5.0, 4.0),
        ];
        let segments = voronoi_segments(&points);
        let bounds = FortuneVoronoiBuilder::new().clip_bounds(&points).unwrap();

        assert!(!segments.is_empty());
        for s in &segments {
            // Every end is either inside the box or on its boundary.
            let grown = bounds.expanded_by(1e-9, 1e-9);
            assert!(grown.contains_point(s.start), "{:?}", s);
            assert!(grown.contains_point(s.end), "{:?}", s);
        }
    }

    #[test]
    fn test_deterministic() {
        let points: Vec<Point2<f64>> = (0..40)
            .map(|i| {
                let t = i as f64;
                Point2::new((t * 7.31).sin() * 50.0, (t * 3.17).cos() * 50.0)
            })
            .collect();

        let first = voronoi_segments(&points);
        let second = voronoi_segments(&points);
        assert_eq!(first, second);
    }

    #[test]
    fn test_try_construct() {
        let builder = FortuneVoronoiBuilder::new();
        let points = [Point2::new(0.0_f64, 0.0), Point2::new(f64::INFINITY, 1.0)];
        assert_eq!(
            builder.try_construct(&points),
            Err(DualError::NonFiniteCoordinate { index: 1 })
        );

        let builder =
            FortuneVoronoiBuilder::with_config(VoronoiConfig::default().with_margin_fraction(-1.0));
        assert!(builder.try_construct(&[Point2::new(0.0_f64, 0.0)]).is_err());

        let ok = FortuneVoronoiBuilder::new()
            .try_construct(&[Point2::new(0.0_f64, 0.0), Point2::new(10.0, 0.0)])
            .unwrap();
        assert_eq!(ok.len(), 1);
    }

    #[test]
    fn test_f32_sites() {
        let segments = voronoi_segments(&[Point2::new(0.0_f32, 0.0), Point2::new(10.0, 0.0)]);
        assert_eq!(segments.len(), 1);
        assert!((segments[0].start.x - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_f32_small_triangle() {
        let points = [
            Point2::new(0.0_f32, 0.0),
            Point2::new(1e-4, 0.0),
            Point2::new(5e-5, 1e-4),
        ];
        let segments = voronoi_segments(&points);
        assert_eq!(segments.len(), 3);

        let vertex = Point2::new(5e-5_f32, 3.75e-5);
        for s in &segments {
            assert!(
                s.start.approx_eq(vertex, 1e-9) || s.end.approx_eq(vertex, 1e-9),
                "{:?} does not touch {:?}",
                s,
                vertex
            );
        }
    }
}
