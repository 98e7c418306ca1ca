//! Arena of Voronoi edges traced by beach-line breakpoints.
//!
//! A segment starts when a breakpoint appears and is completed once, either
//! at a Voronoi vertex or, for edges still open when the sweep ends, on the
//! clipping box. The two half-edges born together at a site event are
//! linked as twins; they lie on one bisector and are merged on output.

use crate::bounds::Aabb2;
use crate::primitives::{Point2, Segment2, Vec2};
use num_traits::Float;

/// Index of a segment in the accumulator arena.
pub(crate) type SegmentId = usize;

#[derive(Debug, Clone, Copy)]
struct Record<F> {
    start: Point2<F>,
    end: Option<Point2<F>>,
    twin: Option<SegmentId>,
}

#[derive(Debug, Clone)]
pub(crate) struct SegmentAccumulator<F> {
    records: Vec<Record<F>>,
}

impl<F: Float> SegmentAccumulator<F> {
    pub(crate) fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }

    /// Opens a single segment at `point`.
    pub(crate) fn start(&mut self, point: Point2<F>) -> SegmentId {
        let id = self.records.len();
        self.records.push(Record {
            start: point,
            end: None,
            twin: None,
        });
        id
    }

    /// Opens two twin segments at `point`, returned as `(lower, upper)` in
    /// beach-line order.
    pub(crate) fn start_pair(&mut self, point: Point2<F>) -> (SegmentId, SegmentId) {
        let lower = self.start(point);
        let upper = self.start(point);
        self.records[lower].twin = Some(upper);
        self.records[upper].twin = Some(lower);
        (lower, upper)
    }

    /// Sets the end of `id`. Only the first completion is kept.
    pub(crate) fn complete(&mut self, id: SegmentId, point: Point2<F>) {
        let record = &mut self.records[id];
        if record.end.is_none() {
            record.end = Some(point);
        }
    }

    pub(crate) fn is_completed(&self, id: SegmentId) -> bool {
        self.records[id].end.is_some()
    }

    pub(crate) fn start_of(&self, id: SegmentId) -> Point2<F> {
        self.records[id].start
    }

    pub(crate) fn end_of(&self, id: SegmentId) -> Option<Point2<F>> {
        self.records[id].end
    }

    pub(crate) fn twin_of(&self, id: SegmentId) -> Option<SegmentId> {
        self.records[id].twin
    }

    /// Completes every segment still open when the sweep ends.
    ///
    /// Each entry pairs an open segment with the direction its breakpoint
    /// travels. Segments are extended along that direction to where they
    /// leave `bounds`. When both halves of a twin pair are still open, the
    /// whole bisector line is clipped at once so the halves end on opposite
    /// sides of the box.
    pub(crate) fn finalize(&mut self, open: &[(SegmentId, Vec2<F>)], bounds: Aabb2<F>) {
        let reach = (bounds.width() + bounds.height()) * (F::one() + F::one());

        for &(id, dir) in open {
            if self.is_completed(id) {
                continue;
            }
            let unit = dir.normalize().unwrap_or_else(|| Vec2::new(F::one(), F::zero()));

            match self.twin_of(id) {
                Some(twin) if !self.is_completed(twin) => {
                    let origin = self.start_of(id);
                    let (ahead, behind) = match bounds.clip_line(origin, unit) {
                        Some((t_enter, t_exit)) => (origin + unit * t_exit, origin + unit * t_enter),
                        None => {
                            tracing::warn!(
                                segment = id,
                                "voronoi: bisector misses the clipping box"
                            );
                            (origin + unit * reach, origin + unit * -reach)
                        }
                    };
                    self.complete(id, ahead);
                    self.complete(twin, behind);
                }
                twin => {
                    // A completed twin ends at a vertex on the same bisector.
                    let origin = twin
                        .and_then(|t| self.end_of(t))
                        .unwrap_or_else(|| self.start_of(id));
                    let end = match bounds.ray_exit(origin, unit) {
                        Some(p) => p,
                        None => {
                            tracing::warn!(segment = id, "voronoi: ray misses the clipping box");
                            origin + unit * reach
                        }
                    };
                    self.complete(id, end);
                }
            }
        }
    }

    /// Emits completed segments. A twin pair becomes one segment joining its
    /// two end points. Zero-length segments, left where several vertices
    /// coincide, are dropped.
    pub(crate) fn into_segments(self) -> Vec<Segment2<F>> {
        let mut out = Vec::with_capacity(self.records.len());
        for (id, record) in self.records.iter().enumerate() {
            let end = match record.end {
                Some(end) => end,
                None => continue,
            };
            let segment = match record.twin.map(|t| (t, self.records[t].end)) {
                Some((twin, Some(twin_end))) => {
                    if id > twin {
                        continue;
                    }
                    Segment2::new(end, twin_end)
                }
                _ => Segment2::new(record.start, end),
            };
            if segment.start != segment.end {
                out.push(segment);
            }
        }
        out
    }
}
