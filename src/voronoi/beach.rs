//! The beach line: an arena-backed, doubly linked sequence of parabolic arcs.
//!
//! The sweep line moves towards increasing x. Each arc is the part of the
//! parabola with focus `focus` and directrix `x = l` that is currently
//! closest to the sweep line; arcs are ordered by increasing y of their
//! breakpoints. Links are arena indices, so arcs never own each other.

use super::events::EventId;
use super::segments::SegmentId;
use crate::primitives::Point2;
use num_traits::Float;

/// Index of an arc in the beach-line arena.
pub(crate) type ArcId = usize;

/// One parabolic arc of the beach line.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Arc<F> {
    /// Site whose parabola this arc belongs to.
    pub focus: Point2<F>,
    pub prev: Option<ArcId>,
    pub next: Option<ArcId>,
    /// Pending circle event that would remove this arc.
    pub event: Option<EventId>,
    /// Edge traced by the breakpoint with `prev`.
    pub left: Option<SegmentId>,
    /// Edge traced by the breakpoint with `next`.
    pub right: Option<SegmentId>,
}

impl<F: Float> Arc<F> {
    fn detached(focus: Point2<F>) -> Self {
        Self {
            focus,
            prev: None,
            next: None,
            event: None,
            left: None,
            right: None,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct BeachLine<F> {
    arcs: Vec<Arc<F>>,
    head: Option<ArcId>,
    len: usize,
}

impl<F: Float> BeachLine<F> {
    pub(crate) fn new() -> Self {
        Self {
            arcs: Vec::new(),
            head: None,
            len: 0,
        }
    }

    /// Number of arcs currently on the beach line.
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    #[inline]
    pub(crate) fn arc(&self, id: ArcId) -> &Arc<F> {
        &self.arcs[id]
    }

    #[inline]
    pub(crate) fn arc_mut(&mut self, id: ArcId) -> &mut Arc<F> {
        &mut self.arcs[id]
    }

    /// Starts the beach line with its first arc.
    pub(crate) fn insert_first(&mut self, focus: Point2<F>) -> ArcId {
        debug_assert!(self.is_empty());
        let id = self.arcs.len();
        self.arcs.push(Arc::detached(focus));
        self.head = Some(id);
        self.len = 1;
        id
    }

    /// Inserts a new arc directly after `anchor`.
    pub(crate) fn insert_after(&mut self, anchor: ArcId, focus: Point2<F>) -> ArcId {
        let next = self.arcs[anchor].next;
        let id = self.arcs.len();
        self.arcs.push(Arc {
            prev: Some(anchor),
            next,
            ..Arc::detached(focus)
        });
        self.arcs[anchor].next = Some(id);
        if let Some(n) = next {
            self.arcs[n].prev = Some(id);
        }
        self.len += 1;
        id
    }

    /// Inserts a new arc directly before `anchor`.
    pub(crate) fn insert_before(&mut self, anchor: ArcId, focus: Point2<F>) -> ArcId {
        let prev = self.arcs[anchor].prev;
        let id = self.arcs.len();
        self.arcs.push(Arc {
            prev,
            next: Some(anchor),
            ..Arc::detached(focus)
        });
        self.arcs[anchor].prev = Some(id);
        match prev {
            Some(p) => self.arcs[p].next = Some(id),
            None => self.head = Some(id),
        }
        self.len += 1;
        id
    }

    /// Unlinks `id`, joining its neighbours. The arena slot is kept so
    /// stale ids never alias a different arc.
    pub(crate) fn remove(&mut self, id: ArcId) {
        let Arc { prev, next, .. } = self.arcs[id];
        match prev {
            Some(p) => self.arcs[p].next = next,
            None => self.head = next,
        }
        if let Some(n) = next {
            self.arcs[n].prev = prev;
        }
        let arc = &mut self.arcs[id];
        arc.prev = None;
        arc.next = None;
        arc.event = None;
        self.len -= 1;
    }

    /// Iterates arc ids from the lowest breakpoint to the highest.
    pub(crate) fn iter(&self) -> Iter<'_, F> {
        Iter {
            beach: self,
            cursor: self.head,
        }
    }

    /// Finds the arc lying above height `y` when the sweep is at `l`.
    ///
    /// An arc qualifies when `y` falls between its lower and upper
    /// breakpoints (inclusive); the first qualifying arc wins. Falls back
    /// to the last arc if rounding leaves `y` in no range. Returns `None`
    /// only for an empty beach line.
    pub(crate) fn locate(&self, y: F, l: F) -> Option<ArcId> {
        let mut last = None;
        for id in self.iter() {
            let arc = &self.arcs[id];
            let above_lower = match arc.prev {
                Some(prev) => breakpoint(self.arcs[prev].focus, arc.focus, l).y <= y,
                None => true,
            };
            let below_upper = match arc.next {
                Some(next) => y <= breakpoint(arc.focus, self.arcs[next].focus, l).y,
                None => true,
            };
            if above_lower && below_upper {
                return Some(id);
            }
            last = Some(id);
        }
        last
    }

    #[cfg(test)]
    pub(crate) fn foci(&self) -> Vec<Point2<F>> {
        self.iter().map(|id| self.arcs[id].focus).collect()
    }
}

pub(crate) struct Iter<'a, F> {
    beach: &'a BeachLine<F>,
    cursor: Option<ArcId>,
}

impl<F: Float> Iterator for Iter<'_, F> {
    type Item = ArcId;

    fn next(&mut self) -> Option<ArcId> {
        let id = self.cursor?;
        self.cursor = self.beach.arcs[id].next;
        Some(id)
    }
}

/// x of the point at height `y` on the parabola with `focus` and directrix
/// `x = l`. Undefined (division by zero) when `focus.x == l`.
#[inline]
pub(crate) fn parabola_x<F: Float>(focus: Point2<F>, y: F, l: F) -> F {
    let dy = focus.y - y;
    (focus.x * focus.x + dy * dy - l * l) / (focus.x + focus.x - l - l)
}

/// Intersection of the parabolas of `lower` and `upper` (in beach-line
/// order) for the sweep at `l`.
///
/// Same-x foci meet on their horizontal bisector. A focus lying on the
/// sweep line degenerates to a horizontal ray at its own height.
pub(crate) fn breakpoint<F: Float>(lower: Point2<F>, upper: Point2<F>, l: F) -> Point2<F> {
    let two = F::one() + F::one();
    let four = two + two;

    let mut p = lower;
    let y = if lower.x == upper.x {
        (lower.y + upper.y) / two
    } else if upper.x == l {
        upper.y
    } else if lower.x == l {
        p = upper;
        lower.y
    } else {
        let z0 = two * (lower.x - l);
        let z1 = two * (upper.x - l);
        let a = F::one() / z0 - F::one() / z1;
        let b = -two * (lower.y / z0 - upper.y / z1);
        let c = (lower.y * lower.y + lower.x * lower.x - l * l) / z0
            - (upper.y * upper.y + upper.x * upper.x - l * l) / z1;
        let disc = (b * b - four * a * c).max(F::zero());
        (-b - disc.sqrt()) / (two * a)
    };

    Point2::new(parabola_x(p, y, l), y)
}
