//! Sweep events and the lazily-invalidated event queue.

use super::beach::ArcId;
use crate::primitives::Point2;
use num_traits::Float;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Index of an event in its queue's event table.
pub(crate) type EventId = usize;

/// Something that happens when the sweep line reaches `x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Event<F> {
    /// The sweep line reaches an input site.
    Site { x: F, point: Point2<F> },
    /// The arc `arc` shrinks to a point at `center`.
    Circle {
        x: F,
        center: Point2<F>,
        arc: ArcId,
    },
}

impl<F: Float> Event<F> {
    /// Sweep coordinate at which the event fires.
    #[inline]
    pub(crate) fn x(&self) -> F {
        match *self {
            Event::Site { x, .. } | Event::Circle { x, .. } => x,
        }
    }
}

/// Heap key: sweep coordinate, then insertion order.
#[derive(Debug, Clone, Copy)]
struct QueueKey<F> {
    x: F,
    seq: u64,
    id: EventId,
}

impl<F: Float> Ord for QueueKey<F> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.x
            .partial_cmp(&other.x)
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl<F: Float> PartialOrd for QueueKey<F> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<F: Float> PartialEq for QueueKey<F> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<F: Float> Eq for QueueKey<F> {}

/// Min-priority queue of events with tombstoning.
///
/// Invalidated events stay in the heap and are discarded when they reach
/// the top. The insertion counter is local to one queue, so two runs over
/// the same input pop events in the same order.
#[derive(Debug, Clone)]
pub(crate) struct EventQueue<F> {
    heap: BinaryHeap<Reverse<QueueKey<F>>>,
    events: Vec<Event<F>>,
    valid: Vec<bool>,
    counter: u64,
    live: usize,
}

impl<F: Float> EventQueue<F> {
    pub(crate) fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            events: Vec::new(),
            valid: Vec::new(),
            counter: 0,
            live: 0,
        }
    }

    /// Schedules `event` and returns its id.
    pub(crate) fn push(&mut self, event: Event<F>) -> EventId {
        let id = self.events.len();
        self.events.push(event);
        self.valid.push(true);
        self.heap.push(Reverse(QueueKey {
            x: event.x(),
            seq: self.counter,
            id,
        }));
        self.counter += 1;
        self.live += 1;
        id
    }

    /// Tombstones a pending event. Invalidating a popped or already
    /// invalidated event is a no-op.
    pub(crate) fn invalidate(&mut self, id: EventId) {
        if self.valid[id] {
            self.valid[id] = false;
            self.live -= 1;
        }
    }

    #[cfg(test)]
    pub(crate) fn is_valid(&self, id: EventId) -> bool {
        self.valid[id]
    }

    /// Number of pending (non-tombstoned) events.
    pub(crate) fn len(&self) -> usize {
        self.live
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Returns the soonest valid event without removing it.
    pub(crate) fn peek(&mut self) -> Option<&Event<F>> {
        self.discard_stale();
        match self.heap.peek() {
            Some(Reverse(key)) => Some(&self.events[key.id]),
            None => None,
        }
    }

    /// Removes and returns the soonest valid event.
    ///
    /// # Panics
    ///
    /// Panics if no valid event remains. The sweep only pops after checking
    /// `is_empty`, so reaching this is a logic error.
    pub(crate) fn pop(&mut self) -> Event<F> {
        self.discard_stale();
        match self.heap.pop() {
            Some(Reverse(key)) => {
                self.valid[key.id] = false;
                self.live -= 1;
                self.events[key.id]
            }
            None => panic!("pop from an empty event queue"),
        }
    }

    fn discard_stale(&mut self) {
        while let Some(Reverse(key)) = self.heap.peek() {
            if self.valid[key.id] {
                break;
            }
            self.heap.pop();
        }
    }
}
