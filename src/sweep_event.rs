// SPDX-License-Identifier: AGPL-3.0-or-later

//! The event queue driving both sweep passes.
//!
//! Events are keyed by an x coordinate and dequeued in batches: all events
//! sharing the minimum key come out together, in the order they were pushed.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;

/// What happens at an event's x coordinate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EventKind {
    /// The path with this arena index becomes active.
    Enter(usize),
    /// The path with this arena index leaves the active set.
    Exit(usize),
    /// Classify a fragment at its midpoint.
    CheckInside {
        /// Arena index of the fragment's path.
        owner: usize,
        /// Fragment index within the owner.
        fragment: usize,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct SweepEvent {
    x: OrderedFloat<f64>,
    seq: u64,
    kind: EventKind,
}

impl PartialOrd for SweepEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SweepEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        // Order is reversed because the BinaryHeap is a max-heap but the
        // sweep needs the smallest key first.
        (self.x, self.seq).cmp(&(other.x, other.seq)).reverse()
    }
}

/// Priority queue of sweep events, ordered by x then insertion order.
#[derive(Debug, Default)]
pub struct EventQueue {
    heap: BinaryHeap<SweepEvent>,
    next_seq: u64,
}

impl EventQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        EventQueue::default()
    }

    /// Schedule an event at `x`. Events pushed later sort later among equal
    /// keys.
    pub fn push(&mut self, x: f64, kind: EventKind) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(SweepEvent {
            x: OrderedFloat(x),
            seq,
            kind,
        });
    }

    /// Number of scheduled events.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Is the queue empty?
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Remove and return all events sharing the minimum x key, in insertion
    /// order, together with that key.
    pub fn pop_batch(&mut self) -> Option<(f64, Vec<EventKind>)> {
        let first = self.heap.pop()?;
        let x = first.x;
        let mut batch = vec![first.kind];
        while self.heap.peek().map_or(false, |event| event.x == x) {
            if let Some(event) = self.heap.pop() {
                batch.push(event.kind);
            }
        }
        Some((x.into_inner(), batch))
    }
}
