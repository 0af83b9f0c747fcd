//! Virtual clock with a queue of scheduled wakeups.
//!
//! Every suspension point in the engine ("wait 800 ms, then play") is a
//! payload scheduled here. Time only moves when the host pops due entries,
//! which makes playback and countdowns fully deterministic under test.
//!
//! Entries due at the same instant pop in scheduling order.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// A payload waiting for its due time.
#[derive(Debug)]
struct Scheduled<T> {
    due_ms: u64,
    seq: u64,
    payload: T,
}

impl<T> PartialEq for Scheduled<T> {
    fn eq(&self, other: &Self) -> bool {
        self.due_ms == other.due_ms && self.seq == other.seq
    }
}

impl<T> Eq for Scheduled<T> {}

impl<T> PartialOrd for Scheduled<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Scheduled<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due_ms, self.seq).cmp(&(other.due_ms, other.seq))
    }
}

/// Millisecond virtual clock.
#[derive(Debug)]
pub struct VirtualClock<T> {
    now_ms: u64,
    next_seq: u64,
    queue: BinaryHeap<Reverse<Scheduled<T>>>,
}

impl<T> Default for VirtualClock<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> VirtualClock<T> {
    /// Create a clock at time zero with nothing scheduled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_seq: 0,
            queue: BinaryHeap::new(),
        }
    }

    /// Current virtual time.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of entries still queued (including ones the owner will discard as stale).
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Schedule `payload` to fire `delay_ms` from now. Returns the due time.
    pub fn schedule_in(&mut self, delay_ms: u64, payload: T) -> u64 {
        let due_ms = self.now_ms.saturating_add(delay_ms);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Reverse(Scheduled {
            due_ms,
            seq,
            payload,
        }));
        due_ms
    }

    /// Due time of the earliest entry.
    #[must_use]
    pub fn next_due_ms(&self) -> Option<u64> {
        self.queue.peek().map(|Reverse(s)| s.due_ms)
    }

    /// Pop the earliest entry if it is due at or before `until_ms`,
    /// moving the clock to its due time.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<T> {
        if self.next_due_ms()? > until_ms {
            return None;
        }
        self.pop_next()
    }

    /// Pop the earliest entry regardless of how far ahead it is.
    pub fn pop_next(&mut self) -> Option<T> {
        let Reverse(entry) = self.queue.pop()?;
        self.now_ms = self.now_ms.max(entry.due_ms);
        Some(entry.payload)
    }

    /// Move the clock forward to `ms` (never backwards).
    pub fn advance_to(&mut self, ms: u64) {
        self.now_ms = self.now_ms.max(ms);
    }

    /// Drop everything scheduled. Time is not reset.
    pub fn clear(&mut self) {
        self.queue.clear();
    }
}
