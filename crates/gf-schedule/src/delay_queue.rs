//! `DelayQueue` — actions waiting for their registration delay to elapse.
//!
//! # Why this exists
//!
//! Delayed actions must not be touched at all until they are due.  Scanning
//! every delayed action each frame would cost O(delayed) per frame even when
//! nothing is due.  Keyed by due time, the queue pops exactly the entries
//! that became due: O(log D) per insert and per due time, where D is the
//! number of distinct due times.

use std::collections::BTreeMap;

use gf_core::{ActionHandle, SimTime};

/// Ordered map of due time → handles registered for that time.
///
/// Handles sharing a due time keep their registration order.
#[derive(Debug, Default)]
pub struct DelayQueue {
    inner: BTreeMap<SimTime, Vec<ActionHandle>>,
    /// Cached total handle count for O(1) `len()`.
    total: usize,
}

impl DelayQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold `handle` until `due`.
    pub fn push(&mut self, due: SimTime, handle: ActionHandle) {
        self.inner.entry(due).or_default().push(handle);
        self.total += 1;
    }

    /// Move every handle due at or before `now` into `out`, earliest first.
    ///
    /// Returns the number moved.
    pub fn drain_due(&mut self, now: SimTime, out: &mut Vec<ActionHandle>) -> usize {
        let mut moved = 0;
        while let Some(entry) = self.inner.first_entry() {
            if *entry.key() > now {
                break;
            }
            let handles = entry.remove();
            moved += handles.len();
            out.extend(handles);
        }
        self.total -= moved;
        moved
    }

    /// Drop `handle` from the entry at `due`.  Returns `false` if it was not
    /// queued there.
    pub fn remove(&mut self, due: SimTime, handle: ActionHandle) -> bool {
        let Some(handles) = self.inner.get_mut(&due) else {
            return false;
        };
        let Some(pos) = handles.iter().position(|&h| h == handle) else {
            return false;
        };
        handles.remove(pos);
        if handles.is_empty() {
            self.inner.remove(&due);
        }
        self.total -= 1;
        true
    }

    /// The earliest due time, or `None` if empty.
    pub fn next_due(&self) -> Option<SimTime> {
        self.inner.keys().next().copied()
    }

    /// Total number of queued handles.
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
