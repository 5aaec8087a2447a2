//! Zero-delay deferred timers
//!
//! The host runtime has no wall clock. Instead it advances in ticks: a timer
//! set during tick `n` becomes due on tick `n + 1`, which is what a
//! `setTimeout(cb)` with no delay means to the widgets. Widgets debounce
//! work by clearing their previous timer and setting a new one, so any
//! number of changes within a tick collapse into a single callback.
//!
//! The queue only tracks *who* owns a due timer; the runtime routes fired
//! timers back to their owners.

use std::collections::VecDeque;

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle for a scheduled timer
    pub struct TimerId;
}

/// Cleared ids tolerated in the scheduling order before it is compacted
const COMPACT_SLACK: usize = 16;

struct PendingTimer<K> {
    owner: K,
    due_tick: u64,
}

/// Deferred timer queue keyed by owner
pub struct TimerQueue<K> {
    timers: SlotMap<TimerId, PendingTimer<K>>,
    /// Scheduling order; may contain ids that were already cleared
    order: VecDeque<TimerId>,
    tick: u64,
}

impl<K> Default for TimerQueue<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> TimerQueue<K> {
    /// Create an empty queue at tick 0
    pub fn new() -> Self {
        Self {
            timers: SlotMap::with_key(),
            order: VecDeque::new(),
            tick: 0,
        }
    }

    /// Schedule a zero-delay timer for `owner`
    pub fn set_timeout(&mut self, owner: K) -> TimerId {
        let id = self.timers.insert(PendingTimer {
            owner,
            due_tick: self.tick + 1,
        });
        self.order.push_back(id);
        tracing::trace!(?id, tick = self.tick, "timer scheduled");
        id
    }

    /// Cancel a timer. Returns false if it already fired or was cleared.
    pub fn clear_timeout(&mut self, id: TimerId) -> bool {
        let cleared = self.timers.remove(id).is_some();
        if cleared {
            tracing::trace!(?id, "timer cleared");
            self.compact();
        }
        cleared
    }

    /// Drop cleared ids from `order` once they outnumber live timers
    fn compact(&mut self) {
        if self.order.len() <= 2 * self.timers.len() + COMPACT_SLACK {
            return;
        }
        let timers = &self.timers;
        self.order.retain(|id| timers.contains_key(*id));
    }

    /// Whether `id` is still waiting to fire
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    /// Number of pending timers
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// The tick the queue is currently in
    pub fn current_tick(&self) -> u64 {
        self.tick
    }
}

impl<K: Copy + PartialEq> TimerQueue<K> {
    /// Cancel every pending timer owned by `owner`, returning how many
    pub fn clear_owner(&mut self, owner: K) -> usize {
        let before = self.timers.len();
        self.timers.retain(|_, t| t.owner != owner);
        self.compact();
        before - self.timers.len()
    }

    /// Move to the next tick and take every timer that is now due, in the
    /// order they were scheduled.
    pub fn advance(&mut self) -> Vec<(TimerId, K)> {
        self.tick += 1;
        let mut fired = Vec::new();
        let mut keep = VecDeque::with_capacity(self.order.len());

        for id in self.order.drain(..) {
            match self.timers.get(id) {
                Some(t) if t.due_tick <= self.tick => {
                    fired.push((id, t.owner));
                }
                Some(_) => keep.push_back(id),
                // cleared
                None => {}
            }
        }
        for (id, _) in &fired {
            self.timers.remove(*id);
        }
        self.order = keep;

        tracing::trace!(tick = self.tick, fired = fired.len(), "tick");
        fired
    }
}
