//! Timer APIs
//!
//! setTimeout / clearTimeout over a virtual clock. The page loop advances
//! the clock explicitly, so a timer fires exactly when its delay has
//! elapsed on that clock and never on wall time.

use std::collections::BTreeMap;
use std::time::Duration;

/// Timer handle returned by `set_timeout`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

/// Timer entry
#[derive(Debug, Clone)]
struct Timer<T> {
    task: T,
    due: Duration,
}

/// One-shot timer queue carrying a task payload per timer
#[derive(Debug)]
pub struct TimerQueue<T> {
    timers: BTreeMap<TimerId, Timer<T>>,
    now: Duration,
    next_id: u64,
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            timers: BTreeMap::new(),
            now: Duration::ZERO,
            next_id: 1,
        }
    }

    /// Current clock value
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedule `task` to fire after `delay`
    pub fn set_timeout(&mut self, task: T, delay: Duration) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.insert(id, Timer { task, due: self.now + delay });
        id
    }

    /// Cancel a timer; returns false if it already fired or was cleared
    pub fn clear(&mut self, id: TimerId) -> bool {
        self.timers.remove(&id).is_some()
    }

    /// Check if there are pending timers
    pub fn has_pending(&self) -> bool {
        !self.timers.is_empty()
    }

    /// Number of pending timers
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Pop the earliest timer due at or before `deadline`, moving the clock
    /// to its due time. Ties fire in creation order.
    pub fn pop_due(&mut self, deadline: Duration) -> Option<(TimerId, T)> {
        let (&id, _) = self.timers.iter()
            .filter(|(_, t)| t.due <= deadline)
            .min_by_key(|(id, t)| (t.due, **id))?;
        let timer = self.timers.remove(&id)?;
        self.now = self.now.max(timer.due);
        Some((id, timer.task))
    }

    /// Move the clock forward without firing anything
    pub fn set_now(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    /// Advance the clock by `dt`, returning fired tasks in due order.
    ///
    /// Tasks scheduled by callers while processing the result are not
    /// included; use `pop_due` in a loop for that.
    pub fn advance(&mut self, dt: Duration) -> Vec<T> {
        let deadline = self.now + dt;
        let mut fired = Vec::new();
        while let Some((_, task)) = self.pop_due(deadline) {
            fired.push(task);
        }
        self.now = deadline;
        fired
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
