// SPDX-License-Identifier: MPL-2.0
//! Cancellable group of named timer events.
//!
//! Owners schedule events with a deadline and poll the set with the current
//! instant from their tick handler. Clearing the set cancels every pending
//! event at once, so nothing scheduled before a teardown can fire after it.

use std::time::{Duration, Instant};

/// Scheduling order; breaks ties between equal deadlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct TimerId(u64);

#[derive(Debug, Clone)]
struct Pending<E> {
    id: TimerId,
    deadline: Instant,
    event: E,
}

/// Arena of pending timer events.
#[derive(Debug, Clone)]
pub struct TimerSet<E> {
    pending: Vec<Pending<E>>,
    next_id: u64,
}

impl<E> Default for TimerSet<E> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
            next_id: 0,
        }
    }
}

impl<E> TimerSet<E> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `event` to fire `delay` after `now`.
    pub fn schedule(&mut self, now: Instant, delay: Duration, event: E) {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending {
            id,
            deadline: now + delay,
            event,
        });
    }

    /// Cancels every event matching the predicate, returning how many were dropped.
    pub fn cancel_where(&mut self, mut predicate: impl FnMut(&E) -> bool) -> usize {
        let before = self.pending.len();
        self.pending.retain(|p| !predicate(&p.event));
        before - self.pending.len()
    }

    /// Cancels every pending event.
    pub fn clear(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        dropped
    }

    /// Removes and returns all events due at `now`, earliest deadline first.
    /// Events with equal deadlines keep their scheduling order.
    pub fn poll(&mut self, now: Instant) -> Vec<E> {
        let mut due = Vec::new();
        while let Some((_, event)) = self.pop_due(now) {
            due.push(event);
        }
        due
    }

    /// Removes the earliest event due at `now` together with its deadline.
    pub fn pop_due(&mut self, now: Instant) -> Option<(Instant, E)> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.deadline <= now)
            .min_by_key(|(_, p)| (p.deadline, p.id))
            .map(|(index, _)| index)?;
        let pending = self.pending.remove(index);
        Some((pending.deadline, pending.event))
    }

    /// Removes every pending event without firing it, earliest deadline first.
    pub fn drain(&mut self) -> Vec<E> {
        let mut pending = std::mem::take(&mut self.pending);
        pending.sort_by_key(|p| (p.deadline, p.id));
        pending.into_iter().map(|p| p.event).collect()
    }

    /// Earliest pending deadline, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|p| p.deadline).min()
    }

    #[must_use]
    pub fn contains(&self, mut predicate: impl FnMut(&E) -> bool) -> bool {
        self.pending.iter().any(|p| predicate(&p.event))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
