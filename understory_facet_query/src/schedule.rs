// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cancellable delayed tasks.
//!
//! The aggregator never reads a clock. It asks a [`Scheduler`] to fire a
//! [`Ticket`] after a delay and cancels the ticket when a newer change
//! supersedes it. Hosts back the trait with their event loop's timers; tests
//! and frame-driven hosts use [`ManualScheduler`].

use alloc::vec::Vec;

use smallvec::SmallVec;

/// Handle for one scheduled emission.
///
/// Tickets are issued in increasing order by a single aggregator, so a later
/// ticket always belongs to a later burst of changes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(pub u64);

/// Schedule-after-delay plus cancel-pending.
pub trait Scheduler {
    /// Arrange for `ticket` to be handed back to the aggregator after `delay` ticks.
    fn schedule(&mut self, ticket: Ticket, delay: u64);

    /// Drop `ticket` if it has not fired yet.
    ///
    /// Implementations may ignore this (for example when the underlying timer
    /// cannot be cancelled); the aggregator ignores stale tickets anyway.
    fn cancel(&mut self, ticket: Ticket);
}

/// A scheduler driven by explicit time advancement.
///
/// Time is an opaque `u64` tick count (milliseconds in most hosts).
///
/// ```
/// use understory_facet_query::{ManualScheduler, Scheduler, Ticket};
///
/// let mut timers = ManualScheduler::new();
/// timers.schedule(Ticket(1), 300);
/// assert!(timers.advance_to(299).is_empty());
/// assert_eq!(timers.advance_to(300).as_slice(), &[Ticket(1)]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    now: u64,
    queue: Vec<(u64, Ticket)>,
}

impl ManualScheduler {
    /// Create a scheduler at time `0`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current time.
    #[must_use]
    pub const fn now(&self) -> u64 {
        self.now
    }

    /// Number of tickets waiting to fire.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Deadline of `ticket`, if it is still waiting.
    #[must_use]
    pub fn deadline(&self, ticket: Ticket) -> Option<u64> {
        self.queue
            .iter()
            .find(|(_, t)| *t == ticket)
            .map(|(due, _)| *due)
    }

    /// Move time forward to `now` and return every ticket that came due, in
    /// deadline order (ties in scheduling order).
    ///
    /// Time never moves backwards; an earlier `now` leaves the clock alone.
    pub fn advance_to(&mut self, now: u64) -> SmallVec<[Ticket; 2]> {
        self.now = self.now.max(now);
        let mut due: SmallVec<[(u64, Ticket); 2]> = SmallVec::new();
        self.queue.retain(|&(at, ticket)| {
            if at <= self.now {
                due.push((at, ticket));
                false
            } else {
                true
            }
        });
        due.sort_by_key(|&(at, ticket)| (at, ticket));
        due.into_iter().map(|(_, ticket)| ticket).collect()
    }

    /// Move time forward by `delta`.
    pub fn advance_by(&mut self, delta: u64) -> SmallVec<[Ticket; 2]> {
        self.advance_to(self.now.saturating_add(delta))
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, ticket: Ticket, delay: u64) {
        self.queue.push((self.now.saturating_add(delay), ticket));
    }

    fn cancel(&mut self, ticket: Ticket) {
        self.queue.retain(|&(_, t)| t != ticket);
    }
}

#[cfg(test)]
mod tests {
    use super::{ManualScheduler, Scheduler, Ticket};

    #[test]
    fn cancelled_tickets_never_fire() {
        let mut timers = ManualScheduler::new();
        timers.schedule(Ticket(1), 100);
        timers.cancel(Ticket(1));
        assert_eq!(timers.pending(), 0);
        assert!(timers.advance_by(1_000).is_empty());
    }

    #[test]
    fn due_tickets_come_back_in_deadline_order() {
        let mut timers = ManualScheduler::new();
        timers.schedule(Ticket(2), 50);
        timers.schedule(Ticket(1), 80);
        timers.schedule(Ticket(3), 500);
        assert_eq!(timers.deadline(Ticket(1)), Some(80));
        assert_eq!(timers.advance_to(100).as_slice(), &[Ticket(2), Ticket(1)]);
        assert_eq!(timers.pending(), 1);
        assert_eq!(timers.now(), 100);
    }

    #[test]
    fn time_does_not_run_backwards() {
        let mut timers = ManualScheduler::new();
        timers.advance_to(400);
        timers.advance_to(10);
        assert_eq!(timers.now(), 400);
        timers.schedule(Ticket(9), 10);
        assert_eq!(timers.deadline(Ticket(9)), Some(410));
    }
}
