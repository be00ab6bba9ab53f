//! Delayed-task abstraction used for debouncing.
//!
//! The session never sleeps or owns a timer. It asks the host's scheduler to
//! call back after a delay and cancels the previous timer on every edit.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u64);

pub trait Scheduler {
    /// Arrange for the host to call `LiveSession::on_timer(generation)`
    /// once `delay` has elapsed.
    fn schedule(&mut self, delay: Duration, generation: u64) -> TimerId;

    /// Cancel a timer. Cancelling an already-fired timer is a no-op.
    fn cancel(&mut self, id: TimerId);
}

#[derive(Debug, Clone)]
struct PendingTimer {
    id: TimerId,
    due: Duration,
    generation: u64,
}

/// Scheduler driven by a manually advanced clock.
///
/// Hosts without a timer facility (and tests) advance it explicitly and feed
/// the fired generations back into the session.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_id: u64,
    timers: Vec<PendingTimer>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Move the clock forward and return the generations of every timer that
    /// came due, in firing order.
    pub fn advance(&mut self, by: Duration) -> Vec<u64> {
        self.now += by;
        let now = self.now;
        let (mut due, rest): (Vec<PendingTimer>, Vec<PendingTimer>) =
            self.timers.drain(..).partition(|t| t.due <= now);
        self.timers = rest;
        due.sort_by_key(|t| (t.due, t.id.0));
        due.into_iter().map(|t| t.generation).collect()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration, generation: u64) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.timers.push(PendingTimer {
            id,
            due: self.now + delay,
            generation,
        });
        id
    }

    fn cancel(&mut self, id: TimerId) {
        self.timers.retain(|t| t.id != id);
    }
}
