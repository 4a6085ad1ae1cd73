//! Reconnect state machine used by the connection worker.
//!
//! Transitions take the current [`Instant`] so the timing rules can be
//! exercised without sleeping.

use std::time::{Duration, Instant};

use super::state::{ConnectionState, SharedState};

/// A single pending reconnect attempt.
///
/// Scheduling replaces any earlier deadline, so at most one attempt is ever
/// pending.
#[derive(Clone, Debug)]
pub struct RetryTimer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl RetryTimer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Cancel any pending attempt and schedule a new one `delay` after `now`.
    pub fn schedule(&mut self, now: Instant) -> Instant {
        let deadline = now + self.delay;
        self.deadline = Some(deadline);
        deadline
    }

    /// Cancel the pending attempt. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Number of pending attempts: zero or one.
    pub fn pending(&self) -> usize {
        usize::from(self.deadline.is_some())
    }

    /// Consume the pending attempt if its deadline has passed.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Connection lifecycle: `Connecting → Open → Closed → Connecting → …`.
///
/// Every failure kind (refused connect, handshake error, listener close,
/// socket error) goes through [`Lifecycle::failed`]. There is no terminal
/// state and no limit on attempts.
#[derive(Debug)]
pub struct Lifecycle {
    state: SharedState,
    timer: RetryTimer,
    in_flight: bool,
}

impl Lifecycle {
    /// Create a lifecycle publishing into `state` and waiting `retry_delay`
    /// between a failure and the next attempt.
    pub fn new(state: SharedState, retry_delay: Duration) -> Self {
        Self {
            state,
            timer: RetryTimer::new(retry_delay),
            in_flight: false,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state.get()
    }

    pub fn timer(&self) -> &RetryTimer {
        &self.timer
    }

    /// Mark an attempt as started.
    ///
    /// Returns `false`, leaving everything untouched, while another attempt
    /// is still outstanding.
    pub fn begin_connect(&mut self) -> bool {
        if self.in_flight {
            return false;
        }
        self.in_flight = true;
        self.state.set(ConnectionState::Connecting);
        true
    }

    /// The attempt succeeded. Clears any pending retry.
    pub fn opened(&mut self) {
        self.in_flight = false;
        self.timer.cancel();
        self.state.set(ConnectionState::Open);
    }

    /// The attempt failed or the open connection dropped.
    ///
    /// Replaces any pending retry with one due `retry_delay` after `now` and
    /// returns its deadline.
    pub fn failed(&mut self, now: Instant) -> Instant {
        self.in_flight = false;
        self.state.set(ConnectionState::Closed);
        self.timer.schedule(now)
    }

    /// The owner went away: drop any pending retry and report closed.
    pub fn stop(&mut self) {
        self.in_flight = false;
        self.timer.cancel();
        self.state.set(ConnectionState::Closed);
    }

    /// Whether the scheduled retry is due. A due retry is consumed.
    pub fn retry_due(&mut self, now: Instant) -> bool {
        !self.in_flight && self.timer.fire(now)
    }
}
