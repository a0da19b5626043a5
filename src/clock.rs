use std::time::{Duration, Instant};

/// Fixed-interval tick scheduler driven by the owner's loop.
///
/// The clock never spawns threads or registers callbacks: the caller polls
/// it with the current instant and runs one tick when `poll` reports one
/// due. Because ticks only happen inside the caller's poll, at most one is
/// ever in flight. Pausing freezes the remaining wait, and a reset drops the
/// pending deadline entirely, so no stale tick can fire into a fresh game.
///
/// Every operation takes an explicit [`Instant`] so tests can drive the
/// schedule with synthetic time.
#[derive(Debug, Clone, Copy)]
pub struct TickClock {
    interval: Duration,
    deadline: Option<Instant>,
    frozen_remaining: Option<Duration>,
}

impl TickClock {
    /// Creates a stopped clock with the given tick interval.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            deadline: None,
            frozen_remaining: None,
        }
    }

    /// Begins scheduling; the first tick falls one interval after `now`.
    pub fn start(&mut self, now: Instant) {
        self.deadline = Some(now + self.interval);
        self.frozen_remaining = None;
    }

    /// Stops scheduling and remembers how much of the current wait was left.
    pub fn pause(&mut self, now: Instant) {
        if let Some(deadline) = self.deadline.take() {
            self.frozen_remaining = Some(deadline.saturating_duration_since(now));
        }
    }

    /// Continues a paused schedule where it left off.
    pub fn resume(&mut self, now: Instant) {
        if let Some(remaining) = self.frozen_remaining.take() {
            self.deadline = Some(now + remaining);
        }
    }

    /// Cancels any pending tick and leaves the clock stopped.
    pub fn reset(&mut self) {
        self.deadline = None;
        self.frozen_remaining = None;
    }

    /// Changes the interval used when scheduling the next tick.
    ///
    /// An in-flight wait keeps its original deadline; the new interval takes
    /// effect once that tick has fired.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// Returns the currently configured tick interval.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns true while the clock is started and not paused.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.deadline.is_some()
    }

    /// Reports whether a tick is due at `now`, scheduling the next one if so.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(deadline) = self.deadline else {
            return false;
        };
        if now < deadline {
            return false;
        }

        self.deadline = Some(now + self.interval);
        true
    }
}
