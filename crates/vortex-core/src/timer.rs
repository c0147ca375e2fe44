//! Cancellable deadlines on a logical clock.
//!
//! The clock is a `Duration` since the owning session started. Nothing fires
//! on its own: owners poll with the current time and act on what is due, so
//! there is never a callback running behind the owner's back.

use std::time::Duration;

/// A single pending deadline. Starting a new one replaces the old one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OneShotTimer {
    due: Option<Duration>,
}

impl OneShotTimer {
    pub fn start(&mut self, now: Duration, delay: Duration) {
        self.due = Some(now + delay);
    }

    pub fn cancel(&mut self) {
        self.due = None;
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.due.is_some()
    }

    #[inline]
    pub fn due(&self) -> Option<Duration> {
        self.due
    }

    /// Clear and return the deadline if it has passed.
    pub fn fire_if_due(&mut self, now: Duration) -> Option<Duration> {
        match self.due {
            Some(due) if due <= now => {
                self.due = None;
                Some(due)
            }
            _ => None,
        }
    }
}

/// A fixed-period tick. Each call to [`RepeatingTimer::fire_if_due`] consumes
/// at most one period, so a caller that fell behind catches up one tick at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RepeatingTimer {
    next: Option<Duration>,
    period: Duration,
}

impl RepeatingTimer {
    pub fn start(&mut self, now: Duration, period: Duration) {
        self.period = period;
        self.next = Some(now + period);
    }

    pub fn cancel(&mut self) {
        self.next = None;
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.next.is_some()
    }

    #[inline]
    pub fn due(&self) -> Option<Duration> {
        self.next
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn fire_if_due(&mut self, now: Duration) -> Option<Duration> {
        match self.next {
            Some(due) if due <= now => {
                self.next = Some(due + self.period);
                Some(due)
            }
            _ => None,
        }
    }
}
