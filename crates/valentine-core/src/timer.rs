//! Cooperative one-shot timers driven by an injectable clock.

use std::cell::Cell;
use std::time::{Duration, Instant};

/// Source of monotonic time.
pub trait Clock {
    /// Current instant.
    fn now(&self) -> Instant;
}

/// Wall clock backed by [`Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    offset: Cell<Duration>,
}

impl ManualClock {
    /// Start a clock at the current instant.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: Cell::new(Duration::ZERO),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        self.offset.set(self.offset.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.offset.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for std::rc::Rc<C> {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

/// A single pending deadline. Arming replaces any previous deadline, so at
/// most one firing is ever outstanding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OneShotTimer {
    deadline: Option<Instant>,
}

impl OneShotTimer {
    /// Timer with nothing pending.
    #[must_use]
    pub const fn idle() -> Self {
        Self { deadline: None }
    }

    /// Schedule a firing `delay` after `now`, discarding any earlier one.
    pub fn arm(&mut self, now: Instant, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    /// Drop the pending firing, if any.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Whether a firing is pending.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Consume the firing if its deadline has passed.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(500);

    #[test]
    fn fires_once_after_deadline() {
        let clock = ManualClock::new();
        let mut timer = OneShotTimer::idle();
        timer.arm(clock.now(), DELAY);

        clock.advance(DELAY - Duration::from_millis(1));
        assert!(!timer.fire_if_due(clock.now()));

        clock.advance(Duration::from_millis(1));
        assert!(timer.fire_if_due(clock.now()));
        assert!(!timer.fire_if_due(clock.now()));
        assert!(!timer.is_armed());
    }

    #[test]
    fn cancel_prevents_firing() {
        let clock = ManualClock::new();
        let mut timer = OneShotTimer::idle();
        timer.arm(clock.now(), DELAY);
        timer.cancel();
        clock.advance(DELAY * 10);
        assert!(!timer.fire_if_due(clock.now()));
    }

    #[test]
    fn rearming_replaces_previous_deadline() {
        let clock = ManualClock::new();
        let mut timer = OneShotTimer::idle();
        timer.arm(clock.now(), DELAY);
        clock.advance(DELAY / 2);
        timer.arm(clock.now(), DELAY);

        clock.advance(DELAY / 2);
        assert!(!timer.fire_if_due(clock.now()));
        clock.advance(DELAY / 2);
        assert!(timer.fire_if_due(clock.now()));
    }
}
