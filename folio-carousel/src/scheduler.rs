//! Frame clock and single-shot debounce timer
//!
//! Both primitives are passive: the host calls them with the current time
//! from its own frame or timer callbacks. Starting, stopping and cancelling
//! are idempotent.

use std::time::{Duration, Instant};

/// Per-frame tick source. Produces the elapsed seconds since the previous
/// tick while active; the first tick after a start reports zero.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    active: bool,
    last: Option<Instant>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Returns `true` if the clock was stopped before this call.
    pub fn start(&mut self) -> bool {
        if self.active {
            return false;
        }
        self.active = true;
        self.last = None;
        true
    }

    /// Returns `true` if the clock was running before this call.
    pub fn stop(&mut self) -> bool {
        let was_active = self.active;
        self.active = false;
        self.last = None;
        was_active
    }

    /// Seconds elapsed since the previous tick, or `None` while stopped.
    pub fn tick(&mut self, now: Instant) -> Option<f64> {
        if !self.active {
            return None;
        }
        let delta = self
            .last
            .map(|last| now.saturating_duration_since(last).as_secs_f64())
            .unwrap_or(0.0);
        self.last = Some(now);
        Some(delta)
    }
}

/// Cancellable single-shot timer. Rescheduling replaces the pending
/// deadline, so callbacks never stack.
#[derive(Debug, Clone, Default)]
pub struct Debounce {
    deadline: Option<Instant>,
}

impl Debounce {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn schedule(&mut self, now: Instant, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    /// Returns `true` if a pending deadline was dropped.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    /// Fires at most once per schedule: `true` when the deadline has passed.
    pub fn poll(&mut self, now: Instant) -> bool {
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

    #[test]
    fn clock_reports_zero_on_first_tick_then_elapsed() {
        let t0 = Instant::now();
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(t0), None);

        assert!(clock.start());
        assert_eq!(clock.tick(t0), Some(0.0));
        let delta = clock.tick(t0 + Duration::from_millis(250)).unwrap();
        assert!((delta - 0.25).abs() < 1e-9);
    }

    #[test]
    fn clock_start_and_stop_are_idempotent() {
        let mut clock = FrameClock::new();
        assert!(!clock.stop());
        assert!(clock.start());
        assert!(!clock.start());
        assert!(clock.stop());
        assert!(!clock.stop());
        assert!(!clock.is_active());
    }

    #[test]
    fn restart_forgets_previous_timestamp() {
        let t0 = Instant::now();
        let mut clock = FrameClock::new();
        clock.start();
        clock.tick(t0);
        clock.stop();
        clock.start();
        assert_eq!(clock.tick(t0 + Duration::from_secs(30)), Some(0.0));
    }

    #[test]
    fn debounce_fires_once_after_deadline() {
        let t0 = Instant::now();
        let mut timer = Debounce::new();
        timer.schedule(t0, Duration::from_millis(700));
        assert!(!timer.poll(t0 + Duration::from_millis(699)));
        assert!(timer.poll(t0 + Duration::from_millis(700)));
        assert!(!timer.poll(t0 + Duration::from_millis(900)));
    }

    #[test]
    fn debounce_reschedule_replaces_deadline() {
        let t0 = Instant::now();
        let mut timer = Debounce::new();
        timer.schedule(t0, Duration::from_millis(700));
        timer.schedule(t0 + Duration::from_millis(500), Duration::from_millis(700));
        assert!(!timer.poll(t0 + Duration::from_millis(800)));
        assert!(timer.poll(t0 + Duration::from_millis(1200)));
    }

    #[test]
    fn debounce_cancel_is_idempotent() {
        let t0 = Instant::now();
        let mut timer = Debounce::new();
        assert!(!timer.cancel());
        timer.schedule(t0, Duration::from_millis(10));
        assert!(timer.cancel());
        assert!(!timer.cancel());
        assert!(!timer.poll(t0 + Duration::from_secs(1)));
    }
}
