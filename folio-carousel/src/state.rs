//! CarouselState: position, hover/lock focus and the autoplay pause window
//!
//! Transitions are pure with respect to the host: they mutate this struct
//! and report whether anything visible changed. Rendering is the caller's
//! job (see [`crate::Carousel`]).

use std::time::Instant;

use crate::geometry::wrap_position;
use crate::types::PAUSE_WINDOW;

#[derive(Debug, Clone, PartialEq)]
pub struct CarouselState {
    card_count: usize,
    /// Continuous slot position, kept in `[0, card_count)`.
    position: f64,
    speed: f64,
    hovered: Option<usize>,
    /// Takes priority over `hovered` and suppresses hover changes while set.
    locked: Option<usize>,
    pause_until: Option<Instant>,
}

impl CarouselState {
    pub fn new(card_count: usize, speed: f64) -> Self {
        Self {
            card_count,
            position: 0.0,
            speed,
            hovered: None,
            locked: None,
            pause_until: None,
        }
    }

    pub fn card_count(&self) -> usize {
        self.card_count
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn locked(&self) -> Option<usize> {
        self.locked
    }

    /// The card receiving the focus treatment: lock first, then hover.
    pub fn focus_index(&self) -> Option<usize> {
        self.locked.or(self.hovered)
    }

    pub fn pause_until(&self) -> Option<Instant> {
        self.pause_until
    }

    pub fn is_paused(&self, now: Instant) -> bool {
        self.pause_until.is_some_and(|until| now < until)
    }

    /// Jump to an absolute position, wrapped into range.
    pub fn set_position(&mut self, position: f64) {
        self.position = wrap_position(position, self.card_count);
    }

    fn open_pause_window(&mut self, now: Instant) {
        self.pause_until = Some(now + PAUSE_WINDOW);
    }

    /// Autoplay step. Returns the delta actually applied: zero while paused
    /// or when there are no cards.
    pub fn advance(&mut self, delta: f64, now: Instant) -> f64 {
        if self.card_count == 0 || self.is_paused(now) {
            return 0.0;
        }
        self.position =
            wrap_position(self.position + delta * self.speed, self.card_count);
        delta
    }

    /// Step one slot in `direction`, dropping any lock or hover and pausing
    /// autoplay. No-op on an empty track.
    pub fn nudge(&mut self, direction: i32, now: Instant) -> bool {
        if self.card_count == 0 {
            return false;
        }
        self.locked = None;
        self.hovered = None;
        let snapped = self.position.round() + f64::from(direction);
        self.position = wrap_position(snapped, self.card_count);
        self.open_pause_window(now);
        true
    }

    pub fn set_hover(&mut self, index: usize, now: Instant) -> bool {
        if self.locked.is_some() || index >= self.card_count {
            return false;
        }
        self.hovered = Some(index);
        self.open_pause_window(now);
        true
    }

    pub fn clear_hover(&mut self) -> bool {
        if self.locked.is_some() {
            return false;
        }
        self.hovered = None;
        true
    }

    /// Lock `index`, or unlock when it is already the locked card.
    pub fn toggle_lock(&mut self, index: usize, now: Instant) -> bool {
        if self.locked == Some(index) {
            self.locked = None;
            return true;
        }
        if index >= self.card_count {
            return false;
        }
        self.locked = Some(index);
        self.open_pause_window(now);
        true
    }

    pub fn clear_lock(&mut self) -> bool {
        self.locked.take().is_some()
    }

    /// Adopt a new card count after the host replaced its content.
    pub fn refresh(&mut self, card_count: usize) {
        self.card_count = card_count;
        if self.position >= card_count as f64 {
            self.position = 0.0;
        }
        if self.hovered.is_some_and(|index| index >= card_count) {
            self.hovered = None;
        }
        if self.locked.is_some_and(|index| index >= card_count) {
            self.locked = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn at(t0: Instant, ms: u64) -> Instant {
        t0 + Duration::from_millis(ms)
    }

    #[test]
    fn advance_scales_by_speed_and_wraps() {
        let t0 = Instant::now();
        let mut state = CarouselState::new(4, 0.5);
        assert_eq!(state.advance(2.0, t0), 2.0);
        assert!((state.position() - 1.0).abs() < 1e-12);
        state.advance(7.0, t0);
        assert!((state.position() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn advance_is_frozen_inside_pause_window() {
        let t0 = Instant::now();
        let mut state = CarouselState::new(5, 1.0);
        state.set_hover(2, t0);
        for ms in [0, 500, 1999] {
            assert_eq!(state.advance(0.25, at(t0, ms)), 0.0);
        }
        assert_eq!(state.position(), 0.0);
        assert_eq!(state.advance(0.25, at(t0, 2000)), 0.25);
        assert_eq!(state.position(), 0.25);
    }

    #[test]
    fn empty_track_ignores_advance_and_nudge() {
        let t0 = Instant::now();
        let mut state = CarouselState::new(0, 1.0);
        assert_eq!(state.advance(3.0, t0), 0.0);
        assert!(!state.nudge(1, t0));
        assert_eq!(state.position(), 0.0);
        assert!(state.pause_until().is_none());
    }

    #[test]
    fn nudge_snaps_then_steps_and_wraps() {
        let t0 = Instant::now();
        let mut state = CarouselState::new(6, 1.0);
        state.set_position(5.7);
        assert!(state.nudge(1, t0));
        assert_eq!(state.position(), 1.0);
        state.nudge(-1, t0);
        state.nudge(-1, t0);
        assert_eq!(state.position(), 5.0);
        assert!(state.is_paused(at(t0, 1999)));
        assert!(!state.is_paused(at(t0, 2000)));
    }

    #[test]
    fn nudge_clears_lock_and_hover() {
        let t0 = Instant::now();
        let mut state = CarouselState::new(6, 1.0);
        state.set_hover(3, t0);
        state.toggle_lock(4, t0);
        state.nudge(1, t0);
        assert_eq!(state.locked(), None);
        assert_eq!(state.hovered(), None);
        assert_eq!(state.focus_index(), None);
    }

    #[test]
    fn hover_is_ignored_while_locked() {
        let t0 = Instant::now();
        let mut state = CarouselState::new(6, 1.0);
        state.toggle_lock(1, t0);
        assert!(!state.set_hover(2, t0));
        assert!(!state.clear_hover());
        assert_eq!(state.focus_index(), Some(1));
    }

    #[test]
    fn lock_takes_priority_over_existing_hover() {
        let t0 = Instant::now();
        let mut state = CarouselState::new(6, 1.0);
        state.set_hover(2, t0);
        state.toggle_lock(5, t0);
        assert_eq!(state.hovered(), Some(2));
        assert_eq!(state.focus_index(), Some(5));
        state.clear_lock();
        assert_eq!(state.focus_index(), Some(2));
    }

    #[test]
    fn toggle_same_index_unlocks_and_other_index_moves_lock() {
        let t0 = Instant::now();
        let mut state = CarouselState::new(6, 1.0);
        state.toggle_lock(3, t0);
        state.toggle_lock(1, t0);
        assert_eq!(state.locked(), Some(1));
        state.toggle_lock(1, t0);
        assert_eq!(state.locked(), None);
        assert_eq!(state.focus_index(), None);
    }

    #[test]
    fn clear_lock_reports_whether_anything_changed() {
        let t0 = Instant::now();
        let mut state = CarouselState::new(3, 1.0);
        assert!(!state.clear_lock());
        state.toggle_lock(0, t0);
        assert!(state.clear_lock());
    }

    #[test]
    fn out_of_range_indices_are_rejected() {
        let t0 = Instant::now();
        let mut state = CarouselState::new(3, 1.0);
        assert!(!state.set_hover(3, t0));
        assert!(!state.toggle_lock(9, t0));
        assert!(state.pause_until().is_none());
    }

    #[test]
    fn refresh_resets_out_of_range_position_and_focus() {
        let t0 = Instant::now();
        let mut state = CarouselState::new(8, 1.0);
        state.set_position(6.5);
        state.toggle_lock(7, t0);
        state.refresh(4);
        assert_eq!(state.position(), 0.0);
        assert_eq!(state.locked(), None);

        state.set_position(2.5);
        state.set_hover(1, t0);
        state.refresh(3);
        assert_eq!(state.position(), 2.5);
        assert_eq!(state.hovered(), Some(1));
    }
}
