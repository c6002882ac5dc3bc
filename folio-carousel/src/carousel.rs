//! Carousel: one instance bound to one surface
//!
//! Owns the interaction state, the frame clock and the timers for a single
//! root, and turns [`CarouselEvent`]s and frame callbacks into renders.
//!
//! Autoplay runs only while the page is visible, the root intersects the
//! viewport and the pointer is outside the root. Every activity signal
//! re-evaluates that rule, and `start`/`stop` are idempotent, so repeated
//! or out-of-order signals are harmless.

use std::time::Instant;

use tracing::{debug, trace};

use crate::geometry::layout;
use crate::messages::{CarouselEvent, Key};
use crate::scheduler::{Debounce, FrameClock};
use crate::state::CarouselState;
use crate::surface::{CarouselSurface, RootClass};
use crate::types::{CarouselOptions, MOVING_INDICATOR};

#[derive(Debug, Clone, Copy)]
struct Activity {
    visible: bool,
    intersecting: bool,
    pointer_inside: bool,
}

impl Activity {
    fn should_run(&self) -> bool {
        self.visible && self.intersecting && !self.pointer_inside
    }
}

impl Default for Activity {
    fn default() -> Self {
        // Not intersecting until the host reports it.
        Self {
            visible: true,
            intersecting: false,
            pointer_inside: false,
        }
    }
}

#[derive(Debug)]
pub struct Carousel<S> {
    surface: S,
    options: CarouselOptions,
    state: CarouselState,
    clock: FrameClock,
    moving: Debounce,
    /// Latest pointer position not yet resolved to a hover target.
    pending_hover: Option<(f64, f64)>,
    activity: Activity,
}

impl<S: CarouselSurface> Carousel<S> {
    /// Scan `surface`, announce indices and either mark it static or
    /// render the initial layout.
    pub fn new(mut surface: S, options: CarouselOptions, now: Instant) -> Self {
        let count = surface.scan_cards();
        let mut carousel = Self {
            surface,
            options,
            state: CarouselState::new(count, options.speed),
            clock: FrameClock::new(),
            moving: Debounce::new(),
            pending_hover: None,
            activity: Activity::default(),
        };
        carousel.announce(count);

        if options.is_static {
            carousel.surface.set_root_class(RootClass::Static, true);
        } else {
            carousel.update(0.0, now);
        }
        debug!(cards = count, is_static = options.is_static, "carousel attached");
        carousel
    }

    pub fn state(&self) -> &CarouselState {
        &self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn options(&self) -> &CarouselOptions {
        &self.options
    }

    pub fn is_static(&self) -> bool {
        self.options.is_static
    }

    /// Whether the autoplay loop is scheduled.
    pub fn is_active(&self) -> bool {
        self.clock.is_active()
    }

    pub fn handle(&mut self, event: CarouselEvent, now: Instant) {
        if self.options.is_static {
            if event == CarouselEvent::Refresh {
                let count = self.surface.scan_cards();
                self.state.refresh(count);
                self.announce(count);
            }
            return;
        }

        match event {
            CarouselEvent::PointerEnter { x, y } => {
                self.activity.pointer_inside = true;
                self.hover_at(x, y, now);
                self.sync_activity();
            }
            CarouselEvent::PointerMove { x, y } => {
                self.pending_hover = Some((x, y));
            }
            CarouselEvent::PointerLeave => {
                self.activity.pointer_inside = false;
                self.pending_hover = None;
                self.clear_hover(now);
                self.sync_activity();
            }
            CarouselEvent::Click(hit) => {
                if hit.kind.is_interactive() {
                    return;
                }
                if let Some(index) = hit.card {
                    self.toggle_lock(index, now);
                }
            }
            CarouselEvent::DocumentClick { inside } => {
                if !inside {
                    self.clear_lock(now);
                }
            }
            CarouselEvent::Key(Key::Escape) => self.clear_lock(now),
            CarouselEvent::Key(Key::ArrowLeft) | CarouselEvent::Prev => {
                self.nudge(-1, now)
            }
            CarouselEvent::Key(Key::ArrowRight) | CarouselEvent::Next => {
                self.nudge(1, now)
            }
            CarouselEvent::Key(Key::Other) => {}
            CarouselEvent::Refresh => self.refresh(now),
            CarouselEvent::Visibility { hidden } => {
                self.activity.visible = !hidden;
                self.sync_activity();
            }
            CarouselEvent::Intersection { intersecting } => {
                self.activity.intersecting = intersecting;
                self.sync_activity();
            }
        }
    }

    /// Animation-frame callback. Resolves coalesced pointer movement,
    /// fires due timers and advances autoplay when active.
    pub fn frame(&mut self, now: Instant) {
        if let Some((x, y)) = self.pending_hover.take() {
            self.hover_at(x, y, now);
        }
        if self.moving.poll(now) {
            self.surface.set_root_class(RootClass::Moving, false);
        }
        if let Some(delta) = self.clock.tick(now) {
            self.update(delta, now);
        }
    }

    pub fn start(&mut self) {
        if self.options.is_static {
            return;
        }
        if self.clock.start() {
            debug!("carousel autoplay started");
        }
    }

    pub fn stop(&mut self) {
        if self.clock.stop() {
            debug!("carousel autoplay stopped");
        }
        self.surface.set_root_class(RootClass::Moving, false);
        self.moving.cancel();
    }

    pub fn nudge(&mut self, direction: i32, now: Instant) {
        if self.state.nudge(direction, now) {
            self.update(0.0, now);
        }
    }

    pub fn set_hover(&mut self, index: usize, now: Instant) {
        if self.state.set_hover(index, now) {
            self.update(0.0, now);
        }
    }

    pub fn clear_hover(&mut self, now: Instant) {
        if self.state.clear_hover() {
            self.update(0.0, now);
        }
    }

    pub fn toggle_lock(&mut self, index: usize, now: Instant) {
        if self.state.toggle_lock(index, now) {
            self.update(0.0, now);
        }
    }

    pub fn clear_lock(&mut self, now: Instant) {
        if self.state.clear_lock() {
            self.update(0.0, now);
        }
    }

    /// Re-scan the surface after its content was replaced.
    pub fn refresh(&mut self, now: Instant) {
        let count = self.surface.scan_cards();
        self.state.refresh(count);
        self.announce(count);
        self.update(0.0, now);
    }

    /// Advance by `delta` seconds (frozen inside a pause window) and
    /// re-render every card.
    pub fn update(&mut self, delta: f64, now: Instant) {
        let applied = self.state.advance(delta, now);
        if applied > 0.0 {
            self.surface.set_root_class(RootClass::Moving, true);
            self.moving.schedule(now, MOVING_INDICATOR);
        }

        let count = self.state.card_count();
        if count == 0 {
            return;
        }
        let styles = layout(
            self.state.position(),
            count,
            self.state.focus_index(),
            &self.options.geometry,
        );
        for (index, style) in styles.iter().enumerate() {
            self.surface.apply_style(index, style);
        }
        trace!(position = self.state.position(), "carousel rendered");
    }

    fn hover_at(&mut self, x: f64, y: f64, now: Instant) {
        if let Some(index) = self.surface.hit_test(x, y).and_then(|hit| hit.card) {
            self.set_hover(index, now);
        }
    }

    fn announce(&mut self, count: usize) {
        self.surface.announce_count(count);
        for index in 0..count {
            self.surface.announce_index(index);
        }
    }

    fn sync_activity(&mut self) {
        if self.activity.should_run() {
            self.start();
        } else {
            self.stop();
        }
    }
}
