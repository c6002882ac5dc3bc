//! Shared types and tuning constants for the carousel engine

use std::time::Duration;

/// Autoplay is suppressed for this long after a hover, lock or nudge.
pub const PAUSE_WINDOW: Duration = Duration::from_millis(2000);

/// How long the root keeps its "moving" class after the last advancement.
pub const MOVING_INDICATOR: Duration = Duration::from_millis(700);

/// Cards further than this many slots from the position are drawn as if
/// they were exactly this far away.
pub const MAX_VISUAL_OFFSET: f64 = 3.0;

pub const DEFAULT_ANGLE_STEP: f64 = 18.0;
pub const DEFAULT_DISTANCE: f64 = 320.0;
pub const DEFAULT_DEPTH_STEP: f64 = 200.0;
/// Slots advanced per second of autoplay.
pub const DEFAULT_SPEED: f64 = 0.01;

/// Per-slot spacing of the circular track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    /// Y rotation per slot, in degrees.
    pub angle_step: f64,
    /// Horizontal translation per slot, in pixels.
    pub distance: f64,
    /// Depth recession per slot, in pixels.
    pub depth_step: f64,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            angle_step: DEFAULT_ANGLE_STEP,
            distance: DEFAULT_DISTANCE,
            depth_step: DEFAULT_DEPTH_STEP,
        }
    }
}

/// Static configuration for one carousel instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselOptions {
    pub geometry: Geometry,
    /// Slots per second. Negative values run the track backwards.
    pub speed: f64,
    /// Static instances never animate; the host lays cards out with CSS.
    pub is_static: bool,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self {
            geometry: Geometry::default(),
            speed: DEFAULT_SPEED,
            is_static: false,
        }
    }
}

impl CarouselOptions {
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }
}
