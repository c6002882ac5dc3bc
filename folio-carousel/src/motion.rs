//! Motion preferences and per-root option parsing

use tracing::warn;

use crate::error::CarouselError;
use crate::types::{CarouselOptions, DEFAULT_SPEED};

/// Platform signals that disable animation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MotionEnvironment {
    pub prefers_reduced_motion: bool,
    pub coarse_pointer: bool,
    pub narrow_viewport: bool,
}

impl MotionEnvironment {
    /// Any reduced-motion, touch or narrow-screen signal forces the static
    /// layout.
    pub fn prefers_static(&self) -> bool {
        self.prefers_reduced_motion || self.coarse_pointer || self.narrow_viewport
    }
}

/// Parse the root's speed attribute. A missing attribute means the default.
pub fn parse_speed(attribute: Option<&str>) -> Result<f64, CarouselError> {
    let Some(raw) = attribute else {
        return Ok(DEFAULT_SPEED);
    };
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|speed| speed.is_finite())
        .ok_or_else(|| CarouselError::InvalidSpeed {
            value: raw.to_string(),
        })
}

impl CarouselOptions {
    /// Options for a root carrying `speed_attribute`, in `environment`.
    /// Unparsable speeds fall back to the default.
    pub fn for_root(
        speed_attribute: Option<&str>,
        environment: &MotionEnvironment,
    ) -> Self {
        let speed = parse_speed(speed_attribute).unwrap_or_else(|err| {
            warn!(%err, "falling back to default carousel speed");
            DEFAULT_SPEED
        });
        Self::default()
            .with_speed(speed)
            .with_static(environment.prefers_static())
    }
}
