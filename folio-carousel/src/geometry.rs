//! Position → per-card transform computation

use crate::types::{Geometry, MAX_VISUAL_OFFSET};

/// Visual state for a single card, ready to be applied by a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardStyle {
    pub x: f64,
    pub z: f64,
    pub angle: f64,
    pub scale: f64,
    pub opacity: f64,
    pub z_index: i32,
    pub focus: bool,
    pub dim: bool,
}

impl CardStyle {
    /// `translateX(..px) translateZ(..px) rotateY(..deg) scale(..)`
    pub fn css_transform(&self) -> String {
        format!(
            "translateX({}px) translateZ({}px) rotateY({}deg) scale({})",
            unsigned_zero(self.x),
            unsigned_zero(self.z),
            unsigned_zero(self.angle),
            unsigned_zero(self.scale),
        )
    }

    pub fn css_opacity(&self) -> String {
        format!("{:.3}", self.opacity)
    }
}

// Avoids "-0px" in generated CSS.
fn unsigned_zero(value: f64) -> f64 {
    if value == 0.0 { 0.0 } else { value }
}

/// Shortest signed distance from `value` to zero around a circular track
/// of `total` slots, in `(-total/2, total/2]`. Returns 0 for an empty track.
pub fn wrap_offset(value: f64, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    let mut wrapped = value.rem_euclid(total);
    if wrapped > total / 2.0 {
        wrapped -= total;
    }
    wrapped
}

/// Wrap a position into `[0, total)`.
pub fn wrap_position(position: f64, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let wrapped = position.rem_euclid(total as f64);
    // rem_euclid can round up to `total` for tiny negative inputs
    if wrapped >= total as f64 { 0.0 } else { wrapped }
}

/// Style for the card at circular `offset` from the current position.
pub fn card_style(
    offset: f64,
    geometry: &Geometry,
    is_focus: bool,
    focus_active: bool,
) -> CardStyle {
    let clamped = offset.clamp(-MAX_VISUAL_OFFSET, MAX_VISUAL_OFFSET);
    let distance = clamped.abs();

    let mut style = CardStyle {
        x: clamped * geometry.distance,
        z: -distance * geometry.depth_step,
        angle: clamped * geometry.angle_step,
        scale: 1.0 - (distance * 0.12).min(0.35),
        opacity: 1.0 - (distance * 0.22).min(0.70),
        z_index: 100 - (distance * 10.0).round() as i32,
        focus: false,
        dim: focus_active && !is_focus,
    };

    if is_focus {
        style.angle = 0.0;
        style.z += 200.0;
        style.scale += 0.1;
        style.opacity = (style.opacity + 0.25).min(1.0);
        style.focus = true;
    }

    style
}

/// Styles for every card in index order. Empty when `count` is zero.
pub fn layout(
    position: f64,
    count: usize,
    focus: Option<usize>,
    geometry: &Geometry,
) -> Vec<CardStyle> {
    (0..count)
        .map(|index| {
            let offset = wrap_offset(index as f64 - position, count);
            card_style(
                offset,
                geometry,
                focus == Some(index),
                focus.is_some(),
            )
        })
        .collect()
}
