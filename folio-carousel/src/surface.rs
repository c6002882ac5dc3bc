//! Host contract: where styles go and where hit tests come from.
//!
//! A browser host maps this onto the root/track/card elements; the
//! attribute and class names below are the markup contract that stylesheet
//! and test hooks rely on.

use std::collections::{BTreeMap, HashSet};

use crate::geometry::CardStyle;

/// Marker attribute identifying card elements inside the track.
pub const CARD_MARKER: &str = "data-carousel-3d-card";
/// Attribute on the root announcing the number of cards.
pub const COUNT_ATTRIBUTE: &str = "data-carousel-count";
/// Attribute on each card announcing its stable index.
pub const INDEX_ATTRIBUTE: &str = "data-carousel-index";
/// Numeric speed attribute read from the root.
pub const SPEED_ATTRIBUTE: &str = "data-carousel-speed";
pub const FOCUS_CLASS: &str = "is-focus";
pub const DIM_CLASS: &str = "is-dim";

/// What kind of element sits under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    Link,
    Button,
    /// Any non-interactive element, including the card itself.
    Plain,
}

impl TargetKind {
    /// Links and buttons keep their own click behaviour; clicks on them
    /// never toggle a card lock.
    pub fn is_interactive(self) -> bool {
        matches!(self, Self::Link | Self::Button)
    }

    /// Classify by element tag name.
    pub fn from_tag(tag: &str) -> Self {
        if tag.eq_ignore_ascii_case("a") {
            Self::Link
        } else if tag.eq_ignore_ascii_case("button") {
            Self::Button
        } else {
            Self::Plain
        }
    }
}

/// Result of resolving a screen point or event target inside the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    /// Index of the closest enclosing card, if any.
    pub card: Option<usize>,
    /// The closest enclosing interactive element wins over `Plain`.
    pub kind: TargetKind,
}

impl Hit {
    pub fn card(index: usize) -> Self {
        Self {
            card: Some(index),
            kind: TargetKind::Plain,
        }
    }

    pub fn interactive(card: Option<usize>, kind: TargetKind) -> Self {
        Self { card, kind }
    }
}

/// Root-level classes toggled by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RootClass {
    /// Set briefly after autoplay advanced the track.
    Moving,
    /// Set once on instances that never animate.
    Static,
}

impl RootClass {
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Moving => "carousel-3d--moving",
            Self::Static => "carousel-3d--static",
        }
    }
}

pub trait CarouselSurface {
    /// Re-read the card set and return how many cards the track holds.
    fn scan_cards(&mut self) -> usize;

    /// Publish the card count on the root.
    fn announce_count(&mut self, count: usize);

    /// Publish the stable index on the card at `index`.
    fn announce_index(&mut self, index: usize);

    fn apply_style(&mut self, index: usize, style: &CardStyle);

    fn set_root_class(&mut self, class: RootClass, enabled: bool);

    /// Topmost card/interactive element under a screen point. `None` when
    /// the point is outside the root or over no card.
    fn hit_test(&self, x: f64, y: f64) -> Option<Hit>;
}

/// In-memory surface for headless hosts and tests. Cards are laid out as
/// fixed-width columns starting at `x = 0` for hit testing.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    card_count: usize,
    card_width: f64,
    announced_count: Option<usize>,
    announced_indices: Vec<usize>,
    styles: BTreeMap<usize, CardStyle>,
    classes: HashSet<RootClass>,
    interactive: BTreeMap<usize, TargetKind>,
    style_writes: usize,
}

impl MemorySurface {
    pub fn new(card_count: usize) -> Self {
        Self {
            card_count,
            card_width: 100.0,
            ..Self::default()
        }
    }

    pub fn with_card_width(mut self, width: f64) -> Self {
        self.card_width = width;
        self
    }

    /// Mark the column of `card` as covered by an interactive child.
    pub fn with_interactive(mut self, card: usize, kind: TargetKind) -> Self {
        self.interactive.insert(card, kind);
        self
    }

    /// Replace the content; takes effect on the next scan.
    pub fn replace_cards(&mut self, card_count: usize) {
        self.card_count = card_count;
        self.styles.retain(|index, _| *index < card_count);
    }

    pub fn announced_count(&self) -> Option<usize> {
        self.announced_count
    }

    pub fn announced_indices(&self) -> &[usize] {
        &self.announced_indices
    }

    pub fn style(&self, index: usize) -> Option<&CardStyle> {
        self.styles.get(&index)
    }

    pub fn has_class(&self, class: RootClass) -> bool {
        self.classes.contains(&class)
    }

    /// Total number of `apply_style` calls so far.
    pub fn style_writes(&self) -> usize {
        self.style_writes
    }
}

impl CarouselSurface for MemorySurface {
    fn scan_cards(&mut self) -> usize {
        self.announced_indices.clear();
        self.card_count
    }

    fn announce_count(&mut self, count: usize) {
        self.announced_count = Some(count);
    }

    fn announce_index(&mut self, index: usize) {
        self.announced_indices.push(index);
    }

    fn apply_style(&mut self, index: usize, style: &CardStyle) {
        self.styles.insert(index, *style);
        self.style_writes += 1;
    }

    fn set_root_class(&mut self, class: RootClass, enabled: bool) {
        if enabled {
            self.classes.insert(class);
        } else {
            self.classes.remove(&class);
        }
    }

    fn hit_test(&self, x: f64, _y: f64) -> Option<Hit> {
        if x < 0.0 || self.card_width <= 0.0 {
            return None;
        }
        let index = (x / self.card_width).floor() as usize;
        if index >= self.card_count {
            return None;
        }
        let kind = self
            .interactive
            .get(&index)
            .copied()
            .unwrap_or(TargetKind::Plain);
        Some(Hit {
            card: Some(index),
            kind,
        })
    }
}
