//! Input events fed to a carousel by its host

use crate::surface::Hit;

/// Keys the carousel reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    Other,
}

impl Key {
    /// Map a `KeyboardEvent.key` style name.
    pub fn from_key_name(name: &str) -> Self {
        match name {
            "Escape" | "Esc" => Self::Escape,
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CarouselEvent {
    // Pointer over the root
    PointerEnter { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerLeave,
    /// Click whose target resolved inside the track.
    Click(Hit),
    /// Document-level click; `inside` is whether it landed in this root.
    DocumentClick { inside: bool },
    Key(Key),

    // Controls
    Prev,
    Next,

    /// Content under the track was replaced.
    Refresh,

    // Activity signals
    Visibility { hidden: bool },
    Intersection { intersecting: bool },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_names_map_both_escape_spellings() {
        assert_eq!(Key::from_key_name("Escape"), Key::Escape);
        assert_eq!(Key::from_key_name("Esc"), Key::Escape);
        assert_eq!(Key::from_key_name("ArrowLeft"), Key::ArrowLeft);
        assert_eq!(Key::from_key_name("ArrowRight"), Key::ArrowRight);
        assert_eq!(Key::from_key_name("Enter"), Key::Other);
    }
}
