//! 3D card carousel engine.
//!
//! The engine keeps a continuous `position` over an ordered set of cards,
//! turns it into per-card transforms every frame, and arbitrates pointer,
//! keyboard and button input into position, hover and lock changes. It
//! never touches a document directly: hosts implement [`CarouselSurface`]
//! to receive styles and class toggles and to answer hit tests, and feed
//! [`CarouselEvent`]s plus frame callbacks into a [`Carousel`].
//!
//! Everything is single-threaded and driven by explicit timestamps, so a
//! host's event loop (or a test) decides when time passes.
#![allow(missing_docs)]

pub mod carousel;
pub mod error;
pub mod geometry;
pub mod messages;
pub mod motion;
pub mod registry;
pub mod scheduler;
pub mod state;
pub mod surface;
pub mod types;

pub use carousel::Carousel;
pub use error::CarouselError;
pub use geometry::{CardStyle, layout, wrap_offset};
pub use messages::{CarouselEvent, Key};
pub use motion::MotionEnvironment;
pub use registry::{CarouselRegistry, CarouselRoot};
pub use scheduler::{Debounce, FrameClock};
pub use state::CarouselState;
pub use surface::{CarouselSurface, Hit, MemorySurface, RootClass, TargetKind};
pub use types::{CarouselOptions, Geometry};
