//! Registry for managing every carousel on a page, keyed by a host key

use std::collections::HashMap;
use std::hash::Hash;
use std::time::Instant;

use tracing::debug;

use crate::carousel::Carousel;
use crate::error::CarouselError;
use crate::messages::{CarouselEvent, Key};
use crate::motion::MotionEnvironment;
use crate::surface::CarouselSurface;
use crate::types::CarouselOptions;

/// A root element discovered by the host. `track` is `None` when the root
/// has no card track underneath it.
#[derive(Debug)]
pub struct CarouselRoot<K, S> {
    pub key: K,
    pub track: Option<S>,
    pub speed_attribute: Option<String>,
}

impl<K, S> CarouselRoot<K, S> {
    pub fn new(key: K, track: Option<S>) -> Self {
        Self {
            key,
            track,
            speed_attribute: None,
        }
    }

    pub fn with_speed_attribute(mut self, speed: impl Into<String>) -> Self {
        self.speed_attribute = Some(speed.into());
        self
    }
}

#[derive(Debug)]
pub struct CarouselRegistry<K, S> {
    carousels: HashMap<K, Carousel<S>>,
}

impl<K, S> Default for CarouselRegistry<K, S> {
    fn default() -> Self {
        Self {
            carousels: HashMap::new(),
        }
    }
}

impl<K, S> CarouselRegistry<K, S>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
    S: CarouselSurface,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach one carousel per root. Roots without a track are skipped;
    /// returns how many were attached.
    pub fn init_roots<I>(
        &mut self,
        roots: I,
        environment: &MotionEnvironment,
        now: Instant,
    ) -> usize
    where
        I: IntoIterator<Item = CarouselRoot<K, S>>,
    {
        let mut attached = 0;
        for root in roots {
            match Self::attach(root, environment, now) {
                Ok((key, carousel)) => {
                    self.carousels.insert(key, carousel);
                    attached += 1;
                }
                Err((key, err)) => debug!(?key, %err, "skipping carousel root"),
            }
        }
        attached
    }

    fn attach(
        root: CarouselRoot<K, S>,
        environment: &MotionEnvironment,
        now: Instant,
    ) -> Result<(K, Carousel<S>), (K, CarouselError)> {
        let CarouselRoot {
            key,
            track,
            speed_attribute,
        } = root;
        let Some(surface) = track else {
            return Err((key, CarouselError::MissingTrack));
        };
        let options =
            CarouselOptions::for_root(speed_attribute.as_deref(), environment);
        Ok((key, Carousel::new(surface, options, now)))
    }

    pub fn insert(&mut self, key: K, carousel: Carousel<S>) -> Option<Carousel<S>> {
        self.carousels.insert(key, carousel)
    }

    pub fn get(&self, key: &K) -> Option<&Carousel<S>> {
        self.carousels.get(key)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut Carousel<S>> {
        self.carousels.get_mut(key)
    }

    pub fn remove(&mut self, key: &K) -> Option<Carousel<S>> {
        self.carousels.remove(key)
    }

    pub fn len(&self) -> usize {
        self.carousels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.carousels.is_empty()
    }

    /// Route a root-scoped event. Returns `false` for unknown keys.
    pub fn dispatch(&mut self, key: &K, event: CarouselEvent, now: Instant) -> bool {
        match self.carousels.get_mut(key) {
            Some(carousel) => {
                carousel.handle(event, now);
                true
            }
            None => false,
        }
    }

    /// Document-level click. `target` is the root the click landed in, if
    /// any; every other carousel treats it as an outside click.
    pub fn document_click(&mut self, target: Option<&K>, now: Instant) {
        for (key, carousel) in self.carousels.iter_mut() {
            let inside = target == Some(key);
            carousel.handle(CarouselEvent::DocumentClick { inside }, now);
        }
    }

    pub fn key_down(&mut self, key: Key, now: Instant) {
        for carousel in self.carousels.values_mut() {
            carousel.handle(CarouselEvent::Key(key), now);
        }
    }

    pub fn visibility(&mut self, hidden: bool, now: Instant) {
        for carousel in self.carousels.values_mut() {
            carousel.handle(CarouselEvent::Visibility { hidden }, now);
        }
    }

    pub fn frame(&mut self, now: Instant) {
        for carousel in self.carousels.values_mut() {
            carousel.frame(now);
        }
    }
}
