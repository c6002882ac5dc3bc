//! Data model definitions shared across folio crates.
//!
//! Three families of types live here:
//!
//! - [`fixtures`]: the local, hand-maintained portfolio list the proxy
//!   starts from.
//! - [`upstream`]: leniently decoded envelopes returned by the remote
//!   platform's public endpoints.
//! - [`portfolio`]: the aggregated document served at `/api/portfolio`.
#![allow(missing_docs)]

pub mod fixtures;
pub mod portfolio;
pub mod upstream;

pub use fixtures::{
    CommunityFixture, GameFixture, ItemDetails, ItemLinks, PortfolioFixtures,
    ProfileFixture,
};
pub use portfolio::{
    CommunityStats, EnrichedCommunity, EnrichedGame, EnrichedProfile,
    GameStats, PortfolioDocument,
};
pub use upstream::{Envelope, GameRecord, GroupRecord, ThumbnailRecord};
