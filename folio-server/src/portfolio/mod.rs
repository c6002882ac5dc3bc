//! Portfolio aggregation: local fixtures enriched with upstream metadata.

pub mod fixtures;
pub mod merge;
pub mod service;

pub use fixtures::{embedded_fixtures, load_fixtures};
pub use merge::{UpstreamSnapshot, merge};
pub use service::PortfolioService;
