//! Client side of the proxy: platform endpoints, the JSON fetcher seam,
//! the TTL cache and the cached endpoint client built on top of them.

pub mod cache;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod fetcher;

pub use cache::TtlCache;
pub use client::RobloxClient;
pub use endpoints::Endpoint;
pub use error::UpstreamError;
pub use fetcher::{HttpFetcher, JsonFetcher};
