//! # Folio Server
//!
//! Serves the portfolio site and a single aggregation endpoint,
//! `GET /api/portfolio`, that merges local fixtures with public metadata
//! from the game platform's REST API.
//!
//! - [`upstream`]: endpoint templates, the JSON fetcher seam, the TTL cache
//!   and the cached endpoint client.
//! - [`portfolio`]: fixture loading, the five-way fan-out and the merge.
//! - [`infra`]: configuration, application state, HTTP errors, shutdown.
//! - [`routes`]: the axum router, static assets and middleware.

pub mod handlers;
pub mod infra;
pub mod portfolio;
pub mod routes;
pub mod upstream;

pub use routes::create_app;
