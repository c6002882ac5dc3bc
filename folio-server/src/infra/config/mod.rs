//! Layered configuration: `.env`, then an optional TOML file, then the
//! process environment. CLI overrides are applied by the binary.

pub mod loader;
pub mod models;
pub mod sources;
pub mod validation;

pub use loader::{ConfigLoad, ConfigLoadError, ConfigLoader, ConfigLoaderOptions};
pub use models::{
    Config, ConfigMetadata, CorsConfig, EndpointTemplates, PortfolioConfig,
    ServerConfig, UpstreamConfig,
};
pub use sources::{EnvConfig, FileConfig};
pub use validation::{ConfigWarning, ConfigWarnings};
