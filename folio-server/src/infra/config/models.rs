use std::{fmt, path::PathBuf, time::Duration};

use crate::upstream::Endpoint;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8787;
pub const DEFAULT_STATIC_DIR: &str = "./public";
pub const DEFAULT_CACHE_TTL_MS: u64 = 900_000;
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub server: ServerConfig,
    pub portfolio: PortfolioConfig,
    pub upstream: UpstreamConfig,
    pub cors: CorsConfig,
    pub metadata: ConfigMetadata,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PortfolioConfig {
    /// Replaces the embedded fixture set when present.
    pub fixtures_path: Option<PathBuf>,
}

/// URL templates for every upstream endpoint, each holding one `{ids}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointTemplates {
    pub games: String,
    pub thumbnails: String,
    pub groups: String,
    pub group_icons: String,
    pub user_avatar: String,
}

impl EndpointTemplates {
    pub fn template(&self, endpoint: Endpoint) -> &str {
        match endpoint {
            Endpoint::Games => &self.games,
            Endpoint::Thumbnails => &self.thumbnails,
            Endpoint::Groups => &self.groups,
            Endpoint::GroupIcons => &self.group_icons,
            Endpoint::UserAvatar => &self.user_avatar,
        }
    }

    pub fn template_mut(&mut self, endpoint: Endpoint) -> &mut String {
        match endpoint {
            Endpoint::Games => &mut self.games,
            Endpoint::Thumbnails => &mut self.thumbnails,
            Endpoint::Groups => &mut self.groups,
            Endpoint::GroupIcons => &mut self.group_icons,
            Endpoint::UserAvatar => &mut self.user_avatar,
        }
    }
}

impl Default for EndpointTemplates {
    fn default() -> Self {
        Self {
            games: Endpoint::Games.default_template().to_string(),
            thumbnails: Endpoint::Thumbnails.default_template().to_string(),
            groups: Endpoint::Groups.default_template().to_string(),
            group_icons: Endpoint::GroupIcons.default_template().to_string(),
            user_avatar: Endpoint::UserAvatar.default_template().to_string(),
        }
    }
}

#[derive(Clone)]
pub struct UpstreamConfig {
    pub api_key: Option<String>,
    pub endpoints: EndpointTemplates,
    pub cache_ttl: Duration,
    pub timeout: Duration,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoints: EndpointTemplates::default(),
            cache_ttl: Duration::from_millis(DEFAULT_CACHE_TTL_MS),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

impl fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("endpoints", &self.endpoints)
            .field("cache_ttl", &self.cache_ttl)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Clone, Default)]
pub struct CorsConfig {
    /// Empty means no CORS layer.
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigMetadata {
    pub config_path: Option<PathBuf>,
    pub env_file_loaded: bool,
}
