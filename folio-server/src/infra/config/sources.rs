use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::upstream::Endpoint;

/// Raw configuration as defined in a TOML file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub server: FileServerConfig,
    #[serde(default)]
    pub portfolio: FilePortfolioConfig,
    #[serde(default)]
    pub upstream: FileUpstreamConfig,
    #[serde(default)]
    pub cors: FileCorsConfig,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FileServerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub static_dir: Option<PathBuf>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FilePortfolioConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixtures_path: Option<PathBuf>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FileUpstreamConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub games_endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnails_endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups_endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_icons_endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_avatar_endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_ttl_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl FileUpstreamConfig {
    pub fn endpoint(&self, endpoint: Endpoint) -> Option<&String> {
        match endpoint {
            Endpoint::Games => self.games_endpoint.as_ref(),
            Endpoint::Thumbnails => self.thumbnails_endpoint.as_ref(),
            Endpoint::Groups => self.groups_endpoint.as_ref(),
            Endpoint::GroupIcons => self.group_icons_endpoint.as_ref(),
            Endpoint::UserAvatar => self.user_avatar_endpoint.as_ref(),
        }
    }
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FileCorsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_origins: Option<Vec<String>>,
}

/// Environment-derived configuration values.
///
/// Numeric settings are kept as raw strings so the loader can reject
/// malformed values instead of silently using a default.
#[derive(Default, Clone)]
pub struct EnvConfig {
    pub config_path: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<String>,
    pub static_dir: Option<PathBuf>,
    pub fixtures_path: Option<PathBuf>,
    pub api_key: Option<String>,
    pub games_endpoint: Option<String>,
    pub thumbnails_endpoint: Option<String>,
    pub groups_endpoint: Option<String>,
    pub group_icons_endpoint: Option<String>,
    pub user_avatar_endpoint: Option<String>,
    pub cache_ttl_ms: Option<String>,
    pub timeout_ms: Option<String>,
    pub cors_allowed_origins: Option<Vec<String>>,
}

impl std::fmt::Debug for EnvConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvConfig")
            .field("config_path", &self.config_path)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("cache_ttl_ms", &self.cache_ttl_ms)
            .field("timeout_ms", &self.timeout_ms)
            .finish_non_exhaustive()
    }
}

impl EnvConfig {
    pub fn gather() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        };

        let mut env_config = Self::default();

        env_config.config_path = var("FOLIO_CONFIG").map(PathBuf::from);
        env_config.host = var("HOST");
        env_config.port = var("PORT");
        env_config.static_dir = var("FOLIO_STATIC_DIR").map(PathBuf::from);
        env_config.fixtures_path = var("FOLIO_FIXTURES_PATH").map(PathBuf::from);

        env_config.api_key = var("ROBLOX_API_KEY");
        env_config.games_endpoint = var(Endpoint::Games.env_var());
        env_config.thumbnails_endpoint = var(Endpoint::Thumbnails.env_var());
        env_config.groups_endpoint = var(Endpoint::Groups.env_var());
        env_config.group_icons_endpoint = var(Endpoint::GroupIcons.env_var());
        env_config.user_avatar_endpoint = var(Endpoint::UserAvatar.env_var());
        env_config.cache_ttl_ms = var("ROBLOX_CACHE_TTL_MS");
        env_config.timeout_ms = var("ROBLOX_TIMEOUT_MS");

        env_config.cors_allowed_origins =
            var("CORS_ALLOWED_ORIGINS").map(|raw| parse_csv(&raw));

        env_config
    }

    pub fn endpoint(&self, endpoint: Endpoint) -> Option<&String> {
        match endpoint {
            Endpoint::Games => self.games_endpoint.as_ref(),
            Endpoint::Thumbnails => self.thumbnails_endpoint.as_ref(),
            Endpoint::Groups => self.groups_endpoint.as_ref(),
            Endpoint::GroupIcons => self.group_icons_endpoint.as_ref(),
            Endpoint::UserAvatar => self.user_avatar_endpoint.as_ref(),
        }
    }
}

fn parse_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .filter_map(|part| {
            let trimmed = part.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
        .collect()
}
