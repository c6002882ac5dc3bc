use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use thiserror::Error;

use super::{
    models::{
        Config, ConfigMetadata, CorsConfig, DEFAULT_CACHE_TTL_MS,
        DEFAULT_HOST, DEFAULT_PORT, DEFAULT_STATIC_DIR, DEFAULT_TIMEOUT_MS,
        EndpointTemplates, PortfolioConfig, ServerConfig, UpstreamConfig,
    },
    sources::{EnvConfig, FileConfig},
    validation::{self, ConfigWarnings},
};
use crate::upstream::Endpoint;

const DEFAULT_CONFIG_LOCATIONS: [&str; 2] = ["folio.toml", "config/folio.toml"];

#[derive(Debug, Default, Clone)]
pub struct ConfigLoaderOptions {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
}

#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
    env: Option<EnvConfig>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConfigLoaderOptions) -> Self {
        Self { options, env: None }
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.env_file = Some(path.into());
        self
    }

    /// Use `env` instead of the process environment. No `.env` file is
    /// read in this mode.
    pub fn with_env(mut self, env: EnvConfig) -> Self {
        self.env = Some(env);
        self
    }

    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let (env_config, env_file_loaded) = match &self.env {
            Some(env) => (env.clone(), false),
            None => {
                let loaded = self.load_env_file()?;
                (EnvConfig::gather(), loaded)
            }
        };

        let (file_config, config_path) = self.load_file_config(&env_config)?;

        let (config, warnings) = self.compose_config(
            file_config,
            env_config,
            config_path,
            env_file_loaded,
        )?;

        Ok(ConfigLoad { config, warnings })
    }

    fn load_env_file(&self) -> Result<bool, ConfigLoadError> {
        let result = match &self.options.env_file {
            Some(path) => dotenvy::from_path(path),
            None => dotenvy::dotenv().map(|_| ()),
        };
        match result {
            Ok(()) => Ok(true),
            Err(dotenvy::Error::Io(_)) => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    fn load_file_config(
        &self,
        env_config: &EnvConfig,
    ) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigLoadError> {
        let explicit = self
            .options
            .config_path
            .clone()
            .or_else(|| env_config.config_path.clone());

        let path = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigLoadError::MissingConfig { path });
                }
                path
            }
            None => match DEFAULT_CONFIG_LOCATIONS
                .iter()
                .map(PathBuf::from)
                .find(|candidate| candidate.exists())
            {
                Some(path) => path,
                None => return Ok((None, None)),
            },
        };

        let contents =
            fs::read_to_string(&path).map_err(|err| ConfigLoadError::Io {
                path: path.clone(),
                source: err,
            })?;
        let file_config: FileConfig =
            toml::from_str(&contents).map_err(|err| ConfigLoadError::Parse {
                path: path.clone(),
                source: err,
            })?;

        Ok((Some(file_config), Some(path)))
    }

    fn compose_config(
        &self,
        file_config: Option<FileConfig>,
        env: EnvConfig,
        config_path: Option<PathBuf>,
        env_file_loaded: bool,
    ) -> Result<(Config, ConfigWarnings), ConfigLoadError> {
        let mut warnings = ConfigWarnings::default();

        if file_config.is_none() {
            warnings.push_with_hint(
                "No folio.toml detected; using environment variables and defaults",
                "Create folio.toml or pass --config to pin settings in a file",
            );
        }

        let FileConfig {
            server: file_server,
            portfolio: file_portfolio,
            upstream: file_upstream,
            cors: file_cors,
        } = file_config.unwrap_or_default();

        let port = match env.port.as_deref() {
            Some(raw) => Some(parse_value::<u16>("PORT", raw)?),
            None => None,
        };
        let server = ServerConfig {
            host: env
                .host
                .clone()
                .or(file_server.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: port.or(file_server.port).unwrap_or(DEFAULT_PORT),
            static_dir: env
                .static_dir
                .clone()
                .or(file_server.static_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
        };

        let portfolio = PortfolioConfig {
            fixtures_path: env
                .fixtures_path
                .clone()
                .or(file_portfolio.fixtures_path),
        };

        let mut endpoints = EndpointTemplates::default();
        for endpoint in Endpoint::ALL {
            if let Some(template) = env
                .endpoint(endpoint)
                .or(file_upstream.endpoint(endpoint))
            {
                *endpoints.template_mut(endpoint) = template.clone();
            }
        }

        let cache_ttl_ms = match env.cache_ttl_ms.as_deref() {
            Some(raw) => Some(parse_value::<u64>("ROBLOX_CACHE_TTL_MS", raw)?),
            None => None,
        };
        let timeout_ms = match env.timeout_ms.as_deref() {
            Some(raw) => Some(parse_value::<u64>("ROBLOX_TIMEOUT_MS", raw)?),
            None => None,
        };

        let upstream = UpstreamConfig {
            api_key: env
                .api_key
                .clone()
                .or(file_upstream.api_key)
                .filter(|key| !key.trim().is_empty()),
            endpoints,
            cache_ttl: Duration::from_millis(
                cache_ttl_ms
                    .or(file_upstream.cache_ttl_ms)
                    .unwrap_or(DEFAULT_CACHE_TTL_MS),
            ),
            timeout: Duration::from_millis(
                timeout_ms
                    .or(file_upstream.timeout_ms)
                    .unwrap_or(DEFAULT_TIMEOUT_MS),
            ),
        };

        let cors = CorsConfig {
            allowed_origins: env
                .cors_allowed_origins
                .clone()
                .or(file_cors.allowed_origins)
                .unwrap_or_default(),
        };

        let metadata = ConfigMetadata {
            config_path,
            env_file_loaded,
        };

        let config = Config {
            server,
            portfolio,
            upstream,
            cors,
            metadata,
        };

        let guard_warnings = validation::apply_guard_rails(&config)?;
        warnings.extend(guard_warnings);

        Ok((config, warnings))
    }
}

fn parse_value<T: std::str::FromStr>(
    name: &'static str,
    raw: &str,
) -> Result<T, ConfigLoadError> {
    raw.parse().map_err(|_| ConfigLoadError::InvalidValue {
        name,
        value: raw.to_string(),
    })
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("configuration file missing: {path}")]
    MissingConfig { path: PathBuf },
    #[error("failed to read configuration {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid value '{value}' for {name}")]
    InvalidValue { name: &'static str, value: String },
    #[error("{name} template '{template}' has no {{ids}} placeholder")]
    InvalidEndpoint { name: &'static str, template: String },
    #[error("failed to read fixtures {path}")]
    FixturesIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse fixtures {}", display_fixture_source(.path))]
    FixturesParse {
        path: Option<PathBuf>,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    EnvFile(#[from] dotenvy::Error),
}

fn display_fixture_source(path: &Option<PathBuf>) -> String {
    path.as_deref()
        .map(Path::display)
        .map(|path| path.to_string())
        .unwrap_or_else(|| "(embedded)".to_string())
}

#[derive(Debug)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: ConfigWarnings,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> EnvConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EnvConfig::from_lookup(|name| vars.get(name).cloned())
    }

    fn write_toml(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("folio.toml");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn defaults_apply_without_file_or_env() {
        let ConfigLoad { config, warnings } =
            ConfigLoader::new().with_env(env(&[])).load().unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8787);
        assert_eq!(config.upstream.cache_ttl, Duration::from_millis(900_000));
        assert_eq!(config.upstream.timeout, Duration::from_millis(10_000));
        assert_eq!(config.upstream.api_key, None);
        assert_eq!(config.upstream.endpoints, EndpointTemplates::default());
        assert!(config.cors.allowed_origins.is_empty());
        assert!(!warnings.is_empty());
    }

    #[test]
    fn env_overrides_file_and_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_toml(
            dir.path(),
            r#"
            [server]
            host = "127.0.0.1"
            port = 9000

            [upstream]
            cache_ttl_ms = 1000
            api_key = "from-file"
            groups_endpoint = "http://file/groups?ids={ids}"
            "#,
        );
        let ConfigLoad { config, .. } = ConfigLoader::new()
            .with_config_path(&path)
            .with_env(env(&[
                ("PORT", "9100"),
                ("ROBLOX_API_KEY", "from-env"),
                ("ROBLOX_GAMES_ENDPOINT", "http://env/games?ids={ids}"),
            ]))
            .load()
            .unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.upstream.cache_ttl, Duration::from_millis(1000));
        assert_eq!(config.upstream.api_key.as_deref(), Some("from-env"));
        assert_eq!(config.upstream.endpoints.games, "http://env/games?ids={ids}");
        assert_eq!(config.upstream.endpoints.groups, "http://file/groups?ids={ids}");
        assert_eq!(config.metadata.config_path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let err = ConfigLoader::new()
            .with_config_path("/no/such/folio.toml")
            .with_env(env(&[]))
            .load()
            .unwrap_err();
        assert!(matches!(err, ConfigLoadError::MissingConfig { .. }));

        let err = ConfigLoader::new()
            .with_env(env(&[("FOLIO_CONFIG", "/no/such/other.toml")]))
            .load()
            .unwrap_err();
        assert!(matches!(err, ConfigLoadError::MissingConfig { .. }));
    }

    #[test]
    fn malformed_numbers_are_rejected() {
        for (name, value) in [
            ("PORT", "eighty"),
            ("ROBLOX_CACHE_TTL_MS", "-5"),
            ("ROBLOX_TIMEOUT_MS", "10s"),
        ] {
            let err = ConfigLoader::new()
                .with_env(env(&[(name, value)]))
                .load()
                .unwrap_err();
            assert!(
                matches!(err, ConfigLoadError::InvalidValue { name: n, .. } if n == name),
                "{name}={value} should be rejected"
            );
        }
    }

    #[test]
    fn endpoint_override_without_placeholder_is_rejected() {
        let err = ConfigLoader::new()
            .with_env(env(&[("ROBLOX_USER_AVATAR_ENDPOINT", "http://avatar")]))
            .load()
            .unwrap_err();
        assert!(matches!(err, ConfigLoadError::InvalidEndpoint { .. }));
    }

    #[test]
    fn invalid_toml_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_toml(dir.path(), "[server\nport = ");
        let err = ConfigLoader::new()
            .with_config_path(&path)
            .with_env(env(&[]))
            .load()
            .unwrap_err();
        match err {
            ConfigLoadError::Parse { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn cors_origins_come_from_env_csv() {
        let ConfigLoad { config, .. } = ConfigLoader::new()
            .with_env(env(&[("CORS_ALLOWED_ORIGINS", "https://a.test,https://b.test")]))
            .load()
            .unwrap();
        assert_eq!(config.cors.allowed_origins.len(), 2);
    }
}
