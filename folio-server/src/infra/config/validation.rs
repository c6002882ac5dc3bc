use super::{
    loader::ConfigLoadError,
    models::{Config, DEFAULT_CACHE_TTL_MS},
};
use crate::upstream::{Endpoint, endpoints::IDS_PLACEHOLDER};

#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(
        &mut self,
        message: S,
        hint: H,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn extend(&mut self, other: ConfigWarnings) {
        self.items.extend(other.items);
    }
}

/// Reject unusable settings and collect the suspicious ones.
pub fn apply_guard_rails(
    config: &Config,
) -> Result<ConfigWarnings, ConfigLoadError> {
    let mut warnings = ConfigWarnings::default();

    for endpoint in Endpoint::ALL {
        let template = config.upstream.endpoints.template(endpoint);
        if !template.contains(IDS_PLACEHOLDER) {
            return Err(ConfigLoadError::InvalidEndpoint {
                name: endpoint.env_var(),
                template: template.to_string(),
            });
        }
    }

    if !config.server.static_dir.is_dir() {
        warnings.push_with_hint(
            format!(
                "static directory {} does not exist; only /api routes will be served",
                config.server.static_dir.display()
            ),
            "Set FOLIO_STATIC_DIR or server.static_dir to the built site",
        );
    }

    if config.upstream.cache_ttl.is_zero() {
        warnings.push_with_hint(
            "upstream cache TTL is 0; every request will hit the platform API",
            format!("Unset ROBLOX_CACHE_TTL_MS to use the {DEFAULT_CACHE_TTL_MS} ms default"),
        );
    }

    if config.upstream.timeout.is_zero() {
        warnings.push("upstream timeout is 0; upstream requests will fail immediately");
    }

    Ok(warnings)
}
