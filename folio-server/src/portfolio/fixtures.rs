use std::{fs, path::Path};

use folio_model::PortfolioFixtures;
use tracing::info;

use crate::infra::config::ConfigLoadError;

/// Fixture set compiled into the binary.
pub const EMBEDDED_FIXTURES: &str = include_str!("../../fixtures/portfolio.json");

pub fn embedded_fixtures() -> Result<PortfolioFixtures, ConfigLoadError> {
    serde_json::from_str(EMBEDDED_FIXTURES)
        .map_err(|source| ConfigLoadError::FixturesParse { path: None, source })
}

/// Load fixtures from `path`, or the embedded set when `None`.
pub fn load_fixtures(
    path: Option<&Path>,
) -> Result<PortfolioFixtures, ConfigLoadError> {
    let Some(path) = path else {
        return embedded_fixtures();
    };

    let contents =
        fs::read_to_string(path).map_err(|source| ConfigLoadError::FixturesIo {
            path: path.to_path_buf(),
            source,
        })?;
    let fixtures: PortfolioFixtures =
        serde_json::from_str(&contents).map_err(|source| {
            ConfigLoadError::FixturesParse {
                path: Some(path.to_path_buf()),
                source,
            }
        })?;

    info!(
        path = %path.display(),
        games = fixtures.games.len(),
        communities = fixtures.communities.len(),
        "loaded portfolio fixtures"
    );
    Ok(fixtures)
}
