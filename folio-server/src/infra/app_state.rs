use std::{fmt, sync::Arc};

use folio_model::PortfolioFixtures;

use crate::infra::config::Config;
use crate::portfolio::PortfolioService;
use crate::upstream::{HttpFetcher, JsonFetcher, RobloxClient, TtlCache, UpstreamError};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub cache: Arc<TtlCache>,
    pub portfolio: Arc<PortfolioService>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

impl AppState {
    /// Wire the state around an arbitrary fetcher.
    pub fn new(
        config: Arc<Config>,
        fixtures: PortfolioFixtures,
        fetcher: Arc<dyn JsonFetcher>,
    ) -> Self {
        let cache = Arc::new(TtlCache::new(config.upstream.cache_ttl));
        let client = RobloxClient::new(
            fetcher,
            Arc::clone(&cache),
            config.upstream.endpoints.clone(),
        );
        let portfolio =
            Arc::new(PortfolioService::new(client, Arc::new(fixtures)));
        Self {
            config,
            cache,
            portfolio,
        }
    }

    /// Production wiring with the `reqwest` fetcher.
    pub fn with_http(
        config: Arc<Config>,
        fixtures: PortfolioFixtures,
    ) -> Result<Self, UpstreamError> {
        let fetcher = HttpFetcher::new(
            config.upstream.timeout,
            config.upstream.api_key.as_deref(),
        )?;
        Ok(Self::new(config, fixtures, Arc::new(fetcher)))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
