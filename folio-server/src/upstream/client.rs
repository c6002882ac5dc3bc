//! Cached access to the platform's public endpoints

use std::{fmt, sync::Arc};

use folio_model::{Envelope, GameRecord, GroupRecord, ThumbnailRecord};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info};

use super::{
    cache::TtlCache,
    endpoints::{Endpoint, build_url, cache_key},
    error::UpstreamError,
    fetcher::JsonFetcher,
};
use crate::infra::config::EndpointTemplates;

#[derive(Clone)]
pub struct RobloxClient {
    fetcher: Arc<dyn JsonFetcher>,
    cache: Arc<TtlCache>,
    endpoints: EndpointTemplates,
}

impl fmt::Debug for RobloxClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RobloxClient")
            .field("cache", &self.cache)
            .field("endpoints", &self.endpoints)
            .finish_non_exhaustive()
    }
}

impl RobloxClient {
    pub fn new(
        fetcher: Arc<dyn JsonFetcher>,
        cache: Arc<TtlCache>,
        endpoints: EndpointTemplates,
    ) -> Self {
        Self {
            fetcher,
            cache,
            endpoints,
        }
    }

    pub fn cache(&self) -> &Arc<TtlCache> {
        &self.cache
    }

    /// Serve `key` from the cache while fresh, otherwise fetch `url` and
    /// cache the decoded body. Failures are returned, never cached.
    pub async fn fetch_with_cache(
        &self,
        key: &str,
        url: &str,
    ) -> Result<Arc<Value>, UpstreamError> {
        if let Some(hit) = self.cache.get(key) {
            debug!(key = %key, "upstream cache hit");
            return Ok(hit);
        }

        info!(key = %key, "upstream cache miss");
        let value = self.fetcher.fetch_json(url).await?;
        Ok(self.cache.insert(key, value))
    }

    /// Fetch `endpoint` for a sorted, de-duplicated id set. An empty set
    /// short-circuits without touching the cache or the network.
    pub async fn fetch_envelope<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        ids: &[u64],
    ) -> Result<Envelope<T>, UpstreamError> {
        if ids.is_empty() {
            return Ok(Envelope::empty());
        }
        let key = cache_key(endpoint, ids);
        let url = build_url(self.endpoints.template(endpoint), ids);
        let body = self.fetch_with_cache(&key, &url).await?;
        Ok(Envelope::from_value_lenient(&body))
    }

    pub async fn games(
        &self,
        universe_ids: &[u64],
    ) -> Result<Envelope<GameRecord>, UpstreamError> {
        self.fetch_envelope(Endpoint::Games, universe_ids).await
    }

    pub async fn thumbnails(
        &self,
        experience_ids: &[u64],
    ) -> Result<Envelope<ThumbnailRecord>, UpstreamError> {
        self.fetch_envelope(Endpoint::Thumbnails, experience_ids).await
    }

    pub async fn groups(
        &self,
        group_ids: &[u64],
    ) -> Result<Envelope<GroupRecord>, UpstreamError> {
        self.fetch_envelope(Endpoint::Groups, group_ids).await
    }

    pub async fn group_icons(
        &self,
        group_ids: &[u64],
    ) -> Result<Envelope<ThumbnailRecord>, UpstreamError> {
        self.fetch_envelope(Endpoint::GroupIcons, group_ids).await
    }

    pub async fn user_avatar(
        &self,
        user_ids: &[u64],
    ) -> Result<Envelope<ThumbnailRecord>, UpstreamError> {
        self.fetch_envelope(Endpoint::UserAvatar, user_ids).await
    }
}
