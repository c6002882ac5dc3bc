use std::sync::Arc;

use chrono::Utc;
use folio_model::{Envelope, PortfolioDocument, PortfolioFixtures};
use tracing::{debug, warn};

use super::merge::{UpstreamSnapshot, merge};
use crate::upstream::{Endpoint, RobloxClient, UpstreamError};

/// Builds the aggregated portfolio document from fixtures plus whatever
/// the platform returns.
#[derive(Debug, Clone)]
pub struct PortfolioService {
    client: RobloxClient,
    fixtures: Arc<PortfolioFixtures>,
}

impl PortfolioService {
    pub fn new(client: RobloxClient, fixtures: Arc<PortfolioFixtures>) -> Self {
        Self { client, fixtures }
    }

    pub fn fixtures(&self) -> &PortfolioFixtures {
        &self.fixtures
    }

    pub fn client(&self) -> &RobloxClient {
        &self.client
    }

    /// Fan out the five upstream calls concurrently. Each failure degrades
    /// to an empty result for that source only.
    pub async fn snapshot(&self) -> UpstreamSnapshot {
        let fixtures = &self.fixtures;
        let experience_ids = fixtures.experience_ids();
        let universe_ids = fixtures.universe_ids();
        let group_ids = fixtures.group_ids();
        let user_ids = fixtures.user_ids();

        let (games, thumbnails, groups, group_icons, avatars) = tokio::join!(
            self.client.games(&universe_ids),
            self.client.thumbnails(&experience_ids),
            self.client.groups(&group_ids),
            self.client.group_icons(&group_ids),
            self.client.user_avatar(&user_ids),
        );

        UpstreamSnapshot {
            games: recover(Endpoint::Games, games),
            thumbnails: recover(Endpoint::Thumbnails, thumbnails),
            groups: recover(Endpoint::Groups, groups),
            group_icons: recover(Endpoint::GroupIcons, group_icons),
            avatars: recover(Endpoint::UserAvatar, avatars),
        }
    }

    pub async fn build_document(&self) -> PortfolioDocument {
        let snapshot = self.snapshot().await;
        debug!(
            games = snapshot.games.data.len(),
            thumbnails = snapshot.thumbnails.data.len(),
            groups = snapshot.groups.data.len(),
            group_icons = snapshot.group_icons.data.len(),
            avatars = snapshot.avatars.data.len(),
            "upstream snapshot collected"
        );
        merge(&self.fixtures, &snapshot, Utc::now())
    }
}

fn recover<T>(
    endpoint: Endpoint,
    result: Result<Envelope<T>, UpstreamError>,
) -> Envelope<T> {
    result.unwrap_or_else(|err| {
        warn!(endpoint = %endpoint, error = %err, "upstream fetch failed; using fixture data");
        Envelope::empty()
    })
}
