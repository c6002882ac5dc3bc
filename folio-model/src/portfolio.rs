//! The aggregated `/api/portfolio` document.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};

use crate::fixtures::{ItemDetails, ProfileFixture};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioDocument {
    #[serde(serialize_with = "serialize_iso_millis")]
    pub generated_at: DateTime<Utc>,
    pub profile: EnrichedProfile,
    pub games: Vec<EnrichedGame>,
    pub communities: Vec<EnrichedCommunity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedProfile {
    #[serde(flatten)]
    pub profile: ProfileFixture,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    pub visits: Option<u64>,
    pub favorites: Option<u64>,
    pub playing: Option<u64>,
}

impl GameStats {
    pub fn is_unknown(&self) -> bool {
        self.visits.is_none()
            && self.favorites.is_none()
            && self.playing.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedGame {
    pub experience_id: Option<u64>,
    pub universe_id: Option<u64>,
    #[serde(flatten)]
    pub details: ItemDetails,
    pub stats: GameStats,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunityStats {
    pub members: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedCommunity {
    pub experience_id: Option<u64>,
    pub group_id: Option<u64>,
    #[serde(flatten)]
    pub details: ItemDetails,
    pub stats: CommunityStats,
    pub image: Option<String>,
}

/// `2025-01-01T00:00:00.000Z`, the shape browsers produce for ISO dates.
fn serialize_iso_millis<S>(
    value: &DateTime<Utc>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer
        .serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
}
