//! Local portfolio fixtures.
//!
//! The fixture document is the source of truth for what the site shows;
//! the upstream platform only contributes titles, stats and artwork.

use serde::{Deserialize, Serialize};

/// Outbound links rendered on a card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemLinks {
    #[serde(default)]
    pub roblox: Option<String>,
    #[serde(default)]
    pub community: Option<String>,
}

/// Presentation fields shared by games and communities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDetails {
    pub title: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub highlight: bool,
    #[serde(default)]
    pub links: ItemLinks,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileFixture {
    #[serde(default)]
    pub user_id: Option<u64>,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameFixture {
    #[serde(default)]
    pub experience_id: Option<u64>,
    #[serde(default)]
    pub universe_id: Option<u64>,
    #[serde(flatten)]
    pub details: ItemDetails,
}

impl GameFixture {
    /// Key used to find this game's stats record: the universe id when
    /// known, otherwise the experience id.
    pub fn stats_key(&self) -> Option<u64> {
        positive(self.universe_id).or(positive(self.experience_id))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityFixture {
    #[serde(default)]
    pub experience_id: Option<u64>,
    #[serde(default)]
    pub group_id: Option<u64>,
    #[serde(flatten)]
    pub details: ItemDetails,
}

/// The complete local fixture document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioFixtures {
    #[serde(default)]
    pub profile: ProfileFixture,
    #[serde(default)]
    pub games: Vec<GameFixture>,
    #[serde(default)]
    pub communities: Vec<CommunityFixture>,
}

impl PortfolioFixtures {
    /// Positive experience ids, sorted and de-duplicated.
    pub fn experience_ids(&self) -> Vec<u64> {
        id_set(self.games.iter().map(|game| game.experience_id))
    }

    /// Positive universe ids, sorted and de-duplicated.
    pub fn universe_ids(&self) -> Vec<u64> {
        id_set(self.games.iter().map(|game| game.universe_id))
    }

    /// Positive group ids, sorted and de-duplicated.
    pub fn group_ids(&self) -> Vec<u64> {
        id_set(self.communities.iter().map(|community| community.group_id))
    }

    /// The profile's user id as a one-element set, or empty.
    pub fn user_ids(&self) -> Vec<u64> {
        id_set(std::iter::once(self.profile.user_id))
    }
}

fn positive(id: Option<u64>) -> Option<u64> {
    id.filter(|id| *id > 0)
}

fn id_set(ids: impl Iterator<Item = Option<u64>>) -> Vec<u64> {
    let mut ids: Vec<u64> = ids.filter_map(positive).collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fixtures() -> PortfolioFixtures {
        serde_json::from_value(json!({
            "profile": { "userId": 42, "username": "builder" },
            "games": [
                { "experienceId": 30, "universeId": 7, "title": "B" },
                { "experienceId": 10, "title": "A" },
                { "experienceId": 30, "title": "dup" },
                { "experienceId": 0, "title": "zero" }
            ],
            "communities": [
                { "experienceId": null, "groupId": 9, "title": "G" },
                { "groupId": 3, "title": "H" },
                { "title": "no group" }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn id_sets_are_sorted_positive_and_unique() {
        let fixtures = fixtures();
        assert_eq!(fixtures.experience_ids(), vec![10, 30]);
        assert_eq!(fixtures.universe_ids(), vec![7]);
        assert_eq!(fixtures.group_ids(), vec![3, 9]);
        assert_eq!(fixtures.user_ids(), vec![42]);
    }

    #[test]
    fn missing_profile_user_yields_empty_set() {
        let fixtures = PortfolioFixtures::default();
        assert!(fixtures.user_ids().is_empty());
    }

    #[test]
    fn stats_key_prefers_universe_id() {
        let fixtures = fixtures();
        assert_eq!(fixtures.games[0].stats_key(), Some(7));
        assert_eq!(fixtures.games[1].stats_key(), Some(10));
        assert_eq!(fixtures.games[3].stats_key(), None);
    }

    #[test]
    fn details_flatten_from_camel_case() {
        let game: GameFixture = serde_json::from_value(json!({
            "experienceId": 1,
            "title": "Club",
            "role": "Builder",
            "category": "Game",
            "description": "Lights.",
            "highlight": true,
            "links": { "roblox": "https://example.test/1", "community": null }
        }))
        .unwrap();
        assert_eq!(game.details.role, "Builder");
        assert!(game.details.highlight);
        assert_eq!(
            game.details.links.roblox.as_deref(),
            Some("https://example.test/1")
        );
        assert!(game.universe_id.is_none());
    }
}
