//! Merge upstream records onto the local fixtures

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use folio_model::{
    CommunityFixture, CommunityStats, EnrichedCommunity, EnrichedGame,
    EnrichedProfile, Envelope, GameFixture, GameRecord, GameStats,
    GroupRecord, PortfolioDocument, PortfolioFixtures, ThumbnailRecord,
};

/// Everything fetched for one aggregation. Failed fetches are empty.
#[derive(Debug, Clone, Default)]
pub struct UpstreamSnapshot {
    pub games: Envelope<GameRecord>,
    pub thumbnails: Envelope<ThumbnailRecord>,
    pub groups: Envelope<GroupRecord>,
    pub group_icons: Envelope<ThumbnailRecord>,
    pub avatars: Envelope<ThumbnailRecord>,
}

/// `target_id -> image`. A later record for the same target wins, even
/// when its image is blank.
fn image_map(records: &[ThumbnailRecord]) -> HashMap<u64, Option<&str>> {
    records
        .iter()
        .filter_map(|record| record.target_id.map(|id| (id, record.image())))
        .collect()
}

fn lookup_image(map: &HashMap<u64, Option<&str>>, id: Option<u64>) -> Option<String> {
    id.and_then(|id| map.get(&id).copied().flatten())
        .map(str::to_string)
}

pub fn merge(
    fixtures: &PortfolioFixtures,
    snapshot: &UpstreamSnapshot,
    generated_at: DateTime<Utc>,
) -> PortfolioDocument {
    let game_map: HashMap<u64, &GameRecord> = snapshot
        .games
        .data
        .iter()
        .filter_map(|record| record.key().map(|key| (key, record)))
        .collect();
    let thumbs = image_map(&snapshot.thumbnails.data);
    let group_map: HashMap<u64, &GroupRecord> = snapshot
        .groups
        .data
        .iter()
        .filter_map(|record| record.id.map(|id| (id, record)))
        .collect();
    let icons = image_map(&snapshot.group_icons.data);

    let avatar = snapshot
        .avatars
        .data
        .first()
        .and_then(ThumbnailRecord::image)
        .map(str::to_string);

    PortfolioDocument {
        generated_at,
        profile: EnrichedProfile {
            profile: fixtures.profile.clone(),
            avatar,
        },
        games: fixtures
            .games
            .iter()
            .map(|game| enrich_game(game, &game_map, &thumbs))
            .collect(),
        communities: fixtures
            .communities
            .iter()
            .map(|community| enrich_community(community, &group_map, &icons))
            .collect(),
    }
}

fn enrich_game(
    fixture: &GameFixture,
    records: &HashMap<u64, &GameRecord>,
    thumbs: &HashMap<u64, Option<&str>>,
) -> EnrichedGame {
    let record = fixture.stats_key().and_then(|key| records.get(&key).copied());

    let mut details = fixture.details.clone();
    if let Some(name) = record.and_then(GameRecord::display_name) {
        details.title = name.to_string();
    }

    let stats = record
        .map(|record| GameStats {
            visits: record.visits,
            favorites: record.favorites(),
            playing: record.playing,
        })
        .unwrap_or_default();

    let universe_id = record
        .and_then(GameRecord::key)
        .or(fixture.universe_id.filter(|id| *id > 0));

    EnrichedGame {
        experience_id: fixture.experience_id,
        universe_id,
        details,
        stats,
        image: lookup_image(thumbs, fixture.experience_id),
    }
}

fn enrich_community(
    fixture: &CommunityFixture,
    records: &HashMap<u64, &GroupRecord>,
    icons: &HashMap<u64, Option<&str>>,
) -> EnrichedCommunity {
    let record = fixture.group_id.and_then(|id| records.get(&id).copied());

    let mut details = fixture.details.clone();
    if let Some(name) = record.and_then(GroupRecord::display_name) {
        details.title = name.to_string();
    }

    EnrichedCommunity {
        experience_id: fixture.experience_id,
        group_id: fixture.group_id,
        details,
        stats: CommunityStats {
            members: record.and_then(|record| record.member_count),
        },
        image: lookup_image(icons, fixture.group_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn fixtures() -> PortfolioFixtures {
        serde_json::from_value(json!({
            "profile": { "userId": 42, "username": "builder" },
            "games": [
                { "experienceId": 100, "universeId": 7, "title": "Fixture A" },
                { "experienceId": 200, "title": "Fixture B" }
            ],
            "communities": [
                { "experienceId": null, "groupId": 9, "title": "Group" }
            ]
        }))
        .unwrap()
    }

    fn envelope<T: serde::de::DeserializeOwned>(value: Value) -> Envelope<T> {
        Envelope::from_value_lenient(&value)
    }

    fn at() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn empty_snapshot_keeps_fixture_fields_with_null_stats() {
        let doc = merge(&fixtures(), &UpstreamSnapshot::default(), at());
        assert_eq!(doc.games.len(), 2);
        assert_eq!(doc.games[0].details.title, "Fixture A");
        assert!(doc.games.iter().all(|g| g.stats.is_unknown() && g.image.is_none()));
        assert_eq!(doc.games[0].universe_id, Some(7));
        assert_eq!(doc.games[1].universe_id, None);
        assert_eq!(doc.communities[0].stats.members, None);
        assert_eq!(doc.profile.avatar, None);
    }

    #[test]
    fn records_enrich_matching_fixtures() {
        let snapshot = UpstreamSnapshot {
            games: envelope(json!({ "data": [
                { "id": 7, "name": "Live A", "visits": 10, "favoritedCount": 3, "playing": 1 },
                { "universeId": 200, "name": "", "visits": 5 }
            ]})),
            thumbnails: envelope(json!({ "data": [
                { "targetId": 100, "imageUrl": "https://img/a" },
                { "targetId": 200, "imageUrl": "" }
            ]})),
            groups: envelope(json!({ "data": [
                { "id": 9, "name": "Live Group", "memberCount": 1234 }
            ]})),
            group_icons: envelope(json!({ "data": [
                { "targetId": 9, "imageUrl": "https://img/g" }
            ]})),
            avatars: envelope(json!({ "data": [
                { "targetId": 42, "imageUrl": "https://img/me" }
            ]})),
        };
        let doc = merge(&fixtures(), &snapshot, at());

        let a = &doc.games[0];
        assert_eq!(a.details.title, "Live A");
        assert_eq!(a.stats.visits, Some(10));
        assert_eq!(a.stats.favorites, Some(3));
        assert_eq!(a.stats.playing, Some(1));
        assert_eq!(a.image.as_deref(), Some("https://img/a"));
        assert_eq!(a.universe_id, Some(7));

        let b = &doc.games[1];
        assert_eq!(b.details.title, "Fixture B", "blank names keep the fixture title");
        assert_eq!(b.stats.visits, Some(5));
        assert_eq!(b.image, None, "blank image urls are dropped");
        assert_eq!(b.universe_id, Some(200));

        let group = &doc.communities[0];
        assert_eq!(group.details.title, "Live Group");
        assert_eq!(group.stats.members, Some(1234));
        assert_eq!(group.image.as_deref(), Some("https://img/g"));

        assert_eq!(doc.profile.avatar.as_deref(), Some("https://img/me"));
    }

    #[test]
    fn favorites_count_wins_over_favorited_count() {
        let snapshot = UpstreamSnapshot {
            games: envelope(json!({ "data": [
                { "universeId": 7, "favoritesCount": 8, "favoritedCount": 3 }
            ]})),
            ..UpstreamSnapshot::default()
        };
        let doc = merge(&fixtures(), &snapshot, at());
        assert_eq!(doc.games[0].stats.favorites, Some(8));
    }

    #[test]
    fn document_serializes_in_wire_shape() {
        let doc = merge(&fixtures(), &UpstreamSnapshot::default(), at());
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["generatedAt"], "2025-01-01T00:00:00.000Z");
        assert_eq!(value["profile"]["userId"], 42);
        assert_eq!(value["profile"]["avatar"], Value::Null);
        assert_eq!(value["games"][0]["experienceId"], 100);
        assert_eq!(value["games"][0]["title"], "Fixture A");
        assert_eq!(value["games"][0]["stats"]["visits"], Value::Null);
        assert_eq!(value["communities"][0]["groupId"], 9);
        assert_eq!(value["communities"][0]["stats"]["members"], Value::Null);
    }
}
