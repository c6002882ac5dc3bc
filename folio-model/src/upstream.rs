//! Records returned by the remote platform.
//!
//! Upstream payloads are loosely shaped and occasionally change, so every
//! field is optional and [`Envelope::from_value_lenient`] drops records that
//! fail to decode instead of rejecting the whole body.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `{ "data": [...] }` wrapper used by every endpoint the proxy calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

impl<T> Default for Envelope<T> {
    fn default() -> Self {
        Self { data: Vec::new() }
    }
}

impl<T> Envelope<T> {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<T: DeserializeOwned> Envelope<T> {
    /// Decode `value.data` record by record. A missing or non-array `data`
    /// yields an empty envelope.
    pub fn from_value_lenient(value: &Value) -> Self {
        let data = value
            .get("data")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| T::deserialize(item).ok())
                    .collect()
            })
            .unwrap_or_default();
        Self { data }
    }
}

/// Experience/universe details from the games endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    #[serde(default)]
    pub universe_id: Option<u64>,
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub experience_id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub visits: Option<u64>,
    #[serde(default)]
    pub favorites_count: Option<u64>,
    #[serde(default)]
    pub favorited_count: Option<u64>,
    #[serde(default)]
    pub playing: Option<u64>,
}

impl GameRecord {
    /// Identity used to match the record against fixtures.
    pub fn key(&self) -> Option<u64> {
        nonzero(self.universe_id)
            .or(nonzero(self.id))
            .or(nonzero(self.experience_id))
    }

    pub fn favorites(&self) -> Option<u64> {
        self.favorites_count.or(self.favorited_count)
    }

    /// The upstream display name, ignoring blank values.
    pub fn display_name(&self) -> Option<&str> {
        non_blank(self.name.as_deref())
    }
}

/// Image lookup result from any of the thumbnail endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThumbnailRecord {
    #[serde(default)]
    pub target_id: Option<u64>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl ThumbnailRecord {
    pub fn image(&self) -> Option<&str> {
        non_blank(self.image_url.as_deref())
    }
}

/// Community details from the groups endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupRecord {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub member_count: Option<u64>,
}

impl GroupRecord {
    pub fn display_name(&self) -> Option<&str> {
        non_blank(self.name.as_deref())
    }
}

fn nonzero(id: Option<u64>) -> Option<u64> {
    id.filter(|id| *id != 0)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}
