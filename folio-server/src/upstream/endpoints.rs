//! Upstream endpoints, their cache tags and URL templates

use std::fmt;

/// Placeholder substituted with the comma-joined id list.
pub const IDS_PLACEHOLDER: &str = "{ids}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Games,
    Thumbnails,
    Groups,
    GroupIcons,
    UserAvatar,
}

impl Endpoint {
    pub const ALL: [Endpoint; 5] = [
        Endpoint::Games,
        Endpoint::Thumbnails,
        Endpoint::Groups,
        Endpoint::GroupIcons,
        Endpoint::UserAvatar,
    ];

    /// Prefix of every cache key for this endpoint.
    pub fn tag(self) -> &'static str {
        match self {
            Endpoint::Games => "games",
            Endpoint::Thumbnails => "thumbs",
            Endpoint::Groups => "groups",
            Endpoint::GroupIcons => "group-icons",
            Endpoint::UserAvatar => "user-avatar",
        }
    }

    /// Environment variable overriding the URL template.
    pub fn env_var(self) -> &'static str {
        match self {
            Endpoint::Games => "ROBLOX_GAMES_ENDPOINT",
            Endpoint::Thumbnails => "ROBLOX_THUMBNAILS_ENDPOINT",
            Endpoint::Groups => "ROBLOX_GROUPS_ENDPOINT",
            Endpoint::GroupIcons => "ROBLOX_GROUP_ICONS_ENDPOINT",
            Endpoint::UserAvatar => "ROBLOX_USER_AVATAR_ENDPOINT",
        }
    }

    pub fn default_template(self) -> &'static str {
        match self {
            Endpoint::Games => {
                "https://apis.roblox.com/games/v1/games?experienceIds={ids}"
            }
            Endpoint::Thumbnails => {
                "https://thumbnails.roblox.com/v1/places/gameicons?placeIds={ids}&size=512x512&format=Png&isCircular=false"
            }
            Endpoint::Groups => {
                "https://apis.roblox.com/groups/v1/groups?groupIds={ids}"
            }
            Endpoint::GroupIcons => {
                "https://thumbnails.roblox.com/v1/groups/icons?groupIds={ids}&size=150x150&format=Png&isCircular=true"
            }
            Endpoint::UserAvatar => {
                "https://thumbnails.roblox.com/v1/users/avatar-headshot?userIds={ids}&size=420x420&format=Png&isCircular=false"
            }
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

fn join_ids(ids: &[u64]) -> String {
    ids.iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// `"<tag>:<id>,<id>,..."`
pub fn cache_key(endpoint: Endpoint, ids: &[u64]) -> String {
    format!("{}:{}", endpoint.tag(), join_ids(ids))
}

/// Substitute the first `{ids}` placeholder of `template`.
pub fn build_url(template: &str, ids: &[u64]) -> String {
    template.replacen(IDS_PLACEHOLDER, &join_ids(ids), 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_and_urls_share_the_joined_id_list() {
        let ids = [8357001, 34725475];
        assert_eq!(
            cache_key(Endpoint::GroupIcons, &ids),
            "group-icons:8357001,34725475"
        );
        assert_eq!(
            build_url("https://example.test/g?ids={ids}&size=1", &ids),
            "https://example.test/g?ids=8357001,34725475&size=1"
        );
    }

    #[test]
    fn every_default_template_has_placeholder() {
        for endpoint in Endpoint::ALL {
            assert!(
                endpoint.default_template().contains(IDS_PLACEHOLDER),
                "{endpoint} template lacks placeholder"
            );
        }
    }

    #[test]
    fn tags_are_distinct() {
        let mut tags: Vec<_> = Endpoint::ALL.iter().map(|e| e.tag()).collect();
        tags.sort_unstable();
        tags.dedup();
        assert_eq!(tags.len(), Endpoint::ALL.len());
    }
}
