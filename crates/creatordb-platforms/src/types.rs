//! Raw wire types for the upstream platform APIs, deserialized as-is and
//! normalized into domain types by the client modules.

use serde::Deserialize;

// ---------------------------------------------------------------------------
// YouTube Data API v3
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct YtSearchResponse {
    #[serde(default)]
    pub items: Vec<YtSearchItem>,
}

#[derive(Debug, Deserialize)]
pub struct YtSearchItem {
    pub id: YtSearchId,
    pub snippet: YtSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YtSearchId {
    #[serde(default)]
    pub channel_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct YtSnippet {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub thumbnails: YtThumbnails,
}

#[derive(Debug, Default, Deserialize)]
pub struct YtThumbnails {
    #[serde(default)]
    pub high: Option<YtThumbnail>,
    #[serde(default, rename = "default")]
    pub fallback: Option<YtThumbnail>,
}

impl YtThumbnails {
    /// Highest-quality thumbnail URL available.
    #[must_use]
    pub fn best(&self) -> Option<String> {
        self.high
            .as_ref()
            .or(self.fallback.as_ref())
            .map(|t| t.url.clone())
    }
}

#[derive(Debug, Deserialize)]
pub struct YtThumbnail {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct YtChannelsResponse {
    #[serde(default)]
    pub items: Vec<YtChannel>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YtChannel {
    pub id: String,
    pub snippet: YtSnippet,
    #[serde(default)]
    pub statistics: YtStatistics,
    #[serde(default)]
    pub branding_settings: YtBranding,
}

/// Counters arrive as decimal strings; `subscriberCount` may be absent when
/// the channel hides it.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YtStatistics {
    #[serde(default)]
    pub subscriber_count: Option<String>,
    #[serde(default)]
    pub hidden_subscriber_count: bool,
    #[serde(default)]
    pub view_count: Option<String>,
    #[serde(default)]
    pub video_count: Option<String>,
}

impl YtStatistics {
    #[must_use]
    pub fn subscribers(&self) -> Option<u64> {
        if self.hidden_subscriber_count {
            return None;
        }
        self.subscriber_count.as_deref().and_then(parse_count)
    }

    #[must_use]
    pub fn views(&self) -> Option<u64> {
        self.view_count.as_deref().and_then(parse_count)
    }

    #[must_use]
    pub fn videos(&self) -> Option<u64> {
        self.video_count.as_deref().and_then(parse_count)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct YtBranding {
    #[serde(default)]
    pub image: Option<YtBrandingImage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YtBrandingImage {
    #[serde(default)]
    pub banner_external_url: Option<String>,
}

/// Parses a decimal-string counter, treating garbage as "not published".
fn parse_count(raw: &str) -> Option<u64> {
    raw.parse::<u64>().ok()
}

// ---------------------------------------------------------------------------
// Twitch Helix API
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct TwitchTokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TwitchEnvelope<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub struct TwitchSearchChannel {
    pub id: String,
    #[serde(default)]
    pub broadcaster_login: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TwitchUser {
    pub id: String,
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub profile_image_url: Option<String>,
    #[serde(default)]
    pub offline_image_url: Option<String>,
    #[serde(default)]
    pub broadcaster_type: String,
    #[serde(default)]
    pub view_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct TwitchChannelInfo {
    #[serde(default)]
    pub game_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TwitchFollowersResponse {
    #[serde(default)]
    pub total: Option<u64>,
}
