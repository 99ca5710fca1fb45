//! Domain types shared across the platform adapters, cache store, and
//! aggregation service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::links::Link;

/// A supported video platform.
///
/// `Unknown` only appears in search results synthesized from cache documents
/// whose platform slots are all empty; it is never a valid request parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Youtube,
    Twitch,
    Unknown,
}

impl Platform {
    /// Field path of this platform's slot inside a stored creator document.
    #[must_use]
    pub fn slot_path(self) -> &'static str {
        match self {
            Platform::Youtube => "platforms.youtube",
            Platform::Twitch => "platforms.twitch",
            Platform::Unknown => "platforms.unknown",
        }
    }

    /// The other searchable platform, used for cross-platform enrichment.
    #[must_use]
    pub fn other(self) -> Option<Platform> {
        match self {
            Platform::Youtube => Some(Platform::Twitch),
            Platform::Twitch => Some(Platform::Youtube),
            Platform::Unknown => None,
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Youtube => write!(f, "youtube"),
            Platform::Twitch => write!(f, "twitch"),
            Platform::Unknown => write!(f, "unknown"),
        }
    }
}

impl std::str::FromStr for Platform {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "youtube" => Ok(Platform::Youtube),
            "twitch" => Ok(Platform::Twitch),
            _ => Err(()),
        }
    }
}

/// One search result. Produced fresh on every adapter call and synthesized
/// from cache documents by live search; never persisted as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatorSummary {
    pub platform: Platform,
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub url: String,
    /// Subscriber count on YouTube, follower count on Twitch. `None` when the
    /// platform hides the figure or it fails to parse.
    #[serde(default)]
    pub subscribers: Option<u64>,
}

impl CreatorSummary {
    /// Widen to the profile shape with the detail-only fields left empty,
    /// for cache writes driven by search results.
    #[must_use]
    pub fn into_profile(self) -> CreatorProfile {
        CreatorProfile {
            platform: self.platform,
            id: self.id,
            name: self.name,
            description: self.description,
            thumbnail: self.thumbnail,
            banner: None,
            url: self.url,
            subscribers: self.subscribers,
            views: None,
            videos: None,
            game: None,
            links: vec![],
            verified: false,
            cross_platform_data: vec![],
        }
    }
}

/// Full channel profile from a single-creator lookup. Superset of
/// [`CreatorSummary`]; the variable-width fields (`videos` vs `game`) are
/// optional rather than platform-tagged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorProfile {
    pub platform: Platform,
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub banner: Option<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub subscribers: Option<u64>,
    #[serde(default)]
    pub views: Option<u64>,
    #[serde(default)]
    pub videos: Option<u64>,
    #[serde(default)]
    pub game: Option<String>,
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(default)]
    pub verified: bool,
    /// Profiles from the *other* platform slots of the same cache document.
    /// Only populated when the profile was resolved from cache.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cross_platform_data: Vec<CreatorProfile>,
}

impl CreatorProfile {
    /// Collapse to the summary shape used by search responses.
    #[must_use]
    pub fn to_summary(&self) -> CreatorSummary {
        CreatorSummary {
            platform: self.platform,
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            thumbnail: self.thumbnail.clone(),
            url: self.url.clone(),
            subscribers: self.subscribers,
        }
    }
}

/// Per-platform profile slots of a stored creator document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlatformSlots {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube: Option<CreatorProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitch: Option<CreatorProfile>,
}

/// The persisted cache record: one document per creator as first seen, with
/// one profile slot per platform. There is no cross-platform identity merge;
/// a creator first cached via YouTube and later fetched via Twitch yields two
/// separate documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatorDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(rename = "lastUpdated")]
    pub last_updated: DateTime<Utc>,
    #[serde(default)]
    pub platforms: PlatformSlots,
}

impl CreatorDocument {
    #[must_use]
    pub fn slot(&self, platform: Platform) -> Option<&CreatorProfile> {
        match platform {
            Platform::Youtube => self.platforms.youtube.as_ref(),
            Platform::Twitch => self.platforms.twitch.as_ref(),
            Platform::Unknown => None,
        }
    }

    /// Profiles stored under every platform slot except `platform`.
    #[must_use]
    pub fn other_slots(&self, platform: Platform) -> Vec<&CreatorProfile> {
        platform
            .other()
            .and_then(|other| self.slot(other))
            .into_iter()
            .collect()
    }

    /// Minimal search-result shape for documents with no usable platform slot.
    #[must_use]
    pub fn fallback_summary(&self) -> CreatorSummary {
        CreatorSummary {
            platform: Platform::Unknown,
            id: self.id.clone(),
            name: self.name.clone(),
            description: String::new(),
            thumbnail: self.thumbnail.clone(),
            url: String::new(),
            subscribers: None,
        }
    }
}
