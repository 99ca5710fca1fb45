//! HTTP client for the `YouTube` Data API v3.
//!
//! Wraps `reqwest` with API key management and typed response
//! deserialization. The public methods degrade to empty results on any
//! failure; the fallible plumbing lives in the private `try_*` methods.

use std::time::Duration;

use reqwest::{Client, Url};

use creatordb_core::creators::{CreatorProfile, CreatorSummary, Platform};
use creatordb_core::links::extract_links;

use crate::error::PlatformError;
use crate::types::{YtChannel, YtChannelsResponse, YtSearchItem, YtSearchResponse};

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3/";

/// Hard per-call cap imposed by the Data API.
pub const YOUTUBE_MAX_RESULTS: u32 = 50;

/// Client for the `YouTube` Data API v3.
///
/// Use [`YouTubeClient::new`] for production or
/// [`YouTubeClient::with_base_url`] to point at a mock server in tests.
pub struct YouTubeClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl YouTubeClient {
    /// Creates a new client pointed at the production Data API.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, PlatformError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlatformError::Api`] if `base_url` is not
    /// a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, PlatformError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("creatordb/0.1 (creator-discovery)")
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // join() appends path segments instead of replacing the last one.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| PlatformError::Api(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Searches for channels matching `query`, returning at most
    /// `max_results` (clamped to [`YOUTUBE_MAX_RESULTS`]) summaries.
    ///
    /// Failures are logged and produce an empty list.
    pub async fn search_channels(&self, query: &str, max_results: u32) -> Vec<CreatorSummary> {
        match self.try_search_channels(query, max_results).await {
            Ok(results) => results,
            Err(e) => {
                tracing::warn!(error = %e, query, "youtube channel search failed");
                Vec::new()
            }
        }
    }

    /// Fetches the full profile for the channel with the given id.
    ///
    /// Returns `None` both when the channel does not exist and when the
    /// upstream call fails; the latter is logged.
    pub async fn channel_details(&self, id: &str) -> Option<CreatorProfile> {
        match self.try_channel_details(id).await {
            Ok(profile) => profile,
            Err(e) => {
                tracing::warn!(error = %e, channel_id = id, "youtube channel lookup failed");
                None
            }
        }
    }

    async fn try_search_channels(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<CreatorSummary>, PlatformError> {
        let clamped = max_results.clamp(1, YOUTUBE_MAX_RESULTS);
        let url = self.build_url(
            "search",
            &[
                ("part", "snippet"),
                ("type", "channel"),
                ("q", query),
                ("maxResults", &clamped.to_string()),
            ],
        );

        let response: YtSearchResponse = self.request_json(&url).await?;
        Ok(response
            .items
            .into_iter()
            .filter_map(normalize_search_item)
            .collect())
    }

    async fn try_channel_details(&self, id: &str) -> Result<Option<CreatorProfile>, PlatformError> {
        let url = self.build_url(
            "channels",
            &[("part", "snippet,statistics,brandingSettings"), ("id", id)],
        );

        let response: YtChannelsResponse = self.request_json(&url).await?;
        Ok(response.items.into_iter().next().map(normalize_channel))
    }

    /// Builds the full endpoint URL with percent-encoded query parameters,
    /// always appending the API key.
    fn build_url(&self, endpoint: &str, params: &[(&str, &str)]) -> Url {
        let mut url = self
            .base_url
            .join(endpoint)
            .unwrap_or_else(|_| self.base_url.clone());
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("key", &self.api_key);
        }
        url
    }

    async fn request_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &Url,
    ) -> Result<T, PlatformError> {
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| PlatformError::Deserialize {
            context: url.path().to_string(),
            source: e,
        })
    }
}

fn channel_url(id: &str) -> String {
    format!("https://youtube.com/channel/{id}")
}

/// Search items without a channel id (playlists, videos leaking through the
/// type filter) are dropped.
fn normalize_search_item(item: YtSearchItem) -> Option<CreatorSummary> {
    let id = item.id.channel_id?;
    Some(CreatorSummary {
        platform: Platform::Youtube,
        url: channel_url(&id),
        id,
        name: item.snippet.title,
        description: item.snippet.description,
        thumbnail: item.snippet.thumbnails.best(),
        subscribers: None,
    })
}

fn normalize_channel(channel: YtChannel) -> CreatorProfile {
    let links = extract_links(&channel.snippet.description);
    CreatorProfile {
        platform: Platform::Youtube,
        url: channel_url(&channel.id),
        subscribers: channel.statistics.subscribers(),
        views: channel.statistics.views(),
        videos: channel.statistics.videos(),
        banner: channel
            .branding_settings
            .image
            .and_then(|i| i.banner_external_url),
        thumbnail: channel.snippet.thumbnails.best(),
        id: channel.id,
        name: channel.snippet.title,
        description: channel.snippet.description,
        game: None,
        links,
        // The Data API exposes no public verified flag.
        verified: false,
        cross_platform_data: vec![],
    }
}
