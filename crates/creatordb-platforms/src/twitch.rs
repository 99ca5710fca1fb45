//! HTTP client for the Twitch Helix API.
//!
//! Requires an app access token obtained via the OAuth client-credentials
//! grant. The token is fetched once and cached for the client's lifetime —
//! there is no expiry tracking, so once it goes stale every call fails
//! closed (empty results) until a new client is constructed.

use std::time::Duration;

use reqwest::{Client, Url};
use tokio::sync::OnceCell;

use creatordb_core::creators::{CreatorProfile, CreatorSummary, Platform};
use creatordb_core::links::extract_links;

use crate::error::PlatformError;
use crate::types::{
    TwitchChannelInfo, TwitchEnvelope, TwitchFollowersResponse, TwitchSearchChannel,
    TwitchTokenResponse, TwitchUser,
};

const DEFAULT_API_BASE_URL: &str = "https://api.twitch.tv/helix/";
const DEFAULT_AUTH_BASE_URL: &str = "https://id.twitch.tv/";

/// Hard per-call cap on `search/channels` results.
pub const TWITCH_MAX_RESULTS: u32 = 20;

/// Client for the Twitch Helix API.
///
/// Use [`TwitchClient::new`] for production or
/// [`TwitchClient::with_base_urls`] to point both the API and the OAuth
/// endpoint at mock servers in tests.
pub struct TwitchClient {
    client: Client,
    client_id: String,
    client_secret: String,
    api_base_url: Url,
    auth_base_url: Url,
    token: OnceCell<String>,
}

impl TwitchClient {
    /// Creates a new client pointed at the production Helix API.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        client_id: &str,
        client_secret: &str,
        timeout_secs: u64,
    ) -> Result<Self, PlatformError> {
        Self::with_base_urls(
            client_id,
            client_secret,
            timeout_secs,
            DEFAULT_API_BASE_URL,
            DEFAULT_AUTH_BASE_URL,
        )
    }

    /// Creates a new client with custom API and auth base URLs (for testing
    /// with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlatformError::Api`] if either base URL
    /// is invalid.
    pub fn with_base_urls(
        client_id: &str,
        client_secret: &str,
        timeout_secs: u64,
        api_base_url: &str,
        auth_base_url: &str,
    ) -> Result<Self, PlatformError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("creatordb/0.1 (creator-discovery)")
            .build()?;

        Ok(Self {
            client,
            client_id: client_id.to_owned(),
            client_secret: client_secret.to_owned(),
            api_base_url: parse_base_url(api_base_url)?,
            auth_base_url: parse_base_url(auth_base_url)?,
            token: OnceCell::new(),
        })
    }

    /// Searches for channels matching `query`, returning at most
    /// `max_results` (clamped to [`TWITCH_MAX_RESULTS`]) summaries.
    ///
    /// Failures are logged and produce an empty list.
    pub async fn search_channels(&self, query: &str, max_results: u32) -> Vec<CreatorSummary> {
        match self.try_search_channels(query, max_results).await {
            Ok(results) => results,
            Err(e) => {
                tracing::warn!(error = %e, query, "twitch channel search failed");
                Vec::new()
            }
        }
    }

    /// Fetches the full profile for the user with the given id, enriched with
    /// the current category and follower total where those calls succeed.
    ///
    /// Returns `None` both when the user does not exist and when the upstream
    /// call fails; the latter is logged.
    pub async fn channel_details(&self, id: &str) -> Option<CreatorProfile> {
        match self.try_channel_details(id).await {
            Ok(profile) => profile,
            Err(e) => {
                tracing::warn!(error = %e, user_id = id, "twitch channel lookup failed");
                None
            }
        }
    }

    async fn try_search_channels(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<CreatorSummary>, PlatformError> {
        let clamped = max_results.clamp(1, TWITCH_MAX_RESULTS);
        let url = self.build_api_url(
            "search/channels",
            &[("query", query), ("first", &clamped.to_string())],
        );

        let response: TwitchEnvelope<TwitchSearchChannel> = self.request_json(&url).await?;
        Ok(response.data.into_iter().map(normalize_search_channel).collect())
    }

    async fn try_channel_details(&self, id: &str) -> Result<Option<CreatorProfile>, PlatformError> {
        let url = self.build_api_url("users", &[("id", id)]);
        let response: TwitchEnvelope<TwitchUser> = self.request_json(&url).await?;
        let Some(user) = response.data.into_iter().next() else {
            return Ok(None);
        };

        // Category and follower total are enrichment only; either call
        // failing must not sink the whole lookup.
        let game = match self.fetch_game(&user.id).await {
            Ok(game) => game,
            Err(e) => {
                tracing::debug!(error = %e, user_id = %user.id, "twitch channel info unavailable");
                None
            }
        };
        let followers = match self.fetch_follower_total(&user.id).await {
            Ok(total) => total,
            Err(e) => {
                tracing::debug!(error = %e, user_id = %user.id, "twitch follower total unavailable");
                None
            }
        };

        Ok(Some(normalize_user(user, game, followers)))
    }

    async fn fetch_game(&self, broadcaster_id: &str) -> Result<Option<String>, PlatformError> {
        let url = self.build_api_url("channels", &[("broadcaster_id", broadcaster_id)]);
        let response: TwitchEnvelope<TwitchChannelInfo> = self.request_json(&url).await?;
        Ok(response
            .data
            .into_iter()
            .next()
            .and_then(|info| info.game_name)
            .filter(|g| !g.is_empty()))
    }

    async fn fetch_follower_total(
        &self,
        broadcaster_id: &str,
    ) -> Result<Option<u64>, PlatformError> {
        let url = self.build_api_url(
            "channels/followers",
            &[("broadcaster_id", broadcaster_id), ("first", "1")],
        );
        let response: TwitchFollowersResponse = self.request_json(&url).await?;
        Ok(response.total)
    }

    /// Returns the cached app access token, performing the
    /// client-credentials exchange on first use.
    async fn bearer_token(&self) -> Result<&str, PlatformError> {
        let token = self
            .token
            .get_or_try_init(|| self.fetch_token())
            .await?;
        Ok(token.as_str())
    }

    async fn fetch_token(&self) -> Result<String, PlatformError> {
        let url = self
            .auth_base_url
            .join("oauth2/token")
            .map_err(|e| PlatformError::Api(format!("invalid token URL: {e}")))?;

        let response = self
            .client
            .post(url)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("grant_type", "client_credentials"),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        let parsed: TwitchTokenResponse =
            serde_json::from_str(&body).map_err(|e| PlatformError::Deserialize {
                context: "oauth2/token".to_string(),
                source: e,
            })?;

        parsed
            .access_token
            .ok_or_else(|| PlatformError::Api("token response missing access_token".to_string()))
    }

    fn build_api_url(&self, endpoint: &str, params: &[(&str, &str)]) -> Url {
        let mut url = self
            .api_base_url
            .join(endpoint)
            .unwrap_or_else(|_| self.api_base_url.clone());
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        url
    }

    async fn request_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &Url,
    ) -> Result<T, PlatformError> {
        let token = self.bearer_token().await?;
        let response = self
            .client
            .get(url.clone())
            .header("Client-Id", &self.client_id)
            .bearer_auth(token)
            .send()
            .await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| PlatformError::Deserialize {
            context: url.path().to_string(),
            source: e,
        })
    }
}

fn parse_base_url(raw: &str) -> Result<Url, PlatformError> {
    let normalised = format!("{}/", raw.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| PlatformError::Api(format!("invalid base URL '{raw}': {e}")))
}

fn channel_page_url(login: &str) -> String {
    format!("https://twitch.tv/{login}")
}

/// `search/channels` carries no bio, so the stream title stands in for the
/// description. Follower counts are not part of search results.
fn normalize_search_channel(channel: TwitchSearchChannel) -> CreatorSummary {
    CreatorSummary {
        platform: Platform::Twitch,
        url: channel_page_url(&channel.broadcaster_login),
        id: channel.id,
        name: channel.display_name,
        description: channel.title,
        thumbnail: channel.thumbnail_url,
        subscribers: None,
    }
}

fn normalize_user(user: TwitchUser, game: Option<String>, followers: Option<u64>) -> CreatorProfile {
    let links = extract_links(&user.description);
    CreatorProfile {
        platform: Platform::Twitch,
        url: channel_page_url(&user.login),
        verified: user.broadcaster_type == "partner",
        id: user.id,
        name: user.display_name,
        description: user.description,
        thumbnail: user.profile_image_url,
        banner: user.offline_image_url,
        subscribers: followers,
        views: user.view_count,
        videos: None,
        game,
        links,
        cross_platform_data: vec![],
    }
}
