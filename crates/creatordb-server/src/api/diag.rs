//! Diagnostics: store connectivity, collection size, and per-platform
//! adapter status/quota stubs.

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use serde_json::json;

use creatordb_core::creators::Platform;

use crate::api::{ApiError, AppState};
use crate::service::{CreatorStore, PlatformClient};

/// Store connectivity probe (a 1-document find).
pub async fn db_status<Y, T, S>(
    State(state): State<AppState<Y, T, S>>,
) -> Json<serde_json::Value>
where
    Y: PlatformClient + 'static,
    T: PlatformClient + 'static,
    S: CreatorStore + 'static,
{
    let connected = state.service.store_reachable().await;
    Json(json!({ "connected": connected, "timestamp": Utc::now() }))
}

/// Cached document count.
pub async fn db_stats<Y, T, S>(
    State(state): State<AppState<Y, T, S>>,
) -> Result<Json<serde_json::Value>, ApiError>
where
    Y: PlatformClient + 'static,
    T: PlatformClient + 'static,
    S: CreatorStore + 'static,
{
    match state.service.store_document_count().await {
        Ok(count) => Ok(Json(json!({ "creators": count, "timestamp": Utc::now() }))),
        Err(e) => {
            tracing::warn!(error = %e, "db stats probe failed");
            Err(ApiError::unavailable("Cache store unavailable"))
        }
    }
}

/// Whether the adapter for `platform` has credentials configured.
pub async fn platform_status<Y, T, S>(
    State(state): State<AppState<Y, T, S>>,
    Path(platform): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError>
where
    Y: PlatformClient + 'static,
    T: PlatformClient + 'static,
    S: CreatorStore + 'static,
{
    let platform = parse_platform(&platform)?;
    let configured = match platform {
        Platform::Youtube => state.youtube_configured,
        Platform::Twitch => state.twitch_configured,
        Platform::Unknown => false,
    };

    Ok(Json(json!({
        "platform": platform,
        "configured": configured,
        "status": if configured { "ok" } else { "unconfigured" },
        "timestamp": Utc::now(),
    })))
}

/// Quota placeholders: neither upstream exposes remaining quota over its
/// public API surface.
pub async fn platform_quota(Path(platform): Path<String>) -> Result<Json<serde_json::Value>, ApiError> {
    let platform = parse_platform(&platform)?;
    Ok(Json(json!({
        "platform": platform,
        "quota": {
            "limit": "unknown",
            "used": "unknown",
            "remaining": "unknown",
        },
    })))
}

fn parse_platform(raw: &str) -> Result<Platform, ApiError> {
    raw.parse::<Platform>()
        .map_err(|()| ApiError::bad_request("Unsupported platform"))
}
