use axum::extract::{Path, State};
use axum::Json;
use serde_json::json;

use creatordb_core::creators::Platform;

use crate::api::{ApiError, AppState};
use crate::service::{CreatorStore, GetCreatorError, PlatformClient};

/// `GET /api/creator/{platform}/{id}` → `{"creator": {...}}`.
///
/// The route captures the whole remainder so that malformed shapes
/// (`/api/creator/youtube`, `/api/creator/youtube/`) get an explicit 400
/// instead of falling through to the index payload.
pub async fn get_creator<Y, T, S>(
    State(state): State<AppState<Y, T, S>>,
    Path(path): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError>
where
    Y: PlatformClient + 'static,
    T: PlatformClient + 'static,
    S: CreatorStore + 'static,
{
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let &[platform_raw, id] = segments.as_slice() else {
        return Err(ApiError::bad_request("Invalid creator path"));
    };

    let Ok(platform) = platform_raw.parse::<Platform>() else {
        return Err(ApiError::bad_request("Unsupported platform"));
    };

    match state.service.get_creator(platform, id).await {
        Ok(creator) => Ok(Json(json!({ "creator": creator }))),
        Err(GetCreatorError::NotFound) => Err(ApiError::not_found("Creator not found")),
        Err(GetCreatorError::Store(e)) => {
            tracing::error!(error = %e, %platform, creator_id = id, "creator lookup failed");
            Err(ApiError::internal())
        }
    }
}

/// `/api/creator` with no platform/id segments at all.
pub async fn invalid_path() -> ApiError {
    ApiError::bad_request("Invalid creator path")
}
