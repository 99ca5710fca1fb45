use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::api::AppState;
use crate::service::{
    CreatorStore, PlatformClient, ADVANCED_SEARCH_DEFAULT_LIMIT, LIVE_SEARCH_DEFAULT_LIMIT,
};

#[derive(Debug, Deserialize)]
pub struct LiveSearchParams {
    #[serde(default)]
    q: String,
    limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct AdvancedSearchParams {
    #[serde(default)]
    q: String,
    page: Option<u32>,
    limit: Option<u32>,
}

/// Cache-only typeahead search: `{"creators": [...]}`. A missing or short
/// `q` yields an empty list, never an error.
pub async fn live_search<Y, T, S>(
    State(state): State<AppState<Y, T, S>>,
    Query(params): Query<LiveSearchParams>,
) -> Json<serde_json::Value>
where
    Y: PlatformClient + 'static,
    T: PlatformClient + 'static,
    S: CreatorStore + 'static,
{
    let limit = params.limit.unwrap_or(LIVE_SEARCH_DEFAULT_LIMIT);
    let creators = state.service.live_search(&params.q, limit).await;
    Json(json!({ "creators": creators }))
}

/// Multi-platform fan-out search: `{"results": [...]}`.
pub async fn advanced_search<Y, T, S>(
    State(state): State<AppState<Y, T, S>>,
    Query(params): Query<AdvancedSearchParams>,
) -> Json<serde_json::Value>
where
    Y: PlatformClient + 'static,
    T: PlatformClient + 'static,
    S: CreatorStore + 'static,
{
    let page = params.page.unwrap_or(1);
    let limit = params.limit.unwrap_or(ADVANCED_SEARCH_DEFAULT_LIMIT);
    let results = state.service.advanced_search(&params.q, page, limit).await;
    Json(json!({ "results": results }))
}
