mod creator;
mod diag;
mod search;

use std::sync::Arc;

use axum::{
    http::{header, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::middleware::request_id;
use crate::service::{Aggregation, CreatorStore, PlatformClient};

/// Shared handler state: the aggregation service plus which adapters were
/// given credentials at startup (for the diagnostics endpoints).
pub struct AppState<Y, T, S> {
    pub service: Arc<Aggregation<Y, T, S>>,
    pub youtube_configured: bool,
    pub twitch_configured: bool,
}

impl<Y, T, S> Clone for AppState<Y, T, S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            youtube_configured: self.youtube_configured,
            twitch_configured: self.twitch_configured,
        }
    }
}

/// Minimal JSON error body: `{"error": "<message>"}` with the right status.
/// Internal detail is logged server-side, never leaked into the body.
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "Internal server error".to_string(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// Wildcard-origin CORS for every route; this is a public read API with no
/// authentication, so preflights only need the read verbs.
fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

pub fn build_app<Y, T, S>(state: AppState<Y, T, S>) -> Router
where
    Y: PlatformClient + 'static,
    T: PlatformClient + 'static,
    S: CreatorStore + 'static,
{
    Router::new()
        .route("/health", get(health))
        .route("/api/db/status", get(diag::db_status))
        .route("/api/db/stats", get(diag::db_stats))
        .route("/api/status/{platform}", get(diag::platform_status))
        .route("/api/quota/{platform}", get(diag::platform_quota))
        .route("/api/search/live", get(search::live_search))
        .route("/api/search/advanced", get(search::advanced_search))
        // The creator-detail pattern rejects malformed paths itself instead
        // of falling through to the index.
        .route("/api/creator", get(creator::invalid_path))
        .route("/api/creator/{*path}", get(creator::get_creator))
        .fallback(index)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "timestamp": Utc::now(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Unmatched paths answer with a JSON description of the API rather than a
/// bare 404, so the root URL doubles as discovery.
async fn index() -> Json<serde_json::Value> {
    Json(json!({
        "name": "creatordb",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "GET /health",
            "GET /api/db/status",
            "GET /api/db/stats",
            "GET /api/status/{youtube|twitch}",
            "GET /api/quota/{youtube|twitch}",
            "GET /api/search/live?q=&limit=",
            "GET /api/search/advanced?q=&page=&limit=",
            "GET /api/creator/{platform}/{id}",
        ],
    }))
}
