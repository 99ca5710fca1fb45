mod api;
mod middleware;
mod service;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use creatordb_platforms::{TwitchClient, YouTubeClient};
use creatordb_store::StoreClient;

use crate::api::{build_app, AppState};
use crate::service::Aggregation;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = creatordb_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let youtube_configured = config.youtube_api_key.is_some();
    if !youtube_configured {
        tracing::warn!("YOUTUBE_API_KEY not set; youtube searches will return no results");
    }
    let twitch_configured = config.twitch_client_id.is_some() && config.twitch_client_secret.is_some();
    if !twitch_configured {
        tracing::warn!(
            "TWITCH_CLIENT_ID/TWITCH_CLIENT_SECRET not set; twitch searches will return no results"
        );
    }

    let youtube = YouTubeClient::new(
        config.youtube_api_key.as_deref().unwrap_or_default(),
        config.http_timeout_secs,
    )?;
    let twitch = TwitchClient::new(
        config.twitch_client_id.as_deref().unwrap_or_default(),
        config.twitch_client_secret.as_deref().unwrap_or_default(),
        config.http_timeout_secs,
    )?;
    let store = StoreClient::new(
        &config.store_url,
        &config.store_api_key,
        &config.store_data_source,
        &config.store_database,
        &config.store_collection,
        config.http_timeout_secs,
    )?;

    let state = AppState {
        service: Arc::new(Aggregation::new(youtube, twitch, store)),
        youtube_configured,
        twitch_configured,
    };
    let app = build_app(state);

    tracing::info!(addr = %config.bind_addr, env = %config.env, "starting creatordb server");
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
