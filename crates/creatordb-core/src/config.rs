use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let store_url = require("CREATORDB_STORE_URL")?;
    let store_api_key = require("CREATORDB_STORE_API_KEY")?;

    let env = parse_environment(&or_default("CREATORDB_ENV", "development"));

    let bind_addr = parse_addr("CREATORDB_BIND_ADDR", "0.0.0.0:8787")?;
    let log_level = or_default("CREATORDB_LOG_LEVEL", "info");

    let youtube_api_key = lookup("YOUTUBE_API_KEY").ok();
    let twitch_client_id = lookup("TWITCH_CLIENT_ID").ok();
    let twitch_client_secret = lookup("TWITCH_CLIENT_SECRET").ok();

    let store_data_source = or_default("CREATORDB_STORE_DATA_SOURCE", "Cluster0");
    let store_database = or_default("CREATORDB_STORE_DATABASE", "creatordb");
    let store_collection = or_default("CREATORDB_STORE_COLLECTION", "creators");

    let http_timeout_secs = parse_u64("CREATORDB_HTTP_TIMEOUT_SECS", "30")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        youtube_api_key,
        twitch_client_id,
        twitch_client_secret,
        store_url,
        store_api_key,
        store_data_source,
        store_database,
        store_collection,
        http_timeout_secs,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
