pub mod app_config;
mod config;
pub mod creators;
pub mod links;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::load_app_config;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
