use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub youtube_api_key: Option<String>,
    pub twitch_client_id: Option<String>,
    pub twitch_client_secret: Option<String>,
    pub store_url: String,
    pub store_api_key: String,
    pub store_data_source: String,
    pub store_database: String,
    pub store_collection: String,
    pub http_timeout_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field(
                "youtube_api_key",
                &self.youtube_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "twitch_client_id",
                &self.twitch_client_id.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "twitch_client_secret",
                &self.twitch_client_secret.as_ref().map(|_| "[redacted]"),
            )
            .field("store_url", &self.store_url)
            .field("store_api_key", &"[redacted]")
            .field("store_data_source", &self.store_data_source)
            .field("store_database", &self.store_database)
            .field("store_collection", &self.store_collection)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .finish()
    }
}
