use thiserror::Error;

/// Errors raised by the platform HTTP clients.
///
/// These stay internal to the adapter layer: the public search/details
/// methods catch them, log, and return empty results.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// Network or TLS failure, or a non-2xx HTTP status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The platform API answered but with an unusable payload.
    #[error("platform API error: {0}")]
    Api(String),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
