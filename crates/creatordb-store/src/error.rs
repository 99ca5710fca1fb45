use thiserror::Error;

/// Errors returned by the cache store gateway.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The data API answered with a non-2xx status.
    #[error("unexpected HTTP status {status} from store: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// The response body could not be deserialized into the expected shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The store base URL could not be parsed.
    #[error("invalid store URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}
