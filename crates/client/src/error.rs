//! Error types for the Crawleo client.

/// Result type for client operations.
pub type CrawleoResult<T> = Result<T, CrawleoError>;

/// Error types that can occur when talking to the Crawleo API.
#[derive(Debug, thiserror::Error)]
pub enum CrawleoError {
    /// The API answered with a non-success status.
    #[error("API request failed: {status} - {body}")]
    Api { status: u16, body: String },

    /// The request never completed (connect, TLS, body decode, ...).
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// Serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl CrawleoError {
    /// Create an API error from a status code and response body.
    pub fn from_response(status: u16, body: impl Into<String>) -> Self {
        Self::Api {
            status,
            body: body.into(),
        }
    }

    /// HTTP status of an upstream rejection, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
