//! Configuration types for the Crawleo client.

use crate::error::{CrawleoError, CrawleoResult};
use url::Url;

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://api.crawleo.dev/api/v1";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "CRAWLEO_API_KEY";

/// Configuration for the Crawleo client.
///
/// Built once at startup and shared read-only by every request.
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL of the Crawleo API, endpoints are appended as path segments.
    pub base_url: Url,
    /// API key sent as `x-api-key` on every request.
    pub api_key: String,
}

impl ClientConfig {
    /// Create a configuration for the production API.
    pub fn new(api_key: impl Into<String>) -> CrawleoResult<Self> {
        Ok(Self {
            base_url: Url::parse(DEFAULT_BASE_URL)?,
            api_key: api_key.into(),
        })
    }

    /// Read the API key from `CRAWLEO_API_KEY`.
    pub fn from_env() -> CrawleoResult<Self> {
        Self::from_api_key_var(std::env::var(API_KEY_ENV).ok())
    }

    /// Same as [`ClientConfig::from_env`] with the variable's value passed in.
    /// An empty value counts as unset.
    pub fn from_api_key_var(value: Option<String>) -> CrawleoResult<Self> {
        match value {
            Some(key) if !key.is_empty() => Self::new(key),
            _ => Err(CrawleoError::Config(format!(
                "{} environment variable is required",
                API_KEY_ENV
            ))),
        }
    }

    /// Point the client at a different API root.
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    /// URL of an endpoint below the base URL.
    ///
    /// `Url::join` would replace the last segment of `.../api/v1`, so the
    /// endpoint is pushed as a new segment instead.
    pub fn endpoint_url(&self, endpoint: &str) -> CrawleoResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                CrawleoError::Config(format!("base URL cannot be a base: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(endpoint.split('/').filter(|s| !s.is_empty()));
        Ok(url)
    }
}

// Keep the key out of debug output.
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .finish()
    }
}
