//! Main client for the Crawleo API.

use crate::config::ClientConfig;
use crate::error::{CrawleoError, CrawleoResult};
use crate::request::{CrawlRequest, SearchRequest};
use crate::transport::HttpTransport;
use std::sync::Arc;
use url::Url;

/// Client for the Crawleo search and crawl endpoints.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct CrawleoClient {
    http: HttpTransport,
}

impl CrawleoClient {
    /// Create a new client builder.
    pub fn builder() -> CrawleoClientBuilder {
        CrawleoClientBuilder::new()
    }

    /// Create a client from configuration.
    pub fn from_config(config: ClientConfig) -> CrawleoResult<Self> {
        let http = HttpTransport::new(Arc::new(config))?;
        Ok(Self { http })
    }

    pub fn config(&self) -> &ClientConfig {
        self.http.config()
    }

    /// `GET /search` with every argument in the query string.
    pub async fn search(&self, request: &SearchRequest) -> CrawleoResult<serde_json::Value> {
        self.http.execute(&request.to_outbound()).await
    }

    /// `POST /crawl` with the arguments as JSON body.
    pub async fn crawl(&self, request: &CrawlRequest) -> CrawleoResult<serde_json::Value> {
        self.http.execute(&request.to_outbound()?).await
    }
}

/// Builder for creating a CrawleoClient.
#[derive(Default)]
pub struct CrawleoClientBuilder {
    base_url: Option<String>,
    api_key: Option<String>,
}

impl CrawleoClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the API root (defaults to the production API).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> CrawleoResult<CrawleoClient> {
        let api_key = self
            .api_key
            .ok_or_else(|| CrawleoError::Config("api_key is required".to_string()))?;

        let mut config = ClientConfig::new(api_key)?;
        if let Some(base_url) = self.base_url {
            config = config.with_base_url(Url::parse(&base_url)?);
        }

        CrawleoClient::from_config(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_BASE_URL;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_builder_requires_api_key() {
        let err = CrawleoClient::builder().build().unwrap_err();
        assert!(matches!(err, CrawleoError::Config(_)));
    }

    #[test]
    fn test_builder_defaults_to_production() {
        let client = CrawleoClient::builder().api_key("k").build().unwrap();
        assert_eq!(client.config().base_url.as_str(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_builder_rejects_bad_url() {
        let err = CrawleoClient::builder()
            .api_key("k")
            .base_url("not a url")
            .build()
            .unwrap_err();
        assert!(matches!(err, CrawleoError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn test_search_sends_every_field_except_unset_cc() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("query", "rust"))
            .and(query_param("max_pages", "1"))
            .and(query_param("setLang", "en"))
            .and(query_param("geolocation", "random"))
            .and(query_param("device", "desktop"))
            .and(query_param("enhanced_html", "true"))
            .and(query_param("raw_html", "false"))
            .and(query_param("page_text", "false"))
            .and(query_param("markdown", "true"))
            .and(query_param_is_missing("cc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
            .expect(1)
            .mount(&server)
            .await;

        let client = CrawleoClient::builder()
            .api_key("k")
            .base_url(server.uri())
            .build()
            .unwrap();
        let result = client.search(&SearchRequest::new("rust")).await.unwrap();

        assert_eq!(result, json!({"results": []}));
    }

    #[tokio::test]
    async fn test_repeated_search_is_not_cached() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
            .expect(2)
            .mount(&server)
            .await;

        let client = CrawleoClient::builder()
            .api_key("k")
            .base_url(server.uri())
            .build()
            .unwrap();
        let request = SearchRequest::new("same query");

        client.search(&request).await.unwrap();
        client.search(&request).await.unwrap();
    }

    #[tokio::test]
    async fn test_crawl_error_status() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/crawl"))
            .respond_with(ResponseTemplate::new(404).set_body_string("page not found"))
            .mount(&server)
            .await;

        let client = CrawleoClient::builder()
            .api_key("k")
            .base_url(server.uri())
            .build()
            .unwrap();
        let err = client
            .crawl(&CrawlRequest::new("https://example.com/missing"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "API request failed: 404 - page not found");
    }
}
