//! HTTP transport layer for the Crawleo client.

use crate::config::ClientConfig;
use crate::error::{CrawleoError, CrawleoResult};
use crate::request::OutboundRequest;
use reqwest::{header, Client};
use std::sync::Arc;
use tracing::{debug, warn};

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// HTTP transport for making API requests.
///
/// Every call is a single attempt: no retries and no timeout beyond the
/// reqwest defaults.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: Arc<ClientConfig>,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given configuration.
    pub fn new(config: Arc<ClientConfig>) -> CrawleoResult<Self> {
        let mut api_key = header::HeaderValue::from_str(&config.api_key)
            .map_err(|_| CrawleoError::Config("Invalid API key format".to_string()))?;
        api_key.set_sensitive(true);

        let mut headers = header::HeaderMap::new();
        headers.insert(header::HeaderName::from_static(API_KEY_HEADER), api_key);

        let client = Client::builder()
            .user_agent(concat!("crawleo-client/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send the request and decode the JSON body of a successful response.
    pub async fn execute(&self, request: &OutboundRequest) -> CrawleoResult<serde_json::Value> {
        let url = self.config.endpoint_url(request.path)?;
        debug!(method = %request.method, url = %url, "API request");

        let mut builder = self.client.request(request.method.clone(), url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), path = request.path, "API request failed");
            return Err(CrawleoError::from_response(status.as_u16(), body));
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{CrawlRequest, SearchRequest};
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_transport(base_url: &str, api_key: &str) -> HttpTransport {
        let config = ClientConfig::new(api_key)
            .unwrap()
            .with_base_url(url::Url::parse(base_url).unwrap());
        HttpTransport::new(Arc::new(config)).unwrap()
    }

    #[tokio::test]
    async fn test_get_with_query_and_api_key() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .and(header("x-api-key", "ck-test"))
            .and(query_param("query", "rust"))
            .and(query_param("max_pages", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
            .expect(1)
            .mount(&server)
            .await;

        let transport = create_transport(&server.uri(), "ck-test");
        let result = transport
            .execute(&SearchRequest::new("rust").to_outbound())
            .await
            .unwrap();

        assert_eq!(result, json!({"results": []}));
    }

    #[tokio::test]
    async fn test_post_with_json_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/crawl"))
            .and(header("x-api-key", "ck-test"))
            .and(body_json(json!({
                "url": "https://example.com",
                "markdown": true,
                "raw_html": false,
                "enhanced_html": true
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"markdown": "# Example"})))
            .expect(1)
            .mount(&server)
            .await;

        let transport = create_transport(&server.uri(), "ck-test");
        let outbound = CrawlRequest::new("https://example.com").to_outbound().unwrap();
        let result = transport.execute(&outbound).await.unwrap();

        assert_eq!(result["markdown"], "# Example");
    }

    #[tokio::test]
    async fn test_base_path_is_preserved() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let transport = create_transport(&format!("{}/api/v1", server.uri()), "k");
        transport
            .execute(&SearchRequest::new("q").to_outbound())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_error_on_500_carries_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(500).set_body_string("server error"))
            .expect(1)
            .mount(&server)
            .await;

        let transport = create_transport(&server.uri(), "k");
        let err = transport
            .execute(&SearchRequest::new("q").to_outbound())
            .await
            .unwrap_err();

        match &err {
            CrawleoError::Api { status, body } => {
                assert_eq!(*status, 500);
                assert_eq!(body, "server error");
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
        assert_eq!(err.to_string(), "API request failed: 500 - server error");
    }

    #[tokio::test]
    async fn test_no_retry_on_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/crawl"))
            .respond_with(ResponseTemplate::new(503).set_body_string("busy"))
            .expect(1)
            .mount(&server)
            .await;

        let transport = create_transport(&server.uri(), "k");
        let outbound = CrawlRequest::new("https://example.com").to_outbound().unwrap();
        let err = transport.execute(&outbound).await.unwrap_err();

        assert_eq!(err.status(), Some(503));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_http_error() {
        // Port 1 on loopback refuses connections.
        let transport = create_transport("http://127.0.0.1:1", "k");
        let err = transport
            .execute(&SearchRequest::new("q").to_outbound())
            .await
            .unwrap_err();

        assert!(matches!(err, CrawleoError::Http(_)));
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn test_invalid_api_key_is_config_error() {
        let config = ClientConfig::new("bad\nkey").unwrap();
        let err = HttpTransport::new(Arc::new(config)).unwrap_err();

        assert!(matches!(err, CrawleoError::Config(_)));
    }
}
