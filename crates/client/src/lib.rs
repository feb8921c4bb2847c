//! # Crawleo Client
//!
//! Typed client for the Crawleo web search and crawl API.
//!
//! ```rust,no_run
//! use crawleo_client::{CrawleoClient, CrawleoResult, SearchRequest};
//!
//! # async fn example() -> CrawleoResult<()> {
//! let client = CrawleoClient::builder().api_key("your-api-key").build()?;
//!
//! let results = client.search(&SearchRequest::new("rust async runtimes")).await?;
//! println!("{}", serde_json::to_string_pretty(&results)?);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod request;
pub mod transport;

pub use client::{CrawleoClient, CrawleoClientBuilder};
pub use config::{ClientConfig, API_KEY_ENV, DEFAULT_BASE_URL};
pub use error::{CrawleoError, CrawleoResult};
pub use request::{CrawlRequest, Device, Geolocation, OutboundRequest, SearchRequest};
