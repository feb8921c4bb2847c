//! Transport layer for the Crawleo client.

pub mod http;

pub use http::HttpTransport;
