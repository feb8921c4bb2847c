//! Request records for the two Crawleo endpoints and the outbound request
//! they turn into.

use reqwest::Method;
use serde::{Deserialize, Serialize};

pub const SEARCH_PATH: &str = "search";
pub const CRAWL_PATH: &str = "crawl";

pub const DEFAULT_MAX_PAGES: i64 = 1;
pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_ENHANCED_HTML: bool = true;
pub const DEFAULT_RAW_HTML: bool = false;
pub const DEFAULT_PAGE_TEXT: bool = false;
pub const DEFAULT_MARKDOWN: bool = true;

/// Geo location the search is simulated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Geolocation {
    #[default]
    Random,
    Pl,
    Gb,
    Jp,
    De,
    Fr,
    Es,
    Us,
}

impl Geolocation {
    pub const ALL: [Geolocation; 8] = [
        Self::Random,
        Self::Pl,
        Self::Gb,
        Self::Jp,
        Self::De,
        Self::Fr,
        Self::Es,
        Self::Us,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Pl => "pl",
            Self::Gb => "gb",
            Self::Jp => "jp",
            Self::De => "de",
            Self::Fr => "fr",
            Self::Es => "es",
            Self::Us => "us",
        }
    }
}

/// Device the search is simulated on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    #[default]
    Desktop,
    Mobile,
    Tablet,
}

impl Device {
    pub const ALL: [Device; 3] = [Self::Desktop, Self::Mobile, Self::Tablet];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Desktop => "desktop",
            Self::Mobile => "mobile",
            Self::Tablet => "tablet",
        }
    }
}

/// Fully resolved arguments of a web search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub max_pages: i64,
    #[serde(rename = "setLang")]
    pub set_lang: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cc: Option<String>,
    pub geolocation: Geolocation,
    pub device: Device,
    pub enhanced_html: bool,
    pub raw_html: bool,
    pub page_text: bool,
    pub markdown: bool,
}

impl SearchRequest {
    /// A search for `query` with every option at its default.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            max_pages: DEFAULT_MAX_PAGES,
            set_lang: DEFAULT_LANGUAGE.to_string(),
            cc: None,
            geolocation: Geolocation::default(),
            device: Device::default(),
            enhanced_html: DEFAULT_ENHANCED_HTML,
            raw_html: DEFAULT_RAW_HTML,
            page_text: DEFAULT_PAGE_TEXT,
            markdown: DEFAULT_MARKDOWN,
        }
    }

    /// Query-string entries in wire order. `cc` is left out when unset.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("query", self.query.clone()),
            ("max_pages", self.max_pages.to_string()),
            ("setLang", self.set_lang.clone()),
        ];
        if let Some(cc) = &self.cc {
            pairs.push(("cc", cc.clone()));
        }
        pairs.extend([
            ("geolocation", self.geolocation.as_str().to_string()),
            ("device", self.device.as_str().to_string()),
            ("enhanced_html", self.enhanced_html.to_string()),
            ("raw_html", self.raw_html.to_string()),
            ("page_text", self.page_text.to_string()),
            ("markdown", self.markdown.to_string()),
        ]);
        pairs
    }

    pub fn to_outbound(&self) -> OutboundRequest {
        OutboundRequest {
            method: Method::GET,
            path: SEARCH_PATH,
            query: self.query_pairs(),
            body: None,
        }
    }
}

/// Fully resolved arguments of a single-page crawl.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrawlRequest {
    pub url: String,
    pub markdown: bool,
    pub raw_html: bool,
    pub enhanced_html: bool,
}

impl CrawlRequest {
    /// A crawl of `url` with every option at its default.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            markdown: DEFAULT_MARKDOWN,
            raw_html: DEFAULT_RAW_HTML,
            enhanced_html: DEFAULT_ENHANCED_HTML,
        }
    }

    pub fn to_outbound(&self) -> serde_json::Result<OutboundRequest> {
        Ok(OutboundRequest {
            method: Method::POST,
            path: CRAWL_PATH,
            query: Vec::new(),
            body: Some(serde_json::to_value(self)?),
        })
    }
}

/// One HTTP call to the API, built fresh per tool call.
///
/// The `x-api-key` header is not part of the record; the transport attaches
/// it to every request it sends.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundRequest {
    pub method: Method,
    /// Endpoint below the base URL.
    pub path: &'static str,
    pub query: Vec<(&'static str, String)>,
    pub body: Option<serde_json::Value>,
}
