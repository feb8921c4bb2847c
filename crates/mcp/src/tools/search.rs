// Web search tool backed by GET /search

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::registry::{wrap_outcome, Tool, ToolError};
use crate::tools::schema::{ArgSchema, FieldKind, FieldSpec};
use crawleo_client::request::{
    DEFAULT_ENHANCED_HTML, DEFAULT_LANGUAGE, DEFAULT_MARKDOWN, DEFAULT_MAX_PAGES,
    DEFAULT_PAGE_TEXT, DEFAULT_RAW_HTML,
};
use crawleo_client::{CrawleoClient, Device, Geolocation, SearchRequest};

pub const SEARCH_TOOL_NAME: &str = "search_web";

/// Tool to search the web through Crawleo
pub struct SearchWebTool {
    client: CrawleoClient,
    args: ArgSchema,
}

impl SearchWebTool {
    pub fn new(client: CrawleoClient) -> Self {
        Self {
            client,
            args: search_args(),
        }
    }
}

fn search_args() -> ArgSchema {
    ArgSchema::new(vec![
        FieldSpec::required(
            "query",
            FieldKind::String,
            "Search query term. The main keyword or phrase to search for.",
        ),
        FieldSpec::optional(
            "max_pages",
            FieldKind::Integer,
            "Max result pages to crawl. Each page costs 1 credit. Min: 1",
        )
        .with_default(DEFAULT_MAX_PAGES),
        FieldSpec::optional(
            "setLang",
            FieldKind::String,
            "Language code for search interface (e.g., 'en', 'es', 'fr', 'ar')",
        )
        .with_default(DEFAULT_LANGUAGE),
        FieldSpec::optional(
            "cc",
            FieldKind::String,
            "Country code for search results (e.g., 'US', 'GB', 'DE', 'EG')",
        ),
        FieldSpec::optional(
            "geolocation",
            FieldKind::Enum(Geolocation::ALL.iter().map(|g| g.as_str()).collect()),
            "Geo location for search",
        )
        .with_default(Geolocation::default().as_str()),
        FieldSpec::optional(
            "device",
            FieldKind::Enum(Device::ALL.iter().map(|d| d.as_str()).collect()),
            "Device simulation",
        )
        .with_default(Device::default().as_str()),
        FieldSpec::optional(
            "enhanced_html",
            FieldKind::Boolean,
            "Return AI-enhanced, cleaned HTML optimized for processing",
        )
        .with_default(DEFAULT_ENHANCED_HTML),
        FieldSpec::optional(
            "raw_html",
            FieldKind::Boolean,
            "Return original, unprocessed HTML of the page",
        )
        .with_default(DEFAULT_RAW_HTML),
        FieldSpec::optional(
            "page_text",
            FieldKind::Boolean,
            "Return extracted plain text without HTML tags",
        )
        .with_default(DEFAULT_PAGE_TEXT),
        FieldSpec::optional(
            "markdown",
            FieldKind::Boolean,
            "Return content in Markdown format for easy parsing",
        )
        .with_default(DEFAULT_MARKDOWN),
    ])
}

#[async_trait::async_trait]
impl Tool for SearchWebTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: SEARCH_TOOL_NAME.to_string(),
            description: "Search the web using Crawleo's AI-powered search engine. Returns results with optional AI-enhanced HTML, markdown content, and structured data.".to_string(),
            input_schema: self.args.to_json_schema(),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult, ToolError> {
        let request: SearchRequest =
            self.args
                .parse(&arguments)
                .map_err(|source| ToolError::InvalidArguments {
                    tool: SEARCH_TOOL_NAME,
                    source,
                })?;

        tracing::debug!(query = %request.query, max_pages = request.max_pages, "search_web");
        wrap_outcome("Error performing search", self.client.search(&request).await)
    }
}
