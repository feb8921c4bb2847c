// Single-page crawl tool backed by POST /crawl

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::registry::{wrap_outcome, Tool, ToolError};
use crate::tools::schema::{ArgSchema, FieldKind, FieldSpec};
use crawleo_client::request::{DEFAULT_ENHANCED_HTML, DEFAULT_MARKDOWN, DEFAULT_RAW_HTML};
use crawleo_client::{CrawlRequest, CrawleoClient};

pub const CRAWL_TOOL_NAME: &str = "crawl_web";

/// Tool to crawl one page through Crawleo
pub struct CrawlWebTool {
    client: CrawleoClient,
    args: ArgSchema,
}

impl CrawlWebTool {
    pub fn new(client: CrawleoClient) -> Self {
        Self {
            client,
            args: crawl_args(),
        }
    }
}

fn crawl_args() -> ArgSchema {
    ArgSchema::new(vec![
        FieldSpec::required(
            "url",
            FieldKind::String,
            "URL to crawl and extract content from",
        ),
        FieldSpec::optional(
            "markdown",
            FieldKind::Boolean,
            "Return content in Markdown format",
        )
        .with_default(DEFAULT_MARKDOWN),
        FieldSpec::optional(
            "raw_html",
            FieldKind::Boolean,
            "Return original, unprocessed HTML",
        )
        .with_default(DEFAULT_RAW_HTML),
        FieldSpec::optional(
            "enhanced_html",
            FieldKind::Boolean,
            "Return AI-enhanced, cleaned HTML",
        )
        .with_default(DEFAULT_ENHANCED_HTML),
    ])
}

#[async_trait::async_trait]
impl Tool for CrawlWebTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: CRAWL_TOOL_NAME.to_string(),
            description: "Crawl a specific webpage and extract its content in various formats including Markdown, raw HTML, and AI-enhanced HTML.".to_string(),
            input_schema: self.args.to_json_schema(),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult, ToolError> {
        let request: CrawlRequest =
            self.args
                .parse(&arguments)
                .map_err(|source| ToolError::InvalidArguments {
                    tool: CRAWL_TOOL_NAME,
                    source,
                })?;

        tracing::debug!(url = %request.url, "crawl_web");
        wrap_outcome("Error crawling URL", self.client.crawl(&request).await)
    }
}
