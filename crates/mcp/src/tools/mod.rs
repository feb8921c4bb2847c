pub mod crawl;
pub mod registry;
pub mod schema;
pub mod search;

pub use crawl::{CrawlWebTool, CRAWL_TOOL_NAME};
pub use registry::{wrap_outcome, Tool, ToolError, ToolRegistry};
pub use schema::{ArgSchema, FieldKind, FieldSpec, ValidationError};
pub use search::{SearchWebTool, SEARCH_TOOL_NAME};

use crawleo_client::CrawleoClient;
use std::sync::Arc;

/// Registry holding `search_web` and `crawl_web`, sharing one client.
pub fn default_registry(client: CrawleoClient) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(SearchWebTool::new(client.clone())));
    registry.register(Arc::new(CrawlWebTool::new(client)));
    registry
}
