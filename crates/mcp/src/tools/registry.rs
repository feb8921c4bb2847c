// Tool trait, registry, and the wrapping of upstream outcomes into results

use crate::protocol::{CallToolResult, JsonRpcError, ToolSchema};
use crate::tools::schema::ValidationError;
use crawleo_client::CrawleoResult;
use std::collections::HashMap;
use std::sync::Arc;

/// Failures that are reported as protocol errors instead of tool results.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments for tool {tool}: {source}")]
    InvalidArguments {
        tool: &'static str,
        #[source]
        source: ValidationError,
    },

    #[error("Failed to encode tool result: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ToolError> for JsonRpcError {
    fn from(err: ToolError) -> Self {
        match err {
            ToolError::UnknownTool(_) | ToolError::InvalidArguments { .. } => {
                JsonRpcError::invalid_params(err.to_string())
            }
            ToolError::Json(_) => JsonRpcError::internal_error(err.to_string()),
        }
    }
}

/// Tool executor trait
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool schema for MCP
    fn schema(&self) -> ToolSchema;

    /// Execute the tool with given arguments.
    ///
    /// Upstream failures come back as `Ok` results with `is_error` set;
    /// `Err` is reserved for calls that never reached the network.
    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult, ToolError>;
}

/// Turn the outcome of an upstream call into a tool result.
///
/// Errors are caught here and rendered as `"<context>: <message>"`.
pub fn wrap_outcome(
    context: &str,
    outcome: CrawleoResult<serde_json::Value>,
) -> Result<CallToolResult, ToolError> {
    match outcome {
        Ok(value) => Ok(CallToolResult::json(&value)?),
        Err(err) => {
            tracing::debug!(error = %err, "{}", context);
            Ok(CallToolResult::error(format!("{}: {}", context, err)))
        }
    }
}

/// Tool registry for managing available tools
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let schema = tool.schema();
        self.tools.insert(schema.name.clone(), tool);
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// List all tool schemas, sorted by name
    pub fn list_schemas(&self) -> Vec<ToolSchema> {
        let mut schemas: Vec<ToolSchema> = self.tools.values().map(|t| t.schema()).collect();
        schemas.sort_by(|a, b| a.name.cmp(&b.name));
        schemas
    }

    /// Check if a tool exists
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Route a call to the named tool.
    pub async fn call(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<CallToolResult, ToolError> {
        let tool = self
            .get(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
        tool.execute(arguments).await
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
