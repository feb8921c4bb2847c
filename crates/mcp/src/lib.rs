// MCP (Model Context Protocol) server exposing the Crawleo search and crawl
// endpoints as tools to agent clients (Claude Desktop, IDE agents, etc.)

pub mod codec;
pub mod protocol;
pub mod server;
pub mod tools;

pub use server::McpServer;
pub use tools::default_registry;
