// Standalone MCP server binary

use anyhow::Result;
use crawleo_client::{ClientConfig, CrawleoClient, CrawleoError};
use crawleo_mcp::{default_registry, McpServer};

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the protocol, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(CrawleoError::Config(message)) => {
            eprintln!("Error: {}", message);
            eprintln!("Get your API key at https://crawleo.dev");
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    let client = CrawleoClient::from_config(config)?;
    let registry = default_registry(client);

    tracing::info!("Registered {} tools", registry.len());

    let server = McpServer::new(registry);
    tracing::info!("Crawleo MCP server running on stdio");
    server.start().await?;

    Ok(())
}
