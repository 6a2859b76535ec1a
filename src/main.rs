use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod core;
mod mcp;

/// MCP server that searches a file for a keyword and returns matching lines
/// with their line numbers. Speaks JSON-RPC over stdio; takes no flags.
#[derive(Parser)]
#[command(name = "file-search-mcp", version)]
#[command(about = "File keyword search exposed as an MCP tool over stdio")]
struct Cli {}

fn main() -> Result<()> {
    Cli::parse();

    // Stdout is the protocol channel, so logs must go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut server = mcp::McpServer::new();
    server.run()
}
