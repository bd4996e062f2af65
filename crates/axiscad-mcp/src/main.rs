//! axiscad MCP Server Binary
//!
//! Runs the axiscad MCP server on stdio transport.
//!
//! ## Usage
//!
//! Run directly:
//! ```bash
//! axiscad-mcp --max-models 50
//! ```
//!
//! Or add to an MCP client configuration:
//! ```json
//! {
//!   "mcpServers": {
//!     "axiscad": {
//!       "command": "axiscad-mcp",
//!       "env": { "AXISCAD_DEBUG": "true" }
//!     }
//!   }
//! }
//! ```

use anyhow::Result;
use clap::Parser;
use rmcp::ServiceExt;
use rmcp::transport::io::stdio;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

use axiscad_mcp::AxiscadMcpService;
use axiscad_mcp::config::Cli;
use axiscad_mcp::state::CadState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Cli::parse().into_session_config();

    // CRITICAL: Log to stderr only - stdout is reserved for MCP JSON-RPC
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false);

    let default_level = if config.debug_mode { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(filter)
        .init();

    eprintln!("axiscad MCP server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        max_models = config.max_models,
        circle_segments = config.circle_segments,
        debug = config.debug_mode,
        "session configured"
    );

    let state = CadState::with_defaults(config);

    eprintln!("Ready. Listening on stdio...");

    let service = AxiscadMcpService::new(state);
    let server = service.serve(stdio()).await?;

    // Wait for client to disconnect or error
    server.waiting().await?;

    eprintln!("Client disconnected. Shutting down.");
    Ok(())
}
