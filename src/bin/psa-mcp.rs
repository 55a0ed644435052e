//! PSA MCP server binary.
//!
//! Parses and validates configuration, then hands off to the transport layer.

use clap::Parser;
use psa_mcp::config::{Cli, Config};
use psa_mcp::transport;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing subscriber with env filter
///
/// Logs go to stderr: on the stdio transport stdout carries protocol frames.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "psa_mcp=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = Config::try_from(cli)?;
    transport::run(config).await?;

    Ok(())
}
