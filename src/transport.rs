//! Serving the MCP server over the configured transport.

use std::net::SocketAddr;

use axum::Router;
use miette::Diagnostic;
use rmcp::ServiceExt;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::client::{ClientError, HttpClient, RateGate};
use crate::config::{Config, Transport};
use crate::mcp::{McpServer, create_mcp_service};
use crate::services::ServiceContext;

#[derive(Error, Diagnostic, Debug)]
pub enum TransportError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Client(#[from] ClientError),

    #[error("Failed to bind {addr}: {source}")]
    #[diagnostic(code(psa_mcp::transport::bind))]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP server error: {0}")]
    #[diagnostic(code(psa_mcp::transport::http))]
    Http(#[source] std::io::Error),

    #[error("MCP session error: {0}")]
    #[diagnostic(code(psa_mcp::transport::session))]
    Session(String),
}

/// Build the shared context and serve until the client disconnects or Ctrl-C.
pub async fn run(config: Config) -> Result<(), TransportError> {
    let client = HttpClient::new(&config.client)?;
    let cancellation = CancellationToken::new();
    let ctx = ServiceContext::new(client, RateGate::per_second(config.rate_limit))
        .with_cancellation(cancellation.clone());

    info!(
        api_url = %config.client.base_url,
        transport = ?config.transport,
        rate_limit = config.rate_limit.get(),
        "Starting PSA MCP server"
    );

    tokio::spawn(cancel_on_ctrl_c(cancellation.clone()));

    match config.transport {
        Transport::Stdio => serve_stdio(McpServer::new(ctx), cancellation).await,
        Transport::Http => {
            let addr = SocketAddr::new(config.host, config.port);
            serve_http(ctx, addr, cancellation).await
        }
    }
}

async fn serve_stdio(
    server: McpServer<HttpClient>,
    cancellation: CancellationToken,
) -> Result<(), TransportError> {
    let service = server
        .serve(rmcp::transport::stdio())
        .await
        .map_err(|e| TransportError::Session(e.to_string()))?;
    info!("MCP server running on stdio");

    tokio::select! {
        quit = service.waiting() => {
            quit.map_err(|e| TransportError::Session(e.to_string()))?;
        }
        _ = cancellation.cancelled() => {
            info!("Shutting down");
        }
    }
    Ok(())
}

async fn serve_http(
    ctx: ServiceContext<HttpClient>,
    addr: SocketAddr,
    cancellation: CancellationToken,
) -> Result<(), TransportError> {
    let app = Router::new()
        .nest_service("/mcp", create_mcp_service(ctx, cancellation.child_token()))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| TransportError::Bind { addr, source })?;
    info!("MCP server listening on http://{}/mcp", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { cancellation.cancelled().await })
        .await
        .map_err(TransportError::Http)
}

async fn cancel_on_ctrl_c(cancellation: CancellationToken) {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Received Ctrl-C");
        cancellation.cancel();
    }
}
