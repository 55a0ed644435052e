//! MCP Streamable HTTP service creation
//!
//! Builds the service that the HTTP transport nests into an Axum router.

use std::sync::Arc;

use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
};
use tokio_util::sync::CancellationToken;

use crate::client::RemoteClient;
use crate::services::ServiceContext;

use super::server::McpServer;

/// Create MCP Streamable HTTP service
///
/// Every session gets its own [`McpServer`]; all of them share `ctx`, so the
/// rate gate and the HTTP connection pool are process-wide.
///
/// # Example
/// ```no_run
/// use axum::Router;
/// use tokio_util::sync::CancellationToken;
/// # use std::num::NonZeroU32;
/// # use psa_mcp::client::{HttpClient, RateGate};
/// # use psa_mcp::mcp::create_mcp_service;
/// # use psa_mcp::services::ServiceContext;
/// # fn example(client: HttpClient) {
/// let gate = RateGate::per_second(NonZeroU32::new(5).unwrap());
/// let ctx = ServiceContext::new(client, gate);
/// let mcp_service = create_mcp_service(ctx, CancellationToken::new());
///
/// let app: Router = Router::new().nest_service("/mcp", mcp_service);
/// # }
/// ```
pub fn create_mcp_service<C: RemoteClient>(
    ctx: impl Into<Arc<ServiceContext<C>>>,
    cancellation_token: CancellationToken,
) -> StreamableHttpService<McpServer<C>, LocalSessionManager> {
    let ctx = ctx.into();

    // Service factory: creates new McpServer instance per session
    // Note: Returns io::Error to match rmcp's expected signature
    let service_factory =
        move || -> Result<McpServer<C>, std::io::Error> { Ok(McpServer::new(Arc::clone(&ctx))) };

    let config = StreamableHttpServerConfig::default()
        .with_sse_keep_alive(None)
        .with_sse_retry(None)
        .with_stateful_mode(true)
        .with_cancellation_token(cancellation_token);

    StreamableHttpService::new(
        service_factory,
        LocalSessionManager::default().into(),
        config,
    )
}
