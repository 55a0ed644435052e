//! Connectivity check.

use rmcp::{ErrorData as McpError, model::CallToolResult, tool, tool_router};
use serde_json::json;

use crate::client::RemoteClient;
use crate::mcp::McpServer;
use crate::mcp::tools::{map_service_error, respond};

#[tool_router(router = system_tools, vis = "pub(crate)")]
impl<C: RemoteClient> McpServer<C> {
    #[tool(
        annotations(read_only_hint = true),
        description = "Check that the PSA API is reachable and the configured credentials are accepted."
    )]
    pub async fn test_connection(&self) -> Result<CallToolResult, McpError> {
        self.ctx
            .test_connection()
            .await
            .map_err(map_service_error)?;
        respond(
            json!({ "connected": true }),
            "Connected to the PSA API.".to_string(),
        )
    }
}
