//! Model Context Protocol (MCP) server implementation
//!
//! The server exposes PSA search, read and write operations as tools over
//! stdio or the Streamable HTTP transport.
//!
//! - **server**: [`McpServer`], one service per PSA entity plus the tool router
//! - **tools**: one `#[tool_router]` block per entity, with its input schemas
//! - **service**: Streamable HTTP service for nesting into an Axum router
//!
//! The server is generic over `C: RemoteClient`, so tests swap the HTTP client
//! for a scripted one without dynamic dispatch.

pub mod server;
mod service;
pub mod tools;

#[cfg(test)]
mod service_test;

pub use server::McpServer;
pub use service::create_mcp_service;
