pub mod client;
pub mod config;
pub mod mcp;
pub mod services;
pub mod transport;
pub mod validation;
