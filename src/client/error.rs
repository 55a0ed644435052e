//! Remote API client error types.
//!
//! Uses miette for diagnostic codes and thiserror for derive macros,
//! the same way the service and validation layers do.

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum ClientError {
    #[error("Failed to connect to the PSA API")]
    #[diagnostic(
        code(psa_mcp::client::connection_failed),
        help(
            "Check PSA_API_URL and network connectivity. The zone URL must include the REST version path, e.g. https://webservices2.example.net/atservicesrest/v1.0"
        )
    )]
    ConnectionFailed {
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid response from the PSA API: {message}")]
    #[diagnostic(code(psa_mcp::client::invalid_response))]
    InvalidResponse { message: String },

    #[error("PSA API error ({status}): {message}")]
    #[diagnostic(code(psa_mcp::client::api_error))]
    Api { status: u16, message: String },

    #[error("Invalid client configuration: {message}")]
    #[diagnostic(code(psa_mcp::client::configuration))]
    Configuration { message: String },
}

impl ClientError {
    /// HTTP status of an upstream rejection, if this error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            ClientError::ConnectionFailed { source: e }
        } else {
            ClientError::InvalidResponse {
                message: e.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::InvalidResponse {
            message: e.to_string(),
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
