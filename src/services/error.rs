//! Service error types.

use miette::Diagnostic;
use thiserror::Error;

use crate::client::ClientError;
use crate::validation::ValidationError;

#[derive(Error, Diagnostic, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Validation(#[from] ValidationError),

    #[error("{operation} failed: {source}")]
    #[diagnostic(code(psa_mcp::service::remote))]
    Remote {
        operation: String,
        #[source]
        source: ClientError,
    },

    #[error(
        "Invalid pageSize {value}: use -1 for unlimited, 0 for the default, or a positive number"
    )]
    #[diagnostic(code(psa_mcp::service::invalid_page_size))]
    InvalidPageSize { value: i64 },

    #[error("{operation} is not implemented yet")]
    #[diagnostic(
        code(psa_mcp::service::unimplemented),
        help("The PSA API endpoint for this operation is not wired up; use the PSA web UI instead.")
    )]
    Unimplemented { operation: String },

    #[error("{operation}: the PSA API response did not include an item id")]
    #[diagnostic(code(psa_mcp::service::missing_item_id))]
    MissingItemId { operation: String },

    #[error("Failed to encode request payload: {0}")]
    #[diagnostic(code(psa_mcp::service::encode))]
    Encode(#[from] serde_json::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
