//! MCP tool implementations
//!
//! Each file adds one `#[tool_router]` block to [`McpServer`](super::McpServer)
//! for one PSA entity, together with the declarative input schema of every
//! tool it registers. Handlers validate their raw arguments, call the entity
//! service and answer with pretty JSON `{ "data": ..., "message": ... }`.

mod companies;
mod configuration_items;
mod contacts;
mod contracts;
mod expenses;
mod projects;
mod resources;
mod system;
mod tickets;

#[cfg(test)]
mod configuration_items_test;
#[cfg(test)]
mod contacts_test;
#[cfg(test)]
mod contracts_test;
#[cfg(test)]
mod mod_test;
#[cfg(test)]
mod resources_test;
#[cfg(test)]
mod tickets_test;

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use serde_json::{Value, json};

use crate::services::search::MAX_PAGES;
use crate::services::{MAX_PAGE_SIZE, SearchOutcome, ServiceError, Termination};
use crate::validation::ValidationError;

/// Wrap `data` and `message` as the tool's text content.
pub(crate) fn respond(data: Value, message: String) -> Result<CallToolResult, McpError> {
    let body = json!({ "data": data, "message": message });
    let text = serde_json::to_string_pretty(&body).map_err(|e| {
        McpError::internal_error(
            "serialization_failed",
            Some(json!({ "error": e.to_string() })),
        )
    })?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

/// Message for a search result: always the count, plus how to get more when
/// records may have been left behind.
pub(crate) fn search_message(outcome: &SearchOutcome, label: &str) -> String {
    let count = outcome.items.len();
    match outcome.termination {
        Termination::Exhausted if outcome.unlimited => {
            format!("Found {} {} (all matching records).", count, label)
        }
        Termination::Exhausted => format!("Found {} {}.", count, label),
        Termination::LimitReached if outcome.unlimited => format!(
            "Found {} {} (the {}-record maximum for one request). More may exist: narrow the \
             search with additional filters.",
            count, label, MAX_PAGE_SIZE
        ),
        Termination::LimitReached => format!(
            "Found {} {} (limited to {}). More may exist: pass pageSize: -1 to fetch all \
             matching {}, or add filters to narrow the search.",
            count,
            label,
            outcome.page_size.unwrap_or(MAX_PAGE_SIZE),
            label
        ),
        Termination::SafetyBound => format!(
            "Found {} {}; stopped after {} pages. More may exist: add filters to narrow the \
             search.",
            count, label, MAX_PAGES
        ),
        Termination::Malformed => format!(
            "Found {} {}; the PSA API returned an unexpected response, so the results may be \
             incomplete.",
            count, label
        ),
        Termination::Cancelled => format!(
            "Found {} {} before the request was cancelled; the results may be incomplete.",
            count, label
        ),
    }
}

pub(crate) fn search_result(outcome: SearchOutcome, label: &str) -> Result<CallToolResult, McpError> {
    let message = search_message(&outcome, label);
    respond(Value::Array(outcome.items), message)
}

/// A missing record is a normal answer with `data: null`.
pub(crate) fn record_result(
    record: Option<Value>,
    what: &str,
    id: i64,
) -> Result<CallToolResult, McpError> {
    match record {
        Some(record) => respond(record, format!("Found {} {}.", what, id)),
        None => respond(Value::Null, format!("No {} found with ID {}.", what, id)),
    }
}

pub(crate) fn created_result(id: i64, what: &str) -> Result<CallToolResult, McpError> {
    respond(
        json!({ "id": id }),
        format!("Created {} with ID {}.", what, id),
    )
}

pub(crate) fn updated_result(id: i64, what: &str) -> Result<CallToolResult, McpError> {
    respond(json!({ "id": id }), format!("Updated {} {}.", what, id))
}

pub(crate) fn map_validation_error(e: ValidationError) -> McpError {
    McpError::invalid_params(
        "validation_failed",
        Some(json!({ "violations": e.violations })),
    )
}

pub(crate) fn map_service_error(e: ServiceError) -> McpError {
    match e {
        ServiceError::Validation(e) => map_validation_error(e),
        ServiceError::InvalidPageSize { value } => McpError::invalid_params(
            "invalid_page_size",
            Some(json!({ "pageSize": value, "error": e.to_string() })),
        ),
        ServiceError::Remote {
            ref operation,
            ref source,
        } => McpError::internal_error(
            "remote_api_error",
            Some(json!({
                "operation": operation,
                "status": source.status(),
                "error": source.to_string(),
            })),
        ),
        ServiceError::MissingItemId { ref operation } => McpError::internal_error(
            "remote_api_error",
            Some(json!({ "operation": operation, "error": e.to_string() })),
        ),
        ServiceError::Unimplemented { ref operation } => McpError::internal_error(
            "not_implemented",
            Some(json!({ "operation": operation, "error": e.to_string() })),
        ),
        ServiceError::Encode(_) => McpError::internal_error(
            "encode_failed",
            Some(json!({ "error": e.to_string() })),
        ),
    }
}
