//! Tests for the shared tool response helpers

use rmcp::model::{CallToolResult, ErrorCode, RawContent};
use serde_json::{Value, json};

use super::{map_service_error, map_validation_error, record_result, search_message};
use crate::services::testing::{FakeClient, context, server_error};
use crate::services::{SearchOutcome, ServiceError, Termination};
use crate::validation::{ValidationError, Violation};

/// Parse the `{ data, message }` body of a successful tool call.
pub(super) fn body(result: CallToolResult) -> Value {
    assert!(result.is_error.is_none() || result.is_error == Some(false));
    assert_eq!(result.content.len(), 1);
    let text = match &result.content[0].raw {
        RawContent::Text(text) => text.text.as_str(),
        _ => panic!("Expected text content"),
    };
    serde_json::from_str(text).unwrap()
}

pub(super) fn server(client: FakeClient) -> crate::mcp::McpServer<FakeClient> {
    crate::mcp::McpServer::new(context(client))
}

fn outcome(count: i64, page_size: Option<u32>, termination: Termination) -> SearchOutcome {
    SearchOutcome {
        items: (1..=count).map(|id| json!({ "id": id })).collect(),
        page_size,
        unlimited: page_size.is_none(),
        termination,
    }
}

#[test]
fn test_exhausted_bounded_search_reports_count_only() {
    let message = search_message(&outcome(3, Some(25), Termination::Exhausted), "tickets");
    assert_eq!(message, "Found 3 tickets.");
}

#[test]
fn test_exhausted_unlimited_search_says_all_records() {
    let message = search_message(&outcome(1200, None, Termination::Exhausted), "companies");
    assert_eq!(message, "Found 1200 companies (all matching records).");
}

#[test]
fn test_bounded_limit_points_at_unlimited_page_size() {
    let message = search_message(&outcome(25, Some(25), Termination::LimitReached), "tickets");
    assert!(message.starts_with("Found 25 tickets (limited to 25)."));
    assert!(message.contains("pageSize: -1"));
}

#[test]
fn test_ceiling_page_limit_suggests_filters() {
    let message = search_message(&outcome(500, None, Termination::LimitReached), "projects");
    assert!(message.contains("500-record maximum"));
    assert!(message.contains("narrow the search"));
    assert!(!message.contains("pageSize: -1"));
}

#[test]
fn test_safety_bound_names_page_cap() {
    let message = search_message(&outcome(10, None, Termination::SafetyBound), "tickets");
    assert!(message.contains("stopped after 20 pages"));
}

#[test]
fn test_malformed_and_cancelled_warn_of_partial_results() {
    let malformed = search_message(&outcome(4, None, Termination::Malformed), "contacts");
    assert!(malformed.contains("unexpected response"));

    let cancelled = search_message(&outcome(4, None, Termination::Cancelled), "contacts");
    assert!(cancelled.contains("cancelled"));
}

#[test]
fn test_missing_record_is_null_data_not_error() {
    let value = body(record_result(None, "ticket", 42).unwrap());
    assert_eq!(value["data"], Value::Null);
    assert_eq!(value["message"], "No ticket found with ID 42.");
}

#[test]
fn test_validation_error_lists_every_violation() {
    let err = map_validation_error(ValidationError::new(vec![
        Violation::new("title", "title is required"),
        Violation::new("status", "status must be an integer"),
    ]));

    assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    assert_eq!(err.message, "validation_failed");
    let violations = &err.data.unwrap()["violations"];
    assert_eq!(violations[0]["path"], "title");
    assert_eq!(violations[1]["message"], "status must be an integer");
}

#[test]
fn test_page_size_error_is_invalid_params() {
    let err = map_service_error(ServiceError::InvalidPageSize { value: -7 });
    assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    assert_eq!(err.message, "invalid_page_size");
    assert_eq!(err.data.unwrap()["pageSize"], -7);
}

#[test]
fn test_remote_error_carries_operation_and_status() {
    let err = map_service_error(ServiceError::Remote {
        operation: "search tickets".to_string(),
        source: server_error(),
    });
    assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
    assert_eq!(err.message, "remote_api_error");
    let data = err.data.unwrap();
    assert_eq!(data["operation"], "search tickets");
    assert_eq!(data["status"], 500);
}

#[test]
fn test_unimplemented_operation_is_not_implemented() {
    let err = map_service_error(ServiceError::Unimplemented {
        operation: "create expense item on expense report 3".to_string(),
    });
    assert_eq!(err.message, "not_implemented");
}
