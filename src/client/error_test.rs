//! Tests for client error types.

use crate::client::ClientError;

#[test]
fn test_api_error_displays_status_and_message() {
    let err = ClientError::Api {
        status: 404,
        message: "Ticket not found".to_string(),
    };
    assert_eq!(err.to_string(), "PSA API error (404): Ticket not found");
    assert_eq!(err.status(), Some(404));
}

#[test]
fn test_invalid_response_has_no_status() {
    let err = ClientError::InvalidResponse {
        message: "expected object".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Invalid response from the PSA API: expected object"
    );
    assert_eq!(err.status(), None);
}

#[test]
fn test_serde_errors_become_invalid_response() {
    let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let err: ClientError = parse_err.into();
    assert!(matches!(err, ClientError::InvalidResponse { .. }));
}
