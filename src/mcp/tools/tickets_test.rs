//! Tests for Ticket MCP tools

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::ErrorCode;
use serde_json::json;
use tokio_util::sync::CancellationToken;

use super::mod_test::{body, server};
use crate::client::EntityKind;
use crate::services::testing::{Call, FakeClient, not_found};
use crate::validation::Input;

#[tokio::test(flavor = "multi_thread")]
async fn test_search_tickets_reports_limit_when_page_fills() {
    let server = server(FakeClient::new().with_pages(&[25]));

    let result = server
        .search_tickets(
            Parameters(Input::from(json!({ "companyID": 0 }))),
            CancellationToken::new(),
        )
        .await
        .unwrap();

    let value = body(result);
    assert_eq!(value["data"].as_array().unwrap().len(), 25);
    let message = value["message"].as_str().unwrap();
    assert!(message.starts_with("Found 25 tickets (limited to 25)."));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_tickets_collects_every_violation_without_calling_remote() {
    let server = server(FakeClient::new());

    let err = server
        .search_tickets(
            Parameters(Input::from(json!({
                "status": "open",
                "pageSize": -3,
                "bogus": true,
            }))),
            CancellationToken::new(),
        )
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    assert_eq!(err.message, "validation_failed");
    let violations = err.data.unwrap()["violations"].as_array().unwrap().clone();
    let paths: Vec<&str> = violations
        .iter()
        .map(|v| v["path"].as_str().unwrap())
        .collect();
    assert_eq!(paths, vec!["bogus", "status", "pageSize"]);
    assert!(server.ctx.client().calls().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_tickets_rejects_inverted_date_range() {
    let server = server(FakeClient::new());

    let err = server
        .search_tickets(
            Parameters(Input::from(json!({
                "createdAfter": "2025-03-01",
                "createdBefore": "2025-02-01",
            }))),
            CancellationToken::new(),
        )
        .await
        .unwrap_err();

    let data = err.data.unwrap();
    assert_eq!(data["violations"][0]["path"], "createdBefore");
    assert_eq!(
        data["violations"][0]["message"],
        "createdBefore must be on or after createdAfter"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_ticket_not_found_is_a_normal_answer() {
    let server = server(FakeClient::new().fail(not_found()));

    let result = server
        .get_ticket(Parameters(Input::from(json!({ "id": 77 }))))
        .await
        .unwrap();

    let value = body(result);
    assert!(value["data"].is_null());
    assert_eq!(value["message"], "No ticket found with ID 77.");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_ticket_returns_item() {
    let server = server(
        FakeClient::new().respond(json!({ "item": { "id": 5, "title": "Printer jam" } })),
    );

    let value = body(
        server
            .get_ticket(Parameters(Input::from(json!({ "id": 5 }))))
            .await
            .unwrap(),
    );

    assert_eq!(value["data"]["title"], "Printer jam");
    assert_eq!(value["message"], "Found ticket 5.");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_ticket_requires_role_with_resource() {
    let server = server(FakeClient::new());

    let err = server
        .create_ticket(Parameters(Input::from(json!({
            "companyID": 0,
            "title": "VPN down",
            "status": 1,
            "priority": 2,
            "assignedResourceID": 29,
        }))))
        .await
        .unwrap_err();

    let data = err.data.unwrap();
    assert_eq!(data["violations"][0]["path"], "assignedResourceRoleID");
    assert!(server.ctx.client().calls().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_ticket_returns_new_id() {
    let server = server(FakeClient::new().respond(json!({ "itemId": 9001 })));

    let value = body(
        server
            .create_ticket(Parameters(Input::from(json!({
                "companyID": 0,
                "title": "VPN down",
                "status": 1,
                "priority": 2,
            }))))
            .await
            .unwrap(),
    );

    assert_eq!(value["data"]["id"], 9001);
    assert_eq!(value["message"], "Created ticket with ID 9001.");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_update_ticket_needs_a_field_besides_id() {
    let server = server(FakeClient::new());

    let err = server
        .update_ticket(Parameters(Input::from(json!({ "id": 3 }))))
        .await
        .unwrap_err();

    let data = err.data.unwrap();
    assert_eq!(
        data["violations"][0]["message"],
        "At least one field besides id must be provided"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_ticket_note_applies_defaults() {
    let server = server(FakeClient::new().respond(json!({ "itemId": 310 })));

    let value = body(
        server
            .create_ticket_note(Parameters(Input::from(json!({
                "ticketID": 12,
                "description": "Rebooted the router",
            }))))
            .await
            .unwrap(),
    );

    assert_eq!(value["data"]["id"], 310);
    assert_eq!(
        server.ctx.client().calls(),
        vec![Call::CreateChild(
            EntityKind::Tickets,
            12,
            EntityKind::Notes,
            json!({
                "description": "Rebooted the router",
                "publish": 1,
                "noteType": 1,
                "ticketID": 12,
            }),
        )]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_ticket_note_rejects_blank_description() {
    let server = server(FakeClient::new());

    let err = server
        .create_ticket_note(Parameters(Input::from(json!({
            "ticketID": 12,
            "description": "   ",
            "publish": 9,
        }))))
        .await
        .unwrap_err();

    let data = err.data.unwrap();
    assert_eq!(data["violations"][0]["path"], "description");
    assert_eq!(data["violations"][1]["path"], "publish");
    assert!(server.ctx.client().calls().is_empty());
}
