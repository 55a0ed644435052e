//! Tests for Contact MCP tools

use rmcp::handler::server::wrapper::Parameters;
use serde_json::json;
use tokio_util::sync::CancellationToken;

use super::mod_test::{body, server};
use crate::client::EntityKind;
use crate::services::testing::{Call, FakeClient};
use crate::validation::Input;

#[tokio::test(flavor = "multi_thread")]
async fn test_unlimited_contact_search_walks_every_page() {
    let server = server(FakeClient::new().with_pages(&[500, 120]));

    let value = body(
        server
            .search_contacts(
                Parameters(Input::from(json!({
                    "companyID": 12,
                    "pageSize": -1,
                }))),
                CancellationToken::new(),
            )
            .await
            .unwrap(),
    );

    assert_eq!(value["data"].as_array().unwrap().len(), 620);
    assert_eq!(value["message"], "Found 620 contacts (all matching records).");
    assert_eq!(server.ctx.client().queries().len(), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_contact_search_defaults_to_fifty() {
    let server = server(FakeClient::new());

    let value = body(
        server
            .search_contacts(
                Parameters(Input::from(json!({}))),
                CancellationToken::new(),
            )
            .await
            .unwrap(),
    );

    assert_eq!(value["message"], "Found 0 contacts.");
    assert_eq!(server.ctx.client().queries()[0].max_records, Some(50));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_contact_posts_under_company() {
    let server = server(FakeClient::new().respond(json!({ "itemId": 640 })));

    let value = body(
        server
            .create_contact(Parameters(Input::from(json!({
                "companyID": 0,
                "firstName": "Dana",
                "lastName": "Okafor",
                "emailAddress": "dana@example.com",
            }))))
            .await
            .unwrap(),
    );

    assert_eq!(value["message"], "Created contact with ID 640.");
    assert!(matches!(
        &server.ctx.client().calls()[0],
        Call::CreateChild(EntityKind::Companies, 0, EntityKind::Contacts, payload)
            if payload["firstName"] == "Dana"
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_contact_rejects_negative_company() {
    let server = server(FakeClient::new());

    let err = server
        .create_contact(Parameters(Input::from(json!({
            "companyID": -1,
            "firstName": "Dana",
            "lastName": "Okafor",
        }))))
        .await
        .unwrap_err();

    assert_eq!(err.data.unwrap()["violations"][0]["path"], "companyID");
    assert!(server.ctx.client().calls().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_update_contact_sends_active_flag_as_integer() {
    let server = server(FakeClient::new().respond(json!({ "itemId": 640 })));

    server
        .update_contact(Parameters(Input::from(json!({ "id": 640, "isActive": false }))))
        .await
        .unwrap();

    assert_eq!(
        server.ctx.client().calls(),
        vec![Call::Update(
            EntityKind::Contacts,
            json!({ "id": 640, "isActive": 0 }),
        )]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_contact_without_item_is_not_found() {
    let server = server(FakeClient::new().respond(json!({ "item": null })));

    let value = body(
        server
            .get_contact(Parameters(Input::from(json!({ "id": 3 }))))
            .await
            .unwrap(),
    );

    assert!(value["data"].is_null());
    assert_eq!(value["message"], "No contact found with ID 3.");
}
