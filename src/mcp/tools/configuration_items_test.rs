//! Tests for Configuration Item MCP tools

use rmcp::handler::server::wrapper::Parameters;
use serde_json::json;
use tokio_util::sync::CancellationToken;

use super::mod_test::{body, server};
use crate::client::EntityKind;
use crate::services::testing::{Call, FakeClient};
use crate::validation::Input;

#[tokio::test(flavor = "multi_thread")]
async fn test_search_term_matches_title_or_serial() {
    let server = server(FakeClient::new().with_pages(&[1]));

    let value = body(
        server
            .search_configuration_items(
                Parameters(Input::from(json!({ "searchTerm": "SN-77" }))),
                CancellationToken::new(),
            )
            .await
            .unwrap(),
    );

    assert_eq!(value["message"], "Found 1 configuration items.");
    assert_eq!(
        server.ctx.client().queries()[0].filter,
        vec![json!({
            "op": "or",
            "items": [
                {"op": "contains", "field": "referenceTitle", "value": "SN-77"},
                {"op": "contains", "field": "serialNumber", "value": "SN-77"},
            ],
        })]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_warranty_before_install_is_rejected() {
    let server = server(FakeClient::new());

    let err = server
        .create_configuration_item(Parameters(Input::from(json!({
            "companyID": 4,
            "productID": 31,
            "installDate": "2024-06-01",
            "warrantyExpirationDate": "2024-05-31",
        }))))
        .await
        .unwrap_err();

    let data = err.data.unwrap();
    assert_eq!(data["violations"][0]["path"], "warrantyExpirationDate");
    assert_eq!(
        data["violations"][0]["message"],
        "warrantyExpirationDate must be on or after installDate"
    );
    assert!(server.ctx.client().calls().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_warranty_on_install_day_is_accepted() {
    let server = server(FakeClient::new().respond(json!({ "itemId": 70 })));

    let value = body(
        server
            .create_configuration_item(Parameters(Input::from(json!({
                "companyID": 0,
                "productID": 31,
                "installDate": "2024-06-01",
                "warrantyExpirationDate": "2024-06-01",
            }))))
            .await
            .unwrap(),
    );

    assert_eq!(value["message"], "Created configuration item with ID 70.");
    assert!(matches!(
        &server.ctx.client().calls()[0],
        Call::Create(EntityKind::ConfigurationItems, payload) if payload["productID"] == 31
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_update_checks_dates_and_requires_a_change() {
    let server = server(FakeClient::new());

    let err = server
        .update_configuration_item(Parameters(Input::from(json!({
            "id": 70,
            "installDate": "2025-01-10",
            "warrantyExpirationDate": "2025-01-09",
        }))))
        .await
        .unwrap_err();
    assert_eq!(
        err.data.unwrap()["violations"][0]["path"],
        "warrantyExpirationDate"
    );

    let err = server
        .update_configuration_item(Parameters(Input::from(json!({ "id": 70 }))))
        .await
        .unwrap_err();
    assert_eq!(err.message, "validation_failed");
    assert!(server.ctx.client().calls().is_empty());
}
