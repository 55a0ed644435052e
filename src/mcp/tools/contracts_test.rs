//! Tests for Contract MCP tools

use rmcp::handler::server::wrapper::Parameters;
use serde_json::json;
use tokio_util::sync::CancellationToken;

use super::mod_test::{body, server};
use crate::services::testing::{FakeClient, not_found};
use crate::validation::Input;

#[tokio::test(flavor = "multi_thread")]
async fn test_unlimited_contract_search_caps_at_one_page() {
    let server = server(FakeClient::new().with_pages(&[500, 500]));

    let value = body(
        server
            .search_contracts(
                Parameters(Input::from(json!({ "companyID": 0, "pageSize": -1 }))),
                CancellationToken::new(),
            )
            .await
            .unwrap(),
    );

    assert_eq!(value["data"].as_array().unwrap().len(), 500);
    assert!(
        value["message"]
            .as_str()
            .unwrap()
            .contains("500-record maximum")
    );
    assert_eq!(server.ctx.client().queries().len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_negative_contract_status_is_rejected() {
    let server = server(FakeClient::new());

    let err = server
        .search_contracts(
            Parameters(Input::from(json!({ "status": -1 }))),
            CancellationToken::new(),
        )
        .await
        .unwrap_err();

    assert_eq!(err.data.unwrap()["violations"][0]["path"], "status");
    assert!(server.ctx.client().calls().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_contract_is_not_an_error() {
    let server = server(FakeClient::new().fail(not_found()));

    let value = body(
        server
            .get_contract(Parameters(Input::from(json!({ "id": 8 }))))
            .await
            .unwrap(),
    );

    assert!(value["data"].is_null());
    assert_eq!(value["message"], "No contract found with ID 8.");
}
