//! Tests for Resource MCP tools

use rmcp::handler::server::wrapper::Parameters;
use serde_json::json;
use tokio_util::sync::CancellationToken;

use super::mod_test::{body, server};
use crate::services::testing::FakeClient;
use crate::validation::Input;

#[tokio::test(flavor = "multi_thread")]
async fn test_unlimited_resource_search_walks_every_page() {
    let server = server(FakeClient::new().with_pages(&[500, 500, 17]));

    let value = body(
        server
            .search_resources(
                Parameters(Input::from(json!({
                    "resourceType": "Employee",
                    "pageSize": -1,
                }))),
                CancellationToken::new(),
            )
            .await
            .unwrap(),
    );

    assert_eq!(value["data"].as_array().unwrap().len(), 1017);
    assert_eq!(value["message"], "Found 1017 resources (all matching records).");

    let queries = server.ctx.client().queries();
    assert_eq!(queries.len(), 3);
    assert_eq!(
        queries[0].filter,
        vec![json!({"op": "eq", "field": "resourceType", "value": "Employee"})]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unknown_resource_type_is_rejected() {
    let server = server(FakeClient::new());

    let err = server
        .search_resources(
            Parameters(Input::from(json!({ "resourceType": "Intern" }))),
            CancellationToken::new(),
        )
        .await
        .unwrap_err();

    let data = err.data.unwrap();
    assert_eq!(data["violations"][0]["path"], "resourceType");
    assert_eq!(
        data["violations"][0]["message"],
        "resourceType must be one of: Employee, Contractor, Temporary"
    );
    assert!(server.ctx.client().calls().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_cancelled_request_reports_partial_results() {
    let server = server(FakeClient::new().with_pages(&[500]));
    let cancel = CancellationToken::new();
    cancel.cancel();

    let value = body(
        server
            .search_resources(Parameters(Input::from(json!({ "pageSize": -1 }))), cancel)
            .await
            .unwrap(),
    );

    assert_eq!(
        value["message"],
        "Found 0 resources before the request was cancelled; the results may be incomplete."
    );
    assert!(server.ctx.client().calls().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_resource_returns_record() {
    let server = server(
        FakeClient::new().respond(json!({ "item": { "id": 29, "firstName": "Ada" } })),
    );

    let value = body(
        server
            .get_resource(Parameters(Input::from(json!({ "id": 29 }))))
            .await
            .unwrap(),
    );

    assert_eq!(value["data"]["firstName"], "Ada");
    assert_eq!(value["message"], "Found resource 29.");
}
