//! Tests for the HTTP client against a mock PSA API.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::client::http::{HttpClient, HttpClientConfig};
use crate::client::{ClientError, EntityKind, Filter, QueryRequest, RemoteClient};
use crate::services::tickets::TicketField;

fn config(base_url: String) -> HttpClientConfig {
    HttpClientConfig {
        base_url,
        username: "api@example.com".to_string(),
        secret: "s3cret".to_string(),
        integration_code: "INTEGRATION".to_string(),
        timeout: Duration::from_secs(5),
    }
}

#[tokio::test]
async fn test_new_trims_trailing_slash() {
    let client = HttpClient::new(&config("http://custom:8080/v1.0/".to_string())).unwrap();
    assert_eq!(client.base_url(), "http://custom:8080/v1.0");
}

#[tokio::test]
async fn test_new_rejects_unparseable_url() {
    let result = HttpClient::new(&config("not a url".to_string()));
    assert!(matches!(result, Err(ClientError::Configuration { .. })));
}

#[tokio::test]
async fn test_query_sends_credentials_and_body() {
    let server = MockServer::start().await;
    let query = QueryRequest::new(&[Filter::eq(TicketField::CompanyId, 0)], Some(25));

    Mock::given(method("POST"))
        .and(path("/Tickets/query"))
        .and(header("ApiIntegrationCode", "INTEGRATION"))
        .and(header("UserName", "api@example.com"))
        .and(header("Secret", "s3cret"))
        .and(body_json(json!({
            "filter": [{"op": "eq", "field": "companyID", "value": 0}],
            "MaxRecords": 25,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": 1}],
            "pageDetails": {"count": 1}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new(&config(server.uri())).unwrap();
    let body = client.query(EntityKind::Tickets, &query).await.unwrap();

    assert_eq!(body["items"][0]["id"], 1);
}

#[tokio::test]
async fn test_get_hits_entity_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Companies/0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "item": {"id": 0, "companyName": "System"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new(&config(server.uri())).unwrap();
    let body = client.get(EntityKind::Companies, 0).await.unwrap();

    assert_eq!(body["item"]["companyName"], "System");
}

#[tokio::test]
async fn test_create_child_posts_to_nested_route() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/Tickets/77/Notes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"itemId": 901})))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new(&config(server.uri())).unwrap();
    let body = client
        .create_child(
            EntityKind::Tickets,
            77,
            EntityKind::Notes,
            &json!({"description": "hi"}),
        )
        .await
        .unwrap();

    assert_eq!(body["itemId"], 901);
}

#[tokio::test]
async fn test_update_uses_patch() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/Contacts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"itemId": 5})))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new(&config(server.uri())).unwrap();
    let body = client
        .update(EntityKind::Contacts, &json!({"id": 5, "title": "CTO"}))
        .await
        .unwrap();

    assert_eq!(body["itemId"], 5);
}

#[tokio::test]
async fn test_error_status_maps_to_api_error_with_joined_messages() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/Resources/query"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "errors": ["Filter is required", "Invalid field"]
        })))
        .mount(&server)
        .await;

    let client = HttpClient::new(&config(server.uri())).unwrap();
    let err = client
        .query(
            EntityKind::Resources,
            &QueryRequest::new::<TicketField>(&[], Some(1)),
        )
        .await
        .unwrap_err();

    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "Filter is required; Invalid field");
        }
        other => panic!("Expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_success_body_is_null() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/Tickets"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = HttpClient::new(&config(server.uri())).unwrap();
    let body = client
        .update(EntityKind::Tickets, &json!({"id": 1, "status": 5}))
        .await
        .unwrap();

    assert!(body.is_null());
}
