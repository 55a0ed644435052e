//! Tests for configuration item filters and writes.

use serde_json::json;
use tokio_util::sync::CancellationToken;

use crate::client::{EntityKind, Filter};
use crate::services::ConfigurationItemService;
use crate::services::configuration_items::{
    ConfigurationItemField, ConfigurationItemQuery, ConfigurationItemUpdate, NewConfigurationItem,
};
use crate::services::testing::{Call, FakeClient, context};
use crate::services::Termination;

#[test]
fn test_search_term_spans_title_and_serial() {
    let query = ConfigurationItemQuery {
        search_term: Some("SN-77".to_string()),
        company_id: Some(4),
        is_active: Some(false),
        product_id: Some(31),
        ..Default::default()
    };

    assert_eq!(
        query.filters(),
        vec![
            Filter::Or(vec![
                Filter::contains(ConfigurationItemField::ReferenceTitle, "SN-77"),
                Filter::contains(ConfigurationItemField::SerialNumber, "SN-77"),
            ]),
            Filter::eq(ConfigurationItemField::CompanyId, 4),
            Filter::eq(ConfigurationItemField::IsActive, false),
            Filter::eq(ConfigurationItemField::ProductId, 31),
        ]
    );
}

#[tokio::test]
async fn test_unlimited_search_walks_pages() {
    let ctx = context(FakeClient::new().with_pages(&[500, 9]));
    let service = ConfigurationItemService::new(ctx.clone());

    let query = ConfigurationItemQuery {
        page_size: Some(-1),
        ..Default::default()
    };
    let outcome = service
        .search(&query, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(outcome.items.len(), 509);
    assert_eq!(outcome.termination, Termination::Exhausted);
    assert_eq!(ctx.client().queries().len(), 2);
}

#[tokio::test]
async fn test_create_sends_remote_field_names() {
    let ctx = context(FakeClient::new().respond(json!({ "itemId": 70 })));
    let service = ConfigurationItemService::new(ctx.clone());

    let id = service
        .create(&NewConfigurationItem {
            company_id: 4,
            product_id: 31,
            reference_title: Some("Front desk printer".to_string()),
            serial_number: None,
            is_active: None,
            install_date: Some("2024-06-01".to_string()),
            warranty_expiration_date: Some("2027-06-01".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(id, 70);
    assert_eq!(
        ctx.client().calls(),
        vec![Call::Create(
            EntityKind::ConfigurationItems,
            json!({
                "companyID": 4,
                "productID": 31,
                "referenceTitle": "Front desk printer",
                "installDate": "2024-06-01",
                "warrantyExpirationDate": "2027-06-01",
            }),
        )]
    );
}

#[tokio::test]
async fn test_update_falls_back_to_sent_id() {
    let ctx = context(FakeClient::new().respond(json!({})));
    let service = ConfigurationItemService::new(ctx.clone());

    let id = service
        .update(&ConfigurationItemUpdate {
            id: 70,
            product_id: None,
            reference_title: None,
            serial_number: Some("SN-77".to_string()),
            is_active: None,
            install_date: None,
            warranty_expiration_date: None,
        })
        .await
        .unwrap();

    assert_eq!(id, 70);
    assert_eq!(
        ctx.client().calls(),
        vec![Call::Update(
            EntityKind::ConfigurationItems,
            json!({ "id": 70, "serialNumber": "SN-77" }),
        )]
    );
}
