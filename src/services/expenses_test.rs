//! Tests for expense report searches and the unwired item write.

use serde_json::json;
use tokio_util::sync::CancellationToken;

use crate::client::Filter;
use crate::services::expenses::{ExpenseReportField, ExpenseReportQuery, NewExpenseItem};
use crate::services::testing::{FakeClient, context};
use crate::services::{ExpenseService, ServiceError, Termination};

#[test]
fn test_period_bounds_week_ending() {
    let query = ExpenseReportQuery {
        submitter_id: Some(29),
        period_start: Some("2025-01-01".to_string()),
        period_end: Some("2025-03-31".to_string()),
        ..Default::default()
    };

    assert_eq!(
        query.filters(),
        vec![
            Filter::eq(ExpenseReportField::SubmitterId, 29),
            Filter::gte(ExpenseReportField::WeekEnding, "2025-01-01"),
            Filter::lte(ExpenseReportField::WeekEnding, "2025-03-31"),
        ]
    );
}

#[tokio::test]
async fn test_unlimited_search_is_one_ceiling_page() {
    let ctx = context(FakeClient::new().with_pages(&[500, 500]));
    let service = ExpenseService::new(ctx.clone());

    let outcome = service
        .search(
            &ExpenseReportQuery {
                page_size: Some(-1),
                ..Default::default()
            },
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(outcome.items.len(), 500);
    assert_eq!(outcome.termination, Termination::LimitReached);
    assert!(outcome.may_have_more());
    assert_eq!(ctx.client().queries().len(), 1);
}

#[tokio::test]
async fn test_get_unwraps_item() {
    let ctx = context(FakeClient::new().respond(json!({ "item": { "id": 15, "name": "Jan" } })));
    let service = ExpenseService::new(ctx);

    let report = service.get(15).await.unwrap().unwrap();
    assert_eq!(report["name"], "Jan");
}

#[tokio::test]
async fn test_create_item_fails_without_remote_call() {
    let ctx = context(FakeClient::new());
    let service = ExpenseService::new(ctx.clone());

    let err = service
        .create_item(&NewExpenseItem {
            expense_report_id: 15,
            description: "Taxi".to_string(),
            expense_date: "2025-01-14".to_string(),
            expense_category: 2,
            amount: 42.5,
            company_id: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Unimplemented { .. }));
    assert_eq!(
        err.to_string(),
        "create expense item on expense report 15 is not implemented yet"
    );
    assert!(ctx.client().calls().is_empty());
}
