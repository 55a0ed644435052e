//! Expense report service.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::search::{self, EntitySearch, SearchOutcome, UnlimitedMode};
use crate::client::{EntityKind, Filter, FilterField, RemoteClient};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExpenseReportField {
    Id,
    SubmitterId,
    Status,
    WeekEnding,
}

impl FilterField for ExpenseReportField {
    const ID: Self = ExpenseReportField::Id;

    fn name(&self) -> &'static str {
        match self {
            ExpenseReportField::Id => "id",
            ExpenseReportField::SubmitterId => "submitterID",
            ExpenseReportField::Status => "status",
            ExpenseReportField::WeekEnding => "weekEnding",
        }
    }
}

pub const EXPENSE_REPORT_SEARCH: EntitySearch = EntitySearch {
    entity: EntityKind::ExpenseReports,
    default_page_size: 25,
    unlimited: UnlimitedMode::CeilingPage,
};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseReportQuery {
    #[serde(rename = "submitterID")]
    pub submitter_id: Option<i64>,
    pub status: Option<i64>,
    pub period_start: Option<String>,
    pub period_end: Option<String>,
    pub page_size: Option<i64>,
}

impl ExpenseReportQuery {
    /// The reporting period is matched against the report's week-ending date.
    pub fn filters(&self) -> Vec<Filter<ExpenseReportField>> {
        let mut filters = Vec::new();
        if let Some(submitter) = self.submitter_id {
            filters.push(Filter::eq(ExpenseReportField::SubmitterId, submitter));
        }
        if let Some(status) = self.status {
            filters.push(Filter::eq(ExpenseReportField::Status, status));
        }
        if let Some(start) = &self.period_start {
            filters.push(Filter::gte(ExpenseReportField::WeekEnding, start.as_str()));
        }
        if let Some(end) = &self.period_end {
            filters.push(Filter::lte(ExpenseReportField::WeekEnding, end.as_str()));
        }
        filters
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExpenseReport {
    pub name: String,
    #[serde(rename = "submitterID")]
    pub submitter_id: i64,
    pub week_ending: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Line item of an expense report. Accepted and validated, never sent.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExpenseItem {
    #[serde(rename = "expenseReportID")]
    pub expense_report_id: i64,
    pub description: String,
    pub expense_date: String,
    pub expense_category: i64,
    pub amount: f64,
    #[serde(rename = "companyID", skip_serializing_if = "Option::is_none")]
    pub company_id: Option<i64>,
}

pub struct ExpenseService<C: RemoteClient> {
    ctx: Arc<ServiceContext<C>>,
}

impl<C: RemoteClient> Clone for ExpenseService<C> {
    fn clone(&self) -> Self {
        Self {
            ctx: Arc::clone(&self.ctx),
        }
    }
}

impl<C: RemoteClient> ExpenseService<C> {
    pub fn new(ctx: Arc<ServiceContext<C>>) -> Self {
        Self { ctx }
    }

    pub async fn search(
        &self,
        query: &ExpenseReportQuery,
        cancel: &CancellationToken,
    ) -> ServiceResult<SearchOutcome> {
        search::run(
            &self.ctx,
            &EXPENSE_REPORT_SEARCH,
            query.filters(),
            query.page_size,
            cancel,
        )
        .await
    }

    pub async fn get(&self, id: i64) -> ServiceResult<Option<Value>> {
        self.ctx.fetch_one(EntityKind::ExpenseReports, id).await
    }

    pub async fn create(&self, report: &NewExpenseReport) -> ServiceResult<i64> {
        let payload = serde_json::to_value(report)?;
        self.ctx.create_one(EntityKind::ExpenseReports, &payload).await
    }

    /// Fails before any remote call.
    // TODO: wire to POST /ExpenseReports/{id}/Items once the item payload
    // (billable flags, payment type) is pinned down.
    pub async fn create_item(&self, item: &NewExpenseItem) -> ServiceResult<i64> {
        Err(ServiceError::Unimplemented {
            operation: format!(
                "create expense item on expense report {}",
                item.expense_report_id
            ),
        })
    }
}
