//! MCP tools for expense reports.

use std::sync::LazyLock;

use rmcp::{
    ErrorData as McpError, handler::server::wrapper::Parameters, model::CallToolResult, tool,
    tool_router,
};
use tokio_util::sync::CancellationToken;

use crate::client::{EntityKind, RemoteClient};
use crate::mcp::McpServer;
use crate::mcp::tools::{
    created_result, map_service_error, map_validation_error, record_result, search_result,
};
use crate::services::expenses::{ExpenseReportQuery, NewExpenseItem, NewExpenseReport};
use crate::validation::{FieldKind, FieldSpec, Input, Schema, ToolInput, fields};

#[derive(Debug, serde::Deserialize)]
pub struct GetExpenseReportParams {
    pub id: i64,
}

impl ToolInput for GetExpenseReportParams {
    const NAME: &'static str = "GetExpenseReportParams";

    fn schema() -> &'static Schema {
        static SCHEMA: LazyLock<Schema> =
            LazyLock::new(|| Schema::new().field(fields::id("Expense report")));
        &SCHEMA
    }
}

impl ToolInput for ExpenseReportQuery {
    const NAME: &'static str = "SearchExpenseReportsParams";

    fn schema() -> &'static Schema {
        static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
            Schema::new()
                .field(fields::entity_ref(
                    "submitterID",
                    "Only reports submitted by this resource",
                ))
                .field(FieldSpec::optional(
                    "status",
                    FieldKind::Integer {
                        min: Some(1),
                        max: None,
                    },
                    "Report status value",
                ))
                .field(FieldSpec::optional(
                    "periodStart",
                    FieldKind::Date,
                    "Week ending on or after this date (YYYY-MM-DD)",
                ))
                .field(FieldSpec::optional(
                    "periodEnd",
                    FieldKind::Date,
                    "Week ending on or before this date (YYYY-MM-DD)",
                ))
                .field(fields::page_size(25, "expense reports"))
                .not_before("periodStart", "periodEnd")
        });
        &SCHEMA
    }
}

impl ToolInput for NewExpenseReport {
    const NAME: &'static str = "CreateExpenseReportParams";

    fn schema() -> &'static Schema {
        static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
            Schema::new()
                .field(fields::text("name", 100, true, "Report name"))
                .field(FieldSpec::required(
                    "submitterID",
                    FieldKind::EntityId,
                    "Resource submitting the report",
                ))
                .field(FieldSpec::required(
                    "weekEnding",
                    FieldKind::Date,
                    "Week-ending date of the report (YYYY-MM-DD)",
                ))
                .field(fields::text("description", 4000, false, "Report description"))
        });
        &SCHEMA
    }
}

impl ToolInput for NewExpenseItem {
    const NAME: &'static str = "CreateExpenseItemParams";

    fn schema() -> &'static Schema {
        static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
            Schema::new()
                .field(FieldSpec::required(
                    "expenseReportID",
                    FieldKind::EntityId,
                    "Expense report the item belongs to",
                ))
                .field(fields::text("description", 128, true, "Item description"))
                .field(FieldSpec::required(
                    "expenseDate",
                    FieldKind::Date,
                    "Date of the expense (YYYY-MM-DD)",
                ))
                .field(FieldSpec::required(
                    "expenseCategory",
                    FieldKind::EntityId,
                    "Expense category value",
                ))
                .field(FieldSpec::required(
                    "amount",
                    FieldKind::Decimal {
                        min: Some(0.0),
                        max: None,
                    },
                    "Amount in the report currency",
                ))
                .field(fields::company_id(false, "Company the expense is billed to"))
        });
        &SCHEMA
    }
}

#[tool_router(router = expense_tools, vis = "pub(crate)")]
impl<C: RemoteClient> McpServer<C> {
    #[tool(
        annotations(read_only_hint = true),
        description = "Search expense reports by submitter, status or week-ending period. Returns 25 reports by default; pageSize up to 500 (-1 also returns at most 500)."
    )]
    pub async fn search_expense_reports(
        &self,
        Parameters(input): Parameters<Input<ExpenseReportQuery>>,
        cancel: CancellationToken,
    ) -> Result<CallToolResult, McpError> {
        let query = input.validate().map_err(map_validation_error)?;
        let outcome = self
            .expenses
            .search(&query, &cancel)
            .await
            .map_err(map_service_error)?;
        search_result(outcome, EntityKind::ExpenseReports.label())
    }

    #[tool(
        annotations(read_only_hint = true),
        description = "Get one expense report by ID."
    )]
    pub async fn get_expense_report(
        &self,
        Parameters(input): Parameters<Input<GetExpenseReportParams>>,
    ) -> Result<CallToolResult, McpError> {
        let params = input.validate().map_err(map_validation_error)?;
        let record = self
            .expenses
            .get(params.id)
            .await
            .map_err(map_service_error)?;
        record_result(record, "expense report", params.id)
    }

    #[tool(
        annotations(read_only_hint = false, destructive_hint = false),
        description = "Create an expense report for a resource and week."
    )]
    pub async fn create_expense_report(
        &self,
        Parameters(input): Parameters<Input<NewExpenseReport>>,
    ) -> Result<CallToolResult, McpError> {
        let report = input.validate().map_err(map_validation_error)?;
        let id = self
            .expenses
            .create(&report)
            .await
            .map_err(map_service_error)?;
        created_result(id, "expense report")
    }

    #[tool(
        annotations(read_only_hint = false, destructive_hint = false),
        description = "Add a line item to an expense report. Not available yet: always fails with not_implemented."
    )]
    pub async fn create_expense_item(
        &self,
        Parameters(input): Parameters<Input<NewExpenseItem>>,
    ) -> Result<CallToolResult, McpError> {
        let item = input.validate().map_err(map_validation_error)?;
        let id = self
            .expenses
            .create_item(&item)
            .await
            .map_err(map_service_error)?;
        created_result(id, "expense item")
    }
}
