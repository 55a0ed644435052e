//! MCP tools for contracts.

use std::sync::LazyLock;

use rmcp::{
    ErrorData as McpError, handler::server::wrapper::Parameters, model::CallToolResult, tool,
    tool_router,
};
use tokio_util::sync::CancellationToken;

use crate::client::{EntityKind, RemoteClient};
use crate::mcp::McpServer;
use crate::mcp::tools::{map_service_error, map_validation_error, record_result, search_result};
use crate::services::contracts::ContractQuery;
use crate::validation::{FieldKind, FieldSpec, Input, Schema, ToolInput, fields};

#[derive(Debug, serde::Deserialize)]
pub struct GetContractParams {
    pub id: i64,
}

impl ToolInput for GetContractParams {
    const NAME: &'static str = "GetContractParams";

    fn schema() -> &'static Schema {
        static SCHEMA: LazyLock<Schema> =
            LazyLock::new(|| Schema::new().field(fields::id("Contract")));
        &SCHEMA
    }
}

impl ToolInput for ContractQuery {
    const NAME: &'static str = "SearchContractsParams";

    fn schema() -> &'static Schema {
        static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
            Schema::new()
                .field(fields::search_term("Text contained in the contract name"))
                .field(fields::company_id(false, "Only contracts of this company"))
                .field(FieldSpec::optional(
                    "status",
                    FieldKind::Integer {
                        min: Some(0),
                        max: None,
                    },
                    "Contract status value (0 = inactive, 1 = active)",
                ))
                .field(fields::page_size(25, "contracts"))
        });
        &SCHEMA
    }
}

#[tool_router(router = contract_tools, vis = "pub(crate)")]
impl<C: RemoteClient> McpServer<C> {
    #[tool(
        annotations(read_only_hint = true),
        description = "Search contracts by name, company or status. Returns 25 contracts by default; pageSize up to 500 (-1 also returns at most 500)."
    )]
    pub async fn search_contracts(
        &self,
        Parameters(input): Parameters<Input<ContractQuery>>,
        cancel: CancellationToken,
    ) -> Result<CallToolResult, McpError> {
        let query = input.validate().map_err(map_validation_error)?;
        let outcome = self
            .contracts
            .search(&query, &cancel)
            .await
            .map_err(map_service_error)?;
        search_result(outcome, EntityKind::Contracts.label())
    }

    #[tool(
        annotations(read_only_hint = true),
        description = "Get one contract by ID."
    )]
    pub async fn get_contract(
        &self,
        Parameters(input): Parameters<Input<GetContractParams>>,
    ) -> Result<CallToolResult, McpError> {
        let params = input.validate().map_err(map_validation_error)?;
        let record = self
            .contracts
            .get(params.id)
            .await
            .map_err(map_service_error)?;
        record_result(record, "contract", params.id)
    }
}
