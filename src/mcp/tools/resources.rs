//! MCP tools for resources (staff members).

use std::sync::LazyLock;

use rmcp::{
    ErrorData as McpError, handler::server::wrapper::Parameters, model::CallToolResult, tool,
    tool_router,
};
use tokio_util::sync::CancellationToken;

use crate::client::{EntityKind, RemoteClient};
use crate::mcp::McpServer;
use crate::mcp::tools::{map_service_error, map_validation_error, record_result, search_result};
use crate::services::resources::{RESOURCE_TYPES, ResourceQuery};
use crate::validation::{FieldKind, FieldSpec, Input, Schema, ToolInput, fields};

#[derive(Debug, serde::Deserialize)]
pub struct GetResourceParams {
    pub id: i64,
}

impl ToolInput for GetResourceParams {
    const NAME: &'static str = "GetResourceParams";

    fn schema() -> &'static Schema {
        static SCHEMA: LazyLock<Schema> =
            LazyLock::new(|| Schema::new().field(fields::id("Resource")));
        &SCHEMA
    }
}

impl ToolInput for ResourceQuery {
    const NAME: &'static str = "SearchResourcesParams";

    fn schema() -> &'static Schema {
        static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
            Schema::new()
                .field(fields::search_term(
                    "Text contained in the first name, last name or email",
                ))
                .field(fields::is_active("resources"))
                .field(FieldSpec::optional(
                    "resourceType",
                    FieldKind::Choice(RESOURCE_TYPES),
                    "Employee, Contractor or Temporary",
                ))
                .field(fields::page_size(25, "resources"))
        });
        &SCHEMA
    }
}

#[tool_router(router = resource_tools, vis = "pub(crate)")]
impl<C: RemoteClient> McpServer<C> {
    #[tool(
        annotations(read_only_hint = true),
        description = "Search resources (staff members) by name or email, active flag or type. Returns 25 resources by default; pageSize up to 500, or -1 for every match."
    )]
    pub async fn search_resources(
        &self,
        Parameters(input): Parameters<Input<ResourceQuery>>,
        cancel: CancellationToken,
    ) -> Result<CallToolResult, McpError> {
        let query = input.validate().map_err(map_validation_error)?;
        let outcome = self
            .resources
            .search(&query, &cancel)
            .await
            .map_err(map_service_error)?;
        search_result(outcome, EntityKind::Resources.label())
    }

    #[tool(
        annotations(read_only_hint = true),
        description = "Get one resource by ID."
    )]
    pub async fn get_resource(
        &self,
        Parameters(input): Parameters<Input<GetResourceParams>>,
    ) -> Result<CallToolResult, McpError> {
        let params = input.validate().map_err(map_validation_error)?;
        let record = self
            .resources
            .get(params.id)
            .await
            .map_err(map_service_error)?;
        record_result(record, "resource", params.id)
    }
}
