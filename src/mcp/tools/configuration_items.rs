//! MCP tools for configuration items.

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
    updated_result,
};
use crate::services::configuration_items::{
    ConfigurationItemQuery, ConfigurationItemUpdate, NewConfigurationItem,
};
use crate::validation::{FieldKind, FieldSpec, Input, Schema, ToolInput, fields};

#[derive(Debug, serde::Deserialize)]
pub struct GetConfigurationItemParams {
    pub id: i64,
}

impl ToolInput for GetConfigurationItemParams {
    const NAME: &'static str = "GetConfigurationItemParams";

    fn schema() -> &'static Schema {
        static SCHEMA: LazyLock<Schema> =
            LazyLock::new(|| Schema::new().field(fields::id("Configuration item")));
        &SCHEMA
    }
}

impl ToolInput for ConfigurationItemQuery {
    const NAME: &'static str = "SearchConfigurationItemsParams";

    fn schema() -> &'static Schema {
        static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
            Schema::new()
                .field(fields::search_term(
                    "Text contained in the reference title or serial number",
                ))
                .field(fields::company_id(false, "Only items installed at this company"))
                .field(fields::is_active("configuration items"))
                .field(fields::entity_ref("productID", "Only items of this product"))
                .field(fields::page_size(25, "configuration items"))
        });
        &SCHEMA
    }
}

impl ToolInput for NewConfigurationItem {
    const NAME: &'static str = "CreateConfigurationItemParams";

    fn schema() -> &'static Schema {
        static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
            Schema::new()
                .field(fields::company_id(true, "Company the item is installed at"))
                .field(FieldSpec::required(
                    "productID",
                    FieldKind::EntityId,
                    "Product the item is an instance of",
                ))
                .field(fields::text("referenceTitle", 200, false, "Reference title"))
                .field(fields::text("serialNumber", 100, false, "Serial number"))
                .field(FieldSpec::optional(
                    "isActive",
                    FieldKind::Boolean,
                    "Whether the item is active (default true)",
                ))
                .field(FieldSpec::optional(
                    "installDate",
                    FieldKind::Date,
                    "Install date (YYYY-MM-DD)",
                ))
                .field(FieldSpec::optional(
                    "warrantyExpirationDate",
                    FieldKind::Date,
                    "Warranty expiration date (YYYY-MM-DD), on or after installDate",
                ))
                .not_before("installDate", "warrantyExpirationDate")
        });
        &SCHEMA
    }
}

impl ToolInput for ConfigurationItemUpdate {
    const NAME: &'static str = "UpdateConfigurationItemParams";

    fn schema() -> &'static Schema {
        static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
            Schema::new()
                .field(fields::id("Configuration item"))
                .field(fields::entity_ref("productID", "New product"))
                .field(fields::text("referenceTitle", 200, false, "New reference title"))
                .field(fields::text("serialNumber", 100, false, "New serial number"))
                .field(FieldSpec::optional(
                    "isActive",
                    FieldKind::Boolean,
                    "Activate or deactivate the item",
                ))
                .field(FieldSpec::optional(
                    "installDate",
                    FieldKind::Date,
                    "New install date (YYYY-MM-DD)",
                ))
                .field(FieldSpec::optional(
                    "warrantyExpirationDate",
                    FieldKind::Date,
                    "New warranty expiration date (YYYY-MM-DD)",
                ))
                .not_before("installDate", "warrantyExpirationDate")
                .require_any_besides("id")
        });
        &SCHEMA
    }
}

#[tool_router(router = configuration_item_tools, vis = "pub(crate)")]
impl<C: RemoteClient> McpServer<C> {
    #[tool(
        annotations(read_only_hint = true),
        description = "Search configuration items (installed products) by title or serial number, company, active flag or product. Returns 25 items by default; pageSize up to 500, or -1 for every match."
    )]
    pub async fn search_configuration_items(
        &self,
        Parameters(input): Parameters<Input<ConfigurationItemQuery>>,
        cancel: CancellationToken,
    ) -> Result<CallToolResult, McpError> {
        let query = input.validate().map_err(map_validation_error)?;
        let outcome = self
            .configuration_items
            .search(&query, &cancel)
            .await
            .map_err(map_service_error)?;
        search_result(outcome, EntityKind::ConfigurationItems.label())
    }

    #[tool(
        annotations(read_only_hint = true),
        description = "Get one configuration item by ID."
    )]
    pub async fn get_configuration_item(
        &self,
        Parameters(input): Parameters<Input<GetConfigurationItemParams>>,
    ) -> Result<CallToolResult, McpError> {
        let params = input.validate().map_err(map_validation_error)?;
        let record = self
            .configuration_items
            .get(params.id)
            .await
            .map_err(map_service_error)?;
        record_result(record, "configuration item", params.id)
    }

    #[tool(
        annotations(read_only_hint = false, destructive_hint = false),
        description = "Create a configuration item at a company."
    )]
    pub async fn create_configuration_item(
        &self,
        Parameters(input): Parameters<Input<NewConfigurationItem>>,
    ) -> Result<CallToolResult, McpError> {
        let item = input.validate().map_err(map_validation_error)?;
        let id = self
            .configuration_items
            .create(&item)
            .await
            .map_err(map_service_error)?;
        created_result(id, "configuration item")
    }

    #[tool(
        annotations(read_only_hint = false, destructive_hint = false),
        description = "Update a configuration item. Provide the item id and at least one field to change."
    )]
    pub async fn update_configuration_item(
        &self,
        Parameters(input): Parameters<Input<ConfigurationItemUpdate>>,
    ) -> Result<CallToolResult, McpError> {
        let update = input.validate().map_err(map_validation_error)?;
        let id = self
            .configuration_items
            .update(&update)
            .await
            .map_err(map_service_error)?;
        updated_result(id, "configuration item")
    }
}
