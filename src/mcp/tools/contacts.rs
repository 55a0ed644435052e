//! MCP tools for contacts.

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
use crate::services::contacts::{ContactQuery, ContactUpdate, NewContact};
use crate::validation::{FieldKind, FieldSpec, Input, Schema, ToolInput, fields};

#[derive(Debug, serde::Deserialize)]
pub struct GetContactParams {
    pub id: i64,
}

impl ToolInput for GetContactParams {
    const NAME: &'static str = "GetContactParams";

    fn schema() -> &'static Schema {
        static SCHEMA: LazyLock<Schema> =
            LazyLock::new(|| Schema::new().field(fields::id("Contact")));
        &SCHEMA
    }
}

impl ToolInput for ContactQuery {
    const NAME: &'static str = "SearchContactsParams";

    fn schema() -> &'static Schema {
        static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
            Schema::new()
                .field(fields::search_term(
                    "Text contained in the first name, last name or email address",
                ))
                .field(fields::company_id(false, "Only contacts of this company"))
                .field(fields::is_active("contacts"))
                .field(fields::page_size(50, "contacts"))
        });
        &SCHEMA
    }
}

impl ToolInput for NewContact {
    const NAME: &'static str = "CreateContactParams";

    fn schema() -> &'static Schema {
        static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
            Schema::new()
                .field(fields::company_id(true, "Company the contact belongs to"))
                .field(fields::text("firstName", 50, true, "First name"))
                .field(fields::text("lastName", 50, true, "Last name"))
                .field(fields::text("emailAddress", 254, false, "Email address"))
                .field(fields::text("phone", 25, false, "Phone number"))
                .field(fields::text("title", 50, false, "Job title"))
        });
        &SCHEMA
    }
}

impl ToolInput for ContactUpdate {
    const NAME: &'static str = "UpdateContactParams";

    fn schema() -> &'static Schema {
        static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
            Schema::new()
                .field(fields::id("Contact"))
                .field(fields::text("firstName", 50, false, "New first name"))
                .field(fields::text("lastName", 50, false, "New last name"))
                .field(fields::text("emailAddress", 254, false, "New email address"))
                .field(fields::text("phone", 25, false, "New phone number"))
                .field(fields::text("title", 50, false, "New job title"))
                .field(FieldSpec::optional(
                    "isActive",
                    FieldKind::Boolean,
                    "Activate or deactivate the contact",
                ))
                .require_any_besides("id")
        });
        &SCHEMA
    }
}

#[tool_router(router = contact_tools, vis = "pub(crate)")]
impl<C: RemoteClient> McpServer<C> {
    #[tool(
        annotations(read_only_hint = true),
        description = "Search contacts by name or email, company or active flag. companyID 0 is the default company. Returns 50 contacts by default; pageSize up to 500, or -1 for every match."
    )]
    pub async fn search_contacts(
        &self,
        Parameters(input): Parameters<Input<ContactQuery>>,
        cancel: CancellationToken,
    ) -> Result<CallToolResult, McpError> {
        let query = input.validate().map_err(map_validation_error)?;
        let outcome = self
            .contacts
            .search(&query, &cancel)
            .await
            .map_err(map_service_error)?;
        search_result(outcome, EntityKind::Contacts.label())
    }

    #[tool(
        annotations(read_only_hint = true),
        description = "Get one contact by ID."
    )]
    pub async fn get_contact(
        &self,
        Parameters(input): Parameters<Input<GetContactParams>>,
    ) -> Result<CallToolResult, McpError> {
        let params = input.validate().map_err(map_validation_error)?;
        let record = self
            .contacts
            .get(params.id)
            .await
            .map_err(map_service_error)?;
        record_result(record, "contact", params.id)
    }

    #[tool(
        annotations(read_only_hint = false, destructive_hint = false),
        description = "Create a contact under a company."
    )]
    pub async fn create_contact(
        &self,
        Parameters(input): Parameters<Input<NewContact>>,
    ) -> Result<CallToolResult, McpError> {
        let contact = input.validate().map_err(map_validation_error)?;
        let id = self
            .contacts
            .create(&contact)
            .await
            .map_err(map_service_error)?;
        created_result(id, "contact")
    }

    #[tool(
        annotations(read_only_hint = false, destructive_hint = false),
        description = "Update a contact. Provide the contact id and at least one field to change."
    )]
    pub async fn update_contact(
        &self,
        Parameters(input): Parameters<Input<ContactUpdate>>,
    ) -> Result<CallToolResult, McpError> {
        let update = input.validate().map_err(map_validation_error)?;
        let id = self
            .contacts
            .update(&update)
            .await
            .map_err(map_service_error)?;
        updated_result(id, "contact")
    }
}
