//! MCP tools for companies and company notes.

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
use crate::services::companies::{
    CompanyNoteQuery, CompanyQuery, CompanyUpdate, NewCompany, NewCompanyNote,
};
use crate::validation::{FieldKind, FieldSpec, Input, Schema, ToolInput, fields};

/// `id` here is a company reference, so 0 (the default company) is valid.
#[derive(Debug, serde::Deserialize)]
pub struct GetCompanyParams {
    pub id: i64,
}

impl ToolInput for GetCompanyParams {
    const NAME: &'static str = "GetCompanyParams";

    fn schema() -> &'static Schema {
        static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
            Schema::new().field(FieldSpec::required(
                "id",
                FieldKind::CompanyRef,
                "Company ID (0 is the default/system company)",
            ))
        });
        &SCHEMA
    }
}

const COMPANY_TYPE: FieldKind = FieldKind::Integer {
    min: Some(1),
    max: None,
};

impl ToolInput for CompanyQuery {
    const NAME: &'static str = "SearchCompaniesParams";

    fn schema() -> &'static Schema {
        static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
            Schema::new()
                .field(fields::search_term("Text contained in the company name"))
                .field(fields::is_active("companies"))
                .field(fields::entity_ref(
                    "ownerResourceID",
                    "Only companies owned by this resource",
                ))
                .field(fields::page_size(50, "companies"))
        });
        &SCHEMA
    }
}

impl ToolInput for NewCompany {
    const NAME: &'static str = "CreateCompanyParams";

    fn schema() -> &'static Schema {
        static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
            Schema::new()
                .field(fields::text("companyName", 100, true, "Company name"))
                .field(FieldSpec::required(
                    "companyType",
                    COMPANY_TYPE,
                    "Company type value (1 = customer)",
                ))
                .field(fields::text("phone", 25, false, "Main phone number"))
                .field(fields::text("address1", 150, false, "Street address"))
                .field(fields::text("city", 50, false, "City"))
                .field(fields::text("state", 25, false, "State or region"))
                .field(fields::text("postalCode", 10, false, "Postal code"))
                .field(fields::entity_ref("ownerResourceID", "Account owner"))
                .field(FieldSpec::optional(
                    "isActive",
                    FieldKind::Boolean,
                    "Whether the company is active (default true)",
                ))
        });
        &SCHEMA
    }
}

impl ToolInput for CompanyUpdate {
    const NAME: &'static str = "UpdateCompanyParams";

    fn schema() -> &'static Schema {
        static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
            Schema::new()
                .field(FieldSpec::required(
                    "id",
                    FieldKind::CompanyRef,
                    "Company ID (0 is the default/system company)",
                ))
                .field(fields::text("companyName", 100, false, "New company name"))
                .field(FieldSpec::optional(
                    "companyType",
                    COMPANY_TYPE,
                    "New company type value",
                ))
                .field(fields::text("phone", 25, false, "New phone number"))
                .field(fields::text("address1", 150, false, "New street address"))
                .field(fields::text("city", 50, false, "New city"))
                .field(fields::text("state", 25, false, "New state or region"))
                .field(fields::text("postalCode", 10, false, "New postal code"))
                .field(fields::entity_ref("ownerResourceID", "New account owner"))
                .field(FieldSpec::optional(
                    "isActive",
                    FieldKind::Boolean,
                    "Activate or deactivate the company",
                ))
                .require_any_besides("id")
        });
        &SCHEMA
    }
}

impl ToolInput for CompanyNoteQuery {
    const NAME: &'static str = "SearchCompanyNotesParams";

    fn schema() -> &'static Schema {
        static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
            Schema::new()
                .field(fields::company_id(true, "Company whose notes to list"))
                .field(fields::page_size(25, "notes"))
        });
        &SCHEMA
    }
}

impl ToolInput for NewCompanyNote {
    const NAME: &'static str = "CreateCompanyNoteParams";

    fn schema() -> &'static Schema {
        static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
            Schema::new()
                .field(fields::company_id(true, "Company to add the note to"))
                .with_fields(fields::note_fields())
        });
        &SCHEMA
    }
}

#[tool_router(router = company_tools, vis = "pub(crate)")]
impl<C: RemoteClient> McpServer<C> {
    #[tool(
        annotations(read_only_hint = true),
        description = "Search companies by name, active flag or owner. Returns 50 companies by default; pageSize up to 500, or -1 for every match."
    )]
    pub async fn search_companies(
        &self,
        Parameters(input): Parameters<Input<CompanyQuery>>,
        cancel: CancellationToken,
    ) -> Result<CallToolResult, McpError> {
        let query = input.validate().map_err(map_validation_error)?;
        let outcome = self
            .companies
            .search(&query, &cancel)
            .await
            .map_err(map_service_error)?;
        search_result(outcome, EntityKind::Companies.label())
    }

    #[tool(
        annotations(read_only_hint = true),
        description = "Get one company by ID. ID 0 is the default/system company."
    )]
    pub async fn get_company(
        &self,
        Parameters(input): Parameters<Input<GetCompanyParams>>,
    ) -> Result<CallToolResult, McpError> {
        let params = input.validate().map_err(map_validation_error)?;
        let record = self
            .companies
            .get(params.id)
            .await
            .map_err(map_service_error)?;
        record_result(record, "company", params.id)
    }

    #[tool(
        annotations(read_only_hint = false, destructive_hint = false),
        description = "Create a company."
    )]
    pub async fn create_company(
        &self,
        Parameters(input): Parameters<Input<NewCompany>>,
    ) -> Result<CallToolResult, McpError> {
        let company = input.validate().map_err(map_validation_error)?;
        let id = self
            .companies
            .create(&company)
            .await
            .map_err(map_service_error)?;
        created_result(id, "company")
    }

    #[tool(
        annotations(read_only_hint = false, destructive_hint = false),
        description = "Update a company. Provide the company id and at least one field to change."
    )]
    pub async fn update_company(
        &self,
        Parameters(input): Parameters<Input<CompanyUpdate>>,
    ) -> Result<CallToolResult, McpError> {
        let update = input.validate().map_err(map_validation_error)?;
        let id = self
            .companies
            .update(&update)
            .await
            .map_err(map_service_error)?;
        updated_result(id, "company")
    }

    #[tool(
        annotations(read_only_hint = true),
        description = "List the notes of a company. Returns 25 notes by default; pageSize up to 500."
    )]
    pub async fn search_company_notes(
        &self,
        Parameters(input): Parameters<Input<CompanyNoteQuery>>,
        cancel: CancellationToken,
    ) -> Result<CallToolResult, McpError> {
        let query = input.validate().map_err(map_validation_error)?;
        let outcome = self
            .companies
            .search_notes(&query, &cancel)
            .await
            .map_err(map_service_error)?;
        search_result(outcome, EntityKind::CompanyNotes.label())
    }

    #[tool(
        annotations(read_only_hint = false, destructive_hint = false),
        description = "Add a note to a company. publish: 1 = all users (default), 2 = internal only, 3 = internal and co-managed. noteType 1-6 (default 1)."
    )]
    pub async fn create_company_note(
        &self,
        Parameters(input): Parameters<Input<NewCompanyNote>>,
    ) -> Result<CallToolResult, McpError> {
        let note = input.validate().map_err(map_validation_error)?;
        let id = self
            .companies
            .create_note(note)
            .await
            .map_err(map_service_error)?;
        created_result(id, "company note")
    }
}
