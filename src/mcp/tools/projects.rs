//! MCP tools for projects and project notes.

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
use crate::services::projects::{
    NewProject, NewProjectNote, ProjectNoteQuery, ProjectQuery, ProjectUpdate,
};
use crate::validation::{FieldKind, FieldSpec, Input, Schema, ToolInput, fields};

#[derive(Debug, serde::Deserialize)]
pub struct GetProjectParams {
    pub id: i64,
}

impl ToolInput for GetProjectParams {
    const NAME: &'static str = "GetProjectParams";

    fn schema() -> &'static Schema {
        static SCHEMA: LazyLock<Schema> =
            LazyLock::new(|| Schema::new().field(fields::id("Project")));
        &SCHEMA
    }
}

fn positive() -> FieldKind {
    FieldKind::Integer {
        min: Some(1),
        max: None,
    }
}

impl ToolInput for ProjectQuery {
    const NAME: &'static str = "SearchProjectsParams";

    fn schema() -> &'static Schema {
        static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
            Schema::new()
                .field(fields::search_term("Text contained in the project name"))
                .field(fields::company_id(false, "Only projects of this company"))
                .field(FieldSpec::optional("status", positive(), "Project status value"))
                .field(fields::entity_ref(
                    "projectLeadResourceID",
                    "Only projects led by this resource",
                ))
                .field(fields::page_size(25, "projects"))
        });
        &SCHEMA
    }
}

impl ToolInput for NewProject {
    const NAME: &'static str = "CreateProjectParams";

    fn schema() -> &'static Schema {
        static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
            Schema::new()
                .field(fields::company_id(true, "Company the project is for"))
                .field(fields::text("projectName", 100, true, "Project name"))
                .field(FieldSpec::required(
                    "type",
                    positive(),
                    "Project type value (e.g. 5 = client project)",
                ))
                .field(FieldSpec::required("status", positive(), "Project status value"))
                .field(FieldSpec::required(
                    "startDate",
                    FieldKind::Date,
                    "Start date (YYYY-MM-DD)",
                ))
                .field(FieldSpec::required(
                    "endDate",
                    FieldKind::Date,
                    "End date (YYYY-MM-DD), on or after startDate",
                ))
                .field(fields::text("description", 2000, false, "Project description"))
                .field(fields::entity_ref("projectLeadResourceID", "Project lead"))
                .not_before("startDate", "endDate")
        });
        &SCHEMA
    }
}

impl ToolInput for ProjectUpdate {
    const NAME: &'static str = "UpdateProjectParams";

    fn schema() -> &'static Schema {
        static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
            Schema::new()
                .field(fields::id("Project"))
                .field(fields::text("projectName", 100, false, "New project name"))
                .field(FieldSpec::optional("status", positive(), "New status value"))
                .field(FieldSpec::optional(
                    "startDate",
                    FieldKind::Date,
                    "New start date (YYYY-MM-DD)",
                ))
                .field(FieldSpec::optional(
                    "endDate",
                    FieldKind::Date,
                    "New end date (YYYY-MM-DD)",
                ))
                .field(fields::text("description", 2000, false, "New description"))
                .field(fields::entity_ref("projectLeadResourceID", "New project lead"))
                .not_before("startDate", "endDate")
                .require_any_besides("id")
        });
        &SCHEMA
    }
}

impl ToolInput for ProjectNoteQuery {
    const NAME: &'static str = "SearchProjectNotesParams";

    fn schema() -> &'static Schema {
        static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
            Schema::new()
                .field(FieldSpec::required("projectID", FieldKind::EntityId, "Project ID"))
                .field(fields::page_size(25, "notes"))
        });
        &SCHEMA
    }
}

impl ToolInput for NewProjectNote {
    const NAME: &'static str = "CreateProjectNoteParams";

    fn schema() -> &'static Schema {
        static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
            Schema::new()
                .field(FieldSpec::required(
                    "projectID",
                    FieldKind::EntityId,
                    "Project to add the note to",
                ))
                .with_fields(fields::note_fields())
        });
        &SCHEMA
    }
}

#[tool_router(router = project_tools, vis = "pub(crate)")]
impl<C: RemoteClient> McpServer<C> {
    #[tool(
        annotations(read_only_hint = true),
        description = "Search projects by name, company, status or project lead. Returns 25 projects by default; pageSize up to 500 (-1 also returns at most 500)."
    )]
    pub async fn search_projects(
        &self,
        Parameters(input): Parameters<Input<ProjectQuery>>,
        cancel: CancellationToken,
    ) -> Result<CallToolResult, McpError> {
        let query = input.validate().map_err(map_validation_error)?;
        let outcome = self
            .projects
            .search(&query, &cancel)
            .await
            .map_err(map_service_error)?;
        search_result(outcome, EntityKind::Projects.label())
    }

    #[tool(
        annotations(read_only_hint = true),
        description = "Get one project by ID."
    )]
    pub async fn get_project(
        &self,
        Parameters(input): Parameters<Input<GetProjectParams>>,
    ) -> Result<CallToolResult, McpError> {
        let params = input.validate().map_err(map_validation_error)?;
        let record = self
            .projects
            .get(params.id)
            .await
            .map_err(map_service_error)?;
        record_result(record, "project", params.id)
    }

    #[tool(
        annotations(read_only_hint = false, destructive_hint = false),
        description = "Create a project. endDate must be on or after startDate."
    )]
    pub async fn create_project(
        &self,
        Parameters(input): Parameters<Input<NewProject>>,
    ) -> Result<CallToolResult, McpError> {
        let project = input.validate().map_err(map_validation_error)?;
        let id = self
            .projects
            .create(&project)
            .await
            .map_err(map_service_error)?;
        created_result(id, "project")
    }

    #[tool(
        annotations(read_only_hint = false, destructive_hint = false),
        description = "Update a project. Provide the project id and at least one field to change."
    )]
    pub async fn update_project(
        &self,
        Parameters(input): Parameters<Input<ProjectUpdate>>,
    ) -> Result<CallToolResult, McpError> {
        let update = input.validate().map_err(map_validation_error)?;
        let id = self
            .projects
            .update(&update)
            .await
            .map_err(map_service_error)?;
        updated_result(id, "project")
    }

    #[tool(
        annotations(read_only_hint = true),
        description = "List the notes of a project. Returns 25 notes by default; pageSize up to 500."
    )]
    pub async fn search_project_notes(
        &self,
        Parameters(input): Parameters<Input<ProjectNoteQuery>>,
        cancel: CancellationToken,
    ) -> Result<CallToolResult, McpError> {
        let query = input.validate().map_err(map_validation_error)?;
        let outcome = self
            .projects
            .search_notes(&query, &cancel)
            .await
            .map_err(map_service_error)?;
        search_result(outcome, EntityKind::ProjectNotes.label())
    }

    #[tool(
        annotations(read_only_hint = false, destructive_hint = false),
        description = "Add a note to a project. publish: 1 = all users (default), 2 = internal only, 3 = internal and co-managed. noteType 1-6 (default 1)."
    )]
    pub async fn create_project_note(
        &self,
        Parameters(input): Parameters<Input<NewProjectNote>>,
    ) -> Result<CallToolResult, McpError> {
        let note = input.validate().map_err(map_validation_error)?;
        let id = self
            .projects
            .create_note(note)
            .await
            .map_err(map_service_error)?;
        created_result(id, "project note")
    }
}
