//! MCP tools for tickets and ticket notes.

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
use crate::services::tickets::{NewTicket, NewTicketNote, TicketNoteQuery, TicketQuery, TicketUpdate};
use crate::validation::{FieldKind, FieldSpec, Input, JsonObject, Schema, ToolInput, fields};

#[derive(Debug, serde::Deserialize)]
pub struct GetTicketParams {
    pub id: i64,
}

impl ToolInput for GetTicketParams {
    const NAME: &'static str = "GetTicketParams";

    fn schema() -> &'static Schema {
        static SCHEMA: LazyLock<Schema> = LazyLock::new(|| Schema::new().field(fields::id("Ticket")));
        &SCHEMA
    }
}

fn status() -> FieldKind {
    FieldKind::Integer {
        min: Some(1),
        max: None,
    }
}

fn role_accompanies_resource(input: &JsonObject) -> bool {
    !input.contains_key("assignedResourceID") || input.contains_key("assignedResourceRoleID")
}

fn unassigned_without_assignee(input: &JsonObject) -> bool {
    !(input.get("unassigned") == Some(&serde_json::Value::Bool(true))
        && input.contains_key("assignedResourceID"))
}

const ROLE_MESSAGE: &str = "assignedResourceRoleID is required when assignedResourceID is set";

impl ToolInput for TicketQuery {
    const NAME: &'static str = "SearchTicketsParams";

    fn schema() -> &'static Schema {
        static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
            Schema::new()
                .field(fields::search_term(
                    "Ticket number prefix (e.g. T2025) or text contained in the title",
                ))
                .field(fields::company_id(false, "Only tickets of this company"))
                .field(FieldSpec::optional("status", status(), "Ticket status value"))
                .field(FieldSpec::optional("priority", status(), "Ticket priority value"))
                .field(fields::entity_ref(
                    "assignedResourceID",
                    "Only tickets assigned to this resource",
                ))
                .field(FieldSpec::optional(
                    "unassigned",
                    FieldKind::Boolean,
                    "Only tickets without an assigned resource",
                ))
                .field(FieldSpec::optional(
                    "createdAfter",
                    FieldKind::Date,
                    "Created on or after this date (YYYY-MM-DD)",
                ))
                .field(FieldSpec::optional(
                    "createdBefore",
                    FieldKind::Date,
                    "Created on or before this date (YYYY-MM-DD)",
                ))
                .field(fields::page_size(25, "tickets"))
                .not_before("createdAfter", "createdBefore")
                .refine(
                    "unassigned",
                    "unassigned cannot be combined with assignedResourceID",
                    unassigned_without_assignee,
                )
        });
        &SCHEMA
    }
}

impl ToolInput for NewTicket {
    const NAME: &'static str = "CreateTicketParams";

    fn schema() -> &'static Schema {
        static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
            Schema::new()
                .field(fields::company_id(true, "Company the ticket is for"))
                .field(fields::text("title", 255, true, "Ticket title"))
                .field(FieldSpec::required("status", status(), "Ticket status value (1 = New)"))
                .field(FieldSpec::required("priority", status(), "Ticket priority value"))
                .field(fields::text("description", 8000, false, "Ticket description"))
                .field(fields::entity_ref("queueID", "Queue to place the ticket in"))
                .field(fields::entity_ref("contactID", "Contact who reported the issue"))
                .field(fields::entity_ref("assignedResourceID", "Resource to assign"))
                .field(fields::entity_ref(
                    "assignedResourceRoleID",
                    "Role of the assigned resource (required with assignedResourceID)",
                ))
                .field(FieldSpec::optional(
                    "dueDateTime",
                    FieldKind::DateTime,
                    "Due date-time (ISO-8601, e.g. 2025-01-31T17:00:00Z)",
                ))
                .refine("assignedResourceRoleID", ROLE_MESSAGE, role_accompanies_resource)
        });
        &SCHEMA
    }
}

impl ToolInput for TicketUpdate {
    const NAME: &'static str = "UpdateTicketParams";

    fn schema() -> &'static Schema {
        static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
            Schema::new()
                .field(fields::id("Ticket"))
                .field(fields::text("title", 255, false, "New title"))
                .field(fields::text("description", 8000, false, "New description"))
                .field(FieldSpec::optional("status", status(), "New status value"))
                .field(FieldSpec::optional("priority", status(), "New priority value"))
                .field(fields::entity_ref("queueID", "Move to this queue"))
                .field(fields::entity_ref("assignedResourceID", "Reassign to this resource"))
                .field(fields::entity_ref(
                    "assignedResourceRoleID",
                    "Role of the assigned resource (required with assignedResourceID)",
                ))
                .field(FieldSpec::optional(
                    "dueDateTime",
                    FieldKind::DateTime,
                    "New due date-time (ISO-8601)",
                ))
                .refine("assignedResourceRoleID", ROLE_MESSAGE, role_accompanies_resource)
                .require_any_besides("id")
        });
        &SCHEMA
    }
}

impl ToolInput for TicketNoteQuery {
    const NAME: &'static str = "SearchTicketNotesParams";

    fn schema() -> &'static Schema {
        static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
            Schema::new()
                .field(FieldSpec::required("ticketID", FieldKind::EntityId, "Ticket ID"))
                .field(fields::page_size(25, "notes"))
        });
        &SCHEMA
    }
}

impl ToolInput for NewTicketNote {
    const NAME: &'static str = "CreateTicketNoteParams";

    fn schema() -> &'static Schema {
        static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
            Schema::new()
                .field(FieldSpec::required(
                    "ticketID",
                    FieldKind::EntityId,
                    "Ticket to add the note to",
                ))
                .with_fields(fields::note_fields())
        });
        &SCHEMA
    }
}

#[tool_router(router = ticket_tools, vis = "pub(crate)")]
impl<C: RemoteClient> McpServer<C> {
    #[tool(
        annotations(read_only_hint = true),
        description = "Search tickets by number/title, company, status, priority, assignee or creation date. Returns 25 tickets by default; pageSize up to 500, or -1 for every match."
    )]
    pub async fn search_tickets(
        &self,
        Parameters(input): Parameters<Input<TicketQuery>>,
        cancel: CancellationToken,
    ) -> Result<CallToolResult, McpError> {
        let query = input.validate().map_err(map_validation_error)?;
        let outcome = self.tickets.search(&query, &cancel).await.map_err(map_service_error)?;
        search_result(outcome, EntityKind::Tickets.label())
    }

    #[tool(
        annotations(read_only_hint = true),
        description = "Get one ticket by ID."
    )]
    pub async fn get_ticket(
        &self,
        Parameters(input): Parameters<Input<GetTicketParams>>,
    ) -> Result<CallToolResult, McpError> {
        let params = input.validate().map_err(map_validation_error)?;
        let record = self.tickets.get(params.id).await.map_err(map_service_error)?;
        record_result(record, "ticket", params.id)
    }

    #[tool(
        annotations(read_only_hint = false, destructive_hint = false),
        description = "Create a ticket. companyID 0 is the default company. assignedResourceRoleID is required when assignedResourceID is set."
    )]
    pub async fn create_ticket(
        &self,
        Parameters(input): Parameters<Input<NewTicket>>,
    ) -> Result<CallToolResult, McpError> {
        let ticket = input.validate().map_err(map_validation_error)?;
        let id = self.tickets.create(&ticket).await.map_err(map_service_error)?;
        created_result(id, "ticket")
    }

    #[tool(
        annotations(read_only_hint = false, destructive_hint = false),
        description = "Update a ticket. Provide the ticket id and at least one field to change."
    )]
    pub async fn update_ticket(
        &self,
        Parameters(input): Parameters<Input<TicketUpdate>>,
    ) -> Result<CallToolResult, McpError> {
        let update = input.validate().map_err(map_validation_error)?;
        let id = self.tickets.update(&update).await.map_err(map_service_error)?;
        updated_result(id, "ticket")
    }

    #[tool(
        annotations(read_only_hint = true),
        description = "List the notes of a ticket. Returns 25 notes by default; pageSize up to 500 (-1 also returns at most 500)."
    )]
    pub async fn search_ticket_notes(
        &self,
        Parameters(input): Parameters<Input<TicketNoteQuery>>,
        cancel: CancellationToken,
    ) -> Result<CallToolResult, McpError> {
        let query = input.validate().map_err(map_validation_error)?;
        let outcome = self
            .tickets
            .search_notes(&query, &cancel)
            .await
            .map_err(map_service_error)?;
        search_result(outcome, EntityKind::TicketNotes.label())
    }

    #[tool(
        annotations(read_only_hint = false, destructive_hint = false),
        description = "Add a note to a ticket. publish: 1 = all users (default), 2 = internal only, 3 = internal and co-managed. noteType 1-6 (default 1)."
    )]
    pub async fn create_ticket_note(
        &self,
        Parameters(input): Parameters<Input<NewTicketNote>>,
    ) -> Result<CallToolResult, McpError> {
        let note = input.validate().map_err(map_validation_error)?;
        let id = self
            .tickets
            .create_note(note)
            .await
            .map_err(map_service_error)?;
        created_result(id, "ticket note")
    }
}
