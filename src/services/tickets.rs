//! Ticket service.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::notes::{self, NoteField, NoteParams};
use super::search::{self, EntitySearch, SearchOutcome, UnlimitedMode};
use crate::client::{EntityKind, Filter, FilterField, RemoteClient};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TicketField {
    Id,
    TicketNumber,
    Title,
    CompanyId,
    Status,
    Priority,
    AssignedResourceId,
    CreateDate,
}

impl FilterField for TicketField {
    const ID: Self = TicketField::Id;

    fn name(&self) -> &'static str {
        match self {
            TicketField::Id => "id",
            TicketField::TicketNumber => "ticketNumber",
            TicketField::Title => "title",
            TicketField::CompanyId => "companyID",
            TicketField::Status => "status",
            TicketField::Priority => "priority",
            TicketField::AssignedResourceId => "assignedResourceID",
            TicketField::CreateDate => "createDate",
        }
    }
}

pub const TICKET_SEARCH: EntitySearch = EntitySearch {
    entity: EntityKind::Tickets,
    default_page_size: 25,
    unlimited: UnlimitedMode::Exhaustive,
};

pub const TICKET_NOTE_SEARCH: EntitySearch = notes::note_search(EntityKind::TicketNotes);

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketQuery {
    pub search_term: Option<String>,
    #[serde(rename = "companyID")]
    pub company_id: Option<i64>,
    pub status: Option<i64>,
    pub priority: Option<i64>,
    #[serde(rename = "assignedResourceID")]
    pub assigned_resource_id: Option<i64>,
    pub unassigned: Option<bool>,
    pub created_after: Option<String>,
    pub created_before: Option<String>,
    pub page_size: Option<i64>,
}

impl TicketQuery {
    pub fn filters(&self) -> Vec<Filter<TicketField>> {
        let mut filters = Vec::new();

        if let Some(term) = &self.search_term {
            filters.push(Filter::Or(vec![
                Filter::begins_with(TicketField::TicketNumber, term),
                Filter::contains(TicketField::Title, term),
            ]));
        }
        if let Some(company_id) = self.company_id {
            filters.push(Filter::eq(TicketField::CompanyId, company_id));
        }
        if let Some(status) = self.status {
            filters.push(Filter::eq(TicketField::Status, status));
        }
        if let Some(priority) = self.priority {
            filters.push(Filter::eq(TicketField::Priority, priority));
        }
        if let Some(resource_id) = self.assigned_resource_id {
            filters.push(Filter::eq(TicketField::AssignedResourceId, resource_id));
        } else if self.unassigned == Some(true) {
            filters.push(Filter::NotExist(TicketField::AssignedResourceId));
        }
        if let Some(after) = &self.created_after {
            filters.push(Filter::gte(TicketField::CreateDate, after.as_str()));
        }
        if let Some(before) = &self.created_before {
            filters.push(created_on_or_before(before));
        }

        filters
    }
}

/// `createDate` is a timestamp, so a whole-day upper bound is `lt` the next day.
fn created_on_or_before(date: &str) -> Filter<TicketField> {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .and_then(|day| day.succ_opt())
    {
        Some(next) => Filter::lt(TicketField::CreateDate, next.format("%Y-%m-%d").to_string()),
        None => Filter::lte(TicketField::CreateDate, date),
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTicket {
    #[serde(rename = "companyID")]
    pub company_id: i64,
    pub title: String,
    pub status: i64,
    pub priority: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "queueID", skip_serializing_if = "Option::is_none")]
    pub queue_id: Option<i64>,
    #[serde(rename = "contactID", skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<i64>,
    #[serde(rename = "assignedResourceID", skip_serializing_if = "Option::is_none")]
    pub assigned_resource_id: Option<i64>,
    #[serde(
        rename = "assignedResourceRoleID",
        skip_serializing_if = "Option::is_none"
    )]
    pub assigned_resource_role_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketUpdate {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(rename = "queueID", skip_serializing_if = "Option::is_none")]
    pub queue_id: Option<i64>,
    #[serde(rename = "assignedResourceID", skip_serializing_if = "Option::is_none")]
    pub assigned_resource_id: Option<i64>,
    #[serde(
        rename = "assignedResourceRoleID",
        skip_serializing_if = "Option::is_none"
    )]
    pub assigned_resource_role_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TicketNoteQuery {
    #[serde(rename = "ticketID")]
    pub ticket_id: i64,
    #[serde(rename = "pageSize")]
    pub page_size: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewTicketNote {
    #[serde(rename = "ticketID")]
    pub ticket_id: i64,
    #[serde(flatten)]
    pub note: NoteParams,
}

pub struct TicketService<C: RemoteClient> {
    ctx: Arc<ServiceContext<C>>,
}

impl<C: RemoteClient> Clone for TicketService<C> {
    fn clone(&self) -> Self {
        Self {
            ctx: Arc::clone(&self.ctx),
        }
    }
}

impl<C: RemoteClient> TicketService<C> {
    pub fn new(ctx: Arc<ServiceContext<C>>) -> Self {
        Self { ctx }
    }

    pub async fn search(
        &self,
        query: &TicketQuery,
        cancel: &CancellationToken,
    ) -> ServiceResult<SearchOutcome> {
        search::run(&self.ctx, &TICKET_SEARCH, query.filters(), query.page_size, cancel).await
    }

    pub async fn get(&self, id: i64) -> ServiceResult<Option<Value>> {
        self.ctx.fetch_one(EntityKind::Tickets, id).await
    }

    pub async fn create(&self, ticket: &NewTicket) -> ServiceResult<i64> {
        let payload = serde_json::to_value(ticket)?;
        self.ctx.create_one(EntityKind::Tickets, &payload).await
    }

    pub async fn update(&self, update: &TicketUpdate) -> ServiceResult<i64> {
        let payload = serde_json::to_value(update)?;
        self.ctx.update_one(EntityKind::Tickets, &payload).await
    }

    pub async fn search_notes(
        &self,
        query: &TicketNoteQuery,
        cancel: &CancellationToken,
    ) -> ServiceResult<SearchOutcome> {
        notes::search_notes(
            &self.ctx,
            &TICKET_NOTE_SEARCH,
            NoteField::TicketId,
            query.ticket_id,
            query.page_size,
            cancel,
        )
        .await
    }

    pub async fn create_note(&self, note: NewTicketNote) -> ServiceResult<i64> {
        notes::create_note(
            &self.ctx,
            EntityKind::Tickets,
            NoteField::TicketId,
            note.ticket_id,
            note.note,
        )
        .await
    }
}
