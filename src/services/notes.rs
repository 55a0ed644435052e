//! Note payload construction shared by ticket, project and company notes.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::search::{self, EntitySearch, SearchOutcome, UnlimitedMode};
use crate::client::{EntityKind, Filter, FilterField, RemoteClient};
use crate::validation::fields::{
    MAX_NOTE_DESCRIPTION, MAX_NOTE_TITLE, NOTE_TYPE_VALUES, PUBLISH_VALUES,
};
use crate::validation::{ValidationError, Violation};

pub const DEFAULT_PUBLISH: u8 = 1;
pub const DEFAULT_NOTE_TYPE: u8 = 1;

/// Queryable fields of the note collections.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NoteField {
    Id,
    TicketId,
    ProjectId,
    CompanyId,
}

impl FilterField for NoteField {
    const ID: Self = NoteField::Id;

    fn name(&self) -> &'static str {
        match self {
            NoteField::Id => "id",
            NoteField::TicketId => "ticketID",
            NoteField::ProjectId => "projectID",
            NoteField::CompanyId => "companyID",
        }
    }
}

/// Note collection searches serve `pageSize: -1` with one ceiling page.
pub const fn note_search(entity: EntityKind) -> EntitySearch {
    EntitySearch {
        entity,
        default_page_size: 25,
        unlimited: UnlimitedMode::CeilingPage,
    }
}

/// Caller-supplied note fields, before defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NoteParams {
    pub description: Option<String>,
    pub title: Option<String>,
    pub publish: Option<i64>,
    #[serde(rename = "noteType")]
    pub note_type: Option<i64>,
    #[serde(rename = "creatorResourceID")]
    pub creator_resource_id: Option<i64>,
}

/// Note body in remote field names. Only [`build`] constructs one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotePayload {
    description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    publish: u8,
    note_type: u8,
    #[serde(rename = "creatorResourceID", skip_serializing_if = "Option::is_none")]
    creator_resource_id: Option<i64>,
}

impl NotePayload {
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn publish(&self) -> u8 {
        self.publish
    }

    pub fn note_type(&self) -> u8 {
        self.note_type
    }

    /// Request body with the parent reference (e.g. `ticketID`) attached.
    pub fn into_json(self, parent_field: &str, parent_id: i64) -> serde_json::Result<Value> {
        let mut body = serde_json::to_value(&self)?;
        if let Value::Object(map) = &mut body {
            map.insert(parent_field.to_string(), Value::from(parent_id));
        }
        Ok(body)
    }
}

/// Apply defaults, then validate the defaulted note.
///
/// Every violation is collected before returning.
pub fn build(params: NoteParams) -> Result<NotePayload, ValidationError> {
    let publish = params.publish.unwrap_or(i64::from(DEFAULT_PUBLISH));
    let note_type = params.note_type.unwrap_or(i64::from(DEFAULT_NOTE_TYPE));
    let mut violations = Vec::new();

    let description = match params.description {
        None => {
            violations.push(Violation::new("description", "description is required"));
            String::new()
        }
        Some(text) => {
            if text.trim().is_empty() {
                violations.push(Violation::new("description", "description must not be empty"));
            } else if text.chars().count() > MAX_NOTE_DESCRIPTION {
                violations.push(Violation::new(
                    "description",
                    format!(
                        "description must be at most {} characters",
                        MAX_NOTE_DESCRIPTION
                    ),
                ));
            }
            text
        }
    };

    if let Some(title) = &params.title
        && title.chars().count() > MAX_NOTE_TITLE
    {
        violations.push(Violation::new(
            "title",
            format!("title must be at most {} characters", MAX_NOTE_TITLE),
        ));
    }

    if !PUBLISH_VALUES.contains(&publish) {
        violations.push(Violation::new("publish", "publish must be one of 1, 2, 3"));
    }
    if !NOTE_TYPE_VALUES.contains(&note_type) {
        violations.push(Violation::new(
            "noteType",
            "noteType must be one of 1, 2, 3, 4, 5, 6",
        ));
    }
    if let Some(creator) = params.creator_resource_id
        && creator <= 0
    {
        violations.push(Violation::new(
            "creatorResourceID",
            "creatorResourceID must be a positive integer",
        ));
    }

    if !violations.is_empty() {
        return Err(ValidationError::new(violations));
    }

    Ok(NotePayload {
        description,
        title: params.title,
        publish: publish as u8,
        note_type: note_type as u8,
        creator_resource_id: params.creator_resource_id,
    })
}

/// Notes attached to one parent record.
pub async fn search_notes<C: RemoteClient>(
    ctx: &ServiceContext<C>,
    spec: &EntitySearch,
    parent: NoteField,
    parent_id: i64,
    page_size: Option<i64>,
    cancel: &CancellationToken,
) -> ServiceResult<SearchOutcome> {
    search::run(
        ctx,
        spec,
        vec![Filter::eq(parent, parent_id)],
        page_size,
        cancel,
    )
    .await
}

/// Build the note and post it under `parent/{parent_id}/Notes`.
pub async fn create_note<C: RemoteClient>(
    ctx: &ServiceContext<C>,
    parent: EntityKind,
    parent_field: NoteField,
    parent_id: i64,
    params: NoteParams,
) -> ServiceResult<i64> {
    let body = build(params)?.into_json(parent_field.name(), parent_id)?;
    ctx.create_child(parent, parent_id, EntityKind::Notes, &body)
        .await
}
