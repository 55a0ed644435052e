//! Project service.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::notes::{self, NoteField, NoteParams};
use super::search::{self, EntitySearch, SearchOutcome, UnlimitedMode};
use crate::client::{EntityKind, Filter, FilterField, RemoteClient};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectField {
    Id,
    ProjectName,
    CompanyId,
    Status,
    ProjectLeadResourceId,
}

impl FilterField for ProjectField {
    const ID: Self = ProjectField::Id;

    fn name(&self) -> &'static str {
        match self {
            ProjectField::Id => "id",
            ProjectField::ProjectName => "projectName",
            ProjectField::CompanyId => "companyID",
            ProjectField::Status => "status",
            ProjectField::ProjectLeadResourceId => "projectLeadResourceID",
        }
    }
}

pub const PROJECT_SEARCH: EntitySearch = EntitySearch {
    entity: EntityKind::Projects,
    default_page_size: 25,
    unlimited: UnlimitedMode::CeilingPage,
};

pub const PROJECT_NOTE_SEARCH: EntitySearch = notes::note_search(EntityKind::ProjectNotes);

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectQuery {
    pub search_term: Option<String>,
    #[serde(rename = "companyID")]
    pub company_id: Option<i64>,
    pub status: Option<i64>,
    #[serde(rename = "projectLeadResourceID")]
    pub project_lead_resource_id: Option<i64>,
    pub page_size: Option<i64>,
}

impl ProjectQuery {
    pub fn filters(&self) -> Vec<Filter<ProjectField>> {
        let mut filters = Vec::new();
        if let Some(term) = &self.search_term {
            filters.push(Filter::contains(ProjectField::ProjectName, term));
        }
        if let Some(company_id) = self.company_id {
            filters.push(Filter::eq(ProjectField::CompanyId, company_id));
        }
        if let Some(status) = self.status {
            filters.push(Filter::eq(ProjectField::Status, status));
        }
        if let Some(lead) = self.project_lead_resource_id {
            filters.push(Filter::eq(ProjectField::ProjectLeadResourceId, lead));
        }
        filters
    }
}

/// Tools accept `startDate`/`endDate`; the remote names are
/// `startDateTime`/`endDateTime`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    #[serde(rename = "companyID")]
    pub company_id: i64,
    pub project_name: String,
    #[serde(rename = "type")]
    pub project_type: i64,
    pub status: i64,
    #[serde(rename(deserialize = "startDate", serialize = "startDateTime"))]
    pub start_date: String,
    #[serde(rename(deserialize = "endDate", serialize = "endDateTime"))]
    pub end_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        rename = "projectLeadResourceID",
        skip_serializing_if = "Option::is_none"
    )]
    pub project_lead_resource_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectUpdate {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<i64>,
    #[serde(
        rename(deserialize = "startDate", serialize = "startDateTime"),
        skip_serializing_if = "Option::is_none"
    )]
    pub start_date: Option<String>,
    #[serde(
        rename(deserialize = "endDate", serialize = "endDateTime"),
        skip_serializing_if = "Option::is_none"
    )]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        rename = "projectLeadResourceID",
        skip_serializing_if = "Option::is_none"
    )]
    pub project_lead_resource_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProjectNoteQuery {
    #[serde(rename = "projectID")]
    pub project_id: i64,
    #[serde(rename = "pageSize")]
    pub page_size: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewProjectNote {
    #[serde(rename = "projectID")]
    pub project_id: i64,
    #[serde(flatten)]
    pub note: NoteParams,
}

pub struct ProjectService<C: RemoteClient> {
    ctx: Arc<ServiceContext<C>>,
}

impl<C: RemoteClient> Clone for ProjectService<C> {
    fn clone(&self) -> Self {
        Self {
            ctx: Arc::clone(&self.ctx),
        }
    }
}

impl<C: RemoteClient> ProjectService<C> {
    pub fn new(ctx: Arc<ServiceContext<C>>) -> Self {
        Self { ctx }
    }

    pub async fn search(
        &self,
        query: &ProjectQuery,
        cancel: &CancellationToken,
    ) -> ServiceResult<SearchOutcome> {
        search::run(&self.ctx, &PROJECT_SEARCH, query.filters(), query.page_size, cancel).await
    }

    pub async fn get(&self, id: i64) -> ServiceResult<Option<Value>> {
        self.ctx.fetch_one(EntityKind::Projects, id).await
    }

    pub async fn create(&self, project: &NewProject) -> ServiceResult<i64> {
        let payload = serde_json::to_value(project)?;
        self.ctx.create_one(EntityKind::Projects, &payload).await
    }

    pub async fn update(&self, update: &ProjectUpdate) -> ServiceResult<i64> {
        let payload = serde_json::to_value(update)?;
        self.ctx.update_one(EntityKind::Projects, &payload).await
    }

    pub async fn search_notes(
        &self,
        query: &ProjectNoteQuery,
        cancel: &CancellationToken,
    ) -> ServiceResult<SearchOutcome> {
        notes::search_notes(
            &self.ctx,
            &PROJECT_NOTE_SEARCH,
            NoteField::ProjectId,
            query.project_id,
            query.page_size,
            cancel,
        )
        .await
    }

    pub async fn create_note(&self, note: NewProjectNote) -> ServiceResult<i64> {
        notes::create_note(
            &self.ctx,
            EntityKind::Projects,
            NoteField::ProjectId,
            note.project_id,
            note.note,
        )
        .await
    }
}
