//! Company service.

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
pub enum CompanyField {
    Id,
    CompanyName,
    IsActive,
    OwnerResourceId,
}

impl FilterField for CompanyField {
    const ID: Self = CompanyField::Id;

    fn name(&self) -> &'static str {
        match self {
            CompanyField::Id => "id",
            CompanyField::CompanyName => "companyName",
            CompanyField::IsActive => "isActive",
            CompanyField::OwnerResourceId => "ownerResourceID",
        }
    }
}

pub const COMPANY_SEARCH: EntitySearch = EntitySearch {
    entity: EntityKind::Companies,
    default_page_size: 50,
    unlimited: UnlimitedMode::Exhaustive,
};

pub const COMPANY_NOTE_SEARCH: EntitySearch = notes::note_search(EntityKind::CompanyNotes);

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyQuery {
    pub search_term: Option<String>,
    pub is_active: Option<bool>,
    #[serde(rename = "ownerResourceID")]
    pub owner_resource_id: Option<i64>,
    pub page_size: Option<i64>,
}

impl CompanyQuery {
    pub fn filters(&self) -> Vec<Filter<CompanyField>> {
        let mut filters = Vec::new();
        if let Some(term) = &self.search_term {
            filters.push(Filter::contains(CompanyField::CompanyName, term));
        }
        if let Some(active) = self.is_active {
            filters.push(Filter::eq(CompanyField::IsActive, active));
        }
        if let Some(owner) = self.owner_resource_id {
            filters.push(Filter::eq(CompanyField::OwnerResourceId, owner));
        }
        filters
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCompany {
    pub company_name: String,
    pub company_type: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(rename = "ownerResourceID", skip_serializing_if = "Option::is_none")]
    pub owner_resource_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyUpdate {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_type: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(rename = "ownerResourceID", skip_serializing_if = "Option::is_none")]
    pub owner_resource_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CompanyNoteQuery {
    #[serde(rename = "companyID")]
    pub company_id: i64,
    #[serde(rename = "pageSize")]
    pub page_size: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewCompanyNote {
    #[serde(rename = "companyID")]
    pub company_id: i64,
    #[serde(flatten)]
    pub note: NoteParams,
}

pub struct CompanyService<C: RemoteClient> {
    ctx: Arc<ServiceContext<C>>,
}

impl<C: RemoteClient> Clone for CompanyService<C> {
    fn clone(&self) -> Self {
        Self {
            ctx: Arc::clone(&self.ctx),
        }
    }
}

impl<C: RemoteClient> CompanyService<C> {
    pub fn new(ctx: Arc<ServiceContext<C>>) -> Self {
        Self { ctx }
    }

    pub async fn search(
        &self,
        query: &CompanyQuery,
        cancel: &CancellationToken,
    ) -> ServiceResult<SearchOutcome> {
        search::run(&self.ctx, &COMPANY_SEARCH, query.filters(), query.page_size, cancel).await
    }

    pub async fn get(&self, id: i64) -> ServiceResult<Option<Value>> {
        self.ctx.fetch_one(EntityKind::Companies, id).await
    }

    pub async fn create(&self, company: &NewCompany) -> ServiceResult<i64> {
        let payload = serde_json::to_value(company)?;
        self.ctx.create_one(EntityKind::Companies, &payload).await
    }

    pub async fn update(&self, update: &CompanyUpdate) -> ServiceResult<i64> {
        let payload = serde_json::to_value(update)?;
        self.ctx.update_one(EntityKind::Companies, &payload).await
    }

    pub async fn search_notes(
        &self,
        query: &CompanyNoteQuery,
        cancel: &CancellationToken,
    ) -> ServiceResult<SearchOutcome> {
        notes::search_notes(
            &self.ctx,
            &COMPANY_NOTE_SEARCH,
            NoteField::CompanyId,
            query.company_id,
            query.page_size,
            cancel,
        )
        .await
    }

    pub async fn create_note(&self, note: NewCompanyNote) -> ServiceResult<i64> {
        notes::create_note(
            &self.ctx,
            EntityKind::Companies,
            NoteField::CompanyId,
            note.company_id,
            note.note,
        )
        .await
    }
}
