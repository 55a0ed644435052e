//! Contact service.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::search::{self, EntitySearch, SearchOutcome, UnlimitedMode};
use crate::client::{EntityKind, Filter, FilterField, RemoteClient};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContactField {
    Id,
    FirstName,
    LastName,
    EmailAddress,
    CompanyId,
    IsActive,
}

impl FilterField for ContactField {
    const ID: Self = ContactField::Id;

    fn name(&self) -> &'static str {
        match self {
            ContactField::Id => "id",
            ContactField::FirstName => "firstName",
            ContactField::LastName => "lastName",
            ContactField::EmailAddress => "emailAddress",
            ContactField::CompanyId => "companyID",
            ContactField::IsActive => "isActive",
        }
    }
}

pub const CONTACT_SEARCH: EntitySearch = EntitySearch {
    entity: EntityKind::Contacts,
    default_page_size: 50,
    unlimited: UnlimitedMode::Exhaustive,
};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactQuery {
    pub search_term: Option<String>,
    #[serde(rename = "companyID")]
    pub company_id: Option<i64>,
    pub is_active: Option<bool>,
    pub page_size: Option<i64>,
}

impl ContactQuery {
    pub fn filters(&self) -> Vec<Filter<ContactField>> {
        let mut filters = Vec::new();
        if let Some(term) = &self.search_term {
            filters.push(Filter::Or(vec![
                Filter::contains(ContactField::FirstName, term),
                Filter::contains(ContactField::LastName, term),
                Filter::contains(ContactField::EmailAddress, term),
            ]));
        }
        if let Some(company_id) = self.company_id {
            filters.push(Filter::eq(ContactField::CompanyId, company_id));
        }
        if let Some(active) = self.is_active {
            // The remote stores contact activity as 0/1.
            filters.push(Filter::eq(ContactField::IsActive, i64::from(active)));
        }
        filters
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContact {
    #[serde(rename = "companyID")]
    pub company_id: i64,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactUpdate {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

pub struct ContactService<C: RemoteClient> {
    ctx: Arc<ServiceContext<C>>,
}

impl<C: RemoteClient> Clone for ContactService<C> {
    fn clone(&self) -> Self {
        Self {
            ctx: Arc::clone(&self.ctx),
        }
    }
}

impl<C: RemoteClient> ContactService<C> {
    pub fn new(ctx: Arc<ServiceContext<C>>) -> Self {
        Self { ctx }
    }

    pub async fn search(
        &self,
        query: &ContactQuery,
        cancel: &CancellationToken,
    ) -> ServiceResult<SearchOutcome> {
        search::run(&self.ctx, &CONTACT_SEARCH, query.filters(), query.page_size, cancel).await
    }

    pub async fn get(&self, id: i64) -> ServiceResult<Option<Value>> {
        self.ctx.fetch_one(EntityKind::Contacts, id).await
    }

    /// Contacts are created under their company: `POST /Companies/{id}/Contacts`.
    pub async fn create(&self, contact: &NewContact) -> ServiceResult<i64> {
        let payload = serde_json::to_value(contact)?;
        self.ctx
            .create_child(
                EntityKind::Companies,
                contact.company_id,
                EntityKind::Contacts,
                &payload,
            )
            .await
    }

    pub async fn update(&self, update: &ContactUpdate) -> ServiceResult<i64> {
        let mut payload = serde_json::to_value(update)?;
        if let (Some(active), Some(map)) = (update.is_active, payload.as_object_mut()) {
            map.insert("isActive".to_string(), Value::from(i64::from(active)));
        }
        self.ctx.update_one(EntityKind::Contacts, &payload).await
    }
}
