//! Resource (staff member) service. Read-only.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::search::{self, EntitySearch, SearchOutcome, UnlimitedMode};
use crate::client::{EntityKind, Filter, FilterField, RemoteClient};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResourceField {
    Id,
    FirstName,
    LastName,
    Email,
    IsActive,
    ResourceType,
}

impl FilterField for ResourceField {
    const ID: Self = ResourceField::Id;

    fn name(&self) -> &'static str {
        match self {
            ResourceField::Id => "id",
            ResourceField::FirstName => "firstName",
            ResourceField::LastName => "lastName",
            ResourceField::Email => "email",
            ResourceField::IsActive => "isActive",
            ResourceField::ResourceType => "resourceType",
        }
    }
}

pub const RESOURCE_SEARCH: EntitySearch = EntitySearch {
    entity: EntityKind::Resources,
    default_page_size: 25,
    unlimited: UnlimitedMode::Exhaustive,
};

pub const RESOURCE_TYPES: &[&str] = &["Employee", "Contractor", "Temporary"];

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceQuery {
    pub search_term: Option<String>,
    pub is_active: Option<bool>,
    pub resource_type: Option<String>,
    pub page_size: Option<i64>,
}

impl ResourceQuery {
    pub fn filters(&self) -> Vec<Filter<ResourceField>> {
        let mut filters = Vec::new();
        if let Some(term) = &self.search_term {
            filters.push(Filter::Or(vec![
                Filter::contains(ResourceField::FirstName, term),
                Filter::contains(ResourceField::LastName, term),
                Filter::contains(ResourceField::Email, term),
            ]));
        }
        if let Some(active) = self.is_active {
            filters.push(Filter::eq(ResourceField::IsActive, active));
        }
        if let Some(kind) = &self.resource_type {
            filters.push(Filter::eq(ResourceField::ResourceType, kind.as_str()));
        }
        filters
    }
}

pub struct ResourceService<C: RemoteClient> {
    ctx: Arc<ServiceContext<C>>,
}

impl<C: RemoteClient> Clone for ResourceService<C> {
    fn clone(&self) -> Self {
        Self {
            ctx: Arc::clone(&self.ctx),
        }
    }
}

impl<C: RemoteClient> ResourceService<C> {
    pub fn new(ctx: Arc<ServiceContext<C>>) -> Self {
        Self { ctx }
    }

    /// Always a filtered query: the plain resource list endpoint is unreliable.
    pub async fn search(
        &self,
        query: &ResourceQuery,
        cancel: &CancellationToken,
    ) -> ServiceResult<SearchOutcome> {
        search::run(&self.ctx, &RESOURCE_SEARCH, query.filters(), query.page_size, cancel).await
    }

    pub async fn get(&self, id: i64) -> ServiceResult<Option<Value>> {
        self.ctx.fetch_one(EntityKind::Resources, id).await
    }
}
