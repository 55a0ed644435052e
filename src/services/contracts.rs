//! Contract service. Read-only.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::search::{self, EntitySearch, SearchOutcome, UnlimitedMode};
use crate::client::{EntityKind, Filter, FilterField, RemoteClient};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContractField {
    Id,
    ContractName,
    CompanyId,
    Status,
}

impl FilterField for ContractField {
    const ID: Self = ContractField::Id;

    fn name(&self) -> &'static str {
        match self {
            ContractField::Id => "id",
            ContractField::ContractName => "contractName",
            ContractField::CompanyId => "companyID",
            ContractField::Status => "status",
        }
    }
}

pub const CONTRACT_SEARCH: EntitySearch = EntitySearch {
    entity: EntityKind::Contracts,
    default_page_size: 25,
    unlimited: UnlimitedMode::CeilingPage,
};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractQuery {
    pub search_term: Option<String>,
    #[serde(rename = "companyID")]
    pub company_id: Option<i64>,
    pub status: Option<i64>,
    pub page_size: Option<i64>,
}

impl ContractQuery {
    pub fn filters(&self) -> Vec<Filter<ContractField>> {
        let mut filters = Vec::new();
        if let Some(term) = &self.search_term {
            filters.push(Filter::contains(ContractField::ContractName, term));
        }
        if let Some(company_id) = self.company_id {
            filters.push(Filter::eq(ContractField::CompanyId, company_id));
        }
        if let Some(status) = self.status {
            filters.push(Filter::eq(ContractField::Status, status));
        }
        filters
    }
}

pub struct ContractService<C: RemoteClient> {
    ctx: Arc<ServiceContext<C>>,
}

impl<C: RemoteClient> Clone for ContractService<C> {
    fn clone(&self) -> Self {
        Self {
            ctx: Arc::clone(&self.ctx),
        }
    }
}

impl<C: RemoteClient> ContractService<C> {
    pub fn new(ctx: Arc<ServiceContext<C>>) -> Self {
        Self { ctx }
    }

    pub async fn search(
        &self,
        query: &ContractQuery,
        cancel: &CancellationToken,
    ) -> ServiceResult<SearchOutcome> {
        search::run(&self.ctx, &CONTRACT_SEARCH, query.filters(), query.page_size, cancel).await
    }

    pub async fn get(&self, id: i64) -> ServiceResult<Option<Value>> {
        self.ctx.fetch_one(EntityKind::Contracts, id).await
    }
}
