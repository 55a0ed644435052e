//! Configuration item (installed product) service.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::search::{self, EntitySearch, SearchOutcome, UnlimitedMode};
use crate::client::{EntityKind, Filter, FilterField, RemoteClient};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigurationItemField {
    Id,
    ReferenceTitle,
    SerialNumber,
    CompanyId,
    IsActive,
    ProductId,
}

impl FilterField for ConfigurationItemField {
    const ID: Self = ConfigurationItemField::Id;

    fn name(&self) -> &'static str {
        match self {
            ConfigurationItemField::Id => "id",
            ConfigurationItemField::ReferenceTitle => "referenceTitle",
            ConfigurationItemField::SerialNumber => "serialNumber",
            ConfigurationItemField::CompanyId => "companyID",
            ConfigurationItemField::IsActive => "isActive",
            ConfigurationItemField::ProductId => "productID",
        }
    }
}

pub const CONFIGURATION_ITEM_SEARCH: EntitySearch = EntitySearch {
    entity: EntityKind::ConfigurationItems,
    default_page_size: 25,
    unlimited: UnlimitedMode::Exhaustive,
};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationItemQuery {
    pub search_term: Option<String>,
    #[serde(rename = "companyID")]
    pub company_id: Option<i64>,
    pub is_active: Option<bool>,
    #[serde(rename = "productID")]
    pub product_id: Option<i64>,
    pub page_size: Option<i64>,
}

impl ConfigurationItemQuery {
    pub fn filters(&self) -> Vec<Filter<ConfigurationItemField>> {
        let mut filters = Vec::new();
        if let Some(term) = &self.search_term {
            filters.push(Filter::Or(vec![
                Filter::contains(ConfigurationItemField::ReferenceTitle, term),
                Filter::contains(ConfigurationItemField::SerialNumber, term),
            ]));
        }
        if let Some(company_id) = self.company_id {
            filters.push(Filter::eq(ConfigurationItemField::CompanyId, company_id));
        }
        if let Some(active) = self.is_active {
            filters.push(Filter::eq(ConfigurationItemField::IsActive, active));
        }
        if let Some(product_id) = self.product_id {
            filters.push(Filter::eq(ConfigurationItemField::ProductId, product_id));
        }
        filters
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewConfigurationItem {
    #[serde(rename = "companyID")]
    pub company_id: i64,
    #[serde(rename = "productID")]
    pub product_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warranty_expiration_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationItemUpdate {
    pub id: i64,
    #[serde(rename = "productID", skip_serializing_if = "Option::is_none")]
    pub product_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warranty_expiration_date: Option<String>,
}

pub struct ConfigurationItemService<C: RemoteClient> {
    ctx: Arc<ServiceContext<C>>,
}

impl<C: RemoteClient> Clone for ConfigurationItemService<C> {
    fn clone(&self) -> Self {
        Self {
            ctx: Arc::clone(&self.ctx),
        }
    }
}

impl<C: RemoteClient> ConfigurationItemService<C> {
    pub fn new(ctx: Arc<ServiceContext<C>>) -> Self {
        Self { ctx }
    }

    pub async fn search(
        &self,
        query: &ConfigurationItemQuery,
        cancel: &CancellationToken,
    ) -> ServiceResult<SearchOutcome> {
        search::run(
            &self.ctx,
            &CONFIGURATION_ITEM_SEARCH,
            query.filters(),
            query.page_size,
            cancel,
        )
        .await
    }

    pub async fn get(&self, id: i64) -> ServiceResult<Option<Value>> {
        self.ctx.fetch_one(EntityKind::ConfigurationItems, id).await
    }

    pub async fn create(&self, item: &NewConfigurationItem) -> ServiceResult<i64> {
        let payload = serde_json::to_value(item)?;
        self.ctx
            .create_one(EntityKind::ConfigurationItems, &payload)
            .await
    }

    pub async fn update(&self, update: &ConfigurationItemUpdate) -> ServiceResult<i64> {
        let payload = serde_json::to_value(update)?;
        self.ctx
            .update_one(EntityKind::ConfigurationItems, &payload)
            .await
    }
}
