//! Capabilities shared by every entity service.

use std::future::Future;

use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use super::companies::CompanyField;
use super::error::{ServiceError, ServiceResult};
use super::pagination::{self, PaginationConfig};
use crate::client::{ClientError, ClientResult, EntityKind, QueryRequest, RateGate, RemoteClient};

/// Remote client, throttle and cancellation token handed to each service.
pub struct ServiceContext<C: RemoteClient> {
    client: C,
    gate: RateGate,
    cancellation: CancellationToken,
}

impl<C: RemoteClient> ServiceContext<C> {
    pub fn new(client: C, gate: RateGate) -> Self {
        Self {
            client,
            gate,
            cancellation: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, cancellation: CancellationToken) -> Self {
        self.cancellation = cancellation;
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn gate(&self) -> &RateGate {
        &self.gate
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    pub fn resolve_pagination(
        &self,
        page_size: Option<i64>,
        default_page_size: u32,
    ) -> ServiceResult<PaginationConfig> {
        pagination::resolve(page_size, default_page_size)
    }

    /// Wait for the rate gate, then run one remote call.
    pub async fn execute_with_rate_limit<T, F>(&self, operation: &str, call: F) -> ServiceResult<T>
    where
        F: Future<Output = ClientResult<T>>,
    {
        self.gate.acquire().await;
        debug!(operation, "Issuing remote call");
        call.await.map_err(|e| self.map_error(operation, e))
    }

    pub fn map_error(&self, operation: &str, source: ClientError) -> ServiceError {
        error!(operation, error = %source, "Remote call failed");
        ServiceError::Remote {
            operation: operation.to_string(),
            source,
        }
    }

    /// Fetch one record. A missing `item` object or a 404 is "not found".
    pub async fn fetch_one(&self, entity: EntityKind, id: i64) -> ServiceResult<Option<Value>> {
        let operation = format!("get {} {}", entity.label(), id);
        self.gate.acquire().await;
        match self.client.get(entity, id).await {
            Ok(response) => Ok(match response.get("item") {
                Some(item @ Value::Object(_)) => Some(item.clone()),
                _ => None,
            }),
            Err(e) if e.status() == Some(404) => Ok(None),
            Err(e) => Err(self.map_error(&operation, e)),
        }
    }

    /// Create a record and return its new id.
    pub async fn create_one(&self, entity: EntityKind, payload: &Value) -> ServiceResult<i64> {
        let operation = format!("create {}", entity.label());
        let response = self
            .execute_with_rate_limit(&operation, self.client.create(entity, payload))
            .await?;
        item_id(&response).ok_or(ServiceError::MissingItemId { operation })
    }

    /// Patch a record. The payload carries `id`; the response's `itemId` wins
    /// when present.
    pub async fn update_one(&self, entity: EntityKind, payload: &Value) -> ServiceResult<i64> {
        let operation = format!("update {}", entity.label());
        let response = self
            .execute_with_rate_limit(&operation, self.client.update(entity, payload))
            .await?;
        item_id(&response)
            .or_else(|| payload.get("id").and_then(Value::as_i64))
            .ok_or(ServiceError::MissingItemId { operation })
    }

    /// Create a child record under `parent/{parent_id}` and return its id.
    pub async fn create_child(
        &self,
        parent: EntityKind,
        parent_id: i64,
        child: EntityKind,
        payload: &Value,
    ) -> ServiceResult<i64> {
        let operation = format!("create {} on {} {}", child.label(), parent.label(), parent_id);
        let response = self
            .execute_with_rate_limit(
                &operation,
                self.client.create_child(parent, parent_id, child, payload),
            )
            .await?;
        item_id(&response).ok_or(ServiceError::MissingItemId { operation })
    }

    /// Cheapest possible authenticated round-trip.
    pub async fn test_connection(&self) -> ServiceResult<()> {
        let mut query = QueryRequest::new::<CompanyField>(&[], Some(1));
        query.include_fields = vec!["id".to_string()];
        self.execute_with_rate_limit(
            "test connection",
            self.client.query(EntityKind::Companies, &query),
        )
        .await
        .map(|_| ())
    }
}

fn item_id(response: &Value) -> Option<i64> {
    response.get("itemId").and_then(Value::as_i64)
}
