//! PSA REST API client layer.
//!
//! # Architecture
//!
//! - `RemoteClient`: the collaborator seam every entity service talks to
//! - `http`: reqwest implementation with credential headers
//! - `filter`: typed filter expressions and the query request body
//! - `gate`: shared throttle in front of every outbound call
//!
//! Services are generic over `C: RemoteClient`, so tests substitute a
//! scripted fake without touching the network.

mod entity;
mod error;
mod filter;
mod gate;
pub mod http;

#[cfg(test)]
mod error_test;
#[cfg(test)]
mod http_test;

use std::future::Future;

use serde_json::Value;

pub use entity::EntityKind;
pub use error::{ClientError, ClientResult};
pub use filter::{Filter, FilterField, QueryRequest};
pub use gate::RateGate;
pub use http::{HttpClient, HttpClientConfig};

/// Operations the PSA REST API offers for an entity collection.
///
/// Responses are returned as raw JSON: the services own the interpretation of
/// the `item` / `items` / `itemId` containers so that an unexpected shape can
/// be handled per operation instead of failing deserialization here.
pub trait RemoteClient: Send + Sync + 'static {
    /// `GET /{Entity}/{id}`; the record is expected under `item`.
    fn get(&self, entity: EntityKind, id: i64)
    -> impl Future<Output = ClientResult<Value>> + Send;

    /// `POST /{Entity}/query` with an explicit record cap; records under `items`.
    fn query(
        &self,
        entity: EntityKind,
        query: &QueryRequest,
    ) -> impl Future<Output = ClientResult<Value>> + Send;

    /// `POST /{Entity}`; the new id is expected under `itemId`.
    fn create(
        &self,
        entity: EntityKind,
        payload: &Value,
    ) -> impl Future<Output = ClientResult<Value>> + Send;

    /// `PATCH /{Entity}` with the id inside the payload.
    fn update(
        &self,
        entity: EntityKind,
        payload: &Value,
    ) -> impl Future<Output = ClientResult<Value>> + Send;

    /// `POST /{Parent}/{parent_id}/{Child}`.
    fn create_child(
        &self,
        parent: EntityKind,
        parent_id: i64,
        child: EntityKind,
        payload: &Value,
    ) -> impl Future<Output = ClientResult<Value>> + Send;
}
