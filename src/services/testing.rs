//! Scripted `RemoteClient` for service and tool tests.

use std::collections::VecDeque;
use std::num::NonZeroU32;
use std::sync::{Arc, Mutex};

use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

use super::context::ServiceContext;
use crate::client::{ClientError, ClientResult, EntityKind, QueryRequest, RateGate, RemoteClient};

/// One recorded call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Get(EntityKind, i64),
    Query(EntityKind, QueryRequest),
    Create(EntityKind, Value),
    Update(EntityKind, Value),
    CreateChild(EntityKind, i64, EntityKind, Value),
}

/// Responses are consumed in call order. Once the script is exhausted a query
/// answers with an empty page and every other call with `{}`.
#[derive(Default)]
pub struct FakeClient {
    script: Mutex<VecDeque<ClientResult<Value>>>,
    calls: Mutex<Vec<Call>>,
    cancel_after: Mutex<Option<(usize, CancellationToken)>>,
}

impl FakeClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, response: Value) -> Self {
        self.script.lock().unwrap().push_back(Ok(response));
        self
    }

    pub fn fail(self, error: ClientError) -> Self {
        self.script.lock().unwrap().push_back(Err(error));
        self
    }

    /// Queue query pages of the given sizes with consecutive ids from 1.
    pub fn with_pages(mut self, sizes: &[usize]) -> Self {
        let mut next_id = 1i64;
        for &size in sizes {
            let items: Vec<Value> = (next_id..next_id + size as i64)
                .map(|id| json!({ "id": id }))
                .collect();
            next_id += size as i64;
            self = self.respond(json!({ "items": items }));
        }
        self
    }

    /// Cancel `token` once `queries` query calls have been answered, as a
    /// client aborting its request mid-search would.
    pub fn cancel_after(self, queries: usize, token: CancellationToken) -> Self {
        *self.cancel_after.lock().unwrap() = Some((queries, token));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn queries(&self) -> Vec<QueryRequest> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Query(_, request) => Some(request),
                _ => None,
            })
            .collect()
    }

    fn next(&self, call: Call) -> ClientResult<Value> {
        let fallback = match &call {
            Call::Query(..) => json!({ "items": [] }),
            _ => json!({}),
        };
        let is_query = matches!(call, Call::Query(..));
        let mut calls = self.calls.lock().unwrap();
        calls.push(call);
        if is_query {
            let answered = calls.iter().filter(|c| matches!(c, Call::Query(..))).count();
            if let Some((after, token)) = self.cancel_after.lock().unwrap().as_ref() {
                if answered >= *after {
                    token.cancel();
                }
            }
        }
        drop(calls);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(fallback))
    }
}

impl RemoteClient for FakeClient {
    async fn get(&self, entity: EntityKind, id: i64) -> ClientResult<Value> {
        self.next(Call::Get(entity, id))
    }

    async fn query(&self, entity: EntityKind, query: &QueryRequest) -> ClientResult<Value> {
        self.next(Call::Query(entity, query.clone()))
    }

    async fn create(&self, entity: EntityKind, payload: &Value) -> ClientResult<Value> {
        self.next(Call::Create(entity, payload.clone()))
    }

    async fn update(&self, entity: EntityKind, payload: &Value) -> ClientResult<Value> {
        self.next(Call::Update(entity, payload.clone()))
    }

    async fn create_child(
        &self,
        parent: EntityKind,
        parent_id: i64,
        child: EntityKind,
        payload: &Value,
    ) -> ClientResult<Value> {
        self.next(Call::CreateChild(parent, parent_id, child, payload.clone()))
    }
}

/// Context with a gate generous enough that tests never wait on it.
pub fn context(client: FakeClient) -> Arc<ServiceContext<FakeClient>> {
    let quota = NonZeroU32::new(10_000).unwrap();
    Arc::new(ServiceContext::new(client, RateGate::per_second(quota)))
}

pub fn not_found() -> ClientError {
    ClientError::Api {
        status: 404,
        message: "Not Found".to_string(),
    }
}

pub fn server_error() -> ClientError {
    ClientError::Api {
        status: 500,
        message: "Internal Server Error".to_string(),
    }
}
