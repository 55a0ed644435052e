//! Search execution: bounded fetches and the unlimited page loop.
//!
//! The PSA query endpoint has no "has next page" signal and no offset. A
//! bounded search is a single query with `MaxRecords` set to the requested
//! size. An unlimited search either takes one ceiling-sized page or walks the
//! collection with an id cursor (`id > highest id seen so far`) until a short
//! page, an empty page, a malformed response, cancellation or the safety bound
//! ends it. Every one of those endings is a success carrying whatever was
//! accumulated.
//!
//! Cancellation is checked before every request against both the caller's
//! request token and the process-wide shutdown token.

use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::pagination::MAX_PAGE_SIZE;
use crate::client::{EntityKind, Filter, FilterField, QueryRequest, RemoteClient};

/// Records requested per page by the unlimited loop.
pub const UNLIMITED_BATCH_SIZE: u32 = MAX_PAGE_SIZE;

/// Page cap for the unlimited loop (10,000 records at full pages).
///
/// A heuristic that keeps one tool call from pulling an entire tenant, not a
/// limit of the remote API. Raise it if callers legitimately need more.
pub const MAX_PAGES: u32 = 20;

/// How `pageSize: -1` is served for an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlimitedMode {
    /// Walk the collection page by page with an id cursor.
    Exhaustive,
    /// One page of [`UNLIMITED_BATCH_SIZE`] records.
    CeilingPage,
}

/// Static search parameters of one entity collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntitySearch {
    pub entity: EntityKind,
    pub default_page_size: u32,
    pub unlimited: UnlimitedMode,
}

/// Why a search stopped returning records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The remote ran out of matching records.
    Exhausted,
    /// The page size was filled; more records may exist.
    LimitReached,
    /// The unlimited loop hit [`MAX_PAGES`].
    SafetyBound,
    /// A response had no `items` array or an item had no `id`.
    Malformed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub items: Vec<Value>,
    /// Effective cap; `None` when unlimited.
    pub page_size: Option<u32>,
    pub unlimited: bool,
    pub termination: Termination,
}

impl SearchOutcome {
    /// Whether matching records may have been left behind.
    pub fn may_have_more(&self) -> bool {
        matches!(
            self.termination,
            Termination::LimitReached | Termination::SafetyBound | Termination::Cancelled
        )
    }
}

/// Run a search for `spec.entity` with the caller's filters and page size.
///
/// `cancel` is the token of the request being served.
pub async fn run<C, F>(
    ctx: &ServiceContext<C>,
    spec: &EntitySearch,
    filters: Vec<Filter<F>>,
    page_size: Option<i64>,
    cancel: &CancellationToken,
) -> ServiceResult<SearchOutcome>
where
    C: RemoteClient,
    F: FilterField,
{
    let pagination = ctx.resolve_pagination(page_size, spec.default_page_size)?;

    let (items, termination) = match (pagination.page_size, spec.unlimited) {
        (Some(limit), _) => fetch_bounded(ctx, spec.entity, &filters, limit, cancel).await?,
        (None, UnlimitedMode::CeilingPage) => {
            fetch_bounded(ctx, spec.entity, &filters, UNLIMITED_BATCH_SIZE, cancel).await?
        }
        (None, UnlimitedMode::Exhaustive) => fetch_all(ctx, spec.entity, filters, cancel).await?,
    };

    info!(
        entity = %spec.entity,
        count = items.len(),
        page_size = ?pagination.page_size,
        unlimited = pagination.unlimited,
        termination = ?termination,
        "Search completed"
    );

    Ok(SearchOutcome {
        items,
        page_size: pagination.page_size,
        unlimited: pagination.unlimited,
        termination,
    })
}

async fn fetch_bounded<C, F>(
    ctx: &ServiceContext<C>,
    entity: EntityKind,
    filters: &[Filter<F>],
    limit: u32,
    cancel: &CancellationToken,
) -> ServiceResult<(Vec<Value>, Termination)>
where
    C: RemoteClient,
    F: FilterField,
{
    if is_cancelled(ctx, cancel) {
        return Ok((Vec::new(), Termination::Cancelled));
    }

    let operation = format!("search {}", entity.label());
    let query = QueryRequest::new(filters, Some(limit));
    let response = ctx
        .execute_with_rate_limit(&operation, ctx.client().query(entity, &query))
        .await?;

    let Some(mut items) = take_items(response) else {
        warn!(entity = %entity, "Query response has no items array");
        return Ok((Vec::new(), Termination::Malformed));
    };

    // The remote does not always honour MaxRecords.
    items.truncate(limit as usize);
    let termination = if items.len() == limit as usize {
        Termination::LimitReached
    } else {
        Termination::Exhausted
    };
    Ok((items, termination))
}

async fn fetch_all<C, F>(
    ctx: &ServiceContext<C>,
    entity: EntityKind,
    filters: Vec<Filter<F>>,
    cancel: &CancellationToken,
) -> ServiceResult<(Vec<Value>, Termination)>
where
    C: RemoteClient,
    F: FilterField,
{
    let operation = format!("search {}", entity.label());
    let batch_size = UNLIMITED_BATCH_SIZE as usize;
    let mut items = Vec::new();
    let mut cursor: Option<i64> = None;
    let mut page = 1;

    loop {
        if is_cancelled(ctx, cancel) {
            info!(entity = %entity, page, count = items.len(), "Unlimited search cancelled");
            return Ok((items, Termination::Cancelled));
        }

        if page > MAX_PAGES {
            warn!(
                entity = %entity,
                pages = MAX_PAGES,
                count = items.len(),
                "Unlimited search stopped at the page safety bound"
            );
            return Ok((items, Termination::SafetyBound));
        }

        let mut page_filters = filters.clone();
        if let Some(after) = cursor {
            page_filters.push(Filter::gt(F::ID, after));
        }
        let query = QueryRequest::new(&page_filters, Some(UNLIMITED_BATCH_SIZE));
        let response = ctx
            .execute_with_rate_limit(&operation, ctx.client().query(entity, &query))
            .await?;

        let Some(batch) = take_items(response) else {
            warn!(entity = %entity, page, "Query response has no items array");
            return Ok((items, Termination::Malformed));
        };

        if batch.is_empty() {
            return Ok((items, Termination::Exhausted));
        }

        let full = batch.len() >= batch_size;
        // Pages carry no sort order; the cursor is the highest id in the page.
        let ids: Option<Vec<i64>> = batch
            .iter()
            .map(|item| item.get("id").and_then(Value::as_i64))
            .collect();
        items.extend(batch);

        if !full {
            return Ok((items, Termination::Exhausted));
        }

        let Some(highest) = ids.and_then(|ids| ids.into_iter().max()) else {
            warn!(entity = %entity, page, "Record of a full page has no id");
            return Ok((items, Termination::Malformed));
        };
        if cursor.is_some_and(|previous| highest <= previous) {
            warn!(entity = %entity, page, "Page cursor did not advance");
            return Ok((items, Termination::Malformed));
        }
        cursor = Some(highest);

        page += 1;
    }
}

fn is_cancelled<C: RemoteClient>(ctx: &ServiceContext<C>, cancel: &CancellationToken) -> bool {
    cancel.is_cancelled() || ctx.cancellation().is_cancelled()
}

fn take_items(response: Value) -> Option<Vec<Value>> {
    match response {
        Value::Object(mut map) => match map.remove("items") {
            Some(Value::Array(items)) => Some(items),
            _ => None,
        },
        _ => None,
    }
}
