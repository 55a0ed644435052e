//! Typed query filters.
//!
//! The PSA query endpoint takes a JSON array of filter expressions
//! (`{"op": "eq", "field": "companyID", "value": 0}`, or a grouping
//! `{"op": "or", "items": [...]}`). Filters are built here over a per-entity
//! field enum so that a misspelled field name is a compile error instead of
//! an upstream 500.

use std::fmt;

use serde::Serialize;
use serde_json::{Value, json};

/// Field-name enum for one entity's queryable fields.
pub trait FilterField: Copy + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Primary key, used for the default filter and the page cursor.
    const ID: Self;

    /// Remote field name.
    fn name(&self) -> &'static str;
}

#[derive(Debug, Clone, PartialEq)]
pub enum Filter<F: FilterField> {
    Eq(F, Value),
    NotEq(F, Value),
    Gt(F, Value),
    Gte(F, Value),
    Lt(F, Value),
    Lte(F, Value),
    Contains(F, String),
    BeginsWith(F, String),
    Exist(F),
    NotExist(F),
    Or(Vec<Filter<F>>),
    And(Vec<Filter<F>>),
}

impl<F: FilterField> Filter<F> {
    pub fn eq(field: F, value: impl Into<Value>) -> Self {
        Filter::Eq(field, value.into())
    }

    pub fn gt(field: F, value: impl Into<Value>) -> Self {
        Filter::Gt(field, value.into())
    }

    pub fn gte(field: F, value: impl Into<Value>) -> Self {
        Filter::Gte(field, value.into())
    }

    pub fn lt(field: F, value: impl Into<Value>) -> Self {
        Filter::Lt(field, value.into())
    }

    pub fn lte(field: F, value: impl Into<Value>) -> Self {
        Filter::Lte(field, value.into())
    }

    pub fn contains(field: F, text: impl Into<String>) -> Self {
        Filter::Contains(field, text.into())
    }

    pub fn begins_with(field: F, text: impl Into<String>) -> Self {
        Filter::BeginsWith(field, text.into())
    }

    /// Trivially-true filter. The query endpoint rejects an empty filter array.
    pub fn match_all() -> Self {
        Filter::Gte(F::ID, json!(0))
    }

    /// Wire representation.
    pub fn to_json(&self) -> Value {
        match self {
            Filter::Eq(f, v) => comparison("eq", *f, v.clone()),
            Filter::NotEq(f, v) => comparison("noteq", *f, v.clone()),
            Filter::Gt(f, v) => comparison("gt", *f, v.clone()),
            Filter::Gte(f, v) => comparison("gte", *f, v.clone()),
            Filter::Lt(f, v) => comparison("lt", *f, v.clone()),
            Filter::Lte(f, v) => comparison("lte", *f, v.clone()),
            Filter::Contains(f, s) => comparison("contains", *f, Value::String(s.clone())),
            Filter::BeginsWith(f, s) => comparison("beginsWith", *f, Value::String(s.clone())),
            Filter::Exist(f) => json!({ "op": "exist", "field": f.name() }),
            Filter::NotExist(f) => json!({ "op": "notExist", "field": f.name() }),
            Filter::Or(items) => grouping("or", items),
            Filter::And(items) => grouping("and", items),
        }
    }
}

fn comparison<F: FilterField>(op: &str, field: F, value: Value) -> Value {
    json!({ "op": op, "field": field.name(), "value": value })
}

fn grouping<F: FilterField>(op: &str, items: &[Filter<F>]) -> Value {
    json!({
        "op": op,
        "items": items.iter().map(Filter::to_json).collect::<Vec<_>>(),
    })
}

/// Body of a `POST /{Entity}/query` request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryRequest {
    pub filter: Vec<Value>,
    #[serde(rename = "MaxRecords", skip_serializing_if = "Option::is_none")]
    pub max_records: Option<u32>,
    #[serde(rename = "IncludeFields", skip_serializing_if = "Vec::is_empty")]
    pub include_fields: Vec<String>,
}

impl QueryRequest {
    /// Build a query from typed filters, injecting the match-all filter when
    /// `filters` is empty.
    pub fn new<F: FilterField>(filters: &[Filter<F>], max_records: Option<u32>) -> Self {
        let filter = if filters.is_empty() {
            vec![Filter::<F>::match_all().to_json()]
        } else {
            filters.iter().map(Filter::to_json).collect()
        };

        Self {
            filter,
            max_records,
            include_fields: Vec::new(),
        }
    }
}
