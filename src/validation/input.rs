//! Raw tool arguments awaiting validation.
//!
//! rmcp deserializes tool arguments into the handler's parameter type before
//! the handler runs. [`Input<T>`] captures the arguments untouched so the
//! declarative schema sees exactly what the caller sent (unknown keys, wrong
//! types, nulls) and can report every violation at once. Its JSON Schema is the
//! rendering of the same declarative schema.

use std::borrow::Cow;
use std::marker::PhantomData;

use rmcp::schemars::{self, JsonSchema, SchemaGenerator};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::error::ValidationError;
use super::schema::Schema;

/// Typed parameters of one tool, backed by a declarative schema.
pub trait ToolInput: DeserializeOwned {
    /// Schema name advertised to the host.
    const NAME: &'static str;

    fn schema() -> &'static Schema;
}

pub struct Input<T> {
    raw: Value,
    _marker: PhantomData<fn() -> T>,
}

impl<T: ToolInput> Input<T> {
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Run the schema and deserialize the normalized object into `T`.
    pub fn validate(&self) -> Result<T, ValidationError> {
        let Value::Object(raw) = &self.raw else {
            return Err(ValidationError::single("", "arguments must be a JSON object"));
        };

        let normalized = T::schema().validate(raw)?;
        serde_json::from_value(Value::Object(normalized))
            .map_err(|e| ValidationError::single("", e.to_string()))
    }
}

impl<T> From<Value> for Input<T> {
    fn from(raw: Value) -> Self {
        Self {
            raw,
            _marker: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for Input<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Input").field(&self.raw).finish()
    }
}

impl<'de, T> Deserialize<'de> for Input<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Input::from)
    }
}

impl<T: ToolInput> JsonSchema for Input<T> {
    fn schema_name() -> Cow<'static, str> {
        Cow::Borrowed(T::NAME)
    }

    fn json_schema(_generator: &mut SchemaGenerator) -> schemars::Schema {
        schemars::Schema::from(T::schema().json_schema())
    }
}
