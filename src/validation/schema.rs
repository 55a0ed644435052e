//! Declarative input schemas.
//!
//! A [`Schema`] is plain data: an ordered list of field specs, a list of
//! cross-field refinements and an optional partial-update key. The same
//! definition drives both [`Schema::validate`] and the JSON Schema a tool
//! advertises ([`Schema::json_schema`]).

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::{Map, Value, json};

use super::error::{ValidationError, Violation};

pub type JsonObject = Map<String, Value>;

/// Semantic type and bounds of a single field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// String; `min` is checked against the trimmed text, `max` against the
    /// raw character count.
    Text { min: usize, max: usize },
    Integer { min: Option<i64>, max: Option<i64> },
    /// Reference to any entity other than a company: positive, rejects 0.
    EntityId,
    /// Reference to a company: non-negative, 0 is the default company.
    CompanyRef,
    /// Integer restricted to an enumerated set.
    OneOf(&'static [i64]),
    /// String restricted to an enumerated set.
    Choice(&'static [&'static str]),
    Boolean,
    /// `YYYY-MM-DD`.
    Date,
    /// RFC 3339 timestamp, `YYYY-MM-DDTHH:MM:SS` or a plain date.
    DateTime,
    Decimal { min: Option<f64>, max: Option<f64> },
    /// `-1` (unlimited), `0` (entity default) or a positive cap.
    PageSize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub description: String,
}

impl FieldSpec {
    pub fn required(name: &'static str, kind: FieldKind, description: impl Into<String>) -> Self {
        Self {
            name,
            kind,
            required: true,
            description: description.into(),
        }
    }

    pub fn optional(name: &'static str, kind: FieldKind, description: impl Into<String>) -> Self {
        Self {
            name,
            kind,
            required: false,
            description: description.into(),
        }
    }
}

/// Predicate of a cross-field refinement.
#[derive(Debug, Clone)]
pub enum Rule {
    /// `later` must not be before `earlier`. Holds when either is absent.
    NotBefore {
        earlier: &'static str,
        later: &'static str,
    },
    /// Arbitrary predicate over the field-validated object.
    Custom(fn(&JsonObject) -> bool),
}

#[derive(Debug, Clone)]
pub struct Refinement {
    pub path: &'static str,
    pub message: String,
    pub rule: Rule,
}

impl Refinement {
    fn holds(&self, input: &JsonObject) -> bool {
        match &self.rule {
            Rule::NotBefore { earlier, later } => {
                match (date_field(input, earlier), date_field(input, later)) {
                    (Some(start), Some(end)) => end >= start,
                    _ => true,
                }
            }
            Rule::Custom(check) => check(input),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<FieldSpec>,
    refinements: Vec<Refinement>,
    identity_key: Option<&'static str>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    pub fn with_fields(mut self, specs: impl IntoIterator<Item = FieldSpec>) -> Self {
        self.fields.extend(specs);
        self
    }

    /// Require `later >= earlier` (dates or date-times), reported on `later`.
    pub fn not_before(mut self, earlier: &'static str, later: &'static str) -> Self {
        self.refinements.push(Refinement {
            path: later,
            message: format!("{} must be on or after {}", later, earlier),
            rule: Rule::NotBefore { earlier, later },
        });
        self
    }

    pub fn refine(
        mut self,
        path: &'static str,
        message: impl Into<String>,
        check: fn(&JsonObject) -> bool,
    ) -> Self {
        self.refinements.push(Refinement {
            path,
            message: message.into(),
            rule: Rule::Custom(check),
        });
        self
    }

    /// Partial update: reject input carrying nothing besides `key`.
    pub fn require_any_besides(mut self, key: &'static str) -> Self {
        self.identity_key = Some(key);
        self
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Validate `input` and return the normalized object.
    ///
    /// Normalization only drops `null` optional fields; values are never
    /// coerced. Refinements and the partial-update rule are evaluated only when
    /// every field-level rule passed.
    pub fn validate(&self, input: &JsonObject) -> Result<JsonObject, ValidationError> {
        let mut violations = Vec::new();

        for key in input.keys() {
            if self.get(key).is_none() {
                violations.push(Violation::new(
                    key.as_str(),
                    format!("unrecognized field '{}'", key),
                ));
            }
        }

        let mut normalized = JsonObject::new();
        for spec in &self.fields {
            match input.get(spec.name) {
                None | Some(Value::Null) => {
                    if spec.required {
                        violations
                            .push(Violation::new(spec.name, format!("{} is required", spec.name)));
                    }
                }
                Some(value) => match check_kind(spec.name, &spec.kind, value) {
                    Some(message) => violations.push(Violation::new(spec.name, message)),
                    None => {
                        normalized.insert(spec.name.to_string(), value.clone());
                    }
                },
            }
        }

        if !violations.is_empty() {
            return Err(ValidationError::new(violations));
        }

        for refinement in &self.refinements {
            if !refinement.holds(&normalized) {
                violations.push(Violation::new(refinement.path, refinement.message.clone()));
            }
        }

        if let Some(key) = self.identity_key
            && normalized.keys().all(|k| k == key)
        {
            violations.push(Violation::new(
                "",
                format!("At least one field besides {} must be provided", key),
            ));
        }

        if violations.is_empty() {
            Ok(normalized)
        } else {
            Err(ValidationError::new(violations))
        }
    }

    /// JSON Schema rendering advertised as the tool input schema.
    pub fn json_schema(&self) -> JsonObject {
        let mut properties = JsonObject::new();
        let mut required = Vec::new();

        for spec in &self.fields {
            let mut property = kind_schema(&spec.kind);
            if !spec.description.is_empty() {
                property.insert(
                    "description".to_string(),
                    Value::String(spec.description.clone()),
                );
            }
            properties.insert(spec.name.to_string(), Value::Object(property));
            if spec.required {
                required.push(Value::String(spec.name.to_string()));
            }
        }

        let mut schema = JsonObject::new();
        schema.insert("type".to_string(), json!("object"));
        schema.insert("properties".to_string(), Value::Object(properties));
        if !required.is_empty() {
            schema.insert("required".to_string(), Value::Array(required));
        }
        schema.insert("additionalProperties".to_string(), json!(false));
        schema
    }
}

/// Returns the violation message, or `None` when `value` satisfies `kind`.
fn check_kind(name: &str, kind: &FieldKind, value: &Value) -> Option<String> {
    match kind {
        FieldKind::Text { min, max } => {
            let Some(text) = value.as_str() else {
                return Some(format!("{} must be a string", name));
            };
            if text.trim().chars().count() < *min {
                return Some(if *min == 1 {
                    format!("{} must not be empty", name)
                } else {
                    format!("{} must be at least {} characters", name, min)
                });
            }
            if text.chars().count() > *max {
                return Some(format!("{} must be at most {} characters", name, max));
            }
            None
        }
        FieldKind::Integer { min, max } => {
            let Some(n) = value.as_i64() else {
                return Some(format!("{} must be an integer", name));
            };
            if let Some(min) = min
                && n < *min
            {
                return Some(format!("{} must be greater than or equal to {}", name, min));
            }
            if let Some(max) = max
                && n > *max
            {
                return Some(format!("{} must be less than or equal to {}", name, max));
            }
            None
        }
        FieldKind::EntityId => match value.as_i64() {
            Some(n) if n > 0 => None,
            _ => Some(format!("{} must be a positive integer", name)),
        },
        FieldKind::CompanyRef => match value.as_i64() {
            Some(n) if n >= 0 => None,
            _ => Some(format!(
                "{} must be a non-negative integer (0 is the default company)",
                name
            )),
        },
        FieldKind::OneOf(allowed) => match value.as_i64() {
            Some(n) if allowed.contains(&n) => None,
            _ => Some(format!(
                "{} must be one of {}",
                name,
                allowed
                    .iter()
                    .map(i64::to_string)
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
        },
        FieldKind::Choice(allowed) => match value.as_str() {
            Some(s) if allowed.contains(&s) => None,
            _ => Some(format!("{} must be one of: {}", name, allowed.join(", "))),
        },
        FieldKind::Boolean => {
            if value.is_boolean() {
                None
            } else {
                Some(format!("{} must be a boolean", name))
            }
        }
        FieldKind::Date => match value.as_str() {
            Some(s) if NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok() => None,
            _ => Some(format!("{} must be an ISO-8601 date (YYYY-MM-DD)", name)),
        },
        FieldKind::DateTime => match value.as_str() {
            Some(s) if parse_date_like(s).is_some() => None,
            _ => Some(format!(
                "{} must be an ISO-8601 date-time (e.g. 2025-01-31T17:00:00Z)",
                name
            )),
        },
        FieldKind::Decimal { min, max } => {
            let Some(n) = value.as_f64() else {
                return Some(format!("{} must be a number", name));
            };
            if let Some(min) = min
                && n < *min
            {
                return Some(format!("{} must be greater than or equal to {}", name, min));
            }
            if let Some(max) = max
                && n > *max
            {
                return Some(format!("{} must be less than or equal to {}", name, max));
            }
            None
        }
        FieldKind::PageSize => match value.as_i64() {
            Some(n) if n >= -1 => None,
            _ => Some(format!(
                "{} must be -1 (unlimited), 0 (default) or a positive integer",
                name
            )),
        },
    }
}

fn kind_schema(kind: &FieldKind) -> JsonObject {
    let value = match kind {
        FieldKind::Text { min, max } => {
            json!({ "type": "string", "minLength": min, "maxLength": max })
        }
        FieldKind::Integer { min, max } => {
            let mut schema = json!({ "type": "integer" });
            if let Some(min) = min {
                schema["minimum"] = json!(min);
            }
            if let Some(max) = max {
                schema["maximum"] = json!(max);
            }
            schema
        }
        FieldKind::EntityId => json!({ "type": "integer", "minimum": 1 }),
        FieldKind::CompanyRef => json!({ "type": "integer", "minimum": 0 }),
        FieldKind::OneOf(allowed) => json!({ "type": "integer", "enum": allowed }),
        FieldKind::Choice(allowed) => json!({ "type": "string", "enum": allowed }),
        FieldKind::Boolean => json!({ "type": "boolean" }),
        FieldKind::Date => json!({ "type": "string", "format": "date" }),
        FieldKind::DateTime => json!({ "type": "string", "format": "date-time" }),
        FieldKind::Decimal { min, max } => {
            let mut schema = json!({ "type": "number" });
            if let Some(min) = min {
                schema["minimum"] = json!(min);
            }
            if let Some(max) = max {
                schema["maximum"] = json!(max);
            }
            schema
        }
        FieldKind::PageSize => json!({ "type": "integer", "minimum": -1 }),
    };

    match value {
        Value::Object(map) => map,
        _ => JsonObject::new(),
    }
}

/// Parse an RFC 3339 timestamp, a naive `YYYY-MM-DDTHH:MM:SS` or a plain date.
pub fn parse_date_like(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn date_field(input: &JsonObject, key: &str) -> Option<NaiveDateTime> {
    input.get(key).and_then(Value::as_str).and_then(parse_date_like)
}
