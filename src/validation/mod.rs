//! Tool input validation.
//!
//! Every tool validates its raw arguments against a closed, declarative
//! [`Schema`] before any remote call is made. Failures carry the complete,
//! ordered violation list so the caller can fix everything in one round-trip.

mod error;
pub mod fields;
mod input;
mod schema;


pub use error::{ValidationError, Violation};
pub use input::{Input, ToolInput};
pub use schema::{FieldKind, FieldSpec, JsonObject, Refinement, Rule, Schema, parse_date_like};
