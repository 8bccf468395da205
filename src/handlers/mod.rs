//! HTTP handlers for campers, activities and signups.

pub mod activities;
pub mod campers;
pub mod signups;

use crate::error::ValidationError;
use crate::model::EntityKind;
use axum::body::Bytes;
use serde_json::{Map, Value};

/// Request bodies must be JSON objects; unparseable or non-object bodies are validation failures.
/// The content type is not checked.
fn body_to_map(kind: EntityKind, body: &Bytes) -> Result<Map<String, Value>, ValidationError> {
    match serde_json::from_slice(body) {
        Ok(Value::Object(m)) => Ok(m),
        Ok(_) => Err(ValidationError::new(kind, "body", "body must be a JSON object")),
        Err(e) => Err(ValidationError::new(kind, "body", format!("body is not valid JSON: {}", e))),
    }
}
