//! Field-level validation keyed by (entity kind, field name).

use crate::error::ValidationError;
use crate::model::EntityKind;
use serde_json::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldType {
    Integer,
    Text,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Constraint {
    None,
    /// Inclusive range.
    Range { min: i64, max: i64, message: &'static str },
    NonEmpty { message: &'static str },
}

#[derive(Clone, Copy, Debug)]
pub struct FieldSpec {
    pub kind: EntityKind,
    pub field: &'static str,
    pub ty: FieldType,
    pub constraint: Constraint,
}

pub const FIELDS: &[FieldSpec] = &[
    FieldSpec {
        kind: EntityKind::Camper,
        field: "name",
        ty: FieldType::Text,
        constraint: Constraint::NonEmpty { message: "Name must exist" },
    },
    FieldSpec {
        kind: EntityKind::Camper,
        field: "age",
        ty: FieldType::Integer,
        constraint: Constraint::Range { min: 8, max: 18, message: "Incorrect age" },
    },
    FieldSpec {
        kind: EntityKind::Activity,
        field: "name",
        ty: FieldType::Text,
        constraint: Constraint::None,
    },
    FieldSpec {
        kind: EntityKind::Activity,
        field: "difficulty",
        ty: FieldType::Integer,
        constraint: Constraint::None,
    },
    FieldSpec {
        kind: EntityKind::Signup,
        field: "time",
        ty: FieldType::Integer,
        constraint: Constraint::Range { min: 0, max: 23, message: "Time outside of reality" },
    },
    FieldSpec {
        kind: EntityKind::Signup,
        field: "camper_id",
        ty: FieldType::Integer,
        constraint: Constraint::None,
    },
    FieldSpec {
        kind: EntityKind::Signup,
        field: "activity_id",
        ty: FieldType::Integer,
        constraint: Constraint::None,
    },
];

pub fn field_spec(kind: EntityKind, field: &str) -> Option<&'static FieldSpec> {
    FIELDS.iter().find(|f| f.kind == kind && f.field == field)
}

/// Validate one JSON attribute. Fields missing from `FIELDS` pass through unchanged.
pub fn validate(kind: EntityKind, field: &str, value: &Value) -> Result<Value, ValidationError> {
    let Some(spec) = field_spec(kind, field) else {
        return Ok(value.clone());
    };
    Ok(match spec.ty {
        FieldType::Integer => Value::from(int_field(kind, field, value)?),
        FieldType::Text => Value::from(text_field(kind, field, value)?),
    })
}

/// Whole-number floats such as `12.0` read as integers.
fn as_whole_number(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
            .map(|f| f as i64)
    })
}

/// Read an integer attribute and check its constraint.
pub fn int_field(kind: EntityKind, field: &str, value: &Value) -> Result<i64, ValidationError> {
    let n = as_whole_number(value)
        .ok_or_else(|| ValidationError::new(kind, field, format!("{} must be an integer", field)))?;
    validate_int(kind, field, n)
}

/// Read a text attribute and check its constraint. `null` reads as empty.
pub fn text_field(kind: EntityKind, field: &str, value: &Value) -> Result<String, ValidationError> {
    let s = match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        _ => return Err(ValidationError::new(kind, field, format!("{} must be a string", field))),
    };
    validate_text(kind, field, s)
}

pub fn validate_int(kind: EntityKind, field: &str, value: i64) -> Result<i64, ValidationError> {
    match field_spec(kind, field).map(|f| f.constraint) {
        Some(Constraint::Range { min, max, message }) if !(min..=max).contains(&value) => {
            Err(ValidationError::new(kind, field, message))
        }
        _ => Ok(value),
    }
}

pub fn validate_text(kind: EntityKind, field: &str, value: String) -> Result<String, ValidationError> {
    match field_spec(kind, field).map(|f| f.constraint) {
        Some(Constraint::NonEmpty { message }) if value.is_empty() => {
            Err(ValidationError::new(kind, field, message))
        }
        _ => Ok(value),
    }
}
