//! Typed errors and HTTP mapping.

use crate::model::EntityKind;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use sqlx::error::ErrorKind;
use thiserror::Error;

/// Generic payload returned for every rejected write. The specific message is logged, not sent.
pub const VALIDATION_ERRORS: &str = "validation errors";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// A field value violates its type or constraint. Display is the bare message (e.g. "Incorrect age").
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    pub kind: EntityKind,
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(kind: EntityKind, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("validation: {0}")]
    Validation(#[from] ValidationError),
    #[error("{}", .0.not_found_message())]
    NotFound(EntityKind),
    #[error("persistence: {0}")]
    Persistence(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl AppError {
    /// True when the store rejected a write because of a constraint rather than an outage.
    fn is_constraint_violation(&self) -> bool {
        match self {
            AppError::Db(sqlx::Error::Database(e)) => matches!(
                e.kind(),
                ErrorKind::ForeignKeyViolation
                    | ErrorKind::CheckViolation
                    | ErrorKind::NotNullViolation
                    | ErrorKind::UniqueViolation
            ),
            _ => false,
        }
    }
}

#[derive(Serialize)]
pub struct ErrorsBody {
    pub errors: Vec<String>,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Validation(_) | AppError::Persistence(_) => {
                tracing::warn!(error = %self, "rejected write");
                validation_errors_response()
            }
            AppError::Db(_) if self.is_constraint_violation() => {
                tracing::warn!(error = %self, "rejected write");
                validation_errors_response()
            }
            AppError::NotFound(kind) => (
                StatusCode::NOT_FOUND,
                Json(ErrorBody {
                    error: kind.not_found_message(),
                }),
            )
                .into_response(),
            AppError::Db(_) | AppError::Config(_) => {
                tracing::error!(error = %self, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody {
                        error: "internal server error".into(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

fn validation_errors_response() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorsBody {
            errors: vec![VALIDATION_ERRORS.to_string()],
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_displays_bare_message() {
        let e = ValidationError::new(EntityKind::Camper, "age", "Incorrect age");
        assert_eq!(e.to_string(), "Incorrect age");
    }

    #[test]
    fn status_codes() {
        let v: AppError = ValidationError::new(EntityKind::Signup, "time", "Time outside of reality").into();
        assert_eq!(v.into_response().status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::Persistence("camper 9 does not exist".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NotFound(EntityKind::Activity).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Db(sqlx::Error::PoolTimedOut).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
