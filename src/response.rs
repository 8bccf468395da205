//! Status-code helpers for successful responses. Bodies are bare JSON views, no envelope.

use axum::{http::StatusCode, Json};
use serde::Serialize;

pub fn ok<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(data))
}

pub fn accepted<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::ACCEPTED, Json(data))
}
