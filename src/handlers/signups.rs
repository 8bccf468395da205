//! POST /signups.

use super::body_to_map;
use crate::error::AppError;
use crate::model::{EntityKind, NewSignup};
use crate::response::created;
use crate::serialize::SignupJson;
use crate::service::SignupService;
use crate::state::AppState;
use axum::{body::Bytes, extract::State, response::IntoResponse};

pub async fn create(State(state): State<AppState>, body: Bytes) -> Result<impl IntoResponse, AppError> {
    let body = body_to_map(EntityKind::Signup, &body)?;
    let new = NewSignup::from_json(&body)?;
    let graph = SignupService::create(&state.pool, new).await?;
    Ok(created(SignupJson::from(&graph)))
}
