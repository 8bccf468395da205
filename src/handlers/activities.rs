//! GET /activities, GET/DELETE /activities/:id.

use crate::error::AppError;
use crate::model::EntityKind;
use crate::response::ok;
use crate::serialize::ActivityJson;
use crate::service::ActivityService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let activities = ActivityService::list(&state.pool).await?;
    Ok(ok(activities.iter().map(ActivityJson::from).collect::<Vec<_>>()))
}

pub async fn read(State(state): State<AppState>, Path(id): Path<i64>) -> Result<impl IntoResponse, AppError> {
    let graph = ActivityService::get(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound(EntityKind::Activity))?;
    Ok(ok(ActivityJson::from(&graph)))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> Result<impl IntoResponse, AppError> {
    ActivityService::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
