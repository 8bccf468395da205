//! GET/POST /campers, GET/PATCH /campers/:id.

use super::body_to_map;
use crate::error::AppError;
use crate::model::{EntityKind, NewCamper};
use crate::response::{accepted, created, ok};
use crate::serialize::{CamperJson, CamperSummary};
use crate::service::CamperService;
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{Path, State},
    response::IntoResponse,
};

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let campers = CamperService::list(&state.pool).await?;
    Ok(ok(campers.iter().map(CamperSummary::from).collect::<Vec<_>>()))
}

pub async fn create(State(state): State<AppState>, body: Bytes) -> Result<impl IntoResponse, AppError> {
    let body = body_to_map(EntityKind::Camper, &body)?;
    let new = NewCamper::from_json(&body)?;
    let graph = CamperService::create(&state.pool, new).await?;
    Ok(created(CamperJson::from(&graph)))
}

pub async fn read(State(state): State<AppState>, Path(id): Path<i64>) -> Result<impl IntoResponse, AppError> {
    let graph = CamperService::get(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound(EntityKind::Camper))?;
    Ok(ok(CamperJson::from(&graph)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let body = match body_to_map(EntityKind::Camper, &body) {
        Ok(body) => body,
        Err(e) => {
            // A missing camper wins over a bad body.
            CamperService::get(&state.pool, id)
                .await?
                .ok_or(AppError::NotFound(EntityKind::Camper))?;
            return Err(e.into());
        }
    };
    let graph = CamperService::update(&state.pool, id, &body).await?;
    Ok(accepted(CamperJson::from(&graph)))
}
