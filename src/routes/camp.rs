//! Camper, activity and signup routes.

use crate::handlers::{activities, campers, signups};
use crate::state::AppState;
use axum::{routing::get, routing::post, Router};

pub fn camp_routes(state: AppState) -> Router {
    Router::new()
        .route("/campers", get(campers::list).post(campers::create))
        .route("/campers/:id", get(campers::read).patch(campers::update))
        .route("/activities", get(activities::list))
        .route("/activities/:id", get(activities::read).delete(activities::delete))
        .route("/signups", post(signups::create))
        .with_state(state)
}
