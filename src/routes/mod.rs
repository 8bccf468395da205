//! Router assembly.

mod camp;
mod common;

pub use camp::camp_routes;
pub use common::common_routes;

use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, Router};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Full application router: common routes, camp routes, body limit and HTTP tracing.
pub fn app(state: AppState, body_limit_bytes: usize) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(camp_routes(state))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit_bytes))
        .layer(TraceLayer::new_for_http())
}
