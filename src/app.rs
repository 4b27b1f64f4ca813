use crate::handlers;
use crate::state::AppState;
use axum::{Router, routing::get};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::welcome))
        .route("/count", get(handlers::count))
        .route("/reset", get(handlers::reset))
        .route("/about", get(handlers::about))
        .with_state(state)
}
