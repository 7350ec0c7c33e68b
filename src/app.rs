use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/tally", post(handlers::submit))
        .route("/api/tally", get(handlers::get_tally))
        .route("/api/health", get(handlers::health))
        .with_state(state)
}
