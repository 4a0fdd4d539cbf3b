pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/users/:user_id/linkedin-checker/profile",
            get(handlers::handle_get_profile_report).post(handlers::handle_check_profile),
        )
        .route(
            "/api/v1/users/:user_id/linkedin-checker/profile/stream",
            post(handlers::handle_check_profile_stream),
        )
        .with_state(state)
}
