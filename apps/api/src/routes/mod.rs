pub mod careers;
pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/careers", get(careers::handle_list_careers))
        .route("/api/v1/careers/:id", get(careers::handle_get_career))
        .route("/api/v1/careers/:id/gaps", post(careers::handle_career_gaps))
        .route(
            "/api/v1/recommendations",
            post(careers::handle_recommendations),
        )
        .with_state(state)
}
