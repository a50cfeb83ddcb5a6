pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::agents::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        .route("/scrape-linkedin", post(handlers::handle_scrape))
        .route("/chat", post(handlers::handle_chat))
        .route("/analyze-profile", post(handlers::handle_analyze_profile))
        .route("/job-fit-analysis", post(handlers::handle_job_fit))
        .route(
            "/content-enhancement",
            post(handlers::handle_content_enhancement),
        )
        .route("/career-guidance", post(handlers::handle_career_guidance))
        .route(
            "/sessions/:session_id/history",
            get(handlers::handle_history),
        )
        .route("/sessions/:session_id", delete(handlers::handle_clear_session))
        .with_state(state)
}
