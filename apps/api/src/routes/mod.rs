pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::ai::handlers as ai;
use crate::resumes::handlers as resumes;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume CRUD
        .route(
            "/api/v1/resumes",
            get(resumes::handle_list_resumes).post(resumes::handle_create_resume),
        )
        .route(
            "/api/v1/resumes/:id",
            get(resumes::handle_get_resume)
                .put(resumes::handle_update_resume)
                .delete(resumes::handle_delete_resume),
        )
        // AI endpoints
        .route("/api/v1/ai/analyze-jd", post(ai::handle_analyze_jd))
        .route("/api/v1/ai/score", post(ai::handle_score))
        .route("/api/v1/ai/rewrite", post(ai::handle_rewrite))
        .route("/api/v1/ai/bullet-decision", post(ai::handle_bullet_decision))
        .route("/api/v1/ai/summary", post(ai::handle_summary))
        .route("/api/v1/ai/optimize", post(ai::handle_optimize))
        .with_state(state)
}
