pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};

use crate::agent::handlers as agent;
use crate::analytics::handlers as analytics;
use crate::auth::handlers as auth;
use crate::generation::handlers as generation;
use crate::jobs::handlers as jobs;
use crate::screening::handlers as screening;
use crate::state::AppState;

/// Upper bound for request bodies, CV uploads included.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Accounts
        .route("/register", post(auth::handle_register))
        .route("/token", post(auth::handle_token))
        .route("/users/me", get(auth::handle_me))
        .route("/organizations/me", get(auth::handle_my_organization))
        // Job posts
        .route(
            "/jobs",
            post(jobs::handle_create_job).get(jobs::handle_list_jobs),
        )
        .route(
            "/jobs/:id",
            get(jobs::handle_get_job).put(jobs::handle_update_job),
        )
        .route("/jobs/:id/activate", post(jobs::handle_activate_job))
        .route("/jobs/:id/candidates", get(jobs::handle_job_candidates))
        .route("/jobs/:id/apply_public", post(screening::handle_apply_public))
        .route("/public/jobs", get(jobs::handle_public_jobs))
        // Candidates (`:id` is the job id for upload_cv)
        .route("/candidates", post(screening::handle_create_candidate))
        .route("/candidates/:id", get(screening::handle_get_candidate))
        .route("/candidates/:id/upload_cv", post(screening::handle_upload_cv))
        .route("/candidates/:id/stage", put(screening::handle_update_stage))
        .route("/candidates/:id/schedule_oa", post(screening::handle_schedule_oa))
        .route(
            "/candidates/:id/assessments",
            get(screening::handle_list_assessments),
        )
        .route(
            "/candidates/:id/interviews",
            get(screening::handle_list_interviews),
        )
        // Content generators and the conversational agent
        .route("/ai/generate_oa", post(generation::handle_generate_offer))
        .route(
            "/ai/schedule_interview",
            post(generation::handle_schedule_interview),
        )
        .route(
            "/ai/agent/:session_id/message",
            post(agent::handle_agent_message),
        )
        // Analytics
        .route("/analytics/summary", get(analytics::handle_summary))
        .route("/analytics/jobs/:id", get(analytics::handle_job_analytics))
        .route(
            "/analytics/hiring_funnel",
            get(analytics::handle_hiring_funnel),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}
