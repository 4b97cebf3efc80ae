//! Axum route handlers for job posts.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::{activate_job, authorize_job, create_job, update_job, JobPostCreate, JobPostUpdate};
use crate::auth::extractors::CurrentUser;
use crate::errors::AppError;
use crate::models::candidate::Candidate;
use crate::models::job::JobPost;
use crate::state::AppState;

/// POST /jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<JobPostCreate>,
) -> Result<(StatusCode, Json<JobPost>), AppError> {
    let job = create_job(&state.store, &user, request).await?;
    Ok((StatusCode::CREATED, Json(job)))
}

/// GET /jobs
///
/// Every job of the caller's organization, in creation order.
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Json<Vec<JobPost>> {
    Json(state.store.jobs.find(|j| j.org_id == user.org_id).await)
}

/// GET /jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(job_id): Path<String>,
) -> Result<Json<JobPost>, AppError> {
    authorize_job(&state.store, &user.org_id, &job_id).await.map(Json)
}

/// PUT /jobs/:id
pub async fn handle_update_job(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(job_id): Path<String>,
    Json(update): Json<JobPostUpdate>,
) -> Result<Json<JobPost>, AppError> {
    update_job(&state.store, &user.org_id, &job_id, update)
        .await
        .map(Json)
}

/// POST /jobs/:id/activate
pub async fn handle_activate_job(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(job_id): Path<String>,
) -> Result<Json<JobPost>, AppError> {
    activate_job(&state.store, &user.org_id, &job_id)
        .await
        .map(Json)
}

/// GET /jobs/:id/candidates
pub async fn handle_job_candidates(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(job_id): Path<String>,
) -> Result<Json<Vec<Candidate>>, AppError> {
    let job = authorize_job(&state.store, &user.org_id, &job_id).await?;
    Ok(Json(state.store.candidates_for_job(&job.meta.id).await))
}

/// GET /public/jobs
///
/// ACTIVE jobs across all organizations. No authentication.
pub async fn handle_public_jobs(State(state): State<AppState>) -> Json<Vec<JobPost>> {
    Json(state.store.jobs.find(JobPost::is_active).await)
}
