//! Axum route handlers for hiring analytics.

use std::collections::HashSet;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use super::{hiring_funnel, job_analytics, summarize, HiringFunnel, JobAnalytics, Summary};
use crate::auth::extractors::CurrentUser;
use crate::errors::AppError;
use crate::jobs::authorize_job;
use crate::models::candidate::Candidate;
use crate::state::AppState;
use crate::store::RecordStore;

#[derive(Debug, Deserialize)]
pub struct FunnelQuery {
    /// Restricts the funnel to one of the organization's jobs.
    pub job_id: Option<String>,
}

/// GET /analytics/summary
pub async fn handle_summary(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Json<Summary> {
    let store = &state.store;
    let jobs = store.jobs.find(|j| j.org_id == user.org_id).await;
    let job_ids: HashSet<&str> = jobs.iter().map(|j| j.meta.id.as_str()).collect();

    let candidates = store
        .candidates
        .find(|c| job_ids.contains(c.job_post_id.as_str()))
        .await;
    let candidate_ids: HashSet<&str> = candidates.iter().map(|c| c.meta.id.as_str()).collect();

    let results = store
        .screening_results
        .find(|r| candidate_ids.contains(r.candidate_id.as_str()))
        .await;
    let assessments = store
        .assessments
        .find(|a| candidate_ids.contains(a.candidate_id.as_str()))
        .await;
    let interviews = store
        .interviews
        .find(|i| candidate_ids.contains(i.candidate_id.as_str()))
        .await;

    Json(summarize(
        &jobs,
        &candidates,
        &results,
        &assessments,
        &interviews,
    ))
}

/// GET /analytics/jobs/:id
pub async fn handle_job_analytics(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(job_id): Path<String>,
) -> Result<Json<JobAnalytics>, AppError> {
    let job = authorize_job(&state.store, &user.org_id, &job_id).await?;
    let candidates = state.store.candidates_for_job(&job.meta.id).await;
    let results = state
        .store
        .screening_results
        .find(|r| r.job_id == job.meta.id)
        .await;
    Ok(Json(job_analytics(&job, &candidates, &results)))
}

/// GET /analytics/hiring_funnel?job_id=
pub async fn handle_hiring_funnel(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<FunnelQuery>,
) -> Result<Json<HiringFunnel>, AppError> {
    let candidates = match query.job_id.as_deref() {
        Some(job_id) => {
            let job = authorize_job(&state.store, &user.org_id, job_id).await?;
            state.store.candidates_for_job(&job.meta.id).await
        }
        None => org_candidates(&state.store, &user.org_id).await,
    };
    Ok(Json(hiring_funnel(&candidates)))
}

async fn org_candidates(store: &RecordStore, org_id: &str) -> Vec<Candidate> {
    let jobs = store.jobs.find(|j| j.org_id == org_id).await;
    let job_ids: HashSet<&str> = jobs.iter().map(|j| j.meta.id.as_str()).collect();
    store
        .candidates
        .find(|c| job_ids.contains(c.job_post_id.as_str()))
        .await
}
