//! Axum route handlers for the content generators.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::auth::extractors::CurrentUser;
use crate::errors::AppError;
use crate::generation::interview::{schedule_interview, InterviewSession};
use crate::generation::offer::{generate_offer, Offer};
use crate::screening::pipeline::authorize_candidate;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateOfferRequest {
    #[serde(default)]
    pub candidate_id: Option<String>,
    #[serde(default)]
    pub cv_text: Option<String>,
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct ScheduleInterviewRequest {
    #[serde(default)]
    pub candidate_id: Option<String>,
    #[serde(default)]
    pub job_id: Option<String>,
    #[serde(default)]
    pub preferred_times: Vec<String>,
}

/// POST /ai/generate_oa
///
/// Offer letter from inline `cv_text`, or from the stored CV of `candidate_id`.
/// Inline text wins when both are given.
pub async fn handle_generate_offer(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<GenerateOfferRequest>,
) -> Result<Json<Offer>, AppError> {
    let mut cv_text = request.cv_text.filter(|t| !t.trim().is_empty());

    if cv_text.is_none() {
        if let Some(candidate_id) = request.candidate_id.as_deref() {
            let (candidate, _) =
                authorize_candidate(&state.store, &user.org_id, candidate_id).await?;
            cv_text = Some(candidate.cv_text);
        }
    }

    let cv_text = cv_text.ok_or_else(|| {
        AppError::Validation("cv_text is required either directly or via candidate_id".to_string())
    })?;
    Ok(Json(generate_offer(&cv_text, request.role.trim())))
}

/// POST /ai/schedule_interview
pub async fn handle_schedule_interview(
    CurrentUser(_user): CurrentUser,
    Json(request): Json<ScheduleInterviewRequest>,
) -> Result<Json<InterviewSession>, AppError> {
    let required = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
    let (Some(candidate_id), Some(job_id)) =
        (required(request.candidate_id), required(request.job_id))
    else {
        return Err(AppError::Validation(
            "candidate_id and job_id are required".to_string(),
        ));
    };

    Ok(Json(schedule_interview(
        &candidate_id,
        &job_id,
        &request.preferred_times,
    )))
}
