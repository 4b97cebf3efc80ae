//! Axum route handlers for applications and candidates.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::auth::extractors::CurrentUser;
use crate::errors::AppError;
use crate::generation::assessment::DEFAULT_QUESTION_COUNT;
use crate::models::assessment::{Assessment, Interview};
use crate::models::candidate::{Candidate, Stage};
use crate::screening::pipeline::{
    authorize_candidate, create_candidate, schedule_assessment, submit_application,
    submit_upload, update_stage, ApplicationInput, ApplicationOutcome, UploadedCv,
};
use crate::screening::scoring::AtsReport;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PublicApplicationRequest {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub cv_text: String,
}

#[derive(Debug, Deserialize)]
pub struct CandidateCreate {
    pub full_name: String,
    pub email: String,
    pub job_post_id: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub resume_url: Option<String>,
    #[serde(default)]
    pub cv_text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CandidateDetail {
    #[serde(flatten)]
    pub candidate: Candidate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai: Option<AtsReport>,
}

#[derive(Debug, Deserialize)]
pub struct StageUpdateRequest {
    pub stage: String,
}

#[derive(Debug, Deserialize)]
pub struct ScheduleOaRequest {
    #[serde(default)]
    pub num_questions: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ScheduleOaResponse {
    pub assessment: Assessment,
    pub candidate: Candidate,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /jobs/:id/apply_public
///
/// Unauthenticated application with inline CV text. Returns the stored
/// candidate and the ATS report.
pub async fn handle_apply_public(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
    Json(request): Json<PublicApplicationRequest>,
) -> Result<Json<ApplicationOutcome>, AppError> {
    let input = ApplicationInput {
        full_name: request.full_name,
        email: request.email,
        phone: request.phone,
        cv_text: request.cv_text,
        resume_url: None,
    };
    submit_application(&state.store, state.cv_scorer.as_ref(), &job_id, input)
        .await
        .map(Json)
}

/// POST /candidates
pub async fn handle_create_candidate(
    State(state): State<AppState>,
    Json(request): Json<CandidateCreate>,
) -> Result<(StatusCode, Json<Candidate>), AppError> {
    let input = ApplicationInput {
        full_name: request.full_name,
        email: request.email,
        phone: request.phone,
        cv_text: request.cv_text.unwrap_or_default(),
        resume_url: request.resume_url,
    };
    let candidate = create_candidate(
        &state.store,
        state.cv_scorer.as_ref(),
        &request.job_post_id,
        input,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(candidate)))
}

/// POST /candidates/:job_id/upload_cv
///
/// Multipart form: `file` plus `full_name`, `email` and optional `phone`.
pub async fn handle_upload_cv(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(job_id): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<ApplicationOutcome>, AppError> {
    let mut upload = UploadedCv::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                upload.file_name = field.file_name().map(str::to_string);
                upload.content_type = field.content_type().map(str::to_string);
                upload.data = Some(field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read uploaded file: {e}"))
                })?);
            }
            "full_name" | "email" | "phone" => {
                let value = field.text().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read field '{name}': {e}"))
                })?;
                match name.as_str() {
                    "full_name" => upload.full_name = value,
                    "email" => upload.email = value,
                    _ => upload.phone = Some(value),
                }
            }
            _ => {}
        }
    }

    submit_upload(
        &state.store,
        state.storage.as_ref(),
        state.cv_scorer.as_ref(),
        &user.org_id,
        &job_id,
        upload,
    )
    .await
    .map(Json)
}

/// GET /candidates/:id
///
/// The candidate plus its ATS report, when one has been stored.
pub async fn handle_get_candidate(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(candidate_id): Path<String>,
) -> Result<Json<CandidateDetail>, AppError> {
    let (candidate, _) = authorize_candidate(&state.store, &user.org_id, &candidate_id).await?;
    let ai = state
        .store
        .scoring_result_for(&candidate.meta.id)
        .await
        .map(|r| r.report());
    Ok(Json(CandidateDetail { candidate, ai }))
}

/// PUT /candidates/:id/stage
pub async fn handle_update_stage(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(candidate_id): Path<String>,
    Json(request): Json<StageUpdateRequest>,
) -> Result<Json<Candidate>, AppError> {
    let stage = Stage::parse(&request.stage)
        .ok_or_else(|| AppError::Validation(format!("Unknown stage '{}'", request.stage)))?;
    update_stage(&state.store, &user.org_id, &candidate_id, stage)
        .await
        .map(Json)
}

/// POST /candidates/:id/schedule_oa
///
/// Body is optional; `num_questions` defaults to 5. A body that is present
/// but not a valid request is rejected before anything is stored.
pub async fn handle_schedule_oa(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(candidate_id): Path<String>,
    body: Bytes,
) -> Result<Json<ScheduleOaResponse>, AppError> {
    let num_questions = parse_schedule_oa(&body)?
        .and_then(|r| r.num_questions)
        .unwrap_or(DEFAULT_QUESTION_COUNT);

    let (assessment, candidate) = schedule_assessment(
        &state.store,
        state.llm.as_ref(),
        &user.org_id,
        &candidate_id,
        num_questions,
    )
    .await?;
    Ok(Json(ScheduleOaResponse {
        assessment,
        candidate,
    }))
}

fn parse_schedule_oa(body: &[u8]) -> Result<Option<ScheduleOaRequest>, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::Validation(format!("Invalid request body: {e}")))
}

/// GET /candidates/:id/assessments
pub async fn handle_list_assessments(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(candidate_id): Path<String>,
) -> Result<Json<Vec<Assessment>>, AppError> {
    let (candidate, _) = authorize_candidate(&state.store, &user.org_id, &candidate_id).await?;
    let assessments = state
        .store
        .assessments
        .find(|a| a.candidate_id == candidate.meta.id)
        .await;
    Ok(Json(assessments))
}

/// GET /candidates/:id/interviews
pub async fn handle_list_interviews(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(candidate_id): Path<String>,
) -> Result<Json<Vec<Interview>>, AppError> {
    let (candidate, _) = authorize_candidate(&state.store, &user.org_id, &candidate_id).await?;
    let interviews = state
        .store
        .interviews
        .find(|i| i.candidate_id == candidate.meta.id)
        .await;
    Ok(Json(interviews))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_schedule_body_uses_default() {
        assert!(parse_schedule_oa(b"").unwrap().is_none());
        assert!(parse_schedule_oa(b"  \n").unwrap().is_none());
        assert!(parse_schedule_oa(b"null").unwrap().is_none());
        let request = parse_schedule_oa(b"{}").unwrap().unwrap();
        assert!(request.num_questions.is_none());
    }

    #[test]
    fn test_schedule_body_reads_count() {
        let request = parse_schedule_oa(br#"{"num_questions": 3}"#).unwrap().unwrap();
        assert_eq!(request.num_questions, Some(3));
    }

    #[test]
    fn test_malformed_schedule_body_is_rejected() {
        for body in [
            &br#"{"num_questions": "3"}"#[..],
            &br#"{"num_questions": -1}"#[..],
            &b"{not json"[..],
        ] {
            assert!(matches!(
                parse_schedule_oa(body),
                Err(AppError::Validation(_))
            ));
        }
    }
}
