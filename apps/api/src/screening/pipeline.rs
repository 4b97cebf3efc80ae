//! Application lifecycle: intake, scoring, assessment scheduling, stage changes.
//!
//! Each step touches several collections in sequence without a transaction.
//! A failure between steps can leave a candidate without a scoring result;
//! readers treat the `ai` part of a response as optional.

use bytes::Bytes;
use chrono::Utc;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::assessment::generate_assessment_questions;
use crate::llm_client::LlmClient;
use crate::models::assessment::{Assessment, AssessmentStatus};
use crate::models::candidate::{Candidate, ScoringResult, Stage};
use crate::models::job::JobPost;
use crate::screening::extract::extract_text;
use crate::screening::scoring::{AtsReport, CvScorer};
use crate::storage::{resume_key, ResumeStorage};
use crate::store::{Record, RecordMeta, RecordStore};

pub const INACTIVE_JOB: &str = "Invalid or inactive Job Post ID";
pub const MAX_QUESTIONS: usize = 20;

#[derive(Debug, Clone, Default)]
pub struct ApplicationInput {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub cv_text: String,
    pub resume_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApplicationOutcome {
    pub candidate: Candidate,
    pub ai: AtsReport,
}

/// A multipart CV upload. Fields are validated only after the job checks pass.
#[derive(Debug, Clone, Default)]
pub struct UploadedCv {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Option<Bytes>,
}

/// Applies to an ACTIVE job with CV text, scores it, and stores both records.
pub async fn submit_application(
    store: &RecordStore,
    scorer: &dyn CvScorer,
    job_id: &str,
    input: ApplicationInput,
) -> Result<ApplicationOutcome, AppError> {
    let job = store
        .jobs
        .get(job_id)
        .await
        .filter(JobPost::is_active)
        .ok_or_else(|| AppError::Validation(INACTIVE_JOB.to_string()))?;

    require_identity(&input.full_name, &input.email)?;
    Ok(apply_to_job(store, scorer, &job, input).await)
}

/// Stores the uploaded document, extracts its text, then applies as
/// `submit_application` does. The job must belong to `org_id`.
pub async fn submit_upload(
    store: &RecordStore,
    storage: &dyn ResumeStorage,
    scorer: &dyn CvScorer,
    org_id: &str,
    job_id: &str,
    upload: UploadedCv,
) -> Result<ApplicationOutcome, AppError> {
    let job = store
        .jobs
        .get(job_id)
        .await
        .ok_or_else(|| AppError::NotFound("Job post not found".to_string()))?;
    if job.org_id != org_id {
        return Err(AppError::Forbidden(
            "Not authorized to upload CVs for this job".to_string(),
        ));
    }
    if !job.is_active() {
        return Err(AppError::Validation(INACTIVE_JOB.to_string()));
    }

    require_identity(&upload.full_name, &upload.email)?;
    let data = upload
        .data
        .filter(|d| !d.is_empty())
        .ok_or_else(|| AppError::Validation("A CV file is required".to_string()))?;

    let key = resume_key(job.id(), upload.file_name.as_deref());
    let resume_url = storage
        .put(&key, data.clone(), upload.content_type.as_deref())
        .await?;
    let cv_text = extract_text(
        data,
        upload.file_name.as_deref(),
        upload.content_type.as_deref(),
    )
    .await;

    let input = ApplicationInput {
        full_name: upload.full_name,
        email: upload.email,
        phone: upload.phone,
        cv_text,
        resume_url: Some(resume_url),
    };
    Ok(apply_to_job(store, scorer, &job, input).await)
}

/// Records a candidate against any existing job, whatever its status.
/// The CV is scored only when text was supplied.
pub async fn create_candidate(
    store: &RecordStore,
    scorer: &dyn CvScorer,
    job_id: &str,
    input: ApplicationInput,
) -> Result<Candidate, AppError> {
    let job = store
        .jobs
        .get(job_id)
        .await
        .ok_or_else(|| AppError::NotFound("Job post not found".to_string()))?;
    require_identity(&input.full_name, &input.email)?;

    let candidate = store.candidates.save(new_candidate(&job, input)).await;
    if !candidate.cv_text.trim().is_empty() {
        let report = scorer.score(&candidate.cv_text).await;
        save_scoring_result(store, &candidate, &report).await;
    }
    Ok(candidate)
}

/// Loads a candidate and its job, checking the job belongs to `org_id`.
pub async fn authorize_candidate(
    store: &RecordStore,
    org_id: &str,
    candidate_id: &str,
) -> Result<(Candidate, JobPost), AppError> {
    let candidate = store
        .candidates
        .get(candidate_id)
        .await
        .ok_or_else(|| AppError::NotFound("Candidate not found".to_string()))?;
    let job = store
        .jobs
        .get(&candidate.job_post_id)
        .await
        .ok_or_else(|| AppError::NotFound("Job post not found".to_string()))?;
    if job.org_id != org_id {
        return Err(AppError::Forbidden(
            "Access denied to view this candidate".to_string(),
        ));
    }
    Ok((candidate, job))
}

/// Generates and stores an assessment, then moves the candidate to
/// ASSESSMENT_SENT regardless of the stage it was in.
pub async fn schedule_assessment(
    store: &RecordStore,
    llm: Option<&LlmClient>,
    org_id: &str,
    candidate_id: &str,
    num_questions: usize,
) -> Result<(Assessment, Candidate), AppError> {
    if !(1..=MAX_QUESTIONS).contains(&num_questions) {
        return Err(AppError::Validation(format!(
            "num_questions must be between 1 and {MAX_QUESTIONS}"
        )));
    }
    let (candidate, job) = authorize_candidate(store, org_id, candidate_id).await?;

    let questions =
        generate_assessment_questions(llm, &candidate.cv_text, &job.description, num_questions)
            .await;
    let assessment = store
        .assessments
        .save(Assessment {
            meta: RecordMeta::pending(),
            candidate_id: candidate.id().to_string(),
            job_id: job.id().to_string(),
            generated_questions: questions,
            status: AssessmentStatus::Sent,
            sent_at: Utc::now(),
            completion_link: format!("/assessments/{}", Uuid::new_v4()),
        })
        .await;

    let candidate = set_stage(store, candidate.id(), Stage::AssessmentSent).await?;
    info!(
        candidate_id = candidate.id(),
        assessment_id = assessment.id(),
        questions = assessment.generated_questions.len(),
        "assessment scheduled"
    );
    Ok((assessment, candidate))
}

/// Sets any stage; no transition rules are applied.
pub async fn update_stage(
    store: &RecordStore,
    org_id: &str,
    candidate_id: &str,
    stage: Stage,
) -> Result<Candidate, AppError> {
    let (candidate, _) = authorize_candidate(store, org_id, candidate_id).await?;
    let updated = set_stage(store, candidate.id(), stage).await?;
    info!(
        candidate_id = updated.id(),
        from = candidate.stage.as_str(),
        to = stage.as_str(),
        "candidate stage changed"
    );
    Ok(updated)
}

async fn set_stage(store: &RecordStore, candidate_id: &str, stage: Stage) -> Result<Candidate, AppError> {
    store
        .candidates
        .update(candidate_id, |c| c.stage = stage)
        .await
        .ok_or_else(|| AppError::NotFound("Candidate not found".to_string()))
}

async fn apply_to_job(
    store: &RecordStore,
    scorer: &dyn CvScorer,
    job: &JobPost,
    input: ApplicationInput,
) -> ApplicationOutcome {
    let candidate = store.candidates.save(new_candidate(job, input)).await;
    let ai = scorer.score(&candidate.cv_text).await;
    save_scoring_result(store, &candidate, &ai).await;

    info!(
        candidate_id = candidate.id(),
        job_id = job.id(),
        ats_score = ai.ats_score,
        "application received"
    );
    ApplicationOutcome { candidate, ai }
}

async fn save_scoring_result(store: &RecordStore, candidate: &Candidate, report: &AtsReport) {
    let candidate_id = candidate.id().to_string();
    store
        .screening_results
        .upsert_by(ScoringResult::from_report(candidate, report), |r| {
            r.candidate_id == candidate_id
        })
        .await;
}

fn new_candidate(job: &JobPost, input: ApplicationInput) -> Candidate {
    Candidate {
        meta: RecordMeta::pending(),
        job_post_id: job.id().to_string(),
        full_name: input.full_name.trim().to_string(),
        email: input.email.trim().to_string(),
        phone: input.phone.filter(|p| !p.trim().is_empty()),
        cv_text: input.cv_text,
        resume_url: input.resume_url,
        stage: Stage::Applied,
        application_date: Utc::now(),
    }
}

fn require_identity(full_name: &str, email: &str) -> Result<(), AppError> {
    if full_name.trim().is_empty() || email.trim().is_empty() {
        return Err(AppError::Validation(
            "full_name and email are required".to_string(),
        ));
    }
    Ok(())
}
