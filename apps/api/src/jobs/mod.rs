//! Organization-scoped job posts.

pub mod handlers;

use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::job::{JobPost, JobStatus};
use crate::models::user::User;
use crate::store::{Record, RecordMeta, RecordStore};

#[derive(Debug, Clone, Deserialize)]
pub struct JobPostCreate {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub status: Option<JobStatus>,
    #[serde(default)]
    pub salary_range_min: Option<f64>,
    #[serde(default)]
    pub salary_range_max: Option<f64>,
    #[serde(default)]
    pub min_experience_years: Option<f64>,
}

impl JobPostCreate {
    pub fn into_job(self, owner: &User) -> JobPost {
        JobPost {
            meta: RecordMeta::pending(),
            org_id: owner.org_id.clone(),
            created_by: Some(owner.id().to_string()),
            title: self.title.trim().to_string(),
            description: self.description,
            location: self.location,
            required_skills: clean_skills(self.required_skills),
            status: self.status.unwrap_or_default(),
            salary_range_min: self.salary_range_min,
            salary_range_max: self.salary_range_max,
            min_experience_years: self.min_experience_years,
        }
    }
}

/// Partial update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobPostUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub required_skills: Option<Vec<String>>,
    pub status: Option<JobStatus>,
    pub salary_range_min: Option<f64>,
    pub salary_range_max: Option<f64>,
    pub min_experience_years: Option<f64>,
}

impl JobPostUpdate {
    pub fn apply_to(self, job: &mut JobPost) {
        if let Some(title) = self.title {
            job.title = title.trim().to_string();
        }
        if let Some(description) = self.description {
            job.description = description;
        }
        if self.location.is_some() {
            job.location = self.location;
        }
        if let Some(skills) = self.required_skills {
            job.required_skills = clean_skills(skills);
        }
        if let Some(status) = self.status {
            job.status = status;
        }
        if self.salary_range_min.is_some() {
            job.salary_range_min = self.salary_range_min;
        }
        if self.salary_range_max.is_some() {
            job.salary_range_max = self.salary_range_max;
        }
        if self.min_experience_years.is_some() {
            job.min_experience_years = self.min_experience_years;
        }
    }
}

pub fn validate_job(job: &JobPost) -> Result<(), AppError> {
    if job.title.is_empty() {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }
    let amounts = [
        ("salary_range_min", job.salary_range_min),
        ("salary_range_max", job.salary_range_max),
        ("min_experience_years", job.min_experience_years),
    ];
    for (field, value) in amounts {
        if value.is_some_and(|v| !v.is_finite() || v < 0.0) {
            return Err(AppError::Validation(format!(
                "{field} must be a non-negative number"
            )));
        }
    }
    if let (Some(min), Some(max)) = (job.salary_range_min, job.salary_range_max) {
        if min > max {
            return Err(AppError::Validation(
                "salary_range_min cannot exceed salary_range_max".to_string(),
            ));
        }
    }
    Ok(())
}

/// Loads a job, checking it belongs to `org_id`.
pub async fn authorize_job(store: &RecordStore, org_id: &str, job_id: &str) -> Result<JobPost, AppError> {
    let job = store
        .jobs
        .get(job_id)
        .await
        .ok_or_else(|| AppError::NotFound("Job post not found".to_string()))?;
    if job.org_id != org_id {
        return Err(AppError::Forbidden(
            "Not authorized to access this job".to_string(),
        ));
    }
    Ok(job)
}

pub async fn create_job(store: &RecordStore, owner: &User, request: JobPostCreate) -> Result<JobPost, AppError> {
    let job = request.into_job(owner);
    validate_job(&job)?;
    let job = store.jobs.save(job).await;
    info!(job_id = job.id(), org_id = %job.org_id, status = ?job.status, "job post created");
    Ok(job)
}

pub async fn update_job(
    store: &RecordStore,
    org_id: &str,
    job_id: &str,
    update: JobPostUpdate,
) -> Result<JobPost, AppError> {
    let mut job = authorize_job(store, org_id, job_id).await?;
    update.apply_to(&mut job);
    validate_job(&job)?;

    store
        .jobs
        .update(job_id, move |stored| *stored = job)
        .await
        .ok_or_else(|| AppError::NotFound("Job post not found".to_string()))
}

/// Sets the job ACTIVE. Activating an active job is a no-op.
pub async fn activate_job(store: &RecordStore, org_id: &str, job_id: &str) -> Result<JobPost, AppError> {
    let job = authorize_job(store, org_id, job_id).await?;
    if job.is_active() {
        return Ok(job);
    }

    let job = store
        .jobs
        .update(job_id, |j| j.status = JobStatus::Active)
        .await
        .ok_or_else(|| AppError::NotFound("Job post not found".to_string()))?;
    info!(job_id = job.id(), "job post activated");
    Ok(job)
}

fn clean_skills(skills: Vec<String>) -> Vec<String> {
    skills
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::demo_user;

    fn create_request(title: &str) -> JobPostCreate {
        JobPostCreate {
            title: title.to_string(),
            description: "Build APIs with Python".to_string(),
            location: Some("Remote".to_string()),
            required_skills: vec![" python ".to_string(), "".to_string()],
            status: None,
            salary_range_min: Some(50_000.0),
            salary_range_max: Some(90_000.0),
            min_experience_years: None,
        }
    }

    #[tokio::test]
    async fn test_create_defaults_to_draft_in_owner_org() {
        let store = RecordStore::new();
        let owner = demo_user();
        let job = create_job(&store, &owner, create_request("Backend Engineer")).await.unwrap();
        assert_eq!(job.status, JobStatus::Draft);
        assert_eq!(job.org_id, owner.org_id);
        assert_eq!(job.created_by.as_deref(), Some(owner.id()));
        assert_eq!(job.required_skills, vec!["python"]);
    }

    #[tokio::test]
    async fn test_create_rejects_bad_salary_range() {
        let store = RecordStore::new();
        let mut request = create_request("Backend Engineer");
        request.salary_range_min = Some(100_000.0);
        let err = create_job(&store, &demo_user(), request).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = create_job(&store, &demo_user(), create_request("  ")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(store.jobs.len().await, 0);
    }

    #[tokio::test]
    async fn test_activate_is_idempotent() {
        let store = RecordStore::new();
        let owner = demo_user();
        let job = create_job(&store, &owner, create_request("SRE")).await.unwrap();

        let first = activate_job(&store, &owner.org_id, job.id()).await.unwrap();
        let second = activate_job(&store, &owner.org_id, job.id()).await.unwrap();
        assert_eq!(first.status, JobStatus::Active);
        assert_eq!(second.status, JobStatus::Active);
        assert_eq!(store.jobs.len().await, 1);
    }

    #[tokio::test]
    async fn test_foreign_org_is_forbidden() {
        let store = RecordStore::new();
        let job = create_job(&store, &demo_user(), create_request("SRE")).await.unwrap();
        let err = activate_job(&store, "other-org", job.id()).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
        let err = authorize_job(&store, "other-org", "missing").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_fields() {
        let store = RecordStore::new();
        let owner = demo_user();
        let job = create_job(&store, &owner, create_request("SRE")).await.unwrap();

        let update = JobPostUpdate {
            title: Some("Senior SRE".to_string()),
            status: Some(JobStatus::Closed),
            ..Default::default()
        };
        let updated = update_job(&store, &owner.org_id, job.id(), update).await.unwrap();
        assert_eq!(updated.id(), job.id());
        assert_eq!(updated.title, "Senior SRE");
        assert_eq!(updated.status, JobStatus::Closed);
        assert_eq!(updated.location.as_deref(), Some("Remote"));
        assert_eq!(updated.meta.created_at, job.meta.created_at);
    }

    #[tokio::test]
    async fn test_invalid_update_leaves_job_untouched() {
        let store = RecordStore::new();
        let owner = demo_user();
        let job = create_job(&store, &owner, create_request("SRE")).await.unwrap();
        let update = JobPostUpdate {
            salary_range_max: Some(10.0),
            ..Default::default()
        };
        assert!(update_job(&store, &owner.org_id, job.id(), update).await.is_err());
        let stored = store.jobs.get(job.id()).await.unwrap();
        assert_eq!(stored.salary_range_max, Some(90_000.0));
    }
}
