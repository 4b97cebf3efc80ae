use serde::{Deserialize, Serialize};

use crate::store::RecordMeta;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    #[default]
    Draft,
    Active,
    Closed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPost {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub org_id: String,
    pub created_by: Option<String>,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub required_skills: Vec<String>,
    pub status: JobStatus,
    pub salary_range_min: Option<f64>,
    pub salary_range_max: Option<f64>,
    pub min_experience_years: Option<f64>,
}

impl JobPost {
    pub fn is_active(&self) -> bool {
        self.status == JobStatus::Active
    }
}
