use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::screening::scoring::AtsReport;
use crate::store::RecordMeta;

/// Position of a candidate in the hiring workflow.
///
/// No transition table is enforced: any handler may set any stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    #[default]
    Applied,
    ScreeningPassed,
    AssessmentSent,
    AssessmentCompleted,
    InterviewScheduled,
    OfferExtended,
    Hired,
    Rejected,
}

impl Stage {
    /// Forward lifecycle order. `Rejected` sits outside it.
    pub const LIFECYCLE: [Stage; 7] = [
        Stage::Applied,
        Stage::ScreeningPassed,
        Stage::AssessmentSent,
        Stage::AssessmentCompleted,
        Stage::InterviewScheduled,
        Stage::OfferExtended,
        Stage::Hired,
    ];

    pub const ALL: [Stage; 8] = [
        Stage::Applied,
        Stage::ScreeningPassed,
        Stage::AssessmentSent,
        Stage::AssessmentCompleted,
        Stage::InterviewScheduled,
        Stage::OfferExtended,
        Stage::Hired,
        Stage::Rejected,
    ];

    /// Index in `LIFECYCLE`, or `None` for `Rejected`.
    pub fn lifecycle_position(self) -> Option<usize> {
        Self::LIFECYCLE.iter().position(|s| *s == self)
    }

    /// Case-insensitive parse of the wire label.
    pub fn parse(label: &str) -> Option<Stage> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(label))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Applied => "APPLIED",
            Stage::ScreeningPassed => "SCREENING_PASSED",
            Stage::AssessmentSent => "ASSESSMENT_SENT",
            Stage::AssessmentCompleted => "ASSESSMENT_COMPLETED",
            Stage::InterviewScheduled => "INTERVIEW_SCHEDULED",
            Stage::OfferExtended => "OFFER_EXTENDED",
            Stage::Hired => "HIRED",
            Stage::Rejected => "REJECTED",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub job_post_id: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub cv_text: String,
    /// Reference to the stored resume document, if one was uploaded or linked.
    pub resume_url: Option<String>,
    pub stage: Stage,
    pub application_date: DateTime<Utc>,
}

/// Persisted output of the scoring engine. One per candidate, last write wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringResult {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub candidate_id: String,
    pub job_id: String,
    pub ats_score: u8,
    pub feedback: String,
    pub highlights: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detailed_feedback: Option<String>,
}

impl ScoringResult {
    pub fn from_report(candidate: &Candidate, report: &AtsReport) -> Self {
        Self {
            meta: RecordMeta::pending(),
            candidate_id: candidate.meta.id.clone(),
            job_id: candidate.job_post_id.clone(),
            ats_score: report.ats_score,
            feedback: report.feedback.clone(),
            highlights: report.highlights.clone(),
            detailed_feedback: report.detailed_feedback.clone(),
        }
    }

    pub fn report(&self) -> AtsReport {
        AtsReport {
            ats_score: self.ats_score,
            feedback: self.feedback.clone(),
            highlights: self.highlights.clone(),
            detailed_feedback: self.detailed_feedback.clone(),
        }
    }
}
