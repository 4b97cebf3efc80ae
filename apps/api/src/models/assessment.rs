use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::RecordMeta;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    Technical,
    Coding,
    OpenEnded,
    Experience,
}

impl QuestionType {
    /// Lenient mapping for labels produced by the language model.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().replace('_', "-").as_str() {
            "technical" => QuestionType::Technical,
            "coding" => QuestionType::Coding,
            "experience" => QuestionType::Experience,
            _ => QuestionType::OpenEnded,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentQuestion {
    pub question: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssessmentStatus {
    Pending,
    #[default]
    Sent,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub candidate_id: String,
    pub job_id: String,
    pub generated_questions: Vec<AssessmentQuestion>,
    pub status: AssessmentStatus,
    pub sent_at: DateTime<Utc>,
    pub completion_link: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InterviewStatus {
    #[default]
    Pending,
    Scheduled,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interview {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub candidate_id: String,
    pub job_id: String,
    pub scheduled_time: Option<DateTime<Utc>>,
    pub meeting_link: Option<String>,
    pub status: InterviewStatus,
    pub interviewer_name: Option<String>,
    pub interview_format: Option<String>,
    pub duration_minutes: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_type_serializes_kebab_case() {
        let q = AssessmentQuestion {
            question: "Why?".into(),
            kind: QuestionType::OpenEnded,
        };
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["type"], "open-ended");
    }

    #[test]
    fn test_question_type_from_label() {
        assert_eq!(QuestionType::from_label("Coding"), QuestionType::Coding);
        assert_eq!(QuestionType::from_label("open_ended"), QuestionType::OpenEnded);
        assert_eq!(QuestionType::from_label(" technical "), QuestionType::Technical);
        assert_eq!(QuestionType::from_label("behavioural"), QuestionType::OpenEnded);
    }
}
