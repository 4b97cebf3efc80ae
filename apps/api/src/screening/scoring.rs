//! ATS scoring — deterministic keyword and length heuristic over CV text.
//!
//! Default: `KeywordCvScorer` (pure, no network).
//! `EnrichedCvScorer` runs the same heuristic and then asks the language model
//! for a detailed feedback paragraph. The enrichment never touches the numeric
//! score and is dropped on any failure or timeout.
//!
//! `AppState` holds an `Arc<dyn CvScorer>`, chosen at startup from config.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::llm_client::LlmClient;
use crate::screening::prompts::{CV_FEEDBACK_PROMPT_TEMPLATE, CV_FEEDBACK_SYSTEM};

/// Fixed vocabulary, in reporting order.
pub const KEYWORDS: [&str; 9] = [
    "python",
    "fastapi",
    "sql",
    "docker",
    "aws",
    "react",
    "lead",
    "machine learning",
    "nlp",
];

/// Score given to blank CVs.
pub const EMPTY_CV_SCORE: u8 = 10;
pub const EMPTY_CV_FEEDBACK: &str = "CV empty or not provided.";

const KEYWORD_POINTS: usize = 20;
const MIN_LENGTH_SCORE: usize = 10;
const MAX_SCORE: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtsReport {
    pub ats_score: u8, // 0 – 100
    pub feedback: String,
    pub highlights: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed_feedback: Option<String>,
}

/// Scores a CV. Identical input always yields identical output.
///
/// keyword_score = min(100, 20 × matches)
/// length_score  = clamp(chars / 10, 10, 100)
/// ats_score     = floor(0.6 × keyword_score + 0.4 × length_score)
pub fn score_cv(cv_text: &str) -> AtsReport {
    let text = cv_text.to_lowercase();
    if text.trim().is_empty() {
        return AtsReport {
            ats_score: EMPTY_CV_SCORE,
            feedback: EMPTY_CV_FEEDBACK.to_string(),
            highlights: vec![],
            detailed_feedback: None,
        };
    }

    let highlights: Vec<String> = KEYWORDS
        .iter()
        .filter(|k| text.contains(*k))
        .map(|k| k.to_string())
        .collect();

    let keyword_score = (highlights.len() * KEYWORD_POINTS).min(MAX_SCORE);
    let length_score = (text.chars().count() / 10).clamp(MIN_LENGTH_SCORE, MAX_SCORE);
    // Integer form of floor(0.6k + 0.4l); avoids float rounding at the boundary.
    let ats_score = ((6 * keyword_score + 4 * length_score) / 10).min(MAX_SCORE) as u8;

    AtsReport {
        ats_score,
        feedback: build_feedback(ats_score, &highlights),
        highlights,
        detailed_feedback: None,
    }
}

fn build_feedback(score: u8, highlights: &[String]) -> String {
    let skills = if highlights.is_empty() {
        "No strong keyword matches found. Consider highlighting technical skills.".to_string()
    } else {
        format!("Found relevant skills: {}.", highlights.join(", "))
    };

    let tier = if score > 80 {
        "Strong match for this role based on keywords and CV length."
    } else if score > 50 {
        "Moderate match — could be improved by including more role-specific keywords and measurable achievements."
    } else {
        "Low match — suggest tailoring the CV to the job description and adding concrete examples."
    };

    format!("{skills} {tier}")
}

/// Pluggable CV scorer. Carried in `AppState` as `Arc<dyn CvScorer>`.
#[async_trait]
pub trait CvScorer: Send + Sync {
    async fn score(&self, cv_text: &str) -> AtsReport;

    /// "keyword" | "enriched" — logged at startup.
    fn backend(&self) -> &'static str;
}

pub struct KeywordCvScorer;

#[async_trait]
impl CvScorer for KeywordCvScorer {
    async fn score(&self, cv_text: &str) -> AtsReport {
        score_cv(cv_text)
    }

    fn backend(&self) -> &'static str {
        "keyword"
    }
}

/// Keyword score plus a best-effort LLM feedback paragraph.
pub struct EnrichedCvScorer(pub LlmClient);

#[async_trait]
impl CvScorer for EnrichedCvScorer {
    async fn score(&self, cv_text: &str) -> AtsReport {
        let mut report = score_cv(cv_text);
        if cv_text.trim().is_empty() {
            return report;
        }

        let prompt = CV_FEEDBACK_PROMPT_TEMPLATE.replace("{cv_text}", cv_text);
        report.detailed_feedback = self
            .0
            .best_effort_text("CV feedback enrichment", &prompt, CV_FEEDBACK_SYSTEM)
            .await;
        report
    }

    fn backend(&self) -> &'static str {
        "enriched"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_cv_gets_fixed_score() {
        for text in ["", "   ", "\n\t  \n"] {
            let report = score_cv(text);
            assert_eq!(report.ats_score, EMPTY_CV_SCORE);
            assert_eq!(report.feedback, EMPTY_CV_FEEDBACK);
            assert!(report.highlights.is_empty());
        }
    }

    #[test]
    fn test_three_keywords_short_text() {
        // 3 matches → keyword 60; 43 chars → length 4, clamped to 10
        // floor(0.6*60 + 0.4*10) = 40
        let report = score_cv("Engineer skilled in python, fastapi, docker");
        assert_eq!(report.highlights, vec!["python", "fastapi", "docker"]);
        assert_eq!(report.ats_score, 40);
        assert!(report
            .feedback
            .starts_with("Found relevant skills: python, fastapi, docker."));
        assert!(report.feedback.ends_with("adding concrete examples."));
    }

    #[test]
    fn test_highlights_follow_vocabulary_order() {
        let report = score_cv("NLP and Machine Learning on AWS with SQL");
        assert_eq!(
            report.highlights,
            vec!["sql", "aws", "machine learning", "nlp"]
        );
    }

    #[test]
    fn test_keyword_score_saturates_at_100() {
        let text = "python fastapi sql docker aws react lead machine learning nlp ".repeat(20);
        let report = score_cv(&text);
        assert_eq!(report.highlights.len(), 9);
        // keyword 100, length 100 → 100
        assert_eq!(report.ats_score, 100);
        assert!(report.feedback.contains("Strong match"));
    }

    #[test]
    fn test_moderate_tier() {
        // 4 matches → 80; length clamped to 10 → floor(48 + 4) = 52
        let report = score_cv("python sql docker aws");
        assert_eq!(report.ats_score, 52);
        assert!(report.feedback.contains("Moderate match"));
    }

    #[test]
    fn test_no_keywords_message() {
        let report = score_cv("I enjoy gardening and long walks.");
        assert!(report.highlights.is_empty());
        // keyword 0, length 10 → 4
        assert_eq!(report.ats_score, 4);
        assert!(report.feedback.starts_with("No strong keyword matches found."));
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let text = "Senior engineer. Python, React, SQL.\nLed a team of five.";
        let first = score_cv(text);
        for _ in 0..10 {
            assert_eq!(score_cv(text), first);
        }
    }

    #[test]
    fn test_score_always_within_bounds() {
        let samples = [
            "a".to_string(),
            "x".repeat(5000),
            "python ".repeat(1000),
            "ünïcödé text with react and nlp".to_string(),
        ];
        for text in &samples {
            assert!(score_cv(text).ats_score <= 100);
        }
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 200 multi-byte chars → 20, not 40+
        let text = "é".repeat(200);
        // keyword 0 → floor(0.4 * 20) = 8
        assert_eq!(score_cv(&text).ats_score, 8);
    }

    #[tokio::test]
    async fn test_keyword_scorer_matches_pure_function() {
        let scorer = KeywordCvScorer;
        let text = "python developer";
        assert_eq!(scorer.score(text).await, score_cv(text));
        assert_eq!(scorer.backend(), "keyword");
    }
}
