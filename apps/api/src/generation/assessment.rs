use serde::Deserialize;

use crate::generation::prompts::{assessment_prompt, ASSESSMENT_SYSTEM};
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::LlmClient;
use crate::models::assessment::{AssessmentQuestion, QuestionType};

pub const DEFAULT_QUESTION_COUNT: usize = 5;

pub const GENERIC_QUESTION: &str =
    "Describe a challenging problem you solved recently and how you approached it.";

const PYTHON_QUESTIONS: [(&str, QuestionType); 2] = [
    (
        "Explain how you would design a FastAPI endpoint to handle file uploads and background processing.",
        QuestionType::Technical,
    ),
    (
        "Write a short function to parse and validate JSON payloads in Python.",
        QuestionType::Coding,
    ),
];

const FRONTEND_QUESTIONS: [(&str, QuestionType); 2] = [
    (
        "Build a React component that fetches and displays paginated data.",
        QuestionType::Coding,
    ),
    (
        "Explain approaches to state management in a large React app.",
        QuestionType::Technical,
    ),
];

/// Keyword-gated template questions, padded or truncated to exactly `n`.
pub fn template_questions(job_description: &str, n: usize) -> Vec<AssessmentQuestion> {
    let jd = job_description.to_lowercase();
    let mut questions = Vec::new();

    if jd.contains("python") || jd.contains("fastapi") {
        questions.extend(PYTHON_QUESTIONS.iter().map(|(q, kind)| question(q, *kind)));
    }
    if jd.contains("react") || jd.contains("frontend") {
        questions.extend(FRONTEND_QUESTIONS.iter().map(|(q, kind)| question(q, *kind)));
    }

    fit_to_count(questions, n)
}

/// Questions for a candidate. Asks the LLM first when one is configured and
/// falls back to `template_questions` on any failure. Always returns exactly `n`.
pub async fn generate_assessment_questions(
    llm: Option<&LlmClient>,
    cv_text: &str,
    job_description: &str,
    n: usize,
) -> Vec<AssessmentQuestion> {
    if let Some(llm) = llm {
        let prompt = format!(
            "{}\n{}",
            assessment_prompt(n, job_description, cv_text),
            JSON_ONLY_INSTRUCTION
        );
        let generated: Option<Vec<LlmQuestion>> = llm
            .best_effort_json("assessment question generation", &prompt, ASSESSMENT_SYSTEM)
            .await;

        let questions: Vec<AssessmentQuestion> = generated
            .unwrap_or_default()
            .into_iter()
            .filter(|q| !q.question.trim().is_empty())
            .map(AssessmentQuestion::from)
            .collect();
        if !questions.is_empty() {
            return fit_to_count(questions, n);
        }
    }

    template_questions(job_description, n)
}

#[derive(Debug, Deserialize)]
struct LlmQuestion {
    question: String,
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

impl From<LlmQuestion> for AssessmentQuestion {
    fn from(q: LlmQuestion) -> Self {
        AssessmentQuestion {
            question: q.question.trim().to_string(),
            kind: q
                .kind
                .as_deref()
                .map(QuestionType::from_label)
                .unwrap_or(QuestionType::OpenEnded),
        }
    }
}

fn question(text: &str, kind: QuestionType) -> AssessmentQuestion {
    AssessmentQuestion {
        question: text.to_string(),
        kind,
    }
}

fn fit_to_count(mut questions: Vec<AssessmentQuestion>, n: usize) -> Vec<AssessmentQuestion> {
    questions.truncate(n);
    while questions.len() < n {
        questions.push(question(GENERIC_QUESTION, QuestionType::OpenEnded));
    }
    questions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_python_jd_unlocks_python_questions() {
        let qs = template_questions("Backend role: Python and FastAPI", 5);
        assert_eq!(qs.len(), 5);
        assert_eq!(qs[0].kind, QuestionType::Technical);
        assert!(qs[0].question.contains("FastAPI endpoint"));
        assert_eq!(qs[1].kind, QuestionType::Coding);
        for q in &qs[2..] {
            assert_eq!(q.question, GENERIC_QUESTION);
            assert_eq!(q.kind, QuestionType::OpenEnded);
        }
    }

    #[test]
    fn test_both_tracks_in_order() {
        let qs = template_questions("Full-stack: python backend, React frontend", 4);
        let kinds: Vec<QuestionType> = qs.iter().map(|q| q.kind).collect();
        assert_eq!(
            kinds,
            vec![
                QuestionType::Technical,
                QuestionType::Coding,
                QuestionType::Coding,
                QuestionType::Technical
            ]
        );
    }

    #[test]
    fn test_truncates_when_overfull() {
        let qs = template_questions("python react", 3);
        assert_eq!(qs.len(), 3);
        assert!(qs.iter().all(|q| q.question != GENERIC_QUESTION));
    }

    #[test]
    fn test_no_keywords_gives_generic_only() {
        let qs = template_questions("Accountant", 5);
        assert_eq!(qs.len(), 5);
        assert!(qs.iter().all(|q| q.question == GENERIC_QUESTION));
    }

    #[test]
    fn test_zero_requested() {
        assert!(template_questions("python", 0).is_empty());
    }

    #[tokio::test]
    async fn test_without_llm_uses_templates() {
        let qs = generate_assessment_questions(None, "cv", "frontend", 5).await;
        assert_eq!(qs, template_questions("frontend", 5));
    }

    #[test]
    fn test_llm_question_conversion() {
        let parsed: Vec<LlmQuestion> = serde_json::from_str(
            r#"[{"question": " Reverse a list ", "type": "coding"}, {"question": "Why us?"}]"#,
        )
        .unwrap();
        let converted: Vec<AssessmentQuestion> =
            parsed.into_iter().map(AssessmentQuestion::from).collect();
        assert_eq!(converted[0].question, "Reverse a list");
        assert_eq!(converted[0].kind, QuestionType::Coding);
        assert_eq!(converted[1].kind, QuestionType::OpenEnded);
    }
}
