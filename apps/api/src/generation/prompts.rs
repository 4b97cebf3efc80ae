pub const ASSESSMENT_SYSTEM: &str = "You are an expert hiring manager who writes fair, \
role-specific assessment questions.";

/// The assessment prompt. Each value is substituted once, so braces inside
/// the job description or CV are left untouched.
pub fn assessment_prompt(n: usize, job_description: &str, cv_text: &str) -> String {
    format!(
        r#"Write {n} concise assessment questions for a candidate applying to the role below.

Job description:
{job_description}

Candidate CV:
{cv_text}

Return a JSON array of objects with the keys "question" and "type", where "type" is one of
"coding", "open-ended", "technical", "experience".
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders_in_inputs_survive() {
        let prompt = assessment_prompt(3, "Role uses {cv_text} templates", "CV mentions {n}");
        assert!(prompt.starts_with("Write 3 concise"));
        assert!(prompt.contains("Role uses {cv_text} templates"));
        assert!(prompt.contains("CV mentions {n}"));
    }
}
