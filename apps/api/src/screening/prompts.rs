pub const CV_FEEDBACK_SYSTEM: &str = "You are an experienced technical recruiter. \
You write short, concrete, professional feedback about candidate CVs. \
Never invent facts that are not in the CV.";

pub const CV_FEEDBACK_PROMPT_TEMPLATE: &str = r#"Review the CV below and give recruitment feedback as exactly three short bullets:
1. Strengths
2. Weaknesses
3. Suggested next steps

CV:
{cv_text}
"#;
