use serde::{Deserialize, Serialize};

const FALLBACK_NAME: &str = "Candidate";
const MAX_NAME_WORDS: usize = 4;
const SENIOR_COMPENSATION: &str = "Senior-level compensation suggested";
const STANDARD_COMPENSATION: &str = "Competitive (depends on experience)";
const OFFER_FEEDBACK: &str = "Generated offer letter template and compensation guidance.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub offer_text: String,
    pub feedback: String,
}

/// Builds an offer letter from the CV and the role title.
pub fn generate_offer(cv_text: &str, role: &str) -> Offer {
    let name = candidate_name(cv_text);
    let cv_lower = cv_text.to_lowercase();
    let compensation = if cv_lower.contains("senior") || cv_lower.contains("lead") {
        SENIOR_COMPENSATION
    } else {
        STANDARD_COMPENSATION
    };

    Offer {
        offer_text: format!(
            "Dear {name},\n\nWe are pleased to invite you to join as a {role}. {compensation}.\n\nBest regards,\nRecruiting Team"
        ),
        feedback: OFFER_FEEDBACK.to_string(),
    }
}

/// The CV's first line, when it is short and contains letters.
fn candidate_name(cv_text: &str) -> &str {
    cv_text
        .trim()
        .lines()
        .next()
        .map(str::trim)
        .filter(|line| {
            line.split_whitespace().count() <= MAX_NAME_WORDS
                && line.chars().any(char::is_alphabetic)
        })
        .unwrap_or(FALLBACK_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_line_used_as_name() {
        let offer = generate_offer("  Jane Smith\nBackend engineer", "Backend Engineer");
        assert_eq!(
            offer.offer_text,
            "Dear Jane Smith,\n\nWe are pleased to invite you to join as a Backend Engineer. \
             Competitive (depends on experience).\n\nBest regards,\nRecruiting Team"
        );
        assert_eq!(offer.feedback, OFFER_FEEDBACK);
    }

    #[test]
    fn test_long_first_line_falls_back() {
        let offer = generate_offer("I am a very experienced engineer\nskills", "Dev");
        assert!(offer.offer_text.starts_with("Dear Candidate,"));
    }

    #[test]
    fn test_numeric_first_line_falls_back() {
        let offer = generate_offer("+1 555 0100\nJane", "Dev");
        assert!(offer.offer_text.starts_with("Dear Candidate,"));
    }

    #[test]
    fn test_empty_cv_falls_back() {
        assert!(generate_offer("", "Dev").offer_text.starts_with("Dear Candidate,"));
    }

    #[test]
    fn test_seniority_selects_compensation() {
        assert!(generate_offer("Ann\nSenior SRE", "SRE")
            .offer_text
            .contains(SENIOR_COMPENSATION));
        assert!(generate_offer("Bo\nTeam lead", "SRE")
            .offer_text
            .contains(SENIOR_COMPENSATION));
        assert!(generate_offer("Cy\nJunior SRE", "SRE")
            .offer_text
            .contains(STANDARD_COMPENSATION));
    }
}
