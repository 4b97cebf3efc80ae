//! Canned-reply conversational agent. Keyword matching only, no memory.

pub mod handlers;

use tracing::debug;

const GREETINGS: [&str; 3] = ["hello", "hi", "hey"];

const GREETING_REPLY: &str =
    "Hello! I'm the HR-AI agent. How can I help with the interview or scheduling today?";
const SCHEDULING_REPLY: &str =
    "I can schedule the interview. Please provide a preferred date/time and your timezone.";
const FEEDBACK_REPLY: &str = "I can provide feedback on the candidate's CV or assessment \u{2014} please upload the CV text or candidate ID.";

/// Picks a reply by substring: greeting, then scheduling, then feedback,
/// else an echo of the message.
pub fn respond(session_id: &str, message: &str) -> String {
    debug!(session_id, "agent message received");
    let m = message.to_lowercase();

    if GREETINGS.iter().any(|g| m.contains(g)) {
        GREETING_REPLY.to_string()
    } else if m.contains("schedule") || m.contains("available") {
        SCHEDULING_REPLY.to_string()
    } else if m.contains("tell me about") || m.contains("feedback") {
        FEEDBACK_REPLY.to_string()
    } else {
        format!(
            "AI-Agent received: '{message}'. (This is a mock. In production, connect to an LLM.)"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting_wins_over_scheduling() {
        assert_eq!(respond("s1", "Hey, can we schedule?"), GREETING_REPLY);
    }

    #[test]
    fn test_scheduling_and_feedback() {
        assert_eq!(respond("s1", "When are you AVAILABLE"), SCHEDULING_REPLY);
        assert_eq!(respond("s1", "Need feedback on my CV"), FEEDBACK_REPLY);
    }

    #[test]
    fn test_greeting_matches_substrings() {
        // "this" contains "hi"
        assert_eq!(respond("s1", "Is this the right place?"), GREETING_REPLY);
    }

    #[test]
    fn test_default_echo_keeps_message_case() {
        assert_eq!(
            respond("s1", "Quelle est la suite ?"),
            "AI-Agent received: 'Quelle est la suite ?'. (This is a mock. In production, connect to an LLM.)"
        );
    }
}
