use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

pub const AGENT_NAME: &str = "HR-AI-Agent";

const DEFAULT_LEAD_DAYS: i64 = 2;
const DEFAULT_HOUR: u32 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewSession {
    pub session_id: String,
    pub scheduled_time: String,
    pub agent: String,
}

/// Picks an interview slot for the AI agent. No availability or collision checks.
pub fn schedule_interview(
    candidate_id: &str,
    job_id: &str,
    preferred_times: &[String],
) -> InterviewSession {
    schedule_interview_at(Utc::now(), candidate_id, job_id, preferred_times)
}

/// First preferred time verbatim, else 10:00 UTC two days after `now`.
pub fn schedule_interview_at(
    now: DateTime<Utc>,
    candidate_id: &str,
    job_id: &str,
    preferred_times: &[String],
) -> InterviewSession {
    let scheduled_time = match preferred_times.first() {
        Some(preferred) => preferred.clone(),
        None => default_slot(now),
    };
    let session_id = Uuid::new_v4().to_string();
    debug!(candidate_id, job_id, %session_id, %scheduled_time, "interview slot picked");

    InterviewSession {
        session_id,
        scheduled_time,
        agent: AGENT_NAME.to_string(),
    }
}

fn default_slot(now: DateTime<Utc>) -> String {
    let day = (now + Duration::days(DEFAULT_LEAD_DAYS)).date_naive();
    day.and_hms_opt(DEFAULT_HOUR, 0, 0)
        .map(|slot| slot.format("%Y-%m-%dT%H:%M:%S").to_string())
        .unwrap_or_else(|| day.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_preferred_time_used_verbatim() {
        let prefs = vec!["next tuesday 3pm".to_string(), "2030-01-01T09:00".to_string()];
        let session = schedule_interview("c1", "j1", &prefs);
        assert_eq!(session.scheduled_time, "next tuesday 3pm");
        assert_eq!(session.agent, AGENT_NAME);
    }

    #[test]
    fn test_default_slot_two_days_out_at_ten() {
        let now = Utc.with_ymd_and_hms(2026, 3, 30, 23, 45, 12).unwrap();
        let session = schedule_interview_at(now, "c1", "j1", &[]);
        assert_eq!(session.scheduled_time, "2026-04-01T10:00:00");
    }

    #[test]
    fn test_session_ids_are_fresh() {
        let a = schedule_interview("c1", "j1", &[]);
        let b = schedule_interview("c1", "j1", &[]);
        assert_ne!(a.session_id, b.session_id);
        assert!(Uuid::parse_str(&a.session_id).is_ok());
    }
}
