//! Read-only hiring statistics computed from snapshots of the store.
//!
//! The functions here are pure: handlers gather the organization's records
//! and pass them in, so every figure reflects one consistent read per collection.

pub mod handlers;

use std::collections::HashMap;

use serde::Serialize;

use crate::models::assessment::{Assessment, AssessmentStatus, Interview, InterviewStatus};
use crate::models::candidate::{Candidate, ScoringResult, Stage};
use crate::models::job::{JobPost, JobStatus};
use crate::store::Record;

const TOP_CANDIDATES: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageCount {
    pub stage: Stage,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub total_jobs: usize,
    pub active_jobs: usize,
    pub draft_jobs: usize,
    pub closed_jobs: usize,
    pub total_candidates: usize,
    pub scored_candidates: usize,
    pub average_ats_score: Option<f64>,
    pub assessments_sent: usize,
    pub interviews_scheduled: usize,
    pub candidates_by_stage: Vec<StageCount>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankedCandidate {
    pub candidate_id: String,
    pub full_name: String,
    pub ats_score: u8,
    pub stage: Stage,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobAnalytics {
    pub job_id: String,
    pub title: String,
    pub status: JobStatus,
    pub total_candidates: usize,
    pub average_ats_score: Option<f64>,
    pub top_candidates: Vec<RankedCandidate>,
    pub candidates_by_stage: Vec<StageCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunnelStage {
    pub stage: Stage,
    /// Candidates currently at this stage.
    pub current: usize,
    /// Candidates at this stage or any later lifecycle stage.
    pub reached: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct HiringFunnel {
    pub total_candidates: usize,
    pub hired: usize,
    pub rejected: usize,
    /// Lifecycle stages in order, then REJECTED.
    pub stages: Vec<FunnelStage>,
}

/// Organization-wide totals. All slices must already be scoped to one organization.
pub fn summarize(
    jobs: &[JobPost],
    candidates: &[Candidate],
    results: &[ScoringResult],
    assessments: &[Assessment],
    interviews: &[Interview],
) -> Summary {
    let count_jobs = |status: JobStatus| jobs.iter().filter(|j| j.status == status).count();
    let scores = scores_by_candidate(results);
    let scored: Vec<u8> = candidates
        .iter()
        .filter_map(|c| scores.get(c.id()).copied())
        .collect();

    Summary {
        total_jobs: jobs.len(),
        active_jobs: count_jobs(JobStatus::Active),
        draft_jobs: count_jobs(JobStatus::Draft),
        closed_jobs: count_jobs(JobStatus::Closed),
        total_candidates: candidates.len(),
        scored_candidates: scored.len(),
        average_ats_score: average(&scored),
        assessments_sent: assessments
            .iter()
            .filter(|a| a.status != AssessmentStatus::Pending)
            .count(),
        interviews_scheduled: interviews
            .iter()
            .filter(|i| i.status == InterviewStatus::Scheduled)
            .count(),
        candidates_by_stage: stage_breakdown(candidates),
    }
}

/// Statistics for one job. `candidates` must be that job's candidates in
/// application order.
pub fn job_analytics(job: &JobPost, candidates: &[Candidate], results: &[ScoringResult]) -> JobAnalytics {
    let scores = scores_by_candidate(results);
    let mut ranked: Vec<RankedCandidate> = candidates
        .iter()
        .filter_map(|c| {
            scores.get(c.id()).map(|&ats_score| RankedCandidate {
                candidate_id: c.id().to_string(),
                full_name: c.full_name.clone(),
                ats_score,
                stage: c.stage,
            })
        })
        .collect();
    let scored: Vec<u8> = ranked.iter().map(|r| r.ats_score).collect();

    // Stable sort: equal scores keep application order.
    ranked.sort_by(|a, b| b.ats_score.cmp(&a.ats_score));
    ranked.truncate(TOP_CANDIDATES);

    JobAnalytics {
        job_id: job.id().to_string(),
        title: job.title.clone(),
        status: job.status,
        total_candidates: candidates.len(),
        average_ats_score: average(&scored),
        top_candidates: ranked,
        candidates_by_stage: stage_breakdown(candidates),
    }
}

pub fn hiring_funnel(candidates: &[Candidate]) -> HiringFunnel {
    let current = |stage: Stage| candidates.iter().filter(|c| c.stage == stage).count();

    let mut stages: Vec<FunnelStage> = Stage::LIFECYCLE
        .iter()
        .enumerate()
        .map(|(position, &stage)| FunnelStage {
            stage,
            current: current(stage),
            reached: candidates
                .iter()
                .filter(|c| c.stage.lifecycle_position().is_some_and(|p| p >= position))
                .count(),
        })
        .collect();

    let rejected = current(Stage::Rejected);
    stages.push(FunnelStage {
        stage: Stage::Rejected,
        current: rejected,
        reached: rejected,
    });

    HiringFunnel {
        total_candidates: candidates.len(),
        hired: current(Stage::Hired),
        rejected,
        stages,
    }
}

/// Count per stage, every stage listed.
pub fn stage_breakdown(candidates: &[Candidate]) -> Vec<StageCount> {
    Stage::ALL
        .iter()
        .map(|&stage| StageCount {
            stage,
            count: candidates.iter().filter(|c| c.stage == stage).count(),
        })
        .collect()
}

fn scores_by_candidate(results: &[ScoringResult]) -> HashMap<&str, u8> {
    results
        .iter()
        .map(|r| (r.candidate_id.as_str(), r.ats_score))
        .collect()
}

/// Mean rounded to two decimals; `None` for no scores.
fn average(scores: &[u8]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    let sum: u32 = scores.iter().map(|&s| u32::from(s)).sum();
    let mean = f64::from(sum) / scores.len() as f64;
    Some((mean * 100.0).round() / 100.0)
}
