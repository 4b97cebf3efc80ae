//! Records installed at startup: the built-in organizations and demo account
//! always, plus a sample hiring pipeline when `SEED_DEMO_DATA` is set.

use chrono::{Duration, Utc};
use tracing::info;

use crate::auth::{demo_user, DEMO_EMAIL, DEMO_ORG_ID};
use crate::models::assessment::{
    Assessment, AssessmentQuestion, AssessmentStatus, Interview, InterviewStatus, QuestionType,
};
use crate::models::candidate::{Candidate, ScoringResult, Stage};
use crate::models::job::{JobPost, JobStatus};
use crate::models::user::{Organization, User, DEFAULT_ORG_ID};
use crate::store::{Record, RecordMeta, RecordStore};

const DEMO_PASSWORD: &str = "password123";

struct SeedJob {
    title: &'static str,
    location: &'static str,
    description: &'static str,
    skills: &'static [&'static str],
    min_experience_years: f64,
    salary: (f64, f64),
}

struct SeedCandidate {
    job: usize,
    full_name: &'static str,
    email: &'static str,
    days_ago: i64,
    stage: Stage,
    cv_text: &'static str,
    ats_score: u8,
    feedback: &'static str,
    highlights: &'static [&'static str],
}

struct SeedAssessment {
    candidate: usize,
    hours_ago: i64,
    questions: &'static [(&'static str, QuestionType)],
}

struct SeedInterview {
    candidate: usize,
    in_hours: i64,
    interviewer: &'static str,
    format: &'static str,
    duration_minutes: u32,
    meeting_link: &'static str,
}

const JOBS: [SeedJob; 3] = [
    SeedJob {
        title: "Senior Python Developer",
        location: "San Francisco, CA",
        description: "We are looking for a Senior Python Developer with 5+ years of experience in building scalable web applications using FastAPI and Django. Strong knowledge of Docker, Kubernetes, and cloud services (AWS, GCP) required. Must have experience with PostgreSQL and Redis.",
        skills: &["Python", "FastAPI", "Django", "PostgreSQL", "Docker", "AWS"],
        min_experience_years: 5.0,
        salary: (120_000.0, 180_000.0),
    },
    SeedJob {
        title: "Frontend Engineer",
        location: "Remote",
        description: "Seeking a Frontend Engineer with expertise in React, TypeScript, and modern CSS frameworks. Experience with state management tools (Redux, Zustand) and testing libraries (Jest, React Testing Library) is essential. You should have a passion for creating responsive and accessible user interfaces.",
        skills: &["React", "TypeScript", "JavaScript", "CSS", "Redux", "Jest"],
        min_experience_years: 3.0,
        salary: (100_000.0, 150_000.0),
    },
    SeedJob {
        title: "Data Scientist",
        location: "New York, NY",
        description: "Join our data team to build machine learning models and data pipelines. Required: Strong Python skills, experience with pandas, numpy, scikit-learn, and TensorFlow. Knowledge of SQL and big data tools (Spark, Hadoop) is a plus. PhD in Computer Science or related field preferred.",
        skills: &["Python", "Machine Learning", "TensorFlow", "pandas", "SQL", "Spark"],
        min_experience_years: 4.0,
        salary: (130_000.0, 190_000.0),
    },
];

/// Screening results here are fixed sample reviews, stored as given. They are
/// not the output of `score_cv` for the same CV text; live applications are
/// always scored by the configured scorer.
const CANDIDATES: [SeedCandidate; 4] = [
    SeedCandidate {
        job: 0,
        full_name: "Sarah Connor",
        email: "sarah.connor@email.com",
        days_ago: 2,
        stage: Stage::InterviewScheduled,
        cv_text: "Sarah Connor - Senior Software Engineer\n\nExperience:\n- 6 years as Senior Python Developer at TechCorp\n- Built scalable APIs using FastAPI and Django\n- Docker and Kubernetes deployment experience\n- AWS certified solutions architect\n- Led team of 5 developers\n- PostgreSQL and Redis optimization expert\n\nSkills: Python, FastAPI, Django, PostgreSQL, Docker, Kubernetes, AWS, Git\nEducation: BS in Computer Science from MIT",
        ats_score: 92,
        feedback: "Excellent match! 6 years of directly relevant Python/FastAPI experience. All required skills present. Strong background with AWS and Docker. Ready for interview.",
        highlights: &["FastAPI", "Django", "AWS", "Docker", "Kubernetes", "PostgreSQL", "Redis"],
    },
    SeedCandidate {
        job: 0,
        full_name: "John Doe",
        email: "john.doe@email.com",
        days_ago: 1,
        stage: Stage::Applied,
        cv_text: "John Doe - Python Developer\n\nExperience:\n- 3 years as Python Developer at StartupXYZ\n- Built REST APIs with Flask\n- Some Docker experience\n- Basic AWS knowledge\n- MongoDB database experience\n\nSkills: Python, Flask, Docker, MongoDB, JavaScript, HTML/CSS\nEducation: BS in Information Technology from State University",
        ats_score: 58,
        feedback: "Partial match. Has Python experience but lacks FastAPI expertise (Flask background). Limited AWS/Docker experience. May need ramp-up time. Consider for junior/mid-level positions.",
        highlights: &["Python", "Docker", "MongoDB"],
    },
    SeedCandidate {
        job: 1,
        full_name: "Emma Wilson",
        email: "emma.wilson@email.com",
        days_ago: 3,
        stage: Stage::InterviewScheduled,
        cv_text: "Emma Wilson - Senior Frontend Engineer\n\nExperience:\n- 5 years as Frontend Engineer at WebCorp\n- Expert in React and TypeScript\n- Built accessible UIs following WCAG standards\n- Redux and Context API proficiency\n- Jest and React Testing Library expert\n- CSS-in-JS and responsive design specialist\n\nSkills: React, TypeScript, JavaScript, CSS3, Redux, Jest, React Testing Library, Webpack\nEducation: BS in Web Development from Design Academy",
        ats_score: 88,
        feedback: "Strong match! 5 years of React/TypeScript experience. Excellent testing knowledge with Jest and RTL. Accessibility expertise is a bonus. Ready for senior role.",
        highlights: &["React", "TypeScript", "Jest", "React Testing Library", "CSS3", "Redux"],
    },
    SeedCandidate {
        job: 2,
        full_name: "Dr. Michael Chen",
        email: "michael.chen@email.com",
        days_ago: 5,
        stage: Stage::Applied,
        cv_text: "Dr. Michael Chen - Data Scientist\n\nExperience:\n- PhD in Machine Learning from Stanford\n- 7 years in ML/AI research and development\n- Expert in TensorFlow, PyTorch, and scikit-learn\n- Built recommendation systems using deep learning\n- Big data pipeline development with Spark\n- SQL optimization and data warehouse design\n- Published 15+ papers in top ML conferences\n\nSkills: Python, TensorFlow, scikit-learn, pandas, Spark, SQL, Docker, AWS SageMaker\nEducation: PhD in Machine Learning, BS in Mathematics",
        ats_score: 95,
        feedback: "Exceptional match! PhD in Machine Learning with 7+ years experience. Expert in all required tools. Published researcher. Significantly overqualified but perfect fit.",
        highlights: &["TensorFlow", "scikit-learn", "Spark", "SQL", "Python", "AWS SageMaker"],
    },
];

const ASSESSMENTS: [SeedAssessment; 2] = [
    SeedAssessment {
        candidate: 0,
        hours_ago: 2,
        questions: &[
            ("Explain the difference between sync and async in Python. How would you implement async/await in a FastAPI endpoint?", QuestionType::OpenEnded),
            ("Design a scalable database schema for a multi-tenant SaaS application. What indexing strategies would you use?", QuestionType::OpenEnded),
            ("How would you optimize a slow PostgreSQL query that joins 5 tables?", QuestionType::Technical),
            ("Describe your experience with Docker and Kubernetes in production environments.", QuestionType::Experience),
        ],
    },
    SeedAssessment {
        candidate: 2,
        hours_ago: 1,
        questions: &[
            ("Build a React component that fetches user data from an API and displays it in a table with sorting and filtering.", QuestionType::Coding),
            ("Explain your approach to state management. When would you use Redux vs Context API?", QuestionType::Technical),
            ("How do you ensure your React components are accessible? What tools and practices do you use?", QuestionType::Technical),
            ("Write unit tests for a custom React hook.", QuestionType::Coding),
        ],
    },
];

const INTERVIEWS: [SeedInterview; 2] = [
    SeedInterview {
        candidate: 0,
        in_hours: 3 * 24 + 10,
        interviewer: "Tech Lead - Robert Johnson",
        format: "Technical + Behavioral",
        duration_minutes: 60,
        meeting_link: "https://meet.google.com/abc-defg-hij",
    },
    SeedInterview {
        candidate: 2,
        in_hours: 2 * 24 + 14,
        interviewer: "Engineering Manager - Lisa Wong",
        format: "Technical + System Design",
        duration_minutes: 90,
        meeting_link: "https://meet.google.com/xyz-uvwx-stu",
    },
];

/// Organizations and the demo account every instance starts with.
pub async fn install_builtin(store: &RecordStore) {
    store
        .organizations
        .save(Organization {
            meta: RecordMeta::with_id(DEFAULT_ORG_ID),
            name: "Gemini Innovations".to_string(),
            hr_contact_email: "hr@gemini-innovations.com".to_string(),
        })
        .await;
    store
        .organizations
        .save(Organization {
            meta: RecordMeta::with_id(DEMO_ORG_ID),
            name: "Test Organization".to_string(),
            hr_contact_email: DEMO_EMAIL.to_string(),
        })
        .await;
    store.users.save(demo_user()).await;
}

/// Sample users, jobs, candidates, scoring results, assessments and
/// interviews, all owned by the demo organization.
pub async fn install_demo_data(store: &RecordStore) {
    let now = Utc::now();

    for (full_name, email) in [
        ("Alice Johnson", "alice@techcorp.com"),
        ("Bob Smith", "bob@techcorp.com"),
    ] {
        store
            .users
            .save(User {
                meta: RecordMeta::pending(),
                full_name: full_name.to_string(),
                email: email.to_string(),
                password: DEMO_PASSWORD.to_string(),
                org_id: DEMO_ORG_ID.to_string(),
                is_active: true,
            })
            .await;
    }

    let mut jobs = Vec::with_capacity(JOBS.len());
    for seed in &JOBS {
        let job = store
            .jobs
            .save(JobPost {
                meta: RecordMeta::pending(),
                org_id: DEMO_ORG_ID.to_string(),
                created_by: None,
                title: seed.title.to_string(),
                description: seed.description.to_string(),
                location: Some(seed.location.to_string()),
                required_skills: seed.skills.iter().map(|s| s.to_string()).collect(),
                status: JobStatus::Active,
                salary_range_min: Some(seed.salary.0),
                salary_range_max: Some(seed.salary.1),
                min_experience_years: Some(seed.min_experience_years),
            })
            .await;
        jobs.push(job);
    }

    let mut candidates = Vec::with_capacity(CANDIDATES.len());
    for seed in &CANDIDATES {
        let job = &jobs[seed.job];
        let candidate = store
            .candidates
            .save(Candidate {
                meta: RecordMeta::pending(),
                job_post_id: job.id().to_string(),
                full_name: seed.full_name.to_string(),
                email: seed.email.to_string(),
                phone: None,
                cv_text: seed.cv_text.to_string(),
                resume_url: None,
                stage: seed.stage,
                application_date: now - Duration::days(seed.days_ago),
            })
            .await;
        store
            .screening_results
            .save(ScoringResult {
                meta: RecordMeta::pending(),
                candidate_id: candidate.id().to_string(),
                job_id: job.id().to_string(),
                ats_score: seed.ats_score,
                feedback: seed.feedback.to_string(),
                highlights: seed.highlights.iter().map(|h| h.to_string()).collect(),
                detailed_feedback: None,
            })
            .await;
        candidates.push(candidate);
    }

    for seed in &ASSESSMENTS {
        let candidate = &candidates[seed.candidate];
        store
            .assessments
            .save(Assessment {
                meta: RecordMeta::pending(),
                candidate_id: candidate.id().to_string(),
                job_id: candidate.job_post_id.clone(),
                generated_questions: seed
                    .questions
                    .iter()
                    .map(|(question, kind)| AssessmentQuestion {
                        question: question.to_string(),
                        kind: *kind,
                    })
                    .collect(),
                status: AssessmentStatus::Sent,
                sent_at: now - Duration::hours(seed.hours_ago),
                completion_link: format!("/assessments/{}", uuid::Uuid::new_v4()),
            })
            .await;
    }

    for seed in &INTERVIEWS {
        let candidate = &candidates[seed.candidate];
        store
            .interviews
            .save(Interview {
                meta: RecordMeta::pending(),
                candidate_id: candidate.id().to_string(),
                job_id: candidate.job_post_id.clone(),
                scheduled_time: Some(now + Duration::hours(seed.in_hours)),
                meeting_link: Some(seed.meeting_link.to_string()),
                status: InterviewStatus::Scheduled,
                interviewer_name: Some(seed.interviewer.to_string()),
                interview_format: Some(seed.format.to_string()),
                duration_minutes: Some(seed.duration_minutes),
            })
            .await;
    }

    info!(
        users = store.users.len().await,
        jobs = store.jobs.len().await,
        candidates = store.candidates.len().await,
        screening_results = store.screening_results.len().await,
        assessments = store.assessments.len().await,
        interviews = store.interviews.len().await,
        "demo data installed"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_builtin_records() {
        let store = RecordStore::new();
        install_builtin(&store).await;

        let default_org = store.organizations.get(DEFAULT_ORG_ID).await.unwrap();
        assert_eq!(default_org.name, "Gemini Innovations");
        assert!(store.organizations.get(DEMO_ORG_ID).await.is_some());
        assert!(store.user_by_email(DEMO_EMAIL).await.is_some());
    }

    #[tokio::test]
    async fn test_demo_data_is_linked() {
        let store = RecordStore::new();
        install_builtin(&store).await;
        install_demo_data(&store).await;

        assert_eq!(store.users.len().await, 3);
        assert_eq!(store.jobs.len().await, 3);
        assert_eq!(store.candidates.len().await, 4);
        assert_eq!(store.assessments.len().await, 2);
        assert_eq!(store.interviews.len().await, 2);

        for candidate in store.candidates.all().await {
            let job = store.jobs.get(&candidate.job_post_id).await.unwrap();
            assert_eq!(job.org_id, DEMO_ORG_ID);
            assert!(store.scoring_result_for(candidate.id()).await.is_some());
        }
        for interview in store.interviews.all().await {
            let candidate = store.candidates.get(&interview.candidate_id).await.unwrap();
            assert_eq!(candidate.stage, Stage::InterviewScheduled);
        }
    }

    #[tokio::test]
    async fn test_demo_scores_are_stored_as_given() {
        let store = RecordStore::new();
        install_builtin(&store).await;
        install_demo_data(&store).await;

        for seed in &CANDIDATES {
            let candidate = store
                .candidates
                .find_one(|c| c.email == seed.email)
                .await
                .unwrap();
            let result = store.scoring_result_for(candidate.id()).await.unwrap();
            assert_eq!(result.ats_score, seed.ats_score);
            assert_eq!(result.feedback, seed.feedback);
            assert_eq!(result.highlights, seed.highlights);
        }
    }
}
