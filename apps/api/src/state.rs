use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::screening::scoring::CvScorer;
use crate::storage::ResumeStorage;
use crate::store::RecordStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RecordStore>,
    pub storage: Arc<dyn ResumeStorage>,
    /// Present only when GEMINI_API_KEY is set. Used for best-effort enrichment.
    pub llm: Option<LlmClient>,
    pub config: Config,
    /// Pluggable CV scorer. Keyword-only unless an LLM client is configured.
    pub cv_scorer: Arc<dyn CvScorer>,
}
