// Candidate intake: text extraction, ATS scoring, and the application lifecycle.
// The numeric score is always computed locally; the LLM only adds prose.

pub mod extract;
pub mod handlers;
pub mod pipeline;
pub mod prompts;
pub mod scoring;
