// Templated content built from a candidate's CV: offer letters, assessment
// questions, and AI interview slots. Only question generation may consult the
// LLM, and it always falls back to the templates.

pub mod assessment;
pub mod handlers;
pub mod interview;
pub mod offer;
pub mod prompts;
