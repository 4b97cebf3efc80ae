use axum::{extract::Path, Json};
use serde::{Deserialize, Serialize};

use super::respond;
use crate::errors::AppError;

#[derive(Debug, Deserialize)]
pub struct AgentMessage {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct AgentReply {
    pub reply: String,
}

/// POST /ai/agent/:session_id/message
pub async fn handle_agent_message(
    Path(session_id): Path<String>,
    Json(request): Json<AgentMessage>,
) -> Result<Json<AgentReply>, AppError> {
    if request.message.is_empty() {
        return Err(AppError::Validation("message is required".to_string()));
    }
    Ok(Json(AgentReply {
        reply: respond(&session_id, &request.message),
    }))
}
