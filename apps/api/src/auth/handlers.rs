//! Axum route handlers for registration, login, and the caller's profile.

use axum::{extract::State, http::StatusCode, Form, Json};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::extractors::CurrentUser;
use super::{login, register, RegisterRequest};
use crate::errors::AppError;
use crate::models::user::{Organization, User};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
    /// Accepted for OAuth2 password-form compatibility; not checked.
    #[serde(default)]
    pub grant_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

/// POST /register
pub async fn handle_register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = register(&state.store, request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /token
///
/// Form-encoded `username` / `password`, as an OAuth2 password grant.
pub async fn handle_token(
    State(state): State<AppState>,
    Form(request): Form<TokenRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    debug!(username = %request.username, grant_type = ?request.grant_type, "token requested");
    let access_token = login(&state.store, &request.username, &request.password).await?;
    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer",
    }))
}

/// GET /users/me
pub async fn handle_me(CurrentUser(user): CurrentUser) -> Json<User> {
    Json(user)
}

/// GET /organizations/me
pub async fn handle_my_organization(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Organization>, AppError> {
    state
        .store
        .organizations
        .get(&user.org_id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Organization not found".to_string()))
}
