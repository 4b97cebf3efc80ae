//! Demo-grade authentication: plaintext passwords and opaque bearer tokens.
//!
//! A token is either the shared demo token or a stored user's id. There is
//! no expiry, signing, or revocation. Not fit for a real deployment.

pub mod extractors;
pub mod handlers;

use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::user::{Organization, User, DEFAULT_ORG_ID};
use crate::store::{generate_id, RecordMeta, RecordStore};

pub const DEMO_EMAIL: &str = "test@example.com";
pub const DEMO_PASSWORD: &str = "testpass";
pub const DEMO_TOKEN: &str = "test-token-123";
pub const DEMO_USER_ID: &str = "test-user-1";
pub const DEMO_ORG_ID: &str = "test-org-1";

pub fn demo_user() -> User {
    User {
        meta: RecordMeta::with_id(DEMO_USER_ID),
        full_name: "Test User".to_string(),
        email: DEMO_EMAIL.to_string(),
        password: DEMO_PASSWORD.to_string(),
        org_id: DEMO_ORG_ID.to_string(),
        is_active: true,
    }
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub org_name: Option<String>,
}

/// Creates a user, and an organization when `org_name` is given.
/// The duplicate-email check and the insert are one atomic store operation.
pub async fn register(store: &RecordStore, request: RegisterRequest) -> Result<User, AppError> {
    let email = request.email.trim().to_string();
    if request.full_name.trim().is_empty() {
        return Err(AppError::Validation("full_name is required".to_string()));
    }
    if !email.contains('@') {
        return Err(AppError::Validation("A valid email is required".to_string()));
    }
    if request.password.is_empty() {
        return Err(AppError::Validation("password is required".to_string()));
    }

    let org_name = request
        .org_name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());
    let org_id = match org_name {
        Some(_) => generate_id(),
        None => DEFAULT_ORG_ID.to_string(),
    };

    let candidate_user = User {
        meta: RecordMeta::pending(),
        full_name: request.full_name.trim().to_string(),
        email: email.clone(),
        password: request.password,
        org_id: org_id.clone(),
        is_active: true,
    };
    let lowered = email.to_lowercase();
    let user = store
        .users
        .insert_unless(candidate_user, |u| u.email.to_lowercase() == lowered)
        .await
        .ok_or_else(|| AppError::Validation("Email already registered".to_string()))?;

    if let Some(name) = org_name {
        store
            .organizations
            .save(Organization {
                meta: RecordMeta::with_id(org_id),
                name,
                hr_contact_email: email,
            })
            .await;
    }

    info!(user_id = %user.meta.id, org_id = %user.org_id, "user registered");
    Ok(user)
}

/// Exchanges credentials for a bearer token.
pub async fn login(store: &RecordStore, username: &str, password: &str) -> Result<String, AppError> {
    if username == DEMO_EMAIL && password == DEMO_PASSWORD {
        return Ok(DEMO_TOKEN.to_string());
    }

    match store.user_by_email(username.trim()).await {
        Some(user) if user.password == password => Ok(user.meta.id),
        _ => Err(AppError::Unauthorized(
            "Incorrect username or password".to_string(),
        )),
    }
}

/// Resolves a bearer token to a user.
pub async fn authenticate(store: &RecordStore, token: &str) -> Result<User, AppError> {
    if token == DEMO_TOKEN {
        return Ok(demo_user());
    }

    let user = store.users.get(token).await.ok_or_else(|| {
        AppError::Unauthorized("Invalid authentication credentials or token".to_string())
    })?;
    if !user.is_active {
        return Err(AppError::Validation("Inactive user".to_string()));
    }
    Ok(user)
}
