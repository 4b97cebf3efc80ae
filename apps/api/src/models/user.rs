use serde::{Deserialize, Serialize};

use crate::store::RecordMeta;

/// Organization every user without an explicit one belongs to.
pub const DEFAULT_ORG_ID: &str = "default-org";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub name: String,
    pub hr_contact_email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub full_name: String,
    pub email: String,
    /// Stored verbatim (demo only) and never serialized into responses.
    #[serde(skip_serializing, default)]
    pub password: String,
    pub org_id: String,
    pub is_active: bool,
}
