use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Canonical evaluation record, one per public profile URL.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct PersistedProfile {
    pub profile_url: String,
    /// The document exactly as submitted, including fields the scorer ignores.
    pub profile_data: Value,
    pub profile_report_data: Option<Value>,
    pub created_at: DateTime<Utc>,
}

/// Points a principal at the profile URL they last submitted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct PrincipalAssociation {
    pub user_id: Uuid,
    #[sqlx(rename = "linkedin_profile_url")]
    pub profile_url: String,
    pub created_at: DateTime<Utc>,
}
