// Keyed storage for evaluated profiles and the principal → profile pointer.
// Writes are always planned up front and handed to `commit` as one batch.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::models::stored::{PersistedProfile, PrincipalAssociation};

pub use memory::MemoryProfileStore;
pub use postgres::PgProfileStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// A planned write no longer matches what is stored.
    #[error("Write conflict: {0}")]
    Conflict(String),
}

/// One planned mutation. A batch is applied in order, all or nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreWrite {
    InsertProfile {
        profile_url: String,
        profile_data: Value,
        report: Value,
    },
    /// Overwrites document and report; `created_at` is kept.
    UpdateProfile {
        profile_url: String,
        profile_data: Value,
        report: Value,
    },
    InsertAssociation {
        user_id: Uuid,
        profile_url: String,
    },
    RelinkAssociation {
        user_id: Uuid,
        profile_url: String,
    },
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get_association(
        &self,
        user_id: Uuid,
    ) -> Result<Option<PrincipalAssociation>, StoreError>;

    async fn get_profile(&self, profile_url: &str) -> Result<Option<PersistedProfile>, StoreError>;

    /// Applies every write or none of them.
    async fn commit(&self, writes: Vec<StoreWrite>) -> Result<(), StoreError>;
}
