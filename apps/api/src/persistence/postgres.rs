use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use super::{ProfileStore, StoreError, StoreWrite};
use crate::models::stored::{PersistedProfile, PrincipalAssociation};

/// Postgres-backed store over `linkedin_profile` and `user_linkedin_profile`.
#[derive(Clone)]
pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn get_association(
        &self,
        user_id: Uuid,
    ) -> Result<Option<PrincipalAssociation>, StoreError> {
        Ok(sqlx::query_as::<_, PrincipalAssociation>(
            "SELECT user_id, linkedin_profile_url, created_at FROM user_linkedin_profile WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn get_profile(&self, profile_url: &str) -> Result<Option<PersistedProfile>, StoreError> {
        Ok(sqlx::query_as::<_, PersistedProfile>(
            r#"
            SELECT profile_url, profile_data, profile_report_data, created_at
            FROM linkedin_profile
            WHERE profile_url = $1
            "#,
        )
        .bind(profile_url)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn commit(&self, writes: Vec<StoreWrite>) -> Result<(), StoreError> {
        // Dropping the transaction without commit rolls it back.
        let mut tx = self.pool.begin().await?;

        for write in writes {
            match write {
                StoreWrite::InsertProfile {
                    profile_url,
                    profile_data,
                    report,
                } => {
                    sqlx::query(
                        r#"
                        INSERT INTO linkedin_profile (profile_url, profile_data, profile_report_data)
                        VALUES ($1, $2, $3)
                        "#,
                    )
                    .bind(&profile_url)
                    .bind(profile_data)
                    .bind(report)
                    .execute(&mut *tx)
                    .await?;
                    debug!("Inserted profile {profile_url}");
                }
                StoreWrite::UpdateProfile {
                    profile_url,
                    profile_data,
                    report,
                } => {
                    let updated = sqlx::query(
                        r#"
                        UPDATE linkedin_profile
                        SET profile_data = $2, profile_report_data = $3
                        WHERE profile_url = $1
                        "#,
                    )
                    .bind(&profile_url)
                    .bind(profile_data)
                    .bind(report)
                    .execute(&mut *tx)
                    .await?;

                    if updated.rows_affected() == 0 {
                        return Err(StoreError::Conflict(format!(
                            "profile {profile_url} does not exist"
                        )));
                    }
                }
                StoreWrite::InsertAssociation {
                    user_id,
                    profile_url,
                } => {
                    sqlx::query(
                        "INSERT INTO user_linkedin_profile (user_id, linkedin_profile_url) VALUES ($1, $2)",
                    )
                    .bind(user_id)
                    .bind(&profile_url)
                    .execute(&mut *tx)
                    .await?;
                }
                StoreWrite::RelinkAssociation {
                    user_id,
                    profile_url,
                } => {
                    let updated = sqlx::query(
                        "UPDATE user_linkedin_profile SET linkedin_profile_url = $2 WHERE user_id = $1",
                    )
                    .bind(user_id)
                    .bind(&profile_url)
                    .execute(&mut *tx)
                    .await?;

                    if updated.rows_affected() == 0 {
                        return Err(StoreError::Conflict(format!(
                            "user {user_id} has no association"
                        )));
                    }
                }
            }
        }

        tx.commit().await?;
        Ok(())
    }
}
