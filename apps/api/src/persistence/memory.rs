use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ProfileStore, StoreError, StoreWrite};
use crate::models::stored::{PersistedProfile, PrincipalAssociation};

#[derive(Debug, Default)]
struct Tables {
    profiles: HashMap<String, PersistedProfile>,
    associations: HashMap<Uuid, PrincipalAssociation>,
}

impl Tables {
    /// Rejects the batch if any write would conflict with the current rows or
    /// with an earlier write in the same batch.
    fn check(&self, writes: &[StoreWrite]) -> Result<(), StoreError> {
        let mut new_profiles: HashSet<&str> = HashSet::new();
        let mut new_associations: HashSet<Uuid> = HashSet::new();

        for write in writes {
            match write {
                StoreWrite::InsertProfile { profile_url, .. } => {
                    if self.profiles.contains_key(profile_url)
                        || !new_profiles.insert(profile_url.as_str())
                    {
                        return Err(StoreError::Conflict(format!(
                            "profile {profile_url} already exists"
                        )));
                    }
                }
                StoreWrite::UpdateProfile { profile_url, .. } => {
                    if !self.profiles.contains_key(profile_url)
                        && !new_profiles.contains(profile_url.as_str())
                    {
                        return Err(StoreError::Conflict(format!(
                            "profile {profile_url} does not exist"
                        )));
                    }
                }
                StoreWrite::InsertAssociation { user_id, .. } => {
                    if self.associations.contains_key(user_id)
                        || !new_associations.insert(*user_id)
                    {
                        return Err(StoreError::Conflict(format!(
                            "user {user_id} is already linked"
                        )));
                    }
                }
                StoreWrite::RelinkAssociation { user_id, .. } => {
                    if !self.associations.contains_key(user_id)
                        && !new_associations.contains(user_id)
                    {
                        return Err(StoreError::Conflict(format!(
                            "user {user_id} has no association"
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Applies a write that `check` has already accepted.
    fn apply(&mut self, write: StoreWrite) {
        match write {
            StoreWrite::InsertProfile {
                profile_url,
                profile_data,
                report,
            } => {
                self.profiles.insert(
                    profile_url.clone(),
                    PersistedProfile {
                        profile_url,
                        profile_data,
                        profile_report_data: Some(report),
                        created_at: Utc::now(),
                    },
                );
            }
            StoreWrite::UpdateProfile {
                profile_url,
                profile_data,
                report,
            } => {
                if let Some(row) = self.profiles.get_mut(&profile_url) {
                    row.profile_data = profile_data;
                    row.profile_report_data = Some(report);
                }
            }
            StoreWrite::InsertAssociation {
                user_id,
                profile_url,
            } => {
                self.associations.insert(
                    user_id,
                    PrincipalAssociation {
                        user_id,
                        profile_url,
                        created_at: Utc::now(),
                    },
                );
            }
            StoreWrite::RelinkAssociation {
                user_id,
                profile_url,
            } => {
                if let Some(association) = self.associations.get_mut(&user_id) {
                    association.profile_url = profile_url;
                }
            }
        }
    }
}

/// In-process store for tests and local runs without Postgres.
/// A commit checks the whole batch under the write lock before applying any
/// of it.
#[derive(Debug, Default)]
pub struct MemoryProfileStore {
    tables: RwLock<Tables>,
    fail_commits: AtomicBool,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent commit fail with `StoreError::Unavailable`.
    #[cfg(test)]
    pub fn set_fail_commits(&self, fail: bool) {
        self.fail_commits.store(fail, Ordering::SeqCst);
    }

    #[cfg(test)]
    pub async fn profile_count(&self) -> usize {
        self.tables.read().await.profiles.len()
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn get_association(
        &self,
        user_id: Uuid,
    ) -> Result<Option<PrincipalAssociation>, StoreError> {
        Ok(self.tables.read().await.associations.get(&user_id).cloned())
    }

    async fn get_profile(&self, profile_url: &str) -> Result<Option<PersistedProfile>, StoreError> {
        Ok(self.tables.read().await.profiles.get(profile_url).cloned())
    }

    async fn commit(&self, writes: Vec<StoreWrite>) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if self.fail_commits.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("commits disabled".to_string()));
        }

        tables.check(&writes)?;
        for write in writes {
            tables.apply(write);
        }
        Ok(())
    }
}
