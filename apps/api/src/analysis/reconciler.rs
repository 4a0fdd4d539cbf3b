use std::sync::Arc;

use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::models::report::AggregateReport;
use crate::persistence::{ProfileStore, StoreError, StoreWrite};

#[derive(Debug, Clone, PartialEq)]
pub enum ReconcileOutcome {
    /// The submission carried no profile URL, so there is nothing to key on.
    Skipped,
    Committed(Vec<StoreWrite>),
}

/// Reads current state and decides which writes bring the store in line
/// with this submission. Rows are keyed by the submitted URL; a principal
/// who switches URL is relinked and the previous row is left in place.
pub async fn plan_writes(
    store: &dyn ProfileStore,
    user_id: Uuid,
    profile_url: &str,
    profile_data: Value,
    report: Value,
) -> Result<Vec<StoreWrite>, StoreError> {
    let association = store.get_association(user_id).await?;
    let existing_row = store.get_profile(profile_url).await?;

    let mut writes = Vec::with_capacity(2);
    writes.push(match existing_row {
        Some(_) => StoreWrite::UpdateProfile {
            profile_url: profile_url.to_string(),
            profile_data,
            report,
        },
        None => StoreWrite::InsertProfile {
            profile_url: profile_url.to_string(),
            profile_data,
            report,
        },
    });

    match association {
        None => writes.push(StoreWrite::InsertAssociation {
            user_id,
            profile_url: profile_url.to_string(),
        }),
        Some(existing) if existing.profile_url != profile_url => {
            writes.push(StoreWrite::RelinkAssociation {
                user_id,
                profile_url: profile_url.to_string(),
            })
        }
        Some(_) => {}
    }

    Ok(writes)
}

/// Plans and atomically commits the writes for one finished evaluation.
/// Planning reads outside the commit, so a concurrent submission can land
/// first; a conflicting commit is planned and committed once more.
pub async fn reconcile(
    store: &dyn ProfileStore,
    user_id: Uuid,
    profile_url: Option<&str>,
    profile_data: Value,
    report: &AggregateReport,
) -> Result<ReconcileOutcome, StoreError> {
    let Some(profile_url) = profile_url else {
        return Ok(ReconcileOutcome::Skipped);
    };

    let report = serde_json::to_value(report)?;
    let writes = plan_writes(
        store,
        user_id,
        profile_url,
        profile_data.clone(),
        report.clone(),
    )
    .await?;

    match store.commit(writes.clone()).await {
        Ok(()) => Ok(ReconcileOutcome::Committed(writes)),
        Err(StoreError::Conflict(reason)) => {
            debug!("Re-planning writes for user {user_id} after conflict: {reason}");
            let writes = plan_writes(store, user_id, profile_url, profile_data, report).await?;
            store.commit(writes.clone()).await?;
            Ok(ReconcileOutcome::Committed(writes))
        }
        Err(e) => Err(e),
    }
}

/// Runs `reconcile` on its own task. Failures are logged and dropped so the
/// caller's response never depends on the store.
pub fn reconcile_best_effort(
    store: Arc<dyn ProfileStore>,
    user_id: Uuid,
    profile_url: Option<String>,
    profile_data: Value,
    report: AggregateReport,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        match reconcile(store.as_ref(), user_id, profile_url.as_deref(), profile_data, &report).await {
            Ok(ReconcileOutcome::Skipped) => {
                warn!("Profile for user {user_id} has no linkedin_url; not persisted");
            }
            Ok(ReconcileOutcome::Committed(writes)) => {
                info!("Persisted evaluation for user {user_id} ({} writes)", writes.len());
            }
            Err(e) => {
                error!("Failed to persist evaluation for user {user_id}: {e}");
            }
        }
    })
}

/// The report from the principal's latest persisted evaluation, `None` when
/// the principal or its profile row is unknown. A row without a report
/// yields an empty object.
pub async fn latest_report(
    store: &dyn ProfileStore,
    user_id: Uuid,
) -> Result<Option<Value>, StoreError> {
    let Some(association) = store.get_association(user_id).await? else {
        return Ok(None);
    };
    let Some(profile) = store.get_profile(&association.profile_url).await? else {
        return Ok(None);
    };
    Ok(Some(
        profile
            .profile_report_data
            .unwrap_or_else(|| Value::Object(Default::default())),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::stored::{PersistedProfile, PrincipalAssociation};
    use crate::persistence::MemoryProfileStore;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    const URL_A: &str = "https://www.linkedin.com/in/jane-doe";
    const URL_B: &str = "https://www.linkedin.com/in/jane-doe-dev";

    /// Commits `competing` just ahead of the first commit it receives, the
    /// way a concurrent submission for the same URL would.
    struct RacingStore {
        inner: MemoryProfileStore,
        competing: Mutex<Option<Vec<StoreWrite>>>,
    }

    #[async_trait]
    impl ProfileStore for RacingStore {
        async fn get_association(
            &self,
            user_id: Uuid,
        ) -> Result<Option<PrincipalAssociation>, StoreError> {
            self.inner.get_association(user_id).await
        }

        async fn get_profile(
            &self,
            profile_url: &str,
        ) -> Result<Option<PersistedProfile>, StoreError> {
            self.inner.get_profile(profile_url).await
        }

        async fn commit(&self, writes: Vec<StoreWrite>) -> Result<(), StoreError> {
            let competing = self.competing.lock().unwrap().take();
            if let Some(competing) = competing {
                self.inner.commit(competing).await?;
            }
            self.inner.commit(writes).await
        }
    }

    fn report(score: i64) -> AggregateReport {
        AggregateReport {
            score,
            sections: vec![],
            failed_sections: vec![],
        }
    }

    #[tokio::test]
    async fn test_first_submission_creates_row_and_association() {
        let store = MemoryProfileStore::new();
        let user = Uuid::new_v4();

        let outcome = reconcile(&store, user, Some(URL_A), json!({"v": 1}), &report(10))
            .await
            .unwrap();

        assert!(matches!(
            outcome,
            ReconcileOutcome::Committed(ref writes)
                if matches!(writes[0], StoreWrite::InsertProfile { .. })
                && matches!(writes[1], StoreWrite::InsertAssociation { .. })
        ));
        assert_eq!(latest_report(&store, user).await.unwrap().unwrap()["score"], 10);
    }

    #[tokio::test]
    async fn test_resubmission_overwrites_in_place() {
        let store = MemoryProfileStore::new();
        let user = Uuid::new_v4();
        reconcile(&store, user, Some(URL_A), json!({"v": 1}), &report(10)).await.unwrap();
        let created = store.get_profile(URL_A).await.unwrap().unwrap().created_at;

        let outcome = reconcile(&store, user, Some(URL_A), json!({"v": 2}), &report(20))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            ReconcileOutcome::Committed(vec![StoreWrite::UpdateProfile {
                profile_url: URL_A.to_string(),
                profile_data: json!({"v": 2}),
                report: json!({"score": 20, "sections": []}),
            }])
        );
        let row = store.get_profile(URL_A).await.unwrap().unwrap();
        assert_eq!(row.created_at, created);
        assert_eq!(row.profile_data, json!({"v": 2}));
        assert_eq!(store.profile_count().await, 1);
    }

    #[tokio::test]
    async fn test_url_change_relinks_and_keeps_old_row() {
        let store = MemoryProfileStore::new();
        let user = Uuid::new_v4();
        reconcile(&store, user, Some(URL_A), json!({}), &report(10)).await.unwrap();

        reconcile(&store, user, Some(URL_B), json!({}), &report(30)).await.unwrap();

        let association = store.get_association(user).await.unwrap().unwrap();
        assert_eq!(association.profile_url, URL_B);
        assert!(store.get_profile(URL_A).await.unwrap().is_some());
        assert_eq!(store.profile_count().await, 2);
        assert_eq!(latest_report(&store, user).await.unwrap().unwrap()["score"], 30);
    }

    #[tokio::test]
    async fn test_existing_row_under_new_url_is_reused() {
        let store = MemoryProfileStore::new();
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        reconcile(&store, first, Some(URL_A), json!({}), &report(10)).await.unwrap();

        let outcome = reconcile(&store, second, Some(URL_A), json!({}), &report(15))
            .await
            .unwrap();

        assert!(matches!(
            outcome,
            ReconcileOutcome::Committed(ref writes)
                if matches!(writes[0], StoreWrite::UpdateProfile { .. })
                && matches!(writes[1], StoreWrite::InsertAssociation { .. })
        ));
        assert_eq!(store.profile_count().await, 1);
    }

    #[tokio::test]
    async fn test_missing_url_is_skipped() {
        let store = MemoryProfileStore::new();
        let outcome = reconcile(&store, Uuid::new_v4(), None, json!({}), &report(0))
            .await
            .unwrap();
        assert_eq!(outcome, ReconcileOutcome::Skipped);
        assert_eq!(store.profile_count().await, 0);
    }

    #[tokio::test]
    async fn test_commit_failure_leaves_store_untouched() {
        let store = Arc::new(MemoryProfileStore::new());
        let user = Uuid::new_v4();
        store.set_fail_commits(true);

        let result = reconcile(store.as_ref(), user, Some(URL_A), json!({}), &report(5)).await;
        assert!(matches!(result, Err(StoreError::Unavailable(_))));

        // The background variant swallows the same failure.
        reconcile_best_effort(store.clone(), user, Some(URL_A.to_string()), json!({}), report(5))
            .await
            .unwrap();

        assert!(store.get_association(user).await.unwrap().is_none());
        assert_eq!(store.profile_count().await, 0);
    }

    #[tokio::test]
    async fn test_concurrent_first_submission_is_replanned() {
        let other = Uuid::new_v4();
        let store = RacingStore {
            inner: MemoryProfileStore::new(),
            competing: Mutex::new(Some(vec![
                StoreWrite::InsertProfile {
                    profile_url: URL_A.to_string(),
                    profile_data: json!({}),
                    report: json!({"score": 1}),
                },
                StoreWrite::InsertAssociation {
                    user_id: other,
                    profile_url: URL_A.to_string(),
                },
            ])),
        };
        let user = Uuid::new_v4();

        let outcome = reconcile(&store, user, Some(URL_A), json!({"v": 1}), &report(40))
            .await
            .unwrap();

        assert!(matches!(
            outcome,
            ReconcileOutcome::Committed(ref writes)
                if matches!(writes[0], StoreWrite::UpdateProfile { .. })
                && matches!(writes[1], StoreWrite::InsertAssociation { .. })
        ));
        assert_eq!(store.inner.profile_count().await, 1);
        assert_eq!(latest_report(&store, user).await.unwrap().unwrap()["score"], 40);
        assert!(store.inner.get_association(other).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_latest_report_is_none_for_unknown_user() {
        let store = MemoryProfileStore::new();
        assert!(latest_report(&store, Uuid::new_v4()).await.unwrap().is_none());
    }
}
