use std::sync::Arc;

use crate::analysis::ProfileChecker;
use crate::persistence::ProfileStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Evaluator battery, formatter, and inclusion policy. Immutable once built.
    pub checker: Arc<ProfileChecker>,
    /// Postgres in production, in-memory in tests.
    pub store: Arc<dyn ProfileStore>,
}
