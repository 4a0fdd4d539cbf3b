use std::convert::Infallible;
use std::time::Duration;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use futures_util::stream::{self, Stream};
use serde_json::{json, Value};
use tokio::sync::mpsc;
use tracing::info;
use uuid::Uuid;

use crate::analysis::events::AnalysisEvent;
use crate::analysis::orchestrator::DiscardEvents;
use crate::analysis::reconciler::{latest_report, reconcile_best_effort};
use crate::errors::AppError;
use crate::models::profile::ProfileDocument;
use crate::models::report::AggregateReport;
use crate::state::AppState;

/// Events buffered between the evaluation task and a slow client.
const EVENT_BUFFER: usize = 32;

/// Accepts any JSON object; sections with the wrong shape are rejected.
fn parse_document(body: Result<Json<Value>, JsonRejection>) -> Result<(Value, ProfileDocument), AppError> {
    let Json(raw) = body.map_err(|e| AppError::Validation(e.body_text()))?;
    if !raw.is_object() {
        return Err(AppError::Validation(
            "Profile data must be a JSON object".to_string(),
        ));
    }
    let document = serde_json::from_value(raw.clone())
        .map_err(|e| AppError::Validation(format!("Invalid profile data: {e}")))?;
    Ok((raw, document))
}

/// POST /api/v1/users/:user_id/linkedin-checker/profile
pub async fn handle_check_profile(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<AggregateReport>, AppError> {
    let (raw, document) = parse_document(body)?;
    info!("Evaluating profile for user {user_id}");

    let checker = state.checker.clone();
    let (document, report) = tokio::spawn(async move {
        let report = checker.run(&document, &mut DiscardEvents).await;
        (document, report)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("evaluation task failed: {e}")))?;

    reconcile_best_effort(
        state.store.clone(),
        user_id,
        document.profile_url().map(str::to_string),
        raw,
        report.clone(),
    );

    Ok(Json(report))
}

/// POST /api/v1/users/:user_id/linkedin-checker/profile/stream
pub async fn handle_check_profile_stream(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
    let (raw, document) = parse_document(body)?;
    info!("Streaming profile evaluation for user {user_id}");

    let (tx, rx) = mpsc::channel::<AnalysisEvent>(EVENT_BUFFER);
    let checker = state.checker.clone();
    let store = state.store.clone();

    tokio::spawn(async move {
        let mut tx = tx;
        let report = checker.run(&document, &mut tx).await;
        // Closing the channel ends the stream right after the terminal event.
        drop(tx);
        reconcile_best_effort(
            store,
            user_id,
            document.profile_url().map(str::to_string),
            raw,
            report,
        );
    });

    let stream = stream::unfold(rx, |mut rx| async move {
        let event = rx.recv().await?;
        Some((Ok(event.to_sse_event()), rx))
    });

    Ok(Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    ))
}

/// GET /api/v1/users/:user_id/linkedin-checker/profile
pub async fn handle_get_profile_report(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let report = latest_report(state.store.as_ref(), user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("LinkedIn profile not found".to_string()))?;

    Ok(Json(json!({ "status": "success", "data": report })))
}
