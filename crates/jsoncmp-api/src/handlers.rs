//! Route handlers
//!
//! Orchestrator calls run on the blocking pool. Once a call has been handed
//! over it runs to completion even if the client disconnects, so a compare
//! is never abandoned between its read and its clear.

use crate::error::ApiError;
use crate::request::StoreRequest;
use crate::state::AppState;
use axum::body::Bytes;
use axum::extract::State;
use axum::{Extension, Json};
use jsoncmp_core::core_types::RequestId;
use jsoncmp_core::errors::{ExError, ExErrorKind};
use jsoncmp_engine::{CompareReport, Comparator, MessageOutcome, SlotStatus};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::Span;

/// `POST /api/store`
pub async fn store_payload(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    body: Bytes,
) -> Result<Json<MessageOutcome>, ApiError> {
    let request = StoreRequest::from_body(&body)
        .map_err(|e| ApiError(ExError::from(e).with_request_id(request_id.clone())))?;

    let outcome = run_blocking(&state, &request_id, move |comparator| {
        comparator.store(request.slot_number, &request.payload)
    })
    .await?;

    Ok(Json(outcome))
}

/// `GET /api/compare` and `POST /api/compare`
pub async fn compare(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> Result<Json<CompareReport>, ApiError> {
    let report = run_blocking(&state, &request_id, |comparator| {
        comparator.compare_stored()
    })
    .await?;
    Ok(Json(report))
}

/// `DELETE /api/payloads`
pub async fn delete_payloads(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> Result<Json<MessageOutcome>, ApiError> {
    let outcome = run_blocking(&state, &request_id, |comparator| comparator.reset()).await?;
    Ok(Json(outcome))
}

/// `GET /api/status`
pub async fn status(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> Result<Json<SlotStatus>, ApiError> {
    let status = run_blocking(&state, &request_id, |comparator| comparator.status()).await?;
    Ok(Json(status))
}

/// `GET /health`
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn run_blocking<T, F>(
    state: &AppState,
    request_id: &RequestId,
    op: F,
) -> Result<T, ApiError>
where
    F: FnOnce(&Comparator) -> jsoncmp_core::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let comparator = Arc::clone(&state.comparator);
    let span = Span::current();

    let joined = tokio::task::spawn_blocking(move || span.in_scope(|| op(&comparator))).await;

    let result = joined.map_err(|e| {
        ExError::new(ExErrorKind::Internal)
            .with_op("run_blocking")
            .with_message(format!("Operation did not complete: {}", e))
    });

    result
        .and_then(|inner| inner)
        .map_err(|e| ApiError(e.with_request_id(request_id.clone())))
}
