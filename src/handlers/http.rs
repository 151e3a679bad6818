//! HTTP handlers: producer ingest and health.

use axum::{extract::State, http::StatusCode, Json};
use serde_json::json;

use crate::error::AppError;
use crate::models::event::Envelope;
use crate::services::{BroadcastHub, EventCoalescer};

/// Shared application state for the HTTP and WebSocket surface.
#[derive(Clone)]
pub struct AppState {
    pub hub: BroadcastHub,
    pub coalescer: EventCoalescer,
}

const AMMO_EVENT: &str = "ammoEvent";

/// POST /api/events — the producer boundary. One envelope per request; ammo
/// envelopes go through the coalescer, everything else broadcasts
/// immediately.
pub async fn ingest(
    State(state): State<AppState>,
    Json(envelope): Json<Envelope>,
) -> Result<Json<serde_json::Value>, AppError> {
    if envelope.kind.is_empty() {
        return Err(AppError::InvalidEnvelope("empty type".to_string()));
    }

    if envelope.kind == AMMO_EVENT {
        state.coalescer.submit(envelope).await;
        return Ok(Json(json!({ "ok": true, "coalesced": true })));
    }

    let delivered = state.hub.broadcast(&envelope).await;
    Ok(Json(json!({ "ok": true, "delivered": delivered })))
}

/// GET /health — liveness probe.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "service": "statuscast" })),
    )
}
