//! Gameplay telemetry broadcast server and reactive overlay client.
//!
//! A producer posts typed JSON event envelopes to the ingest endpoint; the
//! hub fans each one out to every connected WebSocket overlay. On the client
//! side a reconnecting transport feeds the overlay engine, which keeps
//! animated widget state (score, health, progress bars, ammo, event log,
//! buffs) coherent over a best-effort stream.

pub mod client;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod overlay;
pub mod services;

pub use config::{OverlayConfig, ServerConfig};
pub use error::AppError;
pub use handlers::http::AppState;
pub use models::event::{Envelope, GameEvent};
pub use overlay::OverlayEngine;
pub use services::{BroadcastHub, EventCoalescer};

use axum::routing::{get, post};

/// Build the router (overlay WebSocket at `/`, producer ingest, health).
/// Used by main and by integration tests.
pub fn create_app(state: AppState) -> axum::Router {
    axum::Router::new()
        .route("/", get(handlers::ws_handler))
        .route("/api/events", post(handlers::ingest))
        .route("/health", get(handlers::http::health))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}
