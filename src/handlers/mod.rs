//! HTTP and WebSocket handlers.

pub mod http;
pub mod ws;

pub use http::{health, ingest};
pub use ws::ws_handler;
