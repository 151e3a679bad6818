//! Overlay-side networking: the reconnecting WebSocket transport.

pub mod transport;

pub use transport::{ConnectionState, OverlayClient, RECONNECT_DELAY};
