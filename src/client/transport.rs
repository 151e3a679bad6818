//! Reconnecting WebSocket client for the overlay.
//!
//! There is no terminal failure state: any close or error schedules another
//! attempt after a fixed delay. Decoded events flow to the engine over an
//! mpsc channel; connection state is published on a watch channel so the
//! overlay can render a connected/disconnected indicator.

use crate::error::AppResult;
use crate::models::event::GameEvent;
use futures::StreamExt;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::sync::{mpsc, watch};
use tokio_tungstenite::tungstenite::protocol::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, warn};

/// Fixed backoff between reconnect attempts.
pub const RECONNECT_DELAY: Duration = Duration::from_secs(10);

/// Connection lifecycle as seen by the overlay. `Retrying` covers both a
/// dropped session and a failed attempt; `failed` only picks the log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Open,
    Retrying { failed: bool },
}

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

pub struct OverlayClient {
    url: String,
    events_tx: mpsc::UnboundedSender<GameEvent>,
    state_tx: watch::Sender<ConnectionState>,
}

impl OverlayClient {
    /// Returns the client plus the receivers for decoded events and
    /// connection state.
    pub fn new(
        port: u16,
    ) -> (
        Self,
        mpsc::UnboundedReceiver<GameEvent>,
        watch::Receiver<ConnectionState>,
    ) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(ConnectionState::Connecting);
        let client = Self {
            url: format!("ws://127.0.0.1:{}/", port),
            events_tx,
            state_tx,
        };
        (client, events_rx, state_rx)
    }

    /// Run forever: connect, drain frames, back off, reconnect.
    pub async fn run(self) {
        loop {
            let _ = self.state_tx.send(ConnectionState::Connecting);
            info!(url = %self.url, "connecting");

            let failed = match self.connect_once().await {
                Ok(()) => {
                    info!("disconnected");
                    false
                }
                Err(e) => {
                    warn!(error = %e, "failed to connect");
                    true
                }
            };

            let _ = self.state_tx.send(ConnectionState::Retrying { failed });
            tokio::time::sleep(RECONNECT_DELAY).await;
        }
    }

    /// One attempt: returns Ok once an established session ends, Err if the
    /// connection never came up.
    async fn connect_once(&self) -> AppResult<()> {
        let (stream, _response) = connect_async(self.url.as_str()).await?;
        let _ = self.state_tx.send(ConnectionState::Open);
        info!("connected");
        self.drain(stream).await;
        Ok(())
    }

    /// Read frames until the connection ends, dispatching each text frame.
    async fn drain(&self, mut stream: WsStream) {
        while let Some(frame) = stream.next().await {
            match frame {
                Ok(Message::Text(text)) => self.dispatch(&text),
                Ok(Message::Close(_)) => return,
                Ok(_) => {}
                Err(e) => {
                    warn!(error = %e, "websocket error");
                    return;
                }
            }
        }
    }

    /// Decode one frame and forward it. Unknown types and malformed frames
    /// are logged and dropped; the connection stays up.
    fn dispatch(&self, text: &str) {
        match serde_json::from_str::<GameEvent>(text) {
            Ok(event) => {
                let _ = self.events_tx.send(event);
            }
            Err(e) => debug!(error = %e, frame = text, "dropping undecodable frame"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn dispatch_forwards_decoded_events() {
        let (client, mut events, _state) = OverlayClient::new(9504);
        client.dispatch(r#"{"type":"playerKill"}"#);
        assert!(matches!(events.recv().await.unwrap(), GameEvent::Kill));
    }

    #[tokio::test]
    async fn dispatch_drops_unknown_and_malformed_frames() {
        let (client, mut events, _state) = OverlayClient::new(9504);
        client.dispatch(r#"{"type":"mystery"}"#);
        client.dispatch("not json");
        client.dispatch(r#"{"type":"playerHeal","status":{"amount":5,"health":50,"maxHealth":100}}"#);
        // Only the well-formed heal made it through.
        assert!(matches!(events.recv().await.unwrap(), GameEvent::Heal(_)));
        assert!(events.try_recv().is_err());
    }
}
