//! Broadcast hub: tracks connected overlay sockets and fans events out.

use crate::models::event::Envelope;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tracing::{debug, info, warn};
use uuid::Uuid;

pub type ConnectionId = String;
/// Outbound queue handed to the hub on registration; the socket task drains it.
pub type OutboundSender = mpsc::UnboundedSender<String>;

/// Generate a unique socket/connection id.
fn generate_connection_id() -> ConnectionId {
    format!("{}.{}", std::process::id(), Uuid::new_v4().as_simple())
}

/// Owns the active connection set. Registration, deregistration and broadcast
/// are safe under concurrent access; broadcast is fire-and-forget fan-out with
/// per-connection failures isolated from the caller and from other clients.
#[derive(Clone)]
pub struct BroadcastHub {
    version: String,
    connections: Arc<RwLock<HashMap<ConnectionId, OutboundSender>>>,
}

impl BroadcastHub {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            connections: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Register a connection and greet it (and it alone) with a `hello`
    /// envelope carrying the server version.
    pub async fn open(&self, tx: OutboundSender) -> ConnectionId {
        let id = generate_connection_id();
        match serde_json::to_string(&Envelope::hello(&self.version)) {
            Ok(text) => {
                let _ = tx.send(text);
            }
            Err(e) => warn!(error = %e, "failed to serialize hello"),
        }
        self.connections.write().await.insert(id.clone(), tx);
        info!(socket_id = %id, "connection registered");
        id
    }

    /// Deregister a connection. Sends already queued to it are dropped with
    /// the queue; this is not an error.
    pub async fn close(&self, id: &str) {
        if self.connections.write().await.remove(id).is_some() {
            info!(socket_id = %id, "connection deregistered");
        }
    }

    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Serialize the envelope once and push it to every registered
    /// connection. A failed send never reaches the caller; the dead entry is
    /// dropped from the set. Returns the delivered count.
    pub async fn broadcast(&self, envelope: &Envelope) -> usize {
        let text = match serde_json::to_string(envelope) {
            Ok(text) => text,
            Err(e) => {
                warn!(kind = %envelope.kind, error = %e, "unserializable envelope dropped");
                return 0;
            }
        };

        let mut dead = Vec::new();
        let delivered = {
            let connections = self.connections.read().await;
            let mut delivered = 0;
            for (id, tx) in connections.iter() {
                if tx.send(text.clone()).is_ok() {
                    delivered += 1;
                } else {
                    dead.push(id.clone());
                }
            }
            delivered
        };

        if !dead.is_empty() {
            let mut connections = self.connections.write().await;
            for id in dead {
                connections.remove(&id);
                debug!(socket_id = %id, "dropped dead connection during broadcast");
            }
        }

        debug!(kind = %envelope.kind, delivered, "broadcast");
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score_envelope(score: i64) -> Envelope {
        Envelope::new(
            "TNHScoreEvent",
            Some(serde_json::json!({ "type": "HoldKill", "value": 1000, "mult": 9, "score": score })),
        )
    }

    #[tokio::test]
    async fn open_greets_the_new_connection_only() {
        let hub = BroadcastHub::new("0.1.0");
        let (tx_a, mut rx_a) = mpsc::unbounded_channel();
        hub.open(tx_a).await;

        let hello = rx_a.recv().await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&hello).unwrap();
        assert_eq!(value["type"], "hello");
        assert_eq!(value["status"]["version"], "0.1.0");

        let (tx_b, mut rx_b) = mpsc::unbounded_channel();
        hub.open(tx_b).await;
        rx_b.recv().await.unwrap();
        // The first connection is not greeted again.
        assert!(rx_a.try_recv().is_err());
    }

    #[tokio::test]
    async fn broadcast_reaches_every_connection() {
        let hub = BroadcastHub::new("0.1.0");
        let (tx_a, mut rx_a) = mpsc::unbounded_channel();
        let (tx_b, mut rx_b) = mpsc::unbounded_channel();
        hub.open(tx_a).await;
        hub.open(tx_b).await;
        rx_a.recv().await.unwrap();
        rx_b.recv().await.unwrap();

        let delivered = hub.broadcast(&score_envelope(9000)).await;
        assert_eq!(delivered, 2);
        assert_eq!(rx_a.recv().await.unwrap(), rx_b.recv().await.unwrap());
    }

    #[tokio::test]
    async fn dead_connection_does_not_stop_delivery() {
        let hub = BroadcastHub::new("0.1.0");
        let (tx_a, rx_a) = mpsc::unbounded_channel();
        let (tx_b, mut rx_b) = mpsc::unbounded_channel();
        hub.open(tx_a).await;
        hub.open(tx_b).await;
        rx_b.recv().await.unwrap();
        drop(rx_a);

        let delivered = hub.broadcast(&score_envelope(500)).await;
        assert_eq!(delivered, 1);
        let text = rx_b.recv().await.unwrap();
        assert!(text.contains("TNHScoreEvent"));
        // The dead entry was pruned.
        assert_eq!(hub.connection_count().await, 1);
    }

    #[tokio::test]
    async fn close_deregisters() {
        let hub = BroadcastHub::new("0.1.0");
        let (tx, mut rx) = mpsc::unbounded_channel();
        let id = hub.open(tx).await;
        rx.recv().await.unwrap();
        hub.close(&id).await;
        assert_eq!(hub.connection_count().await, 0);
        assert_eq!(hub.broadcast(&score_envelope(1)).await, 0);
    }
}
