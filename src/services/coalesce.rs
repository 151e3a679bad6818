//! Ammo-event coalescing: rapid magazine/chamber mutations arrive in bursts,
//! so the ingest path collects them and flushes at most one envelope per
//! scheduling quantum, latest wins.

use crate::models::event::Envelope;
use crate::services::hub::BroadcastHub;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::MissedTickBehavior;
use tracing::debug;

#[derive(Clone)]
pub struct EventCoalescer {
    pending: Arc<Mutex<Option<Envelope>>>,
}

impl EventCoalescer {
    /// Spawn the flush task and return the shared handle. The task runs for
    /// the server lifetime; an empty quantum flushes nothing.
    pub fn start(hub: BroadcastHub, quantum: Duration) -> Self {
        let coalescer = Self {
            pending: Arc::new(Mutex::new(None)),
        };
        let pending = coalescer.pending.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(quantum);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let envelope = pending.lock().await.take();
                if let Some(envelope) = envelope {
                    hub.broadcast(&envelope).await;
                }
            }
        });
        coalescer
    }

    /// Replace the pending envelope; within a quantum only the newest
    /// submission survives to the flush.
    pub async fn submit(&self, envelope: Envelope) {
        let mut slot = self.pending.lock().await;
        if slot.is_some() {
            debug!(kind = %envelope.kind, "superseding pending envelope");
        }
        *slot = Some(envelope);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::Envelope;
    use tokio::sync::mpsc;

    fn ammo_envelope(current: u32) -> Envelope {
        Envelope::new(
            "ammoEvent",
            Some(serde_json::json!({
                "weapon": "M1911", "hand": 1, "roundType": "a45_ACP", "roundClass": "FMJ",
                "current": current, "spent": 0, "capacity": 8
            })),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn flushes_latest_submission_once_per_quantum() {
        let hub = BroadcastHub::new("test");
        let (tx, mut rx) = mpsc::unbounded_channel();
        hub.open(tx).await;
        rx.recv().await.unwrap(); // hello

        let coalescer = EventCoalescer::start(hub.clone(), Duration::from_millis(50));
        coalescer.submit(ammo_envelope(7)).await;
        coalescer.submit(ammo_envelope(6)).await;

        tokio::time::sleep(Duration::from_millis(120)).await;

        let text = rx.try_recv().unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["status"]["current"], 6);
        // The superseded envelope never flushed, and nothing else is pending.
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn idle_quanta_flush_nothing() {
        let hub = BroadcastHub::new("test");
        let (tx, mut rx) = mpsc::unbounded_channel();
        hub.open(tx).await;
        rx.recv().await.unwrap();

        let _coalescer = EventCoalescer::start(hub, Duration::from_millis(50));
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(rx.try_recv().is_err());
    }
}
