//! Data models: the wire envelope and the typed event catalog.

pub mod event;

pub use event::{AmmoStatus, BuffDuration, BuffStatus, DurationClass, Envelope, GameEvent,
    HealthStatus, HoldPhaseStatus, PhaseStatus, ScoreStatus};
