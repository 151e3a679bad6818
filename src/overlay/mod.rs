//! The reactive overlay: per-widget state machines driven by the event
//! stream, animated without blocking the dispatch loop.

pub mod ammo;
pub mod animation;
pub mod arrows;
pub mod buffs;
pub mod engine;
pub mod health;
pub mod log;
pub mod score;

pub use ammo::{AmmoCounter, AmmoDelta, SlotFill, SlotTransition};
pub use arrows::{ArrowBar, CellState};
pub use buffs::{BuffIndicators, BuffTarget};
pub use engine::OverlayEngine;
pub use health::HealthBar;
pub use log::EventLog;
pub use score::ScoreCounter;
