//! The overlay state engine: routes decoded events to widgets.
//!
//! One synchronous `apply` per incoming envelope, one `tick` per frame for
//! timers and animations. Widgets never poll; absence of events leaves their
//! state untouched.

use crate::client::ConnectionState;
use crate::config::OverlayConfig;
use crate::models::event::{GameEvent, HoldPhaseStatus, PhaseStatus, ScoreStatus};
use crate::overlay::ammo::AmmoCounter;
use crate::overlay::arrows::{ArrowBar, CellState};
use crate::overlay::buffs::BuffIndicators;
use crate::overlay::health::HealthBar;
use crate::overlay::log::EventLog;
use crate::overlay::score::ScoreCounter;
use std::time::{Duration, Instant};

/// Scenes with a score panel. Anything else hides it.
const SCORE_SCENES: [&str; 4] = [
    "TakeAndHold_Lobby_2",
    "TakeAndHoldClassic",
    "TakeAndHold_WinterWasteland",
    "Institution",
];

const WEAPON_PLACEHOLDER: &str = "NO WEAPON";
/// Level bar holds two cells (take + hold) per level, five levels by default.
const LEVEL_BAR_CELLS: usize = 10;
const PHASE_BAR_CELLS: usize = 5;
/// Lifetime of the informational lines logged at run start.
const RUN_INFO_LIFETIME: Duration = Duration::from_secs(10);
const INFO_ACCENT: &str = "#8cf";
const ALERT_ACCENT: &str = "#f04";

pub struct OverlayEngine {
    config: OverlayConfig,
    pub score: ScoreCounter,
    pub health: HealthBar,
    pub level_bar: ArrowBar,
    pub phase_bar: ArrowBar,
    pub ammo: AmmoCounter,
    pub log: EventLog,
    pub buffs: BuffIndicators,
    weapon_name: String,
    score_panel_visible: bool,
    level_cell: usize,
    hold_cell: usize,
}

impl OverlayEngine {
    pub fn new(config: OverlayConfig, now: Instant) -> Self {
        let log = EventLog::new(
            config.event_log_length,
            config.event_log_lifetime_duration(),
            config.event_log_delay_duration(),
            config.pause_event_log,
            now,
        );
        let score = ScoreCounter::new(config.score_counter_digits, now);
        Self {
            score,
            health: HealthBar::new(now),
            level_bar: ArrowBar::new(LEVEL_BAR_CELLS),
            phase_bar: ArrowBar::new(PHASE_BAR_CELLS),
            ammo: AmmoCounter::new(),
            log,
            buffs: BuffIndicators::new(),
            weapon_name: String::new(),
            score_panel_visible: config.show_score_panel,
            level_cell: 0,
            hold_cell: 0,
            config,
        }
    }

    /// Displayed weapon name; a placeholder until an ammo event names one.
    pub fn weapon_name(&self) -> &str {
        if self.weapon_name.is_empty() {
            WEAPON_PLACEHOLDER
        } else {
            &self.weapon_name
        }
    }

    pub fn score_panel_visible(&self) -> bool {
        self.score_panel_visible
    }

    /// Route one decoded event to the widgets it concerns.
    pub fn apply(&mut self, now: Instant, event: &GameEvent) {
        match event {
            GameEvent::Hello(status) => {
                tracing::debug!(version = %status.version, "server hello");
            }
            GameEvent::Scene(status) => self.handle_scene(now, &status.name),
            GameEvent::Phase(status) => self.handle_phase(now, status),
            GameEvent::HoldPhase(status) => self.handle_hold_phase(status),
            GameEvent::Score(status) => self.handle_score(now, status),
            GameEvent::LostStealthBonus => {
                self.log_line("STEALTH BONUS LOST", Some(ALERT_ACCENT), None);
            }
            GameEvent::LostNoHitBonus => {
                self.log_line("NO HIT BONUS LOST", Some(ALERT_ACCENT), None);
            }
            GameEvent::Damage(status) | GameEvent::Heal(status) => {
                self.health.apply_health(now, status);
            }
            GameEvent::Kill => self.health.kill(now),
            GameEvent::Buff(status) => {
                if let Some(caption) = self.buffs.apply(now, status) {
                    self.log_line(caption.text, caption.accent, caption.lifetime);
                }
            }
            GameEvent::Ammo(status) => {
                if self.config.show_weapon_name && status.weapon != self.weapon_name {
                    self.weapon_name = status.weapon.clone();
                }
                if self.config.show_ammo_counter {
                    self.ammo.apply(status);
                }
            }
        }
    }

    /// Advance timers: log entry cadence/expiry and buff effect expiry.
    /// Value tweens are read lazily, so nothing else needs a tick.
    pub fn tick(&mut self, now: Instant) {
        self.log.tick(now);
        self.buffs.tick(now);
    }

    /// Surface a connection transition in the event log.
    pub fn note_connection(&mut self, state: ConnectionState) {
        let text = match state {
            ConnectionState::Connecting => "CONNECTING...",
            ConnectionState::Open => "CONNECTED",
            ConnectionState::Retrying { failed: false } => "DISCONNECTED",
            ConnectionState::Retrying { failed: true } => "FAILED TO CONNECT",
        };
        self.log_line(text, None, None);
    }

    fn handle_scene(&mut self, now: Instant, name: &str) {
        self.score.reset(now);
        self.health.reset(now);
        self.weapon_name.clear();
        self.ammo.reset();
        self.level_cell = 0;
        self.hold_cell = 0;
        self.level_bar.reset();
        self.phase_bar.reset();

        self.score_panel_visible =
            self.config.show_score_panel && SCORE_SCENES.contains(&name);
    }

    fn handle_phase(&mut self, now: Instant, status: &PhaseStatus) {
        if !self.config.show_level_bar {
            return;
        }
        if status.count >= 0 && status.count < 5 {
            self.level_bar.set_length(status.count as usize * 2);
        }

        match status.phase.as_str() {
            "Take" => {
                self.phase_bar.reset();
                self.level_cell = cell_index(status.level * 2);
                self.level_bar.set_state(self.level_cell, CellState::Current);
                if status.level > 0 {
                    for i in 0..self.level_cell {
                        self.level_bar.set_state(i, CellState::Completed);
                    }
                } else {
                    self.log_line(
                        format!("SEED: {} - HOLDS: {}", status.seed, status.count),
                        Some(INFO_ACCENT),
                        Some(RUN_INFO_LIFETIME),
                    );
                }
                if let Some(hold_name) = &status.hold_name {
                    self.log_line(
                        format!("NEXT TARGET: {}", hold_name),
                        Some(INFO_ACCENT),
                        Some(RUN_INFO_LIFETIME),
                    );
                    self.log_line(
                        format!("{} HOLDS REMAINING", status.count - status.level),
                        Some(INFO_ACCENT),
                        Some(RUN_INFO_LIFETIME),
                    );
                }
            }
            "Hold" => {
                self.level_cell = cell_index(status.level * 2 + 1);
                self.level_bar.set_state(self.level_cell, CellState::Current);
                if self.level_cell > 0 {
                    self.level_bar
                        .set_state(self.level_cell - 1, CellState::Completed);
                }
            }
            "Complete" => {
                for i in 0..=self.level_cell + 1 {
                    self.level_bar.set_state(i, CellState::Completed);
                }
            }
            "Dead" => {
                self.level_bar.set_state(self.level_cell, CellState::Failed);
                self.phase_bar.set_state(self.hold_cell, CellState::Failed);
            }
            _ => {}
        }
    }

    fn handle_hold_phase(&mut self, status: &HoldPhaseStatus) {
        if !self.config.show_phase_bar {
            return;
        }
        if status.count >= 0 {
            self.phase_bar.set_length(status.count as usize);
        }
        self.hold_cell = cell_index(status.level);
        self.phase_bar.set_state(self.hold_cell, CellState::Current);
        if self.hold_cell > 0 {
            self.phase_bar
                .set_state(self.hold_cell - 1, CellState::Completed);
        }
    }

    fn handle_score(&mut self, now: Instant, status: &ScoreStatus) {
        if self.config.show_score_counter && status.score > self.score.value() {
            self.score.apply_score(now, status.score);
        }
        self.log_line(
            format!("{}: {}", status.value * status.mult, score_caption(status)),
            None,
            None,
        );
    }

    fn log_line(
        &mut self,
        text: impl Into<String>,
        accent: Option<&'static str>,
        lifetime: Option<Duration>,
    ) {
        if self.config.show_event_log {
            self.log.push(text, accent, lifetime);
        }
    }
}

fn cell_index(value: i32) -> usize {
    usize::try_from(value).unwrap_or(0)
}

/// Short display caption for a score event subtype.
fn score_caption(status: &ScoreStatus) -> String {
    match status.kind.as_str() {
        "HoldPhaseComplete" => "HOLD COMPLETED".to_string(),
        "HoldDecisecondsRemaining" => format!("TIME BONUS ({}s)", status.value / 10 / 5),
        "HoldWaveCompleteNoDamage" => "HITLESS WAVE".to_string(),
        "HoldPhaseCompleteNoDamage" => "HITLESS HOLD".to_string(),
        "HoldKill" => "KILL".to_string(),
        "HoldHeadshotKill" => "HEADSHOT".to_string(),
        "HoldMeleeKill" => "MELEE".to_string(),
        "HoldJointBreak" => "NECK SNAP".to_string(),
        "HoldJointSever" => "RIP & TEAR".to_string(),
        "HoldKillDistanceBonus" => {
            format!("LONG SHOT ({}m)", 25 * ((status.value as f64 / 50.0).round() as i64))
        }
        "HoldKillStreakBonus" => "MULTIKILL".to_string(),
        "TakeCompleteNoDamage" => "HITLESS TAKE".to_string(),
        "TakeCompleteNoAlert" | "TakeHoldPointTakenClean" => "NO ALERT".to_string(),
        "TakeKillGuardUnaware" => "STEALTH KILL".to_string(),
        _ => "UNKNOWN".to_string(),
    }
}
