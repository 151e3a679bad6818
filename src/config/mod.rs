//! Application configuration loaded from environment.

use std::net::SocketAddr;
use std::time::Duration;

/// Server configuration loaded from `.env` and environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address for the WebSocket/HTTP endpoint (e.g. `127.0.0.1:9504`).
    pub server_addr: SocketAddr,
    /// Log level: `error`, `warn`, `info`, `debug`, `trace`.
    pub log_level: String,
    /// Scheduling quantum for ammo-event coalescing.
    pub ammo_coalesce: Duration,
}

impl ServerConfig {
    /// Load configuration from environment. Call `dotenvy::dotenv().ok()` before this.
    pub fn from_env() -> Result<Self, ConfigLoadError> {
        let server_addr = std::env::var("STATUSCAST_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:9504".to_string());
        let server_addr: SocketAddr = server_addr
            .parse()
            .map_err(|_| ConfigLoadError::InvalidServerAddr)?;

        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let ammo_coalesce = Duration::from_millis(env_parse("AMMO_COALESCE_MS", 50));

        Ok(Self {
            server_addr,
            log_level,
            ammo_coalesce,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("Invalid STATUSCAST_ADDR")]
    InvalidServerAddr,
}

/// Overlay configuration: widget toggles and tunables, static at load.
/// Malformed values fall back to their defaults; nothing re-validates at
/// render time.
#[derive(Debug, Clone)]
pub struct OverlayConfig {
    /// Server port the overlay connects to.
    pub port: u16,
    pub scale: f32,

    pub show_score_panel: bool,
    pub show_event_log: bool,
    pub show_score_counter: bool,
    pub show_health: bool,
    pub show_level_bar: bool,
    pub show_phase_bar: bool,

    /// Visible entry cap for the event log.
    pub event_log_length: usize,
    /// Default lifetime of a visible log entry, seconds.
    pub event_log_lifetime: f32,
    /// Pause between dequeues into the visible log, seconds (floor 0.1).
    pub event_log_delay: f32,
    /// Stop dequeuing at capacity instead of evicting the oldest entry.
    pub pause_event_log: bool,
    pub score_counter_digits: usize,

    pub show_ammo_panel: bool,
    pub show_weapon_name: bool,
    pub show_ammo_counter: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            port: 9504,
            scale: 1.0,
            show_score_panel: true,
            show_event_log: true,
            show_score_counter: true,
            show_health: true,
            show_level_bar: true,
            show_phase_bar: true,
            event_log_length: 6,
            event_log_lifetime: 4.0,
            event_log_delay: 0.1,
            pause_event_log: false,
            score_counter_digits: 7,
            show_ammo_panel: true,
            show_weapon_name: true,
            show_ammo_counter: true,
        }
    }
}

impl OverlayConfig {
    /// Load overlay settings from environment over the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            port: env_parse("OVERLAY_PORT", defaults.port),
            scale: env_parse("OVERLAY_SCALE", defaults.scale),
            show_score_panel: env_bool("OVERLAY_SHOW_SCORE_PANEL", defaults.show_score_panel),
            show_event_log: env_bool("OVERLAY_SHOW_EVENT_LOG", defaults.show_event_log),
            show_score_counter: env_bool(
                "OVERLAY_SHOW_SCORE_COUNTER",
                defaults.show_score_counter,
            ),
            show_health: env_bool("OVERLAY_SHOW_HEALTH", defaults.show_health),
            show_level_bar: env_bool("OVERLAY_SHOW_LEVEL_BAR", defaults.show_level_bar),
            show_phase_bar: env_bool("OVERLAY_SHOW_PHASE_BAR", defaults.show_phase_bar),
            event_log_length: env_parse("OVERLAY_EVENT_LOG_LENGTH", defaults.event_log_length),
            event_log_lifetime: env_parse(
                "OVERLAY_EVENT_LOG_LIFETIME",
                defaults.event_log_lifetime,
            ),
            event_log_delay: env_parse("OVERLAY_EVENT_LOG_DELAY", defaults.event_log_delay),
            pause_event_log: env_bool("OVERLAY_PAUSE_EVENT_LOG", defaults.pause_event_log),
            score_counter_digits: env_parse(
                "OVERLAY_SCORE_COUNTER_DIGITS",
                defaults.score_counter_digits,
            ),
            show_ammo_panel: env_bool("OVERLAY_SHOW_AMMO_PANEL", defaults.show_ammo_panel),
            show_weapon_name: env_bool("OVERLAY_SHOW_WEAPON_NAME", defaults.show_weapon_name),
            show_ammo_counter: env_bool("OVERLAY_SHOW_AMMO_COUNTER", defaults.show_ammo_counter),
        }
        .cascaded()
    }

    /// Disabled panels disable their child widgets.
    pub fn cascaded(mut self) -> Self {
        if !self.show_score_panel {
            self.show_event_log = false;
            self.show_score_counter = false;
            self.show_health = false;
            self.show_level_bar = false;
            self.show_phase_bar = false;
        }
        if !self.show_ammo_panel {
            self.show_weapon_name = false;
            self.show_ammo_counter = false;
        }
        self
    }

    /// Dequeue cadence for the event log, floored at 100ms.
    pub fn event_log_delay_duration(&self) -> Duration {
        Duration::from_secs_f32(self.event_log_delay.max(0.1))
    }

    /// Default lifetime for visible log entries.
    pub fn event_log_lifetime_duration(&self) -> Duration {
        Duration::from_secs_f32(self.event_log_lifetime.max(0.0))
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_bool(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(v) => matches!(v.as_str(), "1" | "true" | "yes" | "on"),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_panel_cascade_disables_children() {
        let config = OverlayConfig {
            show_score_panel: false,
            ..OverlayConfig::default()
        }
        .cascaded();
        assert!(!config.show_event_log);
        assert!(!config.show_score_counter);
        assert!(!config.show_health);
        assert!(!config.show_level_bar);
        assert!(!config.show_phase_bar);
        // Ammo panel is independent of the score panel.
        assert!(config.show_ammo_counter);
    }

    #[test]
    fn ammo_panel_cascade_disables_children() {
        let config = OverlayConfig {
            show_ammo_panel: false,
            ..OverlayConfig::default()
        }
        .cascaded();
        assert!(!config.show_weapon_name);
        assert!(!config.show_ammo_counter);
        assert!(config.show_score_counter);
    }

    #[test]
    fn event_log_delay_is_floored() {
        let config = OverlayConfig {
            event_log_delay: 0.0,
            ..OverlayConfig::default()
        };
        assert_eq!(config.event_log_delay_duration(), Duration::from_millis(100));
    }
}
