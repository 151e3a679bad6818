//! Timed buff indicators: transient particle effects tied to a widget.

use crate::models::event::BuffStatus;
use std::time::{Duration, Instant};

/// Widget element a buff's particle effect attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuffTarget {
    AmmoCounter,
    HealthBar,
    ScorePanel,
}

#[derive(Debug, Clone)]
pub struct ActiveBuff {
    pub kind: String,
    pub target: BuffTarget,
    pub accent: &'static str,
    expires: Instant,
}

/// Log line a buff application produces.
#[derive(Debug, Clone)]
pub struct BuffCaption {
    pub text: String,
    pub accent: Option<&'static str>,
    pub lifetime: Option<Duration>,
}

/// Known buff kinds: target element, accent color, log caption.
fn style_of(kind: &str) -> Option<(BuffTarget, &'static str, &'static str)> {
    match kind {
        "QuadDamage" => Some((BuffTarget::AmmoCounter, "#f8f", "BULLET BOOST")),
        "InfiniteAmmo" => Some((BuffTarget::AmmoCounter, "#4f8", "INFINITE AMMO")),
        "Regen" => Some((BuffTarget::HealthBar, "#4f8", "REGEN")),
        "Invincibility" => Some((BuffTarget::HealthBar, "#fc4", "SHIELD")),
        "Ghosted" => Some((BuffTarget::HealthBar, "#8cf", "GHOST")),
        "MuscleMeat" => Some((BuffTarget::ScorePanel, "#f84", "MUSCLEMEAT")),
        "Cyclops" => Some((BuffTarget::ScorePanel, "#f66", "CYCLOPS")),
        _ => None,
    }
}

fn format_seconds(seconds: f32) -> String {
    if seconds.fract() == 0.0 {
        format!("{}", seconds as i64)
    } else {
        format!("{}", seconds)
    }
}

/// Tracks running buff effects. Expiry is natural: effects drop out on the
/// next tick past their deadline, no cancel API.
pub struct BuffIndicators {
    active: Vec<ActiveBuff>,
}

impl BuffIndicators {
    pub fn new() -> Self {
        Self { active: Vec::new() }
    }

    /// Apply a buff event. Returns the log line to show, if any. Known kinds
    /// also start a particle effect on their target; unknown kinds log a
    /// generic line with no visual; `Health` pickups are not shown at all.
    pub fn apply(&mut self, now: Instant, status: &BuffStatus) -> Option<BuffCaption> {
        if status.kind == "Health" {
            return None;
        }

        let seconds = status.duration.seconds().max(0.0);
        let duration = Duration::from_secs_f32(seconds);

        match style_of(&status.kind) {
            Some((target, accent, caption)) => {
                self.active.push(ActiveBuff {
                    kind: status.kind.clone(),
                    target,
                    accent,
                    expires: now + duration,
                });
                Some(BuffCaption {
                    text: format!("{} ({}s)", caption, format_seconds(seconds)),
                    accent: Some(accent),
                    lifetime: Some(duration),
                })
            }
            None => Some(BuffCaption {
                text: format!("{} ({}s)", status.kind, format_seconds(seconds)),
                accent: None,
                lifetime: None,
            }),
        }
    }

    /// Drop expired effects.
    pub fn tick(&mut self, now: Instant) {
        self.active.retain(|b| b.expires > now);
    }

    /// Effects currently emitting particles.
    pub fn active(&self) -> &[ActiveBuff] {
        &self.active
    }
}

impl Default for BuffIndicators {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::{BuffDuration, DurationClass};

    fn buff(kind: &str, duration: BuffDuration) -> BuffStatus {
        BuffStatus {
            kind: kind.to_string(),
            duration,
            inverted: false,
        }
    }

    #[test]
    fn known_buff_targets_its_widget_and_logs() {
        let now = Instant::now();
        let mut buffs = BuffIndicators::new();
        let caption = buffs
            .apply(now, &buff("Regen", BuffDuration::Class(DurationClass::Full)))
            .unwrap();
        assert_eq!(caption.text, "REGEN (30s)");
        assert_eq!(caption.accent, Some("#4f8"));
        assert_eq!(caption.lifetime, Some(Duration::from_secs(30)));
        assert_eq!(buffs.active().len(), 1);
        assert_eq!(buffs.active()[0].target, BuffTarget::HealthBar);
    }

    #[test]
    fn override_duration_wins_over_class() {
        let now = Instant::now();
        let mut buffs = BuffIndicators::new();
        let caption = buffs
            .apply(now, &buff("QuadDamage", BuffDuration::Seconds(7.5)))
            .unwrap();
        assert_eq!(caption.text, "BULLET BOOST (7.5s)");
        assert_eq!(caption.lifetime, Some(Duration::from_secs_f32(7.5)));
    }

    #[test]
    fn unknown_buff_logs_generic_line_with_no_visual() {
        let now = Instant::now();
        let mut buffs = BuffIndicators::new();
        let caption = buffs
            .apply(now, &buff("Chaos", BuffDuration::Class(DurationClass::Blip)))
            .unwrap();
        assert_eq!(caption.text, "Chaos (2s)");
        assert_eq!(caption.accent, None);
        assert_eq!(caption.lifetime, None);
        assert!(buffs.active().is_empty());
    }

    #[test]
    fn health_pickup_is_silent() {
        let now = Instant::now();
        let mut buffs = BuffIndicators::new();
        let caption = buffs.apply(now, &buff("Health", BuffDuration::Seconds(1.0)));
        assert!(caption.is_none());
        assert!(buffs.active().is_empty());
    }

    #[test]
    fn effects_expire_naturally() {
        let now = Instant::now();
        let mut buffs = BuffIndicators::new();
        buffs.apply(
            now,
            &buff("Cyclops", BuffDuration::Class(DurationClass::VeryShort)),
        );
        buffs.tick(now + Duration::from_secs(9));
        assert_eq!(buffs.active().len(), 1);
        buffs.tick(now + Duration::from_secs(10));
        assert!(buffs.active().is_empty());
    }
}
