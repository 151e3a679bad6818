//! Health bar: normalized fraction with an independent color flash.

use crate::models::event::HealthStatus;
use crate::overlay::animation::{Easing, Flash, FlashKind, Tween};
use std::time::{Duration, Instant};

const WIDTH_DURATION: Duration = Duration::from_millis(250);
const FLASH_DURATION: Duration = Duration::from_millis(750);

pub struct HealthBar {
    fraction: f32,
    width: Tween,
    flash: Option<Flash>,
}

impl HealthBar {
    pub fn new(now: Instant) -> Self {
        Self {
            fraction: 1.0,
            width: Tween::fixed(1.0, now, WIDTH_DURATION, Easing::OutBack(0.5)),
            flash: None,
        }
    }

    /// Committed (target) fraction in `[0, 1]`.
    pub fn fraction(&self) -> f32 {
        self.fraction
    }

    /// Recompute from a damage/heal event. A non-positive `maxHealth` cannot
    /// produce a fraction, so the event is ignored and prior state kept.
    pub fn apply_health(&mut self, now: Instant, status: &HealthStatus) {
        if status.max_health <= 0.0 {
            return;
        }
        self.set_fraction(now, (status.health / status.max_health) as f32);
    }

    /// `playerKill` forces the bar to zero regardless of prior value.
    pub fn kill(&mut self, now: Instant) {
        self.set_fraction(now, 0.0);
    }

    /// Scene reset restores a full bar.
    pub fn reset(&mut self, now: Instant) {
        self.set_fraction(now, 1.0);
    }

    fn set_fraction(&mut self, now: Instant, fraction: f32) {
        let fraction = fraction.clamp(0.0, 1.0);
        if fraction == self.fraction {
            return;
        }

        let kind = if fraction < self.fraction {
            FlashKind::Decrease
        } else {
            FlashKind::Increase
        };
        // The flash replaces any pulse still playing; it never blocks the
        // width tween.
        self.flash = Some(Flash::new(kind, now, FLASH_DURATION));

        self.width.retarget(now, fraction);
        self.fraction = fraction;
    }

    /// Animated bar width in `[0, 1]`-ish (easing may overshoot briefly).
    pub fn width_at(&self, now: Instant) -> f32 {
        self.width.value_at(now)
    }

    /// Currently playing flash, if any.
    pub fn flash_at(&self, now: Instant) -> Option<FlashKind> {
        self.flash
            .as_ref()
            .filter(|f| f.active_at(now))
            .map(|f| f.kind)
    }
}
