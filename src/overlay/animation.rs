//! Animation primitives for overlay widgets.
//!
//! Animations are plain time-bounded descriptors: a widget stores the tween
//! and reads the interpolated value when it renders. Retargeting restarts
//! from the value in flight, so a new event always cancels the previous
//! animation instead of queuing behind it.

use std::time::{Duration, Instant};

/// Easing curve applied to tween progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Linear,
    /// Overshoot-and-settle with the given back strength.
    OutBack(f32),
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::OutBack(s) => {
                let u = t - 1.0;
                1.0 + (s + 1.0) * u * u * u + s * u * u
            }
        }
    }
}

/// A single animated scalar.
#[derive(Debug, Clone)]
pub struct Tween {
    start: f32,
    target: f32,
    started: Instant,
    duration: Duration,
    easing: Easing,
}

impl Tween {
    /// A completed tween resting at `value`.
    pub fn fixed(value: f32, now: Instant, duration: Duration, easing: Easing) -> Self {
        Self {
            start: value,
            target: value,
            started: now - duration,
            duration,
            easing,
        }
    }

    /// Aim at a new target, starting from whatever value is in flight.
    pub fn retarget(&mut self, now: Instant, target: f32) {
        self.start = self.value_at(now);
        self.target = target;
        self.started = now;
    }

    pub fn value_at(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return self.target;
        }
        let elapsed = now.saturating_duration_since(self.started);
        let t = (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0);
        self.start + (self.target - self.start) * self.easing.apply(t)
    }

    pub fn is_complete(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= self.duration
    }
}

/// One-shot color pulse, independent of any value tween.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    /// Red tint, played on a decrease.
    Decrease,
    /// Green tint, played on an increase.
    Increase,
}

#[derive(Debug, Clone)]
pub struct Flash {
    pub kind: FlashKind,
    started: Instant,
    duration: Duration,
}

impl Flash {
    pub fn new(kind: FlashKind, now: Instant, duration: Duration) -> Self {
        Self {
            kind,
            started: now,
            duration,
        }
    }

    pub fn active_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) < self.duration
    }
}
