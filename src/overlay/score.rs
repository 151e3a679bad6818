//! Score counter: monotonic rolling digit columns.

use crate::overlay::animation::{Easing, Tween};
use std::time::{Duration, Instant};

const ROLL_DURATION: Duration = Duration::from_millis(250);
const ROLL_EASING: Easing = Easing::OutBack(0.5);

/// Digit-column display. The committed value never decreases except through
/// [`ScoreCounter::reset`]; columns are appended when the value outgrows the
/// allocated digit count. Column `i` animates toward `value / 10^i`, so the
/// render layer shows `column % 10` on each digit strip.
pub struct ScoreCounter {
    value: i64,
    columns: Vec<Tween>,
}

impl ScoreCounter {
    pub fn new(digits: usize, now: Instant) -> Self {
        let digits = digits.max(1);
        let columns = (0..digits)
            .map(|_| Tween::fixed(0.0, now, ROLL_DURATION, ROLL_EASING))
            .collect();
        Self { value: 0, columns }
    }

    /// Committed (target) score.
    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn digits(&self) -> usize {
        self.columns.len()
    }

    /// Apply a score event: only an increase moves the display.
    pub fn apply_score(&mut self, now: Instant, score: i64) {
        if score > self.value {
            self.set_value(now, score);
        }
    }

    /// Scene reset: force the display back to zero.
    pub fn reset(&mut self, now: Instant) {
        self.set_value(now, 0);
    }

    fn set_value(&mut self, now: Instant, value: i64) {
        let digits = decimal_digits(value);
        while self.columns.len() < digits {
            self.columns
                .push(Tween::fixed(0.0, now, ROLL_DURATION, ROLL_EASING));
        }

        let mut divisor = 1i64;
        for column in &mut self.columns {
            column.retarget(now, (value / divisor) as f32);
            divisor = divisor.saturating_mul(10);
        }
        self.value = value;
    }

    /// Animated column positions, least significant first.
    pub fn columns_at(&self, now: Instant) -> Vec<f32> {
        self.columns.iter().map(|c| c.value_at(now)).collect()
    }

    /// Displayed integer value, for renderers that don't roll digits.
    pub fn displayed_at(&self, now: Instant) -> i64 {
        self.columns
            .first()
            .map(|c| c.value_at(now).round() as i64)
            .unwrap_or(0)
    }
}

fn decimal_digits(value: i64) -> usize {
    let mut digits = 1;
    let mut v = value / 10;
    while v > 0 {
        digits += 1;
        v /= 10;
    }
    digits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_only_moves_upward() {
        let now = Instant::now();
        let mut counter = ScoreCounter::new(7, now);
        counter.apply_score(now, 9000);
        assert_eq!(counter.value(), 9000);
        counter.apply_score(now, 4500);
        assert_eq!(counter.value(), 9000);
        counter.apply_score(now, 9001);
        assert_eq!(counter.value(), 9001);
    }

    #[test]
    fn reset_forces_zero() {
        let now = Instant::now();
        let mut counter = ScoreCounter::new(7, now);
        counter.apply_score(now, 123456);
        counter.reset(now);
        assert_eq!(counter.value(), 0);
    }

    #[test]
    fn columns_expand_past_configured_digits() {
        let now = Instant::now();
        let mut counter = ScoreCounter::new(2, now);
        assert_eq!(counter.digits(), 2);
        counter.apply_score(now, 12345);
        assert_eq!(counter.digits(), 5);
        // Columns never shrink, even through a reset.
        counter.reset(now);
        assert_eq!(counter.digits(), 5);
    }

    #[test]
    fn display_animates_from_zero_to_target() {
        let now = Instant::now();
        let mut counter = ScoreCounter::new(7, now);
        counter.apply_score(now, 9000);
        assert_eq!(counter.displayed_at(now), 0);
        let settled = now + Duration::from_secs(1);
        assert_eq!(counter.displayed_at(settled), 9000);
        let columns = counter.columns_at(settled);
        assert_eq!(columns[3].round() as i64, 9);
    }
}
