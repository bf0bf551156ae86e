use crate::config::{GameConfig, MIN_TICK_INTERVAL_MS, SCORE_PER_SPEED_STEP, TICK_INTERVAL_STEP_MS};

/// Parameters of the score-to-interval curve.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct SpeedCurve {
    pub threshold: u32,
    pub step_ms: u64,
    pub floor_ms: u64,
}

impl Default for SpeedCurve {
    fn default() -> Self {
        Self {
            threshold: SCORE_PER_SPEED_STEP,
            step_ms: TICK_INTERVAL_STEP_MS,
            floor_ms: MIN_TICK_INTERVAL_MS,
        }
    }
}

impl From<&GameConfig> for SpeedCurve {
    fn from(config: &GameConfig) -> Self {
        Self {
            threshold: config.score_threshold,
            step_ms: config.speed_step_ms,
            floor_ms: config.min_speed_ms,
        }
    }
}

impl SpeedCurve {
    /// Returns the tick interval after the score has become `new_score`.
    ///
    /// Drops by one step when `new_score` lands on a threshold multiple and
    /// the interval is still above the floor. Never returns less than the floor.
    #[must_use]
    pub fn next_speed(self, current_ms: u64, new_score: u32) -> u64 {
        if self.threshold == 0 || new_score % self.threshold != 0 || current_ms <= self.floor_ms {
            return current_ms;
        }

        current_ms.saturating_sub(self.step_ms).max(self.floor_ms)
    }
}

/// [`SpeedCurve::next_speed`] with the default curve.
#[must_use]
pub fn next_speed(current_ms: u64, new_score: u32) -> u64 {
    SpeedCurve::default().next_speed(current_ms, new_score)
}
