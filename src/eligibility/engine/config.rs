use std::time::Duration;

const DEFAULT_BASE_SCORE: f64 = 0.8;
const DEFAULT_BONUS_INCREMENT: f64 = 0.1;
const DEFAULT_DEFINITE_THRESHOLD: f64 = 0.9;
const DEFAULT_LIKELY_THRESHOLD: f64 = 0.7;
const DEFAULT_MAX_EVALUATION_TIME: Duration = Duration::from_secs(5);

/// Scoring weights and category cut-offs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringConfig {
    pub base_score: f64,
    pub bonus_increment: f64,
    pub definite_threshold: f64,
    pub likely_threshold: f64,
}

impl ScoringConfig {
    /// Replace non-finite or out-of-range dials with the defaults.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let unit = |value: f64, fallback: f64| {
            if value.is_finite() && (0.0..=1.0).contains(&value) {
                value
            } else {
                fallback
            }
        };

        let likely_threshold = unit(self.likely_threshold, defaults.likely_threshold);
        let definite_threshold = unit(self.definite_threshold, defaults.definite_threshold);

        Self {
            base_score: unit(self.base_score, defaults.base_score),
            bonus_increment: unit(self.bonus_increment, defaults.bonus_increment),
            definite_threshold: definite_threshold.max(likely_threshold),
            likely_threshold,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_score: DEFAULT_BASE_SCORE,
            bonus_increment: DEFAULT_BONUS_INCREMENT,
            definite_threshold: DEFAULT_DEFINITE_THRESHOLD,
            likely_threshold: DEFAULT_LIKELY_THRESHOLD,
        }
    }
}

/// Engine dials. The time budget is a hard ceiling on one evaluation call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    pub max_evaluation_time: Duration,
    pub scoring: ScoringConfig,
    /// Report failing schemes as "Not Eligible" after the eligible ones.
    pub report_ineligible: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_evaluation_time: DEFAULT_MAX_EVALUATION_TIME,
            scoring: ScoringConfig::default(),
            report_ineligible: false,
        }
    }
}
