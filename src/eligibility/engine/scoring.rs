use serde::{Deserialize, Serialize};

use super::config::ScoringConfig;
use crate::eligibility::criteria::Criterion;

/// Coarse confidence bucket derived from the eligibility score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EligibilityCategory {
    #[serde(rename = "Definitely Eligible")]
    DefinitelyEligible,
    #[serde(rename = "Likely Eligible")]
    LikelyEligible,
    #[serde(rename = "Conditional")]
    Conditional,
    #[serde(rename = "Not Eligible")]
    NotEligible,
}

impl EligibilityCategory {
    pub fn from_score(score: f64, config: &ScoringConfig) -> Self {
        if score >= config.definite_threshold {
            EligibilityCategory::DefinitelyEligible
        } else if score >= config.likely_threshold {
            EligibilityCategory::LikelyEligible
        } else {
            EligibilityCategory::Conditional
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            EligibilityCategory::DefinitelyEligible => "Definitely Eligible",
            EligibilityCategory::LikelyEligible => "Likely Eligible",
            EligibilityCategory::Conditional => "Conditional",
            EligibilityCategory::NotEligible => "Not Eligible",
        }
    }
}

/// Base confidence plus one increment per explicitly listed criterion,
/// rounded to three places and clamped to [0, 1].
pub(crate) fn score(criteria: &[&Criterion], config: &ScoringConfig) -> f64 {
    let bonuses = criteria
        .iter()
        .filter(|criterion| criterion.earns_bonus())
        .count() as f64;
    let raw = config.base_score + bonuses * config.bonus_increment;
    ((raw * 1000.0).round() / 1000.0).clamp(0.0, 1.0)
}
