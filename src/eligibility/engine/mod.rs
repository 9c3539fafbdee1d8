mod config;
mod ranking;
mod rules;
mod scoring;

pub use config::{EngineConfig, ScoringConfig};
pub use scoring::EligibilityCategory;

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::catalog::{CatalogSnapshot, SchemeCatalog};
use super::profile::{Profile, ProfileId};
use super::scheme::{Scheme, SchemeStatus};
use rules::{ResolvedCriterion, Screening};

const ANONYMOUS_PROFILE: &str = "anonymous";

/// Errors that abort an evaluation call. No partial result accompanies them.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EligibilityError {
    #[error("profile cannot be empty")]
    EmptyProfile,
    #[error("missing required profile field {field} (referenced by scheme {scheme_id})")]
    MissingProfileField {
        field: &'static str,
        scheme_id: String,
    },
    #[error(
        "evaluation took {elapsed:?}, exceeding the {limit:?} limit after {evaluated} scheme(s)"
    )]
    TimeBudgetExceeded {
        elapsed: Duration,
        limit: Duration,
        evaluated: usize,
    },
}

/// Source of monotonic time for the evaluation deadline.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Outcome for one scheme, with the reasoning trail behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemeEligibility {
    pub scheme_id: String,
    pub scheme_name: String,
    pub benefit_amount: u64,
    pub eligibility_score: f64,
    pub category: EligibilityCategory,
    pub reasons: Vec<String>,
    pub required_actions: Vec<String>,
}

impl SchemeEligibility {
    pub fn is_eligible(&self) -> bool {
        self.category != EligibilityCategory::NotEligible
    }
}

/// Ranked result of evaluating one profile against the whole catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub profile_id: ProfileId,
    pub total_schemes_evaluated: usize,
    pub results: Vec<SchemeEligibility>,
    pub processing_time_seconds: f64,
}

impl EvaluationResult {
    pub fn eligible(&self) -> impl Iterator<Item = &SchemeEligibility> {
        self.results.iter().filter(|result| result.is_eligible())
    }

    pub fn total_benefit(&self) -> u64 {
        self.eligible().map(|result| result.benefit_amount).sum()
    }

    pub fn summary(&self) -> String {
        let eligible = self.eligible().count();
        if eligible == 0 {
            format!(
                "no eligible schemes among {} evaluated",
                self.total_schemes_evaluated
            )
        } else {
            format!(
                "eligible for {} of {} schemes worth {} in total",
                eligible,
                self.total_schemes_evaluated,
                self.total_benefit()
            )
        }
    }
}

/// Stateless evaluator; the catalog is supplied per call.
pub struct EligibilityEngine {
    config: EngineConfig,
    clock: Arc<dyn Clock>,
}

impl EligibilityEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: EngineConfig, clock: Arc<dyn Clock>) -> Self {
        let config = EngineConfig {
            scoring: config.scoring.sanitized(),
            ..config
        };
        Self { config, clock }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Evaluate against whichever catalog version is active when the call starts.
    pub fn evaluate(
        &self,
        catalog: &SchemeCatalog,
        profile: &Profile,
    ) -> Result<EvaluationResult, EligibilityError> {
        let snapshot = catalog.snapshot();
        self.evaluate_snapshot(&snapshot, profile)
    }

    /// Screen every active scheme in catalog order. Inactive, suspended, and
    /// discontinued schemes still count towards `total_schemes_evaluated` but
    /// never appear in the results.
    pub fn evaluate_snapshot(
        &self,
        catalog: &CatalogSnapshot,
        profile: &Profile,
    ) -> Result<EvaluationResult, EligibilityError> {
        if profile.is_empty() {
            return Err(EligibilityError::EmptyProfile);
        }

        let started = self.clock.now();
        let mut eligible = Vec::new();
        let mut ineligible = Vec::new();

        for (evaluated, scheme) in catalog.schemes().iter().enumerate() {
            self.check_deadline(started, evaluated)?;
            if scheme.status() != SchemeStatus::Active {
                continue;
            }

            match rules::screen(profile, scheme)? {
                Screening::Eligible(resolved) => {
                    eligible.push(self.eligible_result(scheme, &resolved));
                }
                Screening::Ineligible(resolved) if self.config.report_ineligible => {
                    ineligible.push(ineligible_result(scheme, &resolved));
                }
                Screening::Ineligible(_) => {}
            }
        }

        ranking::rank_by_benefit(&mut eligible);
        ranking::rank_by_benefit(&mut ineligible);
        eligible.append(&mut ineligible);

        let elapsed = self.check_deadline(started, catalog.len())?;

        let profile_id = profile
            .profile_id
            .clone()
            .unwrap_or_else(|| ProfileId(ANONYMOUS_PROFILE.to_string()));
        debug!(
            profile_id = profile_id.as_str(),
            catalog_version = catalog.version(),
            schemes = catalog.len(),
            matched = eligible.iter().filter(|result| result.is_eligible()).count(),
            elapsed_ms = elapsed.as_millis() as u64,
            "eligibility evaluated"
        );

        Ok(EvaluationResult {
            profile_id,
            total_schemes_evaluated: catalog.len(),
            results: eligible,
            processing_time_seconds: elapsed.as_secs_f64(),
        })
    }

    fn check_deadline(
        &self,
        started: Instant,
        evaluated: usize,
    ) -> Result<Duration, EligibilityError> {
        let elapsed = self.clock.now().saturating_duration_since(started);
        let limit = self.config.max_evaluation_time;
        if elapsed > limit {
            warn!(
                elapsed_ms = elapsed.as_millis() as u64,
                limit_ms = limit.as_millis() as u64,
                evaluated,
                "eligibility evaluation exceeded time budget"
            );
            return Err(EligibilityError::TimeBudgetExceeded {
                elapsed,
                limit,
                evaluated,
            });
        }
        Ok(elapsed)
    }

    fn eligible_result(
        &self,
        scheme: &Scheme,
        resolved: &[ResolvedCriterion<'_>],
    ) -> SchemeEligibility {
        let scoring = &self.config.scoring;
        let criteria: Vec<_> = resolved.iter().map(|entry| entry.criterion).collect();
        let eligibility_score = scoring::score(&criteria, scoring);
        let category = EligibilityCategory::from_score(eligibility_score, scoring);

        let required_actions = if category == EligibilityCategory::Conditional {
            scheme
                .required_documents()
                .iter()
                .map(|document| format!("Submit {document}"))
                .collect()
        } else {
            Vec::new()
        };

        SchemeEligibility {
            scheme_id: scheme.id().to_string(),
            scheme_name: scheme.name().to_string(),
            benefit_amount: scheme.benefit_amount(),
            eligibility_score,
            category,
            reasons: rules::met_reasons(resolved),
            required_actions,
        }
    }
}

fn ineligible_result(scheme: &Scheme, resolved: &[ResolvedCriterion<'_>]) -> SchemeEligibility {
    let (reasons, required_actions) = rules::unmet(resolved);
    SchemeEligibility {
        scheme_id: scheme.id().to_string(),
        scheme_name: scheme.name().to_string(),
        benefit_amount: scheme.benefit_amount(),
        eligibility_score: 0.0,
        category: EligibilityCategory::NotEligible,
        reasons,
        required_actions,
    }
}
