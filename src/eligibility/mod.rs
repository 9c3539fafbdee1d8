//! Welfare scheme eligibility matching.
//!
//! A [`SchemeCatalog`] holds the active set of scheme definitions and is swapped
//! wholesale on reload. The [`EligibilityEngine`] screens a [`Profile`] against a
//! catalog snapshot, scores and categorizes the matches, and ranks them by
//! benefit within a bounded time budget. The guard, repository, service, and
//! router layers wrap the engine for profile intake over HTTP.

pub mod catalog;
pub mod criteria;
pub mod engine;
pub mod guard;
pub mod profile;
pub mod repository;
pub mod router;
pub mod scheme;
pub mod service;

#[cfg(test)]
mod tests;

pub use catalog::{standard_schemes, CatalogError, CatalogLoad, CatalogSnapshot, SchemeCatalog};
pub use criteria::{CriteriaError, Criterion, Membership, NumericField, NumericRange, ProfileFlag};
pub use engine::{
    Clock, EligibilityCategory, EligibilityEngine, EligibilityError, EngineConfig,
    EvaluationResult, SchemeEligibility, ScoringConfig, SystemClock,
};
pub use guard::{ProfileGuard, ProfilePolicy, ProfileViolation};
pub use profile::{
    Caste, Demographics, Economic, EmploymentStatus, Family, FieldValue, Gender, Location,
    MaritalStatus, Profile, ProfileField, ProfileId,
};
pub use repository::{ProfileRecord, ProfileRepository, RepositoryError};
pub use router::eligibility_router;
pub use scheme::{
    EligibilityCriteria, RangeBounds, Scheme, SchemeDefinitionError, SchemeRecord, SchemeStatus,
    SchemeType,
};
pub use service::{EligibilityService, EligibilityServiceError, SchemeQuery};
