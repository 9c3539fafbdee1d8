use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::catalog::SchemeCatalog;
use super::engine::{EligibilityEngine, EligibilityError, EngineConfig, EvaluationResult};
use super::guard::{ProfileGuard, ProfileViolation};
use super::profile::{Profile, ProfileId};
use super::repository::{ProfileRecord, ProfileRepository, RepositoryError};
use super::scheme::{SchemeRecord, SchemeStatus, SchemeType};

/// Service composing the profile guard, repository, catalog handle, and engine.
pub struct EligibilityService<R> {
    guard: Arc<ProfileGuard>,
    repository: Arc<R>,
    catalog: Arc<SchemeCatalog>,
    engine: Arc<EligibilityEngine>,
}

static PROFILE_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_profile_id() -> ProfileId {
    let id = PROFILE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ProfileId(format!("profile-{id:06}"))
}

/// Filters for catalog listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemeQuery {
    pub scheme_type: Option<SchemeType>,
    pub active_only: bool,
    pub limit: usize,
}

impl Default for SchemeQuery {
    fn default() -> Self {
        Self {
            scheme_type: None,
            active_only: true,
            limit: 50,
        }
    }
}

impl<R> EligibilityService<R>
where
    R: ProfileRepository + 'static,
{
    pub fn new(repository: Arc<R>, catalog: Arc<SchemeCatalog>, config: EngineConfig) -> Self {
        Self::with_engine(
            ProfileGuard::default(),
            repository,
            catalog,
            EligibilityEngine::new(config),
        )
    }

    pub fn with_engine(
        guard: ProfileGuard,
        repository: Arc<R>,
        catalog: Arc<SchemeCatalog>,
        engine: EligibilityEngine,
    ) -> Self {
        Self {
            guard: Arc::new(guard),
            repository,
            catalog,
            engine: Arc::new(engine),
        }
    }

    pub fn catalog(&self) -> &Arc<SchemeCatalog> {
        &self.catalog
    }

    /// Validate and store a new profile under a freshly issued identifier.
    pub fn create_profile(
        &self,
        profile: Profile,
    ) -> Result<ProfileRecord, EligibilityServiceError> {
        let profile = self.guard.admit(profile)?;
        let record = ProfileRecord::new(next_profile_id(), profile, Utc::now());
        let stored = self.repository.insert(record)?;
        info!(profile_id = stored.profile_id.as_str(), "profile created");
        Ok(stored)
    }

    pub fn get_profile(&self, id: &ProfileId) -> Result<ProfileRecord, EligibilityServiceError> {
        let record = self.repository.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Merge the supplied sections into the stored profile and re-validate.
    pub fn update_profile(
        &self,
        id: &ProfileId,
        changes: Profile,
    ) -> Result<ProfileRecord, EligibilityServiceError> {
        if changes.is_empty() {
            return Err(EligibilityServiceError::EmptyUpdate);
        }
        let mut record = self.get_profile(id)?;
        record.apply(changes, Utc::now());
        record.profile = self.guard.admit(record.profile)?;
        self.repository.update(record.clone())?;
        info!(
            profile_id = record.profile_id.as_str(),
            version = record.version,
            "profile updated"
        );
        Ok(record)
    }

    /// Page through stored profile ids.
    pub fn list_profiles(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<ProfileId>, EligibilityServiceError> {
        Ok(self.repository.list(offset, limit)?)
    }

    pub fn delete_profile(&self, id: &ProfileId) -> Result<(), EligibilityServiceError> {
        if self.repository.delete(id)? {
            info!(profile_id = id.as_str(), "profile deleted");
            Ok(())
        } else {
            Err(RepositoryError::NotFound.into())
        }
    }

    /// Evaluate a stored profile against the active catalog.
    pub fn evaluate(&self, id: &ProfileId) -> Result<EvaluationResult, EligibilityServiceError> {
        let record = self.get_profile(id)?;
        self.evaluate_profile(&record.profile)
    }

    /// Evaluate an inline profile without storing it.
    pub fn evaluate_profile(
        &self,
        profile: &Profile,
    ) -> Result<EvaluationResult, EligibilityServiceError> {
        match self.engine.evaluate(&self.catalog, profile) {
            Ok(result) => {
                info!(
                    profile_id = result.profile_id.as_str(),
                    matched = result.eligible().count(),
                    evaluated = result.total_schemes_evaluated,
                    seconds = result.processing_time_seconds,
                    "eligibility evaluation completed"
                );
                Ok(result)
            }
            Err(error) => {
                warn!(%error, "eligibility evaluation failed");
                Err(error.into())
            }
        }
    }

    pub fn schemes(&self, query: &SchemeQuery) -> Vec<SchemeRecord> {
        self.catalog
            .snapshot()
            .schemes()
            .iter()
            .filter(|scheme| {
                query
                    .scheme_type
                    .map_or(true, |wanted| scheme.scheme_type() == Some(wanted))
            })
            .filter(|scheme| !query.active_only || scheme.status() == SchemeStatus::Active)
            .take(query.limit)
            .map(|scheme| scheme.record().clone())
            .collect()
    }

    pub fn scheme(&self, scheme_id: &str) -> Option<SchemeRecord> {
        self.catalog
            .snapshot()
            .get(scheme_id)
            .map(|scheme| scheme.record().clone())
    }
}

/// Error raised by the eligibility service.
#[derive(Debug, thiserror::Error)]
pub enum EligibilityServiceError {
    #[error(transparent)]
    Profile(#[from] ProfileViolation),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Eligibility(#[from] EligibilityError),
    #[error("no updates provided")]
    EmptyUpdate,
}
