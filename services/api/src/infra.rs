use metrics_exporter_prometheus::PrometheusHandle;
use sarvasahay::config::EligibilityConfig;
use sarvasahay::eligibility::{
    ProfileId, ProfileRecord, ProfileRepository, RepositoryError, SchemeCatalog,
};
use sarvasahay::error::AppError;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) catalog: Arc<SchemeCatalog>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryProfileRepository {
    records: Arc<Mutex<HashMap<ProfileId, ProfileRecord>>>,
}

impl InMemoryProfileRepository {
    fn lock(&self) -> Result<MutexGuard<'_, HashMap<ProfileId, ProfileRecord>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("profile store lock poisoned".to_string()))
    }
}

impl ProfileRepository for InMemoryProfileRepository {
    fn insert(&self, record: ProfileRecord) -> Result<ProfileRecord, RepositoryError> {
        let mut guard = self.lock()?;
        if guard.contains_key(&record.profile_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.profile_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: ProfileRecord) -> Result<(), RepositoryError> {
        let mut guard = self.lock()?;
        if guard.contains_key(&record.profile_id) {
            guard.insert(record.profile_id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &ProfileId) -> Result<Option<ProfileRecord>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.get(id).cloned())
    }

    fn delete(&self, id: &ProfileId) -> Result<bool, RepositoryError> {
        let mut guard = self.lock()?;
        Ok(guard.remove(id).is_some())
    }

    fn list(&self, offset: usize, limit: usize) -> Result<Vec<ProfileId>, RepositoryError> {
        let guard = self.lock()?;
        let mut ids: Vec<ProfileId> = guard.keys().cloned().collect();
        ids.sort();
        Ok(ids.into_iter().skip(offset).take(limit).collect())
    }
}

/// Catalog from the explicit path, the configured path, or the standard schemes.
pub(crate) fn load_catalog(
    config: &EligibilityConfig,
    path_override: Option<&Path>,
) -> Result<SchemeCatalog, AppError> {
    match path_override.or(config.catalog_path.as_deref()) {
        Some(path) => {
            let catalog = SchemeCatalog::from_path(path)?;
            info!(path = %path.display(), schemes = catalog.count(), "scheme catalog loaded");
            Ok(catalog)
        }
        None => Ok(SchemeCatalog::standard()?),
    }
}
