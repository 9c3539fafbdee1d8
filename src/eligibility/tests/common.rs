use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::response::Response;
use serde_json::Value;

use crate::eligibility::engine::{Clock, EligibilityEngine, EngineConfig};
use crate::eligibility::profile::{
    Caste, Demographics, Economic, EmploymentStatus, Family, Gender, Location, MaritalStatus,
    Profile, ProfileId,
};
use crate::eligibility::repository::{ProfileRecord, ProfileRepository, RepositoryError};
use crate::eligibility::scheme::{
    EligibilityCriteria, RangeBounds, SchemeRecord, SchemeStatus, SchemeType,
};
use crate::eligibility::{eligibility_router, EligibilityService, SchemeCatalog};

pub(super) fn farmer_profile() -> Profile {
    let mut location = Location::new("Maharashtra", "Pune", "Haveli", "Wagholi");
    location.pincode = Some("412207".to_string());
    location.rural = Some(true);
    Profile {
        profile_id: Some(ProfileId("citizen-001".to_string())),
        demographics: Some(Demographics::new(
            35,
            Gender::Male,
            Caste::Obc,
            MaritalStatus::Married,
        )),
        economic: Some(Economic::new(150_000, 1.5, EmploymentStatus::Farmer)),
        location: Some(location),
        family: Some(Family::new(4, 2)),
    }
}

pub(super) fn profile_with_income(annual_income: u64) -> Profile {
    let mut profile = farmer_profile();
    if let Some(economic) = profile.economic.as_mut() {
        economic.annual_income = Some(annual_income);
    }
    profile
}

pub(super) fn pm_kisan() -> SchemeRecord {
    SchemeRecord {
        scheme_id: "PM-KISAN".to_string(),
        name: "Pradhan Mantri Kisan Samman Nidhi".to_string(),
        description: String::new(),
        scheme_type: Some(SchemeType::Agriculture),
        benefit_amount: 6_000,
        benefit_frequency: None,
        implementing_agency: None,
        required_documents: vec!["Aadhaar Card".to_string()],
        status: SchemeStatus::Active,
        eligibility_criteria: EligibilityCriteria {
            land_ownership: Some(RangeBounds::between(0.1, 2.0)),
            employment_status: Some(vec![EmploymentStatus::Farmer]),
            annual_income: Some(RangeBounds::at_most(200_000.0)),
            ..EligibilityCriteria::default()
        },
    }
}

pub(super) fn scheme(id: &str, benefit_amount: u64, criteria: EligibilityCriteria) -> SchemeRecord {
    SchemeRecord {
        scheme_id: id.to_string(),
        name: format!("{id} scheme"),
        description: String::new(),
        scheme_type: None,
        benefit_amount,
        benefit_frequency: None,
        implementing_agency: None,
        required_documents: Vec::new(),
        status: SchemeStatus::Active,
        eligibility_criteria: criteria,
    }
}

pub(super) fn catalog_of(records: Vec<SchemeRecord>) -> SchemeCatalog {
    SchemeCatalog::from_records(records).expect("fixture catalog is valid")
}

pub(super) fn engine() -> EligibilityEngine {
    EligibilityEngine::new(EngineConfig::default())
}

pub(super) fn reporting_engine() -> EligibilityEngine {
    EligibilityEngine::new(EngineConfig {
        report_ineligible: true,
        ..EngineConfig::default()
    })
}

/// Clock that moves forward by a fixed step every time it is read.
pub(super) struct SteppingClock {
    current: Mutex<Instant>,
    step: Duration,
}

impl SteppingClock {
    pub(super) fn new(step: Duration) -> Self {
        Self {
            current: Mutex::new(Instant::now()),
            step,
        }
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> Instant {
        let mut current = self.current.lock().expect("clock mutex poisoned");
        let now = *current;
        *current += self.step;
        now
    }
}

pub(super) fn build_service() -> (EligibilityService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = EligibilityService::new(
        repository.clone(),
        Arc::new(SchemeCatalog::standard().expect("standard catalog is valid")),
        EngineConfig::default(),
    );
    (service, repository)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<ProfileId, ProfileRecord>>>,
}

impl ProfileRepository for MemoryRepository {
    fn insert(&self, record: ProfileRecord) -> Result<ProfileRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.profile_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.profile_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: ProfileRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.profile_id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &ProfileId) -> Result<Option<ProfileRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn delete(&self, id: &ProfileId) -> Result<bool, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.remove(id).is_some())
    }

    fn list(&self, offset: usize, limit: usize) -> Result<Vec<ProfileId>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut ids: Vec<ProfileId> = guard.keys().cloned().collect();
        ids.sort();
        Ok(ids.into_iter().skip(offset).take(limit).collect())
    }
}

pub(super) struct UnavailableRepository;

impl ProfileRepository for UnavailableRepository {
    fn insert(&self, _record: ProfileRecord) -> Result<ProfileRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: ProfileRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ProfileId) -> Result<Option<ProfileRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn delete(&self, _id: &ProfileId) -> Result<bool, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self, _offset: usize, _limit: usize) -> Result<Vec<ProfileId>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn router_with_service(service: EligibilityService<MemoryRepository>) -> axum::Router {
    eligibility_router(Arc::new(service))
}
