//! Integration specifications for profile intake, catalog reloads, and eligibility evaluation.
//!
//! Scenarios drive the public service facade and HTTP router only, so catalog swaps,
//! ranking, and error mapping are validated the way a caller experiences them.

mod common {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use sarvasahay::eligibility::{
        Caste, Demographics, Economic, EligibilityService, EmploymentStatus, EngineConfig, Family,
        Gender, Location, MaritalStatus, Profile, ProfileId, ProfileRecord, ProfileRepository,
        RepositoryError, SchemeCatalog,
    };

    pub(super) fn landless_laborer() -> Profile {
        let mut location = Location::new("Bihar", "Gaya", "Bodh Gaya", "Bakraur");
        location.rural = Some(true);
        Profile {
            profile_id: None,
            demographics: Some(Demographics::new(
                42,
                Gender::Female,
                Caste::Sc,
                MaritalStatus::Widowed,
            )),
            economic: Some(Economic::new(60_000, 0.0, EmploymentStatus::Laborer)),
            location: Some(location),
            family: Some(Family::new(3, 2)),
        }
    }

    #[derive(Default)]
    pub(super) struct InMemoryProfiles {
        records: Mutex<HashMap<ProfileId, ProfileRecord>>,
    }

    impl ProfileRepository for InMemoryProfiles {
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

    pub(super) fn service() -> Arc<EligibilityService<InMemoryProfiles>> {
        Arc::new(EligibilityService::new(
            Arc::new(InMemoryProfiles::default()),
            Arc::new(SchemeCatalog::standard().expect("standard catalog is valid")),
            EngineConfig::default(),
        ))
    }
}

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use sarvasahay::eligibility::{eligibility_router, EligibilityCategory};
use serde_json::{json, Value};
use tower::ServiceExt;

#[test]
fn laborer_matches_employment_housing_and_health_schemes() {
    let service = common::service();
    let record = service
        .create_profile(common::landless_laborer())
        .expect("profile admitted");

    let result = service.evaluate(&record.profile_id).expect("evaluates");

    let matched: Vec<_> = result
        .results
        .iter()
        .map(|entry| (entry.scheme_id.as_str(), entry.category))
        .collect();
    assert_eq!(
        matched,
        vec![
            ("PMJAY", EligibilityCategory::LikelyEligible),
            ("PMAY", EligibilityCategory::DefinitelyEligible),
            ("MGNREGA", EligibilityCategory::LikelyEligible),
        ]
    );
    assert_eq!(result.total_schemes_evaluated, 4);
    assert!(result.processing_time_seconds < 5.0);
}

#[test]
fn failed_reload_keeps_serving_previous_catalog() {
    let service = common::service();
    let profile = common::landless_laborer();
    let before = service.evaluate_profile(&profile).expect("evaluates");

    let error = service
        .catalog()
        .load(json!({"scheme_id": "NOT-A-LIST"}))
        .expect_err("document must be a list");
    assert!(error.to_string().contains("must be a list"));

    let after = service.evaluate_profile(&profile).expect("evaluates");
    assert_eq!(before.results, after.results);
}

#[tokio::test]
async fn http_round_trip_creates_and_evaluates_profile() {
    let service = common::service();
    let router = eligibility_router(service);

    let created = router
        .clone()
        .oneshot(
            Request::post("/api/v1/profiles")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    serde_json::to_vec(&common::landless_laborer()).unwrap(),
                ))
                .unwrap(),
        )
        .await
        .expect("route executes");
    assert_eq!(created.status(), StatusCode::CREATED);
    let body = axum::body::to_bytes(created.into_body(), 64 * 1024)
        .await
        .expect("read body");
    let record: Value = serde_json::from_slice(&body).expect("json payload");
    let profile_id = record["profile_id"].as_str().expect("issued id").to_string();

    let evaluated = router
        .oneshot(
            Request::post(format!("/api/v1/eligibility/evaluate/{profile_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");
    assert_eq!(evaluated.status(), StatusCode::OK);
    let body = axum::body::to_bytes(evaluated.into_body(), 64 * 1024)
        .await
        .expect("read body");
    let payload: Value = serde_json::from_slice(&body).expect("json payload");
    assert_eq!(payload["profile_id"], json!(profile_id));
    assert_eq!(payload["results"].as_array().map(Vec::len), Some(3));
    assert_eq!(payload["results"][1]["eligibility_score"], json!(0.9));
}
