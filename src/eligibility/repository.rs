use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::profile::{Profile, ProfileId};

/// Stored profile plus audit metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub profile_id: ProfileId,
    pub profile: Profile,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub version: u32,
}

impl ProfileRecord {
    pub fn new(profile_id: ProfileId, mut profile: Profile, now: DateTime<Utc>) -> Self {
        profile.profile_id = Some(profile_id.clone());
        Self {
            profile_id,
            profile,
            created_at: now,
            updated_at: now,
            version: 1,
        }
    }

    /// Overwrite the sections present in `changes`, keeping the rest.
    pub fn apply(&mut self, changes: Profile, now: DateTime<Utc>) {
        let Profile {
            demographics,
            economic,
            location,
            family,
            ..
        } = changes;

        if demographics.is_some() {
            self.profile.demographics = demographics;
        }
        if economic.is_some() {
            self.profile.economic = economic;
        }
        if location.is_some() {
            self.profile.location = location;
        }
        if family.is_some() {
            self.profile.family = family;
        }
        self.updated_at = now;
        self.version += 1;
    }
}

/// Storage abstraction so the service can be exercised without a database.
pub trait ProfileRepository: Send + Sync {
    fn insert(&self, record: ProfileRecord) -> Result<ProfileRecord, RepositoryError>;
    fn update(&self, record: ProfileRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ProfileId) -> Result<Option<ProfileRecord>, RepositoryError>;
    fn delete(&self, id: &ProfileId) -> Result<bool, RepositoryError>;
    /// Stored ids in ascending order, skipping `offset` and returning at most `limit`.
    fn list(&self, offset: usize, limit: usize) -> Result<Vec<ProfileId>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
