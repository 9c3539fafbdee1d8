use super::profile::{Demographics, Economic, Family, Location, Profile};

/// Validation errors raised when a profile submission is not storable.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileViolation {
    #[error("missing required section: {0}")]
    MissingSection(&'static str),
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("age must be between 0 and {max} (found {found})")]
    AgeOutOfRange { found: u8, max: u8 },
    #[error("land ownership must be a non-negative number of acres")]
    InvalidLandOwnership,
    #[error("family size must be between 1 and {max} (found {found})")]
    FamilySizeOutOfRange { found: u8, max: u8 },
    #[error("dependents ({dependents}) must be fewer than family size ({size})")]
    DependentsExceedFamily { dependents: u8, size: u8 },
    #[error("{field} must be between {min} and {max} characters")]
    TextLength {
        field: &'static str,
        min: usize,
        max: usize,
    },
    #[error("pincode must be exactly six digits (found {0:?})")]
    InvalidPincode(String),
}

const DEFAULT_MAX_AGE: u8 = 150;
const DEFAULT_MAX_FAMILY_SIZE: u8 = 20;
const TEXT_MIN_CHARS: usize = 2;
const TEXT_MAX_CHARS: usize = 50;
const PINCODE_DIGITS: usize = 6;

/// Bounds enforced at intake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfilePolicy {
    pub max_age: u8,
    pub max_family_size: u8,
}

impl Default for ProfilePolicy {
    fn default() -> Self {
        Self {
            max_age: DEFAULT_MAX_AGE,
            max_family_size: DEFAULT_MAX_FAMILY_SIZE,
        }
    }
}

/// Guard responsible for admitting complete, well-formed profiles.
#[derive(Debug, Clone, Default)]
pub struct ProfileGuard {
    policy: ProfilePolicy,
}

impl ProfileGuard {
    pub fn with_policy(policy: ProfilePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ProfilePolicy {
        &self.policy
    }

    /// Check a submission, trimming free-text location fields on the way.
    pub fn admit(&self, mut profile: Profile) -> Result<Profile, ProfileViolation> {
        let demographics = profile
            .demographics
            .as_ref()
            .ok_or(ProfileViolation::MissingSection("demographics"))?;
        let economic = profile
            .economic
            .as_ref()
            .ok_or(ProfileViolation::MissingSection("economic"))?;
        let family = profile
            .family
            .as_ref()
            .ok_or(ProfileViolation::MissingSection("family"))?;
        let location = profile
            .location
            .as_mut()
            .ok_or(ProfileViolation::MissingSection("location"))?;

        self.check_demographics(demographics)?;
        check_economic(economic)?;
        self.check_family(family)?;
        normalize_location(location)?;

        Ok(profile)
    }

    fn check_demographics(&self, section: &Demographics) -> Result<(), ProfileViolation> {
        let age = section
            .age
            .ok_or(ProfileViolation::MissingField("demographics.age"))?;
        if age > self.policy.max_age {
            return Err(ProfileViolation::AgeOutOfRange {
                found: age,
                max: self.policy.max_age,
            });
        }
        section
            .gender
            .ok_or(ProfileViolation::MissingField("demographics.gender"))?;
        section
            .caste
            .ok_or(ProfileViolation::MissingField("demographics.caste"))?;
        section
            .marital_status
            .ok_or(ProfileViolation::MissingField("demographics.marital_status"))?;
        Ok(())
    }

    fn check_family(&self, section: &Family) -> Result<(), ProfileViolation> {
        let size = section
            .size
            .ok_or(ProfileViolation::MissingField("family.size"))?;
        let dependents = section
            .dependents
            .ok_or(ProfileViolation::MissingField("family.dependents"))?;

        if size == 0 || size > self.policy.max_family_size {
            return Err(ProfileViolation::FamilySizeOutOfRange {
                found: size,
                max: self.policy.max_family_size,
            });
        }
        if dependents >= size {
            return Err(ProfileViolation::DependentsExceedFamily { dependents, size });
        }
        Ok(())
    }
}

fn check_economic(section: &Economic) -> Result<(), ProfileViolation> {
    section
        .annual_income
        .ok_or(ProfileViolation::MissingField("economic.annual_income"))?;
    let land = section
        .land_ownership
        .ok_or(ProfileViolation::MissingField("economic.land_ownership"))?;
    if !land.is_finite() || land < 0.0 {
        return Err(ProfileViolation::InvalidLandOwnership);
    }
    section
        .employment_status
        .ok_or(ProfileViolation::MissingField("economic.employment_status"))?;
    Ok(())
}

fn normalize_location(section: &mut Location) -> Result<(), ProfileViolation> {
    for (field, value) in [
        ("location.state", &mut section.state),
        ("location.district", &mut section.district),
        ("location.block", &mut section.block),
        ("location.village", &mut section.village),
    ] {
        let text = value
            .as_deref()
            .map(str::trim)
            .ok_or(ProfileViolation::MissingField(field))?;
        let length = text.chars().count();
        if !(TEXT_MIN_CHARS..=TEXT_MAX_CHARS).contains(&length) {
            return Err(ProfileViolation::TextLength {
                field,
                min: TEXT_MIN_CHARS,
                max: TEXT_MAX_CHARS,
            });
        }
        *value = Some(text.to_string());
    }

    section
        .rural
        .ok_or(ProfileViolation::MissingField("location.rural"))?;

    if let Some(raw) = section.pincode.take() {
        let pincode = raw.trim();
        if pincode.len() != PINCODE_DIGITS || !pincode.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(ProfileViolation::InvalidPincode(pincode.to_string()));
        }
        section.pincode = Some(pincode.to_string());
    }

    Ok(())
}
