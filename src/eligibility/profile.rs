use serde::{Deserialize, Serialize};

/// Identifier wrapper for stored citizen profiles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProfileId(pub String);

impl ProfileId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const fn label(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

/// Social category used by reservation-based schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Caste {
    General,
    #[serde(rename = "OBC")]
    Obc,
    #[serde(rename = "SC")]
    Sc,
    #[serde(rename = "ST")]
    St,
}

impl Caste {
    pub const fn label(self) -> &'static str {
        match self {
            Caste::General => "General",
            Caste::Obc => "OBC",
            Caste::Sc => "SC",
            Caste::St => "ST",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaritalStatus {
    Single,
    Married,
    Widowed,
    Divorced,
}

impl MaritalStatus {
    pub const fn label(self) -> &'static str {
        match self {
            MaritalStatus::Single => "single",
            MaritalStatus::Married => "married",
            MaritalStatus::Widowed => "widowed",
            MaritalStatus::Divorced => "divorced",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmploymentStatus {
    Farmer,
    Laborer,
    SelfEmployed,
    Unemployed,
    GovernmentEmployee,
    PrivateEmployee,
}

impl EmploymentStatus {
    pub const fn label(self) -> &'static str {
        match self {
            EmploymentStatus::Farmer => "farmer",
            EmploymentStatus::Laborer => "laborer",
            EmploymentStatus::SelfEmployed => "self-employed",
            EmploymentStatus::Unemployed => "unemployed",
            EmploymentStatus::GovernmentEmployee => "government-employee",
            EmploymentStatus::PrivateEmployee => "private-employee",
        }
    }
}

/// Demographic section. Fields stay optional so incomplete records can be
/// represented and rejected with the offending field named.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Demographics {
    #[serde(default)]
    pub age: Option<u8>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub caste: Option<Caste>,
    #[serde(default)]
    pub marital_status: Option<MaritalStatus>,
}

impl Demographics {
    pub fn new(age: u8, gender: Gender, caste: Caste, marital_status: MaritalStatus) -> Self {
        Self {
            age: Some(age),
            gender: Some(gender),
            caste: Some(caste),
            marital_status: Some(marital_status),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Economic {
    #[serde(default)]
    pub annual_income: Option<u64>,
    /// Land holding in acres.
    #[serde(default)]
    pub land_ownership: Option<f64>,
    #[serde(default)]
    pub employment_status: Option<EmploymentStatus>,
}

impl Economic {
    pub fn new(annual_income: u64, land_ownership: f64, employment_status: EmploymentStatus) -> Self {
        Self {
            annual_income: Some(annual_income),
            land_ownership: Some(land_ownership),
            employment_status: Some(employment_status),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Location {
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub block: Option<String>,
    #[serde(default)]
    pub village: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pincode: Option<String>,
    /// Area classification consumed by rural-only schemes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rural: Option<bool>,
}

impl Location {
    pub fn new(state: &str, district: &str, block: &str, village: &str) -> Self {
        Self {
            state: Some(state.to_string()),
            district: Some(district.to_string()),
            block: Some(block.to_string()),
            village: Some(village.to_string()),
            pincode: None,
            rural: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Family {
    #[serde(default)]
    pub size: Option<u8>,
    #[serde(default)]
    pub dependents: Option<u8>,
}

impl Family {
    pub fn new(size: u8, dependents: u8) -> Self {
        Self {
            size: Some(size),
            dependents: Some(dependents),
        }
    }
}

/// Applicant record evaluated against the scheme catalog.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<ProfileId>,
    #[serde(default)]
    pub demographics: Option<Demographics>,
    #[serde(default)]
    pub economic: Option<Economic>,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub family: Option<Family>,
}

impl Profile {
    /// True when no section carries any data at all.
    pub fn is_empty(&self) -> bool {
        self.demographics.is_none()
            && self.economic.is_none()
            && self.location.is_none()
            && self.family.is_none()
    }

    pub fn value(&self, field: ProfileField) -> Option<FieldValue<'_>> {
        let demographics = self.demographics.as_ref();
        let economic = self.economic.as_ref();
        let location = self.location.as_ref();
        let family = self.family.as_ref();

        match field {
            ProfileField::Age => demographics
                .and_then(|section| section.age)
                .map(|age| FieldValue::Number(f64::from(age))),
            ProfileField::Gender => demographics
                .and_then(|section| section.gender)
                .map(FieldValue::Gender),
            ProfileField::Caste => demographics
                .and_then(|section| section.caste)
                .map(FieldValue::Caste),
            ProfileField::MaritalStatus => demographics
                .and_then(|section| section.marital_status)
                .map(FieldValue::MaritalStatus),
            ProfileField::AnnualIncome => economic
                .and_then(|section| section.annual_income)
                .map(|income| FieldValue::Number(income as f64)),
            ProfileField::LandOwnership => economic
                .and_then(|section| section.land_ownership)
                .map(FieldValue::Number),
            ProfileField::EmploymentStatus => economic
                .and_then(|section| section.employment_status)
                .map(FieldValue::EmploymentStatus),
            ProfileField::State => location
                .and_then(|section| section.state.as_deref())
                .map(FieldValue::Text),
            ProfileField::Rural => location
                .and_then(|section| section.rural)
                .map(FieldValue::Flag),
            ProfileField::FamilySize => family
                .and_then(|section| section.size)
                .map(|size| FieldValue::Number(f64::from(size))),
            ProfileField::Dependents => family
                .and_then(|section| section.dependents)
                .map(|count| FieldValue::Number(f64::from(count))),
        }
    }
}

/// Profile attributes that scheme criteria may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    Age,
    Gender,
    Caste,
    MaritalStatus,
    AnnualIncome,
    LandOwnership,
    EmploymentStatus,
    State,
    Rural,
    FamilySize,
    Dependents,
}

impl ProfileField {
    /// Dotted path used in error messages, e.g. `economic.land_ownership`.
    pub const fn path(self) -> &'static str {
        match self {
            ProfileField::Age => "demographics.age",
            ProfileField::Gender => "demographics.gender",
            ProfileField::Caste => "demographics.caste",
            ProfileField::MaritalStatus => "demographics.marital_status",
            ProfileField::AnnualIncome => "economic.annual_income",
            ProfileField::LandOwnership => "economic.land_ownership",
            ProfileField::EmploymentStatus => "economic.employment_status",
            ProfileField::State => "location.state",
            ProfileField::Rural => "location.rural",
            ProfileField::FamilySize => "family.size",
            ProfileField::Dependents => "family.dependents",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ProfileField::Age => "age",
            ProfileField::Gender => "gender",
            ProfileField::Caste => "caste",
            ProfileField::MaritalStatus => "marital status",
            ProfileField::AnnualIncome => "annual income",
            ProfileField::LandOwnership => "land ownership",
            ProfileField::EmploymentStatus => "employment status",
            ProfileField::State => "state",
            ProfileField::Rural => "rural residence",
            ProfileField::FamilySize => "family size",
            ProfileField::Dependents => "dependents",
        }
    }
}

/// Borrowed view of one profile attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Number(f64),
    Gender(Gender),
    Caste(Caste),
    MaritalStatus(MaritalStatus),
    EmploymentStatus(EmploymentStatus),
    Text(&'a str),
    Flag(bool),
}

impl FieldValue<'_> {
    pub fn display(&self) -> String {
        match self {
            FieldValue::Number(value) if value.fract() == 0.0 => format!("{value:.0}"),
            FieldValue::Number(value) => format!("{value}"),
            FieldValue::Gender(gender) => gender.label().to_string(),
            FieldValue::Caste(caste) => caste.label().to_string(),
            FieldValue::MaritalStatus(status) => status.label().to_string(),
            FieldValue::EmploymentStatus(status) => status.label().to_string(),
            FieldValue::Text(text) => (*text).to_string(),
            FieldValue::Flag(flag) => flag.to_string(),
        }
    }
}
