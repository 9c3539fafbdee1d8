use serde::{Deserialize, Serialize};

use super::criteria::{compile_criteria, Criterion, CriteriaError};
use super::profile::{Caste, EmploymentStatus, Gender, MaritalStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SchemeType {
    Agriculture,
    Employment,
    Housing,
    Education,
    Healthcare,
    SocialSecurity,
    FinancialInclusion,
}

impl SchemeType {
    pub const fn label(self) -> &'static str {
        match self {
            SchemeType::Agriculture => "agriculture",
            SchemeType::Employment => "employment",
            SchemeType::Housing => "housing",
            SchemeType::Education => "education",
            SchemeType::Healthcare => "healthcare",
            SchemeType::SocialSecurity => "social-security",
            SchemeType::FinancialInclusion => "financial-inclusion",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemeStatus {
    #[default]
    Active,
    Inactive,
    Suspended,
    Discontinued,
}

/// Inclusive numeric bounds as declared in a catalog document.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RangeBounds {
    #[serde(default, alias = "min_value", skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, alias = "max_value", skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl RangeBounds {
    pub fn between(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn at_least(min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    pub fn at_most(max: f64) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }
}

/// Declarative eligibility rules. Every key is optional and absent keys impose
/// no constraint; unknown keys are rejected when the catalog is loaded.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EligibilityCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<RangeBounds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Vec<Gender>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caste: Option<Vec<Caste>>,
    #[serde(
        default,
        alias = "maritalStatus",
        skip_serializing_if = "Option::is_none"
    )]
    pub marital_status: Option<Vec<MaritalStatus>>,
    #[serde(default, alias = "annualIncome", skip_serializing_if = "Option::is_none")]
    pub annual_income: Option<RangeBounds>,
    #[serde(default, alias = "landOwnership", skip_serializing_if = "Option::is_none")]
    pub land_ownership: Option<RangeBounds>,
    #[serde(
        default,
        alias = "employmentStatus",
        skip_serializing_if = "Option::is_none"
    )]
    pub employment_status: Option<Vec<EmploymentStatus>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub states: Option<Vec<String>>,
    #[serde(default, alias = "ruralOnly", skip_serializing_if = "Option::is_none")]
    pub rural_only: Option<bool>,
    #[serde(default, alias = "familySize", skip_serializing_if = "Option::is_none")]
    pub family_size: Option<RangeBounds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependents: Option<RangeBounds>,
}

/// Scheme definition exactly as a catalog source supplies it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemeRecord {
    #[serde(alias = "schemeId")]
    pub scheme_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, alias = "schemeType", skip_serializing_if = "Option::is_none")]
    pub scheme_type: Option<SchemeType>,
    #[serde(alias = "benefitAmount")]
    pub benefit_amount: u64,
    #[serde(
        default,
        alias = "benefitFrequency",
        skip_serializing_if = "Option::is_none"
    )]
    pub benefit_frequency: Option<String>,
    #[serde(
        default,
        alias = "implementingAgency",
        skip_serializing_if = "Option::is_none"
    )]
    pub implementing_agency: Option<String>,
    #[serde(
        default,
        alias = "requiredDocuments",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub required_documents: Vec<String>,
    #[serde(default)]
    pub status: SchemeStatus,
    #[serde(default, alias = "eligibilityCriteria")]
    pub eligibility_criteria: EligibilityCriteria,
}

/// Reasons a single record cannot enter the catalog.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemeDefinitionError {
    #[error("scheme id cannot be empty")]
    EmptyId,
    #[error("scheme {scheme_id} must carry a positive benefit amount")]
    NonPositiveBenefit { scheme_id: String },
    #[error("scheme {scheme_id} has invalid criteria: {source}")]
    Criteria {
        scheme_id: String,
        #[source]
        source: CriteriaError,
    },
}

/// Validated scheme with its rules compiled into closed criterion variants.
#[derive(Debug, Clone, PartialEq)]
pub struct Scheme {
    record: SchemeRecord,
    criteria: Vec<Criterion>,
}

impl Scheme {
    pub fn id(&self) -> &str {
        &self.record.scheme_id
    }

    pub fn name(&self) -> &str {
        &self.record.name
    }

    pub fn benefit_amount(&self) -> u64 {
        self.record.benefit_amount
    }

    pub fn scheme_type(&self) -> Option<SchemeType> {
        self.record.scheme_type
    }

    pub fn status(&self) -> SchemeStatus {
        self.record.status
    }

    pub fn required_documents(&self) -> &[String] {
        &self.record.required_documents
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    pub fn record(&self) -> &SchemeRecord {
        &self.record
    }
}

impl TryFrom<SchemeRecord> for Scheme {
    type Error = SchemeDefinitionError;

    fn try_from(record: SchemeRecord) -> Result<Self, Self::Error> {
        if record.scheme_id.trim().is_empty() {
            return Err(SchemeDefinitionError::EmptyId);
        }

        if record.benefit_amount == 0 {
            return Err(SchemeDefinitionError::NonPositiveBenefit {
                scheme_id: record.scheme_id,
            });
        }

        let criteria = match compile_criteria(&record.eligibility_criteria) {
            Ok(criteria) => criteria,
            Err(source) => {
                return Err(SchemeDefinitionError::Criteria {
                    scheme_id: record.scheme_id,
                    source,
                })
            }
        };

        Ok(Self { record, criteria })
    }
}
