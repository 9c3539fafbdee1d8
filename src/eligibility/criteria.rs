//! Closed criterion model compiled from declarative scheme rules.

use super::profile::{Caste, EmploymentStatus, FieldValue, Gender, MaritalStatus, ProfileField};
use super::scheme::{EligibilityCriteria, RangeBounds};

/// Practical upper bound applied when an age range omits its maximum.
pub const DEFAULT_MAX_AGE: f64 = 150.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericField {
    Age,
    AnnualIncome,
    LandOwnership,
    FamilySize,
    Dependents,
}

impl NumericField {
    pub const fn profile_field(self) -> ProfileField {
        match self {
            NumericField::Age => ProfileField::Age,
            NumericField::AnnualIncome => ProfileField::AnnualIncome,
            NumericField::LandOwnership => ProfileField::LandOwnership,
            NumericField::FamilySize => ProfileField::FamilySize,
            NumericField::Dependents => ProfileField::Dependents,
        }
    }

    fn default_max(self) -> f64 {
        match self {
            NumericField::Age => DEFAULT_MAX_AGE,
            _ => f64::INFINITY,
        }
    }
}

/// Inclusive range; absent bounds fall back to the field defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl NumericRange {
    pub fn contains(&self, field: NumericField, value: f64) -> bool {
        let min = self.min.unwrap_or(f64::NEG_INFINITY);
        let max = self.max.unwrap_or_else(|| field.default_max());
        min <= value && value <= max
    }

    fn describe(&self) -> String {
        match (self.min, self.max) {
            (Some(min), Some(max)) => format!("between {} and {}", number(min), number(max)),
            (Some(min), None) => format!("at least {}", number(min)),
            (None, Some(max)) => format!("at most {}", number(max)),
            (None, None) => "unbounded".to_string(),
        }
    }
}

/// Allowed-value lists, one variant per categorical profile attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum Membership {
    Gender(Vec<Gender>),
    Caste(Vec<Caste>),
    MaritalStatus(Vec<MaritalStatus>),
    EmploymentStatus(Vec<EmploymentStatus>),
    State(Vec<String>),
}

impl Membership {
    pub const fn profile_field(&self) -> ProfileField {
        match self {
            Membership::Gender(_) => ProfileField::Gender,
            Membership::Caste(_) => ProfileField::Caste,
            Membership::MaritalStatus(_) => ProfileField::MaritalStatus,
            Membership::EmploymentStatus(_) => ProfileField::EmploymentStatus,
            Membership::State(_) => ProfileField::State,
        }
    }

    fn admits(&self, value: &FieldValue<'_>) -> bool {
        match (self, value) {
            (Membership::Gender(allowed), FieldValue::Gender(gender)) => allowed.contains(gender),
            (Membership::Caste(allowed), FieldValue::Caste(caste)) => allowed.contains(caste),
            (Membership::MaritalStatus(allowed), FieldValue::MaritalStatus(status)) => {
                allowed.contains(status)
            }
            (Membership::EmploymentStatus(allowed), FieldValue::EmploymentStatus(status)) => {
                allowed.contains(status)
            }
            (Membership::State(allowed), FieldValue::Text(state)) => allowed
                .iter()
                .any(|candidate| candidate.trim().eq_ignore_ascii_case(state.trim())),
            _ => false,
        }
    }

    fn allowed_labels(&self) -> Vec<&str> {
        match self {
            Membership::Gender(allowed) => allowed.iter().map(|value| value.label()).collect(),
            Membership::Caste(allowed) => allowed.iter().map(|value| value.label()).collect(),
            Membership::MaritalStatus(allowed) => {
                allowed.iter().map(|value| value.label()).collect()
            }
            Membership::EmploymentStatus(allowed) => {
                allowed.iter().map(|value| value.label()).collect()
            }
            Membership::State(allowed) => allowed.iter().map(String::as_str).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileFlag {
    Rural,
}

impl ProfileFlag {
    pub const fn profile_field(self) -> ProfileField {
        match self {
            ProfileFlag::Rural => ProfileField::Rural,
        }
    }
}

/// One declarative constraint of a scheme.
#[derive(Debug, Clone, PartialEq)]
pub enum Criterion {
    NumericRange {
        field: NumericField,
        range: NumericRange,
    },
    SetMembership(Membership),
    BooleanFlag {
        flag: ProfileFlag,
        required: bool,
    },
}

impl Criterion {
    pub fn profile_field(&self) -> ProfileField {
        match self {
            Criterion::NumericRange { field, .. } => field.profile_field(),
            Criterion::SetMembership(membership) => membership.profile_field(),
            Criterion::BooleanFlag { flag, .. } => flag.profile_field(),
        }
    }

    pub fn is_met(&self, value: &FieldValue<'_>) -> bool {
        match (self, value) {
            (Criterion::NumericRange { field, range }, FieldValue::Number(number)) => {
                range.contains(*field, *number)
            }
            (Criterion::SetMembership(membership), value) => membership.admits(value),
            (Criterion::BooleanFlag { required, .. }, FieldValue::Flag(flag)) => flag == required,
            _ => false,
        }
    }

    /// Explicitly listed values count as a stronger match than a bare bound.
    pub fn earns_bonus(&self) -> bool {
        matches!(self, Criterion::SetMembership(_))
    }

    /// Human-readable requirement, e.g. `annual income at most 200000`.
    pub fn requirement(&self) -> String {
        let label = self.profile_field().label();
        match self {
            Criterion::NumericRange { range, .. } => format!("{label} {}", range.describe()),
            Criterion::SetMembership(membership) => {
                format!("{label} one of {}", membership.allowed_labels().join(", "))
            }
            Criterion::BooleanFlag { required: true, .. } => format!("{label} required"),
            Criterion::BooleanFlag { required: false, .. } => format!("{label} not permitted"),
        }
    }

    pub fn met_reason(&self, value: &FieldValue<'_>) -> String {
        let label = self.profile_field().label();
        match self {
            Criterion::NumericRange { range, .. } => {
                format!("{label} {} is {}", value.display(), range.describe())
            }
            Criterion::SetMembership(_) => format!("{label} {} is listed", value.display()),
            Criterion::BooleanFlag { required, .. } => {
                format!("{label} is {required} as required")
            }
        }
    }

    pub fn unmet_reason(&self, value: &FieldValue<'_>) -> String {
        let label = self.profile_field().label();
        match self {
            Criterion::NumericRange { range, .. } => {
                format!("{label} {} is not {}", value.display(), range.describe())
            }
            Criterion::SetMembership(_) => format!("{label} {} is not listed", value.display()),
            Criterion::BooleanFlag { required, .. } => {
                format!("{label} must be {required}")
            }
        }
    }
}

/// Rule declarations that cannot be compiled.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CriteriaError {
    #[error("{field} range has min {min} greater than max {max}")]
    InvertedRange {
        field: &'static str,
        min: f64,
        max: f64,
    },
    #[error("{field} range bound must be a number")]
    NanBound { field: &'static str },
    #[error("{field} allowed values cannot be empty")]
    EmptyAllowedSet { field: &'static str },
}

/// Compile declared rules into criteria, demographics first and family last.
pub fn compile_criteria(declared: &EligibilityCriteria) -> Result<Vec<Criterion>, CriteriaError> {
    let mut criteria = Vec::new();

    push_range(&mut criteria, NumericField::Age, declared.age)?;
    push_set(&mut criteria, declared.gender.as_ref(), ProfileField::Gender, |values| {
        Membership::Gender(values.to_vec())
    })?;
    push_set(&mut criteria, declared.caste.as_ref(), ProfileField::Caste, |values| {
        Membership::Caste(values.to_vec())
    })?;
    push_set(
        &mut criteria,
        declared.marital_status.as_ref(),
        ProfileField::MaritalStatus,
        |values| Membership::MaritalStatus(values.to_vec()),
    )?;

    push_range(&mut criteria, NumericField::AnnualIncome, declared.annual_income)?;
    push_range(&mut criteria, NumericField::LandOwnership, declared.land_ownership)?;
    push_set(
        &mut criteria,
        declared.employment_status.as_ref(),
        ProfileField::EmploymentStatus,
        |values| Membership::EmploymentStatus(values.to_vec()),
    )?;

    push_set(&mut criteria, declared.states.as_ref(), ProfileField::State, |values| {
        Membership::State(values.to_vec())
    })?;
    // `rural_only: false` lifts the restriction rather than demanding urban residence.
    if declared.rural_only == Some(true) {
        criteria.push(Criterion::BooleanFlag {
            flag: ProfileFlag::Rural,
            required: true,
        });
    }

    push_range(&mut criteria, NumericField::FamilySize, declared.family_size)?;
    push_range(&mut criteria, NumericField::Dependents, declared.dependents)?;

    Ok(criteria)
}

fn push_range(
    criteria: &mut Vec<Criterion>,
    field: NumericField,
    bounds: Option<RangeBounds>,
) -> Result<(), CriteriaError> {
    let Some(bounds) = bounds else {
        return Ok(());
    };
    let name = field.profile_field().path();

    if bounds.min.is_some_and(f64::is_nan) || bounds.max.is_some_and(f64::is_nan) {
        return Err(CriteriaError::NanBound { field: name });
    }
    if let (Some(min), Some(max)) = (bounds.min, bounds.max) {
        if min > max {
            return Err(CriteriaError::InvertedRange {
                field: name,
                min,
                max,
            });
        }
    }

    criteria.push(Criterion::NumericRange {
        field,
        range: NumericRange {
            min: bounds.min,
            max: bounds.max,
        },
    });
    Ok(())
}

fn push_set<T>(
    criteria: &mut Vec<Criterion>,
    allowed: Option<&Vec<T>>,
    field: ProfileField,
    build: impl FnOnce(&[T]) -> Membership,
) -> Result<(), CriteriaError> {
    match allowed {
        None => Ok(()),
        Some(values) if values.is_empty() => Err(CriteriaError::EmptyAllowedSet {
            field: field.path(),
        }),
        Some(values) => {
            criteria.push(Criterion::SetMembership(build(values)));
            Ok(())
        }
    }
}

fn number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_range_defaults_to_practical_upper_bound() {
        let range = NumericRange {
            min: Some(18.0),
            max: None,
        };
        assert!(range.contains(NumericField::Age, 150.0));
        assert!(!range.contains(NumericField::Age, 151.0));
        assert!(range.contains(NumericField::AnnualIncome, 1.0e12));
    }

    #[test]
    fn compiles_declared_keys_only() {
        let declared = EligibilityCriteria {
            land_ownership: Some(RangeBounds::between(0.1, 2.0)),
            employment_status: Some(vec![EmploymentStatus::Farmer]),
            annual_income: Some(RangeBounds::at_most(200_000.0)),
            rural_only: Some(false),
            ..EligibilityCriteria::default()
        };

        let criteria = compile_criteria(&declared).expect("criteria compile");

        assert_eq!(criteria.len(), 3);
        assert_eq!(
            criteria
                .iter()
                .filter(|criterion| criterion.earns_bonus())
                .count(),
            1
        );
    }

    #[test]
    fn rejects_inverted_and_empty_rules() {
        let inverted = EligibilityCriteria {
            age: Some(RangeBounds::between(65.0, 18.0)),
            ..EligibilityCriteria::default()
        };
        assert!(matches!(
            compile_criteria(&inverted),
            Err(CriteriaError::InvertedRange {
                field: "demographics.age",
                ..
            })
        ));

        let empty = EligibilityCriteria {
            caste: Some(Vec::new()),
            ..EligibilityCriteria::default()
        };
        assert_eq!(
            compile_criteria(&empty),
            Err(CriteriaError::EmptyAllowedSet {
                field: "demographics.caste"
            })
        );
    }

    #[test]
    fn state_membership_ignores_case_and_padding() {
        let criterion = Criterion::SetMembership(Membership::State(vec![" Maharashtra".into()]));
        assert!(criterion.is_met(&FieldValue::Text("maharashtra ")));
        assert!(!criterion.is_met(&FieldValue::Text("Karnataka")));
    }

    #[test]
    fn requirement_text_names_bounds() {
        let criterion = Criterion::NumericRange {
            field: NumericField::AnnualIncome,
            range: NumericRange {
                min: None,
                max: Some(200_000.0),
            },
        };
        assert_eq!(criterion.requirement(), "annual income at most 200000");
        assert_eq!(
            criterion.unmet_reason(&FieldValue::Number(200_001.0)),
            "annual income 200001 is not at most 200000"
        );
    }
}
