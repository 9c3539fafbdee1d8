use super::EligibilityError;
use crate::eligibility::criteria::Criterion;
use crate::eligibility::profile::{FieldValue, Profile};
use crate::eligibility::scheme::Scheme;

/// A criterion paired with the profile value it reads.
pub(crate) struct ResolvedCriterion<'a> {
    pub criterion: &'a Criterion,
    pub value: FieldValue<'a>,
}

pub(crate) enum Screening<'a> {
    Eligible(Vec<ResolvedCriterion<'a>>),
    Ineligible(Vec<ResolvedCriterion<'a>>),
}

/// Resolve every field the scheme reads, so a missing field fails loudly no
/// matter where its criterion sits, then test criteria until the first miss.
pub(crate) fn screen<'a>(
    profile: &'a Profile,
    scheme: &'a Scheme,
) -> Result<Screening<'a>, EligibilityError> {
    let resolved = scheme
        .criteria()
        .iter()
        .map(|criterion| {
            let field = criterion.profile_field();
            profile
                .value(field)
                .map(|value| ResolvedCriterion { criterion, value })
                .ok_or_else(|| EligibilityError::MissingProfileField {
                    field: field.path(),
                    scheme_id: scheme.id().to_string(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let passes = resolved
        .iter()
        .all(|entry| entry.criterion.is_met(&entry.value));

    Ok(if passes {
        Screening::Eligible(resolved)
    } else {
        Screening::Ineligible(resolved)
    })
}

pub(crate) fn met_reasons(resolved: &[ResolvedCriterion<'_>]) -> Vec<String> {
    if resolved.is_empty() {
        return vec!["scheme has no eligibility restrictions".to_string()];
    }
    resolved
        .iter()
        .map(|entry| entry.criterion.met_reason(&entry.value))
        .collect()
}

/// Diagnostic pass over a failed scheme: every unmet criterion, with the
/// requirement the applicant would have to satisfy.
pub(crate) fn unmet(resolved: &[ResolvedCriterion<'_>]) -> (Vec<String>, Vec<String>) {
    resolved
        .iter()
        .filter(|entry| !entry.criterion.is_met(&entry.value))
        .map(|entry| {
            (
                entry.criterion.unmet_reason(&entry.value),
                format!("Meet requirement: {}", entry.criterion.requirement()),
            )
        })
        .unzip()
}
