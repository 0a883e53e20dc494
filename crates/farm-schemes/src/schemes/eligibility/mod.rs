mod criteria;
mod rules;

use super::domain::{
    ApplicantProfile, Criterion, CriterionCheck, EligibilityVerdict, Scheme, SchemeId,
};
use std::fmt;

/// Evaluate one scheme row against one applicant.
///
/// All eight criteria are checked without short-circuiting so the verdict
/// always carries the full reason trail in [`Criterion::ALL`] order. Missing
/// or non-comparable inputs are reported before any criterion runs.
pub fn evaluate(
    scheme: &Scheme,
    profile: &ApplicantProfile,
) -> Result<EligibilityVerdict, MalformedRecord> {
    let criteria = criteria::resolve(scheme)?;
    criteria::check_applicant(scheme, profile)?;

    let checks = Criterion::ALL
        .iter()
        .map(|criterion| CriterionCheck {
            criterion: *criterion,
            satisfied: rules::satisfies(*criterion, &criteria, profile),
        })
        .collect();

    Ok(EligibilityVerdict::from_checks(checks))
}

/// Checks that a scheme row could be evaluated for any applicant.
pub fn validate_scheme(scheme: &Scheme) -> Result<(), MalformedRecord> {
    criteria::resolve(scheme).map(|_| ())
}

/// A row, or the applicant paired with it, cannot be compared safely.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("scheme '{scheme_id}' field {field}: {problem}")]
pub struct MalformedRecord {
    pub scheme_id: SchemeId,
    pub field: &'static str,
    pub problem: RecordProblem,
}

impl MalformedRecord {
    fn new(scheme: &Scheme, field: &'static str, problem: RecordProblem) -> Self {
        Self {
            scheme_id: scheme.scheme_id.clone(),
            field,
            problem,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordProblem {
    EmptyIdentifier,
    MissingValue,
    InvertedBounds,
    NonFiniteApplicantValue,
}

impl fmt::Display for RecordProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordProblem::EmptyIdentifier => write!(f, "scheme identifier is empty"),
            RecordProblem::MissingValue => write!(f, "value is missing or not comparable"),
            RecordProblem::InvertedBounds => write!(f, "minimum exceeds maximum"),
            RecordProblem::NonFiniteApplicantValue => {
                write!(f, "applicant value is not a finite number")
            }
        }
    }
}
