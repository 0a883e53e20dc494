use super::{MalformedRecord, RecordProblem};
use crate::schemes::domain::{ApplicantProfile, Scheme};

/// A scheme row with every criterion field present and comparable.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SchemeCriteria<'a> {
    pub min_age: i64,
    pub max_age: i64,
    pub min_land_holding: f64,
    pub max_land_holding: f64,
    pub income_limit: f64,
    pub farmer_type: &'a str,
    pub state: &'a str,
    pub crop_type: &'a str,
    pub category: &'a str,
    pub gender: &'a str,
}

pub(crate) fn resolve(scheme: &Scheme) -> Result<SchemeCriteria<'_>, MalformedRecord> {
    if scheme.scheme_id.0.trim().is_empty() {
        return Err(MalformedRecord::new(
            scheme,
            "scheme_id",
            RecordProblem::EmptyIdentifier,
        ));
    }

    let criteria = SchemeCriteria {
        min_age: required(scheme, "min_age", scheme.min_age)?,
        max_age: required(scheme, "max_age", scheme.max_age)?,
        min_land_holding: required(scheme, "min_land_holding", scheme.min_land_holding)?,
        max_land_holding: required(scheme, "max_land_holding", scheme.max_land_holding)?,
        income_limit: required(scheme, "income_limit", scheme.income_limit)?,
        farmer_type: required_text(scheme, "farmer_type", &scheme.farmer_type)?,
        state: required_text(scheme, "state", &scheme.state)?,
        crop_type: required_text(scheme, "crop_type", &scheme.crop_type)?,
        category: required_text(scheme, "category", &scheme.category)?,
        gender: required_text(scheme, "gender", &scheme.gender)?,
    };

    if criteria.min_age > criteria.max_age {
        return Err(MalformedRecord::new(
            scheme,
            "min_age",
            RecordProblem::InvertedBounds,
        ));
    }
    if criteria.min_land_holding > criteria.max_land_holding {
        return Err(MalformedRecord::new(
            scheme,
            "min_land_holding",
            RecordProblem::InvertedBounds,
        ));
    }

    Ok(criteria)
}

pub(crate) fn check_applicant(
    scheme: &Scheme,
    profile: &ApplicantProfile,
) -> Result<(), MalformedRecord> {
    for (field, value) in [
        ("land_holding", profile.land_holding),
        ("income", profile.income),
    ] {
        if !value.is_finite() {
            return Err(MalformedRecord::new(
                scheme,
                field,
                RecordProblem::NonFiniteApplicantValue,
            ));
        }
    }

    Ok(())
}

fn required<T: Copy>(
    scheme: &Scheme,
    field: &'static str,
    value: Option<T>,
) -> Result<T, MalformedRecord> {
    value.ok_or_else(|| MalformedRecord::new(scheme, field, RecordProblem::MissingValue))
}

fn required_text<'a>(
    scheme: &Scheme,
    field: &'static str,
    value: &'a Option<String>,
) -> Result<&'a str, MalformedRecord> {
    value
        .as_deref()
        .ok_or_else(|| MalformedRecord::new(scheme, field, RecordProblem::MissingValue))
}
