use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel accepted by the state, crop type, category and gender columns.
pub const ALL_SENTINEL: &str = "ALL";
/// Sentinel accepted by the farmer type column.
pub const ANY_FARMER_SENTINEL: &str = "any";

/// Catalog identifier for a scheme, stable across loads.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SchemeId(pub String);

impl fmt::Display for SchemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SchemeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// One catalog row.
///
/// Criterion fields are optional: an empty cell, or a numeric cell that does
/// not parse, is held as `None` so the rule engine can report the row as
/// malformed instead of comparing against garbage.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scheme {
    pub scheme_id: SchemeId,
    pub scheme_name: String,
    pub benefits: String,
    pub min_age: Option<i64>,
    pub max_age: Option<i64>,
    pub min_land_holding: Option<f64>,
    pub max_land_holding: Option<f64>,
    pub income_limit: Option<f64>,
    pub farmer_type: Option<String>,
    pub state: Option<String>,
    pub crop_type: Option<String>,
    pub category: Option<String>,
    pub gender: Option<String>,
    pub other_conditions: String,
    pub steps_to_apply: String,
    pub official_url: String,
}

/// Attributes a farmer submits to be matched against the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantProfile {
    pub age: u32,
    pub land_holding: f64,
    pub income: f64,
    pub farmer_type: String,
    pub state: String,
    pub crop_type: String,
    pub category: String,
    pub gender: String,
}

impl ApplicantProfile {
    /// Rejects negative or non-finite land holding and income.
    pub fn validate(&self) -> Result<(), ProfileValidationError> {
        for (field, value) in [
            ("land_holding", self.land_holding),
            ("income", self.income),
        ] {
            if !value.is_finite() {
                return Err(ProfileValidationError::NotFinite { field });
            }
            if value < 0.0 {
                return Err(ProfileValidationError::Negative { field, value });
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileValidationError {
    #[error("{field} must be greater than or equal to 0 (got {value})")]
    Negative { field: &'static str, value: f64 },
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
}

/// The eight independent checks, in the order their reasons are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Criterion {
    Age,
    LandHolding,
    Income,
    FarmerType,
    State,
    CropType,
    Category,
    Gender,
}

impl Criterion {
    pub const ALL: [Criterion; 8] = [
        Criterion::Age,
        Criterion::LandHolding,
        Criterion::Income,
        Criterion::FarmerType,
        Criterion::State,
        Criterion::CropType,
        Criterion::Category,
        Criterion::Gender,
    ];

    pub fn reason(&self, satisfied: bool) -> &'static str {
        match (self, satisfied) {
            (Criterion::Age, true) => "Age criteria satisfied",
            (Criterion::Age, false) => "Age criteria not satisfied",
            (Criterion::LandHolding, true) => "Land holding criteria satisfied",
            (Criterion::LandHolding, false) => "Land holding criteria not satisfied",
            (Criterion::Income, true) => "Income criteria satisfied",
            (Criterion::Income, false) => "Income exceeds scheme limit",
            (Criterion::FarmerType, true) => "Farmer type eligible",
            (Criterion::FarmerType, false) => "Farmer type not eligible",
            (Criterion::State, true) => "State criteria satisfied",
            (Criterion::State, false) => "State restriction not satisfied",
            (Criterion::CropType, true) => "Crop type eligible",
            (Criterion::CropType, false) => "Crop type not eligible",
            (Criterion::Category, true) => "Category eligible",
            (Criterion::Category, false) => "Category not eligible",
            (Criterion::Gender, true) => "Gender eligible",
            (Criterion::Gender, false) => "Gender not eligible",
        }
    }
}

/// Outcome of a single criterion for one scheme/applicant pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CriterionCheck {
    pub criterion: Criterion,
    pub satisfied: bool,
}

impl CriterionCheck {
    pub fn reason(&self) -> &'static str {
        self.criterion.reason(self.satisfied)
    }
}

/// Verdict for one scheme, carrying all eight checks regardless of outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct EligibilityVerdict {
    pub eligible: bool,
    pub checks: Vec<CriterionCheck>,
}

impl EligibilityVerdict {
    pub fn from_checks(checks: Vec<CriterionCheck>) -> Self {
        let eligible = checks.iter().all(|check| check.satisfied);
        Self { eligible, checks }
    }

    pub fn reasons(&self) -> Vec<String> {
        self.checks
            .iter()
            .map(|check| check.reason().to_string())
            .collect()
    }

    pub fn failed(&self) -> impl Iterator<Item = Criterion> + '_ {
        self.checks
            .iter()
            .filter(|check| !check.satisfied)
            .map(|check| check.criterion)
    }
}

/// Presentation shape for a scheme the applicant qualifies for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibleSchemeView {
    pub scheme_id: SchemeId,
    pub scheme_name: String,
    pub benefits: String,
    pub reasons: Vec<String>,
    pub other_conditions: String,
    pub steps_to_apply: String,
    pub official_url: String,
}

impl EligibleSchemeView {
    pub fn new(scheme: &Scheme, verdict: &EligibilityVerdict) -> Self {
        Self {
            scheme_id: scheme.scheme_id.clone(),
            scheme_name: scheme.scheme_name.clone(),
            benefits: scheme.benefits.clone(),
            reasons: verdict.reasons(),
            other_conditions: scheme.other_conditions.clone(),
            steps_to_apply: scheme.steps_to_apply.clone(),
            official_url: scheme.official_url.clone(),
        }
    }
}

/// Response body for an eligibility request.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EligibilityReport {
    pub total_eligible_schemes: usize,
    pub schemes: Vec<EligibleSchemeView>,
}

impl EligibilityReport {
    pub fn from_views(schemes: Vec<EligibleSchemeView>) -> Self {
        Self {
            total_eligible_schemes: schemes.len(),
            schemes,
        }
    }
}
