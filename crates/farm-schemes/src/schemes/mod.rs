//! Government scheme eligibility: catalog loading, the per-scheme rule, and
//! the filter that applies it across the catalog.

pub mod catalog;
pub mod domain;
pub mod eligibility;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use catalog::{CachePolicy, CatalogError, CsvSchemeCatalog, SchemeSource, REQUIRED_COLUMNS};
pub use domain::{
    ApplicantProfile, Criterion, CriterionCheck, EligibilityReport, EligibilityVerdict,
    EligibleSchemeView, ProfileValidationError, Scheme, SchemeId, ALL_SENTINEL,
    ANY_FARMER_SENTINEL,
};
pub use eligibility::{evaluate, validate_scheme, MalformedRecord, RecordProblem};
pub use router::scheme_router;
pub use service::{EligibilityError, EligibilityFilter, MalformedRowPolicy};
