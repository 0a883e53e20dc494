use std::sync::{Arc, Mutex};

use crate::schemes::catalog::{CatalogError, SchemeSource};
use crate::schemes::domain::{ApplicantProfile, Scheme, SchemeId};
use crate::schemes::service::{EligibilityFilter, MalformedRowPolicy};

/// The single-scheme catalog used throughout the eligibility examples.
pub(super) fn open_scheme(id: &str) -> Scheme {
    Scheme {
        scheme_id: SchemeId::from(id),
        scheme_name: "Small Farmer Support".to_string(),
        benefits: "Rs 6000 per year".to_string(),
        min_age: Some(18),
        max_age: Some(60),
        min_land_holding: Some(0.0),
        max_land_holding: Some(5.0),
        income_limit: Some(200000.0),
        farmer_type: Some("small".to_string()),
        state: Some("ALL".to_string()),
        crop_type: Some("ALL".to_string()),
        category: Some("ALL".to_string()),
        gender: Some("ALL".to_string()),
        other_conditions: "Aadhaar seeded bank account".to_string(),
        steps_to_apply: "Register on the portal".to_string(),
        official_url: "https://schemes.example.gov/s1".to_string(),
    }
}

pub(super) fn applicant() -> ApplicantProfile {
    ApplicantProfile {
        age: 35,
        land_holding: 2.5,
        income: 180000.0,
        farmer_type: "small".to_string(),
        state: "Tamil Nadu".to_string(),
        crop_type: "rice".to_string(),
        category: "GENERAL".to_string(),
        gender: "M".to_string(),
    }
}

pub(super) fn build_filter(
    schemes: Vec<Scheme>,
    policy: MalformedRowPolicy,
) -> (EligibilityFilter<MemorySource>, Arc<MemorySource>) {
    let source = Arc::new(MemorySource::new(schemes));
    let filter = EligibilityFilter::new(source.clone(), policy);
    (filter, source)
}

pub(super) struct MemorySource {
    schemes: Arc<[Scheme]>,
    loads: Mutex<usize>,
}

impl MemorySource {
    pub(super) fn new(schemes: Vec<Scheme>) -> Self {
        Self {
            schemes: Arc::from(schemes),
            loads: Mutex::new(0),
        }
    }

    pub(super) fn loads(&self) -> usize {
        *self.loads.lock().expect("load counter poisoned")
    }
}

impl SchemeSource for MemorySource {
    fn load(&self) -> Result<Arc<[Scheme]>, CatalogError> {
        *self.loads.lock().expect("load counter poisoned") += 1;
        Ok(Arc::clone(&self.schemes))
    }
}

pub(super) struct MissingColumnsSource;

impl SchemeSource for MissingColumnsSource {
    fn load(&self) -> Result<Arc<[Scheme]>, CatalogError> {
        Err(CatalogError::SchemaValidation {
            missing: vec!["income_limit".to_string()],
        })
    }
}
