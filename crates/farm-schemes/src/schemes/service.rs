use std::sync::Arc;

use tracing::{debug, warn};

use super::catalog::{CatalogError, SchemeSource};
use super::domain::{
    ApplicantProfile, EligibilityReport, EligibleSchemeView, ProfileValidationError,
};
use super::eligibility::{self, MalformedRecord};

/// What to do with a catalog row the rule engine cannot compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedRowPolicy {
    /// Log a warning and keep evaluating the remaining schemes.
    #[default]
    Skip,
    /// Abort the request with the malformed record.
    Fail,
}

/// Applies the eligibility rule across the full catalog and shapes the response.
pub struct EligibilityFilter<S> {
    source: Arc<S>,
    malformed_rows: MalformedRowPolicy,
}

impl<S> EligibilityFilter<S>
where
    S: SchemeSource + 'static,
{
    pub fn new(source: Arc<S>, malformed_rows: MalformedRowPolicy) -> Self {
        Self {
            source,
            malformed_rows,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Every scheme the applicant qualifies for, in catalog order.
    ///
    /// The profile is checked before the catalog is read; an invalid profile
    /// is an error under every [`MalformedRowPolicy`].
    pub fn filter_eligible(
        &self,
        profile: &ApplicantProfile,
    ) -> Result<EligibilityReport, EligibilityError> {
        profile.validate()?;
        let schemes = self.source.load()?;
        let mut views = Vec::new();
        let mut skipped = 0usize;

        for scheme in schemes.iter() {
            match eligibility::evaluate(scheme, profile) {
                Ok(verdict) if verdict.eligible => {
                    views.push(EligibleSchemeView::new(scheme, &verdict));
                }
                Ok(_) => {}
                Err(malformed) => match self.malformed_rows {
                    MalformedRowPolicy::Skip => {
                        warn!(
                            scheme_id = %malformed.scheme_id,
                            field = malformed.field,
                            problem = %malformed.problem,
                            "skipping malformed scheme row"
                        );
                        skipped += 1;
                    }
                    MalformedRowPolicy::Fail => return Err(malformed.into()),
                },
            }
        }

        debug!(
            evaluated = schemes.len(),
            eligible = views.len(),
            skipped,
            "scheme eligibility filtered"
        );

        Ok(EligibilityReport::from_views(views))
    }
}

/// Error raised by the eligibility filter.
#[derive(Debug, thiserror::Error)]
pub enum EligibilityError {
    #[error("invalid applicant profile: {0}")]
    InvalidProfile(#[from] ProfileValidationError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("malformed scheme record: {0}")]
    Malformed(#[from] MalformedRecord),
}
