use super::criteria::SchemeCriteria;
use crate::schemes::domain::{ApplicantProfile, Criterion, ALL_SENTINEL, ANY_FARMER_SENTINEL};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Case {
    Sensitive,
    Insensitive,
}

pub(crate) fn satisfies(
    criterion: Criterion,
    criteria: &SchemeCriteria<'_>,
    profile: &ApplicantProfile,
) -> bool {
    match criterion {
        Criterion::Age => {
            let age = i64::from(profile.age);
            criteria.min_age <= age && age <= criteria.max_age
        }
        Criterion::LandHolding => {
            criteria.min_land_holding <= profile.land_holding
                && profile.land_holding <= criteria.max_land_holding
        }
        Criterion::Income => profile.income <= criteria.income_limit,
        Criterion::FarmerType => matches_rule(
            criteria.farmer_type,
            ANY_FARMER_SENTINEL,
            &profile.farmer_type,
            Case::Sensitive,
        ),
        Criterion::State => matches_rule(
            criteria.state,
            ALL_SENTINEL,
            &profile.state,
            Case::Insensitive,
        ),
        Criterion::CropType => matches_rule(
            criteria.crop_type,
            ALL_SENTINEL,
            &profile.crop_type,
            Case::Insensitive,
        ),
        Criterion::Category => matches_rule(
            criteria.category,
            ALL_SENTINEL,
            &profile.category,
            Case::Sensitive,
        ),
        Criterion::Gender => matches_rule(
            criteria.gender,
            ALL_SENTINEL,
            &profile.gender,
            Case::Sensitive,
        ),
    }
}

/// The sentinel itself is always compared exactly, even for case-insensitive columns.
fn matches_rule(rule: &str, sentinel: &str, value: &str, case: Case) -> bool {
    if rule == sentinel {
        return true;
    }

    match case {
        Case::Sensitive => rule == value,
        Case::Insensitive => rule.to_lowercase() == value.to_lowercase(),
    }
}
