use chrono::NaiveDate;

use super::age::AgeCutoff;
use super::config::EligibilityConfig;
use super::EligibleHousehold;
use crate::household::{FamilyMember, Household, HouseholdRepository, RepositoryError};

/// Households whose combined income is under the student ceiling, carrying only members
/// younger than the student age limit.
pub(crate) fn student_encouragement_bonus<R>(
    repository: &R,
    config: &EligibilityConfig,
    today: NaiveDate,
) -> Result<Vec<EligibleHousehold>, RepositoryError>
where
    R: HouseholdRepository + ?Sized,
{
    let incomes = repository.income_by_household()?;
    let cutoff = AgeCutoff::years_before(today, config.student_max_age_years);

    Ok(repository
        .households()?
        .into_iter()
        .filter(|household| {
            incomes
                .get(&household.id)
                .is_some_and(|total| *total < config.student_income_ceiling)
        })
        .filter_map(|household| {
            with_qualifying_members(household, |member| cutoff.is_born_after(member.birth_date))
        })
        .collect())
}

/// Public-flat households carrying only members older than the elder age threshold.
pub(crate) fn elder_bonus<R>(
    repository: &R,
    config: &EligibilityConfig,
    today: NaiveDate,
) -> Result<Vec<EligibleHousehold>, RepositoryError>
where
    R: HouseholdRepository + ?Sized,
{
    let cutoff = AgeCutoff::years_before(today, config.elder_min_age_years);

    Ok(repository
        .households()?
        .into_iter()
        .filter(|household| household.housing_type.is_public_flat())
        .filter_map(|household| {
            with_qualifying_members(household, |member| cutoff.is_born_before(member.birth_date))
        })
        .collect())
}

pub(crate) fn baby_sunshine_grant<R>(
    repository: &R,
    config: &EligibilityConfig,
    today: NaiveDate,
) -> Result<Vec<EligibleHousehold>, RepositoryError>
where
    R: HouseholdRepository + ?Sized,
{
    let cutoff = AgeCutoff::years_before(today, config.baby_max_age_years);

    Ok(repository
        .households()?
        .into_iter()
        .filter_map(|household| {
            with_qualifying_members(household, |member| cutoff.is_born_after(member.birth_date))
        })
        .collect())
}

/// Household-level rule only: qualifying households keep their full roster.
pub(crate) fn yolo_gst_grant<R>(
    repository: &R,
    config: &EligibilityConfig,
) -> Result<Vec<EligibleHousehold>, RepositoryError>
where
    R: HouseholdRepository + ?Sized,
{
    let incomes = repository.income_by_household()?;

    Ok(repository
        .households()?
        .into_iter()
        .filter(|household| household.housing_type.is_public_flat())
        .filter(|household| {
            incomes
                .get(&household.id)
                .is_some_and(|total| *total < config.yolo_income_ceiling)
        })
        .map(EligibleHousehold::from)
        .collect())
}

/// Narrow a household to the members accepted by `qualifies`, dropping it when none remain.
fn with_qualifying_members<F>(household: Household, qualifies: F) -> Option<EligibleHousehold>
where
    F: Fn(&FamilyMember) -> bool,
{
    let members: Vec<FamilyMember> = household
        .members
        .into_iter()
        .filter(|member| qualifies(member))
        .collect();

    if members.is_empty() {
        return None;
    }

    Some(EligibleHousehold {
        household_id: household.id,
        housing_type: household.housing_type,
        members,
    })
}
