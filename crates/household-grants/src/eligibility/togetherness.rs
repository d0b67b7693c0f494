use std::collections::HashSet;

use chrono::NaiveDate;
use tracing::debug;

use super::age::AgeCutoff;
use super::config::EligibilityConfig;
use super::EligibleHousehold;
use crate::household::{FamilyMember, Household, HouseholdRepository, MemberId, RepositoryError};

/// Households with at least one minor whose two recorded parents are married to each other.
///
/// Each entry lists the accepted children in roster order, then each distinct parent once in
/// the order first referenced. Parents are fetched by id and may live in another household.
pub(crate) fn family_togetherness_scheme<R>(
    repository: &R,
    config: &EligibilityConfig,
    today: NaiveDate,
) -> Result<Vec<EligibleHousehold>, RepositoryError>
where
    R: HouseholdRepository + ?Sized,
{
    let cutoff = AgeCutoff::years_before(today, config.togetherness_child_max_age_years);

    let mut eligible = Vec::new();
    for household in repository.households()? {
        if let Some(entry) = resolve_household(repository, household, &cutoff)? {
            eligible.push(entry);
        }
    }
    Ok(eligible)
}

fn resolve_household<R>(
    repository: &R,
    household: Household,
    cutoff: &AgeCutoff,
) -> Result<Option<EligibleHousehold>, RepositoryError>
where
    R: HouseholdRepository + ?Sized,
{
    let mut children = Vec::new();
    let mut parents = Vec::new();
    let mut seen_parents: HashSet<MemberId> = HashSet::new();

    for member in household.members {
        if !cutoff.is_born_after(member.birth_date) {
            continue;
        }
        let Some((parent1_id, parent2_id)) = member.parent_ids() else {
            continue;
        };

        let Some(couple) = married_parents(repository, parent1_id, parent2_id)? else {
            debug!(
                child = %member.id,
                parent1 = %parent1_id,
                parent2 = %parent2_id,
                "parents not mutually married; child excluded"
            );
            continue;
        };

        for parent in couple {
            if seen_parents.insert(parent.id) {
                parents.push(parent);
            }
        }
        children.push(member);
    }

    if children.is_empty() {
        return Ok(None);
    }

    children.extend(parents);
    Ok(Some(EligibleHousehold {
        household_id: household.id,
        housing_type: household.housing_type,
        members: children,
    }))
}

/// Fetch both parents and return them only when the spouse link holds in both directions.
///
/// A missing or soft-deleted parent counts as "not married", not as a failure.
pub(crate) fn married_parents<R>(
    repository: &R,
    parent1_id: MemberId,
    parent2_id: MemberId,
) -> Result<Option<[FamilyMember; 2]>, RepositoryError>
where
    R: HouseholdRepository + ?Sized,
{
    let (Some(parent1), Some(parent2)) =
        (repository.member(parent1_id)?, repository.member(parent2_id)?)
    else {
        return Ok(None);
    };

    if spouse_link_is_symmetric(&parent1, &parent2) {
        Ok(Some([parent1, parent2]))
    } else {
        Ok(None)
    }
}

/// Two distinct members each naming the other as spouse.
pub fn spouse_link_is_symmetric(first: &FamilyMember, second: &FamilyMember) -> bool {
    first.id != second.id && first.is_married_to(second)
}
