use serde::{Deserialize, Serialize};

use super::{EligibilityError, EligibleHousehold};
use crate::household::{HouseholdRepository, RepositoryError};

/// Caller-supplied narrowing applied to every scheme's result list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityFilter {
    #[serde(default)]
    pub household_size: Option<i64>,
}

impl EligibilityFilter {
    pub fn household_size(size: i64) -> Self {
        Self {
            household_size: Some(size),
        }
    }

    /// Reject non-positive sizes before any scheme runs.
    pub(crate) fn validated_household_size(&self) -> Result<Option<usize>, EligibilityError> {
        match self.household_size {
            None => Ok(None),
            Some(size) if size > 0 => usize::try_from(size)
                .map(Some)
                .map_err(|_| EligibilityError::InvalidHouseholdSize(size.to_string())),
            Some(size) => Err(EligibilityError::InvalidHouseholdSize(size.to_string())),
        }
    }
}

/// Keep households whose full current roster has exactly `household_size` members.
///
/// The count is re-read from the store, so it reflects every member of the household rather
/// than the qualifying subset attached to the result.
pub(crate) fn retain_household_size<R>(
    repository: &R,
    results: Vec<EligibleHousehold>,
    household_size: Option<usize>,
) -> Result<Vec<EligibleHousehold>, RepositoryError>
where
    R: HouseholdRepository + ?Sized,
{
    let Some(target) = household_size else {
        return Ok(results);
    };

    let mut retained = Vec::with_capacity(results.len());
    for entry in results {
        if repository.members_of(entry.household_id)?.len() == target {
            retained.push(entry);
        }
    }
    Ok(retained)
}
