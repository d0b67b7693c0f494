use std::collections::BTreeMap;

use super::domain::{FamilyMember, Household, HouseholdId, HousingType, MemberId, NewFamilyMember};

/// Storage abstraction shared by the record service and the eligibility engine.
///
/// Reads never return soft-deleted rows. Households come back ordered by id with their
/// members ordered by id, which is the scan order eligibility results preserve.
pub trait HouseholdRepository: Send + Sync {
    fn households(&self) -> Result<Vec<Household>, RepositoryError>;
    fn household(&self, id: HouseholdId) -> Result<Option<Household>, RepositoryError>;
    fn member(&self, id: MemberId) -> Result<Option<FamilyMember>, RepositoryError>;
    fn members_of(&self, household_id: HouseholdId) -> Result<Vec<FamilyMember>, RepositoryError>;
    /// Sum of `annual_income` per household. Households without members have no entry.
    fn income_by_household(&self) -> Result<BTreeMap<HouseholdId, u64>, RepositoryError>;

    fn insert_household(&self, housing_type: HousingType) -> Result<Household, RepositoryError>;
    /// Stores a member under a freshly allocated id.
    fn insert_member(&self, member: NewFamilyMember) -> Result<FamilyMember, RepositoryError>;
    fn update_member(&self, member: FamilyMember) -> Result<(), RepositoryError>;
    fn soft_delete_household(&self, id: HouseholdId) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
