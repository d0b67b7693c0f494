use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use super::domain::{
    FamilyMember, Household, HouseholdId, HousingType, MaritalStatus, MarriageRequest, MemberId,
    NewFamilyMember, ParentageRequest,
};
use super::repository::{HouseholdRepository, RepositoryError};
use super::validation::{
    validate_marriage, validate_new_member, validate_parentage, ValidationError,
};

/// Record-management facade: registration, relationship links and soft deletes.
pub struct HouseholdService<R> {
    repository: Arc<R>,
}

impl<R> HouseholdService<R>
where
    R: HouseholdRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> Arc<R> {
        Arc::clone(&self.repository)
    }

    pub fn create_household(
        &self,
        housing_type: HousingType,
    ) -> Result<Household, HouseholdServiceError> {
        let household = self.repository.insert_household(housing_type)?;
        info!(
            household_id = %household.id,
            housing_type = housing_type.label(),
            "household registered"
        );
        Ok(household)
    }

    pub fn list_households(&self) -> Result<Vec<Household>, HouseholdServiceError> {
        Ok(self.repository.households()?)
    }

    pub fn household(&self, id: HouseholdId) -> Result<Household, HouseholdServiceError> {
        self.repository
            .household(id)?
            .ok_or(HouseholdServiceError::HouseholdNotFound(id))
    }

    /// Soft-delete a household together with its current members.
    pub fn delete_household(&self, id: HouseholdId) -> Result<(), HouseholdServiceError> {
        match self.repository.soft_delete_household(id) {
            Ok(()) => {
                info!(household_id = %id, "household soft-deleted");
                Ok(())
            }
            Err(RepositoryError::NotFound) => Err(HouseholdServiceError::HouseholdNotFound(id)),
            Err(other) => Err(other.into()),
        }
    }

    /// Validate and store a new member. A supplied `spouse_id` is stored as given and is not
    /// mirrored onto the spouse.
    pub fn add_member(
        &self,
        submission: NewFamilyMember,
        today: NaiveDate,
    ) -> Result<FamilyMember, HouseholdServiceError> {
        validate_new_member(&submission, today)?;

        if self.repository.household(submission.household_id)?.is_none() {
            return Err(HouseholdServiceError::HouseholdNotFound(
                submission.household_id,
            ));
        }
        if let Some(spouse_id) = submission.spouse_id {
            self.existing_member(spouse_id)?;
        }

        let member = self.repository.insert_member(submission)?;
        info!(member_id = %member.id, household_id = ?member.household_id, "family member added");
        Ok(member)
    }

    /// Link two members as spouses of each other and mark both married.
    pub fn set_couple_as_married(
        &self,
        request: MarriageRequest,
    ) -> Result<(FamilyMember, FamilyMember), HouseholdServiceError> {
        validate_marriage(request.spouse1_id, request.spouse2_id)?;
        let mut spouse1 = self.existing_member(request.spouse1_id)?;
        let mut spouse2 = self.existing_member(request.spouse2_id)?;

        spouse1.spouse_id = Some(spouse2.id);
        spouse1.marital_status = MaritalStatus::Married;
        spouse2.spouse_id = Some(spouse1.id);
        spouse2.marital_status = MaritalStatus::Married;

        self.repository.update_member(spouse1.clone())?;
        self.repository.update_member(spouse2.clone())?;

        info!(spouse1 = %spouse1.id, spouse2 = %spouse2.id, "couple recorded as married");
        Ok((spouse1, spouse2))
    }

    pub fn set_parents_for_child(
        &self,
        request: ParentageRequest,
    ) -> Result<FamilyMember, HouseholdServiceError> {
        validate_parentage(request.child_id, request.parent1_id, request.parent2_id)?;
        let mut child = self.existing_member(request.child_id)?;
        self.existing_member(request.parent1_id)?;
        self.existing_member(request.parent2_id)?;

        child.parent1_id = Some(request.parent1_id);
        child.parent2_id = Some(request.parent2_id);
        self.repository.update_member(child.clone())?;

        info!(
            child = %child.id,
            parent1 = %request.parent1_id,
            parent2 = %request.parent2_id,
            "parents recorded"
        );
        Ok(child)
    }

    /// Detach a member from their household without deleting the record.
    pub fn remove_member_from_household(
        &self,
        member_id: MemberId,
    ) -> Result<FamilyMember, HouseholdServiceError> {
        let mut member = self.existing_member(member_id)?;
        let previous = member.household_id.take();
        self.repository.update_member(member.clone())?;

        info!(member_id = %member.id, household_id = ?previous, "member removed from household");
        Ok(member)
    }

    fn existing_member(&self, id: MemberId) -> Result<FamilyMember, HouseholdServiceError> {
        self.repository
            .member(id)?
            .ok_or(HouseholdServiceError::MemberNotFound(id))
    }
}

/// Error raised by the household service.
#[derive(Debug, thiserror::Error)]
pub enum HouseholdServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("household {0} not found")]
    HouseholdNotFound(HouseholdId),
    #[error("family member {0} not found")]
    MemberNotFound(MemberId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
