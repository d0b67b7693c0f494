use std::collections::BTreeMap;
use std::sync::Arc;

use axum::response::Response;
use chrono::{Months, NaiveDate};
use serde_json::Value;

use crate::eligibility::{EligibilityConfig, EligibilityEngine};
use crate::household::{
    FamilyMember, Gender, Household, HouseholdId, HouseholdRepository, HousingType,
    InMemoryHouseholdStore, MaritalStatus, MemberId, NewFamilyMember, OccupationType,
    RepositoryError,
};

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date")
}

pub(super) fn years_ago(years: u32) -> NaiveDate {
    today()
        .checked_sub_months(Months::new(years * 12))
        .expect("valid date")
}

/// Seeds an in-memory store the way the record service would, with direct access for
/// simulating drift in relationship links.
#[derive(Default, Clone)]
pub(super) struct Population {
    pub(super) store: Arc<InMemoryHouseholdStore>,
}

impl Population {
    pub(super) fn household(&self, housing_type: HousingType) -> HouseholdId {
        self.store
            .insert_household(housing_type)
            .expect("household inserted")
            .id
    }

    pub(super) fn member(
        &self,
        household_id: HouseholdId,
        name: &str,
        birth_date: NaiveDate,
        annual_income: u64,
    ) -> MemberId {
        self.store
            .insert_member(NewFamilyMember {
                household_id,
                name: name.to_string(),
                gender: Gender::Female,
                marital_status: MaritalStatus::Single,
                spouse_id: None,
                occupation_type: OccupationType::Employed,
                annual_income,
                birth_date,
            })
            .expect("member inserted")
            .id
    }

    pub(super) fn fetch(&self, id: MemberId) -> FamilyMember {
        self.store
            .member(id)
            .expect("read succeeds")
            .expect("member present")
    }

    pub(super) fn set_spouse(&self, id: MemberId, spouse_id: Option<MemberId>) {
        let mut member = self.fetch(id);
        member.spouse_id = spouse_id;
        member.marital_status = if spouse_id.is_some() {
            MaritalStatus::Married
        } else {
            MaritalStatus::Divorced
        };
        self.store.update_member(member).expect("member updated");
    }

    pub(super) fn marry(&self, first: MemberId, second: MemberId) {
        self.set_spouse(first, Some(second));
        self.set_spouse(second, Some(first));
    }

    pub(super) fn set_parents(&self, child: MemberId, parent1: MemberId, parent2: MemberId) {
        let mut member = self.fetch(child);
        member.parent1_id = Some(parent1);
        member.parent2_id = Some(parent2);
        self.store.update_member(member).expect("member updated");
    }

    pub(super) fn engine(&self) -> EligibilityEngine<InMemoryHouseholdStore> {
        EligibilityEngine::new(self.store.clone(), EligibilityConfig::default())
    }
}

/// A married couple with a young child, all living in one household.
pub(super) struct Family {
    pub(super) household: HouseholdId,
    pub(super) parent1: MemberId,
    pub(super) parent2: MemberId,
    pub(super) child: MemberId,
}

pub(super) fn married_family(population: &Population, housing_type: HousingType) -> Family {
    let household = population.household(housing_type);
    let parent1 = population.member(household, "Parent1", years_ago(45), 100_000);
    let parent2 = population.member(household, "Parent2", years_ago(45), 0);
    let child = population.member(household, "Child", years_ago(10), 0);
    population.marry(parent1, parent2);
    population.set_parents(child, parent1, parent2);
    Family {
        household,
        parent1,
        parent2,
        child,
    }
}

pub(super) fn member_ids(members: &[FamilyMember]) -> Vec<MemberId> {
    members.iter().map(|member| member.id).collect()
}

pub(super) struct UnavailableStore;

impl HouseholdRepository for UnavailableStore {
    fn households(&self) -> Result<Vec<Household>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn household(&self, _id: HouseholdId) -> Result<Option<Household>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn member(&self, _id: MemberId) -> Result<Option<FamilyMember>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn members_of(&self, _id: HouseholdId) -> Result<Vec<FamilyMember>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn income_by_household(&self) -> Result<BTreeMap<HouseholdId, u64>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn insert_household(&self, _housing_type: HousingType) -> Result<Household, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn insert_member(&self, _member: NewFamilyMember) -> Result<FamilyMember, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update_member(&self, _member: FamilyMember) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn soft_delete_household(&self, _id: HouseholdId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

/// Serves scans from a real store but fails every lookup by id or by household.
pub(super) struct LookupFailureStore {
    pub(super) inner: Arc<InMemoryHouseholdStore>,
}

impl HouseholdRepository for LookupFailureStore {
    fn households(&self) -> Result<Vec<Household>, RepositoryError> {
        self.inner.households()
    }

    fn household(&self, id: HouseholdId) -> Result<Option<Household>, RepositoryError> {
        self.inner.household(id)
    }

    fn member(&self, _id: MemberId) -> Result<Option<FamilyMember>, RepositoryError> {
        Err(RepositoryError::Unavailable("connection reset".to_string()))
    }

    fn members_of(&self, _id: HouseholdId) -> Result<Vec<FamilyMember>, RepositoryError> {
        Err(RepositoryError::Unavailable("connection reset".to_string()))
    }

    fn income_by_household(&self) -> Result<BTreeMap<HouseholdId, u64>, RepositoryError> {
        self.inner.income_by_household()
    }

    fn insert_household(&self, housing_type: HousingType) -> Result<Household, RepositoryError> {
        self.inner.insert_household(housing_type)
    }

    fn insert_member(&self, member: NewFamilyMember) -> Result<FamilyMember, RepositoryError> {
        self.inner.insert_member(member)
    }

    fn update_member(&self, member: FamilyMember) -> Result<(), RepositoryError> {
        self.inner.update_member(member)
    }

    fn soft_delete_household(&self, id: HouseholdId) -> Result<(), RepositoryError> {
        self.inner.soft_delete_household(id)
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
