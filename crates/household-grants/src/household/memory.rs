use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use super::domain::{FamilyMember, Household, HouseholdId, HousingType, MemberId, NewFamilyMember};
use super::repository::{HouseholdRepository, RepositoryError};

/// Process-local store with soft-delete bookkeeping. Cloning shares the underlying maps.
#[derive(Default, Clone)]
pub struct InMemoryHouseholdStore {
    state: Arc<Mutex<StoreState>>,
}

#[derive(Default)]
struct StoreState {
    last_household_id: u64,
    last_member_id: u64,
    households: BTreeMap<HouseholdId, StoredHousehold>,
    members: BTreeMap<MemberId, StoredMember>,
}

struct StoredHousehold {
    housing_type: HousingType,
    deleted_at: Option<DateTime<Utc>>,
}

struct StoredMember {
    member: FamilyMember,
    deleted_at: Option<DateTime<Utc>>,
}

impl StoreState {
    fn live_members(&self) -> impl Iterator<Item = &FamilyMember> {
        self.members
            .values()
            .filter(|stored| stored.deleted_at.is_none())
            .map(|stored| &stored.member)
    }

    fn roster(&self, household_id: HouseholdId) -> Vec<FamilyMember> {
        self.live_members()
            .filter(|member| member.household_id == Some(household_id))
            .cloned()
            .collect()
    }

    fn assemble(&self, id: HouseholdId) -> Option<Household> {
        let stored = self.households.get(&id)?;
        if stored.deleted_at.is_some() {
            return None;
        }
        Some(Household {
            id,
            housing_type: stored.housing_type,
            members: self.roster(id),
        })
    }

    fn is_live_household(&self, id: HouseholdId) -> bool {
        self.households
            .get(&id)
            .is_some_and(|stored| stored.deleted_at.is_none())
    }
}

impl InMemoryHouseholdStore {
    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().expect("household store mutex poisoned")
    }
}

impl HouseholdRepository for InMemoryHouseholdStore {
    fn households(&self) -> Result<Vec<Household>, RepositoryError> {
        let guard = self.lock();
        Ok(guard
            .households
            .keys()
            .filter_map(|id| guard.assemble(*id))
            .collect())
    }

    fn household(&self, id: HouseholdId) -> Result<Option<Household>, RepositoryError> {
        Ok(self.lock().assemble(id))
    }

    fn member(&self, id: MemberId) -> Result<Option<FamilyMember>, RepositoryError> {
        let guard = self.lock();
        Ok(guard
            .members
            .get(&id)
            .filter(|stored| stored.deleted_at.is_none())
            .map(|stored| stored.member.clone()))
    }

    fn members_of(&self, household_id: HouseholdId) -> Result<Vec<FamilyMember>, RepositoryError> {
        Ok(self.lock().roster(household_id))
    }

    fn income_by_household(&self) -> Result<BTreeMap<HouseholdId, u64>, RepositoryError> {
        let guard = self.lock();
        let mut totals: BTreeMap<HouseholdId, u64> = BTreeMap::new();

        for member in guard.live_members() {
            let Some(household_id) = member.household_id else {
                continue;
            };
            if guard.is_live_household(household_id) {
                let total = totals.entry(household_id).or_insert(0);
                *total = total.saturating_add(member.annual_income);
            }
        }

        Ok(totals)
    }

    fn insert_household(&self, housing_type: HousingType) -> Result<Household, RepositoryError> {
        let mut guard = self.lock();
        guard.last_household_id += 1;
        let id = HouseholdId(guard.last_household_id);
        guard.households.insert(
            id,
            StoredHousehold {
                housing_type,
                deleted_at: None,
            },
        );
        Ok(Household {
            id,
            housing_type,
            members: Vec::new(),
        })
    }

    fn insert_member(&self, member: NewFamilyMember) -> Result<FamilyMember, RepositoryError> {
        let mut guard = self.lock();
        if !guard.is_live_household(member.household_id) {
            return Err(RepositoryError::NotFound);
        }

        guard.last_member_id += 1;
        let member = member.into_member(MemberId(guard.last_member_id));
        guard.members.insert(
            member.id,
            StoredMember {
                member: member.clone(),
                deleted_at: None,
            },
        );
        Ok(member)
    }

    fn update_member(&self, member: FamilyMember) -> Result<(), RepositoryError> {
        let mut guard = self.lock();
        match guard.members.get_mut(&member.id) {
            Some(stored) if stored.deleted_at.is_none() => {
                stored.member = member;
                Ok(())
            }
            _ => Err(RepositoryError::NotFound),
        }
    }

    fn soft_delete_household(&self, id: HouseholdId) -> Result<(), RepositoryError> {
        let mut guard = self.lock();
        let now = Utc::now();
        match guard.households.get_mut(&id) {
            Some(stored) if stored.deleted_at.is_none() => stored.deleted_at = Some(now),
            _ => return Err(RepositoryError::NotFound),
        }

        for stored in guard.members.values_mut() {
            if stored.member.household_id == Some(id) && stored.deleted_at.is_none() {
                stored.deleted_at = Some(now);
            }
        }
        Ok(())
    }
}
