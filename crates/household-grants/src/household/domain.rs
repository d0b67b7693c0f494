use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for registered households.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HouseholdId(pub u64);

impl fmt::Display for HouseholdId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier wrapper for family members. Spouse and parent links hold these, never references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(pub u64);

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Housing classification recorded when a household is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HousingType {
    /// Public housing flat.
    #[serde(rename = "HDB")]
    Hdb,
    Condominium,
    Landed,
}

impl HousingType {
    pub const fn label(self) -> &'static str {
        match self {
            HousingType::Hdb => "HDB",
            HousingType::Condominium => "Condominium",
            HousingType::Landed => "Landed",
        }
    }

    pub const fn is_public_flat(self) -> bool {
        matches!(self, HousingType::Hdb)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Female,
    Male,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaritalStatus {
    Single,
    Married,
    Divorced,
    Widowed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OccupationType {
    Unemployed,
    Student,
    Employed,
}

/// A person record, optionally linked to a household, a spouse, and up to two parents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyMember {
    pub id: MemberId,
    pub name: String,
    pub gender: Gender,
    pub marital_status: MaritalStatus,
    pub occupation_type: OccupationType,
    pub annual_income: u64,
    pub birth_date: NaiveDate,
    pub household_id: Option<HouseholdId>,
    pub spouse_id: Option<MemberId>,
    pub parent1_id: Option<MemberId>,
    pub parent2_id: Option<MemberId>,
}

impl FamilyMember {
    /// Both parent links, when both are recorded.
    pub fn parent_ids(&self) -> Option<(MemberId, MemberId)> {
        match (self.parent1_id, self.parent2_id) {
            (Some(parent1), Some(parent2)) => Some((parent1, parent2)),
            _ => None,
        }
    }

    /// True when this record and `other` name each other as spouse.
    pub fn is_married_to(&self, other: &FamilyMember) -> bool {
        self.spouse_id == Some(other.id) && other.spouse_id == Some(self.id)
    }
}

/// A residential unit with its current (non-deleted) members attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Household {
    pub id: HouseholdId,
    pub housing_type: HousingType,
    pub members: Vec<FamilyMember>,
}

impl Household {
    pub fn combined_income(&self) -> u64 {
        self.members.iter().map(|member| member.annual_income).sum()
    }
}

/// Request body used to register a household.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHousehold {
    pub housing_type: HousingType,
}

/// Intake payload for a new family member before an id has been assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFamilyMember {
    pub household_id: HouseholdId,
    pub name: String,
    pub gender: Gender,
    pub marital_status: MaritalStatus,
    #[serde(default)]
    pub spouse_id: Option<MemberId>,
    pub occupation_type: OccupationType,
    pub annual_income: u64,
    pub birth_date: NaiveDate,
}

impl NewFamilyMember {
    pub(crate) fn into_member(self, id: MemberId) -> FamilyMember {
        FamilyMember {
            id,
            name: self.name.trim().to_string(),
            gender: self.gender,
            marital_status: self.marital_status,
            occupation_type: self.occupation_type,
            annual_income: self.annual_income,
            birth_date: self.birth_date,
            household_id: Some(self.household_id),
            spouse_id: self.spouse_id,
            parent1_id: None,
            parent2_id: None,
        }
    }
}

/// Payload linking two members as a married couple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarriageRequest {
    pub spouse1_id: MemberId,
    pub spouse2_id: MemberId,
}

/// Payload recording both parents of a child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentageRequest {
    pub child_id: MemberId,
    pub parent1_id: MemberId,
    pub parent2_id: MemberId,
}
