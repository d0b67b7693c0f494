//! Household and family-member records: the store abstraction the eligibility engine reads
//! from, an in-memory implementation, and the record-management service and routes.

pub mod domain;
pub mod memory;
pub mod repository;
pub mod router;
pub mod service;
pub mod validation;

pub use domain::{
    FamilyMember, Gender, Household, HouseholdId, HousingType, MaritalStatus, MarriageRequest,
    MemberId, NewFamilyMember, NewHousehold, OccupationType, ParentageRequest,
};
pub use memory::InMemoryHouseholdStore;
pub use repository::{HouseholdRepository, RepositoryError};
pub use router::household_router;
pub use service::{HouseholdService, HouseholdServiceError};
pub use validation::ValidationError;
