//! Grant eligibility determination over the household store.
//!
//! Each scheme is evaluated independently against the store and post-filtered on its own;
//! the report is assembled only once all five lists are complete, so a store failure in any
//! scheme fails the whole determination.

pub mod age;
mod config;
mod filter;
pub mod router;
mod schemes;
mod togetherness;

#[cfg(test)]
mod tests;

pub use age::{AgeCutoff, BirthPosition};
pub use config::EligibilityConfig;
pub use filter::EligibilityFilter;
pub use router::eligibility_router;
pub use togetherness::spouse_link_is_symmetric;

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::household::{
    FamilyMember, Household, HouseholdId, HouseholdRepository, HousingType, RepositoryError,
};

/// The benefit schemes the engine evaluates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Scheme {
    StudentEncouragementBonus,
    FamilyTogethernessScheme,
    ElderBonus,
    BabySunshineGrant,
    YoloGstGrant,
}

impl Scheme {
    pub const ALL: [Scheme; 5] = [
        Scheme::StudentEncouragementBonus,
        Scheme::FamilyTogethernessScheme,
        Scheme::ElderBonus,
        Scheme::BabySunshineGrant,
        Scheme::YoloGstGrant,
    ];

    /// Key used for the scheme in serialized reports.
    pub const fn key(self) -> &'static str {
        match self {
            Scheme::StudentEncouragementBonus => "studentEncouragementBonus",
            Scheme::FamilyTogethernessScheme => "familyTogethernessScheme",
            Scheme::ElderBonus => "elderBonus",
            Scheme::BabySunshineGrant => "babySunshineGrant",
            Scheme::YoloGstGrant => "yoloGstGrant",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Scheme::StudentEncouragementBonus => "Student Encouragement Bonus",
            Scheme::FamilyTogethernessScheme => "Family Togetherness Scheme",
            Scheme::ElderBonus => "Elder Bonus",
            Scheme::BabySunshineGrant => "Baby Sunshine Grant",
            Scheme::YoloGstGrant => "YOLO GST Grant",
        }
    }
}

/// A household paired with the members that qualify it for one scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibleHousehold {
    pub household_id: HouseholdId,
    pub housing_type: HousingType,
    pub members: Vec<FamilyMember>,
}

impl From<Household> for EligibleHousehold {
    fn from(household: Household) -> Self {
        Self {
            household_id: household.id,
            housing_type: household.housing_type,
            members: household.members,
        }
    }
}

/// Qualifying households per scheme.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityReport {
    pub student_encouragement_bonus: Vec<EligibleHousehold>,
    pub family_togetherness_scheme: Vec<EligibleHousehold>,
    pub elder_bonus: Vec<EligibleHousehold>,
    pub baby_sunshine_grant: Vec<EligibleHousehold>,
    pub yolo_gst_grant: Vec<EligibleHousehold>,
}

impl EligibilityReport {
    pub fn households(&self, scheme: Scheme) -> &[EligibleHousehold] {
        match scheme {
            Scheme::StudentEncouragementBonus => &self.student_encouragement_bonus,
            Scheme::FamilyTogethernessScheme => &self.family_togetherness_scheme,
            Scheme::ElderBonus => &self.elder_bonus,
            Scheme::BabySunshineGrant => &self.baby_sunshine_grant,
            Scheme::YoloGstGrant => &self.yolo_gst_grant,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Scheme, &[EligibleHousehold])> + '_ {
        Scheme::ALL
            .into_iter()
            .map(move |scheme| (scheme, self.households(scheme)))
    }
}

/// Error raised by the eligibility engine.
#[derive(Debug, thiserror::Error)]
pub enum EligibilityError {
    #[error("householdSize must be a positive integer (found {0})")]
    InvalidHouseholdSize(String),
    #[error("asOf must be a YYYY-MM-DD date (found {0})")]
    InvalidAsOf(String),
    #[error("household store read failed: {0}")]
    Repository(#[from] RepositoryError),
}

/// Read-only evaluator applying the scheme rules to the household store.
pub struct EligibilityEngine<R: ?Sized> {
    config: EligibilityConfig,
    repository: Arc<R>,
}

impl<R> EligibilityEngine<R>
where
    R: HouseholdRepository + ?Sized + 'static,
{
    pub fn new(repository: Arc<R>, config: EligibilityConfig) -> Self {
        Self { config, repository }
    }

    pub fn config(&self) -> &EligibilityConfig {
        &self.config
    }

    /// Evaluate every scheme as of `today`, narrowed by `filter`.
    pub fn determine(
        &self,
        filter: &EligibilityFilter,
        today: NaiveDate,
    ) -> Result<EligibilityReport, EligibilityError> {
        let household_size = filter.validated_household_size()?;

        let report = self.assemble(today, household_size).map_err(|source| {
            error!(error = %source, %today, "eligibility determination aborted");
            EligibilityError::Repository(source)
        })?;

        info!(
            %today,
            household_size = ?household_size,
            student_encouragement_bonus = report.student_encouragement_bonus.len(),
            family_togetherness_scheme = report.family_togetherness_scheme.len(),
            elder_bonus = report.elder_bonus.len(),
            baby_sunshine_grant = report.baby_sunshine_grant.len(),
            yolo_gst_grant = report.yolo_gst_grant.len(),
            "eligibility determined"
        );
        Ok(report)
    }

    fn assemble(
        &self,
        today: NaiveDate,
        household_size: Option<usize>,
    ) -> Result<EligibilityReport, RepositoryError> {
        Ok(EligibilityReport {
            student_encouragement_bonus: self.evaluate(
                Scheme::StudentEncouragementBonus,
                today,
                household_size,
            )?,
            family_togetherness_scheme: self.evaluate(
                Scheme::FamilyTogethernessScheme,
                today,
                household_size,
            )?,
            elder_bonus: self.evaluate(Scheme::ElderBonus, today, household_size)?,
            baby_sunshine_grant: self.evaluate(Scheme::BabySunshineGrant, today, household_size)?,
            yolo_gst_grant: self.evaluate(Scheme::YoloGstGrant, today, household_size)?,
        })
    }

    /// Run one scheme predicate and apply the household-size filter to its output.
    pub fn evaluate(
        &self,
        scheme: Scheme,
        today: NaiveDate,
        household_size: Option<usize>,
    ) -> Result<Vec<EligibleHousehold>, RepositoryError> {
        let repository = self.repository.as_ref();
        let config = &self.config;

        let results = match scheme {
            Scheme::StudentEncouragementBonus => {
                schemes::student_encouragement_bonus(repository, config, today)?
            }
            Scheme::FamilyTogethernessScheme => {
                togetherness::family_togetherness_scheme(repository, config, today)?
            }
            Scheme::ElderBonus => schemes::elder_bonus(repository, config, today)?,
            Scheme::BabySunshineGrant => schemes::baby_sunshine_grant(repository, config, today)?,
            Scheme::YoloGstGrant => schemes::yolo_gst_grant(repository, config)?,
        };

        filter::retain_household_size(repository, results, household_size)
    }
}
