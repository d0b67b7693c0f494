//! Household records and grant eligibility determination.

pub mod config;
pub mod eligibility;
pub mod error;
pub mod household;
pub mod telemetry;
