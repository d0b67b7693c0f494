use serde::{Deserialize, Serialize};

/// Age offsets and income ceilings used by the scheme predicates.
///
/// Every comparison against these values is strict: a household whose combined income equals
/// a ceiling does not qualify.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityConfig {
    pub student_max_age_years: u32,
    pub student_income_ceiling: u64,
    pub elder_min_age_years: u32,
    pub baby_max_age_years: u32,
    pub yolo_income_ceiling: u64,
    pub togetherness_child_max_age_years: u32,
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self {
            student_max_age_years: 16,
            student_income_ceiling: 150_000,
            elder_min_age_years: 50,
            baby_max_age_years: 5,
            yolo_income_ceiling: 100_000,
            togetherness_child_max_age_years: 18,
        }
    }
}
