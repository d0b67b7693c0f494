use chrono::{Months, NaiveDate};

/// Where a birth date falls relative to an [`AgeCutoff`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BirthPosition {
    Before,
    OnCutoff,
    After,
}

/// The date exactly `years` calendar years before a reference day.
///
/// 29 February maps to 28 February in non-leap target years.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeCutoff {
    date: NaiveDate,
}

impl AgeCutoff {
    pub fn years_before(today: NaiveDate, years: u32) -> Self {
        let date = today
            .checked_sub_months(Months::new(years.saturating_mul(12)))
            .unwrap_or(NaiveDate::MIN);
        Self { date }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn classify(&self, birth_date: NaiveDate) -> BirthPosition {
        match birth_date.cmp(&self.date) {
            std::cmp::Ordering::Less => BirthPosition::Before,
            std::cmp::Ordering::Equal => BirthPosition::OnCutoff,
            std::cmp::Ordering::Greater => BirthPosition::After,
        }
    }

    /// Younger than the cutoff age.
    pub fn is_born_after(&self, birth_date: NaiveDate) -> bool {
        self.classify(birth_date) == BirthPosition::After
    }

    /// Older than the cutoff age.
    pub fn is_born_before(&self, birth_date: NaiveDate) -> bool {
        self.classify(birth_date) == BirthPosition::Before
    }
}
