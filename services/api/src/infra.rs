use chrono::NaiveDate;
use household_grants::eligibility::{EligibilityConfig, EligibilityEngine};
use household_grants::household::{HouseholdService, InMemoryHouseholdStore};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Record service and eligibility engine sharing one in-memory store.
#[derive(Clone)]
pub(crate) struct Registry {
    pub(crate) service: Arc<HouseholdService<InMemoryHouseholdStore>>,
    pub(crate) engine: Arc<EligibilityEngine<InMemoryHouseholdStore>>,
}

impl Registry {
    pub(crate) fn in_memory(config: EligibilityConfig) -> Self {
        let store = Arc::new(InMemoryHouseholdStore::default());
        Self {
            service: Arc::new(HouseholdService::new(store.clone())),
            engine: Arc::new(EligibilityEngine::new(store, config)),
        }
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_trims_and_reports_input() {
        assert_eq!(
            parse_date(" 2025-06-01 "),
            Ok(NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date"))
        );
        let error = parse_date("01/06/2025").expect_err("rejected");
        assert!(error.contains("'01/06/2025'"));
    }
}
