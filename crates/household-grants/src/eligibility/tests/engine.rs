use super::common::*;
use crate::eligibility::{
    EligibilityConfig, EligibilityEngine, EligibilityError, EligibilityFilter, EligibilityReport,
    Scheme,
};
use crate::household::{HouseholdRepository, HousingType, RepositoryError};
use std::sync::Arc;

#[test]
fn determination_is_repeatable_and_read_only() {
    let population = Population::default();
    married_family(&population, HousingType::Hdb);
    let before = population.store.households().expect("read succeeds");

    let engine = population.engine();
    let first = engine
        .determine(&EligibilityFilter::default(), today())
        .expect("determination succeeds");
    let second = engine
        .determine(&EligibilityFilter::default(), today())
        .expect("determination succeeds");

    assert_eq!(first, second);
    assert_eq!(population.store.households().expect("read succeeds"), before);
}

#[test]
fn store_failure_fails_the_whole_report() {
    let engine = EligibilityEngine::new(Arc::new(UnavailableStore), EligibilityConfig::default());

    match engine.determine(&EligibilityFilter::default(), today()) {
        Err(EligibilityError::Repository(RepositoryError::Unavailable(reason))) => {
            assert_eq!(reason, "database offline");
        }
        other => panic!("expected repository failure, got {other:?}"),
    }
}

#[test]
fn empty_store_reports_five_empty_lists() {
    let report = Population::default()
        .engine()
        .determine(&EligibilityFilter::default(), today())
        .expect("determination succeeds");

    assert_eq!(report, EligibilityReport::default());
}

#[test]
fn report_iterates_schemes_in_fixed_order() {
    let report = EligibilityReport::default();
    let order: Vec<Scheme> = report.iter().map(|(scheme, _)| scheme).collect();
    assert_eq!(order, Scheme::ALL.to_vec());
}

#[test]
fn serialized_report_uses_scheme_keys() {
    let population = Population::default();
    let family = married_family(&population, HousingType::Hdb);

    let report = population
        .engine()
        .determine(&EligibilityFilter::default(), today())
        .expect("determination succeeds");
    let json = serde_json::to_value(&report).expect("report serializes");

    for scheme in Scheme::ALL {
        assert!(json.get(scheme.key()).is_some(), "missing key {}", scheme.key());
    }
    let entry = &json["familyTogethernessScheme"][0];
    assert_eq!(entry["householdId"], family.household.0);
    assert_eq!(entry["housingType"], "HDB");
    assert_eq!(entry["members"][0]["id"], family.child.0);
    assert_eq!(entry["members"][0]["parent1Id"], family.parent1.0);
}

#[test]
fn custom_thresholds_flow_into_every_scheme() {
    let population = Population::default();
    let household = population.household(HousingType::Hdb);
    population.member(household, "Forty Five", years_ago(45), 10_000);

    let config = EligibilityConfig {
        elder_min_age_years: 40,
        ..EligibilityConfig::default()
    };
    let engine = EligibilityEngine::new(population.store.clone(), config);
    assert_eq!(engine.config().elder_min_age_years, 40);

    let report = engine
        .determine(&EligibilityFilter::default(), today())
        .expect("determination succeeds");
    assert_eq!(report.elder_bonus.len(), 1);
    assert!(population
        .engine()
        .determine(&EligibilityFilter::default(), today())
        .expect("determination succeeds")
        .elder_bonus
        .is_empty());
}
