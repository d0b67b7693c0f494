use crate::infra::Registry;
use chrono::{Local, NaiveDate};
use clap::Args;
use household_grants::eligibility::{AgeCutoff, EligibilityConfig, EligibilityFilter};
use household_grants::error::AppError;
use household_grants::household::{
    Gender, HouseholdId, HouseholdRepository, HouseholdService, HousingType, MaritalStatus,
    MarriageRequest, MemberId, NewFamilyMember, OccupationType, ParentageRequest,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Only report households with exactly this many members.
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) household_size: Option<i64>,
    /// Evaluation date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
    /// Print the report as JSON instead of a summary.
    #[arg(long)]
    pub(crate) json: bool,
}

/// Households created by [`seed_demo_population`].
#[derive(Debug, Clone, Copy)]
pub(crate) struct DemoPopulation {
    pub(crate) young_family: HouseholdId,
    pub(crate) retired_couple: HouseholdId,
    pub(crate) lone_elder: HouseholdId,
    pub(crate) professional: HouseholdId,
}

struct Person {
    name: &'static str,
    gender: Gender,
    occupation_type: OccupationType,
    age_years: u32,
    annual_income: u64,
}

impl Person {
    const fn new(
        name: &'static str,
        gender: Gender,
        occupation_type: OccupationType,
        age_years: u32,
        annual_income: u64,
    ) -> Self {
        Self {
            name,
            gender,
            occupation_type,
            age_years,
            annual_income,
        }
    }
}

fn enrol<R>(
    service: &HouseholdService<R>,
    household_id: HouseholdId,
    person: Person,
    today: NaiveDate,
) -> Result<MemberId, AppError>
where
    R: HouseholdRepository + 'static,
{
    // Birthdays fall one day after the anniversary so the members stay strictly inside
    // each age threshold.
    let birth_date = AgeCutoff::years_before(today, person.age_years)
        .date()
        .succ_opt()
        .unwrap_or(today);

    let member = service.add_member(
        NewFamilyMember {
            household_id,
            name: person.name.to_string(),
            gender: person.gender,
            marital_status: MaritalStatus::Single,
            spouse_id: None,
            occupation_type: person.occupation_type,
            annual_income: person.annual_income,
            birth_date,
        },
        today,
    )?;
    Ok(member.id)
}

fn enrol_all<R, const N: usize>(
    service: &HouseholdService<R>,
    household_id: HouseholdId,
    people: [Person; N],
    today: NaiveDate,
) -> Result<[MemberId; N], AppError>
where
    R: HouseholdRepository + 'static,
{
    let mut ids = [MemberId(0); N];
    for (slot, person) in ids.iter_mut().zip(people) {
        *slot = enrol(service, household_id, person, today)?;
    }
    Ok(ids)
}

fn marry<R>(
    service: &HouseholdService<R>,
    spouse1_id: MemberId,
    spouse2_id: MemberId,
) -> Result<(), AppError>
where
    R: HouseholdRepository + 'static,
{
    service.set_couple_as_married(MarriageRequest {
        spouse1_id,
        spouse2_id,
    })?;
    Ok(())
}

/// Register a small population that touches every scheme as of `today`.
pub(crate) fn seed_demo_population<R>(
    service: &HouseholdService<R>,
    today: NaiveDate,
) -> Result<DemoPopulation, AppError>
where
    R: HouseholdRepository + 'static,
{
    use Gender::{Female, Male};
    use OccupationType::{Employed, Student, Unemployed};

    let young_family = service.create_household(HousingType::Hdb)?.id;
    let [father, mother, toddler, pupil] = enrol_all(
        service,
        young_family,
        [
            Person::new("Tan Wei Ming", Male, Employed, 41, 58_000),
            Person::new("Lim Hui Xin", Female, Employed, 39, 34_000),
            Person::new("Tan Kai", Male, Unemployed, 2, 0),
            Person::new("Tan Mei", Female, Student, 11, 0),
        ],
        today,
    )?;
    marry(service, father, mother)?;
    for child_id in [toddler, pupil] {
        service.set_parents_for_child(ParentageRequest {
            child_id,
            parent1_id: father,
            parent2_id: mother,
        })?;
    }

    let retired_couple = service.create_household(HousingType::Landed)?.id;
    let [husband, wife] = enrol_all(
        service,
        retired_couple,
        [
            Person::new("Ong Beng Huat", Male, Unemployed, 71, 0),
            Person::new("Goh Siew Lan", Female, Unemployed, 68, 0),
        ],
        today,
    )?;
    marry(service, husband, wife)?;

    let lone_elder = service.create_household(HousingType::Hdb)?.id;
    enrol_all(
        service,
        lone_elder,
        [Person::new("Ramasamy Pillai", Male, Employed, 63, 21_000)],
        today,
    )?;

    let professional = service.create_household(HousingType::Condominium)?.id;
    enrol_all(
        service,
        professional,
        [Person::new("Chua Li Ting", Female, Employed, 34, 185_000)],
        today,
    )?;

    Ok(DemoPopulation {
        young_family,
        retired_couple,
        lone_elder,
        professional,
    })
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        household_size,
        as_of,
        json,
    } = args;

    let today = as_of.unwrap_or_else(|| Local::now().date_naive());
    let registry = Registry::in_memory(EligibilityConfig::default());
    seed_demo_population(&registry.service, today)?;

    let filter = EligibilityFilter { household_size };
    let report = registry.engine.determine(&filter, today)?;

    if json {
        let rendered = serde_json::to_string_pretty(&report).map_err(std::io::Error::from)?;
        println!("{rendered}");
        return Ok(());
    }

    println!("Grant eligibility as of {today}");
    if let Some(size) = household_size {
        println!("Households with exactly {size} members");
    }
    for (scheme, households) in report.iter() {
        println!("\n{} ({} households)", scheme.label(), households.len());
        for entry in households {
            let names: Vec<&str> = entry
                .members
                .iter()
                .map(|member| member.name.as_str())
                .collect();
            println!(
                "- household {} [{}]: {}",
                entry.household_id,
                entry.housing_type.label(),
                names.join(", ")
            );
        }
    }

    Ok(())
}
