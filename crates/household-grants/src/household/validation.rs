use chrono::NaiveDate;

use super::domain::{MemberId, NewFamilyMember};

const MAX_NAME_LENGTH: usize = 120;

/// Field-level rejection raised before a member is written.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must be between 1 and {max} characters (found {found})")]
    NameLength { max: usize, found: usize },
    #[error("birth date {birth_date} must be before {today}")]
    BirthDateNotInPast {
        birth_date: NaiveDate,
        today: NaiveDate,
    },
    #[error("member {0} cannot reference itself")]
    SelfReference(MemberId),
    #[error("parents of member {child} must be two different members")]
    DuplicateParent { child: MemberId },
}

pub(crate) fn validate_new_member(
    member: &NewFamilyMember,
    today: NaiveDate,
) -> Result<(), ValidationError> {
    let length = member.name.trim().chars().count();
    if length == 0 || length > MAX_NAME_LENGTH {
        return Err(ValidationError::NameLength {
            max: MAX_NAME_LENGTH,
            found: length,
        });
    }

    if member.birth_date >= today {
        return Err(ValidationError::BirthDateNotInPast {
            birth_date: member.birth_date,
            today,
        });
    }

    Ok(())
}

pub(crate) fn validate_marriage(
    spouse1: MemberId,
    spouse2: MemberId,
) -> Result<(), ValidationError> {
    if spouse1 == spouse2 {
        return Err(ValidationError::SelfReference(spouse1));
    }
    Ok(())
}

pub(crate) fn validate_parentage(
    child: MemberId,
    parent1: MemberId,
    parent2: MemberId,
) -> Result<(), ValidationError> {
    if parent1 == child || parent2 == child {
        return Err(ValidationError::SelfReference(child));
    }
    if parent1 == parent2 {
        return Err(ValidationError::DuplicateParent { child });
    }
    Ok(())
}
