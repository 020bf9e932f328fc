use chrono::NaiveDate;

use super::entity::Film;
use crate::domain::{DomainError, DomainResult};

const MAX_DESCRIPTION_LEN: usize = 200;

/// The day of the first public film screening. No release date may precede it.
pub fn earliest_release_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1895, 12, 28).expect("static date")
}

/// Validates all Film invariants
pub fn validate_film(film: &Film) -> DomainResult<()> {
    validate_name(&film.name)?;
    validate_description(&film.description)?;
    validate_release_date(film.release_date)?;
    validate_duration(film.duration)?;
    Ok(())
}

fn validate_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Film name cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_description(description: &str) -> DomainResult<()> {
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(DomainError::InvariantViolation(format!(
            "Film description exceeds {} characters",
            MAX_DESCRIPTION_LEN
        )));
    }
    Ok(())
}

fn validate_release_date(date: NaiveDate) -> DomainResult<()> {
    if date < earliest_release_date() {
        return Err(DomainError::InvariantViolation(format!(
            "Release date {} precedes {}",
            date,
            earliest_release_date()
        )));
    }
    Ok(())
}

fn validate_duration(duration: i32) -> DomainResult<()> {
    if duration <= 0 {
        return Err(DomainError::InvariantViolation(
            "Film duration must be positive".to_string(),
        ));
    }
    Ok(())
}
