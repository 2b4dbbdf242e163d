// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::error::DomainError;
use crate::types::{Card, Level, Person};

const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Validates that a person's required fields are present.
///
/// This checks what a record needs to be stored. It does NOT check for
/// uniqueness of the university ID (that requires persistence context) and it
/// is distinct from the completeness report, which checks printability.
///
/// # Errors
///
/// Returns an error if:
/// - The English name is blank
/// - The university ID is blank
pub fn validate_person_fields(person: &Person) -> Result<(), DomainError> {
    if person.full_name_en.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "English name cannot be empty",
        )));
    }

    if person.university_id.trim().is_empty() {
        return Err(DomainError::InvalidUniversityId(String::from(
            "University ID cannot be empty",
        )));
    }

    Ok(())
}

/// Validates that a card's required fields are present.
///
/// # Errors
///
/// Returns an error if:
/// - The name is blank
/// - The ID number is blank
pub fn validate_card_fields(card: &Card) -> Result<(), DomainError> {
    if card.name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Card name cannot be empty",
        )));
    }

    if card.id_number.trim().is_empty() {
        return Err(DomainError::InvalidIdNumber(String::from(
            "ID number cannot be empty",
        )));
    }

    Ok(())
}

/// Validates the shared fields of colleges, departments, and programs.
///
/// # Errors
///
/// Returns an error if the code or either name is blank.
pub fn validate_structure_fields(
    code: &str,
    name_en: &str,
    name_ar: &str,
) -> Result<(), DomainError> {
    if code.trim().is_empty() {
        return Err(DomainError::InvalidCode(String::from(
            "Code cannot be empty",
        )));
    }

    if code.trim().contains(char::is_whitespace) {
        return Err(DomainError::InvalidCode(format!(
            "Code '{}' cannot contain whitespace",
            code.trim()
        )));
    }

    if name_en.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "English name cannot be empty",
        )));
    }

    if name_ar.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Arabic name cannot be empty",
        )));
    }

    Ok(())
}

/// Validates a program's nominal duration.
///
/// # Errors
///
/// Returns an error if the duration is outside 1..=10 years.
pub fn validate_program_duration(years: i32) -> Result<(), DomainError> {
    if !(1..=10).contains(&years) {
        return Err(DomainError::InvalidDuration { years });
    }
    Ok(())
}

/// Validates a level's names.
///
/// # Errors
///
/// Returns an error if either name is blank.
pub fn validate_level_fields(level: &Level) -> Result<(), DomainError> {
    if level.name_en.trim().is_empty() || level.name_ar.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Level names cannot be empty",
        )));
    }
    Ok(())
}

/// Parses a `YYYY-MM-DD` calendar date.
///
/// # Errors
///
/// Returns an error if the string is not a valid date.
pub fn parse_iso_date(value: &str) -> Result<Date, DomainError> {
    Date::parse(value.trim(), ISO_DATE).map_err(|e| DomainError::DateParseError {
        date_string: value.to_string(),
        error: e.to_string(),
    })
}

/// Formats a calendar date as `YYYY-MM-DD`.
#[must_use]
pub fn format_iso_date(date: Date) -> String {
    // Numeric-only format; cannot fail for a valid Date.
    date.format(ISO_DATE).unwrap_or_default()
}
