// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Card completeness evaluation.
//!
//! A completeness report says whether a person or card record has everything
//! needed to print a card. Reports are **computed**, not stored. Errors block
//! printing; warnings never affect `is_complete`.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::types::{Card, Person};

/// Error message when no photo is present.
pub const PHOTO_MISSING: &str = "Photo is missing";
/// Error message when the name is blank.
pub const NAME_REQUIRED: &str = "Name is required";
/// Error message when a person's university ID is blank.
pub const UNIVERSITY_ID_REQUIRED: &str = "University ID is required";
/// Error message when a card's ID number is blank.
pub const ID_NUMBER_REQUIRED: &str = "ID Number is required";
/// Error message when a card's expiry date has passed.
pub const CARD_EXPIRED: &str = "Card has expired";
/// Warning when a person has no department.
pub const DEPARTMENT_NOT_ASSIGNED: &str = "Department not assigned";
/// Warning when a card has no department text.
pub const DEPARTMENT_NOT_SPECIFIED: &str = "Department not specified";
/// Warning when a person has no Arabic name.
pub const ARABIC_NAME_MISSING: &str = "Arabic name is missing";
/// Report error for an unknown person id.
pub const PERSON_NOT_FOUND: &str = "Person not found";
/// Report error for an unknown card id.
pub const CARD_NOT_FOUND: &str = "Card not found";

/// A snapshot of which presentation fields a record is missing.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub has_photo: bool,
    pub has_name: bool,
    pub has_valid_id: bool,
    pub has_valid_expiry: bool,
    pub has_department: bool,
    /// True iff `errors` is empty.
    pub is_complete: bool,
    /// Blocking problems, in evaluation order.
    pub errors: Vec<String>,
    /// Informational problems, in evaluation order.
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Builds the report returned when the record does not exist.
    ///
    /// Every flag is false and `message` is the only error.
    #[must_use]
    pub fn not_found(message: &str) -> Self {
        Self {
            has_photo: false,
            has_name: false,
            has_valid_id: false,
            has_valid_expiry: false,
            has_department: false,
            is_complete: false,
            errors: vec![message.to_string()],
            warnings: Vec::new(),
        }
    }

    /// Report for a person id that does not exist.
    #[must_use]
    pub fn person_not_found() -> Self {
        Self::not_found(PERSON_NOT_FOUND)
    }

    /// Report for a card id that does not exist.
    #[must_use]
    pub fn card_not_found() -> Self {
        Self::not_found(CARD_NOT_FOUND)
    }
}

fn is_present(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Evaluates whether a person record is ready to be printed.
///
/// Persons have no expiry, so `has_valid_expiry` is always true.
#[must_use]
pub fn validate_person(person: &Person) -> ValidationReport {
    let has_photo: bool = is_present(person.photo_url.as_deref());
    let has_name: bool = !is_blank(&person.full_name_en);
    let has_valid_id: bool = !is_blank(&person.university_id);
    let has_department: bool = person.department_id.is_some();
    let has_valid_expiry: bool = true;

    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    if !has_photo {
        errors.push(String::from(PHOTO_MISSING));
    }
    if !has_name {
        errors.push(String::from(NAME_REQUIRED));
    }
    if !has_valid_id {
        errors.push(String::from(UNIVERSITY_ID_REQUIRED));
    }
    if !has_department {
        warnings.push(String::from(DEPARTMENT_NOT_ASSIGNED));
    }
    if !is_present(person.full_name_ar.as_deref()) {
        warnings.push(String::from(ARABIC_NAME_MISSING));
    }

    ValidationReport {
        has_photo,
        has_name,
        has_valid_id,
        has_valid_expiry,
        has_department,
        is_complete: errors.is_empty(),
        errors,
        warnings,
    }
}

/// Evaluates whether a card is ready to be printed at time `now`.
///
/// The expiry date is taken as midnight UTC at the start of that day, so a
/// card is already expired on its expiry date.
#[must_use]
pub fn validate_card(card: &Card, now: OffsetDateTime) -> ValidationReport {
    let has_photo: bool = is_present(card.photo_url.as_deref());
    let has_name: bool = !is_blank(&card.name);
    let has_valid_id: bool = !is_blank(&card.id_number);
    let has_department: bool = !is_blank(&card.department);

    let expired: bool = card
        .expiry_date
        .is_some_and(|date| date.midnight().assume_utc() <= now);
    let has_valid_expiry: bool = !expired;

    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    if !has_photo {
        errors.push(String::from(PHOTO_MISSING));
    }
    if !has_name {
        errors.push(String::from(NAME_REQUIRED));
    }
    if !has_valid_id {
        errors.push(String::from(ID_NUMBER_REQUIRED));
    }
    if !has_department {
        warnings.push(String::from(DEPARTMENT_NOT_SPECIFIED));
    }
    if expired {
        errors.push(String::from(CARD_EXPIRED));
    }

    ValidationReport {
        has_photo,
        has_name,
        has_valid_id,
        has_valid_expiry,
        has_department,
        is_complete: errors.is_empty(),
        errors,
        warnings,
    }
}
