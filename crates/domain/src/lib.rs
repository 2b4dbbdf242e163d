// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod completeness;
mod error;
mod identifier;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use completeness::{
    ARABIC_NAME_MISSING, CARD_EXPIRED, CARD_NOT_FOUND, DEPARTMENT_NOT_ASSIGNED,
    DEPARTMENT_NOT_SPECIFIED, ID_NUMBER_REQUIRED, NAME_REQUIRED, PERSON_NOT_FOUND, PHOTO_MISSING,
    UNIVERSITY_ID_REQUIRED, ValidationReport, validate_card, validate_person,
};
pub use error::DomainError;
pub use identifier::{STAFF_PREFIX, STUDENT_FALLBACK_PREFIX, SequenceKey, VISITOR_PREFIX};
pub use types::{
    Card, CardFilter, CardStatus, CardUpdate, College, CollegeUpdate, Department, DepartmentUpdate,
    Level, Person, PersonFilter, PersonStatus, PersonType, PersonUpdate, Program, ProgramUpdate,
};
pub use validation::{
    format_iso_date, parse_iso_date, validate_card_fields, validate_level_fields,
    validate_person_fields, validate_program_duration, validate_structure_fields,
};
