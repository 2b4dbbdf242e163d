// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Person type is not one of student, staff, or visitor.
    #[error("Invalid person type: '{0}'. Must be student, staff, or visitor")]
    InvalidPersonType(String),
    /// Person status is not recognized.
    #[error("Invalid person status: '{0}'. Must be active, suspended, or expired")]
    InvalidPersonStatus(String),
    /// Card status is not recognized.
    #[error("Invalid card status: '{0}'. Must be active, expired, suspended, or revoked")]
    InvalidCardStatus(String),
    /// A name field is empty or invalid.
    #[error("Invalid name: {0}")]
    InvalidName(String),
    /// University ID is empty or invalid.
    #[error("Invalid university ID: {0}")]
    InvalidUniversityId(String),
    /// Card ID number is empty or invalid.
    #[error("Invalid ID number: {0}")]
    InvalidIdNumber(String),
    /// Structure code is empty or invalid.
    #[error("Invalid code: {0}")]
    InvalidCode(String),
    /// Program duration is out of range.
    #[error("Invalid program duration: {years} years. Must be between 1 and 10")]
    InvalidDuration {
        /// The rejected duration.
        years: i32,
    },
    /// Failed to parse a calendar date.
    #[error("Failed to parse date '{date_string}': {error}")]
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parser message.
        error: String,
    },
}
