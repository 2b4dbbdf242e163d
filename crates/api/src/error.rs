// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use campus_id_domain::DomainError;
use campus_id_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain and persistence errors and represent the
/// API contract. The `message` of each variant is safe to show to a client.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Invalid input was provided.
    #[error("Invalid input for field '{field}': {message}")]
    InvalidInput {
        /// The wire name of the field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A value that must be unique is already taken.
    #[error("Duplicate value: {message}")]
    DuplicateValue {
        /// The wire name of the field, when a single field is at fault.
        field: Option<String>,
        /// A human-readable description of the conflict.
        message: String,
    },
    /// A domain rule was violated.
    #[error("Domain rule violation ({rule}): {message}")]
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// A requested resource was not found.
    #[error("{resource_type} not found: {message}")]
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn duplicate(field: Option<&str>, message: &str) -> Self {
        Self::DuplicateValue {
            field: field.map(str::to_string),
            message: message.to_string(),
        }
    }

    pub(crate) fn not_found(resource_type: &str) -> Self {
        Self::ResourceNotFound {
            resource_type: resource_type.to_string(),
            message: format!("{resource_type} not found"),
        }
    }

    pub(crate) fn internal(context: &str, err: &PersistenceError) -> Self {
        Self::Internal {
            message: format!("{context}: {err}"),
        }
    }
}

/// Translates a domain error into an API error.
///
/// Every domain error is a rejected input; the field names are the camelCase
/// wire names.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidPersonType(_) => ApiError::invalid("type", err.to_string()),
        DomainError::InvalidPersonStatus(_) | DomainError::InvalidCardStatus(_) => {
            ApiError::invalid("status", err.to_string())
        }
        DomainError::InvalidName(msg) => ApiError::invalid("name", msg),
        DomainError::InvalidUniversityId(msg) => ApiError::invalid("universityId", msg),
        DomainError::InvalidIdNumber(msg) => ApiError::invalid("idNumber", msg),
        DomainError::InvalidCode(msg) => ApiError::invalid("code", msg),
        DomainError::InvalidDuration { .. } => ApiError::invalid("durationYears", err.to_string()),
        DomainError::DateParseError { .. } => ApiError::invalid("date", err.to_string()),
    }
}

/// Translates a persistence error raised by a create or update.
///
/// Unique violations become duplicates and foreign key violations mean the
/// request referenced a record that does not exist. Anything else is internal.
#[must_use]
pub fn translate_write_error(err: PersistenceError, context: &str) -> ApiError {
    match err {
        PersistenceError::UniqueViolation(_) => {
            ApiError::duplicate(None, "A record with this value already exists")
        }
        PersistenceError::ForeignKeyViolation(_) => {
            ApiError::invalid("reference", "Referenced record does not exist")
        }
        other => ApiError::internal(context, &other),
    }
}

/// Translates a persistence error raised by a delete of `resource_type`.
///
/// A foreign key violation means other records still point at the row.
#[must_use]
pub fn translate_delete_error(err: PersistenceError, resource_type: &str) -> ApiError {
    match err {
        PersistenceError::ForeignKeyViolation(_) => ApiError::DomainRuleViolation {
            rule: format!("{}_in_use", resource_type.to_lowercase()),
            message: format!("{resource_type} is still referenced by other records"),
        },
        other => ApiError::internal(&format!("Failed to delete {resource_type}"), &other),
    }
}
