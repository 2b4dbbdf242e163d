// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! University identifier sequences.
//!
//! Identifiers have the shape `{prefix}-{year}-{number}` where the number is
//! zero-padded to five digits. Each `(prefix, year)` pair is an independent
//! sequence starting at 1.

use crate::types::PersonType;

/// Prefix used for students when no college code is supplied.
pub const STUDENT_FALLBACK_PREFIX: &str = "STU";
/// Prefix used for staff.
pub const STAFF_PREFIX: &str = "EMP";
/// Prefix used for visitors.
pub const VISITOR_PREFIX: &str = "VIS";

/// Minimum width of the numeric part of an identifier.
const NUMBER_WIDTH: usize = 5;

/// The scope of one identifier sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SequenceKey {
    prefix: String,
    year: i32,
}

impl SequenceKey {
    /// Creates a key from an explicit prefix and year.
    #[must_use]
    pub fn new(prefix: &str, year: i32) -> Self {
        Self {
            prefix: prefix.to_string(),
            year,
        }
    }

    /// Resolves the sequence key for a person type.
    ///
    /// Students use the college code when one is supplied and non-blank,
    /// otherwise `STU`. Staff always use `EMP` and visitors `VIS`; a college
    /// code is ignored for both.
    #[must_use]
    pub fn resolve(person_type: PersonType, college_code: Option<&str>, year: i32) -> Self {
        let prefix: &str = match person_type {
            PersonType::Student => college_code
                .map(str::trim)
                .filter(|code| !code.is_empty())
                .unwrap_or(STUDENT_FALLBACK_PREFIX),
            PersonType::Staff => STAFF_PREFIX,
            PersonType::Visitor => VISITOR_PREFIX,
        };
        Self::new(prefix, year)
    }

    /// Returns the prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Formats the identifier for a number allocated from this sequence.
    ///
    /// Numbers wider than five digits are printed in full.
    #[must_use]
    pub fn format_identifier(&self, number: u64) -> String {
        format!(
            "{}-{}-{:0width$}",
            self.prefix,
            self.year,
            number,
            width = NUMBER_WIDTH
        )
    }
}

impl std::fmt::Display for SequenceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.prefix, self.year)
    }
}
