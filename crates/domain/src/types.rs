// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;

/// The kind of person a record or card belongs to.
///
/// This is a closed set. Identifier prefixes are derived from it, so adding a
/// variant forces every prefix mapping to be revisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonType {
    /// An enrolled student.
    Student,
    /// A staff member or faculty.
    Staff,
    /// A temporary visitor.
    Visitor,
}

impl PersonType {
    /// Converts this person type to its canonical string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Staff => "staff",
            Self::Visitor => "visitor",
        }
    }
}

impl FromStr for PersonType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Self::Student),
            "staff" => Ok(Self::Staff),
            "visitor" => Ok(Self::Visitor),
            _ => Err(DomainError::InvalidPersonType(s.to_string())),
        }
    }
}

impl std::fmt::Display for PersonType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle status of a person record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PersonStatus {
    /// The person is active.
    #[default]
    Active,
    /// The person is temporarily suspended.
    Suspended,
    /// The person's affiliation has expired.
    Expired,
}

impl PersonStatus {
    /// Converts this status to its canonical string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Suspended => "suspended",
            Self::Expired => "expired",
        }
    }
}

impl FromStr for PersonStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "suspended" => Ok(Self::Suspended),
            "expired" => Ok(Self::Expired),
            _ => Err(DomainError::InvalidPersonStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for PersonStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle status of an issued card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CardStatus {
    /// The card is valid for use.
    #[default]
    Active,
    /// The card's validity period has ended.
    Expired,
    /// The card is temporarily suspended.
    Suspended,
    /// The card has been permanently revoked.
    Revoked,
}

impl CardStatus {
    /// Converts this status to its canonical string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Expired => "expired",
            Self::Suspended => "suspended",
            Self::Revoked => "revoked",
        }
    }
}

impl FromStr for CardStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "expired" => Ok(Self::Expired),
            "suspended" => Ok(Self::Suspended),
            "revoked" => Ok(Self::Revoked),
            _ => Err(DomainError::InvalidCardStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for CardStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A college (faculty) within the university.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct College {
    /// The canonical numeric identifier. `None` until persisted.
    pub college_id: Option<i64>,
    /// English name.
    pub name_en: String,
    /// Arabic name.
    pub name_ar: String,
    /// Unique short code (e.g. "ENG"). Used as the student identifier prefix.
    pub code: String,
    /// Creation timestamp assigned by the database.
    pub created_at: Option<String>,
}

impl College {
    /// Creates a new, unpersisted college.
    #[must_use]
    pub fn new(name_en: &str, name_ar: &str, code: &str) -> Self {
        Self {
            college_id: None,
            name_en: name_en.to_string(),
            name_ar: name_ar.to_string(),
            code: code.trim().to_string(),
            created_at: None,
        }
    }
}

/// A department belonging to a college.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Department {
    /// The canonical numeric identifier. `None` until persisted.
    pub department_id: Option<i64>,
    /// The owning college.
    pub college_id: i64,
    /// English name.
    pub name_en: String,
    /// Arabic name.
    pub name_ar: String,
    /// Unique short code.
    pub code: String,
    /// Creation timestamp assigned by the database.
    pub created_at: Option<String>,
}

impl Department {
    /// Creates a new, unpersisted department.
    #[must_use]
    pub fn new(college_id: i64, name_en: &str, name_ar: &str, code: &str) -> Self {
        Self {
            department_id: None,
            college_id,
            name_en: name_en.to_string(),
            name_ar: name_ar.to_string(),
            code: code.trim().to_string(),
            created_at: None,
        }
    }
}

/// An academic program offered by a department.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    /// The canonical numeric identifier. `None` until persisted.
    pub program_id: Option<i64>,
    /// The owning department.
    pub department_id: i64,
    /// English name.
    pub name_en: String,
    /// Arabic name.
    pub name_ar: String,
    /// Unique short code.
    pub code: String,
    /// Nominal program length in years.
    pub duration_years: i32,
    /// Creation timestamp assigned by the database.
    pub created_at: Option<String>,
}

impl Program {
    /// The program length used when none is supplied.
    pub const DEFAULT_DURATION_YEARS: i32 = 4;

    /// Creates a new, unpersisted program with the default duration.
    #[must_use]
    pub fn new(department_id: i64, name_en: &str, name_ar: &str, code: &str) -> Self {
        Self {
            program_id: None,
            department_id,
            name_en: name_en.to_string(),
            name_ar: name_ar.to_string(),
            code: code.trim().to_string(),
            duration_years: Self::DEFAULT_DURATION_YEARS,
            created_at: None,
        }
    }
}

/// An academic level (year of study).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    /// The canonical numeric identifier. `None` until persisted.
    pub level_id: Option<i64>,
    /// English name.
    pub name_en: String,
    /// Arabic name.
    pub name_ar: String,
    /// Sort position.
    pub order: i32,
    /// Creation timestamp assigned by the database.
    pub created_at: Option<String>,
}

impl Level {
    /// Creates a new, unpersisted level.
    #[must_use]
    pub fn new(name_en: &str, name_ar: &str, order: i32) -> Self {
        Self {
            level_id: None,
            name_en: name_en.to_string(),
            name_ar: name_ar.to_string(),
            order,
            created_at: None,
        }
    }
}

/// A student, staff member, or visitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    /// The canonical numeric identifier. `None` until persisted.
    pub person_id: Option<i64>,
    /// What kind of person this is.
    pub person_type: PersonType,
    /// Globally unique institutional identifier (e.g. "ENG-2026-00001").
    pub university_id: String,
    /// National identity number.
    pub national_id: Option<String>,
    /// Full name in English. Required.
    pub full_name_en: String,
    /// Full name in Arabic.
    pub full_name_ar: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Owning college.
    pub college_id: Option<i64>,
    /// Owning department.
    pub department_id: Option<i64>,
    /// Enrolled program.
    pub program_id: Option<i64>,
    /// Current level.
    pub level_id: Option<i64>,
    /// Job title, for staff.
    pub position: Option<String>,
    /// Location of the card photo.
    pub photo_url: Option<String>,
    /// Lifecycle status.
    pub status: PersonStatus,
    /// Creation timestamp assigned by the database.
    pub created_at: Option<String>,
    /// Last update timestamp assigned by the database.
    pub updated_at: Option<String>,
}

impl Person {
    /// Creates a new, unpersisted active person with only the required fields set.
    #[must_use]
    pub fn new(person_type: PersonType, university_id: &str, full_name_en: &str) -> Self {
        Self {
            person_id: None,
            person_type,
            university_id: university_id.to_string(),
            national_id: None,
            full_name_en: full_name_en.to_string(),
            full_name_ar: None,
            email: None,
            phone: None,
            college_id: None,
            department_id: None,
            program_id: None,
            level_id: None,
            position: None,
            photo_url: None,
            status: PersonStatus::Active,
            created_at: None,
            updated_at: None,
        }
    }
}

/// An issued ID card.
///
/// A card may be linked to a `Person`, but it also carries its own copy of
/// the printable fields so it can stand alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    /// The canonical numeric identifier. `None` until persisted.
    pub card_id: Option<i64>,
    /// The person this card was issued to, if linked.
    pub person_id: Option<i64>,
    /// Printed card serial.
    pub card_number: Option<String>,
    /// Date of issue.
    pub issue_date: Option<Date>,
    /// Date after which the card is no longer valid.
    pub expiry_date: Option<Date>,
    /// Lifecycle status.
    pub status: CardStatus,
    /// Number of times this card has been printed.
    pub print_count: i32,
    /// Timestamp of the most recent print.
    pub last_printed_at: Option<String>,
    /// Creation timestamp assigned by the database.
    pub created_at: Option<String>,
    /// Printed holder name.
    pub name: String,
    /// Globally unique printed ID number.
    pub id_number: String,
    /// Holder category.
    pub card_type: PersonType,
    /// Printed department text.
    pub department: String,
    /// Printed program text.
    pub program: Option<String>,
    /// Printed academic year text.
    pub year: Option<String>,
    /// Location of the card photo.
    pub photo_url: Option<String>,
    /// Printed email.
    pub email: Option<String>,
}

impl Card {
    /// Creates a new, unpersisted active card with only the required fields set.
    #[must_use]
    pub fn new(name: &str, id_number: &str, card_type: PersonType, department: &str) -> Self {
        Self {
            card_id: None,
            person_id: None,
            card_number: None,
            issue_date: None,
            expiry_date: None,
            status: CardStatus::Active,
            print_count: 0,
            last_printed_at: None,
            created_at: None,
            name: name.to_string(),
            id_number: id_number.to_string(),
            card_type,
            department: department.to_string(),
            program: None,
            year: None,
            photo_url: None,
            email: None,
        }
    }
}

/// Partial update for a college. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollegeUpdate {
    pub name_en: Option<String>,
    pub name_ar: Option<String>,
    pub code: Option<String>,
}

impl CollegeUpdate {
    /// Returns true when no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name_en.is_none() && self.name_ar.is_none() && self.code.is_none()
    }
}

/// Partial update for a department. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepartmentUpdate {
    pub college_id: Option<i64>,
    pub name_en: Option<String>,
    pub name_ar: Option<String>,
    pub code: Option<String>,
}

impl DepartmentUpdate {
    /// Returns true when no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.college_id.is_none()
            && self.name_en.is_none()
            && self.name_ar.is_none()
            && self.code.is_none()
    }
}

/// Partial update for a program. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgramUpdate {
    pub department_id: Option<i64>,
    pub name_en: Option<String>,
    pub name_ar: Option<String>,
    pub code: Option<String>,
    pub duration_years: Option<i32>,
}

impl ProgramUpdate {
    /// Returns true when no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.department_id.is_none()
            && self.name_en.is_none()
            && self.name_ar.is_none()
            && self.code.is_none()
            && self.duration_years.is_none()
    }
}

/// Partial update for a person.
///
/// The outer `Option` means "leave unchanged"; for nullable columns
/// `Some(None)` clears the stored value.
#[allow(clippy::option_option)]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonUpdate {
    pub person_type: Option<PersonType>,
    pub university_id: Option<String>,
    pub national_id: Option<Option<String>>,
    pub full_name_en: Option<String>,
    pub full_name_ar: Option<Option<String>>,
    pub email: Option<Option<String>>,
    pub phone: Option<Option<String>>,
    pub college_id: Option<Option<i64>>,
    pub department_id: Option<Option<i64>>,
    pub program_id: Option<Option<i64>>,
    pub level_id: Option<Option<i64>>,
    pub position: Option<Option<String>>,
    pub photo_url: Option<Option<String>>,
    pub status: Option<PersonStatus>,
}

/// Partial update for a card.
///
/// The outer `Option` means "leave unchanged"; for nullable columns
/// `Some(None)` clears the stored value.
#[allow(clippy::option_option)]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardUpdate {
    pub person_id: Option<Option<i64>>,
    pub card_number: Option<Option<String>>,
    pub issue_date: Option<Option<Date>>,
    pub expiry_date: Option<Option<Date>>,
    pub status: Option<CardStatus>,
    pub name: Option<String>,
    pub id_number: Option<String>,
    pub card_type: Option<PersonType>,
    pub department: Option<String>,
    pub program: Option<Option<String>>,
    pub year: Option<Option<String>>,
    pub photo_url: Option<Option<String>>,
    pub email: Option<Option<String>>,
}

impl CardUpdate {
    /// Returns true when no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.person_id.is_none()
            && self.card_number.is_none()
            && self.issue_date.is_none()
            && self.expiry_date.is_none()
            && self.status.is_none()
            && self.name.is_none()
            && self.id_number.is_none()
            && self.card_type.is_none()
            && self.department.is_none()
            && self.program.is_none()
            && self.year.is_none()
            && self.photo_url.is_none()
            && self.email.is_none()
    }
}

/// Filter for listing persons. Unset fields do not constrain the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonFilter {
    /// Case-insensitive substring matched against names, university ID, and email.
    pub search: Option<String>,
    pub person_type: Option<PersonType>,
    pub status: Option<PersonStatus>,
    pub college_id: Option<i64>,
    pub department_id: Option<i64>,
}

/// Filter for listing cards. Unset fields do not constrain the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardFilter {
    /// Case-insensitive substring matched against name, ID number, and department.
    pub search: Option<String>,
    pub card_type: Option<PersonType>,
    /// Case-insensitive exact department match.
    pub department: Option<String>,
}
