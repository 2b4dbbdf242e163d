// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! All DTOs use camelCase on the wire. Dates travel as `YYYY-MM-DD` strings
//! and enumerations as their lowercase names; both are parsed by the handlers
//! so a bad value becomes a field-level `InvalidInput` rather than a
//! deserialization failure.

use campus_id_domain::{Card, College, Department, Level, Person, Program, format_iso_date};
use campus_id_persistence::{CollegeCount, DashboardStats};
use serde::{Deserialize, Deserializer, Serialize};

/// Deserializes a field that distinguishes "absent" from "null".
///
/// Used with `#[serde(default)]`: an absent field stays `None`, an explicit
/// `null` becomes `Some(None)`.
#[allow(clippy::option_option)]
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ---------------------------------------------------------------------------
// Structure
// ---------------------------------------------------------------------------

/// API request to create a college.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCollegeRequest {
    pub name_en: String,
    pub name_ar: String,
    /// Short code, also the student identifier prefix.
    pub code: String,
}

/// API request to update a college. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCollegeRequest {
    #[serde(default)]
    pub name_en: Option<String>,
    #[serde(default)]
    pub name_ar: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

/// A college as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollegeInfo {
    pub id: i64,
    pub name_en: String,
    pub name_ar: String,
    pub code: String,
    pub created_at: Option<String>,
}

impl From<College> for CollegeInfo {
    fn from(college: College) -> Self {
        Self {
            id: college.college_id.unwrap_or_default(),
            name_en: college.name_en,
            name_ar: college.name_ar,
            code: college.code,
            created_at: college.created_at,
        }
    }
}

/// API request to create a department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDepartmentRequest {
    pub college_id: i64,
    pub name_en: String,
    pub name_ar: String,
    pub code: String,
}

/// API request to update a department. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDepartmentRequest {
    #[serde(default)]
    pub college_id: Option<i64>,
    #[serde(default)]
    pub name_en: Option<String>,
    #[serde(default)]
    pub name_ar: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

/// A department as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentInfo {
    pub id: i64,
    pub college_id: i64,
    pub name_en: String,
    pub name_ar: String,
    pub code: String,
    pub created_at: Option<String>,
}

impl From<Department> for DepartmentInfo {
    fn from(department: Department) -> Self {
        Self {
            id: department.department_id.unwrap_or_default(),
            college_id: department.college_id,
            name_en: department.name_en,
            name_ar: department.name_ar,
            code: department.code,
            created_at: department.created_at,
        }
    }
}

/// API request to create a program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProgramRequest {
    pub department_id: i64,
    pub name_en: String,
    pub name_ar: String,
    pub code: String,
    /// Nominal length in years. Defaults to 4.
    #[serde(default)]
    pub duration_years: Option<i32>,
}

/// API request to update a program. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProgramRequest {
    #[serde(default)]
    pub department_id: Option<i64>,
    #[serde(default)]
    pub name_en: Option<String>,
    #[serde(default)]
    pub name_ar: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub duration_years: Option<i32>,
}

/// A program as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramInfo {
    pub id: i64,
    pub department_id: i64,
    pub name_en: String,
    pub name_ar: String,
    pub code: String,
    pub duration_years: i32,
    pub created_at: Option<String>,
}

impl From<Program> for ProgramInfo {
    fn from(program: Program) -> Self {
        Self {
            id: program.program_id.unwrap_or_default(),
            department_id: program.department_id,
            name_en: program.name_en,
            name_ar: program.name_ar,
            code: program.code,
            duration_years: program.duration_years,
            created_at: program.created_at,
        }
    }
}

/// API request to create a level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLevelRequest {
    pub name_en: String,
    pub name_ar: String,
    pub order: i32,
}

/// A level as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelInfo {
    pub id: i64,
    pub name_en: String,
    pub name_ar: String,
    pub order: i32,
    pub created_at: Option<String>,
}

impl From<Level> for LevelInfo {
    fn from(level: Level) -> Self {
        Self {
            id: level.level_id.unwrap_or_default(),
            name_en: level.name_en,
            name_ar: level.name_ar,
            order: level.order,
            created_at: level.created_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Persons
// ---------------------------------------------------------------------------

/// API request to create a person.
///
/// When `universityId` is absent or blank one is allocated from the
/// sequence for the person's type (and college, for students).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePersonRequest {
    /// `student`, `staff`, or `visitor`.
    #[serde(rename = "type")]
    pub person_type: String,
    #[serde(default)]
    pub university_id: Option<String>,
    #[serde(default)]
    pub national_id: Option<String>,
    pub full_name_en: String,
    #[serde(default)]
    pub full_name_ar: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub college_id: Option<i64>,
    #[serde(default)]
    pub department_id: Option<i64>,
    #[serde(default)]
    pub program_id: Option<i64>,
    #[serde(default)]
    pub level_id: Option<i64>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    /// Defaults to `active`.
    #[serde(default)]
    pub status: Option<String>,
}

/// API request to update a person.
///
/// An absent field is left unchanged; `null` clears a nullable field.
#[allow(clippy::option_option)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePersonRequest {
    #[serde(default, rename = "type")]
    pub person_type: Option<String>,
    #[serde(default)]
    pub university_id: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub national_id: Option<Option<String>>,
    #[serde(default)]
    pub full_name_en: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub full_name_ar: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub college_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub department_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub program_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub level_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub position: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub photo_url: Option<Option<String>>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Query parameters for listing persons.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonListQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default, rename = "type")]
    pub person_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub college_id: Option<i64>,
    #[serde(default)]
    pub department_id: Option<i64>,
}

/// A person as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonInfo {
    pub id: i64,
    #[serde(rename = "type")]
    pub person_type: String,
    pub university_id: String,
    pub national_id: Option<String>,
    pub full_name_en: String,
    pub full_name_ar: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub college_id: Option<i64>,
    pub department_id: Option<i64>,
    pub program_id: Option<i64>,
    pub level_id: Option<i64>,
    pub position: Option<String>,
    pub photo_url: Option<String>,
    pub status: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<Person> for PersonInfo {
    fn from(person: Person) -> Self {
        Self {
            id: person.person_id.unwrap_or_default(),
            person_type: person.person_type.to_string(),
            university_id: person.university_id,
            national_id: person.national_id,
            full_name_en: person.full_name_en,
            full_name_ar: person.full_name_ar,
            email: person.email,
            phone: person.phone,
            college_id: person.college_id,
            department_id: person.department_id,
            program_id: person.program_id,
            level_id: person.level_id,
            position: person.position,
            photo_url: person.photo_url,
            status: person.status.to_string(),
            created_at: person.created_at,
            updated_at: person.updated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Cards
// ---------------------------------------------------------------------------

/// API request to create a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCardRequest {
    #[serde(default)]
    pub person_id: Option<i64>,
    #[serde(default)]
    pub card_number: Option<String>,
    /// `YYYY-MM-DD`.
    #[serde(default)]
    pub issue_date: Option<String>,
    /// `YYYY-MM-DD`.
    #[serde(default)]
    pub expiry_date: Option<String>,
    /// Defaults to `active`.
    #[serde(default)]
    pub status: Option<String>,
    pub name: String,
    pub id_number: String,
    /// `student`, `staff`, or `visitor`.
    #[serde(rename = "type")]
    pub card_type: String,
    pub department: String,
    #[serde(default)]
    pub program: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// API request to update a card.
///
/// An absent field is left unchanged; `null` clears a nullable field.
#[allow(clippy::option_option)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCardRequest {
    #[serde(default, deserialize_with = "double_option")]
    pub person_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub card_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub issue_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub expiry_date: Option<Option<String>>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub id_number: Option<String>,
    #[serde(default, rename = "type")]
    pub card_type: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub program: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub year: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub photo_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub email: Option<Option<String>>,
}

/// Query parameters for listing cards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardListQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default, rename = "type")]
    pub card_type: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
}

/// A card as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardInfo {
    pub id: i64,
    pub person_id: Option<i64>,
    pub card_number: Option<String>,
    pub issue_date: Option<String>,
    pub expiry_date: Option<String>,
    pub status: String,
    pub print_count: i32,
    pub last_printed_at: Option<String>,
    pub created_at: Option<String>,
    pub name: String,
    pub id_number: String,
    #[serde(rename = "type")]
    pub card_type: String,
    pub department: String,
    pub program: Option<String>,
    pub year: Option<String>,
    pub photo_url: Option<String>,
    pub email: Option<String>,
}

impl From<Card> for CardInfo {
    fn from(card: Card) -> Self {
        Self {
            id: card.card_id.unwrap_or_default(),
            person_id: card.person_id,
            card_number: card.card_number,
            issue_date: card.issue_date.map(format_iso_date),
            expiry_date: card.expiry_date.map(format_iso_date),
            status: card.status.to_string(),
            print_count: card.print_count,
            last_printed_at: card.last_printed_at,
            created_at: card.created_at,
            name: card.name,
            id_number: card.id_number,
            card_type: card.card_type.to_string(),
            department: card.department,
            program: card.program,
            year: card.year,
            photo_url: card.photo_url,
            email: card.email,
        }
    }
}

// ---------------------------------------------------------------------------
// Identifier generation
// ---------------------------------------------------------------------------

/// API request to allocate the next university identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateIdRequest {
    #[serde(rename = "type")]
    pub person_type: String,
    /// Student prefix override. Ignored for staff and visitors.
    #[serde(default)]
    pub college_code: Option<String>,
}

/// API response carrying a freshly allocated identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateIdResponse {
    pub university_id: String,
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

/// Persons attached to one college.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollegeCountInfo {
    pub name: String,
    pub count: usize,
}

/// Dashboard totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStatsResponse {
    pub total_persons: usize,
    pub total_students: usize,
    pub total_staff: usize,
    pub total_visitors: usize,
    pub total_cards: usize,
    pub active_cards: usize,
    pub expired_cards: usize,
    pub total_colleges: usize,
    pub total_departments: usize,
    pub by_college: Vec<CollegeCountInfo>,
}

impl From<DashboardStats> for DashboardStatsResponse {
    fn from(stats: DashboardStats) -> Self {
        Self {
            total_persons: stats.total_persons,
            total_students: stats.total_students,
            total_staff: stats.total_staff,
            total_visitors: stats.total_visitors,
            total_cards: stats.total_cards,
            active_cards: stats.active_cards,
            expired_cards: stats.expired_cards,
            total_colleges: stats.total_colleges,
            total_departments: stats.total_departments,
            by_college: stats
                .by_college
                .into_iter()
                .map(|CollegeCount { name, count }| CollegeCountInfo { name, count })
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// CSV import
// ---------------------------------------------------------------------------

/// API request carrying raw CSV text for preview or import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvImportRequest {
    pub csv_content: String,
}

/// Status of one previewed CSV row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CsvRowStatus {
    /// The row can be imported.
    Valid,
    /// The row has errors and blocks the import.
    Invalid,
}

/// One previewed CSV row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvRowPreview {
    /// 1-based, excluding the header.
    pub row_number: usize,
    pub name: Option<String>,
    pub id_number: Option<String>,
    #[serde(rename = "type")]
    pub card_type: Option<String>,
    pub department: Option<String>,
    pub program: Option<String>,
    pub year: Option<String>,
    pub email: Option<String>,
    pub status: CsvRowStatus,
    pub errors: Vec<String>,
}

/// Result of previewing a CSV upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvPreviewResponse {
    pub rows: Vec<CsvRowPreview>,
    pub total_rows: usize,
    pub valid_count: usize,
    pub invalid_count: usize,
}

/// Result of a successful CSV import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportCardsResponse {
    pub imported_count: usize,
    pub cards: Vec<CardInfo>,
}

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

/// What `seed_sample_data` inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedSummary {
    pub cards: usize,
    pub colleges: usize,
    pub departments: usize,
    pub levels: usize,
}
