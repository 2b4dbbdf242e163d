// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! University structure queries.
//!
//! Colleges, departments, and programs are listed by English name; levels are
//! listed by their sort order.

use campus_id_domain::{College, Department, Level, Program};
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::diesel_schema::{colleges, departments, levels, programs};
use crate::error::PersistenceError;

/// Diesel Queryable struct for college rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = colleges)]
struct CollegeRow {
    college_id: i64,
    name_en: String,
    name_ar: String,
    code: String,
    created_at: String,
}

impl From<CollegeRow> for College {
    fn from(row: CollegeRow) -> Self {
        Self {
            college_id: Some(row.college_id),
            name_en: row.name_en,
            name_ar: row.name_ar,
            code: row.code,
            created_at: Some(row.created_at),
        }
    }
}

/// Diesel Queryable struct for department rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = departments)]
struct DepartmentRow {
    department_id: i64,
    college_id: i64,
    name_en: String,
    name_ar: String,
    code: String,
    created_at: String,
}

impl From<DepartmentRow> for Department {
    fn from(row: DepartmentRow) -> Self {
        Self {
            department_id: Some(row.department_id),
            college_id: row.college_id,
            name_en: row.name_en,
            name_ar: row.name_ar,
            code: row.code,
            created_at: Some(row.created_at),
        }
    }
}

/// Diesel Queryable struct for program rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = programs)]
struct ProgramRow {
    program_id: i64,
    department_id: i64,
    name_en: String,
    name_ar: String,
    code: String,
    duration_years: i32,
    created_at: String,
}

impl From<ProgramRow> for Program {
    fn from(row: ProgramRow) -> Self {
        Self {
            program_id: Some(row.program_id),
            department_id: row.department_id,
            name_en: row.name_en,
            name_ar: row.name_ar,
            code: row.code,
            duration_years: row.duration_years,
            created_at: Some(row.created_at),
        }
    }
}

/// Diesel Queryable struct for level rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = levels)]
struct LevelRow {
    level_id: i64,
    name_en: String,
    name_ar: String,
    sort_order: i32,
    created_at: String,
}

impl From<LevelRow> for Level {
    fn from(row: LevelRow) -> Self {
        Self {
            level_id: Some(row.level_id),
            name_en: row.name_en,
            name_ar: row.name_ar,
            order: row.sort_order,
            created_at: Some(row.created_at),
        }
    }
}

/// Lists all colleges ordered by English name.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_colleges(conn: &mut SqliteConnection) -> Result<Vec<College>, PersistenceError> {
    let rows: Vec<CollegeRow> = colleges::table
        .select(CollegeRow::as_select())
        .order((colleges::name_en.asc(), colleges::college_id.asc()))
        .load(conn)?;

    Ok(rows.into_iter().map(College::from).collect())
}

/// Retrieves a college by ID.
///
/// # Errors
///
/// Returns an error if the query fails.
/// Returns `Ok(None)` if the college does not exist.
pub fn get_college(
    conn: &mut SqliteConnection,
    college_id: i64,
) -> Result<Option<College>, PersistenceError> {
    debug!("Looking up college ID: {}", college_id);

    let row: Option<CollegeRow> = colleges::table
        .filter(colleges::college_id.eq(college_id))
        .select(CollegeRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(College::from))
}

/// Retrieves a college by its code.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_college_by_code(
    conn: &mut SqliteConnection,
    code: &str,
) -> Result<Option<College>, PersistenceError> {
    let row: Option<CollegeRow> = colleges::table
        .filter(colleges::code.eq(code))
        .select(CollegeRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(College::from))
}

/// Lists departments ordered by English name, optionally restricted to one college.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_departments(
    conn: &mut SqliteConnection,
    college_id: Option<i64>,
) -> Result<Vec<Department>, PersistenceError> {
    let mut query = departments::table
        .select(DepartmentRow::as_select())
        .order((departments::name_en.asc(), departments::department_id.asc()))
        .into_boxed();

    if let Some(college_id) = college_id {
        query = query.filter(departments::college_id.eq(college_id));
    }

    let rows: Vec<DepartmentRow> = query.load(conn)?;
    Ok(rows.into_iter().map(Department::from).collect())
}

/// Retrieves a department by ID.
///
/// # Errors
///
/// Returns an error if the query fails.
/// Returns `Ok(None)` if the department does not exist.
pub fn get_department(
    conn: &mut SqliteConnection,
    department_id: i64,
) -> Result<Option<Department>, PersistenceError> {
    let row: Option<DepartmentRow> = departments::table
        .filter(departments::department_id.eq(department_id))
        .select(DepartmentRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(Department::from))
}

/// Lists programs ordered by English name, optionally restricted to one department.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_programs(
    conn: &mut SqliteConnection,
    department_id: Option<i64>,
) -> Result<Vec<Program>, PersistenceError> {
    let mut query = programs::table
        .select(ProgramRow::as_select())
        .order((programs::name_en.asc(), programs::program_id.asc()))
        .into_boxed();

    if let Some(department_id) = department_id {
        query = query.filter(programs::department_id.eq(department_id));
    }

    let rows: Vec<ProgramRow> = query.load(conn)?;
    Ok(rows.into_iter().map(Program::from).collect())
}

/// Retrieves a program by ID.
///
/// # Errors
///
/// Returns an error if the query fails.
/// Returns `Ok(None)` if the program does not exist.
pub fn get_program(
    conn: &mut SqliteConnection,
    program_id: i64,
) -> Result<Option<Program>, PersistenceError> {
    let row: Option<ProgramRow> = programs::table
        .filter(programs::program_id.eq(program_id))
        .select(ProgramRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(Program::from))
}

/// Lists all levels by sort order.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_levels(conn: &mut SqliteConnection) -> Result<Vec<Level>, PersistenceError> {
    let rows: Vec<LevelRow> = levels::table
        .select(LevelRow::as_select())
        .order((levels::sort_order.asc(), levels::level_id.asc()))
        .load(conn)?;

    Ok(rows.into_iter().map(Level::from).collect())
}

/// Retrieves a level by ID.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_level(
    conn: &mut SqliteConnection,
    level_id: i64,
) -> Result<Option<Level>, PersistenceError> {
    let row: Option<LevelRow> = levels::table
        .filter(levels::level_id.eq(level_id))
        .select(LevelRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(Level::from))
}
