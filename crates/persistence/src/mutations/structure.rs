// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! University structure mutations.
//!
//! Deletes are restricted by foreign keys: a college referenced by a
//! department or person cannot be removed, and likewise down the hierarchy.

use campus_id_domain::{
    College, CollegeUpdate, Department, DepartmentUpdate, Level, Program, ProgramUpdate,
};
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::{colleges, departments, levels, programs};
use crate::error::PersistenceError;
use crate::queries::structure::{get_college, get_department, get_level, get_program};

#[derive(AsChangeset)]
#[diesel(table_name = colleges)]
struct CollegeChangeset<'a> {
    name_en: Option<&'a str>,
    name_ar: Option<&'a str>,
    code: Option<&'a str>,
}

impl<'a> From<&'a CollegeUpdate> for CollegeChangeset<'a> {
    fn from(update: &'a CollegeUpdate) -> Self {
        Self {
            name_en: update.name_en.as_deref(),
            name_ar: update.name_ar.as_deref(),
            code: update.code.as_deref().map(str::trim),
        }
    }
}

#[derive(AsChangeset)]
#[diesel(table_name = departments)]
struct DepartmentChangeset<'a> {
    college_id: Option<i64>,
    name_en: Option<&'a str>,
    name_ar: Option<&'a str>,
    code: Option<&'a str>,
}

impl<'a> From<&'a DepartmentUpdate> for DepartmentChangeset<'a> {
    fn from(update: &'a DepartmentUpdate) -> Self {
        Self {
            college_id: update.college_id,
            name_en: update.name_en.as_deref(),
            name_ar: update.name_ar.as_deref(),
            code: update.code.as_deref().map(str::trim),
        }
    }
}

#[derive(AsChangeset)]
#[diesel(table_name = programs)]
struct ProgramChangeset<'a> {
    department_id: Option<i64>,
    name_en: Option<&'a str>,
    name_ar: Option<&'a str>,
    code: Option<&'a str>,
    duration_years: Option<i32>,
}

impl<'a> From<&'a ProgramUpdate> for ProgramChangeset<'a> {
    fn from(update: &'a ProgramUpdate) -> Self {
        Self {
            department_id: update.department_id,
            name_en: update.name_en.as_deref(),
            name_ar: update.name_ar.as_deref(),
            code: update.code.as_deref().map(str::trim),
            duration_years: update.duration_years,
        }
    }
}

fn inserted<T>(row: Option<T>, what: &str, id: i64) -> Result<T, PersistenceError> {
    row.ok_or_else(|| PersistenceError::NotFound(format!("{what} {id} missing after insert")))
}

/// Creates a college and returns the stored row.
///
/// # Errors
///
/// Returns `UniqueViolation` if the code is already in use.
pub fn create_college(
    conn: &mut SqliteConnection,
    college: &College,
) -> Result<College, PersistenceError> {
    diesel::insert_into(colleges::table)
        .values((
            colleges::name_en.eq(&college.name_en),
            colleges::name_ar.eq(&college.name_ar),
            colleges::code.eq(college.code.trim()),
        ))
        .execute(conn)?;

    let college_id: i64 = conn.get_last_insert_rowid()?;
    info!(college_id, code = %college.code, "Created college");

    inserted(get_college(conn, college_id)?, "College", college_id)
}

/// Applies a partial update to a college.
///
/// Returns `Ok(None)` if the college does not exist.
///
/// # Errors
///
/// Returns `UniqueViolation` if the new code is already in use.
pub fn update_college(
    conn: &mut SqliteConnection,
    college_id: i64,
    update: &CollegeUpdate,
) -> Result<Option<College>, PersistenceError> {
    if !update.is_empty() {
        diesel::update(colleges::table.filter(colleges::college_id.eq(college_id)))
            .set(CollegeChangeset::from(update))
            .execute(conn)?;
    }
    get_college(conn, college_id)
}

/// Deletes a college. Returns whether a row was removed.
///
/// # Errors
///
/// Returns `ForeignKeyViolation` if departments or persons still reference it.
pub fn delete_college(
    conn: &mut SqliteConnection,
    college_id: i64,
) -> Result<bool, PersistenceError> {
    let deleted: usize = diesel::delete(colleges::table)
        .filter(colleges::college_id.eq(college_id))
        .execute(conn)?;
    if deleted > 0 {
        info!(college_id, "Deleted college");
    }
    Ok(deleted > 0)
}

/// Creates a department and returns the stored row.
///
/// # Errors
///
/// Returns `UniqueViolation` for a duplicate code and `ForeignKeyViolation`
/// for an unknown college.
pub fn create_department(
    conn: &mut SqliteConnection,
    department: &Department,
) -> Result<Department, PersistenceError> {
    diesel::insert_into(departments::table)
        .values((
            departments::college_id.eq(department.college_id),
            departments::name_en.eq(&department.name_en),
            departments::name_ar.eq(&department.name_ar),
            departments::code.eq(department.code.trim()),
        ))
        .execute(conn)?;

    let department_id: i64 = conn.get_last_insert_rowid()?;
    info!(
        department_id,
        college_id = department.college_id,
        "Created department"
    );

    inserted(
        get_department(conn, department_id)?,
        "Department",
        department_id,
    )
}

/// Applies a partial update to a department.
///
/// Returns `Ok(None)` if the department does not exist.
///
/// # Errors
///
/// Returns an error if a constraint rejects the update.
pub fn update_department(
    conn: &mut SqliteConnection,
    department_id: i64,
    update: &DepartmentUpdate,
) -> Result<Option<Department>, PersistenceError> {
    if !update.is_empty() {
        diesel::update(departments::table.filter(departments::department_id.eq(department_id)))
            .set(DepartmentChangeset::from(update))
            .execute(conn)?;
    }
    get_department(conn, department_id)
}

/// Deletes a department. Returns whether a row was removed.
///
/// # Errors
///
/// Returns `ForeignKeyViolation` if programs or persons still reference it.
pub fn delete_department(
    conn: &mut SqliteConnection,
    department_id: i64,
) -> Result<bool, PersistenceError> {
    let deleted: usize = diesel::delete(departments::table)
        .filter(departments::department_id.eq(department_id))
        .execute(conn)?;
    if deleted > 0 {
        info!(department_id, "Deleted department");
    }
    Ok(deleted > 0)
}

/// Creates a program and returns the stored row.
///
/// # Errors
///
/// Returns `UniqueViolation` for a duplicate code and `ForeignKeyViolation`
/// for an unknown department.
pub fn create_program(
    conn: &mut SqliteConnection,
    program: &Program,
) -> Result<Program, PersistenceError> {
    diesel::insert_into(programs::table)
        .values((
            programs::department_id.eq(program.department_id),
            programs::name_en.eq(&program.name_en),
            programs::name_ar.eq(&program.name_ar),
            programs::code.eq(program.code.trim()),
            programs::duration_years.eq(program.duration_years),
        ))
        .execute(conn)?;

    let program_id: i64 = conn.get_last_insert_rowid()?;
    info!(
        program_id,
        department_id = program.department_id,
        "Created program"
    );

    inserted(get_program(conn, program_id)?, "Program", program_id)
}

/// Applies a partial update to a program.
///
/// Returns `Ok(None)` if the program does not exist.
///
/// # Errors
///
/// Returns an error if a constraint rejects the update.
pub fn update_program(
    conn: &mut SqliteConnection,
    program_id: i64,
    update: &ProgramUpdate,
) -> Result<Option<Program>, PersistenceError> {
    if !update.is_empty() {
        diesel::update(programs::table.filter(programs::program_id.eq(program_id)))
            .set(ProgramChangeset::from(update))
            .execute(conn)?;
    }
    get_program(conn, program_id)
}

/// Deletes a program. Returns whether a row was removed.
///
/// # Errors
///
/// Returns `ForeignKeyViolation` if persons still reference it.
pub fn delete_program(
    conn: &mut SqliteConnection,
    program_id: i64,
) -> Result<bool, PersistenceError> {
    let deleted: usize = diesel::delete(programs::table)
        .filter(programs::program_id.eq(program_id))
        .execute(conn)?;
    if deleted > 0 {
        info!(program_id, "Deleted program");
    }
    Ok(deleted > 0)
}

/// Creates a level and returns the stored row.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_level(conn: &mut SqliteConnection, level: &Level) -> Result<Level, PersistenceError> {
    diesel::insert_into(levels::table)
        .values((
            levels::name_en.eq(&level.name_en),
            levels::name_ar.eq(&level.name_ar),
            levels::sort_order.eq(level.order),
        ))
        .execute(conn)?;

    let level_id: i64 = conn.get_last_insert_rowid()?;
    info!(level_id, order = level.order, "Created level");

    inserted(get_level(conn, level_id)?, "Level", level_id)
}
