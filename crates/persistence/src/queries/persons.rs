// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Person queries.

use campus_id_domain::{Person, PersonFilter, PersonStatus, PersonType};
use diesel::SqliteConnection;
use diesel::prelude::*;
use std::str::FromStr;
use tracing::debug;

use crate::diesel_schema::persons;
use crate::error::PersistenceError;

/// Diesel Queryable struct for person rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = persons)]
struct PersonRow {
    person_id: i64,
    person_type: String,
    university_id: String,
    national_id: Option<String>,
    full_name_en: String,
    full_name_ar: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    college_id: Option<i64>,
    department_id: Option<i64>,
    program_id: Option<i64>,
    level_id: Option<i64>,
    position: Option<String>,
    photo_url: Option<String>,
    status: String,
    created_at: String,
    updated_at: String,
}

impl TryFrom<PersonRow> for Person {
    type Error = PersistenceError;

    fn try_from(row: PersonRow) -> Result<Self, Self::Error> {
        Ok(Self {
            person_id: Some(row.person_id),
            person_type: PersonType::from_str(&row.person_type)?,
            university_id: row.university_id,
            national_id: row.national_id,
            full_name_en: row.full_name_en,
            full_name_ar: row.full_name_ar,
            email: row.email,
            phone: row.phone,
            college_id: row.college_id,
            department_id: row.department_id,
            program_id: row.program_id,
            level_id: row.level_id,
            position: row.position,
            photo_url: row.photo_url,
            status: PersonStatus::from_str(&row.status)?,
            created_at: Some(row.created_at),
            updated_at: Some(row.updated_at),
        })
    }
}

/// Lists persons matching the filter, newest first.
///
/// `search` is a case-insensitive substring match over both names, the
/// university ID, and the email.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is malformed.
pub fn list_persons(
    conn: &mut SqliteConnection,
    filter: &PersonFilter,
) -> Result<Vec<Person>, PersistenceError> {
    let mut query = persons::table
        .select(PersonRow::as_select())
        .order((persons::created_at.desc(), persons::person_id.desc()))
        .into_boxed();

    if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
        let pattern: String = format!("%{search}%");
        query = query.filter(
            persons::full_name_en
                .like(pattern.clone())
                .or(persons::full_name_ar.assume_not_null().like(pattern.clone()))
                .or(persons::university_id.like(pattern.clone()))
                .or(persons::email.assume_not_null().like(pattern)),
        );
    }

    if let Some(person_type) = filter.person_type {
        query = query.filter(persons::person_type.eq(person_type.as_str()));
    }

    if let Some(status) = filter.status {
        query = query.filter(persons::status.eq(status.as_str()));
    }

    if let Some(college_id) = filter.college_id {
        query = query.filter(persons::college_id.eq(college_id));
    }

    if let Some(department_id) = filter.department_id {
        query = query.filter(persons::department_id.eq(department_id));
    }

    let rows: Vec<PersonRow> = query.load(conn)?;
    debug!(count = rows.len(), "Loaded persons");

    rows.into_iter().map(Person::try_from).collect()
}

/// Retrieves a person by ID.
///
/// # Errors
///
/// Returns an error if the query fails.
/// Returns `Ok(None)` if the person does not exist.
pub fn get_person(
    conn: &mut SqliteConnection,
    person_id: i64,
) -> Result<Option<Person>, PersistenceError> {
    let row: Option<PersonRow> = persons::table
        .filter(persons::person_id.eq(person_id))
        .select(PersonRow::as_select())
        .first(conn)
        .optional()?;

    row.map(Person::try_from).transpose()
}

/// Retrieves a person by university ID.
///
/// # Errors
///
/// Returns an error if the query fails.
/// Returns `Ok(None)` if no person holds the ID.
pub fn get_person_by_university_id(
    conn: &mut SqliteConnection,
    university_id: &str,
) -> Result<Option<Person>, PersistenceError> {
    let row: Option<PersonRow> = persons::table
        .filter(persons::university_id.eq(university_id))
        .select(PersonRow::as_select())
        .first(conn)
        .optional()?;

    row.map(Person::try_from).transpose()
}
