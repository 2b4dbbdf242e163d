// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Person mutations.
//!
//! Deleting a person cascades to the cards linked to it.

use campus_id_domain::{Person, PersonUpdate};
use diesel::SqliteConnection;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::Text;
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::persons;
use crate::error::PersistenceError;
use crate::queries::persons::get_person;

#[allow(clippy::option_option, clippy::ref_option)]
#[derive(AsChangeset)]
#[diesel(table_name = persons)]
struct PersonChangeset<'a> {
    person_type: Option<&'a str>,
    university_id: Option<&'a str>,
    national_id: Option<Option<&'a str>>,
    full_name_en: Option<&'a str>,
    full_name_ar: Option<Option<&'a str>>,
    email: Option<Option<&'a str>>,
    phone: Option<Option<&'a str>>,
    college_id: Option<Option<i64>>,
    department_id: Option<Option<i64>>,
    program_id: Option<Option<i64>>,
    level_id: Option<Option<i64>>,
    position: Option<Option<&'a str>>,
    photo_url: Option<Option<&'a str>>,
    status: Option<&'a str>,
}

#[allow(clippy::option_option)]
fn nullable(value: Option<&Option<String>>) -> Option<Option<&str>> {
    value.map(Option::as_deref)
}

impl<'a> From<&'a PersonUpdate> for PersonChangeset<'a> {
    fn from(update: &'a PersonUpdate) -> Self {
        Self {
            person_type: update.person_type.map(|t| t.as_str()),
            university_id: update.university_id.as_deref(),
            national_id: nullable(update.national_id.as_ref()),
            full_name_en: update.full_name_en.as_deref(),
            full_name_ar: nullable(update.full_name_ar.as_ref()),
            email: nullable(update.email.as_ref()),
            phone: nullable(update.phone.as_ref()),
            college_id: update.college_id,
            department_id: update.department_id,
            program_id: update.program_id,
            level_id: update.level_id,
            position: nullable(update.position.as_ref()),
            photo_url: nullable(update.photo_url.as_ref()),
            status: update.status.map(|s| s.as_str()),
        }
    }
}

fn insert_person(conn: &mut SqliteConnection, person: &Person) -> Result<Person, PersistenceError> {
    diesel::insert_into(persons::table)
        .values((
            persons::person_type.eq(person.person_type.as_str()),
            persons::university_id.eq(&person.university_id),
            persons::national_id.eq(person.national_id.as_deref()),
            persons::full_name_en.eq(&person.full_name_en),
            persons::full_name_ar.eq(person.full_name_ar.as_deref()),
            persons::email.eq(person.email.as_deref()),
            persons::phone.eq(person.phone.as_deref()),
            persons::college_id.eq(person.college_id),
            persons::department_id.eq(person.department_id),
            persons::program_id.eq(person.program_id),
            persons::level_id.eq(person.level_id),
            persons::position.eq(person.position.as_deref()),
            persons::photo_url.eq(person.photo_url.as_deref()),
            persons::status.eq(person.status.as_str()),
        ))
        .execute(conn)?;

    let person_id: i64 = conn.get_last_insert_rowid()?;

    get_person(conn, person_id)?.ok_or_else(|| {
        PersistenceError::NotFound(format!("Person {person_id} missing after insert"))
    })
}

/// Creates a person and returns the stored row.
///
/// # Errors
///
/// Returns `UniqueViolation` if the university ID is taken and
/// `ForeignKeyViolation` if a structure reference is unknown.
pub fn create_person(
    conn: &mut SqliteConnection,
    person: &Person,
) -> Result<Person, PersistenceError> {
    let created: Person = insert_person(conn, person)?;
    info!(
        person_id = ?created.person_id,
        university_id = %created.university_id,
        person_type = %created.person_type,
        "Created person"
    );
    Ok(created)
}

/// Creates several persons in one transaction.
///
/// Either every person is stored or none is.
///
/// # Errors
///
/// Returns the first constraint violation encountered; nothing is stored.
pub fn create_persons(
    conn: &mut SqliteConnection,
    persons: &[Person],
) -> Result<Vec<Person>, PersistenceError> {
    if persons.is_empty() {
        return Ok(Vec::new());
    }

    let created: Vec<Person> = conn.transaction::<_, PersistenceError, _>(|conn| {
        persons
            .iter()
            .map(|person| insert_person(conn, person))
            .collect()
    })?;

    info!(count = created.len(), "Created persons in bulk");
    Ok(created)
}

/// Applies a partial update to a person and refreshes `updated_at`.
///
/// Returns `Ok(None)` if the person does not exist.
///
/// # Errors
///
/// Returns an error if a constraint rejects the update.
pub fn update_person(
    conn: &mut SqliteConnection,
    person_id: i64,
    update: &PersonUpdate,
) -> Result<Option<Person>, PersistenceError> {
    let updated: usize = diesel::update(persons::table.filter(persons::person_id.eq(person_id)))
        .set((
            PersonChangeset::from(update),
            persons::updated_at.eq(sql::<Text>("CURRENT_TIMESTAMP")),
        ))
        .execute(conn)?;

    if updated > 0 {
        info!(person_id, "Updated person");
    }
    get_person(conn, person_id)
}

/// Deletes a person and their linked cards. Returns whether a row was removed.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_person(
    conn: &mut SqliteConnection,
    person_id: i64,
) -> Result<bool, PersistenceError> {
    let deleted: usize = diesel::delete(persons::table)
        .filter(persons::person_id.eq(person_id))
        .execute(conn)?;
    if deleted > 0 {
        info!(person_id, "Deleted person");
    }
    Ok(deleted > 0)
}
