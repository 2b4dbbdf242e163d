// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Dashboard aggregation queries.

use campus_id_domain::{CardStatus, PersonType};
use diesel::SqliteConnection;
use diesel::prelude::*;
use num_traits::ToPrimitive;

use crate::data_models::{CollegeCount, DashboardStats};
use crate::diesel_schema::{cards, colleges, departments, persons};
use crate::error::PersistenceError;

fn to_count(value: i64) -> Result<usize, PersistenceError> {
    value
        .to_usize()
        .ok_or_else(|| PersistenceError::DatabaseError("Count conversion failed".to_string()))
}

fn count_persons_of_type(
    conn: &mut SqliteConnection,
    person_type: PersonType,
) -> Result<usize, PersistenceError> {
    let count: i64 = persons::table
        .filter(persons::person_type.eq(person_type.as_str()))
        .count()
        .get_result(conn)?;
    to_count(count)
}

fn count_cards_with_status(
    conn: &mut SqliteConnection,
    status: CardStatus,
) -> Result<usize, PersistenceError> {
    let count: i64 = cards::table
        .filter(cards::status.eq(status.as_str()))
        .count()
        .get_result(conn)?;
    to_count(count)
}

/// Counts persons attached to each college, in college id order.
///
/// Colleges with no persons are included with a count of zero.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_persons_by_college(
    conn: &mut SqliteConnection,
) -> Result<Vec<CollegeCount>, PersistenceError> {
    let college_rows: Vec<(i64, String)> = colleges::table
        .select((colleges::college_id, colleges::name_en))
        .order(colleges::college_id.asc())
        .load(conn)?;

    let mut result: Vec<CollegeCount> = Vec::with_capacity(college_rows.len());
    for (college_id, name) in college_rows {
        let count: i64 = persons::table
            .filter(persons::college_id.eq(college_id))
            .count()
            .get_result(conn)?;
        result.push(CollegeCount {
            name,
            count: to_count(count)?,
        });
    }

    Ok(result)
}

/// Computes the dashboard totals.
///
/// # Errors
///
/// Returns an error if any count query fails.
pub fn get_dashboard_stats(
    conn: &mut SqliteConnection,
) -> Result<DashboardStats, PersistenceError> {
    let total_persons: i64 = persons::table.count().get_result(conn)?;
    let total_cards: i64 = cards::table.count().get_result(conn)?;
    let total_colleges: i64 = colleges::table.count().get_result(conn)?;
    let total_departments: i64 = departments::table.count().get_result(conn)?;

    Ok(DashboardStats {
        total_persons: to_count(total_persons)?,
        total_students: count_persons_of_type(conn, PersonType::Student)?,
        total_staff: count_persons_of_type(conn, PersonType::Staff)?,
        total_visitors: count_persons_of_type(conn, PersonType::Visitor)?,
        total_cards: to_count(total_cards)?,
        active_cards: count_cards_with_status(conn, CardStatus::Active)?,
        expired_cards: count_cards_with_status(conn, CardStatus::Expired)?,
        total_colleges: to_count(total_colleges)?,
        total_departments: to_count(total_departments)?,
        by_college: count_persons_by_college(conn)?,
    })
}
