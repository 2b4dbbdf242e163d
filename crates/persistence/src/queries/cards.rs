// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Card queries.

use campus_id_domain::{Card, CardFilter, CardStatus, PersonType, parse_iso_date};
use diesel::SqliteConnection;
use diesel::prelude::*;
use std::str::FromStr;
use time::Date;
use tracing::debug;

use crate::diesel_schema::cards;
use crate::error::PersistenceError;

/// Diesel Queryable struct for card rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = cards)]
struct CardRow {
    card_id: i64,
    person_id: Option<i64>,
    card_number: Option<String>,
    issue_date: Option<String>,
    expiry_date: Option<String>,
    status: String,
    print_count: i32,
    last_printed_at: Option<String>,
    created_at: String,
    name: String,
    id_number: String,
    card_type: String,
    department: String,
    program: Option<String>,
    year: Option<String>,
    photo_url: Option<String>,
    email: Option<String>,
}

fn parse_optional_date(value: Option<&str>) -> Result<Option<Date>, PersistenceError> {
    value
        .map(parse_iso_date)
        .transpose()
        .map_err(PersistenceError::from)
}

impl TryFrom<CardRow> for Card {
    type Error = PersistenceError;

    fn try_from(row: CardRow) -> Result<Self, Self::Error> {
        Ok(Self {
            card_id: Some(row.card_id),
            person_id: row.person_id,
            card_number: row.card_number,
            issue_date: parse_optional_date(row.issue_date.as_deref())?,
            expiry_date: parse_optional_date(row.expiry_date.as_deref())?,
            status: CardStatus::from_str(&row.status)?,
            print_count: row.print_count,
            last_printed_at: row.last_printed_at,
            created_at: Some(row.created_at),
            name: row.name,
            id_number: row.id_number,
            card_type: PersonType::from_str(&row.card_type)?,
            department: row.department,
            program: row.program,
            year: row.year,
            photo_url: row.photo_url,
            email: row.email,
        })
    }
}

/// Lists cards matching the filter, newest first.
///
/// `search` is a case-insensitive substring match over the name, ID number,
/// and department. `department` is a case-insensitive exact match.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is malformed.
pub fn list_cards(
    conn: &mut SqliteConnection,
    filter: &CardFilter,
) -> Result<Vec<Card>, PersistenceError> {
    let mut query = cards::table
        .select(CardRow::as_select())
        .order((cards::created_at.desc(), cards::card_id.desc()))
        .into_boxed();

    if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
        let pattern: String = format!("%{search}%");
        query = query.filter(
            cards::name
                .like(pattern.clone())
                .or(cards::id_number.like(pattern.clone()))
                .or(cards::department.like(pattern)),
        );
    }

    if let Some(card_type) = filter.card_type {
        query = query.filter(cards::card_type.eq(card_type.as_str()));
    }

    if let Some(department) = filter.department.as_deref().filter(|d| !d.is_empty()) {
        query = query.filter(cards::department.like(department.to_string()));
    }

    let rows: Vec<CardRow> = query.load(conn)?;
    debug!(count = rows.len(), "Loaded cards");

    rows.into_iter().map(Card::try_from).collect()
}

/// Retrieves a card by ID.
///
/// # Errors
///
/// Returns an error if the query fails.
/// Returns `Ok(None)` if the card does not exist.
pub fn get_card(
    conn: &mut SqliteConnection,
    card_id: i64,
) -> Result<Option<Card>, PersistenceError> {
    let row: Option<CardRow> = cards::table
        .filter(cards::card_id.eq(card_id))
        .select(CardRow::as_select())
        .first(conn)
        .optional()?;

    row.map(Card::try_from).transpose()
}

/// Retrieves a card by its printed ID number.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_card_by_id_number(
    conn: &mut SqliteConnection,
    id_number: &str,
) -> Result<Option<Card>, PersistenceError> {
    let row: Option<CardRow> = cards::table
        .filter(cards::id_number.eq(id_number))
        .select(CardRow::as_select())
        .first(conn)
        .optional()?;

    row.map(Card::try_from).transpose()
}

/// Counts all cards.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_cards(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(cards::table.count().get_result(conn)?)
}
