// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Card mutations.

use campus_id_domain::{Card, CardUpdate, format_iso_date};
use diesel::SqliteConnection;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{Nullable, Text};
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::cards;
use crate::error::PersistenceError;
use crate::queries::cards::get_card;

#[allow(clippy::option_option, clippy::ref_option)]
#[derive(AsChangeset)]
#[diesel(table_name = cards)]
struct CardChangeset<'a> {
    person_id: Option<Option<i64>>,
    card_number: Option<Option<&'a str>>,
    issue_date: Option<Option<String>>,
    expiry_date: Option<Option<String>>,
    status: Option<&'a str>,
    name: Option<&'a str>,
    id_number: Option<&'a str>,
    card_type: Option<&'a str>,
    department: Option<&'a str>,
    program: Option<Option<&'a str>>,
    year: Option<Option<&'a str>>,
    photo_url: Option<Option<&'a str>>,
    email: Option<Option<&'a str>>,
}

#[allow(clippy::option_option)]
fn nullable(value: Option<&Option<String>>) -> Option<Option<&str>> {
    value.map(Option::as_deref)
}

impl<'a> From<&'a CardUpdate> for CardChangeset<'a> {
    fn from(update: &'a CardUpdate) -> Self {
        Self {
            person_id: update.person_id,
            card_number: nullable(update.card_number.as_ref()),
            issue_date: update.issue_date.map(|d| d.map(format_iso_date)),
            expiry_date: update.expiry_date.map(|d| d.map(format_iso_date)),
            status: update.status.map(|s| s.as_str()),
            name: update.name.as_deref(),
            id_number: update.id_number.as_deref(),
            card_type: update.card_type.map(|t| t.as_str()),
            department: update.department.as_deref(),
            program: nullable(update.program.as_ref()),
            year: nullable(update.year.as_ref()),
            photo_url: nullable(update.photo_url.as_ref()),
            email: nullable(update.email.as_ref()),
        }
    }
}

fn insert_card(conn: &mut SqliteConnection, card: &Card) -> Result<Card, PersistenceError> {
    diesel::insert_into(cards::table)
        .values((
            cards::person_id.eq(card.person_id),
            cards::card_number.eq(card.card_number.as_deref()),
            cards::issue_date.eq(card.issue_date.map(format_iso_date)),
            cards::expiry_date.eq(card.expiry_date.map(format_iso_date)),
            cards::status.eq(card.status.as_str()),
            cards::name.eq(&card.name),
            cards::id_number.eq(&card.id_number),
            cards::card_type.eq(card.card_type.as_str()),
            cards::department.eq(&card.department),
            cards::program.eq(card.program.as_deref()),
            cards::year.eq(card.year.as_deref()),
            cards::photo_url.eq(card.photo_url.as_deref()),
            cards::email.eq(card.email.as_deref()),
        ))
        .execute(conn)?;

    let card_id: i64 = conn.get_last_insert_rowid()?;

    get_card(conn, card_id)?
        .ok_or_else(|| PersistenceError::NotFound(format!("Card {card_id} missing after insert")))
}

/// Creates a card and returns the stored row.
///
/// # Errors
///
/// Returns `UniqueViolation` if the ID number is taken and
/// `ForeignKeyViolation` if the linked person does not exist.
pub fn create_card(conn: &mut SqliteConnection, card: &Card) -> Result<Card, PersistenceError> {
    let created: Card = insert_card(conn, card)?;
    info!(
        card_id = ?created.card_id,
        id_number = %created.id_number,
        "Created card"
    );
    Ok(created)
}

/// Creates several cards in one transaction.
///
/// Either every card is stored or none is.
///
/// # Errors
///
/// Returns the first constraint violation encountered; nothing is stored.
pub fn create_cards(
    conn: &mut SqliteConnection,
    cards: &[Card],
) -> Result<Vec<Card>, PersistenceError> {
    if cards.is_empty() {
        return Ok(Vec::new());
    }

    let created: Vec<Card> = conn.transaction::<_, PersistenceError, _>(|conn| {
        cards.iter().map(|card| insert_card(conn, card)).collect()
    })?;

    info!(count = created.len(), "Created cards in bulk");
    Ok(created)
}

/// Applies a partial update to a card.
///
/// Returns `Ok(None)` if the card does not exist.
///
/// # Errors
///
/// Returns an error if a constraint rejects the update.
pub fn update_card(
    conn: &mut SqliteConnection,
    card_id: i64,
    update: &CardUpdate,
) -> Result<Option<Card>, PersistenceError> {
    if !update.is_empty() {
        let updated: usize = diesel::update(cards::table.filter(cards::card_id.eq(card_id)))
            .set(CardChangeset::from(update))
            .execute(conn)?;
        if updated > 0 {
            info!(card_id, "Updated card");
        }
    }
    get_card(conn, card_id)
}

/// Records one print of a card.
///
/// Increments `print_count` and stamps `last_printed_at`. Returns `Ok(None)`
/// if the card does not exist.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn record_card_print(
    conn: &mut SqliteConnection,
    card_id: i64,
) -> Result<Option<Card>, PersistenceError> {
    let updated: usize = diesel::update(cards::table.filter(cards::card_id.eq(card_id)))
        .set((
            cards::print_count.eq(cards::print_count + 1),
            cards::last_printed_at.eq(sql::<Nullable<Text>>("CURRENT_TIMESTAMP")),
        ))
        .execute(conn)?;

    if updated > 0 {
        info!(card_id, "Recorded card print");
    }
    get_card(conn, card_id)
}

/// Deletes a card. Returns whether a row was removed.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_card(conn: &mut SqliteConnection, card_id: i64) -> Result<bool, PersistenceError> {
    let deleted: usize = diesel::delete(cards::table)
        .filter(cards::card_id.eq(card_id))
        .execute(conn)?;
    if deleted > 0 {
        info!(card_id, "Deleted card");
    }
    Ok(deleted > 0)
}
