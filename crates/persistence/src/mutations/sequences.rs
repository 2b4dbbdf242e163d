// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Identifier sequence allocation.
//!
//! Each `(prefix, year)` counter row holds the number the next allocation
//! returns. The read and the write happen inside one `BEGIN IMMEDIATE`
//! transaction, so the write lock is held before the counter is read and two
//! connections can never observe the same value.

use campus_id_domain::SequenceKey;
use diesel::SqliteConnection;
use diesel::prelude::*;
use num_traits::ToPrimitive;
use tracing::{debug, info};

use crate::diesel_schema::id_sequences;
use crate::error::PersistenceError;

/// Allocates the next number in the sequence for `key`.
///
/// The first allocation for a key returns 1 and stores 2. Later allocations
/// return the stored value and store its successor.
///
/// # Errors
///
/// Returns an error if the counter cannot be read or written. No number is
/// consumed in that case.
pub fn allocate_sequence_number(
    conn: &mut SqliteConnection,
    key: &SequenceKey,
) -> Result<u64, PersistenceError> {
    let allocated: i64 = conn.immediate_transaction::<_, PersistenceError, _>(|conn| {
        let existing: Option<(i64, i64)> = id_sequences::table
            .filter(id_sequences::prefix.eq(key.prefix()))
            .filter(id_sequences::year.eq(key.year()))
            .select((id_sequences::sequence_id, id_sequences::next_number))
            .first(conn)
            .optional()?;

        match existing {
            None => {
                diesel::insert_into(id_sequences::table)
                    .values((
                        id_sequences::prefix.eq(key.prefix()),
                        id_sequences::year.eq(key.year()),
                        id_sequences::next_number.eq(2_i64),
                    ))
                    .execute(conn)?;
                info!(sequence = %key, "Started identifier sequence");
                Ok(1)
            }
            Some((sequence_id, next_number)) => {
                let successor: i64 = next_number.checked_add(1).ok_or_else(|| {
                    PersistenceError::QueryFailed(format!("Sequence {key} is exhausted"))
                })?;
                diesel::update(
                    id_sequences::table.filter(id_sequences::sequence_id.eq(sequence_id)),
                )
                .set(id_sequences::next_number.eq(successor))
                .execute(conn)?;
                Ok(next_number)
            }
        }
    })?;

    debug!(sequence = %key, number = allocated, "Allocated sequence number");

    allocated.to_u64().ok_or_else(|| {
        PersistenceError::SerializationError(format!(
            "Sequence {key} holds a negative value: {allocated}"
        ))
    })
}
