// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Identifier sequence allocation tests.

use campus_id_domain::SequenceKey;
use diesel::prelude::*;
use std::collections::BTreeSet;
use std::thread;

use super::TempDatabase;
use crate::Persistence;
use crate::diesel_schema::id_sequences;

/// The stored counter for `key`, or `None` before the first allocation.
fn stored_next_number(persistence: &mut Persistence, key: &SequenceKey) -> Option<i64> {
    id_sequences::table
        .filter(id_sequences::prefix.eq(key.prefix()))
        .filter(id_sequences::year.eq(key.year()))
        .select(id_sequences::next_number)
        .first::<i64>(&mut persistence.conn)
        .optional()
        .unwrap()
}

#[test]
fn test_first_allocation_returns_one_and_stores_two() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let key: SequenceKey = SequenceKey::new("ENG", 2026);

    assert_eq!(stored_next_number(&mut persistence, &key), None);

    let number: u64 = persistence.allocate_sequence_number(&key).unwrap();
    assert_eq!(number, 1);
    assert_eq!(stored_next_number(&mut persistence, &key), Some(2));
}

#[test]
fn test_serial_allocations_are_consecutive() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let key: SequenceKey = SequenceKey::new("STU", 2026);

    let numbers: Vec<u64> = (0..25)
        .map(|_| persistence.allocate_sequence_number(&key).unwrap())
        .collect();

    let expected: Vec<u64> = (1..=25).collect();
    assert_eq!(numbers, expected);
}

#[test]
fn test_keys_are_independent() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let eng: SequenceKey = SequenceKey::new("ENG", 2026);
    let emp: SequenceKey = SequenceKey::new("EMP", 2026);
    let eng_next_year: SequenceKey = SequenceKey::new("ENG", 2027);

    assert_eq!(persistence.allocate_sequence_number(&eng).unwrap(), 1);
    assert_eq!(persistence.allocate_sequence_number(&eng).unwrap(), 2);
    assert_eq!(persistence.allocate_sequence_number(&emp).unwrap(), 1);
    assert_eq!(
        persistence.allocate_sequence_number(&eng_next_year).unwrap(),
        1
    );
    assert_eq!(persistence.allocate_sequence_number(&eng).unwrap(), 3);
}

#[test]
fn test_prefix_match_is_exact() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    assert_eq!(
        persistence
            .allocate_sequence_number(&SequenceKey::new("ENG", 2026))
            .unwrap(),
        1
    );
    assert_eq!(
        persistence
            .allocate_sequence_number(&SequenceKey::new("eng", 2026))
            .unwrap(),
        1
    );
}

#[test]
fn test_counter_survives_reopen() {
    let db = TempDatabase::new("sequence_reopen");
    let key: SequenceKey = SequenceKey::new("VIS", 2026);

    {
        let mut persistence = Persistence::new_with_file(&db.path).unwrap();
        persistence.allocate_sequence_number(&key).unwrap();
        persistence.allocate_sequence_number(&key).unwrap();
    }

    let mut reopened = Persistence::new_with_file(&db.path).unwrap();
    assert_eq!(reopened.allocate_sequence_number(&key).unwrap(), 3);
}

#[test]
fn test_concurrent_connections_never_share_a_number() {
    const THREADS: usize = 8;
    const PER_THREAD: usize = 25;

    let db = TempDatabase::new("sequence_concurrent");
    let key: SequenceKey = SequenceKey::new("ENG", 2026);

    // Open sequentially so migrations run once before any contention.
    let connections: Vec<Persistence> = (0..THREADS)
        .map(|_| Persistence::new_with_file(&db.path).unwrap())
        .collect();

    let handles: Vec<thread::JoinHandle<Vec<u64>>> = connections
        .into_iter()
        .map(|mut persistence| {
            let key: SequenceKey = key.clone();
            thread::spawn(move || {
                (0..PER_THREAD)
                    .map(|_| persistence.allocate_sequence_number(&key).unwrap())
                    .collect()
            })
        })
        .collect();

    let mut all: Vec<u64> = Vec::new();
    for handle in handles {
        all.extend(handle.join().unwrap());
    }

    let distinct: BTreeSet<u64> = all.iter().copied().collect();
    assert_eq!(distinct.len(), THREADS * PER_THREAD, "no number may repeat");

    let expected: BTreeSet<u64> = (1..=(THREADS * PER_THREAD) as u64).collect();
    assert_eq!(distinct, expected, "allocations must have no gaps");
}
