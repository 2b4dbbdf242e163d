// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Card persistence tests.

use campus_id_domain::{Card, CardFilter, CardStatus, CardUpdate, PersonType};
use time::macros::date;

use super::create_test_card;
use crate::{Persistence, PersistenceError};

#[test]
fn test_create_card_round_trips_dates() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let mut card: Card = Card::new("Sara Ali", "EMP-2026-00001", PersonType::Staff, "Finance");
    card.issue_date = Some(date!(2026 - 01 - 15));
    card.expiry_date = Some(date!(2030 - 01 - 14));
    card.card_number = Some(String::from("CARD-EMP-2026-00001"));

    let created: Card = persistence.create_card(&card).unwrap();
    assert_eq!(created.issue_date, Some(date!(2026 - 01 - 15)));
    assert_eq!(created.expiry_date, Some(date!(2030 - 01 - 14)));
    assert_eq!(created.card_type, PersonType::Staff);
    assert_eq!(created.print_count, 0);
    assert!(created.last_printed_at.is_none());
}

#[test]
fn test_duplicate_id_number_is_a_unique_violation() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    create_test_card(&mut persistence, "STU2024001");

    let result: Result<Card, PersistenceError> = persistence.create_card(&Card::new(
        "Other",
        "STU2024001",
        PersonType::Student,
        "Math",
    ));
    assert!(matches!(result, Err(PersistenceError::UniqueViolation(_))));
}

#[test]
fn test_card_linked_to_unknown_person_is_rejected() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let mut card: Card = Card::new("Ghost", "X-1", PersonType::Visitor, "None");
    card.person_id = Some(404);

    let result: Result<Card, PersistenceError> = persistence.create_card(&card);
    assert!(matches!(
        result,
        Err(PersistenceError::ForeignKeyViolation(_))
    ));
}

#[test]
fn test_bulk_create_cards_rolls_back_on_duplicate() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    create_test_card(&mut persistence, "STU2024001");

    let batch: Vec<Card> = vec![
        Card::new("New One", "STU2024002", PersonType::Student, "Math"),
        Card::new("Clash", "STU2024001", PersonType::Student, "Math"),
    ];
    assert!(persistence.create_cards(&batch).is_err());
    assert_eq!(persistence.count_cards().unwrap(), 1);
}

#[test]
fn test_list_cards_filters() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    persistence
        .create_card(&Card::new(
            "Alex Johnson",
            "STU2024001",
            PersonType::Student,
            "Computer Science",
        ))
        .unwrap();
    persistence
        .create_card(&Card::new(
            "Sarah Williams",
            "STU2024002",
            PersonType::Student,
            "Engineering",
        ))
        .unwrap();
    persistence
        .create_card(&Card::new(
            "Dr. Robert Smith",
            "STAFF001",
            PersonType::Staff,
            "Faculty of Science",
        ))
        .unwrap();

    let staff = CardFilter {
        card_type: Some(PersonType::Staff),
        ..CardFilter::default()
    };
    assert_eq!(persistence.list_cards(&staff).unwrap().len(), 1);

    let search = CardFilter {
        search: Some(String::from("science")),
        ..CardFilter::default()
    };
    assert_eq!(persistence.list_cards(&search).unwrap().len(), 2);

    let department = CardFilter {
        department: Some(String::from("engineering")),
        ..CardFilter::default()
    };
    let found: Vec<Card> = persistence.list_cards(&department).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Sarah Williams");

    let all: Vec<Card> = persistence.list_cards(&CardFilter::default()).unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].id_number, "STAFF001", "newest first");
}

#[test]
fn test_update_card_sets_and_clears_fields() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let mut card: Card = Card::new("Alex Johnson", "STU2024001", PersonType::Student, "CS");
    card.expiry_date = Some(date!(2027 - 06 - 30));
    card.program = Some(String::from("B.Sc. Software Engineering"));
    let card_id: i64 = persistence.create_card(&card).unwrap().card_id.unwrap();

    let update = CardUpdate {
        status: Some(CardStatus::Revoked),
        expiry_date: Some(None),
        photo_url: Some(Some(String::from("/photos/alex.jpg"))),
        ..CardUpdate::default()
    };
    let updated: Card = persistence.update_card(card_id, &update).unwrap().unwrap();

    assert_eq!(updated.status, CardStatus::Revoked);
    assert!(updated.expiry_date.is_none());
    assert_eq!(updated.photo_url.as_deref(), Some("/photos/alex.jpg"));
    assert_eq!(
        updated.program.as_deref(),
        Some("B.Sc. Software Engineering")
    );
}

#[test]
fn test_record_card_print_increments_count() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let card_id: i64 = create_test_card(&mut persistence, "STU2024001")
        .card_id
        .unwrap();

    persistence.record_card_print(card_id).unwrap();
    let printed: Card = persistence.record_card_print(card_id).unwrap().unwrap();

    assert_eq!(printed.print_count, 2);
    assert!(printed.last_printed_at.is_some());
    assert!(persistence.record_card_print(9_999).unwrap().is_none());
}

#[test]
fn test_delete_card() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let card_id: i64 = create_test_card(&mut persistence, "STU2024001")
        .card_id
        .unwrap();

    assert!(persistence.delete_card(card_id).unwrap());
    assert!(persistence.get_card(card_id).unwrap().is_none());
    assert!(!persistence.delete_card(card_id).unwrap());
}

#[test]
fn test_get_card_by_id_number() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let created: Card = create_test_card(&mut persistence, "STAFF001");

    assert_eq!(
        persistence.get_card_by_id_number("STAFF001").unwrap(),
        Some(created)
    );
    assert!(persistence.get_card_by_id_number("STAFF999").unwrap().is_none());
}
