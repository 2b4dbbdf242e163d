// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Person persistence tests.

use campus_id_domain::{Card, Person, PersonFilter, PersonStatus, PersonType, PersonUpdate};

use super::{create_test_college, create_test_department, create_test_person};
use crate::{Persistence, PersistenceError};

#[test]
fn test_create_person_stores_all_fields() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let eng: i64 = create_test_college(&mut persistence, "ENG")
        .college_id
        .unwrap();
    let me: i64 = create_test_department(&mut persistence, eng, "ME")
        .department_id
        .unwrap();

    let mut person: Person = Person::new(PersonType::Student, "ENG-2026-00001", "Omar Hassan");
    person.full_name_ar = Some(String::from("عمر حسن"));
    person.email = Some(String::from("omar@example.edu"));
    person.college_id = Some(eng);
    person.department_id = Some(me);
    person.photo_url = Some(String::from("/photos/omar.jpg"));

    let created: Person = persistence.create_person(&person).unwrap();
    assert!(created.person_id.is_some());
    assert_eq!(created.university_id, "ENG-2026-00001");
    assert_eq!(created.full_name_ar.as_deref(), Some("عمر حسن"));
    assert_eq!(created.department_id, Some(me));
    assert_eq!(created.status, PersonStatus::Active);
    assert!(created.created_at.is_some());
    assert!(created.updated_at.is_some());
}

#[test]
fn test_duplicate_university_id_is_a_unique_violation() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    create_test_person(&mut persistence, "STU-2026-00001");

    let result: Result<Person, PersistenceError> = persistence.create_person(&Person::new(
        PersonType::Staff,
        "STU-2026-00001",
        "Someone Else",
    ));
    assert!(matches!(result, Err(PersistenceError::UniqueViolation(_))));
}

#[test]
fn test_get_person_by_university_id() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let created: Person = create_test_person(&mut persistence, "STU-2026-00007");

    assert_eq!(
        persistence
            .get_person_by_university_id("STU-2026-00007")
            .unwrap(),
        Some(created)
    );
    assert!(
        persistence
            .get_person_by_university_id("STU-2026-99999")
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_bulk_create_is_all_or_nothing() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let batch: Vec<Person> = vec![
        Person::new(PersonType::Student, "STU-2026-00001", "First"),
        Person::new(PersonType::Student, "STU-2026-00002", "Second"),
        Person::new(PersonType::Student, "STU-2026-00001", "Duplicate"),
    ];
    let result: Result<Vec<Person>, PersistenceError> = persistence.create_persons(&batch);
    assert!(matches!(result, Err(PersistenceError::UniqueViolation(_))));
    assert!(
        persistence
            .list_persons(&PersonFilter::default())
            .unwrap()
            .is_empty()
    );

    let created: Vec<Person> = persistence.create_persons(&batch[..2]).unwrap();
    assert_eq!(created.len(), 2);
    assert_eq!(created[1].full_name_en, "Second");
}

#[test]
fn test_bulk_create_empty_batch() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    assert!(persistence.create_persons(&[]).unwrap().is_empty());
}

#[test]
fn test_list_persons_newest_first() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    create_test_person(&mut persistence, "STU-2026-00001");
    create_test_person(&mut persistence, "STU-2026-00002");
    create_test_person(&mut persistence, "STU-2026-00003");

    let ids: Vec<String> = persistence
        .list_persons(&PersonFilter::default())
        .unwrap()
        .into_iter()
        .map(|p| p.university_id)
        .collect();
    assert_eq!(
        ids,
        vec![
            String::from("STU-2026-00003"),
            String::from("STU-2026-00002"),
            String::from("STU-2026-00001"),
        ]
    );
}

#[test]
fn test_list_persons_search_is_case_insensitive_over_several_fields() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let mut sara: Person = Person::new(PersonType::Staff, "EMP-2026-00001", "Sara Ali");
    sara.email = Some(String::from("sara.finance@example.edu"));
    persistence.create_person(&sara).unwrap();

    let mut omar: Person = Person::new(PersonType::Student, "ENG-2026-00001", "Omar Hassan");
    omar.full_name_ar = Some(String::from("عمر حسن"));
    persistence.create_person(&omar).unwrap();

    let by_name = PersonFilter {
        search: Some(String::from("sara")),
        ..PersonFilter::default()
    };
    assert_eq!(persistence.list_persons(&by_name).unwrap().len(), 1);

    let by_email = PersonFilter {
        search: Some(String::from("FINANCE")),
        ..PersonFilter::default()
    };
    assert_eq!(persistence.list_persons(&by_email).unwrap().len(), 1);

    let by_arabic = PersonFilter {
        search: Some(String::from("عمر")),
        ..PersonFilter::default()
    };
    let found: Vec<Person> = persistence.list_persons(&by_arabic).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].university_id, "ENG-2026-00001");

    let by_id = PersonFilter {
        search: Some(String::from("2026-0000")),
        ..PersonFilter::default()
    };
    assert_eq!(persistence.list_persons(&by_id).unwrap().len(), 2);
}

#[test]
fn test_list_persons_filters_combine() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let eng: i64 = create_test_college(&mut persistence, "ENG")
        .college_id
        .unwrap();

    let mut student: Person = Person::new(PersonType::Student, "ENG-2026-00001", "A");
    student.college_id = Some(eng);
    persistence.create_person(&student).unwrap();

    let mut suspended: Person = Person::new(PersonType::Student, "ENG-2026-00002", "B");
    suspended.college_id = Some(eng);
    suspended.status = PersonStatus::Suspended;
    persistence.create_person(&suspended).unwrap();

    persistence
        .create_person(&Person::new(PersonType::Visitor, "VIS-2026-00001", "C"))
        .unwrap();

    let filter = PersonFilter {
        person_type: Some(PersonType::Student),
        status: Some(PersonStatus::Active),
        college_id: Some(eng),
        ..PersonFilter::default()
    };
    let found: Vec<Person> = persistence.list_persons(&filter).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].university_id, "ENG-2026-00001");

    let visitors = PersonFilter {
        person_type: Some(PersonType::Visitor),
        ..PersonFilter::default()
    };
    assert_eq!(persistence.list_persons(&visitors).unwrap().len(), 1);
}

#[test]
fn test_update_person_clears_nullable_fields() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let mut person: Person = Person::new(PersonType::Staff, "EMP-2026-00001", "Sara Ali");
    person.phone = Some(String::from("+966 500 000 000"));
    person.position = Some(String::from("Registrar"));
    let person_id: i64 = persistence
        .create_person(&person)
        .unwrap()
        .person_id
        .unwrap();

    let update = PersonUpdate {
        phone: Some(None),
        status: Some(PersonStatus::Suspended),
        ..PersonUpdate::default()
    };
    let updated: Person = persistence
        .update_person(person_id, &update)
        .unwrap()
        .unwrap();

    assert!(updated.phone.is_none());
    assert_eq!(updated.position.as_deref(), Some("Registrar"));
    assert_eq!(updated.status, PersonStatus::Suspended);
}

#[test]
fn test_empty_person_update_still_succeeds() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let person: Person = create_test_person(&mut persistence, "STU-2026-00001");

    let updated: Option<Person> = persistence
        .update_person(person.person_id.unwrap(), &PersonUpdate::default())
        .unwrap();
    assert_eq!(updated.map(|p| p.university_id), Some(person.university_id));
}

#[test]
fn test_update_missing_person_returns_none() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let update = PersonUpdate {
        full_name_en: Some(String::from("Nobody")),
        ..PersonUpdate::default()
    };
    assert!(persistence.update_person(12, &update).unwrap().is_none());
}

#[test]
fn test_delete_person_cascades_to_cards() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let person: Person = create_test_person(&mut persistence, "STU-2026-00001");
    let person_id: i64 = person.person_id.unwrap();

    let mut card: Card = Card::new(
        "Omar Hassan",
        "STU-2026-00001",
        PersonType::Student,
        "Civil",
    );
    card.person_id = Some(person_id);
    let card_id: i64 = persistence.create_card(&card).unwrap().card_id.unwrap();

    assert!(persistence.delete_person(person_id).unwrap());
    assert!(persistence.get_person(person_id).unwrap().is_none());
    assert!(persistence.get_card(card_id).unwrap().is_none());
}
