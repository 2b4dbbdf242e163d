// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Dashboard statistics tests.

use campus_id_domain::{Card, CardStatus, Person, PersonType};

use super::{create_test_college, create_test_department};
use crate::{CollegeCount, DashboardStats, Persistence};

#[test]
fn test_empty_database_has_zero_counts() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let stats: DashboardStats = persistence.get_dashboard_stats().unwrap();
    assert_eq!(stats, DashboardStats::default());
}

#[test]
fn test_dashboard_counts() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let eng: i64 = create_test_college(&mut persistence, "ENG")
        .college_id
        .unwrap();
    create_test_college(&mut persistence, "BUS");
    create_test_department(&mut persistence, eng, "ME");

    let mut student: Person = Person::new(PersonType::Student, "ENG-2026-00001", "A");
    student.college_id = Some(eng);
    persistence.create_person(&student).unwrap();
    persistence
        .create_person(&Person::new(PersonType::Staff, "EMP-2026-00001", "B"))
        .unwrap();
    persistence
        .create_person(&Person::new(PersonType::Visitor, "VIS-2026-00001", "C"))
        .unwrap();

    persistence
        .create_card(&Card::new("A", "C-1", PersonType::Student, "ME"))
        .unwrap();
    let mut expired: Card = Card::new("B", "C-2", PersonType::Staff, "HR");
    expired.status = CardStatus::Expired;
    persistence.create_card(&expired).unwrap();

    let stats: DashboardStats = persistence.get_dashboard_stats().unwrap();
    assert_eq!(stats.total_persons, 3);
    assert_eq!(stats.total_students, 1);
    assert_eq!(stats.total_staff, 1);
    assert_eq!(stats.total_visitors, 1);
    assert_eq!(stats.total_cards, 2);
    assert_eq!(stats.active_cards, 1);
    assert_eq!(stats.expired_cards, 1);
    assert_eq!(stats.total_colleges, 2);
    assert_eq!(stats.total_departments, 1);
    assert_eq!(
        stats.by_college,
        vec![
            CollegeCount {
                name: String::from("Faculty of ENG"),
                count: 1,
            },
            CollegeCount {
                name: String::from("Faculty of BUS"),
                count: 0,
            },
        ]
    );
}
