// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Sample data for a fresh database.

use campus_id_domain::{Card, College, Department, Level, PersonType};
use campus_id_persistence::Persistence;
use tracing::info;

use crate::error::{ApiError, translate_write_error};
use crate::request_response::SeedSummary;

struct SampleCard {
    name: &'static str,
    id_number: &'static str,
    card_type: PersonType,
    department: &'static str,
    program: Option<&'static str>,
    year: Option<&'static str>,
}

const SAMPLE_CARDS: &[SampleCard] = &[
    SampleCard {
        name: "Alex Johnson",
        id_number: "STU2024001",
        card_type: PersonType::Student,
        department: "Computer Science",
        program: Some("B.Sc. Software Engineering"),
        year: Some("2024"),
    },
    SampleCard {
        name: "Sarah Williams",
        id_number: "STU2024002",
        card_type: PersonType::Student,
        department: "Engineering",
        program: Some("B.Eng. Mechanical"),
        year: Some("2024"),
    },
    SampleCard {
        name: "Dr. Robert Smith",
        id_number: "STAFF001",
        card_type: PersonType::Staff,
        department: "Faculty of Science",
        program: None,
        year: None,
    },
    SampleCard {
        name: "Emily Brown",
        id_number: "STAFF002",
        card_type: PersonType::Staff,
        department: "Administration",
        program: None,
        year: None,
    },
];

/// `(name_en, name_ar, code, departments)` where each department is
/// `(name_en, name_ar, code)`.
type SampleCollege = (
    &'static str,
    &'static str,
    &'static str,
    &'static [(&'static str, &'static str, &'static str)],
);

const SAMPLE_COLLEGES: &[SampleCollege] = &[
    (
        "Faculty of Engineering",
        "كلية الهندسة",
        "ENG",
        &[
            ("Mechanical Engineering", "الهندسة الميكانيكية", "ME"),
            ("Electrical Engineering", "الهندسة الكهربائية", "EE"),
        ],
    ),
    (
        "Faculty of Computer Science",
        "كلية علوم الحاسب",
        "CS",
        &[
            ("Software Engineering", "هندسة البرمجيات", "SE"),
            ("Information Systems", "نظم المعلومات", "IS"),
        ],
    ),
    ("Faculty of Business", "كلية إدارة الأعمال", "BUS", &[]),
];

const SAMPLE_LEVELS: &[(&str, &str, i32)] = &[
    ("Level 1 - Freshman", "المستوى الأول", 1),
    ("Level 2 - Sophomore", "المستوى الثاني", 2),
    ("Level 3 - Junior", "المستوى الثالث", 3),
    ("Level 4 - Senior", "المستوى الرابع", 4),
];

fn seed_cards(persistence: &mut Persistence) -> Result<usize, ApiError> {
    let cards: Vec<Card> = SAMPLE_CARDS
        .iter()
        .map(|sample| {
            let mut card: Card = Card::new(
                sample.name,
                sample.id_number,
                sample.card_type,
                sample.department,
            );
            card.card_number = Some(format!("CARD-{}", sample.id_number));
            card.program = sample.program.map(str::to_string);
            card.year = sample.year.map(str::to_string);
            card
        })
        .collect();

    let created: Vec<Card> = persistence
        .create_cards(&cards)
        .map_err(|e| translate_write_error(e, "Failed to seed cards"))?;
    Ok(created.len())
}

fn seed_structure(
    persistence: &mut Persistence,
    summary: &mut SeedSummary,
) -> Result<(), ApiError> {
    for (name_en, name_ar, code, departments) in SAMPLE_COLLEGES {
        let college: College = persistence
            .create_college(&College::new(name_en, name_ar, code))
            .map_err(|e| translate_write_error(e, "Failed to seed college"))?;
        summary.colleges += 1;

        let Some(college_id) = college.college_id else {
            continue;
        };
        for (dept_en, dept_ar, dept_code) in *departments {
            persistence
                .create_department(&Department::new(college_id, dept_en, dept_ar, dept_code))
                .map_err(|e| translate_write_error(e, "Failed to seed department"))?;
            summary.departments += 1;
        }
    }

    for (name_en, name_ar, order) in SAMPLE_LEVELS {
        persistence
            .create_level(&Level::new(name_en, name_ar, *order))
            .map_err(|e| translate_write_error(e, "Failed to seed level"))?;
        summary.levels += 1;
    }

    Ok(())
}

/// Inserts sample data into empty tables.
///
/// The four sample cards are inserted only when there are no cards, and the
/// sample university structure (three colleges, four departments, four
/// levels) only when there are no colleges. Running it again is a no-op.
///
/// # Errors
///
/// Returns an error if a count or insert fails.
pub fn seed_sample_data(persistence: &mut Persistence) -> Result<SeedSummary, ApiError> {
    let mut summary: SeedSummary = SeedSummary::default();

    let card_count: i64 = persistence
        .count_cards()
        .map_err(|e| ApiError::internal("Failed to count cards", &e))?;
    if card_count == 0 {
        summary.cards = seed_cards(persistence)?;
        info!(count = summary.cards, "Database seeded with sample cards");
    }

    let has_colleges: bool = !persistence
        .list_colleges()
        .map_err(|e| ApiError::internal("Failed to list colleges", &e))?
        .is_empty();
    if !has_colleges {
        seed_structure(persistence, &mut summary)?;
        info!(
            colleges = summary.colleges,
            departments = summary.departments,
            levels = summary.levels,
            "Database seeded with university structure"
        );
    }

    Ok(summary)
}
