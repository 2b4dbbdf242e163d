// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod card_tests;
mod person_tests;
mod sequence_tests;
mod stats_tests;
mod structure_tests;

use campus_id_domain::{Card, College, Department, Person, PersonType};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::Persistence;

static TEMP_DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A database file under the system temp directory, removed on drop.
pub struct TempDatabase {
    pub path: PathBuf,
}

impl TempDatabase {
    pub fn new(label: &str) -> Self {
        let id: u64 = TEMP_DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let path: PathBuf = std::env::temp_dir().join(format!(
            "campus_id_{label}_{}_{id}.db",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        Self { path }
    }
}

impl Drop for TempDatabase {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm"] {
            let mut file = self.path.clone().into_os_string();
            file.push(suffix);
            let _ = std::fs::remove_file(file);
        }
    }
}

pub fn create_test_college(persistence: &mut Persistence, code: &str) -> College {
    persistence
        .create_college(&College::new(&format!("Faculty of {code}"), "كلية", code))
        .unwrap()
}

pub fn create_test_department(
    persistence: &mut Persistence,
    college_id: i64,
    code: &str,
) -> Department {
    persistence
        .create_department(&Department::new(
            college_id,
            &format!("Department of {code}"),
            "قسم",
            code,
        ))
        .unwrap()
}

pub fn create_test_person(persistence: &mut Persistence, university_id: &str) -> Person {
    persistence
        .create_person(&Person::new(
            PersonType::Student,
            university_id,
            "Omar Hassan",
        ))
        .unwrap()
}

pub fn create_test_card(persistence: &mut Persistence, id_number: &str) -> Card {
    persistence
        .create_card(&Card::new(
            "Omar Hassan",
            id_number,
            PersonType::Student,
            "Civil Engineering",
        ))
        .unwrap()
}
