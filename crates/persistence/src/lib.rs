// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the campus ID card service.
//!
//! This crate stores the university structure, persons, cards, and identifier
//! sequences in `SQLite` via Diesel.
//!
//! ## Backend
//!
//! - In-memory databases for tests, one isolated shared-cache database per
//!   `Persistence::new_in_memory()` call
//! - File databases in WAL mode for the server
//!
//! Every connection enables foreign keys, sets a busy timeout, and runs the
//! embedded migrations from `migrations/`.
//!
//! ## Concurrency
//!
//! `Persistence` owns a single connection and is not shared between threads.
//! Identifier allocation takes the database write lock before reading the
//! counter, so separate connections (or processes) opened on the same file
//! still receive distinct numbers.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use campus_id_domain::{
    Card, CardFilter, CardUpdate, College, CollegeUpdate, Department, DepartmentUpdate, Level,
    Person, PersonFilter, PersonUpdate, Program, ProgramUpdate, SequenceKey,
};
use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{CollegeCount, DashboardStats};
pub use error::PersistenceError;

use backend::PersistenceBackend;

/// Persistence adapter over one `SQLite` connection.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:campus_memdb_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// Several adapters may be opened on the same file.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        self.conn.verify_foreign_key_enforcement()
    }

    // ========================================================================
    // Identifier Sequences
    // ========================================================================

    /// Allocates the next number for an identifier sequence.
    ///
    /// # Errors
    ///
    /// Returns an error if the counter cannot be updated. No number is
    /// returned in that case.
    pub fn allocate_sequence_number(&mut self, key: &SequenceKey) -> Result<u64, PersistenceError> {
        mutations::allocate_sequence_number(&mut self.conn, key)
    }

    // ========================================================================
    // Colleges
    // ========================================================================

    /// Lists colleges by English name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_colleges(&mut self) -> Result<Vec<College>, PersistenceError> {
        queries::list_colleges(&mut self.conn)
    }

    /// Retrieves a college by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_college(&mut self, college_id: i64) -> Result<Option<College>, PersistenceError> {
        queries::get_college(&mut self.conn, college_id)
    }

    /// Retrieves a college by code.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_college_by_code(&mut self, code: &str) -> Result<Option<College>, PersistenceError> {
        queries::get_college_by_code(&mut self.conn, code)
    }

    /// Creates a college.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is taken or the insert fails.
    pub fn create_college(&mut self, college: &College) -> Result<College, PersistenceError> {
        mutations::create_college(&mut self.conn, college)
    }

    /// Updates a college.
    ///
    /// # Errors
    ///
    /// Returns an error if a constraint rejects the update.
    pub fn update_college(
        &mut self,
        college_id: i64,
        update: &CollegeUpdate,
    ) -> Result<Option<College>, PersistenceError> {
        mutations::update_college(&mut self.conn, college_id, update)
    }

    /// Deletes a college.
    ///
    /// # Errors
    ///
    /// Returns an error if the college is still referenced.
    pub fn delete_college(&mut self, college_id: i64) -> Result<bool, PersistenceError> {
        mutations::delete_college(&mut self.conn, college_id)
    }

    // ========================================================================
    // Departments
    // ========================================================================

    /// Lists departments, optionally for one college.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_departments(
        &mut self,
        college_id: Option<i64>,
    ) -> Result<Vec<Department>, PersistenceError> {
        queries::list_departments(&mut self.conn, college_id)
    }

    /// Retrieves a department by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_department(
        &mut self,
        department_id: i64,
    ) -> Result<Option<Department>, PersistenceError> {
        queries::get_department(&mut self.conn, department_id)
    }

    /// Creates a department.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is taken or the college is unknown.
    pub fn create_department(
        &mut self,
        department: &Department,
    ) -> Result<Department, PersistenceError> {
        mutations::create_department(&mut self.conn, department)
    }

    /// Updates a department.
    ///
    /// # Errors
    ///
    /// Returns an error if a constraint rejects the update.
    pub fn update_department(
        &mut self,
        department_id: i64,
        update: &DepartmentUpdate,
    ) -> Result<Option<Department>, PersistenceError> {
        mutations::update_department(&mut self.conn, department_id, update)
    }

    /// Deletes a department.
    ///
    /// # Errors
    ///
    /// Returns an error if the department is still referenced.
    pub fn delete_department(&mut self, department_id: i64) -> Result<bool, PersistenceError> {
        mutations::delete_department(&mut self.conn, department_id)
    }

    // ========================================================================
    // Programs
    // ========================================================================

    /// Lists programs, optionally for one department.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_programs(
        &mut self,
        department_id: Option<i64>,
    ) -> Result<Vec<Program>, PersistenceError> {
        queries::list_programs(&mut self.conn, department_id)
    }

    /// Retrieves a program by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_program(&mut self, program_id: i64) -> Result<Option<Program>, PersistenceError> {
        queries::get_program(&mut self.conn, program_id)
    }

    /// Creates a program.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is taken or the department is unknown.
    pub fn create_program(&mut self, program: &Program) -> Result<Program, PersistenceError> {
        mutations::create_program(&mut self.conn, program)
    }

    /// Updates a program.
    ///
    /// # Errors
    ///
    /// Returns an error if a constraint rejects the update.
    pub fn update_program(
        &mut self,
        program_id: i64,
        update: &ProgramUpdate,
    ) -> Result<Option<Program>, PersistenceError> {
        mutations::update_program(&mut self.conn, program_id, update)
    }

    /// Deletes a program.
    ///
    /// # Errors
    ///
    /// Returns an error if the program is still referenced.
    pub fn delete_program(&mut self, program_id: i64) -> Result<bool, PersistenceError> {
        mutations::delete_program(&mut self.conn, program_id)
    }

    // ========================================================================
    // Levels
    // ========================================================================

    /// Lists levels by sort order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_levels(&mut self) -> Result<Vec<Level>, PersistenceError> {
        queries::list_levels(&mut self.conn)
    }

    /// Retrieves a level by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_level(&mut self, level_id: i64) -> Result<Option<Level>, PersistenceError> {
        queries::get_level(&mut self.conn, level_id)
    }

    /// Creates a level.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_level(&mut self, level: &Level) -> Result<Level, PersistenceError> {
        mutations::create_level(&mut self.conn, level)
    }

    // ========================================================================
    // Persons
    // ========================================================================

    /// Lists persons matching a filter, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_persons(&mut self, filter: &PersonFilter) -> Result<Vec<Person>, PersistenceError> {
        queries::list_persons(&mut self.conn, filter)
    }

    /// Retrieves a person by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_person(&mut self, person_id: i64) -> Result<Option<Person>, PersistenceError> {
        queries::get_person(&mut self.conn, person_id)
    }

    /// Retrieves a person by university ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_person_by_university_id(
        &mut self,
        university_id: &str,
    ) -> Result<Option<Person>, PersistenceError> {
        queries::get_person_by_university_id(&mut self.conn, university_id)
    }

    /// Creates a person.
    ///
    /// # Errors
    ///
    /// Returns an error if the university ID is taken or a reference is unknown.
    pub fn create_person(&mut self, person: &Person) -> Result<Person, PersistenceError> {
        mutations::create_person(&mut self.conn, person)
    }

    /// Creates persons atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if any insert fails; nothing is stored.
    pub fn create_persons(&mut self, persons: &[Person]) -> Result<Vec<Person>, PersistenceError> {
        mutations::create_persons(&mut self.conn, persons)
    }

    /// Updates a person.
    ///
    /// # Errors
    ///
    /// Returns an error if a constraint rejects the update.
    pub fn update_person(
        &mut self,
        person_id: i64,
        update: &PersonUpdate,
    ) -> Result<Option<Person>, PersistenceError> {
        mutations::update_person(&mut self.conn, person_id, update)
    }

    /// Deletes a person and their cards.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_person(&mut self, person_id: i64) -> Result<bool, PersistenceError> {
        mutations::delete_person(&mut self.conn, person_id)
    }

    // ========================================================================
    // Cards
    // ========================================================================

    /// Lists cards matching a filter, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_cards(&mut self, filter: &CardFilter) -> Result<Vec<Card>, PersistenceError> {
        queries::list_cards(&mut self.conn, filter)
    }

    /// Counts all cards.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_cards(&mut self) -> Result<i64, PersistenceError> {
        queries::count_cards(&mut self.conn)
    }

    /// Retrieves a card by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_card(&mut self, card_id: i64) -> Result<Option<Card>, PersistenceError> {
        queries::get_card(&mut self.conn, card_id)
    }

    /// Retrieves a card by its printed ID number.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_card_by_id_number(
        &mut self,
        id_number: &str,
    ) -> Result<Option<Card>, PersistenceError> {
        queries::get_card_by_id_number(&mut self.conn, id_number)
    }

    /// Creates a card.
    ///
    /// # Errors
    ///
    /// Returns an error if the ID number is taken or the person is unknown.
    pub fn create_card(&mut self, card: &Card) -> Result<Card, PersistenceError> {
        mutations::create_card(&mut self.conn, card)
    }

    /// Creates cards atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if any insert fails; nothing is stored.
    pub fn create_cards(&mut self, cards: &[Card]) -> Result<Vec<Card>, PersistenceError> {
        mutations::create_cards(&mut self.conn, cards)
    }

    /// Updates a card.
    ///
    /// # Errors
    ///
    /// Returns an error if a constraint rejects the update.
    pub fn update_card(
        &mut self,
        card_id: i64,
        update: &CardUpdate,
    ) -> Result<Option<Card>, PersistenceError> {
        mutations::update_card(&mut self.conn, card_id, update)
    }

    /// Records that a card was printed.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn record_card_print(&mut self, card_id: i64) -> Result<Option<Card>, PersistenceError> {
        mutations::record_card_print(&mut self.conn, card_id)
    }

    /// Deletes a card.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_card(&mut self, card_id: i64) -> Result<bool, PersistenceError> {
        mutations::delete_card(&mut self.conn, card_id)
    }

    // ========================================================================
    // Statistics
    // ========================================================================

    /// Computes the dashboard totals.
    ///
    /// # Errors
    ///
    /// Returns an error if a count query fails.
    pub fn get_dashboard_stats(&mut self) -> Result<DashboardStats, PersistenceError> {
        queries::get_dashboard_stats(&mut self.conn)
    }
}
