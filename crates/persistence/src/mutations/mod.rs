// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mutation modules.
//!
//! This module contains all state-changing operations for the persistence layer.
//! Mutations use Diesel DSL, with `last_insert_rowid()` reached through the
//! `PersistenceBackend` trait.
//!
//! ## Module Organization
//!
//! - `structure`: Colleges, departments, programs, and levels
//! - `persons`: Person create, bulk create, update, delete
//! - `cards`: Card create, bulk create, update, print, delete
//! - `sequences`: Identifier counter allocation

pub mod cards;
pub mod persons;
pub mod sequences;
pub mod structure;

pub use cards::{create_card, create_cards, delete_card, record_card_print, update_card};
pub use persons::{create_person, create_persons, delete_person, update_person};
pub use sequences::allocate_sequence_number;
pub use structure::{
    create_college, create_department, create_level, create_program, delete_college,
    delete_department, delete_program, update_college, update_department, update_program,
};
