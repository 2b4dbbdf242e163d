// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Query modules for persistence layer.
//!
//! This module contains all read-only queries for the persistence layer.
//!
//! ## Module Organization
//!
//! - `structure`: Colleges, departments, programs, and levels
//! - `persons`: Person lookups and filtered listing
//! - `cards`: Card lookups and filtered listing
//! - `stats`: Dashboard counts

pub mod cards;
pub mod persons;
pub mod stats;
pub mod structure;

pub use cards::{count_cards, get_card, get_card_by_id_number, list_cards};
pub use persons::{get_person, get_person_by_university_id, list_persons};
pub use stats::get_dashboard_stats;
pub use structure::{
    get_college, get_college_by_code, get_department, get_level, get_program, list_colleges,
    list_departments, list_levels, list_programs,
};
