// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request layer for the campus ID card service.
//!
//! Handlers take a `&mut Persistence`, translate wire DTOs into domain
//! values, and translate every lower-layer error into an [`ApiError`].
//! Nothing here knows about HTTP.

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

mod csv_import;
mod error;
mod handlers;
mod request_response;
mod seed;

#[cfg(test)]
mod tests;

pub use csv_import::{import_card_csv, preview_card_csv};
pub use error::{ApiError, translate_delete_error, translate_domain_error, translate_write_error};
pub use handlers::{
    create_card, create_cards, create_college, create_department, create_level, create_person,
    create_persons, create_program, delete_card, delete_college, delete_department, delete_person,
    delete_program, generate_university_id, get_card, get_college, get_dashboard_stats,
    get_department, get_person, get_program, list_cards, list_colleges, list_departments,
    list_levels, list_persons, list_programs, record_card_print, update_card, update_college,
    update_department, update_person, update_program, validate_card, validate_person,
};
pub use request_response::{
    CardInfo, CardListQuery, CollegeCountInfo, CollegeInfo, CreateCardRequest,
    CreateCollegeRequest, CreateDepartmentRequest, CreateLevelRequest, CreatePersonRequest,
    CreateProgramRequest, CsvImportRequest, CsvPreviewResponse, CsvRowPreview, CsvRowStatus,
    DashboardStatsResponse, DepartmentInfo, GenerateIdRequest, GenerateIdResponse,
    ImportCardsResponse, LevelInfo, PersonInfo, PersonListQuery, ProgramInfo, SeedSummary,
    UpdateCardRequest, UpdateCollegeRequest, UpdateDepartmentRequest, UpdatePersonRequest,
    UpdateProgramRequest,
};
pub use seed::seed_sample_data;

pub use campus_id_domain::ValidationReport;
