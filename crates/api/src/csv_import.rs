// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV preview and import for bulk card creation.
//!
//! Preview never writes. Import re-runs the same validation and inserts every
//! row in one transaction, or nothing at all if any row is invalid.

use csv::StringRecord;
use std::collections::{HashMap, HashSet};

use campus_id_domain::{Card, PersonType};
use campus_id_persistence::Persistence;
use tracing::info;

use crate::error::{ApiError, translate_write_error};
use crate::handlers::current_year;
use crate::request_response::{
    CardInfo, CsvImportRequest, CsvPreviewResponse, CsvRowPreview, CsvRowStatus,
    ImportCardsResponse,
};

/// Required CSV column headers.
const REQUIRED_HEADERS: &[&str] = &["name", "id_number", "type", "department"];

/// Optional CSV column headers.
const OPTIONAL_HEADERS: &[&str] = &["program", "year", "email"];

/// Normalizes a header for case-, space-, and separator-insensitive matching.
///
/// `ID Number`, `id_number`, and `idNumber` all normalize to `idnumber`.
fn normalize_header(header: &str) -> String {
    header
        .trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Maps each known canonical header to its column index.
fn validate_headers(headers: &StringRecord) -> Result<HashMap<&'static str, usize>, ApiError> {
    let positions: HashMap<String, usize> = headers
        .iter()
        .enumerate()
        .map(|(idx, header)| (normalize_header(header), idx))
        .collect();

    let mut header_map: HashMap<&'static str, usize> = HashMap::new();
    let mut missing: Vec<&str> = Vec::new();

    for canonical in REQUIRED_HEADERS.iter().chain(OPTIONAL_HEADERS) {
        match positions.get(&normalize_header(canonical)) {
            Some(&idx) => {
                header_map.insert(*canonical, idx);
            }
            None if REQUIRED_HEADERS.contains(canonical) => missing.push(*canonical),
            None => {}
        }
    }

    if !missing.is_empty() {
        return Err(ApiError::invalid(
            "csv",
            format!("Missing required headers: {}", missing.join(", ")),
        ));
    }

    Ok(header_map)
}

struct ParsedRow {
    preview: CsvRowPreview,
    card: Option<Card>,
}

/// Records an error when a required cell is missing or blank.
fn required_field(
    value: Option<String>,
    field_name: &str,
    errors: &mut Vec<String>,
) -> Option<String> {
    if value.is_none() {
        errors.push(format!("{field_name}: required field is missing or empty"));
    }
    value
}

/// Parses one record. Blank cells count as absent.
fn parse_row(
    row_number: usize,
    record: &StringRecord,
    header_map: &HashMap<&'static str, usize>,
    default_year: &str,
) -> ParsedRow {
    let get_field = |name: &str| -> Option<String> {
        header_map
            .get(name)
            .and_then(|&idx| record.get(idx))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    };

    let mut errors: Vec<String> = Vec::new();
    let name: Option<String> = required_field(get_field("name"), "name", &mut errors);
    let id_number: Option<String> =
        required_field(get_field("id_number"), "id_number", &mut errors);
    let department: Option<String> =
        required_field(get_field("department"), "department", &mut errors);
    let program: Option<String> = get_field("program");
    let email: Option<String> = get_field("email");
    let year: String = get_field("year").unwrap_or_else(|| default_year.to_string());

    let card_type: PersonType = match get_field("type") {
        Some(value) if value.eq_ignore_ascii_case("staff") => PersonType::Staff,
        _ => PersonType::Student,
    };

    let card: Option<Card> = match (&name, &id_number, &department) {
        (Some(name), Some(id_number), Some(department)) if errors.is_empty() => {
            let mut card: Card = Card::new(name, id_number, card_type, department);
            card.program.clone_from(&program);
            card.year = Some(year.clone());
            card.email.clone_from(&email);
            Some(card)
        }
        _ => None,
    };

    let preview: CsvRowPreview = CsvRowPreview {
        row_number,
        name,
        id_number,
        card_type: Some(card_type.to_string()),
        department,
        program,
        year: Some(year),
        email,
        status: CsvRowStatus::Valid,
        errors,
    };

    ParsedRow { preview, card }
}

/// Parses and validates every CSV row against the database and against the
/// other rows of the same upload.
fn evaluate_rows(
    persistence: &mut Persistence,
    csv_content: &str,
    default_year: &str,
) -> Result<Vec<ParsedRow>, ApiError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(csv_content.as_bytes());

    let headers: StringRecord = reader
        .headers()
        .map_err(|e| ApiError::invalid("csv", format!("Failed to read CSV headers: {e}")))?
        .clone();
    let header_map: HashMap<&'static str, usize> = validate_headers(&headers)?;

    let mut rows: Vec<ParsedRow> = Vec::new();
    let mut seen_id_numbers: HashSet<String> = HashSet::new();

    for (idx, result) in reader.records().enumerate() {
        let row_number: usize = idx + 1;

        let record: StringRecord = match result {
            Ok(rec) => rec,
            Err(e) => {
                rows.push(ParsedRow {
                    preview: CsvRowPreview {
                        row_number,
                        name: None,
                        id_number: None,
                        card_type: None,
                        department: None,
                        program: None,
                        year: None,
                        email: None,
                        status: CsvRowStatus::Invalid,
                        errors: vec![format!("CSV parse error: {e}")],
                    },
                    card: None,
                });
                continue;
            }
        };

        let mut row: ParsedRow = parse_row(row_number, &record, &header_map, default_year);

        if let Some(id_number) = row.preview.id_number.clone() {
            let exists: bool = persistence
                .get_card_by_id_number(&id_number)
                .map_err(|e| ApiError::internal("Failed to check ID number", &e))?
                .is_some();
            if exists {
                row.preview.errors.push(format!(
                    "id_number: a card with ID number '{id_number}' already exists"
                ));
            }
            if !seen_id_numbers.insert(id_number.clone()) {
                row.preview.errors.push(format!(
                    "id_number: duplicate within CSV - '{id_number}' appears multiple times"
                ));
            }
        }

        if !row.preview.errors.is_empty() {
            row.preview.status = CsvRowStatus::Invalid;
            row.card = None;
        }
        rows.push(row);
    }

    Ok(rows)
}

fn summarize(rows: Vec<CsvRowPreview>) -> CsvPreviewResponse {
    let valid_count: usize = rows
        .iter()
        .filter(|r| r.status == CsvRowStatus::Valid)
        .count();
    CsvPreviewResponse {
        total_rows: rows.len(),
        invalid_count: rows.len() - valid_count,
        valid_count,
        rows,
    }
}

/// Previews and validates CSV card data without persisting.
///
/// Headers are `name`, `id_number`, `type`, `department` and optionally
/// `program`, `year`, `email`, matched regardless of case, spaces, and
/// separators. A `type` of `staff` makes a staff card; anything else a
/// student card. A missing `year` defaults to the current year.
///
/// # Arguments
///
/// * `persistence` - The persistence layer, used to detect taken ID numbers
/// * `request` - The raw CSV content
///
/// # Returns
///
/// * `Ok(CsvPreviewResponse)` with per-row validation results
/// * `Err(ApiError)` if the header row is missing required columns
///
/// # Errors
///
/// Returns an error if the headers cannot be read or a required header is
/// missing, or if the duplicate lookup fails.
pub fn preview_card_csv(
    persistence: &mut Persistence,
    request: &CsvImportRequest,
) -> Result<CsvPreviewResponse, ApiError> {
    let default_year: String = current_year().to_string();
    let rows: Vec<ParsedRow> = evaluate_rows(persistence, &request.csv_content, &default_year)?;
    Ok(summarize(rows.into_iter().map(|r| r.preview).collect()))
}

/// Imports CSV card data.
///
/// # Errors
///
/// Returns an error if:
/// - The headers are invalid
/// - The CSV has no data rows
/// - Any row is invalid (nothing is imported)
/// - The transactional insert fails
pub fn import_card_csv(
    persistence: &mut Persistence,
    request: &CsvImportRequest,
) -> Result<ImportCardsResponse, ApiError> {
    let default_year: String = current_year().to_string();
    let rows: Vec<ParsedRow> = evaluate_rows(persistence, &request.csv_content, &default_year)?;

    if rows.is_empty() {
        return Err(ApiError::invalid("csv", "CSV file contains no data rows"));
    }

    let invalid_count: usize = rows.iter().filter(|r| r.card.is_none()).count();
    if invalid_count > 0 {
        return Err(ApiError::invalid(
            "csv",
            format!("{invalid_count} row(s) failed validation; nothing was imported"),
        ));
    }

    let cards: Vec<Card> = rows.into_iter().filter_map(|r| r.card).collect();
    let created: Vec<Card> = persistence
        .create_cards(&cards)
        .map_err(|e| translate_write_error(e, "Failed to import cards"))?;

    info!(count = created.len(), "Imported cards from CSV");
    Ok(ImportCardsResponse {
        imported_count: created.len(),
        cards: created.into_iter().map(CardInfo::from).collect(),
    })
}
