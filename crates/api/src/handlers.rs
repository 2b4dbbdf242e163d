// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.

use std::str::FromStr;

use campus_id_domain::{
    Card, CardFilter, CardStatus, CardUpdate, College, CollegeUpdate, Department, DepartmentUpdate,
    Level, Person, PersonFilter, PersonStatus, PersonType, PersonUpdate, Program, ProgramUpdate,
    SequenceKey, ValidationReport, parse_iso_date, validate_card_fields, validate_level_fields,
    validate_person_fields, validate_program_duration, validate_structure_fields,
};
use campus_id_persistence::{Persistence, PersistenceError};
use time::{Date, OffsetDateTime};
use tracing::{debug, info};

use crate::error::{ApiError, translate_delete_error, translate_domain_error, translate_write_error};
use crate::request_response::{
    CardInfo, CardListQuery, CollegeInfo, CreateCardRequest, CreateCollegeRequest,
    CreateDepartmentRequest, CreateLevelRequest, CreatePersonRequest, CreateProgramRequest,
    DashboardStatsResponse, DepartmentInfo, GenerateIdRequest, GenerateIdResponse, LevelInfo,
    PersonInfo, PersonListQuery, ProgramInfo, UpdateCardRequest, UpdateCollegeRequest,
    UpdateDepartmentRequest, UpdatePersonRequest, UpdateProgramRequest,
};

const DUPLICATE_COLLEGE_CODE: &str = "A college with this code already exists";
const DUPLICATE_DEPARTMENT_CODE: &str = "A department with this code already exists";
const DUPLICATE_PROGRAM_CODE: &str = "A program with this code already exists";
const DUPLICATE_UNIVERSITY_ID: &str = "A person with this University ID already exists";
const DUPLICATE_UNIVERSITY_IDS: &str = "One or more persons have duplicate University IDs";
const DUPLICATE_ID_NUMBER: &str = "A card with this ID Number already exists";
const DUPLICATE_ID_NUMBERS: &str = "One or more cards have duplicate ID Numbers";

/// The calendar year identifiers are allocated in. Taken in UTC.
pub(crate) fn current_year() -> i32 {
    OffsetDateTime::now_utc().year()
}

/// Maps a write failure, giving unique violations a request-specific message.
fn on_write<'a>(
    context: &'a str,
    field: Option<&'a str>,
    duplicate_message: &'a str,
) -> impl FnOnce(PersistenceError) -> ApiError + 'a {
    move |err| match err {
        PersistenceError::UniqueViolation(_) => ApiError::duplicate(field, duplicate_message),
        other => translate_write_error(other, context),
    }
}

fn on_read(context: &str) -> impl FnOnce(PersistenceError) -> ApiError + '_ {
    move |err| ApiError::internal(context, &err)
}

pub(crate) fn parse_person_type(value: &str) -> Result<PersonType, ApiError> {
    PersonType::from_str(value).map_err(translate_domain_error)
}

fn parse_person_status(value: &str) -> Result<PersonStatus, ApiError> {
    PersonStatus::from_str(value).map_err(translate_domain_error)
}

fn parse_card_status(value: &str) -> Result<CardStatus, ApiError> {
    CardStatus::from_str(value).map_err(translate_domain_error)
}

/// Parses an optional `YYYY-MM-DD` field. Blank strings count as absent.
fn parse_date_field(value: Option<&str>, field: &str) -> Result<Option<Date>, ApiError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => parse_iso_date(v)
            .map(Some)
            .map_err(|e| ApiError::invalid(field, e.to_string())),
    }
}

fn reject_blank(field: &str, value: Option<&str>) -> Result<(), ApiError> {
    if value.is_some_and(|v| v.trim().is_empty()) {
        return Err(ApiError::invalid(field, format!("{field} cannot be empty")));
    }
    Ok(())
}

fn validate_code_update(code: Option<&str>) -> Result<Option<String>, ApiError> {
    let Some(code) = code.map(str::trim) else {
        return Ok(None);
    };
    if code.is_empty() {
        return Err(ApiError::invalid("code", "Code cannot be empty"));
    }
    if code.contains(char::is_whitespace) {
        return Err(ApiError::invalid(
            "code",
            format!("Code '{code}' cannot contain whitespace"),
        ));
    }
    Ok(Some(code.to_string()))
}

fn require_college(persistence: &mut Persistence, college_id: i64) -> Result<College, ApiError> {
    persistence
        .get_college(college_id)
        .map_err(on_read("Failed to load college"))?
        .ok_or_else(|| {
            ApiError::invalid("collegeId", format!("College {college_id} does not exist"))
        })
}

fn require_department(persistence: &mut Persistence, department_id: i64) -> Result<(), ApiError> {
    persistence
        .get_department(department_id)
        .map_err(on_read("Failed to load department"))?
        .map(|_| ())
        .ok_or_else(|| {
            ApiError::invalid(
                "departmentId",
                format!("Department {department_id} does not exist"),
            )
        })
}

// ---------------------------------------------------------------------------
// Colleges
// ---------------------------------------------------------------------------

/// Lists all colleges ordered by English name.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_colleges(persistence: &mut Persistence) -> Result<Vec<CollegeInfo>, ApiError> {
    Ok(persistence
        .list_colleges()
        .map_err(on_read("Failed to list colleges"))?
        .into_iter()
        .map(CollegeInfo::from)
        .collect())
}

/// Retrieves one college.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the college does not exist.
pub fn get_college(
    persistence: &mut Persistence,
    college_id: i64,
) -> Result<CollegeInfo, ApiError> {
    persistence
        .get_college(college_id)
        .map_err(on_read("Failed to load college"))?
        .map(CollegeInfo::from)
        .ok_or_else(|| ApiError::not_found("College"))
}

/// Creates a college.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The college to create
///
/// # Errors
///
/// Returns an error if:
/// - The code or either name is blank, or the code contains whitespace
/// - The code is already used by another college
/// - The database write fails
pub fn create_college(
    persistence: &mut Persistence,
    request: &CreateCollegeRequest,
) -> Result<CollegeInfo, ApiError> {
    validate_structure_fields(&request.code, &request.name_en, &request.name_ar)
        .map_err(translate_domain_error)?;

    let college: College = College::new(
        request.name_en.trim(),
        request.name_ar.trim(),
        &request.code,
    );
    persistence
        .create_college(&college)
        .map(CollegeInfo::from)
        .map_err(on_write(
            "Failed to create college",
            Some("code"),
            DUPLICATE_COLLEGE_CODE,
        ))
}

/// Partially updates a college.
///
/// # Errors
///
/// Returns an error if a supplied field is blank, the new code is taken, or
/// the college does not exist.
pub fn update_college(
    persistence: &mut Persistence,
    college_id: i64,
    request: UpdateCollegeRequest,
) -> Result<CollegeInfo, ApiError> {
    reject_blank("nameEn", request.name_en.as_deref())?;
    reject_blank("nameAr", request.name_ar.as_deref())?;
    let update: CollegeUpdate = CollegeUpdate {
        code: validate_code_update(request.code.as_deref())?,
        name_en: request.name_en,
        name_ar: request.name_ar,
    };

    persistence
        .update_college(college_id, &update)
        .map_err(on_write(
            "Failed to update college",
            Some("code"),
            DUPLICATE_COLLEGE_CODE,
        ))?
        .map(CollegeInfo::from)
        .ok_or_else(|| ApiError::not_found("College"))
}

/// Deletes a college.
///
/// # Errors
///
/// Returns `DomainRuleViolation` while departments or persons still
/// reference the college, and `ResourceNotFound` if it does not exist.
pub fn delete_college(persistence: &mut Persistence, college_id: i64) -> Result<(), ApiError> {
    let deleted: bool = persistence
        .delete_college(college_id)
        .map_err(|e| translate_delete_error(e, "College"))?;
    if !deleted {
        return Err(ApiError::not_found("College"));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Departments
// ---------------------------------------------------------------------------

/// Lists departments, optionally restricted to one college.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_departments(
    persistence: &mut Persistence,
    college_id: Option<i64>,
) -> Result<Vec<DepartmentInfo>, ApiError> {
    Ok(persistence
        .list_departments(college_id)
        .map_err(on_read("Failed to list departments"))?
        .into_iter()
        .map(DepartmentInfo::from)
        .collect())
}

/// Retrieves one department.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the department does not exist.
pub fn get_department(
    persistence: &mut Persistence,
    department_id: i64,
) -> Result<DepartmentInfo, ApiError> {
    persistence
        .get_department(department_id)
        .map_err(on_read("Failed to load department"))?
        .map(DepartmentInfo::from)
        .ok_or_else(|| ApiError::not_found("Department"))
}

/// Creates a department under an existing college.
///
/// # Errors
///
/// Returns an error if a field is blank, the college does not exist, or the
/// code is already taken.
pub fn create_department(
    persistence: &mut Persistence,
    request: &CreateDepartmentRequest,
) -> Result<DepartmentInfo, ApiError> {
    validate_structure_fields(&request.code, &request.name_en, &request.name_ar)
        .map_err(translate_domain_error)?;
    require_college(persistence, request.college_id)?;

    let department: Department = Department::new(
        request.college_id,
        request.name_en.trim(),
        request.name_ar.trim(),
        &request.code,
    );
    persistence
        .create_department(&department)
        .map(DepartmentInfo::from)
        .map_err(on_write(
            "Failed to create department",
            Some("code"),
            DUPLICATE_DEPARTMENT_CODE,
        ))
}

/// Partially updates a department. A department may move between colleges.
///
/// # Errors
///
/// Returns an error if a supplied field is blank, the target college does not
/// exist, the new code is taken, or the department does not exist.
pub fn update_department(
    persistence: &mut Persistence,
    department_id: i64,
    request: UpdateDepartmentRequest,
) -> Result<DepartmentInfo, ApiError> {
    reject_blank("nameEn", request.name_en.as_deref())?;
    reject_blank("nameAr", request.name_ar.as_deref())?;
    if let Some(college_id) = request.college_id {
        require_college(persistence, college_id)?;
    }
    let update: DepartmentUpdate = DepartmentUpdate {
        college_id: request.college_id,
        code: validate_code_update(request.code.as_deref())?,
        name_en: request.name_en,
        name_ar: request.name_ar,
    };

    persistence
        .update_department(department_id, &update)
        .map_err(on_write(
            "Failed to update department",
            Some("code"),
            DUPLICATE_DEPARTMENT_CODE,
        ))?
        .map(DepartmentInfo::from)
        .ok_or_else(|| ApiError::not_found("Department"))
}

/// Deletes a department.
///
/// # Errors
///
/// Returns `DomainRuleViolation` while programs or persons still reference
/// the department, and `ResourceNotFound` if it does not exist.
pub fn delete_department(
    persistence: &mut Persistence,
    department_id: i64,
) -> Result<(), ApiError> {
    let deleted: bool = persistence
        .delete_department(department_id)
        .map_err(|e| translate_delete_error(e, "Department"))?;
    if !deleted {
        return Err(ApiError::not_found("Department"));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Programs
// ---------------------------------------------------------------------------

/// Lists programs, optionally restricted to one department.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_programs(
    persistence: &mut Persistence,
    department_id: Option<i64>,
) -> Result<Vec<ProgramInfo>, ApiError> {
    Ok(persistence
        .list_programs(department_id)
        .map_err(on_read("Failed to list programs"))?
        .into_iter()
        .map(ProgramInfo::from)
        .collect())
}

/// Retrieves one program.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the program does not exist.
pub fn get_program(
    persistence: &mut Persistence,
    program_id: i64,
) -> Result<ProgramInfo, ApiError> {
    persistence
        .get_program(program_id)
        .map_err(on_read("Failed to load program"))?
        .map(ProgramInfo::from)
        .ok_or_else(|| ApiError::not_found("Program"))
}

/// Creates a program under an existing department.
///
/// # Errors
///
/// Returns an error if a field is blank, the duration is outside 1..=10, the
/// department does not exist, or the code is already taken.
pub fn create_program(
    persistence: &mut Persistence,
    request: &CreateProgramRequest,
) -> Result<ProgramInfo, ApiError> {
    validate_structure_fields(&request.code, &request.name_en, &request.name_ar)
        .map_err(translate_domain_error)?;
    let duration_years: i32 = request
        .duration_years
        .unwrap_or(Program::DEFAULT_DURATION_YEARS);
    validate_program_duration(duration_years).map_err(translate_domain_error)?;
    require_department(persistence, request.department_id)?;

    let mut program: Program = Program::new(
        request.department_id,
        request.name_en.trim(),
        request.name_ar.trim(),
        &request.code,
    );
    program.duration_years = duration_years;

    persistence
        .create_program(&program)
        .map(ProgramInfo::from)
        .map_err(on_write(
            "Failed to create program",
            Some("code"),
            DUPLICATE_PROGRAM_CODE,
        ))
}

/// Partially updates a program.
///
/// # Errors
///
/// Returns an error if a supplied field is invalid, the target department
/// does not exist, the new code is taken, or the program does not exist.
pub fn update_program(
    persistence: &mut Persistence,
    program_id: i64,
    request: UpdateProgramRequest,
) -> Result<ProgramInfo, ApiError> {
    reject_blank("nameEn", request.name_en.as_deref())?;
    reject_blank("nameAr", request.name_ar.as_deref())?;
    if let Some(years) = request.duration_years {
        validate_program_duration(years).map_err(translate_domain_error)?;
    }
    if let Some(department_id) = request.department_id {
        require_department(persistence, department_id)?;
    }
    let update: ProgramUpdate = ProgramUpdate {
        department_id: request.department_id,
        code: validate_code_update(request.code.as_deref())?,
        name_en: request.name_en,
        name_ar: request.name_ar,
        duration_years: request.duration_years,
    };

    persistence
        .update_program(program_id, &update)
        .map_err(on_write(
            "Failed to update program",
            Some("code"),
            DUPLICATE_PROGRAM_CODE,
        ))?
        .map(ProgramInfo::from)
        .ok_or_else(|| ApiError::not_found("Program"))
}

/// Deletes a program.
///
/// # Errors
///
/// Returns `DomainRuleViolation` while persons still reference the program,
/// and `ResourceNotFound` if it does not exist.
pub fn delete_program(persistence: &mut Persistence, program_id: i64) -> Result<(), ApiError> {
    let deleted: bool = persistence
        .delete_program(program_id)
        .map_err(|e| translate_delete_error(e, "Program"))?;
    if !deleted {
        return Err(ApiError::not_found("Program"));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Levels
// ---------------------------------------------------------------------------

/// Lists levels by sort order.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_levels(persistence: &mut Persistence) -> Result<Vec<LevelInfo>, ApiError> {
    Ok(persistence
        .list_levels()
        .map_err(on_read("Failed to list levels"))?
        .into_iter()
        .map(LevelInfo::from)
        .collect())
}

/// Creates a level.
///
/// # Errors
///
/// Returns an error if either name is blank or the write fails.
pub fn create_level(
    persistence: &mut Persistence,
    request: &CreateLevelRequest,
) -> Result<LevelInfo, ApiError> {
    let level: Level = Level::new(
        request.name_en.trim(),
        request.name_ar.trim(),
        request.order,
    );
    validate_level_fields(&level).map_err(translate_domain_error)?;
    persistence
        .create_level(&level)
        .map(LevelInfo::from)
        .map_err(|e| translate_write_error(e, "Failed to create level"))
}

// ---------------------------------------------------------------------------
// Identifier allocation
// ---------------------------------------------------------------------------

/// Allocates the next identifier for `person_type` in `year`.
pub(crate) fn allocate_university_id(
    persistence: &mut Persistence,
    person_type: PersonType,
    college_code: Option<&str>,
    year: i32,
) -> Result<String, ApiError> {
    let key: SequenceKey = SequenceKey::resolve(person_type, college_code, year);
    let number: u64 = persistence
        .allocate_sequence_number(&key)
        .map_err(on_read("Failed to allocate university ID"))?;
    let university_id: String = key.format_identifier(number);

    info!(sequence = %key, university_id = %university_id, "Allocated university ID");
    Ok(university_id)
}

/// Allocates an identifier for a person that arrived without one.
///
/// Students take the code of their college as the prefix when they have one.
fn allocate_for_person(
    persistence: &mut Persistence,
    person: &Person,
    year: i32,
) -> Result<String, ApiError> {
    let college_code: Option<String> = match (person.person_type, person.college_id) {
        (PersonType::Student, Some(college_id)) => {
            Some(require_college(persistence, college_id)?.code)
        }
        _ => None,
    };
    allocate_university_id(
        persistence,
        person.person_type,
        college_code.as_deref(),
        year,
    )
}

/// Allocates the next university identifier for a person type.
///
/// Each call consumes a number from the `(prefix, year)` sequence whether or
/// not the identifier is ever used.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The person type and optional student college code
///
/// # Returns
///
/// * `Ok(GenerateIdResponse)` with an identifier such as `ENG-2026-00001`
/// * `Err(ApiError)` if the type is invalid or the counter cannot be updated
///
/// # Errors
///
/// Returns an error if the person type is not recognized or the allocation
/// transaction fails. No identifier is returned on failure.
pub fn generate_university_id(
    persistence: &mut Persistence,
    request: &GenerateIdRequest,
) -> Result<GenerateIdResponse, ApiError> {
    let person_type: PersonType = parse_person_type(&request.person_type)?;
    let university_id: String = allocate_university_id(
        persistence,
        person_type,
        request.college_code.as_deref(),
        current_year(),
    )?;
    Ok(GenerateIdResponse { university_id })
}

// ---------------------------------------------------------------------------
// Persons
// ---------------------------------------------------------------------------

fn person_from_request(request: CreatePersonRequest) -> Result<Person, ApiError> {
    let person_type: PersonType = parse_person_type(&request.person_type)?;
    let status: PersonStatus = request
        .status
        .as_deref()
        .map(parse_person_status)
        .transpose()?
        .unwrap_or_default();

    if request.full_name_en.trim().is_empty() {
        return Err(ApiError::invalid(
            "fullNameEn",
            "English name cannot be empty",
        ));
    }

    let university_id: String = request
        .university_id
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_string();

    let mut person: Person = Person::new(person_type, &university_id, request.full_name_en.trim());
    person.national_id = request.national_id;
    person.full_name_ar = request.full_name_ar;
    person.email = request.email;
    person.phone = request.phone;
    person.college_id = request.college_id;
    person.department_id = request.department_id;
    person.program_id = request.program_id;
    person.level_id = request.level_id;
    person.position = request.position;
    person.photo_url = request.photo_url;
    person.status = status;
    Ok(person)
}

/// Lists persons matching the query, newest first.
///
/// # Errors
///
/// Returns an error if a type or status filter is not recognized or the
/// query fails.
pub fn list_persons(
    persistence: &mut Persistence,
    query: &PersonListQuery,
) -> Result<Vec<PersonInfo>, ApiError> {
    let filter: PersonFilter = PersonFilter {
        search: query.search.clone().filter(|s| !s.trim().is_empty()),
        person_type: query
            .person_type
            .as_deref()
            .map(parse_person_type)
            .transpose()?,
        status: query
            .status
            .as_deref()
            .map(parse_person_status)
            .transpose()?,
        college_id: query.college_id,
        department_id: query.department_id,
    };

    Ok(persistence
        .list_persons(&filter)
        .map_err(on_read("Failed to list persons"))?
        .into_iter()
        .map(PersonInfo::from)
        .collect())
}

/// Retrieves one person.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the person does not exist.
pub fn get_person(persistence: &mut Persistence, person_id: i64) -> Result<PersonInfo, ApiError> {
    persistence
        .get_person(person_id)
        .map_err(on_read("Failed to load person"))?
        .map(PersonInfo::from)
        .ok_or_else(|| ApiError::not_found("Person"))
}

/// Creates a person, allocating a university ID when none is supplied.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The person to create
///
/// # Errors
///
/// Returns an error if:
/// - The type or status is not recognized
/// - The English name is blank
/// - A student references a college that does not exist
/// - The university ID is already taken
/// - A referenced record does not exist
/// - The database write fails
pub fn create_person(
    persistence: &mut Persistence,
    request: CreatePersonRequest,
) -> Result<PersonInfo, ApiError> {
    let mut person: Person = person_from_request(request)?;
    if person.university_id.is_empty() {
        person.university_id = allocate_for_person(persistence, &person, current_year())?;
    }
    validate_person_fields(&person).map_err(translate_domain_error)?;

    persistence
        .create_person(&person)
        .map(PersonInfo::from)
        .map_err(on_write(
            "Failed to create person",
            Some("universityId"),
            DUPLICATE_UNIVERSITY_ID,
        ))
}

/// Creates many persons in one transaction.
///
/// Every request is validated before any identifier is allocated; the insert
/// itself is all-or-nothing.
///
/// # Errors
///
/// Returns an error if any request is invalid, any university ID collides,
/// or the write fails. Nothing is inserted on error.
pub fn create_persons(
    persistence: &mut Persistence,
    requests: Vec<CreatePersonRequest>,
) -> Result<Vec<PersonInfo>, ApiError> {
    let mut persons: Vec<Person> = requests
        .into_iter()
        .map(person_from_request)
        .collect::<Result<_, _>>()?;

    let year: i32 = current_year();
    for person in &mut persons {
        if person.university_id.is_empty() {
            person.university_id = allocate_for_person(persistence, person, year)?;
        }
    }

    let created: Vec<Person> = persistence.create_persons(&persons).map_err(on_write(
        "Failed to create persons",
        Some("universityId"),
        DUPLICATE_UNIVERSITY_IDS,
    ))?;
    debug!(count = created.len(), "Bulk created persons");
    Ok(created.into_iter().map(PersonInfo::from).collect())
}

/// Partially updates a person.
///
/// # Errors
///
/// Returns an error if a supplied value is invalid, the university ID is
/// taken, or the person does not exist.
pub fn update_person(
    persistence: &mut Persistence,
    person_id: i64,
    request: UpdatePersonRequest,
) -> Result<PersonInfo, ApiError> {
    reject_blank("fullNameEn", request.full_name_en.as_deref())?;
    reject_blank("universityId", request.university_id.as_deref())?;

    let update: PersonUpdate = PersonUpdate {
        person_type: request
            .person_type
            .as_deref()
            .map(parse_person_type)
            .transpose()?,
        status: request
            .status
            .as_deref()
            .map(parse_person_status)
            .transpose()?,
        university_id: request.university_id.map(|v| v.trim().to_string()),
        full_name_en: request.full_name_en.map(|v| v.trim().to_string()),
        national_id: request.national_id,
        full_name_ar: request.full_name_ar,
        email: request.email,
        phone: request.phone,
        college_id: request.college_id,
        department_id: request.department_id,
        program_id: request.program_id,
        level_id: request.level_id,
        position: request.position,
        photo_url: request.photo_url,
    };

    persistence
        .update_person(person_id, &update)
        .map_err(on_write(
            "Failed to update person",
            Some("universityId"),
            DUPLICATE_UNIVERSITY_ID,
        ))?
        .map(PersonInfo::from)
        .ok_or_else(|| ApiError::not_found("Person"))
}

/// Deletes a person and every card linked to them.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the person does not exist.
pub fn delete_person(persistence: &mut Persistence, person_id: i64) -> Result<(), ApiError> {
    let deleted: bool = persistence
        .delete_person(person_id)
        .map_err(|e| translate_delete_error(e, "Person"))?;
    if !deleted {
        return Err(ApiError::not_found("Person"));
    }
    Ok(())
}

/// Evaluates whether a person record is ready to print.
///
/// An unknown id is not an error: it yields the "Person not found" report.
///
/// # Errors
///
/// Returns an error only if the lookup itself fails.
pub fn validate_person(
    persistence: &mut Persistence,
    person_id: i64,
) -> Result<ValidationReport, ApiError> {
    let person: Option<Person> = persistence
        .get_person(person_id)
        .map_err(on_read("Failed to load person"))?;
    Ok(person.map_or_else(ValidationReport::person_not_found, |p| {
        campus_id_domain::validate_person(&p)
    }))
}

// ---------------------------------------------------------------------------
// Cards
// ---------------------------------------------------------------------------

pub(crate) fn card_from_request(request: CreateCardRequest) -> Result<Card, ApiError> {
    let card_type: PersonType = parse_person_type(&request.card_type)?;
    let status: CardStatus = request
        .status
        .as_deref()
        .map(parse_card_status)
        .transpose()?
        .unwrap_or_default();

    let mut card: Card = Card::new(
        request.name.trim(),
        request.id_number.trim(),
        card_type,
        request.department.trim(),
    );
    card.person_id = request.person_id;
    card.card_number = request.card_number;
    card.issue_date = parse_date_field(request.issue_date.as_deref(), "issueDate")?;
    card.expiry_date = parse_date_field(request.expiry_date.as_deref(), "expiryDate")?;
    card.status = status;
    card.program = request.program;
    card.year = request.year;
    card.photo_url = request.photo_url;
    card.email = request.email;

    validate_card_fields(&card).map_err(translate_domain_error)?;
    Ok(card)
}

/// Lists cards matching the query, newest first.
///
/// # Errors
///
/// Returns an error if the type filter is not recognized or the query fails.
pub fn list_cards(
    persistence: &mut Persistence,
    query: &CardListQuery,
) -> Result<Vec<CardInfo>, ApiError> {
    let filter: CardFilter = CardFilter {
        search: query.search.clone().filter(|s| !s.trim().is_empty()),
        card_type: query
            .card_type
            .as_deref()
            .map(parse_person_type)
            .transpose()?,
        department: query.department.clone().filter(|s| !s.trim().is_empty()),
    };

    Ok(persistence
        .list_cards(&filter)
        .map_err(on_read("Failed to list cards"))?
        .into_iter()
        .map(CardInfo::from)
        .collect())
}

/// Retrieves one card.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the card does not exist.
pub fn get_card(persistence: &mut Persistence, card_id: i64) -> Result<CardInfo, ApiError> {
    persistence
        .get_card(card_id)
        .map_err(on_read("Failed to load card"))?
        .map(CardInfo::from)
        .ok_or_else(|| ApiError::not_found("Card"))
}

/// Creates a card.
///
/// # Errors
///
/// Returns an error if:
/// - The type, status, or a date is invalid
/// - The name or ID number is blank
/// - The ID number is already taken
/// - The linked person does not exist
pub fn create_card(
    persistence: &mut Persistence,
    request: CreateCardRequest,
) -> Result<CardInfo, ApiError> {
    let card: Card = card_from_request(request)?;
    persistence
        .create_card(&card)
        .map(CardInfo::from)
        .map_err(on_write(
            "Failed to create card",
            Some("idNumber"),
            DUPLICATE_ID_NUMBER,
        ))
}

/// Creates many cards in one transaction.
///
/// # Errors
///
/// Returns an error if any request is invalid or any ID number collides.
/// Nothing is inserted on error.
pub fn create_cards(
    persistence: &mut Persistence,
    requests: Vec<CreateCardRequest>,
) -> Result<Vec<CardInfo>, ApiError> {
    let cards: Vec<Card> = requests
        .into_iter()
        .map(card_from_request)
        .collect::<Result<_, _>>()?;

    let created: Vec<Card> = persistence
        .create_cards(&cards)
        .map_err(on_write(
            "Failed to create cards",
            None,
            DUPLICATE_ID_NUMBERS,
        ))?;
    debug!(count = created.len(), "Bulk created cards");
    Ok(created.into_iter().map(CardInfo::from).collect())
}

/// Partially updates a card.
///
/// # Errors
///
/// Returns an error if a supplied value is invalid, the ID number is taken,
/// or the card does not exist.
pub fn update_card(
    persistence: &mut Persistence,
    card_id: i64,
    request: UpdateCardRequest,
) -> Result<CardInfo, ApiError> {
    reject_blank("name", request.name.as_deref())?;
    reject_blank("idNumber", request.id_number.as_deref())?;

    let issue_date: Option<Option<Date>> = request
        .issue_date
        .map(|v| parse_date_field(v.as_deref(), "issueDate"))
        .transpose()?;
    let expiry_date: Option<Option<Date>> = request
        .expiry_date
        .map(|v| parse_date_field(v.as_deref(), "expiryDate"))
        .transpose()?;

    let update: CardUpdate = CardUpdate {
        person_id: request.person_id,
        card_number: request.card_number,
        issue_date,
        expiry_date,
        status: request
            .status
            .as_deref()
            .map(parse_card_status)
            .transpose()?,
        name: request.name.map(|v| v.trim().to_string()),
        id_number: request.id_number.map(|v| v.trim().to_string()),
        card_type: request
            .card_type
            .as_deref()
            .map(parse_person_type)
            .transpose()?,
        department: request.department.map(|v| v.trim().to_string()),
        program: request.program,
        year: request.year,
        photo_url: request.photo_url,
        email: request.email,
    };

    persistence
        .update_card(card_id, &update)
        .map_err(on_write(
            "Failed to update card",
            Some("idNumber"),
            DUPLICATE_ID_NUMBER,
        ))?
        .map(CardInfo::from)
        .ok_or_else(|| ApiError::not_found("Card"))
}

/// Deletes a card.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the card does not exist.
pub fn delete_card(persistence: &mut Persistence, card_id: i64) -> Result<(), ApiError> {
    let deleted: bool = persistence
        .delete_card(card_id)
        .map_err(|e| translate_delete_error(e, "Card"))?;
    if !deleted {
        return Err(ApiError::not_found("Card"));
    }
    Ok(())
}

/// Evaluates whether a card is ready to print, as of now.
///
/// An unknown id is not an error: it yields the "Card not found" report.
///
/// # Errors
///
/// Returns an error only if the lookup itself fails.
pub fn validate_card(
    persistence: &mut Persistence,
    card_id: i64,
) -> Result<ValidationReport, ApiError> {
    let card: Option<Card> = persistence
        .get_card(card_id)
        .map_err(on_read("Failed to load card"))?;
    let now: OffsetDateTime = OffsetDateTime::now_utc();
    Ok(card.map_or_else(ValidationReport::card_not_found, |c| {
        campus_id_domain::validate_card(&c, now)
    }))
}

/// Records that a card was printed.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the card does not exist.
pub fn record_card_print(
    persistence: &mut Persistence,
    card_id: i64,
) -> Result<CardInfo, ApiError> {
    let card: Card = persistence
        .record_card_print(card_id)
        .map_err(on_read("Failed to record card print"))?
        .ok_or_else(|| ApiError::not_found("Card"))?;
    info!(
        card_id,
        print_count = card.print_count,
        "Recorded card print"
    );
    Ok(CardInfo::from(card))
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

/// Computes the dashboard totals.
///
/// # Errors
///
/// Returns an error if any count query fails.
pub fn get_dashboard_stats(
    persistence: &mut Persistence,
) -> Result<DashboardStatsResponse, ApiError> {
    persistence
        .get_dashboard_stats()
        .map(DashboardStatsResponse::from)
        .map_err(on_read("Failed to compute dashboard statistics"))
}
