// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use campus_id_api::{
    ApiError, CardInfo, CardListQuery, CollegeInfo, CreateCardRequest, CreateCollegeRequest,
    CreateDepartmentRequest, CreateLevelRequest, CreatePersonRequest, CreateProgramRequest,
    CsvImportRequest, CsvPreviewResponse, DashboardStatsResponse, DepartmentInfo,
    GenerateIdRequest, GenerateIdResponse, ImportCardsResponse, LevelInfo, PersonInfo,
    PersonListQuery, ProgramInfo, SeedSummary, UpdateCardRequest, UpdateCollegeRequest,
    UpdateDepartmentRequest, UpdatePersonRequest, UpdateProgramRequest, ValidationReport,
    create_card, create_cards, create_college, create_department, create_level, create_person,
    create_persons, create_program, delete_card, delete_college, delete_department, delete_person,
    delete_program, generate_university_id, get_card, get_college, get_dashboard_stats,
    get_department, get_person, get_program, import_card_csv, list_cards, list_colleges,
    list_departments, list_levels, list_persons, list_programs, preview_card_csv,
    record_card_print, seed_sample_data, update_card, update_college, update_department,
    update_person, update_program, validate_card, validate_person,
};
use campus_id_persistence::Persistence;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

/// Campus ID Server - HTTP server for university ID card management
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: IpAddr,

    /// Skip inserting sample data into an empty database
    #[arg(long)]
    no_seed: bool,
}

/// Application state shared across handlers.
///
/// Handlers hold the lock for all of their persistence work, so identifier
/// allocation is serialized within the process.
#[derive(Clone)]
struct AppState {
    persistence: Arc<Mutex<Persistence>>,
}

/// Query parameters for listing departments.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DepartmentListQuery {
    college_id: Option<i64>,
}

/// Query parameters for listing programs.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProgramListQuery {
    department_id: Option<i64>,
}

/// Response for the liveness probe.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HealthResponse {
    status: String,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
    /// The offending request field, when one is known.
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<String>,
}

/// HTTP error wrapper that implements `IntoResponse`.
#[derive(Debug)]
struct HttpError {
    status: StatusCode,
    message: String,
    field: Option<String>,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
            field: self.field,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::InvalidInput { field, message } => Self {
                status: StatusCode::BAD_REQUEST,
                message,
                field: Some(field),
            },
            ApiError::DuplicateValue { field, message } => Self {
                status: StatusCode::BAD_REQUEST,
                message,
                field,
            },
            ApiError::DomainRuleViolation { rule, message } => {
                warn!(rule = %rule, "Rejected by domain rule");
                Self {
                    status: StatusCode::CONFLICT,
                    message,
                    field: None,
                }
            }
            ApiError::ResourceNotFound { message, .. } => Self {
                status: StatusCode::NOT_FOUND,
                message,
                field: None,
            },
            ApiError::Internal { message } => {
                error!(error = %message, "Internal error");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: String::from("Internal server error"),
                    field: None,
                }
            }
        }
    }
}

type Created<T> = (StatusCode, Json<T>);

// ---------------------------------------------------------------------------
// Colleges
// ---------------------------------------------------------------------------

/// Handler for GET `/api/colleges`.
async fn handle_list_colleges(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<CollegeInfo>>, HttpError> {
    debug!("Handling list_colleges request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(list_colleges(&mut persistence)?))
}

/// Handler for GET `/api/colleges/{id}`.
async fn handle_get_college(
    AxumState(app_state): AxumState<AppState>,
    Path(college_id): Path<i64>,
) -> Result<Json<CollegeInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(get_college(&mut persistence, college_id)?))
}

/// Handler for POST `/api/colleges`.
async fn handle_create_college(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateCollegeRequest>,
) -> Result<Created<CollegeInfo>, HttpError> {
    info!(code = %req.code, "Handling create_college request");
    let mut persistence = app_state.persistence.lock().await;
    let college: CollegeInfo = create_college(&mut persistence, &req)?;
    drop(persistence);

    info!(college_id = college.id, code = %college.code, "Created college");
    Ok((StatusCode::CREATED, Json(college)))
}

/// Handler for PUT `/api/colleges/{id}`.
async fn handle_update_college(
    AxumState(app_state): AxumState<AppState>,
    Path(college_id): Path<i64>,
    Json(req): Json<UpdateCollegeRequest>,
) -> Result<Json<CollegeInfo>, HttpError> {
    info!(college_id, "Handling update_college request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(update_college(&mut persistence, college_id, req)?))
}

/// Handler for DELETE `/api/colleges/{id}`.
async fn handle_delete_college(
    AxumState(app_state): AxumState<AppState>,
    Path(college_id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    info!(college_id, "Handling delete_college request");
    let mut persistence = app_state.persistence.lock().await;
    delete_college(&mut persistence, college_id)?;
    drop(persistence);
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Departments
// ---------------------------------------------------------------------------

/// Handler for GET `/api/departments`, optionally scoped by `collegeId`.
async fn handle_list_departments(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<DepartmentListQuery>,
) -> Result<Json<Vec<DepartmentInfo>>, HttpError> {
    debug!(college_id = ?query.college_id, "Handling list_departments request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(list_departments(&mut persistence, query.college_id)?))
}

async fn handle_get_department(
    AxumState(app_state): AxumState<AppState>,
    Path(department_id): Path<i64>,
) -> Result<Json<DepartmentInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(get_department(&mut persistence, department_id)?))
}

async fn handle_create_department(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateDepartmentRequest>,
) -> Result<Created<DepartmentInfo>, HttpError> {
    info!(
        college_id = req.college_id,
        code = %req.code,
        "Handling create_department request"
    );
    let mut persistence = app_state.persistence.lock().await;
    let department: DepartmentInfo = create_department(&mut persistence, &req)?;
    drop(persistence);
    Ok((StatusCode::CREATED, Json(department)))
}

async fn handle_update_department(
    AxumState(app_state): AxumState<AppState>,
    Path(department_id): Path<i64>,
    Json(req): Json<UpdateDepartmentRequest>,
) -> Result<Json<DepartmentInfo>, HttpError> {
    info!(department_id, "Handling update_department request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(update_department(&mut persistence, department_id, req)?))
}

async fn handle_delete_department(
    AxumState(app_state): AxumState<AppState>,
    Path(department_id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    info!(department_id, "Handling delete_department request");
    let mut persistence = app_state.persistence.lock().await;
    delete_department(&mut persistence, department_id)?;
    drop(persistence);
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Programs
// ---------------------------------------------------------------------------

/// Handler for GET `/api/programs`, optionally scoped by `departmentId`.
async fn handle_list_programs(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ProgramListQuery>,
) -> Result<Json<Vec<ProgramInfo>>, HttpError> {
    debug!(department_id = ?query.department_id, "Handling list_programs request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(list_programs(&mut persistence, query.department_id)?))
}

async fn handle_get_program(
    AxumState(app_state): AxumState<AppState>,
    Path(program_id): Path<i64>,
) -> Result<Json<ProgramInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(get_program(&mut persistence, program_id)?))
}

async fn handle_create_program(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateProgramRequest>,
) -> Result<Created<ProgramInfo>, HttpError> {
    info!(
        department_id = req.department_id,
        code = %req.code,
        "Handling create_program request"
    );
    let mut persistence = app_state.persistence.lock().await;
    let program: ProgramInfo = create_program(&mut persistence, &req)?;
    drop(persistence);
    Ok((StatusCode::CREATED, Json(program)))
}

async fn handle_update_program(
    AxumState(app_state): AxumState<AppState>,
    Path(program_id): Path<i64>,
    Json(req): Json<UpdateProgramRequest>,
) -> Result<Json<ProgramInfo>, HttpError> {
    info!(program_id, "Handling update_program request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(update_program(&mut persistence, program_id, req)?))
}

async fn handle_delete_program(
    AxumState(app_state): AxumState<AppState>,
    Path(program_id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    info!(program_id, "Handling delete_program request");
    let mut persistence = app_state.persistence.lock().await;
    delete_program(&mut persistence, program_id)?;
    drop(persistence);
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Levels
// ---------------------------------------------------------------------------

async fn handle_list_levels(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<LevelInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(list_levels(&mut persistence)?))
}

async fn handle_create_level(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateLevelRequest>,
) -> Result<Created<LevelInfo>, HttpError> {
    info!(order = req.order, "Handling create_level request");
    let mut persistence = app_state.persistence.lock().await;
    let level: LevelInfo = create_level(&mut persistence, &req)?;
    drop(persistence);
    Ok((StatusCode::CREATED, Json(level)))
}

// ---------------------------------------------------------------------------
// Persons
// ---------------------------------------------------------------------------

/// Handler for GET `/api/persons`.
///
/// Supports `search`, `type`, `status`, `collegeId` and `departmentId`.
async fn handle_list_persons(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<PersonListQuery>,
) -> Result<Json<Vec<PersonInfo>>, HttpError> {
    debug!(?query, "Handling list_persons request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(list_persons(&mut persistence, &query)?))
}

async fn handle_get_person(
    AxumState(app_state): AxumState<AppState>,
    Path(person_id): Path<i64>,
) -> Result<Json<PersonInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(get_person(&mut persistence, person_id)?))
}

/// Handler for POST `/api/persons`.
///
/// Allocates a university ID when the request does not carry one.
async fn handle_create_person(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreatePersonRequest>,
) -> Result<Created<PersonInfo>, HttpError> {
    info!(person_type = %req.person_type, "Handling create_person request");
    let mut persistence = app_state.persistence.lock().await;
    let person: PersonInfo = create_person(&mut persistence, req)?;
    drop(persistence);

    info!(
        person_id = person.id,
        university_id = %person.university_id,
        "Created person"
    );
    Ok((StatusCode::CREATED, Json(person)))
}

/// Handler for POST `/api/persons/bulk`.
async fn handle_create_persons(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<Vec<CreatePersonRequest>>,
) -> Result<Created<Vec<PersonInfo>>, HttpError> {
    info!(count = req.len(), "Handling bulk create_persons request");
    let mut persistence = app_state.persistence.lock().await;
    let persons: Vec<PersonInfo> = create_persons(&mut persistence, req)?;
    drop(persistence);
    Ok((StatusCode::CREATED, Json(persons)))
}

async fn handle_update_person(
    AxumState(app_state): AxumState<AppState>,
    Path(person_id): Path<i64>,
    Json(req): Json<UpdatePersonRequest>,
) -> Result<Json<PersonInfo>, HttpError> {
    info!(person_id, "Handling update_person request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(update_person(&mut persistence, person_id, req)?))
}

async fn handle_delete_person(
    AxumState(app_state): AxumState<AppState>,
    Path(person_id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    info!(person_id, "Handling delete_person request");
    let mut persistence = app_state.persistence.lock().await;
    delete_person(&mut persistence, person_id)?;
    drop(persistence);
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for POST `/api/persons/{id}/validate`.
///
/// An unknown person yields a report, not a 404.
async fn handle_validate_person(
    AxumState(app_state): AxumState<AppState>,
    Path(person_id): Path<i64>,
) -> Result<Json<ValidationReport>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(validate_person(&mut persistence, person_id)?))
}

// ---------------------------------------------------------------------------
// Cards
// ---------------------------------------------------------------------------

/// Handler for GET `/api/cards`.
///
/// Supports `search`, `type` and `department`.
async fn handle_list_cards(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<CardListQuery>,
) -> Result<Json<Vec<CardInfo>>, HttpError> {
    debug!(?query, "Handling list_cards request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(list_cards(&mut persistence, &query)?))
}

async fn handle_get_card(
    AxumState(app_state): AxumState<AppState>,
    Path(card_id): Path<i64>,
) -> Result<Json<CardInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(get_card(&mut persistence, card_id)?))
}

async fn handle_create_card(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateCardRequest>,
) -> Result<Created<CardInfo>, HttpError> {
    info!(id_number = %req.id_number, "Handling create_card request");
    let mut persistence = app_state.persistence.lock().await;
    let card: CardInfo = create_card(&mut persistence, req)?;
    drop(persistence);
    Ok((StatusCode::CREATED, Json(card)))
}

async fn handle_create_cards(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<Vec<CreateCardRequest>>,
) -> Result<Created<Vec<CardInfo>>, HttpError> {
    info!(count = req.len(), "Handling bulk create_cards request");
    let mut persistence = app_state.persistence.lock().await;
    let cards: Vec<CardInfo> = create_cards(&mut persistence, req)?;
    drop(persistence);
    Ok((StatusCode::CREATED, Json(cards)))
}

async fn handle_update_card(
    AxumState(app_state): AxumState<AppState>,
    Path(card_id): Path<i64>,
    Json(req): Json<UpdateCardRequest>,
) -> Result<Json<CardInfo>, HttpError> {
    info!(card_id, "Handling update_card request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(update_card(&mut persistence, card_id, req)?))
}

async fn handle_delete_card(
    AxumState(app_state): AxumState<AppState>,
    Path(card_id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    info!(card_id, "Handling delete_card request");
    let mut persistence = app_state.persistence.lock().await;
    delete_card(&mut persistence, card_id)?;
    drop(persistence);
    Ok(StatusCode::NO_CONTENT)
}

async fn handle_validate_card(
    AxumState(app_state): AxumState<AppState>,
    Path(card_id): Path<i64>,
) -> Result<Json<ValidationReport>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(validate_card(&mut persistence, card_id)?))
}

/// Handler for POST `/api/cards/{id}/print`.
async fn handle_record_card_print(
    AxumState(app_state): AxumState<AppState>,
    Path(card_id): Path<i64>,
) -> Result<Json<CardInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(record_card_print(&mut persistence, card_id)?))
}

/// Handler for POST `/api/cards/import/preview`.
///
/// Validates every row without writing anything.
async fn handle_preview_card_csv(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CsvImportRequest>,
) -> Result<Json<CsvPreviewResponse>, HttpError> {
    info!(bytes = req.csv_content.len(), "Handling card CSV preview");
    let mut persistence = app_state.persistence.lock().await;
    let preview: CsvPreviewResponse = preview_card_csv(&mut persistence, &req)?;
    drop(persistence);

    info!(
        total = preview.total_rows,
        valid = preview.valid_count,
        invalid = preview.invalid_count,
        "Previewed card CSV"
    );
    Ok(Json(preview))
}

/// Handler for POST `/api/cards/import`.
async fn handle_import_card_csv(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CsvImportRequest>,
) -> Result<Created<ImportCardsResponse>, HttpError> {
    info!(bytes = req.csv_content.len(), "Handling card CSV import");
    let mut persistence = app_state.persistence.lock().await;
    let response: ImportCardsResponse = import_card_csv(&mut persistence, &req)?;
    drop(persistence);
    Ok((StatusCode::CREATED, Json(response)))
}

// ---------------------------------------------------------------------------
// Statistics and identifiers
// ---------------------------------------------------------------------------

async fn handle_get_dashboard_stats(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<DashboardStatsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(get_dashboard_stats(&mut persistence)?))
}

/// Handler for POST `/api/generate-id`.
///
/// Every successful call consumes one number of its sequence.
async fn handle_generate_id(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<GenerateIdRequest>,
) -> Result<Json<GenerateIdResponse>, HttpError> {
    debug!(
        person_type = %req.person_type,
        college_code = ?req.college_code,
        "Handling generate_id request"
    );
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(generate_university_id(&mut persistence, &req)?))
}

#[allow(clippy::unused_async)]
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: String::from("ok"),
    })
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route(
            "/api/colleges",
            get(handle_list_colleges).post(handle_create_college),
        )
        .route(
            "/api/colleges/{id}",
            get(handle_get_college)
                .put(handle_update_college)
                .delete(handle_delete_college),
        )
        .route(
            "/api/departments",
            get(handle_list_departments).post(handle_create_department),
        )
        .route(
            "/api/departments/{id}",
            get(handle_get_department)
                .put(handle_update_department)
                .delete(handle_delete_department),
        )
        .route(
            "/api/programs",
            get(handle_list_programs).post(handle_create_program),
        )
        .route(
            "/api/programs/{id}",
            get(handle_get_program)
                .put(handle_update_program)
                .delete(handle_delete_program),
        )
        .route(
            "/api/levels",
            get(handle_list_levels).post(handle_create_level),
        )
        .route(
            "/api/persons",
            get(handle_list_persons).post(handle_create_person),
        )
        .route("/api/persons/bulk", post(handle_create_persons))
        .route(
            "/api/persons/{id}",
            get(handle_get_person)
                .put(handle_update_person)
                .delete(handle_delete_person),
        )
        .route("/api/persons/{id}/validate", post(handle_validate_person))
        .route(
            "/api/cards",
            get(handle_list_cards).post(handle_create_card),
        )
        .route("/api/cards/bulk", post(handle_create_cards))
        .route("/api/cards/import", post(handle_import_card_csv))
        .route("/api/cards/import/preview", post(handle_preview_card_csv))
        .route(
            "/api/cards/{id}",
            get(handle_get_card)
                .put(handle_update_card)
                .delete(handle_delete_card),
        )
        .route("/api/cards/{id}/validate", post(handle_validate_card))
        .route("/api/cards/{id}/print", post(handle_record_card_print))
        .route("/api/stats/dashboard", get(handle_get_dashboard_stats))
        .route("/api/generate-id", post(handle_generate_id))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Campus ID Server");

    let mut persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    if args.no_seed {
        info!("Sample data seeding disabled");
    } else {
        let summary: SeedSummary = seed_sample_data(&mut persistence)?;
        info!(
            cards = summary.cards,
            colleges = summary.colleges,
            departments = summary.departments,
            levels = summary.levels,
            "Seeding complete"
        );
    }

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };

    let app: Router = build_router(app_state);

    let addr: SocketAddr = SocketAddr::new(args.bind, args.port);
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests;
