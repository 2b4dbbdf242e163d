// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode as HttpStatusCode},
};
use serde_json::{Value, json};
use std::collections::HashSet;
use tower::ServiceExt;

/// Helper to create test app state with in-memory persistence.
fn create_test_app_state() -> AppState {
    let persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    }
}

fn create_test_app() -> Router {
    build_router(create_test_app_state())
}

/// Sends one request and returns the status and the parsed JSON body.
///
/// Empty bodies come back as `Value::Null`.
async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (HttpStatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request: Request<Body> = match body {
        Some(json_body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&json_body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status: HttpStatusCode = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: Value = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };
    (status, value)
}

async fn create_college_via_api(app: &Router, code: &str) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/api/colleges",
        Some(json!({ "nameEn": format!("Faculty of {code}"), "nameAr": "كلية", "code": code })),
    )
    .await;
    assert_eq!(status, HttpStatusCode::CREATED);
    body["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_health() {
    let app: Router = create_test_app();
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_college_lifecycle() {
    let app: Router = create_test_app();
    let college_id: i64 = create_college_via_api(&app, "ENG").await;

    let (status, body) = send(&app, "GET", &format!("/api/colleges/{college_id}"), None).await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["code"], "ENG");
    assert_eq!(body["nameEn"], "Faculty of ENG");

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/colleges/{college_id}"),
        Some(json!({ "nameEn": "College of Engineering" })),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["nameEn"], "College of Engineering");

    let (status, body) = send(&app, "DELETE", &format!("/api/colleges/{college_id}"), None).await;
    assert_eq!(status, HttpStatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, body) = send(&app, "GET", &format!("/api/colleges/{college_id}"), None).await;
    assert_eq!(status, HttpStatusCode::NOT_FOUND);
    assert_eq!(body["error"], true);
    assert_eq!(body["message"], "College not found");
}

#[tokio::test]
async fn test_duplicate_college_code_is_bad_request() {
    let app: Router = create_test_app();
    create_college_via_api(&app, "ENG").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/colleges",
        Some(json!({ "nameEn": "Other", "nameAr": "أخرى", "code": "ENG" })),
    )
    .await;
    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    assert_eq!(body["error"], true);
    assert_eq!(body["field"], "code");
    assert_eq!(body["message"], "A college with this code already exists");
}

#[tokio::test]
async fn test_delete_referenced_college_is_conflict() {
    let app: Router = create_test_app();
    let college_id: i64 = create_college_via_api(&app, "ENG").await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/departments",
        Some(json!({
            "collegeId": college_id,
            "nameEn": "Mechanical Engineering",
            "nameAr": "الهندسة الميكانيكية",
            "code": "ME"
        })),
    )
    .await;
    assert_eq!(status, HttpStatusCode::CREATED);

    let (status, body) = send(&app, "DELETE", &format!("/api/colleges/{college_id}"), None).await;
    assert_eq!(status, HttpStatusCode::CONFLICT);
    assert_eq!(body["error"], true);
    assert!(body.get("field").is_none());
}

#[tokio::test]
async fn test_list_departments_by_college() {
    let app: Router = create_test_app();
    let eng: i64 = create_college_via_api(&app, "ENG").await;
    let cs: i64 = create_college_via_api(&app, "CS").await;

    for (college_id, code) in [(eng, "ME"), (eng, "EE"), (cs, "SE")] {
        send(
            &app,
            "POST",
            "/api/departments",
            Some(json!({ "collegeId": college_id, "nameEn": code, "nameAr": "قسم", "code": code })),
        )
        .await;
    }

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/departments?collegeId={eng}"),
        None,
    ).await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (_, all) = send(&app, "GET", "/api/departments", None).await;
    assert_eq!(all.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_program_defaults_and_levels() {
    let app: Router = create_test_app();
    let college_id: i64 = create_college_via_api(&app, "CS").await;
    let (_, department) = send(
        &app,
        "POST",
        "/api/departments",
        Some(json!({ "collegeId": college_id, "nameEn": "SE", "nameAr": "قسم", "code": "SE" })),
    )
    .await;
    let department_id: i64 = department["id"].as_i64().unwrap();

    let (status, program) = send(
        &app,
        "POST",
        "/api/programs",
        Some(json!({
            "departmentId": department_id,
            "nameEn": "B.Sc. Software Engineering",
            "nameAr": "بكالوريوس",
            "code": "BSE"
        })),
    )
    .await;
    assert_eq!(status, HttpStatusCode::CREATED);
    assert_eq!(program["durationYears"], 4);

    let (_, programs) = send(
        &app,
        "GET",
        &format!("/api/programs?departmentId={department_id}"),
        None,
    )
    .await;
    assert_eq!(programs.as_array().unwrap().len(), 1);

    let (status, _) = send(
        &app,
        "POST",
        "/api/levels",
        Some(json!({ "nameEn": "Level 1 - Freshman", "nameAr": "المستوى الأول", "order": 1 })),
    )
    .await;
    assert_eq!(status, HttpStatusCode::CREATED);
    let (_, levels) = send(&app, "GET", "/api/levels", None).await;
    assert_eq!(levels[0]["order"], 1);
}

#[tokio::test]
async fn test_create_person_allocates_university_id() {
    let app: Router = create_test_app();
    let college_id: i64 = create_college_via_api(&app, "ENG").await;

    let (status, person) = send(
        &app,
        "POST",
        "/api/persons",
        Some(json!({
            "type": "student",
            "fullNameEn": "Alex Johnson",
            "collegeId": college_id
        })),
    )
    .await;
    assert_eq!(status, HttpStatusCode::CREATED);
    let university_id: &str = person["universityId"].as_str().unwrap();
    assert!(university_id.starts_with("ENG-"));
    assert!(university_id.ends_with("-00001"));
    assert_eq!(person["status"], "active");

    let person_id: i64 = person["id"].as_i64().unwrap();
    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/api/persons/{person_id}"),
        Some(json!({ "phone": "+1 555 0100", "status": "suspended" })),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(updated["phone"], "+1 555 0100");
    assert_eq!(updated["status"], "suspended");

    let (status, cleared) = send(
        &app,
        "PUT",
        &format!("/api/persons/{person_id}"),
        Some(json!({ "phone": null })),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(cleared["phone"], Value::Null);
}

#[tokio::test]
async fn test_invalid_person_type_names_the_field() {
    let app: Router = create_test_app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/persons",
        Some(json!({ "type": "alumni", "fullNameEn": "Someone" })),
    )
    .await;
    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "type");
}

#[tokio::test]
async fn test_bulk_persons_and_search() {
    let app: Router = create_test_app();
    let (status, persons) = send(
        &app,
        "POST",
        "/api/persons/bulk",
        Some(json!([
            { "type": "student", "fullNameEn": "Alex Johnson" },
            { "type": "staff", "fullNameEn": "Robert Smith", "universityId": "EMP-CUSTOM-1" }
        ])),
    )
    .await;
    assert_eq!(status, HttpStatusCode::CREATED);
    assert_eq!(persons.as_array().unwrap().len(), 2);
    assert_eq!(persons[1]["universityId"], "EMP-CUSTOM-1");

    let (_, staff) = send(&app, "GET", "/api/persons?type=staff", None).await;
    assert_eq!(staff.as_array().unwrap().len(), 1);

    let (_, found) = send(&app, "GET", "/api/persons?search=alex", None).await;
    assert_eq!(found[0]["fullNameEn"], "Alex Johnson");
}

#[tokio::test]
async fn test_validate_unknown_person_is_ok() {
    let app: Router = create_test_app();
    let (status, report) = send(&app, "POST", "/api/persons/42/validate", None).await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(report["isComplete"], false);
    assert_eq!(report["errors"], json!(["Person not found"]));
    assert_eq!(report["warnings"], json!([]));
}

#[tokio::test]
async fn test_card_lifecycle() {
    let app: Router = create_test_app();
    let (status, card) = send(
        &app,
        "POST",
        "/api/cards",
        Some(json!({
            "name": "Alex Johnson",
            "idNumber": "STU2024001",
            "type": "student",
            "department": "Computer Science",
            "expiryDate": "2000-01-01"
        })),
    )
    .await;
    assert_eq!(status, HttpStatusCode::CREATED);
    let card_id: i64 = card["id"].as_i64().unwrap();

    let (_, report) = send(
        &app,
        "POST",
        &format!("/api/cards/{card_id}/validate"),
        None,
    ).await;
    assert_eq!(report["isComplete"], false);
    assert_eq!(report["hasValidExpiry"], false);
    assert_eq!(
        report["errors"],
        json!(["Photo is missing", "Card has expired"])
    );

    let (status, printed) = send(&app, "POST", &format!("/api/cards/{card_id}/print"), None).await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(printed["printCount"], 1);

    let (status, _) = send(&app, "DELETE", &format!("/api/cards/{card_id}"), None).await;
    assert_eq!(status, HttpStatusCode::NO_CONTENT);
    let (status, _) = send(&app, "DELETE", &format!("/api/cards/{card_id}"), None).await;
    assert_eq!(status, HttpStatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_bulk_card_duplicate_has_no_field() {
    let app: Router = create_test_app();
    let card = json!({
        "name": "Alex Johnson",
        "idNumber": "DUP-1",
        "type": "student",
        "department": "Computer Science"
    });

    let (status, body) = send(&app, "POST", "/api/cards/bulk", Some(json!([card, card]))).await;
    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "One or more cards have duplicate ID Numbers"
    );
    assert!(body.get("field").is_none());

    let (_, cards) = send(&app, "GET", "/api/cards", None).await;
    assert!(cards.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_csv_preview_then_import() {
    let app: Router = create_test_app();
    let csv_content: &str = "name,id_number,type,department\n\
                             Alex Johnson,STU2024001,student,Computer Science\n\
                             Emily Brown,STAFF002,staff,Administration\n";

    let (status, preview) = send(
        &app,
        "POST",
        "/api/cards/import/preview",
        Some(json!({ "csvContent": csv_content })),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(preview["validCount"], 2);
    assert_eq!(preview["rows"][1]["status"], "valid");
    assert_eq!(preview["rows"][1]["type"], "staff");

    let (status, imported) = send(
        &app,
        "POST",
        "/api/cards/import",
        Some(json!({ "csvContent": csv_content })),
    )
    .await;
    assert_eq!(status, HttpStatusCode::CREATED);
    assert_eq!(imported["importedCount"], 2);

    let (status, again) = send(
        &app,
        "POST",
        "/api/cards/import",
        Some(json!({ "csvContent": csv_content })),
    )
    .await;
    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    assert_eq!(again["field"], "csv");
}

#[tokio::test]
async fn test_dashboard_stats_after_seeding() {
    let app_state: AppState = create_test_app_state();
    {
        let mut persistence = app_state.persistence.lock().await;
        seed_sample_data(&mut persistence).unwrap();
    }
    let app: Router = build_router(app_state);

    let (status, stats) = send(&app, "GET", "/api/stats/dashboard", None).await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(stats["totalCards"], 4);
    assert_eq!(stats["activeCards"], 4);
    assert_eq!(stats["totalColleges"], 3);
    assert_eq!(stats["totalDepartments"], 4);
    assert_eq!(stats["byCollege"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_generate_id_prefixes() {
    let app: Router = create_test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/generate-id",
        Some(json!({ "type": "staff", "collegeCode": "ENG" })),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    assert!(body["universityId"].as_str().unwrap().starts_with("EMP-"));

    let (_, body) = send(
        &app,
        "POST",
        "/api/generate-id",
        Some(json!({ "type": "visitor" })),
    ).await;
    assert!(body["universityId"].as_str().unwrap().starts_with("VIS-"));

    let (status, body) = send(
        &app,
        "POST",
        "/api/generate-id",
        Some(json!({ "type": "robot" })),
    ).await;
    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "type");
}

#[tokio::test]
async fn test_concurrent_generate_id_yields_distinct_numbers() {
    const REQUESTS: u64 = 20;
    let app: Router = create_test_app();

    let responses: Vec<(HttpStatusCode, Value)> = futures::future::join_all((0..REQUESTS).map(|_| {
        send(
            &app,
            "POST",
            "/api/generate-id",
            Some(json!({ "type": "student", "collegeCode": "ENG" })),
        )
    }))
    .await;

    let numbers: HashSet<u64> = responses
        .iter()
        .map(|(status, body)| {
            assert_eq!(*status, HttpStatusCode::OK);
            let id: &str = body["universityId"].as_str().unwrap();
            assert!(id.starts_with("ENG-"));
            id.rsplit('-').next().unwrap().parse::<u64>().unwrap()
        })
        .collect();

    let expected: HashSet<u64> = (1..=REQUESTS).collect();
    assert_eq!(numbers, expected);
}
