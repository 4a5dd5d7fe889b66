use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{get, patch_json, seed_case, test_app};

#[tokio::test]
async fn health_reports_ok() {
    let app = test_app();

    let resp = get(&app, "/health", None).await;

    assert_eq!(resp.status, StatusCode::OK);
    let body = resp.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "connected");
}

#[tokio::test]
async fn health_notes_an_unreachable_store() {
    let app = test_app();
    app.backend.set_unavailable(true);

    let resp = get(&app, "/health", None).await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json()["db"], "unreachable");
}

#[tokio::test]
async fn api_reference_is_served() {
    let app = test_app();
    let resp = get(&app, "/docs", None).await;
    assert_eq!(resp.status, StatusCode::OK);
}

#[tokio::test]
async fn missing_list_is_public_json() {
    let app = test_app();
    let case = seed_case(&app, app.reporter.id, "Lucy", "Wambui").await;

    let resp = get(&app, "/api/cases/missing", None).await;

    assert_eq!(resp.status, StatusCode::OK);
    let rows = resp.json();
    assert_eq!(rows.as_array().map(Vec::len), Some(1));
    assert_eq!(rows[0]["case_number"], case.case_number.as_str());
    assert_eq!(rows[0]["status"], "pending");
}

#[tokio::test]
async fn list_failure_is_a_server_error() {
    let app = test_app();
    app.backend.set_unavailable(true);

    let resp = get(&app, "/api/cases/unidentified", None).await;

    assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn single_case_lookup() {
    let app = test_app();
    let case = seed_case(&app, app.reporter.id, "Lucy", "Wambui").await;

    let resp = get(&app, &format!("/api/cases/{}", case.case_number), None).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json()["legal_first_name"], "Lucy");

    let resp = get(&app, "/api/cases/MSP-1999-99999", None).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn status_patch_requires_a_session() {
    let app = test_app();
    let case = seed_case(&app, app.reporter.id, "Lucy", "Wambui").await;

    let resp = patch_json(
        &app,
        &format!("/api/cases/{}/status", case.case_number),
        json!({ "status": "closed" }),
        None,
    )
    .await;

    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn status_patch_requires_an_agent() {
    let app = test_app();
    let case = seed_case(&app, app.reporter.id, "Lucy", "Wambui").await;

    let resp = patch_json(
        &app,
        &format!("/api/cases/{}/status", case.case_number),
        json!({ "status": "closed" }),
        Some(&app.reporter_cookie()),
    )
    .await;

    assert_eq!(resp.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn agent_patches_status() {
    let app = test_app();
    let case = seed_case(&app, app.reporter.id, "Lucy", "Wambui").await;
    let uri = format!("/api/cases/{}/status", case.case_number);

    let resp = patch_json(&app, &uri, json!({ "status": "active" }), Some(&app.agent_cookie())).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json()["status"], "active");

    let resp = patch_json(&app, &uri, json!({ "status": "found" }), Some(&app.agent_cookie())).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}
