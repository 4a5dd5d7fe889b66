use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use server::store::CaseStore;

use crate::common::{get, post_form, seed_case, test_app};

#[tokio::test]
async fn agent_closes_a_case_and_returns_to_the_dashboard() {
    let app = test_app();
    let case = seed_case(&app, app.reporter.id, "Brian", "Kiprop").await;

    let resp = post_form(
        &app,
        &format!("/lead/cases/{}/status", case.case_number),
        &[("status", "closed"), ("return_to", "/lead")],
        Some(&app.agent_cookie()),
    )
    .await;

    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/lead"));

    let stored = app.backend.find_missing(&case.case_number).await.unwrap().unwrap();
    assert_eq!(stored.status, "closed");
}

#[tokio::test]
async fn any_status_may_replace_any_other() {
    let app = test_app();
    let case = seed_case(&app, app.reporter.id, "Brian", "Kiprop").await;
    let uri = format!("/lead/cases/{}/status", case.case_number);
    let cookie = app.agent_cookie();

    for status in ["closed", "pending", "active", "closed", "active"] {
        post_form(&app, &uri, &[("status", status)], Some(&cookie)).await;
        let stored = app.backend.find_missing(&case.case_number).await.unwrap().unwrap();
        assert_eq!(stored.status, status);
    }
}

#[tokio::test]
async fn missing_or_foreign_return_path_falls_back_to_all_cases() {
    let app = test_app();
    let case = seed_case(&app, app.reporter.id, "Brian", "Kiprop").await;
    let uri = format!("/lead/cases/{}/status", case.case_number);
    let cookie = app.agent_cookie();

    let resp = post_form(&app, &uri, &[("status", "active")], Some(&cookie)).await;
    assert_eq!(resp.location(), Some("/lead/all-cases"));

    let resp = post_form(
        &app,
        &uri,
        &[("status", "active"), ("return_to", "https://evil.example/")],
        Some(&cookie),
    )
    .await;
    assert_eq!(resp.location(), Some("/lead/all-cases"));

    let back_to_case = format!("/cases/{}", case.case_number);
    let resp = post_form(
        &app,
        &uri,
        &[("status", "active"), ("return_to", back_to_case.as_str())],
        Some(&cookie),
    )
    .await;
    assert_eq!(resp.location(), Some(back_to_case.as_str()));
}

#[tokio::test]
async fn return_path_with_a_line_break_redirects_to_all_cases() {
    let app = test_app();
    let case = seed_case(&app, app.reporter.id, "Brian", "Kiprop").await;

    let resp = post_form(
        &app,
        &format!("/lead/cases/{}/status", case.case_number),
        &[("status", "closed"), ("return_to", "/lead/x\ny")],
        Some(&app.agent_cookie()),
    )
    .await;

    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/lead/all-cases"));
    let stored = app.backend.find_missing(&case.case_number).await.unwrap().unwrap();
    assert_eq!(stored.status, "closed");
}

#[tokio::test]
async fn unknown_status_is_rejected_and_nothing_changes() {
    let app = test_app();
    let case = seed_case(&app, app.reporter.id, "Brian", "Kiprop").await;

    let resp = post_form(
        &app,
        &format!("/lead/cases/{}/status", case.case_number),
        &[("status", "archived")],
        Some(&app.agent_cookie()),
    )
    .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert!(resp.body.contains("Invalid status: archived"));
    let stored = app.backend.find_missing(&case.case_number).await.unwrap().unwrap();
    assert_eq!(stored.status, "pending");
}

#[tokio::test]
async fn unknown_case_is_not_found() {
    let app = test_app();

    let resp = post_form(
        &app,
        "/lead/cases/MSP-1999-99999/status",
        &[("status", "closed")],
        Some(&app.agent_cookie()),
    )
    .await;

    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn reporter_cannot_change_status() {
    let app = test_app();
    let case = seed_case(&app, app.reporter.id, "Brian", "Kiprop").await;

    let resp = post_form(
        &app,
        &format!("/lead/cases/{}/status", case.case_number),
        &[("status", "closed")],
        Some(&app.reporter_cookie()),
    )
    .await;

    assert_eq!(resp.location(), Some("/lead/unauthorized"));
    let stored = app.backend.find_missing(&case.case_number).await.unwrap().unwrap();
    assert_eq!(stored.status, "pending");
}

#[tokio::test]
async fn agent_case_page_offers_the_status_control() {
    let app = test_app();
    let case = seed_case(&app, app.reporter.id, "Brian", "Kiprop").await;
    let path = format!("/cases/{}", case.case_number);

    let agent_view = get(&app, &path, Some(&app.agent_cookie())).await;
    assert!(agent_view.body.contains(&format!("/lead/cases/{}/status", case.case_number)));

    let public_view = get(&app, &path, None).await;
    assert!(!public_view.body.contains("/status\""));
}
