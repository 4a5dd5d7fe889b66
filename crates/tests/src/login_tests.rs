use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common::{get, post_form, test_app, AGENT_EMAIL, PASSWORD, REPORTER_EMAIL};

#[tokio::test]
async fn agent_login_redirects_to_lead() {
    let app = test_app();

    let resp = post_form(
        &app,
        "/login",
        &[("username", AGENT_EMAIL), ("password", PASSWORD)],
        None,
    )
    .await;

    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/lead"));
    let cookie = resp.set_cookie().expect("session cookie");
    assert!(cookie.starts_with("dashboard_session="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
}

#[tokio::test]
async fn public_login_redirects_to_dashboard() {
    let app = test_app();

    let resp = post_form(
        &app,
        "/login",
        &[("username", REPORTER_EMAIL), ("password", PASSWORD)],
        None,
    )
    .await;

    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/dashboard"));
    assert!(resp.set_cookie().is_some());
}

#[tokio::test]
async fn email_is_case_insensitive() {
    let app = test_app();

    let resp = post_form(
        &app,
        "/login",
        &[("username", "KIM.Agent@FindMe.test"), ("password", PASSWORD)],
        None,
    )
    .await;

    assert_eq!(resp.location(), Some("/lead"));
}

#[tokio::test]
async fn wrong_password_shows_error_without_cookie() {
    let app = test_app();

    let resp = post_form(
        &app,
        "/login",
        &[("username", AGENT_EMAIL), ("password", "not-the-password")],
        None,
    )
    .await;

    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    assert_eq!(resp.location(), None);
    assert!(resp.set_cookie().is_none());
    assert!(resp.body.contains("Invalid login credentials"));
    // The email is kept in the form.
    assert!(resp.body.contains(AGENT_EMAIL));
}

#[tokio::test]
async fn unknown_account_is_rejected_the_same_way() {
    let app = test_app();

    let resp = post_form(
        &app,
        "/login",
        &[("username", "nobody@findme.test"), ("password", PASSWORD)],
        None,
    )
    .await;

    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    assert!(resp.body.contains("Invalid login credentials"));
}

#[tokio::test]
async fn empty_fields_are_rejected() {
    let app = test_app();

    let resp = post_form(&app, "/login", &[("username", ""), ("password", "")], None).await;

    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    assert!(resp.body.contains("Email and password are required"));
    assert!(resp.set_cookie().is_none());
}

#[tokio::test]
async fn issued_cookie_opens_the_dashboard() {
    let app = test_app();

    let login = post_form(
        &app,
        "/login",
        &[("username", REPORTER_EMAIL), ("password", PASSWORD)],
        None,
    )
    .await;
    let cookie = login
        .set_cookie()
        .and_then(|c| c.split(';').next())
        .expect("cookie pair")
        .to_string();

    let resp = get(&app, "/dashboard", Some(&cookie)).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Welcome, amina"));
}

#[tokio::test]
async fn login_page_renders() {
    let app = test_app();
    let resp = get(&app, "/login", None).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("name=\"username\""));
    assert!(resp.body.contains("name=\"password\""));
}
