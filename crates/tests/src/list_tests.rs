use axum::http::StatusCode;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use shared_types::{UnclaimedPerson, UnidentifiedPerson};

use crate::common::{get, post_form, seed_case, test_app};

fn stat(value: usize, label: &str) -> String {
    format!("<span class=\"stat-value\">{value}</span><span class=\"stat-label\">{label}</span>")
}

#[tokio::test]
async fn empty_lists_show_their_empty_messages() {
    let app = test_app();

    let resp = get(&app, "/", None).await;
    assert!(resp.body.contains("No missing persons reported."));

    let resp = get(&app, "/unidentified", None).await;
    assert!(resp.body.contains("No unidentified persons listed."));

    let resp = get(&app, "/unclaimed", None).await;
    assert!(resp.body.contains("No unclaimed persons listed."));
}

#[tokio::test]
async fn store_failure_still_renders_empty_tables() {
    let app = test_app();
    app.backend.set_unavailable(true);
    let cookie = app.reporter_cookie();

    for (path, empty) in [
        ("/", "No missing persons reported."),
        ("/unidentified", "No unidentified persons listed."),
        ("/unclaimed", "No unclaimed persons listed."),
        ("/dashboard/missing", "No missing persons reported."),
    ] {
        let resp = get(&app, path, Some(&cookie)).await;
        assert_eq!(resp.status, StatusCode::OK, "{path}");
        assert!(resp.body.contains(empty), "{path}");
    }
}

#[tokio::test]
async fn home_lists_every_case_with_a_link_to_its_page() {
    let app = test_app();
    let first = seed_case(&app, app.reporter.id, "Joseph", "Mutua").await;
    let second = seed_case(&app, app.agent.id, "Mercy", "Achieng").await;

    let resp = get(&app, "/", None).await;

    assert!(resp.body.contains("Mutua"));
    assert!(resp.body.contains("Achieng"));
    assert!(resp.body.contains(&format!("data-href=\"/cases/{}\"", first.case_number)));
    assert!(resp.body.contains(&format!("data-href=\"/cases/{}\"", second.case_number)));
    // Newest first.
    let newer = resp.body.find(&second.case_number).unwrap();
    let older = resp.body.find(&first.case_number).unwrap();
    assert!(newer < older);
    assert!(resp.body.contains("20/05/2025"));
    assert!(resp.body.contains("data-value=\"2025-05-20\""));
}

#[tokio::test]
async fn tables_carry_the_client_side_hooks() {
    let app = test_app();
    seed_case(&app, app.reporter.id, "Joseph", "Mutua").await;

    let resp = get(&app, "/", None).await;

    assert!(resp.body.contains("data-filter-for=\"missing-persons\""));
    assert!(resp.body.contains("data-sort=\"date\""));
    assert!(resp.body.contains("data-page-size=\"10\""));
    assert!(resp.body.contains("/static/table.js"));
}

#[tokio::test]
async fn seeded_unidentified_and_unclaimed_rows_are_listed() {
    let app = test_app();
    app.backend.seed_unidentified(UnidentifiedPerson {
        tracking_number: "UIP-2025-00007".into(),
        description: Some("Adult male, about 30, scar on left hand".into()),
        found_location: Some("Naivasha".into()),
        date_found: NaiveDate::from_ymd_opt(2025, 3, 14),
        gender: Some("Male".into()),
        current_status: Some("Hospitalised".into()),
    });
    app.backend.seed_unclaimed(UnclaimedPerson {
        tracking_number: "UCP-2025-00003".into(),
        date_of_death: NaiveDate::from_ymd_opt(2025, 2, 1),
        age: None,
        legal_last_name: Some("Odhiambo".into()),
        legal_first_name: None,
        gender: Some("Male".into()),
        current_status: None,
        found_location: Some("Kisumu".into()),
    });

    let resp = get(&app, "/unidentified", None).await;
    assert!(resp.body.contains("UIP-2025-00007"));
    assert!(resp.body.contains("14/03/2025"));
    assert!(resp.body.contains("Hospitalised"));

    let resp = get(&app, "/unclaimed", None).await;
    assert!(resp.body.contains("UCP-2025-00003"));
    assert!(resp.body.contains("01/02/2025"));
    assert!(resp.body.contains("Odhiambo"));
    assert!(resp.body.contains("N/A"));

    let resp = get(&app, "/dashboard/unclaimed", Some(&app.reporter_cookie())).await;
    assert!(resp.body.contains("UCP-2025-00003"));
}

#[tokio::test]
async fn reporter_dashboard_counts_only_their_own_reports() {
    let app = test_app();
    let mine_open = seed_case(&app, app.reporter.id, "Joseph", "Mutua").await;
    let mine_closed = seed_case(&app, app.reporter.id, "Ann", "Wairimu").await;
    seed_case(&app, app.reporter.id, "Peter", "Kamau").await;
    let someone_else = seed_case(&app, app.agent.id, "Mercy", "Achieng").await;
    let agent = app.agent_cookie();

    post_form(&app, &format!("/lead/cases/{}/take", mine_open.case_number), &[], Some(&agent)).await;
    post_form(
        &app,
        &format!("/lead/cases/{}/status", mine_closed.case_number),
        &[("status", "closed")],
        Some(&agent),
    )
    .await;

    let resp = get(&app, "/dashboard", Some(&app.reporter_cookie())).await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains(&stat(3, "Total Reports")));
    assert!(resp.body.contains(&stat(1, "Closed Cases")));
    assert!(resp.body.contains(&stat(1, "Active Cases")));
    assert!(!resp.body.contains(&someone_else.case_number));
}

#[tokio::test]
async fn agent_dashboard_counts_assigned_cases() {
    let app = test_app();
    let agent = app.agent_cookie();
    let a = seed_case(&app, app.reporter.id, "Joseph", "Mutua").await;
    let b = seed_case(&app, app.reporter.id, "Ann", "Wairimu").await;
    seed_case(&app, app.reporter.id, "Peter", "Kamau").await;

    for case in [&a, &b] {
        post_form(&app, &format!("/lead/cases/{}/take", case.case_number), &[], Some(&agent)).await;
    }
    post_form(
        &app,
        &format!("/lead/cases/{}/status", b.case_number),
        &[("status", "closed")],
        Some(&agent),
    )
    .await;

    let resp = get(&app, "/lead", Some(&agent)).await;

    assert!(resp.body.contains(&stat(2, "Assigned Cases")));
    assert!(resp.body.contains(&stat(1, "Under Investigation")));
    assert!(resp.body.contains(&stat(1, "Closed Cases")));
}

#[tokio::test]
async fn navbar_follows_the_visitor_role() {
    let app = test_app();

    let public = get(&app, "/unidentified", None).await;
    assert!(public.body.contains("href=\"/login\""));

    let reporter = get(&app, "/unidentified", Some(&app.reporter_cookie())).await;
    assert!(reporter.body.contains("href=\"/dashboard/new-report\""));
    assert!(!reporter.body.contains("href=\"/lead/all-cases\""));

    let agent = get(&app, "/unidentified", Some(&app.agent_cookie())).await;
    assert!(agent.body.contains("href=\"/lead/all-cases\""));
}
