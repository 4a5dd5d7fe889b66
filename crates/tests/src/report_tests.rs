use axum::http::{header, StatusCode};
use pretty_assertions::assert_eq;
use server::store::CaseStore;
use shared_types::ListScope;

use crate::common::{
    get, post_multipart, report_fields, test_app, FilePart, PNG_BYTES,
};

fn png<'a>() -> FilePart<'a> {
    FilePart {
        field: "photo",
        file_name: "wanjiru.png",
        content_type: "image/png",
        bytes: PNG_BYTES,
    }
}

#[tokio::test]
async fn report_with_photo_creates_one_record() {
    let app = test_app();
    let cookie = app.reporter_cookie();

    let resp = post_multipart(
        &app,
        "/dashboard/new-report",
        &report_fields(),
        Some(png()),
        Some(&cookie),
    )
    .await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Report submitted successfully!"));
    assert_eq!(app.backend.missing_count(), 1);

    let keys = app.objects.keys();
    assert_eq!(keys.len(), 1);
    assert!(keys[0].ends_with(".png"));

    let listed = app
        .backend
        .list_missing(ListScope::Reporter(app.reporter.id))
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    let case = app
        .backend
        .find_missing(&listed[0].case_number)
        .await
        .unwrap()
        .expect("stored case");

    assert!(resp.body.contains(&case.case_number));
    assert_eq!(case.legal_first_name, "Wanjiru");
    assert_eq!(case.legal_last_name, "Mwangi");
    assert_eq!(case.date_of_birth.to_string(), "2008-02-10");
    assert_eq!(case.gender, "Female");
    assert_eq!(case.town_location, "Thika");
    assert_eq!(case.date_of_last_contact.to_string(), "2025-01-05");
    assert_eq!(case.last_seen_wearing.as_deref(), Some("Green school uniform"));
    assert_eq!(case.reporter_name.as_deref(), Some("Grace Mwangi"));
    assert_eq!(case.physical_description, None);
    assert_eq!(case.status, "pending");
    assert_eq!(case.reporter_id, Some(app.reporter.id));
    assert_eq!(case.officer_id, None);
    assert_eq!(case.photo_url, Some(format!("/photos/{}", keys[0])));
}

#[tokio::test]
async fn stored_photo_is_served_back() {
    let app = test_app();
    let cookie = app.reporter_cookie();
    post_multipart(&app, "/dashboard/new-report", &report_fields(), Some(png()), Some(&cookie)).await;

    let key = app.objects.keys().remove(0);
    let resp = get(&app, &format!("/photos/{key}"), None).await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(
        resp.headers.get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()),
        Some("image/png")
    );
    assert_eq!(
        resp.headers
            .get(header::X_CONTENT_TYPE_OPTIONS)
            .and_then(|v| v.to_str().ok()),
        Some("nosniff")
    );
}

#[tokio::test]
async fn content_type_parameters_do_not_block_a_real_photo() {
    let app = test_app();
    let cookie = app.reporter_cookie();
    let photo = FilePart {
        content_type: "image/png; charset=binary",
        ..png()
    };

    let resp = post_multipart(&app, "/dashboard/new-report", &report_fields(), Some(photo), Some(&cookie)).await;

    assert_eq!(resp.status, StatusCode::OK);
    let key = app.objects.keys().remove(0);
    assert!(key.ends_with(".png"));
    let served = get(&app, &format!("/photos/{key}"), None).await;
    assert_eq!(
        served.headers.get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()),
        Some("image/png")
    );
}

#[tokio::test]
async fn markup_labelled_as_png_is_rejected() {
    let app = test_app();
    let cookie = app.reporter_cookie();
    let disguised = FilePart {
        bytes: b"<html><script>alert(document.cookie)</script></html>",
        ..png()
    };

    let resp = post_multipart(&app, "/dashboard/new-report", &report_fields(), Some(disguised), Some(&cookie)).await;

    assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(resp.body.contains("Photo must be a JPEG, PNG, WebP or GIF image"));
    assert!(app.objects.keys().is_empty());
    assert_eq!(app.backend.missing_count(), 0);
}

#[tokio::test]
async fn report_without_photo_has_no_photo_url() {
    let app = test_app();
    let cookie = app.reporter_cookie();

    let resp = post_multipart(&app, "/dashboard/new-report", &report_fields(), None, Some(&cookie)).await;

    assert_eq!(resp.status, StatusCode::OK);
    let listed = app.backend.list_missing(ListScope::All).await.unwrap();
    let case = app.backend.find_missing(&listed[0].case_number).await.unwrap().unwrap();
    assert_eq!(case.photo_url, None);
    assert!(app.objects.keys().is_empty());
}

#[tokio::test]
async fn each_missing_required_field_blocks_all_writes() {
    let app = test_app();
    let cookie = app.reporter_cookie();

    for required in ["firstname", "lastname", "dob", "gender", "location", "dlc"] {
        let fields: Vec<(&str, &str)> = report_fields()
            .into_iter()
            .filter(|(name, _)| *name != required)
            .collect();

        let resp = post_multipart(&app, "/dashboard/new-report", &fields, Some(png()), Some(&cookie)).await;

        assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY, "{required}");
        assert!(resp.body.contains("Please fill in all required fields"), "{required}");
        assert_eq!(app.backend.missing_count(), 0, "{required}");
        assert!(app.objects.keys().is_empty(), "{required}");
    }
}

#[tokio::test]
async fn rejected_form_keeps_submitted_values() {
    let app = test_app();
    let cookie = app.reporter_cookie();
    let fields: Vec<(&str, &str)> = report_fields()
        .into_iter()
        .filter(|(name, _)| *name != "location")
        .collect();

    let resp = post_multipart(&app, "/dashboard/new-report", &fields, None, Some(&cookie)).await;

    assert!(resp.body.contains("value=\"Wanjiru\""));
    assert!(resp.body.contains("Town/location is required"));
}

#[tokio::test]
async fn future_date_of_birth_is_rejected() {
    let app = test_app();
    let cookie = app.reporter_cookie();
    let mut fields = report_fields();
    for field in fields.iter_mut() {
        if field.0 == "dob" {
            field.1 = "2999-01-01";
        }
    }

    let resp = post_multipart(&app, "/dashboard/new-report", &fields, None, Some(&cookie)).await;

    assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(resp.body.contains("cannot be in the future"));
    assert_eq!(app.backend.missing_count(), 0);
}

#[tokio::test]
async fn last_contact_before_birth_is_rejected() {
    let app = test_app();
    let cookie = app.reporter_cookie();
    let mut fields = report_fields();
    for field in fields.iter_mut() {
        if field.0 == "dlc" {
            field.1 = "2001-01-01";
        }
    }

    let resp = post_multipart(&app, "/dashboard/new-report", &fields, Some(png()), Some(&cookie)).await;

    assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(resp.body.contains("Date of last contact cannot be before the date of birth"));
    assert_eq!(app.backend.missing_count(), 0);
    assert!(app.objects.keys().is_empty());
}

#[tokio::test]
async fn upload_failure_reports_and_inserts_nothing() {
    let app = test_app();
    let cookie = app.reporter_cookie();
    app.objects.set_fail_uploads(true);

    let resp = post_multipart(&app, "/dashboard/new-report", &report_fields(), Some(png()), Some(&cookie)).await;

    assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(resp.body.contains("Failed to upload photo"));
    assert_eq!(app.backend.missing_count(), 0);
}

#[tokio::test]
async fn non_image_photo_is_rejected_before_upload() {
    let app = test_app();
    let cookie = app.reporter_cookie();
    let pdf = FilePart {
        field: "photo",
        file_name: "notes.pdf",
        content_type: "application/pdf",
        bytes: b"%PDF-1.4",
    };

    let resp = post_multipart(&app, "/dashboard/new-report", &report_fields(), Some(pdf), Some(&cookie)).await;

    assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(app.objects.keys().is_empty());
    assert_eq!(app.backend.missing_count(), 0);
}

#[tokio::test]
async fn insert_failure_leaves_the_photo_behind() {
    let app = test_app();
    let cookie = app.reporter_cookie();
    app.backend.set_unavailable(true);

    let resp = post_multipart(&app, "/dashboard/new-report", &report_fields(), Some(png()), Some(&cookie)).await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert!(resp.body.contains("Something went wrong"));
    assert_eq!(app.objects.keys().len(), 1);
}

#[tokio::test]
async fn new_report_form_renders_for_signed_in_users() {
    let app = test_app();
    let resp = get(&app, "/dashboard/new-report", Some(&app.reporter_cookie())).await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("enctype=\"multipart/form-data\""));
    assert!(resp.body.contains("name=\"photo\""));
}
