use std::collections::HashMap;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::Response;
use chrono::Utc;
use dioxus::prelude::*;
use server::api::{self, PhotoUpload};
use server::auth::extractors::SignedIn;
use server::db::AppState;
use shared_types::{AppError, CaseCounts, ListScope, MissingPersonSummary, NewReportForm, GENDERS};
use shared_ui::{
    Alert, AlertVariant, DataTable, DataTableBody, DataTableCell, DataTableColumn, DataTableEmpty,
    DataTableHeader, DataTableRow, FileField, Form as HtmlForm, NavVariant, PageHeader,
    SectionTitle, SelectField, SortKind, StatCard, StatGrid, StatTone, StatusBadge, SubmitButton,
    TextAreaField, TextField,
};

use super::nav_for;
use crate::format_helpers::{case_href, display_date, display_timestamp, sort_key};
use crate::render::{page, status_of};
use crate::tables::{rows_or_empty, MissingTable, UnclaimedTable, UnidentifiedTable};

#[component]
fn MyReportsTable(rows: Vec<MissingPersonSummary>) -> Element {
    rsx! {
        DataTable { id: "my-reports",
            DataTableHeader {
                DataTableColumn { sort: SortKind::Text, "Case Number" }
                DataTableColumn { sort: SortKind::Text, "Name" }
                DataTableColumn { sort: SortKind::Date, "Last Contact" }
                DataTableColumn { sort: SortKind::Text, "Status" }
                DataTableColumn { sort: SortKind::Date, "Reported" }
            }
            DataTableBody {
                if rows.is_empty() {
                    DataTableEmpty { columns: 5usize, message: "You have not filed any reports yet." }
                }
                for row in rows.iter() {
                    DataTableRow { key: "{row.case_number}", href: case_href(&row.case_number),
                        DataTableCell {
                            a { href: case_href(&row.case_number), "{row.case_number}" }
                        }
                        DataTableCell { {row.full_name()} }
                        DataTableCell { sort_value: sort_key(Some(row.date_of_last_contact)),
                            {display_date(row.date_of_last_contact)}
                        }
                        DataTableCell { sort_value: row.status.clone(),
                            StatusBadge { status: row.status.clone() }
                        }
                        DataTableCell { sort_value: row.created_at.to_rfc3339(),
                            {display_timestamp(row.created_at)}
                        }
                    }
                }
            }
        }
    }
}

/// Reporter dashboard: greeting, counts over the user's own reports, and
/// the reports themselves.
#[tracing::instrument(skip_all, fields(user_id = %claims.sub))]
pub async fn index(State(state): State<AppState>, SignedIn(claims): SignedIn) -> Response {
    let display_name = match state.auth.find_profile(claims.user_id()).await {
        Ok(Some(profile)) => profile.display_name().to_string(),
        Ok(None) => claims.email.clone(),
        Err(e) => {
            tracing::warn!(error = %e, "Profile lookup failed");
            claims.email.clone()
        }
    };
    let rows = rows_or_empty(
        "my-reports",
        state.cases.list_missing(ListScope::Reporter(claims.user_id())).await,
    );
    let counts = CaseCounts::tally(rows.iter().map(|r| r.status.as_str()));

    page(
        StatusCode::OK,
        "Dashboard",
        NavVariant::Reporter,
        "/dashboard",
        rsx! {
            PageHeader { title: "Welcome, {display_name}", subtitle: "Track the reports you have filed.",
                a { class: "button button-primary", href: "/dashboard/new-report", "File a new report" }
            }
            StatGrid {
                StatCard { label: "Total Reports", value: counts.total }
                StatCard { label: "Closed Cases", value: counts.closed, tone: StatTone::Success }
                StatCard { label: "Active Cases", value: counts.active, tone: StatTone::Info }
            }
            SectionTitle { "Your reports" }
            MyReportsTable { rows }
        },
    )
}

#[component]
fn ReportForm(form: NewReportForm, errors: HashMap<String, String>) -> Element {
    let err = |name: &str| errors.get(name).cloned().unwrap_or_default();
    let genders: Vec<(String, String)> =
        GENDERS.iter().map(|g| (g.to_string(), g.to_string())).collect();

    rsx! {
        HtmlForm { action: "/dashboard/new-report", multipart: true,
            SectionTitle { "Missing person" }
            TextField { label: "Legal first name", name: "firstname", value: form.firstname.clone(), required: true, error: err("firstname") }
            TextField { label: "Legal last name", name: "lastname", value: form.lastname.clone(), required: true, error: err("lastname") }
            TextField { label: "Date of birth", name: "dob", input_type: "date", value: form.dob.clone(), required: true, error: err("dob") }
            SelectField {
                label: "Gender",
                name: "gender",
                options: genders,
                selected: form.gender.clone(),
                prompt: "Select gender",
                required: true,
                error: err("gender"),
            }
            TextField { label: "Town/location", name: "location", value: form.location.clone(), required: true, error: err("location") }
            TextField { label: "Date of last contact", name: "dlc", input_type: "date", value: form.dlc.clone(), required: true, error: err("dlc") }
            TextAreaField { label: "Physical description", name: "pydesc", value: form.pydesc.clone() }
            TextAreaField { label: "Last seen wearing", name: "lstwear", value: form.lstwear.clone() }
            TextAreaField { label: "Medical conditions", name: "medcon", value: form.medcon.clone() }
            TextAreaField { label: "Emergency contacts", name: "emcont", value: form.emcont.clone() }
            TextAreaField { label: "Possible locations", name: "posloc", value: form.posloc.clone() }
            TextAreaField { label: "Circumstances of disappearance", name: "circ", value: form.circ.clone(), rows: 5u32 }
            FileField { label: "Recent photo", name: "photo", accept: "image/jpeg,image/png,image/webp,image/gif", error: err("photo") }
            SectionTitle { "Reporter" }
            TextField { label: "Your name", name: "reporter_name", value: form.reporter_name.clone() }
            TextField { label: "Your phone or email", name: "reporter_contact", value: form.reporter_contact.clone() }
            SubmitButton { label: "Submit report" }
        }
    }
}

fn report_page(
    status: StatusCode,
    form: NewReportForm,
    errors: HashMap<String, String>,
    notice: Element,
) -> Response {
    page(
        status,
        "New Report",
        NavVariant::Reporter,
        "/dashboard/new-report",
        rsx! {
            PageHeader {
                title: "Report a Missing Person",
                subtitle: "Fields marked required must be filled in. A photo helps others recognise them.",
            }
            {notice}
            ReportForm { form, errors }
        },
    )
}

pub async fn new_report_page(SignedIn(_claims): SignedIn) -> Response {
    report_page(StatusCode::OK, NewReportForm::default(), HashMap::new(), rsx! {})
}

/// Collect the multipart body: text fields into the form, the `photo` file
/// into an upload.
async fn read_report(
    mut multipart: Multipart,
) -> Result<(NewReportForm, Option<PhotoUpload>), AppError> {
    let mut form = NewReportForm::default();
    let mut photo = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(format!("Could not read the submitted form: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "photo" {
            let file_name = field.file_name().map(str::to_string);
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::bad_request(format!("Could not read the photo: {e}")))?;
            photo = Some(PhotoUpload {
                file_name,
                content_type,
                bytes: bytes.to_vec(),
            });
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| AppError::bad_request(format!("Could not read field {name}: {e}")))?;
            form.set_field(&name, value);
        }
    }

    Ok((form, photo))
}

/// File a report. Success shows the new case number over an empty form;
/// any failure re-renders the submitted values with the error.
#[tracing::instrument(skip_all, fields(user_id = %claims.sub))]
pub async fn new_report_submit(
    State(state): State<AppState>,
    SignedIn(claims): SignedIn,
    multipart: Multipart,
) -> Response {
    let (form, photo) = match read_report(multipart).await {
        Ok(parts) => parts,
        Err(e) => {
            let message = e.user_message();
            return report_page(
                status_of(&e),
                NewReportForm::default(),
                HashMap::new(),
                rsx! { Alert { variant: AlertVariant::Error, "{message}" } },
            );
        }
    };

    let today = Utc::now().date_naive();
    let result = api::submit_report(
        state.cases.as_ref(),
        state.objects.as_ref(),
        claims.user_id(),
        form.clone(),
        photo,
        today,
    )
    .await;

    match result {
        Ok(row) => {
            let href = case_href(&row.case_number);
            report_page(
                StatusCode::OK,
                NewReportForm::default(),
                HashMap::new(),
                rsx! {
                    Alert { variant: AlertVariant::Success,
                        "Report submitted successfully! Case number: "
                        a { href: "{href}", "{row.case_number}" }
                    }
                },
            )
        }
        Err(e) => {
            let message = e.user_message();
            report_page(
                status_of(&e),
                form,
                e.field_errors.clone(),
                rsx! { Alert { variant: AlertVariant::Error, "{message}" } },
            )
        }
    }
}

#[tracing::instrument(skip_all)]
pub async fn missing(State(state): State<AppState>, SignedIn(claims): SignedIn) -> Response {
    let nav = nav_for(state.auth.as_ref(), Some(&claims)).await;
    let rows = rows_or_empty("missing", state.cases.list_missing(ListScope::All).await);
    page(
        StatusCode::OK,
        "Missing Persons",
        nav,
        "/dashboard/missing",
        rsx! {
            PageHeader { title: "Missing Persons" }
            MissingTable { rows }
        },
    )
}

#[tracing::instrument(skip_all)]
pub async fn unidentified(State(state): State<AppState>, SignedIn(claims): SignedIn) -> Response {
    let nav = nav_for(state.auth.as_ref(), Some(&claims)).await;
    let rows = rows_or_empty("unidentified", state.cases.list_unidentified().await);
    page(
        StatusCode::OK,
        "Unidentified Persons",
        nav,
        "/dashboard/unidentified",
        rsx! {
            PageHeader { title: "Unidentified Persons" }
            UnidentifiedTable { rows }
        },
    )
}

#[tracing::instrument(skip_all)]
pub async fn unclaimed(State(state): State<AppState>, SignedIn(claims): SignedIn) -> Response {
    let nav = nav_for(state.auth.as_ref(), Some(&claims)).await;
    let rows = rows_or_empty("unclaimed", state.cases.list_unclaimed().await);
    page(
        StatusCode::OK,
        "Unclaimed Persons",
        nav,
        "/dashboard/unclaimed",
        rsx! {
            PageHeader { title: "Unclaimed Persons" }
            UnclaimedTable { rows }
        },
    )
}
