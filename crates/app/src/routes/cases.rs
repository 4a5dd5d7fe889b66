use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use dioxus::prelude::*;
use server::auth::extractors::MaybeSession;
use server::db::AppState;
use shared_types::{AppError, MissingPerson};
use shared_ui::{
    or_na, Card, CardContent, CardHeader, CardTitle, DetailGrid, DetailItem, DetailList,
    NavVariant, PageHeader, StatusBadge,
};

use super::lead::StatusControl;
use super::nav_for;
use crate::format_helpers::{display_date, display_timestamp};
use crate::render::{error_page, page};

#[component]
fn CaseDetail(case: MissingPerson, agent_view: bool) -> Element {
    let return_to = format!("/cases/{}", case.case_number);
    rsx! {
        DetailGrid {
            Card {
                CardHeader { CardTitle { "Missing person" } }
                CardContent {
                    if let Some(url) = case.photo_url.clone() {
                        img { class: "case-photo", src: "{url}", alt: "Photo of {case.legal_first_name}" }
                    }
                    DetailList {
                        DetailItem { label: "First Name", value: case.legal_first_name.clone() }
                        DetailItem { label: "Last Name", value: case.legal_last_name.clone() }
                        DetailItem { label: "Date of Birth", value: display_date(case.date_of_birth) }
                        DetailItem { label: "Age", value: case.age.to_string() }
                        DetailItem { label: "Gender", value: case.gender.clone() }
                        DetailItem { label: "Town/Location", value: case.town_location.clone() }
                        DetailItem { label: "Last Contact", value: display_date(case.date_of_last_contact) }
                        DetailItem { label: "Status",
                            StatusBadge { status: case.status.clone() }
                        }
                    }
                }
            }
            Card {
                CardHeader { CardTitle { "Details" } }
                CardContent {
                    DetailList {
                        DetailItem { label: "Physical Description", value: or_na(case.physical_description.as_deref()) }
                        DetailItem { label: "Last Seen Wearing", value: or_na(case.last_seen_wearing.as_deref()) }
                        DetailItem { label: "Medical Conditions", value: or_na(case.medical_conditions.as_deref()) }
                        DetailItem { label: "Possible Locations", value: or_na(case.possible_locations.as_deref()) }
                        DetailItem { label: "Circumstances", value: or_na(case.circumstances.as_deref()) }
                    }
                }
            }
            Card {
                CardHeader { CardTitle { "Contact" } }
                CardContent {
                    DetailList {
                        DetailItem { label: "Reported By", value: or_na(case.reporter_name.as_deref()) }
                        DetailItem { label: "Reporter Contact", value: or_na(case.reporter_contact.as_deref()) }
                        DetailItem { label: "Emergency Contacts", value: or_na(case.emergency_contacts.as_deref()) }
                        DetailItem { label: "Date Reported", value: display_timestamp(case.created_at) }
                    }
                    if agent_view {
                        StatusControl {
                            case_number: case.case_number.clone(),
                            current: case.status.clone(),
                            return_to,
                        }
                    }
                }
            }
        }
    }
}

/// One missing-person case. Agents also get the status control.
#[tracing::instrument(skip(state, session))]
pub async fn detail(
    State(state): State<AppState>,
    MaybeSession(session): MaybeSession,
    Path(case_number): Path<String>,
) -> Response {
    let nav = nav_for(state.auth.as_ref(), session.as_ref()).await;
    let current = format!("/cases/{case_number}");

    let case = match state.cases.find_missing(&case_number).await {
        Ok(Some(case)) => case,
        Ok(None) => {
            let err = AppError::not_found(format!("Case {case_number} not found"));
            return error_page(&err, nav, &current);
        }
        Err(e) => {
            tracing::error!(error = %e, "Case lookup failed");
            return error_page(&e, nav, &current);
        }
    };

    let title = format!("Case {}", case.case_number);
    let name = case.full_name();
    page(
        StatusCode::OK,
        &title,
        nav,
        &current,
        rsx! {
            PageHeader { title: "{name}", subtitle: "{title}" }
            CaseDetail { case, agent_view: nav == NavVariant::Agent }
        },
    )
}
