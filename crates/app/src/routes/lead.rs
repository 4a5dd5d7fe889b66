use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use dioxus::prelude::*;
use server::api;
use server::auth::extractors::{MaybeSession, SignedInAgent};
use server::db::AppState;
use shared_types::{CaseCounts, CaseStatus, ListScope, MissingPersonSummary, StatusForm};
use shared_ui::{
    Alert, AlertVariant, DataTable, DataTableBody, DataTableCell, DataTableColumn, DataTableEmpty,
    DataTableHeader, DataTableRow, NavVariant, PageHeader, SectionTitle, SortKind, StatCard,
    StatGrid, StatTone, StatusBadge,
};

use super::nav_for;
use crate::format_helpers::{case_href, display_date, display_timestamp, sort_key};
use crate::render::{error_page, page};
use crate::tables::rows_or_empty;

pub const LEAD_PATH: &str = "/lead";
pub const ALL_CASES_PATH: &str = "/lead/all-cases";

/// Where a status form may send the agent back to. Anything other than an
/// agent page or a case page falls back to the all-cases list.
pub fn safe_return_to(requested: Option<String>) -> String {
    match requested {
        Some(path)
            if !path.starts_with("//")
                && !path.chars().any(char::is_control)
                && (path == LEAD_PATH
                    || path.starts_with("/lead/")
                    || path.starts_with("/cases/")) =>
        {
            path
        }
        _ => ALL_CASES_PATH.to_string(),
    }
}

/// Status dropdown posting to the agent status route.
#[component]
pub fn StatusControl(case_number: String, current: String, return_to: String) -> Element {
    rsx! {
        form { class: "inline-form", method: "post", action: "/lead/cases/{case_number}/status",
            input { r#type: "hidden", name: "return_to", value: "{return_to}" }
            select { class: "select", name: "status", "aria-label": "New status",
                for status in CaseStatus::ALL {
                    option {
                        key: "{status}",
                        value: status.as_str(),
                        selected: status.as_str() == current.as_str(),
                        {status.label()}
                    }
                }
            }
            button { class: "button button-small", r#type: "submit", "Update Status" }
        }
    }
}

#[component]
fn TakeCaseButton(case_number: String) -> Element {
    rsx! {
        form { class: "inline-form", method: "post", action: "/lead/cases/{case_number}/take",
            button { class: "button button-small button-primary", r#type: "submit", "Take Case" }
        }
    }
}

#[component]
fn AssignedTable(rows: Vec<MissingPersonSummary>) -> Element {
    rsx! {
        DataTable { id: "assigned-cases",
            DataTableHeader {
                DataTableColumn { sort: SortKind::Text, "Case Number" }
                DataTableColumn { sort: SortKind::Text, "Name" }
                DataTableColumn { sort: SortKind::Date, "Last Contact" }
                DataTableColumn { sort: SortKind::Text, "Town/Location" }
                DataTableColumn { sort: SortKind::Text, "Status" }
                DataTableColumn { "Actions" }
            }
            DataTableBody {
                if rows.is_empty() {
                    DataTableEmpty { columns: 6usize, message: "No cases are assigned to you." }
                }
                for row in rows.iter() {
                    DataTableRow { key: "{row.case_number}",
                        DataTableCell { "{row.case_number}" }
                        DataTableCell { {row.full_name()} }
                        DataTableCell { sort_value: sort_key(Some(row.date_of_last_contact)),
                            {display_date(row.date_of_last_contact)}
                        }
                        DataTableCell { "{row.town_location}" }
                        DataTableCell { sort_value: row.status.clone(),
                            StatusBadge { status: row.status.clone() }
                        }
                        DataTableCell {
                            a { class: "button button-small", href: case_href(&row.case_number), "View" }
                            StatusControl {
                                case_number: row.case_number.clone(),
                                current: row.status.clone(),
                                return_to: LEAD_PATH.to_string(),
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Agent dashboard: counts and the cases assigned to this agent.
#[tracing::instrument(skip_all, fields(agent_id = %agent.claims.sub))]
pub async fn index(State(state): State<AppState>, agent: SignedInAgent) -> Response {
    let rows = rows_or_empty(
        "assigned",
        state.cases.list_missing(ListScope::Officer(agent.claims.user_id())).await,
    );
    let counts = CaseCounts::tally(rows.iter().map(|r| r.status.as_str()));
    let name = agent.profile.display_name().to_string();

    page(
        StatusCode::OK,
        "Agent Dashboard",
        NavVariant::Agent,
        LEAD_PATH,
        rsx! {
            PageHeader { title: "Welcome, Agent {name}", subtitle: "Cases assigned to you.",
                a { class: "button", href: ALL_CASES_PATH, "View all cases" }
            }
            StatGrid {
                StatCard { label: "Assigned Cases", value: counts.total }
                StatCard { label: "Under Investigation", value: counts.active, tone: StatTone::Info }
                StatCard { label: "Closed Cases", value: counts.closed, tone: StatTone::Success }
            }
            SectionTitle { "Assigned cases" }
            AssignedTable { rows }
        },
    )
}

#[component]
fn AllCasesTable(rows: Vec<MissingPersonSummary>) -> Element {
    rsx! {
        DataTable { id: "all-cases", filter_placeholder: "Filter by case number, name or officer...",
            DataTableHeader {
                DataTableColumn { sort: SortKind::Text, "Case Number" }
                DataTableColumn { sort: SortKind::Text, "Name" }
                DataTableColumn { sort: SortKind::Text, "Status" }
                DataTableColumn { sort: SortKind::Date, "Date Reported" }
                DataTableColumn { sort: SortKind::Text, "Assigned Officer" }
                DataTableColumn { "Actions" }
            }
            DataTableBody {
                if rows.is_empty() {
                    DataTableEmpty { columns: 6usize, message: "No cases have been reported." }
                }
                for row in rows.iter() {
                    DataTableRow { key: "{row.case_number}",
                        DataTableCell {
                            a { href: case_href(&row.case_number), "{row.case_number}" }
                        }
                        DataTableCell { {row.full_name()} }
                        DataTableCell { sort_value: row.status.clone(),
                            StatusBadge { status: row.status.clone() }
                        }
                        DataTableCell { sort_value: row.created_at.to_rfc3339(),
                            {display_timestamp(row.created_at)}
                        }
                        DataTableCell {
                            {row.officer_username.clone().unwrap_or_else(|| "Unassigned".to_string())}
                        }
                        DataTableCell {
                            if row.officer_id.is_none() {
                                TakeCaseButton { case_number: row.case_number.clone() }
                            }
                            StatusControl {
                                case_number: row.case_number.clone(),
                                current: row.status.clone(),
                                return_to: ALL_CASES_PATH.to_string(),
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Every missing-person case with assignment and status controls.
#[tracing::instrument(skip_all, fields(agent_id = %agent.claims.sub))]
pub async fn all_cases(State(state): State<AppState>, agent: SignedInAgent) -> Response {
    let rows = rows_or_empty("all-cases", state.cases.list_missing(ListScope::All).await);
    page(
        StatusCode::OK,
        "All Cases",
        NavVariant::Agent,
        ALL_CASES_PATH,
        rsx! {
            PageHeader { title: "All Cases", subtitle: "Take unassigned cases and keep statuses current." }
            AllCasesTable { rows }
        },
    )
}

/// Shown to signed-in users who are not agents.
pub async fn unauthorized(
    State(state): State<AppState>,
    MaybeSession(session): MaybeSession,
) -> Response {
    let nav = nav_for(state.auth.as_ref(), session.as_ref()).await;
    page(
        StatusCode::FORBIDDEN,
        "Unauthorized",
        nav,
        "/lead/unauthorized",
        rsx! {
            PageHeader { title: "Unauthorized" }
            Alert { variant: AlertVariant::Error,
                "This area is only available to agents."
            }
            p { a { href: "/dashboard", "Go to your dashboard" } }
        },
    )
}

/// Overwrite a case's status, then go back to the page the form was on.
#[tracing::instrument(skip_all, fields(agent_id = %agent.claims.sub, case_number = %case_number))]
pub async fn update_status(
    State(state): State<AppState>,
    agent: SignedInAgent,
    Path(case_number): Path<String>,
    Form(form): Form<StatusForm>,
) -> Response {
    match api::update_case_status(state.cases.as_ref(), &case_number, &form.status).await {
        Ok(_) => Redirect::to(&safe_return_to(form.return_to)).into_response(),
        Err(e) => error_page(&e, NavVariant::Agent, ALL_CASES_PATH),
    }
}

/// Assign an unassigned case to the signed-in agent.
#[tracing::instrument(skip_all, fields(agent_id = %agent.claims.sub, case_number = %case_number))]
pub async fn take(
    State(state): State<AppState>,
    agent: SignedInAgent,
    Path(case_number): Path<String>,
) -> Response {
    match api::take_case(state.cases.as_ref(), &case_number, agent.claims.user_id()).await {
        Ok(_) => Redirect::to(ALL_CASES_PATH).into_response(),
        Err(e) => error_page(&e, NavVariant::Agent, ALL_CASES_PATH),
    }
}
