use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::response::Response;
use dioxus::prelude::*;
use server::auth::extractors::MaybeSession;
use server::db::AppState;
use shared_types::ListScope;
use shared_ui::{Alert, AlertVariant, PageHeader};

use super::nav_for;
use crate::render::page;
use crate::tables::{rows_or_empty, MissingTable, UnclaimedTable, UnidentifiedTable};

/// Home page: every reported missing person.
#[tracing::instrument(skip_all)]
pub async fn home(State(state): State<AppState>, MaybeSession(session): MaybeSession) -> Response {
    let nav = nav_for(state.auth.as_ref(), session.as_ref()).await;
    let rows = rows_or_empty("missing", state.cases.list_missing(ListScope::All).await);
    let signed_out = session.is_none();

    page(
        StatusCode::OK,
        "Missing Persons",
        nav,
        "/",
        rsx! {
            PageHeader {
                title: "Missing Persons",
                subtitle: "Have you seen any of these people? Select a row for details.",
                if signed_out {
                    a { class: "button button-primary", href: "/login", "Report a missing person" }
                }
            }
            MissingTable { rows }
        },
    )
}

#[tracing::instrument(skip_all)]
pub async fn unidentified(
    State(state): State<AppState>,
    MaybeSession(session): MaybeSession,
) -> Response {
    let nav = nav_for(state.auth.as_ref(), session.as_ref()).await;
    let rows = rows_or_empty("unidentified", state.cases.list_unidentified().await);

    page(
        StatusCode::OK,
        "Unidentified Persons",
        nav,
        "/unidentified",
        rsx! {
            PageHeader {
                title: "Unidentified Persons",
                subtitle: "People found by the authorities whose identity is not yet known.",
            }
            UnidentifiedTable { rows }
        },
    )
}

#[tracing::instrument(skip_all)]
pub async fn unclaimed(
    State(state): State<AppState>,
    MaybeSession(session): MaybeSession,
) -> Response {
    let nav = nav_for(state.auth.as_ref(), session.as_ref()).await;
    let rows = rows_or_empty("unclaimed", state.cases.list_unclaimed().await);

    page(
        StatusCode::OK,
        "Unclaimed Persons",
        nav,
        "/unclaimed",
        rsx! {
            PageHeader {
                title: "Unclaimed Persons",
                subtitle: "Deceased persons whose bodies have not been claimed.",
            }
            UnclaimedTable { rows }
        },
    )
}

/// Fallback for unknown paths.
pub async fn not_found(
    State(state): State<AppState>,
    MaybeSession(session): MaybeSession,
    uri: Uri,
) -> Response {
    tracing::debug!(path = %uri.path(), "No route");
    let nav = nav_for(state.auth.as_ref(), session.as_ref()).await;
    page(
        StatusCode::NOT_FOUND,
        "Page Not Found",
        nav,
        uri.path(),
        rsx! {
            PageHeader { title: "Page Not Found" }
            Alert { variant: AlertVariant::Info, "The page you are looking for does not exist." }
            p { a { href: "/", "Back to the home page" } }
        },
    )
}
