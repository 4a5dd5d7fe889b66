//! Turning component trees into HTTP responses.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use dioxus::prelude::*;
use shared_types::AppError;
use shared_ui::{Alert, AlertVariant, NavVariant, Navbar, Page, PageHeader};

/// Render a full page: document shell, navigation for `nav`, then `body`.
/// `current` is the request path, used to highlight the active link.
pub fn render_page(title: &str, nav: NavVariant, current: &str, body: Element) -> String {
    let title = title.to_string();
    let current = current.to_string();
    let markup = dioxus_ssr::render_element(rsx! {
        Page {
            title,
            nav: rsx! { Navbar { variant: nav, current } },
            {body}
        }
    });
    format!("<!DOCTYPE html>{markup}")
}

/// A rendered page as a response with the given status.
pub fn page(
    status: StatusCode,
    title: &str,
    nav: NavVariant,
    current: &str,
    body: Element,
) -> Response {
    (status, Html(render_page(title, nav, current, body))).into_response()
}

/// HTTP status matching an error's kind.
pub fn status_of(err: &AppError) -> StatusCode {
    StatusCode::from_u16(err.status_code_u16()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Page carrying only a heading and an error message.
pub fn error_page(err: &AppError, nav: NavVariant, current: &str) -> Response {
    let status = status_of(err);
    let heading = match status {
        StatusCode::NOT_FOUND => "Not Found",
        StatusCode::BAD_REQUEST => "Invalid Request",
        _ => "Something Went Wrong",
    };
    let message = err.user_message();
    page(
        status,
        heading,
        nav,
        current,
        rsx! {
            PageHeader { title: heading.to_string() }
            Alert { variant: AlertVariant::Error, "{message}" }
            p { a { href: "/", "Back to the home page" } }
        },
    )
}
