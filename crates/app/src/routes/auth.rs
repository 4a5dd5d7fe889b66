use std::collections::HashMap;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use dioxus::prelude::*;
use server::api::{self, SignedInUser};
use server::auth::cookies::{build_clear_cookie, build_session_cookie};
use server::config::Settings;
use server::db::AppState;
use shared_types::{AppError, ForgotPasswordForm, LoginForm, RegisterForm};
use shared_ui::{Alert, AlertVariant, Form as HtmlForm, NavVariant, SubmitButton, TextField};
use std::sync::Arc;

use crate::render::{page, status_of};

#[component]
fn LoginView(email: String, error: String) -> Element {
    rsx! {
        HtmlForm { action: "/login", class: "auth-form",
            h1 { class: "page-title", "Sign in" }
            if !error.is_empty() {
                Alert { variant: AlertVariant::Error, "{error}" }
            }
            TextField { label: "Email", name: "username", input_type: "email", value: email, required: true }
            TextField { label: "Password", name: "password", input_type: "password", required: true }
            SubmitButton { label: "Sign in" }
            p {
                a { href: "/forgot-password", "Forgot your password?" }
                " | "
                a { href: "/register", "Create an account" }
            }
        }
    }
}

fn login_response(status: StatusCode, email: String, error: String) -> Response {
    page(
        status,
        "Login",
        NavVariant::Public,
        "/login",
        rsx! { LoginView { email, error } },
    )
}

/// Attach a fresh session cookie to a redirect to the user's landing page.
fn start_session(state: &AppState, signed_in: &SignedInUser) -> Result<Response, AppError> {
    let token = state.sessions.issue(&signed_in.user)?;
    let cookie = build_session_cookie(&token, state.settings.cookie_secure)?;
    let mut response = Redirect::to(signed_in.landing_path()).into_response();
    response.headers_mut().insert(header::SET_COOKIE, cookie);
    Ok(response)
}

pub async fn login_page() -> Response {
    login_response(StatusCode::OK, String::new(), String::new())
}

/// Check credentials; agents land on `/lead`, everyone else on `/dashboard`.
/// A failed attempt re-renders the form and sets no cookie.
#[tracing::instrument(skip_all)]
pub async fn login_submit(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Response {
    let result = api::login(state.auth.as_ref(), &form.username, &form.password).await;
    match result.and_then(|signed_in| start_session(&state, &signed_in)) {
        Ok(response) => response,
        Err(e) => login_response(status_of(&e), form.username, e.user_message()),
    }
}

#[component]
fn RegisterView(
    username: String,
    email: String,
    error: String,
    field_errors: HashMap<String, String>,
) -> Element {
    let field = |name: &str| field_errors.get(name).cloned().unwrap_or_default();
    rsx! {
        HtmlForm { action: "/register", class: "auth-form",
            h1 { class: "page-title", "Create an account" }
            if !error.is_empty() {
                Alert { variant: AlertVariant::Error, "{error}" }
            }
            TextField { label: "Username", name: "username", value: username, required: true, error: field("username") }
            TextField { label: "Email", name: "email", input_type: "email", value: email, required: true, error: field("email") }
            TextField { label: "Password", name: "password", input_type: "password", required: true, error: field("password") }
            TextField {
                label: "Confirm password",
                name: "confirm_password",
                input_type: "password",
                required: true,
                error: field("confirm_password"),
            }
            SubmitButton { label: "Register" }
            p { "Already registered? " a { href: "/login", "Sign in" } }
        }
    }
}

pub async fn register_page() -> Response {
    page(
        StatusCode::OK,
        "Register",
        NavVariant::Public,
        "/register",
        rsx! {
            RegisterView {
                username: String::new(),
                email: String::new(),
                error: String::new(),
                field_errors: HashMap::new(),
            }
        },
    )
}

/// Create a `public` account and sign it in.
#[tracing::instrument(skip_all)]
pub async fn register_submit(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Response {
    let username = form.username.clone();
    let email = form.email.clone();
    let result = api::register(state.auth.as_ref(), form).await;
    match result.and_then(|signed_in| start_session(&state, &signed_in)) {
        Ok(response) => response,
        Err(e) => page(
            status_of(&e),
            "Register",
            NavVariant::Public,
            "/register",
            rsx! {
                RegisterView {
                    username,
                    email,
                    error: e.user_message(),
                    field_errors: e.field_errors.clone(),
                }
            },
        ),
    }
}

#[component]
fn ForgotView(notice: String) -> Element {
    rsx! {
        HtmlForm { action: "/forgot-password", class: "auth-form",
            h1 { class: "page-title", "Reset your password" }
            if notice.is_empty() {
                p { "Enter the email address you registered with." }
            } else {
                Alert { variant: AlertVariant::Success, "{notice}" }
            }
            TextField { label: "Email", name: "email", input_type: "email", required: true }
            SubmitButton { label: "Send reset link" }
            p { a { href: "/login", "Back to sign in" } }
        }
    }
}

pub async fn forgot_page() -> Response {
    page(
        StatusCode::OK,
        "Forgot Password",
        NavVariant::Public,
        "/forgot-password",
        rsx! { ForgotView { notice: String::new() } },
    )
}

/// Always answers with the same notice, whether or not the account exists.
pub async fn forgot_submit(Form(form): Form<ForgotPasswordForm>) -> Response {
    let notice = api::forgot_password(&form.email).message;
    page(
        StatusCode::OK,
        "Forgot Password",
        NavVariant::Public,
        "/forgot-password",
        rsx! { ForgotView { notice } },
    )
}

/// Clear the session cookie and return to the home page.
pub async fn logout(State(settings): State<Arc<Settings>>) -> Response {
    let mut response = Redirect::to("/").into_response();
    match build_clear_cookie(settings.cookie_secure) {
        Ok(cookie) => {
            response.headers_mut().insert(header::SET_COOKIE, cookie);
        }
        Err(e) => tracing::error!(error = %e, "Could not build logout cookie"),
    }
    response
}
