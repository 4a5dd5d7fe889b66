use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use serde_json::Value;
use server::auth::cookies::SESSION_COOKIE;
use server::auth::session::SessionKeys;
use server::config::Settings;
use server::db::AppState;
use server::memory::MemoryBackend;
use server::storage::MemoryObjectStore;
use server::store::CaseStore;
use shared_types::{AuthUser, FeatureFlags, MissingPerson, NewReportForm, UserRole};
use tower::ServiceExt;

pub const PASSWORD: &str = "correct-horse-42";
pub const AGENT_EMAIL: &str = "kim.agent@findme.test";
pub const AGENT_USERNAME: &str = "kim";
pub const REPORTER_EMAIL: &str = "amina@findme.test";
pub const REPORTER_USERNAME: &str = "amina";

/// Router over the in-memory backend with one agent and one reporter.
pub struct TestApp {
    pub router: Router,
    pub backend: Arc<MemoryBackend>,
    pub objects: Arc<MemoryObjectStore>,
    pub sessions: SessionKeys,
    pub agent: AuthUser,
    pub reporter: AuthUser,
}

impl TestApp {
    /// `Cookie` header value carrying a valid session for `user`.
    pub fn cookie_for(&self, user: &AuthUser) -> String {
        let token = self.sessions.issue(user).expect("issue session");
        format!("{SESSION_COOKIE}={token}")
    }

    pub fn agent_cookie(&self) -> String {
        self.cookie_for(&self.agent)
    }

    pub fn reporter_cookie(&self) -> String {
        self.cookie_for(&self.reporter)
    }
}

pub fn test_settings() -> Settings {
    Settings {
        session_secret: "integration-test-secret".to_string(),
        ..Settings::default()
    }
}

pub fn test_app() -> TestApp {
    let (state, backend, objects) = AppState::in_memory(test_settings());
    let agent = backend
        .seed_account(AGENT_USERNAME, AGENT_EMAIL, PASSWORD, UserRole::Agent)
        .expect("seed agent");
    let reporter = backend
        .seed_account(REPORTER_USERNAME, REPORTER_EMAIL, PASSWORD, UserRole::Public)
        .expect("seed reporter");
    let sessions = state.sessions.clone();
    let router = app::build_router(state, &FeatureFlags::default());

    TestApp {
        router,
        backend,
        objects,
        sessions,
        agent,
        reporter,
    }
}

/// A fixed "today" for dates in seeded records.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

/// Insert a pending case filed by `reporter_id`.
pub async fn seed_case(app: &TestApp, reporter_id: uuid::Uuid, first: &str, last: &str) -> MissingPerson {
    let mut form = NewReportForm::default();
    for (name, value) in [
        ("firstname", first),
        ("lastname", last),
        ("dob", "1990-04-15"),
        ("gender", "Female"),
        ("location", "Nakuru"),
        ("dlc", "2025-05-20"),
    ] {
        form.set_field(name, value.to_string());
    }
    let record = form
        .into_new_record(reporter_id, None, today())
        .expect("valid seed record");
    app.backend.insert_missing(record).await.expect("seed case")
}

/// What came back from the router.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn location(&self) -> Option<&str> {
        self.headers.get(header::LOCATION).and_then(|v| v.to_str().ok())
    }

    pub fn set_cookie(&self) -> Option<&str> {
        self.headers.get(header::SET_COOKIE).and_then(|v| v.to_str().ok())
    }

    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or(Value::Null)
    }
}

pub async fn send(app: &TestApp, req: Request<Body>) -> TestResponse {
    let response = app
        .router
        .clone()
        .oneshot(req)
        .await
        .expect("Failed to send request");

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");

    TestResponse {
        status,
        headers,
        body: String::from_utf8_lossy(&bytes).to_string(),
    }
}

fn with_cookie(builder: axum::http::request::Builder, cookie: Option<&str>) -> axum::http::request::Builder {
    match cookie {
        Some(cookie) => builder.header(header::COOKIE, cookie),
        None => builder,
    }
}

pub async fn get(app: &TestApp, uri: &str, cookie: Option<&str>) -> TestResponse {
    let req = with_cookie(Request::builder().method("GET").uri(uri), cookie)
        .body(Body::empty())
        .unwrap();
    send(app, req).await
}

/// Percent-encode a form value.
fn encode(value: &str) -> String {
    let mut out = String::new();
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

pub async fn post_form(
    app: &TestApp,
    uri: &str,
    fields: &[(&str, &str)],
    cookie: Option<&str>,
) -> TestResponse {
    let body = fields
        .iter()
        .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    let req = with_cookie(Request::builder().method("POST").uri(uri), cookie)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap();
    send(app, req).await
}

/// A file part for `post_multipart`.
pub struct FilePart<'a> {
    pub field: &'a str,
    pub file_name: &'a str,
    pub content_type: &'a str,
    pub bytes: &'a [u8],
}

const BOUNDARY: &str = "findme-test-boundary";

pub async fn post_multipart(
    app: &TestApp,
    uri: &str,
    fields: &[(&str, &str)],
    file: Option<FilePart<'_>>,
    cookie: Option<&str>,
) -> TestResponse {
    let mut body: Vec<u8> = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some(file) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                file.field, file.file_name, file.content_type
            )
            .as_bytes(),
        );
        body.extend_from_slice(file.bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    let req = with_cookie(Request::builder().method("POST").uri(uri), cookie)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    send(app, req).await
}

pub async fn patch_json(app: &TestApp, uri: &str, body: Value, cookie: Option<&str>) -> TestResponse {
    let req = with_cookie(Request::builder().method("PATCH").uri(uri), cookie)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, req).await
}

/// The complete set of required report fields, plus a couple of optional ones.
pub fn report_fields() -> Vec<(&'static str, &'static str)> {
    vec![
        ("firstname", "Wanjiru"),
        ("lastname", "Mwangi"),
        ("dob", "2008-02-10"),
        ("gender", "Female"),
        ("location", "Thika"),
        ("dlc", "2025-01-05"),
        ("lstwear", "Green school uniform"),
        ("reporter_name", "Grace Mwangi"),
        ("pydesc", ""),
    ]
}

/// Smallest valid PNG header; content is never decoded.
pub const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
