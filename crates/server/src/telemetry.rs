use axum::{body::Body, http::Request, response::Response};
use opentelemetry::{
    global,
    trace::{SpanKind, TraceContextExt, Tracer},
    Context, KeyValue,
};
use opentelemetry_otlp::{WithExportConfig, WithTonicConfig};
use std::{
    future::Future,
    pin::Pin,
    task::{Context as TaskContext, Poll},
};
use tower::{Layer, Service};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::auth::session::SessionClaims;

const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,findme=debug,server=debug,tower_http=info";

/// Install the global `tracing` subscriber: human-readable output to
/// stderr, filtered by `RUST_LOG`. Safe to call more than once; later calls
/// are no-ops.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init();
}

/// Set up the OpenTelemetry TracerProvider and register it globally so
/// `OtelTraceLayer` spans reach the collector.
///
/// Must be called from inside the Tokio runtime. Reads config from environment:
///   - `OTEL_EXPORTER_OTLP_ENDPOINT` — collector gRPC address (e.g. `http://localhost:4317`)
///   - `OTEL_SERVICE_NAME` — service name tag (default: `findme`)
///   - `DEPLOY_ENV` — deployment environment tag (default: `development`)
pub fn init_telemetry() {
    let endpoint = match std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT") {
        Ok(ep) if !ep.is_empty() => ep,
        _ => {
            tracing::info!("OTEL_EXPORTER_OTLP_ENDPOINT not set, skipping OTLP telemetry");
            return;
        }
    };

    let service_name = std::env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| "findme".to_string());
    let environment = std::env::var("DEPLOY_ENV").unwrap_or_else(|_| "development".to_string());

    let mut builder = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(&endpoint);

    // TLS with system root certs for HTTPS collectors
    if endpoint.starts_with("https://") {
        builder = builder.with_tls_config(
            opentelemetry_otlp::tonic_types::transport::ClientTlsConfig::new().with_native_roots(),
        );
    }

    let exporter = match builder.build() {
        Ok(exporter) => exporter,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to create OTLP exporter; telemetry disabled");
            return;
        }
    };

    let resource = opentelemetry_sdk::Resource::builder()
        .with_service_name(service_name)
        .with_attribute(KeyValue::new("service.version", APP_VERSION))
        .with_attribute(KeyValue::new("deployment.environment", environment))
        .build();

    let provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .with_resource(resource)
        .build();

    global::set_tracer_provider(provider);
    tracing::info!(%endpoint, "Telemetry initialized v{APP_VERSION}");
}

/// Collapse a request path into its route template so spans group by route,
/// e.g. `/cases/MSP-2025-00042` becomes `/cases/{case_number}`.
pub fn route_template(path: &str) -> String {
    path.split('/')
        .map(|segment| {
            if is_case_number(segment) {
                "{case_number}"
            } else {
                segment
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn is_case_number(segment: &str) -> bool {
    let mut parts = segment.splitn(3, '-');
    matches!(
        (parts.next(), parts.next(), parts.next()),
        (Some(prefix), Some(year), Some(seq))
            if prefix.eq_ignore_ascii_case(shared_types::CASE_NUMBER_PREFIX)
                && year.len() == 4
                && year.chars().all(|c| c.is_ascii_digit())
                && !seq.is_empty()
                && seq.chars().all(|c| c.is_ascii_digit())
    )
}

/// Tower layer that creates an OpenTelemetry span for each HTTP request.
///
/// Captures: method, route, request ID, response status, and the signed-in
/// user (if present).
#[derive(Clone)]
pub struct OtelTraceLayer;

impl<S> Layer<S> for OtelTraceLayer {
    type Service = OtelTraceService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        OtelTraceService { inner }
    }
}

#[derive(Clone)]
pub struct OtelTraceService<S> {
    inner: S,
}

impl<S> Service<Request<Body>> for OtelTraceService<S>
where
    S: Service<Request<Body>, Response = Response> + Send + Clone + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut TaskContext<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let tracer = global::tracer("findme");
        let method = req.method().to_string();
        let path = req.uri().path().to_string();

        let request_id = req
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let mut attributes = vec![
            KeyValue::new("http.method", method.clone()),
            KeyValue::new("http.target", path.clone()),
            KeyValue::new("http.request_id", request_id),
        ];
        match req.extensions().get::<SessionClaims>() {
            Some(claims) => attributes.extend([
                KeyValue::new("user.id", claims.sub.to_string()),
                KeyValue::new("auth.status", "authenticated"),
            ]),
            None => attributes.push(KeyValue::new("auth.status", "anonymous")),
        }

        let span = tracer
            .span_builder(format!("{} {}", &method, route_template(&path)))
            .with_kind(SpanKind::Server)
            .with_attributes(attributes)
            .start(&tracer);

        let cx = Context::current_with_span(span);
        let mut inner = self.inner.clone();

        let guard = cx.clone().attach();
        let future = inner.call(req);
        drop(guard);

        Box::pin(async move {
            let response = future.await?;

            let span = cx.span();
            let status = response.status();
            span.set_attribute(KeyValue::new("http.status_code", status.as_u16() as i64));

            if status.is_server_error() {
                span.set_status(opentelemetry::trace::Status::error(status.to_string()));
            } else if status.is_client_error() {
                span.set_attribute(KeyValue::new("error.type", "client_error"));
            }

            Ok(response)
        })
    }
}
