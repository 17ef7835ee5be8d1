//! Recipe list web application: server-rendered forms over one PostgreSQL
//! table.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod form;
pub mod models;
pub mod schema;
pub mod store;
pub mod telemetry;

use axum::extract::MatchedPath;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower_http::classify::ServerErrorsFailureClass;
use tower_http::trace::TraceLayer;
use tracing::{Level, Span};

use store::RecipeStore;

/// Application state shared across all handlers. Without a store the app
/// still renders, but nothing can be saved.
#[derive(Clone, Default)]
pub struct AppState {
    store: Option<Arc<dyn RecipeStore>>,
}

impl AppState {
    pub fn new(store: Arc<dyn RecipeStore>) -> Self {
        Self { store: Some(store) }
    }

    pub fn unconfigured() -> Self {
        Self::default()
    }

    pub fn store(&self) -> Option<&dyn RecipeStore> {
        self.store.as_deref()
    }
}

/// Request span keyed by the matched route. Liveness checks get a
/// trace-level span so they stay out of the logs.
fn request_span<B>(request: &Request<B>) -> Span {
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map(MatchedPath::as_str)
        .unwrap_or(request.uri().path());

    if matched_path == api::paths::PING {
        tracing::trace_span!("http_request")
    } else {
        tracing::info_span!(
            "http_request",
            method = %request.method(),
            path = %matched_path,
        )
    }
}

/// Spans that are filtered out or deliberately trace-level produce no
/// completion log.
fn is_quiet(span: &Span) -> bool {
    span.is_disabled() || span.metadata().map(|m| m.level()) == Some(&Level::TRACE)
}

fn log_response(status: StatusCode, latency: Duration, span: &Span) {
    if is_quiet(span) {
        return;
    }

    let latency_ms = latency.as_millis();
    if status.is_server_error() {
        tracing::error!(status = %status.as_u16(), latency_ms, "request failed with server error");
    } else {
        tracing::info!(status = %status.as_u16(), latency_ms, "request completed");
    }
}

/// Builds the full application with request tracing.
pub fn app(state: AppState) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<_>| request_span(request))
        .on_request(|_request: &Request<_>, _span: &Span| {})
        .on_response(|response: &Response<_>, latency: Duration, span: &Span| {
            log_response(response.status(), latency, span)
        })
        .on_failure(
            |error: ServerErrorsFailureClass, latency: Duration, _span: &Span| {
                tracing::error!(error = %error, latency_ms = latency.as_millis(), "request failed");
            },
        );

    api::router().with_state(state).layer(trace_layer)
}
