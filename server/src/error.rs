use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;

use crate::store::StoreError;

/// Failures on the page-rendering paths. Each one becomes a 500 page; the
/// cause is logged, never shown.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to render template: {0}")]
    Render(#[from] askama::Error),
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorPage;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");

        let body = ErrorPage
            .render()
            .unwrap_or_else(|_| "Internal Server Error".to_string());

        (StatusCode::INTERNAL_SERVER_ERROR, Html(body)).into_response()
    }
}
