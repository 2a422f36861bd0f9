//! HTTP error type for the Docshelf server.
//!
//! Expected conditions (missing document, invalid name, auth required,
//! bad credentials) are handled inline by the route handlers as flash
//! redirects or inline 422 re-renders — they never reach this type.
//! [`AppError`] only covers unanticipated failures: the response is a
//! generic 500 page and the detail goes to the log, never to the body.

use axum::http::StatusCode;
use axum::http::header;
use axum::response::{IntoResponse, Response};

use docshelf_core::render::TEXT_HTML;
use docshelf_store::StoreError;

/// An unanticipated server-side failure.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct AppError(pub String);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, "request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(header::CONTENT_TYPE, TEXT_HTML)],
            "<!DOCTYPE html><html><body><p>Something went wrong.</p></body></html>".to_owned(),
        )
            .into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        Self(err.to_string())
    }
}
