//! HTTP routes and shared handler helpers.
//!
//! Expected failures follow one rule everywhere: missing or invalid
//! documents and unauthenticated access produce a flash message and a
//! 302 redirect home; form validation failures re-render the form
//! inline with HTTP 422. Only unanticipated I/O errors surface as 500
//! via [`crate::error::AppError`].

pub mod auth;
pub mod documents;

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderValue, StatusCode, header};
use axum::middleware as axum_mw;
use axum::response::{IntoResponse, Response};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use docshelf_core::render::TEXT_HTML;
use docshelf_core::session::FLASH_AUTH_REQUIRED;

use crate::middleware::{SessionId, session_middleware};
use crate::state::AppState;
use crate::templates;

/// Build the full application router with middleware.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(documents::router())
        .merge(auth::router())
        .layer(axum_mw::from_fn_with_state(
            Arc::clone(&state),
            session_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .with_state(state)
}

/// Render a templated page, consuming the session's pending flash.
pub(crate) async fn render_page(
    state: &AppState,
    sid: &SessionId,
    status: StatusCode,
    title: &str,
    body: String,
) -> Response {
    let flash = state.sessions.take_flash(&sid.0).await;
    let username = state.sessions.username(&sid.0).await;
    let html = templates::page(title, flash.as_deref(), username.as_deref(), &body);
    (status, [(header::CONTENT_TYPE, TEXT_HTML)], html).into_response()
}

/// A 302 redirect to the index page.
pub(crate) fn redirect_home() -> Response {
    (
        StatusCode::FOUND,
        [(header::LOCATION, HeaderValue::from_static("/"))],
    )
        .into_response()
}

/// Set a flash message and redirect home.
pub(crate) async fn flash_and_redirect(
    state: &AppState,
    sid: &SessionId,
    message: impl Into<String>,
) -> Response {
    state.sessions.set_flash(&sid.0, message).await;
    redirect_home()
}

/// Enforce the auth precondition for protected operations.
///
/// For an unauthenticated session, returns the redirect the handler
/// must respond with immediately — no further work is performed.
pub(crate) async fn require_signed_in(
    state: &AppState,
    sid: &SessionId,
) -> Result<(), Response> {
    if state.sessions.is_signed_in(&sid.0).await {
        Ok(())
    } else {
        Err(flash_and_redirect(state, sid, FLASH_AUTH_REQUIRED).await)
    }
}
