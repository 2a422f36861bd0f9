//! Session cookie middleware.
//!
//! Resolves the `docshelf_session` cookie to a live session, minting a
//! new one when the cookie is absent or stale (e.g. after a restart,
//! since sessions live in process memory). The session token is
//! injected into request extensions for downstream handlers; a
//! `Set-Cookie` header is appended only when a fresh session was
//! minted.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{HeaderValue, header};
use axum::middleware::Next;
use axum::response::Response;

use crate::state::AppState;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "docshelf_session";

/// Opaque session token injected into request extensions.
#[derive(Debug, Clone)]
pub struct SessionId(pub String);

/// Middleware that guarantees every request carries a live session.
pub async fn session_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Response {
    let presented = req
        .headers()
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(session_token);

    let (token, fresh) = match presented {
        Some(token) if state.sessions.exists(&token).await => (token, false),
        _ => (state.sessions.create().await, true),
    };

    req.extensions_mut().insert(SessionId(token.clone()));

    let mut response = next.run(req).await;

    if fresh {
        // Tokens are UUIDs, so the header value is always valid.
        if let Ok(value) = HeaderValue::from_str(&format!(
            "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax"
        )) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }

    response
}

/// Extract the session token from a `Cookie` header value.
fn session_token(header: &str) -> Option<String> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_owned())
}
