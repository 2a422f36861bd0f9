//! Sign-in and sign-out routes.
//!
//! Credential failures re-render the sign-in form with HTTP 422 and a
//! message that does not distinguish unknown users from wrong
//! passwords.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Extension, Form, Router};
use serde::Deserialize;
use tracing::warn;

use crate::middleware::SessionId;
use crate::routes::{redirect_home, render_page};
use crate::state::AppState;
use crate::templates;

const FLASH_INVALID_CREDENTIALS: &str = "Invalid Credentials.";

/// Build the auth router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/signin", get(signin_form).post(signin))
        .route("/signout", post(signout))
}

#[derive(Debug, Deserialize)]
struct SigninForm {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

/// Render the sign-in form.
async fn signin_form(
    State(state): State<Arc<AppState>>,
    Extension(sid): Extension<SessionId>,
) -> Response {
    render_page(
        &state,
        &sid,
        StatusCode::OK,
        "Sign In",
        templates::signin_body(),
    )
    .await
}

/// Verify submitted credentials and sign the session in.
async fn signin(
    State(state): State<Arc<AppState>>,
    Extension(sid): Extension<SessionId>,
    Form(form): Form<SigninForm>,
) -> Response {
    if state.credentials.verify(&form.username, &form.password) {
        state.sessions.sign_in(&sid.0, &form.username).await;
        redirect_home()
    } else {
        warn!(username = %form.username, "sign-in rejected");
        state
            .sessions
            .set_flash(&sid.0, FLASH_INVALID_CREDENTIALS)
            .await;
        render_page(
            &state,
            &sid,
            StatusCode::UNPROCESSABLE_ENTITY,
            "Sign In",
            templates::signin_body(),
        )
        .await
    }
}

/// Sign the session out.
async fn signout(
    State(state): State<Arc<AppState>>,
    Extension(sid): Extension<SessionId>,
) -> Response {
    state.sessions.sign_out(&sid.0).await;
    redirect_home()
}
