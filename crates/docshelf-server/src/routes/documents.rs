//! Document routes: index, view, create, edit, and destroy.
//!
//! The catch-all `/{filename}` capture coexists with the literal
//! `/new` and `/create` routes — axum matches literal segments first,
//! so a document named `new` or `signin` is shadowed by the form
//! routes, matching the intended precedence.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Form, Router};
use serde::Deserialize;
use tracing::info;

use docshelf_store::{DocumentStore, StoreError, validate_name};

use crate::error::AppError;
use crate::middleware::SessionId;
use crate::routes::{flash_and_redirect, render_page, require_signed_in};
use crate::state::AppState;
use crate::templates;

/// Build the document router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index))
        .route("/new", get(new_form))
        .route("/create", post(create))
        .route("/{filename}", get(show))
        .route("/{filename}/edit", get(edit_form).post(update))
        .route("/destroy/{filename}", post(destroy))
}

// ── Form types ───────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct CreateForm {
    #[serde(default)]
    new_file: String,
}

#[derive(Debug, Deserialize)]
struct EditForm {
    #[serde(default)]
    content: String,
}

// ── Handlers ─────────────────────────────────────────────────────────

/// List all documents.
async fn index(
    State(state): State<Arc<AppState>>,
    Extension(sid): Extension<SessionId>,
) -> Result<Response, AppError> {
    let mut names = state.store.list().await?;
    names.sort();

    Ok(render_page(
        &state,
        &sid,
        StatusCode::OK,
        "Documents",
        templates::index_body(&names),
    )
    .await)
}

/// View a document with its extension-driven content type.
async fn show(
    State(state): State<Arc<AppState>>,
    Extension(sid): Extension<SessionId>,
    Path(filename): Path<String>,
) -> Result<Response, AppError> {
    if validate_name(&filename).is_err() {
        return Ok(invalid_name_redirect(&state, &sid, &filename).await);
    }

    match state.store.read(&filename).await {
        Ok(raw) => {
            let rendered = state.renderer.render(&filename, &raw);
            Ok((
                StatusCode::OK,
                [(header::CONTENT_TYPE, rendered.content_type)],
                rendered.body,
            )
                .into_response())
        }
        Err(StoreError::NotFound { .. }) => {
            Ok(flash_and_redirect(&state, &sid, format!("{filename} does not exist.")).await)
        }
        Err(err) => Err(err.into()),
    }
}

/// Render the new-document form.
async fn new_form(
    State(state): State<Arc<AppState>>,
    Extension(sid): Extension<SessionId>,
) -> Result<Response, AppError> {
    if let Err(deny) = require_signed_in(&state, &sid).await {
        return Ok(deny);
    }

    Ok(render_page(
        &state,
        &sid,
        StatusCode::OK,
        "New Document",
        templates::new_body(),
    )
    .await)
}

/// Create a document from the submitted name.
async fn create(
    State(state): State<Arc<AppState>>,
    Extension(sid): Extension<SessionId>,
    Form(form): Form<CreateForm>,
) -> Result<Response, AppError> {
    if let Err(deny) = require_signed_in(&state, &sid).await {
        return Ok(deny);
    }

    let name = form.new_file.trim().to_owned();
    if name.is_empty() {
        state
            .sessions
            .set_flash(&sid.0, "File name cannot be empty.")
            .await;
        return Ok(render_page(
            &state,
            &sid,
            StatusCode::UNPROCESSABLE_ENTITY,
            "New Document",
            templates::new_body(),
        )
        .await);
    }

    if validate_name(&name).is_err() {
        return Ok(invalid_name_redirect(&state, &sid, &name).await);
    }

    state.store.create(&name, b"").await?;
    info!(name = %name, "document created");

    Ok(flash_and_redirect(&state, &sid, format!("{name} was created successfully.")).await)
}

/// Render the edit form, pre-filled with the rendered content.
async fn edit_form(
    State(state): State<Arc<AppState>>,
    Extension(sid): Extension<SessionId>,
    Path(filename): Path<String>,
) -> Result<Response, AppError> {
    if let Err(deny) = require_signed_in(&state, &sid).await {
        return Ok(deny);
    }

    if validate_name(&filename).is_err() {
        return Ok(invalid_name_redirect(&state, &sid, &filename).await);
    }

    match state.store.read(&filename).await {
        Ok(raw) => {
            let rendered = state.renderer.render(&filename, &raw);
            let content = String::from_utf8_lossy(&rendered.body);
            Ok(render_page(
                &state,
                &sid,
                StatusCode::OK,
                &format!("Edit {filename}"),
                templates::edit_body(&filename, &content),
            )
            .await)
        }
        Err(StoreError::NotFound { .. }) => {
            Ok(flash_and_redirect(&state, &sid, format!("{filename} does not exist.")).await)
        }
        Err(err) => Err(err.into()),
    }
}

/// Overwrite a document with the submitted content.
async fn update(
    State(state): State<Arc<AppState>>,
    Extension(sid): Extension<SessionId>,
    Path(filename): Path<String>,
    Form(form): Form<EditForm>,
) -> Result<Response, AppError> {
    if let Err(deny) = require_signed_in(&state, &sid).await {
        return Ok(deny);
    }

    if validate_name(&filename).is_err() {
        return Ok(invalid_name_redirect(&state, &sid, &filename).await);
    }

    state.store.write(&filename, form.content.as_bytes()).await?;
    info!(name = %filename, "document updated");

    Ok(flash_and_redirect(&state, &sid, format!("{filename} has been updated.")).await)
}

/// Delete a document.
async fn destroy(
    State(state): State<Arc<AppState>>,
    Extension(sid): Extension<SessionId>,
    Path(filename): Path<String>,
) -> Result<Response, AppError> {
    if let Err(deny) = require_signed_in(&state, &sid).await {
        return Ok(deny);
    }

    if validate_name(&filename).is_err() {
        return Ok(invalid_name_redirect(&state, &sid, &filename).await);
    }

    match state.store.delete(&filename).await {
        Ok(()) => {
            info!(name = %filename, "document deleted");
            Ok(flash_and_redirect(
                &state,
                &sid,
                format!("{filename} has been successfully deleted."),
            )
            .await)
        }
        Err(StoreError::NotFound { .. }) => {
            Ok(flash_and_redirect(&state, &sid, format!("{filename} does not exist.")).await)
        }
        Err(err) => Err(err.into()),
    }
}

// ── Helpers ──────────────────────────────────────────────────────────

/// Traversal probes get the same shape of answer as a missing document
/// and never touch the store.
async fn invalid_name_redirect(state: &AppState, sid: &SessionId, name: &str) -> Response {
    flash_and_redirect(state, sid, format!("{name} is not a valid document name.")).await
}
