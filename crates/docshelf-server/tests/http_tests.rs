//! Integration tests for the Docshelf HTTP surface.
//!
//! These tests drive the full router — session middleware included —
//! through `tower::ServiceExt::oneshot`, without binding a socket. The
//! document store is the in-memory backend; credentials come from a
//! real temporary JSON file with bcrypt hashes.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::HashMap;
use std::io::Write;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use tower::ServiceExt;

use docshelf_core::credentials::Credentials;
use docshelf_core::render::ContentRenderer;
use docshelf_core::session::SessionStore;
use docshelf_store::{DocumentStore, MemoryStore};

use docshelf_server::routes;
use docshelf_server::state::AppState;

const USERNAME: &str = "admin";
const PASSWORD: &str = "secret";

struct Ctx {
    app: Router,
    store: MemoryStore,
}

/// Build an app over an in-memory store seeded with the given documents.
async fn ctx_with(docs: &[(&str, &str)]) -> Ctx {
    let store = MemoryStore::new();
    for (name, content) in docs {
        store.create(name, content.as_bytes()).await.unwrap();
    }

    // Minimum bcrypt cost keeps the suite fast.
    let users: HashMap<&str, String> =
        HashMap::from([(USERNAME, bcrypt::hash(PASSWORD, 4).unwrap())]);
    let mut users_file = tempfile::NamedTempFile::new().unwrap();
    users_file
        .write_all(serde_json::to_string(&users).unwrap().as_bytes())
        .unwrap();
    let credentials = Credentials::load(users_file.path()).unwrap();

    let state = Arc::new(AppState {
        store: Arc::new(store.clone()),
        renderer: ContentRenderer::new(),
        credentials,
        sessions: SessionStore::new(),
    });

    Ctx {
        app: routes::router(state),
        store,
    }
}

async fn get(app: &Router, path: &str, cookie: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().uri(path);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn post(app: &Router, path: &str, form: &str, cookie: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(builder.body(Body::from(form.to_owned())).unwrap())
        .await
        .unwrap()
}

/// Extract the session cookie pair from a response's `Set-Cookie`.
fn session_cookie(res: &Response<Body>) -> String {
    let raw = res
        .headers()
        .get(header::SET_COOKIE)
        .expect("response should set a session cookie")
        .to_str()
        .unwrap();
    raw.split(';').next().unwrap().to_owned()
}

async fn body_string(res: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Sign in and return the session cookie.
async fn signed_in_cookie(app: &Router) -> String {
    let res = post(
        app,
        "/signin",
        &format!("username={USERNAME}&password={PASSWORD}"),
        None,
    )
    .await;
    assert_eq!(res.status(), StatusCode::FOUND);
    session_cookie(&res)
}

fn assert_redirect_home(res: &Response<Body>) {
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(res.headers().get(header::LOCATION).unwrap(), "/");
}

// ── Browsing ─────────────────────────────────────────────────────────

#[tokio::test]
async fn index_lists_all_documents() {
    let ctx = ctx_with(&[("about.txt", ""), ("changes.txt", "")]).await;

    let res = get(&ctx.app, "/", None).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/html;charset=utf-8"
    );

    let body = body_string(res).await;
    assert!(body.contains("about.txt"));
    assert!(body.contains("changes.txt"));
}

#[tokio::test]
async fn plaintext_document_is_served_verbatim() {
    let ctx = ctx_with(&[("about.txt", "Perl, Smalltalk")]).await;

    let res = get(&ctx.app, "/about.txt", None).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/plain"
    );
    assert_eq!(body_string(res).await, "Perl, Smalltalk");
}

#[tokio::test]
async fn markdown_document_renders_to_html() {
    let ctx = ctx_with(&[("sample.md", "<h1>An h1 header</h1>")]).await;

    let res = get(&ctx.app, "/sample.md", None).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/html;charset=utf-8"
    );
    assert!(body_string(res).await.contains("<h1>An h1 header</h1>"));
}

#[tokio::test]
async fn missing_document_redirects_with_flash() {
    let ctx = ctx_with(&[]).await;

    let res = get(&ctx.app, "/ghost.txt", None).await;
    assert_redirect_home(&res);
    let cookie = session_cookie(&res);

    let body = body_string(get(&ctx.app, "/", Some(&cookie)).await).await;
    assert!(body.contains("ghost.txt does not exist."));

    // Flash is one-shot: gone on the next render.
    let body = body_string(get(&ctx.app, "/", Some(&cookie)).await).await;
    assert!(!body.contains("ghost.txt does not exist."));
}

#[tokio::test]
async fn session_cookie_is_issued_once_and_honored() {
    let ctx = ctx_with(&[]).await;

    let first = get(&ctx.app, "/", None).await;
    let cookie = session_cookie(&first);

    let second = get(&ctx.app, "/", Some(&cookie)).await;
    assert!(
        second.headers().get(header::SET_COOKIE).is_none(),
        "a live session should not be re-issued"
    );
}

#[tokio::test]
async fn responses_carry_nosniff() {
    let ctx = ctx_with(&[]).await;
    let res = get(&ctx.app, "/", None).await;
    assert_eq!(
        res.headers().get(header::X_CONTENT_TYPE_OPTIONS).unwrap(),
        "nosniff"
    );
}

// ── Auth gate ────────────────────────────────────────────────────────

#[tokio::test]
async fn protected_routes_redirect_anonymous_users() {
    let ctx = ctx_with(&[("about.txt", "original")]).await;

    for (method, path, form) in [
        ("GET", "/new", ""),
        ("GET", "/about.txt/edit", ""),
        ("POST", "/create", "new_file=doc.txt"),
        ("POST", "/about.txt/edit", "content=hacked"),
        ("POST", "/destroy/about.txt", ""),
    ] {
        let res = if method == "GET" {
            get(&ctx.app, path, None).await
        } else {
            post(&ctx.app, path, form, None).await
        };
        assert_redirect_home(&res);

        let cookie = session_cookie(&res);
        let body = body_string(get(&ctx.app, "/", Some(&cookie)).await).await;
        assert!(
            body.contains("You have to be logged in to do that."),
            "{method} {path} should flash the auth message"
        );
    }

    // No mutation happened.
    assert_eq!(ctx.store.read("about.txt").await.unwrap(), b"original");
    assert!(!ctx.store.exists("doc.txt").await.unwrap());
}

#[tokio::test]
async fn signin_with_valid_credentials_welcomes() {
    let ctx = ctx_with(&[]).await;

    let cookie = signed_in_cookie(&ctx.app).await;
    let body = body_string(get(&ctx.app, "/", Some(&cookie)).await).await;
    assert!(body.contains("Welcome"));
    assert!(body.contains("Sign Out"));
}

#[tokio::test]
async fn signin_with_bad_password_rerenders_with_422() {
    let ctx = ctx_with(&[]).await;

    let res = post(
        &ctx.app,
        "/signin",
        &format!("username={USERNAME}&password=wrong"),
        None,
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_string(res).await;
    assert!(body.contains("Invalid Credentials."));
    assert!(body.contains("<form method=\"post\" action=\"/signin\""));
}

#[tokio::test]
async fn signin_with_unknown_user_rerenders_with_422() {
    let ctx = ctx_with(&[]).await;

    let res = post(&ctx.app, "/signin", "username=nobody&password=x", None).await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_string(res).await.contains("Invalid Credentials."));
}

#[tokio::test]
async fn signout_clears_the_session() {
    let ctx = ctx_with(&[]).await;
    let cookie = signed_in_cookie(&ctx.app).await;
    // Consume the welcome flash.
    let _ = get(&ctx.app, "/", Some(&cookie)).await;

    let res = post(&ctx.app, "/signout", "", Some(&cookie)).await;
    assert_redirect_home(&res);

    let body = body_string(get(&ctx.app, "/", Some(&cookie)).await).await;
    assert!(body.contains("You have been signed out"));
    assert!(body.contains("Sign In"));

    // Protected routes are gated again.
    let res = get(&ctx.app, "/new", Some(&cookie)).await;
    assert_redirect_home(&res);
}

// ── Creating ─────────────────────────────────────────────────────────

#[tokio::test]
async fn new_form_renders_for_signed_in_users() {
    let ctx = ctx_with(&[]).await;
    let cookie = signed_in_cookie(&ctx.app).await;

    let res = get(&ctx.app, "/new", Some(&cookie)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_string(res).await;
    assert!(body.contains("Add a new document"));
    assert!(body.contains("<button type=\"submit\""));
}

#[tokio::test]
async fn create_with_empty_name_is_422() {
    let ctx = ctx_with(&[]).await;
    let cookie = signed_in_cookie(&ctx.app).await;

    let res = post(&ctx.app, "/create", "new_file=+++", Some(&cookie)).await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_string(res).await;
    assert!(body.contains("File name cannot be empty."));
    assert!(body.contains("Add a new document"));
}

#[tokio::test]
async fn create_with_valid_name_flashes_and_persists() {
    let ctx = ctx_with(&[]).await;
    let cookie = signed_in_cookie(&ctx.app).await;

    let res = post(&ctx.app, "/create", "new_file=notes.txt", Some(&cookie)).await;
    assert_redirect_home(&res);

    let body = body_string(get(&ctx.app, "/", Some(&cookie)).await).await;
    assert!(body.contains("notes.txt was created successfully."));

    let res = get(&ctx.app, "/notes.txt", Some(&cookie)).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(ctx.store.exists("notes.txt").await.unwrap());
}

// ── Editing ──────────────────────────────────────────────────────────

#[tokio::test]
async fn edit_form_prefills_content() {
    let ctx = ctx_with(&[("about.txt", "Perl, Smalltalk")]).await;
    let cookie = signed_in_cookie(&ctx.app).await;

    let res = get(&ctx.app, "/about.txt/edit", Some(&cookie)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_string(res).await;
    assert!(body.contains("<textarea"));
    assert!(body.contains("<button type=\"submit\""));
    assert!(body.contains("Perl, Smalltalk"));
}

#[tokio::test]
async fn edit_form_for_missing_document_redirects() {
    let ctx = ctx_with(&[]).await;
    let cookie = signed_in_cookie(&ctx.app).await;

    let res = get(&ctx.app, "/ghost.txt/edit", Some(&cookie)).await;
    assert_redirect_home(&res);
    let body = body_string(get(&ctx.app, "/", Some(&cookie)).await).await;
    assert!(body.contains("ghost.txt does not exist."));
}

#[tokio::test]
async fn update_overwrites_and_flashes() {
    let ctx = ctx_with(&[("test.txt", "old content")]).await;
    let cookie = signed_in_cookie(&ctx.app).await;

    let res = post(
        &ctx.app,
        "/test.txt/edit",
        "content=new+content",
        Some(&cookie),
    )
    .await;
    assert_redirect_home(&res);

    let body = body_string(get(&ctx.app, "/", Some(&cookie)).await).await;
    assert!(body.contains("test.txt has been updated."));

    let res = get(&ctx.app, "/test.txt", Some(&cookie)).await;
    assert!(body_string(res).await.contains("new content"));
}

// ── Deleting ─────────────────────────────────────────────────────────

#[tokio::test]
async fn destroy_removes_and_flashes() {
    let ctx = ctx_with(&[("doomed.txt", "")]).await;
    let cookie = signed_in_cookie(&ctx.app).await;

    let res = post(&ctx.app, "/destroy/doomed.txt", "", Some(&cookie)).await;
    assert_redirect_home(&res);

    let body = body_string(get(&ctx.app, "/", Some(&cookie)).await).await;
    assert!(body.contains("doomed.txt has been successfully deleted."));
    assert!(!body.contains("href=\"/doomed.txt\""));
    assert!(!ctx.store.exists("doomed.txt").await.unwrap());
}

#[tokio::test]
async fn second_destroy_reports_missing() {
    let ctx = ctx_with(&[("doomed.txt", "")]).await;
    let cookie = signed_in_cookie(&ctx.app).await;

    let res = post(&ctx.app, "/destroy/doomed.txt", "", Some(&cookie)).await;
    assert_redirect_home(&res);
    let _ = get(&ctx.app, "/", Some(&cookie)).await;

    let res = post(&ctx.app, "/destroy/doomed.txt", "", Some(&cookie)).await;
    assert_redirect_home(&res);
    let body = body_string(get(&ctx.app, "/", Some(&cookie)).await).await;
    assert!(body.contains("doomed.txt does not exist."));
}

// ── Name hardening ───────────────────────────────────────────────────

#[tokio::test]
async fn traversal_names_are_rejected_without_store_access() {
    let ctx = ctx_with(&[]).await;
    let cookie = signed_in_cookie(&ctx.app).await;
    let _ = get(&ctx.app, "/", Some(&cookie)).await;

    // `%2F` keeps the traversal inside a single path segment.
    let res = get(&ctx.app, "/..%2F..%2Fetc%2Fpasswd", Some(&cookie)).await;
    assert_redirect_home(&res);
    let body = body_string(get(&ctx.app, "/", Some(&cookie)).await).await;
    assert!(body.contains("is not a valid document name."));

    let res = post(&ctx.app, "/destroy/..%2Fusers.json", "", Some(&cookie)).await;
    assert_redirect_home(&res);

    let res = post(&ctx.app, "/create", "new_file=..%2Fescape.txt", Some(&cookie)).await;
    assert_redirect_home(&res);
    assert!(ctx.store.list().await.unwrap().is_empty());
}

// ── Route precedence ─────────────────────────────────────────────────

#[tokio::test]
async fn literal_routes_shadow_documents_with_the_same_name() {
    // A document literally named "new" is shadowed by the form route.
    let ctx = ctx_with(&[("new", "shadowed")]).await;
    let cookie = signed_in_cookie(&ctx.app).await;

    let res = get(&ctx.app, "/new", Some(&cookie)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_string(res).await;
    assert!(body.contains("Add a new document"));
    assert!(!body.contains("shadowed"));
}
