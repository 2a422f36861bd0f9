//! Docshelf HTTP server.
//!
//! Wires the core library and document store into a running Axum
//! server: HTML pages for browsing and editing documents, a sign-in
//! gate for mutating operations, and cookie-backed sessions with flash
//! messages.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod templates;
