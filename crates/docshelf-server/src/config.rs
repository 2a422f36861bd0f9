//! Server configuration for Docshelf.
//!
//! Loads configuration from environment variables with sensible
//! defaults. All settings can be overridden via `DOCSHELF_*` variables;
//! the data directory is environment-dependent so tests and deploys can
//! point the store anywhere.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    pub bind_addr: SocketAddr,
    /// Directory holding the document files.
    pub data_dir: PathBuf,
    /// Path to the JSON credential file (username → bcrypt hash).
    pub users_file: PathBuf,
    /// Log level filter (e.g., `info`, `debug`, `warn`).
    pub log_level: String,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PORT` — port to bind on (cloud convention, binds to `0.0.0.0`)
    /// - `DOCSHELF_BIND_ADDR` — full bind address (overrides `PORT`, default: `127.0.0.1:8080`)
    /// - `DOCSHELF_DATA_DIR` — document directory (default: `./data`)
    /// - `DOCSHELF_USERS_FILE` — credential file path (default: `./users.json`)
    /// - `DOCSHELF_LOG_LEVEL` — log filter (default: `info`)
    #[must_use]
    pub fn from_env() -> Self {
        // Priority: DOCSHELF_BIND_ADDR > PORT > default 127.0.0.1:8080
        let bind_addr = if let Ok(addr) = std::env::var("DOCSHELF_BIND_ADDR") {
            addr.parse()
                .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], 8080)))
        } else if let Ok(port_str) = std::env::var("PORT") {
            let port: u16 = port_str.parse().unwrap_or(8080);
            SocketAddr::from(([0, 0, 0, 0], port))
        } else {
            SocketAddr::from(([127, 0, 0, 1], 8080))
        };

        let data_dir = std::env::var("DOCSHELF_DATA_DIR")
            .unwrap_or_else(|_| "./data".to_owned())
            .into();

        let users_file = std::env::var("DOCSHELF_USERS_FILE")
            .unwrap_or_else(|_| "./users.json".to_owned())
            .into();

        let log_level = std::env::var("DOCSHELF_LOG_LEVEL").unwrap_or_else(|_| "info".to_owned());

        Self {
            bind_addr,
            data_dir,
            users_file,
            log_level,
        }
    }
}
