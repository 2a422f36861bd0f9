//! Error types for `docshelf-core`.
//!
//! Each variant carries enough context to diagnose the problem without
//! a debugger. Credential errors never include password material — only
//! the file path and the underlying reason.

/// Errors from loading the credential file.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    /// The credential file could not be read.
    #[error("failed to read credential file '{path}': {reason}")]
    Read { path: String, reason: String },

    /// The credential file is not a valid username → hash mapping.
    #[error("failed to parse credential file '{path}': {reason}")]
    Parse { path: String, reason: String },
}
