//! Error type shared by all generators.
//!
//! Fatal variants abort a whole run; per-file problems inside the compilers
//! are collected as [`crate::compile::Rejection`]s instead so the remaining
//! files still compile.

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid glob pattern: {0}")]
    Glob(#[from] globset::Error),

    #[error("source not found: {}", .0.display())]
    MissingSource(PathBuf),

    #[error("{}: malformed documentation input: {reason}", .path.display())]
    MalformedDocs { path: PathBuf, reason: String },

    #[error("{}: not found (run `refgen extract` first)", .path.display())]
    MissingTable { path: PathBuf },

    #[error("{file}: missing required header key @{key}")]
    MissingKey { file: String, key: &'static str },

    #[error("{file}: missing required field `{field}`")]
    MissingField { file: String, field: &'static str },

    #[error("{file}: no code after the header block")]
    EmptyBody { file: String },

    #[error("{file}: invalid YAML: {message}")]
    InvalidYaml { file: String, message: String },

    #[error("{file}: {line}: not a JSON object")]
    InvalidRecord { file: String, line: usize },

    #[error("duplicate identifier {id:?} in {file} (already defined by {first})")]
    DuplicateId {
        id: String,
        file: String,
        first: String,
    },

    #[error("overlay token {token:?} not present in {}", .path.display())]
    UnknownToken { token: String, path: PathBuf },

    #[error("overlay token {token:?}: rewrites must be an array of strings")]
    InvalidOverlay { token: String },
}
