//! Unified application error type.
//! All modules (store, repo, audit, cli) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // Validation
    // ---------------------------
    #[error("A worker with email '{0}' already exists")]
    DuplicateEmail(String),

    #[error("A rubro named '{0}' already exists")]
    DuplicateName(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid hours value: {0}")]
    InvalidHours(f64),

    #[error("Invalid year: {0}")]
    InvalidYear(i32),

    #[error("Invalid worker status: {0}")]
    InvalidStatus(String),

    // ---------------------------
    // Lookup
    // ---------------------------
    #[error("No {kind} found with id {id}")]
    NotFound { kind: &'static str, id: i64 },

    // ---------------------------
    // Storage
    // ---------------------------
    #[error("Collection '{collection}' is corrupt and cannot be parsed: {detail}")]
    StorageCorrupt { collection: String, detail: String },

    #[error("Failed to write collection '{collection}': {source}")]
    StorageWrite {
        collection: String,
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// True for errors the caller can recover from by correcting its input.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AppError::DuplicateEmail(_)
                | AppError::DuplicateName(_)
                | AppError::MissingField(_)
                | AppError::InvalidHours(_)
                | AppError::InvalidYear(_)
                | AppError::InvalidStatus(_)
        )
    }
}

pub type AppResult<T> = Result<T, AppError>;
