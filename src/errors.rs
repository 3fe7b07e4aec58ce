//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid track kind: {0}")]
    InvalidTrackKind(String),

    // ---------------------------
    // Timer engine errors
    // ---------------------------
    /// Missing or contradictory input. Never retried, never coerced.
    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    /// The requested transition is impossible for the timer's current state.
    #[error("State conflict: {0}")]
    StateConflict(String),

    #[error("Timer #{0} not found")]
    NotFound(i64),

    #[error("Track #{0} not found")]
    TrackNotFound(i64),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        AppError::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// True for errors a control surface may retry after refreshing its view.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::StateConflict(_))
    }
}

pub type AppResult<T> = Result<T, AppError>;
