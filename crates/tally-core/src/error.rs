//! Error types for the usage tracking core.

/// Errors that can occur in usage tracking operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// SQLite database error
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// General internal error
    #[error("{0}")]
    Internal(String),
}

/// Convenience Result type.
pub type Result<T> = std::result::Result<T, Error>;
