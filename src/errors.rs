use thiserror::Error;

/// All failure classes surfaced by this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed during bootstrap.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Local pre-store validation failed; the store was never contacted.
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// A mutation targeted a row that does not exist.
    #[error("{entity} with id {id} was not found")]
    NotFound { entity: &'static str, id: i64 },

    /// A delete would strand rows that still reference the target.
    #[error("Referential integrity violation: {message}")]
    ReferentialIntegrity { message: String },

    /// The session's role does not permit the attempted operation.
    #[error("Role does not permit this operation: {action}")]
    Forbidden { action: &'static str },

    /// A second edit workflow was requested while one is still open.
    #[error("Another edit dialog is already open; close it first")]
    EditInProgress,

    /// Store-level failure, carrying the driver diagnostic.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Filesystem failure outside the best-effort photo cleanup paths.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
