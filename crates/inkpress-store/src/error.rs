//! Store error types.

use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by the persistence layer.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0} already exists")]
    Conflict(&'static str),

    #[error("Password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("Migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Map a sqlx error to [`StoreError::Conflict`] when it is a unique
    /// constraint violation, naming the conflicting resource.
    pub fn on_conflict(resource: &'static str) -> impl FnOnce(sqlx::Error) -> StoreError {
        move |err| {
            if is_unique_violation(&err) {
                StoreError::Conflict(resource)
            } else {
                StoreError::Database(err)
            }
        }
    }

    /// Map a sqlx error to [`StoreError::NotFound`] when it is a foreign
    /// key violation, naming the missing referenced resource.
    pub fn on_missing(resource: &'static str) -> impl FnOnce(sqlx::Error) -> StoreError {
        move |err| {
            if is_foreign_key_violation(&err) {
                StoreError::NotFound(resource)
            } else {
                StoreError::Database(err)
            }
        }
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_foreign_key_violation())
}
