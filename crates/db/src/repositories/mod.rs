use tariffy_core::errors::ApplicationError;
use thiserror::Error;

pub mod history;
pub mod memory;

pub use history::SqlHistoryRepository;
pub use memory::InMemoryHistoryRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("value out of range: {0}")]
    OutOfRange(String),
}

impl From<RepositoryError> for ApplicationError {
    fn from(error: RepositoryError) -> Self {
        ApplicationError::Persistence(error.to_string())
    }
}

/// Caps a caller-supplied limit to something SQLite accepts.
pub(crate) fn clamp_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}
