//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::RequestError;
use storage::repository::StorageError;

/// Errors emitted by `QuestionSelector`.
///
/// Either variant ends the invocation; no partial selection is ever returned.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SelectionError {
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] RequestError),
    #[error("question source unavailable: {0}")]
    SourceUnavailable(#[from] StorageError),
}
