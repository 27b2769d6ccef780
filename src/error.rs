//! The failure channel of every store operation

use thiserror::Error;

use crate::storage::StorageError;

/// Errors raised by the stores during their read-modify-write step.
///
/// These are surfaced through the async result of every operation, never as panics: the caller is
/// expected to branch on the kind (e.g. display a message on [`Forbidden`](StoreError::Forbidden),
/// retry later on [`Storage`](StoreError::Storage)). No error is fatal, every operation stays
/// independently retryable.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The referenced id does not exist in the collection
    #[error("Record not found")]
    NotFound,

    /// The acting principal is not the owner (organizer or creator) of the record
    #[error("Operation restricted to the record owner")]
    Forbidden,

    /// The mutation would introduce a duplicate (e.g. an invitee email already present)
    #[error("Duplicate entry: {0}")]
    Conflict(String),

    /// The request shape is malformed (e.g. empty credentials)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The backing storage failed
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
