//! The durable key-value substrate the stores persist into
//!
//! The original environment for this layer is a browser-wide `localStorage` global. Depending on
//! a global makes the stores untestable, so this module inverts the dependency: stores are
//! generic over the [`Storage`] trait, and callers inject a concrete backend ([`FileStorage`] for
//! real use, [`MemoryStorage`] for tests and short-lived embedding, [`FlakyStorage`] to rehearse
//! failure handling).

use std::path::PathBuf;

use thiserror::Error;

mod memory;
pub use memory::MemoryStorage;
mod file;
pub use file::FileStorage;
mod flaky;
pub use flaky::FlakyStorage;

/// A persistent string-to-string map.
///
/// Whole collections are serialized under a single key on every write, so implementations do not
/// need any notion of records, only opaque values. An absent key is not an error: it reads as
/// `None`, and the stores treat it as an empty collection.
pub trait Storage {
    /// Returns the value stored under `key`, or `None` if the key was never set (or was removed)
    fn get(&mut self, key: &str) -> Result<Option<String>, StorageError>;
    /// Stores `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    /// Removes `key`. Removing an absent key is a no-op.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Errors raised by a storage backend
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing file could not be read or written
    #[error("Unable to access backing file {path:?}: {source}")]
    BackingFile {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The storage contents could not be (de)serialized
    #[error("Unable to serialize storage contents: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A failure injected by [`FlakyStorage`]
    #[error("Injected fault during {0}")]
    InjectedFault(&'static str),
}
