//! The local stores backing the fallback path
//!
//! Each store owns a handle to a shared [`Storage`] and persists its whole collection under a
//! fixed key on every write. Operations are async and single-shot: they optionally sleep to
//! emulate network latency, then perform their complete read-modify-write before returning, so
//! no interleaving can tear a write as long as the storage handle is shared through the same
//! `Arc<Mutex<_>>`.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::error::StoreError;
use crate::storage::{Storage, StorageError};

mod identity_store;
pub use identity_store::IdentityStore;
pub(crate) mod event_store;
pub use event_store::EventStore;
mod task_store;
pub use task_store::TaskStore;

/// The storage key holding the JSON array of events
pub const EVENTS_KEY: &str = "app_events";
/// The storage key holding the JSON array of tasks
pub const TASKS_KEY: &str = "app_tasks";
/// The storage key holding the current session
pub const CURRENT_USER_KEY: &str = "app_current_user";

/// A storage handle that can be shared between several stores (and the search engine), the same
/// way every browser tab shares the one `localStorage`
pub type SharedStorage<S> = Arc<Mutex<S>>;

/// Wrap a storage backend so it can be handed to several stores
pub fn shared<S: Storage>(storage: S) -> SharedStorage<S> {
    Arc::new(Mutex::new(storage))
}

/// How the event store decides that a principal is "invited" to an event, when listing events by
/// the attendee role (and when search filters by that role).
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum AttendeeMatch {
    /// An invitee email merely *containing* the principal's username counts as a match.
    /// This is the historical behaviour of this layer (usernames are not emails, so an exact
    /// comparison would rarely match); kept as the default until the backend contract settles.
    Loose,
    /// Only an invitee email exactly equal to the principal counts
    Exact,
}

/// Tuning knobs shared by all stores
#[derive(Clone, Debug)]
pub struct StoreOptions {
    /// Sleep this long before each operation, to emulate the latency of a network round-trip.
    /// `None` resolves immediately.
    pub latency: Option<Duration>,
    pub attendee_match: AttendeeMatch,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            latency: *crate::config::DEFAULT_LATENCY.lock().unwrap(),
            attendee_match: AttendeeMatch::Loose,
        }
    }
}

impl StoreOptions {
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn with_attendee_match(mut self, attendee_match: AttendeeMatch) -> Self {
        self.attendee_match = attendee_match;
        self
    }

    pub(crate) async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

/// Generate a collision-resistant record id, e.g. `event_1700000000000_a1b2c3d4e`
pub(crate) fn generate_id(prefix: &str) -> String {
    let suffix = Uuid::new_v4().to_simple().to_string();
    format!(
        "{}_{}_{}",
        prefix,
        Utc::now().timestamp_millis(),
        &suffix[..9]
    )
}

/// Generate an opaque session token
pub(crate) fn generate_token(username: &str) -> String {
    format!("local_token_{}_{}", username, Utc::now().timestamp_millis())
}

/// Read a whole collection from `key`.
///
/// An absent key is an empty collection; so is an unparseable payload (with a logged warning),
/// since there is no schema versioning to migrate it with.
pub(crate) fn load_collection<S, T>(storage: &mut S, key: &str) -> Result<Vec<T>, StoreError>
where
    S: Storage,
    T: DeserializeOwned,
{
    match storage.get(key)? {
        None => Ok(Vec::new()),
        Some(raw) => match serde_json::from_str(&raw) {
            Ok(items) => Ok(items),
            Err(err) => {
                log::warn!("Unparseable collection under {:?} ({}), treating it as empty", key, err);
                Ok(Vec::new())
            }
        },
    }
}

/// Serialize a whole collection under `key`
pub(crate) fn save_collection<S, T>(storage: &mut S, key: &str, items: &[T]) -> Result<(), StoreError>
where
    S: Storage,
    T: Serialize,
{
    let raw = serde_json::to_string(items).map_err(StorageError::from)?;
    storage.set(key, &raw)?;
    Ok(())
}
