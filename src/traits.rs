//! The contracts a backend must fulfill
//!
//! The stores in this crate are the *local* implementations of these traits. An HTTP client
//! talking to the real backend would implement the same traits, so an app can hold a
//! `dyn EventSource` and fall back from the remote source to the local one when a call fails.
//! (Falling back is the caller's job: no source retries or substitutes on its own.)

use async_trait::async_trait;

use crate::error::StoreError;
use crate::event::{AttendanceStatus, CreateEventRequest, Event, EventRole};
use crate::identity::Session;
use crate::task::{CreateTaskRequest, Task, TaskPatch};

/// Session management: login, signup, logout.
///
/// `principal` arguments elsewhere in this crate are usernames as returned inside the
/// [`Session`] of a successful `login`/`signup`.
#[async_trait]
pub trait IdentitySource {
    /// Exchange credentials for a session, and persist it as the current one
    async fn login(&self, username: &str, password: &str) -> Result<Session, StoreError>;
    /// Register a new account and open a session for it
    async fn signup(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Session, StoreError>;
    /// The persisted session, if any
    async fn current_session(&self) -> Result<Option<Session>, StoreError>;
    /// Drop the persisted session. Logging out twice is a no-op.
    async fn logout(&self) -> Result<(), StoreError>;
}

/// The event collection: CRUD, role-based listing, RSVPs and invitee management.
///
/// Mutating operations are organizer-gated: only the principal whose username equals the record's
/// `organizer_id` may delete an event or edit its invitee list.
#[async_trait]
pub trait EventSource {
    /// List the events the principal organizes, or the ones it is invited to.
    /// The derived `status` field is recomputed for every returned record.
    async fn list_by_role(&self, role: EventRole, principal: &str)
        -> Result<Vec<Event>, StoreError>;
    async fn get_by_id(&self, id: &str) -> Result<Event, StoreError>;
    async fn create(&self, request: CreateEventRequest, principal: &str)
        -> Result<Event, StoreError>;
    async fn delete(&self, id: &str, principal: &str) -> Result<(), StoreError>;
    /// Record the principal's own RSVP on the event
    async fn update_attendance(
        &self,
        id: &str,
        status: AttendanceStatus,
        principal: &str,
    ) -> Result<(), StoreError>;
    async fn add_invitee(&self, id: &str, email: &str, principal: &str)
        -> Result<(), StoreError>;
    /// Removing an email that is not in the invitee list is a no-op success
    async fn remove_invitee(
        &self,
        id: &str,
        email: &str,
        principal: &str,
    ) -> Result<(), StoreError>;
}

/// The task collection. Deletion is creator-gated (`created_by`).
#[async_trait]
pub trait TaskSource {
    async fn list_by_event(&self, event_id: &str) -> Result<Vec<Task>, StoreError>;
    async fn get_by_id(&self, id: &str) -> Result<Task, StoreError>;
    async fn create(&self, request: CreateTaskRequest, principal: &str)
        -> Result<Task, StoreError>;
    /// Shallow-merge `patch` over the record and refresh its `updated_at`
    async fn update(&self, id: &str, patch: TaskPatch) -> Result<Task, StoreError>;
    async fn delete(&self, id: &str, principal: &str) -> Result<(), StoreError>;
}
