//! This crate provides a local fallback persistence layer for event-planner applications.
//!
//! An app usually talks to its real backend over HTTP. When that backend is unreachable (or
//! disabled during development), the app can fall back to the stores in this crate, which mimic
//! the backend on top of a durable key-value [`Storage`](storage::Storage): every operation is
//! asynchronous, resolves exactly once, and can simulate network latency.
//!
//! Three stores cover the data model:
//! * an [`IdentityStore`](store::IdentityStore) for the current session,
//! * an [`EventStore`](store::EventStore) for events and their invitees,
//! * a [`TaskStore`](store::TaskStore) for the tasks attached to events.
//!
//! The [`SearchEngine`](search::SearchEngine) composes read-only, multi-field filtering over the
//! event and task collections.
//!
//! The contracts these stores fulfill are described by the traits in [`traits`]; a real backend
//! client would implement the same traits, so that callers can swap one source for the other.

pub mod traits;

mod error;
pub use error::StoreError;

mod identity;
pub use identity::{Principal, Session};
mod event;
pub use event::{
    AttendanceStatus, CreateEventRequest, Event, EventRole, EventStatus, Invitee, InviteeStatus,
};
mod task;
pub use task::{CreateTaskRequest, Task, TaskPatch, TaskPriority, TaskStatus};

pub mod storage;
pub mod store;
pub use store::{EventStore, IdentityStore, TaskStore};
pub mod search;
pub use search::{SearchEngine, SearchFilter, SearchResults};

pub mod config;
pub mod seed;
