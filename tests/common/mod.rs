//! Helpers shared by the integration tests
#![allow(dead_code)]

use chrono::NaiveDate;

use event_pantry::storage::MemoryStorage;
use event_pantry::store::{shared, EventStore, SharedStorage, StoreOptions, TaskStore};
use event_pantry::{CreateEventRequest, CreateTaskRequest, TaskPriority};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn fresh_storage() -> SharedStorage<MemoryStorage> {
    shared(MemoryStorage::new())
}

pub fn stores(
    storage: &SharedStorage<MemoryStorage>,
) -> (EventStore<MemoryStorage>, TaskStore<MemoryStorage>) {
    (
        EventStore::new(storage.clone()),
        TaskStore::new(storage.clone()),
    )
}

pub fn stores_with_options(
    storage: &SharedStorage<MemoryStorage>,
    options: StoreOptions,
) -> (EventStore<MemoryStorage>, TaskStore<MemoryStorage>) {
    (
        EventStore::with_options(storage.clone(), options.clone()),
        TaskStore::with_options(storage.clone(), options),
    )
}

pub fn day(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

pub fn event_request(title: &str, date: &str, invitees: &[&str]) -> CreateEventRequest {
    CreateEventRequest {
        title: title.to_string(),
        date: day(date),
        time: None,
        location: "Somewhere".to_string(),
        description: format!("Description of {}", title),
        invitees: invitees.iter().map(|email| email.to_string()).collect(),
    }
}

pub fn task_request(
    title: &str,
    event_id: &str,
    due_date: &str,
    priority: TaskPriority,
) -> CreateTaskRequest {
    CreateTaskRequest {
        title: title.to_string(),
        description: format!("Description of {}", title),
        event_id: event_id.to_string(),
        due_date: day(due_date),
        assigned_to: None,
        priority,
    }
}
