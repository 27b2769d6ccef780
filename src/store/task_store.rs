//! The task collection

use async_trait::async_trait;
use chrono::Utc;

use super::{load_collection, save_collection, SharedStorage, StoreOptions, TASKS_KEY};
use crate::error::StoreError;
use crate::storage::Storage;
use crate::task::{CreateTaskRequest, Task, TaskPatch, TaskStatus};
use crate::traits::TaskSource;

/// Persistent collection of [`Task`] records, keyed like events but in their own namespace and
/// under their own storage key. Only the creator (`created_by`) may delete a task; updates are
/// not gated in this tier.
#[derive(Debug)]
pub struct TaskStore<S: Storage> {
    storage: SharedStorage<S>,
    options: StoreOptions,
}

impl<S: Storage> Clone for TaskStore<S> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            options: self.options.clone(),
        }
    }
}

impl<S: Storage> TaskStore<S> {
    pub fn new(storage: SharedStorage<S>) -> Self {
        Self::with_options(storage, StoreOptions::default())
    }

    pub fn with_options(storage: SharedStorage<S>, options: StoreOptions) -> Self {
        Self { storage, options }
    }

    /// Every task in the store; this is what the search engine scans
    pub fn list_all(&self) -> Result<Vec<Task>, StoreError> {
        let mut storage = self.storage.lock().unwrap();
        load_collection(&mut *storage, TASKS_KEY)
    }
}

#[async_trait]
impl<S: Storage + Send> TaskSource for TaskStore<S> {
    async fn list_by_event(&self, event_id: &str) -> Result<Vec<Task>, StoreError> {
        self.options.simulate_latency().await;

        // `event_id` is not checked against the event collection: tasks of a deleted (or never
        // existing) event simply come back as an empty list
        let mut tasks = self.list_all()?;
        tasks.retain(|task| task.event_id == event_id);
        Ok(tasks)
    }

    async fn get_by_id(&self, id: &str) -> Result<Task, StoreError> {
        self.options.simulate_latency().await;

        let tasks = self.list_all()?;
        tasks
            .into_iter()
            .find(|task| task.id == id)
            .ok_or(StoreError::NotFound)
    }

    async fn create(
        &self,
        request: CreateTaskRequest,
        principal: &str,
    ) -> Result<Task, StoreError> {
        self.options.simulate_latency().await;

        let now = Utc::now();
        let task = Task {
            id: super::generate_id("task"),
            title: request.title,
            description: request.description,
            event_id: request.event_id,
            due_date: request.due_date,
            status: TaskStatus::Pending,
            assigned_to: request.assigned_to,
            priority: request.priority,
            created_by: principal.to_string(),
            created_at: now,
            updated_at: now,
        };

        let mut storage = self.storage.lock().unwrap();
        let mut tasks: Vec<Task> = load_collection(&mut *storage, TASKS_KEY)?;
        tasks.push(task.clone());
        save_collection(&mut *storage, TASKS_KEY, &tasks)?;
        Ok(task)
    }

    async fn update(&self, id: &str, patch: TaskPatch) -> Result<Task, StoreError> {
        self.options.simulate_latency().await;

        let mut storage = self.storage.lock().unwrap();
        let mut tasks: Vec<Task> = load_collection(&mut *storage, TASKS_KEY)?;
        let task = tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(StoreError::NotFound)?;

        task.apply_patch(patch, Utc::now());
        let updated = task.clone();
        save_collection(&mut *storage, TASKS_KEY, &tasks)?;
        Ok(updated)
    }

    async fn delete(&self, id: &str, principal: &str) -> Result<(), StoreError> {
        self.options.simulate_latency().await;

        let mut storage = self.storage.lock().unwrap();
        let mut tasks: Vec<Task> = load_collection(&mut *storage, TASKS_KEY)?;
        let index = tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or(StoreError::NotFound)?;

        // Only the creator may delete
        if tasks[index].created_by != principal {
            return Err(StoreError::Forbidden);
        }

        tasks.remove(index);
        save_collection(&mut *storage, TASKS_KEY, &tasks)
    }
}
