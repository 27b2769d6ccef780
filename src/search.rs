//! Multi-field filtering across the event and task collections
//!
//! The engine composes read-only scans over an [`EventStore`] and a [`TaskStore`]; it never
//! mutates either collection. All filters are AND-combined, and an absent filter is a
//! pass-through.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::event::{Event, EventStatus};
use crate::storage::Storage;
use crate::store::event_store::is_attendee;
use crate::store::{AttendeeMatch, EventStore, TaskStore};
use crate::task::{Task, TaskPriority, TaskStatus};

/// Which relationship to the acting principal a record must have to pass the role filter.
///
/// `Organizer` and `Attendee` apply to events, `Assignee` applies to tasks; a record of the other
/// kind never passes those variants. `All` passes everything.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchRole {
    Organizer,
    Attendee,
    Assignee,
    All,
}

/// Which collections to scan
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    Events,
    Tasks,
    All,
}

impl Default for SearchType {
    fn default() -> Self {
        SearchType::All
    }
}

/// A filter specification. Every field is optional (empty sets pass everything through).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchFilter {
    /// Case-insensitive substring match against title and description (and location, for events)
    pub keyword: Option<String>,
    /// Inclusive lower bound on the event date / task due date
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound on the event date / task due date
    pub date_to: Option<NaiveDate>,
    pub role: Option<SearchRole>,
    pub event_status: Vec<EventStatus>,
    pub task_status: Vec<TaskStatus>,
    pub priority: Vec<TaskPriority>,
    pub search_type: SearchType,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

/// The combined, counted result set.
///
/// `total_count` always reflects the full filtered set: pagination (`limit`/`offset`) is applied
/// to the returned vectors only after counting.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub events: Vec<Event>,
    pub tasks: Vec<Task>,
    pub total_count: usize,
}

fn keyword_matches(keyword: &str, haystacks: &[&str]) -> bool {
    let keyword = keyword.to_lowercase();
    haystacks
        .iter()
        .any(|text| text.to_lowercase().contains(&keyword))
}

fn event_matches(
    event: &Event,
    filter: &SearchFilter,
    principal: &str,
    mode: AttendeeMatch,
) -> bool {
    if let Some(keyword) = &filter.keyword {
        if !keyword_matches(keyword, &[&event.title, &event.description, &event.location]) {
            return false;
        }
    }
    if let Some(from) = filter.date_from {
        if event.date < from {
            return false;
        }
    }
    if let Some(to) = filter.date_to {
        if event.date > to {
            return false;
        }
    }
    match filter.role {
        None | Some(SearchRole::All) => {}
        Some(SearchRole::Organizer) => {
            if event.organizer_id != principal {
                return false;
            }
        }
        Some(SearchRole::Attendee) => {
            if !is_attendee(event, principal, mode) {
                return false;
            }
        }
        // Assignment only exists on tasks
        Some(SearchRole::Assignee) => return false,
    }
    if !filter.event_status.is_empty() && !filter.event_status.contains(&event.status) {
        return false;
    }
    true
}

fn task_matches(task: &Task, filter: &SearchFilter, principal: &str) -> bool {
    if let Some(keyword) = &filter.keyword {
        if !keyword_matches(keyword, &[&task.title, &task.description]) {
            return false;
        }
    }
    if let Some(from) = filter.date_from {
        if task.due_date < from {
            return false;
        }
    }
    if let Some(to) = filter.date_to {
        if task.due_date > to {
            return false;
        }
    }
    match filter.role {
        None | Some(SearchRole::All) => {}
        Some(SearchRole::Assignee) => {
            if task.assigned_to.as_deref() != Some(principal) {
                return false;
            }
        }
        // Organizing/attending only exist on events
        Some(SearchRole::Organizer) | Some(SearchRole::Attendee) => return false,
    }
    if !filter.task_status.is_empty() && !filter.task_status.contains(&task.status) {
        return false;
    }
    if !filter.priority.is_empty() && !filter.priority.contains(&task.priority) {
        return false;
    }
    true
}

fn paginate<T>(items: Vec<T>, filter: &SearchFilter) -> Vec<T> {
    let offset = filter.offset.unwrap_or(0);
    let limit = filter.limit.unwrap_or(usize::MAX);
    items.into_iter().skip(offset).take(limit).collect()
}

/// Scans the event and task stores and returns a combined, filtered, counted result set
#[derive(Debug)]
pub struct SearchEngine<S: Storage> {
    events: EventStore<S>,
    tasks: TaskStore<S>,
}

impl<S: Storage> Clone for SearchEngine<S> {
    fn clone(&self) -> Self {
        Self {
            events: self.events.clone(),
            tasks: self.tasks.clone(),
        }
    }
}

impl<S: Storage> SearchEngine<S> {
    /// Build an engine over the two stores. Both are expected to share the same storage handle,
    /// like every store of one app does.
    pub fn new(events: EventStore<S>, tasks: TaskStore<S>) -> Self {
        Self { events, tasks }
    }

    /// Run `filter` on behalf of `principal`
    pub async fn search(
        &self,
        filter: &SearchFilter,
        principal: &str,
    ) -> Result<SearchResults, StoreError> {
        self.events.options().simulate_latency().await;
        let mode = self.events.options().attendee_match;

        let mut events = Vec::new();
        if filter.search_type != SearchType::Tasks {
            events = self.events.list_all()?;
            events.retain(|event| event_matches(event, filter, principal, mode));
            for event in events.iter_mut() {
                event.refresh_role(principal);
            }
        }

        let mut tasks = Vec::new();
        if filter.search_type != SearchType::Events {
            tasks = self.tasks.list_all()?;
            tasks.retain(|task| task_matches(task, filter, principal));
        }

        // Count the full filtered set before paginating
        let total_count = events.len() + tasks.len();
        Ok(SearchResults {
            events: paginate(events, filter),
            tasks: paginate(tasks, filter),
            total_count,
        })
    }
}
