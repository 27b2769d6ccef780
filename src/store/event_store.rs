//! The event collection

use async_trait::async_trait;
use chrono::Utc;

use super::{
    load_collection, save_collection, AttendeeMatch, SharedStorage, StoreOptions, EVENTS_KEY,
};
use crate::error::StoreError;
use crate::event::{AttendanceStatus, CreateEventRequest, Event, EventRole, Invitee};
use crate::storage::Storage;
use crate::traits::EventSource;

/// Persistent collection of [`Event`] records.
///
/// Every operation reads the whole collection from storage, applies its change, and writes the
/// whole collection back. Authorization relies on `organizer_id` equality only; the stored `role`
/// field is refreshed to a display value when events are listed for a principal, and never
/// consulted for gating.
#[derive(Debug)]
pub struct EventStore<S: Storage> {
    storage: SharedStorage<S>,
    options: StoreOptions,
}

// Not derived: cloning a store only clones the shared handle, `S` itself needs not be `Clone`
impl<S: Storage> Clone for EventStore<S> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            options: self.options.clone(),
        }
    }
}

/// The legacy "is this principal invited" test (see [`AttendeeMatch`]).
///
/// In its loose form, an invitee email merely containing the username counts, and so does a
/// stored `role` of attendee left over from the record's origin.
pub(crate) fn is_attendee(event: &Event, principal: &str, mode: AttendeeMatch) -> bool {
    if event.organizer_id == principal {
        return false;
    }
    match mode {
        AttendeeMatch::Loose => {
            event.invitees.iter().any(|inv| inv.email.contains(principal))
                || event.role == EventRole::Attendee
        }
        AttendeeMatch::Exact => event.invitees.iter().any(|inv| inv.email == principal),
    }
}

impl<S: Storage> EventStore<S> {
    pub fn new(storage: SharedStorage<S>) -> Self {
        Self::with_options(storage, StoreOptions::default())
    }

    pub fn with_options(storage: SharedStorage<S>, options: StoreOptions) -> Self {
        Self { storage, options }
    }

    pub(crate) fn options(&self) -> &StoreOptions {
        &self.options
    }

    /// Every event in the store, with the derived `status` recomputed.
    /// This is what the search engine scans; regular listing goes through
    /// [`list_by_role`](EventSource::list_by_role).
    pub fn list_all(&self) -> Result<Vec<Event>, StoreError> {
        let mut storage = self.storage.lock().unwrap();
        let mut events: Vec<Event> = load_collection(&mut *storage, EVENTS_KEY)?;
        let today = Utc::now().date_naive();
        for event in events.iter_mut() {
            event.refresh_status(today);
        }
        Ok(events)
    }
}

#[async_trait]
impl<S: Storage + Send> EventSource for EventStore<S> {
    async fn list_by_role(
        &self,
        role: EventRole,
        principal: &str,
    ) -> Result<Vec<Event>, StoreError> {
        self.options.simulate_latency().await;

        // The attendee test below reads the stored `role` field, so filter first and only then
        // refresh `role` to the display value for this principal
        let mut events = self.list_all()?;
        events.retain(|event| match role {
            EventRole::Organizer => event.organizer_id == principal,
            EventRole::Attendee => is_attendee(event, principal, self.options.attendee_match),
        });
        for event in events.iter_mut() {
            event.refresh_role(principal);
        }
        Ok(events)
    }

    async fn get_by_id(&self, id: &str) -> Result<Event, StoreError> {
        self.options.simulate_latency().await;

        let mut storage = self.storage.lock().unwrap();
        let mut events: Vec<Event> = load_collection(&mut *storage, EVENTS_KEY)?;
        let event = events
            .iter_mut()
            .find(|event| event.id == id)
            .ok_or(StoreError::NotFound)?;
        event.refresh_status(Utc::now().date_naive());
        Ok(event.clone())
    }

    async fn create(
        &self,
        request: CreateEventRequest,
        principal: &str,
    ) -> Result<Event, StoreError> {
        self.options.simulate_latency().await;

        // Collapse duplicate request emails: the invitee list is unique by email
        let mut invitees: Vec<Invitee> = Vec::new();
        for email in &request.invitees {
            if !invitees.iter().any(|inv| &inv.email == email) {
                invitees.push(Invitee::invited(email));
            }
        }

        let event = Event {
            id: super::generate_id("event"),
            title: request.title,
            date: request.date,
            time: request.time,
            location: request.location,
            description: request.description,
            organizer_id: principal.to_string(),
            role: EventRole::Organizer,
            status: crate::event::EventStatus::derive(request.date, Utc::now().date_naive()),
            attendance_status: None,
            invitees,
        };

        let mut storage = self.storage.lock().unwrap();
        let mut events: Vec<Event> = load_collection(&mut *storage, EVENTS_KEY)?;
        events.push(event.clone());
        save_collection(&mut *storage, EVENTS_KEY, &events)?;
        Ok(event)
    }

    async fn delete(&self, id: &str, principal: &str) -> Result<(), StoreError> {
        self.options.simulate_latency().await;

        let mut storage = self.storage.lock().unwrap();
        let mut events: Vec<Event> = load_collection(&mut *storage, EVENTS_KEY)?;
        let index = events
            .iter()
            .position(|event| event.id == id)
            .ok_or(StoreError::NotFound)?;

        // Only the organizer may delete
        if events[index].organizer_id != principal {
            return Err(StoreError::Forbidden);
        }

        events.remove(index);
        save_collection(&mut *storage, EVENTS_KEY, &events)
    }

    async fn update_attendance(
        &self,
        id: &str,
        status: AttendanceStatus,
        // This models the requesting principal's own RSVP: the invitee list is left alone, this
        // tier does not try to locate the principal inside it
        _principal: &str,
    ) -> Result<(), StoreError> {
        self.options.simulate_latency().await;

        let mut storage = self.storage.lock().unwrap();
        let mut events: Vec<Event> = load_collection(&mut *storage, EVENTS_KEY)?;
        let event = events
            .iter_mut()
            .find(|event| event.id == id)
            .ok_or(StoreError::NotFound)?;
        event.attendance_status = Some(status);
        save_collection(&mut *storage, EVENTS_KEY, &events)
    }

    async fn add_invitee(&self, id: &str, email: &str, principal: &str) -> Result<(), StoreError> {
        self.options.simulate_latency().await;

        let mut storage = self.storage.lock().unwrap();
        let mut events: Vec<Event> = load_collection(&mut *storage, EVENTS_KEY)?;
        let event = events
            .iter_mut()
            .find(|event| event.id == id)
            .ok_or(StoreError::NotFound)?;

        if event.organizer_id != principal {
            return Err(StoreError::Forbidden);
        }
        if event.has_invitee(email) {
            return Err(StoreError::Conflict(format!("invitee {} already exists", email)));
        }

        event.invitees.push(Invitee::invited(email));
        save_collection(&mut *storage, EVENTS_KEY, &events)
    }

    async fn remove_invitee(
        &self,
        id: &str,
        email: &str,
        principal: &str,
    ) -> Result<(), StoreError> {
        self.options.simulate_latency().await;

        let mut storage = self.storage.lock().unwrap();
        let mut events: Vec<Event> = load_collection(&mut *storage, EVENTS_KEY)?;
        let event = events
            .iter_mut()
            .find(|event| event.id == id)
            .ok_or(StoreError::NotFound)?;

        if event.organizer_id != principal {
            return Err(StoreError::Forbidden);
        }

        // Removing an email that was never invited is a no-op success
        event.invitees.retain(|inv| inv.email != email);
        save_collection(&mut *storage, EVENTS_KEY, &events)
    }
}
