//! Sample data for demos and manual testing

use chrono::{Duration, NaiveDate, Utc};

use crate::error::StoreError;
use crate::event::{AttendanceStatus, Event, EventRole, EventStatus, Invitee};
use crate::storage::Storage;
use crate::store::{self, SharedStorage};

/// The calendar date `days` from now
pub fn days_from_now(days: i64) -> NaiveDate {
    Utc::now().date_naive() + Duration::days(days)
}

/// The calendar date `days` ago
pub fn days_ago(days: i64) -> NaiveDate {
    Utc::now().date_naive() - Duration::days(days)
}

/// The demo events: three upcoming and one past, with mixed organizers so that both role listings
/// have something to show for the `demo_user` principal
pub fn sample_events() -> Vec<Event> {
    let today = Utc::now().date_naive();
    let event = |title: &str,
                 date: NaiveDate,
                 time: &str,
                 location: &str,
                 description: &str,
                 organizer_id: &str,
                 role: EventRole| Event {
        id: store::generate_id("event"),
        title: title.to_string(),
        date,
        time: Some(time.to_string()),
        location: location.to_string(),
        description: description.to_string(),
        organizer_id: organizer_id.to_string(),
        role,
        status: EventStatus::derive(date, today),
        attendance_status: None,
        invitees: Vec::new(),
    };

    let mut workshop = event(
        "Team Building Workshop",
        days_from_now(5),
        "14:00",
        "Conference Room A",
        "Interactive team building activities and group exercises",
        "demo_user",
        EventRole::Organizer,
    );
    workshop.invitees = vec![
        Invitee::invited("colleague1@example.com"),
        Invitee::invited("colleague2@example.com"),
    ];

    let kickoff = event(
        "Project Kickoff Meeting",
        days_from_now(10),
        "10:00",
        "Virtual - Zoom",
        "Kickoff meeting for the new Q1 project initiative",
        "demo_user",
        EventRole::Organizer,
    );

    let mut retreat = event(
        "Annual Company Retreat",
        days_from_now(30),
        "09:00",
        "Mountain Resort, Lake Tahoe",
        "Three-day company retreat with team activities and relaxation",
        "hr_manager",
        EventRole::Attendee,
    );
    retreat.attendance_status = Some(AttendanceStatus::Going);

    let presentation = event(
        "Client Presentation",
        days_ago(5),
        "15:00",
        "Client Office",
        "Q4 Results presentation to key stakeholders",
        "demo_user",
        EventRole::Organizer,
    );

    vec![workshop, kickoff, retreat, presentation]
}

/// Write the sample events, but only if the event collection is empty.
/// Returns whether seeding happened.
pub fn seed_if_empty<S: Storage>(storage: &SharedStorage<S>) -> Result<bool, StoreError> {
    let mut storage = storage.lock().unwrap();
    let existing: Vec<Event> = store::load_collection(&mut *storage, store::EVENTS_KEY)?;
    if !existing.is_empty() {
        return Ok(false);
    }

    log::debug!("Seeding sample events");
    store::save_collection(&mut *storage, store::EVENTS_KEY, &sample_events())?;
    Ok(true)
}

/// Wipe the three storage keys this crate uses (events, tasks, session)
pub fn clear_all_data<S: Storage>(storage: &SharedStorage<S>) -> Result<(), StoreError> {
    let mut storage = storage.lock().unwrap();
    storage.remove(store::EVENTS_KEY)?;
    storage.remove(store::TASKS_KEY)?;
    storage.remove(store::CURRENT_USER_KEY)?;
    Ok(())
}
