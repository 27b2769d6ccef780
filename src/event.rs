//! Events and their invitees

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Whether an event still lies in the future.
///
/// This is a pure function of the event date and the current day, recomputed on every read.
/// A persisted value is never trusted: "today" advances, so yesterday's `Upcoming` may well be
/// `Past` by now.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Upcoming,
    Past,
}

impl EventStatus {
    /// Derive the status of an event dated `date`, as seen on `today`
    pub fn derive(date: NaiveDate, today: NaiveDate) -> Self {
        if date >= today {
            EventStatus::Upcoming
        } else {
            EventStatus::Past
        }
    }
}

/// The relationship between an event and the principal the response was built for.
///
/// This is a display value only. It is refreshed against `organizer_id` whenever events are
/// listed for a principal; authorization checks always compare `organizer_id` directly and never
/// consult this field.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventRole {
    Organizer,
    Attendee,
}

/// The requesting principal's own RSVP on an event
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Going,
    Maybe,
    NotGoing,
}

/// The RSVP state of an invited participant
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InviteeStatus {
    Invited,
    Accepted,
    Declined,
}

/// An email-addressed participant attached to an event.
///
/// Invitees are unique by email within an event (the store enforces this on insertion).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invitee {
    pub email: String,
    pub status: InviteeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl Invitee {
    /// A freshly invited participant, not yet linked to a user account
    pub fn invited(email: &str) -> Self {
        Self {
            email: email.to_string(),
            status: InviteeStatus::Invited,
            user_id: None,
        }
    }
}

/// An event record, as persisted in the `app_events` collection.
///
/// Field names serialize in camelCase so that the persisted layout matches what the real backend
/// exchanges.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Opaque unique id, `event_<unix-millis>_<random suffix>`
    pub id: String,
    pub title: String,
    /// The calendar day of the event (`YYYY-MM-DD`)
    pub date: NaiveDate,
    /// An optional free-text clock string, e.g. `"14:00"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    pub location: String,
    pub description: String,
    /// Username of the creating principal. Immutable: it is the single source of truth for every
    /// authorization check on this record.
    pub organizer_id: String,
    pub role: EventRole,
    pub status: EventStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendance_status: Option<AttendanceStatus>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub invitees: Vec<Invitee>,
}

impl Event {
    /// Recompute the derived `status` field against `today`
    pub(crate) fn refresh_status(&mut self, today: NaiveDate) {
        self.status = EventStatus::derive(self.date, today);
    }

    /// Refresh the display `role` field for the principal the response is built for
    pub(crate) fn refresh_role(&mut self, principal: &str) {
        self.role = if self.organizer_id == principal {
            EventRole::Organizer
        } else {
            EventRole::Attendee
        };
    }

    pub fn has_invitee(&self, email: &str) -> bool {
        self.invitees.iter().any(|inv| inv.email == email)
    }
}

/// What a caller provides to create an event; everything else is assigned by the store
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub title: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    /// Plain email addresses; the store lifts them into [`Invitee`] records with status
    /// [`Invited`](InviteeStatus::Invited)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub invitees: Vec<String>,
}
