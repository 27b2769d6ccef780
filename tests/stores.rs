//! Integration tests for the identity, event and task stores

mod common;

use event_pantry::storage::{FlakyStorage, MemoryStorage};
use event_pantry::store::{shared, AttendeeMatch, EventStore, IdentityStore, StoreOptions, TaskStore};
use event_pantry::traits::{EventSource, IdentitySource, TaskSource};
use event_pantry::{AttendanceStatus, EventRole, EventStatus, InviteeStatus, StoreError, TaskPriority, TaskStatus};

#[tokio::test]
async fn login_opens_and_logout_closes_a_session() {
    common::init_logging();
    let storage = common::fresh_storage();
    let identity = IdentityStore::new(storage.clone());

    assert!(!identity.is_logged_in().unwrap());

    let session = identity.login("alice", "hunter2").await.unwrap();
    assert_eq!(session.principal.username, "alice");
    assert_eq!(session.principal.email.as_deref(), Some("alice@example.com"));
    assert!(session.token.starts_with("local_token_alice_"));

    assert!(identity.is_logged_in().unwrap());
    assert_eq!(identity.token().unwrap(), Some(session.token.clone()));
    assert_eq!(identity.current_session().await.unwrap(), Some(session));

    identity.logout().await.unwrap();
    assert!(!identity.is_logged_in().unwrap());
    // Logging out twice is a no-op
    identity.logout().await.unwrap();
}

#[tokio::test]
async fn signup_echoes_the_given_identity() {
    common::init_logging();
    let identity = IdentityStore::new(common::fresh_storage());

    let session = identity.signup("carol", "carol@corp.org", "pw").await.unwrap();
    assert_eq!(session.principal.username, "carol");
    assert_eq!(session.principal.email.as_deref(), Some("carol@corp.org"));
    assert!(identity.is_logged_in().unwrap());
}

#[tokio::test]
async fn malformed_credentials_are_rejected() {
    common::init_logging();
    let identity = IdentityStore::new(common::fresh_storage());

    assert!(matches!(
        identity.login("", "pw").await,
        Err(StoreError::InvalidInput(_))
    ));
    assert!(matches!(
        identity.login("alice", "").await,
        Err(StoreError::InvalidInput(_))
    ));
    assert!(matches!(
        identity.signup("", "a@x.com", "pw").await,
        Err(StoreError::InvalidInput(_))
    ));
    assert!(!identity.is_logged_in().unwrap());
}

#[tokio::test]
async fn created_events_round_trip_through_the_store() {
    common::init_logging();
    let (events, _) = common::stores(&common::fresh_storage());

    let created = events
        .create(common::event_request("Standup", "2099-01-01", &["a@x.com"]), "alice")
        .await
        .unwrap();

    assert!(created.id.starts_with("event_"));
    assert_eq!(created.organizer_id, "alice");
    assert_eq!(created.role, EventRole::Organizer);
    assert_eq!(created.status, EventStatus::Upcoming);
    assert_eq!(created.invitees.len(), 1);
    assert_eq!(created.invitees[0].email, "a@x.com");
    assert_eq!(created.invitees[0].status, InviteeStatus::Invited);
    assert_eq!(created.attendance_status, None);

    let fetched = events.get_by_id(&created.id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn event_ids_are_unique() {
    common::init_logging();
    let (events, _) = common::stores(&common::fresh_storage());

    let mut ids = std::collections::HashSet::new();
    for n in 0..20 {
        let event = events
            .create(common::event_request(&format!("Event {}", n), "2099-01-01", &[]), "alice")
            .await
            .unwrap();
        assert!(ids.insert(event.id), "duplicate event id");
    }
}

#[tokio::test]
async fn only_the_organizer_may_delete() {
    common::init_logging();
    let (events, _) = common::stores(&common::fresh_storage());

    let event = events
        .create(common::event_request("Standup", "2099-01-01", &[]), "alice")
        .await
        .unwrap();

    assert!(matches!(
        events.delete(&event.id, "bob").await,
        Err(StoreError::Forbidden)
    ));
    // The record survived the rejected attempt
    assert!(events.get_by_id(&event.id).await.is_ok());

    events.delete(&event.id, "alice").await.unwrap();
    assert!(matches!(
        events.get_by_id(&event.id).await,
        Err(StoreError::NotFound)
    ));
    assert!(matches!(
        events.delete(&event.id, "alice").await,
        Err(StoreError::NotFound)
    ));
}

#[tokio::test]
async fn duplicate_invitees_are_rejected() {
    common::init_logging();
    let (events, _) = common::stores(&common::fresh_storage());

    let event = events
        .create(common::event_request("Standup", "2099-01-01", &["a@x.com"]), "alice")
        .await
        .unwrap();

    assert!(matches!(
        events.add_invitee(&event.id, "a@x.com", "alice").await,
        Err(StoreError::Conflict(_))
    ));
    let unchanged = events.get_by_id(&event.id).await.unwrap();
    assert_eq!(unchanged.invitees.len(), 1);

    events.add_invitee(&event.id, "b@x.com", "alice").await.unwrap();
    let two = events.get_by_id(&event.id).await.unwrap();
    assert_eq!(two.invitees.len(), 2);

    // Non-organizers may not touch the list
    assert!(matches!(
        events.add_invitee(&event.id, "c@x.com", "bob").await,
        Err(StoreError::Forbidden)
    ));
    assert!(matches!(
        events.remove_invitee(&event.id, "a@x.com", "bob").await,
        Err(StoreError::Forbidden)
    ));
}

#[tokio::test]
async fn duplicate_request_invitees_are_collapsed_at_creation() {
    common::init_logging();
    let (events, _) = common::stores(&common::fresh_storage());

    let event = events
        .create(
            common::event_request("Standup", "2099-01-01", &["a@x.com", "a@x.com", "b@x.com"]),
            "alice",
        )
        .await
        .unwrap();

    // The list comes out unique by email, first occurrence wins
    let emails: Vec<&str> = event.invitees.iter().map(|inv| inv.email.as_str()).collect();
    assert_eq!(emails, vec!["a@x.com", "b@x.com"]);

    // And the uniqueness invariant holds from then on
    assert!(matches!(
        events.add_invitee(&event.id, "a@x.com", "alice").await,
        Err(StoreError::Conflict(_))
    ));
}

#[tokio::test]
async fn removing_an_absent_invitee_is_a_noop() {
    common::init_logging();
    let (events, _) = common::stores(&common::fresh_storage());

    let event = events
        .create(common::event_request("Standup", "2099-01-01", &["a@x.com"]), "alice")
        .await
        .unwrap();

    events.remove_invitee(&event.id, "nobody@x.com", "alice").await.unwrap();
    assert_eq!(events.get_by_id(&event.id).await.unwrap().invitees.len(), 1);

    events.remove_invitee(&event.id, "a@x.com", "alice").await.unwrap();
    assert!(events.get_by_id(&event.id).await.unwrap().invitees.is_empty());
}

#[tokio::test]
async fn attendance_is_recorded_per_event() {
    common::init_logging();
    let (events, _) = common::stores(&common::fresh_storage());

    let event = events
        .create(common::event_request("Retreat", "2099-06-01", &[]), "hr_manager")
        .await
        .unwrap();

    events
        .update_attendance(&event.id, AttendanceStatus::Maybe, "bob")
        .await
        .unwrap();
    assert_eq!(
        events.get_by_id(&event.id).await.unwrap().attendance_status,
        Some(AttendanceStatus::Maybe)
    );

    assert!(matches!(
        events.update_attendance("event_unknown", AttendanceStatus::Going, "bob").await,
        Err(StoreError::NotFound)
    ));
}

#[tokio::test]
async fn organizer_listing_is_exact() {
    common::init_logging();
    let (events, _) = common::stores(&common::fresh_storage());

    for (title, organizer) in &[
        ("Standup", "alice"),
        ("Retro", "alice"),
        ("Kickoff", "bob"),
        ("Review", "carol"),
    ] {
        events
            .create(common::event_request(title, "2099-01-01", &[]), organizer)
            .await
            .unwrap();
    }

    let alices = events.list_by_role(EventRole::Organizer, "alice").await.unwrap();
    assert_eq!(alices.len(), 2);
    assert!(alices.iter().all(|e| e.organizer_id == "alice" && e.role == EventRole::Organizer));

    let carols = events.list_by_role(EventRole::Organizer, "carol").await.unwrap();
    assert_eq!(carols.len(), 1);
    assert_eq!(carols[0].title, "Review");

    assert!(events.list_by_role(EventRole::Organizer, "dave").await.unwrap().is_empty());
}

#[tokio::test]
async fn attendee_listing_follows_the_configured_match() {
    common::init_logging();
    let storage = common::fresh_storage();
    let (loose, _) = common::stores(&storage);

    loose
        .create(common::event_request("Standup", "2099-01-01", &["bob@x.com"]), "alice")
        .await
        .unwrap();

    // Loose (default): the username "bob" appears as a substring of an invitee email
    let listed = loose.list_by_role(EventRole::Attendee, "bob").await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].role, EventRole::Attendee);
    // The organizer never shows up in their own attendee listing
    assert!(loose.list_by_role(EventRole::Attendee, "alice").await.unwrap().is_empty());
    // An unrelated principal does not match either
    assert!(loose.list_by_role(EventRole::Attendee, "carol").await.unwrap().is_empty());

    // Exact: the bare username no longer matches, the full email does
    let exact = EventStore::with_options(
        storage.clone(),
        StoreOptions::default().with_attendee_match(AttendeeMatch::Exact),
    );
    assert!(exact.list_by_role(EventRole::Attendee, "bob").await.unwrap().is_empty());
    assert_eq!(exact.list_by_role(EventRole::Attendee, "bob@x.com").await.unwrap().len(), 1);
}

#[tokio::test]
async fn listing_recomputes_event_status() {
    common::init_logging();
    let (events, _) = common::stores(&common::fresh_storage());

    events
        .create(common::event_request("Past event", "2020-01-01", &[]), "alice")
        .await
        .unwrap();
    events
        .create(common::event_request("Future event", "2099-01-01", &[]), "alice")
        .await
        .unwrap();

    let listed = events.list_by_role(EventRole::Organizer, "alice").await.unwrap();
    let by_title = |title: &str| listed.iter().find(|e| e.title == title).unwrap();
    assert_eq!(by_title("Past event").status, EventStatus::Past);
    assert_eq!(by_title("Future event").status, EventStatus::Upcoming);
}

#[tokio::test]
async fn tasks_round_trip_and_merge_patches() {
    common::init_logging();
    let (_, tasks) = common::stores(&common::fresh_storage());

    let created = tasks
        .create(
            common::task_request("Book the room", "event_1", "2099-01-01", TaskPriority::High),
            "alice",
        )
        .await
        .unwrap();

    assert!(created.id.starts_with("task_"));
    assert_eq!(created.status, TaskStatus::Pending);
    assert_eq!(created.created_by, "alice");
    assert_eq!(created.created_at, created.updated_at);
    assert_eq!(tasks.get_by_id(&created.id).await.unwrap(), created);

    let patched = tasks
        .update(
            &created.id,
            event_pantry::TaskPatch {
                status: Some(TaskStatus::InProgress),
                assigned_to: Some("bob".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(patched.status, TaskStatus::InProgress);
    assert_eq!(patched.assigned_to.as_deref(), Some("bob"));
    assert_eq!(patched.title, created.title);
    assert!(patched.updated_at >= created.updated_at);

    assert!(matches!(
        tasks.update("task_unknown", Default::default()).await,
        Err(StoreError::NotFound)
    ));
}

#[tokio::test]
async fn only_the_creator_may_delete_a_task() {
    common::init_logging();
    let (_, tasks) = common::stores(&common::fresh_storage());

    let task = tasks
        .create(
            common::task_request("Book the room", "event_1", "2099-01-01", TaskPriority::Low),
            "alice",
        )
        .await
        .unwrap();

    assert!(matches!(
        tasks.delete(&task.id, "bob").await,
        Err(StoreError::Forbidden)
    ));
    tasks.delete(&task.id, "alice").await.unwrap();
    assert!(matches!(
        tasks.get_by_id(&task.id).await,
        Err(StoreError::NotFound)
    ));
}

#[tokio::test]
async fn task_listing_scans_by_event_id() {
    common::init_logging();
    let (_, tasks) = common::stores(&common::fresh_storage());

    for (title, event_id) in &[("a", "event_1"), ("b", "event_1"), ("c", "event_2")] {
        tasks
            .create(
                common::task_request(title, event_id, "2099-01-01", TaskPriority::Medium),
                "alice",
            )
            .await
            .unwrap();
    }

    assert_eq!(tasks.list_by_event("event_1").await.unwrap().len(), 2);
    assert_eq!(tasks.list_by_event("event_2").await.unwrap().len(), 1);
    // A dangling or unknown event id is not an error, just an empty list
    assert!(tasks.list_by_event("event_deleted").await.unwrap().is_empty());
}

#[tokio::test]
async fn storage_failures_surface_and_operations_stay_retryable() {
    common::init_logging();
    // Counters are per operation kind: arm only the read, so the whole retried
    // read-modify-write can go through afterwards
    let mut flaky = FlakyStorage::new(MemoryStorage::new());
    flaky.get_behaviour = (0, 1);
    let events = EventStore::new(shared(flaky));

    let denied = events
        .create(common::event_request("Standup", "2099-01-01", &[]), "alice")
        .await;
    assert!(matches!(denied, Err(StoreError::Storage(_))));

    // The error is not fatal: the very same call succeeds once the backend recovers
    let event = events
        .create(common::event_request("Standup", "2099-01-01", &[]), "alice")
        .await
        .unwrap();
    assert_eq!(events.get_by_id(&event.id).await.unwrap().title, "Standup");
}

/// The stores and a real backend client are interchangeable behind the source traits
#[tokio::test]
async fn stores_are_usable_as_trait_objects() {
    common::init_logging();
    let storage = common::fresh_storage();
    let events = EventStore::new(storage.clone());
    let tasks = TaskStore::new(storage);

    let event_source: &dyn EventSource = &events;
    let task_source: &dyn TaskSource = &tasks;

    let event = event_source
        .create(common::event_request("Standup", "2099-01-01", &[]), "alice")
        .await
        .unwrap();
    let task = task_source
        .create(
            common::task_request("Agenda", &event.id, "2099-01-01", TaskPriority::Medium),
            "alice",
        )
        .await
        .unwrap();

    assert_eq!(task_source.list_by_event(&event.id).await.unwrap(), vec![task]);
}
