use std::path::Path;

use event_pantry::search::{SearchEngine, SearchFilter};
use event_pantry::storage::FileStorage;
use event_pantry::store::{shared, EventStore, TaskStore};
use event_pantry::traits::{EventSource, IdentitySource};
use event_pantry::{EventRole, IdentityStore};

const STORAGE_FILE: &str = "demo_storage.json";

#[tokio::main]
async fn main() {
    env_logger::init();

    let path = Path::new(STORAGE_FILE);
    let storage = match FileStorage::from_file(path) {
        Ok(storage) => storage,
        Err(err) => {
            log::warn!("No usable storage file: {}. Starting empty", err);
            FileStorage::new(path)
        }
    };
    let storage = shared(storage);

    let identity = IdentityStore::new(storage.clone());
    let session = identity.login("demo_user", "hunter2").await.unwrap();
    println!("Logged in as {} (token {})", session.principal.username, session.token);

    event_pantry::seed::seed_if_empty(&storage).unwrap();

    let events = EventStore::new(storage.clone());
    let tasks = TaskStore::new(storage.clone());

    println!("---- organized events ----");
    for event in events
        .list_by_role(EventRole::Organizer, &session.principal.username)
        .await
        .unwrap()
    {
        println!("  {}\t{}\t{:?}", event.date, event.title, event.status);
    }

    println!("---- search: 'retreat' ----");
    let filter = SearchFilter {
        keyword: Some("retreat".to_string()),
        ..SearchFilter::default()
    };
    let results = SearchEngine::new(events, tasks)
        .search(&filter, &session.principal.username)
        .await
        .unwrap();
    println!("  {} match(es)", results.total_count);
    for event in &results.events {
        println!("  {}\t{}", event.date, event.title);
    }
}
