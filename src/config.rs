//! Support for library configuration options

use std::sync::{Arc, Mutex};
use std::time::Duration;

use once_cell::sync::Lazy;

/// The simulated network latency applied by stores built with
/// [`StoreOptions::default`](crate::store::StoreOptions). \
/// `None` means operations resolve immediately (the latency of the original environment only
/// emulates a network and carries no semantics). Feel free to override it when initing this
/// library, e.g. to `Some(Duration::from_millis(300))` to make a demo feel like a real backend.
pub static DEFAULT_LATENCY: Lazy<Arc<Mutex<Option<Duration>>>> =
    Lazy::new(|| Arc::new(Mutex::new(None)));
