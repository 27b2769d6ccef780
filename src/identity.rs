//! The authenticated actor and its session

use serde::{Deserialize, Serialize};

/// The actor on whose behalf store operations execute.
///
/// Principals are transient: one is produced on login/signup, persisted inside the [`Session`],
/// and discarded on logout. There is no durable user collection in this fallback tier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Principal {
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// What a successful login/signup returns, and what the session key persists
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// An opaque bearer token. This mock tier never validates it, but the shape matches what the
    /// real backend would return, so callers can treat both sources the same way.
    pub token: String,
    #[serde(rename = "user")]
    pub principal: Principal,
}
