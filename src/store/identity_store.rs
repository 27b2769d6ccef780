//! The session store

use async_trait::async_trait;

use super::{SharedStorage, StoreOptions, CURRENT_USER_KEY};
use crate::error::StoreError;
use crate::identity::{Principal, Session};
use crate::storage::Storage;
use crate::traits::IdentitySource;

/// Holds the currently authenticated principal and its token.
///
/// This is a mock tier: credentials are never checked against anything, any well-formed
/// login/signup succeeds. The produced [`Session`] is persisted under a dedicated storage key so
/// "who is logged in" survives the way the rest of the collections do.
#[derive(Debug)]
pub struct IdentityStore<S: Storage> {
    storage: SharedStorage<S>,
    options: StoreOptions,
}

impl<S: Storage> Clone for IdentityStore<S> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            options: self.options.clone(),
        }
    }
}

impl<S: Storage> IdentityStore<S> {
    pub fn new(storage: SharedStorage<S>) -> Self {
        Self::with_options(storage, StoreOptions::default())
    }

    pub fn with_options(storage: SharedStorage<S>, options: StoreOptions) -> Self {
        Self { storage, options }
    }

    fn read_session(&self) -> Result<Option<Session>, StoreError> {
        let stored = self.storage.lock().unwrap().get(CURRENT_USER_KEY)?;
        match stored {
            None => Ok(None),
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(session) => Ok(Some(session)),
                Err(err) => {
                    log::warn!("Unparseable session ({}), treating it as logged out", err);
                    Ok(None)
                }
            },
        }
    }

    fn write_session(&self, session: &Session) -> Result<(), StoreError> {
        let raw = serde_json::to_string(session).map_err(crate::storage::StorageError::from)?;
        self.storage.lock().unwrap().set(CURRENT_USER_KEY, &raw)?;
        Ok(())
    }
}

#[async_trait]
impl<S: Storage + Send> IdentitySource for IdentityStore<S> {
    async fn login(&self, username: &str, password: &str) -> Result<Session, StoreError> {
        self.options.simulate_latency().await;

        if username.is_empty() || password.is_empty() {
            return Err(StoreError::InvalidInput(
                "username and password must not be empty".to_string(),
            ));
        }

        // No credential check in this tier; derive a principal from the username alone
        let session = Session {
            token: super::generate_token(username),
            principal: Principal {
                username: username.to_string(),
                email: Some(format!("{}@example.com", username)),
            },
        };
        self.write_session(&session)?;
        Ok(session)
    }

    async fn signup(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Session, StoreError> {
        self.options.simulate_latency().await;

        if username.is_empty() || password.is_empty() {
            return Err(StoreError::InvalidInput(
                "username and password must not be empty".to_string(),
            ));
        }

        // No uniqueness check either: there is no durable user collection to check against
        let session = Session {
            token: super::generate_token(username),
            principal: Principal {
                username: username.to_string(),
                email: Some(email.to_string()),
            },
        };
        self.write_session(&session)?;
        Ok(session)
    }

    async fn current_session(&self) -> Result<Option<Session>, StoreError> {
        self.read_session()
    }

    async fn logout(&self) -> Result<(), StoreError> {
        self.storage.lock().unwrap().remove(CURRENT_USER_KEY)?;
        Ok(())
    }
}

impl<S: Storage> IdentityStore<S> {
    /// Whether a session is currently persisted
    pub fn is_logged_in(&self) -> Result<bool, StoreError> {
        Ok(self.read_session()?.is_some())
    }

    /// The principal of the current session, if any
    pub fn current_principal(&self) -> Result<Option<Principal>, StoreError> {
        Ok(self.read_session()?.map(|session| session.principal))
    }

    /// The token of the current session, if any
    pub fn token(&self) -> Result<Option<String>, StoreError> {
        Ok(self.read_session()?.map(|session| session.token))
    }
}
