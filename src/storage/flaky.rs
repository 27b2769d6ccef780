//! A storage wrapper that fails on demand, to rehearse error handling
//!
//! The stores never retry on their own: a failed operation surfaces to the caller, who decides
//! what to do. Wrapping a real backend in a [`FlakyStorage`] lets tests (and demos) trigger that
//! path deterministically.

use super::{Storage, StorageError};

/// Wraps another [`Storage`] and injects failures.
///
/// So that an operation fails _n_ times after _m_ initial successes, set `(m, n)` for the suited
/// parameter.
#[derive(Debug)]
pub struct FlakyStorage<S: Storage> {
    inner: S,

    /// If this is true, every operation is passed through to the inner storage
    pub is_suspended: bool,

    pub get_behaviour: (u32, u32),
    pub set_behaviour: (u32, u32),
    pub remove_behaviour: (u32, u32),
}

impl<S: Storage> FlakyStorage<S> {
    /// Wrap `inner` without any planned failure
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            is_suspended: false,
            get_behaviour: (0, 0),
            set_behaviour: (0, 0),
            remove_behaviour: (0, 0),
        }
    }

    /// Every operation will fail at once, for `n_fails` times
    pub fn fail_now(inner: S, n_fails: u32) -> Self {
        Self {
            inner,
            is_suspended: false,
            get_behaviour: (0, n_fails),
            set_behaviour: (0, n_fails),
            remove_behaviour: (0, n_fails),
        }
    }

    /// Suspend fault injection until you call `resume`
    pub fn suspend(&mut self) {
        self.is_suspended = true;
    }
    /// Make fault injection active again
    pub fn resume(&mut self) {
        self.is_suspended = false;
    }

    /// Hand back the wrapped storage
    pub fn into_inner(self) -> S {
        self.inner
    }
}

/// Return Ok(()) in case the value is `(1+, _)` or `(_, 0)`, or return Err and decrement otherwise
fn decrement(value: &mut (u32, u32), descr: &'static str) -> Result<(), StorageError> {
    let remaining_successes = value.0;
    let remaining_failures = value.1;

    if remaining_successes > 0 {
        value.0 -= 1;
        log::debug!("Flaky storage: allowing a {} ({:?})", descr, value);
        Ok(())
    } else if remaining_failures > 0 {
        value.1 -= 1;
        log::debug!("Flaky storage: failing a {} ({:?})", descr, value);
        Err(StorageError::InjectedFault(descr))
    } else {
        log::debug!("Flaky storage: allowing a {} ({:?})", descr, value);
        Ok(())
    }
}

impl<S: Storage> Storage for FlakyStorage<S> {
    fn get(&mut self, key: &str) -> Result<Option<String>, StorageError> {
        if !self.is_suspended {
            decrement(&mut self.get_behaviour, "get")?;
        }
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if !self.is_suspended {
            decrement(&mut self.set_behaviour, "set")?;
        }
        self.inner.set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if !self.is_suspended {
            decrement(&mut self.remove_behaviour, "remove")?;
        }
        self.inner.remove(key)
    }
}
