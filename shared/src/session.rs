//! Bearer-token session backed by durable client storage.

use std::{cell::RefCell, rc::Rc};

use thiserror::Error;

use crate::api::SESSION_EXPIRED_MESSAGE;

/// Durable home of the session token. Exactly one key, no other fields.
pub trait TokenStorage {
    /// Read the stored token, if any.
    fn load(&self) -> Option<String>;
    /// Persist `token`, replacing any previous value.
    fn store(&self, token: &str);
    /// Remove the stored token.
    fn clear(&self);
}

/// In-process [`TokenStorage`]; clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slot: Rc<RefCell<Option<String>>>,
}

impl MemoryStorage {
    /// Storage pre-seeded with `token`, as if left by a previous visit.
    pub fn with_token(token: &str) -> Self {
        let storage = Self::default();
        storage.store(token);
        storage
    }
}

impl TokenStorage for MemoryStorage {
    fn load(&self) -> Option<String> {
        self.slot.borrow().clone()
    }

    fn store(&self, token: &str) {
        *self.slot.borrow_mut() = Some(token.to_string());
    }

    fn clear(&self) {
        *self.slot.borrow_mut() = None;
    }
}

/// Whether a token is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No token; only the login screen is usable.
    Anonymous,
    /// A token is held; it is trusted until a call fails with 401.
    Authenticated,
}

/// Rejected session transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The login reply carried no usable token.
    #[error("server returned an empty token")]
    EmptyToken,
}

/// In-memory token mirrored to a [`TokenStorage`].
#[derive(Debug, Clone, PartialEq)]
pub struct SessionStore<S> {
    storage: S,
    token: Option<String>,
}

impl<S: TokenStorage> SessionStore<S> {
    /// Start from whatever the storage holds. No expiry check is made here.
    pub fn restore(storage: S) -> Self {
        let token = storage.load().filter(|token| !token.trim().is_empty());
        Self {
            storage,
            token,
        }
    }

    /// Current state.
    pub fn state(&self) -> SessionState {
        if self.token.is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        }
    }

    /// Token to attach to outbound calls.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Enter the authenticated state with a freshly issued token.
    ///
    /// # Errors
    ///
    /// [`SessionError::EmptyToken`] when `token` is blank; the state is left
    /// unchanged.
    pub fn login(&mut self, token: &str) -> Result<(), SessionError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(SessionError::EmptyToken);
        }
        self.storage.store(token);
        self.token = Some(token.to_string());
        tracing::debug!("session authenticated");
        Ok(())
    }

    /// Explicit logout.
    pub fn logout(&mut self) {
        self.storage.clear();
        self.token = None;
        tracing::debug!("session cleared");
    }

    /// Logout forced by a 401. Returns the message to show the user.
    pub fn expire(&mut self) -> &'static str {
        self.logout();
        SESSION_EXPIRED_MESSAGE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_storage_starts_anonymous() {
        let session = SessionStore::restore(MemoryStorage::default());
        assert_eq!(session.state(), SessionState::Anonymous);
        assert_eq!(session.token(), None);
    }

    #[test]
    fn stored_token_starts_authenticated() {
        let session = SessionStore::restore(MemoryStorage::with_token("tok"));
        assert_eq!(session.state(), SessionState::Authenticated);
        assert_eq!(session.token(), Some("tok"));
    }

    #[test]
    fn login_writes_through_to_storage() {
        let storage = MemoryStorage::default();
        let mut session = SessionStore::restore(storage.clone());

        session.login("fresh").expect("login");

        assert_eq!(session.state(), SessionState::Authenticated);
        assert_eq!(storage.load().as_deref(), Some("fresh"));
    }

    #[test]
    fn blank_token_is_rejected() {
        let storage = MemoryStorage::default();
        let mut session = SessionStore::restore(storage.clone());

        assert_eq!(session.login("   "), Err(SessionError::EmptyToken));
        assert_eq!(session.state(), SessionState::Anonymous);
        assert_eq!(storage.load(), None);
    }

    #[test]
    fn expire_clears_memory_and_storage() {
        let storage = MemoryStorage::with_token("old");
        let mut session = SessionStore::restore(storage.clone());

        let message = session.expire();

        assert_eq!(message, SESSION_EXPIRED_MESSAGE);
        assert_eq!(session.state(), SessionState::Anonymous);
        assert_eq!(storage.load(), None);
    }
}
