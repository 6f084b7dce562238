//! Login session backed by the `auth` entry.
//!
//! Credentials come from a fixed list (see [`default_users`]); there is no
//! password hashing.
//!
//! # Stored Format
//!
//! ```text
//! {
//!   "isAuthenticated": true,
//!   "user": { "id": "1", "username": "admin", "fullName": "Administrator", "password": "admin123" }
//! }
//! ```

use thiserror::Error;

use crate::models::{AuthState, User};
use crate::storage::{KeyValueStore, StorageError, StorageKey};

/// Errors surfaced to callers of the session store.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Same message for unknown users and wrong passwords.
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Not logged in")]
    NotLoggedIn,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// The built-in accounts.
pub fn default_users() -> Vec<User> {
    vec![
        User::new("1", "admin", "Administrator", "admin123"),
        User::new("2", "user", "Regular User", "user123"),
    ]
}

/// Session state plus the credential list it checks against.
#[derive(Debug)]
pub struct SessionStore<S: KeyValueStore> {
    storage: S,
    users: Vec<User>,
    state: AuthState,
    loading: bool,
}

impl<S: KeyValueStore> SessionStore<S> {
    /// Creates a store that checks logins against `users`. The persisted
    /// session is not read until [`SessionStore::load`].
    pub fn new(storage: S, users: Vec<User>) -> Self {
        Self {
            storage,
            users,
            state: AuthState::default(),
            loading: true,
        }
    }

    /// Creates a store with [`default_users`] and loads it.
    pub fn open(storage: S) -> Result<Self, StorageError> {
        let mut store = Self::new(storage, default_users());
        store.load()?;
        Ok(store)
    }

    /// Reads the persisted session.
    ///
    /// A stored state is only adopted when it is authenticated and has a
    /// user. Unparsable data is logged and removed.
    pub fn load(&mut self) -> Result<(), StorageError> {
        let result = self.read_state();
        self.loading = false;

        match result? {
            Some(Ok(state)) if state.is_valid() => {
                tracing::info!("Restored session");
                self.state = state;
            }
            Some(Ok(_)) | None => {
                tracing::debug!("No active session stored");
            }
            Some(Err(e)) => {
                tracing::warn!("Failed to parse stored session, clearing: {}", e);
                self.storage.remove(StorageKey::Auth)?;
            }
        }

        Ok(())
    }

    fn read_state(&self) -> Result<Option<Result<AuthState, serde_json::Error>>, StorageError> {
        Ok(self
            .storage
            .get(StorageKey::Auth)?
            .map(|raw| serde_json::from_str(&raw)))
    }

    /// True until [`SessionStore::load`] has run.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated
    }

    pub fn user(&self) -> Option<&User> {
        self.state.user.as_ref()
    }

    /// Returns the signed-in user or [`AuthError::NotLoggedIn`].
    pub fn require_user(&self) -> Result<&User, AuthError> {
        match &self.state.user {
            Some(user) if self.state.is_authenticated => Ok(user),
            _ => Err(AuthError::NotLoggedIn),
        }
    }

    /// Checks the credentials and persists the session on a match.
    ///
    /// Returns `Ok(false)` without touching storage when nothing matches.
    pub fn login(&mut self, username: &str, password: &str) -> Result<bool, StorageError> {
        let Some(user) = self
            .users
            .iter()
            .find(|u| u.username == username && u.password == password)
            .cloned()
        else {
            tracing::debug!("Login rejected for '{}'", username);
            return Ok(false);
        };

        tracing::info!("User '{}' logged in", user.username);
        self.save(AuthState::signed_in(user))?;
        Ok(true)
    }

    /// Like [`SessionStore::login`], mapping a mismatch to an error.
    pub fn try_login(&mut self, username: &str, password: &str) -> Result<&User, AuthError> {
        if !self.login(username, password)? {
            return Err(AuthError::InvalidCredentials);
        }
        self.require_user()
    }

    pub fn logout(&mut self) -> Result<(), StorageError> {
        self.storage.remove(StorageKey::Auth)?;
        self.state = AuthState::default();
        Ok(())
    }

    /// Replaces the stored user, e.g. after editing the display name.
    pub fn update_user(&mut self, user: User) -> Result<(), StorageError> {
        self.save(AuthState::signed_in(user))
    }

    fn save(&mut self, state: AuthState) -> Result<(), StorageError> {
        let json = serde_json::to_string(&state)
            .map_err(|e| StorageError::Serialize(StorageKey::Auth.name(), e))?;
        self.storage.set(StorageKey::Auth, &json)?;
        self.state = state;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn session() -> (SessionStore<MemoryStorage>, MemoryStorage) {
        let storage = MemoryStorage::new();
        let store = SessionStore::open(storage.clone()).unwrap();
        (store, storage)
    }

    #[test]
    fn test_is_loading_until_load() {
        let mut store = SessionStore::new(MemoryStorage::new(), default_users());
        assert!(store.is_loading());

        store.load().unwrap();
        assert!(!store.is_loading());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_login_success_persists() {
        let (mut store, storage) = session();

        assert!(store.login("admin", "admin123").unwrap());
        assert!(store.is_authenticated());
        assert_eq!(store.user().unwrap().full_name, "Administrator");

        let raw = storage.raw(StorageKey::Auth).unwrap();
        let persisted: AuthState = serde_json::from_str(&raw).unwrap();
        assert_eq!(&persisted, store.state());
    }

    #[test]
    fn test_login_failure_leaves_storage_unchanged() {
        let (mut store, storage) = session();
        assert!(!store.login("admin", "wrong").unwrap());
        assert!(storage.raw(StorageKey::Auth).is_none());

        store.login("user", "user123").unwrap();
        let before = storage.raw(StorageKey::Auth);

        assert!(!store.login("admin", "wrong").unwrap());
        assert_eq!(storage.raw(StorageKey::Auth), before);
        assert_eq!(store.user().unwrap().username, "user");
    }

    #[test]
    fn test_try_login_uses_generic_error() {
        let (mut store, _) = session();

        let unknown = store.try_login("ghost", "admin123").unwrap_err();
        let wrong = store.try_login("admin", "nope").unwrap_err();
        assert_eq!(unknown.to_string(), wrong.to_string());
        assert_eq!(unknown.to_string(), "Invalid username or password");

        assert_eq!(store.try_login("admin", "admin123").unwrap().id, "1");
    }

    #[test]
    fn test_session_survives_reload() {
        let (mut store, storage) = session();
        store.login("admin", "admin123").unwrap();

        let reloaded = SessionStore::open(storage).unwrap();
        assert!(reloaded.is_authenticated());
        assert_eq!(reloaded.user().unwrap().username, "admin");
    }

    #[test]
    fn test_logout_clears_storage() {
        let (mut store, storage) = session();
        store.login("admin", "admin123").unwrap();

        store.logout().unwrap();

        assert!(!store.is_authenticated());
        assert!(store.user().is_none());
        assert!(storage.raw(StorageKey::Auth).is_none());
        assert!(matches!(store.require_user(), Err(AuthError::NotLoggedIn)));
    }

    #[test]
    fn test_update_user_persists_new_name() {
        let (mut store, storage) = session();
        store.login("admin", "admin123").unwrap();

        let renamed = store.user().unwrap().clone().with_full_name("Head Chef");
        store.update_user(renamed).unwrap();

        let reloaded = SessionStore::open(storage).unwrap();
        assert_eq!(reloaded.user().unwrap().full_name, "Head Chef");
    }

    #[test]
    fn test_corrupt_session_is_cleared() {
        let storage = MemoryStorage::new();
        storage.set(StorageKey::Auth, "not json").unwrap();

        let store = SessionStore::open(storage.clone()).unwrap();

        assert!(!store.is_authenticated());
        assert!(storage.raw(StorageKey::Auth).is_none());
    }

    #[test]
    fn test_unauthenticated_state_is_ignored() {
        let storage = MemoryStorage::new();
        storage
            .set(StorageKey::Auth, r#"{"isAuthenticated": false, "user": null}"#)
            .unwrap();

        let store = SessionStore::open(storage).unwrap();
        assert!(!store.is_authenticated());
    }
}
