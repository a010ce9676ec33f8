// ── Authentication session ──
//
// Holds {username, token} in memory and mirrors it into a durable
// `CredentialStore`. Presence of a non-empty token is the only thing
// that gates dashboard access.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use secrecy::{ExposeSecret, SecretString};
use tracing::{info, warn};

use agrisci_api::{ApiClient, TokenSource};

use crate::error::CoreError;
use crate::route::Navigation;

/// Storage key for the bearer token.
pub const TOKEN_KEY: &str = "authToken";
/// Storage key for the logged-in username.
pub const USERNAME_KEY: &str = "username";

// ── Durable storage ──────────────────────────────────────────────────

/// Key/value storage that survives restarts.
///
/// Implemented by the file and keyring backends in `agrisci-config`, and
/// by [`MemoryCredentialStore`] for tests and ephemeral sessions.
pub trait CredentialStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), CoreError>;
    fn remove(&self, key: &str) -> Result<(), CoreError>;
}

/// In-process credential store. Forgets everything on drop.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, CoreError> {
        self.entries
            .lock()
            .map_err(|_| CoreError::storage("credential map lock poisoned"))
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        self.entries()?.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        self.entries()?.remove(key);
        Ok(())
    }
}

// ── Token source ─────────────────────────────────────────────────────

/// Reads the token straight from durable storage on every request, so the
/// gateway always sees the latest login or logout.
pub struct StoreTokenSource {
    store: Arc<dyn CredentialStore>,
}

impl StoreTokenSource {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }
}

impl TokenSource for StoreTokenSource {
    fn token(&self) -> Option<SecretString> {
        match self.store.get(TOKEN_KEY) {
            Ok(Some(token)) if !token.is_empty() => Some(SecretString::from(token)),
            Ok(_) => None,
            Err(e) => {
                warn!(error = %e, "could not read stored token");
                None
            }
        }
    }
}

// ── Session ──────────────────────────────────────────────────────────

/// An authenticated identity.
#[derive(Debug, Clone)]
pub struct Session {
    pub username: String,
    pub token: SecretString,
}

/// Login/logout state machine backed by a [`CredentialStore`].
pub struct AuthSession {
    store: Arc<dyn CredentialStore>,
    current: Option<Session>,
}

impl AuthSession {
    /// Decide the initial state from durable storage.
    ///
    /// A present, non-empty token means authenticated. Read failures are
    /// logged and treated as "no session".
    pub fn bootstrap(store: Arc<dyn CredentialStore>) -> Self {
        let token = store.get(TOKEN_KEY).unwrap_or_else(|e| {
            warn!(error = %e, "could not read stored token; starting logged out");
            None
        });
        let username = store.get(USERNAME_KEY).ok().flatten().unwrap_or_default();

        let current = token.filter(|t| !t.is_empty()).map(|token| Session {
            username,
            token: SecretString::from(token),
        });

        Self { store, current }
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    pub fn session(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn username(&self) -> Option<&str> {
        self.current.as_ref().map(|s| s.username.as_str())
    }

    /// A [`TokenSource`] reading the same storage this session writes.
    pub fn token_source(&self) -> Arc<dyn TokenSource> {
        Arc::new(StoreTokenSource::new(Arc::clone(&self.store)))
    }

    /// Exchange credentials for a token and persist it.
    ///
    /// Every failure (transport, rejected credentials, malformed response,
    /// storage) comes back as [`CoreError::InvalidCredentials`]. Nothing is
    /// left half-written: if the username cannot be stored the token is
    /// removed again.
    pub async fn login(
        &mut self,
        api: &ApiClient,
        username: &str,
        password: &SecretString,
    ) -> Result<&Session, CoreError> {
        let token = api.login(username, password).await.map_err(|e| {
            warn!(error = %e, "login failed");
            CoreError::InvalidCredentials
        })?;

        self.persist(username, &token).map_err(|e| {
            warn!(error = %e, "could not persist credentials");
            CoreError::InvalidCredentials
        })?;

        info!(username, "logged in");
        Ok(self.current.insert(Session {
            username: username.to_owned(),
            token,
        }))
    }

    fn persist(&self, username: &str, token: &SecretString) -> Result<(), CoreError> {
        self.store.set(TOKEN_KEY, token.expose_secret())?;
        if let Err(e) = self.store.set(USERNAME_KEY, username) {
            if let Err(rollback) = self.store.remove(TOKEN_KEY) {
                warn!(error = %rollback, "could not roll back stored token");
            }
            return Err(e);
        }
        Ok(())
    }

    /// Forget the session and both stored keys.
    ///
    /// Returns where the caller should go next; the session never navigates
    /// on its own.
    pub fn logout(&mut self) -> Navigation {
        for key in [TOKEN_KEY, USERNAME_KEY] {
            if let Err(e) = self.store.remove(key) {
                warn!(key, error = %e, "could not clear stored credential");
            }
        }
        if let Some(session) = self.current.take() {
            info!(username = %session.username, "logged out");
        }
        Navigation::Login
    }
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}
