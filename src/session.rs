//! Client-side session lifecycle.
//!
//! A session is the (token, user) pair handed out by `POST /auth/login`. The
//! store persists both in [`SessionStorage`] and hands out an [`ApiClient`]
//! that carries the token, so callers never touch headers themselves.
//!
//! ```text
//!   ANONYMOUS ──init() finds token──▶ PENDING_VERIFY ──verify ok──▶ AUTHENTICATED
//!       ▲  │                               │                             │
//!       │  └──────────login ok─────────────┼────────────────────────────▶│
//!       │                                  │ verify failed                │
//!       └──────────────────────────────────┴───────logout / verify failed─┘
//! ```

use std::fmt;

use crate::api::ApiClient;
use crate::error::{Result, TickkkError};
use crate::models::{LoginResponse, User};
use crate::storage::SessionStorage;
use crate::types::{TOKEN_KEY, USER_KEY};

/// Message used when a failed login carries no server message.
pub const LOGIN_FALLBACK_MESSAGE: &str = "Login failed";

/// Message used when verification fails without a server message.
pub const VERIFY_FALLBACK_MESSAGE: &str = "Session is no longer valid";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Anonymous,
    /// A persisted token is attached but the server has not confirmed it yet.
    PendingVerify,
    Authenticated,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Anonymous => write!(f, "anonymous"),
            SessionState::PendingVerify => write!(f, "pending verification"),
            SessionState::Authenticated => write!(f, "authenticated"),
        }
    }
}

pub struct SessionStore<S: SessionStorage> {
    storage: S,
    /// Anonymous client every session client is derived from.
    api: ApiClient,
    /// Client for the current state (carries the token when one is attached).
    client: ApiClient,
    state: SessionState,
    user: Option<User>,
}

impl<S: SessionStorage> fmt::Debug for SessionStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("state", &self.state)
            .field("user", &self.user.as_ref().map(|u| &u.username))
            .field("client", &self.client)
            .finish()
    }
}

impl<S: SessionStorage> SessionStore<S> {
    /// Create an anonymous store. Call [`init`](Self::init) to pick up a
    /// persisted session.
    pub fn new(storage: S, api: ApiClient) -> Self {
        let api = api.anonymous();
        Self {
            storage,
            client: api.clone(),
            api,
            state: SessionState::Anonymous,
            user: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Client to use for the current state.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// True iff a token is present in durable storage.
    pub fn is_authenticated(&self) -> bool {
        self.storage.get(TOKEN_KEY).is_some()
    }

    /// The cached user, if any.
    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_admin(&self) -> bool {
        self.current_user().is_some_and(User::is_admin)
    }

    /// Attach a persisted token speculatively. Returns whether one was found.
    ///
    /// The token is not checked here; [`verify_token`](Self::verify_token)
    /// does that.
    pub fn init(&mut self) -> bool {
        let Some(token) = self.storage.get(TOKEN_KEY) else {
            return false;
        };

        self.client = self.api.with_token(&token);
        self.user = self.stored_user();
        if self.state == SessionState::Anonymous {
            self.state = SessionState::PendingVerify;
        }
        tracing::debug!("Restored session token, state = {}", self.state);
        true
    }

    /// Exchange credentials for a session.
    ///
    /// On failure the prior session, if any, is left exactly as it was and
    /// the error's message is the server's `error` text or
    /// [`LOGIN_FALLBACK_MESSAGE`].
    pub async fn login(&mut self, username: &str, password: &str) -> Result<User> {
        let LoginResponse { token, user, .. } = match self.api.login(username, password).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Login error: {e}");
                return Err(TickkkError::Auth {
                    message: e.user_message(LOGIN_FALLBACK_MESSAGE),
                    cause: Some(Box::new(e)),
                });
            }
        };

        self.persist(&token, &user)?;
        self.client = self.api.with_token(&token);
        self.user = Some(user.clone());
        self.state = SessionState::Authenticated;
        tracing::info!("Logged in as {}", user.username);
        Ok(user)
    }

    /// Drop the session everywhere. Never fails and may be called repeatedly.
    pub fn logout(&mut self) {
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.storage.remove(key) {
                tracing::warn!("Failed to clear '{key}' from session storage: {e}");
            }
        }
        self.client = self.api.anonymous();
        self.user = None;
        self.state = SessionState::Anonymous;
    }

    /// Ask the server who the current token belongs to.
    ///
    /// On success the returned user replaces the cached record (role or
    /// active status may have changed server-side). Any failure, including
    /// transport errors, logs the session out.
    pub async fn verify_token(&mut self) -> Result<User> {
        if !self.client.has_token() {
            self.init();
        }
        if !self.client.has_token() {
            self.logout();
            return Err(TickkkError::Auth {
                message: VERIFY_FALLBACK_MESSAGE.to_string(),
                cause: Some(Box::new(TickkkError::NotAuthenticated)),
            });
        }

        match self.client.me().await {
            Ok(user) => {
                match serde_json::to_string(&user) {
                    Ok(json) => {
                        if let Err(e) = self.storage.set(USER_KEY, &json) {
                            tracing::warn!("Failed to refresh stored user: {e}");
                        }
                    }
                    Err(e) => tracing::warn!("Failed to serialize user: {e}"),
                }
                self.user = Some(user.clone());
                self.state = SessionState::Authenticated;
                Ok(user)
            }
            Err(e) => {
                tracing::warn!("Token verification failed: {e}");
                self.logout();
                Err(TickkkError::Auth {
                    message: e.user_message(VERIFY_FALLBACK_MESSAGE),
                    cause: Some(Box::new(e)),
                })
            }
        }
    }

    /// The user record saved in durable storage, if it parses.
    pub fn stored_user(&self) -> Option<User> {
        let raw = self.storage.get(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!("Ignoring unreadable stored user: {e}");
                None
            }
        }
    }

    /// Write token and user together, restoring the previous values if
    /// either write fails.
    fn persist(&self, token: &str, user: &User) -> Result<()> {
        let user_json = serde_json::to_string(user)?;
        let previous_token = self.storage.get(TOKEN_KEY);
        let previous_user = self.storage.get(USER_KEY);

        let result = self
            .storage
            .set(USER_KEY, &user_json)
            .and_then(|_| self.storage.set(TOKEN_KEY, token));

        if result.is_err() {
            for (key, previous) in [(TOKEN_KEY, previous_token), (USER_KEY, previous_user)] {
                let restored = match previous {
                    Some(value) => self.storage.set(key, &value),
                    None => self.storage.remove(key),
                };
                if let Err(e) = restored {
                    tracing::warn!("Failed to restore '{key}' after a failed login write: {e}");
                }
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use crate::types::UserRole;
    use std::sync::Arc;
    use url::Url;

    fn api() -> ApiClient {
        ApiClient::new(Url::parse("http://127.0.0.1:9/api/").unwrap()).unwrap()
    }

    fn user() -> User {
        User {
            id: 7,
            username: "agent1".to_string(),
            email: Some("agent1@example.com".to_string()),
            full_name: "Agent One".to_string(),
            role: UserRole::Agent,
            is_active: true,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_new_store_is_anonymous() {
        let store = SessionStore::new(MemoryStorage::new(), api());
        assert_eq!(store.state(), SessionState::Anonymous);
        assert!(!store.is_authenticated());
        assert!(store.current_user().is_none());
        assert!(!store.client().has_token());
    }

    #[test]
    fn test_init_without_token_stays_anonymous() {
        let mut store = SessionStore::new(MemoryStorage::new(), api());
        assert!(!store.init());
        assert_eq!(store.state(), SessionState::Anonymous);
    }

    #[test]
    fn test_init_with_token_is_pending_verify() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(TOKEN_KEY, "tok").unwrap();
        storage
            .set(USER_KEY, &serde_json::to_string(&user()).unwrap())
            .unwrap();

        let mut store = SessionStore::new(storage, api());
        assert!(store.init());
        assert_eq!(store.state(), SessionState::PendingVerify);
        assert!(store.client().has_token());
        assert_eq!(store.current_user().map(|u| u.id), Some(7));
        assert!(store.is_authenticated());
    }

    #[test]
    fn test_init_with_corrupt_user_keeps_token() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(TOKEN_KEY, "tok").unwrap();
        storage.set(USER_KEY, "{not json").unwrap();

        let mut store = SessionStore::new(storage, api());
        assert!(store.init());
        assert!(store.current_user().is_none());
        assert_eq!(store.state(), SessionState::PendingVerify);
    }

    #[test]
    fn test_logout_is_idempotent() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(TOKEN_KEY, "tok").unwrap();
        storage.set(USER_KEY, "{}").unwrap();

        let mut store = SessionStore::new(storage.clone(), api());
        store.init();

        store.logout();
        assert_eq!(store.state(), SessionState::Anonymous);
        assert!(storage.is_empty());
        assert!(!store.client().has_token());

        store.logout();
        assert_eq!(store.state(), SessionState::Anonymous);
        assert!(storage.is_empty());
    }

    #[test]
    fn test_persist_writes_both_keys() {
        let storage = Arc::new(MemoryStorage::new());
        let store = SessionStore::new(storage.clone(), api());
        store.persist("tok", &user()).unwrap();
        assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("tok"));
        let saved: User = serde_json::from_str(&storage.get(USER_KEY).unwrap()).unwrap();
        assert_eq!(saved, user());
    }

    #[tokio::test]
    async fn test_verify_without_token_fails_and_stays_anonymous() {
        let mut store = SessionStore::new(MemoryStorage::new(), api());
        let err = store.verify_token().await.unwrap_err();
        assert_eq!(err.to_string(), VERIFY_FALLBACK_MESSAGE);
        assert_eq!(store.state(), SessionState::Anonymous);
    }
}
