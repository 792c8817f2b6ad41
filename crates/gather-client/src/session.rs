//! Session context: the single source of truth for who the current viewer
//! is and whether authenticated calls can be made.
//!
//! Dependency-injected rather than ambient: pages receive a handle to one
//! `SessionContext` and subscribe to changes.

use std::sync::{Mutex, RwLock};

use gather_core::session::{KeyValueStore, Session, SessionStore};
use gather_core::validation::RegistrationForm;
use gather_shared::types::now_millis;
use tracing::{info, warn};

use crate::http::ApiClient;

/// Outcome of a token check. `Refreshed` tells the caller to reload its
/// view state; over-fetching is acceptable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenStatus {
    /// No tokens held; anonymous viewer.
    Anonymous,
    /// Auth token not yet expired, nothing to do.
    Fresh,
    /// Tokens were swapped in place; callers should refetch.
    Refreshed,
    /// Refresh failed; the session has been fully signed out.
    SignedOut,
}

type Listener = Box<dyn Fn(&Session) + Send + Sync>;

pub struct SessionContext {
    api: ApiClient,
    store: SessionStore<Box<dyn KeyValueStore>>,
    state: RwLock<Session>,
    listeners: Mutex<Vec<Listener>>,
}

impl SessionContext {
    pub fn new(api: ApiClient, store: impl KeyValueStore + 'static) -> Self {
        Self {
            api,
            store: SessionStore::new(Box::new(store)),
            state: RwLock::new(Session::default()),
            listeners: Mutex::new(Vec::new()),
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Snapshot of the current session.
    pub fn session(&self) -> Session {
        self.state.read().expect("session lock").clone()
    }

    pub fn access_token(&self) -> Option<String> {
        self.state.read().expect("session lock").access_token().map(str::to_string)
    }

    /// Apply a mutation, persist the credential set if one is present, and
    /// notify subscribers.
    pub fn mutate_session(&self, mutate: impl FnOnce(&mut Session)) {
        let session = {
            let mut state = self.state.write().expect("session lock");
            mutate(&mut state);
            if let Some(snapshot) = state.snapshot() {
                self.store.persist(&snapshot);
            }
            state.clone()
        };
        self.notify(&session);
    }

    /// Subscribe to session changes.
    pub fn subscribe(&self, listener: impl Fn(&Session) + Send + Sync + 'static) {
        self.listeners.lock().expect("listener lock").push(Box::new(listener));
    }

    fn notify(&self, session: &Session) {
        for listener in self.listeners.lock().expect("listener lock").iter() {
            listener(session);
        }
    }

    /// Load any persisted session. Runs once per process lifetime; later
    /// calls are no-ops. Always leaves `loaded` true.
    pub fn restore(&self) {
        let session = {
            let mut state = self.state.write().expect("session lock");
            if state.loaded() {
                return;
            }
            if let Some(snapshot) = self.store.restore() {
                state.load(snapshot);
            }
            state.mark_loaded();
            state.clone()
        };
        self.notify(&session);
    }

    /// Register a new account. Success adopts the returned user and tokens,
    /// an implicit sign-in. Failure surfaces the server's message untouched;
    /// the session is unchanged.
    pub async fn register(
        &self,
        username: &str,
        display_name: &str,
        password: &str,
        email: &str,
    ) -> Result<(), String> {
        let form = RegistrationForm {
            username: username.to_string(),
            display_name: display_name.to_string(),
            password: password.to_string(),
            confirm_password: password.to_string(),
            email: email.to_string(),
        };
        form.validate_all().map_err(|error| error.to_string())?;

        match self.api.register(username, display_name, email, password).await {
            Ok(auth) => {
                info!("Registration successful for: {}", username);
                self.mutate_session(|session| {
                    session.adopt(auth.user.clone(), auth.tokens.clone(), auth.expiration);
                });
                Ok(())
            }
            Err(error) => {
                warn!("Registration failed for {}: {}", username, error);
                Err(error.message())
            }
        }
    }

    /// Sign in with username and password. Same contract as [`register`].
    ///
    /// [`register`]: SessionContext::register
    pub async fn sign_in(&self, username: &str, password: &str) -> Result<(), String> {
        match self.api.sign_in(username, password).await {
            Ok(auth) => {
                info!("Sign-in successful for: {}", username);
                self.mutate_session(|session| {
                    session.adopt(auth.user.clone(), auth.tokens.clone(), auth.expiration);
                });
                Ok(())
            }
            Err(error) => {
                warn!("Sign-in failed for {}: {}", username, error);
                Err(error.message())
            }
        }
    }

    /// Clear the in-memory session and erase every persisted key. No
    /// network call. Idempotent.
    pub fn sign_out(&self) {
        let session = {
            let mut state = self.state.write().expect("session lock");
            state.clear();
            state.clone()
        };
        self.store.clear();
        self.notify(&session);
    }

    /// Compare the stored auth expiration to now and silently refresh if it
    /// has passed. Refresh failure forces a sign-out; the session is never
    /// left half-authenticated.
    pub async fn check_token_status(&self) -> TokenStatus {
        let (tokens, expiration) = {
            let state = self.state.read().expect("session lock");
            let tokens = match (state.access_token(), state.refresh_token()) {
                (Some(access), Some(refresh)) => Some((access.to_string(), refresh.to_string())),
                _ => None,
            };
            (tokens, state.expiration())
        };

        let Some((access_token, refresh_token)) = tokens else {
            return TokenStatus::Anonymous;
        };
        let Some(expiration) = expiration else {
            return TokenStatus::Fresh;
        };
        if !expiration.auth_expired(now_millis()) {
            return TokenStatus::Fresh;
        }

        match self.api.refresh(&access_token, &refresh_token).await {
            Ok(refreshed) => {
                info!("Session tokens refreshed");
                self.mutate_session(|session| {
                    session.replace_tokens(refreshed.tokens.clone(), refreshed.expiration);
                });
                TokenStatus::Refreshed
            }
            Err(error) => {
                warn!("Token refresh failed, signing out: {}", error);
                self.sign_out();
                TokenStatus::SignedOut
            }
        }
    }
}
