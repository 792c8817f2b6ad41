//! In-memory session state.
//!
//! Invariant: user, access token, and refresh token are set together or not
//! at all. The only mutators are [`Session::adopt`], [`Session::replace_tokens`]
//! and [`Session::clear`], so a partial session cannot be constructed.

use gather_shared::types::EpochMillis;
use serde::{Deserialize, Serialize};

use crate::domain::user::User;

/// Access/refresh token pair as served by the auth endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Expiration timestamps for both tokens, epoch milliseconds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TokenExpiration {
    pub auth: EpochMillis,
    pub refresh: EpochMillis,
}

impl TokenExpiration {
    pub fn auth_expired(&self, now: EpochMillis) -> bool {
        self.auth < now
    }
}

/// The current viewer's session.
#[derive(Debug, Clone, Default)]
pub struct Session {
    user: Option<User>,
    access_token: Option<String>,
    refresh_token: Option<String>,
    expiration: Option<TokenExpiration>,
    loaded: bool,
}

impl Session {
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    pub fn expiration(&self) -> Option<TokenExpiration> {
        self.expiration
    }

    /// True once the initial restore attempt has completed.
    pub fn loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.access_token.is_some() && self.refresh_token.is_some()
    }

    /// Flip `loaded` to true. Never reverts.
    pub fn mark_loaded(&mut self) {
        self.loaded = true;
    }

    /// Adopt a full credential set, e.g. after sign-in or registration.
    /// Expiration may be absent (the registration endpoint omits it).
    pub fn adopt(&mut self, user: User, tokens: TokenPair, expiration: Option<TokenExpiration>) {
        self.user = Some(user);
        self.access_token = Some(tokens.access_token);
        self.refresh_token = Some(tokens.refresh_token);
        self.expiration = expiration;
    }

    /// Swap tokens and expiration in place after a silent refresh. The user
    /// is unchanged; a no-op on an anonymous session.
    pub fn replace_tokens(&mut self, tokens: TokenPair, expiration: TokenExpiration) {
        if self.user.is_none() {
            return;
        }
        self.access_token = Some(tokens.access_token);
        self.refresh_token = Some(tokens.refresh_token);
        self.expiration = Some(expiration);
    }

    /// Swap the user record, e.g. after a profile edit. A no-op on an
    /// anonymous session, so the all-or-nothing invariant holds.
    pub fn replace_user(&mut self, user: User) {
        if self.access_token.is_some() {
            self.user = Some(user);
        }
    }

    /// Reset every credential field to absent. `loaded` stays as it is.
    pub fn clear(&mut self) {
        self.user = None;
        self.access_token = None;
        self.refresh_token = None;
        self.expiration = None;
    }

    /// Full credential set for persistence, if present.
    pub fn snapshot(&self) -> Option<SessionSnapshot> {
        match (&self.user, &self.access_token, &self.refresh_token) {
            (Some(user), Some(access), Some(refresh)) => Some(SessionSnapshot {
                user: user.clone(),
                access_token: access.clone(),
                refresh_token: refresh.clone(),
                expiration: self.expiration,
            }),
            _ => None,
        }
    }

    /// Load a persisted snapshot. Used by the startup restore only.
    pub fn load(&mut self, snapshot: SessionSnapshot) {
        self.user = Some(snapshot.user);
        self.access_token = Some(snapshot.access_token);
        self.refresh_token = Some(snapshot.refresh_token);
        self.expiration = snapshot.expiration;
    }
}

/// A complete persisted credential set.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
    pub expiration: Option<TokenExpiration>,
}
