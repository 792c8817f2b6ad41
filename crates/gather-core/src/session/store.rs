//! Durable key-value session storage.
//!
//! Models the browser's local storage: string keys to string values, writes
//! are best-effort and non-transactional. A crash between writes can leave a
//! stale set behind; the startup token check re-validates it.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use gather_shared::constants::{
    STORE_KEY_ACCESS_TOKEN, STORE_KEY_REFRESH_TOKEN, STORE_KEY_TOKEN_EXPIRATION, STORE_KEY_USER,
};
use tracing::warn;

use crate::session::state::SessionSnapshot;

/// String key-value store with local-storage semantics.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}

/// In-memory store, for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().expect("store lock").get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.write().expect("store lock").insert(key.into(), value.into());
    }

    fn remove(&self, key: &str) {
        self.entries.write().expect("store lock").remove(key);
    }
}

/// Store backed by a single JSON document on disk.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: RwLock<HashMap<String, String>>,
}

impl FileStore {
    /// Open the store, loading existing entries if the file is readable.
    /// A missing or corrupt file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = std::fs::read_to_string(&path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();
        Self { path, entries: RwLock::new(entries) }
    }

    fn flush(&self, entries: &HashMap<String, String>) {
        match serde_json::to_string(entries) {
            Ok(raw) => {
                if let Err(error) = std::fs::write(&self.path, raw) {
                    warn!("Failed to write session store {}: {}", self.path.display(), error);
                }
            }
            Err(error) => warn!("Failed to encode session store: {}", error),
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().expect("store lock").get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut entries = self.entries.write().expect("store lock");
        entries.insert(key.into(), value.into());
        self.flush(&entries);
    }

    fn remove(&self, key: &str) {
        let mut entries = self.entries.write().expect("store lock");
        entries.remove(key);
        self.flush(&entries);
    }
}

/// Persists the session's four keys as a unit on top of a [`KeyValueStore`].
pub struct SessionStore<S: KeyValueStore> {
    kv: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    /// Write the full credential set. Best-effort.
    pub fn persist(&self, snapshot: &SessionSnapshot) {
        match serde_json::to_string(&snapshot.user) {
            Ok(user_json) => self.kv.set(STORE_KEY_USER, &user_json),
            Err(error) => {
                warn!("Failed to encode session user: {}", error);
                return;
            }
        }
        self.kv.set(STORE_KEY_ACCESS_TOKEN, &snapshot.access_token);
        self.kv.set(STORE_KEY_REFRESH_TOKEN, &snapshot.refresh_token);
        if let Some(expiration) = snapshot.expiration {
            if let Ok(expiration_json) = serde_json::to_string(&expiration) {
                self.kv.set(STORE_KEY_TOKEN_EXPIRATION, &expiration_json);
            }
        }
    }

    /// Read back a persisted credential set. Anything short of a complete
    /// user + token pair restores as "no session".
    pub fn restore(&self) -> Option<SessionSnapshot> {
        let user_json = self.kv.get(STORE_KEY_USER)?;
        let access_token = self.kv.get(STORE_KEY_ACCESS_TOKEN)?;
        let refresh_token = self.kv.get(STORE_KEY_REFRESH_TOKEN)?;

        let user = match serde_json::from_str(&user_json) {
            Ok(user) => user,
            Err(error) => {
                warn!("Discarding undecodable persisted user: {}", error);
                return None;
            }
        };
        let expiration = self
            .kv
            .get(STORE_KEY_TOKEN_EXPIRATION)
            .and_then(|raw| serde_json::from_str(&raw).ok());

        Some(SessionSnapshot { user, access_token, refresh_token, expiration })
    }

    /// Erase all four keys. Idempotent.
    pub fn clear(&self) {
        self.kv.remove(STORE_KEY_USER);
        self.kv.remove(STORE_KEY_ACCESS_TOKEN);
        self.kv.remove(STORE_KEY_REFRESH_TOKEN);
        self.kv.remove(STORE_KEY_TOKEN_EXPIRATION);
    }

    pub fn contains_session_keys(&self) -> bool {
        self.kv.get(STORE_KEY_USER).is_some()
            || self.kv.get(STORE_KEY_ACCESS_TOKEN).is_some()
            || self.kv.get(STORE_KEY_REFRESH_TOKEN).is_some()
            || self.kv.get(STORE_KEY_TOKEN_EXPIRATION).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::User;
    use crate::session::state::TokenExpiration;

    fn snapshot() -> SessionSnapshot {
        let user: User =
            serde_json::from_str(r#"{"id":1,"username":"sam_doe","display_name":"Sam Doe"}"#)
                .unwrap();
        SessionSnapshot {
            user,
            access_token: "access-1".into(),
            refresh_token: "refresh-1".into(),
            expiration: Some(TokenExpiration { auth: 1_000, refresh: 2_000 }),
        }
    }

    #[test]
    fn test_persist_restore_round_trip() {
        let store = SessionStore::new(MemoryStore::new());
        store.persist(&snapshot());
        let restored = store.restore().expect("restores full set");
        assert_eq!(restored.user.username, "sam_doe");
        assert_eq!(restored.access_token, "access-1");
        assert_eq!(restored.expiration.unwrap().auth, 1_000);
    }

    #[test]
    fn test_partial_keys_restore_as_no_session() {
        let kv = MemoryStore::new();
        kv.set(STORE_KEY_ACCESS_TOKEN, "access-1");
        kv.set(STORE_KEY_REFRESH_TOKEN, "refresh-1");
        let store = SessionStore::new(kv);
        assert!(store.restore().is_none());
    }

    #[test]
    fn test_clear_removes_every_key() {
        let store = SessionStore::new(MemoryStore::new());
        store.persist(&snapshot());
        assert!(store.contains_session_keys());
        store.clear();
        assert!(!store.contains_session_keys());
        store.clear();
        assert!(!store.contains_session_keys());
    }

    #[test]
    fn test_corrupt_user_restores_as_no_session() {
        let kv = MemoryStore::new();
        kv.set(STORE_KEY_USER, "{not json");
        kv.set(STORE_KEY_ACCESS_TOKEN, "access-1");
        kv.set(STORE_KEY_REFRESH_TOKEN, "refresh-1");
        let store = SessionStore::new(kv);
        assert!(store.restore().is_none());
    }

    #[test]
    fn test_missing_expiration_is_tolerated() {
        let store = SessionStore::new(MemoryStore::new());
        let mut snap = snapshot();
        snap.expiration = None;
        store.persist(&snap);
        let restored = store.restore().expect("restores without expiration");
        assert!(restored.expiration.is_none());
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        {
            let store = SessionStore::new(FileStore::open(&path));
            store.persist(&snapshot());
        }

        let reopened = SessionStore::new(FileStore::open(&path));
        let restored = reopened.restore().expect("restores from disk");
        assert_eq!(restored.refresh_token, "refresh-1");
    }

    #[test]
    fn test_persist_writes_all_four_keys() {
        let mut kv = MockKeyValueStore::new();
        kv.expect_set().withf(|key, _| key == STORE_KEY_USER).times(1).return_const(());
        kv.expect_set().withf(|key, _| key == STORE_KEY_ACCESS_TOKEN).times(1).return_const(());
        kv.expect_set().withf(|key, _| key == STORE_KEY_REFRESH_TOKEN).times(1).return_const(());
        kv.expect_set()
            .withf(|key, _| key == STORE_KEY_TOKEN_EXPIRATION)
            .times(1)
            .return_const(());

        SessionStore::new(kv).persist(&snapshot());
    }

    #[test]
    fn test_clear_removes_all_four_keys() {
        let mut kv = MockKeyValueStore::new();
        for key in [
            STORE_KEY_USER,
            STORE_KEY_ACCESS_TOKEN,
            STORE_KEY_REFRESH_TOKEN,
            STORE_KEY_TOKEN_EXPIRATION,
        ] {
            kv.expect_remove().withf(move |k| k == key).times(1).return_const(());
        }

        SessionStore::new(kv).clear();
    }

    #[test]
    fn test_file_store_corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json at all").unwrap();

        let store = SessionStore::new(FileStore::open(&path));
        assert!(store.restore().is_none());
    }
}
