//! Durable storage for the current credential and profile.
//!
//! Two logical keys (token, serialized profile) that belong together: `put`
//! writes both, `clear` removes both. A torn state — one key without the
//! other, or a profile that no longer parses — is reported to the caller;
//! the session manager treats it as "no session" and clears defensively.

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use thiserror::Error;

use societyhub_core::UserProfile;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("credential storage io: {0}")]
    Io(String),

    #[error("stored profile is corrupt: {0}")]
    Corrupt(String),
}

/// Scoped key/value persistence for the session credential pair.
pub trait CredentialStore: Send + Sync {
    fn token(&self) -> Result<Option<String>, StoreError>;

    fn profile(&self) -> Result<Option<UserProfile>, StoreError>;

    /// Store both keys together.
    fn put(&self, token: &str, profile: &UserProfile) -> Result<(), StoreError>;

    /// Remove both keys together. Clearing an empty store is a no-op.
    fn clear(&self) -> Result<(), StoreError>;
}

// ─────────────────────────────────────────────────────────────────────────────
// File-backed store
// ─────────────────────────────────────────────────────────────────────────────

const TOKEN_FILE: &str = "token";
const PROFILE_FILE: &str = "profile.json";

/// Credential store persisted as two files under an app-scoped directory.
///
/// Survives restarts, the reload-equivalent for a desktop client.
#[derive(Debug)]
pub struct FileCredentialStore {
    dir: PathBuf,
}

impl FileCredentialStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Store rooted at `{os data dir}/societyhub`.
    pub fn in_default_dir() -> Result<Self, StoreError> {
        let dir = default_dir().map_err(|e| StoreError::Io(format!("{e:#}")))?;
        Ok(Self::new(dir))
    }

    fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    fn read(&self, file: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path(file)) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::Io(format!("read {file}: {err}"))),
        }
    }

    fn remove(&self, file: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path(file)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StoreError::Io(format!("remove {file}: {err}"))),
        }
    }
}

impl CredentialStore for FileCredentialStore {
    fn token(&self) -> Result<Option<String>, StoreError> {
        self.read(TOKEN_FILE)
    }

    fn profile(&self) -> Result<Option<UserProfile>, StoreError> {
        match self.read(PROFILE_FILE)? {
            Some(json) => serde_json::from_str(&json)
                .map(Some)
                .map_err(|e| StoreError::Corrupt(e.to_string())),
            None => Ok(None),
        }
    }

    fn put(&self, token: &str, profile: &UserProfile) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| StoreError::Io(format!("create {:?}: {e}", self.dir)))?;

        let json = serde_json::to_string(profile).map_err(|e| StoreError::Corrupt(e.to_string()))?;
        fs::write(self.path(TOKEN_FILE), token)
            .map_err(|e| StoreError::Io(format!("write {TOKEN_FILE}: {e}")))?;
        fs::write(self.path(PROFILE_FILE), json)
            .map_err(|e| StoreError::Io(format!("write {PROFILE_FILE}: {e}")))?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.remove(TOKEN_FILE)?;
        self.remove(PROFILE_FILE)?;
        Ok(())
    }
}

/// Resolve `{os data dir}/societyhub`.
fn default_dir() -> anyhow::Result<PathBuf> {
    let base = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut h| {
                h.push(".local");
                h.push("share");
                h
            })
        })
        .context("failed to resolve OS app data directory")?;

    let mut dir = base;
    dir.push("societyhub");
    Ok(dir)
}

// ─────────────────────────────────────────────────────────────────────────────
// In-memory store
// ─────────────────────────────────────────────────────────────────────────────

/// In-memory credential store for tests.
///
/// Keeps the two keys as raw strings so tests can stage torn or corrupt
/// states the way a real persisted store can end up in.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    inner: Mutex<RawKeys>,
}

#[derive(Debug, Default)]
struct RawKeys {
    token: Option<String>,
    profile: Option<String>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage only the token key (torn state).
    pub fn set_raw_token(&self, token: &str) {
        if let Ok(mut keys) = self.inner.lock() {
            keys.token = Some(token.to_string());
        }
    }

    /// Stage only the profile key, possibly invalid JSON (torn/corrupt state).
    pub fn set_raw_profile(&self, json: &str) {
        if let Ok(mut keys) = self.inner.lock() {
            keys.profile = Some(json.to_string());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.inner
            .lock()
            .map(|keys| keys.token.is_none() && keys.profile.is_none())
            .unwrap_or(false)
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn token(&self) -> Result<Option<String>, StoreError> {
        let keys = self.inner.lock().map_err(|_| StoreError::Io("lock poisoned".into()))?;
        Ok(keys.token.clone())
    }

    fn profile(&self) -> Result<Option<UserProfile>, StoreError> {
        let keys = self.inner.lock().map_err(|_| StoreError::Io("lock poisoned".into()))?;
        match &keys.profile {
            Some(json) => serde_json::from_str(json)
                .map(Some)
                .map_err(|e| StoreError::Corrupt(e.to_string())),
            None => Ok(None),
        }
    }

    fn put(&self, token: &str, profile: &UserProfile) -> Result<(), StoreError> {
        let json = serde_json::to_string(profile).map_err(|e| StoreError::Corrupt(e.to_string()))?;
        let mut keys = self.inner.lock().map_err(|_| StoreError::Io("lock poisoned".into()))?;
        keys.token = Some(token.to_string());
        keys.profile = Some(json);
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        let mut keys = self.inner.lock().map_err(|_| StoreError::Io("lock poisoned".into()))?;
        keys.token = None;
        keys.profile = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use societyhub_core::{Role, SocietyId, UserId};

    use super::*;

    fn profile() -> UserProfile {
        UserProfile {
            id: UserId::new(4),
            name: "Ravi Menon".to_string(),
            email: "ravi@example.com".to_string(),
            role: Role::GUARD,
            society_id: SocietyId::new(2),
            society_name: "Palm Court".to_string(),
        }
    }

    #[test]
    fn file_store_round_trips_the_pair() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().to_path_buf());

        assert!(store.token().unwrap().is_none());
        assert!(store.profile().unwrap().is_none());

        store.put("tok-123", &profile()).unwrap();
        assert_eq!(store.token().unwrap().as_deref(), Some("tok-123"));
        assert_eq!(store.profile().unwrap().unwrap().role, Role::GUARD);

        store.clear().unwrap();
        assert!(store.token().unwrap().is_none());
        assert!(store.profile().unwrap().is_none());
    }

    #[test]
    fn file_store_clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().to_path_buf());
        store.clear().unwrap();
        store.clear().unwrap();
    }

    #[test]
    fn corrupt_profile_is_reported_not_swallowed() {
        let store = MemoryCredentialStore::new();
        store.set_raw_profile("{not json");
        assert!(matches!(store.profile(), Err(StoreError::Corrupt(_))));
    }
}
