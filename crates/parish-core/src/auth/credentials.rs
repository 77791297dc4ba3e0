//! Persistent storage for the session and refresh credentials.
//!
//! Three backends implement [`CredentialStore`]:
//! - [`KeyringStore`]: OS keychain via the `keyring` crate
//! - [`FileStore`]: a small JSON map on disk, rewritten atomically
//! - [`MemoryStore`]: process-local, used by tests and ephemeral sessions

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Mutex;

use keyring::Entry;
use thiserror::Error;
use tracing::debug;

/// Keychain service name for stored credentials
const SERVICE_NAME: &str = "parish-connect";

/// Credential file name in the data directory
const CREDENTIALS_FILE: &str = "credentials.json";

/// The two named values the store holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialKey {
    /// Session (access) credential, sent as the bearer token.
    UserToken,
    /// Refresh credential returned alongside a session credential.
    RefreshToken,
}

impl CredentialKey {
    pub const ALL: [CredentialKey; 2] = [CredentialKey::UserToken, CredentialKey::RefreshToken];

    /// Persisted entry name
    pub fn name(self) -> &'static str {
        match self {
            CredentialKey::UserToken => "userToken",
            CredentialKey::RefreshToken => "refreshToken",
        }
    }
}

impl fmt::Display for CredentialKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Credential storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl StoreError {
    fn unavailable(err: impl fmt::Display) -> Self {
        StoreError::StorageUnavailable(err.to_string())
    }
}

/// Durable key-value storage for credentials.
///
/// `set` returns only once the value is persisted, and a `get` issued after
/// it completes observes it. `get` reports a missing key as `Ok(None)` and
/// `remove` on a missing key is a no-op.
pub trait CredentialStore: Send + Sync {
    fn set(&self, key: CredentialKey, value: &str) -> Result<(), StoreError>;

    fn get(&self, key: CredentialKey) -> Result<Option<String>, StoreError>;

    fn remove(&self, key: CredentialKey) -> Result<(), StoreError>;
}

// ============================================================================
// Keyring
// ============================================================================

/// Credentials kept in the OS keychain, one entry per key under the
/// `parish-connect` service.
#[derive(Debug, Default)]
pub struct KeyringStore;

impl KeyringStore {
    pub fn new() -> Self {
        Self
    }

    fn entry(&self, key: CredentialKey) -> Result<Entry, StoreError> {
        Entry::new(SERVICE_NAME, key.name()).map_err(StoreError::unavailable)
    }
}

impl CredentialStore for KeyringStore {
    fn set(&self, key: CredentialKey, value: &str) -> Result<(), StoreError> {
        self.entry(key)?
            .set_password(value)
            .map_err(StoreError::unavailable)
    }

    fn get(&self, key: CredentialKey) -> Result<Option<String>, StoreError> {
        match self.entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(StoreError::unavailable(e)),
        }
    }

    fn remove(&self, key: CredentialKey) -> Result<(), StoreError> {
        match self.entry(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(StoreError::unavailable(e)),
        }
    }
}

// ============================================================================
// File
// ============================================================================

/// Credentials kept in a JSON file.
///
/// Every mutation is a read-modify-write of the whole map under a mutex, and
/// the file is replaced via rename so a crash never leaves a torn map.
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    /// Store located in the given data directory
    pub fn in_dir(dir: PathBuf) -> Self {
        Self::new(dir.join(CREDENTIALS_FILE))
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn read_map(&self) -> Result<HashMap<String, String>, StoreError> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let contents = std::fs::read_to_string(&self.path).map_err(StoreError::unavailable)?;
        if contents.trim().is_empty() {
            return Ok(HashMap::new());
        }
        serde_json::from_str(&contents).map_err(StoreError::unavailable)
    }

    fn write_map(&self, map: &HashMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(StoreError::unavailable)?;
        }
        let contents = serde_json::to_string_pretty(map).map_err(StoreError::unavailable)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, contents).map_err(StoreError::unavailable)?;
        std::fs::rename(&tmp, &self.path).map_err(StoreError::unavailable)
    }

    fn update<F>(&self, f: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut HashMap<String, String>) -> bool,
    {
        let _guard = self.lock.lock().map_err(StoreError::unavailable)?;
        let mut map = self.read_map()?;
        if f(&mut map) {
            self.write_map(&map)?;
        }
        Ok(())
    }
}

impl CredentialStore for FileStore {
    fn set(&self, key: CredentialKey, value: &str) -> Result<(), StoreError> {
        debug!(key = %key, "Writing credential to file store");
        self.update(|map| {
            map.insert(key.name().to_string(), value.to_string());
            true
        })
    }

    fn get(&self, key: CredentialKey) -> Result<Option<String>, StoreError> {
        let _guard = self.lock.lock().map_err(StoreError::unavailable)?;
        Ok(self.read_map()?.remove(key.name()))
    }

    fn remove(&self, key: CredentialKey) -> Result<(), StoreError> {
        self.update(|map| map.remove(key.name()).is_some())
    }
}

// ============================================================================
// Memory
// ============================================================================

#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<CredentialKey, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryStore {
    fn set(&self, key: CredentialKey, value: &str) -> Result<(), StoreError> {
        let mut values = self.values.lock().map_err(StoreError::unavailable)?;
        values.insert(key, value.to_string());
        Ok(())
    }

    fn get(&self, key: CredentialKey) -> Result<Option<String>, StoreError> {
        let values = self.values.lock().map_err(StoreError::unavailable)?;
        Ok(values.get(&key).cloned())
    }

    fn remove(&self, key: CredentialKey) -> Result<(), StoreError> {
        let mut values = self.values.lock().map_err(StoreError::unavailable)?;
        values.remove(&key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_key_names() {
        assert_eq!(CredentialKey::UserToken.name(), "userToken");
        assert_eq!(CredentialKey::RefreshToken.name(), "refreshToken");
        assert_eq!(CredentialKey::UserToken.to_string(), "userToken");
    }

    #[test]
    fn test_memory_store_get_missing_is_absent() {
        let store = MemoryStore::new();
        assert_eq!(store.get(CredentialKey::UserToken).unwrap(), None);
    }

    #[test]
    fn test_memory_store_latest_write_wins() {
        let store = MemoryStore::new();
        store.set(CredentialKey::UserToken, "v1").unwrap();
        store.set(CredentialKey::UserToken, "v2").unwrap();
        assert_eq!(store.get(CredentialKey::UserToken).unwrap().as_deref(), Some("v2"));
    }

    #[test]
    fn test_memory_store_remove_twice() {
        let store = MemoryStore::new();
        store.remove(CredentialKey::RefreshToken).unwrap();
        store.remove(CredentialKey::RefreshToken).unwrap();
        assert_eq!(store.get(CredentialKey::RefreshToken).unwrap(), None);
    }

    #[test]
    fn test_memory_store_keys_are_independent() {
        let store = MemoryStore::new();
        store.set(CredentialKey::UserToken, "access").unwrap();
        store.set(CredentialKey::RefreshToken, "refresh").unwrap();
        store.remove(CredentialKey::UserToken).unwrap();
        assert_eq!(store.get(CredentialKey::UserToken).unwrap(), None);
        assert_eq!(store.get(CredentialKey::RefreshToken).unwrap().as_deref(), Some("refresh"));
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::in_dir(dir.path().to_path_buf());
        store.set(CredentialKey::UserToken, "abc123").unwrap();

        let reopened = FileStore::in_dir(dir.path().to_path_buf());
        assert_eq!(reopened.get(CredentialKey::UserToken).unwrap().as_deref(), Some("abc123"));
        assert_eq!(reopened.get(CredentialKey::RefreshToken).unwrap(), None);
    }

    #[test]
    fn test_file_store_overwrite_and_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::in_dir(dir.path().join("nested"));

        store.set(CredentialKey::UserToken, "v1").unwrap();
        store.set(CredentialKey::UserToken, "v2").unwrap();
        assert_eq!(store.get(CredentialKey::UserToken).unwrap().as_deref(), Some("v2"));

        store.remove(CredentialKey::UserToken).unwrap();
        store.remove(CredentialKey::UserToken).unwrap();
        assert_eq!(store.get(CredentialKey::UserToken).unwrap(), None);
    }

    #[test]
    fn test_file_store_remove_without_file_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::in_dir(dir.path().to_path_buf());
        store.remove(CredentialKey::RefreshToken).unwrap();
        assert!(!store.path().exists());
    }

    #[test]
    fn test_file_store_corrupt_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::in_dir(dir.path().to_path_buf());
        std::fs::write(store.path(), "not json").unwrap();

        let err = store.get(CredentialKey::UserToken).unwrap_err();
        assert!(matches!(err, StoreError::StorageUnavailable(_)));
    }

    #[test]
    fn test_file_store_concurrent_writers_keep_both_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(FileStore::in_dir(dir.path().to_path_buf()));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || {
                    let key = if i % 2 == 0 {
                        CredentialKey::UserToken
                    } else {
                        CredentialKey::RefreshToken
                    };
                    store.set(key, &format!("value-{}", i)).unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert!(store.get(CredentialKey::UserToken).unwrap().is_some());
        assert!(store.get(CredentialKey::RefreshToken).unwrap().is_some());
    }
}
