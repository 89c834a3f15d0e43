//! Session storage.
//!
//! The session is two opaque strings: the access token and the serialized
//! current-user record. Both are written on sign-in and both are removed on
//! sign-out or when re-authentication fails.
//!
//! [`KeyringStore`] keeps them in the OS credential store and is the default
//! for signed-in devices. [`FileStore`] is for hosts without a keyring.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use dashmap::DashMap;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{ClientError, Result};

/// Keyring service name for stored sessions.
pub const KEYRING_SERVICE: &str = "pointage";

/// Keys persisted by a [`SessionStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionKey {
    AccessToken,
    CurrentUser,
}

impl SessionKey {
    pub const ALL: [Self; 2] = [Self::AccessToken, Self::CurrentUser];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AccessToken => "access_token",
            Self::CurrentUser => "current_user",
        }
    }
}

/// Key-value store for the session strings.
pub trait SessionStore: Send + Sync {
    fn load(&self, key: SessionKey) -> Result<Option<String>>;

    fn save(&self, key: SessionKey, value: &str) -> Result<()>;

    fn remove(&self, key: SessionKey) -> Result<()>;

    /// Removes every session key.
    fn clear(&self) -> Result<()> {
        for key in SessionKey::ALL {
            self.remove(key)?;
        }
        Ok(())
    }
}

impl<S: SessionStore + ?Sized> SessionStore for Box<S> {
    fn load(&self, key: SessionKey) -> Result<Option<String>> {
        (**self).load(key)
    }

    fn save(&self, key: SessionKey, value: &str) -> Result<()> {
        (**self).save(key, value)
    }

    fn remove(&self, key: SessionKey) -> Result<()> {
        (**self).remove(key)
    }

    fn clear(&self) -> Result<()> {
        (**self).clear()
    }
}

/// In-process store. Lost on exit.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: DashMap<SessionKey, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn load(&self, key: SessionKey) -> Result<Option<String>> {
        Ok(self.values.get(&key).map(|v| v.value().clone()))
    }

    fn save(&self, key: SessionKey, value: &str) -> Result<()> {
        self.values.insert(key, value.to_string());
        Ok(())
    }

    fn remove(&self, key: SessionKey) -> Result<()> {
        self.values.remove(&key);
        Ok(())
    }
}

/// OS keyring store, one entry per [`SessionKey`].
///
/// Entries are created once and reused: `account` scopes them so several API
/// servers can keep separate sessions.
#[derive(Debug)]
pub struct KeyringStore {
    access_token: keyring::Entry,
    current_user: keyring::Entry,
}

impl KeyringStore {
    pub fn new(service: &str, account: &str) -> Result<Self> {
        let entry = |key: SessionKey| {
            keyring::Entry::new(service, &format!("{}:{account}", key.as_str()))
        };
        Ok(Self {
            access_token: entry(SessionKey::AccessToken)?,
            current_user: entry(SessionKey::CurrentUser)?,
        })
    }

    const fn entry(&self, key: SessionKey) -> &keyring::Entry {
        match key {
            SessionKey::AccessToken => &self.access_token,
            SessionKey::CurrentUser => &self.current_user,
        }
    }
}

impl SessionStore for KeyringStore {
    fn load(&self, key: SessionKey) -> Result<Option<String>> {
        match self.entry(key).get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, key: SessionKey, value: &str) -> Result<()> {
        self.entry(key).set_password(value)?;
        Ok(())
    }

    fn remove(&self, key: SessionKey) -> Result<()> {
        match self.entry(key).delete_password() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Attempts every key, then reports the first failure.
    fn clear(&self) -> Result<()> {
        SessionKey::ALL
            .map(|key| self.remove(key))
            .into_iter()
            .collect()
    }
}

/// JSON file store, one object keyed by [`SessionKey::as_str`].
///
/// Every write rewrites the whole file through an owner-only temporary
/// sibling and a rename. Memory only changes once the write has landed.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Opens `path`, starting empty if the file does not exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let values = match std::fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => BTreeMap::new(),
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(ClientError::Store(format!("{}: {e}", path.display()))),
        };
        debug!(path = %path.display(), "Opened session file");
        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn update(&self, f: impl FnOnce(&mut BTreeMap<String, String>)) -> Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| ClientError::Store("session lock poisoned".to_string()))?;
        let mut next = values.clone();
        f(&mut next);
        self.persist(&next)?;
        *values = next;
        Ok(())
    }

    fn persist(&self, values: &BTreeMap<String, String>) -> Result<()> {
        let json = serde_json::to_vec_pretty(values)?;
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let io_err =
            |e: std::io::Error| ClientError::Store(format!("{}: {e}", self.path.display()));

        // NamedTempFile is created 0600 on unix.
        let mut file = NamedTempFile::new_in(dir).map_err(io_err)?;
        file.write_all(&json).map_err(io_err)?;
        file.persist(&self.path).map_err(|e| io_err(e.error))?;
        Ok(())
    }
}

impl SessionStore for FileStore {
    fn load(&self, key: SessionKey) -> Result<Option<String>> {
        let values = self
            .values
            .lock()
            .map_err(|_| ClientError::Store("session lock poisoned".to_string()))?;
        Ok(values.get(key.as_str()).cloned())
    }

    fn save(&self, key: SessionKey, value: &str) -> Result<()> {
        self.update(|values| {
            values.insert(key.as_str().to_string(), value.to_string());
        })
    }

    fn remove(&self, key: SessionKey) -> Result<()> {
        self.update(|values| {
            values.remove(key.as_str());
        })
    }

    fn clear(&self) -> Result<()> {
        self.update(BTreeMap::clear)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise(store: &dyn SessionStore) {
        assert_eq!(store.load(SessionKey::AccessToken).unwrap(), None);

        store.save(SessionKey::AccessToken, "token-1").unwrap();
        store.save(SessionKey::CurrentUser, "{}").unwrap();
        store.save(SessionKey::AccessToken, "token-2").unwrap();
        assert_eq!(
            store.load(SessionKey::AccessToken).unwrap().as_deref(),
            Some("token-2")
        );

        store.remove(SessionKey::AccessToken).unwrap();
        assert_eq!(store.load(SessionKey::AccessToken).unwrap(), None);
        assert!(store.load(SessionKey::CurrentUser).unwrap().is_some());

        store.save(SessionKey::AccessToken, "token-3").unwrap();
        store.clear().unwrap();
        for key in SessionKey::ALL {
            assert_eq!(store.load(key).unwrap(), None, "{key:?}");
        }
    }

    #[test]
    fn test_memory_store() {
        exercise(&MemoryStore::new());
    }

    #[test]
    fn test_file_store() {
        let dir = tempfile::tempdir().unwrap();
        exercise(&FileStore::open(dir.path().join("session.json")).unwrap());
    }

    #[test]
    fn test_file_store_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = FileStore::open(&path).unwrap();
        store.save(SessionKey::AccessToken, "abc").unwrap();
        drop(store);

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(
            reopened.load(SessionKey::AccessToken).unwrap().as_deref(),
            Some("abc")
        );

        let on_disk: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk["access_token"], "abc");
    }

    #[cfg(unix)]
    #[test]
    fn test_file_store_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = FileStore::open(&path).unwrap();
        store.save(SessionKey::AccessToken, "secret").unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_file_store_failed_write_keeps_memory_in_sync() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sub");
        std::fs::create_dir(&sub).unwrap();
        let store = FileStore::open(sub.join("session.json")).unwrap();
        store.save(SessionKey::AccessToken, "secret").unwrap();

        std::fs::remove_dir_all(&sub).unwrap();

        assert!(matches!(store.clear(), Err(ClientError::Store(_))));
        assert_eq!(
            store.load(SessionKey::AccessToken).unwrap().as_deref(),
            Some("secret")
        );
        assert!(store.save(SessionKey::CurrentUser, "{}").is_err());
        assert_eq!(store.load(SessionKey::CurrentUser).unwrap(), None);
    }

    fn mock_keyring() {
        keyring::set_default_credential_builder(keyring::mock::default_credential_builder());
    }

    #[test]
    fn test_keyring_store() {
        mock_keyring();
        exercise(&KeyringStore::new(KEYRING_SERVICE, "https://api.pointage.test").unwrap());
    }

    #[test]
    fn test_keyring_clear_without_entries() {
        mock_keyring();
        let store = KeyringStore::new(KEYRING_SERVICE, "https://api.pointage.test").unwrap();
        store.clear().unwrap();
        store.remove(SessionKey::CurrentUser).unwrap();
        assert_eq!(store.load(SessionKey::CurrentUser).unwrap(), None);
    }

    #[test]
    fn test_boxed_store_delegates() {
        let store: Box<dyn SessionStore> = Box::new(MemoryStore::new());
        exercise(&store);
    }

    #[test]
    fn test_file_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            FileStore::open(&path),
            Err(ClientError::Serialization(_))
        ));
    }
}
