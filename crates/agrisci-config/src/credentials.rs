// Durable credential stores for the session token and username.

use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use agrisci_core::{CoreError, CredentialStore};

// ── File store ──────────────────────────────────────────────────────

/// JSON object on disk, one string value per key.
///
/// The file is re-read on every access so two processes sharing it see
/// each other's logins and logouts.
#[derive(Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>, CoreError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(CoreError::storage(format!(
                    "cannot read {}: {e}",
                    self.path.display()
                )));
            }
        };
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&raw).map_err(|e| {
            CoreError::storage(format!("corrupt credentials file {}: {e}", self.path.display()))
        })
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), CoreError> {
        let storage_err =
            |e: &dyn std::fmt::Display| CoreError::storage(format!("cannot write {}: {e}", self.path.display()));

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| storage_err(&e))?;
        }
        let body = serde_json::to_string_pretty(map).map_err(|e| storage_err(&e))?;

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&self.path).map_err(|e| storage_err(&e))?;

        // `mode` only applies on creation; tighten a file that already existed.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(0o600))
                .map_err(|e| storage_err(&e))?;
        }
        file.write_all(body.as_bytes()).map_err(|e| storage_err(&e))?;
        Ok(())
    }

    fn update(&self, f: impl FnOnce(&mut BTreeMap<String, String>)) -> Result<(), CoreError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| CoreError::storage("credential file lock poisoned"))?;
        let mut map = self.read_map()?;
        f(&mut map);
        self.write_map(&map)
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.read_map()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        debug!(key, path = %self.path.display(), "storing credential");
        self.update(|map| {
            map.insert(key.to_owned(), value.to_owned());
        })
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        if !self.path.exists() {
            return Ok(());
        }
        self.update(|map| {
            map.remove(key);
        })
    }
}

// ── Keyring store ───────────────────────────────────────────────────

/// OS keyring, one entry per key under a fixed service name.
#[derive(Debug, Clone)]
pub struct KeyringCredentialStore {
    service: String,
}

impl KeyringCredentialStore {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn entry(&self, key: &str) -> Result<keyring::Entry, CoreError> {
        keyring::Entry::new(&self.service, key)
            .map_err(|e| CoreError::storage(format!("keyring entry '{key}': {e}")))
    }
}

impl CredentialStore for KeyringCredentialStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        match self.entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(CoreError::storage(format!("keyring read '{key}': {e}"))),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        self.entry(key)?
            .set_password(value)
            .map_err(|e| CoreError::storage(format!("keyring write '{key}': {e}")))
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        match self.entry(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(CoreError::storage(format!("keyring delete '{key}': {e}"))),
        }
    }
}
