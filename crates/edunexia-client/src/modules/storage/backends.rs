use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
#[cfg(test)]
use std::sync::atomic::{AtomicBool, Ordering};
#[cfg(test)]
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Persistent key-value storage the session is mirrored into.
///
/// Backends report failures; `TokenStore` is the layer that swallows them.
pub(crate) trait StorageBackend: Send + Sync {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;

    fn remove(&self, key: &str) -> anyhow::Result<()>;

    fn describe(&self) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    #[default]
    File,
    Keyring,
}

pub(crate) fn open_backend(kind: StorageKind) -> anyhow::Result<Box<dyn StorageBackend>> {
    Ok(match kind {
        StorageKind::File => Box::new(FileStorage::new(storage_path()?)),
        StorageKind::Keyring => Box::new(KeyringStorage::new(KEYRING_SERVICE)),
    })
}

fn storage_path() -> anyhow::Result<PathBuf> {
    Ok(crate::modules::system::data_dir()?.join("storage.json"))
}

/// JSON object on disk, read and rewritten on every access.
pub(crate) struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn load(&self) -> anyhow::Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&contents)?)
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, contents)?;
        Ok(())
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageBackend for FileStorage {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)?;
        debug!(key = %key, path = %self.path.display(), "stored value in file storage");
        Ok(())
    }

    fn remove(&self, key: &str) -> anyhow::Result<()> {
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.save(&entries)?;
        }
        Ok(())
    }

    fn describe(&self) -> String {
        format!("file ({})", self.path().display())
    }
}

const KEYRING_SERVICE: &str = "edunexia";

pub(crate) struct KeyringStorage {
    service: String,
}

impl KeyringStorage {
    pub(crate) fn new(service: &str) -> Self {
        Self {
            service: service.to_string(),
        }
    }

    fn entry(&self, key: &str) -> anyhow::Result<keyring::Entry> {
        keyring::Entry::new(&self.service, key)
            .map_err(|err| anyhow::anyhow!("failed to access keyring: {err}"))
    }
}

impl StorageBackend for KeyringStorage {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        match self.entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(err) => Err(anyhow::anyhow!("failed to load '{key}' from keychain: {err}")),
        }
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.entry(key)?
            .set_password(value)
            .map_err(|err| anyhow::anyhow!("failed to store '{key}' in keychain: {err}"))?;
        debug!(key = %key, "stored value in keyring");
        Ok(())
    }

    fn remove(&self, key: &str) -> anyhow::Result<()> {
        match self.entry(key)?.delete_password() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(err) => Err(anyhow::anyhow!("failed to delete '{key}' from keychain: {err}")),
        }
    }

    fn describe(&self) -> String {
        format!("keyring (service '{}')", self.service)
    }
}

#[cfg(test)]
#[derive(Default)]
pub(crate) struct MemoryStorage {
    entries: Mutex<BTreeMap<String, String>>,
    failing: AtomicBool,
}

#[cfg(test)]
impl MemoryStorage {
    /// Every later access fails, like a browser with storage disabled.
    pub(crate) fn fail_all(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    fn check(&self) -> anyhow::Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            anyhow::bail!("storage access denied");
        }
        Ok(())
    }
}

#[cfg(test)]
impl StorageBackend for MemoryStorage {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        self.check()?;
        let entries = self
            .entries
            .lock()
            .map_err(|_| anyhow::anyhow!("failed to lock memory storage"))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.check()?;
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| anyhow::anyhow!("failed to lock memory storage"))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> anyhow::Result<()> {
        self.check()?;
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| anyhow::anyhow!("failed to lock memory storage"))?;
        entries.remove(key);
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_storage_roundtrip() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let storage = FileStorage::new(dir.path().join("nested").join("storage.json"));
        assert_eq!(storage.get("edunexia_token")?, None);
        storage.set("edunexia_token", "abc")?;
        assert_eq!(storage.get("edunexia_token")?, Some("abc".to_string()));
        storage.remove("edunexia_token")?;
        assert_eq!(storage.get("edunexia_token")?, None);
        Ok(())
    }

    #[test]
    fn file_storage_reports_corrupt_file() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("storage.json");
        fs::write(&path, "not json")?;
        let storage = FileStorage::new(path);
        assert!(storage.get("edunexia_token").is_err());
        assert!(storage.set("edunexia_token", "abc").is_err());
        Ok(())
    }

    #[test]
    fn memory_storage_can_fail() {
        let storage = MemoryStorage::default();
        storage.set("k", "v").expect("set");
        storage.fail_all();
        assert!(storage.get("k").is_err());
        assert!(storage.remove("k").is_err());
    }
}
