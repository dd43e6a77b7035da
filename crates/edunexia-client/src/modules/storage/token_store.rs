use std::sync::Arc;

use edunexia_core::{storage_keys, Profile};
use tracing::{debug, warn};

use super::StorageBackend;

/// Failure-tolerant view over the persistent storage.
///
/// No operation here reports an error: storage problems are logged and read
/// as "no value", writes and removals become no-ops.
#[derive(Clone)]
pub(crate) struct TokenStore {
    backend: Arc<dyn StorageBackend>,
}

impl TokenStore {
    pub(crate) fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    pub(crate) fn get(&self, key: &str) -> Option<String> {
        match self.backend.get(key) {
            Ok(value) => value,
            Err(err) => {
                warn!(key = %key, "storage access restricted: {err:#}");
                None
            }
        }
    }

    pub(crate) fn set(&self, key: &str, value: &str) {
        if let Err(err) = self.backend.set(key, value) {
            warn!(key = %key, "storage write restricted: {err:#}");
        }
    }

    pub(crate) fn remove(&self, key: &str) {
        if let Err(err) = self.backend.remove(key) {
            warn!(key = %key, "storage removal restricted: {err:#}");
        }
    }

    pub(crate) fn token(&self) -> Option<String> {
        self.get(storage_keys::TOKEN)
            .filter(|token| !token.trim().is_empty())
    }

    pub(crate) fn set_token(&self, token: &str) {
        self.set(storage_keys::TOKEN, token);
    }

    pub(crate) fn clear_token(&self) {
        self.remove(storage_keys::TOKEN);
    }

    pub(crate) fn cached_profile(&self) -> Option<Profile> {
        let raw = self.get(storage_keys::USER)?;
        let profile = Profile::from_cached(&raw);
        if profile.is_none() {
            debug!("ignoring malformed cached profile");
        }
        profile
    }

    pub(crate) fn cache_profile(&self, profile: &Profile) {
        match profile.to_cached() {
            Ok(raw) => self.set(storage_keys::USER, &raw),
            Err(err) => warn!("failed to serialize profile for cache: {err}"),
        }
    }

    pub(crate) fn clear_profile(&self) {
        self.remove(storage_keys::USER);
    }

    pub(crate) fn clear_session(&self) {
        self.clear_token();
        self.clear_profile();
    }

    pub(crate) fn describe(&self) -> String {
        self.backend.describe()
    }
}
