use std::sync::Arc;

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::modules::http::{ApiClient, History};
use crate::modules::storage::{StorageKind, TokenStore};

#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq)]
pub struct CliConfig {
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub storage: Option<StorageKind>,
}

/// Settings after flags, environment, config file and defaults are merged.
#[derive(Clone, Debug)]
pub struct Settings {
    pub origin: Url,
    pub api_base: Url,
    pub storage: StorageKind,
}

/// What every command runs against: one HTTP client, one storage.
pub struct AppContext {
    pub client: reqwest::Client,
    pub settings: Settings,
    pub store: TokenStore,
}

impl AppContext {
    /// Opens a page at `location`: a fresh history and a gateway bound to it.
    pub(crate) fn mount(&self, location: &str) -> (ApiClient, Arc<History>) {
        let history = Arc::new(History::new(location));
        let api = ApiClient::new(
            self.client.clone(),
            self.settings.api_base.as_str(),
            self.store.clone(),
            history.clone(),
        );
        (api, history)
    }

    /// Accepts an absolute URL or a path relative to the origin.
    pub(crate) fn resolve_location(&self, location: &str) -> anyhow::Result<Url> {
        let location = location.trim();
        if location.starts_with('/') {
            return Ok(self.settings.origin.join(location)?);
        }
        Url::parse(location).map_err(|err| anyhow::anyhow!("invalid location '{location}': {err}"))
    }
}

/// Path plus query of a URL, the part the router sees.
pub(crate) fn location_of(url: &Url) -> String {
    match url.query() {
        Some(query) => format!("{}?{query}", url.path()),
        None => url.path().to_string(),
    }
}
