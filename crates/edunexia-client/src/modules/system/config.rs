use std::fs;
use std::path::{Path, PathBuf};

use edunexia_core::{DEFAULT_API_PATH, DEFAULT_ORIGIN};
use reqwest::Url;

use super::types::{CliConfig, Settings};
use crate::cli_args::{ConfigArgs, ConfigCommand};
use crate::modules::storage::StorageKind;

pub(crate) fn handle_config_command(
    args: ConfigArgs,
    config: &mut CliConfig,
    settings: &Settings,
) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Set(args) => {
            if let Some(api_url) = args.api_url {
                config.api_url = Some(api_url);
            }
            if let Some(origin) = args.origin {
                parse_origin(&origin)?;
                config.origin = Some(origin);
            }
            if let Some(storage) = args.storage {
                config.storage = Some(storage);
            }
            let resolved = resolve_settings(None, None, None, config)?;
            println!("api_url: {}", resolved.api_base);
        }
        ConfigCommand::Show => {
            println!("origin: {}", settings.origin);
            println!("api_url: {}", settings.api_base);
            println!("storage: {:?}", settings.storage);
        }
        ConfigCommand::Reset => {
            *config = CliConfig::default();
        }
    }
    Ok(())
}

/// Flag/environment values win over the config file, which wins over the
/// built-in defaults.
pub(crate) fn resolve_settings(
    api_url_arg: Option<String>,
    origin_arg: Option<String>,
    storage_arg: Option<StorageKind>,
    config: &CliConfig,
) -> anyhow::Result<Settings> {
    let origin = origin_arg
        .or_else(|| config.origin.clone())
        .unwrap_or_else(|| DEFAULT_ORIGIN.to_string());
    let origin = parse_origin(&origin)?;
    let api_url = api_url_arg
        .or_else(|| config.api_url.clone())
        .unwrap_or_else(|| DEFAULT_API_PATH.to_string());
    let api_base = resolve_api_base(&origin, &api_url)?;
    let storage = storage_arg.or(config.storage).unwrap_or_default();
    Ok(Settings {
        origin,
        api_base,
        storage,
    })
}

fn parse_origin(origin: &str) -> anyhow::Result<Url> {
    let url = Url::parse(origin).map_err(|err| anyhow::anyhow!("invalid origin '{origin}': {err}"))?;
    if url.cannot_be_a_base() {
        anyhow::bail!("origin must be an absolute http(s) address: {origin}");
    }
    Ok(url)
}

/// A relative API address is served from the same origin as the client.
pub(crate) fn resolve_api_base(origin: &Url, api_url: &str) -> anyhow::Result<Url> {
    let api_url = api_url.trim();
    if api_url.is_empty() {
        anyhow::bail!("api url is empty");
    }
    let resolved = match Url::parse(api_url) {
        Ok(url) => url,
        Err(_) => origin.join(api_url)?,
    };
    Ok(resolved)
}

pub(crate) fn data_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| anyhow::anyhow!("HOME is not set"))?;
    Ok(Path::new(&home).join(".edunexia"))
}

fn config_path() -> anyhow::Result<PathBuf> {
    Ok(data_dir()?.join("config.json"))
}

pub(crate) fn load_config() -> anyhow::Result<CliConfig> {
    let path = config_path()?;
    if !path.exists() {
        return Ok(CliConfig::default());
    }
    let contents = fs::read_to_string(path)?;
    let config = serde_json::from_str(&contents)?;
    Ok(config)
}

pub(crate) fn save_config(config: &CliConfig) -> anyhow::Result<()> {
    let path = config_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let contents = serde_json::to_string_pretty(config)?;
    fs::write(path, contents)?;
    Ok(())
}
