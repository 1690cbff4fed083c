use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Contents of `~/.kaiten/config.toml`. Every field is optional; the
/// environment fills in or overrides the connection settings.
#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    pub base_url: Option<String>,
    pub token: Option<String>,
    pub timeout_secs: Option<u64>,
    pub log_level: Option<String>,
}

/// Immutable connection settings handed to the Kaiten client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub token: String,
    pub timeout: Duration,
}

fn config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".kaiten")
        .join("config.toml")
}

pub fn load_config() -> Result<AppConfig> {
    load_config_from(&config_path())
}

pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config: AppConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(config)
}

impl AppConfig {
    /// Merge with the environment (`KAITEN_BASE_URL`, `KAITEN_API_TOKEN`)
    /// and fail if either setting is still missing.
    pub fn client_config(&self, env: impl Fn(&str) -> Option<String>) -> Result<ClientConfig> {
        let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

        let Some(token) =
            non_empty(env("KAITEN_API_TOKEN")).or_else(|| non_empty(self.token.clone()))
        else {
            bail!("KAITEN_API_TOKEN is required");
        };
        let Some(base_url) =
            non_empty(env("KAITEN_BASE_URL")).or_else(|| non_empty(self.base_url.clone()))
        else {
            bail!("KAITEN_BASE_URL is required (e.g. https://mycompany.kaiten.ru/api/latest)");
        };

        Ok(ClientConfig {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            token: token.trim().to_string(),
            timeout: Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        })
    }
}
