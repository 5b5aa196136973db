//! Client configuration.
//!
//! Configuration is stored in `<root>/config.yaml` (see [`crate::paths`]) and
//! includes:
//! - The API base URL (default `/api`)
//! - The origin a path-only base URL is resolved against
//!
//! `TICKKK_API_BASE_URL` overrides the file's base URL.

use std::env;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, TickkkError};
use crate::paths;

pub const BASE_URL_ENV: &str = "TICKKK_API_BASE_URL";
pub const DEFAULT_BASE_URL: &str = "/api";
pub const DEFAULT_ORIGIN: &str = "http://localhost:5000";

/// Keys accepted by `config get` / `config set`.
pub const CONFIG_KEYS: &[&str] = &["api_base_url", "origin"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the REST API. Either absolute (`https://host/api`) or a
    /// path resolved against `origin`.
    #[serde(default = "default_base_url")]
    pub api_base_url: String,

    /// Origin used when `api_base_url` is a bare path.
    #[serde(default = "default_origin")]
    pub origin: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_origin() -> String {
    DEFAULT_ORIGIN.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_base_url(),
            origin: default_origin(),
        }
    }
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> PathBuf {
        paths::config_path()
    }

    /// Load configuration from file, or return default if not found
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| {
            TickkkError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config at {}: {}", path.display(), e),
            ))
        })?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Base URL after applying the environment override.
    pub fn effective_base_url(&self) -> String {
        if let Ok(url) = env::var(BASE_URL_ENV)
            && !url.trim().is_empty()
        {
            return url;
        }
        self.api_base_url.clone()
    }

    /// Absolute base URL every request path is appended to.
    ///
    /// The returned URL always ends with `/` so relative joins keep the base
    /// path (`/api/` + `tickets` = `/api/tickets`).
    pub fn resolved_base_url(&self) -> Result<Url> {
        let raw = self.effective_base_url();
        let mut url = if raw.starts_with('/') {
            Url::parse(&self.origin)?.join(&raw)?
        } else {
            Url::parse(&raw)?
        };

        if url.cannot_be_a_base() {
            return Err(TickkkError::Config(format!(
                "API base URL '{raw}' cannot carry request paths"
            )));
        }

        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "api_base_url" => Ok(self.api_base_url.clone()),
            "origin" => Ok(self.origin.clone()),
            _ => Err(unknown_key(key)),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "api_base_url" => {
                if !value.starts_with('/') {
                    Url::parse(value)?;
                }
                self.api_base_url = value.to_string();
            }
            "origin" => {
                Url::parse(value)?;
                self.origin = value.to_string();
            }
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }
}

fn unknown_key(key: &str) -> TickkkError {
    TickkkError::Config(format!(
        "unknown config key '{key}', expected one of: {}",
        CONFIG_KEYS.join(", ")
    ))
}
