//! Configuration commands for the client settings file.
//!
//! - `config show`: Display current configuration and session status
//! - `config get`: Print one configuration value
//! - `config set`: Change one configuration value

use owo_colors::OwoColorize;
use serde_json::json;

use super::CommandOutput;
use crate::config::{BASE_URL_ENV, CONFIG_KEYS, Config};
use crate::error::{Result, TickkkError};
use crate::paths;
use crate::storage::{FileStorage, SessionStorage};
use crate::types::{TOKEN_KEY, USER_KEY};

/// Accept `api-base-url` as well as `api_base_url`.
fn normalize_config_key(key: &str) -> Result<String> {
    let normalized = key.trim().replace('-', "_");
    if CONFIG_KEYS.contains(&normalized.as_str()) {
        Ok(normalized)
    } else {
        Err(TickkkError::Config(format!(
            "unknown config key '{key}'. Valid keys: {}",
            CONFIG_KEYS.join(", ")
        )))
    }
}

/// Mask a sensitive value by showing only the first 2 and last 2 characters
fn mask_sensitive_value(value: &str) -> String {
    let char_count = value.chars().count();
    if char_count > 4 {
        let first: String = value.chars().take(2).collect();
        let last: String = value.chars().skip(char_count - 2).collect();
        format!("{first}...{last}")
    } else {
        "****".to_string()
    }
}

/// Show current configuration
pub fn cmd_config_show(output_json: bool) -> Result<()> {
    let config = Config::load()?;
    let effective = config.effective_base_url();
    let overridden = effective != config.api_base_url;
    let resolved = config.resolved_base_url()?;

    let storage = FileStorage::open_default();
    let token = storage.get(TOKEN_KEY).map(|t| mask_sensitive_value(&t));
    let has_user = storage.get(USER_KEY).is_some();

    let json_output = json!({
        "api_base_url": config.api_base_url,
        "origin": config.origin,
        "effective_base_url": effective,
        "resolved_base_url": resolved.as_str(),
        "env_override": overridden,
        "session": {
            "token": token,
            "user_cached": has_user,
        },
        "config_file": Config::config_path().to_string_lossy(),
        "session_file": paths::session_path().to_string_lossy(),
    });

    let mut text_output = String::new();
    text_output.push_str(&format!("{}\n\n", "Configuration:".cyan().bold()));
    text_output.push_str(&format!("{}: {}\n", "api_base_url".cyan(), config.api_base_url));
    text_output.push_str(&format!("{}: {}\n", "origin".cyan(), config.origin));
    if overridden {
        text_output.push_str(&format!(
            "  {}\n",
            format!("overridden by {BASE_URL_ENV}={effective}").yellow()
        ));
    }
    text_output.push_str(&format!("{}: {}\n\n", "requests go to".cyan(), resolved));

    text_output.push_str(&format!("{}:\n", "session".cyan()));
    match &token {
        Some(masked) => text_output.push_str(&format!("  token: {}\n", masked.green())),
        None => text_output.push_str(&format!("  token: {}\n", "not logged in".dimmed())),
    }

    text_output.push('\n');
    text_output.push_str(&format!(
        "{}",
        format!("Config file: {}", Config::config_path().display()).dimmed()
    ));

    CommandOutput::new(json_output)
        .with_text(text_output)
        .print(output_json)
}

/// Set a configuration value
pub fn cmd_config_set(key: &str, value: &str, output_json: bool) -> Result<()> {
    let key = normalize_config_key(key)?;

    let mut config = Config::load()?;
    config.set(&key, value)?;
    config.save()?;
    tracing::debug!("Saved config to {}", Config::config_path().display());

    CommandOutput::new(json!({
        "action": "config_set",
        "key": key,
        "value": value,
        "success": true,
    }))
    .with_text(format!("Set {} to {}", key.cyan(), value))
    .print(output_json)
}

/// Get a specific configuration value
pub fn cmd_config_get(key: &str, output_json: bool) -> Result<()> {
    let key = normalize_config_key(key)?;
    let config = Config::load()?;
    let value = config.get(&key)?;

    CommandOutput::new(json!({
        "key": key,
        "value": value,
    }))
    .with_text(value)
    .print(output_json)
}
