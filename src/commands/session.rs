//! Session commands: `login`, `logout`, `whoami`, `health`.

use owo_colors::OwoColorize;
use serde_json::json;

use super::{CommandOutput, open_session};
use crate::api::ApiClient;
use crate::config::Config;
use crate::error::{Result, TickkkError};
use crate::utils::read_stdin_line;

/// Log in and persist the session. Reads the password from stdin when it
/// is not passed on the command line.
pub async fn cmd_login(username: &str, password: Option<&str>, output_json: bool) -> Result<()> {
    let password = match password {
        Some(p) => p.to_string(),
        None => read_stdin_line("Password: ")?,
    };
    if password.is_empty() {
        return Err(TickkkError::Other("password must not be empty".to_string()));
    }

    let mut session = open_session()?;
    let user = session.login(username, &password).await?;

    CommandOutput::new(json!({
        "action": "login",
        "user": user,
    }))
    .with_text(format!(
        "Logged in as {} ({})",
        user.username.cyan(),
        user.role.label()
    ))
    .print(output_json)
}

pub fn cmd_logout(output_json: bool) -> Result<()> {
    let mut session = open_session()?;
    let was_logged_in = session.is_authenticated();
    session.logout();

    let text = if was_logged_in {
        "Logged out"
    } else {
        "Not logged in"
    };
    CommandOutput::new(json!({
        "action": "logout",
        "was_logged_in": was_logged_in,
    }))
    .with_text(text)
    .print(output_json)
}

/// Verify the stored token with the server. A rejected token clears the
/// session.
pub async fn cmd_whoami(output_json: bool) -> Result<()> {
    let mut session = open_session()?;
    if !session.is_authenticated() {
        return Err(TickkkError::NotAuthenticated);
    }
    let user = session.verify_token().await?;

    let mut text = format!("{} ({})", user.username.cyan(), user.full_name);
    text.push_str(&format!("\n  role: {}", user.role.label()));
    if let Some(email) = &user.email {
        text.push_str(&format!("\n  email: {email}"));
    }
    if !user.is_active {
        text.push_str(&format!("\n  {}", "inactive".red()));
    }

    CommandOutput::new(json!({ "user": user }))
        .with_text(text)
        .print(output_json)
}

pub async fn cmd_health(output_json: bool) -> Result<()> {
    let config = Config::load()?;
    let api = ApiClient::from_config(&config)?;
    let health = api.health_check().await?;

    let status = if health.status == "healthy" {
        health.status.green().to_string()
    } else {
        health.status.yellow().to_string()
    };
    let text = match &health.timestamp {
        Some(ts) => format!("{} at {} ({})", status, api.base_url(), ts.dimmed()),
        None => format!("{} at {}", status, api.base_url()),
    };

    CommandOutput::new(json!({
        "base_url": api.base_url().as_str(),
        "status": health.status,
        "timestamp": health.timestamp,
    }))
    .with_text(text)
    .print(output_json)
}
