mod comment;
mod config;
mod create;
mod ls;
mod report;
mod session;
mod show;
mod status;
mod update;
mod users;

pub use comment::{cmd_comment, cmd_comments};
pub use config::{cmd_config_get, cmd_config_set, cmd_config_show};
pub use create::{CreateOptions, cmd_create};
pub use ls::{LsOptions, cmd_ls};
pub use report::cmd_report;
pub use session::{cmd_health, cmd_login, cmd_logout, cmd_whoami};
pub use show::cmd_show;
pub use status::{cmd_close, cmd_reopen, cmd_start, cmd_status};
pub use update::{UpdateOptions, cmd_assign, cmd_update};
pub use users::{
    UserCreateOptions, UserUpdateOptions, cmd_agents, cmd_users_create, cmd_users_ls,
    cmd_users_toggle, cmd_users_update,
};

use serde_json::Value;

use crate::api::ApiClient;
use crate::config::Config;
use crate::error::{Result, TickkkError};
use crate::models::{Ticket, User};
use crate::session::SessionStore;
use crate::storage::FileStorage;

/// Session backed by the on-disk session file.
pub type CliSession = SessionStore<FileStorage>;

/// Output of a command: JSON for `--json`, text otherwise.
pub struct CommandOutput {
    json: Value,
    text: Option<String>,
}

impl CommandOutput {
    pub fn new(json: Value) -> Self {
        Self { json, text: None }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn print(self, output_json: bool) -> Result<()> {
        match self.text {
            Some(text) if !output_json => {
                println!("{text}");
                Ok(())
            }
            _ => print_json(&self.json),
        }
    }
}

pub fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Load config and restore any persisted session (unverified).
pub fn open_session() -> Result<CliSession> {
    let config = Config::load()?;
    let api = ApiClient::from_config(&config)?;
    let mut session = SessionStore::new(FileStorage::open_default(), api);
    session.init();
    Ok(session)
}

/// Like [`open_session`], but fails when nobody is logged in.
pub fn require_login() -> Result<CliSession> {
    let session = open_session()?;
    if !session.client().has_token() {
        return Err(TickkkError::NotAuthenticated);
    }
    Ok(session)
}

/// The logged-in user as cached by the last login or verification.
pub fn session_user(session: &CliSession) -> Result<User> {
    session
        .current_user()
        .cloned()
        .ok_or(TickkkError::NotAuthenticated)
}

/// Map a 404 on a ticket endpoint to a ticket-not-found error.
pub(crate) fn ticket_lookup<T>(id: u64, result: Result<T>) -> Result<T> {
    match result {
        Err(e) if e.status() == Some(404) => Err(TickkkError::TicketNotFound(id)),
        other => other,
    }
}

pub(crate) fn ticket_json(ticket: &Ticket) -> Result<Value> {
    Ok(serde_json::to_value(ticket)?)
}
