use owo_colors::OwoColorize;
use serde_json::json;

use super::{CliSession, CommandOutput, require_login};
use crate::display::{agents_table, format_user_line, users_table};
use crate::error::{Result, TickkkError};
use crate::models::{User, UserUpdate};
use crate::types::UserRole;
use crate::view::{UserForm, UserManagement};

/// Fields for `tickkk users create`
#[derive(Debug, Clone)]
pub struct UserCreateOptions {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub role: UserRole,
    pub inactive: bool,
}

impl From<UserCreateOptions> for UserForm {
    fn from(options: UserCreateOptions) -> Self {
        UserForm {
            username: options.username,
            email: options.email,
            password: options.password,
            full_name: options.full_name,
            role: options.role,
            is_active: !options.inactive,
        }
    }
}

/// Fields for `tickkk users update`; unset fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UserUpdateOptions {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub full_name: Option<String>,
    pub role: Option<UserRole>,
    pub active: Option<bool>,
}

impl UserUpdateOptions {
    fn into_update(self) -> Result<UserUpdate> {
        let update = UserUpdate {
            username: self.username,
            email: self.email,
            password: self.password,
            full_name: self.full_name,
            role: self.role,
            is_active: self.active,
        };
        if update == UserUpdate::default() {
            return Err(TickkkError::Other(
                "nothing to update; pass at least one field".to_string(),
            ));
        }
        Ok(update)
    }
}

/// Open user management for the logged-in admin and load the list.
async fn open_management() -> Result<(CliSession, UserManagement)> {
    let session = require_login()?;
    let mut management = UserManagement::open(session.current_user())?;
    management.load(session.client()).await?;
    Ok((session, management))
}

fn user_json(user: &User) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(user)?)
}

/// List assignable staff
pub async fn cmd_agents(output_json: bool) -> Result<()> {
    let session = require_login()?;
    let agents = session.client().get_agents().await?;

    let text = if agents.is_empty() {
        "No agents".dimmed().to_string()
    } else {
        agents_table(&agents)
    };

    CommandOutput::new(serde_json::to_value(&agents)?)
        .with_text(text)
        .print(output_json)
}

/// List every user. Admins only.
pub async fn cmd_users_ls(output_json: bool) -> Result<()> {
    let (_session, management) = open_management().await?;

    CommandOutput::new(serde_json::to_value(management.users())?)
        .with_text(users_table(management.users()))
        .print(output_json)
}

pub async fn cmd_users_create(options: UserCreateOptions, output_json: bool) -> Result<()> {
    let (session, mut management) = open_management().await?;
    let form = UserForm::from(options);
    let user = management.create(session.client(), &form).await?;

    CommandOutput::new(user_json(&user)?)
        .with_text(format!("Created user {}", format_user_line(&user)))
        .print(output_json)
}

pub async fn cmd_users_update(id: u64, options: UserUpdateOptions, output_json: bool) -> Result<()> {
    let update = options.into_update()?;
    let (session, mut management) = open_management().await?;
    if management.find(id).is_none() {
        return Err(TickkkError::UserNotFound(id));
    }
    let user = management.edit(session.client(), id, update).await?;

    CommandOutput::new(user_json(&user)?)
        .with_text(format!("Updated user {}", format_user_line(&user)))
        .print(output_json)
}

/// Flip a user's active flag
pub async fn cmd_users_toggle(id: u64, output_json: bool) -> Result<()> {
    let (session, mut management) = open_management().await?;
    let user = management.toggle_active(session.client(), id).await?;

    let state = if user.is_active {
        "activated".green().to_string()
    } else {
        "deactivated".yellow().to_string()
    };

    CommandOutput::new(json!({
        "id": user.id,
        "action": "user_toggled",
        "is_active": user.is_active,
    }))
    .with_text(format!("{} {}", state, format_user_line(&user)))
    .print(output_json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_user_update_rejected() {
        assert!(UserUpdateOptions::default().into_update().is_err());
    }

    #[test]
    fn test_user_update_keeps_given_fields() {
        let options = UserUpdateOptions {
            role: Some(UserRole::Admin),
            active: Some(false),
            ..Default::default()
        };
        let update = options.into_update().unwrap();
        assert_eq!(update.role, Some(UserRole::Admin));
        assert_eq!(update.is_active, Some(false));
        assert!(update.password.is_none());
    }

    #[test]
    fn test_create_options_to_form() {
        let form = UserForm::from(UserCreateOptions {
            username: "agente2".to_string(),
            email: "agente2@example.com".to_string(),
            password: "secreto".to_string(),
            full_name: "Agente Dos".to_string(),
            role: UserRole::Agent,
            inactive: true,
        });
        assert!(!form.is_active);
        assert!(form.validate_new().is_ok());
    }
}
