//! Admin-only user management.

use crate::api::ApiClient;
use crate::error::{Result, TickkkError};
use crate::models::{NewUser, User, UserUpdate};
use crate::types::UserRole;
use crate::validation::{FieldErrors, is_blank, require};

pub const LOAD_USERS_ERROR: &str = "Failed to load users";
pub const SAVE_USER_ERROR: &str = "Failed to save user";
pub const TOGGLE_USER_ERROR: &str = "Failed to change user status";

/// Create/edit form. When editing, a blank password means "keep it".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub role: UserRole,
    pub is_active: bool,
}

impl Default for UserForm {
    fn default() -> Self {
        Self {
            username: String::new(),
            email: String::new(),
            password: String::new(),
            full_name: String::new(),
            role: UserRole::Agent,
            is_active: true,
        }
    }
}

impl UserForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-fill from an existing user; the password is never shown.
    pub fn from_user(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone().unwrap_or_default(),
            password: String::new(),
            full_name: user.full_name.clone(),
            role: user.role,
            is_active: user.is_active,
        }
    }

    pub fn validate_new(&self) -> Result<()> {
        let mut errors = FieldErrors::new();
        require(&mut errors, "username", &self.username, "Username is required");
        require(&mut errors, "email", &self.email, "Email is required");
        require(&mut errors, "password", &self.password, "Password is required");
        require(&mut errors, "full_name", &self.full_name, "Full name is required");
        errors.into_result()
    }

    pub fn to_new_user(&self) -> NewUser {
        NewUser {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            full_name: self.full_name.trim().to_string(),
            role: self.role,
            is_active: self.is_active,
        }
    }

    pub fn to_update(&self) -> UserUpdate {
        UserUpdate {
            username: Some(self.username.trim().to_string()),
            email: Some(self.email.trim().to_string()),
            password: (!is_blank(&self.password)).then(|| self.password.clone()),
            full_name: Some(self.full_name.trim().to_string()),
            role: Some(self.role),
            is_active: Some(self.is_active),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UserManagement {
    users: Vec<User>,
    loading: bool,
    error: Option<String>,
}

impl UserManagement {
    /// Open the panel for `current_user`. Anyone but an admin is refused.
    pub fn open(current_user: Option<&User>) -> Result<Self> {
        match current_user {
            Some(user) if user.is_admin() => Ok(Self::default()),
            Some(_) => Err(TickkkError::Forbidden),
            None => Err(TickkkError::NotAuthenticated),
        }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn find(&self, id: u64) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub async fn load(&mut self, api: &ApiClient) -> Result<()> {
        self.loading = true;
        let result = api.get_users().await;
        self.loading = false;
        match result {
            Ok(users) => {
                self.users = users;
                self.error = None;
                Ok(())
            }
            Err(e) => {
                tracing::error!("Error loading users: {e}");
                self.error = Some(LOAD_USERS_ERROR.to_string());
                Err(e)
            }
        }
    }

    pub async fn create(&mut self, api: &ApiClient, form: &UserForm) -> Result<User> {
        form.validate_new()?;
        self.error = None;
        let result = api.register_user(&form.to_new_user()).await;
        self.after_save(api, result, SAVE_USER_ERROR).await
    }

    /// Apply a partial update. An update carrying a blank password drops it.
    pub async fn edit(&mut self, api: &ApiClient, id: u64, mut update: UserUpdate) -> Result<User> {
        if update.password.as_deref().is_some_and(is_blank) {
            update.password = None;
        }
        self.error = None;
        let result = api.update_user(id, &update).await;
        self.after_save(api, result, SAVE_USER_ERROR).await
    }

    /// Flip a user's active flag based on the listed record.
    pub async fn toggle_active(&mut self, api: &ApiClient, id: u64) -> Result<User> {
        let current = self.find(id).ok_or(TickkkError::UserNotFound(id))?.is_active;
        let update = UserUpdate {
            is_active: Some(!current),
            ..UserUpdate::default()
        };
        self.error = None;
        let result = api.update_user(id, &update).await;
        self.after_save(api, result, TOGGLE_USER_ERROR).await
    }

    async fn after_save(
        &mut self,
        api: &ApiClient,
        result: Result<User>,
        fallback: &str,
    ) -> Result<User> {
        match result {
            Ok(user) => {
                if let Err(e) = self.load(api).await {
                    tracing::warn!("User saved but reloading the list failed: {e}");
                }
                Ok(user)
            }
            Err(e) => {
                tracing::error!("Error saving user: {e}");
                self.error = Some(e.user_message(fallback));
                Err(e)
            }
        }
    }
}
