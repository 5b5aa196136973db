//! Authentication and user-administration endpoints.

use super::ApiClient;
use crate::error::Result;
use crate::models::{Agent, LoginRequest, LoginResponse, NewUser, User, UserEnvelope, UserUpdate};

impl ApiClient {
    /// `POST /auth/login`. Only the raw exchange; session bookkeeping lives
    /// in [`crate::session::SessionStore::login`].
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        let body = LoginRequest { username, password };
        Ok(self.post("/auth/login", &body).await?.data)
    }

    /// `GET /auth/me` for the client's bearer token.
    pub async fn me(&self) -> Result<User> {
        Ok(self.get("/auth/me", &[]).await?.data)
    }

    /// `GET /auth/users` (admin only).
    pub async fn get_users(&self) -> Result<Vec<User>> {
        Ok(self.get("/auth/users", &[]).await?.data)
    }

    /// `POST /auth/register`.
    pub async fn register_user(&self, user: &NewUser) -> Result<User> {
        let envelope: UserEnvelope = self.post("/auth/register", user).await?.data;
        Ok(envelope.user)
    }

    /// `PUT /auth/users/:id` with only the fields to change.
    pub async fn update_user(&self, id: u64, update: &UserUpdate) -> Result<User> {
        let envelope: UserEnvelope = self.put(&format!("/auth/users/{id}"), update).await?.data;
        Ok(envelope.user)
    }

    /// `GET /auth/agents`: active users that tickets can be assigned to.
    pub async fn get_agents(&self) -> Result<Vec<Agent>> {
        Ok(self.get("/auth/agents", &[]).await?.data)
    }
}
