//! Ticket and comment endpoints.

use serde_json::json;

use super::ApiClient;
use crate::error::Result;
use crate::models::{Comment, HealthStatus, NewComment, NewTicket, Ticket, TicketFields};
use crate::types::TicketStatus;

/// Server-side filters accepted by `GET /tickets`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketQuery {
    /// `Some(false)` = unassigned only, `Some(true)` = assigned only
    pub assigned: Option<bool>,
    pub assigned_to_id: Option<u64>,
    pub status: Option<TicketStatus>,
}

impl TicketQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unassigned() -> Self {
        Self {
            assigned: Some(false),
            ..Self::default()
        }
    }

    pub fn assigned_to(user_id: u64) -> Self {
        Self {
            assigned_to_id: Some(user_id),
            ..Self::default()
        }
    }

    pub fn with_status(status: TicketStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_none() && self.assigned_to_id.is_none() && self.status.is_none()
    }

    /// Query-string pairs in the server's format.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(assigned) = self.assigned {
            params.push(("assigned", assigned.to_string()));
        }
        if let Some(id) = self.assigned_to_id {
            params.push(("assigned_to_id", id.to_string()));
        }
        if let Some(status) = self.status {
            params.push(("status", status.to_string()));
        }
        params
    }
}

impl ApiClient {
    /// `GET /tickets` with optional server-side filters.
    pub async fn get_tickets(&self, query: &TicketQuery) -> Result<Vec<Ticket>> {
        Ok(self.get("/tickets", &query.to_params()).await?.data)
    }

    /// `GET /tickets/:id`, including comments.
    pub async fn get_ticket(&self, id: u64) -> Result<Ticket> {
        Ok(self.get(&format!("/tickets/{id}"), &[]).await?.data)
    }

    pub async fn create_ticket(&self, ticket: &NewTicket) -> Result<Ticket> {
        Ok(self.post("/tickets", ticket).await?.data)
    }

    pub async fn update_ticket_status(&self, id: u64, status: TicketStatus) -> Result<Ticket> {
        let body = json!({ "status": status });
        Ok(self
            .put(&format!("/tickets/{id}/status"), &body)
            .await?
            .data)
    }

    pub async fn update_ticket(&self, id: u64, fields: &TicketFields) -> Result<Ticket> {
        Ok(self.put(&format!("/tickets/{id}"), fields).await?.data)
    }

    /// Assign the ticket to `user_id`, or unassign it with `None`.
    pub async fn assign_ticket(&self, id: u64, user_id: Option<u64>) -> Result<Ticket> {
        let body = json!({ "assigned_to_id": user_id });
        Ok(self
            .put(&format!("/tickets/{id}/assign"), &body)
            .await?
            .data)
    }

    pub async fn get_ticket_comments(&self, id: u64) -> Result<Vec<Comment>> {
        Ok(self
            .get(&format!("/tickets/{id}/comments"), &[])
            .await?
            .data)
    }

    pub async fn add_comment(&self, id: u64, comment: &NewComment) -> Result<Comment> {
        Ok(self
            .post(&format!("/tickets/{id}/comments"), comment)
            .await?
            .data)
    }

    pub async fn health_check(&self) -> Result<HealthStatus> {
        Ok(self.get("/health", &[]).await?.data)
    }
}
