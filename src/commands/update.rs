use owo_colors::OwoColorize;
use serde_json::json;

use super::{CommandOutput, require_login, ticket_json, ticket_lookup};
use crate::error::{Result, TickkkError};
use crate::models::TicketFields;
use crate::types::{TicketCategory, TicketPriority};
use crate::validation::{
    FieldErrors, MIN_DESCRIPTION_LENGTH, MIN_SUBJECT_LENGTH, require_min_length,
};

/// Fields accepted by `tickkk update`
#[derive(Debug, Clone, Default)]
pub struct UpdateOptions {
    pub subject: Option<String>,
    pub description: Option<String>,
    pub priority: Option<TicketPriority>,
    pub category: Option<TicketCategory>,
    pub phone: Option<String>,
    pub department: Option<String>,
}

impl UpdateOptions {
    fn into_fields(self) -> Result<TicketFields> {
        let mut errors = FieldErrors::new();
        if let Some(subject) = &self.subject {
            require_min_length(
                &mut errors,
                "subject",
                subject,
                MIN_SUBJECT_LENGTH,
                &format!("Subject must be at least {MIN_SUBJECT_LENGTH} characters"),
            );
        }
        if let Some(description) = &self.description {
            require_min_length(
                &mut errors,
                "description",
                description,
                MIN_DESCRIPTION_LENGTH,
                &format!("Description must be at least {MIN_DESCRIPTION_LENGTH} characters"),
            );
        }
        errors.into_result()?;

        let fields = TicketFields {
            subject: self.subject,
            description: self.description,
            priority: self.priority,
            category: self.category,
            client_phone: self.phone,
            department: self.department,
        };
        if fields.is_empty() {
            return Err(TickkkError::Other(
                "nothing to update; pass at least one field".to_string(),
            ));
        }
        Ok(fields)
    }
}

/// Assign a ticket to a user, or unassign it when `user_id` is `None`.
pub async fn cmd_assign(id: u64, user_id: Option<u64>, output_json: bool) -> Result<()> {
    let session = require_login()?;
    let ticket = ticket_lookup(id, session.client().assign_ticket(id, user_id).await)?;

    let text = match &ticket.assigned_to {
        Some(agent) => format!("Assigned #{} to {}", id, agent.full_name.cyan()),
        None => match user_id {
            Some(user_id) => format!("Assigned #{id} to user #{user_id}"),
            None => format!("Unassigned #{id}"),
        },
    };

    CommandOutput::new(json!({
        "id": id,
        "action": "assigned",
        "assigned_to_id": ticket.assigned_to_id.or(user_id),
    }))
    .with_text(text)
    .print(output_json)
}

/// Change ticket fields. Only the given fields are sent.
pub async fn cmd_update(id: u64, options: UpdateOptions, output_json: bool) -> Result<()> {
    let fields = options.into_fields()?;
    let session = require_login()?;
    let ticket = ticket_lookup(id, session.client().update_ticket(id, &fields).await)?;

    let changed: Vec<String> = serde_json::to_value(&fields)?
        .as_object()
        .map(|o| o.keys().cloned().collect())
        .unwrap_or_default();

    CommandOutput::new(ticket_json(&ticket)?)
        .with_text(format!("Updated #{} ({})", id, changed.join(", ")))
        .print(output_json)
}
