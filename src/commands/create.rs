use owo_colors::OwoColorize;

use super::{CommandOutput, open_session, ticket_json};
use crate::error::Result;
use crate::types::{TicketCategory, TicketPriority};
use crate::view::NewTicketForm;

/// Fields for `tickkk create`
#[derive(Debug, Clone)]
pub struct CreateOptions {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub description: String,
    pub priority: TicketPriority,
    pub category: TicketCategory,
    pub department: Option<String>,
}

impl CreateOptions {
    fn into_form(self) -> NewTicketForm {
        NewTicketForm::for_client(self.name, self.email)
            .with_phone(self.phone.unwrap_or_default())
            .with_subject(self.subject)
            .with_description(self.description)
            .with_priority(self.priority)
            .with_category(self.category)
            .with_department(self.department.unwrap_or_default())
    }
}

/// Open a ticket. Invalid input is reported per field and nothing is sent.
pub async fn cmd_create(options: CreateOptions, output_json: bool) -> Result<()> {
    let session = open_session()?;
    let mut form = options.into_form();
    let ticket = form.submit(session.client()).await?;

    CommandOutput::new(ticket_json(&ticket)?)
        .with_text(format!(
            "Created ticket {} - {}",
            format!("#{}", ticket.id).cyan(),
            ticket.subject
        ))
        .print(output_json)
}
