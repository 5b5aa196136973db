use serde_json::json;

use super::{CommandOutput, open_session, ticket_json, ticket_lookup};
use crate::display::format_ticket_detail;
use crate::error::Result;

/// Display a ticket with its comments and available status actions
pub async fn cmd_show(id: u64, output_json: bool) -> Result<()> {
    let session = open_session()?;
    let ticket = ticket_lookup(id, session.client().get_ticket(id).await)?;

    let mut value = ticket_json(&ticket)?;
    let actions: Vec<&str> = crate::view::available_actions(ticket.status)
        .iter()
        .map(|a| a.target().as_str())
        .collect();
    value["available_statuses"] = json!(actions);

    CommandOutput::new(value)
        .with_text(format_ticket_detail(&ticket))
        .print(output_json)
}
