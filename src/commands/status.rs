use serde_json::json;

use super::{CommandOutput, CliSession, open_session, ticket_lookup};
use crate::display::format_status_colored;
use crate::error::Result;
use crate::types::TicketStatus;
use crate::view::{StatusAction, TicketDetailView};

async fn open_detail(id: u64) -> Result<(CliSession, TicketDetailView)> {
    let session = open_session()?;
    let ticket = ticket_lookup(id, session.client().get_ticket(id).await)?;
    Ok((session, TicketDetailView::new(ticket)))
}

fn print_change(
    id: u64,
    previous: TicketStatus,
    current: TicketStatus,
    output_json: bool,
) -> Result<()> {
    tracing::info!("Ticket #{id}: {previous} -> {current}");
    CommandOutput::new(json!({
        "id": id,
        "action": "status_changed",
        "previous_status": previous,
        "new_status": current,
    }))
    .with_text(format!(
        "Updated #{} {} -> {}",
        id,
        format_status_colored(previous),
        format_status_colored(current)
    ))
    .print(output_json)
}

/// Run one of the detail view's status actions, refusing ones that do not
/// apply to the ticket's current status.
async fn apply_action(id: u64, action: StatusAction, output_json: bool) -> Result<()> {
    let (session, mut detail) = open_detail(id).await?;
    let previous = detail.ticket().status;
    let updated = detail.apply(session.client(), action).await?;
    print_change(id, previous, updated.status, output_json)
}

/// Mark a ticket as en_proceso
pub async fn cmd_start(id: u64, output_json: bool) -> Result<()> {
    apply_action(id, StatusAction::MarkInProgress, output_json).await
}

/// Mark a ticket as cerrado
pub async fn cmd_close(id: u64, output_json: bool) -> Result<()> {
    apply_action(id, StatusAction::Close, output_json).await
}

/// Reopen a closed ticket
pub async fn cmd_reopen(id: u64, output_json: bool) -> Result<()> {
    apply_action(id, StatusAction::Reopen, output_json).await
}

/// Set a ticket's status to an arbitrary value
pub async fn cmd_status(id: u64, status: TicketStatus, output_json: bool) -> Result<()> {
    let (session, mut detail) = open_detail(id).await?;
    let previous = detail.ticket().status;
    let updated = detail.change_status(session.client(), status).await?;
    print_change(id, previous, updated.status, output_json)
}
