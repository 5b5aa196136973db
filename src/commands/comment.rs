use owo_colors::OwoColorize;
use serde_json::json;

use super::{CommandOutput, open_session, ticket_lookup};
use crate::display::format_comment;
use crate::error::Result;
use crate::view::{CommentForm, TicketDetailView};

/// Add a public comment to a ticket
pub async fn cmd_comment(
    id: u64,
    name: &str,
    email: &str,
    text: &str,
    output_json: bool,
) -> Result<()> {
    let session = open_session()?;
    let ticket = ticket_lookup(id, session.client().get_ticket(id).await)?;
    let mut detail = TicketDetailView::new(ticket);

    let mut form = CommentForm::new(name, email, text);
    let outcome = detail.add_comment(session.client(), &mut form).await?;
    let total = detail.comments().len();

    CommandOutput::new(json!({
        "id": id,
        "action": "comment_added",
        "comment": outcome.comment,
        "comment_count": total,
    }))
    .with_text(format!(
        "Added comment to {} ({} total)",
        format!("#{id}").cyan(),
        total
    ))
    .print(output_json)
}

/// List a ticket's comments, oldest first
pub async fn cmd_comments(id: u64, output_json: bool) -> Result<()> {
    let session = open_session()?;
    let comments = ticket_lookup(id, session.client().get_ticket_comments(id).await)?;

    let text = if comments.is_empty() {
        "No comments yet".dimmed().to_string()
    } else {
        comments
            .iter()
            .map(format_comment)
            .collect::<Vec<_>>()
            .join("\n\n")
    };

    CommandOutput::new(serde_json::to_value(&comments)?)
        .with_text(text)
        .print(output_json)
}
