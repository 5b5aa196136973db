//! Single-ticket view: comments and status actions.

use crate::api::ApiClient;
use crate::error::{Result, TickkkError};
use crate::models::{Comment, NewComment, Ticket};
use crate::types::TicketStatus;
use crate::validation::{FieldErrors, require};

pub const COMMENT_ERROR_MESSAGE: &str = "Failed to add comment";
pub const STATUS_ERROR_MESSAGE: &str = "Failed to update ticket status";
const REQUIRED_MESSAGE: &str = "Please fill in all fields";

/// Input for a public comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentForm {
    pub author_name: String,
    pub author_email: String,
    pub comment_text: String,
}

impl CommentForm {
    pub fn new(
        author_name: impl Into<String>,
        author_email: impl Into<String>,
        comment_text: impl Into<String>,
    ) -> Self {
        Self {
            author_name: author_name.into(),
            author_email: author_email.into(),
            comment_text: comment_text.into(),
        }
    }

    /// All three fields must be non-blank.
    pub fn validate(&self) -> Result<()> {
        let mut errors = FieldErrors::new();
        require(&mut errors, "author_name", &self.author_name, REQUIRED_MESSAGE);
        require(&mut errors, "author_email", &self.author_email, REQUIRED_MESSAGE);
        require(&mut errors, "comment_text", &self.comment_text, REQUIRED_MESSAGE);
        errors.into_result()
    }

    fn to_request(&self) -> NewComment {
        NewComment {
            author_name: self.author_name.clone(),
            author_email: self.author_email.clone(),
            comment_text: self.comment_text.clone(),
            is_internal: false,
        }
    }
}

/// Status transitions offered for a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusAction {
    MarkInProgress,
    Close,
    Reopen,
}

impl StatusAction {
    pub fn target(&self) -> TicketStatus {
        match self {
            StatusAction::MarkInProgress => TicketStatus::EnProceso,
            StatusAction::Close => TicketStatus::Cerrado,
            StatusAction::Reopen => TicketStatus::Abierto,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusAction::MarkInProgress => "Mark in progress",
            StatusAction::Close => "Close",
            StatusAction::Reopen => "Reopen",
        }
    }
}

pub fn available_actions(status: TicketStatus) -> Vec<StatusAction> {
    let mut actions = Vec::new();
    if status != TicketStatus::EnProceso {
        actions.push(StatusAction::MarkInProgress);
    }
    if status != TicketStatus::Cerrado {
        actions.push(StatusAction::Close);
    }
    if status == TicketStatus::Cerrado {
        actions.push(StatusAction::Reopen);
    }
    actions
}

/// Result of a successful comment post.
#[derive(Debug, Clone)]
pub struct CommentOutcome {
    pub comment: Comment,
    /// The re-fetched ticket, if the follow-up fetch succeeded.
    pub ticket: Option<Ticket>,
}

#[derive(Debug, Clone)]
pub struct TicketDetailView {
    ticket: Ticket,
    comments: Vec<Comment>,
    error: Option<String>,
}

impl TicketDetailView {
    pub fn new(ticket: Ticket) -> Self {
        Self {
            comments: ticket.comments.clone(),
            ticket,
            error: None,
        }
    }

    pub fn ticket(&self) -> &Ticket {
        &self.ticket
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn actions(&self) -> Vec<StatusAction> {
        available_actions(self.ticket.status)
    }

    /// Replace the shown ticket (and its comments) with a newer copy.
    pub fn refresh(&mut self, ticket: Ticket) {
        self.comments = ticket.comments.clone();
        self.ticket = ticket;
    }

    /// Post a public comment, append it locally, then re-fetch the ticket.
    ///
    /// Validation failures make no network call. When the post fails the
    /// local comments are left as they were. On success the comment text is
    /// cleared from `form`.
    pub async fn add_comment(
        &mut self,
        api: &ApiClient,
        form: &mut CommentForm,
    ) -> Result<CommentOutcome> {
        form.validate()?;
        self.error = None;

        let comment = match api.add_comment(self.ticket.id, &form.to_request()).await {
            Ok(comment) => comment,
            Err(e) => {
                tracing::error!("Error adding comment: {e}");
                self.error = Some(COMMENT_ERROR_MESSAGE.to_string());
                return Err(e);
            }
        };
        self.comments.push(comment.clone());
        form.comment_text.clear();

        let ticket = match api.get_ticket(self.ticket.id).await {
            Ok(ticket) => {
                self.refresh(ticket.clone());
                Some(ticket)
            }
            Err(e) => {
                tracing::warn!("Comment added but re-fetching ticket #{} failed: {e}", self.ticket.id);
                None
            }
        };

        Ok(CommentOutcome { comment, ticket })
    }

    /// Move the ticket to `status` and show the server's copy.
    pub async fn change_status(&mut self, api: &ApiClient, status: TicketStatus) -> Result<Ticket> {
        self.error = None;
        match api.update_ticket_status(self.ticket.id, status).await {
            Ok(ticket) => {
                self.refresh(ticket.clone());
                Ok(ticket)
            }
            Err(e) => {
                tracing::error!("Error updating status: {e}");
                self.error = Some(STATUS_ERROR_MESSAGE.to_string());
                Err(e)
            }
        }
    }

    pub async fn apply(&mut self, api: &ApiClient, action: StatusAction) -> Result<Ticket> {
        if !self.actions().contains(&action) {
            return Err(TickkkError::Other(format!(
                "'{}' is not available for a ticket in status {}",
                action.label(),
                self.ticket.status
            )));
        }
        self.change_status(api, action.target()).await
    }
}
