use serde_json::json;

use super::{CommandOutput, open_session, require_login, session_user};
use crate::api::TicketQuery;
use crate::display::format_ticket_line;
use crate::error::{Result, TickkkError};
use crate::models::Ticket;
use crate::types::{TicketCategory, TicketPriority, TicketStatus};
use crate::view::{AdminPanel, FilterState, QueueFilter, TicketListView};

/// Options for the ls command
#[derive(Debug, Default)]
pub struct LsOptions {
    /// Staff queue; `None` lists every ticket like the public desk
    pub queue: Option<QueueFilter>,
    pub status: Option<TicketStatus>,
    pub priority: Option<TicketPriority>,
    pub category: Option<TicketCategory>,
    pub search: Option<String>,
    pub output_json: bool,
}

impl LsOptions {
    fn filter(&self) -> FilterState {
        FilterState::new()
            .with_status(self.status)
            .with_priority(self.priority)
            .with_category(self.category)
            .with_search(self.search.clone().unwrap_or_default())
    }
}

/// List tickets, narrowed on the client by the filter options.
pub async fn cmd_ls(opts: LsOptions) -> Result<()> {
    let filter = opts.filter();

    let (heading, list) = match opts.queue {
        Some(queue) => {
            let session = require_login()?;
            let mut panel = AdminPanel::new(session_user(&session)?);
            if queue == panel.queue() {
                panel.reload(session.client()).await;
            } else {
                panel.set_queue(session.client(), queue).await;
            }
            (Some(panel.heading()), panel.list().clone())
        }
        None => {
            let session = open_session()?;
            let mut list = TicketListView::new();
            list.load(session.client(), &TicketQuery::new()).await;
            (None, list)
        }
    };

    if let Some(error) = list.error() {
        return Err(TickkkError::Other(error.to_string()));
    }

    let visible: Vec<&Ticket> = list.visible(&filter);

    if opts.output_json {
        let tickets = serde_json::to_value(&visible)?;
        return CommandOutput::new(json!(tickets)).print(true);
    }

    let mut lines = Vec::new();
    if let Some(heading) = heading {
        lines.push(heading);
    }
    match list.empty_state(&filter) {
        Some(empty) => lines.push(empty.message().to_string()),
        None => lines.extend(visible.iter().map(|t| format_ticket_line(t))),
    }

    CommandOutput::new(json!(null))
        .with_text(lines.join("\n"))
        .print(false)
}
