//! Staff work area: queue-driven ticket list plus admin-only sub-views.

use std::fmt;

use crate::api::ApiClient;
use crate::error::{Result, TickkkError};
use crate::models::{Ticket, User};
use crate::types::TicketCategory;

use super::filter::{FilterState, QueueFilter};
use super::tickets::TicketListView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminView {
    #[default]
    Tickets,
    Reports,
    Users,
}

impl AdminView {
    pub fn requires_admin(&self) -> bool {
        !matches!(self, AdminView::Tickets)
    }
}

impl fmt::Display for AdminView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdminView::Tickets => write!(f, "tickets"),
            AdminView::Reports => write!(f, "reports"),
            AdminView::Users => write!(f, "users"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AdminPanel {
    user: User,
    view: AdminView,
    queue: QueueFilter,
    category: Option<TicketCategory>,
    list: TicketListView,
}

impl AdminPanel {
    /// Panel for `user`, on the tickets view with the unassigned queue.
    /// Nothing is loaded until [`reload`](Self::reload).
    pub fn new(user: User) -> Self {
        Self {
            user,
            view: AdminView::default(),
            queue: QueueFilter::default(),
            category: None,
            list: TicketListView::new(),
        }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn view(&self) -> AdminView {
        self.view
    }

    pub fn available_views(&self) -> Vec<AdminView> {
        if self.user.is_admin() {
            vec![AdminView::Tickets, AdminView::Reports, AdminView::Users]
        } else {
            vec![AdminView::Tickets]
        }
    }

    pub fn set_view(&mut self, view: AdminView) -> Result<()> {
        if view.requires_admin() && !self.user.is_admin() {
            return Err(TickkkError::Forbidden);
        }
        self.view = view;
        Ok(())
    }

    pub fn queue(&self) -> QueueFilter {
        self.queue
    }

    /// Switch queues, reloading from the server when the queue changes.
    pub async fn set_queue(&mut self, api: &ApiClient, queue: QueueFilter) -> bool {
        if queue == self.queue {
            return false;
        }
        self.queue = queue;
        self.reload(api).await
    }

    pub fn category(&self) -> Option<TicketCategory> {
        self.category
    }

    /// Narrow the held tickets locally; no request is made.
    pub fn set_category(&mut self, category: Option<TicketCategory>) {
        self.category = category;
    }

    pub fn filter(&self) -> FilterState {
        FilterState::new().with_category(self.category)
    }

    /// Fetch the current queue.
    pub async fn reload(&mut self, api: &ApiClient) -> bool {
        let query = self.queue.query(Some(self.user.id));
        self.list.load(api, &query).await
    }

    pub fn list(&self) -> &TicketListView {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut TicketListView {
        &mut self.list
    }

    pub fn visible(&self) -> Vec<&Ticket> {
        self.list.visible(&self.filter())
    }

    pub fn update(&mut self, ticket: Ticket) {
        self.list.update(ticket);
    }

    /// Tickets held for the current queue, before the category filter.
    pub fn count(&self) -> usize {
        self.list.tickets().len()
    }

    pub fn label(&self) -> &'static str {
        self.queue.label()
    }

    /// e.g. `Sin Asignar (3)`
    pub fn heading(&self) -> String {
        format!("{} ({})", self.label(), self.count())
    }
}
