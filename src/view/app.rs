//! Top-level navigation between the public desk, the login form and the
//! staff area.

use std::fmt;

use crate::api::TicketQuery;
use crate::error::{Result, TickkkError};
use crate::models::{Ticket, User};
use crate::session::SessionStore;
use crate::storage::SessionStorage;

use super::admin::AdminPanel;
use super::tickets::TicketListView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Public,
    Login,
    Admin,
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewMode::Public => write!(f, "public"),
            ViewMode::Login => write!(f, "login"),
            ViewMode::Admin => write!(f, "admin"),
        }
    }
}

/// Screens of the public desk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PublicView {
    #[default]
    Welcome,
    List,
    Detail,
    New,
}

#[derive(Debug)]
pub struct App<S: SessionStorage> {
    session: SessionStore<S>,
    mode: ViewMode,
    public_view: PublicView,
    tickets: TicketListView,
    checking_auth: bool,
}

impl<S: SessionStorage> App<S> {
    pub fn new(session: SessionStore<S>) -> Self {
        Self {
            session,
            mode: ViewMode::Public,
            public_view: PublicView::Welcome,
            tickets: TicketListView::new(),
            checking_auth: true,
        }
    }

    /// Restore and verify a persisted session. A verified session opens the
    /// staff area; anything else stays on the public desk.
    pub async fn start(&mut self) -> ViewMode {
        self.session.init();
        if self.session.is_authenticated() {
            match self.session.verify_token().await {
                Ok(user) => {
                    tracing::debug!("Resumed session for {}", user.username);
                    self.mode = ViewMode::Admin;
                }
                Err(e) => tracing::info!("Stored session rejected: {e}"),
            }
        }
        self.checking_auth = false;
        self.mode
    }

    pub fn is_checking_auth(&self) -> bool {
        self.checking_auth
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn public_view(&self) -> PublicView {
        self.public_view
    }

    pub fn session(&self) -> &SessionStore<S> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionStore<S> {
        &mut self.session
    }

    pub fn current_user(&self) -> Option<&User> {
        self.session.current_user()
    }

    pub fn tickets(&self) -> &TicketListView {
        &self.tickets
    }

    pub async fn login(&mut self, username: &str, password: &str) -> Result<User> {
        let user = self.session.login(username, password).await?;
        self.mode = ViewMode::Admin;
        Ok(user)
    }

    pub fn logout(&mut self) {
        self.session.logout();
        self.mode = ViewMode::Public;
    }

    /// The header's mode button.
    pub fn toggle(&mut self) -> ViewMode {
        self.mode = match self.mode {
            ViewMode::Public if self.current_user().is_none() => ViewMode::Login,
            ViewMode::Admin => ViewMode::Public,
            _ => ViewMode::Admin,
        };
        self.mode
    }

    /// Staff area for the signed-in user.
    pub fn admin_panel(&self) -> Result<AdminPanel> {
        self.current_user()
            .cloned()
            .map(AdminPanel::new)
            .ok_or(TickkkError::NotAuthenticated)
    }

    /// Load every ticket for the public desk.
    pub async fn load_public(&mut self) -> bool {
        let api = self.session.client().clone();
        self.tickets.load(&api, &TicketQuery::new()).await
    }

    pub fn show_list(&mut self) {
        self.public_view = PublicView::List;
        self.tickets.clear_selection();
    }

    pub fn show_welcome(&mut self) {
        self.public_view = PublicView::Welcome;
        self.tickets.clear_selection();
    }

    pub fn new_ticket(&mut self) {
        self.public_view = PublicView::New;
        self.tickets.clear_selection();
    }

    /// Open a held ticket. Returns false if it is not in the list.
    pub fn open_ticket(&mut self, id: u64) -> bool {
        if self.tickets.select(id) {
            self.public_view = PublicView::Detail;
            true
        } else {
            false
        }
    }

    pub fn ticket_created(&mut self, ticket: Ticket) {
        self.tickets.prepend(ticket.clone());
        self.tickets.set_selected(ticket);
        self.public_view = PublicView::Welcome;
    }

    pub fn ticket_updated(&mut self, ticket: Ticket) {
        self.tickets.update(ticket);
    }
}
