//! Client-side ticket filtering.
//!
//! Filters are composable predicates over a [`Ticket`]; [`FilterState`] holds
//! the user's current selection and [`apply_client_filter`] derives the
//! visible sequence from it. Nothing here touches the network.

use std::fmt;
use std::str::FromStr;

use crate::api::TicketQuery;
use crate::error::TickkkError;
use crate::models::Ticket;
use crate::types::{TicketCategory, TicketPriority, TicketStatus};

/// Trait for ticket filters
pub trait TicketFilter: Send + Sync {
    fn matches(&self, ticket: &Ticket) -> bool;
}

/// Filter tickets by status
pub struct StatusFilter {
    target: TicketStatus,
}

impl StatusFilter {
    pub fn new(status: TicketStatus) -> Self {
        Self { target: status }
    }
}

impl TicketFilter for StatusFilter {
    fn matches(&self, ticket: &Ticket) -> bool {
        ticket.status == self.target
    }
}

/// Filter tickets by priority
pub struct PriorityFilter {
    target: TicketPriority,
}

impl PriorityFilter {
    pub fn new(priority: TicketPriority) -> Self {
        Self { target: priority }
    }
}

impl TicketFilter for PriorityFilter {
    fn matches(&self, ticket: &Ticket) -> bool {
        ticket.priority == self.target
    }
}

/// Filter tickets by exact category slug
pub struct CategoryFilter {
    target: TicketCategory,
}

impl CategoryFilter {
    pub fn new(category: TicketCategory) -> Self {
        Self { target: category }
    }
}

impl TicketFilter for CategoryFilter {
    fn matches(&self, ticket: &Ticket) -> bool {
        ticket.category.as_deref() == Some(self.target.as_str())
    }
}

/// Case-insensitive substring match on subject, client name or description.
pub struct SearchFilter {
    needle: String,
}

impl SearchFilter {
    pub fn new(text: &str) -> Self {
        Self {
            needle: text.to_lowercase(),
        }
    }
}

impl TicketFilter for SearchFilter {
    fn matches(&self, ticket: &Ticket) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        [&ticket.subject, &ticket.client_name, &ticket.description]
            .iter()
            .any(|field| field.to_lowercase().contains(&self.needle))
    }
}

/// The user's current client-side filter selection. `None` means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub category: Option<TicketCategory>,
    pub status: Option<TicketStatus>,
    pub priority: Option<TicketPriority>,
    pub search: String,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: Option<TicketCategory>) -> Self {
        self.category = category;
        self
    }

    pub fn with_status(mut self, status: Option<TicketStatus>) -> Self {
        self.status = status;
        self
    }

    pub fn with_priority(mut self, priority: Option<TicketPriority>) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// True when any predicate narrows the collection.
    pub fn is_active(&self) -> bool {
        self.category.is_some()
            || self.status.is_some()
            || self.priority.is_some()
            || !self.search.is_empty()
    }

    /// The active predicates, AND-composed by [`FilterState::matches`].
    pub fn filters(&self) -> Vec<Box<dyn TicketFilter>> {
        let mut filters: Vec<Box<dyn TicketFilter>> = Vec::new();
        if let Some(category) = self.category {
            filters.push(Box::new(CategoryFilter::new(category)));
        }
        if let Some(status) = self.status {
            filters.push(Box::new(StatusFilter::new(status)));
        }
        if let Some(priority) = self.priority {
            filters.push(Box::new(PriorityFilter::new(priority)));
        }
        if !self.search.is_empty() {
            filters.push(Box::new(SearchFilter::new(&self.search)));
        }
        filters
    }

    pub fn matches(&self, ticket: &Ticket) -> bool {
        self.filters().iter().all(|f| f.matches(ticket))
    }
}

/// Derive the visible tickets. Keeps server order; never adds or reorders.
pub fn apply_client_filter<'a>(tickets: &'a [Ticket], filter: &FilterState) -> Vec<&'a Ticket> {
    let filters = filter.filters();
    tickets
        .iter()
        .filter(|t| filters.iter().all(|f| f.matches(t)))
        .collect()
}

/// Admin work queues. Each maps to a server-side query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueueFilter {
    #[default]
    Unassigned,
    Mine,
    All,
    Closed,
}

impl QueueFilter {
    pub const ALL: [QueueFilter; 4] = [
        QueueFilter::Unassigned,
        QueueFilter::Mine,
        QueueFilter::All,
        QueueFilter::Closed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QueueFilter::Unassigned => "unassigned",
            QueueFilter::Mine => "mine",
            QueueFilter::All => "all",
            QueueFilter::Closed => "closed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QueueFilter::Unassigned => "Sin Asignar",
            QueueFilter::Mine => "Mis Tickets",
            QueueFilter::All => "Todos",
            QueueFilter::Closed => "Cerrados",
        }
    }

    /// Server query for this queue. `Mine` without a user id falls back to
    /// an unfiltered query.
    pub fn query(&self, user_id: Option<u64>) -> TicketQuery {
        match self {
            QueueFilter::Unassigned => TicketQuery::unassigned(),
            QueueFilter::Mine => match user_id {
                Some(id) => TicketQuery::assigned_to(id),
                None => {
                    tracing::warn!("'mine' queue requested without a current user");
                    TicketQuery::new()
                }
            },
            QueueFilter::All => TicketQuery::new(),
            QueueFilter::Closed => TicketQuery::with_status(TicketStatus::Cerrado),
        }
    }
}

impl fmt::Display for QueueFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for QueueFilter {
    type Err = TickkkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "unassigned" | "sin_asignar" => Ok(QueueFilter::Unassigned),
            "mine" | "mis_tickets" => Ok(QueueFilter::Mine),
            "all" | "todos" => Ok(QueueFilter::All),
            "closed" | "cerrados" => Ok(QueueFilter::Closed),
            _ => Err(TickkkError::InvalidQueue(s.to_string())),
        }
    }
}

/// Parse a filter argument where `all` means no filter.
pub fn parse_optional<T>(value: &str) -> Result<Option<T>, TickkkError>
where
    T: FromStr<Err = TickkkError>,
{
    if value.eq_ignore_ascii_case("all") || value.is_empty() {
        Ok(None)
    } else {
        value.parse().map(Some)
    }
}
