//! Ticket list view state: the held collection, the selection and load
//! bookkeeping.

use crate::api::{ApiClient, TicketQuery};
use crate::error::Result;
use crate::models::Ticket;

use super::filter::{FilterState, apply_client_filter};

pub const LOAD_ERROR_MESSAGE: &str = "Failed to load tickets";

/// Why the visible list is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyState {
    Loading,
    Error(String),
    /// The server returned no tickets at all
    NoTickets,
    /// Tickets exist but none pass the current filters
    NoMatches,
}

impl EmptyState {
    pub fn message(&self) -> &str {
        match self {
            EmptyState::Loading => "Loading tickets...",
            EmptyState::Error(message) => message,
            EmptyState::NoTickets => "No tickets yet",
            EmptyState::NoMatches => "No tickets match the current filters",
        }
    }
}

/// Identifies one load so a late answer to an older load can be dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Debug, Clone, Default)]
pub struct TicketListView {
    tickets: Vec<Ticket>,
    selected: Option<Ticket>,
    loading: bool,
    error: Option<String>,
    seq: u64,
}

impl TicketListView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn selected(&self) -> Option<&Ticket> {
        self.selected.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Mark a load as started and return its ticket.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.seq += 1;
        self.loading = true;
        self.error = None;
        LoadTicket(self.seq)
    }

    /// Apply the outcome of a load. Returns false (and changes nothing) when
    /// a newer load has started since `ticket` was issued.
    ///
    /// On failure the previous collection is kept.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<Vec<Ticket>>) -> bool {
        if ticket.0 != self.seq {
            tracing::debug!("Discarding stale ticket load #{} (latest #{})", ticket.0, self.seq);
            return false;
        }

        self.loading = false;
        match result {
            Ok(tickets) => {
                self.tickets = tickets;
                self.reconcile_selection();
            }
            Err(e) => {
                tracing::error!("Error loading tickets: {e}");
                self.error = Some(LOAD_ERROR_MESSAGE.to_string());
            }
        }
        true
    }

    /// Fetch tickets for `query` and replace the collection.
    pub async fn load(&mut self, api: &ApiClient, query: &TicketQuery) -> bool {
        let ticket = self.begin_load();
        let result = api.get_tickets(query).await;
        self.finish_load(ticket, result)
    }

    /// Select a ticket from the collection. Returns false if it is not held.
    pub fn select(&mut self, id: u64) -> bool {
        match self.tickets.iter().find(|t| t.id == id) {
            Some(ticket) => {
                self.selected = Some(ticket.clone());
                true
            }
            None => false,
        }
    }

    /// Select a ticket fetched on its own (it need not be in the collection).
    pub fn set_selected(&mut self, ticket: Ticket) {
        self.selected = Some(ticket);
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Replace the ticket with the same id. The selection is replaced when
    /// its id matches even if the collection does not hold the ticket.
    pub fn update(&mut self, ticket: Ticket) {
        if let Some(slot) = self.tickets.iter_mut().find(|t| t.id == ticket.id) {
            *slot = ticket.clone();
        }
        if self.selected.as_ref().is_some_and(|s| s.id == ticket.id) {
            self.selected = Some(ticket);
        }
    }

    /// Put a freshly created ticket at the front.
    pub fn prepend(&mut self, ticket: Ticket) {
        self.tickets.retain(|t| t.id != ticket.id);
        self.tickets.insert(0, ticket);
    }

    pub fn visible(&self, filter: &FilterState) -> Vec<&Ticket> {
        apply_client_filter(&self.tickets, filter)
    }

    /// `None` when at least one ticket is visible.
    pub fn empty_state(&self, filter: &FilterState) -> Option<EmptyState> {
        if self.loading {
            return Some(EmptyState::Loading);
        }
        if let Some(error) = &self.error {
            return Some(EmptyState::Error(error.clone()));
        }
        if self.tickets.is_empty() {
            return Some(EmptyState::NoTickets);
        }
        if self.visible(filter).is_empty() {
            return Some(EmptyState::NoMatches);
        }
        None
    }

    /// Drop a selection whose ticket vanished from a refreshed collection.
    fn reconcile_selection(&mut self) {
        let Some(selected) = &self.selected else {
            return;
        };
        if !self.tickets.iter().any(|t| t.id == selected.id) {
            tracing::debug!("Clearing selection of ticket #{} after refresh", selected.id);
            self.selected = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TickkkError;
    use crate::types::{TicketPriority, TicketStatus};
    use crate::view::test_support::ticket;

    fn view_with(ids: &[u64]) -> TicketListView {
        let mut view = TicketListView::new();
        let load = view.begin_load();
        let tickets = ids
            .iter()
            .map(|id| ticket(*id, "Asunto de prueba", TicketStatus::Abierto, TicketPriority::Media, None))
            .collect();
        assert!(view.finish_load(load, Ok(tickets)));
        view
    }

    #[test]
    fn test_load_replaces_collection() {
        let view = view_with(&[3, 1, 2]);
        let ids: Vec<u64> = view.tickets().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert!(!view.is_loading());
        assert!(view.error().is_none());
    }

    #[test]
    fn test_failed_load_keeps_previous_collection() {
        let mut view = view_with(&[1, 2]);
        let load = view.begin_load();
        assert!(view.is_loading());
        view.finish_load(load, Err(TickkkError::Other("boom".into())));
        assert_eq!(view.tickets().len(), 2);
        assert_eq!(view.error(), Some(LOAD_ERROR_MESSAGE));
        assert!(!view.is_loading());
    }

    #[test]
    fn test_stale_load_is_discarded() {
        let mut view = TicketListView::new();
        let first = view.begin_load();
        let second = view.begin_load();

        let newer = vec![ticket(2, "Segundo asunto", TicketStatus::Abierto, TicketPriority::Media, None)];
        assert!(view.finish_load(second, Ok(newer)));

        let older = vec![ticket(1, "Primer asunto", TicketStatus::Abierto, TicketPriority::Media, None)];
        assert!(!view.finish_load(first, Ok(older)));
        assert_eq!(view.tickets()[0].id, 2);
    }

    #[test]
    fn test_update_replaces_matching_entry() {
        let mut view = view_with(&[1, 2]);
        let mut changed = view.tickets()[1].clone();
        changed.status = TicketStatus::Cerrado;
        view.update(changed);
        assert_eq!(view.tickets()[1].status, TicketStatus::Cerrado);
        assert_eq!(view.tickets()[0].status, TicketStatus::Abierto);
    }

    #[test]
    fn test_update_outside_collection_still_replaces_selection() {
        let mut view = view_with(&[1, 2]);
        let outsider = ticket(9, "Ticket externo", TicketStatus::Abierto, TicketPriority::Baja, None);
        view.set_selected(outsider.clone());

        let mut changed = outsider;
        changed.status = TicketStatus::EnProceso;
        view.update(changed);

        assert_eq!(view.tickets().len(), 2);
        assert!(view.tickets().iter().all(|t| t.id != 9));
        assert_eq!(view.selected().unwrap().status, TicketStatus::EnProceso);
    }

    #[test]
    fn test_refresh_clears_vanished_selection() {
        let mut view = view_with(&[1, 2]);
        assert!(view.select(2));

        let load = view.begin_load();
        view.finish_load(
            load,
            Ok(vec![ticket(1, "Asunto de prueba", TicketStatus::Abierto, TicketPriority::Media, None)]),
        );
        assert!(view.selected().is_none());
    }

    #[test]
    fn test_refresh_keeps_present_selection() {
        let mut view = view_with(&[1, 2]);
        assert!(view.select(1));
        let load = view.begin_load();
        view.finish_load(
            load,
            Ok(vec![ticket(1, "Asunto de prueba", TicketStatus::Abierto, TicketPriority::Media, None)]),
        );
        assert_eq!(view.selected().map(|t| t.id), Some(1));
    }

    #[test]
    fn test_select_unknown_id() {
        let mut view = view_with(&[1]);
        assert!(!view.select(5));
        assert!(view.selected().is_none());
    }

    #[test]
    fn test_prepend_puts_ticket_first() {
        let mut view = view_with(&[1, 2]);
        view.prepend(ticket(3, "Ticket nuevo", TicketStatus::Abierto, TicketPriority::Media, None));
        let ids: Vec<u64> = view.tickets().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_empty_states() {
        let mut view = TicketListView::new();
        let filter = FilterState::new();
        assert_eq!(view.empty_state(&filter), Some(EmptyState::NoTickets));

        let load = view.begin_load();
        assert_eq!(view.empty_state(&filter), Some(EmptyState::Loading));
        view.finish_load(load, Err(TickkkError::Other("down".into())));
        assert_eq!(
            view.empty_state(&filter),
            Some(EmptyState::Error(LOAD_ERROR_MESSAGE.to_string()))
        );

        let view = view_with(&[1]);
        assert_eq!(view.empty_state(&filter), None);
        let narrow = FilterState::new().with_status(Some(TicketStatus::Cerrado));
        assert_eq!(view.empty_state(&narrow), Some(EmptyState::NoMatches));
    }
}
