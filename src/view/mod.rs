//! UI-independent view state.
//!
//! Each controller here owns the state one screen needs (collections,
//! selection, loading and error flags) and drives the API through an
//! [`ApiClient`](crate::api::ApiClient) it is handed. Rendering lives in
//! [`crate::display`].

pub mod admin;
pub mod app;
pub mod detail;
pub mod filter;
pub mod forms;
pub mod reports;
pub mod tickets;
pub mod users;

pub use admin::{AdminPanel, AdminView};
pub use app::{App, PublicView, ViewMode};
pub use detail::{CommentForm, CommentOutcome, StatusAction, TicketDetailView, available_actions};
pub use filter::{FilterState, QueueFilter, TicketFilter, apply_client_filter};
pub use forms::NewTicketForm;
pub use reports::{CategoryReport, CategoryStats, ReportBucket, compute_category_stats};
pub use tickets::{EmptyState, TicketListView};
pub use users::{UserForm, UserManagement};

#[cfg(test)]
pub(crate) mod test_support {
    use crate::models::Ticket;
    use crate::types::{TicketPriority, TicketStatus};

    pub fn ticket(
        id: u64,
        subject: &str,
        status: TicketStatus,
        priority: TicketPriority,
        category: Option<&str>,
    ) -> Ticket {
        Ticket {
            id,
            subject: subject.to_string(),
            description: "Descripción detallada del problema reportado".to_string(),
            client_name: format!("Cliente {id}"),
            client_email: format!("cliente{id}@example.com"),
            client_phone: None,
            status,
            priority,
            category: category.map(str::to_string),
            department: None,
            assigned_to_id: None,
            assigned_to: None,
            comments: Vec::new(),
            created_at: Some("2024-03-01T10:15:00".to_string()),
            updated_at: None,
        }
    }
}
