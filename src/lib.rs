pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod paths;
pub mod session;
pub mod storage;
pub mod types;
pub mod utils;
pub mod validation;
pub mod view;

#[cfg(test)]
pub(crate) mod test_guards;

pub use api::{ApiClient, ApiError, TicketQuery};
pub use config::Config;
pub use error::{Result, TickkkError};
pub use models::{Agent, Comment, Ticket, User};
pub use session::{SessionState, SessionStore};
pub use storage::{FileStorage, MemoryStorage, SessionStorage};
pub use types::{TicketCategory, TicketPriority, TicketStatus, UserRole};
pub use view::{App, FilterState, QueueFilter, ViewMode};
