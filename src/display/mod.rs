use owo_colors::OwoColorize;

use crate::types::{TicketPriority, TicketStatus};

pub mod cli_formatting;
pub mod data_formatting;
pub mod tables;

pub use cli_formatting::*;
pub use data_formatting::*;
pub use tables::*;

pub fn format_status_colored(status: TicketStatus) -> String {
    format_status_colored_with_format(status, |s| format!("[{}]", s))
}

pub fn format_status_colored_with_format<F>(status: TicketStatus, format_fn: F) -> String
where
    F: Fn(&str) -> String,
{
    let badge = format_fn(status.label());
    match status {
        TicketStatus::Abierto => badge.yellow().to_string(),
        TicketStatus::EnProceso => badge.cyan().to_string(),
        TicketStatus::Cerrado => badge.green().to_string(),
    }
}

pub fn format_priority_colored(priority: TicketPriority) -> String {
    let badge = format!("[{}]", priority.label());
    match priority {
        TicketPriority::Critica => badge.red().bold().to_string(),
        TicketPriority::Alta => badge.red().to_string(),
        TicketPriority::Media => badge.yellow().to_string(),
        TicketPriority::Baja => badge.dimmed().to_string(),
    }
}
