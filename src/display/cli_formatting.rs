use owo_colors::OwoColorize;

use crate::models::{Comment, Ticket, User};
use crate::types::TicketCategory;
use crate::view::detail::available_actions;

use super::data_formatting::{format_timestamp, truncate};
use super::{format_priority_colored, format_status_colored};

/// Widest subject shown in a list line.
const SUBJECT_WIDTH: usize = 60;

/// Human label for a ticket's category: the fixed label, the raw slug for
/// unknown ones, `-` when there is none.
pub fn format_category(ticket: &Ticket) -> String {
    if ticket.is_uncategorized() {
        return "-".to_string();
    }
    match ticket.category() {
        Some(category) => category.label().to_string(),
        None => ticket.category.clone().unwrap_or_default(),
    }
}

pub fn format_category_with_icon(category: TicketCategory) -> String {
    format!("{} {}", category.icon(), category.label())
}

/// Format a ticket for single-line display with colors
pub fn format_ticket_line(ticket: &Ticket) -> String {
    let id = format!("#{:<6}", ticket.id);
    let assignee = ticket
        .assigned_to
        .as_ref()
        .map(|a| format!(" -> {}", a.full_name))
        .unwrap_or_default();

    format!(
        "{} {}{} {} ({}){}",
        id.cyan(),
        format_status_colored(ticket.status),
        format_priority_colored(ticket.priority),
        truncate(&ticket.subject, SUBJECT_WIDTH),
        ticket.client_name.dimmed(),
        assignee.dimmed(),
    )
}

pub fn format_comment(comment: &Comment) -> String {
    let when = comment
        .created_at
        .as_deref()
        .map(format_timestamp)
        .unwrap_or_default();
    let internal = if comment.is_internal {
        format!(" {}", "(internal)".magenta())
    } else {
        String::new()
    };
    format!(
        "{} <{}> {}{}\n  {}",
        comment.author_name.bold(),
        comment.author_email,
        when.dimmed(),
        internal,
        comment.comment_text
    )
}

/// Full ticket view: header, client fields, description, comments and the
/// status actions on offer.
pub fn format_ticket_detail(ticket: &Ticket) -> String {
    let mut out = format!(
        "{} {}\n{}{}",
        format!("#{}", ticket.id).cyan(),
        ticket.subject.bold(),
        format_status_colored(ticket.status),
        format_priority_colored(ticket.priority),
    );

    let mut field = |label: &str, value: &str| {
        out.push_str(&format!("\n{:<12} {}", format!("{label}:").dimmed(), value));
    };

    field("Client", &ticket.client_name);
    field("Email", &ticket.client_email);
    if let Some(phone) = &ticket.client_phone {
        field("Phone", phone);
    }
    field("Category", &format_category(ticket));
    if let Some(department) = &ticket.department {
        field("Department", department);
    }
    match &ticket.assigned_to {
        Some(agent) => field("Assigned", &format!("{} (@{})", agent.full_name, agent.username)),
        None => field("Assigned", "unassigned"),
    }
    if let Some(created) = &ticket.created_at {
        field("Created", &format_timestamp(created));
    }
    if let Some(updated) = &ticket.updated_at {
        field("Updated", &format_timestamp(updated));
    }

    out.push_str(&format!("\n\n{}", ticket.description));

    out.push_str(&format!("\n\n## Comments ({})", ticket.comments.len()));
    for comment in &ticket.comments {
        out.push_str(&format!("\n\n{}", format_comment(comment)));
    }

    let actions: Vec<&str> = available_actions(ticket.status)
        .iter()
        .map(|a| a.label())
        .collect();
    out.push_str(&format!("\n\n{} {}", "Actions:".dimmed(), actions.join(", ")));
    out
}

pub fn format_user_line(user: &User) -> String {
    format!(
        "{} @{} {} [{}]",
        format!("#{}", user.id).cyan(),
        user.username,
        user.full_name,
        user.role.label()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TicketPriority, TicketStatus};
    use crate::view::test_support::ticket;

    #[test]
    fn test_category_labels() {
        let mut t = ticket(1, "Asunto", TicketStatus::Abierto, TicketPriority::Media, Some("facturacion"));
        assert_eq!(format_category(&t), "Facturación");
        t.category = Some("legacy".to_string());
        assert_eq!(format_category(&t), "legacy");
        t.category = None;
        assert_eq!(format_category(&t), "-");
    }

    #[test]
    fn test_ticket_line_mentions_subject_and_client() {
        let t = ticket(12, "La impresora no funciona", TicketStatus::Abierto, TicketPriority::Alta, None);
        let line = format_ticket_line(&t);
        assert!(line.contains("#12"));
        assert!(line.contains("La impresora no funciona"));
        assert!(line.contains("Cliente 12"));
    }

    #[test]
    fn test_detail_lists_actions() {
        let t = ticket(3, "Correo caído", TicketStatus::Cerrado, TicketPriority::Media, None);
        let detail = format_ticket_detail(&t);
        assert!(detail.contains("Reopen"));
        assert!(detail.contains("## Comments (0)"));
        assert!(detail.contains("unassigned"));
    }
}
