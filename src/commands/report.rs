use owo_colors::OwoColorize;
use serde_json::json;

use super::{CommandOutput, require_login, session_user};
use crate::api::TicketQuery;
use crate::display::report_table;
use crate::error::Result;
use crate::view::{AdminPanel, AdminView, compute_category_stats};

/// Tickets per category and status over every ticket. Admins only.
pub async fn cmd_report(output_json: bool) -> Result<()> {
    let session = require_login()?;
    let mut panel = AdminPanel::new(session_user(&session)?);
    panel.set_view(AdminView::Reports)?;

    let tickets = session.client().get_tickets(&TicketQuery::new()).await?;
    let report = compute_category_stats(&tickets);
    let total = report.total();

    let busiest: Vec<_> = report
        .non_empty()
        .into_iter()
        .map(|row| {
            json!({
                "category": row.category,
                "total": row.total,
                "percentage": row.percentage(total),
            })
        })
        .collect();

    let mut text = report_table(&report);
    text.push_str(&format!("\n{} {}", "Total:".bold(), total));
    if report.skipped > 0 {
        text.push_str(&format!(
            "\n{}",
            format!("{} ticket(s) with an unknown category were not counted", report.skipped)
                .dimmed()
        ));
    }

    CommandOutput::new(json!({
        "total": total,
        "skipped": report.skipped,
        "categories": report.rows,
        "busiest": busiest,
    }))
    .with_text(text)
    .print(output_json)
}
