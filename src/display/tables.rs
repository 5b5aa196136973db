//! Tabular output for user lists, agents and the category report.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Agent, User};
use crate::view::reports::CategoryReport;

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Username")]
    username: String,
    #[tabled(rename = "Full name")]
    full_name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Role")]
    role: &'static str,
    #[tabled(rename = "Active")]
    active: &'static str,
}

#[derive(Tabled)]
struct AgentRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Username")]
    username: String,
    #[tabled(rename = "Full name")]
    full_name: String,
    #[tabled(rename = "Role")]
    role: &'static str,
}

#[derive(Tabled)]
struct ReportRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Total")]
    total: usize,
    #[tabled(rename = "Abiertos")]
    abierto: usize,
    #[tabled(rename = "En Proceso")]
    en_proceso: usize,
    #[tabled(rename = "Cerrados")]
    cerrado: usize,
    #[tabled(rename = "%")]
    share: String,
}

pub fn users_table(users: &[User]) -> String {
    let rows: Vec<UserRow> = users
        .iter()
        .map(|u| UserRow {
            id: u.id,
            username: u.username.clone(),
            full_name: u.full_name.clone(),
            email: u.email.clone().unwrap_or_else(|| "-".to_string()),
            role: u.role.label(),
            active: if u.is_active { "yes" } else { "no" },
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

pub fn agents_table(agents: &[Agent]) -> String {
    let rows: Vec<AgentRow> = agents
        .iter()
        .map(|a| AgentRow {
            id: a.id,
            username: a.username.clone(),
            full_name: a.full_name.clone(),
            role: a.role.label(),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

/// Every bucket, including empty ones, in fixed order.
pub fn report_table(report: &CategoryReport) -> String {
    let grand_total = report.total();
    let rows: Vec<ReportRow> = report
        .rows
        .iter()
        .map(|r| ReportRow {
            category: format!("{} {}", r.category.icon(), r.category.label()),
            total: r.total,
            abierto: r.abierto,
            en_proceso: r.en_proceso,
            cerrado: r.cerrado,
            share: format!("{:.1}", r.percentage(grand_total)),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}
