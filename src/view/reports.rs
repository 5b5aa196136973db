//! Per-category ticket statistics.

use serde::{Serialize, Serializer};

use crate::models::Ticket;
use crate::types::{TicketCategory, TicketStatus};

/// Report row key: one of the fixed categories, or tickets with none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportBucket {
    Category(TicketCategory),
    Uncategorized,
}

impl ReportBucket {
    pub fn slug(&self) -> &'static str {
        match self {
            ReportBucket::Category(c) => c.as_str(),
            ReportBucket::Uncategorized => "sin_categoria",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReportBucket::Category(c) => c.report_label(),
            ReportBucket::Uncategorized => "Sin Categoría",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ReportBucket::Category(c) => c.icon(),
            ReportBucket::Uncategorized => "❓",
        }
    }

    /// Every bucket in report order.
    pub fn all() -> impl Iterator<Item = ReportBucket> {
        TicketCategory::ALL
            .into_iter()
            .map(ReportBucket::Category)
            .chain(std::iter::once(ReportBucket::Uncategorized))
    }
}

impl Serialize for ReportBucket {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.slug())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryStats {
    pub category: ReportBucket,
    pub total: usize,
    pub abierto: usize,
    pub en_proceso: usize,
    pub cerrado: usize,
}

impl CategoryStats {
    fn empty(category: ReportBucket) -> Self {
        Self {
            category,
            total: 0,
            abierto: 0,
            en_proceso: 0,
            cerrado: 0,
        }
    }

    fn count(&mut self, status: TicketStatus) {
        self.total += 1;
        match status {
            TicketStatus::Abierto => self.abierto += 1,
            TicketStatus::EnProceso => self.en_proceso += 1,
            TicketStatus::Cerrado => self.cerrado += 1,
        }
    }

    /// Share of `grand_total`, in percent, rounded to one decimal.
    pub fn percentage(&self, grand_total: usize) -> f64 {
        if grand_total == 0 {
            return 0.0;
        }
        (self.total as f64 * 1000.0 / grand_total as f64).round() / 10.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryReport {
    pub rows: Vec<CategoryStats>,
    /// Tickets whose category is outside the fixed set; they are not counted.
    pub skipped: usize,
}

impl CategoryReport {
    /// Sum of all counted tickets.
    pub fn total(&self) -> usize {
        self.rows.iter().map(|r| r.total).sum()
    }

    pub fn get(&self, bucket: ReportBucket) -> Option<&CategoryStats> {
        self.rows.iter().find(|r| r.category == bucket)
    }

    /// Rows with at least one ticket, busiest first.
    pub fn non_empty(&self) -> Vec<&CategoryStats> {
        let mut rows: Vec<&CategoryStats> = self.rows.iter().filter(|r| r.total > 0).collect();
        rows.sort_by(|a, b| b.total.cmp(&a.total));
        rows
    }
}

/// Count tickets per category and status. Every bucket is listed, even
/// with zero tickets.
pub fn compute_category_stats(tickets: &[Ticket]) -> CategoryReport {
    let mut rows: Vec<CategoryStats> = ReportBucket::all().map(CategoryStats::empty).collect();
    let mut skipped = 0;

    for ticket in tickets {
        let bucket = if ticket.is_uncategorized() {
            ReportBucket::Uncategorized
        } else if let Some(category) = ticket.category() {
            ReportBucket::Category(category)
        } else {
            tracing::debug!(
                "Ticket #{} has unknown category {:?}; not counted",
                ticket.id,
                ticket.category
            );
            skipped += 1;
            continue;
        };

        if let Some(row) = rows.iter_mut().find(|r| r.category == bucket) {
            row.count(ticket.status);
        }
    }

    CategoryReport { rows, skipped }
}
