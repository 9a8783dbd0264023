use crate::core::filter::FilteredView;
use crate::domain::model::{columns, Ticket};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// KPI bundle and grouped counts computed from a filtered view.
///
/// `total`, `within_sla_percentage` and the `count_by_*` maps are always
/// well-defined (zero/empty on an empty view). KPIs that depend on a column
/// report `None` when that column is absent, so the presenter can show an
/// "unavailable" sentinel instead of a misleading zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total: usize,
    pub within_sla_percentage: f64,
    pub avg_resolution_hours: Option<f64>,
    pub bug_tickets: Option<usize>,
    pub count_by_priority: BTreeMap<String, usize>,
    pub count_by_ticket_type: BTreeMap<String, usize>,
    pub count_by_created_date: BTreeMap<NaiveDate, usize>,
}

/// Aggregation stage: pure function of the filtered view.
pub fn summarize(view: &FilteredView<'_>) -> Summary {
    let total = view.len();

    let within_sla = view.rows().iter().filter(|t| is_within_sla(t)).count();
    let within_sla_percentage = if total > 0 {
        within_sla as f64 / total as f64 * 100.0
    } else {
        0.0
    };

    Summary {
        total,
        within_sla_percentage,
        avg_resolution_hours: avg_resolution_hours(view),
        bug_tickets: bug_tickets(view),
        count_by_priority: count_by_label(view, columns::PRIORITY),
        count_by_ticket_type: count_by_label(view, columns::TICKET_TYPE),
        count_by_created_date: count_by_created_date(view),
    }
}

/// SLA compliance is a case-insensitive substring test, so "Within SLA",
/// "within sla" and "Resolved Within Target" all count.
fn is_within_sla(ticket: &Ticket) -> bool {
    ticket
        .label(columns::RESOLUTION_STATUS)
        .map(|label| label.to_ascii_lowercase().contains("within"))
        .unwrap_or(false)
}

/// Mean resolution time in hours over rows carrying both timestamps. `None`
/// when either column is absent or no row has both.
fn avg_resolution_hours(view: &FilteredView<'_>) -> Option<f64> {
    if !view.has_column(columns::CREATED_TIME) || !view.has_column(columns::CLOSED_TIME) {
        return None;
    }
    let hours: Vec<f64> = view
        .rows()
        .iter()
        .filter_map(|t| {
            let created = t.timestamp(columns::CREATED_TIME)?;
            let closed = t.timestamp(columns::CLOSED_TIME)?;
            Some((closed - created).num_seconds() as f64 / 3600.0)
        })
        .collect();
    if hours.is_empty() {
        return None;
    }
    Some(hours.iter().sum::<f64>() / hours.len() as f64)
}

fn bug_tickets(view: &FilteredView<'_>) -> Option<usize> {
    if !view.has_column(columns::TICKET_TYPE) {
        return None;
    }
    Some(
        view.rows()
            .iter()
            .filter(|t| t.label(columns::TICKET_TYPE).as_deref() == Some("Bug"))
            .count(),
    )
}

fn count_by_label(view: &FilteredView<'_>, column: &str) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for ticket in view.rows() {
        if let Some(label) = ticket.label(column) {
            *counts.entry(label.into_owned()).or_insert(0) += 1;
        }
    }
    counts
}

/// Daily ticket counts for the trend chart. Only rows with a valid
/// `CreatedTime` contribute; the time-of-day is ignored.
fn count_by_created_date(view: &FilteredView<'_>) -> BTreeMap<NaiveDate, usize> {
    let mut counts = BTreeMap::new();
    for ticket in view.rows() {
        if let Some(ts) = ticket.timestamp(columns::CREATED_TIME) {
            *counts.entry(ts.date()).or_insert(0) += 1;
        }
    }
    counts
}
