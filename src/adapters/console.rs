use crate::core::session::DashboardFrame;
use crate::domain::model::{columns, Ticket};
use crate::utils::error::Result;
use chrono::NaiveDate;
use std::collections::BTreeMap;

const MAX_CELL_WIDTH: usize = 24;

/// Display collaborator for the terminal: labeled KPI metrics, the grouped
/// counts behind the three charts, and the ticket table sorted by
/// `CreatedTime` descending.
#[derive(Debug, Clone)]
pub struct ConsolePresenter {
    table_rows: usize,
    summary_json: bool,
}

impl Default for ConsolePresenter {
    fn default() -> Self {
        Self {
            table_rows: 20,
            summary_json: false,
        }
    }
}

impl ConsolePresenter {
    pub fn new(table_rows: usize, summary_json: bool) -> Self {
        Self {
            table_rows: table_rows.max(1),
            summary_json,
        }
    }

    pub fn render(&self, frame: &DashboardFrame<'_>) -> Result<()> {
        if self.summary_json {
            println!("{}", serde_json::to_string_pretty(&frame.summary)?);
            return Ok(());
        }

        let summary = &frame.summary;
        println!();
        println!("Total Tickets         {}", summary.total);
        println!("Within SLA            {:.1}%", summary.within_sla_percentage);
        match summary.avg_resolution_hours {
            Some(hours) => println!("Avg Resolution (hrs)  {:.2}", hours),
            None => println!("Avg Resolution (hrs)  n/a"),
        }
        match summary.bug_tickets {
            Some(count) => println!("Bug Tickets           {}", count),
            None => println!("Bug Tickets           n/a"),
        }

        self.render_counts(
            "Tickets by Priority",
            &summary.count_by_priority,
            frame.view.has_column(columns::PRIORITY),
        );
        self.render_counts(
            "Ticket Type Distribution",
            &summary.count_by_ticket_type,
            frame.view.has_column(columns::TICKET_TYPE),
        );
        self.render_trend(
            &summary.count_by_created_date,
            frame.view.has_column(columns::CREATED_TIME),
        );

        self.render_table(frame);
        Ok(())
    }

    /// A chart whose column is absent from the dataset is skipped entirely;
    /// an empty view still gets its (empty) section.
    fn render_counts(&self, title: &str, counts: &BTreeMap<String, usize>, present: bool) {
        if !present {
            return;
        }
        println!();
        println!("{}", title);
        for (label, count) in counts {
            println!("  {:<20} {}", label, count);
        }
    }

    fn render_trend(&self, counts: &BTreeMap<NaiveDate, usize>, present: bool) {
        if !present {
            return;
        }
        println!();
        println!("Tickets Over Time");
        for (date, count) in counts {
            println!("  {:<20} {}", date.format("%Y-%m-%d"), count);
        }
    }

    fn render_table(&self, frame: &DashboardFrame<'_>) {
        let view = &frame.view;
        println!();
        println!("Filtered Tickets ({} rows)", view.len());
        if view.columns().is_empty() {
            return;
        }

        // Newest tickets first; rows without a CreatedTime sort last.
        let mut rows: Vec<&Ticket> = view.rows().to_vec();
        rows.sort_by(|a, b| {
            b.timestamp(columns::CREATED_TIME)
                .cmp(&a.timestamp(columns::CREATED_TIME))
        });

        let rendered: Vec<Vec<String>> = rows
            .iter()
            .take(self.table_rows)
            .map(|ticket| {
                view.columns()
                    .iter()
                    .map(|column| clip(ticket.value(column).display()))
                    .collect()
            })
            .collect();

        let mut widths: Vec<usize> = view
            .columns()
            .iter()
            .map(|c| clip(c.clone()).len())
            .collect();
        for row in &rendered {
            for (idx, cell) in row.iter().enumerate() {
                widths[idx] = widths[idx].max(cell.len());
            }
        }

        let header: Vec<String> = view
            .columns()
            .iter()
            .zip(&widths)
            .map(|(name, width)| format!("{:<1$}", clip(name.clone()), width))
            .collect();
        println!("  {}", header.join("  "));

        for row in &rendered {
            let line: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{:<1$}", cell, width))
                .collect();
            println!("  {}", line.join("  "));
        }

        if view.len() > self.table_rows {
            println!("  ... and {} more rows", view.len() - self.table_rows);
        }
    }
}

fn clip(text: String) -> String {
    if text.chars().count() <= MAX_CELL_WIDTH {
        text
    } else {
        let clipped: String = text.chars().take(MAX_CELL_WIDTH - 3).collect();
        format!("{}...", clipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_keeps_short_text() {
        assert_eq!(clip("P1".to_string()), "P1");
    }

    #[test]
    fn test_clip_shortens_long_text() {
        let long = "a".repeat(40);
        let clipped = clip(long);
        assert_eq!(clipped.chars().count(), MAX_CELL_WIDTH);
        assert!(clipped.ends_with("..."));
    }
}
