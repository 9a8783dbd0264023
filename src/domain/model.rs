use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::{BTreeSet, HashMap};

/// Column headers the pipeline knows how to interpret. Anything else in the
/// workbook passes through untouched and is preserved on export.
pub mod columns {
    pub const PRIORITY: &str = "Priority";
    pub const TICKET_TYPE: &str = "TicketType";
    pub const RESOLUTION_STATUS: &str = "ResolutionStatus";
    pub const CREATED_TIME: &str = "CreatedTime";
    pub const CLOSED_TIME: &str = "ClosedTime";

    /// The categorical columns a user can filter on.
    pub const CATEGORICAL: [&str; 3] = [PRIORITY, TICKET_TYPE, RESOLUTION_STATUS];

    pub fn is_timestamp(name: &str) -> bool {
        name == CREATED_TIME || name == CLOSED_TIME
    }
}

/// Display format for timestamps in the console table and the exported sheet.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One cell of the dataset. `Missing` stands in for empty cells, absent
/// columns and values that failed to parse, so downstream stages never have
/// to distinguish those cases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
    Timestamp(NaiveDateTime),
    Missing,
}

impl CellValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }

    /// Categorical label used for filter membership tests and grouped counts.
    /// Timestamps and missing cells have no label.
    pub fn label(&self) -> Option<Cow<'_, str>> {
        match self {
            CellValue::Text(s) => Some(Cow::Borrowed(s.as_str())),
            CellValue::Number(n) => Some(Cow::Owned(format_number(*n))),
            CellValue::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
            CellValue::Timestamp(_) | CellValue::Missing => None,
        }
    }

    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            CellValue::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }

    /// Human-readable rendering for the console table. Missing cells render
    /// as an empty string.
    pub fn display(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Timestamp(ts) => ts.format(TIMESTAMP_FORMAT).to_string(),
            CellValue::Missing => String::new(),
        }
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

const MISSING: &CellValue = &CellValue::Missing;

/// One row of the dataset: a mapping from column name to cell value. All
/// fields are optional; accessors degrade to `Missing`/`None` instead of
/// panicking on absent columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    fields: HashMap<String, CellValue>,
}

impl Ticket {
    pub fn new(fields: HashMap<String, CellValue>) -> Self {
        Self { fields }
    }

    pub fn value(&self, column: &str) -> &CellValue {
        self.fields.get(column).unwrap_or(MISSING)
    }

    pub fn label(&self, column: &str) -> Option<Cow<'_, str>> {
        self.value(column).label()
    }

    pub fn timestamp(&self, column: &str) -> Option<NaiveDateTime> {
        self.value(column).timestamp()
    }
}

/// An ordered sequence of tickets with the column set captured at load time.
/// Immutable for the lifetime of a session; filtered views borrow from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Ticket>,
}

impl Dataset {
    pub fn new(columns: Vec<String>, rows: Vec<Ticket>) -> Self {
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Ticket] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Distinct labels present in a column, sorted. This is what a filter UI
    /// would offer as the selectable options.
    pub fn distinct_values(&self, column: &str) -> Vec<String> {
        let mut values = BTreeSet::new();
        for row in &self.rows {
            if let Some(label) = row.label(column) {
                values.insert(label.into_owned());
            }
        }
        values.into_iter().collect()
    }

    /// Earliest and latest `CreatedTime` calendar dates over the whole
    /// dataset. `None` when the column is absent or holds no valid value.
    pub fn created_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut span: Option<(NaiveDate, NaiveDate)> = None;
        for row in &self.rows {
            if let Some(ts) = row.timestamp(columns::CREATED_TIME) {
                let date = ts.date();
                span = Some(match span {
                    Some((min, max)) => (min.min(date), max.max(date)),
                    None => (date, date),
                });
            }
        }
        span
    }
}
