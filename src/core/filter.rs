use crate::core::date_range;
use crate::domain::model::{columns, Dataset, Ticket};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

/// Raw date-range input as a UI collaborator would hand it over: nothing, a
/// single day, or a two-ended interval. Normalization against the dataset
/// happens in [`date_range::normalize`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateSelection {
    #[default]
    Unbounded,
    Single(NaiveDate),
    Between(NaiveDate, NaiveDate),
}

/// The user's current filter selections. An empty selection set for a column
/// means "no filter on that column"; criteria are rebuilt from scratch on
/// every interaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    selections: BTreeMap<String, BTreeSet<String>>,
    created: DateSelection,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict a categorical column to the given values. An empty iterator
    /// leaves the column unfiltered.
    pub fn select<I, V>(mut self, column: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let set: BTreeSet<String> = values.into_iter().map(Into::into).collect();
        if !set.is_empty() {
            self.selections.insert(column.to_string(), set);
        }
        self
    }

    pub fn with_created(mut self, selection: DateSelection) -> Self {
        self.created = selection;
        self
    }

    pub fn selections(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.selections
    }

    pub fn created(&self) -> &DateSelection {
        &self.created
    }
}

/// The subsequence of dataset rows matching the current criteria, in the
/// dataset's original order. Borrowed, recomputed on demand, never stored.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    columns: &'a [String],
    rows: Vec<&'a Ticket>,
}

impl<'a> FilteredView<'a> {
    pub fn columns(&self) -> &'a [String] {
        self.columns
    }

    pub fn rows(&self) -> &[&'a Ticket] {
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
}

/// Filter stage: narrow the dataset down to the rows satisfying the
/// criteria. All predicates compose by logical AND. Pure function of its two
/// inputs.
pub fn apply<'a>(dataset: &'a Dataset, criteria: &FilterCriteria) -> FilteredView<'a> {
    let range = date_range::normalize(criteria.created(), dataset);
    let rows = dataset
        .rows()
        .iter()
        .filter(|ticket| matches(ticket, dataset, criteria, range.as_ref()))
        .collect();
    FilteredView {
        columns: dataset.columns(),
        rows,
    }
}

fn matches(
    ticket: &Ticket,
    dataset: &Dataset,
    criteria: &FilterCriteria,
    range: Option<&date_range::DateRange>,
) -> bool {
    for (column, selected) in criteria.selections() {
        // A filter on a column the dataset does not have is a no-op.
        if !dataset.has_column(column) {
            continue;
        }
        // Rows without a value are excluded once a filter is active.
        match ticket.label(column) {
            Some(label) if selected.contains(label.as_ref()) => {}
            _ => return false,
        }
    }

    if let Some(range) = range {
        match ticket.timestamp(columns::CREATED_TIME) {
            Some(ts) => {
                let date = ts.date();
                if date < range.start || date > range.end {
                    return false;
                }
            }
            None => return false,
        }
    }

    true
}
