use crate::core::filter::DateSelection;
use crate::domain::model::{columns, Dataset};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A concrete, inclusive-both-ends calendar-date interval, ready for the
/// filter stage. The end day is included in full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Turn a raw date selection into a concrete interval for the filter stage.
///
/// Two values are used as `(start, end)`, swapped when reversed; one value
/// degrades to a single-day interval; no value defaults to the dataset's
/// full `CreatedTime` span. Returns `None` when the dataset has no
/// `CreatedTime` column (or no parsable value in it), in which case the
/// date predicate is skipped entirely.
pub fn normalize(selection: &DateSelection, dataset: &Dataset) -> Option<DateRange> {
    if !dataset.has_column(columns::CREATED_TIME) {
        return None;
    }
    match *selection {
        DateSelection::Between(a, b) => {
            let (start, end) = if a <= b { (a, b) } else { (b, a) };
            Some(DateRange { start, end })
        }
        DateSelection::Single(day) => Some(DateRange {
            start: day,
            end: day,
        }),
        DateSelection::Unbounded => dataset
            .created_span()
            .map(|(start, end)| DateRange { start, end }),
    }
}
