use crate::core::filter::FilteredView;
use crate::domain::model::{columns, CellValue, Dataset, Ticket, TIMESTAMP_FORMAT};
use crate::utils::error::{DashboardError, Result};
use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
use chrono::{NaiveDate, NaiveDateTime};
use rust_xlsxwriter::Workbook;
use std::collections::HashMap;
use std::io::Cursor;

/// Sheet name of the exported workbook.
pub const EXPORT_SHEET: &str = "Filtered";

/// Text timestamp formats accepted in `CreatedTime`/`ClosedTime` cells.
/// Anything else coerces to `Missing`.
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M",
];
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];

/// Decode the first sheet of an xlsx workbook into a dataset. The first row
/// supplies the column headers; the column set is whatever the file carries.
pub fn read_dataset(bytes: &[u8]) -> Result<Dataset> {
    let cursor = Cursor::new(bytes);
    let mut workbook: Xlsx<_> =
        open_workbook_from_rs(cursor).map_err(DashboardError::SpreadsheetRead)?;

    let sheet_names = workbook.sheet_names().to_vec();
    let first_sheet = sheet_names
        .first()
        .ok_or_else(|| DashboardError::ProcessingError {
            message: "workbook contains no sheets".to_string(),
        })?;

    let range = workbook
        .worksheet_range(first_sheet)
        .map_err(DashboardError::SpreadsheetRead)?;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row
            .iter()
            .enumerate()
            .map(|(idx, cell)| header_name(cell, idx))
            .collect(),
        None => return Ok(Dataset::new(Vec::new(), Vec::new())),
    };

    let mut tickets = Vec::new();
    for row in rows {
        let mut fields = HashMap::new();
        for (idx, cell) in row.iter().enumerate() {
            let Some(column) = headers.get(idx) else {
                continue;
            };
            let value = if columns::is_timestamp(column) {
                timestamp_cell(cell)
            } else {
                plain_cell(cell)
            };
            fields.insert(column.clone(), value);
        }
        tickets.push(Ticket::new(fields));
    }

    tracing::debug!(
        "Decoded sheet '{}': {} columns, {} rows",
        first_sheet,
        headers.len(),
        tickets.len()
    );
    Ok(Dataset::new(headers, tickets))
}

fn header_name(cell: &Data, idx: usize) -> String {
    match cell {
        Data::String(s) if !s.trim().is_empty() => s.trim().to_string(),
        Data::Empty => format!("Column{}", idx + 1),
        other => other.to_string(),
    }
}

fn plain_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Missing,
        Data::String(s) => {
            if s.trim().is_empty() {
                CellValue::Missing
            } else {
                CellValue::Text(s.clone())
            }
        }
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(CellValue::Timestamp)
            .unwrap_or(CellValue::Missing),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(_) => CellValue::Missing,
    }
}

/// Timestamp columns coerce harder: text is parsed against the known
/// formats and every unparsable value becomes `Missing` rather than a stray
/// text cell the date filter would silently ignore.
fn timestamp_cell(cell: &Data) -> CellValue {
    match cell {
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(CellValue::Timestamp)
            .unwrap_or(CellValue::Missing),
        Data::String(s) | Data::DateTimeIso(s) => parse_timestamp_text(s)
            .map(CellValue::Timestamp)
            .unwrap_or(CellValue::Missing),
        _ => CellValue::Missing,
    }
}

fn parse_timestamp_text(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    for format in DATETIME_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(ts);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }
    None
}

/// Encode the filtered view as a single-sheet xlsx workbook: header row
/// first, then the view's rows in their original order, all original
/// columns preserved.
pub fn write_view(view: &FilteredView<'_>) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet
        .set_name(EXPORT_SHEET)
        .map_err(DashboardError::SpreadsheetWrite)?;

    for (col, name) in view.columns().iter().enumerate() {
        sheet.write_string(0, col as u16, name)?;
    }

    for (row_idx, ticket) in view.rows().iter().enumerate() {
        let row = (row_idx + 1) as u32;
        for (col_idx, column) in view.columns().iter().enumerate() {
            let col = col_idx as u16;
            match ticket.value(column) {
                CellValue::Text(s) => {
                    sheet.write_string(row, col, s)?;
                }
                CellValue::Number(n) => {
                    sheet.write_number(row, col, *n)?;
                }
                CellValue::Bool(b) => {
                    sheet.write_boolean(row, col, *b)?;
                }
                CellValue::Timestamp(ts) => {
                    sheet.write_string(row, col, ts.format(TIMESTAMP_FORMAT).to_string())?;
                }
                CellValue::Missing => {}
            }
        }
    }

    workbook
        .save_to_buffer()
        .map_err(DashboardError::SpreadsheetWrite)
}
