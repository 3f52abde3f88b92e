/// Statement header block parser
///
/// Statement workbooks open with a fixed block of label/value rows (account
/// holder, card product, cutoff dates, ...) ahead of the transaction table.
/// Labels sit in column A, values in column B, and cell B7 carries the
/// statement month.
use calamine::{Data, Range};
use thiserror::Error;

use crate::utils::{excel_serial_to_date, month_key, parse_statement_date};

/// Number of leading rows that belong to the header block.
pub const HEADER_ROWS: usize = 20;

/// Row/column (0-indexed) of the statement month cell, i.e. B7.
const MONTH_CELL: (usize, usize) = (6, 1);

/// Value recorded for header labels whose value cell is blank.
const MISSING_VALUE: &str = "PLACEHOLDER";

#[derive(Debug, Error)]
pub enum HeaderParseError {
    #[error("Statement month cell (B7) is empty")]
    MissingMonth,

    #[error("Invalid statement month: {0}")]
    InvalidMonth(String),
}

/// Parsed header block of a single statement workbook
#[derive(Debug, Clone)]
pub struct StatementHeader {
    /// Label/value pairs in sheet order. Blank values are recorded as
    /// `PLACEHOLDER` so every label survives into the log output.
    pub entries: Vec<(String, String)>,

    /// Statement month normalized to `YYYY-MM`
    pub month: String,
}

impl StatementHeader {
    /// Parse the header block from the first rows of a worksheet range.
    pub fn from_worksheet_range(range: &Range<Data>) -> Result<Self, HeaderParseError> {
        // Helper to get a cell as display text (0-indexed)
        let get_cell = |row: usize, col: usize| -> Option<String> {
            range.get((row, col)).and_then(|v| match v {
                Data::String(s) => Some(s.clone()),
                Data::Float(f) => Some(f.to_string()),
                Data::Int(i) => Some(i.to_string()),
                Data::Bool(b) => Some(b.to_string()),
                Data::DateTime(dt) => dt.as_datetime().map(|d| d.date().to_string()),
                _ => None,
            })
        };

        let month = parse_month_cell(range.get(MONTH_CELL))?;

        let mut entries = Vec::new();
        for row in 0..HEADER_ROWS {
            let label = match get_cell(row, 0) {
                Some(l) if !l.trim().is_empty() => l.trim().to_string(),
                _ => continue,
            };
            let value = get_cell(row, 1)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| MISSING_VALUE.to_string());
            entries.push((label, value));
        }

        Ok(StatementHeader { entries, month })
    }
}

/// Normalize the statement month cell to a `YYYY-MM` key.
///
/// The cell holds either a `d/m/Y` date string or a native Excel date;
/// older exports occasionally leave a raw date serial.
fn parse_month_cell(cell: Option<&Data>) -> Result<String, HeaderParseError> {
    match cell {
        Some(Data::String(s)) => parse_statement_date(s)
            .map(month_key)
            .ok_or_else(|| HeaderParseError::InvalidMonth(s.clone())),
        Some(Data::DateTime(dt)) => dt
            .as_datetime()
            .map(|d| month_key(d.date()))
            .ok_or_else(|| HeaderParseError::InvalidMonth(format!("{dt:?}"))),
        Some(Data::Float(f)) => excel_serial_to_date(*f)
            .map(month_key)
            .ok_or_else(|| HeaderParseError::InvalidMonth(f.to_string())),
        Some(Data::Int(i)) => excel_serial_to_date(*i as f64)
            .map(month_key)
            .ok_or_else(|| HeaderParseError::InvalidMonth(i.to_string())),
        Some(Data::Empty) | None => Err(HeaderParseError::MissingMonth),
        Some(other) => Err(HeaderParseError::InvalidMonth(format!("{other:?}"))),
    }
}
