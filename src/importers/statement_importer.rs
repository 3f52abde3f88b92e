use calamine::{open_workbook, Data, Reader, Xlsx};
use chrono::NaiveDate;
use std::fs::File;
use std::io::BufReader;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::importers::header_parser::{HeaderParseError, StatementHeader};
use crate::utils::{excel_serial_to_date, parse_statement_date};

/// First data row (0-indexed). Rows 0-19 are the header block and row 20
/// is the column header row of the transaction table.
const DATA_START_ROW: usize = 21;

#[derive(Error, Debug)]
pub enum StatementImportError {
    #[error("Failed to open workbook: {0}")]
    WorkbookOpen(String),

    #[error("Workbook has no worksheets")]
    MissingSheet,

    #[error("Invalid data at row {row}, col {col}: {msg}")]
    InvalidData { row: usize, col: usize, msg: String },

    #[error(transparent)]
    Header(#[from] HeaderParseError),
}

/// A single normalized transaction row from a statement workbook
#[derive(Debug, Clone)]
pub struct StatementRecord {
    pub card_number: String,
    pub posted_date: NaiveDate,
    pub reference: String,
    pub description: String,
    pub payment_method: String,
    pub amount_usd: f64,
    pub deferred_balance: Option<f64>,
    /// Statement month (`YYYY-MM`) the row was ingested under
    pub month: String,
}

/// Parsed contents of one statement workbook
#[derive(Debug, Clone)]
pub struct StatementFile {
    pub header: StatementHeader,
    pub records: Vec<StatementRecord>,
}

/// Parser for credit-card statement workbooks
///
/// # Expected Sheet Structure:
/// ```text
/// Rows 1-20:  Header block (label in col A, value in col B; month in B7)
/// Row 21:     Column header row (discarded, columns are positional)
/// Rows 22+:   Transactions:
///             CARD | DATE | REFERENCE | DESCRIPTION | PAYMENT | AMOUNT_USD | DEFERRED
/// ```
pub struct StatementImporter {
    workbook_path: String,
}

impl StatementImporter {
    pub fn new(workbook_path: impl Into<String>) -> Self {
        Self {
            workbook_path: workbook_path.into(),
        }
    }

    /// Parse the whole workbook: header block plus every transaction row.
    ///
    /// Rows missing the posted date or the amount are skipped with a warning;
    /// a fully empty row terminates the data region.
    pub fn parse(&self) -> Result<StatementFile, StatementImportError> {
        info!("Parsing statement workbook: {}", self.workbook_path);

        let mut workbook: Xlsx<BufReader<File>> = match open_workbook(&self.workbook_path) {
            Ok(wb) => wb,
            Err(e) => return Err(StatementImportError::WorkbookOpen(e.to_string())),
        };

        // Statements carry a single data sheet; always take the first one
        let range = match workbook.worksheet_range_at(0) {
            Some(Ok(range)) => range,
            Some(Err(e)) => return Err(StatementImportError::WorkbookOpen(e.to_string())),
            None => return Err(StatementImportError::MissingSheet),
        };

        let header = StatementHeader::from_worksheet_range(&range)?;
        debug!(
            "Statement month {} with {} header entries",
            header.month,
            header.entries.len()
        );

        let mut records = Vec::new();

        for row_idx in DATA_START_ROW..range.height() {
            if self.row_is_empty(&range, row_idx) {
                debug!("Empty row at index {}, stopping", row_idx);
                break;
            }

            let posted_date = match self.parse_date(&range, row_idx, 1)? {
                Some(d) => d,
                None => {
                    warn!("Row {} has no posted date, skipping", row_idx + 1);
                    continue;
                }
            };

            let amount_usd = match self.parse_amount(&range, row_idx, 5)? {
                Some(v) => v,
                None => {
                    warn!("Row {} has no amount, skipping", row_idx + 1);
                    continue;
                }
            };

            records.push(StatementRecord {
                card_number: self.cell_text(&range, row_idx, 0),
                posted_date,
                reference: self.cell_text(&range, row_idx, 2),
                description: self.cell_text(&range, row_idx, 3),
                payment_method: self.cell_text(&range, row_idx, 4),
                amount_usd,
                deferred_balance: self.parse_amount(&range, row_idx, 6)?,
                month: header.month.clone(),
            });
        }

        info!(
            "Parsed {} transactions from {}",
            records.len(),
            self.workbook_path
        );
        Ok(StatementFile { header, records })
    }

    fn row_is_empty(&self, range: &calamine::Range<Data>, row: usize) -> bool {
        (0..range.width()).all(|col| {
            matches!(range.get((row, col)), Some(Data::Empty) | None)
                || matches!(range.get((row, col)), Some(Data::String(s)) if s.trim().is_empty())
        })
    }

    /// Read a cell as text. Numeric card and reference cells are printed
    /// without a fractional part.
    fn cell_text(&self, range: &calamine::Range<Data>, row: usize, col: usize) -> String {
        match range.get((row, col)) {
            Some(Data::String(s)) => s.trim().to_string(),
            Some(Data::Float(f)) if f.fract() == 0.0 => format!("{f:.0}"),
            Some(Data::Float(f)) => f.to_string(),
            Some(Data::Int(i)) => i.to_string(),
            Some(Data::Bool(b)) => b.to_string(),
            _ => String::new(),
        }
    }

    /// Parse a posted date from the specified cell (d/m/Y string, native
    /// Excel date, or raw date serial)
    fn parse_date(
        &self,
        range: &calamine::Range<Data>,
        row: usize,
        col: usize,
    ) -> Result<Option<NaiveDate>, StatementImportError> {
        match range.get((row, col)) {
            Some(Data::String(s)) => {
                if s.trim().is_empty() {
                    return Ok(None);
                }
                parse_statement_date(s)
                    .map(Some)
                    .ok_or_else(|| StatementImportError::InvalidData {
                        row,
                        col,
                        msg: format!("Cannot parse date: {s}"),
                    })
            }
            Some(Data::DateTime(excel_date)) => {
                Ok(excel_date.as_datetime().map(|dt| dt.date()))
            }
            Some(Data::Float(f)) => Ok(excel_serial_to_date(*f)),
            Some(Data::Int(i)) => Ok(excel_serial_to_date(*i as f64)),
            Some(Data::Empty) | None => Ok(None),
            other => Err(StatementImportError::InvalidData {
                row,
                col,
                msg: format!("Expected date, got: {other:?}"),
            }),
        }
    }

    /// Parse a monetary value from the specified cell
    fn parse_amount(
        &self,
        range: &calamine::Range<Data>,
        row: usize,
        col: usize,
    ) -> Result<Option<f64>, StatementImportError> {
        match range.get((row, col)) {
            Some(Data::Float(f)) => Ok(Some(*f)),
            Some(Data::Int(i)) => Ok(Some(*i as f64)),
            Some(Data::String(s)) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    Ok(None)
                } else {
                    trimmed.replace(',', "").parse::<f64>().map(Some).map_err(
                        |_| StatementImportError::InvalidData {
                            row,
                            col,
                            msg: format!("Cannot parse amount: {s}"),
                        },
                    )
                }
            }
            Some(Data::Empty) | None => Ok(None),
            other => Err(StatementImportError::InvalidData {
                row,
                col,
                msg: format!("Expected number, got: {other:?}"),
            }),
        }
    }
}
