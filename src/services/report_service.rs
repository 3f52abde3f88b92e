use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;
use tracing::{info, warn};

use crate::importers::{StatementImportError, StatementImporter, StatementRecord};
use crate::report::chart::{render_monthly_totals, ChartError};
use crate::report::html::{generate_html, ReportView};
use crate::table::{Column, RecordTable, SortOrder};

#[derive(Debug, Error)]
pub enum ReportServiceError {
    #[error("Failed to read statements directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to import {path}: {source}")]
    Import {
        path: PathBuf,
        source: StatementImportError,
    },

    #[error(transparent)]
    Chart(#[from] ChartError),

    #[error("Failed to write report {path}: {source}")]
    ReportWrite {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Report knobs that vary per run
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Exact payment method the equality-filter section shows
    pub payment_filter_value: String,
    /// Substring the description-filter sections match, case-insensitively
    pub description_needle: String,
}

/// What a completed run produced, for logging and tests
#[derive(Debug)]
pub struct ReportOutcome {
    pub files_read: usize,
    pub record_count: usize,
    pub month_count: usize,
}

/// Orchestrates the whole pipeline: ingest every statement workbook in a
/// directory, build the record table, compute every report view, and write
/// the chart and the HTML report.
pub struct ReportService {
    statements_dir: PathBuf,
    plot_path: PathBuf,
    report_path: PathBuf,
    options: ReportOptions,
}

impl ReportService {
    pub fn new(
        statements_dir: impl Into<PathBuf>,
        plot_path: impl Into<PathBuf>,
        report_path: impl Into<PathBuf>,
        options: ReportOptions,
    ) -> Self {
        Self {
            statements_dir: statements_dir.into(),
            plot_path: plot_path.into(),
            report_path: report_path.into(),
            options,
        }
    }

    pub fn run(&self) -> Result<ReportOutcome, ReportServiceError> {
        let start = Instant::now();
        let (files_read, records) = self.read_all_records()?;
        info!(
            "Ingested {} records from {} files in {:?}",
            records.len(),
            files_read,
            start.elapsed()
        );

        let table = RecordTable::from_records(records);
        let monthly_totals = table.monthly_totals();

        let sorted_by_amount = table.sorted_by(Column::AmountUsd, SortOrder::Descending);
        let payment_filtered =
            table.filter_eq(Column::PaymentMethod, &self.options.payment_filter_value);
        let description_filtered =
            table.filter_contains(Column::Description, &self.options.description_needle);
        let grouped_by_month = table.group_sum(Column::Month);
        let grouped_by_description =
            table.group_sum_contains(Column::Description, &self.options.description_needle);
        let sum_positive = table.sum_positive();
        let sum_negative = table.sum_negative();

        render_monthly_totals(&monthly_totals, &self.plot_path)?;

        let html = generate_html(&ReportView {
            monthly_totals: &monthly_totals,
            comprehensive: &table,
            sorted_by_amount: &sorted_by_amount,
            payment_filter_value: &self.options.payment_filter_value,
            payment_filtered: &payment_filtered,
            description_needle: &self.options.description_needle,
            description_filtered: &description_filtered,
            grouped_by_month: &grouped_by_month,
            grouped_by_description: &grouped_by_description,
            sum_positive,
            sum_negative,
            plot_path: &self.plot_path.to_string_lossy(),
        });

        fs::write(&self.report_path, html).map_err(|source| ReportServiceError::ReportWrite {
            path: self.report_path.clone(),
            source,
        })?;

        info!(
            "Report written to {} (chart: {})",
            self.report_path.display(),
            self.plot_path.display()
        );

        Ok(ReportOutcome {
            files_read,
            record_count: table.len(),
            month_count: monthly_totals.len(),
        })
    }

    /// Read every `.xlsx` workbook in the statements directory.
    ///
    /// Files are visited in name order so repeated runs over the same
    /// directory produce identical reports.
    fn read_all_records(
        &self,
    ) -> Result<(usize, Vec<StatementRecord>), ReportServiceError> {
        let entries =
            fs::read_dir(&self.statements_dir).map_err(|source| ReportServiceError::DirectoryRead {
                path: self.statements_dir.clone(),
                source,
            })?;

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| is_statement_workbook(path))
            .collect();
        paths.sort();

        if paths.is_empty() {
            warn!(
                "No .xlsx statements found in {}",
                self.statements_dir.display()
            );
        }

        let pb = ProgressBar::new(paths.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("##-"),
        );

        let mut all_records = Vec::new();
        for path in &paths {
            pb.set_message(format!("{}", path.display()));

            let statement = StatementImporter::new(path.to_string_lossy())
                .parse()
                .map_err(|source| ReportServiceError::Import {
                    path: path.clone(),
                    source,
                })?;

            info!("Header information for {}:", path.display());
            for (label, value) in &statement.header.entries {
                info!("  {}: {}", label, value);
            }

            all_records.extend(statement.records);
            pb.inc(1);
        }
        pb.finish_and_clear();

        Ok((paths.len(), all_records))
    }
}

fn is_statement_workbook(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("xlsx"))
        .unwrap_or(false)
}
