//! Static HTML report generation.

use chrono::Utc;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::table::{GroupedTable, RecordTable};

const TEMPLATE: &str = include_str!("report.html");

/// Everything the report document embeds, already computed
pub struct ReportView<'a> {
    pub monthly_totals: &'a BTreeMap<String, f64>,
    pub comprehensive: &'a RecordTable,
    pub sorted_by_amount: &'a RecordTable,
    pub payment_filter_value: &'a str,
    pub payment_filtered: &'a RecordTable,
    pub description_needle: &'a str,
    pub description_filtered: &'a RecordTable,
    pub grouped_by_month: &'a GroupedTable,
    pub grouped_by_description: &'a GroupedTable,
    pub sum_positive: f64,
    pub sum_negative: f64,
    pub plot_path: &'a str,
}

/// Machine-readable summary embedded in the document
#[derive(Serialize)]
struct ReportSummary<'a> {
    months: Vec<&'a str>,
    totals: Vec<f64>,
    sum_positive: f64,
    sum_negative: f64,
    record_count: usize,
}

/// Generate the full HTML report content
pub fn generate_html(view: &ReportView) -> String {
    let summary = ReportSummary {
        months: view.monthly_totals.keys().map(String::as_str).collect(),
        totals: view.monthly_totals.values().copied().collect(),
        sum_positive: view.sum_positive,
        sum_negative: view.sum_negative,
        record_count: view.comprehensive.len(),
    };
    let json_summary = serde_json::to_string(&summary).unwrap_or_else(|_| "{}".to_string());

    TEMPLATE
        .replace("__MONTHLY_TOTALS_TABLE__", &totals_table(view.monthly_totals))
        .replace("__COMPREHENSIVE_TABLE__", &records_table(view.comprehensive))
        .replace("__SORTED_TABLE__", &records_table(view.sorted_by_amount))
        .replace(
            "__PAYMENT_FILTER_VALUE__",
            &escape(view.payment_filter_value),
        )
        .replace(
            "__PAYMENT_FILTER_TABLE__",
            &records_table(view.payment_filtered),
        )
        .replace("__DESCRIPTION_NEEDLE__", &escape(view.description_needle))
        .replace(
            "__DESCRIPTION_FILTER_TABLE__",
            &records_table(view.description_filtered),
        )
        .replace(
            "__GROUPED_MONTH_TABLE__",
            &grouped_table(view.grouped_by_month, "Month"),
        )
        .replace(
            "__GROUPED_DESCRIPTION_TABLE__",
            &grouped_table(view.grouped_by_description, "Description"),
        )
        .replace("__SUM_POSITIVE__", &format!("{:.2}", view.sum_positive))
        .replace("__SUM_NEGATIVE__", &format!("{:.2}", view.sum_negative))
        .replace("__PLOT_PATH__", &escape(view.plot_path))
        .replace("__JSON_SUMMARY__", &json_summary)
        .replace(
            "__GENERATED_AT__",
            &Utc::now().format("%Y-%m-%d %H:%M UTC").to_string(),
        )
}

/// Escape text for safe embedding in HTML
fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn totals_table(totals: &BTreeMap<String, f64>) -> String {
    let mut html = String::from(
        "<table>\n<tr><th>Month</th><th>Total Amount (USD)</th></tr>\n",
    );
    for (month, total) in totals {
        html.push_str(&format!(
            "<tr><td>{}</td><td class=\"amount\">{:.2}</td></tr>\n",
            escape(month),
            total
        ));
    }
    html.push_str("</table>");
    html
}

fn records_table(table: &RecordTable) -> String {
    let mut html = String::from(
        "<table>\n<tr><th>Card</th><th>Date</th><th>Reference</th><th>Description</th>\
         <th>Payment Method</th><th>Amount (USD)</th><th>Deferred Balance</th><th>Month</th></tr>\n",
    );
    for record in table.records() {
        let deferred = record
            .deferred_balance
            .map(|v| format!("{v:.2}"))
            .unwrap_or_default();
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
             <td class=\"amount\">{:.2}</td><td class=\"amount\">{}</td><td>{}</td></tr>\n",
            escape(&record.card_number),
            record.posted_date,
            escape(&record.reference),
            escape(&record.description),
            escape(&record.payment_method),
            record.amount_usd,
            deferred,
            escape(&record.month),
        ));
    }
    html.push_str("</table>");
    html
}

fn grouped_table(grouped: &GroupedTable, key_header: &str) -> String {
    let mut html = format!(
        "<table>\n<tr><th>{key_header}</th><th>Sum of Amounts (USD)</th></tr>\n"
    );
    for (key, sum) in grouped.rows() {
        html.push_str(&format!(
            "<tr><td>{}</td><td class=\"amount\">{:.2}</td></tr>\n",
            escape(key),
            sum
        ));
    }
    html.push_str("</table>");
    html
}
