//! In-memory table of statement records and its view operations.
//!
//! Every operation is pure: it borrows the table and returns a new view,
//! so independent report sections never observe each other's ordering.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::importers::StatementRecord;

/// Typed column selector for sort/filter/group operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    CardNumber,
    PostedDate,
    Reference,
    Description,
    PaymentMethod,
    AmountUsd,
    DeferredBalance,
    Month,
}

impl Column {
    /// Cell text used for equality filters, substring filters and group keys
    pub fn text(&self, record: &StatementRecord) -> String {
        match self {
            Column::CardNumber => record.card_number.clone(),
            Column::PostedDate => record.posted_date.to_string(),
            Column::Reference => record.reference.clone(),
            Column::Description => record.description.clone(),
            Column::PaymentMethod => record.payment_method.clone(),
            Column::AmountUsd => format!("{:.2}", record.amount_usd),
            Column::DeferredBalance => record
                .deferred_balance
                .map(|v| format!("{v:.2}"))
                .unwrap_or_default(),
            Column::Month => record.month.clone(),
        }
    }

    fn compare(&self, a: &StatementRecord, b: &StatementRecord) -> Ordering {
        match self {
            Column::AmountUsd => a.amount_usd.total_cmp(&b.amount_usd),
            Column::DeferredBalance => a
                .deferred_balance
                .unwrap_or(0.0)
                .total_cmp(&b.deferred_balance.unwrap_or(0.0)),
            Column::PostedDate => a.posted_date.cmp(&b.posted_date),
            _ => self.text(a).cmp(&self.text(b)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Row-oriented table over every ingested statement record
#[derive(Debug, Clone)]
pub struct RecordTable {
    records: Vec<StatementRecord>,
}

/// Result of a group-by-sum view: group key -> sum of amounts, keys sorted
#[derive(Debug, Clone)]
pub struct GroupedTable {
    rows: Vec<(String, f64)>,
}

impl GroupedTable {
    pub fn rows(&self) -> &[(String, f64)] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl RecordTable {
    /// Build the comprehensive table. Records are sorted by description,
    /// which is the order the report presents them in.
    pub fn from_records(mut records: Vec<StatementRecord>) -> Self {
        records.sort_by(|a, b| a.description.cmp(&b.description));
        Self { records }
    }

    pub fn records(&self) -> &[StatementRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Re-sort the table by any column
    pub fn sorted_by(&self, column: Column, order: SortOrder) -> RecordTable {
        let mut records = self.records.clone();
        records.sort_by(|a, b| {
            let ord = column.compare(a, b);
            match order {
                SortOrder::Ascending => ord,
                SortOrder::Descending => ord.reverse(),
            }
        });
        RecordTable { records }
    }

    /// Keep rows whose column text matches `value` exactly
    pub fn filter_eq(&self, column: Column, value: &str) -> RecordTable {
        let records = self
            .records
            .iter()
            .filter(|r| column.text(r) == value)
            .cloned()
            .collect();
        RecordTable { records }
    }

    /// Keep rows whose column text contains `needle`, case-insensitively
    pub fn filter_contains(&self, column: Column, needle: &str) -> RecordTable {
        let needle = needle.to_lowercase();
        let records = self
            .records
            .iter()
            .filter(|r| column.text(r).to_lowercase().contains(&needle))
            .cloned()
            .collect();
        RecordTable { records }
    }

    /// Group rows by a column and sum their amounts
    pub fn group_sum(&self, by: Column) -> GroupedTable {
        Self::grouped(self.records.iter(), by)
    }

    /// Group-by-sum restricted to rows whose group column contains `needle`
    pub fn group_sum_contains(&self, by: Column, needle: &str) -> GroupedTable {
        let needle = needle.to_lowercase();
        Self::grouped(
            self.records
                .iter()
                .filter(|r| by.text(r).to_lowercase().contains(&needle)),
            by,
        )
    }

    /// Sum of strictly positive amounts
    pub fn sum_positive(&self) -> f64 {
        self.records
            .iter()
            .map(|r| r.amount_usd)
            .filter(|v| *v > 0.0)
            .sum()
    }

    /// Sum of strictly negative amounts
    pub fn sum_negative(&self) -> f64 {
        self.records
            .iter()
            .map(|r| r.amount_usd)
            .filter(|v| *v < 0.0)
            .sum()
    }

    /// Total amount per statement month. `YYYY-MM` keys sort
    /// chronologically, so the map iterates in calendar order.
    pub fn monthly_totals(&self) -> BTreeMap<String, f64> {
        let mut totals = BTreeMap::new();
        for record in &self.records {
            *totals.entry(record.month.clone()).or_insert(0.0) += record.amount_usd;
        }
        totals
    }

    fn grouped<'a>(records: impl Iterator<Item = &'a StatementRecord>, by: Column) -> GroupedTable {
        let mut sums: BTreeMap<String, f64> = BTreeMap::new();
        for record in records {
            *sums.entry(by.text(record)).or_insert(0.0) += record.amount_usd;
        }
        GroupedTable {
            rows: sums.into_iter().collect(),
        }
    }
}
