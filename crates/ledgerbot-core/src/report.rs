//! Expense aggregation over ledger entries

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{EntryKind, LedgerEntry, ReportPeriod};
use crate::time::ReportWindow;

/// Aggregated expense totals for one period window.
///
/// Derived, never persisted. Maps are ordered by key so rendering is
/// deterministic for identical inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub period: ReportPeriod,
    pub window: ReportWindow,
    /// Expense total per category name
    pub per_category: BTreeMap<String, Decimal>,
    /// Expense total per author (display name, or user id when blank)
    pub per_user: BTreeMap<String, Decimal>,
    /// Sum of all included amounts
    pub grand_total: Decimal,
}

/// Aggregate expenses inside `window` out of `entries`.
///
/// Rows with an unparsable timestamp, rows outside the window and
/// non-expense rows are skipped.
pub fn build_report(period: ReportPeriod, window: ReportWindow, entries: &[LedgerEntry]) -> Report {
    let mut per_category: BTreeMap<String, Decimal> = BTreeMap::new();
    let mut per_user: BTreeMap<String, Decimal> = BTreeMap::new();

    for entry in entries {
        let ts = match entry.timestamp_naive() {
            Some(ts) => ts,
            None => {
                log::debug!("skipping entry {}: unparsable timestamp", entry.id);
                continue;
            }
        };
        if !window.contains(&ts) {
            continue;
        }
        if entry.kind != EntryKind::Expense {
            continue;
        }
        *per_category.entry(entry.category.clone()).or_default() += entry.amount;
        *per_user
            .entry(entry.report_key().to_string())
            .or_default() += entry.amount;
    }

    let grand_total = per_category.values().copied().sum();

    Report {
        period,
        window,
        per_category,
        per_user,
        grand_total,
    }
}
