//! Ledger entry and report period types

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Civil timestamp format used in the ledger table, no zone offset.
/// Values are interpreted in the configured time zone.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Kind of a ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    /// Money spent
    Expense,
    /// Money received
    Income,
}

impl std::str::FromStr for EntryKind {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Expense" => Ok(EntryKind::Expense),
            "Income" => Ok(EntryKind::Income),
            _ => Err(CoreError::InvalidKind {
                input: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryKind::Expense => write!(f, "Expense"),
            EntryKind::Income => write!(f, "Income"),
        }
    }
}

/// One recorded expense or income transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Unique, immutable, monotonically assigned identifier
    pub id: u64,
    /// Civil datetime string in TIMESTAMP_FORMAT
    pub timestamp: String,
    /// External account identifier of the author
    pub user_id: String,
    /// Display name of the author at entry time
    pub display_name: String,
    /// Expense or income
    pub kind: EntryKind,
    /// Strictly positive amount
    pub amount: Decimal,
    /// Category name as it was at entry time
    pub category: String,
    /// Free-text description, may be empty
    pub description: String,
}

impl LedgerEntry {
    /// Parse the stored timestamp, if well formed
    pub fn timestamp_naive(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.timestamp, TIMESTAMP_FORMAT).ok()
    }

    /// The name a report should attribute this entry to
    pub fn report_key(&self) -> &str {
        if self.display_name.is_empty() {
            &self.user_id
        } else {
            &self.display_name
        }
    }
}

/// Fields collected by the new-entry dialog, before an id is assigned
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntry {
    pub user_id: String,
    pub display_name: String,
    pub kind: EntryKind,
    pub amount: Decimal,
    pub category: String,
    pub description: String,
}

/// Aggregation period for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportPeriod {
    /// Monday through the following Monday
    Weekly,
    /// 1st..15th or 16th..end of month
    Fortnightly,
    /// Whole calendar month
    Monthly,
}

impl std::str::FromStr for ReportPeriod {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Weekly" => Ok(ReportPeriod::Weekly),
            "Fortnightly" => Ok(ReportPeriod::Fortnightly),
            "Monthly" => Ok(ReportPeriod::Monthly),
            _ => Err(CoreError::InvalidPeriod {
                input: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportPeriod::Weekly => write!(f, "Weekly"),
            ReportPeriod::Fortnightly => write!(f, "Fortnightly"),
            ReportPeriod::Monthly => write!(f, "Monthly"),
        }
    }
}
