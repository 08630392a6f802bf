//! Core domain logic for the expense-tracking assistant
//!
//! This crate carries everything that does not touch the outside world:
//! - models: ledger entries, entry kinds, report periods
//! - amount: user-input amount parsing
//! - time: report period windows
//! - report: expense aggregation over ledger entries

pub mod amount;
pub mod error;
pub mod models;
pub mod report;
pub mod time;

pub use amount::{format_amount, parse_amount};
pub use error::{CoreError, CoreResult, ErrorCode};
pub use models::{EntryKind, LedgerEntry, NewEntry, ReportPeriod, TIMESTAMP_FORMAT};
pub use report::{build_report, Report};
pub use time::{period_window, ReportWindow};
