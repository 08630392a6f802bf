//! Spreadsheet-backed stores for ledger entries and categories
//!
//! The remote tabular store is reached through the [`TabularStore`]
//! trait so the ledger and category stores can be exercised against
//! the bundled in-memory backend in tests and in console mode. Row and
//! column indices are 1-based like the remote API; row 1 is the header.

pub mod category;
pub mod error;
pub mod ledger;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;

pub use category::{CategoryRegistry, DEFAULT_CATEGORIES};
pub use error::{StoreError, StoreErrorCode, StoreResult};
pub use ledger::LedgerStore;
pub use memory::MemorySheets;

/// Table holding ledger entries
pub const ENTRIES_TAB: &str = "Entries";
/// Table holding the last-assigned entry id
pub const CONFIG_TAB: &str = "Config";
/// Table holding category names
pub const CATEGORIES_TAB: &str = "Categories";

/// Header row of the entries table
pub const ENTRIES_HEADER: [&str; 8] = [
    "ID",
    "Timestamp",
    "User ID",
    "Name",
    "Kind",
    "Amount",
    "Category",
    "Description",
];
/// Header row of the config table
pub const CONFIG_HEADER: [&str; 1] = ["Last ID"];
/// Header row of the categories table
pub const CATEGORIES_HEADER: [&str; 1] = ["Category"];

/// Shared store reference type
pub type StoreRef = Arc<dyn TabularStore>;

/// Access to a remote store of named tables.
///
/// Every read materializes the whole table client-side; there is no
/// server-side filtering and no transactional guarantee across calls.
#[async_trait]
pub trait TabularStore: Send + Sync {
    /// All rows of a table, header included, in storage order
    async fn rows(&self, tab: &str) -> StoreResult<Vec<Vec<String>>>;

    /// Append a row at the bottom of a table
    async fn append_row(&self, tab: &str, row: Vec<String>) -> StoreResult<()>;

    /// Overwrite one cell; `row` and `col` are 1-based
    async fn update_cell(&self, tab: &str, row: usize, col: usize, value: String)
        -> StoreResult<()>;

    /// Remove one row; `row` is 1-based
    async fn delete_row(&self, tab: &str, row: usize) -> StoreResult<()>;

    /// Create the table with the given header if it does not exist yet
    async fn ensure_tab(&self, tab: &str, header: &[&str]) -> StoreResult<()>;
}

/// First-run initialization: create missing tables, write headers, and
/// seed the category table with the default list when it is empty.
pub async fn initialize(store: &StoreRef) -> StoreResult<()> {
    store.ensure_tab(ENTRIES_TAB, &ENTRIES_HEADER).await?;
    store.ensure_tab(CONFIG_TAB, &CONFIG_HEADER).await?;
    store.ensure_tab(CATEGORIES_TAB, &CATEGORIES_HEADER).await?;

    let categories = store.rows(CATEGORIES_TAB).await?;
    if categories.len() <= 1 {
        for name in DEFAULT_CATEGORIES {
            store
                .append_row(CATEGORIES_TAB, vec![name.to_string()])
                .await?;
        }
        log::info!("seeded {} default categories", DEFAULT_CATEGORIES.len());
    }

    log::info!("store initialization complete");
    Ok(())
}
