//! Ledger entry store
//!
//! All reads materialize the whole entries table client-side, O(rows)
//! per call. Acceptable at the scale this assistant targets.

use chrono::Utc;
use chrono_tz::Tz;
use rust_decimal::Decimal;

use ledgerbot_core::{format_amount, parse_amount, LedgerEntry, NewEntry, TIMESTAMP_FORMAT};

use crate::error::{StoreError, StoreResult};
use crate::{StoreRef, CONFIG_TAB, ENTRIES_TAB};

// Column positions in the entries table, 1-based.
const COL_AMOUNT: usize = 6;
const COL_CATEGORY: usize = 7;
const COL_DESCRIPTION: usize = 8;

/// Store of ledger entries plus the id counter in the config table
pub struct LedgerStore {
    store: StoreRef,
    tz: Tz,
}

impl LedgerStore {
    pub fn new(store: StoreRef, tz: Tz) -> Self {
        Self { store, tz }
    }

    /// Next id to assign: last persisted id + 1.
    ///
    /// Does not write. `append` persists the id it actually uses, so
    /// two concurrent callers can be handed the same id; the store
    /// provides no locking and this limitation is accepted.
    pub async fn next_id(&self) -> StoreResult<u64> {
        let rows = self.store.rows(CONFIG_TAB).await?;
        let last = rows
            .get(1)
            .and_then(|row| row.first())
            .and_then(|cell| cell.parse::<u64>().ok())
            .unwrap_or(0);
        Ok(last + 1)
    }

    /// Append a new entry, stamping the current time in the configured
    /// zone, and persist the assigned id. Returns the id.
    pub async fn append(&self, entry: NewEntry) -> StoreResult<u64> {
        let id = self.next_id().await?;
        let timestamp = Utc::now()
            .with_timezone(&self.tz)
            .format(TIMESTAMP_FORMAT)
            .to_string();

        let row = vec![
            id.to_string(),
            timestamp,
            entry.user_id,
            entry.display_name,
            entry.kind.to_string(),
            format_amount(entry.amount),
            entry.category,
            entry.description,
        ];
        self.store.append_row(ENTRIES_TAB, row).await?;
        self.persist_last_id(id).await?;

        log::info!("appended ledger entry {}", id);
        Ok(id)
    }

    async fn persist_last_id(&self, id: u64) -> StoreResult<()> {
        let rows = self.store.rows(CONFIG_TAB).await?;
        if rows.len() < 2 {
            self.store
                .append_row(CONFIG_TAB, vec![id.to_string()])
                .await
        } else {
            self.store
                .update_cell(CONFIG_TAB, 2, 1, id.to_string())
                .await
        }
    }

    /// The user's most recent `limit` entries in storage order,
    /// most-recent last.
    pub async fn last_entries(&self, user_id: &str, limit: usize) -> StoreResult<Vec<LedgerEntry>> {
        let mut entries = self.entries_for_user(user_id).await?;
        if entries.len() > limit {
            entries.drain(..entries.len() - limit);
        }
        Ok(entries)
    }

    /// All of the user's entries in storage order.
    pub async fn entries_for_user(&self, user_id: &str) -> StoreResult<Vec<LedgerEntry>> {
        Ok(self
            .all_entries()
            .await?
            .into_iter()
            .filter(|e| e.user_id == user_id)
            .collect())
    }

    /// Every parseable entry in the ledger, storage order.
    pub async fn all_entries(&self) -> StoreResult<Vec<LedgerEntry>> {
        let rows = self.store.rows(ENTRIES_TAB).await?;
        Ok(rows
            .iter()
            .skip(1)
            .filter_map(|row| parse_row(row))
            .collect())
    }

    /// Partial update of the mutable fields of one entry.
    pub async fn update(
        &self,
        id: u64,
        amount: Decimal,
        category: &str,
        description: &str,
    ) -> StoreResult<()> {
        let row = self.find_row_index(id).await?;
        self.store
            .update_cell(ENTRIES_TAB, row, COL_AMOUNT, format_amount(amount))
            .await?;
        self.store
            .update_cell(ENTRIES_TAB, row, COL_CATEGORY, category.to_string())
            .await?;
        self.store
            .update_cell(ENTRIES_TAB, row, COL_DESCRIPTION, description.to_string())
            .await?;
        log::info!("updated ledger entry {}", id);
        Ok(())
    }

    /// Remove one entry. The id is never reused.
    pub async fn delete(&self, id: u64) -> StoreResult<()> {
        let row = self.find_row_index(id).await?;
        self.store.delete_row(ENTRIES_TAB, row).await?;
        log::info!("deleted ledger entry {}", id);
        Ok(())
    }

    /// Distinct user ids appearing in the ledger, in order of first
    /// appearance.
    pub async fn user_ids(&self) -> StoreResult<Vec<String>> {
        let rows = self.store.rows(ENTRIES_TAB).await?;
        let mut seen = Vec::new();
        for row in rows.iter().skip(1) {
            if let Some(user) = row.get(2) {
                if !user.is_empty() && !seen.contains(user) {
                    seen.push(user.clone());
                }
            }
        }
        Ok(seen)
    }

    async fn find_row_index(&self, id: u64) -> StoreResult<usize> {
        let rows = self.store.rows(ENTRIES_TAB).await?;
        let wanted = id.to_string();
        rows.iter()
            .enumerate()
            .skip(1)
            .find(|(_, row)| row.first() == Some(&wanted))
            .map(|(index, _)| index + 1)
            .ok_or(StoreError::EntryNotFound { id })
    }
}

/// Parse a stored row into an entry. Malformed rows are skipped with a
/// warning rather than failing the whole read.
fn parse_row(row: &[String]) -> Option<LedgerEntry> {
    let get = |i: usize| row.get(i).cloned().unwrap_or_default();

    let id = match get(0).parse::<u64>() {
        Ok(id) => id,
        Err(_) => {
            log::warn!("skipping ledger row with bad id: {:?}", row.first());
            return None;
        }
    };
    let kind = match get(4).parse() {
        Ok(kind) => kind,
        Err(_) => {
            log::warn!("skipping ledger row {}: bad kind {:?}", id, get(4));
            return None;
        }
    };
    let amount = match parse_amount(&get(5)) {
        Ok(amount) => amount,
        Err(_) => {
            log::warn!("skipping ledger row {}: bad amount {:?}", id, get(5));
            return None;
        }
    };

    Some(LedgerEntry {
        id,
        timestamp: get(1),
        user_id: get(2),
        display_name: get(3),
        kind,
        amount,
        category: get(6),
        description: get(7),
    })
}
