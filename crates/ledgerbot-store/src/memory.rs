//! In-memory tabular store
//!
//! Backs the console binary and the test suites. Mirrors the remote
//! API's 1-based row/column addressing, header row included.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::{StoreError, StoreResult};
use crate::TabularStore;

/// Mutex-guarded map of table name to rows
#[derive(Default)]
pub struct MemorySheets {
    tabs: Mutex<BTreeMap<String, Vec<Vec<String>>>>,
}

impl MemorySheets {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TabularStore for MemorySheets {
    async fn rows(&self, tab: &str) -> StoreResult<Vec<Vec<String>>> {
        let tabs = self.tabs.lock().await;
        tabs.get(tab).cloned().ok_or_else(|| StoreError::TabNotFound {
            name: tab.to_string(),
        })
    }

    async fn append_row(&self, tab: &str, row: Vec<String>) -> StoreResult<()> {
        let mut tabs = self.tabs.lock().await;
        let rows = tabs.get_mut(tab).ok_or_else(|| StoreError::TabNotFound {
            name: tab.to_string(),
        })?;
        rows.push(row);
        Ok(())
    }

    async fn update_cell(
        &self,
        tab: &str,
        row: usize,
        col: usize,
        value: String,
    ) -> StoreResult<()> {
        let mut tabs = self.tabs.lock().await;
        let rows = tabs.get_mut(tab).ok_or_else(|| StoreError::TabNotFound {
            name: tab.to_string(),
        })?;
        if row == 0 || row > rows.len() {
            return Err(StoreError::Backend {
                message: format!("row {} out of range in '{}'", row, tab),
            });
        }
        let cells = &mut rows[row - 1];
        if cells.len() < col {
            cells.resize(col, String::new());
        }
        cells[col - 1] = value;
        Ok(())
    }

    async fn delete_row(&self, tab: &str, row: usize) -> StoreResult<()> {
        let mut tabs = self.tabs.lock().await;
        let rows = tabs.get_mut(tab).ok_or_else(|| StoreError::TabNotFound {
            name: tab.to_string(),
        })?;
        if row == 0 || row > rows.len() {
            return Err(StoreError::Backend {
                message: format!("row {} out of range in '{}'", row, tab),
            });
        }
        rows.remove(row - 1);
        Ok(())
    }

    async fn ensure_tab(&self, tab: &str, header: &[&str]) -> StoreResult<()> {
        let mut tabs = self.tabs.lock().await;
        let rows = tabs.entry(tab.to_string()).or_default();
        if rows.is_empty() {
            rows.push(header.iter().map(|h| h.to_string()).collect());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_tab_errors() {
        let store = MemorySheets::new();
        assert!(store.rows("Missing").await.is_err());
        assert!(store.append_row("Missing", vec![]).await.is_err());
    }

    #[tokio::test]
    async fn test_append_and_read_back() {
        let store = MemorySheets::new();
        store.ensure_tab("T", &["A", "B"]).await.unwrap();
        store
            .append_row("T", vec!["1".to_string(), "x".to_string()])
            .await
            .unwrap();

        let rows = store.rows("T").await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], vec!["1".to_string(), "x".to_string()]);
    }

    #[tokio::test]
    async fn test_update_cell_extends_short_rows() {
        let store = MemorySheets::new();
        store.ensure_tab("T", &["A"]).await.unwrap();
        store.append_row("T", vec!["1".to_string()]).await.unwrap();
        store
            .update_cell("T", 2, 3, "z".to_string())
            .await
            .unwrap();

        let rows = store.rows("T").await.unwrap();
        assert_eq!(rows[1], vec!["1".to_string(), String::new(), "z".to_string()]);
    }

    #[tokio::test]
    async fn test_delete_row_shifts_following_rows() {
        let store = MemorySheets::new();
        store.ensure_tab("T", &["A"]).await.unwrap();
        store.append_row("T", vec!["1".to_string()]).await.unwrap();
        store.append_row("T", vec!["2".to_string()]).await.unwrap();
        store.delete_row("T", 2).await.unwrap();

        let rows = store.rows("T").await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][0], "2");
    }

    #[tokio::test]
    async fn test_out_of_range_rows_rejected() {
        let store = MemorySheets::new();
        store.ensure_tab("T", &["A"]).await.unwrap();
        assert!(store.delete_row("T", 0).await.is_err());
        assert!(store.delete_row("T", 5).await.is_err());
        assert!(store.update_cell("T", 9, 1, String::new()).await.is_err());
    }
}
