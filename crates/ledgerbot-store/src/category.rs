//! Category registry

use crate::error::StoreResult;
use crate::{StoreRef, CATEGORIES_TAB};

/// Categories seeded on first run, alphabetical
pub const DEFAULT_CATEGORIES: [&str; 15] = [
    "Clothing",
    "Debts & Loans",
    "Dining",
    "Education",
    "Gifts & Donations",
    "Groceries",
    "Health",
    "Home",
    "Leisure",
    "Other",
    "Personal Care",
    "Pet",
    "Pharmacy",
    "Taxes",
    "Transport",
];

/// Store of category names, one per row
pub struct CategoryRegistry {
    store: StoreRef,
}

impl CategoryRegistry {
    pub fn new(store: StoreRef) -> Self {
        Self { store }
    }

    /// All category names in storage order. Blank cells are skipped and
    /// duplicates keep their first occurrence.
    pub async fn list(&self) -> StoreResult<Vec<String>> {
        let rows = self.store.rows(CATEGORIES_TAB).await?;
        let mut names: Vec<String> = Vec::new();
        for row in rows.iter().skip(1) {
            let name = row.first().map(|c| c.trim()).unwrap_or_default();
            if !name.is_empty() && !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }

    /// Add a category. Returns false without mutating the store when an
    /// exact match already exists. Matching is case-sensitive, so "food"
    /// and "Food" coexist.
    pub async fn add(&self, name: &str) -> StoreResult<bool> {
        let name = name.trim();
        if self.list().await?.iter().any(|n| n == name) {
            return Ok(false);
        }
        self.store
            .append_row(CATEGORIES_TAB, vec![name.to_string()])
            .await?;
        log::info!("added category {:?}", name);
        Ok(true)
    }

    /// Delete the first row holding the category. Returns false when no
    /// row matches.
    pub async fn delete(&self, name: &str) -> StoreResult<bool> {
        let rows = self.store.rows(CATEGORIES_TAB).await?;
        let found = rows
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, row)| row.first().map(|c| c.trim()) == Some(name));

        match found {
            Some((index, _)) => {
                self.store.delete_row(CATEGORIES_TAB, index + 1).await?;
                log::info!("deleted category {:?}", name);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{initialize, MemorySheets};
    use std::sync::Arc;

    async fn registry() -> CategoryRegistry {
        let store: StoreRef = Arc::new(MemorySheets::new());
        initialize(&store).await.unwrap();
        CategoryRegistry::new(store)
    }

    #[tokio::test]
    async fn test_list_returns_defaults_after_seed() {
        let registry = registry().await;
        let names = registry.list().await.unwrap();
        assert_eq!(names.len(), DEFAULT_CATEGORIES.len());
        assert_eq!(names[0], "Clothing");
    }

    #[tokio::test]
    async fn test_add_rejects_exact_duplicate() {
        let registry = registry().await;
        assert!(!registry.add("Groceries").await.unwrap());
        assert!(registry.add("Streaming").await.unwrap());
        assert!(!registry.add("Streaming").await.unwrap());

        let names = registry.list().await.unwrap();
        assert_eq!(
            names.iter().filter(|n| *n == "Streaming").count(),
            1
        );
    }

    #[tokio::test]
    async fn test_add_is_case_sensitive() {
        let registry = registry().await;
        assert!(registry.add("groceries").await.unwrap());
        let names = registry.list().await.unwrap();
        assert!(names.contains(&"Groceries".to_string()));
        assert!(names.contains(&"groceries".to_string()));
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_one_row() {
        let registry = registry().await;
        let before = registry.list().await.unwrap().len();
        assert!(registry.delete("Pet").await.unwrap());

        let names = registry.list().await.unwrap();
        assert_eq!(names.len(), before - 1);
        assert!(!names.contains(&"Pet".to_string()));
    }

    #[tokio::test]
    async fn test_delete_missing_returns_false() {
        let registry = registry().await;
        assert!(!registry.delete("Nope").await.unwrap());
    }
}
