use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use opsdesk_application::ColumnPreferenceRepository;
use opsdesk_core::AppResult;
use tokio::sync::RwLock;

/// In-memory column visibility overrides keyed by table.
#[derive(Debug, Default)]
pub struct InMemoryColumnPreferenceRepository {
    tables: RwLock<HashMap<String, BTreeMap<String, bool>>>,
}

impl InMemoryColumnPreferenceRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ColumnPreferenceRepository for InMemoryColumnPreferenceRepository {
    async fn overrides(&self, table: &str) -> AppResult<BTreeMap<String, bool>> {
        Ok(self
            .tables
            .read()
            .await
            .get(table)
            .cloned()
            .unwrap_or_default())
    }

    async fn save_override(&self, table: &str, column: &str, visible: bool) -> AppResult<()> {
        self.tables
            .write()
            .await
            .entry(table.to_owned())
            .or_default()
            .insert(column.to_owned(), visible);
        Ok(())
    }

    async fn clear(&self, table: &str) -> AppResult<()> {
        self.tables.write().await.remove(table);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use opsdesk_application::ColumnPreferenceRepository;

    use super::InMemoryColumnPreferenceRepository;

    #[tokio::test]
    async fn overrides_are_scoped_to_table() {
        let repository = InMemoryColumnPreferenceRepository::new();
        assert!(repository.save_override("tickets", "category", false).await.is_ok());
        assert!(repository.save_override("tickets", "tags", false).await.is_ok());
        assert!(repository.save_override("tags", "color", false).await.is_ok());

        assert!(repository.clear("tickets").await.is_ok());

        assert!(repository.overrides("tickets").await.unwrap_or_default().is_empty());
        assert_eq!(
            repository
                .overrides("tags")
                .await
                .unwrap_or_default()
                .get("color"),
            Some(&false)
        );
    }
}
