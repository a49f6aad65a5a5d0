use std::sync::Arc;

use opsdesk_core::{AppError, AppResult};
use opsdesk_domain::{ColumnSpec, table_columns};
use tracing::info;

use crate::ColumnPreferenceRepository;

/// Effective visibility of one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnVisibility {
    /// Column key.
    pub key: &'static str,
    /// Header label.
    pub label: &'static str,
    /// Whether the column is shown.
    pub visible: bool,
    /// Whether the operator may hide it.
    pub hideable: bool,
}

/// Per-table column toggles.
#[derive(Clone)]
pub struct ColumnVisibilityService {
    repository: Arc<dyn ColumnPreferenceRepository>,
}

impl ColumnVisibilityService {
    /// Creates a column visibility service.
    #[must_use]
    pub fn new(repository: Arc<dyn ColumnPreferenceRepository>) -> Self {
        Self { repository }
    }

    /// Returns every column of `table` with stored overrides applied to the
    /// defaults.
    pub async fn visibility(&self, table: &str) -> AppResult<Vec<ColumnVisibility>> {
        let columns = columns_of(table)?;
        let overrides = self.repository.overrides(table).await?;

        Ok(columns
            .iter()
            .map(|column| ColumnVisibility {
                key: column.key,
                label: column.label,
                visible: overrides
                    .get(column.key)
                    .copied()
                    .unwrap_or(column.default_visible),
                hideable: column.hideable,
            })
            .collect())
    }

    /// Shows or hides one column.
    pub async fn set_visibility(
        &self,
        table: &str,
        column: &str,
        visible: bool,
    ) -> AppResult<Vec<ColumnVisibility>> {
        let spec = columns_of(table)?
            .iter()
            .find(|spec| spec.key == column)
            .ok_or_else(|| {
                AppError::Validation(format!("unknown column '{column}' for table '{table}'"))
            })?;
        if !visible && !spec.hideable {
            return Err(AppError::Validation(format!(
                "column '{column}' of table '{table}' cannot be hidden"
            )));
        }

        self.repository.save_override(table, column, visible).await?;
        info!(table, column, visible, "column visibility changed");
        self.visibility(table).await
    }

    /// Restores the default layout of `table`.
    pub async fn reset(&self, table: &str) -> AppResult<Vec<ColumnVisibility>> {
        columns_of(table)?;
        self.repository.clear(table).await?;
        info!(table, "column visibility reset");
        self.visibility(table).await
    }
}

fn columns_of(table: &str) -> AppResult<&'static [ColumnSpec]> {
    table_columns(table).ok_or_else(|| AppError::NotFound(format!("table '{table}' does not exist")))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use opsdesk_core::AppError;

    use super::ColumnVisibilityService;
    use crate::test_support::FakeColumnPreferenceRepository;

    fn service() -> ColumnVisibilityService {
        ColumnVisibilityService::new(Arc::new(FakeColumnPreferenceRepository::default()))
    }

    fn visible(columns: &[super::ColumnVisibility], key: &str) -> Option<bool> {
        columns
            .iter()
            .find(|column| column.key == key)
            .map(|column| column.visible)
    }

    #[tokio::test]
    async fn defaults_come_from_column_catalog() {
        let columns = service()
            .visibility("access-rights")
            .await
            .unwrap_or_else(|_| unreachable!());

        assert_eq!(visible(&columns, "name"), Some(true));
        assert_eq!(visible(&columns, "notes"), Some(false));
    }

    #[tokio::test]
    async fn toggles_are_kept_per_table_and_reset() {
        let service = service();

        let columns = service
            .set_visibility("tickets", "category", false)
            .await
            .unwrap_or_else(|_| unreachable!());
        assert_eq!(visible(&columns, "category"), Some(false));

        let managers = service
            .visibility("managers")
            .await
            .unwrap_or_else(|_| unreachable!());
        assert!(managers.iter().all(|column| column.key != "category"));

        let columns = service
            .reset("tickets")
            .await
            .unwrap_or_else(|_| unreachable!());
        assert_eq!(visible(&columns, "category"), Some(true));
    }

    #[tokio::test]
    async fn pinned_and_unknown_columns_are_rejected() {
        let service = service();

        assert!(matches!(
            service.set_visibility("tags", "name", false).await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            service.set_visibility("tags", "owner", true).await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            service.visibility("clients").await,
            Err(AppError::NotFound(_))
        ));
    }
}
