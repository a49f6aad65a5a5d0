use async_trait::async_trait;
use opsdesk_application::RecordRepository;
use opsdesk_core::{AppError, AppResult, RecordId};
use opsdesk_domain::TableRecord;
use tokio::sync::RwLock;
use tracing::debug;

/// In-memory collection kept in insertion order.
#[derive(Debug)]
pub struct InMemoryRecordRepository<T> {
    records: RwLock<Vec<T>>,
}

impl<T> Default for InMemoryRecordRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> InMemoryRecordRepository<T> {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::seeded(Vec::new())
    }

    /// Creates a collection holding `records`.
    #[must_use]
    pub fn seeded(records: Vec<T>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }
}

#[async_trait]
impl<T: TableRecord> RecordRepository<T> for InMemoryRecordRepository<T> {
    async fn list_all(&self) -> AppResult<Vec<T>> {
        Ok(self.records.read().await.clone())
    }

    async fn find(&self, id: &RecordId) -> AppResult<Option<T>> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .find(|record| record.record_id() == id)
            .cloned())
    }

    async fn insert(&self, record: T) -> AppResult<()> {
        let mut records = self.records.write().await;
        if records
            .iter()
            .any(|existing| existing.record_id() == record.record_id())
        {
            return Err(AppError::Conflict(format!(
                "{} '{}' already exists",
                T::LABEL,
                record.record_id()
            )));
        }

        debug!(table = T::TABLE, record_id = %record.record_id(), "row appended");
        records.push(record);
        Ok(())
    }

    async fn replace(&self, record: T) -> AppResult<()> {
        let mut records = self.records.write().await;
        let slot = records
            .iter_mut()
            .find(|existing| existing.record_id() == record.record_id())
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "{} '{}' does not exist",
                    T::LABEL,
                    record.record_id()
                ))
            })?;

        *slot = record;
        Ok(())
    }

    async fn delete(&self, id: &RecordId) -> AppResult<Option<T>> {
        let mut records = self.records.write().await;
        let Some(index) = records.iter().position(|record| record.record_id() == id) else {
            return Ok(None);
        };

        Ok(Some(records.remove(index)))
    }
}

#[cfg(test)]
mod tests {
    use opsdesk_application::RecordRepository;
    use opsdesk_core::{AppError, RecordId};
    use opsdesk_domain::{FormContext, RecordForm, Tag, TagForm};

    use super::InMemoryRecordRepository;

    fn tag(id: &str, name: &str) -> Tag {
        TagForm {
            name: name.to_owned(),
            domain: "fx.desk.example".to_owned(),
            color: "#1E90FF".to_owned(),
            description: String::new(),
        }
        .into_record(
            RecordId::parse(id).unwrap_or_else(|_| unreachable!()),
            &FormContext::now("Admin"),
        )
        .unwrap_or_else(|_| unreachable!())
    }

    fn id(value: &str) -> RecordId {
        RecordId::parse(value).unwrap_or_else(|_| unreachable!())
    }

    #[tokio::test]
    async fn insert_keeps_order_and_rejects_duplicate_ids() {
        let repository = InMemoryRecordRepository::<Tag>::new();
        assert!(repository.insert(tag("tag-1", "VIP")).await.is_ok());
        assert!(repository.insert(tag("tag-2", "Churn risk")).await.is_ok());

        let duplicate = repository.insert(tag("tag-1", "Other")).await;
        assert!(matches!(duplicate, Err(AppError::Conflict(_))));

        let names: Vec<String> = repository
            .list_all()
            .await
            .unwrap_or_default()
            .into_iter()
            .map(|tag| tag.name)
            .collect();
        assert_eq!(names, vec!["VIP".to_owned(), "Churn risk".to_owned()]);
    }

    #[tokio::test]
    async fn replace_overwrites_in_place() {
        let repository =
            InMemoryRecordRepository::seeded(vec![tag("tag-1", "VIP"), tag("tag-2", "Churn")]);
        let mut changed = tag("tag-1", "Platinum");
        changed.color = "#000000".to_owned();

        assert!(repository.replace(changed.clone()).await.is_ok());

        let records = repository.list_all().await.unwrap_or_default();
        assert_eq!(records[0], changed);
        assert_eq!(records[1].name, "Churn");

        let missing = repository.replace(tag("tag-9", "Ghost")).await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_returns_removed_row() {
        let repository = InMemoryRecordRepository::seeded(vec![tag("tag-1", "VIP")]);

        let removed = repository.delete(&id("tag-1")).await.unwrap_or_default();
        assert_eq!(removed.map(|tag| tag.name), Some("VIP".to_owned()));
        assert_eq!(repository.delete(&id("tag-1")).await.unwrap_or_default(), None);
        assert!(
            repository
                .find(&id("tag-1"))
                .await
                .unwrap_or_default()
                .is_none()
        );
    }
}
