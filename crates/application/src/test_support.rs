use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use opsdesk_core::{AppError, AppResult, RecordId};
use opsdesk_domain::{TableRecord, TicketMessage};

use crate::{ColumnPreferenceRepository, RecordRepository, TicketMessageRepository};

/// Vector-backed collection that counts writes.
pub(crate) struct FakeRecordRepository<T> {
    pub(crate) records: Mutex<Vec<T>>,
    pub(crate) writes: Mutex<usize>,
}

impl<T> FakeRecordRepository<T> {
    pub(crate) fn with(records: Vec<T>) -> Self {
        Self {
            records: Mutex::new(records),
            writes: Mutex::new(0),
        }
    }

    pub(crate) async fn write_count(&self) -> usize {
        *self.writes.lock().await
    }

    async fn count_write(&self) {
        *self.writes.lock().await += 1;
    }
}

#[async_trait]
impl<T: TableRecord> RecordRepository<T> for FakeRecordRepository<T> {
    async fn list_all(&self) -> AppResult<Vec<T>> {
        Ok(self.records.lock().await.clone())
    }

    async fn find(&self, id: &RecordId) -> AppResult<Option<T>> {
        Ok(self
            .records
            .lock()
            .await
            .iter()
            .find(|record| record.record_id() == id)
            .cloned())
    }

    async fn insert(&self, record: T) -> AppResult<()> {
        self.count_write().await;
        self.records.lock().await.push(record);
        Ok(())
    }

    async fn replace(&self, record: T) -> AppResult<()> {
        self.count_write().await;
        let mut records = self.records.lock().await;
        let slot = records
            .iter_mut()
            .find(|existing| existing.record_id() == record.record_id())
            .ok_or_else(|| AppError::NotFound("missing".to_owned()))?;
        *slot = record;
        Ok(())
    }

    async fn delete(&self, id: &RecordId) -> AppResult<Option<T>> {
        self.count_write().await;
        let mut records = self.records.lock().await;
        Ok(records
            .iter()
            .position(|record| record.record_id() == id)
            .map(|index| records.remove(index)))
    }
}

#[derive(Default)]
pub(crate) struct FakeMessageRepository {
    pub(crate) messages: Mutex<Vec<TicketMessage>>,
}

#[async_trait]
impl TicketMessageRepository for FakeMessageRepository {
    async fn list_for_ticket(&self, ticket_id: &RecordId) -> AppResult<Vec<TicketMessage>> {
        Ok(self
            .messages
            .lock()
            .await
            .iter()
            .filter(|message| &message.ticket_id == ticket_id)
            .cloned()
            .collect())
    }

    async fn append(&self, messages: Vec<TicketMessage>) -> AppResult<()> {
        self.messages.lock().await.extend(messages);
        Ok(())
    }

    async fn delete_for_ticket(&self, ticket_id: &RecordId) -> AppResult<()> {
        self.messages
            .lock()
            .await
            .retain(|message| &message.ticket_id != ticket_id);
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct FakeColumnPreferenceRepository {
    pub(crate) overrides: Mutex<BTreeMap<(String, String), bool>>,
}

#[async_trait]
impl ColumnPreferenceRepository for FakeColumnPreferenceRepository {
    async fn overrides(&self, table: &str) -> AppResult<BTreeMap<String, bool>> {
        Ok(self
            .overrides
            .lock()
            .await
            .iter()
            .filter(|((stored_table, _), _)| stored_table == table)
            .map(|((_, column), visible)| (column.clone(), *visible))
            .collect())
    }

    async fn save_override(&self, table: &str, column: &str, visible: bool) -> AppResult<()> {
        self.overrides
            .lock()
            .await
            .insert((table.to_owned(), column.to_owned()), visible);
        Ok(())
    }

    async fn clear(&self, table: &str) -> AppResult<()> {
        self.overrides
            .lock()
            .await
            .retain(|(stored_table, _), _| stored_table != table);
        Ok(())
    }
}
