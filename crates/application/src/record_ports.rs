use std::collections::BTreeMap;

use async_trait::async_trait;

use opsdesk_core::{AppResult, RecordId};
use opsdesk_domain::{TableRecord, TicketMessage};

/// Repository port for one back-office collection.
///
/// Each call is atomic on its own. Read-modify-write sequences built from
/// `find` and `replace` are last-write-wins.
#[async_trait]
pub trait RecordRepository<T: TableRecord>: Send + Sync {
    /// Returns every record in storage order.
    async fn list_all(&self) -> AppResult<Vec<T>>;

    /// Returns one record by id.
    async fn find(&self, id: &RecordId) -> AppResult<Option<T>>;

    /// Appends a new record. Fails with a conflict when the id is taken.
    async fn insert(&self, record: T) -> AppResult<()>;

    /// Overwrites the record with the same id in place.
    async fn replace(&self, record: T) -> AppResult<()>;

    /// Removes one record and returns it, `None` when the id is unknown.
    async fn delete(&self, id: &RecordId) -> AppResult<Option<T>>;
}

/// Repository port for operator column-visibility overrides.
#[async_trait]
pub trait ColumnPreferenceRepository: Send + Sync {
    /// Returns stored overrides for one table, keyed by column.
    async fn overrides(&self, table: &str) -> AppResult<BTreeMap<String, bool>>;

    /// Stores one override.
    async fn save_override(&self, table: &str, column: &str, visible: bool) -> AppResult<()>;

    /// Drops every override of one table.
    async fn clear(&self, table: &str) -> AppResult<()>;
}

/// Repository port for ticket chat threads.
#[async_trait]
pub trait TicketMessageRepository: Send + Sync {
    /// Returns the thread of one ticket in send order.
    async fn list_for_ticket(&self, ticket_id: &RecordId) -> AppResult<Vec<TicketMessage>>;

    /// Appends messages to their threads.
    async fn append(&self, messages: Vec<TicketMessage>) -> AppResult<()>;

    /// Drops the thread of one ticket.
    async fn delete_for_ticket(&self, ticket_id: &RecordId) -> AppResult<()>;
}
