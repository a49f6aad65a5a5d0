use std::collections::HashMap;

use async_trait::async_trait;
use opsdesk_application::TicketMessageRepository;
use opsdesk_core::{AppResult, RecordId};
use opsdesk_domain::TicketMessage;
use tokio::sync::RwLock;

/// In-memory chat threads keyed by ticket.
#[derive(Debug, Default)]
pub struct InMemoryTicketMessageRepository {
    threads: RwLock<HashMap<RecordId, Vec<TicketMessage>>>,
}

impl InMemoryTicketMessageRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository holding `messages`.
    #[must_use]
    pub fn seeded(messages: Vec<TicketMessage>) -> Self {
        let mut threads: HashMap<RecordId, Vec<TicketMessage>> = HashMap::new();
        for message in messages {
            threads
                .entry(message.ticket_id.clone())
                .or_default()
                .push(message);
        }

        Self {
            threads: RwLock::new(threads),
        }
    }
}

#[async_trait]
impl TicketMessageRepository for InMemoryTicketMessageRepository {
    async fn list_for_ticket(&self, ticket_id: &RecordId) -> AppResult<Vec<TicketMessage>> {
        Ok(self
            .threads
            .read()
            .await
            .get(ticket_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn append(&self, messages: Vec<TicketMessage>) -> AppResult<()> {
        let mut threads = self.threads.write().await;
        for message in messages {
            threads
                .entry(message.ticket_id.clone())
                .or_default()
                .push(message);
        }

        Ok(())
    }

    async fn delete_for_ticket(&self, ticket_id: &RecordId) -> AppResult<()> {
        self.threads.write().await.remove(ticket_id);
        Ok(())
    }
}
