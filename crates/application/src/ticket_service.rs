use std::sync::Arc;

use chrono::Utc;
use opsdesk_core::{AppError, AppResult, FieldErrors, RecordId};
use opsdesk_domain::{
    MessageKind, Ticket, TicketMessage, TicketPriority, TicketStatus, TicketUpdate,
    normalize_tags,
};
use tracing::info;

use crate::record_service::not_found;
use crate::{RecordRepository, TicketMessageRepository};

/// Result of a ticket panel update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketUpdateOutcome {
    /// Ticket after the update.
    pub ticket: Ticket,
    /// System messages appended to the thread, one per changed field.
    pub messages: Vec<TicketMessage>,
}

/// Ticket counters for the support dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketSummary {
    /// Number of tickets.
    pub total: usize,
    /// Tickets per status, every status listed.
    pub by_status: Vec<(TicketStatus, usize)>,
    /// Tickets per priority, every priority listed.
    pub by_priority: Vec<(TicketPriority, usize)>,
    /// Tickets with no assignee that still need work.
    pub unassigned_open: usize,
    /// Customer messages not yet read, over all tickets.
    pub unread_messages: u64,
}

/// Status, assignment and chat operations on tickets.
#[derive(Clone)]
pub struct TicketService {
    tickets: Arc<dyn RecordRepository<Ticket>>,
    messages: Arc<dyn TicketMessageRepository>,
}

impl TicketService {
    /// Creates a ticket service.
    #[must_use]
    pub fn new(
        tickets: Arc<dyn RecordRepository<Ticket>>,
        messages: Arc<dyn TicketMessageRepository>,
    ) -> Self {
        Self { tickets, messages }
    }

    async fn ticket(&self, id: &RecordId) -> AppResult<Ticket> {
        self.tickets
            .find(id)
            .await?
            .ok_or_else(|| not_found::<Ticket>(id))
    }

    /// Applies status, priority and assignee changes to one ticket.
    ///
    /// Every field that actually changes adds one system message to the
    /// thread. An update that changes nothing leaves the ticket and its
    /// thread untouched; an update that names no field is rejected.
    pub async fn update_ticket(
        &self,
        id: &RecordId,
        update: TicketUpdate,
        operator: &str,
    ) -> AppResult<TicketUpdateOutcome> {
        if update.is_empty() {
            return Err(AppError::Validation(
                "ticket update must set a status, priority or assignee".to_owned(),
            ));
        }

        let mut ticket = self.ticket(id).await?;
        let now = Utc::now();
        let changes = ticket.apply_update(&update, now);
        if changes.is_empty() {
            return Ok(TicketUpdateOutcome {
                ticket,
                messages: Vec::new(),
            });
        }

        self.tickets.replace(ticket.clone()).await?;
        let messages: Vec<TicketMessage> = changes
            .iter()
            .map(|change| {
                TicketMessage::new(
                    ticket.id.clone(),
                    operator,
                    MessageKind::System,
                    change.describe(),
                    now,
                )
            })
            .collect();
        self.messages.append(messages.clone()).await?;

        for message in &messages {
            info!(ticket_id = %id, operator, change = %message.body, "ticket updated");
        }

        Ok(TicketUpdateOutcome { ticket, messages })
    }

    /// Returns the chat thread of one ticket.
    pub async fn list_messages(&self, id: &RecordId) -> AppResult<Vec<TicketMessage>> {
        self.ticket(id).await?;
        let mut messages = self.messages.list_for_ticket(id).await?;
        messages.sort_by_key(|message| message.sent_at);
        Ok(messages)
    }

    /// Posts an agent reply.
    pub async fn post_message(
        &self,
        id: &RecordId,
        author: &str,
        body: &str,
    ) -> AppResult<TicketMessage> {
        let body = body.trim();
        if body.is_empty() {
            let mut errors = FieldErrors::new();
            errors.push("body", "Message cannot be empty");
            return Err(errors.into());
        }

        let mut ticket = self.ticket(id).await?;
        let now = Utc::now();
        ticket.record_message(MessageKind::Agent, now);
        self.tickets.replace(ticket).await?;

        let message = TicketMessage::new(id.clone(), author, MessageKind::Agent, body, now);
        self.messages.append(vec![message.clone()]).await?;

        info!(ticket_id = %id, author, "ticket reply posted");
        Ok(message)
    }

    /// Clears the unread counter of one ticket.
    pub async fn mark_read(&self, id: &RecordId) -> AppResult<Ticket> {
        let mut ticket = self.ticket(id).await?;
        if ticket.unread_count > 0 {
            ticket.mark_read();
            self.tickets.replace(ticket.clone()).await?;
        }

        Ok(ticket)
    }

    /// Replaces the tag set of one ticket.
    pub async fn assign_tags(
        &self,
        id: &RecordId,
        tags: &[String],
        operator: &str,
    ) -> AppResult<Ticket> {
        if tags.iter().any(|tag| tag.trim().is_empty()) {
            let mut errors = FieldErrors::new();
            errors.push("tags", "Tag names cannot be blank");
            return Err(errors.into());
        }

        let mut ticket = self.ticket(id).await?;
        ticket.tags = normalize_tags(tags);
        ticket.updated_at = Utc::now();
        self.tickets.replace(ticket.clone()).await?;

        info!(ticket_id = %id, operator, tags = %ticket.tag_list(), "ticket tags assigned");
        Ok(ticket)
    }

    /// Deletes one ticket together with its thread.
    pub async fn delete_ticket(&self, id: &RecordId, operator: &str) -> AppResult<Ticket> {
        let removed = self
            .tickets
            .delete(id)
            .await?
            .ok_or_else(|| not_found::<Ticket>(id))?;
        self.messages.delete_for_ticket(id).await?;

        info!(ticket_id = %id, operator, "ticket deleted");
        Ok(removed)
    }

    /// Counts tickets per status and priority.
    pub async fn summary(&self) -> AppResult<TicketSummary> {
        let tickets = self.tickets.list_all().await?;

        let by_status = TicketStatus::ALL
            .iter()
            .map(|status| {
                let count = tickets
                    .iter()
                    .filter(|ticket| ticket.status == *status)
                    .count();
                (*status, count)
            })
            .collect();
        let by_priority = TicketPriority::ALL
            .iter()
            .map(|priority| {
                let count = tickets
                    .iter()
                    .filter(|ticket| ticket.priority == *priority)
                    .count();
                (*priority, count)
            })
            .collect();

        Ok(TicketSummary {
            total: tickets.len(),
            by_status,
            by_priority,
            unassigned_open: tickets
                .iter()
                .filter(|ticket| ticket.assigned_to.is_none() && ticket.status.is_open())
                .count(),
            unread_messages: tickets
                .iter()
                .map(|ticket| u64::from(ticket.unread_count))
                .sum(),
        })
    }
}

#[cfg(test)]
mod tests;
