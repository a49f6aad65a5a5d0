//! Support tickets and their chat thread.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use opsdesk_core::{AppResult, FieldErrors, RecordId};
use serde::{Deserialize, Serialize};

use crate::choice::choice_enum;
use crate::validation::{check_email, optional_text, parse_choice};
use crate::{CellValue, ColumnSpec, FormContext, FormMode, RecordForm, TableRecord};

choice_enum! {
    /// Lifecycle state of a ticket.
    pub enum TicketStatus ("ticket status") {
        /// Newly raised, not picked up.
        Open => ("open", "Open"),
        /// An agent is working on it.
        InProgress => ("in_progress", "In Progress"),
        /// Blocked on a customer reply.
        WaitingOnCustomer => ("waiting_on_customer", "Waiting on Customer"),
        /// Handed to a senior desk.
        Escalated => ("escalated", "Escalated"),
        /// Answered; may still be reopened.
        Resolved => ("resolved", "Resolved"),
        /// Finished.
        Closed => ("closed", "Closed"),
    }
}

choice_enum! {
    /// Urgency of a ticket.
    pub enum TicketPriority ("ticket priority") {
        /// Can wait.
        Low => ("low", "Low"),
        /// Normal handling.
        Medium => ("medium", "Medium"),
        /// Handle today.
        High => ("high", "High"),
        /// Handle within the hour.
        Urgent => ("urgent", "Urgent"),
        /// Money or access at risk.
        Critical => ("critical", "Critical"),
    }
}

choice_enum! {
    /// Topic of a ticket.
    pub enum TicketCategory ("ticket category") {
        /// Account settings and profile.
        Account => ("account", "Account"),
        /// Incoming funds.
        Deposit => ("deposit", "Deposit"),
        /// Outgoing funds.
        Withdrawal => ("withdrawal", "Withdrawal"),
        /// Orders and positions.
        Trading => ("trading", "Trading"),
        /// Platform problems.
        Technical => ("technical", "Technical"),
        /// KYC documents.
        Verification => ("verification", "Verification"),
        /// Promotions and bonuses.
        Bonus => ("bonus", "Bonus"),
        /// Anything else.
        General => ("general", "General"),
    }
}

choice_enum! {
    /// Author class of a chat message.
    pub enum MessageKind ("message kind") {
        /// Written by the customer.
        Customer => ("customer", "Customer"),
        /// Written by a back-office agent.
        Agent => ("agent", "Agent"),
        /// Generated by the desk when the ticket changes.
        System => ("system", "System"),
    }
}

impl TicketStatus {
    /// Returns whether the ticket still needs work.
    #[must_use]
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Resolved | Self::Closed)
    }
}

/// Customer details embedded in a ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    /// Full name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Trading account number.
    pub account_id: String,
    /// Optional phone number.
    pub phone: Option<String>,
    /// Country of residence.
    pub country: String,
}

/// Agent a ticket is assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignee {
    /// Agent identifier. Never checked against the manager list.
    pub id: String,
    /// Agent display name.
    pub name: String,
}

/// Support ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    /// Row identifier.
    pub id: RecordId,
    /// Subject line.
    pub title: String,
    /// Problem description.
    pub description: String,
    /// Lifecycle state.
    pub status: TicketStatus,
    /// Urgency.
    pub priority: TicketPriority,
    /// Topic.
    pub category: TicketCategory,
    /// Current assignee.
    pub assigned_to: Option<Assignee>,
    /// Creator identifier.
    pub created_by_id: String,
    /// Creator display name.
    pub created_by_name: String,
    /// Messages in the thread.
    pub message_count: u32,
    /// Customer messages not yet read by an agent.
    pub unread_count: u32,
    /// Attached tag names.
    pub tags: BTreeSet<String>,
    /// Customer details.
    pub customer: CustomerInfo,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

/// One entry in a ticket's chat thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketMessage {
    /// Message identifier.
    pub id: RecordId,
    /// Ticket the message belongs to.
    pub ticket_id: RecordId,
    /// Author display name.
    pub author: String,
    /// Author class.
    pub kind: MessageKind,
    /// Message text.
    pub body: String,
    /// Send time.
    pub sent_at: DateTime<Utc>,
}

impl TicketMessage {
    /// Creates a message stamped at `sent_at`.
    #[must_use]
    pub fn new(
        ticket_id: RecordId,
        author: impl Into<String>,
        kind: MessageKind,
        body: impl Into<String>,
        sent_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: RecordId::generate(),
            ticket_id,
            author: author.into(),
            kind,
            body: body.into(),
            sent_at,
        }
    }
}

/// Partial update applied from the ticket chat panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketUpdate {
    /// New status.
    pub status: Option<TicketStatus>,
    /// New priority.
    pub priority: Option<TicketPriority>,
    /// New assignee; `Some(None)` unassigns.
    pub assignee: Option<Option<Assignee>>,
}

impl TicketUpdate {
    /// Returns whether the update carries no field.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.priority.is_none() && self.assignee.is_none()
    }
}

/// One field change produced by [`Ticket::apply_update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketChange {
    /// Status moved.
    Status {
        /// Previous value.
        from: TicketStatus,
        /// New value.
        to: TicketStatus,
    },
    /// Priority moved.
    Priority {
        /// Previous value.
        from: TicketPriority,
        /// New value.
        to: TicketPriority,
    },
    /// Assignee replaced or removed.
    Assignee {
        /// New assignee name, `None` when unassigned.
        to: Option<String>,
    },
}

impl TicketChange {
    /// Text of the system chat line announcing the change.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Status { from, to } => format!("Status changed from {from} to {to}"),
            Self::Priority { from, to } => format!("Priority changed from {from} to {to}"),
            Self::Assignee { to: Some(name) } => format!("Ticket assigned to {name}"),
            Self::Assignee { to: None } => "Ticket unassigned".to_owned(),
        }
    }
}

impl Ticket {
    /// Merges `update` into the ticket and returns the fields that changed.
    ///
    /// Fields equal to their current value are not reported. Each reported
    /// change counts as one system message in the thread.
    pub fn apply_update(&mut self, update: &TicketUpdate, now: DateTime<Utc>) -> Vec<TicketChange> {
        let mut changes = Vec::new();

        if let Some(status) = update.status
            && status != self.status
        {
            changes.push(TicketChange::Status {
                from: self.status,
                to: status,
            });
            self.status = status;
        }

        if let Some(priority) = update.priority
            && priority != self.priority
        {
            changes.push(TicketChange::Priority {
                from: self.priority,
                to: priority,
            });
            self.priority = priority;
        }

        if let Some(assignee) = &update.assignee
            && assignee != &self.assigned_to
        {
            changes.push(TicketChange::Assignee {
                to: assignee.as_ref().map(|assignee| assignee.name.clone()),
            });
            self.assigned_to = assignee.clone();
        }

        if !changes.is_empty() {
            self.message_count = self
                .message_count
                .saturating_add(u32::try_from(changes.len()).unwrap_or(u32::MAX));
            self.updated_at = now;
        }

        changes
    }

    /// Counts one new message in the thread.
    pub fn record_message(&mut self, kind: MessageKind, now: DateTime<Utc>) {
        self.message_count = self.message_count.saturating_add(1);
        if kind == MessageKind::Customer {
            self.unread_count = self.unread_count.saturating_add(1);
        }
        self.updated_at = now;
    }

    /// Clears the unread counter.
    pub fn mark_read(&mut self) {
        self.unread_count = 0;
    }

    /// Comma-separated tag names in alphabetical order.
    #[must_use]
    pub fn tag_list(&self) -> String {
        self.tags.iter().cloned().collect::<Vec<_>>().join(", ")
    }
}

const TICKET_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::text("id", "Ticket").pinned(),
    ColumnSpec::text("title", "Title").pinned(),
    ColumnSpec::text("customer", "Customer"),
    ColumnSpec::text("customer_email", "Customer Email").hidden(),
    ColumnSpec::discrete("status", "Status"),
    ColumnSpec::discrete("priority", "Priority"),
    ColumnSpec::discrete("category", "Category"),
    ColumnSpec::text("assigned_to", "Assigned To").filterable(),
    ColumnSpec::value("message_count", "Messages"),
    ColumnSpec::value("unread_count", "Unread").hidden(),
    ColumnSpec::text("tags", "Tags"),
    ColumnSpec::value("created_at", "Created").hidden(),
    ColumnSpec::value("updated_at", "Updated"),
];

impl TableRecord for Ticket {
    const TABLE: &'static str = "tickets";
    const LABEL: &'static str = "ticket";

    fn columns() -> &'static [ColumnSpec] {
        TICKET_COLUMNS
    }

    fn record_id(&self) -> &RecordId {
        &self.id
    }

    fn cell(&self, column: &str) -> CellValue {
        match column {
            "id" => CellValue::text(self.id.as_str()),
            "title" => CellValue::text(self.title.as_str()),
            "customer" => CellValue::text(self.customer.name.as_str()),
            "customer_email" => CellValue::text(self.customer.email.as_str()),
            "status" => self.status.cell(),
            "priority" => self.priority.cell(),
            "category" => self.category.cell(),
            "assigned_to" => CellValue::optional_text(
                self.assigned_to
                    .as_ref()
                    .map(|assignee| assignee.name.as_str()),
            ),
            "message_count" => CellValue::Integer(i64::from(self.message_count)),
            "unread_count" => CellValue::Integer(i64::from(self.unread_count)),
            "tags" => CellValue::Text(self.tag_list()),
            "created_at" => CellValue::Timestamp(self.created_at),
            "updated_at" => CellValue::Timestamp(self.updated_at),
            _ => CellValue::Empty,
        }
    }
}

/// Add/edit form for tickets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketForm {
    /// Subject line.
    pub title: String,
    /// Problem description.
    pub description: String,
    /// Status transport value.
    pub status: String,
    /// Priority transport value.
    pub priority: String,
    /// Category transport value.
    pub category: String,
    /// Optional assignee identifier.
    pub assigned_to_id: String,
    /// Assignee display name, required with an identifier.
    pub assigned_to_name: String,
    /// Tag names; blank entries are dropped.
    pub tags: Vec<String>,
    /// Customer name.
    pub customer_name: String,
    /// Customer email.
    pub customer_email: String,
    /// Customer trading account.
    pub customer_account_id: String,
    /// Optional customer phone.
    pub customer_phone: String,
    /// Customer country.
    pub customer_country: String,
}

impl TicketForm {
    /// Empty create-mode form with the usual defaults selected.
    #[must_use]
    pub fn blank() -> Self {
        Self {
            status: TicketStatus::Open.as_str().to_owned(),
            priority: TicketPriority::Medium.as_str().to_owned(),
            category: TicketCategory::General.as_str().to_owned(),
            ..Self::default()
        }
    }
}

struct ParsedTicket {
    status: TicketStatus,
    priority: TicketPriority,
    category: TicketCategory,
    assigned_to: Option<Assignee>,
    tags: BTreeSet<String>,
    customer: CustomerInfo,
}

impl TicketForm {
    fn parse(&self) -> Result<ParsedTicket, FieldErrors> {
        let mut errors = FieldErrors::new();

        errors.require("title", &self.title, "Title is required");
        errors.require("description", &self.description, "Description is required");
        let status = parse_choice::<TicketStatus>(
            &mut errors,
            "status",
            &self.status,
            "Status is required",
            "Select a valid status",
        );
        let priority = parse_choice::<TicketPriority>(
            &mut errors,
            "priority",
            &self.priority,
            "Priority is required",
            "Select a valid priority",
        );
        let category = parse_choice::<TicketCategory>(
            &mut errors,
            "category",
            &self.category,
            "Category is required",
            "Select a valid category",
        );

        let assigned_to = match optional_text(&self.assigned_to_id) {
            Some(id) => {
                errors.require(
                    "assigned_to_name",
                    &self.assigned_to_name,
                    "Assignee name is required",
                );
                Some(Assignee {
                    id,
                    name: self.assigned_to_name.trim().to_owned(),
                })
            }
            None => None,
        };

        errors.require("customer_name", &self.customer_name, "Customer name is required");
        check_email(
            &mut errors,
            "customer_email",
            &self.customer_email,
            "Customer email is required",
        );
        errors.require(
            "customer_account_id",
            &self.customer_account_id,
            "Customer account ID is required",
        );
        errors.require("customer_country", &self.customer_country, "Country is required");

        match (status, priority, category) {
            (Some(status), Some(priority), Some(category)) if errors.is_empty() => {
                Ok(ParsedTicket {
                    status,
                    priority,
                    category,
                    assigned_to,
                    tags: normalize_tags(&self.tags),
                    customer: CustomerInfo {
                        name: self.customer_name.trim().to_owned(),
                        email: self.customer_email.trim().to_owned(),
                        account_id: self.customer_account_id.trim().to_owned(),
                        phone: optional_text(&self.customer_phone),
                        country: self.customer_country.trim().to_owned(),
                    },
                })
            }
            _ => Err(errors),
        }
    }
}

/// Trims tag names and drops blanks and duplicates.
#[must_use]
pub fn normalize_tags(tags: &[String]) -> BTreeSet<String> {
    tags.iter().filter_map(|tag| optional_text(tag)).collect()
}

impl RecordForm for TicketForm {
    type Record = Ticket;

    fn from_record(record: &Ticket) -> Self {
        Self {
            title: record.title.clone(),
            description: record.description.clone(),
            status: record.status.as_str().to_owned(),
            priority: record.priority.as_str().to_owned(),
            category: record.category.as_str().to_owned(),
            assigned_to_id: record
                .assigned_to
                .as_ref()
                .map(|assignee| assignee.id.clone())
                .unwrap_or_default(),
            assigned_to_name: record
                .assigned_to
                .as_ref()
                .map(|assignee| assignee.name.clone())
                .unwrap_or_default(),
            tags: record.tags.iter().cloned().collect(),
            customer_name: record.customer.name.clone(),
            customer_email: record.customer.email.clone(),
            customer_account_id: record.customer.account_id.clone(),
            customer_phone: record.customer.phone.clone().unwrap_or_default(),
            customer_country: record.customer.country.clone(),
        }
    }

    fn validate(&self, _mode: FormMode) -> Result<(), FieldErrors> {
        self.parse().map(|_| ())
    }

    fn into_record(self, id: RecordId, context: &FormContext) -> AppResult<Ticket> {
        let parsed = self.parse()?;
        Ok(Ticket {
            id,
            title: self.title.trim().to_owned(),
            description: self.description.trim().to_owned(),
            status: parsed.status,
            priority: parsed.priority,
            category: parsed.category,
            assigned_to: parsed.assigned_to,
            created_by_id: context.operator.to_lowercase().replace(' ', "."),
            created_by_name: context.operator.clone(),
            message_count: 0,
            unread_count: 0,
            tags: parsed.tags,
            customer: parsed.customer,
            created_at: context.now,
            updated_at: context.now,
        })
    }

    fn apply_to(self, record: &mut Ticket, context: &FormContext) -> AppResult<()> {
        let parsed = self.parse()?;
        record.title = self.title.trim().to_owned();
        record.description = self.description.trim().to_owned();
        record.status = parsed.status;
        record.priority = parsed.priority;
        record.category = parsed.category;
        record.assigned_to = parsed.assigned_to;
        record.tags = parsed.tags;
        record.customer = parsed.customer;
        record.updated_at = context.now;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> TicketForm {
        TicketForm {
            title: "Withdrawal stuck in review".to_owned(),
            description: "Requested 1,200 USD three days ago".to_owned(),
            tags: vec![" vip ".to_owned(), String::new(), "withdrawal".to_owned()],
            customer_name: "Omar Haddad".to_owned(),
            customer_email: "omar.haddad@mail.example".to_owned(),
            customer_account_id: "MT5-204431".to_owned(),
            customer_country: "Jordan".to_owned(),
            ..TicketForm::blank()
        }
    }

    fn ticket() -> Ticket {
        form()
            .into_record(RecordId::generate(), &FormContext::now("Lena Ortiz"))
            .unwrap_or_else(|_| unreachable!())
    }

    #[test]
    fn blank_form_defaults_to_open_medium_general() {
        let ticket = ticket();
        assert_eq!(ticket.status, TicketStatus::Open);
        assert_eq!(ticket.priority, TicketPriority::Medium);
        assert_eq!(ticket.category, TicketCategory::General);
        assert_eq!(ticket.created_by_id, "lena.ortiz");
        assert_eq!(ticket.tag_list(), "vip, withdrawal");
    }

    #[test]
    fn status_update_reports_change_and_counts_message() {
        let mut ticket = ticket();
        let now = Utc::now();
        let changes = ticket.apply_update(
            &TicketUpdate {
                status: Some(TicketStatus::InProgress),
                ..TicketUpdate::default()
            },
            now,
        );

        assert_eq!(changes.len(), 1);
        assert_eq!(
            changes[0].describe(),
            "Status changed from Open to In Progress"
        );
        assert_eq!(ticket.status, TicketStatus::InProgress);
        assert_eq!(ticket.message_count, 1);
        assert_eq!(ticket.updated_at, now);
    }

    #[test]
    fn unchanged_values_produce_no_change() {
        let mut ticket = ticket();
        let before = ticket.clone();
        let changes = ticket.apply_update(
            &TicketUpdate {
                status: Some(TicketStatus::Open),
                priority: Some(TicketPriority::Medium),
                assignee: Some(None),
            },
            Utc::now(),
        );

        assert!(changes.is_empty());
        assert_eq!(ticket, before);
    }

    #[test]
    fn assignment_and_unassignment_are_described() {
        let mut ticket = ticket();
        let changes = ticket.apply_update(
            &TicketUpdate {
                assignee: Some(Some(Assignee {
                    id: "mgr-4".to_owned(),
                    name: "Nadia Petrova".to_owned(),
                })),
                priority: Some(TicketPriority::Urgent),
                ..TicketUpdate::default()
            },
            Utc::now(),
        );
        let described: Vec<String> = changes.iter().map(TicketChange::describe).collect();
        assert_eq!(
            described,
            vec![
                "Priority changed from Medium to Urgent".to_owned(),
                "Ticket assigned to Nadia Petrova".to_owned(),
            ]
        );

        let changes = ticket.apply_update(
            &TicketUpdate {
                assignee: Some(None),
                ..TicketUpdate::default()
            },
            Utc::now(),
        );
        assert_eq!(changes[0].describe(), "Ticket unassigned");
        assert_eq!(ticket.message_count, 3);
    }

    #[test]
    fn customer_messages_raise_unread_counter() {
        let mut ticket = ticket();
        ticket.record_message(MessageKind::Customer, Utc::now());
        ticket.record_message(MessageKind::Agent, Utc::now());

        assert_eq!(ticket.message_count, 2);
        assert_eq!(ticket.unread_count, 1);

        ticket.mark_read();
        assert_eq!(ticket.unread_count, 0);
    }

    #[test]
    fn assignee_id_requires_name() {
        let mut form = form();
        form.assigned_to_id = "mgr-4".to_owned();

        let errors = form
            .validate(FormMode::Create)
            .err()
            .unwrap_or_else(|| unreachable!());
        assert_eq!(errors.get("assigned_to_name"), Some("Assignee name is required"));
    }

    #[test]
    fn customer_email_is_validated() {
        let mut form = form();
        form.customer_email = "omar".to_owned();

        let errors = form
            .validate(FormMode::Create)
            .err()
            .unwrap_or_else(|| unreachable!());
        assert_eq!(
            errors.get("customer_email"),
            Some("Please enter a valid email address")
        );
    }

    #[test]
    fn customer_email_is_stored_as_typed() {
        let mut form = form();
        form.customer_email = "  Omar.Haddad@Mail.Example ".to_owned();

        let ticket = form
            .into_record(RecordId::generate(), &FormContext::now("Lena Ortiz"))
            .unwrap_or_else(|_| unreachable!());
        assert_eq!(ticket.customer.email, "Omar.Haddad@Mail.Example");
        assert_eq!(
            TicketForm::from_record(&ticket).customer_email,
            "Omar.Haddad@Mail.Example"
        );
    }

    #[test]
    fn closed_and_resolved_are_not_open() {
        assert!(TicketStatus::Escalated.is_open());
        assert!(!TicketStatus::Resolved.is_open());
        assert!(!TicketStatus::Closed.is_open());
    }
}
