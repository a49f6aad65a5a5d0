use opsdesk_application::{TicketSummary, TicketUpdateOutcome};
use opsdesk_core::{AppResult, FieldErrors};
use opsdesk_domain::validation::parse_choice;
use opsdesk_domain::{
    Assignee, CustomerInfo, TicketMessage, TicketPriority, TicketStatus, TicketUpdate,
};

use crate::dto::common::format_timestamp;
use crate::dto::records::TicketResponse;

use super::types::{
    AssigneeDto, ChoiceCountResponse, CustomerDto, TicketMessageResponse, TicketSummaryResponse,
    TicketUpdateResponse, UpdateTicketStatusRequest,
};

impl From<Assignee> for AssigneeDto {
    fn from(value: Assignee) -> Self {
        Self {
            id: value.id,
            name: value.name,
        }
    }
}

impl From<CustomerInfo> for CustomerDto {
    fn from(value: CustomerInfo) -> Self {
        Self {
            name: value.name,
            email: value.email,
            account_id: value.account_id,
            phone: value.phone,
            country: value.country,
        }
    }
}

impl From<TicketMessage> for TicketMessageResponse {
    fn from(value: TicketMessage) -> Self {
        Self {
            id: value.id.to_string(),
            ticket_id: value.ticket_id.to_string(),
            author: value.author,
            kind: value.kind.as_str().to_owned(),
            body: value.body,
            sent_at: format_timestamp(value.sent_at),
        }
    }
}

impl From<TicketUpdateOutcome> for TicketUpdateResponse {
    fn from(value: TicketUpdateOutcome) -> Self {
        Self {
            ticket: TicketResponse::from(value.ticket),
            messages: value
                .messages
                .into_iter()
                .map(TicketMessageResponse::from)
                .collect(),
        }
    }
}

impl From<TicketSummary> for TicketSummaryResponse {
    fn from(value: TicketSummary) -> Self {
        Self {
            total: value.total,
            by_status: value
                .by_status
                .into_iter()
                .map(|(status, count)| ChoiceCountResponse {
                    value: status.as_str().to_owned(),
                    label: status.label().to_owned(),
                    count,
                })
                .collect(),
            by_priority: value
                .by_priority
                .into_iter()
                .map(|(priority, count)| ChoiceCountResponse {
                    value: priority.as_str().to_owned(),
                    label: priority.label().to_owned(),
                    count,
                })
                .collect(),
            unassigned_open: value.unassigned_open,
            unread_messages: value.unread_messages,
        }
    }
}

impl UpdateTicketStatusRequest {
    /// Parses the raw request into a domain update, reporting one message
    /// per invalid field.
    pub fn into_update(self) -> AppResult<TicketUpdate> {
        let mut errors = FieldErrors::new();

        let status = self.status.as_deref().and_then(|value| {
            parse_choice::<TicketStatus>(
                &mut errors,
                "status",
                value,
                "Status is required",
                "Select a valid status",
            )
        });
        let priority = self.priority.as_deref().and_then(|value| {
            parse_choice::<TicketPriority>(
                &mut errors,
                "priority",
                value,
                "Priority is required",
                "Select a valid priority",
            )
        });

        let assignee = match (self.unassign, self.assigned_to) {
            (true, Some(_)) => {
                errors.push("assigned_to", "Choose an assignee or unassign, not both");
                None
            }
            (true, None) => Some(None),
            (false, Some(assignee)) => {
                let has_id = errors.require("assigned_to", &assignee.id, "Assignee ID is required");
                let has_name =
                    errors.require("assigned_to", &assignee.name, "Assignee name is required");
                (has_id && has_name).then(|| {
                    Some(Assignee {
                        id: assignee.id.trim().to_owned(),
                        name: assignee.name.trim().to_owned(),
                    })
                })
            }
            (false, None) => None,
        };

        errors.into_app_result()?;
        Ok(TicketUpdate {
            status,
            priority,
            assignee,
        })
    }
}
