use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::dto::records::TicketResponse;

/// Agent a ticket is assigned to.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/assignee-dto.ts"
)]
pub struct AssigneeDto {
    pub id: String,
    pub name: String,
}

/// Customer who raised a ticket.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/customer-dto.ts"
)]
pub struct CustomerDto {
    pub name: String,
    pub email: String,
    pub account_id: String,
    pub phone: Option<String>,
    pub country: String,
}

/// Incoming partial ticket update from the chat panel. Absent fields are
/// left as they are.
#[derive(Debug, Default, Deserialize, TS)]
#[serde(default)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-ticket-status-request.ts"
)]
pub struct UpdateTicketStatusRequest {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub assigned_to: Option<AssigneeDto>,
    /// Removes the current assignee.
    pub unassign: bool,
}

/// Ticket after an update plus the system messages it produced.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/ticket-update-response.ts"
)]
pub struct TicketUpdateResponse {
    pub ticket: TicketResponse,
    pub messages: Vec<TicketMessageResponse>,
}

/// One chat message.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/ticket-message-response.ts"
)]
pub struct TicketMessageResponse {
    pub id: String,
    pub ticket_id: String,
    pub author: String,
    #[ts(type = "\"customer\" | \"agent\" | \"system\"")]
    pub kind: String,
    pub body: String,
    pub sent_at: String,
}

/// Incoming agent reply.
#[derive(Debug, Default, Deserialize, TS)]
#[serde(default)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/post-ticket-message-request.ts"
)]
pub struct PostTicketMessageRequest {
    pub body: String,
    /// Defaults to the configured operator name.
    pub author: Option<String>,
}

/// Incoming tag assignment; replaces the whole tag set.
#[derive(Debug, Default, Deserialize, TS)]
#[serde(default)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/assign-ticket-tags-request.ts"
)]
pub struct AssignTicketTagsRequest {
    pub tags: Vec<String>,
}

/// Count of tickets holding one status or priority value.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/choice-count-response.ts"
)]
pub struct ChoiceCountResponse {
    pub value: String,
    pub label: String,
    pub count: usize,
}

/// Ticket desk counters.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/ticket-summary-response.ts"
)]
pub struct TicketSummaryResponse {
    pub total: usize,
    pub by_status: Vec<ChoiceCountResponse>,
    pub by_priority: Vec<ChoiceCountResponse>,
    pub unassigned_open: usize,
    pub unread_messages: u64,
}
