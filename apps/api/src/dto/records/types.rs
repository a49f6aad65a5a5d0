use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::dto::tickets::{AssigneeDto, CustomerDto};

/// Add/edit form state for an access right.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/access-right-payload.ts"
)]
pub struct AccessRightPayload {
    pub name: String,
    pub description: String,
    pub user_type: String,
    /// Granted action values per permission category.
    pub permissions: BTreeMap<String, Vec<String>>,
    pub is_active: bool,
    pub priority: String,
    pub expires_on: String,
    pub notes: String,
}

/// API representation of an access right.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/access-right-response.ts"
)]
pub struct AccessRightResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub user_type: String,
    pub permissions: BTreeMap<String, Vec<String>>,
    pub granted_actions: usize,
    pub is_active: bool,
    pub priority: u8,
    pub expires_on: Option<String>,
    /// The expiry date has passed.
    pub is_expired: bool,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Add/edit form state for a manager account.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/manager-payload.ts"
)]
pub struct ManagerPayload {
    pub name: String,
    pub email: String,
    pub role: String,
    pub domain: String,
    pub status: String,
    /// Required on create; blank keeps the current password on edit.
    pub password: String,
    pub confirm_password: String,
}

/// API representation of a manager account. Passwords never leave the
/// service.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/manager-response.ts"
)]
pub struct ManagerResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub domain: String,
    pub status: String,
    pub last_login_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Add/edit form state for a tag.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/tag-payload.ts"
)]
pub struct TagPayload {
    pub name: String,
    pub domain: String,
    pub color: String,
    pub description: String,
}

/// API representation of a tag.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/tag-response.ts"
)]
pub struct TagResponse {
    pub id: String,
    pub name: String,
    pub domain: String,
    pub color: String,
    pub description: String,
    pub created_by: String,
    pub updated_by: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Add/edit form state for a support ticket.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/ticket-payload.ts"
)]
pub struct TicketPayload {
    pub title: String,
    pub description: String,
    pub status: String,
    pub priority: String,
    pub category: String,
    pub assigned_to_id: String,
    pub assigned_to_name: String,
    pub tags: Vec<String>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_account_id: String,
    pub customer_phone: String,
    pub customer_country: String,
}

/// API representation of a support ticket.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/ticket-response.ts"
)]
pub struct TicketResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: String,
    pub priority: String,
    pub category: String,
    pub assigned_to: Option<AssigneeDto>,
    pub created_by_id: String,
    pub created_by_name: String,
    pub message_count: u32,
    pub unread_count: u32,
    pub tags: Vec<String>,
    pub customer: CustomerDto,
    pub created_at: String,
    pub updated_at: String,
}

/// Add/edit form state for a transaction.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/transaction-payload.ts"
)]
pub struct TransactionPayload {
    pub account_id: String,
    pub client_name: String,
    pub transaction_type: String,
    pub amount: String,
    pub currency: String,
    pub status: String,
    pub fees: String,
    pub reference: String,
}

/// API representation of a transaction. Amounts are decimal strings.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/transaction-response.ts"
)]
pub struct TransactionResponse {
    pub id: String,
    pub account_id: String,
    pub client_name: String,
    pub transaction_type: String,
    pub amount: String,
    pub currency: String,
    pub status: String,
    pub fees: String,
    pub net_amount: String,
    pub reference: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Add/edit form state for a trading position.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/position-payload.ts"
)]
pub struct PositionPayload {
    pub account_id: String,
    pub client_name: String,
    pub symbol: String,
    pub side: String,
    pub volume: String,
    pub open_price: String,
    pub current_price: String,
    pub status: String,
    pub leverage: String,
}

/// API representation of a trading position.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/position-response.ts"
)]
pub struct PositionResponse {
    pub id: String,
    pub account_id: String,
    pub client_name: String,
    pub symbol: String,
    pub side: String,
    pub volume: String,
    pub open_price: String,
    pub current_price: String,
    pub pnl: String,
    pub pnl_percentage: String,
    pub status: String,
    pub leverage: u32,
    pub margin: String,
    pub opened_at: String,
    pub closed_at: Option<String>,
}

/// Incoming close-position payload. A missing price closes at the current
/// market price.
#[derive(Debug, Default, Deserialize, TS)]
#[serde(default)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/close-position-request.ts"
)]
pub struct ClosePositionRequest {
    pub close_price: Option<String>,
}

/// Add/edit form state for a withdrawal rule.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/withdrawal-rule-payload.ts"
)]
pub struct WithdrawalRulePayload {
    pub name: String,
    pub withdrawal_type: String,
    pub penalty_type: String,
    pub penalty_rate: String,
    pub lock_period_value: String,
    pub lock_period_unit: String,
    pub min_balance: String,
    pub max_withdrawal: String,
    pub processing_time_hours: String,
    pub status: String,
}

/// API representation of a withdrawal rule.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/withdrawal-rule-response.ts"
)]
pub struct WithdrawalRuleResponse {
    pub id: String,
    pub name: String,
    pub withdrawal_type: String,
    pub penalty_type: String,
    pub penalty_rate: String,
    pub lock_period_value: u32,
    pub lock_period_unit: String,
    /// Human readable lock period, e.g. `2 weeks`.
    pub lock_period: String,
    pub min_balance: String,
    pub max_withdrawal: String,
    pub processing_time_hours: u32,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Add/edit form state for a promotion.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/promotion-payload.ts"
)]
pub struct PromotionPayload {
    pub name: String,
    pub code: String,
    pub promotion_type: String,
    pub value: String,
    pub min_deposit: String,
    pub starts_on: String,
    pub ends_on: String,
    pub status: String,
    pub description: String,
}

/// API representation of a promotion.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/promotion-response.ts"
)]
pub struct PromotionResponse {
    pub id: String,
    pub name: String,
    pub code: String,
    pub promotion_type: String,
    pub value: String,
    pub min_deposit: String,
    pub starts_on: String,
    pub ends_on: String,
    pub status: String,
    /// Active and within its date window today.
    pub is_running: bool,
    pub description: String,
    pub created_at: String,
    pub updated_at: String,
}
