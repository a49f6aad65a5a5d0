use opsdesk_domain::{
    AccessRight, AccessRightForm, Manager, ManagerForm, PositionForm, Promotion, PromotionForm,
    Tag, TagForm, Ticket, TicketForm, TradingPosition, TransactionForm, TransactionRecord,
    WithdrawalRule, WithdrawalRuleForm,
};

use crate::dto::common::{format_date, format_timestamp, today};
use crate::dto::tickets::{AssigneeDto, CustomerDto};

use super::types::{
    AccessRightPayload, AccessRightResponse, ManagerPayload, ManagerResponse, PositionPayload,
    PositionResponse, PromotionPayload, PromotionResponse, TagPayload, TagResponse,
    TicketPayload, TicketResponse, TransactionPayload, TransactionResponse,
    WithdrawalRulePayload, WithdrawalRuleResponse,
};

impl From<AccessRightForm> for AccessRightPayload {
    fn from(value: AccessRightForm) -> Self {
        Self {
            name: value.name,
            description: value.description,
            user_type: value.user_type,
            permissions: value.permissions,
            is_active: value.is_active,
            priority: value.priority,
            expires_on: value.expires_on,
            notes: value.notes,
        }
    }
}

impl From<AccessRightPayload> for AccessRightForm {
    fn from(value: AccessRightPayload) -> Self {
        Self {
            name: value.name,
            description: value.description,
            user_type: value.user_type,
            permissions: value.permissions,
            is_active: value.is_active,
            priority: value.priority,
            expires_on: value.expires_on,
            notes: value.notes,
        }
    }
}

impl From<AccessRight> for AccessRightResponse {
    fn from(value: AccessRight) -> Self {
        let granted_actions = value.granted_action_count();
        let is_expired = value.is_expired(today());
        Self {
            id: value.id.to_string(),
            name: value.name,
            description: value.description,
            user_type: value.user_type.as_str().to_owned(),
            permissions: value
                .permissions
                .into_iter()
                .map(|(category, actions)| {
                    let actions = actions
                        .into_iter()
                        .map(|action| action.as_str().to_owned())
                        .collect();
                    (category, actions)
                })
                .collect(),
            granted_actions,
            is_active: value.is_active,
            priority: value.priority,
            expires_on: value.expires_on.map(format_date),
            is_expired,
            notes: value.notes,
            created_at: format_timestamp(value.created_at),
            updated_at: format_timestamp(value.updated_at),
        }
    }
}

impl From<ManagerForm> for ManagerPayload {
    fn from(value: ManagerForm) -> Self {
        Self {
            name: value.name,
            email: value.email,
            role: value.role,
            domain: value.domain,
            status: value.status,
            password: value.password,
            confirm_password: value.confirm_password,
        }
    }
}

impl From<ManagerPayload> for ManagerForm {
    fn from(value: ManagerPayload) -> Self {
        Self {
            name: value.name,
            email: value.email,
            role: value.role,
            domain: value.domain,
            status: value.status,
            password: value.password,
            confirm_password: value.confirm_password,
        }
    }
}

impl From<Manager> for ManagerResponse {
    fn from(value: Manager) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name,
            email: value.email,
            role: value.role.as_str().to_owned(),
            domain: value.domain,
            status: value.status.as_str().to_owned(),
            last_login_at: value.last_login_at.map(format_timestamp),
            created_at: format_timestamp(value.created_at),
            updated_at: format_timestamp(value.updated_at),
        }
    }
}

impl From<TagForm> for TagPayload {
    fn from(value: TagForm) -> Self {
        Self {
            name: value.name,
            domain: value.domain,
            color: value.color,
            description: value.description,
        }
    }
}

impl From<TagPayload> for TagForm {
    fn from(value: TagPayload) -> Self {
        Self {
            name: value.name,
            domain: value.domain,
            color: value.color,
            description: value.description,
        }
    }
}

impl From<Tag> for TagResponse {
    fn from(value: Tag) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name,
            domain: value.domain,
            color: value.color,
            description: value.description,
            created_by: value.created_by,
            updated_by: value.updated_by,
            created_at: format_timestamp(value.created_at),
            updated_at: format_timestamp(value.updated_at),
        }
    }
}

impl From<TicketForm> for TicketPayload {
    fn from(value: TicketForm) -> Self {
        Self {
            title: value.title,
            description: value.description,
            status: value.status,
            priority: value.priority,
            category: value.category,
            assigned_to_id: value.assigned_to_id,
            assigned_to_name: value.assigned_to_name,
            tags: value.tags,
            customer_name: value.customer_name,
            customer_email: value.customer_email,
            customer_account_id: value.customer_account_id,
            customer_phone: value.customer_phone,
            customer_country: value.customer_country,
        }
    }
}

impl From<TicketPayload> for TicketForm {
    fn from(value: TicketPayload) -> Self {
        Self {
            title: value.title,
            description: value.description,
            status: value.status,
            priority: value.priority,
            category: value.category,
            assigned_to_id: value.assigned_to_id,
            assigned_to_name: value.assigned_to_name,
            tags: value.tags,
            customer_name: value.customer_name,
            customer_email: value.customer_email,
            customer_account_id: value.customer_account_id,
            customer_phone: value.customer_phone,
            customer_country: value.customer_country,
        }
    }
}

impl From<Ticket> for TicketResponse {
    fn from(value: Ticket) -> Self {
        Self {
            id: value.id.to_string(),
            title: value.title,
            description: value.description,
            status: value.status.as_str().to_owned(),
            priority: value.priority.as_str().to_owned(),
            category: value.category.as_str().to_owned(),
            assigned_to: value.assigned_to.map(AssigneeDto::from),
            created_by_id: value.created_by_id,
            created_by_name: value.created_by_name,
            message_count: value.message_count,
            unread_count: value.unread_count,
            tags: value.tags.into_iter().collect(),
            customer: CustomerDto::from(value.customer),
            created_at: format_timestamp(value.created_at),
            updated_at: format_timestamp(value.updated_at),
        }
    }
}

impl From<TransactionForm> for TransactionPayload {
    fn from(value: TransactionForm) -> Self {
        Self {
            account_id: value.account_id,
            client_name: value.client_name,
            transaction_type: value.transaction_type,
            amount: value.amount,
            currency: value.currency,
            status: value.status,
            fees: value.fees,
            reference: value.reference,
        }
    }
}

impl From<TransactionPayload> for TransactionForm {
    fn from(value: TransactionPayload) -> Self {
        Self {
            account_id: value.account_id,
            client_name: value.client_name,
            transaction_type: value.transaction_type,
            amount: value.amount,
            currency: value.currency,
            status: value.status,
            fees: value.fees,
            reference: value.reference,
        }
    }
}

impl From<TransactionRecord> for TransactionResponse {
    fn from(value: TransactionRecord) -> Self {
        Self {
            id: value.id.to_string(),
            account_id: value.account_id,
            client_name: value.client_name,
            transaction_type: value.transaction_type.as_str().to_owned(),
            amount: value.amount.to_string(),
            currency: value.currency,
            status: value.status.as_str().to_owned(),
            fees: value.fees.to_string(),
            net_amount: value.net_amount.to_string(),
            reference: value.reference,
            created_at: format_timestamp(value.created_at),
            updated_at: format_timestamp(value.updated_at),
        }
    }
}

impl From<PositionForm> for PositionPayload {
    fn from(value: PositionForm) -> Self {
        Self {
            account_id: value.account_id,
            client_name: value.client_name,
            symbol: value.symbol,
            side: value.side,
            volume: value.volume,
            open_price: value.open_price,
            current_price: value.current_price,
            status: value.status,
            leverage: value.leverage,
        }
    }
}

impl From<PositionPayload> for PositionForm {
    fn from(value: PositionPayload) -> Self {
        Self {
            account_id: value.account_id,
            client_name: value.client_name,
            symbol: value.symbol,
            side: value.side,
            volume: value.volume,
            open_price: value.open_price,
            current_price: value.current_price,
            status: value.status,
            leverage: value.leverage,
        }
    }
}

impl From<TradingPosition> for PositionResponse {
    fn from(value: TradingPosition) -> Self {
        Self {
            id: value.id.to_string(),
            account_id: value.account_id,
            client_name: value.client_name,
            symbol: value.symbol,
            side: value.side.as_str().to_owned(),
            volume: value.volume.to_string(),
            open_price: value.open_price.to_string(),
            current_price: value.current_price.to_string(),
            pnl: value.pnl.to_string(),
            pnl_percentage: value.pnl_percentage.to_string(),
            status: value.status.as_str().to_owned(),
            leverage: value.leverage,
            margin: value.margin.to_string(),
            opened_at: format_timestamp(value.opened_at),
            closed_at: value.closed_at.map(format_timestamp),
        }
    }
}

impl From<WithdrawalRuleForm> for WithdrawalRulePayload {
    fn from(value: WithdrawalRuleForm) -> Self {
        Self {
            name: value.name,
            withdrawal_type: value.withdrawal_type,
            penalty_type: value.penalty_type,
            penalty_rate: value.penalty_rate,
            lock_period_value: value.lock_period_value,
            lock_period_unit: value.lock_period_unit,
            min_balance: value.min_balance,
            max_withdrawal: value.max_withdrawal,
            processing_time_hours: value.processing_time_hours,
            status: value.status,
        }
    }
}

impl From<WithdrawalRulePayload> for WithdrawalRuleForm {
    fn from(value: WithdrawalRulePayload) -> Self {
        Self {
            name: value.name,
            withdrawal_type: value.withdrawal_type,
            penalty_type: value.penalty_type,
            penalty_rate: value.penalty_rate,
            lock_period_value: value.lock_period_value,
            lock_period_unit: value.lock_period_unit,
            min_balance: value.min_balance,
            max_withdrawal: value.max_withdrawal,
            processing_time_hours: value.processing_time_hours,
            status: value.status,
        }
    }
}

impl From<WithdrawalRule> for WithdrawalRuleResponse {
    fn from(value: WithdrawalRule) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name,
            withdrawal_type: value.withdrawal_type.as_str().to_owned(),
            penalty_type: value.penalty_type.as_str().to_owned(),
            penalty_rate: value.penalty_rate.to_string(),
            lock_period_value: value.lock_period.value,
            lock_period_unit: value.lock_period.unit.as_str().to_owned(),
            lock_period: value.lock_period.to_string(),
            min_balance: value.min_balance.to_string(),
            max_withdrawal: value.max_withdrawal.to_string(),
            processing_time_hours: value.processing_time_hours,
            status: value.status.as_str().to_owned(),
            created_at: format_timestamp(value.created_at),
            updated_at: format_timestamp(value.updated_at),
        }
    }
}

impl From<PromotionForm> for PromotionPayload {
    fn from(value: PromotionForm) -> Self {
        Self {
            name: value.name,
            code: value.code,
            promotion_type: value.promotion_type,
            value: value.value,
            min_deposit: value.min_deposit,
            starts_on: value.starts_on,
            ends_on: value.ends_on,
            status: value.status,
            description: value.description,
        }
    }
}

impl From<PromotionPayload> for PromotionForm {
    fn from(value: PromotionPayload) -> Self {
        Self {
            name: value.name,
            code: value.code,
            promotion_type: value.promotion_type,
            value: value.value,
            min_deposit: value.min_deposit,
            starts_on: value.starts_on,
            ends_on: value.ends_on,
            status: value.status,
            description: value.description,
        }
    }
}

impl From<Promotion> for PromotionResponse {
    fn from(value: Promotion) -> Self {
        let is_running = value.is_running(today());
        Self {
            id: value.id.to_string(),
            name: value.name,
            code: value.code,
            promotion_type: value.promotion_type.as_str().to_owned(),
            value: value.value.to_string(),
            min_deposit: value.min_deposit.to_string(),
            starts_on: format_date(value.starts_on),
            ends_on: format_date(value.ends_on),
            status: value.status.as_str().to_owned(),
            is_running,
            description: value.description,
            created_at: format_timestamp(value.created_at),
            updated_at: format_timestamp(value.updated_at),
        }
    }
}
