use axum::routing::{MethodRouter, delete};
use opsdesk_application::RecordService;
use opsdesk_domain::{
    AccessRightForm, ManagerForm, PositionForm, PromotionForm, TagForm, TicketForm,
    TransactionForm, WithdrawalRuleForm,
};

use crate::dto::{
    AccessRightPayload, AccessRightResponse, ManagerPayload, ManagerResponse, PositionPayload,
    PositionResponse, PromotionPayload, PromotionResponse, TagPayload, TagResponse,
    TicketPayload, TicketResponse, TransactionPayload, TransactionResponse,
    WithdrawalRulePayload, WithdrawalRuleResponse,
};
use crate::handlers::tickets::delete_ticket_handler;
use crate::state::AppState;

use super::Resource;

/// `/api/access-rights`
pub struct AccessRights;

impl Resource for AccessRights {
    type Form = AccessRightForm;
    type Payload = AccessRightPayload;
    type Response = AccessRightResponse;

    fn service(state: &AppState) -> &RecordService<Self::Form> {
        &state.access_right_service
    }
}

/// `/api/managers`
pub struct Managers;

impl Resource for Managers {
    type Form = ManagerForm;
    type Payload = ManagerPayload;
    type Response = ManagerResponse;

    fn service(state: &AppState) -> &RecordService<Self::Form> {
        &state.manager_service
    }
}

/// `/api/tags`
pub struct Tags;

impl Resource for Tags {
    type Form = TagForm;
    type Payload = TagPayload;
    type Response = TagResponse;

    fn service(state: &AppState) -> &RecordService<Self::Form> {
        &state.tag_service
    }
}

/// `/api/tickets`
pub struct Tickets;

impl Resource for Tickets {
    type Form = TicketForm;
    type Payload = TicketPayload;
    type Response = TicketResponse;

    fn service(state: &AppState) -> &RecordService<Self::Form> {
        &state.ticket_record_service
    }

    // Removing a ticket also drops its chat thread.
    fn delete_route() -> MethodRouter<AppState> {
        delete(delete_ticket_handler)
    }
}

/// `/api/transactions`
pub struct Transactions;

impl Resource for Transactions {
    type Form = TransactionForm;
    type Payload = TransactionPayload;
    type Response = TransactionResponse;

    fn service(state: &AppState) -> &RecordService<Self::Form> {
        &state.transaction_service
    }
}

/// `/api/positions`
pub struct Positions;

impl Resource for Positions {
    type Form = PositionForm;
    type Payload = PositionPayload;
    type Response = PositionResponse;

    fn service(state: &AppState) -> &RecordService<Self::Form> {
        &state.position_record_service
    }
}

/// `/api/withdrawal-rules`
pub struct WithdrawalRules;

impl Resource for WithdrawalRules {
    type Form = WithdrawalRuleForm;
    type Payload = WithdrawalRulePayload;
    type Response = WithdrawalRuleResponse;

    fn service(state: &AppState) -> &RecordService<Self::Form> {
        &state.withdrawal_rule_service
    }
}

/// `/api/promotions`
pub struct Promotions;

impl Resource for Promotions {
    type Form = PromotionForm;
    type Payload = PromotionPayload;
    type Response = PromotionResponse;

    fn service(state: &AppState) -> &RecordService<Self::Form> {
        &state.promotion_service
    }
}
