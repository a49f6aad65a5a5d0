mod conversions;
mod types;

pub use types::{
    AccessRightPayload, AccessRightResponse, ClosePositionRequest, ManagerPayload,
    ManagerResponse, PositionPayload, PositionResponse, PromotionPayload, PromotionResponse,
    TagPayload, TagResponse, TicketPayload, TicketResponse, TransactionPayload,
    TransactionResponse, WithdrawalRulePayload, WithdrawalRuleResponse,
};
