mod columns;
mod common;
mod records;
mod tickets;

pub use columns::{ColumnVisibilityResponse, SetColumnVisibilityRequest};
pub use common::{HealthResponse, PageResponse, format_date, format_timestamp};
pub use records::{
    AccessRightPayload, AccessRightResponse, ClosePositionRequest, ManagerPayload,
    ManagerResponse, PositionPayload, PositionResponse, PromotionPayload, PromotionResponse,
    TagPayload, TagResponse, TicketPayload, TicketResponse, TransactionPayload,
    TransactionResponse, WithdrawalRulePayload, WithdrawalRuleResponse,
};
pub use tickets::{
    AssignTicketTagsRequest, AssigneeDto, ChoiceCountResponse, CustomerDto,
    PostTicketMessageRequest, TicketMessageResponse, TicketSummaryResponse, TicketUpdateResponse,
    UpdateTicketStatusRequest,
};

#[cfg(test)]
mod tests {
    use super::{
        AccessRightPayload, AccessRightResponse, AssignTicketTagsRequest, AssigneeDto,
        ChoiceCountResponse, ClosePositionRequest, ColumnVisibilityResponse, CustomerDto,
        HealthResponse, ManagerPayload, ManagerResponse, PageResponse, PositionPayload,
        PositionResponse, PostTicketMessageRequest, PromotionPayload, PromotionResponse,
        SetColumnVisibilityRequest, TagPayload, TagResponse, TicketMessageResponse,
        TicketPayload, TicketResponse, TicketSummaryResponse, TicketUpdateResponse,
        TransactionPayload, TransactionResponse, UpdateTicketStatusRequest,
        WithdrawalRulePayload, WithdrawalRuleResponse,
    };

    use crate::error::ErrorResponse;
    use ts_rs::Config;
    use ts_rs::TS;

    #[test]
    fn export_ts_bindings() -> Result<(), ts_rs::ExportError> {
        let config = Config::default();

        HealthResponse::export(&config)?;
        ErrorResponse::export(&config)?;
        PageResponse::<TagResponse>::export(&config)?;
        ColumnVisibilityResponse::export(&config)?;
        SetColumnVisibilityRequest::export(&config)?;

        AccessRightPayload::export(&config)?;
        AccessRightResponse::export(&config)?;
        ManagerPayload::export(&config)?;
        ManagerResponse::export(&config)?;
        TagPayload::export(&config)?;
        TagResponse::export(&config)?;
        TicketPayload::export(&config)?;
        TicketResponse::export(&config)?;
        TransactionPayload::export(&config)?;
        TransactionResponse::export(&config)?;
        PositionPayload::export(&config)?;
        PositionResponse::export(&config)?;
        ClosePositionRequest::export(&config)?;
        WithdrawalRulePayload::export(&config)?;
        WithdrawalRuleResponse::export(&config)?;
        PromotionPayload::export(&config)?;
        PromotionResponse::export(&config)?;

        AssigneeDto::export(&config)?;
        CustomerDto::export(&config)?;
        UpdateTicketStatusRequest::export(&config)?;
        TicketUpdateResponse::export(&config)?;
        TicketMessageResponse::export(&config)?;
        PostTicketMessageRequest::export(&config)?;
        AssignTicketTagsRequest::export(&config)?;
        ChoiceCountResponse::export(&config)?;
        TicketSummaryResponse::export(&config)?;

        Ok(())
    }
}
