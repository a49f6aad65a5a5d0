mod conversions;
mod types;

pub use types::{
    AssignTicketTagsRequest, AssigneeDto, ChoiceCountResponse, CustomerDto,
    PostTicketMessageRequest, TicketMessageResponse, TicketSummaryResponse, TicketUpdateResponse,
    UpdateTicketStatusRequest,
};
