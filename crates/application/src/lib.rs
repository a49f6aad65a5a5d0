//! Application services and ports.

#![forbid(unsafe_code)]

mod column_service;
mod position_service;
mod record_ports;
mod record_service;
mod ticket_service;

#[cfg(test)]
mod test_support;

pub use column_service::{ColumnVisibility, ColumnVisibilityService};
pub use position_service::PositionService;
pub use record_ports::{ColumnPreferenceRepository, RecordRepository, TicketMessageRepository};
pub use record_service::RecordService;
pub use ticket_service::{TicketService, TicketSummary, TicketUpdateOutcome};
