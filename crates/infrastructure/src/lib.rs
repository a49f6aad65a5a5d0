//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_column_preference_repository;
mod in_memory_record_repository;
mod in_memory_ticket_message_repository;

pub use in_memory_column_preference_repository::InMemoryColumnPreferenceRepository;
pub use in_memory_record_repository::InMemoryRecordRepository;
pub use in_memory_ticket_message_repository::InMemoryTicketMessageRepository;
