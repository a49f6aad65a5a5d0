use std::sync::Arc;

use opsdesk_application::{
    ColumnVisibilityService, PositionService, RecordRepository, RecordService, TicketService,
};
use opsdesk_domain::{
    AccessRightForm, ManagerForm, PositionForm, PromotionForm, TableRecord, TagForm, TicketForm,
    TransactionForm, WithdrawalRuleForm,
};
use opsdesk_infrastructure::{
    InMemoryColumnPreferenceRepository, InMemoryRecordRepository, InMemoryTicketMessageRepository,
};

use crate::api_config::ApiConfig;
use crate::dev_seed::SeedData;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub access_right_service: RecordService<AccessRightForm>,
    pub manager_service: RecordService<ManagerForm>,
    pub tag_service: RecordService<TagForm>,
    pub ticket_record_service: RecordService<TicketForm>,
    pub transaction_service: RecordService<TransactionForm>,
    pub position_record_service: RecordService<PositionForm>,
    pub withdrawal_rule_service: RecordService<WithdrawalRuleForm>,
    pub promotion_service: RecordService<PromotionForm>,
    pub ticket_service: TicketService,
    pub position_service: PositionService,
    pub column_service: ColumnVisibilityService,
    pub operator_name: String,
    pub default_page_size: usize,
    pub max_page_size: usize,
}

impl AppState {
    /// Wires every service onto in-memory collections holding `seed`.
    pub fn in_memory(config: &ApiConfig, seed: SeedData) -> Self {
        let tickets = collection(seed.tickets);
        let positions = collection(seed.positions);
        let ticket_messages = Arc::new(InMemoryTicketMessageRepository::seeded(
            seed.ticket_messages,
        ));

        Self {
            access_right_service: RecordService::new(collection(seed.access_rights)),
            manager_service: RecordService::new(collection(seed.managers)),
            tag_service: RecordService::new(collection(seed.tags)),
            ticket_record_service: RecordService::new(tickets.clone()),
            transaction_service: RecordService::new(collection(seed.transactions)),
            position_record_service: RecordService::new(positions.clone()),
            withdrawal_rule_service: RecordService::new(collection(seed.withdrawal_rules)),
            promotion_service: RecordService::new(collection(seed.promotions)),
            ticket_service: TicketService::new(tickets, ticket_messages),
            position_service: PositionService::new(positions),
            column_service: ColumnVisibilityService::new(Arc::new(
                InMemoryColumnPreferenceRepository::new(),
            )),
            operator_name: config.operator_name.clone(),
            default_page_size: config.default_page_size,
            max_page_size: config.max_page_size,
        }
    }
}

fn collection<T: TableRecord>(records: Vec<T>) -> Arc<dyn RecordRepository<T>> {
    Arc::new(InMemoryRecordRepository::seeded(records))
}
