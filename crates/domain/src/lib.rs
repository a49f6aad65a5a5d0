//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod access_right;
mod choice;
mod form;
mod manager;
mod position;
mod promotion;
mod table;
mod tag;
mod ticket;
mod transaction;
pub mod validation;
mod withdrawal_rule;

pub use access_right::{AccessRight, AccessRightForm, PermissionAction, PermissionMatrix, UserType};
pub use form::{FormContext, FormMode, RecordForm};
pub use manager::{Manager, ManagerForm, ManagerRole, ManagerStatus};
pub use position::{
    MAX_LEVERAGE, PositionForm, PositionSide, PositionStatus, TradingPosition, position_margin,
    position_pnl,
};
pub use promotion::{Promotion, PromotionForm, PromotionStatus, PromotionType, is_promotion_code};
pub use table::{
    CellValue, ColumnFilter, ColumnSpec, DEFAULT_PAGE_SIZE, PageRequest, SortDirection,
    TablePage, TableQuery, TableRecord, TableSort, apply_table_query, validate_table_query,
};
pub use tag::{Tag, TagForm, is_hex_color};
pub use ticket::{
    Assignee, CustomerInfo, MessageKind, Ticket, TicketCategory, TicketChange, TicketForm,
    TicketMessage, TicketPriority, TicketStatus, TicketUpdate, normalize_tags,
};
pub use transaction::{
    TransactionForm, TransactionRecord, TransactionStatus, TransactionType, is_currency_code,
};
pub use withdrawal_rule::{
    LockPeriod, LockUnit, PenaltyType, RuleStatus, WithdrawalRule, WithdrawalRuleForm,
    WithdrawalType,
};

type ColumnLayout = fn() -> &'static [ColumnSpec];

const CATALOG: &[(&str, ColumnLayout)] = &[
    (AccessRight::TABLE, AccessRight::columns),
    (Manager::TABLE, Manager::columns),
    (Tag::TABLE, Tag::columns),
    (Ticket::TABLE, Ticket::columns),
    (TransactionRecord::TABLE, TransactionRecord::columns),
    (TradingPosition::TABLE, TradingPosition::columns),
    (WithdrawalRule::TABLE, WithdrawalRule::columns),
    (Promotion::TABLE, Promotion::columns),
];

/// Every table name served by the back office, in navigation order.
pub fn table_names() -> impl Iterator<Item = &'static str> {
    CATALOG.iter().map(|(table, _)| *table)
}

/// Returns the column layout of `table`, or `None` for an unknown table.
#[must_use]
pub fn table_columns(table: &str) -> Option<&'static [ColumnSpec]> {
    CATALOG
        .iter()
        .find(|(name, _)| *name == table)
        .map(|(_, columns)| columns())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_table_has_columns_with_unique_keys() {
        for table in table_names() {
            let columns = table_columns(table).unwrap_or_default();
            assert!(!columns.is_empty(), "{table} has no columns");

            let mut keys: Vec<&str> = columns.iter().map(|column| column.key).collect();
            keys.sort_unstable();
            keys.dedup();
            assert_eq!(keys.len(), columns.len(), "{table} repeats a column key");
        }
    }

    #[test]
    fn unknown_table_has_no_columns() {
        assert!(table_columns("clients").is_none());
    }
}
