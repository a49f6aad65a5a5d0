//! Mock records loaded into the in-memory collections at startup.
//!
//! Ids are fixed so links and bookmarks survive restarts; records created at
//! runtime get generated ids. Nothing here is ever written back.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, NaiveDate, Utc};
use opsdesk_core::RecordId;
use opsdesk_domain::{
    AccessRight, Assignee, CustomerInfo, LockPeriod, LockUnit, Manager, ManagerRole,
    ManagerStatus, MessageKind, PenaltyType, PermissionAction, PositionSide, PositionStatus,
    Promotion, PromotionStatus, PromotionType, RuleStatus, Tag, Ticket, TicketCategory,
    TicketMessage, TicketPriority, TicketStatus, TradingPosition, TransactionRecord,
    TransactionStatus, TransactionType, UserType, WithdrawalRule, WithdrawalType,
};
use rust_decimal::Decimal;
use tracing::{info, warn};

/// Initial contents of every collection.
#[derive(Debug, Clone, Default)]
pub struct SeedData {
    pub access_rights: Vec<AccessRight>,
    pub managers: Vec<Manager>,
    pub tags: Vec<Tag>,
    pub tickets: Vec<Ticket>,
    pub ticket_messages: Vec<TicketMessage>,
    pub transactions: Vec<TransactionRecord>,
    pub positions: Vec<TradingPosition>,
    pub withdrawal_rules: Vec<WithdrawalRule>,
    pub promotions: Vec<Promotion>,
}

/// Builds the mock data set served in development.
pub fn mock_data() -> SeedData {
    let seed = SeedData {
        access_rights: access_rights(),
        managers: managers(),
        tags: tags(),
        tickets: tickets(),
        ticket_messages: ticket_messages(),
        transactions: transactions(),
        positions: positions(),
        withdrawal_rules: withdrawal_rules(),
        promotions: promotions(),
    };

    info!(
        access_rights = seed.access_rights.len(),
        managers = seed.managers.len(),
        tags = seed.tags.len(),
        tickets = seed.tickets.len(),
        transactions = seed.transactions.len(),
        positions = seed.positions.len(),
        withdrawal_rules = seed.withdrawal_rules.len(),
        promotions = seed.promotions.len(),
        "mock data seeded"
    );
    seed
}

fn id(value: &str) -> RecordId {
    RecordId::parse(value).unwrap_or_else(|_| RecordId::generate())
}

fn at(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .map(|value| value.with_timezone(&Utc))
        .unwrap_or_default()
}

fn day(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap_or_default()
}

fn amount(value: &str) -> Decimal {
    value.parse().unwrap_or_default()
}

fn grants(entries: &[(&str, &[PermissionAction])]) -> BTreeMap<String, BTreeSet<PermissionAction>> {
    entries
        .iter()
        .map(|(category, actions)| ((*category).to_owned(), actions.iter().copied().collect()))
        .collect()
}

fn access_rights() -> Vec<AccessRight> {
    use PermissionAction::{Approve, Create, Delete, Edit, Export, View};

    vec![
        AccessRight {
            id: id("ar-1"),
            name: "Full Access".to_owned(),
            description: "Unrestricted access to every back-office module".to_owned(),
            user_type: UserType::Admin,
            permissions: grants(&[
                ("clients", &[View, Create, Edit, Delete, Export]),
                ("finance", &[View, Create, Edit, Delete, Export, Approve]),
                ("support", &[View, Create, Edit, Delete]),
                ("settings", &[View, Edit]),
            ]),
            is_active: true,
            priority: 10,
            expires_on: None,
            notes: None,
            created_at: at("2024-01-08T09:00:00Z"),
            updated_at: at("2024-06-12T14:30:00Z"),
        },
        AccessRight {
            id: id("ar-2"),
            name: "Support Desk".to_owned(),
            description: "Ticket handling and read access to client profiles".to_owned(),
            user_type: UserType::Support,
            permissions: grants(&[
                ("clients", &[View]),
                ("support", &[View, Create, Edit]),
            ]),
            is_active: true,
            priority: 5,
            expires_on: None,
            notes: Some("Granted to tier 1 and tier 2 agents".to_owned()),
            created_at: at("2024-01-10T10:15:00Z"),
            updated_at: at("2024-05-02T08:45:00Z"),
        },
        AccessRight {
            id: id("ar-3"),
            name: "Read Only".to_owned(),
            description: "View-only access for auditors".to_owned(),
            user_type: UserType::Manager,
            permissions: grants(&[
                ("clients", &[View]),
                ("finance", &[View]),
                ("reports", &[View, Export]),
            ]),
            is_active: true,
            priority: 1,
            expires_on: Some(day("2025-12-31")),
            notes: None,
            created_at: at("2024-02-01T12:00:00Z"),
            updated_at: at("2024-02-01T12:00:00Z"),
        },
        AccessRight {
            id: id("ar-4"),
            name: "Finance Approvals".to_owned(),
            description: "Approves withdrawals and manual adjustments".to_owned(),
            user_type: UserType::Manager,
            permissions: grants(&[
                ("finance", &[View, Edit, Approve]),
                ("reports", &[View, Export]),
            ]),
            is_active: true,
            priority: 7,
            expires_on: None,
            notes: Some("Requires dual sign-off above 10k".to_owned()),
            created_at: at("2024-03-14T16:20:00Z"),
            updated_at: at("2024-07-01T09:10:00Z"),
        },
        AccessRight {
            id: id("ar-5"),
            name: "Client Portal".to_owned(),
            description: "Self-service access for trading clients".to_owned(),
            user_type: UserType::Client,
            permissions: grants(&[("trading", &[View, Create]), ("finance", &[View, Create])]),
            is_active: false,
            priority: 3,
            expires_on: None,
            notes: None,
            created_at: at("2024-04-22T11:00:00Z"),
            updated_at: at("2024-04-22T11:00:00Z"),
        },
    ]
}

fn managers() -> Vec<Manager> {
    vec![
        Manager {
            id: id("mg-1"),
            name: "Sophie Laurent".to_owned(),
            email: "sophie.laurent@fx.desk.example".to_owned(),
            role: ManagerRole::SuperAdmin,
            domain: "fx.desk.example".to_owned(),
            status: ManagerStatus::Active,
            last_login_at: Some(at("2024-07-18T07:55:00Z")),
            created_at: at("2023-11-02T09:00:00Z"),
            updated_at: at("2024-07-18T07:55:00Z"),
        },
        Manager {
            id: id("mg-2"),
            name: "Daniel Okafor".to_owned(),
            email: "daniel.okafor@fx.desk.example".to_owned(),
            role: ManagerRole::Manager,
            domain: "fx.desk.example".to_owned(),
            status: ManagerStatus::Active,
            last_login_at: Some(at("2024-07-17T16:12:00Z")),
            created_at: at("2024-01-15T10:30:00Z"),
            updated_at: at("2024-06-30T11:00:00Z"),
        },
        Manager {
            id: id("mg-3"),
            name: "Mei Tanaka".to_owned(),
            email: "mei.tanaka@metals.desk.example".to_owned(),
            role: ManagerRole::Support,
            domain: "metals.desk.example".to_owned(),
            status: ManagerStatus::Active,
            last_login_at: Some(at("2024-07-18T06:40:00Z")),
            created_at: at("2024-02-20T08:00:00Z"),
            updated_at: at("2024-05-11T13:25:00Z"),
        },
        Manager {
            id: id("mg-4"),
            name: "Lukas Brandt".to_owned(),
            email: "lukas.brandt@metals.desk.example".to_owned(),
            role: ManagerRole::Viewer,
            domain: "metals.desk.example".to_owned(),
            status: ManagerStatus::Inactive,
            last_login_at: None,
            created_at: at("2024-05-05T15:45:00Z"),
            updated_at: at("2024-05-05T15:45:00Z"),
        },
    ]
}

fn tags() -> Vec<Tag> {
    let tag = |tag_id: &str, name: &str, color: &str, description: &str, created: &str| Tag {
        id: id(tag_id),
        name: name.to_owned(),
        domain: "fx.desk.example".to_owned(),
        created_by: "Sophie Laurent".to_owned(),
        updated_by: "Sophie Laurent".to_owned(),
        color: color.to_owned(),
        description: description.to_owned(),
        created_at: at(created),
        updated_at: at(created),
    };

    vec![
        tag("tag-1", "VIP", "#D4AF37", "High-value client", "2024-01-12T09:00:00Z"),
        tag("tag-2", "KYC Pending", "#FF8C00", "Documents awaiting review", "2024-01-12T09:05:00Z"),
        tag("tag-3", "Churn Risk", "#DC143C", "Inactive for 30+ days", "2024-02-03T10:00:00Z"),
        tag("tag-4", "Bonus Abuse", "#8B0000", "Flagged by promotions team", "2024-03-19T14:40:00Z"),
        tag("tag-5", "Withdrawal", "#1E90FF", "Withdrawal related", "2024-04-01T08:30:00Z"),
    ]
}

struct TicketSeed<'a> {
    id: &'a str,
    title: &'a str,
    description: &'a str,
    status: TicketStatus,
    priority: TicketPriority,
    category: TicketCategory,
    assigned_to: Option<(&'a str, &'a str)>,
    tags: &'a [&'a str],
    customer: (&'a str, &'a str, &'a str, Option<&'a str>, &'a str),
    message_count: u32,
    unread_count: u32,
    created_at: &'a str,
    updated_at: &'a str,
}

impl TicketSeed<'_> {
    fn build(self) -> Ticket {
        let (name, email, account_id, phone, country) = self.customer;
        Ticket {
            id: id(self.id),
            title: self.title.to_owned(),
            description: self.description.to_owned(),
            status: self.status,
            priority: self.priority,
            category: self.category,
            assigned_to: self.assigned_to.map(|(id, name)| Assignee {
                id: id.to_owned(),
                name: name.to_owned(),
            }),
            created_by_id: account_id.to_owned(),
            created_by_name: name.to_owned(),
            message_count: self.message_count,
            unread_count: self.unread_count,
            tags: self.tags.iter().map(|tag| (*tag).to_owned()).collect(),
            customer: CustomerInfo {
                name: name.to_owned(),
                email: email.to_owned(),
                account_id: account_id.to_owned(),
                phone: phone.map(ToOwned::to_owned),
                country: country.to_owned(),
            },
            created_at: at(self.created_at),
            updated_at: at(self.updated_at),
        }
    }
}

fn tickets() -> Vec<Ticket> {
    vec![
        TicketSeed {
            id: "tk-1001",
            title: "Cannot log in to trading terminal",
            description: "Client reports invalid credentials after password reset.",
            status: TicketStatus::Open,
            priority: TicketPriority::High,
            category: TicketCategory::Technical,
            assigned_to: None,
            tags: &[],
            customer: (
                "Omar Haddad",
                "omar.haddad@mail.example",
                "ACC-20481",
                Some("+971 50 123 4567"),
                "United Arab Emirates",
            ),
            message_count: 2,
            unread_count: 2,
            created_at: "2024-07-17T08:12:00Z",
            updated_at: "2024-07-17T08:40:00Z",
        }
        .build(),
        TicketSeed {
            id: "tk-1002",
            title: "Withdrawal pending for 5 days",
            description: "Bank wire requested on the 12th has not been processed.",
            status: TicketStatus::InProgress,
            priority: TicketPriority::Urgent,
            category: TicketCategory::Withdrawal,
            assigned_to: Some(("mg-2", "Daniel Okafor")),
            tags: &["VIP", "Withdrawal"],
            customer: (
                "Elena Petrova",
                "elena.petrova@mail.example",
                "ACC-19877",
                None,
                "Cyprus",
            ),
            message_count: 3,
            unread_count: 0,
            created_at: "2024-07-16T10:05:00Z",
            updated_at: "2024-07-17T09:30:00Z",
        }
        .build(),
        TicketSeed {
            id: "tk-1003",
            title: "Deposit bonus not credited",
            description: "Client deposited 500 USD with code WELCOME50 but no bonus appeared.",
            status: TicketStatus::WaitingOnCustomer,
            priority: TicketPriority::Medium,
            category: TicketCategory::Bonus,
            assigned_to: Some(("mg-3", "Mei Tanaka")),
            tags: &["KYC Pending"],
            customer: (
                "Carlos Mendes",
                "carlos.mendes@mail.example",
                "ACC-21004",
                Some("+351 912 345 678"),
                "Portugal",
            ),
            message_count: 2,
            unread_count: 0,
            created_at: "2024-07-15T14:22:00Z",
            updated_at: "2024-07-16T11:00:00Z",
        }
        .build(),
        TicketSeed {
            id: "tk-1004",
            title: "Proof of address rejected",
            description: "Utility bill upload was rejected as older than three months.",
            status: TicketStatus::Resolved,
            priority: TicketPriority::Low,
            category: TicketCategory::Verification,
            assigned_to: Some(("mg-3", "Mei Tanaka")),
            tags: &[],
            customer: (
                "Hannah Weber",
                "hannah.weber@mail.example",
                "ACC-20112",
                None,
                "Germany",
            ),
            message_count: 0,
            unread_count: 0,
            created_at: "2024-07-10T09:00:00Z",
            updated_at: "2024-07-12T15:45:00Z",
        }
        .build(),
        TicketSeed {
            id: "tk-1005",
            title: "Stop loss executed at wrong price",
            description: "XAUUSD stop loss filled 40 pips below the set level during news.",
            status: TicketStatus::Escalated,
            priority: TicketPriority::Critical,
            category: TicketCategory::Trading,
            assigned_to: Some(("mg-1", "Sophie Laurent")),
            tags: &["VIP", "Churn Risk"],
            customer: (
                "Rahul Iyer",
                "rahul.iyer@mail.example",
                "ACC-18650",
                Some("+91 98765 43210"),
                "India",
            ),
            message_count: 0,
            unread_count: 0,
            created_at: "2024-07-17T13:30:00Z",
            updated_at: "2024-07-17T13:30:00Z",
        }
        .build(),
    ]
}

fn ticket_messages() -> Vec<TicketMessage> {
    let message = |ticket: &str, author: &str, kind: MessageKind, body: &str, sent: &str| {
        TicketMessage::new(id(ticket), author, kind, body, at(sent))
    };

    vec![
        message(
            "tk-1001",
            "Omar Haddad",
            MessageKind::Customer,
            "I reset my password but the terminal still says invalid credentials.",
            "2024-07-17T08:12:00Z",
        ),
        message(
            "tk-1001",
            "Omar Haddad",
            MessageKind::Customer,
            "I have open positions, please help urgently.",
            "2024-07-17T08:40:00Z",
        ),
        message(
            "tk-1002",
            "Elena Petrova",
            MessageKind::Customer,
            "My withdrawal has been pending since the 12th.",
            "2024-07-16T10:05:00Z",
        ),
        message(
            "tk-1002",
            "Daniel Okafor",
            MessageKind::System,
            "Ticket assigned to Daniel Okafor",
            "2024-07-16T10:20:00Z",
        ),
        message(
            "tk-1002",
            "Daniel Okafor",
            MessageKind::Agent,
            "We have escalated this to the payments team and will update you today.",
            "2024-07-17T09:30:00Z",
        ),
        message(
            "tk-1003",
            "Carlos Mendes",
            MessageKind::Customer,
            "I used WELCOME50 but the bonus is missing.",
            "2024-07-15T14:22:00Z",
        ),
        message(
            "tk-1003",
            "Mei Tanaka",
            MessageKind::Agent,
            "The bonus requires verified KYC. Could you upload your ID?",
            "2024-07-16T11:00:00Z",
        ),
    ]
}

fn transactions() -> Vec<TransactionRecord> {
    struct Row<'a> {
        id: &'a str,
        account_id: &'a str,
        client_name: &'a str,
        transaction_type: TransactionType,
        amount: &'a str,
        currency: &'a str,
        status: TransactionStatus,
        fees: &'a str,
        reference: &'a str,
        created_at: &'a str,
    }

    [
        Row {
            id: "tx-1",
            account_id: "ACC-20481",
            client_name: "Omar Haddad",
            transaction_type: TransactionType::Deposit,
            amount: "2500.00",
            currency: "USD",
            status: TransactionStatus::Completed,
            fees: "0.00",
            reference: "DEP-88121",
            created_at: "2024-07-10T09:15:00Z",
        },
        Row {
            id: "tx-2",
            account_id: "ACC-19877",
            client_name: "Elena Petrova",
            transaction_type: TransactionType::Withdrawal,
            amount: "12000.00",
            currency: "EUR",
            status: TransactionStatus::Processing,
            fees: "25.00",
            reference: "WDR-44019",
            created_at: "2024-07-12T16:40:00Z",
        },
        Row {
            id: "tx-3",
            account_id: "ACC-21004",
            client_name: "Carlos Mendes",
            transaction_type: TransactionType::Deposit,
            amount: "500.00",
            currency: "USD",
            status: TransactionStatus::Completed,
            fees: "0.00",
            reference: "DEP-88342",
            created_at: "2024-07-15T14:05:00Z",
        },
        Row {
            id: "tx-4",
            account_id: "ACC-18650",
            client_name: "Rahul Iyer",
            transaction_type: TransactionType::Commission,
            amount: "37.50",
            currency: "USD",
            status: TransactionStatus::Completed,
            fees: "0.00",
            reference: "COM-10277",
            created_at: "2024-07-16T00:00:00Z",
        },
        Row {
            id: "tx-5",
            account_id: "ACC-20112",
            client_name: "Hannah Weber",
            transaction_type: TransactionType::Transfer,
            amount: "800.00",
            currency: "EUR",
            status: TransactionStatus::Failed,
            fees: "2.50",
            reference: "TRF-30555",
            created_at: "2024-07-16T12:30:00Z",
        },
        Row {
            id: "tx-6",
            account_id: "ACC-21004",
            client_name: "Carlos Mendes",
            transaction_type: TransactionType::Bonus,
            amount: "250.00",
            currency: "USD",
            status: TransactionStatus::Pending,
            fees: "0.00",
            reference: "BON-00931",
            created_at: "2024-07-17T10:00:00Z",
        },
    ]
    .into_iter()
    .map(|row| {
        let gross = amount(row.amount);
        let fees = amount(row.fees);
        TransactionRecord {
            id: id(row.id),
            account_id: row.account_id.to_owned(),
            client_name: row.client_name.to_owned(),
            transaction_type: row.transaction_type,
            amount: gross,
            currency: row.currency.to_owned(),
            status: row.status,
            fees,
            net_amount: gross - fees,
            reference: row.reference.to_owned(),
            created_at: at(row.created_at),
            updated_at: at(row.created_at),
        }
    })
    .collect()
}

fn positions() -> Vec<TradingPosition> {
    struct Row<'a> {
        id: &'a str,
        account_id: &'a str,
        client_name: &'a str,
        symbol: &'a str,
        side: PositionSide,
        volume: &'a str,
        open_price: &'a str,
        current_price: &'a str,
        status: PositionStatus,
        leverage: u32,
        opened_at: &'a str,
        closed_at: Option<&'a str>,
    }

    [
        Row {
            id: "pos-1",
            account_id: "ACC-20481",
            client_name: "Omar Haddad",
            symbol: "EURUSD",
            side: PositionSide::Buy,
            volume: "10000",
            open_price: "1.0750",
            current_price: "1.0812",
            status: PositionStatus::Open,
            leverage: 100,
            opened_at: "2024-07-15T08:00:00Z",
            closed_at: None,
        },
        Row {
            id: "pos-2",
            account_id: "ACC-18650",
            client_name: "Rahul Iyer",
            symbol: "XAUUSD",
            side: PositionSide::Sell,
            volume: "5",
            open_price: "2412.50",
            current_price: "2398.10",
            status: PositionStatus::Open,
            leverage: 50,
            opened_at: "2024-07-16T13:45:00Z",
            closed_at: None,
        },
        Row {
            id: "pos-3",
            account_id: "ACC-19877",
            client_name: "Elena Petrova",
            symbol: "GBPJPY",
            side: PositionSide::Buy,
            volume: "20000",
            open_price: "201.350",
            current_price: "200.980",
            status: PositionStatus::Closed,
            leverage: 200,
            opened_at: "2024-07-08T07:30:00Z",
            closed_at: Some("2024-07-09T15:10:00Z"),
        },
        Row {
            id: "pos-4",
            account_id: "ACC-21004",
            client_name: "Carlos Mendes",
            symbol: "USDJPY",
            side: PositionSide::Sell,
            volume: "15000",
            open_price: "157.800",
            current_price: "157.800",
            status: PositionStatus::Pending,
            leverage: 100,
            opened_at: "2024-07-17T11:05:00Z",
            closed_at: None,
        },
    ]
    .into_iter()
    .filter_map(|row| {
        let volume = amount(row.volume);
        let open_price = amount(row.open_price);
        let current_price = amount(row.current_price);
        let mut position = TradingPosition {
            id: id(row.id),
            account_id: row.account_id.to_owned(),
            client_name: row.client_name.to_owned(),
            symbol: row.symbol.to_owned(),
            side: row.side,
            volume,
            open_price,
            current_price,
            pnl: Decimal::ZERO,
            pnl_percentage: Decimal::ZERO,
            status: row.status,
            leverage: row.leverage,
            margin: Decimal::ZERO,
            opened_at: at(row.opened_at),
            closed_at: row.closed_at.map(at),
        };
        match position.refresh_derived() {
            Ok(()) => Some(position),
            Err(error) => {
                warn!(position_id = row.id, %error, "skipping seed position");
                None
            }
        }
    })
    .collect()
}

fn withdrawal_rules() -> Vec<WithdrawalRule> {
    vec![
        WithdrawalRule {
            id: id("wr-1"),
            name: "Standard Bank Wire".to_owned(),
            withdrawal_type: WithdrawalType::Standard,
            penalty_type: PenaltyType::NoPenalty,
            penalty_rate: Decimal::ZERO,
            lock_period: LockPeriod {
                value: 0,
                unit: LockUnit::Days,
            },
            min_balance: amount("100.00"),
            max_withdrawal: amount("50000.00"),
            processing_time_hours: 72,
            status: RuleStatus::Active,
            created_at: at("2024-01-05T09:00:00Z"),
            updated_at: at("2024-01-05T09:00:00Z"),
        },
        WithdrawalRule {
            id: id("wr-2"),
            name: "Express Card Payout".to_owned(),
            withdrawal_type: WithdrawalType::Express,
            penalty_type: PenaltyType::Percentage,
            penalty_rate: amount("1.5"),
            lock_period: LockPeriod {
                value: 0,
                unit: LockUnit::Days,
            },
            min_balance: amount("50.00"),
            max_withdrawal: amount("5000.00"),
            processing_time_hours: 4,
            status: RuleStatus::Active,
            created_at: at("2024-02-11T10:30:00Z"),
            updated_at: at("2024-05-20T08:15:00Z"),
        },
        WithdrawalRule {
            id: id("wr-3"),
            name: "Bonus Funds Lock".to_owned(),
            withdrawal_type: WithdrawalType::Bonus,
            penalty_type: PenaltyType::Percentage,
            penalty_rate: amount("25"),
            lock_period: LockPeriod {
                value: 30,
                unit: LockUnit::Days,
            },
            min_balance: Decimal::ZERO,
            max_withdrawal: amount("1000.00"),
            processing_time_hours: 48,
            status: RuleStatus::Active,
            created_at: at("2024-03-01T12:00:00Z"),
            updated_at: at("2024-03-01T12:00:00Z"),
        },
        WithdrawalRule {
            id: id("wr-4"),
            name: "Early Profit Withdrawal".to_owned(),
            withdrawal_type: WithdrawalType::Profit,
            penalty_type: PenaltyType::Fixed,
            penalty_rate: amount("35.00"),
            lock_period: LockPeriod {
                value: 2,
                unit: LockUnit::Weeks,
            },
            min_balance: amount("500.00"),
            max_withdrawal: amount("20000.00"),
            processing_time_hours: 24,
            status: RuleStatus::Inactive,
            created_at: at("2024-04-18T15:00:00Z"),
            updated_at: at("2024-06-02T09:40:00Z"),
        },
    ]
}

fn promotions() -> Vec<Promotion> {
    vec![
        Promotion {
            id: id("pr-1"),
            name: "Welcome Bonus".to_owned(),
            code: "WELCOME50".to_owned(),
            promotion_type: PromotionType::DepositBonus,
            value: amount("50"),
            min_deposit: amount("200.00"),
            starts_on: day("2024-01-01"),
            ends_on: day("2024-12-31"),
            status: PromotionStatus::Active,
            description: "50% bonus on the first deposit".to_owned(),
            created_at: at("2023-12-15T09:00:00Z"),
            updated_at: at("2023-12-15T09:00:00Z"),
        },
        Promotion {
            id: id("pr-2"),
            name: "Summer Cashback".to_owned(),
            code: "SUMMER-CB".to_owned(),
            promotion_type: PromotionType::Cashback,
            value: amount("10"),
            min_deposit: amount("1000.00"),
            starts_on: day("2024-06-01"),
            ends_on: day("2024-08-31"),
            status: PromotionStatus::Active,
            description: "10% cashback on net losses".to_owned(),
            created_at: at("2024-05-20T11:00:00Z"),
            updated_at: at("2024-05-28T16:30:00Z"),
        },
        Promotion {
            id: id("pr-3"),
            name: "Free Trial Credit".to_owned(),
            code: "TRY100".to_owned(),
            promotion_type: PromotionType::NoDepositBonus,
            value: amount("100.00"),
            min_deposit: Decimal::ZERO,
            starts_on: day("2024-09-01"),
            ends_on: day("2024-09-30"),
            status: PromotionStatus::Draft,
            description: "100 USD credit without deposit".to_owned(),
            created_at: at("2024-07-01T10:00:00Z"),
            updated_at: at("2024-07-01T10:00:00Z"),
        },
        Promotion {
            id: id("pr-4"),
            name: "Spring Rebate".to_owned(),
            code: "SPRING-RB".to_owned(),
            promotion_type: PromotionType::Rebate,
            value: amount("2.50"),
            min_deposit: amount("500.00"),
            starts_on: day("2024-03-01"),
            ends_on: day("2024-05-31"),
            status: PromotionStatus::Expired,
            description: "2.50 USD rebate per traded lot".to_owned(),
            created_at: at("2024-02-20T09:30:00Z"),
            updated_at: at("2024-06-01T00:00:00Z"),
        },
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use opsdesk_domain::{TableRecord, TicketStatus};

    use super::mock_data;

    fn unique<T: TableRecord>(records: &[T]) -> bool {
        let ids: HashSet<&str> = records.iter().map(|record| record.record_id().as_str()).collect();
        ids.len() == records.len()
    }

    #[test]
    fn every_collection_has_unique_ids() {
        let seed = mock_data();

        assert!(unique(&seed.access_rights));
        assert!(unique(&seed.managers));
        assert!(unique(&seed.tags));
        assert!(unique(&seed.tickets));
        assert!(unique(&seed.transactions));
        assert!(unique(&seed.positions));
        assert!(unique(&seed.withdrawal_rules));
        assert!(unique(&seed.promotions));
    }

    #[test]
    fn third_access_right_is_read_only() {
        let seed = mock_data();
        let read_only = &seed.access_rights[2];

        assert_eq!(read_only.id.as_str(), "ar-3");
        assert_eq!(read_only.name, "Read Only");
        assert_eq!(read_only.priority, 1);
    }

    #[test]
    fn ticket_counters_match_seeded_threads() {
        let seed = mock_data();

        for ticket in &seed.tickets {
            let thread = seed
                .ticket_messages
                .iter()
                .filter(|message| message.ticket_id == ticket.id)
                .count();
            assert_eq!(ticket.message_count as usize, thread, "{}", ticket.id);
        }
        assert!(
            seed.tickets
                .iter()
                .any(|ticket| ticket.status == TicketStatus::Open && ticket.assigned_to.is_none())
        );
    }

    #[test]
    fn transaction_net_amounts_subtract_fees() {
        for transaction in mock_data().transactions {
            assert_eq!(
                transaction.net_amount,
                transaction.amount - transaction.fees
            );
        }
    }
}
