//! Withdrawal rules: penalties, lock periods and limits per withdrawal type.

use chrono::{DateTime, Utc};
use opsdesk_core::{AppResult, FieldErrors, RecordId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::choice::choice_enum;
use crate::validation::{parse_choice, parse_decimal, parse_integer_in_range};
use crate::{CellValue, ColumnSpec, FormContext, FormMode, RecordForm, TableRecord};

choice_enum! {
    /// Withdrawal channel a rule governs.
    pub enum WithdrawalType ("withdrawal type") {
        /// Regular payout.
        Standard => ("standard", "Standard"),
        /// Same-day payout.
        Express => ("express", "Express"),
        /// Payout of bonus funds.
        Bonus => ("bonus", "Bonus"),
        /// Payout of realised profit.
        Profit => ("profit", "Profit"),
    }
}

choice_enum! {
    /// How the early-withdrawal penalty is charged.
    pub enum PenaltyType ("penalty type") {
        /// No penalty.
        NoPenalty => ("none", "None"),
        /// Percentage of the withdrawn amount.
        Percentage => ("percentage", "Percentage"),
        /// Flat amount.
        Fixed => ("fixed", "Fixed"),
    }
}

choice_enum! {
    /// Unit of a lock period.
    pub enum LockUnit ("lock period unit") {
        /// Calendar days.
        Days => ("days", "Days"),
        /// Weeks.
        Weeks => ("weeks", "Weeks"),
        /// Calendar months.
        Months => ("months", "Months"),
    }
}

choice_enum! {
    /// Whether a rule is enforced.
    pub enum RuleStatus ("rule status") {
        /// Enforced.
        Active => ("active", "Active"),
        /// Kept for reference.
        Inactive => ("inactive", "Inactive"),
    }
}

/// Time funds stay locked before a penalty-free withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockPeriod {
    /// Number of units.
    pub value: u32,
    /// Unit.
    pub unit: LockUnit,
}

impl LockPeriod {
    /// Approximate length in days; months count as 30.
    #[must_use]
    pub fn approximate_days(&self) -> u32 {
        let per_unit = match self.unit {
            LockUnit::Days => 1,
            LockUnit::Weeks => 7,
            LockUnit::Months => 30,
        };
        self.value.saturating_mul(per_unit)
    }
}

impl std::fmt::Display for LockPeriod {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{} {}", self.value, self.unit.as_str())
    }
}

/// Withdrawal rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalRule {
    /// Row identifier.
    pub id: RecordId,
    /// Display name.
    pub name: String,
    /// Channel governed.
    pub withdrawal_type: WithdrawalType,
    /// Penalty charging mode.
    pub penalty_type: PenaltyType,
    /// Percentage or flat penalty; zero when the type is `none`.
    pub penalty_rate: Decimal,
    /// Lock period.
    pub lock_period: LockPeriod,
    /// Balance that must remain after withdrawal.
    pub min_balance: Decimal,
    /// Largest single withdrawal.
    pub max_withdrawal: Decimal,
    /// Promised processing time.
    pub processing_time_hours: u32,
    /// Enforcement state.
    pub status: RuleStatus,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

const WITHDRAWAL_RULE_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::text("name", "Name").pinned(),
    ColumnSpec::discrete("withdrawal_type", "Type"),
    ColumnSpec::discrete("penalty_type", "Penalty"),
    ColumnSpec::value("penalty_rate", "Rate"),
    ColumnSpec::value("lock_period", "Lock Period"),
    ColumnSpec::value("min_balance", "Min Balance"),
    ColumnSpec::value("max_withdrawal", "Max Withdrawal"),
    ColumnSpec::value("processing_time_hours", "Processing (h)").hidden(),
    ColumnSpec::discrete("status", "Status"),
    ColumnSpec::value("updated_at", "Updated").hidden(),
];

impl TableRecord for WithdrawalRule {
    const TABLE: &'static str = "withdrawal-rules";
    const LABEL: &'static str = "withdrawal rule";

    fn columns() -> &'static [ColumnSpec] {
        WITHDRAWAL_RULE_COLUMNS
    }

    fn record_id(&self) -> &RecordId {
        &self.id
    }

    fn cell(&self, column: &str) -> CellValue {
        match column {
            "name" => CellValue::text(self.name.as_str()),
            "withdrawal_type" => self.withdrawal_type.cell(),
            "penalty_type" => self.penalty_type.cell(),
            "penalty_rate" => CellValue::Decimal(self.penalty_rate),
            "lock_period" => CellValue::Integer(i64::from(self.lock_period.approximate_days())),
            "min_balance" => CellValue::Decimal(self.min_balance),
            "max_withdrawal" => CellValue::Decimal(self.max_withdrawal),
            "processing_time_hours" => CellValue::Integer(i64::from(self.processing_time_hours)),
            "status" => self.status.cell(),
            "updated_at" => CellValue::Timestamp(self.updated_at),
            _ => CellValue::Empty,
        }
    }
}

/// Add/edit form for withdrawal rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WithdrawalRuleForm {
    /// Display name.
    pub name: String,
    /// Type transport value.
    pub withdrawal_type: String,
    /// Penalty type transport value.
    pub penalty_type: String,
    /// Penalty rate as typed; ignored when the penalty type is `none`.
    pub penalty_rate: String,
    /// Lock period length as typed.
    pub lock_period_value: String,
    /// Lock period unit transport value.
    pub lock_period_unit: String,
    /// Minimum balance as typed.
    pub min_balance: String,
    /// Maximum withdrawal as typed.
    pub max_withdrawal: String,
    /// Processing time as typed.
    pub processing_time_hours: String,
    /// Status transport value.
    pub status: String,
}

struct ParsedWithdrawalRule {
    withdrawal_type: WithdrawalType,
    penalty_type: PenaltyType,
    penalty_rate: Decimal,
    lock_period: LockPeriod,
    min_balance: Decimal,
    max_withdrawal: Decimal,
    processing_time_hours: u32,
    status: RuleStatus,
}

impl WithdrawalRuleForm {
    fn parse(&self) -> Result<ParsedWithdrawalRule, FieldErrors> {
        let mut errors = FieldErrors::new();

        errors.require("name", &self.name, "Rule name is required");
        let withdrawal_type = parse_choice::<WithdrawalType>(
            &mut errors,
            "withdrawal_type",
            &self.withdrawal_type,
            "Withdrawal type is required",
            "Select a valid withdrawal type",
        );
        let penalty_type = parse_choice::<PenaltyType>(
            &mut errors,
            "penalty_type",
            &self.penalty_type,
            "Penalty type is required",
            "Select a valid penalty type",
        );
        let penalty_rate = match penalty_type {
            Some(PenaltyType::NoPenalty) => Some(Decimal::ZERO),
            Some(PenaltyType::Percentage) => parse_decimal(
                &mut errors,
                "penalty_rate",
                &self.penalty_rate,
                "Penalty rate is required",
                Decimal::ZERO,
                "Penalty rate must be between 0 and 100",
            )
            .filter(|rate| {
                let in_range = *rate <= Decimal::ONE_HUNDRED;
                if !in_range {
                    errors.push("penalty_rate", "Penalty rate must be between 0 and 100");
                }
                in_range
            }),
            Some(PenaltyType::Fixed) => parse_decimal(
                &mut errors,
                "penalty_rate",
                &self.penalty_rate,
                "Penalty rate is required",
                Decimal::ZERO,
                "Penalty amount cannot be negative",
            ),
            None => None,
        };
        let lock_value = parse_integer_in_range(
            &mut errors,
            "lock_period_value",
            &self.lock_period_value,
            "Lock period is required",
            0..=i64::from(u16::MAX),
            "Lock period cannot be negative",
        );
        let lock_unit = parse_choice::<LockUnit>(
            &mut errors,
            "lock_period_unit",
            &self.lock_period_unit,
            "Lock period unit is required",
            "Select days, weeks or months",
        );
        let min_balance = parse_decimal(
            &mut errors,
            "min_balance",
            &self.min_balance,
            "Minimum balance is required",
            Decimal::ZERO,
            "Minimum balance cannot be negative",
        );
        let max_withdrawal = parse_decimal(
            &mut errors,
            "max_withdrawal",
            &self.max_withdrawal,
            "Maximum withdrawal is required",
            Decimal::ONE,
            "Maximum withdrawal must be at least 1",
        );
        let processing_time_hours = parse_integer_in_range(
            &mut errors,
            "processing_time_hours",
            &self.processing_time_hours,
            "Processing time is required",
            0..=720,
            "Processing time must be between 0 and 720 hours",
        );
        let status = parse_choice::<RuleStatus>(
            &mut errors,
            "status",
            &self.status,
            "Status is required",
            "Select a valid status",
        );

        match (
            withdrawal_type,
            penalty_type,
            penalty_rate,
            lock_value,
            lock_unit,
            min_balance,
            max_withdrawal,
            processing_time_hours,
            status,
        ) {
            (
                Some(withdrawal_type),
                Some(penalty_type),
                Some(penalty_rate),
                Some(lock_value),
                Some(lock_unit),
                Some(min_balance),
                Some(max_withdrawal),
                Some(processing_time_hours),
                Some(status),
            ) if errors.is_empty() => Ok(ParsedWithdrawalRule {
                withdrawal_type,
                penalty_type,
                penalty_rate,
                lock_period: LockPeriod {
                    value: u32::try_from(lock_value).unwrap_or_default(),
                    unit: lock_unit,
                },
                min_balance,
                max_withdrawal,
                processing_time_hours: u32::try_from(processing_time_hours).unwrap_or_default(),
                status,
            }),
            _ => Err(errors),
        }
    }
}

impl RecordForm for WithdrawalRuleForm {
    type Record = WithdrawalRule;

    fn from_record(record: &WithdrawalRule) -> Self {
        Self {
            name: record.name.clone(),
            withdrawal_type: record.withdrawal_type.as_str().to_owned(),
            penalty_type: record.penalty_type.as_str().to_owned(),
            penalty_rate: record.penalty_rate.to_string(),
            lock_period_value: record.lock_period.value.to_string(),
            lock_period_unit: record.lock_period.unit.as_str().to_owned(),
            min_balance: record.min_balance.to_string(),
            max_withdrawal: record.max_withdrawal.to_string(),
            processing_time_hours: record.processing_time_hours.to_string(),
            status: record.status.as_str().to_owned(),
        }
    }

    fn validate(&self, _mode: FormMode) -> Result<(), FieldErrors> {
        self.parse().map(|_| ())
    }

    fn into_record(self, id: RecordId, context: &FormContext) -> AppResult<WithdrawalRule> {
        let parsed = self.parse()?;
        Ok(WithdrawalRule {
            id,
            name: self.name.trim().to_owned(),
            withdrawal_type: parsed.withdrawal_type,
            penalty_type: parsed.penalty_type,
            penalty_rate: parsed.penalty_rate,
            lock_period: parsed.lock_period,
            min_balance: parsed.min_balance,
            max_withdrawal: parsed.max_withdrawal,
            processing_time_hours: parsed.processing_time_hours,
            status: parsed.status,
            created_at: context.now,
            updated_at: context.now,
        })
    }

    fn apply_to(self, record: &mut WithdrawalRule, context: &FormContext) -> AppResult<()> {
        let parsed = self.parse()?;
        record.name = self.name.trim().to_owned();
        record.withdrawal_type = parsed.withdrawal_type;
        record.penalty_type = parsed.penalty_type;
        record.penalty_rate = parsed.penalty_rate;
        record.lock_period = parsed.lock_period;
        record.min_balance = parsed.min_balance;
        record.max_withdrawal = parsed.max_withdrawal;
        record.processing_time_hours = parsed.processing_time_hours;
        record.status = parsed.status;
        record.updated_at = context.now;
        Ok(())
    }
}
