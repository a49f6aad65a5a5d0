//! Client promotions and bonus campaigns.

use chrono::{DateTime, NaiveDate, Utc};
use opsdesk_core::{AppResult, FieldErrors, RecordId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::choice::choice_enum;
use crate::validation::{parse_choice, parse_date, parse_decimal, parse_positive_decimal};
use crate::{CellValue, ColumnSpec, FormContext, FormMode, RecordForm, TableRecord};

choice_enum! {
    /// Reward mechanics of a promotion.
    pub enum PromotionType ("promotion type") {
        /// Credit proportional to a deposit.
        DepositBonus => ("deposit_bonus", "Deposit Bonus"),
        /// Credit granted without a deposit.
        NoDepositBonus => ("no_deposit_bonus", "No Deposit Bonus"),
        /// Refund of a share of losses.
        Cashback => ("cashback", "Cashback"),
        /// Refund per traded lot.
        Rebate => ("rebate", "Rebate"),
    }
}

choice_enum! {
    /// Publication state of a promotion.
    pub enum PromotionStatus ("promotion status") {
        /// Being prepared.
        Draft => ("draft", "Draft"),
        /// Offered to clients.
        Active => ("active", "Active"),
        /// Temporarily withdrawn.
        Paused => ("paused", "Paused"),
        /// Past its end date.
        Expired => ("expired", "Expired"),
    }
}

/// Promotion campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Promotion {
    /// Row identifier.
    pub id: RecordId,
    /// Display name.
    pub name: String,
    /// Code clients enter to claim the promotion.
    pub code: String,
    /// Reward mechanics.
    pub promotion_type: PromotionType,
    /// Reward value (percent or amount depending on the type).
    pub value: Decimal,
    /// Smallest qualifying deposit.
    pub min_deposit: Decimal,
    /// First day of the campaign.
    pub starts_on: NaiveDate,
    /// Last day of the campaign.
    pub ends_on: NaiveDate,
    /// Publication state.
    pub status: PromotionStatus,
    /// Terms shown to clients.
    pub description: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

impl Promotion {
    /// Returns whether clients can claim the promotion on `today`.
    #[must_use]
    pub fn is_running(&self, today: NaiveDate) -> bool {
        self.status == PromotionStatus::Active && self.starts_on <= today && today <= self.ends_on
    }
}

const PROMOTION_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::text("name", "Name").pinned(),
    ColumnSpec::text("code", "Code"),
    ColumnSpec::discrete("promotion_type", "Type"),
    ColumnSpec::value("value", "Value"),
    ColumnSpec::value("min_deposit", "Min Deposit").hidden(),
    ColumnSpec::value("starts_on", "Starts"),
    ColumnSpec::value("ends_on", "Ends"),
    ColumnSpec::discrete("status", "Status"),
    ColumnSpec::text("description", "Description").hidden(),
];

impl TableRecord for Promotion {
    const TABLE: &'static str = "promotions";
    const LABEL: &'static str = "promotion";

    fn columns() -> &'static [ColumnSpec] {
        PROMOTION_COLUMNS
    }

    fn record_id(&self) -> &RecordId {
        &self.id
    }

    fn cell(&self, column: &str) -> CellValue {
        match column {
            "name" => CellValue::text(self.name.as_str()),
            "code" => CellValue::text(self.code.as_str()),
            "promotion_type" => self.promotion_type.cell(),
            "value" => CellValue::Decimal(self.value),
            "min_deposit" => CellValue::Decimal(self.min_deposit),
            "starts_on" => CellValue::Date(self.starts_on),
            "ends_on" => CellValue::Date(self.ends_on),
            "status" => self.status.cell(),
            "description" => CellValue::text(self.description.as_str()),
            _ => CellValue::Empty,
        }
    }
}

/// Returns whether `value` is a usable promotion code: 3 to 20 ASCII
/// letters, digits or dashes.
#[must_use]
pub fn is_promotion_code(value: &str) -> bool {
    (3..=20).contains(&value.len())
        && value
            .chars()
            .all(|character| character.is_ascii_alphanumeric() || character == '-')
}

/// Add/edit form for promotions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromotionForm {
    /// Display name.
    pub name: String,
    /// Claim code.
    pub code: String,
    /// Type transport value.
    pub promotion_type: String,
    /// Reward value as typed.
    pub value: String,
    /// Minimum deposit as typed; blank means zero.
    pub min_deposit: String,
    /// First day (`YYYY-MM-DD`).
    pub starts_on: String,
    /// Last day (`YYYY-MM-DD`).
    pub ends_on: String,
    /// Status transport value.
    pub status: String,
    /// Terms.
    pub description: String,
}

struct ParsedPromotion {
    code: String,
    promotion_type: PromotionType,
    value: Decimal,
    min_deposit: Decimal,
    starts_on: NaiveDate,
    ends_on: NaiveDate,
    status: PromotionStatus,
}

impl PromotionForm {
    fn parse(&self) -> Result<ParsedPromotion, FieldErrors> {
        let mut errors = FieldErrors::new();

        errors.require("name", &self.name, "Promotion name is required");
        let code = self.code.trim().to_uppercase();
        if errors.require("code", &code, "Promotion code is required") && !is_promotion_code(&code)
        {
            errors.push("code", "Code must be 3-20 letters, digits or dashes");
        }
        let promotion_type = parse_choice::<PromotionType>(
            &mut errors,
            "promotion_type",
            &self.promotion_type,
            "Promotion type is required",
            "Select a valid promotion type",
        );
        let value = parse_positive_decimal(
            &mut errors,
            "value",
            &self.value,
            "Value is required",
            "Value must be greater than zero",
        );
        let min_deposit = if self.min_deposit.trim().is_empty() {
            Some(Decimal::ZERO)
        } else {
            parse_decimal(
                &mut errors,
                "min_deposit",
                &self.min_deposit,
                "Minimum deposit is required",
                Decimal::ZERO,
                "Minimum deposit cannot be negative",
            )
        };
        let starts_on = parse_date(&mut errors, "starts_on", &self.starts_on, "Start date is required");
        let ends_on = parse_date(&mut errors, "ends_on", &self.ends_on, "End date is required");
        if let (Some(starts_on), Some(ends_on)) = (starts_on, ends_on)
            && ends_on <= starts_on
        {
            errors.push("ends_on", "End date must be after start date");
        }
        let status = parse_choice::<PromotionStatus>(
            &mut errors,
            "status",
            &self.status,
            "Status is required",
            "Select a valid status",
        );

        match (promotion_type, value, min_deposit, starts_on, ends_on, status) {
            (
                Some(promotion_type),
                Some(value),
                Some(min_deposit),
                Some(starts_on),
                Some(ends_on),
                Some(status),
            ) if errors.is_empty() => Ok(ParsedPromotion {
                code,
                promotion_type,
                value,
                min_deposit,
                starts_on,
                ends_on,
                status,
            }),
            _ => Err(errors),
        }
    }
}

impl RecordForm for PromotionForm {
    type Record = Promotion;

    fn from_record(record: &Promotion) -> Self {
        Self {
            name: record.name.clone(),
            code: record.code.clone(),
            promotion_type: record.promotion_type.as_str().to_owned(),
            value: record.value.to_string(),
            min_deposit: record.min_deposit.to_string(),
            starts_on: record.starts_on.format("%Y-%m-%d").to_string(),
            ends_on: record.ends_on.format("%Y-%m-%d").to_string(),
            status: record.status.as_str().to_owned(),
            description: record.description.clone(),
        }
    }

    fn validate(&self, _mode: FormMode) -> Result<(), FieldErrors> {
        self.parse().map(|_| ())
    }

    fn into_record(self, id: RecordId, context: &FormContext) -> AppResult<Promotion> {
        let parsed = self.parse()?;
        Ok(Promotion {
            id,
            name: self.name.trim().to_owned(),
            code: parsed.code,
            promotion_type: parsed.promotion_type,
            value: parsed.value,
            min_deposit: parsed.min_deposit,
            starts_on: parsed.starts_on,
            ends_on: parsed.ends_on,
            status: parsed.status,
            description: self.description.trim().to_owned(),
            created_at: context.now,
            updated_at: context.now,
        })
    }

    fn apply_to(self, record: &mut Promotion, context: &FormContext) -> AppResult<()> {
        let parsed = self.parse()?;
        record.name = self.name.trim().to_owned();
        record.code = parsed.code;
        record.promotion_type = parsed.promotion_type;
        record.value = parsed.value;
        record.min_deposit = parsed.min_deposit;
        record.starts_on = parsed.starts_on;
        record.ends_on = parsed.ends_on;
        record.status = parsed.status;
        record.description = self.description.trim().to_owned();
        record.updated_at = context.now;
        Ok(())
    }
}
