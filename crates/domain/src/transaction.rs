//! Client money movements.

use chrono::{DateTime, Utc};
use opsdesk_core::{AppResult, FieldErrors, RecordId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::choice::choice_enum;
use crate::validation::{parse_choice, parse_decimal, parse_positive_decimal};
use crate::{CellValue, ColumnSpec, FormContext, FormMode, RecordForm, TableRecord};

choice_enum! {
    /// Kind of money movement.
    pub enum TransactionType ("transaction type") {
        /// Funds paid in.
        Deposit => ("deposit", "Deposit"),
        /// Funds paid out.
        Withdrawal => ("withdrawal", "Withdrawal"),
        /// Move between two accounts.
        Transfer => ("transfer", "Transfer"),
        /// Promotional credit.
        Bonus => ("bonus", "Bonus"),
        /// Introducing-broker commission.
        Commission => ("commission", "Commission"),
        /// Charge taken by the desk.
        Fee => ("fee", "Fee"),
    }
}

choice_enum! {
    /// Processing state of a transaction.
    pub enum TransactionStatus ("transaction status") {
        /// Waiting for review.
        Pending => ("pending", "Pending"),
        /// Sent to the payment provider.
        Processing => ("processing", "Processing"),
        /// Settled.
        Completed => ("completed", "Completed"),
        /// Rejected by the provider.
        Failed => ("failed", "Failed"),
        /// Withdrawn before settlement.
        Cancelled => ("cancelled", "Cancelled"),
    }
}

/// Money movement on a client account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Row identifier.
    pub id: RecordId,
    /// Trading account number.
    pub account_id: String,
    /// Account holder.
    pub client_name: String,
    /// Movement kind.
    pub transaction_type: TransactionType,
    /// Gross amount.
    pub amount: Decimal,
    /// ISO currency code.
    pub currency: String,
    /// Processing state.
    pub status: TransactionStatus,
    /// Charges deducted from the amount.
    pub fees: Decimal,
    /// Amount after fees.
    pub net_amount: Decimal,
    /// Provider or internal reference.
    pub reference: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

const TRANSACTION_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::text("reference", "Reference").pinned(),
    ColumnSpec::text("account_id", "Account"),
    ColumnSpec::text("client_name", "Client"),
    ColumnSpec::discrete("transaction_type", "Type"),
    ColumnSpec::value("amount", "Amount"),
    ColumnSpec::discrete("currency", "Currency"),
    ColumnSpec::discrete("status", "Status"),
    ColumnSpec::value("fees", "Fees").hidden(),
    ColumnSpec::value("net_amount", "Net Amount"),
    ColumnSpec::value("created_at", "Created"),
    ColumnSpec::value("updated_at", "Updated").hidden(),
];

impl TableRecord for TransactionRecord {
    const TABLE: &'static str = "transactions";
    const LABEL: &'static str = "transaction";

    fn columns() -> &'static [ColumnSpec] {
        TRANSACTION_COLUMNS
    }

    fn record_id(&self) -> &RecordId {
        &self.id
    }

    fn cell(&self, column: &str) -> CellValue {
        match column {
            "reference" => CellValue::text(self.reference.as_str()),
            "account_id" => CellValue::text(self.account_id.as_str()),
            "client_name" => CellValue::text(self.client_name.as_str()),
            "transaction_type" => self.transaction_type.cell(),
            "amount" => CellValue::Decimal(self.amount),
            "currency" => CellValue::text(self.currency.as_str()),
            "status" => self.status.cell(),
            "fees" => CellValue::Decimal(self.fees),
            "net_amount" => CellValue::Decimal(self.net_amount),
            "created_at" => CellValue::Timestamp(self.created_at),
            "updated_at" => CellValue::Timestamp(self.updated_at),
            _ => CellValue::Empty,
        }
    }
}

/// Returns whether `value` is a three-letter upper-case currency code.
#[must_use]
pub fn is_currency_code(value: &str) -> bool {
    value.len() == 3 && value.chars().all(|letter| letter.is_ascii_uppercase())
}

/// Add/edit form for transactions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionForm {
    /// Trading account number.
    pub account_id: String,
    /// Account holder.
    pub client_name: String,
    /// Type transport value.
    pub transaction_type: String,
    /// Gross amount as typed.
    pub amount: String,
    /// Currency code.
    pub currency: String,
    /// Status transport value.
    pub status: String,
    /// Fees as typed; blank means zero.
    pub fees: String,
    /// Reference.
    pub reference: String,
}

struct ParsedTransaction {
    transaction_type: TransactionType,
    amount: Decimal,
    currency: String,
    status: TransactionStatus,
    fees: Decimal,
}

impl TransactionForm {
    fn parse(&self) -> Result<ParsedTransaction, FieldErrors> {
        let mut errors = FieldErrors::new();

        errors.require("account_id", &self.account_id, "Account ID is required");
        errors.require("client_name", &self.client_name, "Client name is required");
        let transaction_type = parse_choice::<TransactionType>(
            &mut errors,
            "transaction_type",
            &self.transaction_type,
            "Transaction type is required",
            "Select a valid transaction type",
        );
        let amount = parse_positive_decimal(
            &mut errors,
            "amount",
            &self.amount,
            "Amount is required",
            "Amount must be greater than zero",
        );
        let currency = self.currency.trim().to_uppercase();
        if errors.require("currency", &currency, "Currency is required")
            && !is_currency_code(&currency)
        {
            errors.push("currency", "Currency must be a 3-letter code");
        }
        let status = parse_choice::<TransactionStatus>(
            &mut errors,
            "status",
            &self.status,
            "Status is required",
            "Select a valid status",
        );
        let fees = if self.fees.trim().is_empty() {
            Some(Decimal::ZERO)
        } else {
            parse_decimal(
                &mut errors,
                "fees",
                &self.fees,
                "Fees are required",
                Decimal::ZERO,
                "Fees cannot be negative",
            )
        };
        if let (Some(amount), Some(fees)) = (amount, fees)
            && fees > amount
        {
            errors.push("fees", "Fees cannot exceed the amount");
        }
        errors.require("reference", &self.reference, "Reference is required");

        match (transaction_type, amount, status, fees) {
            (Some(transaction_type), Some(amount), Some(status), Some(fees))
                if errors.is_empty() =>
            {
                Ok(ParsedTransaction {
                    transaction_type,
                    amount,
                    currency,
                    status,
                    fees,
                })
            }
            _ => Err(errors),
        }
    }
}

impl RecordForm for TransactionForm {
    type Record = TransactionRecord;

    fn from_record(record: &TransactionRecord) -> Self {
        Self {
            account_id: record.account_id.clone(),
            client_name: record.client_name.clone(),
            transaction_type: record.transaction_type.as_str().to_owned(),
            amount: record.amount.to_string(),
            currency: record.currency.clone(),
            status: record.status.as_str().to_owned(),
            fees: record.fees.to_string(),
            reference: record.reference.clone(),
        }
    }

    fn validate(&self, _mode: FormMode) -> Result<(), FieldErrors> {
        self.parse().map(|_| ())
    }

    fn into_record(self, id: RecordId, context: &FormContext) -> AppResult<TransactionRecord> {
        let parsed = self.parse()?;
        Ok(TransactionRecord {
            id,
            account_id: self.account_id.trim().to_owned(),
            client_name: self.client_name.trim().to_owned(),
            transaction_type: parsed.transaction_type,
            amount: parsed.amount,
            currency: parsed.currency,
            status: parsed.status,
            fees: parsed.fees,
            net_amount: parsed.amount - parsed.fees,
            reference: self.reference.trim().to_owned(),
            created_at: context.now,
            updated_at: context.now,
        })
    }

    fn apply_to(self, record: &mut TransactionRecord, context: &FormContext) -> AppResult<()> {
        let parsed = self.parse()?;
        record.account_id = self.account_id.trim().to_owned();
        record.client_name = self.client_name.trim().to_owned();
        record.transaction_type = parsed.transaction_type;
        record.amount = parsed.amount;
        record.currency = parsed.currency;
        record.status = parsed.status;
        record.fees = parsed.fees;
        record.net_amount = parsed.amount - parsed.fees;
        record.reference = self.reference.trim().to_owned();
        record.updated_at = context.now;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> TransactionForm {
        TransactionForm {
            account_id: "MT5-100245".to_owned(),
            client_name: "Grace Mensah".to_owned(),
            transaction_type: "withdrawal".to_owned(),
            amount: "1250.50".to_owned(),
            currency: "usd".to_owned(),
            status: "pending".to_owned(),
            fees: "12.50".to_owned(),
            reference: "WD-88213".to_owned(),
        }
    }

    #[test]
    fn net_amount_is_amount_minus_fees() {
        let record = form()
            .into_record(RecordId::generate(), &FormContext::now("Admin"))
            .unwrap_or_else(|_| unreachable!());

        assert_eq!(record.net_amount, Decimal::new(1238, 0));
        assert_eq!(record.currency, "USD");
    }

    #[test]
    fn blank_fees_default_to_zero() {
        let mut form = form();
        form.fees = " ".to_owned();
        let record = form
            .into_record(RecordId::generate(), &FormContext::now("Admin"))
            .unwrap_or_else(|_| unreachable!());

        assert_eq!(record.fees, Decimal::ZERO);
        assert_eq!(record.net_amount, record.amount);
    }

    #[test]
    fn amount_must_be_positive_and_cover_fees() {
        let mut form = form();
        form.amount = "0".to_owned();
        let errors = form
            .validate(FormMode::Create)
            .err()
            .unwrap_or_else(|| unreachable!());
        assert_eq!(errors.get("amount"), Some("Amount must be greater than zero"));

        let mut form = self::form();
        form.fees = "2000".to_owned();
        let errors = form
            .validate(FormMode::Create)
            .err()
            .unwrap_or_else(|| unreachable!());
        assert_eq!(errors.get("fees"), Some("Fees cannot exceed the amount"));
    }

    #[test]
    fn extreme_amounts_are_accepted_or_reported() {
        let mut form = form();
        form.amount = Decimal::MAX.to_string();
        form.fees = Decimal::MAX.to_string();

        let record = form
            .clone()
            .into_record(RecordId::generate(), &FormContext::now("Admin"))
            .unwrap_or_else(|_| unreachable!());
        assert_eq!(record.amount, Decimal::MAX);
        assert_eq!(record.net_amount, Decimal::ZERO);

        form.amount = "792281625142643375935439503350".to_owned();
        form.fees = "-792281625142643375935439503350".to_owned();
        let errors = form
            .validate(FormMode::Create)
            .err()
            .unwrap_or_else(|| unreachable!());
        assert_eq!(errors.get("amount"), Some("Amount must be a number"));
        assert_eq!(errors.get("fees"), Some("Fees must be a number"));
    }

    #[test]
    fn currency_must_be_three_letters() {
        let mut form = form();
        form.currency = "dollars".to_owned();

        let errors = form
            .validate(FormMode::Create)
            .err()
            .unwrap_or_else(|| unreachable!());
        assert_eq!(errors.get("currency"), Some("Currency must be a 3-letter code"));
    }

    #[test]
    fn edit_recomputes_net_amount() {
        let mut record = form()
            .into_record(RecordId::generate(), &FormContext::now("Admin"))
            .unwrap_or_else(|_| unreachable!());
        let mut edit = TransactionForm::from_record(&record);
        edit.fees = "50".to_owned();

        assert!(edit.apply_to(&mut record, &FormContext::now("Admin")).is_ok());
        assert_eq!(record.net_amount, Decimal::new(120050, 2));
    }
}
