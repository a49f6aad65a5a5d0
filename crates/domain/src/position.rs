//! Open and historical trading positions.

use chrono::{DateTime, Utc};
use opsdesk_core::{AppError, AppResult, FieldErrors, RecordId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::choice::choice_enum;
use crate::validation::{parse_choice, parse_integer_in_range, parse_positive_decimal};
use crate::{CellValue, ColumnSpec, FormContext, FormMode, RecordForm, TableRecord};

/// Highest leverage a position may use.
pub const MAX_LEVERAGE: u32 = 1000;

choice_enum! {
    /// Trade direction.
    pub enum PositionSide ("position side") {
        /// Long.
        Buy => ("buy", "Buy"),
        /// Short.
        Sell => ("sell", "Sell"),
    }
}

choice_enum! {
    /// Position lifecycle.
    pub enum PositionStatus ("position status") {
        /// Live in the market.
        Open => ("open", "Open"),
        /// Order placed, not yet filled.
        Pending => ("pending", "Pending"),
        /// Exited.
        Closed => ("closed", "Closed"),
    }
}

/// Trading position on a client account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradingPosition {
    /// Row identifier.
    pub id: RecordId,
    /// Trading account number.
    pub account_id: String,
    /// Account holder.
    pub client_name: String,
    /// Instrument, e.g. `EURUSD`.
    pub symbol: String,
    /// Direction.
    pub side: PositionSide,
    /// Lots.
    pub volume: Decimal,
    /// Entry price.
    pub open_price: Decimal,
    /// Latest or exit price.
    pub current_price: Decimal,
    /// Profit or loss at `current_price`.
    pub pnl: Decimal,
    /// `pnl` relative to the notional, in percent.
    pub pnl_percentage: Decimal,
    /// Lifecycle state.
    pub status: PositionStatus,
    /// Leverage ratio.
    pub leverage: u32,
    /// Margin held.
    pub margin: Decimal,
    /// Entry time.
    pub opened_at: DateTime<Utc>,
    /// Exit time.
    pub closed_at: Option<DateTime<Utc>>,
}

/// Profit or loss of `volume` lots moved from `open_price` to `current_price`.
///
/// Returns `None` when the result does not fit a decimal.
#[must_use]
pub fn position_pnl(
    side: PositionSide,
    volume: Decimal,
    open_price: Decimal,
    current_price: Decimal,
) -> Option<Decimal> {
    let move_value = current_price
        .checked_sub(open_price)?
        .checked_mul(volume)?;
    Some(match side {
        PositionSide::Buy => move_value,
        PositionSide::Sell => -move_value,
    })
}

/// Margin held for a position, rounded to cents. `None` on overflow.
#[must_use]
pub fn position_margin(volume: Decimal, open_price: Decimal, leverage: u32) -> Option<Decimal> {
    if leverage == 0 {
        return Some(Decimal::ZERO);
    }

    let notional = open_price.checked_mul(volume)?;
    Some(notional.checked_div(Decimal::from(leverage))?.round_dp(2))
}

/// Values derived from a position's prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PositionFigures {
    pnl: Decimal,
    pnl_percentage: Decimal,
    margin: Decimal,
}

fn position_figures(
    side: PositionSide,
    volume: Decimal,
    open_price: Decimal,
    current_price: Decimal,
    leverage: u32,
) -> Option<PositionFigures> {
    let pnl = position_pnl(side, volume, open_price, current_price)?;
    let notional = open_price.checked_mul(volume)?;
    let pnl_percentage = if notional.is_zero() {
        Decimal::ZERO
    } else {
        pnl.checked_div(notional)?
            .checked_mul(Decimal::ONE_HUNDRED)?
            .round_dp(2)
    };

    Some(PositionFigures {
        pnl,
        pnl_percentage,
        margin: position_margin(volume, open_price, leverage)?,
    })
}

impl TradingPosition {
    fn figures_at(&self, current_price: Decimal) -> Option<PositionFigures> {
        position_figures(
            self.side,
            self.volume,
            self.open_price,
            current_price,
            self.leverage,
        )
    }

    fn apply_figures(&mut self, figures: PositionFigures) {
        self.pnl = figures.pnl;
        self.pnl_percentage = figures.pnl_percentage;
        self.margin = figures.margin;
    }

    /// Recomputes `pnl`, `pnl_percentage` and `margin` from prices.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when the figures overflow; the
    /// position is left unchanged.
    pub fn refresh_derived(&mut self) -> AppResult<()> {
        let figures = self.figures_at(self.current_price).ok_or_else(|| {
            AppError::Validation(format!(
                "position '{}' is too large to value",
                self.id
            ))
        })?;
        self.apply_figures(figures);
        Ok(())
    }

    /// Closes the position, optionally at `close_price`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] when the position is already closed,
    /// [`AppError::Validation`] for a non-positive close price and
    /// [`AppError::InvalidForm`] on `close_price` when the price is too
    /// large to value the position. Failed closes leave the position as is.
    pub fn close(&mut self, close_price: Option<Decimal>, now: DateTime<Utc>) -> AppResult<()> {
        if self.status == PositionStatus::Closed {
            return Err(AppError::Conflict(format!(
                "position '{}' is already closed",
                self.id
            )));
        }

        let price = close_price.unwrap_or(self.current_price);
        if price <= Decimal::ZERO {
            return Err(AppError::Validation(
                "close price must be greater than zero".to_owned(),
            ));
        }

        let figures = self.figures_at(price).ok_or_else(|| {
            let mut errors = FieldErrors::new();
            errors.push("close_price", TOO_LARGE_TO_VALUE);
            AppError::InvalidForm(errors)
        })?;

        self.current_price = price;
        self.apply_figures(figures);
        self.status = PositionStatus::Closed;
        self.closed_at = Some(now);
        Ok(())
    }
}

const TOO_LARGE_TO_VALUE: &str = "Value is too large for this position";

const POSITION_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::text("symbol", "Symbol").pinned().filterable(),
    ColumnSpec::text("account_id", "Account"),
    ColumnSpec::text("client_name", "Client"),
    ColumnSpec::discrete("side", "Side"),
    ColumnSpec::value("volume", "Volume"),
    ColumnSpec::value("open_price", "Open Price"),
    ColumnSpec::value("current_price", "Current Price"),
    ColumnSpec::value("pnl", "P&L"),
    ColumnSpec::value("pnl_percentage", "P&L %").hidden(),
    ColumnSpec::discrete("status", "Status"),
    ColumnSpec::value("leverage", "Leverage").hidden(),
    ColumnSpec::value("margin", "Margin"),
    ColumnSpec::value("opened_at", "Opened"),
    ColumnSpec::value("closed_at", "Closed").hidden(),
];

impl TableRecord for TradingPosition {
    const TABLE: &'static str = "positions";
    const LABEL: &'static str = "position";

    fn columns() -> &'static [ColumnSpec] {
        POSITION_COLUMNS
    }

    fn record_id(&self) -> &RecordId {
        &self.id
    }

    fn cell(&self, column: &str) -> CellValue {
        match column {
            "symbol" => CellValue::text(self.symbol.as_str()),
            "account_id" => CellValue::text(self.account_id.as_str()),
            "client_name" => CellValue::text(self.client_name.as_str()),
            "side" => self.side.cell(),
            "volume" => CellValue::Decimal(self.volume),
            "open_price" => CellValue::Decimal(self.open_price),
            "current_price" => CellValue::Decimal(self.current_price),
            "pnl" => CellValue::Decimal(self.pnl),
            "pnl_percentage" => CellValue::Decimal(self.pnl_percentage),
            "status" => self.status.cell(),
            "leverage" => CellValue::Integer(i64::from(self.leverage)),
            "margin" => CellValue::Decimal(self.margin),
            "opened_at" => CellValue::Timestamp(self.opened_at),
            "closed_at" => self.closed_at.map_or(CellValue::Empty, CellValue::Timestamp),
            _ => CellValue::Empty,
        }
    }
}

/// Add/edit form for positions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionForm {
    /// Trading account number.
    pub account_id: String,
    /// Account holder.
    pub client_name: String,
    /// Instrument.
    pub symbol: String,
    /// Side transport value.
    pub side: String,
    /// Lots as typed.
    pub volume: String,
    /// Entry price as typed.
    pub open_price: String,
    /// Current price as typed.
    pub current_price: String,
    /// Status transport value.
    pub status: String,
    /// Leverage as typed.
    pub leverage: String,
}

struct ParsedPosition {
    symbol: String,
    side: PositionSide,
    volume: Decimal,
    open_price: Decimal,
    current_price: Decimal,
    status: PositionStatus,
    leverage: u32,
    figures: PositionFigures,
}

impl PositionForm {
    fn parse(&self) -> Result<ParsedPosition, FieldErrors> {
        let mut errors = FieldErrors::new();

        errors.require("account_id", &self.account_id, "Account ID is required");
        errors.require("client_name", &self.client_name, "Client name is required");
        errors.require("symbol", &self.symbol, "Symbol is required");
        let side = parse_choice::<PositionSide>(
            &mut errors,
            "side",
            &self.side,
            "Side is required",
            "Select buy or sell",
        );
        let volume = parse_positive_decimal(
            &mut errors,
            "volume",
            &self.volume,
            "Volume is required",
            "Volume must be greater than zero",
        );
        let open_price = parse_positive_decimal(
            &mut errors,
            "open_price",
            &self.open_price,
            "Open price is required",
            "Open price must be greater than zero",
        );
        let current_price = parse_positive_decimal(
            &mut errors,
            "current_price",
            &self.current_price,
            "Current price is required",
            "Current price must be greater than zero",
        );
        let status = parse_choice::<PositionStatus>(
            &mut errors,
            "status",
            &self.status,
            "Status is required",
            "Select a valid status",
        );
        let leverage = parse_integer_in_range(
            &mut errors,
            "leverage",
            &self.leverage,
            "Leverage is required",
            1..=i64::from(MAX_LEVERAGE),
            "Leverage must be between 1 and 1000",
        );

        let leverage = leverage.and_then(|leverage| u32::try_from(leverage).ok());
        let figures = match (side, volume, open_price, current_price, leverage) {
            (Some(side), Some(volume), Some(open_price), Some(current_price), Some(leverage)) => {
                let figures =
                    position_figures(side, volume, open_price, current_price, leverage);
                if figures.is_none() {
                    errors.push("volume", TOO_LARGE_TO_VALUE);
                }
                figures
            }
            _ => None,
        };

        match (side, volume, open_price, current_price, status, leverage, figures) {
            (
                Some(side),
                Some(volume),
                Some(open_price),
                Some(current_price),
                Some(status),
                Some(leverage),
                Some(figures),
            ) if errors.is_empty() => Ok(ParsedPosition {
                symbol: self.symbol.trim().to_uppercase(),
                side,
                volume,
                open_price,
                current_price,
                status,
                leverage,
                figures,
            }),
            _ => Err(errors),
        }
    }
}

impl RecordForm for PositionForm {
    type Record = TradingPosition;

    fn from_record(record: &TradingPosition) -> Self {
        Self {
            account_id: record.account_id.clone(),
            client_name: record.client_name.clone(),
            symbol: record.symbol.clone(),
            side: record.side.as_str().to_owned(),
            volume: record.volume.to_string(),
            open_price: record.open_price.to_string(),
            current_price: record.current_price.to_string(),
            status: record.status.as_str().to_owned(),
            leverage: record.leverage.to_string(),
        }
    }

    fn validate(&self, _mode: FormMode) -> Result<(), FieldErrors> {
        self.parse().map(|_| ())
    }

    fn into_record(self, id: RecordId, context: &FormContext) -> AppResult<TradingPosition> {
        let parsed = self.parse()?;
        Ok(TradingPosition {
            id,
            account_id: self.account_id.trim().to_owned(),
            client_name: self.client_name.trim().to_owned(),
            symbol: parsed.symbol,
            side: parsed.side,
            volume: parsed.volume,
            open_price: parsed.open_price,
            current_price: parsed.current_price,
            pnl: parsed.figures.pnl,
            pnl_percentage: parsed.figures.pnl_percentage,
            status: parsed.status,
            leverage: parsed.leverage,
            margin: parsed.figures.margin,
            opened_at: context.now,
            closed_at: (parsed.status == PositionStatus::Closed).then_some(context.now),
        })
    }

    fn apply_to(self, record: &mut TradingPosition, context: &FormContext) -> AppResult<()> {
        let parsed = self.parse()?;
        record.account_id = self.account_id.trim().to_owned();
        record.client_name = self.client_name.trim().to_owned();
        record.symbol = parsed.symbol;
        record.side = parsed.side;
        record.volume = parsed.volume;
        record.open_price = parsed.open_price;
        record.current_price = parsed.current_price;
        record.leverage = parsed.leverage;
        record.closed_at = if parsed.status == PositionStatus::Closed {
            record.closed_at.or(Some(context.now))
        } else {
            None
        };
        record.status = parsed.status;
        record.apply_figures(parsed.figures);
        Ok(())
    }
}
