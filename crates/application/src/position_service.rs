use std::sync::Arc;

use chrono::Utc;
use opsdesk_core::{AppResult, RecordId};
use opsdesk_domain::TradingPosition;
use rust_decimal::Decimal;
use tracing::info;

use crate::RecordRepository;
use crate::record_service::not_found;

/// Position actions beyond the add/edit form.
#[derive(Clone)]
pub struct PositionService {
    positions: Arc<dyn RecordRepository<TradingPosition>>,
}

impl PositionService {
    /// Creates a position service.
    #[must_use]
    pub fn new(positions: Arc<dyn RecordRepository<TradingPosition>>) -> Self {
        Self { positions }
    }

    /// Closes one position at `close_price`, or at its current price.
    pub async fn close_position(
        &self,
        id: &RecordId,
        close_price: Option<Decimal>,
        operator: &str,
    ) -> AppResult<TradingPosition> {
        let mut position = self
            .positions
            .find(id)
            .await?
            .ok_or_else(|| not_found::<TradingPosition>(id))?;

        position.close(close_price, Utc::now())?;
        self.positions.replace(position.clone()).await?;

        info!(
            position_id = %id,
            operator,
            symbol = %position.symbol,
            pnl = %position.pnl,
            "position closed"
        );
        Ok(position)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use opsdesk_core::{AppError, RecordId};
    use opsdesk_domain::{FormContext, PositionForm, PositionStatus, RecordForm, TradingPosition};
    use rust_decimal::Decimal;

    use super::PositionService;
    use crate::test_support::FakeRecordRepository;

    fn position() -> TradingPosition {
        PositionForm {
            account_id: "MT5-100245".to_owned(),
            client_name: "Grace Mensah".to_owned(),
            symbol: "XAUUSD".to_owned(),
            side: "sell".to_owned(),
            volume: "0.5".to_owned(),
            open_price: "2400".to_owned(),
            current_price: "2410".to_owned(),
            status: "open".to_owned(),
            leverage: "50".to_owned(),
        }
        .into_record(
            RecordId::parse("pos-1").unwrap_or_else(|_| unreachable!()),
            &FormContext::now("Seeder"),
        )
        .unwrap_or_else(|_| unreachable!())
    }

    fn service() -> (PositionService, Arc<FakeRecordRepository<TradingPosition>>) {
        let repository = Arc::new(FakeRecordRepository::with(vec![position()]));
        (PositionService::new(repository.clone()), repository)
    }

    #[tokio::test]
    async fn close_stores_final_pnl() {
        let (service, repository) = service();
        let id = RecordId::parse("pos-1").unwrap_or_else(|_| unreachable!());

        let closed = service
            .close_position(&id, Some(Decimal::new(2390, 0)), "Admin")
            .await
            .unwrap_or_else(|_| unreachable!());

        assert_eq!(closed.status, PositionStatus::Closed);
        assert_eq!(closed.pnl, Decimal::new(5, 0));
        assert!(closed.closed_at.is_some());
        assert_eq!(repository.records.lock().await[0], closed);
    }

    #[tokio::test]
    async fn closing_twice_conflicts_without_write() {
        let (service, repository) = service();
        let id = RecordId::parse("pos-1").unwrap_or_else(|_| unreachable!());
        assert!(service.close_position(&id, None, "Admin").await.is_ok());

        let result = service.close_position(&id, None, "Admin").await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
        assert_eq!(repository.write_count().await, 1);
    }

    #[tokio::test]
    async fn oversized_close_price_is_a_field_error_without_write() {
        let (service, repository) = service();
        repository.records.lock().await[0].volume = Decimal::new(10, 0);
        let id = RecordId::parse("pos-1").unwrap_or_else(|_| unreachable!());

        let result = service
            .close_position(&id, Some(Decimal::MAX), "Admin")
            .await;

        let Err(AppError::InvalidForm(errors)) = result else {
            unreachable!();
        };
        assert!(errors.get("close_price").is_some());
        assert_eq!(repository.write_count().await, 0);
        assert_eq!(
            repository.records.lock().await[0].status,
            PositionStatus::Open
        );
    }

    #[tokio::test]
    async fn unknown_position_is_not_found() {
        let (service, _) = service();
        let id = RecordId::parse("pos-404").unwrap_or_else(|_| unreachable!());

        let result = service.close_position(&id, None, "Admin").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
