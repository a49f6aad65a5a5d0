use axum::Json;
use axum::extract::{Path, State};
use opsdesk_core::{AppError, FieldErrors};
use rust_decimal::Decimal;

use crate::dto::{ClosePositionRequest, PositionResponse};
use crate::error::ApiResult;
use crate::handlers::records::parse_record_id;
use crate::state::AppState;

pub async fn close_position_handler(
    State(state): State<AppState>,
    Path(position_id): Path<String>,
    Json(payload): Json<ClosePositionRequest>,
) -> ApiResult<Json<PositionResponse>> {
    let position_id = parse_record_id(position_id)?;
    let close_price = parse_close_price(payload.close_price.as_deref())?;

    let position = state
        .position_service
        .close_position(&position_id, close_price, state.operator_name.as_str())
        .await?;

    Ok(Json(PositionResponse::from(position)))
}

fn parse_close_price(value: Option<&str>) -> Result<Option<Decimal>, AppError> {
    let Some(value) = value.map(str::trim).filter(|value| !value.is_empty()) else {
        return Ok(None);
    };

    value.parse::<Decimal>().map(Some).map_err(|_| {
        let mut errors = FieldErrors::new();
        errors.push("close_price", "Close price must be a number");
        AppError::InvalidForm(errors)
    })
}
