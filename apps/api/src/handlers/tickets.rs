use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::dto::{
    AssignTicketTagsRequest, PostTicketMessageRequest, TicketMessageResponse, TicketResponse,
    TicketSummaryResponse, TicketUpdateResponse, UpdateTicketStatusRequest,
};
use crate::error::ApiResult;
use crate::handlers::records::parse_record_id;
use crate::state::AppState;

pub async fn update_ticket_status_handler(
    State(state): State<AppState>,
    Path(ticket_id): Path<String>,
    Json(payload): Json<UpdateTicketStatusRequest>,
) -> ApiResult<Json<TicketUpdateResponse>> {
    let ticket_id = parse_record_id(ticket_id)?;
    let update = payload.into_update()?;
    let outcome = state
        .ticket_service
        .update_ticket(&ticket_id, update, state.operator_name.as_str())
        .await?;

    Ok(Json(TicketUpdateResponse::from(outcome)))
}

pub async fn list_ticket_messages_handler(
    State(state): State<AppState>,
    Path(ticket_id): Path<String>,
) -> ApiResult<Json<Vec<TicketMessageResponse>>> {
    let ticket_id = parse_record_id(ticket_id)?;
    let messages = state
        .ticket_service
        .list_messages(&ticket_id)
        .await?
        .into_iter()
        .map(TicketMessageResponse::from)
        .collect();

    Ok(Json(messages))
}

pub async fn post_ticket_message_handler(
    State(state): State<AppState>,
    Path(ticket_id): Path<String>,
    Json(payload): Json<PostTicketMessageRequest>,
) -> ApiResult<(StatusCode, Json<TicketMessageResponse>)> {
    let ticket_id = parse_record_id(ticket_id)?;
    let author = payload
        .author
        .as_deref()
        .map(str::trim)
        .filter(|author| !author.is_empty())
        .unwrap_or(state.operator_name.as_str());
    let message = state
        .ticket_service
        .post_message(&ticket_id, author, payload.body.as_str())
        .await?;

    Ok((StatusCode::CREATED, Json(TicketMessageResponse::from(message))))
}

pub async fn mark_ticket_read_handler(
    State(state): State<AppState>,
    Path(ticket_id): Path<String>,
) -> ApiResult<Json<TicketResponse>> {
    let ticket_id = parse_record_id(ticket_id)?;
    let ticket = state.ticket_service.mark_read(&ticket_id).await?;

    Ok(Json(TicketResponse::from(ticket)))
}

pub async fn assign_ticket_tags_handler(
    State(state): State<AppState>,
    Path(ticket_id): Path<String>,
    Json(payload): Json<AssignTicketTagsRequest>,
) -> ApiResult<Json<TicketResponse>> {
    let ticket_id = parse_record_id(ticket_id)?;
    let ticket = state
        .ticket_service
        .assign_tags(&ticket_id, &payload.tags, state.operator_name.as_str())
        .await?;

    Ok(Json(TicketResponse::from(ticket)))
}

pub async fn delete_ticket_handler(
    State(state): State<AppState>,
    Path(ticket_id): Path<String>,
) -> ApiResult<Json<TicketResponse>> {
    let ticket_id = parse_record_id(ticket_id)?;
    let ticket = state
        .ticket_service
        .delete_ticket(&ticket_id, state.operator_name.as_str())
        .await?;

    Ok(Json(TicketResponse::from(ticket)))
}

pub async fn ticket_summary_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<TicketSummaryResponse>> {
    let summary = state.ticket_service.summary().await?;

    Ok(Json(TicketSummaryResponse::from(summary)))
}
