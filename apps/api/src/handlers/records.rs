//! Table, form and delete endpoints shared by every back-office resource.

mod query;
mod resources;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{MethodRouter, delete};
use opsdesk_application::RecordService;
use opsdesk_core::RecordId;
use opsdesk_domain::{RecordForm, TableRecord};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::dto::PageResponse;
use crate::error::ApiResult;
use crate::state::AppState;

pub(crate) use query::table_query_from_params;
pub use resources::{
    AccessRights, Managers, Positions, Promotions, Tags, Tickets, Transactions, WithdrawalRules,
};

/// Row type served by resource `R`.
pub type RecordOf<R> = <<R as Resource>::Form as RecordForm>::Record;

/// One back-office table exposed over HTTP.
pub trait Resource: Send + Sync + 'static {
    /// Add/edit form backing the table.
    type Form: RecordForm + From<Self::Payload>;
    /// Wire shape of the form.
    type Payload: Serialize + DeserializeOwned + From<Self::Form> + Send + 'static;
    /// Wire shape of one row.
    type Response: Serialize + From<RecordOf<Self>> + Send + 'static;

    /// Service owning the table's collection.
    fn service(state: &AppState) -> &RecordService<Self::Form>;

    /// Table name, also the URL segment.
    fn table() -> &'static str {
        <RecordOf<Self> as TableRecord>::TABLE
    }

    /// Method router serving `DELETE /api/{table}/{id}`.
    fn delete_route() -> MethodRouter<AppState>
    where
        Self: Sized,
    {
        delete(delete_record_handler::<Self>)
    }
}

pub(crate) fn parse_record_id(value: String) -> ApiResult<RecordId> {
    Ok(RecordId::parse(value)?)
}

pub async fn list_records_handler<R: Resource>(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> ApiResult<Json<PageResponse<R::Response>>> {
    let query =
        table_query_from_params(params, state.default_page_size, state.max_page_size)?;
    let page = R::service(&state).list(&query).await?;

    Ok(Json(PageResponse::from(page)))
}

pub async fn get_record_handler<R: Resource>(
    State(state): State<AppState>,
    Path(record_id): Path<String>,
) -> ApiResult<Json<R::Response>> {
    let record_id = parse_record_id(record_id)?;
    let record = R::service(&state).get(&record_id).await?;

    Ok(Json(R::Response::from(record)))
}

pub async fn edit_form_handler<R: Resource>(
    State(state): State<AppState>,
    Path(record_id): Path<String>,
) -> ApiResult<Json<R::Payload>> {
    let record_id = parse_record_id(record_id)?;
    let form = R::service(&state).edit_form(&record_id).await?;

    Ok(Json(R::Payload::from(form)))
}

pub async fn create_record_handler<R: Resource>(
    State(state): State<AppState>,
    Json(payload): Json<R::Payload>,
) -> ApiResult<(StatusCode, Json<R::Response>)> {
    let record = R::service(&state)
        .create(R::Form::from(payload), state.operator_name.as_str())
        .await?;

    Ok((StatusCode::CREATED, Json(R::Response::from(record))))
}

pub async fn update_record_handler<R: Resource>(
    State(state): State<AppState>,
    Path(record_id): Path<String>,
    Json(payload): Json<R::Payload>,
) -> ApiResult<Json<R::Response>> {
    let record_id = parse_record_id(record_id)?;
    let record = R::service(&state)
        .update(
            &record_id,
            R::Form::from(payload),
            state.operator_name.as_str(),
        )
        .await?;

    Ok(Json(R::Response::from(record)))
}

pub async fn delete_record_handler<R: Resource>(
    State(state): State<AppState>,
    Path(record_id): Path<String>,
) -> ApiResult<Json<R::Response>> {
    let record_id = parse_record_id(record_id)?;
    let record = R::service(&state)
        .delete(&record_id, state.operator_name.as_str())
        .await?;

    Ok(Json(R::Response::from(record)))
}
