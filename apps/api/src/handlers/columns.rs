use axum::Json;
use axum::extract::{Path, State};

use crate::dto::{ColumnVisibilityResponse, SetColumnVisibilityRequest};
use crate::error::ApiResult;
use crate::handlers::records::Resource;
use crate::state::AppState;

pub async fn list_columns_handler<R: Resource>(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<ColumnVisibilityResponse>>> {
    let columns = state.column_service.visibility(R::table()).await?;

    Ok(Json(into_responses(columns)))
}

pub async fn set_column_visibility_handler<R: Resource>(
    State(state): State<AppState>,
    Path(column): Path<String>,
    Json(payload): Json<SetColumnVisibilityRequest>,
) -> ApiResult<Json<Vec<ColumnVisibilityResponse>>> {
    let columns = state
        .column_service
        .set_visibility(R::table(), column.as_str(), payload.visible)
        .await?;

    Ok(Json(into_responses(columns)))
}

pub async fn reset_columns_handler<R: Resource>(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<ColumnVisibilityResponse>>> {
    let columns = state.column_service.reset(R::table()).await?;

    Ok(Json(into_responses(columns)))
}

fn into_responses(
    columns: Vec<opsdesk_application::ColumnVisibility>,
) -> Vec<ColumnVisibilityResponse> {
    columns
        .into_iter()
        .map(ColumnVisibilityResponse::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use axum::Json;
    use axum::extract::{Path, State};
    use opsdesk_core::AppError;

    use crate::dto::SetColumnVisibilityRequest;
    use crate::handlers::records::Tickets;
    use crate::handlers::test_support::seeded_state;

    use super::{list_columns_handler, reset_columns_handler, set_column_visibility_handler};

    fn visible(columns: &[crate::dto::ColumnVisibilityResponse], key: &str) -> Option<bool> {
        columns
            .iter()
            .find(|column| column.key == key)
            .map(|column| column.visible)
    }

    #[tokio::test]
    async fn toggling_a_column_then_resetting_restores_defaults() {
        let state = seeded_state();

        let Json(defaults) = list_columns_handler::<Tickets>(State(state.clone()))
            .await
            .unwrap_or_else(|_| unreachable!());
        assert_eq!(visible(&defaults, "category"), Some(true));
        assert_eq!(visible(&defaults, "customer_email"), Some(false));

        let Json(changed) = set_column_visibility_handler::<Tickets>(
            State(state.clone()),
            Path("category".to_owned()),
            Json(SetColumnVisibilityRequest { visible: false }),
        )
        .await
        .unwrap_or_else(|_| unreachable!());
        assert_eq!(visible(&changed, "category"), Some(false));

        let Json(reset) = reset_columns_handler::<Tickets>(State(state))
            .await
            .unwrap_or_else(|_| unreachable!());
        assert_eq!(visible(&reset, "category"), Some(true));
    }

    #[tokio::test]
    async fn pinned_column_cannot_be_hidden() {
        let error = set_column_visibility_handler::<Tickets>(
            State(seeded_state()),
            Path("title".to_owned()),
            Json(SetColumnVisibilityRequest { visible: false }),
        )
        .await
        .err()
        .unwrap_or_else(|| unreachable!());

        assert!(matches!(error.0, AppError::Validation(_)));
    }
}
