use std::collections::BTreeMap;

use opsdesk_core::AppError;
use serde::Serialize;
use ts_rs::TS;

/// API error payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/error-response.ts"
)]
pub struct ErrorResponse {
    message: String,
    /// One message per invalid form field; empty for other errors.
    field_errors: BTreeMap<String, String>,
}

impl From<AppError> for ErrorResponse {
    fn from(value: AppError) -> Self {
        match value {
            AppError::InvalidForm(errors) => Self {
                message: "Please correct the highlighted fields".to_owned(),
                field_errors: errors.into(),
            },
            other => Self {
                message: other.to_string(),
                field_errors: BTreeMap::new(),
            },
        }
    }
}
