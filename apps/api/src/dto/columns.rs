use opsdesk_application::ColumnVisibility;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Current visibility of one table column.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/column-visibility-response.ts"
)]
pub struct ColumnVisibilityResponse {
    pub key: String,
    pub label: String,
    pub visible: bool,
    pub hideable: bool,
}

impl From<ColumnVisibility> for ColumnVisibilityResponse {
    fn from(value: ColumnVisibility) -> Self {
        Self {
            key: value.key.to_owned(),
            label: value.label.to_owned(),
            visible: value.visible,
            hideable: value.hideable,
        }
    }
}

/// Incoming column toggle payload.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/set-column-visibility-request.ts"
)]
pub struct SetColumnVisibilityRequest {
    pub visible: bool,
}
