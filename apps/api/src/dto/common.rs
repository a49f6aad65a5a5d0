use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use opsdesk_domain::TablePage;
use serde::Serialize;
use ts_rs::TS;

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/health-response.ts"
)]
pub struct HealthResponse {
    pub status: &'static str,
    pub tables: Vec<String>,
}

/// One page of table rows plus the counters the pager needs.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/page-response.ts"
)]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub filtered: usize,
    pub page: usize,
    pub page_size: usize,
    pub page_count: usize,
}

impl<R, T: From<R>> From<TablePage<R>> for PageResponse<T> {
    fn from(value: TablePage<R>) -> Self {
        let page = value.map(T::from);
        Self {
            items: page.items,
            total: page.total,
            filtered: page.filtered,
            page: page.page,
            page_size: page.page_size,
            page_count: page.page_count,
        }
    }
}

/// Formats a timestamp the way every response carries it.
#[must_use]
pub fn format_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Formats a calendar date as `YYYY-MM-DD`.
#[must_use]
pub fn format_date(value: NaiveDate) -> String {
    value.format("%Y-%m-%d").to_string()
}

/// Current UTC calendar date, used for date-dependent response flags.
#[must_use]
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}
