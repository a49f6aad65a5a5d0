//! Generic search, filter, sort and pagination over in-memory tables.
//!
//! Every back-office table runs the same pipeline: free-text search over the
//! searchable columns, equality filters over the filterable ones, a stable
//! sort on one column, then a page window. Records describe their columns
//! through [`TableRecord`]; the pipeline never knows concrete entity types.

use std::cmp::Ordering;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use opsdesk_core::{AppError, AppResult, RecordId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Value of one table cell, used for searching, filtering and sorting.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Missing optional value.
    Empty,
    /// Boolean flag.
    Bool(bool),
    /// Whole number.
    Integer(i64),
    /// Exact decimal amount.
    Decimal(Decimal),
    /// Calendar date.
    Date(NaiveDate),
    /// Point in time.
    Timestamp(DateTime<Utc>),
    /// Enumerated value: declaration rank, stable value and display label.
    /// Sorts by rank and renders as the stable value.
    Choice(usize, &'static str, &'static str),
    /// Free text.
    Text(String),
}

impl CellValue {
    /// Builds a text cell.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Builds a text cell from an optional value.
    #[must_use]
    pub fn optional_text(value: Option<&str>) -> Self {
        value.map_or(Self::Empty, |value| Self::Text(value.to_owned()))
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::Bool(_) => 1,
            Self::Integer(_) => 2,
            Self::Decimal(_) => 3,
            Self::Date(_) => 4,
            Self::Timestamp(_) => 5,
            Self::Choice(..) => 6,
            Self::Text(_) => 7,
        }
    }

    /// Total order used for column sorting. Empty cells sort first and text
    /// compares case-insensitively.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Bool(left), Self::Bool(right)) => left.cmp(right),
            (Self::Integer(left), Self::Integer(right)) => left.cmp(right),
            (Self::Decimal(left), Self::Decimal(right)) => left.cmp(right),
            (Self::Integer(left), Self::Decimal(right)) => Decimal::from(*left).cmp(right),
            (Self::Decimal(left), Self::Integer(right)) => left.cmp(&Decimal::from(*right)),
            (Self::Date(left), Self::Date(right)) => left.cmp(right),
            (Self::Timestamp(left), Self::Timestamp(right)) => left.cmp(right),
            (Self::Choice(left, ..), Self::Choice(right, ..)) => left.cmp(right),
            (Self::Text(left), Self::Text(right)) => left
                .to_lowercase()
                .cmp(&right.to_lowercase())
                .then_with(|| left.cmp(right)),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    /// Renders the cell the way search and filters see it.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Bool(value) => value.to_string(),
            Self::Integer(value) => value.to_string(),
            Self::Decimal(value) => value.normalize().to_string(),
            Self::Date(value) => value.format("%Y-%m-%d").to_string(),
            Self::Timestamp(value) => value.to_rfc3339(),
            Self::Choice(_, value, _) => (*value).to_owned(),
            Self::Text(value) => value.clone(),
        }
    }

    /// Returns whether the cell equals a lowercased filter value. Choices
    /// match on their stable value or their display label.
    #[must_use]
    pub fn matches_filter(&self, expected: &str) -> bool {
        match self {
            Self::Choice(_, value, label) => {
                value.to_lowercase() == expected || label.to_lowercase() == expected
            }
            _ => self.render().to_lowercase() == expected,
        }
    }
}

/// Static description of one table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Stable column key used in queries.
    pub key: &'static str,
    /// Header label.
    pub label: &'static str,
    /// Included in free-text search.
    pub searchable: bool,
    /// Accepts equality filters.
    pub filterable: bool,
    /// Accepts sort requests.
    pub sortable: bool,
    /// May be hidden by the column toggle.
    pub hideable: bool,
    /// Shown until the operator hides it.
    pub default_visible: bool,
}

impl ColumnSpec {
    /// Searchable, sortable text column.
    #[must_use]
    pub const fn text(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            searchable: true,
            filterable: false,
            sortable: true,
            hideable: true,
            default_visible: true,
        }
    }

    /// Enumerated column offered as a filter dropdown.
    #[must_use]
    pub const fn discrete(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            searchable: false,
            filterable: true,
            sortable: true,
            hideable: true,
            default_visible: true,
        }
    }

    /// Numeric or temporal column that is only sortable.
    #[must_use]
    pub const fn value(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            searchable: false,
            filterable: false,
            sortable: true,
            hideable: true,
            default_visible: true,
        }
    }

    /// Column that cannot be hidden.
    #[must_use]
    pub const fn pinned(mut self) -> Self {
        self.hideable = false;
        self
    }

    /// Column hidden until the operator enables it.
    #[must_use]
    pub const fn hidden(mut self) -> Self {
        self.default_visible = false;
        self
    }

    /// Adds the column to free-text search.
    #[must_use]
    pub const fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    /// Allows equality filters on the column.
    #[must_use]
    pub const fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }
}

/// A row type that can be shown in a back-office table.
pub trait TableRecord: Clone + Send + Sync + 'static {
    /// Stable table name (also the URL segment).
    const TABLE: &'static str;

    /// Human readable resource label used in messages.
    const LABEL: &'static str;

    /// Ordered column catalog.
    fn columns() -> &'static [ColumnSpec];

    /// Row identifier.
    fn record_id(&self) -> &RecordId;

    /// Returns the value of one column, [`CellValue::Empty`] when unknown.
    fn cell(&self, column: &str) -> CellValue;

    /// Looks up one column by key.
    #[must_use]
    fn column(key: &str) -> Option<&'static ColumnSpec> {
        Self::columns().iter().find(|column| column.key == key)
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Ascending order.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// Returns the stable transport value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(AppError::Validation(format!(
                "unknown sort direction '{value}'"
            ))),
        }
    }
}

/// Active sort column and direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSort {
    /// Column key.
    pub column: String,
    /// Direction.
    pub direction: SortDirection,
}

/// Equality filter on one discrete column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnFilter {
    /// Column key.
    pub column: String,
    /// Expected value, compared case-insensitively against the rendered
    /// cell. Discrete columns also accept the choice's display label.
    /// Blank means "all".
    pub value: String,
}

/// Requested page window (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Page number starting at 1.
    pub page: usize,
    /// Rows per page.
    pub page_size: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Full view state of one table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableQuery {
    /// Free-text search string.
    pub search: Option<String>,
    /// Discrete equality filters.
    pub filters: Vec<ColumnFilter>,
    /// Active sort.
    pub sort: Option<TableSort>,
    /// Page window.
    pub page: PageRequest,
}

impl TableQuery {
    /// Sets the search string.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Adds one equality filter.
    #[must_use]
    pub fn with_filter(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push(ColumnFilter {
            column: column.into(),
            value: value.into(),
        });
        self
    }

    /// Sets the sort column.
    #[must_use]
    pub fn sorted_by(mut self, column: impl Into<String>, direction: SortDirection) -> Self {
        self.sort = Some(TableSort {
            column: column.into(),
            direction,
        });
        self
    }

    /// Sets the page window.
    #[must_use]
    pub fn with_page(mut self, page: usize, page_size: usize) -> Self {
        self.page = PageRequest { page, page_size };
        self
    }

    fn active_search(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|search| !search.is_empty())
            .map(str::to_lowercase)
    }

    fn active_filters(&self) -> impl Iterator<Item = &ColumnFilter> {
        self.filters
            .iter()
            .filter(|filter| !filter.value.trim().is_empty())
    }
}

/// One page of a table view.
#[derive(Debug, Clone, PartialEq)]
pub struct TablePage<T> {
    /// Rows on this page.
    pub items: Vec<T>,
    /// Size of the full collection.
    pub total: usize,
    /// Rows matching search and filters.
    pub filtered: usize,
    /// Page actually returned, after clamping.
    pub page: usize,
    /// Rows per page.
    pub page_size: usize,
    /// Number of pages over the filtered rows.
    pub page_count: usize,
}

impl<T> TablePage<T> {
    /// Maps the rows while keeping the counters.
    pub fn map<U>(self, transform: impl FnMut(T) -> U) -> TablePage<U> {
        TablePage {
            items: self.items.into_iter().map(transform).collect(),
            total: self.total,
            filtered: self.filtered,
            page: self.page,
            page_size: self.page_size,
            page_count: self.page_count,
        }
    }
}

/// Checks that every column referenced by the query exists and supports the
/// requested operation.
pub fn validate_table_query<T: TableRecord>(query: &TableQuery) -> AppResult<()> {
    if query.page.page == 0 {
        return Err(AppError::Validation("page must be at least 1".to_owned()));
    }

    if query.page.page_size == 0 {
        return Err(AppError::Validation(
            "page size must be at least 1".to_owned(),
        ));
    }

    for filter in &query.filters {
        match T::column(filter.column.as_str()) {
            Some(column) if column.filterable => {}
            Some(_) => {
                return Err(AppError::Validation(format!(
                    "column '{}' of table '{}' cannot be filtered",
                    filter.column,
                    T::TABLE
                )));
            }
            None => {
                return Err(AppError::Validation(format!(
                    "unknown column '{}' for table '{}'",
                    filter.column,
                    T::TABLE
                )));
            }
        }
    }

    if let Some(sort) = &query.sort {
        match T::column(sort.column.as_str()) {
            Some(column) if column.sortable => {}
            Some(_) => {
                return Err(AppError::Validation(format!(
                    "column '{}' of table '{}' cannot be sorted",
                    sort.column,
                    T::TABLE
                )));
            }
            None => {
                return Err(AppError::Validation(format!(
                    "unknown column '{}' for table '{}'",
                    sort.column,
                    T::TABLE
                )));
            }
        }
    }

    Ok(())
}

/// Runs search, filters, sort and pagination over `records`.
///
/// A page past the end of the filtered rows is clamped to the last page
/// (page 1 when nothing matches) and the returned page reports the clamped
/// number. Sorting is stable: rows with equal cells keep source order.
pub fn apply_table_query<T: TableRecord>(
    records: &[T],
    query: &TableQuery,
) -> AppResult<TablePage<T>> {
    validate_table_query::<T>(query)?;

    let search = query.active_search();
    let filters: Vec<(&str, String)> = query
        .active_filters()
        .map(|filter| (filter.column.as_str(), filter.value.trim().to_lowercase()))
        .collect();

    let mut matched: Vec<&T> = records
        .iter()
        .filter(|record| {
            search
                .as_deref()
                .is_none_or(|needle| record_matches_search(*record, needle))
        })
        .filter(|record| {
            filters
                .iter()
                .all(|(column, expected)| record.cell(column).matches_filter(expected))
        })
        .collect();

    if let Some(sort) = &query.sort {
        let column = sort.column.as_str();
        matched.sort_by(|left, right| {
            let ordering = left.cell(column).compare(&right.cell(column));
            match sort.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
    }

    let page_size = query.page.page_size;
    let filtered = matched.len();
    let page_count = filtered.div_ceil(page_size);
    let page = query.page.page.min(page_count.max(1));
    let items = matched
        .into_iter()
        .skip((page - 1).saturating_mul(page_size))
        .take(page_size)
        .cloned()
        .collect();

    Ok(TablePage {
        items,
        total: records.len(),
        filtered,
        page,
        page_size,
        page_count,
    })
}

fn record_matches_search<T: TableRecord>(record: &T, needle: &str) -> bool {
    T::columns()
        .iter()
        .filter(|column| column.searchable)
        .any(|column| {
            record
                .cell(column.key)
                .render()
                .to_lowercase()
                .contains(needle)
        })
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: RecordId,
        name: String,
        status: &'static str,
        amount: i64,
    }

    const ROW_COLUMNS: &[ColumnSpec] = &[
        ColumnSpec::text("name", "Name").pinned(),
        ColumnSpec::discrete("status", "Status"),
        ColumnSpec::value("amount", "Amount"),
    ];

    impl TableRecord for Row {
        const TABLE: &'static str = "rows";
        const LABEL: &'static str = "Row";

        fn columns() -> &'static [ColumnSpec] {
            ROW_COLUMNS
        }

        fn record_id(&self) -> &RecordId {
            &self.id
        }

        fn cell(&self, column: &str) -> CellValue {
            match column {
                "name" => CellValue::text(self.name.as_str()),
                "status" => CellValue::text(self.status),
                "amount" => CellValue::Integer(self.amount),
                _ => CellValue::Empty,
            }
        }
    }

    fn row(id: &str, name: &str, status: &'static str, amount: i64) -> Row {
        Row {
            id: RecordId::parse(id).unwrap_or_else(|_| unreachable!()),
            name: name.to_owned(),
            status,
            amount,
        }
    }

    fn sample_rows() -> Vec<Row> {
        vec![
            row("1", "Alice Carter", "active", 300),
            row("2", "Bob Stone", "inactive", 100),
            row("3", "Carla Alvarez", "active", 200),
            row("4", "Dmitri Volkov", "active", 100),
            row("5", "Eve Malik", "inactive", 500),
        ]
    }

    fn ids(page: &TablePage<Row>) -> Vec<&str> {
        page.items.iter().map(|row| row.id.as_str()).collect()
    }

    #[test]
    fn empty_query_returns_first_page_of_everything() {
        let rows = sample_rows();
        let page = apply_table_query(&rows, &TableQuery::default())
            .unwrap_or_else(|_| unreachable!());

        assert_eq!(page.total, 5);
        assert_eq!(page.filtered, 5);
        assert_eq!(page.page, 1);
        assert_eq!(page.page_count, 1);
        assert_eq!(ids(&page), vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn search_is_case_insensitive_substring_over_searchable_columns() {
        let rows = sample_rows();
        let page = apply_table_query(&rows, &TableQuery::default().with_search("  ALV "))
            .unwrap_or_else(|_| unreachable!());

        assert_eq!(ids(&page), vec!["3"]);

        let page = apply_table_query(&rows, &TableQuery::default().with_search("inactive"))
            .unwrap_or_else(|_| unreachable!());
        assert_eq!(page.filtered, 0);
    }

    #[test]
    fn filters_use_case_insensitive_equality() {
        let rows = sample_rows();
        let page = apply_table_query(&rows, &TableQuery::default().with_filter("status", "Active"))
            .unwrap_or_else(|_| unreachable!());

        assert_eq!(ids(&page), vec!["1", "3", "4"]);
    }

    #[test]
    fn choice_cells_match_value_or_label() {
        let cell = CellValue::Choice(1, "in_progress", "In Progress");

        assert!(cell.matches_filter("in_progress"));
        assert!(cell.matches_filter("in progress"));
        assert!(!cell.matches_filter("open"));
        assert_eq!(cell.render(), "in_progress");
    }

    #[test]
    fn blank_filter_value_means_all() {
        let rows = sample_rows();
        let page = apply_table_query(&rows, &TableQuery::default().with_filter("status", " "))
            .unwrap_or_else(|_| unreachable!());

        assert_eq!(page.filtered, rows.len());
    }

    #[test]
    fn sort_is_stable_in_both_directions() {
        let rows = sample_rows();
        let ascending = apply_table_query(
            &rows,
            &TableQuery::default().sorted_by("amount", SortDirection::Asc),
        )
        .unwrap_or_else(|_| unreachable!());
        assert_eq!(ids(&ascending), vec!["2", "4", "3", "1", "5"]);

        let descending = apply_table_query(
            &rows,
            &TableQuery::default().sorted_by("amount", SortDirection::Desc),
        )
        .unwrap_or_else(|_| unreachable!());
        assert_eq!(ids(&descending), vec!["5", "1", "3", "2", "4"]);
    }

    #[test]
    fn page_past_the_end_is_clamped_to_last_page() {
        let rows = sample_rows();
        let page = apply_table_query(
            &rows,
            &TableQuery::default()
                .with_filter("status", "active")
                .with_page(3, 2),
        )
        .unwrap_or_else(|_| unreachable!());

        assert_eq!(page.page, 2);
        assert_eq!(page.page_count, 2);
        assert_eq!(ids(&page), vec!["4"]);
    }

    #[test]
    fn no_match_reports_page_one_of_zero() {
        let rows = sample_rows();
        let page = apply_table_query(
            &rows,
            &TableQuery::default().with_search("nobody").with_page(4, 2),
        )
        .unwrap_or_else(|_| unreachable!());

        assert_eq!(page.page, 1);
        assert_eq!(page.page_count, 0);
        assert!(page.items.is_empty());
    }

    #[test]
    fn invalid_columns_and_windows_are_rejected() {
        let rows = sample_rows();

        let unknown = TableQuery::default().with_filter("email", "x");
        assert!(apply_table_query(&rows, &unknown).is_err());

        let not_filterable = TableQuery::default().with_filter("amount", "100");
        assert!(apply_table_query(&rows, &not_filterable).is_err());

        let unknown_sort = TableQuery::default().sorted_by("email", SortDirection::Asc);
        assert!(apply_table_query(&rows, &unknown_sort).is_err());

        assert!(apply_table_query(&rows, &TableQuery::default().with_page(0, 10)).is_err());
        assert!(apply_table_query(&rows, &TableQuery::default().with_page(1, 0)).is_err());
    }

    #[test]
    fn empty_cells_sort_before_values_and_text_ignores_case() {
        assert_eq!(
            CellValue::Empty.compare(&CellValue::Integer(-5)),
            Ordering::Less
        );
        assert_eq!(
            CellValue::text("alpha").compare(&CellValue::text("Beta")),
            Ordering::Less
        );
        assert_eq!(
            CellValue::Integer(2).compare(&CellValue::Decimal(Decimal::new(15, 1))),
            Ordering::Greater
        );
    }

    #[test]
    fn sort_direction_parses_transport_values() {
        assert_eq!("DESC".parse::<SortDirection>().ok(), Some(SortDirection::Desc));
        assert!("sideways".parse::<SortDirection>().is_err());
    }

    fn arbitrary_rows() -> impl Strategy<Value = Vec<Row>> {
        prop::collection::vec(
            (
                "[a-z]{1,8}",
                prop::sample::select(vec!["active", "inactive"]),
                0i64..1_000,
            ),
            0..40,
        )
        .prop_map(|values| {
            values
                .into_iter()
                .enumerate()
                .map(|(index, (name, status, amount))| {
                    row(&index.to_string(), name.as_str(), status, amount)
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn filtered_count_never_exceeds_total(
            rows in arbitrary_rows(),
            search in "[a-z]{0,3}",
            status in prop::option::of(prop::sample::select(vec!["active", "inactive"])),
        ) {
            let mut query = TableQuery::default().with_search(search);
            if let Some(status) = status {
                query = query.with_filter("status", status);
            }

            let page = apply_table_query(&rows, &query).unwrap_or_else(|_| unreachable!());
            prop_assert!(page.filtered <= page.total);
            prop_assert_eq!(page.total, rows.len());
        }

        #[test]
        fn inactive_search_and_filters_keep_every_row(rows in arbitrary_rows()) {
            let query = TableQuery::default().with_search("   ").with_page(1, 1_000);
            let page = apply_table_query(&rows, &query).unwrap_or_else(|_| unreachable!());

            prop_assert_eq!(page.filtered, rows.len());
            prop_assert_eq!(page.items.len(), rows.len());
        }

        #[test]
        fn every_page_but_the_last_is_full(rows in arbitrary_rows(), page_size in 1usize..8) {
            let first = apply_table_query(&rows, &TableQuery::default().with_page(1, page_size))
                .unwrap_or_else(|_| unreachable!());

            for page_number in 1..=first.page_count {
                let page = apply_table_query(
                    &rows,
                    &TableQuery::default()
                        .sorted_by("amount", SortDirection::Asc)
                        .with_page(page_number, page_size),
                )
                .unwrap_or_else(|_| unreachable!());

                prop_assert_eq!(page.page, page_number);
                if page_number < page.page_count {
                    prop_assert_eq!(page.items.len(), page_size);
                } else {
                    prop_assert!(!page.items.is_empty());
                    prop_assert!(page.items.len() <= page_size);
                }
            }
        }
    }
}
