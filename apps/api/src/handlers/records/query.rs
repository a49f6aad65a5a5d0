use std::str::FromStr;

use opsdesk_core::{AppError, AppResult};
use opsdesk_domain::{SortDirection, TableQuery};

const FILTER_PREFIX: &str = "filter.";

/// Builds a table query from raw list parameters.
///
/// Recognised keys are `search`, `sort`, `direction`, `page`, `page_size`
/// and `filter.<column>`; other keys are ignored. A missing page size falls
/// back to `default_page_size` and larger sizes are capped at
/// `max_page_size`. Column names are checked later against the table's
/// catalog.
pub(crate) fn table_query_from_params(
    params: Vec<(String, String)>,
    default_page_size: usize,
    max_page_size: usize,
) -> AppResult<TableQuery> {
    let mut query = TableQuery::default();
    let mut sort_column = None;
    let mut direction = SortDirection::default();
    let mut page = 1;
    let mut page_size = default_page_size;

    for (key, value) in params {
        match key.as_str() {
            "search" => query = query.with_search(value),
            "sort" => {
                let column = value.trim();
                if !column.is_empty() {
                    sort_column = Some(column.to_owned());
                }
            }
            "direction" => direction = SortDirection::from_str(value.as_str())?,
            "page" => page = parse_count("page", value.as_str())?,
            "page_size" => page_size = parse_count("page_size", value.as_str())?,
            _ => {
                if let Some(column) = key.strip_prefix(FILTER_PREFIX) {
                    query = query.with_filter(column, value);
                }
            }
        }
    }

    if let Some(column) = sort_column {
        query = query.sorted_by(column, direction);
    }

    Ok(query.with_page(page, page_size.min(max_page_size)))
}

fn parse_count(name: &str, value: &str) -> AppResult<usize> {
    value
        .trim()
        .parse::<usize>()
        .map_err(|_| AppError::Validation(format!("{name} must be a whole number, got '{value}'")))
}

#[cfg(test)]
mod tests {
    use opsdesk_core::AppError;
    use opsdesk_domain::{ColumnFilter, SortDirection, TableSort};
    use proptest::prelude::*;

    use super::table_query_from_params;

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect()
    }

    #[test]
    fn empty_parameters_use_defaults() {
        let query = table_query_from_params(Vec::new(), 10, 100).unwrap_or_default();

        assert_eq!(query.search, None);
        assert!(query.filters.is_empty());
        assert_eq!(query.sort, None);
        assert_eq!(query.page.page, 1);
        assert_eq!(query.page.page_size, 10);
    }

    #[test]
    fn every_parameter_is_mapped() {
        let query = table_query_from_params(
            params(&[
                ("search", "eur"),
                ("sort", "amount"),
                ("direction", "desc"),
                ("page", "3"),
                ("page_size", "25"),
                ("filter.status", "completed"),
                ("filter.transaction_type", "deposit"),
                ("_", "1700000000"),
            ]),
            10,
            100,
        )
        .unwrap_or_default();

        assert_eq!(query.search.as_deref(), Some("eur"));
        assert_eq!(
            query.sort,
            Some(TableSort {
                column: "amount".to_owned(),
                direction: SortDirection::Desc,
            })
        );
        assert_eq!(query.page.page, 3);
        assert_eq!(query.page.page_size, 25);
        assert_eq!(
            query.filters,
            vec![
                ColumnFilter {
                    column: "status".to_owned(),
                    value: "completed".to_owned(),
                },
                ColumnFilter {
                    column: "transaction_type".to_owned(),
                    value: "deposit".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn direction_without_sort_is_ignored() {
        let query =
            table_query_from_params(params(&[("direction", "desc")]), 10, 100).unwrap_or_default();
        assert_eq!(query.sort, None);
    }

    #[test]
    fn malformed_numbers_and_directions_are_rejected() {
        for bad in [
            params(&[("page", "two")]),
            params(&[("page_size", "-5")]),
            params(&[("sort", "name"), ("direction", "sideways")]),
        ] {
            assert!(matches!(
                table_query_from_params(bad, 10, 100),
                Err(AppError::Validation(_))
            ));
        }
    }

    proptest! {
        #[test]
        fn page_size_never_exceeds_maximum(requested in 1_usize..10_000, max in 1_usize..500) {
            let query = table_query_from_params(
                params(&[("page_size", requested.to_string().as_str())]),
                1,
                max,
            )
            .unwrap_or_default();

            prop_assert!(query.page.page_size <= max);
            prop_assert_eq!(query.page.page_size, requested.min(max));
        }
    }
}
