use crate::api_config::ApiConfig;
use crate::dev_seed::{SeedData, mock_data};
use crate::state::AppState;

pub(crate) fn test_config() -> ApiConfig {
    ApiConfig::from_lookup(|name| (name == "OPERATOR_NAME").then(|| "Desk Tester".to_owned()))
        .unwrap_or_else(|_| unreachable!())
}

/// State over the mock data set, as served in development.
pub(crate) fn seeded_state() -> AppState {
    AppState::in_memory(&test_config(), mock_data())
}

/// State over empty collections.
pub(crate) fn empty_state() -> AppState {
    AppState::in_memory(&test_config(), SeedData::default())
}
