use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use opsdesk_core::AppError;
use opsdesk_domain::DEFAULT_PAGE_SIZE;
use tracing_subscriber::EnvFilter;

const DEFAULT_MAX_PAGE_SIZE: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub api_host: String,
    pub api_port: u16,
    pub frontend_url: String,
    pub default_page_size: usize,
    pub max_page_size: usize,
    pub seed_mock_data: bool,
    pub operator_name: String,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let api_host = read("API_HOST").unwrap_or_else(|| "127.0.0.1".to_owned());
        let api_port = parse_or("API_PORT", read("API_PORT"), 3001_u16)?;
        let frontend_url =
            read("FRONTEND_URL").unwrap_or_else(|| "http://localhost:3000".to_owned());

        let default_page_size =
            parse_or("DEFAULT_PAGE_SIZE", read("DEFAULT_PAGE_SIZE"), DEFAULT_PAGE_SIZE)?;
        let max_page_size =
            parse_or("MAX_PAGE_SIZE", read("MAX_PAGE_SIZE"), DEFAULT_MAX_PAGE_SIZE)?;
        if default_page_size == 0 || max_page_size == 0 {
            return Err(AppError::Validation(
                "DEFAULT_PAGE_SIZE and MAX_PAGE_SIZE must be at least 1".to_owned(),
            ));
        }
        if default_page_size > max_page_size {
            return Err(AppError::Validation(format!(
                "DEFAULT_PAGE_SIZE ({default_page_size}) must not exceed MAX_PAGE_SIZE ({max_page_size})"
            )));
        }

        let seed_mock_data = match read("SEED_MOCK_DATA") {
            None => true,
            Some(value) => parse_flag("SEED_MOCK_DATA", value.as_str())?,
        };
        let operator_name = read("OPERATOR_NAME").unwrap_or_else(|| "Admin".to_owned());

        Ok(Self {
            api_host,
            api_port,
            frontend_url,
            default_page_size,
            max_page_size,
            seed_mock_data,
            operator_name,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Validation(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn parse_or<T>(name: &str, value: Option<String>, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        None => Ok(default),
        Some(value) => value
            .parse::<T>()
            .map_err(|error| AppError::Validation(format!("invalid {name} '{value}': {error}"))),
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool, AppError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(AppError::Validation(format!(
            "{name} must be true or false, got '{value}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use opsdesk_core::AppError;

    use super::ApiConfig;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ApiConfig, AppError> {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect();
        ApiConfig::from_lookup(|name| values.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = config_from(&[]).unwrap_or_else(|_| unreachable!());

        assert_eq!(config.api_host, "127.0.0.1");
        assert_eq!(config.api_port, 3001);
        assert_eq!(config.frontend_url, "http://localhost:3000");
        assert_eq!(config.default_page_size, 10);
        assert_eq!(config.max_page_size, 100);
        assert!(config.seed_mock_data);
        assert_eq!(config.operator_name, "Admin");
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config =
            config_from(&[("API_PORT", "  "), ("OPERATOR_NAME", "")]).unwrap_or_else(|_| unreachable!());

        assert_eq!(config.api_port, 3001);
        assert_eq!(config.operator_name, "Admin");
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            config_from(&[("API_PORT", "http")]),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            config_from(&[("SEED_MOCK_DATA", "sometimes")]),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            config_from(&[("DEFAULT_PAGE_SIZE", "50"), ("MAX_PAGE_SIZE", "20")]),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            config_from(&[("MAX_PAGE_SIZE", "0")]),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn socket_address_requires_ip_host() {
        let config =
            config_from(&[("API_HOST", "0.0.0.0"), ("API_PORT", "8080")]).unwrap_or_else(|_| unreachable!());
        assert_eq!(
            config
                .socket_address()
                .map(|address| address.to_string())
                .unwrap_or_default(),
            "0.0.0.0:8080"
        );

        let named = config_from(&[("API_HOST", "localhost")]).unwrap_or_else(|_| unreachable!());
        assert!(named.socket_address().is_err());
    }
}
