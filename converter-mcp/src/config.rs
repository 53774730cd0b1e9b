//! Server configuration from the environment

use std::env;
use tracing::warn;

use crate::display::DEFAULT_RESULT_DECIMALS;

/// Environment variable overriding the default result decimals
pub const DECIMALS_VAR: &str = "CONVERTER_DECIMALS";

/// Upper bound for requested decimals
pub const MAX_DECIMALS: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Decimals used for converted values when a call does not ask for any
    pub result_decimals: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            result_decimals: DEFAULT_RESULT_DECIMALS,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_decimals_var(env::var(DECIMALS_VAR).ok().as_deref())
    }

    fn from_decimals_var(raw: Option<&str>) -> Self {
        let mut config = ServerConfig::default();
        let Some(raw) = raw else {
            return config;
        };

        match raw.trim().parse::<usize>() {
            Ok(n) if n <= MAX_DECIMALS => config.result_decimals = n,
            _ => warn!(
                value = raw,
                default = config.result_decimals,
                "Ignoring invalid {}", DECIMALS_VAR
            ),
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_when_unset() {
        assert_eq!(ServerConfig::from_decimals_var(None), ServerConfig::default());
        assert_eq!(ServerConfig::default().result_decimals, 4);
    }

    #[test]
    fn test_override() {
        assert_eq!(ServerConfig::from_decimals_var(Some("6")).result_decimals, 6);
        assert_eq!(ServerConfig::from_decimals_var(Some(" 0 ")).result_decimals, 0);
    }

    #[test]
    fn test_invalid_falls_back() {
        assert_eq!(ServerConfig::from_decimals_var(Some("lots")).result_decimals, 4);
        assert_eq!(ServerConfig::from_decimals_var(Some("99")).result_decimals, 4);
    }
}
