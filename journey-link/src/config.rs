//! Application configuration.
//!
//! Everything has a working default; environment variables override:
//!
//! | Variable              | Meaning                                   |
//! |-----------------------|-------------------------------------------|
//! | `STOP_FINDER_URL`     | EFA base URL                              |
//! | `HTTP_TIMEOUT_SECS`   | Stop-finder request timeout               |
//! | `DEEP_LINK_BASE_URL`  | Prefix of generated deep links            |
//! | `DESTINATION_ADDRESS` | Fixed destination resolved at startup     |
//! | `SEARCH_QUIET_MS`     | Debounce quiet period in milliseconds     |
//! | `MOCK_STOPS_DIR`      | Serve stops from JSON fixtures instead    |

use std::path::PathBuf;
use std::time::Duration;

use crate::navigation::{DEFAULT_DESTINATION_ADDRESS, DeepLinkConfig};
use crate::search::DEFAULT_QUIET_PERIOD;
use crate::stopfinder::StopFinderConfig;

/// Error from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value for {var}: {value:?} ({reason})")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub reason: String,
}

/// Configuration for the whole application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Stop-finder client settings.
    pub stop_finder: StopFinderConfig,

    /// Deep-link target.
    pub deep_link: DeepLinkConfig,

    /// Destination address resolved once at startup.
    pub destination_address: String,

    /// Quiet period before a typed address is searched.
    pub quiet_period: Duration,

    /// Fixture directory for the mock stop finder, if set.
    pub mock_stops_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            stop_finder: StopFinderConfig::default(),
            deep_link: DeepLinkConfig::default(),
            destination_address: DEFAULT_DESTINATION_ADDRESS.to_string(),
            quiet_period: DEFAULT_QUIET_PERIOD,
            mock_stops_dir: None,
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, treating blank values as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = get("STOP_FINDER_URL") {
            config.stop_finder = config.stop_finder.with_base_url(url);
        }
        if let Some(value) = get("HTTP_TIMEOUT_SECS") {
            let secs = parse_number("HTTP_TIMEOUT_SECS", &value)?;
            config.stop_finder = config.stop_finder.with_timeout(secs);
        }
        if let Some(url) = get("DEEP_LINK_BASE_URL") {
            config.deep_link = config.deep_link.with_base_url(url);
        }
        if let Some(address) = get("DESTINATION_ADDRESS") {
            config.destination_address = address;
        }
        if let Some(value) = get("SEARCH_QUIET_MS") {
            let ms = parse_number("SEARCH_QUIET_MS", &value)?;
            config.quiet_period = Duration::from_millis(ms);
        }
        if let Some(dir) = get("MOCK_STOPS_DIR") {
            config.mock_stops_dir = Some(PathBuf::from(dir));
        }

        Ok(config)
    }
}

fn parse_number(var: &'static str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse().map_err(|e: std::num::ParseIntError| ConfigError {
        var,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var: &str| map.get(var).cloned()
    }

    #[test]
    fn defaults() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.destination_address, DEFAULT_DESTINATION_ADDRESS);
        assert_eq!(config.quiet_period, Duration::from_millis(500));
        assert_eq!(config.stop_finder.base_url, "https://efa.vrr.de/standard");
        assert!(config.mock_stops_dir.is_none());
    }

    #[test]
    fn overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("STOP_FINDER_URL", "http://localhost:9000/efa"),
            ("HTTP_TIMEOUT_SECS", "3"),
            ("DEEP_LINK_BASE_URL", "https://example.org/trip"),
            ("DESTINATION_ADDRESS", "Königswall 15, 44137 Dortmund"),
            ("SEARCH_QUIET_MS", " 250 "),
            ("MOCK_STOPS_DIR", "fixtures/stops"),
        ]))
        .unwrap();

        assert_eq!(config.stop_finder.base_url, "http://localhost:9000/efa");
        assert_eq!(config.stop_finder.timeout_secs, 3);
        assert_eq!(config.deep_link.base_url, "https://example.org/trip");
        assert_eq!(config.destination_address, "Königswall 15, 44137 Dortmund");
        assert_eq!(config.quiet_period, Duration::from_millis(250));
        assert_eq!(config.mock_stops_dir, Some(PathBuf::from("fixtures/stops")));
    }

    #[test]
    fn blank_values_are_ignored() {
        let config = AppConfig::from_lookup(lookup(&[("DESTINATION_ADDRESS", "  ")])).unwrap();
        assert_eq!(config.destination_address, DEFAULT_DESTINATION_ADDRESS);
    }

    #[test]
    fn bad_number_is_an_error() {
        let err = AppConfig::from_lookup(lookup(&[("SEARCH_QUIET_MS", "half a second")]))
            .unwrap_err();
        assert_eq!(err.var, "SEARCH_QUIET_MS");
        assert!(err.to_string().starts_with("invalid value for SEARCH_QUIET_MS"));
    }
}
