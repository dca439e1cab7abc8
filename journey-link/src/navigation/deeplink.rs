//! Deep links into the journey-planning app.
//!
//! The link layout is dictated by the app and treated as a fixed contract:
//!
//! ```text
//! {base_url}?origin={id}&destination={id}&date={DDMMYYYY}&time={HHMM}
//! ```
//!
//! Ids are form-urlencoded. Date and time are plain digits with no
//! separators.

use std::fmt;

use chrono::NaiveDate;

use crate::domain::{ClockTime, StopId};

/// Default target of generated links.
const DEFAULT_BASE_URL: &str = "https://app.vrr.de/trip";

/// Configuration for deep-link generation.
#[derive(Debug, Clone)]
pub struct DeepLinkConfig {
    /// Link prefix, up to but excluding the query
    pub base_url: String,
}

impl DeepLinkConfig {
    /// Create a config targeting the default journey-planner app.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Set a custom link prefix.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

impl Default for DeepLinkConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// A generated deep link.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeepLink(String);

impl DeepLink {
    /// Returns the link as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the link and returns the inner String.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for DeepLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Builds deep links from validated values.
///
/// Takes only already-parsed types, so a link can never be built from a
/// blank id or an unchecked date or time string.
#[derive(Debug, Clone)]
pub struct DeepLinkBuilder {
    base_url: String,
}

impl DeepLinkBuilder {
    /// Create a builder for links under `config.base_url`.
    pub fn new(config: DeepLinkConfig) -> Self {
        Self {
            base_url: config.base_url,
        }
    }

    /// Build the link for a trip from `origin` to `destination`.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use journey_link::domain::{ClockTime, StopId};
    /// use journey_link::navigation::{DeepLinkBuilder, DeepLinkConfig};
    ///
    /// let builder = DeepLinkBuilder::new(DeepLinkConfig::new().with_base_url("https://example.org/trip"));
    /// let link = builder.build(
    ///     &StopId::new("A1").unwrap(),
    ///     &StopId::new("B2").unwrap(),
    ///     NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
    ///     ClockTime::parse("14:05").unwrap(),
    /// );
    /// assert_eq!(
    ///     link.as_str(),
    ///     "https://example.org/trip?origin=A1&destination=B2&date=01052024&time=1405"
    /// );
    /// ```
    pub fn build(
        &self,
        origin: &StopId,
        destination: &StopId,
        date: NaiveDate,
        time: ClockTime,
    ) -> DeepLink {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("origin", origin.as_str())
            .append_pair("destination", destination.as_str())
            .append_pair("date", &format_link_date(date))
            .append_pair("time", &time.compact())
            .finish();

        let separator = if self.base_url.contains('?') { '&' } else { '?' };
        DeepLink(format!("{}{}{}", self.base_url, separator, query))
    }
}

/// Day, month and four-digit year with no separators, e.g. `01052024`.
pub fn format_link_date(date: NaiveDate) -> String {
    date.format("%d%m%Y").to_string()
}
