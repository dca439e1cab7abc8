//! Mock stop finder for running without the live service.
//!
//! Serves canned responses keyed by query, either loaded from JSON fixture
//! files or registered in code. Every lookup is recorded so tests can check
//! which queries actually reached the "network".

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::domain::Stop;

use super::StopFinder;
use super::convert::convert_response;
use super::error::StopFinderError;
use super::types::StopFinderResponse;

/// A fixture file: a stop-finder response plus the query it answers.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Fixture {
    query: String,
    #[serde(default)]
    delay_ms: u64,
    #[serde(flatten)]
    response: StopFinderResponse,
}

/// Canned outcome for one query.
#[derive(Debug, Clone)]
struct Entry {
    outcome: Result<Vec<Stop>, String>,
    delay: Duration,
}

/// Mock stop finder backed by an in-memory table.
///
/// Unknown queries yield no matches, the same as the live service.
#[derive(Debug, Clone, Default)]
pub struct MockStopFinder {
    entries: HashMap<String, Entry>,
    calls: Arc<Mutex<Vec<String>>>,
}

/// Queries are matched case-insensitively, ignoring surrounding whitespace.
fn normalize(query: &str) -> String {
    query.trim().to_lowercase()
}

impl MockStopFinder {
    /// Create an empty mock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every `*.json` fixture in a directory.
    ///
    /// Each file holds a stop-finder response with an extra `query` field
    /// and an optional `delayMs`.
    pub fn from_dir(data_dir: impl AsRef<Path>) -> Result<Self, StopFinderError> {
        let data_dir = data_dir.as_ref();
        let mut mock = Self::new();

        let entries = std::fs::read_dir(data_dir).map_err(|e| StopFinderError::Mock {
            message: format!("failed to read fixture directory {:?}: {}", data_dir, e),
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| StopFinderError::Mock {
                message: format!("failed to read directory entry: {}", e),
            })?;

            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            let json = std::fs::read_to_string(&path).map_err(|e| StopFinderError::Mock {
                message: format!("failed to read {:?}: {}", path, e),
            })?;

            let fixture: Fixture =
                serde_json::from_str(&json).map_err(|e| StopFinderError::Mock {
                    message: format!("failed to parse {:?}: {}", path, e),
                })?;

            let delay = Duration::from_millis(fixture.delay_ms);
            mock = mock.with_stops(&fixture.query, convert_response(fixture.response));
            mock = mock.with_delay(&fixture.query, delay);
        }

        if mock.entries.is_empty() {
            return Err(StopFinderError::Mock {
                message: format!("no fixture files found in {:?}", data_dir),
            });
        }

        Ok(mock)
    }

    /// Answer `query` with the given stops.
    pub fn with_stops(mut self, query: &str, stops: Vec<Stop>) -> Self {
        let entry = self.entry(query);
        entry.outcome = Ok(stops);
        self
    }

    /// Make lookups of `query` fail.
    pub fn with_failure(mut self, query: &str, message: impl Into<String>) -> Self {
        let entry = self.entry(query);
        entry.outcome = Err(message.into());
        self
    }

    /// Delay the answer to `query`, simulating a slow response.
    pub fn with_delay(mut self, query: &str, delay: Duration) -> Self {
        let entry = self.entry(query);
        entry.delay = delay;
        self
    }

    fn entry(&mut self, query: &str) -> &mut Entry {
        self.entries.entry(normalize(query)).or_insert(Entry {
            outcome: Ok(Vec::new()),
            delay: Duration::ZERO,
        })
    }

    /// Queries looked up so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Queries with a canned answer.
    pub fn known_queries(&self) -> Vec<String> {
        let mut queries: Vec<String> = self.entries.keys().cloned().collect();
        queries.sort();
        queries
    }
}

impl StopFinder for MockStopFinder {
    async fn find(&self, address: &str) -> Result<Vec<Stop>, StopFinderError> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(address.to_string());

        let Some(entry) = self.entries.get(&normalize(address)).cloned() else {
            debug!(address, "mock stop finder has no fixture, returning no matches");
            return Ok(Vec::new());
        };

        if !entry.delay.is_zero() {
            tokio::time::sleep(entry.delay).await;
        }

        entry
            .outcome
            .map_err(|message| StopFinderError::Mock { message })
    }
}
