//! Stop-finder response DTOs.
//!
//! These map the `rapidJSON` output of an EFA `XML_STOPFINDER_REQUEST`.
//! Everything is optional because the service omits fields freely and
//! returns no `locations` key at all when nothing matched.

use serde::Deserialize;

/// Top-level stop-finder response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopFinderResponse {
    /// Matched locations, best-ranked first.
    #[serde(default)]
    pub locations: Option<Vec<LocationDto>>,
}

/// A single matched location.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationDto {
    /// Service identifier, e.g. `de:05913:2004`.
    pub id: Option<String>,

    /// Full display name including the locality.
    pub name: Option<String>,

    /// Name without the locality prefix.
    pub disassembled_name: Option<String>,

    /// Location type, e.g. `stop`, `street`, `singlehouse`.
    #[serde(rename = "type")]
    pub kind: Option<String>,

    /// `[lat, lon]` in the requested coordinate format.
    pub coord: Option<Vec<f64>>,

    /// Match score for the query, higher is better.
    pub match_quality: Option<u32>,

    /// Set on the service's own pick among the matches.
    #[serde(default)]
    pub is_best: bool,
}
