//! Conversion from stop-finder DTOs to domain types.

use tracing::debug;

use crate::domain::{Coord, Stop, StopId};

use super::error::StopFinderError;
use super::types::{LocationDto, StopFinderResponse};

/// Parse a raw response body into stops.
///
/// A body that is not a stop-finder payload is an error; a payload without
/// locations is an empty result.
pub fn parse_response(body: &str) -> Result<Vec<Stop>, StopFinderError> {
    let response: StopFinderResponse =
        serde_json::from_str(body).map_err(|e| StopFinderError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })?;

    Ok(convert_response(response))
}

/// Convert a decoded response, keeping the service's ordering.
///
/// Locations without a usable id, name or two-component coordinate are
/// skipped rather than failing the whole lookup.
pub fn convert_response(response: StopFinderResponse) -> Vec<Stop> {
    response
        .locations
        .unwrap_or_default()
        .into_iter()
        .filter_map(|location| {
            let label = location.id.clone().unwrap_or_default();
            let stop = convert_location(location);
            if stop.is_none() {
                debug!(id = %label, "skipping incomplete stop-finder location");
            }
            stop
        })
        .collect()
}

/// Convert a single location, returning `None` if required data is missing.
pub fn convert_location(location: LocationDto) -> Option<Stop> {
    let id = StopId::new(location.id?).ok()?;

    let name = location
        .name
        .filter(|n| !n.trim().is_empty())
        .or(location.disassembled_name)
        .filter(|n| !n.trim().is_empty())?;

    let coord = match location.coord.as_deref() {
        Some(&[lat, lon]) if lat.is_finite() && lon.is_finite() => Coord::new(lat, lon),
        _ => return None,
    };

    let mut stop = Stop::new(id, name, coord).with_best(location.is_best);
    stop.match_quality = location.match_quality;
    Some(stop)
}
