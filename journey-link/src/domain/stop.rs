//! Transit stop types.

use std::fmt;

/// Error returned when constructing an invalid stop id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid stop id: {reason}")]
pub struct InvalidStopId {
    reason: &'static str,
}

/// An opaque stop identifier assigned by the stop-finder service.
///
/// The only validation is that the id must contain something other than
/// whitespace. Deep links are never built from an empty id because this type
/// cannot hold one.
///
/// # Examples
///
/// ```
/// use journey_link::domain::StopId;
///
/// let id = StopId::new("de:05913:2004").unwrap();
/// assert_eq!(id.as_str(), "de:05913:2004");
///
/// assert!(StopId::new("").is_err());
/// assert!(StopId::new("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct StopId(String);

impl StopId {
    /// Create a stop id, rejecting blank input.
    pub fn new(s: impl Into<String>) -> Result<Self, InvalidStopId> {
        let s = s.into();
        if s.trim().is_empty() {
            return Err(InvalidStopId {
                reason: "stop id cannot be empty",
            });
        }
        Ok(StopId(s))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the StopId and returns the inner String.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.0)
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A WGS84 latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

impl Coord {
    /// Create a coordinate from latitude and longitude in degrees.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lon)
    }
}

/// A candidate stop returned by the stop finder.
///
/// Besides the identifying data, a stop carries the ranking hints the
/// upstream service attached to it. They are only consulted when picking
/// a single best stop.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    /// Service-assigned identifier
    pub id: StopId,

    /// Display name
    pub name: String,

    /// Location of the stop
    pub coord: Coord,

    /// Service match score for the query, higher is better
    pub match_quality: Option<u32>,

    /// Whether the service flagged this as its best match
    pub is_best: bool,
}

impl Stop {
    /// Create a stop without ranking hints.
    pub fn new(id: StopId, name: impl Into<String>, coord: Coord) -> Self {
        Self {
            id,
            name: name.into(),
            coord,
            match_quality: None,
            is_best: false,
        }
    }

    /// Attach the service's match score.
    pub fn with_match_quality(mut self, quality: u32) -> Self {
        self.match_quality = Some(quality);
        self
    }

    /// Mark this stop as the service's best match.
    pub fn with_best(mut self, is_best: bool) -> Self {
        self.is_best = is_best;
        self
    }
}

impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.name, self.coord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_id_accepts_opaque_values() {
        assert!(StopId::new("de:05913:2004").is_ok());
        assert!(StopId::new("20002004").is_ok());
        assert!(StopId::new("streetID:1500000851::5913000:-1").is_ok());
    }

    #[test]
    fn stop_id_rejects_blank() {
        assert!(StopId::new("").is_err());
        assert!(StopId::new(" \t").is_err());
    }

    #[test]
    fn stop_id_display_and_debug() {
        let id = StopId::new("A1").unwrap();
        assert_eq!(id.to_string(), "A1");
        assert_eq!(format!("{:?}", id), "StopId(A1)");
        assert_eq!(id.into_inner(), "A1".to_string());
    }

    #[test]
    fn stop_display_matches_destination_banner() {
        let stop = Stop::new(
            StopId::new("de:05913:2004").unwrap(),
            "Dortmund, Mergelteichstraße",
            Coord::new(51.4815, 7.4873),
        );
        assert_eq!(
            stop.to_string(),
            "Dortmund, Mergelteichstraße - (51.4815, 7.4873)"
        );
    }

    #[test]
    fn builders_set_hints() {
        let stop = Stop::new(StopId::new("X").unwrap(), "X", Coord::new(0.0, 0.0))
            .with_match_quality(900)
            .with_best(true);
        assert_eq!(stop.match_quality, Some(900));
        assert!(stop.is_best);
    }
}
