//! Session-wide destination context.

use tracing::info;

use crate::domain::{Stop, StopId};
use crate::stopfinder::{StopFinder, StopFinderError, select_best_stop};

/// Destination used when none is configured.
pub const DEFAULT_DESTINATION_ADDRESS: &str = "Mergelteichstraße 80, 44225 Dortmund";

/// Errors from resolving the destination at startup.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Stop-finder lookup failed
    #[error("destination lookup failed: {0}")]
    Lookup(#[from] StopFinderError),

    /// The address matched no stops
    #[error("no stops found for destination address {address:?}")]
    NoCandidates { address: String },
}

/// The fixed destination of every link built in this session.
///
/// Only obtainable by resolving the destination address, so holding one
/// means the destination id is known.
#[derive(Debug, Clone)]
pub struct SessionContext {
    destination_address: String,
    destination: Stop,
}

impl SessionContext {
    /// Resolve `address` to its best stop.
    pub async fn initialize<F: StopFinder>(
        finder: &F,
        address: &str,
    ) -> Result<Self, SessionError> {
        let candidates = finder.find(address).await?;

        if candidates.is_empty() {
            return Err(SessionError::NoCandidates {
                address: address.to_string(),
            });
        }

        let destination = select_best_stop(&candidates).clone();
        info!(
            address,
            candidates = candidates.len(),
            stop = %destination,
            id = %destination.id,
            "resolved destination"
        );

        Ok(Self {
            destination_address: address.to_string(),
            destination,
        })
    }

    /// The address the destination was resolved from.
    pub fn destination_address(&self) -> &str {
        &self.destination_address
    }

    /// The resolved destination stop.
    pub fn destination(&self) -> &Stop {
        &self.destination
    }

    /// Id of the resolved destination stop.
    pub fn destination_id(&self) -> &StopId {
        &self.destination.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coord;
    use crate::stopfinder::MockStopFinder;

    fn stop(id: &str, quality: u32) -> Stop {
        Stop::new(StopId::new(id).unwrap(), id, Coord::new(51.48, 7.49)).with_match_quality(quality)
    }

    #[tokio::test]
    async fn resolves_best_candidate() {
        let finder = MockStopFinder::new().with_stops(
            DEFAULT_DESTINATION_ADDRESS,
            vec![stop("street", 700), stop("de:05913:2004", 950)],
        );

        let session = SessionContext::initialize(&finder, DEFAULT_DESTINATION_ADDRESS)
            .await
            .unwrap();

        assert_eq!(session.destination_id().as_str(), "de:05913:2004");
        assert_eq!(session.destination_address(), DEFAULT_DESTINATION_ADDRESS);
        assert_eq!(finder.calls().len(), 1);
    }

    #[tokio::test]
    async fn no_candidates_is_an_error() {
        let finder = MockStopFinder::new();
        let err = SessionContext::initialize(&finder, "Nowhere 1")
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::NoCandidates { .. }));
        assert_eq!(
            err.to_string(),
            "no stops found for destination address \"Nowhere 1\""
        );
    }

    #[tokio::test]
    async fn lookup_failure_is_an_error() {
        let finder = MockStopFinder::new().with_failure(DEFAULT_DESTINATION_ADDRESS, "timeout");
        let err = SessionContext::initialize(&finder, DEFAULT_DESTINATION_ADDRESS)
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::Lookup(_)));
    }
}
