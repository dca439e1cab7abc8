//! Stop lookup against an EFA stop-finder service.
//!
//! Turns a free-text address into candidate stops. The live client and the
//! fixture-backed mock both sit behind the [`StopFinder`] trait so the
//! search pipeline can run against either.

mod client;
mod convert;
mod error;
mod mock;
mod select;
mod types;

use std::future::Future;

use crate::domain::Stop;

pub use client::{StopFinderClient, StopFinderConfig};
pub use convert::{convert_location, convert_response, parse_response};
pub use error::StopFinderError;
pub use mock::MockStopFinder;
pub use select::select_best_stop;
pub use types::{LocationDto, StopFinderResponse};

/// Something that can resolve an address to candidate stops.
///
/// An empty result means nothing matched and is not an error.
pub trait StopFinder: Send + Sync {
    /// Look up stops for a non-empty address.
    fn find(
        &self,
        address: &str,
    ) -> impl Future<Output = Result<Vec<Stop>, StopFinderError>> + Send;
}
