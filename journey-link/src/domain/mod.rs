//! Domain types for the journey link planner.
//!
//! Values here are validated at construction, so code receiving a
//! `StopId` or `ClockTime` can trust it without re-checking.

mod stop;
mod time;

pub use stop::{Coord, InvalidStopId, Stop, StopId};
pub use time::{ClockTime, TimeError, parse_lenient_date};
