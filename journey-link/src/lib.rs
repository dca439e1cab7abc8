//! Journey deep-link builder.
//!
//! Resolves a typed start address to a public-transport stop through an
//! EFA stop finder, validates the travel date and time, and builds a
//! journey-planner link from the chosen stop to a fixed destination.

pub mod config;
pub mod console;
pub mod domain;
pub mod navigation;
pub mod search;
pub mod stopfinder;
