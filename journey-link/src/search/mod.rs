//! Incremental stop search driven by address input.

mod debounce;

pub use debounce::{DEFAULT_QUIET_PERIOD, SearchDebouncer, SearchState};
