//! Navigation form: validation, destination context and deep links.
//!
//! Validation and link building are pure. [`NavigationForm`] is the one
//! stateful piece, tying the form to the debounced stop search and the
//! session's destination.

mod deeplink;
mod form;
mod session;
mod validate;

pub use deeplink::{DeepLink, DeepLinkBuilder, DeepLinkConfig, format_link_date};
pub use form::NavigationForm;
pub use session::{DEFAULT_DESTINATION_ADDRESS, SessionContext, SessionError};
pub use validate::{
    Field, FormState, NavigationRequest, ValidationResult, check_navigation, messages,
    validate_address, validate_date, validate_navigation, validate_time,
};
