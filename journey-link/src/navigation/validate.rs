//! Form validation for the navigation request.
//!
//! [`validate_navigation`] gates deep-link construction: it checks the whole
//! form in one pass and reports at most one message per field. The single
//! field validators give inline feedback while the user is still typing and
//! are more forgiving about empty values.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;

use crate::domain::{ClockTime, Stop, parse_lenient_date};

/// User-facing validation messages.
pub mod messages {
    pub const ADDRESS_REQUIRED: &str = "Bitte geben Sie eine Startadresse ein";
    pub const DATE_REQUIRED: &str = "Bitte wählen Sie ein Datum";
    pub const DATE_INVALID: &str = "Bitte geben Sie ein gültiges Datum ein";
    pub const TIME_REQUIRED: &str = "Bitte wählen Sie eine Uhrzeit";
    pub const TIME_INVALID: &str = "Bitte geben Sie eine gültige Zeit im Format HH:MM ein";
    pub const STOP_NOT_SELECTED: &str = "Bitte wählen Sie eine Haltestelle aus der Liste";

    pub const FIELD_ADDRESS_REQUIRED: &str = "Bitte geben Sie eine Adresse ein";
    pub const FIELD_ADDRESS_TOO_SHORT: &str = "Die Adresse muss mindestens 3 Zeichen lang sein";
}

/// A validated form field.
///
/// The declaration order is the reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    FromAddress,
    Date,
    Time,
}

impl Field {
    /// The field's name as used by the UI layer.
    pub fn name(&self) -> &'static str {
        match self {
            Field::FromAddress => "fromAddress",
            Field::Date => "date",
            Field::Time => "time",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Contents of the navigation form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    /// Travel date as typed, ideally `YYYY-MM-DD`
    pub date: String,

    /// Departure time as typed, `H:MM` or `HH:MM`
    pub time: String,

    /// Free-text start address
    pub from_address: String,

    /// Stop picked from the candidate list
    pub selected_stop: Option<Stop>,
}

/// Outcome of validating the navigation form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    /// True iff `errors` is empty
    pub is_valid: bool,

    /// At most one message per field, iterated in reporting order
    pub errors: BTreeMap<Field, &'static str>,

    /// Message of the first field with an error, or empty
    pub first_error: &'static str,
}

impl ValidationResult {
    fn from_errors(errors: BTreeMap<Field, &'static str>) -> Self {
        let first_error = errors.values().next().copied().unwrap_or("");
        Self {
            is_valid: errors.is_empty(),
            errors,
            first_error,
        }
    }

    /// Message for a single field, if it failed.
    pub fn error(&self, field: Field) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }
}

/// A form that passed validation, with its values parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationRequest {
    pub origin: Stop,
    pub date: NaiveDate,
    pub time: ClockTime,
}

/// Validate the navigation form.
///
/// All rules run, so every failing field is reported at once. A missing
/// stop selection is reported under `fromAddress` and replaces an empty
/// address message there.
pub fn validate_navigation(form: &FormState) -> ValidationResult {
    match check_navigation(form) {
        Ok(_) => ValidationResult::from_errors(BTreeMap::new()),
        Err(result) => result,
    }
}

/// Validate the navigation form and parse it into a request.
pub fn check_navigation(form: &FormState) -> Result<NavigationRequest, ValidationResult> {
    let mut errors = BTreeMap::new();

    if form.from_address.trim().is_empty() {
        errors.insert(Field::FromAddress, messages::ADDRESS_REQUIRED);
    }

    let date = if form.date.trim().is_empty() {
        errors.insert(Field::Date, messages::DATE_REQUIRED);
        None
    } else {
        let parsed = parse_lenient_date(&form.date);
        if parsed.is_none() {
            errors.insert(Field::Date, messages::DATE_INVALID);
        }
        parsed
    };

    let time = if form.time.trim().is_empty() {
        errors.insert(Field::Time, messages::TIME_REQUIRED);
        None
    } else {
        let parsed = ClockTime::parse(&form.time).ok();
        if parsed.is_none() {
            errors.insert(Field::Time, messages::TIME_INVALID);
        }
        parsed
    };

    if form.selected_stop.is_none() {
        errors.insert(Field::FromAddress, messages::STOP_NOT_SELECTED);
    }

    // Every missing value above recorded an error, so an empty map means
    // all three are present.
    match (date, time, &form.selected_stop) {
        (Some(date), Some(time), Some(origin)) if errors.is_empty() => Ok(NavigationRequest {
            origin: origin.clone(),
            date,
            time,
        }),
        _ => Err(ValidationResult::from_errors(errors)),
    }
}

/// Inline check of the address field: required, at least 3 characters.
pub fn validate_address(address: &str) -> Result<(), &'static str> {
    let trimmed = address.trim();
    if trimmed.is_empty() {
        return Err(messages::FIELD_ADDRESS_REQUIRED);
    }
    if trimmed.chars().count() < 3 {
        return Err(messages::FIELD_ADDRESS_TOO_SHORT);
    }
    Ok(())
}

/// Inline check of the date field. Empty is fine until submission.
pub fn validate_date(date: &str) -> Result<(), &'static str> {
    if date.trim().is_empty() || parse_lenient_date(date).is_some() {
        Ok(())
    } else {
        Err(messages::DATE_INVALID)
    }
}

/// Inline check of the time field. Empty is fine until submission.
pub fn validate_time(time: &str) -> Result<(), &'static str> {
    if time.trim().is_empty() || ClockTime::parse(time).is_ok() {
        Ok(())
    } else {
        Err(messages::TIME_INVALID)
    }
}
