//! Line-oriented terminal front-end.
//!
//! Stands in for a browser form: each input line is one user action, and
//! the render functions turn candidate lists and validation reports into
//! text.

use std::fmt::Write;

use crate::navigation::{FormState, ValidationResult};
use crate::search::SearchState;

/// A user action read from one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace the address field's text
    Address(String),
    /// Select a candidate, 1-based as displayed
    Pick(usize),
    Date(String),
    Time(String),
    /// Validate and build the link
    Go,
    /// Print the form
    Show,
    Help,
    Quit,
}

/// Usage text for the console.
pub const HELP: &str = "\
Commands:
  from <address>   type a start address (searches after a short pause)
  pick <n>         choose candidate n from the list
  date <YYYY-MM-DD>
  time <HH:MM>
  go               validate and print the deep link
  show             print the form
  help             this text
  quit";

/// Parse one input line.
///
/// The argument keeps its inner spacing; only the separator after the
/// keyword is dropped.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim_start();
    let (keyword, arg) = match line.split_once(char::is_whitespace) {
        Some((keyword, arg)) => (keyword, arg.trim_end()),
        None => (line.trim_end(), ""),
    };

    match keyword.to_lowercase().as_str() {
        "from" => Ok(Command::Address(arg.to_string())),
        "date" => Ok(Command::Date(arg.to_string())),
        "time" => Ok(Command::Time(arg.to_string())),
        "pick" => match arg.trim().parse::<usize>() {
            Ok(n) if n >= 1 => Ok(Command::Pick(n)),
            _ => Err(format!("pick needs a candidate number, got {:?}", arg)),
        },
        "go" => Ok(Command::Go),
        "show" => Ok(Command::Show),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        "" => Err("empty command".to_string()),
        other => Err(format!("unknown command {:?}, try \"help\"", other)),
    }
}

/// Render the candidate list or its status line.
pub fn render_candidates(state: &SearchState) -> String {
    if let Some(message) = state.message() {
        return message.to_string();
    }

    let mut out = String::new();
    for (i, stop) in state.stops().iter().enumerate() {
        let _ = writeln!(out, "  [{}] {}", i + 1, stop);
    }
    out.trim_end().to_string()
}

/// Render a failed validation, one line per field.
pub fn render_errors(result: &ValidationResult) -> String {
    result
        .errors
        .iter()
        .map(|(field, message)| format!("  {}: {}", field, message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the form contents.
pub fn render_form(form: &FormState) -> String {
    let selected = form
        .selected_stop
        .as_ref()
        .map(|s| format!("{} ({})", s.name, s.id))
        .unwrap_or_else(|| "-".to_string());

    format!(
        "  from: {}\n  stop: {}\n  date: {}\n  time: {}",
        form.from_address, selected, form.date, form.time
    )
}
