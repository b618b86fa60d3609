//! Plain-text rendering of a session, shared by batch mode and the screen.

use std::fmt::Write;

use crate::presets::{self, PRESETS};
use crate::session::Session;
use crate::validation::Status;

/// One-line wording of the pass/fail indicator.
pub fn status_message(session: &Session) -> &'static str {
    match session.status() {
        Status::Matches => "VALID - Text matches the pattern",
        Status::DoesNotMatch => "INVALID - Text does not match the pattern",
        Status::Unknown if session.pattern().is_empty() => "Enter a regex pattern",
        Status::Unknown if !session.validation().pattern_valid() => "Fix the pattern to validate",
        Status::Unknown => "Enter text to validate",
    }
}

/// The full batch report.
pub fn render(session: &Session) -> String {
    let mut out = String::new();
    let validity = if session.validation().pattern_valid() {
        "yes"
    } else {
        "no"
    };
    // Writing to a String cannot fail.
    let _ = writeln!(out, "Pattern:     /{}/{}", session.pattern(), session.modifiers());
    let _ = writeln!(out, "Valid:       {validity}");
    if let Some(error) = session.validation().compile_error() {
        for (i, line) in error.lines().enumerate() {
            let label = if i == 0 { "Error:" } else { "" };
            let _ = writeln!(out, "{label:<13}{line}");
        }
    }
    let _ = writeln!(out, "Explanation: {}", session.explanation());
    let _ = writeln!(out, "Result:      {}", status_message(session));
    out
}

/// The preset library as a table: slug, name, pattern.
pub fn render_presets() -> String {
    let mut out = String::new();
    for preset in PRESETS {
        let slug = presets::slug_of(preset).unwrap_or("-");
        let _ = writeln!(out, "{slug:<6} {:<18} {}", preset.name, preset.pattern);
    }
    out
}
