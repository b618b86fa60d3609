//! Key bindings for the interactive form.
//!
//! Maps crossterm KeyEvents to form actions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::options::MatchOption;

/// An action resulting from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    /// Insert a character at the cursor of the focused field.
    InsertChar(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    /// Move focus to the next field.
    NextField,
    /// Move focus to the previous field.
    PrevField,
    /// Newline in the sample, next field from the pattern.
    Enter,
    ToggleOption(MatchOption),
    /// Load the next preset into the pattern.
    CyclePreset,
    /// Copy `/pattern/modifiers` to the clipboard.
    Copy,
    Reset,
    Quit,
    /// Terminal was resized.
    Resize,
    /// No action (ignore the key).
    Ignore,
}

/// Resolve a KeyEvent to a FormAction.
pub fn resolve_key(key: KeyEvent) -> FormAction {
    // F63 is our resize sentinel from CrosstermTerminal
    if key.code == KeyCode::F(63) && key.modifiers == KeyModifiers::NONE {
        return FormAction::Resize;
    }

    // Ctrl combinations
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('q') => FormAction::Quit,
            KeyCode::Char('y') => FormAction::Copy,
            KeyCode::Char('r') => FormAction::Reset,
            _ => FormAction::Ignore,
        };
    }

    match key.code {
        KeyCode::Left => FormAction::Left,
        KeyCode::Right => FormAction::Right,
        KeyCode::Home => FormAction::Home,
        KeyCode::End => FormAction::End,

        KeyCode::Backspace => FormAction::Backspace,
        KeyCode::Delete => FormAction::Delete,
        KeyCode::Enter => FormAction::Enter,
        KeyCode::Tab | KeyCode::Down => FormAction::NextField,
        KeyCode::BackTab | KeyCode::Up => FormAction::PrevField,

        // F1..F6 follow the canonical option order.
        KeyCode::F(n @ 1..=6) => MatchOption::ALL
            .get(usize::from(n) - 1)
            .map_or(FormAction::Ignore, |&option| FormAction::ToggleOption(option)),
        KeyCode::F(7) => FormAction::CyclePreset,

        KeyCode::Esc => FormAction::Quit,

        // Printable characters
        KeyCode::Char(ch) => FormAction::InsertChar(ch),

        _ => FormAction::Ignore,
    }
}
