//! Screen rendering for interactive mode.
//!
//! The Screen lays the session out as a form and uses a Terminal to show it.
//! It uses a double-buffered cell grid: render into `next`, diff against
//! `current`, emit only changed cells, then swap.

use crate::cell_buffer::{CellBuffer, Tone};
use crate::options::MatchOption;
use crate::presets::PRESETS;
use crate::report::status_message;
use crate::session::{Input, Session};
use crate::terminal::{TermSize, Terminal};
use crate::validation::Status;

const TITLE: &str = "Regex Validator";
const HELP: &str = "Tab field  F1-F6 options  F7 preset  ^Y copy  ^R reset  ^Q quit";

/// Column where field labels start, after the focus marker.
const LABEL_COL: usize = 2;
/// Column where the pattern's opening slash and the sample text start.
const FIELD_COL: usize = 11;
/// Rows of explanation shown before it is cut off.
const EXPLANATION_ROWS: usize = 3;
/// Compile error lines shown before they are cut off.
const ERROR_ROWS: usize = 4;

/// Form state owned by the app rather than the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub focus: Input,
    /// Index into the preset library of the last preset applied.
    pub preset: Option<usize>,
    /// One-shot note shown above the key help.
    pub message: Option<String>,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            focus: Input::Pattern,
            preset: None,
            message: None,
        }
    }
}

/// Manages screen rendering.
pub struct Screen {
    /// What is currently on the terminal screen.
    current: CellBuffer,
    /// What we are rendering into before diffing.
    next: CellBuffer,
}

impl Screen {
    pub fn new(term_size: TermSize) -> Self {
        let height = term_size.height as usize;
        let width = term_size.width as usize;
        Self {
            current: CellBuffer::new(width, height),
            next: CellBuffer::new(width, height),
        }
    }

    /// Resize the screen (e.g. on terminal resize).
    pub fn resize(&mut self, term_size: TermSize) {
        let height = term_size.height as usize;
        let width = term_size.width as usize;
        self.current.resize(width, height);
        self.next.resize(width, height);
    }

    /// Invalidate the screen, forcing a full redraw on next diff.
    /// The caller clears the terminal to match.
    pub fn invalidate(&mut self) {
        self.current.clear();
    }

    /// Render the form, emit the changes and park the cursor in the focused field.
    pub fn render(
        &mut self,
        session: &mut Session,
        state: &FormState,
        terminal: &mut dyn Terminal,
    ) {
        let width = self.next.width();
        let pattern_width = width
            .saturating_sub(FIELD_COL + 1 + session.modifiers().as_str().len() + 2)
            .max(1);
        let sample_width = width.saturating_sub(FIELD_COL).max(1);
        session.scroll_into_view(Input::Pattern, pattern_width);
        session.scroll_into_view(Input::Sample, sample_width);

        self.next.clear();
        let (pattern_row, sample_row) = self.layout(session, state, pattern_width, sample_width);

        CellBuffer::diff(&self.current, &self.next, terminal);
        std::mem::swap(&mut self.current, &mut self.next);

        let (row, col) = match state.focus {
            Input::Pattern => (
                pattern_row,
                FIELD_COL + 1 + session.field(Input::Pattern).cursor_column(),
            ),
            Input::Sample => (
                sample_row,
                FIELD_COL + session.field(Input::Sample).cursor_column(),
            ),
        };
        let last_row = self.current.height().saturating_sub(1);
        let last_col = width.saturating_sub(1);
        terminal.move_cursor(col.min(last_col) as u16, row.min(last_row) as u16);
        terminal.flush();
    }

    /// Write the whole form into `next`. Returns the pattern and sample rows.
    fn layout(
        &mut self,
        session: &Session,
        state: &FormState,
        pattern_width: usize,
        sample_width: usize,
    ) -> (usize, usize) {
        let width = self.next.width();
        let buf = &mut self.next;
        let mut row = 0;

        buf.write_str(0, row, TITLE, Tone::Accent);
        row += 2;

        // Pattern
        let pattern_row = row;
        focus_marker(buf, row, state.focus == Input::Pattern);
        buf.write_str(LABEL_COL, row, "Pattern:", Tone::Dim);
        let validation = session.validation();
        let body_tone = if session.pattern().is_empty() || validation.pattern_valid() {
            Tone::Plain
        } else {
            Tone::Bad
        };
        let mut col = buf.write_str(FIELD_COL, row, "/", Tone::Dim);
        col = buf.write_str(
            col,
            row,
            &session.field(Input::Pattern).window(pattern_width),
            body_tone,
        );
        col = buf.write_str(col, row, "/", Tone::Dim);
        col = buf.write_str(col, row, session.modifiers().as_str(), Tone::Accent);
        if !session.pattern().is_empty() {
            let (mark, tone) = if validation.pattern_valid() {
                ("\u{2713}", Tone::Good)
            } else {
                ("\u{2717}", Tone::Bad)
            };
            buf.write_str(col + 1, row, mark, tone);
        }
        row += 1;

        for line in wrap(session.explanation(), width.saturating_sub(FIELD_COL))
            .into_iter()
            .take(EXPLANATION_ROWS)
        {
            buf.write_str(FIELD_COL, row, &line, Tone::Dim);
            row += 1;
        }

        if let Some(error) = validation.compile_error() {
            for (i, line) in error.lines().take(ERROR_ROWS).enumerate() {
                if i == 0 {
                    buf.write_str(LABEL_COL, row, "Error:", Tone::Bad);
                }
                buf.write_str(FIELD_COL, row, line, Tone::Bad);
                row += 1;
            }
        }
        row += 1;

        // Options
        buf.write_str(LABEL_COL, row, "Options", Tone::Accent);
        row += 1;
        for (n, (option, on)) in session.options().iter().enumerate() {
            option_line(buf, row, n + 1, option, on);
            row += 1;
        }
        row += 1;

        // Sample
        let sample_row = row;
        focus_marker(buf, row, state.focus == Input::Sample);
        buf.write_str(LABEL_COL, row, "Sample:", Tone::Dim);
        buf.write_str(
            FIELD_COL,
            row,
            &session.field(Input::Sample).window(sample_width),
            Tone::Plain,
        );
        row += 1;

        let status_tone = match session.status() {
            Status::Matches => Tone::Good,
            Status::DoesNotMatch => Tone::Bad,
            Status::Unknown => Tone::Dim,
        };
        buf.write_str(FIELD_COL, row, status_message(session), status_tone);
        row += 2;

        // Presets
        buf.write_str(LABEL_COL, row, "Presets:", Tone::Dim);
        let mut col = FIELD_COL;
        for (i, preset) in PRESETS.iter().enumerate() {
            let tone = if state.preset == Some(i) {
                Tone::Accent
            } else {
                Tone::Plain
            };
            col = buf.write_str(col, row, preset.name, tone) + 2;
        }

        // Footer, anchored to the bottom rows.
        let height = buf.height();
        if let Some(message) = &state.message {
            buf.write_str(0, height.saturating_sub(2), message, Tone::Accent);
        }
        buf.write_str(0, height.saturating_sub(1), HELP, Tone::Dim);

        (pattern_row, sample_row)
    }

    /// Text of one on-screen row.
    #[cfg(test)]
    fn row_text(&self, row: usize) -> String {
        self.current.row_text(row).trim_end().to_string()
    }

    #[cfg(test)]
    fn find_row(&self, needle: &str) -> Option<usize> {
        (0..self.current.height()).find(|&row| self.row_text(row).contains(needle))
    }
}

fn focus_marker(buf: &mut CellBuffer, row: usize, focused: bool) {
    if focused {
        buf.write_str(0, row, ">", Tone::Accent);
    }
}

/// `F2 [x] i  Case Insensitive    Ignore case`
fn option_line(buf: &mut CellBuffer, row: usize, key: usize, option: MatchOption, on: bool) {
    let check = if on { "[x]" } else { "[ ]" };
    let mut col = buf.write_str(LABEL_COL, row, &format!("F{key}"), Tone::Dim);
    col = buf.write_str(col + 1, row, check, if on { Tone::Good } else { Tone::Plain });
    col = buf.write_str(col + 1, row, &option.code().to_string(), Tone::Accent);
    buf.write_str(col + 2, row, option.label(), Tone::Plain);
    buf.write_str(col + 2 + 18, row, option.description(), Tone::Dim);
}

/// Greedy word wrap. Words longer than `width` are left for the buffer to clip.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_len = 0;
    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if line_len > 0 && line_len + 1 + word_len > width {
            lines.push(std::mem::take(&mut line));
            line_len = 0;
        }
        if line_len > 0 {
            line.push(' ');
            line_len += 1;
        }
        line.push_str(word);
        line_len += word_len;
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
