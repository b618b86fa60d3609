//! Editable single-field text buffer for the interactive form.
//!
//! The text lives in a rope. The cursor is a char index in `0..=len`, and
//! `offset` is the first char shown when the field is wider than its window.

use std::fmt;

use ropey::Rope;

/// Shown in place of a newline when a field is drawn on one row.
pub const NEWLINE_GLYPH: char = '\u{21b5}';

#[derive(Debug, Clone, Default)]
pub struct Field {
    rope: Rope,
    cursor: usize,
    offset: usize,
}

impl Field {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replace the whole text, moving the cursor to the end.
    pub fn set_text(&mut self, s: &str) {
        *self = Self::from(s);
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }

    pub fn insert_char(&mut self, ch: char) {
        self.rope.insert_char(self.cursor, ch);
        self.cursor += 1;
    }

    pub fn insert_str(&mut self, s: &str) {
        self.rope.insert(self.cursor, s);
        self.cursor += s.chars().count();
    }

    /// Delete the char before the cursor. Returns false at the start.
    pub fn delete_backward(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.rope.remove(self.cursor - 1..self.cursor);
        self.cursor -= 1;
        true
    }

    /// Delete the char under the cursor. Returns false at the end.
    pub fn delete_forward(&mut self) -> bool {
        if self.cursor >= self.rope.len_chars() {
            return false;
        }
        self.rope.remove(self.cursor..self.cursor + 1);
        true
    }

    pub fn move_left(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    pub fn move_right(&mut self) -> bool {
        if self.cursor >= self.rope.len_chars() {
            return false;
        }
        self.cursor += 1;
        true
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.rope.len_chars();
    }

    /// Slide the window so the cursor is visible within `width` columns,
    /// keeping a small margin of context where possible.
    pub fn fixup(&mut self, width: usize) {
        if width == 0 {
            self.offset = self.cursor;
            return;
        }
        let margin = 4usize.min(width / 4);
        if self.cursor < self.offset + margin {
            self.offset = self.cursor.saturating_sub(margin);
        } else if self.cursor + margin >= self.offset + width {
            self.offset = (self.cursor + margin + 1).saturating_sub(width);
        }
    }

    /// The visible part of the field, newlines shown as [`NEWLINE_GLYPH`].
    pub fn window(&self, width: usize) -> String {
        let start = self.offset.min(self.rope.len_chars());
        self.rope
            .slice(start..)
            .chars()
            .take(width)
            .map(|ch| if ch == '\n' { NEWLINE_GLYPH } else { ch })
            .collect()
    }

    /// Column of the cursor within the window.
    pub fn cursor_column(&self) -> usize {
        self.cursor.saturating_sub(self.offset)
    }
}

/// A field holding `s`, with the cursor at the end.
impl From<&str> for Field {
    fn from(s: &str) -> Self {
        let rope = Rope::from_str(s);
        let cursor = rope.len_chars();
        Self {
            rope,
            cursor,
            offset: 0,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rope)
    }
}
