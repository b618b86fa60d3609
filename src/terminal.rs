//! Terminal abstraction layer.
//!
//! Provides a `Terminal` trait for screen-mode I/O and two implementations:
//! - `CrosstermTerminal` for real terminal interaction
//! - `MockTerminal` for testing

use std::io::Write;

use anyhow::Result;
use base64::Engine as _;
use crossterm::event::{Event, KeyEvent, KeyEventKind};
use crossterm::style::{Color, ResetColor, SetForegroundColor};

use crate::cell_buffer::Tone;

/// Terminal dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermSize {
    pub width: u16,
    pub height: u16,
}

/// Abstraction over terminal operations.
pub trait Terminal {
    /// Enter raw mode and prepare the terminal.
    fn init(&mut self) -> Result<()>;

    /// Restore the terminal to its original state.
    fn cleanup(&mut self) -> Result<()>;

    /// Get the current terminal dimensions.
    fn size(&self) -> TermSize;

    /// Move the cursor to (col, row), both 0-based.
    fn move_cursor(&mut self, col: u16, row: u16);

    /// Write a string at the current cursor position.
    fn write_str(&mut self, s: &str);

    /// Clear the entire screen.
    fn clear_screen(&mut self);

    /// Colour subsequent writes.
    fn set_tone(&mut self, tone: Tone);

    /// Sound the terminal bell.
    fn beep(&mut self);

    /// Flush output to the terminal.
    fn flush(&mut self);

    /// Block until a key event is received.
    fn read_key(&mut self) -> Result<KeyEvent>;

    /// Place `text` on the system clipboard.
    fn copy_to_clipboard(&mut self, text: &str);
}

/// OSC 52 "set clipboard" sequence carrying `text`.
pub fn osc52(text: &str) -> String {
    let payload = base64::engine::general_purpose::STANDARD.encode(text);
    format!("\x1b]52;c;{payload}\x07")
}

fn tone_color(tone: Tone) -> Option<Color> {
    match tone {
        Tone::Plain => None,
        Tone::Dim => Some(Color::DarkGrey),
        Tone::Good => Some(Color::Green),
        Tone::Bad => Some(Color::Red),
        Tone::Accent => Some(Color::Cyan),
    }
}

/// Real terminal using crossterm.
pub struct CrosstermTerminal {
    size: TermSize,
    cursor_visible: bool,
}

impl Default for CrosstermTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl CrosstermTerminal {
    pub fn new() -> Self {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        Self {
            size: TermSize {
                width: w,
                height: h,
            },
            cursor_visible: true,
        }
    }

    fn cursor(&mut self, show: bool) {
        if show && !self.cursor_visible {
            crossterm::execute!(std::io::stdout(), crossterm::cursor::Show).ok();
            self.cursor_visible = true;
        } else if !show && self.cursor_visible {
            crossterm::execute!(std::io::stdout(), crossterm::cursor::Hide).ok();
            self.cursor_visible = false;
        }
    }
}

impl Terminal for CrosstermTerminal {
    fn init(&mut self) -> Result<()> {
        crossterm::terminal::enable_raw_mode()?;
        crossterm::execute!(std::io::stdout(), crossterm::terminal::EnterAlternateScreen)?;
        self.cursor(false);
        let (w, h) = crossterm::terminal::size()?;
        self.size = TermSize {
            width: w,
            height: h,
        };
        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        crossterm::execute!(
            std::io::stdout(),
            ResetColor,
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::cursor::Show
        )?;
        crossterm::terminal::disable_raw_mode()?;
        Ok(())
    }

    fn size(&self) -> TermSize {
        self.size
    }

    fn move_cursor(&mut self, col: u16, row: u16) {
        crossterm::queue!(std::io::stdout(), crossterm::cursor::MoveTo(col, row)).ok();
    }

    fn write_str(&mut self, s: &str) {
        // Hide while drawing so the cursor does not flicker across the form.
        self.cursor(false);
        crossterm::queue!(std::io::stdout(), crossterm::style::Print(s)).ok();
    }

    fn clear_screen(&mut self) {
        crossterm::queue!(
            std::io::stdout(),
            crossterm::terminal::Clear(crossterm::terminal::ClearType::All)
        )
        .ok();
    }

    fn set_tone(&mut self, tone: Tone) {
        match tone_color(tone) {
            Some(color) => crossterm::queue!(std::io::stdout(), SetForegroundColor(color)).ok(),
            None => crossterm::queue!(std::io::stdout(), ResetColor).ok(),
        };
    }

    fn beep(&mut self) {
        crossterm::execute!(std::io::stdout(), crossterm::style::Print('\x07')).ok();
    }

    fn flush(&mut self) {
        std::io::stdout().flush().ok();
    }

    fn read_key(&mut self) -> Result<KeyEvent> {
        self.cursor(true);
        loop {
            match crossterm::event::read()? {
                // Windows reports releases too.
                Event::Key(key) if key.kind != KeyEventKind::Release => return Ok(key),
                Event::Resize(w, h) => {
                    self.size = TermSize {
                        width: w,
                        height: h,
                    };
                    // Resize events are returned as a special key
                    return Ok(KeyEvent::new(
                        crossterm::event::KeyCode::F(63),
                        crossterm::event::KeyModifiers::NONE,
                    ));
                }
                _ => {} // Ignore mouse events etc.
            }
        }
    }

    fn copy_to_clipboard(&mut self, text: &str) {
        crossterm::execute!(std::io::stdout(), crossterm::style::Print(osc52(text))).ok();
    }
}

/// Mock terminal for testing, records all operations.
#[cfg(test)]
pub struct MockTerminal {
    pub size: TermSize,
    pub cursor_col: u16,
    pub cursor_row: u16,
    pub ops: Vec<MockOp>,
    pub key_queue: Vec<KeyEvent>,
    pub clipboard: Option<String>,
}

#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub enum MockOp {
    Init,
    Cleanup,
    MoveCursor(u16, u16),
    WriteStr(String),
    ClearScreen,
    SetTone(Tone),
    Beep,
    Flush,
    CopyToClipboard(String),
}

#[cfg(test)]
impl MockTerminal {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            size: TermSize { width, height },
            cursor_col: 0,
            cursor_row: 0,
            ops: Vec::new(),
            key_queue: Vec::new(),
            clipboard: None,
        }
    }

    pub fn push_key(&mut self, key: KeyEvent) {
        self.key_queue.push(key);
    }
}

#[cfg(test)]
impl Terminal for MockTerminal {
    fn init(&mut self) -> Result<()> {
        self.ops.push(MockOp::Init);
        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        self.ops.push(MockOp::Cleanup);
        Ok(())
    }

    fn size(&self) -> TermSize {
        self.size
    }

    fn move_cursor(&mut self, col: u16, row: u16) {
        self.cursor_col = col;
        self.cursor_row = row;
        self.ops.push(MockOp::MoveCursor(col, row));
    }

    fn write_str(&mut self, s: &str) {
        self.ops.push(MockOp::WriteStr(s.to_string()));
    }

    fn clear_screen(&mut self) {
        self.ops.push(MockOp::ClearScreen);
    }

    fn set_tone(&mut self, tone: Tone) {
        self.ops.push(MockOp::SetTone(tone));
    }

    fn beep(&mut self) {
        self.ops.push(MockOp::Beep);
    }

    fn flush(&mut self) {
        self.ops.push(MockOp::Flush);
    }

    fn read_key(&mut self) -> Result<KeyEvent> {
        if self.key_queue.is_empty() {
            anyhow::bail!("No more keys in mock queue");
        }
        Ok(self.key_queue.remove(0))
    }

    fn copy_to_clipboard(&mut self, text: &str) {
        self.clipboard = Some(text.to_string());
        self.ops.push(MockOp::CopyToClipboard(text.to_string()));
    }
}
