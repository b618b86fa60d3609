//! Double-buffered cell grid for efficient screen rendering.
//!
//! The form is rendered into a "next" buffer, diffed cell-by-cell against the
//! "current" buffer, and only changed cells are emitted via the terminal.

use crate::terminal::Terminal;

/// How a cell is coloured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Plain,
    /// Labels, hints and descriptions.
    Dim,
    /// A pattern that compiles, a sample that matches.
    Good,
    /// Compile errors, a sample that does not match.
    Bad,
    /// Titles and the focused field marker.
    Accent,
}

/// A single screen cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub tone: Tone,
}

impl Default for Cell {
    fn default() -> Self {
        Cell {
            ch: ' ',
            tone: Tone::Plain,
        }
    }
}

impl Cell {
    pub fn plain(ch: char) -> Self {
        Cell {
            ch,
            tone: Tone::Plain,
        }
    }
}

/// A 2D grid of cells representing the terminal screen.
pub struct CellBuffer {
    cells: Vec<Cell>,
    width: usize,
    height: usize,
}

impl CellBuffer {
    /// Create a new buffer filled with spaces.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            cells: vec![Cell::default(); width * height],
            width,
            height,
        }
    }

    /// Resize the buffer, filling with spaces.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.cells = vec![Cell::default(); width * height];
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the cell at (col, row).
    pub fn get(&self, col: usize, row: usize) -> Cell {
        if col < self.width && row < self.height {
            self.cells[row * self.width + col]
        } else {
            Cell::default()
        }
    }

    /// Set the cell at (col, row).
    pub fn set(&mut self, col: usize, row: usize, cell: Cell) {
        if col < self.width && row < self.height {
            self.cells[row * self.width + col] = cell;
        }
    }

    /// Write a string starting at (col, row), clamped to width.
    /// Returns the column after the last char written.
    pub fn write_str(&mut self, col: usize, row: usize, s: &str, tone: Tone) -> usize {
        if row >= self.height {
            return col;
        }
        let mut c = col;
        for ch in s.chars() {
            if c >= self.width {
                break;
            }
            self.cells[row * self.width + c] = Cell { ch, tone };
            c += 1;
        }
        c
    }

    /// Fill the entire buffer with spaces.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// The characters of one row, for tests and debugging.
    pub fn row_text(&self, row: usize) -> String {
        (0..self.width).map(|col| self.get(col, row).ch).collect()
    }

    const GAP_THRESHOLD: usize = 4;

    /// Diff two buffers and emit only changed cells via the terminal.
    ///
    /// A run holds cells of a single tone. Consecutive changes on the same row
    /// are coalesced into one `write_str`, and short gaps of matching cells
    /// (up to `GAP_THRESHOLD`) are folded into the run to save cursor moves.
    /// The terminal is assumed to start in, and is left in, `Tone::Plain`.
    pub fn diff(current: &CellBuffer, next: &CellBuffer, terminal: &mut dyn Terminal) {
        let height = current.height.min(next.height);
        let width = current.width.min(next.width);
        let mut active = Tone::Plain;

        for row in 0..height {
            let cur = &current.cells[row * current.width..row * current.width + width];
            let nxt = &next.cells[row * next.width..row * next.width + width];

            let mut col = 0;
            while col < width {
                if cur[col] == nxt[col] {
                    col += 1;
                    continue;
                }

                let start_col = col;
                let tone = nxt[col].tone;
                let mut run = String::new();
                loop {
                    while col < width && cur[col] != nxt[col] && nxt[col].tone == tone {
                        run.push(nxt[col].ch);
                        col += 1;
                    }

                    // Fold in a short gap only if more same-tone changes follow.
                    let gap_start = col;
                    while col < width
                        && col - gap_start < Self::GAP_THRESHOLD
                        && cur[col] == nxt[col]
                        && nxt[col].tone == tone
                    {
                        col += 1;
                    }

                    if col > gap_start
                        && col < width
                        && col - gap_start < Self::GAP_THRESHOLD
                        && cur[col] != nxt[col]
                        && nxt[col].tone == tone
                    {
                        run.extend(nxt[gap_start..col].iter().map(|c| c.ch));
                    } else {
                        col = gap_start;
                        break;
                    }
                }

                terminal.move_cursor(start_col as u16, row as u16);
                if tone != active {
                    terminal.set_tone(tone);
                    active = tone;
                }
                terminal.write_str(&run);
            }
        }

        if active != Tone::Plain {
            terminal.set_tone(Tone::Plain);
        }
    }
}
