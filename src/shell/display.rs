//! Character display for the board.

use std::io::{self, Stdout, Write};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::Print,
    terminal::{
        self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode,
    },
};

use crate::compute::{CellState, Grid};
use crate::schema::DisplayConfig;

/// Everything the shell needs from a display.
pub trait CellDisplay {
    fn draw_cell(&mut self, row: usize, col: usize, state: CellState) -> io::Result<()>;

    /// Draw every cell of `grid`.
    fn draw_grid(&mut self, grid: &Grid) -> io::Result<()> {
        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                self.draw_cell(row, col, grid.get(row, col))?;
            }
        }
        Ok(())
    }

    /// Replace the status line shown below the board.
    fn show_status(&mut self, message: &str) -> io::Result<()>;

    fn place_cursor(&mut self, row: usize, col: usize) -> io::Result<()>;

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()>;
}

fn term_coord(v: usize) -> u16 {
    u16::try_from(v).unwrap_or(u16::MAX)
}

/// Crossterm-backed display. Cell (row, col) is drawn at terminal (col, row).
pub struct TerminalDisplay<W: Write> {
    out: W,
    glyphs: DisplayConfig,
    status_row: u16,
}

impl<W: Write> TerminalDisplay<W> {
    /// Create a display whose status line sits just below a board of `rows` rows.
    pub fn new(out: W, glyphs: DisplayConfig, rows: usize) -> Self {
        Self {
            out,
            glyphs,
            status_row: term_coord(rows),
        }
    }

    fn glyph(&self, state: CellState) -> char {
        match state {
            CellState::Alive => self.glyphs.alive_glyph,
            CellState::Dead => self.glyphs.dead_glyph,
        }
    }
}

impl<W: Write> CellDisplay for TerminalDisplay<W> {
    fn draw_cell(&mut self, row: usize, col: usize, state: CellState) -> io::Result<()> {
        let glyph = self.glyph(state);
        queue!(self.out, MoveTo(term_coord(col), term_coord(row)), Print(glyph))
    }

    fn draw_grid(&mut self, grid: &Grid) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All))?;
        for row in 0..grid.rows() {
            let line: String = (0..grid.cols())
                .map(|col| self.glyph(grid.get(row, col)))
                .collect();
            queue!(self.out, MoveTo(0, term_coord(row)), Print(line))?;
        }
        Ok(())
    }

    fn show_status(&mut self, message: &str) -> io::Result<()> {
        queue!(
            self.out,
            MoveTo(0, self.status_row),
            Clear(ClearType::CurrentLine),
            Print(message)
        )
    }

    fn place_cursor(&mut self, row: usize, col: usize) -> io::Result<()> {
        queue!(self.out, MoveTo(term_coord(col), term_coord(row)))
    }

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()> {
        if visible {
            queue!(self.out, Show)
        } else {
            queue!(self.out, Hide)
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

/// Puts the terminal in raw mode on an alternate screen for its lifetime.
///
/// Dropping the guard restores the terminal, including during a panic unwind.
pub struct TerminalGuard {
    _private: (),
}

impl TerminalGuard {
    pub fn enter(stdout: &mut Stdout) -> io::Result<Self> {
        enable_raw_mode()?;
        if let Err(e) = execute!(stdout, EnterAlternateScreen, Clear(ClearType::All)) {
            let _ = disable_raw_mode();
            return Err(e);
        }
        Ok(Self { _private: () })
    }

    /// Current terminal size as (rows, cols).
    pub fn size(&self) -> io::Result<(usize, usize)> {
        let (cols, rows) = terminal::size()?;
        Ok((rows as usize, cols as usize))
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, Show, LeaveAlternateScreen) {
            log::error!("failed to leave alternate screen: {e}");
        }
        if let Err(e) = disable_raw_mode() {
            log::error!("failed to disable raw mode: {e}");
        }
    }
}
