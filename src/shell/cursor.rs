//! Edit cursor, kept inside the board interior.

use super::input::Direction;
use crate::schema::Dimensions;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub row: usize,
    pub col: usize,
}

impl Default for Cursor {
    fn default() -> Self {
        Self { row: 1, col: 1 }
    }
}

impl Cursor {
    /// Move one cell, clamping to rows `1..=rows-2` and columns `1..=cols-2`.
    pub fn step(&mut self, direction: Direction, dims: Dimensions) {
        match direction {
            Direction::Up => self.row = self.row.saturating_sub(1),
            Direction::Down => self.row += 1,
            Direction::Left => self.col = self.col.saturating_sub(1),
            Direction::Right => self.col += 1,
        }
        self.clamp(dims);
    }

    pub fn clamp(&mut self, dims: Dimensions) {
        self.row = self.row.clamp(1, dims.rows - 2);
        self.col = self.col.clamp(1, dims.cols - 2);
    }
}
