//! Bit-packed grid store.
//!
//! Rows are stored back to back, each `cols / 8` bytes long. Cell `col` of a
//! row lives in byte `col / 8` at bit `col % 8`.

use crate::schema::{CELLS_PER_BYTE, ConfigError, Dimensions};

/// State of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum CellState {
    #[default]
    Dead = 0,
    Alive = 1,
}

impl CellState {
    #[inline]
    pub fn from_bit(bit: u8) -> Self {
        if bit & 1 == 0 {
            CellState::Dead
        } else {
            CellState::Alive
        }
    }

    #[inline]
    pub fn is_alive(self) -> bool {
        self == CellState::Alive
    }

    /// The opposite state.
    #[inline]
    pub fn toggled(self) -> Self {
        match self {
            CellState::Dead => CellState::Alive,
            CellState::Alive => CellState::Dead,
        }
    }
}

#[inline]
fn byte_index(col: usize) -> usize {
    col / CELLS_PER_BYTE
}

#[inline]
fn bit_index(col: usize) -> usize {
    col % CELLS_PER_BYTE
}

/// Read one cell from a packed row.
#[inline]
pub fn get_bit(row: &[u8], col: usize) -> CellState {
    CellState::from_bit(row[byte_index(col)] >> bit_index(col))
}

/// Write one cell into a packed row, leaving the other bits of the byte alone.
#[inline]
pub fn set_bit(row: &mut [u8], col: usize, state: CellState) {
    let byte = &mut row[byte_index(col)];
    *byte &= !(1 << bit_index(col));
    *byte |= (state as u8) << bit_index(col);
}

/// Alive count of `col - 1`, `col` and `col + 1` in a packed row.
#[inline]
pub fn sum_row(row: &[u8], col: usize) -> u8 {
    get_bit(row, col - 1) as u8 + get_bit(row, col) as u8 + get_bit(row, col + 1) as u8
}

/// Fixed-size board of packed cells, initialized dead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    dims: Dimensions,
    col_bytes: usize,
    cells: Vec<u8>,
}

impl Grid {
    /// Create an all-dead grid.
    pub fn new(dims: Dimensions) -> Result<Self, ConfigError> {
        dims.validate()?;
        let col_bytes = dims.col_bytes();
        Ok(Self {
            dims,
            col_bytes,
            cells: vec![0u8; dims.rows * col_bytes],
        })
    }

    #[inline]
    pub fn dims(&self) -> Dimensions {
        self.dims
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.dims.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.dims.cols
    }

    /// Bytes per packed row.
    #[inline]
    pub fn col_bytes(&self) -> usize {
        self.col_bytes
    }

    /// Get the state of the cell at (row, col).
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> CellState {
        debug_assert!(col < self.dims.cols, "column {col} out of range");
        get_bit(self.row(row), col)
    }

    /// Set the state of the cell at (row, col).
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, state: CellState) {
        debug_assert!(col < self.dims.cols, "column {col} out of range");
        set_bit(self.row_mut(row), col, state);
    }

    /// Flip the cell at (row, col) and return its new state.
    pub fn toggle(&mut self, row: usize, col: usize) -> CellState {
        let state = self.get(row, col).toggled();
        self.set(row, col, state);
        state
    }

    /// Packed bytes of one row.
    #[inline]
    pub fn row(&self, row: usize) -> &[u8] {
        let start = row * self.col_bytes;
        &self.cells[start..start + self.col_bytes]
    }

    #[inline]
    pub fn row_mut(&mut self, row: usize) -> &mut [u8] {
        let start = row * self.col_bytes;
        &mut self.cells[start..start + self.col_bytes]
    }

    /// All packed bytes, row-major.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.cells
    }

    /// Iterate over packed rows, top to bottom.
    pub fn packed_rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.chunks_exact(self.col_bytes)
    }

    /// Kill every cell.
    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    /// Whether (row, col) is off the outermost ring of the board.
    #[inline]
    pub fn is_interior(&self, row: usize, col: usize) -> bool {
        (1..self.dims.rows - 1).contains(&row) && (1..self.dims.cols - 1).contains(&col)
    }

    /// Iterate over the coordinates of every live cell in row-major order.
    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.dims.rows).flat_map(move |row| {
            (0..self.dims.cols)
                .filter(move |&col| self.get(row, col).is_alive())
                .map(move |col| (row, col))
        })
    }
}
