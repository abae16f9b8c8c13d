//! Generation engine - advances a grid by one generation at a time.
//!
//! Each interior cell takes the alive count of its 3x3 neighbourhood, itself
//! included, and maps it through a three-way table:
//!
//! | sum | next state |
//! |-----|------------|
//! | 3   | alive      |
//! | 4   | unchanged  |
//! | *   | dead       |
//!
//! Border rows and columns are never written.

use log::debug;

use super::grid::{CellState, Grid, get_bit, set_bit, sum_row};

/// A single cell that changed state during a generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellChange {
    pub row: usize,
    pub col: usize,
    pub state: CellState,
}

/// Next state of a cell given its neighbourhood sum (self included).
#[inline]
pub fn next_state(sum: u8, current: CellState) -> CellState {
    match sum {
        3 => CellState::Alive,
        4 => current,
        _ => CellState::Dead,
    }
}

/// Steps a [`Grid`] forward, staging rows in a pair of scratch buffers.
///
/// Row `y` is computed into the scratch buffer picked by the parity of `y`
/// and committed to the grid only after row `y + 1` has been computed, so
/// every neighbourhood sum reads pre-update rows.
#[derive(Debug, Clone, Default)]
pub struct GenerationEngine {
    /// Scratch rows indexed by row parity.
    scratch: [Vec<u8>; 2],
    generation: u64,
}

impl GenerationEngine {
    /// Create an engine with scratch rows sized for `grid`.
    pub fn for_grid(grid: &Grid) -> Self {
        let mut engine = Self::default();
        engine.fit_scratch(grid.col_bytes());
        engine
    }

    /// Number of generations computed so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Reset the generation counter, e.g. after loading a new board.
    pub fn reset(&mut self) {
        self.generation = 0;
    }

    /// Advance `grid` by one generation and return the cells that changed.
    pub fn step(&mut self, grid: &mut Grid) -> Vec<CellChange> {
        let mut changes = Vec::new();
        self.step_into(grid, &mut changes);
        changes
    }

    /// Advance `grid` by one generation, appending changed cells to `changes`
    /// in row-major order.
    pub fn step_into(&mut self, grid: &mut Grid, changes: &mut Vec<CellChange>) {
        let rows = grid.rows();
        let cols = grid.cols();
        let before = changes.len();
        self.fit_scratch(grid.col_bytes());

        for y in 1..rows - 1 {
            let [even, odd] = &mut self.scratch;
            let (working, finished) = if y % 2 == 1 {
                (even, &*odd)
            } else {
                (odd, &*even)
            };

            // Start from the live row so border columns carry over untouched
            working.copy_from_slice(grid.row(y));

            let (above, current, below) = (grid.row(y - 1), grid.row(y), grid.row(y + 1));
            for x in 1..cols - 1 {
                let sum = sum_row(above, x) + sum_row(current, x) + sum_row(below, x);
                let state = get_bit(current, x);
                let next = next_state(sum, state);
                set_bit(working, x, next);

                if next != state {
                    changes.push(CellChange {
                        row: y,
                        col: x,
                        state: next,
                    });
                }
            }

            // Row 0 is border, so the first commit happens at y == 2
            if y > 1 {
                grid.row_mut(y - 1).copy_from_slice(finished);
            }
        }

        let last = rows - 2;
        let last_working = if last % 2 == 1 { 0 } else { 1 };
        grid.row_mut(last).copy_from_slice(&self.scratch[last_working]);

        self.generation += 1;
        debug!(
            "generation {}: {} cells changed",
            self.generation,
            changes.len() - before
        );
    }

    /// Run `generations` steps, discarding change events.
    pub fn run(&mut self, grid: &mut Grid, generations: u64) {
        let mut changes = Vec::new();
        for _ in 0..generations {
            changes.clear();
            self.step_into(grid, &mut changes);
        }
    }

    fn fit_scratch(&mut self, col_bytes: usize) {
        for buffer in &mut self.scratch {
            if buffer.len() != col_bytes {
                buffer.resize(col_bytes, 0);
            }
        }
    }
}

/// Bounding box of live cells, inclusive on all sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Bounds {
    pub top: usize,
    pub left: usize,
    pub bottom: usize,
    pub right: usize,
}

/// Grid statistics for monitoring.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GridStats {
    pub population: usize,
    pub interior_population: usize,
    pub bounds: Option<Bounds>,
}

impl GridStats {
    /// Compute statistics from a grid.
    pub fn from_grid(grid: &Grid) -> Self {
        let population = grid
            .as_bytes()
            .iter()
            .map(|b| b.count_ones() as usize)
            .sum();

        let mut interior_population = 0usize;
        let mut bounds: Option<Bounds> = None;
        for (row, col) in grid.live_cells() {
            if grid.is_interior(row, col) {
                interior_population += 1;
            }
            bounds = Some(match bounds {
                None => Bounds {
                    top: row,
                    left: col,
                    bottom: row,
                    right: col,
                },
                Some(b) => Bounds {
                    top: b.top.min(row),
                    left: b.left.min(col),
                    bottom: b.bottom.max(row),
                    right: b.right.max(col),
                },
            });
        }

        Self {
            population,
            interior_population,
            bounds,
        }
    }
}
