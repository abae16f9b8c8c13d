//! Seed types for initializing a board.

use log::warn;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::compute::{CellState, Grid};

/// Complete seed specification for board initialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Seed {
    /// Pattern to use for seeding.
    pub pattern: Pattern,
}

/// Predefined patterns for initialization.
///
/// Positions are the top-left cell of the pattern's bounding box.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Pattern {
    /// Leave every cell dead.
    #[default]
    Empty,
    /// 2x2 still life.
    Block { row: usize, col: usize },
    /// Period-2 oscillator, three cells in a line.
    Blinker {
        row: usize,
        col: usize,
        #[serde(default)]
        vertical: bool,
    },
    /// Glider heading down and to the right.
    Glider { row: usize, col: usize },
    /// Uniform random fill of the interior.
    Random {
        /// Probability that a cell starts alive (0.0-1.0).
        density: f64,
        /// Random seed.
        seed: u64,
    },
    /// Explicit list of live (row, col) cells.
    Custom { cells: Vec<(usize, usize)> },
}

impl Seed {
    /// Write the pattern's live cells into `grid`.
    ///
    /// Cells that fall outside the interior are skipped, since the border is
    /// never evolved.
    pub fn apply(&self, grid: &mut Grid) {
        match &self.pattern {
            Pattern::Empty => {}
            Pattern::Block { row, col } => {
                place(grid, *row, *col, &[(0, 0), (0, 1), (1, 0), (1, 1)]);
            }
            Pattern::Blinker { row, col, vertical } => {
                let cells = if *vertical {
                    [(0, 0), (1, 0), (2, 0)]
                } else {
                    [(0, 0), (0, 1), (0, 2)]
                };
                place(grid, *row, *col, &cells);
            }
            Pattern::Glider { row, col } => {
                place(
                    grid,
                    *row,
                    *col,
                    &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
                );
            }
            Pattern::Random { density, seed } => {
                apply_random(grid, *density, *seed);
            }
            Pattern::Custom { cells } => {
                place(grid, 0, 0, cells);
            }
        }
    }
}

fn place(grid: &mut Grid, row: usize, col: usize, offsets: &[(usize, usize)]) {
    let mut skipped = 0usize;
    for &(dr, dc) in offsets {
        match (row.checked_add(dr), col.checked_add(dc)) {
            (Some(r), Some(c)) if grid.is_interior(r, c) => grid.set(r, c, CellState::Alive),
            _ => skipped += 1,
        }
    }
    if skipped > 0 {
        warn!(
            "seed at ({row}, {col}): {skipped} of {} cells fall outside the {}x{} interior",
            offsets.len(),
            grid.rows(),
            grid.cols()
        );
    }
}

fn apply_random(grid: &mut Grid, density: f64, seed: u64) {
    let density = if density.is_nan() {
        0.0
    } else {
        density.clamp(0.0, 1.0)
    };
    let mut rng = StdRng::seed_from_u64(seed);

    for row in 1..grid.rows() - 1 {
        for col in 1..grid.cols() - 1 {
            if rng.gen_bool(density) {
                grid.set(row, col, CellState::Alive);
            }
        }
    }
}
