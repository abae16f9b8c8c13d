//! Conway's Game of Life on a bit-packed board.
//!
//! This crate provides a fixed-size Life board stored eight cells to a byte,
//! a generation engine that advances it in place, and a save format that
//! writes the board as a C array literal.
//!
//! # Architecture
//!
//! - `schema`: Configuration types and seeding
//! - `compute`: Grid storage and the generation engine
//! - `persist`: Save file serializer and strict parser
//! - `shell`: Interactive terminal editor and runner
//!
//! # Example
//!
//! ```rust,no_run
//! use cgol::{
//!     compute::{GenerationEngine, Grid},
//!     persist,
//!     schema::{Dimensions, Pattern, Seed},
//! };
//!
//! let dims = Dimensions::new(32, 64);
//! let mut grid = Grid::new(dims).unwrap();
//! Seed { pattern: Pattern::Glider { row: 1, col: 1 } }.apply(&mut grid);
//!
//! let mut engine = GenerationEngine::for_grid(&grid);
//! for change in engine.step(&mut grid) {
//!     println!("({}, {}) -> {:?}", change.row, change.col, change.state);
//! }
//!
//! persist::save(&grid, "cgol_array.h").unwrap();
//! let reloaded = persist::load("cgol_array.h", dims).unwrap();
//! assert_eq!(reloaded, grid);
//! ```

pub mod compute;
pub mod persist;
pub mod schema;
pub mod shell;

// Re-export commonly used types
pub use compute::{CellChange, CellState, GenerationEngine, Grid, GridStats};
pub use persist::{FormatError, PersistError};
pub use schema::{Dimensions, GameConfig, Pattern, Seed};
