//! Compute module - Grid storage and generation stepping.

mod engine;
mod grid;

pub use engine::*;
pub use grid::*;
