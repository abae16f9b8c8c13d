//! Saving and loading boards as a C array literal.
//!
//! # File Format
//!
//! A save file is a small C header fragment:
//!
//! ```text
//! /*******************
//!  * CGOL Game Array *
//!  *******************/
//!
//! uint8_t d_cells[NUM_ROWS][COL_BYTES] =
//! {{0x00,0x00,...},{0x00,0x00,...},...};
//! ```
//!
//! The first five lines are fixed boilerplate and are skipped on load. The
//! literal holds one inner brace group per row, each with `cols / 8` bytes
//! written as `0x##` in lowercase. Bit `n` of byte `k` is column `8k + n`.

mod format;
mod reader;
mod writer;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use log::{info, warn};

pub use format::{
    Expected, FormatError, Found, HEX_TOKEN_LEN, PREAMBLE, PREAMBLE_LINES, PersistError,
};
pub use reader::{deserialize, deserialize_bytes};
pub use writer::{serialize, write_document};

use crate::compute::Grid;
use crate::schema::Dimensions;

/// Write `grid` to `path`, replacing any existing file.
pub fn save<P: AsRef<Path>>(grid: &Grid, path: P) -> Result<(), PersistError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| PersistError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    write_document(grid, &mut writer).map_err(|e| PersistError::io(path, e))?;
    writer.flush().map_err(|e| PersistError::io(path, e))?;

    info!(
        "saved {}x{} grid to {}",
        grid.rows(),
        grid.cols(),
        path.display()
    );
    Ok(())
}

/// Read a grid of the given dimensions from `path`.
pub fn load<P: AsRef<Path>>(path: P, dims: Dimensions) -> Result<Grid, PersistError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| PersistError::io(path, e))?;
    let grid = deserialize_bytes(&bytes, dims).inspect_err(|e| {
        warn!("rejected save file {}: {e}", path.display());
    })?;

    info!("loaded {}x{} grid from {}", dims.rows, dims.cols, path.display());
    Ok(grid)
}

/// Load from `path` into `grid`, leaving `grid` untouched on any error.
pub fn load_into<P: AsRef<Path>>(grid: &mut Grid, path: P) -> Result<(), PersistError> {
    *grid = load(path, grid.dims())?;
    Ok(())
}
