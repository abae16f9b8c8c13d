//! Configuration types for the game board, pacing and persistence.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Cells stored per byte of a packed row.
pub const CELLS_PER_BYTE: usize = 8;

/// Largest board accepted, in cells (128 MiB packed).
pub const MAX_CELLS: usize = 1 << 30;

fn default_save_path() -> PathBuf {
    PathBuf::from("cgol_array.h")
}

fn default_tick_interval_ms() -> u64 {
    1000
}

/// Top-level game configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Board dimensions.
    #[serde(default)]
    pub grid: Dimensions,
    /// File used by the save and load commands.
    #[serde(default = "default_save_path")]
    pub save_path: PathBuf,
    /// Delay between generations in run mode, in milliseconds.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    /// Glyphs used to draw cells.
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: Dimensions::default(),
            save_path: default_save_path(),
            tick_interval_ms: default_tick_interval_ms(),
            display: DisplayConfig::default(),
        }
    }
}

/// Board size in cells.
///
/// `cols` must be a multiple of [`CELLS_PER_BYTE`] so every row packs into
/// whole bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub rows: usize,
    pub cols: usize,
}

impl Default for Dimensions {
    fn default() -> Self {
        // 5x5 pixel cells on a 600x800 e-ink panel
        Self {
            rows: 160,
            cols: 120,
        }
    }
}

impl Dimensions {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Bytes per packed row.
    #[inline]
    pub fn col_bytes(&self) -> usize {
        self.cols / CELLS_PER_BYTE
    }

    /// Total number of cells. Cannot overflow once [`Dimensions::validate`] passes.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.rows.saturating_mul(self.cols)
    }

    /// Check the board has an interior and packs into whole bytes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows < 3 {
            return Err(ConfigError::TooFewRows(self.rows));
        }
        if self.cols == 0 {
            return Err(ConfigError::TooFewColumns(self.cols));
        }
        if self.cols % CELLS_PER_BYTE != 0 {
            return Err(ConfigError::UnpackedColumns(self.cols));
        }
        if self.rows.checked_mul(self.cols).is_none_or(|n| n > MAX_CELLS) {
            return Err(ConfigError::TooLarge {
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }
}

/// Characters drawn for each cell state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub alive_glyph: char,
    pub dead_glyph: char,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            alive_glyph: 'x',
            dead_glyph: ' ',
        }
    }
}

impl GameConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grid.validate()?;
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::InvalidTickInterval);
        }
        for glyph in [self.display.alive_glyph, self.display.dead_glyph] {
            if glyph.is_control() {
                return Err(ConfigError::UnprintableGlyph(glyph));
            }
        }
        if self.display.alive_glyph == self.display.dead_glyph {
            return Err(ConfigError::IndistinctGlyphs);
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Grid needs at least 3 rows, got {0}")]
    TooFewRows(usize),
    #[error("Grid needs at least one packed byte of columns, got {0}")]
    TooFewColumns(usize),
    #[error("Column count {0} is not a multiple of 8")]
    UnpackedColumns(usize),
    #[error("Grid of {rows}x{cols} exceeds {} cells", MAX_CELLS)]
    TooLarge { rows: usize, cols: usize },
    #[error("Tick interval must be positive")]
    InvalidTickInterval,
    #[error("Glyph {0:?} is not printable")]
    UnprintableGlyph(char),
    #[error("Alive and dead glyphs must differ")]
    IndistinctGlyphs,
}
