//! Fixed text layout and error types for save files.

use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::schema::ConfigError;

/// Lines written ahead of the array literal and skipped on load.
pub const PREAMBLE: [&str; 5] = [
    "/*******************",
    " * CGOL Game Array *",
    " *******************/",
    "",
    "uint8_t d_cells[NUM_ROWS][COL_BYTES] =",
];

/// Number of preamble lines the reader discards.
pub const PREAMBLE_LINES: usize = PREAMBLE.len();

/// Every byte is written as exactly `0x` plus two hex digits.
pub const HEX_TOKEN_LEN: usize = 4;

pub const OPEN_BRACE: u8 = b'{';
pub const CLOSE_BRACE: u8 = b'}';
pub const SEPARATOR: u8 = b',';

/// Written after the outer closing brace.
pub const TERMINATOR: &str = ";\n";

/// The structural element the reader was looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    PreambleLine,
    OuterOpenBrace,
    InnerOpenBrace,
    HexByte,
    InnerComma,
    InnerCloseBrace,
    OuterComma,
    OuterCloseBrace,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Expected::PreambleLine => "preamble line",
            Expected::OuterOpenBrace => "outer opening brace",
            Expected::InnerOpenBrace => "inner opening brace",
            Expected::HexByte => "hex byte `0x##`",
            Expected::InnerComma => "inner comma",
            Expected::InnerCloseBrace => "inner closing brace",
            Expected::OuterComma => "outer comma",
            Expected::OuterCloseBrace => "outer closing brace",
        };
        f.write_str(s)
    }
}

/// What the reader saw instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Found {
    Byte(u8),
    EndOfInput,
}

impl From<Option<u8>> for Found {
    fn from(b: Option<u8>) -> Self {
        b.map_or(Found::EndOfInput, Found::Byte)
    }
}

impl fmt::Display for Found {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Found::Byte(b) if b.is_ascii_graphic() || *b == b' ' => write!(f, "{:?}", *b as char),
            Found::Byte(b) => write!(f, "byte {b:#04x}"),
            Found::EndOfInput => f.write_str("end of input"),
        }
    }
}

/// A structural deviation in a save file.
///
/// `line` and `column` are 1-based and point at the offending character.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}, column {column}: expected {expected}, found {found}")]
pub struct FormatError {
    pub expected: Expected,
    pub found: Found,
    pub line: usize,
    pub column: usize,
}

/// Errors from saving or loading a grid.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Malformed save file: {0}")]
    Format(#[from] FormatError),
    #[error("Byte value {value:#x} at line {line}, column {column} exceeds 0xff")]
    Range {
        value: u32,
        line: usize,
        column: usize,
    },
    #[error("Invalid grid dimensions: {0}")]
    Dimensions(#[from] ConfigError),
}

impl PersistError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        PersistError::Io {
            path: path.into(),
            source,
        }
    }

    /// The structural error, if this is one.
    pub fn as_format(&self) -> Option<&FormatError> {
        match self {
            PersistError::Format(e) => Some(e),
            _ => None,
        }
    }
}
