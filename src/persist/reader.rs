//! Strict save file parser.
//!
//! The grammar accepts exactly what [`super::write_document`] emits. No
//! whitespace is skipped inside the literal, and every byte must be the four
//! characters `0x##`.

use super::format::{
    CLOSE_BRACE, Expected, FormatError, Found, HEX_TOKEN_LEN, OPEN_BRACE, PREAMBLE_LINES,
    PersistError, SEPARATOR,
};
use crate::compute::Grid;
use crate::schema::Dimensions;

/// Byte cursor that tracks 1-based line and column.
struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
    line: usize,
    column: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    fn next(&mut self) -> Option<u8> {
        let b = *self.bytes.get(self.pos)?;
        self.pos += 1;
        if b == b'\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(b)
    }

    fn error(
        &self,
        expected: Expected,
        found: Option<u8>,
        line: usize,
        column: usize,
    ) -> FormatError {
        FormatError {
            expected,
            found: Found::from(found),
            line,
            column,
        }
    }

    /// Consume up to and including the next newline.
    fn skip_line(&mut self) -> Result<(), FormatError> {
        loop {
            match self.next() {
                Some(b'\n') => return Ok(()),
                Some(_) => {}
                None => {
                    return Err(self.error(Expected::PreambleLine, None, self.line, self.column));
                }
            }
        }
    }

    fn expect(&mut self, want: u8, expected: Expected) -> Result<(), FormatError> {
        let (line, column) = (self.line, self.column);
        match self.next() {
            Some(b) if b == want => Ok(()),
            found => Err(self.error(expected, found, line, column)),
        }
    }

    /// Read exactly one `0x##` token.
    fn hex_token(&mut self) -> Result<u32, FormatError> {
        let mut value = 0u32;
        for i in 0..HEX_TOKEN_LEN {
            let (line, column) = (self.line, self.column);
            let found = self.next();
            let digit = match (i, found) {
                (0, Some(b'0')) | (1, Some(b'x')) => Some(0),
                (2 | 3, Some(b)) => char::from(b).to_digit(16),
                _ => None,
            };
            match digit {
                Some(d) if i >= 2 => value = value * 16 + d,
                Some(_) => {}
                None => return Err(self.error(Expected::HexByte, found, line, column)),
            }
        }
        Ok(value)
    }

    fn byte(&mut self) -> Result<u8, PersistError> {
        let (line, column) = (self.line, self.column);
        let value = self.hex_token()?;
        u8::try_from(value).map_err(|_| PersistError::Range {
            value,
            line,
            column,
        })
    }
}

/// Parse a save file into a new grid of the given dimensions.
///
/// Nothing is returned unless the whole literal parses, so a caller holding
/// a live grid can replace it only on success.
pub fn deserialize(text: &str, dims: Dimensions) -> Result<Grid, PersistError> {
    deserialize_bytes(text.as_bytes(), dims)
}

/// Byte-oriented variant of [`deserialize`] for input that may not be UTF-8.
pub fn deserialize_bytes(bytes: &[u8], dims: Dimensions) -> Result<Grid, PersistError> {
    let mut grid = Grid::new(dims)?;
    let mut cursor = Cursor::new(bytes);

    for _ in 0..PREAMBLE_LINES {
        cursor.skip_line()?;
    }

    cursor.expect(OPEN_BRACE, Expected::OuterOpenBrace)?;

    let rows = grid.rows();
    let col_bytes = grid.col_bytes();
    for y in 0..rows {
        cursor.expect(OPEN_BRACE, Expected::InnerOpenBrace)?;

        let row = grid.row_mut(y);
        for (x, slot) in row.iter_mut().enumerate() {
            *slot = cursor.byte()?;

            if x + 1 < col_bytes {
                cursor.expect(SEPARATOR, Expected::InnerComma)?;
            } else {
                cursor.expect(CLOSE_BRACE, Expected::InnerCloseBrace)?;
            }
        }

        if y + 1 < rows {
            cursor.expect(SEPARATOR, Expected::OuterComma)?;
        } else {
            cursor.expect(CLOSE_BRACE, Expected::OuterCloseBrace)?;
        }
    }

    Ok(grid)
}
