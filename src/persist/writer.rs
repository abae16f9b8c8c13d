//! Grid serializer.

use std::io::{self, Write};

use super::format::{CLOSE_BRACE, OPEN_BRACE, PREAMBLE, SEPARATOR, TERMINATOR};
use crate::compute::Grid;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Render the grid as a brace-delimited array literal.
///
/// The output contains no whitespace: `{{0x00,0x1f},{0x00,0x00}}`.
pub fn serialize(grid: &Grid) -> String {
    // "0x##," per byte plus two braces and a comma per row
    let mut out = String::with_capacity(grid.as_bytes().len() * 5 + grid.rows() * 3 + 2);
    out.push(OPEN_BRACE as char);
    for (y, row) in grid.packed_rows().enumerate() {
        if y > 0 {
            out.push(SEPARATOR as char);
        }
        out.push(OPEN_BRACE as char);
        for (x, &byte) in row.iter().enumerate() {
            if x > 0 {
                out.push(SEPARATOR as char);
            }
            push_hex(&mut out, byte);
        }
        out.push(CLOSE_BRACE as char);
    }
    out.push(CLOSE_BRACE as char);
    out
}

fn push_hex(out: &mut String, byte: u8) {
    out.push_str("0x");
    out.push(HEX_DIGITS[(byte >> 4) as usize] as char);
    out.push(HEX_DIGITS[(byte & 0x0f) as usize] as char);
}

/// Write a complete save file: preamble, array literal and terminator.
pub fn write_document<W: Write>(grid: &Grid, w: &mut W) -> io::Result<()> {
    for line in PREAMBLE {
        w.write_all(line.as_bytes())?;
        w.write_all(b"\n")?;
    }
    w.write_all(serialize(grid).as_bytes())?;
    w.write_all(TERMINATOR.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::CellState;
    use crate::schema::Dimensions;

    #[test]
    fn test_serialize_layout() {
        let mut grid = Grid::new(Dimensions::new(3, 16)).unwrap();
        grid.set(1, 0, CellState::Alive);
        grid.set(1, 15, CellState::Alive);
        grid.set(2, 4, CellState::Alive);

        assert_eq!(serialize(&grid), "{{0x00,0x00},{0x01,0x80},{0x10,0x00}}");
    }

    #[test]
    fn test_hex_is_lowercase_and_padded() {
        let mut grid = Grid::new(Dimensions::new(3, 8)).unwrap();
        grid.row_mut(0)[0] = 0xab;
        grid.row_mut(1)[0] = 0x0f;
        assert_eq!(serialize(&grid), "{{0xab},{0x0f},{0x00}}");
    }

    #[test]
    fn test_no_whitespace_in_literal() {
        let grid = Grid::new(Dimensions::new(160, 120)).unwrap();
        let literal = serialize(&grid);
        assert!(!literal.contains(char::is_whitespace));
        assert_eq!(literal.matches("0x").count(), 160 * 15);
    }

    #[test]
    fn test_document_layout() {
        let grid = Grid::new(Dimensions::new(3, 8)).unwrap();
        let mut buf = Vec::new();
        write_document(&grid, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let expected = "/*******************\n\
                        \x20* CGOL Game Array *\n\
                        \x20*******************/\n\
                        \n\
                        uint8_t d_cells[NUM_ROWS][COL_BYTES] =\n\
                        {{0x00},{0x00},{0x00}};\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_write_failure_is_reported() {
        struct Full;
        impl Write for Full {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::StorageFull, "disk full"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let grid = Grid::new(Dimensions::new(3, 8)).unwrap();
        let err = write_document(&grid, &mut Full).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::StorageFull);
    }
}
