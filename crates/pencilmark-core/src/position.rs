//! Cell coordinates.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

/// A cell coordinate in the full grid, including frame cells.
///
/// Both coordinates are zero-based. The [`Display`] form uses the one-based
/// `r{row}c{column}` notation common among puzzle solvers.
///
/// # Examples
///
/// ```
/// use pencilmark_core::Position;
///
/// let pos: Position = "r1c3".parse().unwrap();
/// assert_eq!(pos, Position::new(0, 2));
/// assert_eq!(pos.to_string(), "r1c3");
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Position {
    /// Zero-based row index.
    pub row: u8,
    /// Zero-based column index.
    pub column: u8,
}

impl Position {
    /// Creates a position from a row and a column.
    #[must_use]
    pub const fn new(row: u8, column: u8) -> Self {
        Self { row, column }
    }

    /// Returns the position shifted by the given signed offsets.
    ///
    /// Returns `None` if the result would have a negative coordinate.
    #[must_use]
    pub fn offset(self, d_row: i16, d_column: i16) -> Option<Self> {
        let row = u8::try_from(i16::from(self.row) + d_row).ok()?;
        let column = u8::try_from(i16::from(self.column) + d_column).ok()?;
        Some(Self { row, column })
    }

    /// Returns `true` if the two positions share an edge.
    #[must_use]
    pub const fn is_orthogonally_adjacent(self, other: Self) -> bool {
        let dr = self.row.abs_diff(other.row);
        let dc = self.column.abs_diff(other.column);
        dr + dc == 1
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}c{}", u16::from(self.row) + 1, u16::from(self.column) + 1)
    }
}

/// Error returned when parsing a [`Position`] from `r{row}c{column}` notation fails.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid cell reference {input:?}, expected r<row>c<column>")]
pub struct ParsePositionError {
    input: String,
}

impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePositionError {
            input: s.to_owned(),
        };
        let lower = s.trim().to_ascii_lowercase();
        let rest = lower.strip_prefix('r').ok_or_else(err)?;
        let (row, column) = rest.split_once('c').ok_or_else(err)?;
        let row: u8 = row.parse().map_err(|_| err())?;
        let column: u8 = column.parse().map_err(|_| err())?;
        if row == 0 || column == 0 {
            return Err(err());
        }
        Ok(Self::new(row - 1, column - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("r1c1".parse::<Position>(), Ok(Position::new(0, 0)));
        assert_eq!("R10C2".parse::<Position>(), Ok(Position::new(9, 1)));
        assert!("r0c1".parse::<Position>().is_err());
        assert!("c1r1".parse::<Position>().is_err());
        assert!("r1".parse::<Position>().is_err());
    }

    #[test]
    fn test_offset() {
        let pos = Position::new(1, 1);
        assert_eq!(pos.offset(-1, 2), Some(Position::new(0, 3)));
        assert_eq!(pos.offset(-2, 0), None);
    }

    #[test]
    fn test_adjacency() {
        let pos = Position::new(4, 4);
        assert!(pos.is_orthogonally_adjacent(Position::new(3, 4)));
        assert!(pos.is_orthogonally_adjacent(Position::new(4, 5)));
        assert!(!pos.is_orthogonally_adjacent(Position::new(5, 5)));
        assert!(!pos.is_orthogonally_adjacent(pos));
    }
}
