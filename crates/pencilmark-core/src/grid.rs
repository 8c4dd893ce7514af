//! Grid state: givens, placed values and pencil marks.

use std::fmt::{self, Display, Write as _};

use crate::{CellGrid, Digit, DigitSet, Dimensions, Position};

/// Pencil marks of an unsolved cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PencilMarks {
    /// Center marks: the digits the solver believes possible.
    pub center: DigitSet,
    /// Corner marks: digits the solver has located within a region.
    pub corner: DigitSet,
}

/// State of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum CellState {
    /// A digit fixed by the puzzle.
    Given(Digit),
    /// A digit committed by the solver or the scanner.
    Placed(Digit),
    /// No digit yet, with optional pencil marks.
    Unsolved(PencilMarks),
}

impl Default for CellState {
    fn default() -> Self {
        Self::Unsolved(PencilMarks::default())
    }
}

impl CellState {
    /// Returns the given or placed digit, if any.
    #[must_use]
    pub fn digit(&self) -> Option<Digit> {
        match self {
            Self::Given(d) | Self::Placed(d) => Some(*d),
            Self::Unsolved(_) => None,
        }
    }

    /// Returns the pencil marks of an unsolved cell.
    #[must_use]
    pub fn marks(&self) -> Option<&PencilMarks> {
        match self {
            Self::Unsolved(marks) => Some(marks),
            _ => None,
        }
    }
}

/// Errors returned by grid edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GridError {
    /// The cell holds a given digit.
    #[display("cannot modify given cell {pos}")]
    CannotModifyGivenCell {
        /// The given cell.
        pos: Position,
    },
    /// Pencil marks were written to a cell that already holds a digit.
    #[display("cell {pos} already holds a digit")]
    CellHasValue {
        /// The filled cell.
        pos: Position,
    },
    /// The position lies outside the playable area.
    #[display("position {pos} is outside the playable area")]
    OutOfBounds {
        /// The offending position.
        pos: Position,
    },
    /// The digit is not part of the puzzle's alphabet.
    #[display("digit {digit} is not in the puzzle alphabet")]
    DigitNotInAlphabet {
        /// The offending digit.
        digit: Digit,
    },
}

/// Errors returned when parsing a grid from text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseGridError {
    /// A character is neither a digit symbol nor an empty-cell marker.
    #[display("invalid grid character {_0:?}")]
    InvalidCharacter(#[error(not(source))] char),
    /// The number of cells does not match the playable area.
    #[display("expected {expected} cells, found {actual}")]
    CellCountMismatch {
        /// Playable cell count.
        expected: usize,
        /// Parsed cell count.
        actual: usize,
    },
}

/// The mutable state of a puzzle being solved.
///
/// Only playable cells can be edited; frame cells stay empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    dimensions: Dimensions,
    cells: CellGrid<CellState>,
}

impl Grid {
    /// Creates a grid with every cell unsolved and unmarked.
    #[must_use]
    pub fn new(dimensions: Dimensions) -> Self {
        Self {
            dimensions,
            cells: CellGrid::new(&dimensions),
        }
    }

    /// Creates a grid from a text layout of the playable area.
    ///
    /// Digit symbols become givens, `.` and `_` are empty cells, and
    /// whitespace is ignored. Cells are read in row-major order.
    ///
    /// # Errors
    ///
    /// Returns [`ParseGridError`] if the text contains other characters or
    /// does not describe exactly one symbol per playable cell.
    ///
    /// # Examples
    ///
    /// ```
    /// use pencilmark_core::{Dimensions, Grid, Position};
    ///
    /// let grid = Grid::from_givens(Dimensions::square(4), "
    ///     12 ..
    ///     .. ..
    ///     .. ..
    ///     .. .4
    /// ").unwrap();
    /// assert_eq!(grid.digit_at(Position::new(0, 1)).map(|d| d.to_char()), Some('2'));
    /// assert!(grid.cell(Position::new(3, 3)).unwrap().is_given());
    /// ```
    pub fn from_givens(dimensions: Dimensions, text: &str) -> Result<Self, ParseGridError> {
        let symbols = text
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| match c {
                '.' | '_' => Ok(None),
                _ => Digit::from_char(c)
                    .map(Some)
                    .ok_or(ParseGridError::InvalidCharacter(c)),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let expected = dimensions.playable_positions().count();
        if symbols.len() != expected {
            return Err(ParseGridError::CellCountMismatch {
                expected,
                actual: symbols.len(),
            });
        }

        let mut grid = Self::new(dimensions);
        for (pos, symbol) in dimensions.playable_positions().zip(symbols) {
            if let Some(digit) = symbol {
                grid.cells[pos] = CellState::Given(digit);
            }
        }
        Ok(grid)
    }

    /// Returns the grid dimensions.
    #[must_use]
    pub fn dimensions(&self) -> &Dimensions {
        &self.dimensions
    }

    /// Returns the state of the cell at `pos`.
    #[must_use]
    pub fn cell(&self, pos: Position) -> Option<&CellState> {
        self.cells.get(pos)
    }

    /// Returns the given or placed digit at `pos`.
    #[must_use]
    pub fn digit_at(&self, pos: Position) -> Option<Digit> {
        self.cell(pos).and_then(CellState::digit)
    }

    /// Returns the center marks at `pos`; empty for filled cells.
    #[must_use]
    pub fn center_marks(&self, pos: Position) -> DigitSet {
        self.cell(pos)
            .and_then(CellState::marks)
            .map_or(DigitSet::EMPTY, |m| m.center)
    }

    /// Returns the corner marks at `pos`; empty for filled cells.
    #[must_use]
    pub fn corner_marks(&self, pos: Position) -> DigitSet {
        self.cell(pos)
            .and_then(CellState::marks)
            .map_or(DigitSet::EMPTY, |m| m.corner)
    }

    fn editable(&mut self, pos: Position) -> Result<&mut CellState, GridError> {
        if !self.dimensions.is_playable(pos) {
            return Err(GridError::OutOfBounds { pos });
        }
        let cell = self
            .cells
            .get_mut(pos)
            .ok_or(GridError::OutOfBounds { pos })?;
        if cell.is_given() {
            return Err(GridError::CannotModifyGivenCell { pos });
        }
        Ok(cell)
    }

    /// Replaces the state of a playable cell, givens included.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] for frame cells and positions outside the grid.
    pub fn set_cell(&mut self, pos: Position, state: CellState) -> Result<(), GridError> {
        if !self.dimensions.is_playable(pos) {
            return Err(GridError::OutOfBounds { pos });
        }
        let cell = self
            .cells
            .get_mut(pos)
            .ok_or(GridError::OutOfBounds { pos })?;
        *cell = state;
        Ok(())
    }

    /// Places a digit, discarding the cell's pencil marks.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::CannotModifyGivenCell`] for givens and
    /// [`GridError::OutOfBounds`] for non-playable positions.
    pub fn set_placed(&mut self, pos: Position, digit: Digit) -> Result<(), GridError> {
        *self.editable(pos)? = CellState::Placed(digit);
        Ok(())
    }

    /// Clears a placed digit, or the pencil marks of an unsolved cell.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::CannotModifyGivenCell`] for givens and
    /// [`GridError::OutOfBounds`] for non-playable positions.
    pub fn clear(&mut self, pos: Position) -> Result<(), GridError> {
        *self.editable(pos)? = CellState::default();
        Ok(())
    }

    fn marks_mut(&mut self, pos: Position) -> Result<&mut PencilMarks, GridError> {
        match self.editable(pos)? {
            CellState::Unsolved(marks) => Ok(marks),
            _ => Err(GridError::CellHasValue { pos }),
        }
    }

    /// Replaces the center marks of an unsolved cell.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::CellHasValue`] if the cell holds a placed digit,
    /// plus the errors of [`Grid::set_placed`].
    pub fn set_center_marks(&mut self, pos: Position, marks: DigitSet) -> Result<(), GridError> {
        self.marks_mut(pos)?.center = marks;
        Ok(())
    }

    /// Replaces the corner marks of an unsolved cell.
    ///
    /// # Errors
    ///
    /// Same as [`Grid::set_center_marks`].
    pub fn set_corner_marks(&mut self, pos: Position, marks: DigitSet) -> Result<(), GridError> {
        self.marks_mut(pos)?.corner = marks;
        Ok(())
    }

    /// Returns `true` if every playable cell holds a digit.
    #[must_use]
    pub fn is_filled(&self) -> bool {
        self.dimensions
            .playable_positions()
            .all(|pos| self.digit_at(pos).is_some())
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dims = &self.dimensions;
        for row in 0..dims.playable_rows() {
            for column in 0..dims.playable_columns() {
                let c = dims
                    .from_playable(row, column)
                    .and_then(|pos| self.digit_at(pos))
                    .map_or('.', Digit::to_char);
                f.write_char(c)?;
            }
            f.write_char('\n')?;
        }
        Ok(())
    }
}
