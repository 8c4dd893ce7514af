//! Rule model and grid state for variant sudoku puzzles.
//!
//! This crate describes *what* a puzzle is, independent of any solving logic:
//!
//! - [`position`] and [`dimensions`]: cell coordinates, grid size, frame
//!   margins and the default block partition.
//! - [`digit`] and [`alphabet`]: digit symbols beyond `1-9`, digit sets, and
//!   the range notation puzzles use to declare their alphabet.
//! - [`rules`]: rule flags, regions, cages, paths and border clues, collected
//!   into an immutable [`RuleModel`].
//! - [`grid`] and [`cell_grid`]: givens, placed digits and pencil marks.
//! - [`document`]: the JSON puzzle document that carries both.
//!
//! # Examples
//!
//! ```
//! use pencilmark_core::{Dimensions, Grid, Position, RuleModel};
//!
//! let rules = RuleModel::new(Dimensions::square(6));
//! let grid = Grid::from_givens(*rules.dimensions(), "
//!     12345.
//!     ......
//!     ......
//!     ......
//!     ......
//!     ......
//! ").unwrap();
//!
//! assert_eq!(rules.alphabet().to_string(), "123456");
//! assert!(grid.digit_at(Position::new(0, 5)).is_none());
//! ```

pub mod alphabet;
pub mod cell_grid;
pub mod digit;
pub mod dimensions;
pub mod document;
pub mod grid;
pub mod position;
pub mod rules;

pub use self::{
    alphabet::DigitAlphabet,
    cell_grid::CellGrid,
    digit::{Digit, DigitSet},
    dimensions::{BlockSize, Dimensions, Margins},
    document::{DocumentError, PuzzleDocument},
    grid::{CellState, Grid, GridError, ParseGridError, PencilMarks},
    position::{ParsePositionError, Position},
    rules::{
        BorderClue, BorderClueKind, Cage, CageKind, Path, PathKind, Region, RegionKind, RuleFlags,
        RuleModel,
    },
};
