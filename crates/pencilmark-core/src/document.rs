//! JSON puzzle documents.
//!
//! A document carries the rule model and the grid layers of a puzzle in one
//! file. Grid layers cover the full grid, frame included; frame cells are
//! ignored when loading.
//!
//! ```json
//! {
//!   "dimensions": { "rows": 4, "columns": 4 },
//!   "digits": "1-4",
//!   "flags": "DIAGONAL_NEG",
//!   "givens": ["1...", "....", "....", "...4"],
//!   "centermarks": [["", "23", "", ""], ["", "", "", ""], ["", "", "", ""], ["", "", "", ""]]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::{
    BorderClue, Cage, CellState, Digit, DigitAlphabet, DigitSet, Dimensions, Grid, Path,
    PencilMarks, Position, Region, RuleFlags, RuleModel,
};

/// Errors returned when loading a [`PuzzleDocument`].
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum DocumentError {
    /// The text is not a valid document.
    #[display("invalid puzzle document: {_0}")]
    #[from]
    Json(serde_json::Error),
    /// A grid layer has the wrong number of rows.
    #[display("layer {layer:?} has {actual} rows, expected {expected}")]
    RowCountMismatch {
        /// Layer name.
        layer: &'static str,
        /// Row count of the grid.
        expected: usize,
        /// Row count of the layer.
        actual: usize,
    },
    /// A grid layer row has the wrong number of cells.
    #[display("layer {layer:?} row {row} has {actual} cells, expected {expected}")]
    ColumnCountMismatch {
        /// Layer name.
        layer: &'static str,
        /// Zero-based row index.
        row: usize,
        /// Column count of the grid.
        expected: usize,
        /// Cell count of the row.
        actual: usize,
    },
}

/// A serialized puzzle: rules plus grid layers.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PuzzleDocument {
    /// Grid size and frame margins.
    pub dimensions: Dimensions,
    /// Digit range expression; defaults to the first `side` symbols.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digits: Option<String>,
    /// Rule flags.
    pub flags: RuleFlags,
    /// Regions; defaults to the normal block partition when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regions: Option<Vec<Region>>,
    /// Cages.
    pub cages: Vec<Cage>,
    /// Paths.
    pub paths: Vec<Path>,
    /// Border clues.
    pub border_clues: Vec<BorderClue>,
    /// Given digits, one string per row, one symbol per cell.
    pub givens: Vec<String>,
    /// Placed digits, in the same layout as `givens`.
    pub values: Vec<String>,
    /// Center marks, one string per cell.
    #[serde(rename = "centermarks")]
    pub center_marks: Vec<Vec<String>>,
    /// Corner marks, one string per cell.
    #[serde(rename = "cornermarks")]
    pub corner_marks: Vec<Vec<String>>,
}

impl PuzzleDocument {
    /// Parses a document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Json`] if the text is not a valid document.
    pub fn from_json(text: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Serializes the document as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Builds the rule model described by the document.
    #[must_use]
    pub fn rules(&self) -> RuleModel {
        let mut rules = RuleModel::new(self.dimensions).with_flags(self.flags);
        if let Some(digits) = &self.digits {
            rules = rules.with_alphabet(DigitAlphabet::parse(digits));
        }
        if let Some(regions) = &self.regions {
            rules = rules.with_regions(regions.clone());
        }
        for cage in &self.cages {
            rules = rules.with_cage(cage.clone());
        }
        for path in &self.paths {
            rules = rules.with_path(path.clone());
        }
        for clue in &self.border_clues {
            rules = rules.with_border_clue(clue.clone());
        }
        rules
    }

    /// Builds the grid described by the document's layers.
    ///
    /// Givens take precedence over values, and values over pencil marks.
    /// Empty layers are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::RowCountMismatch`] or
    /// [`DocumentError::ColumnCountMismatch`] if a non-empty layer does not
    /// cover the full grid.
    pub fn grid(&self) -> Result<Grid, DocumentError> {
        let dims = self.dimensions;
        let givens = digit_layer("givens", &self.givens, &dims)?;
        let values = digit_layer("values", &self.values, &dims)?;
        let centers = marks_layer("centermarks", &self.center_marks, &dims)?;
        let corners = marks_layer("cornermarks", &self.corner_marks, &dims)?;

        let mut grid = Grid::new(dims);
        for pos in dims.playable_positions() {
            let state = if let Some(d) = lookup(&givens, pos).flatten() {
                CellState::Given(d)
            } else if let Some(d) = lookup(&values, pos).flatten() {
                CellState::Placed(d)
            } else {
                CellState::Unsolved(PencilMarks {
                    center: lookup(&centers, pos).unwrap_or_default(),
                    corner: lookup(&corners, pos).unwrap_or_default(),
                })
            };
            if state != CellState::default() {
                // playable by construction
                let _ = grid.set_cell(pos, state);
            }
        }
        Ok(grid)
    }

    /// Splits the document into its rule model and grid.
    ///
    /// # Errors
    ///
    /// See [`PuzzleDocument::grid`].
    pub fn into_parts(self) -> Result<(RuleModel, Grid), DocumentError> {
        let grid = self.grid()?;
        Ok((self.rules(), grid))
    }

    /// Replaces the document's grid layers with the state of `grid`.
    pub fn set_grid(&mut self, grid: &Grid) {
        let dims = *grid.dimensions();
        let mut givens = vec![];
        let mut values = vec![];
        let mut centers = vec![];
        let mut corners = vec![];
        for row in 0..dims.rows {
            let mut given_row = String::new();
            let mut value_row = String::new();
            let mut center_row = vec![];
            let mut corner_row = vec![];
            for column in 0..dims.columns {
                let cell = grid
                    .cell(Position::new(row, column))
                    .copied()
                    .unwrap_or_default();
                let (given, value, marks) = match cell {
                    CellState::Given(d) => (d.to_char(), '.', PencilMarks::default()),
                    CellState::Placed(d) => ('.', d.to_char(), PencilMarks::default()),
                    CellState::Unsolved(marks) => ('.', '.', marks),
                };
                given_row.push(given);
                value_row.push(value);
                center_row.push(marks.center.to_string());
                corner_row.push(marks.corner.to_string());
            }
            givens.push(given_row);
            values.push(value_row);
            centers.push(center_row);
            corners.push(corner_row);
        }
        self.dimensions = dims;
        self.givens = givens;
        self.values = values;
        self.center_marks = centers;
        self.corner_marks = corners;
    }
}

fn lookup<T: Copy>(layer: &[Vec<T>], pos: Position) -> Option<T> {
    layer
        .get(usize::from(pos.row))
        .and_then(|row| row.get(usize::from(pos.column)))
        .copied()
}

fn check_rows<T>(layer: &'static str, rows: &[T], dims: &Dimensions) -> Result<(), DocumentError> {
    let expected = usize::from(dims.rows);
    if rows.len() != expected {
        return Err(DocumentError::RowCountMismatch {
            layer,
            expected,
            actual: rows.len(),
        });
    }
    Ok(())
}

fn check_columns(
    layer: &'static str,
    row: usize,
    actual: usize,
    dims: &Dimensions,
) -> Result<(), DocumentError> {
    let expected = usize::from(dims.columns);
    if actual != expected {
        return Err(DocumentError::ColumnCountMismatch {
            layer,
            row,
            expected,
            actual,
        });
    }
    Ok(())
}

fn digit_layer(
    layer: &'static str,
    rows: &[String],
    dims: &Dimensions,
) -> Result<Vec<Vec<Option<Digit>>>, DocumentError> {
    if rows.is_empty() {
        return Ok(vec![]);
    }
    check_rows(layer, rows, dims)?;
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let cells: Vec<_> = row.chars().map(Digit::from_char).collect();
            check_columns(layer, i, cells.len(), dims)?;
            Ok(cells)
        })
        .collect()
}

fn marks_layer(
    layer: &'static str,
    rows: &[Vec<String>],
    dims: &Dimensions,
) -> Result<Vec<Vec<DigitSet>>, DocumentError> {
    if rows.is_empty() {
        return Ok(vec![]);
    }
    check_rows(layer, rows, dims)?;
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            check_columns(layer, i, row.len(), dims)?;
            Ok(row.iter().map(|m| DigitSet::from_marks(m)).collect())
        })
        .collect()
}
