//! Grid dimensions, frame margins and the default block partition.

use serde::{Deserialize, Serialize};

use crate::Position;

/// Frame widths around the playable area.
///
/// Frame cells carry outside clues (sandwich totals, little killers) and never
/// hold candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    /// Rows above the playable area.
    pub top: u8,
    /// Columns to the right of the playable area.
    pub right: u8,
    /// Rows below the playable area.
    pub bottom: u8,
    /// Columns to the left of the playable area.
    pub left: u8,
}

/// Size of one block of the default region partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSize {
    /// Block width in columns.
    pub width: u8,
    /// Block height in rows.
    pub height: u8,
}

/// Full grid size plus frame margins.
///
/// # Examples
///
/// ```
/// use pencilmark_core::{Dimensions, Margins, Position};
///
/// let dims = Dimensions::with_margins(11, 11, Margins { top: 1, right: 1, bottom: 1, left: 1 });
/// assert_eq!(dims.playable_rows(), 9);
/// assert!(!dims.is_playable(Position::new(0, 5)));
/// assert!(dims.is_playable(Position::new(1, 1)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Total rows, including frame rows.
    pub rows: u8,
    /// Total columns, including frame columns.
    pub columns: u8,
    /// Frame margins, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margins: Option<Margins>,
}

impl Default for Dimensions {
    fn default() -> Self {
        Self::square(9)
    }
}

impl Dimensions {
    /// Creates dimensions without a frame.
    #[must_use]
    pub const fn new(rows: u8, columns: u8) -> Self {
        Self {
            rows,
            columns,
            margins: None,
        }
    }

    /// Creates square dimensions without a frame.
    #[must_use]
    pub const fn square(side: u8) -> Self {
        Self::new(side, side)
    }

    /// Creates dimensions with frame margins.
    #[must_use]
    pub const fn with_margins(rows: u8, columns: u8, margins: Margins) -> Self {
        Self {
            rows,
            columns,
            margins: Some(margins),
        }
    }

    fn margins_or_default(&self) -> Margins {
        self.margins.unwrap_or_default()
    }

    /// Returns the first playable row.
    #[must_use]
    pub fn row_offset(&self) -> u8 {
        self.margins_or_default().top
    }

    /// Returns the first playable column.
    #[must_use]
    pub fn column_offset(&self) -> u8 {
        self.margins_or_default().left
    }

    /// Returns the number of playable rows.
    #[must_use]
    pub fn playable_rows(&self) -> u8 {
        let m = self.margins_or_default();
        self.rows.saturating_sub(m.top).saturating_sub(m.bottom)
    }

    /// Returns the number of playable columns.
    #[must_use]
    pub fn playable_columns(&self) -> u8 {
        let m = self.margins_or_default();
        self.columns.saturating_sub(m.left).saturating_sub(m.right)
    }

    /// Returns `true` if the playable area is square.
    #[must_use]
    pub fn is_square(&self) -> bool {
        self.playable_rows() == self.playable_columns()
    }

    /// Returns `true` if the position lies inside the full grid.
    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.column < self.columns
    }

    /// Returns `true` if the position lies inside the playable area.
    #[must_use]
    pub fn is_playable(&self, pos: Position) -> bool {
        self.to_playable(pos).is_some()
    }

    /// Converts a full-grid position to playable-area coordinates `(row, column)`.
    ///
    /// Returns `None` for frame cells and positions outside the grid.
    #[must_use]
    pub fn to_playable(&self, pos: Position) -> Option<(u8, u8)> {
        let row = pos.row.checked_sub(self.row_offset())?;
        let column = pos.column.checked_sub(self.column_offset())?;
        (row < self.playable_rows() && column < self.playable_columns()).then_some((row, column))
    }

    /// Converts playable-area coordinates to a full-grid position.
    ///
    /// Returns `None` if the coordinates fall outside the playable area.
    #[must_use]
    pub fn from_playable(&self, row: u8, column: u8) -> Option<Position> {
        if row >= self.playable_rows() || column >= self.playable_columns() {
            return None;
        }
        Some(Position::new(
            row + self.row_offset(),
            column + self.column_offset(),
        ))
    }

    /// Returns every playable position in row-major order.
    pub fn playable_positions(&self) -> impl Iterator<Item = Position> + use<> {
        let (rows, columns) = (self.playable_rows(), self.playable_columns());
        let (row_offset, column_offset) = (self.row_offset(), self.column_offset());
        (0..rows).flat_map(move |r| {
            (0..columns).map(move |c| Position::new(r + row_offset, c + column_offset))
        })
    }

    /// Returns the block size of the default region partition.
    ///
    /// Square grids of the common sizes use the conventional block shapes
    /// (`9` → 3×3, `6` → 3 wide × 2 high, and so on); other square grids use
    /// one row per block. Non-square grids have no default partition.
    ///
    /// # Examples
    ///
    /// ```
    /// use pencilmark_core::{BlockSize, Dimensions};
    ///
    /// let six = Dimensions::square(6).default_block_size();
    /// assert_eq!(six, Some(BlockSize { width: 3, height: 2 }));
    /// let seven = Dimensions::square(7).default_block_size();
    /// assert_eq!(seven, Some(BlockSize { width: 7, height: 1 }));
    /// assert_eq!(Dimensions::new(6, 9).default_block_size(), None);
    /// ```
    #[must_use]
    pub fn default_block_size(&self) -> Option<BlockSize> {
        let side = self.playable_rows();
        if side == 0 || side != self.playable_columns() {
            return None;
        }
        let (width, height) = match side {
            4 => (2, 2),
            6 => (3, 2),
            8 => (4, 2),
            9 => (3, 3),
            10 => (5, 2),
            12 => (4, 3),
            14 => (7, 2),
            15 => (5, 3),
            16 => (4, 4),
            18 => (6, 3),
            20 => (5, 4),
            21 => (7, 3),
            22 => (11, 2),
            24 => (6, 4),
            25 => (5, 5),
            26 => (13, 2),
            _ => (side, 1),
        };
        Some(BlockSize { width, height })
    }

    /// Returns the cells of each block of the default partition.
    ///
    /// Blocks are listed left to right, top to bottom; cells inside a block
    /// are listed column by column.
    #[must_use]
    pub fn default_blocks(&self) -> Vec<Vec<Position>> {
        let Some(BlockSize { width, height }) = self.default_block_size() else {
            return vec![];
        };
        let (rows, columns) = (self.playable_rows(), self.playable_columns());
        let mut blocks = vec![];
        for block_row in 0..rows / height {
            for block_column in 0..columns / width {
                let mut cells = Vec::with_capacity(usize::from(width) * usize::from(height));
                for c in 0..width {
                    for r in 0..height {
                        cells.extend(
                            self.from_playable(block_row * height + r, block_column * width + c),
                        );
                    }
                }
                blocks.push(cells);
            }
        }
        blocks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn framed() -> Dimensions {
        Dimensions::with_margins(
            8,
            8,
            Margins {
                top: 1,
                right: 1,
                bottom: 1,
                left: 1,
            },
        )
    }

    #[test]
    fn test_playable_area() {
        let dims = framed();
        assert_eq!(dims.playable_rows(), 6);
        assert_eq!(dims.playable_columns(), 6);
        assert_eq!(dims.to_playable(Position::new(1, 1)), Some((0, 0)));
        assert_eq!(dims.to_playable(Position::new(7, 3)), None);
        assert_eq!(dims.to_playable(Position::new(3, 0)), None);
        assert_eq!(dims.from_playable(5, 5), Some(Position::new(6, 6)));
        assert_eq!(dims.from_playable(6, 0), None);
    }

    #[test]
    fn test_playable_positions_skip_frame() {
        let dims = framed();
        let cells: Vec<_> = dims.playable_positions().collect();
        assert_eq!(cells.len(), 36);
        assert_eq!(cells[0], Position::new(1, 1));
        assert_eq!(cells[35], Position::new(6, 6));
        assert!(cells.iter().all(|&p| dims.is_playable(p)));
    }

    #[test]
    fn test_default_blocks_partition_grid() {
        for side in [4, 6, 8, 9, 10, 12, 16] {
            let dims = Dimensions::square(side);
            let blocks = dims.default_blocks();
            assert_eq!(blocks.len(), usize::from(side), "side {side}");
            let mut all: Vec<_> = blocks.into_iter().flatten().collect();
            all.sort();
            let expected: Vec<_> = dims.playable_positions().collect();
            assert_eq!(all, expected, "side {side}");
        }
    }

    #[test]
    fn test_default_blocks_six() {
        let blocks = Dimensions::square(6).default_blocks();
        assert_eq!(
            blocks[1],
            vec![
                Position::new(0, 3),
                Position::new(1, 3),
                Position::new(0, 4),
                Position::new(1, 4),
                Position::new(0, 5),
                Position::new(1, 5),
            ]
        );
    }

    #[test]
    fn test_default_blocks_respect_margins() {
        let blocks = framed().default_blocks();
        assert_eq!(blocks.len(), 6);
        assert_eq!(blocks[0][0], Position::new(1, 1));
    }
}
