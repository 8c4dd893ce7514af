//! A rectangular container indexed by [`Position`].

use std::ops::{Index, IndexMut};

use crate::{Dimensions, Position};

/// A `rows × columns` container with one value per cell.
///
/// Unlike a fixed 9×9 array, the size follows the puzzle's [`Dimensions`],
/// frame cells included.
///
/// # Panics
///
/// Indexing with `[]` panics for positions outside the grid; use [`get`]
/// for a checked lookup.
///
/// [`get`]: CellGrid::get
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellGrid<T> {
    rows: u8,
    columns: u8,
    cells: Vec<T>,
}

impl<T: Clone> CellGrid<T> {
    /// Creates a grid with every cell set to `value`.
    #[must_use]
    pub fn filled(dimensions: &Dimensions, value: T) -> Self {
        let len = usize::from(dimensions.rows) * usize::from(dimensions.columns);
        Self {
            rows: dimensions.rows,
            columns: dimensions.columns,
            cells: vec![value; len],
        }
    }
}

impl<T: Clone + Default> CellGrid<T> {
    /// Creates a grid with every cell set to `T::default()`.
    #[must_use]
    pub fn new(dimensions: &Dimensions) -> Self {
        Self::filled(dimensions, T::default())
    }
}

impl<T> CellGrid<T> {
    /// Returns the number of rows.
    #[must_use]
    pub fn rows(&self) -> u8 {
        self.rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn columns(&self) -> u8 {
        self.columns
    }

    fn index_of(&self, pos: Position) -> Option<usize> {
        (pos.row < self.rows && pos.column < self.columns)
            .then(|| usize::from(pos.row) * usize::from(self.columns) + usize::from(pos.column))
    }

    /// Returns the value at `pos`, or `None` outside the grid.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<&T> {
        self.index_of(pos).map(|i| &self.cells[i])
    }

    /// Returns the value at `pos` mutably, or `None` outside the grid.
    pub fn get_mut(&mut self, pos: Position) -> Option<&mut T> {
        self.index_of(pos).map(|i| &mut self.cells[i])
    }

    /// Returns every `(position, value)` pair in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &T)> {
        let columns = usize::from(self.columns);
        self.cells.iter().enumerate().map(move |(i, value)| {
            #[expect(clippy::cast_possible_truncation)]
            let pos = Position::new((i / columns) as u8, (i % columns) as u8);
            (pos, value)
        })
    }
}

impl<T> Index<Position> for CellGrid<T> {
    type Output = T;

    fn index(&self, pos: Position) -> &T {
        let Some(value) = self.get(pos) else {
            panic!("position {pos} outside {}x{} grid", self.rows, self.columns);
        };
        value
    }
}

impl<T> IndexMut<Position> for CellGrid<T> {
    fn index_mut(&mut self, pos: Position) -> &mut T {
        let (rows, columns) = (self.rows, self.columns);
        let Some(value) = self.get_mut(pos) else {
            panic!("position {pos} outside {rows}x{columns} grid");
        };
        value
    }
}
