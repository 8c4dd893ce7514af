//! The elimination engine: narrows one cell's candidates and writes the
//! result back to the grid.

use pencilmark_core::{CellState, Digit, DigitSet, Grid, PencilMarks, Position, RuleModel};

use crate::{
    ScanContext, ScannerSettings,
    negative,
    pointing::{self, PointingSet},
    tuples::{self, DetectScope},
    visibility,
};

/// A visible change to one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellChange {
    /// The cell that changed.
    pub cell: Position,
    /// The digit committed to the cell, if its candidates collapsed.
    pub committed: Option<Digit>,
    /// Cells responsible for the eliminations, for highlighting.
    pub highlights: Vec<Position>,
}

/// Runs the elimination passes for single cells.
///
/// # Examples
///
/// ```
/// use pencilmark_core::{Dimensions, Grid, Position, RuleModel};
/// use pencilmark_scanner::{Eliminator, ScanContext, ScannerSettings};
///
/// let rules = RuleModel::new(Dimensions::square(4));
/// let mut grid = Grid::from_givens(*rules.dimensions(), "
///     123.
///     ....
///     ....
///     ....
/// ").unwrap();
/// let settings = ScannerSettings::default();
/// let mut ctx = ScanContext::build(&rules, &grid);
///
/// let change = Eliminator::new(&rules, &settings)
///     .update_candidate_values(&mut ctx, &mut grid, Position::new(0, 3))
///     .unwrap();
/// assert_eq!(change.committed.map(|d| d.to_char()), Some('4'));
/// assert!(grid.cell(Position::new(0, 3)).unwrap().is_placed());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Eliminator<'a> {
    rules: &'a RuleModel,
    settings: &'a ScannerSettings,
}

impl<'a> Eliminator<'a> {
    /// Creates an eliminator for a rule model and settings.
    #[must_use]
    pub fn new(rules: &'a RuleModel, settings: &'a ScannerSettings) -> Self {
        Self { rules, settings }
    }

    /// Narrows the candidates of `cell` and updates `grid` accordingly.
    ///
    /// The passes run in order, each only while more than one candidate
    /// remains: digits placed on seen cells, digits of seen tuples (with
    /// centre marks enabled), digits of seen pointing sets (with corner marks
    /// enabled, standard puzzles only), and negative constraints (extreme
    /// mode only).
    ///
    /// A single remaining candidate is committed. Otherwise center marks are
    /// resynced to the candidates and corner marks filtered by them. Returns
    /// `None` unless the cell's value or marks changed; narrowed candidates
    /// are still recorded in `ctx`.
    pub fn update_candidate_values(
        &self,
        ctx: &mut ScanContext,
        grid: &mut Grid,
        cell: Position,
    ) -> Option<CellChange> {
        let mut candidates = ctx.candidates(cell)?;
        let mut highlights = vec![];

        if candidates.len() > 1 {
            let before = candidates;
            self.eliminate(grid, cell, &mut candidates, &mut highlights);
            if candidates == before {
                return None;
            }
            log::trace!("{cell}: {before} -> {candidates}");
            ctx.set_candidates(cell, candidates);
            if candidates.is_empty() {
                log::warn!("no candidates left at {cell}");
                ctx.retire(cell);
                return None;
            }
        }

        let Some(&CellState::Unsolved(marks)) = grid.cell(cell) else {
            ctx.retire(cell);
            return None;
        };

        let committed = candidates.as_single();
        let new_state = match committed {
            Some(digit) => CellState::Placed(digit),
            None if candidates.is_empty() => return None,
            None => CellState::Unsolved(PencilMarks {
                center: if marks.center.is_empty() {
                    DigitSet::EMPTY
                } else {
                    candidates
                },
                corner: marks.corner & candidates,
            }),
        };
        if let Some(digit) = committed {
            log::debug!("commit {digit} at {cell}");
            ctx.retire(cell);
        }
        if new_state == CellState::Unsolved(marks) {
            return None;
        }

        let new_corner = new_state.marks().map_or(DigitSet::EMPTY, |m| m.corner);
        if new_corner != marks.corner {
            let sets = pointing::find_pointing_sets(
                self.rules,
                self.settings,
                grid,
                cell,
                DetectScope::Anchored,
            );
            cascade(ctx, grid, cell, committed, new_corner, &sets);
        }
        grid.set_cell(cell, new_state).ok()?;

        dedup_in_order(&mut highlights);
        Some(CellChange {
            cell,
            committed,
            highlights,
        })
    }

    fn eliminate(
        &self,
        grid: &Grid,
        cell: Position,
        candidates: &mut DigitSet,
        highlights: &mut Vec<Position>,
    ) {
        let seen = visibility::seen_cells(self.rules, self.settings, cell);
        for digit in *candidates {
            if let Some(s) = seen.iter().find(|s| grid.digit_at(s.position) == Some(digit)) {
                candidates.remove(digit);
                highlights.push(s.position);
            }
        }

        if candidates.len() > 1 && self.settings.use_centre_marks {
            let tuples =
                tuples::find_tuples(self.rules, self.settings, grid, cell, DetectScope::Seen);
            for digit in *candidates {
                if let Some(t) = tuples.iter().find(|t| t.digits.contains(digit)) {
                    candidates.remove(digit);
                    highlights.extend(&t.cells);
                }
            }
        }

        if candidates.len() > 1 && !self.rules.is_non_standard() && self.settings.use_corner_marks
        {
            let sets = pointing::find_pointing_sets(
                self.rules,
                self.settings,
                grid,
                cell,
                DetectScope::Seen,
            );
            for digit in *candidates {
                if let Some(s) = sets.iter().find(|s| s.digit == digit) {
                    candidates.remove(digit);
                    highlights.extend(&s.cells);
                }
            }
        }

        if candidates.len() > 1 && self.settings.mode.is_extreme() {
            for (digit, neighbor) in
                negative::forbidden_candidates(self.rules, self.settings, grid, cell, *candidates)
            {
                candidates.remove(digit);
                highlights.push(neighbor);
            }
        }
    }
}

/// Applies the consequences of a corner-mark change at `cell` to the
/// pointing sets it belonged to.
///
/// Siblings lose the committed digit from their corner marks. A two-cell
/// set whose digit left `cell` forces the digit into the other holder.
fn cascade(
    ctx: &mut ScanContext,
    grid: &mut Grid,
    cell: Position,
    committed: Option<Digit>,
    new_corner: DigitSet,
    sets: &[PointingSet],
) {
    for set in sets {
        if Some(set.digit) == committed {
            for &sibling in set.cells.iter().filter(|&&p| p != cell) {
                let corner = grid.corner_marks(sibling);
                let mut trimmed = corner;
                trimmed.remove(set.digit);
                if trimmed != corner {
                    let _ = grid.set_corner_marks(sibling, trimmed);
                }
            }
        } else if set.cells.len() == 2 && !new_corner.contains(set.digit) {
            let Some(&other) = set.cells.iter().find(|&&p| p != cell) else {
                continue;
            };
            if grid.digit_at(other).is_some() {
                continue;
            }
            log::debug!("pointing set forces {} at {other}", set.digit);
            let only = DigitSet::from_elem(set.digit);
            ctx.set_candidates(other, only);
            let forced = CellState::Unsolved(PencilMarks {
                center: only,
                corner: DigitSet::EMPTY,
            });
            let _ = grid.set_cell(other, forced);
        }
    }
}

fn dedup_in_order(cells: &mut Vec<Position>) {
    let mut seen = Vec::with_capacity(cells.len());
    cells.retain(|p| {
        if seen.contains(p) {
            false
        } else {
            seen.push(*p);
            true
        }
    });
}
