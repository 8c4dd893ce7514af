//! The scanner's working state: candidate sets and the worklist.

use pencilmark_core::{CellGrid, CellState, DigitSet, Grid, Position, RuleModel};

use crate::{ScannerSettings, visibility};

/// Candidate sets of every unsolved cell plus the worklist of cells still
/// worth examining.
///
/// A context is built from a grid snapshot and is only meaningful for the
/// grid revision it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanContext {
    candidates: CellGrid<Option<DigitSet>>,
    queue: Vec<Position>,
}

impl ScanContext {
    /// Builds a context from the current grid.
    ///
    /// Every unsolved playable cell enters the worklist in row-major order.
    /// Its candidates are its center marks restricted to the alphabet, or the
    /// full alphabet if it has none.
    #[must_use]
    pub fn build(rules: &RuleModel, grid: &Grid) -> Self {
        let dims = rules.dimensions();
        let alphabet = rules.alphabet().as_set();
        let mut candidates = CellGrid::filled(dims, None);
        let mut queue = vec![];
        for pos in dims.playable_positions() {
            let Some(CellState::Unsolved(marks)) = grid.cell(pos) else {
                continue;
            };
            let from_marks = marks.center & alphabet;
            let initial = if from_marks.is_empty() {
                alphabet
            } else {
                from_marks
            };
            candidates[pos] = Some(initial);
            queue.push(pos);
        }
        log::debug!("built scan context with {} unsolved cells", queue.len());
        Self { candidates, queue }
    }

    /// Returns the candidates of `pos`, or `None` if the cell is not tracked.
    #[must_use]
    pub fn candidates(&self, pos: Position) -> Option<DigitSet> {
        self.candidates.get(pos).copied().flatten()
    }

    /// Replaces the candidates of a tracked cell.
    ///
    /// Untracked cells are left alone.
    pub fn set_candidates(&mut self, pos: Position, set: DigitSet) {
        if let Some(slot @ Some(_)) = self.candidates.get_mut(pos) {
            *slot = Some(set);
        }
    }

    /// Returns the worklist.
    #[must_use]
    pub fn queue(&self) -> &[Position] {
        &self.queue
    }

    /// Returns `true` if no cell is left to examine.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.queue.is_empty()
    }

    /// Removes a committed or contradictory cell from the worklist and stops
    /// tracking it.
    pub fn retire(&mut self, pos: Position) {
        self.queue.retain(|&p| p != pos);
        if let Some(slot) = self.candidates.get_mut(pos) {
            *slot = None;
        }
    }

    /// Reorders the worklist around `anchor`.
    ///
    /// Cells seen from the anchor come first, then cells with fewer candidates.
    /// The sort is stable, so ties keep their current order.
    pub fn prioritize(&mut self, rules: &RuleModel, settings: &ScannerSettings, anchor: Position) {
        let seen = visibility::seen_positions(rules, settings, anchor);
        let candidates = &self.candidates;
        self.queue.sort_by_key(|&pos| {
            let len = candidates
                .get(pos)
                .copied()
                .flatten()
                .map_or(usize::MAX, DigitSet::len);
            (!seen.contains(&pos), len)
        });
    }
}

#[cfg(test)]
mod tests {
    use pencilmark_core::{Dimensions, Digit};

    use super::*;

    fn grid_4x4() -> (RuleModel, Grid) {
        let rules = RuleModel::new(Dimensions::square(4));
        let mut grid = Grid::from_givens(
            *rules.dimensions(),
            "
            1...
            ....
            ....
            ....
            ",
        )
        .unwrap();
        grid.set_placed(Position::new(3, 3), Digit::from_char('2').unwrap()).unwrap();
        grid.set_center_marks(Position::new(2, 2), DigitSet::from_marks("34")).unwrap();
        grid.set_center_marks(Position::new(2, 1), DigitSet::from_marks("7")).unwrap();
        (rules, grid)
    }

    #[test]
    fn test_build_tracks_unsolved_cells() {
        let (rules, grid) = grid_4x4();
        let ctx = ScanContext::build(&rules, &grid);
        assert_eq!(ctx.queue().len(), 14);
        assert_eq!(ctx.candidates(Position::new(0, 0)), None);
        assert_eq!(ctx.candidates(Position::new(3, 3)), None);
        assert_eq!(
            ctx.candidates(Position::new(2, 2)),
            Some(DigitSet::from_marks("34"))
        );
        // marks outside the alphabet fall back to the full alphabet
        assert_eq!(
            ctx.candidates(Position::new(2, 1)),
            Some(DigitSet::from_marks("1234"))
        );
    }

    #[test]
    fn test_prioritize_puts_seen_cells_first() {
        let (rules, grid) = grid_4x4();
        let mut ctx = ScanContext::build(&rules, &grid);
        let settings = ScannerSettings::default();
        ctx.prioritize(&rules, &settings, Position::new(2, 2));
        let seen = visibility::seen_positions(&rules, &settings, Position::new(2, 2));
        let tracked = ctx.queue().iter().filter(|p| seen.contains(p)).count();
        let (head, tail) = ctx.queue().split_at(tracked);
        assert!(head.iter().all(|p| seen.contains(p)));
        assert!(tail.iter().all(|p| !seen.contains(p)));
        // fewest candidates first among the rest
        assert_eq!(tail[0], Position::new(2, 2));
    }

    #[test]
    fn test_retire_and_set_candidates() {
        let (rules, grid) = grid_4x4();
        let mut ctx = ScanContext::build(&rules, &grid);
        let pos = Position::new(1, 1);
        ctx.set_candidates(pos, DigitSet::from_marks("3"));
        assert_eq!(ctx.candidates(pos), Some(DigitSet::from_marks("3")));
        ctx.retire(pos);
        assert_eq!(ctx.candidates(pos), None);
        assert!(!ctx.queue().contains(&pos));
        ctx.set_candidates(pos, DigitSet::from_marks("4"));
        assert_eq!(ctx.candidates(pos), None);
    }
}
