//! Single-step orchestration of the elimination engine.

use pencilmark_core::{Grid, Position, RuleModel};

use crate::{CellChange, Eliminator, ScanContext, ScannerSettings};

/// The result of a step that changed the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    /// The grid after the step.
    pub grid: Grid,
    /// The cell change that ended the step.
    pub change: CellChange,
}

/// Owns the [`ScanContext`] across steps.
///
/// The context is tied to the revision of the grid it was built from. A step
/// against any other revision rebuilds it, so external edits are picked up
/// without explicit invalidation.
#[derive(Debug, Default)]
pub struct ScanDriver {
    context: Option<(u64, ScanContext)>,
}

impl ScanDriver {
    /// Creates a driver without a context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the live context, if any.
    #[must_use]
    pub fn context(&self) -> Option<&ScanContext> {
        self.context.as_ref().map(|(_, ctx)| ctx)
    }

    /// Discards the context.
    pub fn reset(&mut self) {
        self.context = None;
    }

    /// Marks the context as matching `revision`.
    ///
    /// Call this after storing a step's grid under a new revision.
    pub fn acknowledge(&mut self, revision: u64) {
        if let Some((rev, _)) = &mut self.context {
            *rev = revision;
        }
    }

    /// Runs the engine over the worklist until one cell changes.
    ///
    /// The context is built first if it is missing or stale, with the
    /// worklist prioritized around `seed` when given. After a change the
    /// worklist is reprioritized around the changed cell. Returns `None` when
    /// no cell in the worklist changes; the context is kept for inspection.
    pub fn step(
        &mut self,
        rules: &RuleModel,
        settings: &ScannerSettings,
        grid: &Grid,
        revision: u64,
        seed: Option<Position>,
    ) -> Option<StepOutcome> {
        let ctx = match &mut self.context {
            Some((rev, ctx)) if *rev == revision => ctx,
            slot => {
                let mut ctx = ScanContext::build(rules, grid);
                if let Some(seed) = seed {
                    ctx.prioritize(rules, settings, seed);
                }
                &mut slot.insert((revision, ctx)).1
            }
        };

        let eliminator = Eliminator::new(rules, settings);
        let mut working = grid.clone();
        let queue = ctx.queue().to_vec();
        for cell in queue {
            if let Some(change) = eliminator.update_candidate_values(ctx, &mut working, cell) {
                ctx.prioritize(rules, settings, cell);
                return Some(StepOutcome {
                    grid: working,
                    change,
                });
            }
        }
        log::debug!("no change in {} queued cells", ctx.queue().len());
        None
    }
}

#[cfg(test)]
mod tests {
    use pencilmark_core::{Digit, Dimensions};

    use super::*;

    fn six() -> (RuleModel, Grid) {
        let rules = RuleModel::new(Dimensions::square(6));
        let grid = Grid::from_givens(
            *rules.dimensions(),
            "
            12345.
            ......
            ......
            ......
            ......
            ......
            ",
        )
        .unwrap();
        (rules, grid)
    }

    #[test]
    fn test_step_commits_and_keeps_context() {
        let (rules, grid) = six();
        let settings = ScannerSettings::default();
        let mut driver = ScanDriver::new();
        let outcome = driver.step(&rules, &settings, &grid, 0, None).unwrap();
        assert_eq!(outcome.change.cell, Position::new(0, 5));
        assert_eq!(outcome.change.committed, Digit::from_char('6'));
        assert_eq!(outcome.grid.digit_at(Position::new(0, 5)), Digit::from_char('6'));
        // the input grid is untouched
        assert_eq!(grid.digit_at(Position::new(0, 5)), None);

        driver.acknowledge(1);
        assert!(!driver.context().unwrap().queue().contains(&Position::new(0, 5)));
        assert!(driver.step(&rules, &settings, &outcome.grid, 1, None).is_none());
        assert!(driver.context().is_some());
    }

    #[test]
    fn test_stale_revision_rebuilds_context() {
        let (rules, grid) = six();
        let settings = ScannerSettings::default();
        let mut driver = ScanDriver::new();
        let outcome = driver.step(&rules, &settings, &grid, 0, None).unwrap();
        // without acknowledging, revision 1 is treated as an external edit
        assert!(driver.step(&rules, &settings, &outcome.grid, 1, None).is_none());
        let ctx = driver.context().unwrap();
        assert_eq!(ctx.queue().len(), 30);
    }

    #[test]
    fn test_reset_discards_context() {
        let (rules, grid) = six();
        let settings = ScannerSettings::default();
        let mut driver = ScanDriver::new();
        let seed = Position::new(5, 0);
        let outcome = driver.step(&rules, &settings, &grid, 0, Some(seed)).unwrap();
        assert_eq!(outcome.change.cell, Position::new(0, 5));
        driver.reset();
        assert!(driver.context().is_none());
    }
}
