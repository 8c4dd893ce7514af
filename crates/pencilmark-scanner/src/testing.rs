//! Test utilities for scanner behavior.
//!
//! This module provides [`ScanTester`], a harness that drives a [`Session`]
//! step by step and compares the result with the initial grid.
//!
//! # Example
//!
//! ```
//! # use pencilmark_core::{Dimensions, Position};
//! # use pencilmark_scanner::testing::ScanTester;
//! ScanTester::from_givens(Dimensions::square(4), "
//!     123.
//!     ....
//!     ....
//!     ....
//! ")
//! .assert_step(true)
//! .assert_placed(Position::new(0, 3), '4')
//! .assert_unchanged(Position::new(1, 0));
//! ```

use pencilmark_core::{Digit, DigitSet, Dimensions, Grid, Position, RuleModel};

use crate::{ScannerSettings, Session};

/// A test harness for the scanner.
///
/// All methods return `self` for chaining. Assertions panic with a message
/// describing the expected and actual state, reported at the caller's
/// location.
#[derive(Debug)]
pub struct ScanTester {
    initial: Grid,
    session: Session,
}

fn marks(s: &str) -> DigitSet {
    DigitSet::from_marks(s)
}

impl ScanTester {
    /// Creates a tester for a rule model and grid.
    #[must_use]
    pub fn new(rules: RuleModel, grid: Grid) -> Self {
        Self {
            initial: grid.clone(),
            session: Session::new(rules, grid),
        }
    }

    /// Creates a tester for a grid string with default rules.
    ///
    /// # Panics
    ///
    /// Panics if the string cannot be parsed.
    #[track_caller]
    #[must_use]
    pub fn from_givens(dimensions: Dimensions, text: &str) -> Self {
        let rules = RuleModel::new(dimensions);
        let grid = Grid::from_givens(dimensions, text).unwrap();
        Self::new(rules, grid)
    }

    /// Replaces the scanner settings.
    #[must_use]
    pub fn with_settings(mut self, settings: ScannerSettings) -> Self {
        self.session.configure(settings);
        self
    }

    /// Sets center marks before scanning.
    ///
    /// # Panics
    ///
    /// Panics if the cell cannot hold marks.
    #[track_caller]
    #[must_use]
    pub fn with_center_marks(mut self, pos: Position, s: &str) -> Self {
        self.session.set_center_marks(pos, marks(s)).unwrap();
        self.initial = self.session.grid().clone();
        self
    }

    /// Sets corner marks before scanning.
    ///
    /// # Panics
    ///
    /// Panics if the cell cannot hold marks.
    #[track_caller]
    #[must_use]
    pub fn with_corner_marks(mut self, pos: Position, s: &str) -> Self {
        self.session.set_corner_marks(pos, marks(s)).unwrap();
        self.initial = self.session.grid().clone();
        self
    }

    /// Returns the current grid.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        self.session.grid()
    }

    /// Returns the session under test.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Runs one step, ignoring its result.
    pub fn step(mut self) -> Self {
        self.session.step(None);
        self
    }

    /// Runs one step and asserts whether it changed the grid.
    ///
    /// # Panics
    ///
    /// Panics if the step result differs from `expected`.
    #[track_caller]
    pub fn assert_step(mut self, expected: bool) -> Self {
        let changed = self.session.step(None);
        assert_eq!(
            changed, expected,
            "Expected step to return {expected}, but it returned {changed}"
        );
        self
    }

    /// Steps until no cell changes.
    ///
    /// # Panics
    ///
    /// Panics if the scanner keeps changing the grid for more steps than
    /// there are candidate eliminations in the puzzle.
    #[track_caller]
    pub fn run_to_fixed_point(mut self) -> Self {
        let dims = self.session.rules().dimensions();
        let cap = usize::from(dims.playable_rows())
            * usize::from(dims.playable_columns())
            * (self.session.rules().alphabet().len() + 1);
        for _ in 0..cap {
            if !self.session.step(None) {
                return self;
            }
        }
        panic!("Expected the scan to reach a fixed point within {cap} steps");
    }

    /// Asserts that an initially empty cell now holds `digit`.
    ///
    /// # Panics
    ///
    /// Panics if the cell was already filled or holds another digit.
    #[track_caller]
    pub fn assert_placed(self, pos: Position, digit: char) -> Self {
        let initial = self.initial.digit_at(pos);
        let current = self.grid().digit_at(pos);
        assert_eq!(
            initial, None,
            "Expected {pos} to be initially empty, but it held {initial:?}"
        );
        assert_eq!(
            current,
            Digit::from_char(digit),
            "Expected {pos} to hold {digit}, but it holds {current:?}"
        );
        self
    }

    /// Asserts the scanner's candidate set of a cell.
    ///
    /// # Panics
    ///
    /// Panics if no scan context tracks the cell, or the candidates differ.
    #[track_caller]
    pub fn assert_candidates(self, pos: Position, expected: &str) -> Self {
        let expected = marks(expected);
        let current = self.session.candidates(pos);
        assert_eq!(
            current,
            Some(expected),
            "Expected candidates {expected} at {pos}, but found {current:?}"
        );
        self
    }

    /// Asserts that none of `digits` is a candidate of a cell.
    ///
    /// # Panics
    ///
    /// Panics if no scan context tracks the cell, or a digit remains.
    #[track_caller]
    pub fn assert_excludes(self, pos: Position, digits: &str) -> Self {
        let digits = marks(digits);
        let Some(current) = self.session.candidates(pos) else {
            panic!("Expected {pos} to be tracked by the scan context");
        };
        assert!(
            (current & digits).is_empty(),
            "Expected {digits} to be excluded at {pos}, but candidates are {current}"
        );
        self
    }

    /// Asserts the center marks of a cell.
    ///
    /// # Panics
    ///
    /// Panics if the marks differ.
    #[track_caller]
    pub fn assert_center_marks(self, pos: Position, expected: &str) -> Self {
        let current = self.grid().center_marks(pos);
        assert_eq!(
            current,
            marks(expected),
            "Expected center marks {expected:?} at {pos}, but found {current}"
        );
        self
    }

    /// Asserts the corner marks of a cell.
    ///
    /// # Panics
    ///
    /// Panics if the marks differ.
    #[track_caller]
    pub fn assert_corner_marks(self, pos: Position, expected: &str) -> Self {
        let current = self.grid().corner_marks(pos);
        assert_eq!(
            current,
            marks(expected),
            "Expected corner marks {expected:?} at {pos}, but found {current}"
        );
        self
    }

    /// Asserts that a cell's value and marks are as they were initially.
    ///
    /// # Panics
    ///
    /// Panics if the cell changed.
    #[track_caller]
    pub fn assert_unchanged(self, pos: Position) -> Self {
        let initial = self.initial.cell(pos);
        let current = self.grid().cell(pos);
        assert_eq!(
            initial, current,
            "Expected no change at {pos}, but {initial:?} became {current:?}"
        );
        self
    }
}
