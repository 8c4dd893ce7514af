//! Pointing-set detection from corner marks.
//!
//! Corner marks record where a digit can still go inside a region. When every
//! corner-marked holder of a digit is seen from a cell, that cell cannot hold
//! the digit.

use pencilmark_core::{Digit, DigitSet, Grid, Position, RuleModel};

use crate::{ScannerSettings, tuples::DetectScope, visibility};

/// The cells of one normal region that carry a digit as a corner mark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointingSet {
    /// The corner-marked digit.
    pub digit: Digit,
    /// Every cell of the region carrying the digit as a corner mark.
    pub cells: Vec<Position>,
}

fn holders(rules: &RuleModel, grid: &Grid, of: Position, digit: Digit) -> Vec<Position> {
    rules
        .normal_region_of(of)
        .map(|region| {
            region
                .positions
                .iter()
                .copied()
                .filter(|&p| grid.corner_marks(p).contains(digit))
                .collect()
        })
        .unwrap_or_default()
}

/// Finds pointing sets around `cell`.
///
/// With [`DetectScope::Seen`], a set is reported for every corner mark of
/// every seen cell whose region holders are all seen from `cell`. With
/// [`DetectScope::Anchored`], one set is reported per corner mark of `cell`
/// itself, listing its holders in the cell's own region.
#[must_use]
pub fn find_pointing_sets(
    rules: &RuleModel,
    settings: &ScannerSettings,
    grid: &Grid,
    cell: Position,
    scope: DetectScope,
) -> Vec<PointingSet> {
    match scope {
        DetectScope::Seen => seen_sets(rules, settings, grid, cell),
        DetectScope::Anchored => grid
            .corner_marks(cell)
            .iter()
            .map(|digit| PointingSet {
                digit,
                cells: holders(rules, grid, cell, digit),
            })
            .collect(),
    }
}

fn seen_sets(
    rules: &RuleModel,
    settings: &ScannerSettings,
    grid: &Grid,
    cell: Position,
) -> Vec<PointingSet> {
    let seen = visibility::seen_positions(rules, settings, cell);
    let mut sets: Vec<PointingSet> = vec![];
    for &source in &seen {
        let corner: DigitSet = grid.corner_marks(source);
        for digit in corner {
            let cells = holders(rules, grid, source, digit);
            if cells.is_empty() || !cells.iter().all(|p| seen.contains(p)) {
                continue;
            }
            if sets.iter().any(|s| s.digit == digit && s.cells == cells) {
                continue;
            }
            log::trace!("pointing set {digit} seen from {cell}: {cells:?}");
            sets.push(PointingSet { digit, cells });
        }
    }
    sets
}

#[cfg(test)]
mod tests {
    use pencilmark_core::Dimensions;

    use super::*;

    fn d(c: char) -> Digit {
        Digit::from_char(c).unwrap()
    }

    fn corner(grid: &mut Grid, pos: Position, s: &str) {
        grid.set_corner_marks(pos, DigitSet::from_marks(s)).unwrap();
    }

    fn setup() -> (RuleModel, Grid) {
        let rules = RuleModel::new(Dimensions::square(9));
        let mut grid = Grid::new(*rules.dimensions());
        // 5 is confined to row 0 of the top-left box
        corner(&mut grid, Position::new(0, 0), "5");
        corner(&mut grid, Position::new(0, 2), "59");
        // 9 also appears outside row 0
        corner(&mut grid, Position::new(2, 1), "9");
        (rules, grid)
    }

    #[test]
    fn test_set_seen_along_row() {
        let (rules, grid) = setup();
        let settings = ScannerSettings::default();
        let sets =
            find_pointing_sets(&rules, &settings, &grid, Position::new(0, 6), DetectScope::Seen);
        assert_eq!(
            sets,
            vec![PointingSet {
                digit: d('5'),
                cells: vec![Position::new(0, 0), Position::new(0, 2)],
            }]
        );
    }

    #[test]
    fn test_set_not_fully_seen_is_ignored() {
        let (rules, grid) = setup();
        let settings = ScannerSettings::default();
        let sets =
            find_pointing_sets(&rules, &settings, &grid, Position::new(0, 6), DetectScope::Seen);
        assert!(sets.iter().all(|s| s.digit != d('9')));
        // row 5 sees none of the holders
        assert!(
            find_pointing_sets(&rules, &settings, &grid, Position::new(5, 6), DetectScope::Seen)
                .is_empty()
        );
    }

    #[test]
    fn test_anchored_sets() {
        let (rules, grid) = setup();
        let settings = ScannerSettings::default();
        let sets = find_pointing_sets(
            &rules,
            &settings,
            &grid,
            Position::new(0, 2),
            DetectScope::Anchored,
        );
        assert_eq!(
            sets,
            vec![
                PointingSet {
                    digit: d('5'),
                    cells: vec![Position::new(0, 0), Position::new(0, 2)],
                },
                PointingSet {
                    digit: d('9'),
                    cells: vec![Position::new(2, 1), Position::new(0, 2)],
                },
            ]
        );
    }
}
