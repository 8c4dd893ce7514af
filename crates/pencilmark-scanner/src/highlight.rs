//! Auxiliary cells to emphasize around a selection.

use pencilmark_core::{Grid, Position, RuleModel};

use crate::{
    HighlightMode, ScannerSettings,
    tuples::{self, DetectScope},
    visibility,
};

/// Returns the cells to highlight for `selection` under the configured
/// [`HighlightMode`].
///
/// The result never contains a selected cell. Nothing is mutated, and no
/// scan state is consulted.
#[must_use]
pub fn highlighted_cells(
    rules: &RuleModel,
    settings: &ScannerSettings,
    grid: &Grid,
    selection: &[Position],
) -> Vec<Position> {
    let Some((&first, rest)) = selection.split_first() else {
        return vec![];
    };

    let mut cells = match settings.highlight_mode {
        HighlightMode::None => return vec![],
        HighlightMode::Seen => {
            let mut common = visibility::seen_positions(rules, settings, first);
            for &other in rest {
                let seen = visibility::seen_positions(rules, settings, other);
                common.retain(|p| seen.contains(p));
            }
            common
        }
        HighlightMode::Tuples => {
            let mut union = vec![];
            for tuple in tuples::find_tuples(rules, settings, grid, first, DetectScope::Anchored) {
                if !rest.iter().all(|p| tuple.cells.contains(p)) {
                    continue;
                }
                for cell in tuple.cells {
                    if !union.contains(&cell) {
                        union.push(cell);
                    }
                }
            }
            union
        }
    };
    cells.retain(|p| !selection.contains(p));
    cells
}

#[cfg(test)]
mod tests {
    use pencilmark_core::{DigitSet, Dimensions};

    use super::*;

    fn sorted(mut cells: Vec<Position>) -> Vec<Position> {
        cells.sort_unstable_by_key(|p| (p.row, p.column));
        cells
    }

    #[test]
    fn test_none_and_empty_selection() {
        let rules = RuleModel::new(Dimensions::square(9));
        let grid = Grid::new(*rules.dimensions());
        let settings = ScannerSettings::default();
        assert!(highlighted_cells(&rules, &settings, &grid, &[Position::new(0, 0)]).is_empty());
        let seen = settings.with_highlight(HighlightMode::Seen);
        assert!(highlighted_cells(&rules, &seen, &grid, &[]).is_empty());
    }

    #[test]
    fn test_seen_single_cell() {
        let rules = RuleModel::new(Dimensions::square(9));
        let grid = Grid::new(*rules.dimensions());
        let settings = ScannerSettings::default().with_highlight(HighlightMode::Seen);
        let cells = highlighted_cells(&rules, &settings, &grid, &[Position::new(4, 4)]);
        // 8 in the row, 8 in the column, 4 more in the box
        assert_eq!(cells.len(), 20);
        assert!(!cells.contains(&Position::new(4, 4)));
    }

    #[test]
    fn test_seen_intersection_of_two_cells_in_one_box() {
        let rules = RuleModel::new(Dimensions::square(9));
        let grid = Grid::new(*rules.dimensions());
        let settings = ScannerSettings::default().with_highlight(HighlightMode::Seen);
        let selection = [Position::new(0, 0), Position::new(1, 1)];
        let cells = highlighted_cells(&rules, &settings, &grid, &selection);
        let expected = (0..3)
            .flat_map(|r| (0..3).map(move |c| Position::new(r, c)))
            .filter(|p| !selection.contains(p))
            .collect::<Vec<_>>();
        assert_eq!(sorted(cells), expected);
    }

    #[test]
    fn test_tuples_mode() {
        let rules = RuleModel::new(Dimensions::square(9));
        let mut grid = Grid::new(*rules.dimensions());
        grid.set_center_marks(Position::new(0, 0), DigitSet::from_marks("37")).unwrap();
        grid.set_center_marks(Position::new(1, 1), DigitSet::from_marks("37")).unwrap();
        grid.set_center_marks(Position::new(2, 2), DigitSet::from_marks("378")).unwrap();
        let settings = ScannerSettings::default().with_highlight(HighlightMode::Tuples);

        let cells = highlighted_cells(&rules, &settings, &grid, &[Position::new(0, 0)]);
        assert_eq!(cells, vec![Position::new(1, 1)]);

        // the second selected cell is not part of the pair
        let cells = highlighted_cells(
            &rules,
            &settings,
            &grid,
            &[Position::new(0, 0), Position::new(2, 2)],
        );
        assert!(cells.is_empty());

        // unmarked first cell
        let cells = highlighted_cells(&rules, &settings, &grid, &[Position::new(0, 1)]);
        assert!(cells.is_empty());
    }
}
