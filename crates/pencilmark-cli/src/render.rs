use std::fmt::Write as _;

use pencilmark_core::{Grid, Position, RuleModel};
use pencilmark_scanner::SeenCell;

/// Renders the playable area, with `.` for empty cells and lines between
/// the default blocks.
pub fn grid(rules: &RuleModel, grid: &Grid) -> String {
    let dims = rules.dimensions();
    let block = dims.default_block_size();
    let mut out = String::new();
    for row in 0..dims.playable_rows() {
        let mut line = String::new();
        for column in 0..dims.playable_columns() {
            if column > 0 {
                line.push(' ');
                if block.is_some_and(|b| column % b.width == 0) {
                    line.push_str("| ");
                }
            }
            let c = dims
                .from_playable(row, column)
                .and_then(|pos| grid.digit_at(pos))
                .map_or('.', |d| d.to_char());
            line.push(c);
        }
        if row > 0 && block.is_some_and(|b| row % b.height == 0) {
            let rule = line
                .chars()
                .map(|c| if c == '|' { '+' } else { '-' })
                .collect::<String>();
            out.push_str(&rule);
            out.push('\n');
        }
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Renders a list of cells as `r1c1 r1c2 ...`.
pub fn cells(cells: &[Position]) -> String {
    let mut out = String::new();
    for (i, pos) in cells.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{pos}");
    }
    out
}

/// Renders seen cells one per line, grouped by constraint.
pub fn seen(seen: &[SeenCell]) -> String {
    let mut out = String::new();
    for group in seen.chunk_by(|a, b| a.context == b.context) {
        let positions = group.iter().map(|s| s.position).collect::<Vec<_>>();
        let _ = writeln!(out, "{}: {}", group[0].context, cells(&positions));
    }
    out
}

#[cfg(test)]
mod tests {
    use pencilmark_core::Dimensions;

    use super::*;

    #[test]
    fn test_grid_with_block_lines() {
        let rules = RuleModel::new(Dimensions::square(4));
        let grid = Grid::from_givens(*rules.dimensions(), "12.. 34.. .... ...1").unwrap();
        assert_eq!(
            super::grid(&rules, &grid),
            "1 2 | . .\n3 4 | . .\n----+----\n. . | . .\n. . | . 1\n"
        );
    }

    #[test]
    fn test_cells_are_space_separated() {
        assert_eq!(cells(&[Position::new(0, 0), Position::new(8, 2)]), "r1c1 r9c3");
        assert_eq!(cells(&[]), "");
    }
}
