//! Tuple (naked subset) detection from center marks.
//!
//! Within one context, `k` cells whose center marks together hold exactly
//! `k` digits must take those digits between them, so no other cell of the
//! context can hold any of them.

use pencilmark_core::{DigitSet, Grid, Position, RuleModel};

use crate::{
    ScannerSettings,
    visibility::{self, Context, SeenCell},
};

/// Which cells a detector looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum DetectScope {
    /// Structures formed by the cells seen from the origin, excluding the origin.
    ///
    /// Used for elimination: the digits of such a structure cannot go in the origin.
    Seen,
    /// Structures the origin itself takes part in.
    ///
    /// Used for highlighting and for cascades after a commit.
    Anchored,
}

/// A group of cells that exclusively hold a set of digits within a context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tuple {
    /// The digits held by the group.
    pub digits: DigitSet,
    /// The context the group lives in.
    pub context: Context,
    /// The cells of the group; as many as there are digits.
    pub cells: Vec<Position>,
}

/// Finds tuples around `cell`.
///
/// With [`DetectScope::Seen`], every tuple formed by cells seen from `cell`
/// is reported once per context. With [`DetectScope::Anchored`], only the
/// first tuple containing `cell` is reported per context, and nothing is
/// reported if `cell` has no center marks.
///
/// Groups whose marks hold fewer digits than cells are contradictions and
/// are never reported.
#[must_use]
pub fn find_tuples(
    rules: &RuleModel,
    settings: &ScannerSettings,
    grid: &Grid,
    cell: Position,
    scope: DetectScope,
) -> Vec<Tuple> {
    if scope.is_anchored() && grid.center_marks(cell).is_empty() {
        return vec![];
    }

    let seen = visibility::seen_cells(rules, settings, cell);
    let mut tuples = vec![];
    for group in seen.chunk_by(|a, b| a.context == b.context) {
        let context = group[0].context;
        match scope {
            DetectScope::Seen => seen_tuples(grid, context, group, &mut tuples),
            DetectScope::Anchored => tuples.extend(anchored_tuple(grid, context, group, cell)),
        }
    }
    tuples
}

fn marked_cells(grid: &Grid, group: &[SeenCell]) -> Vec<(Position, DigitSet)> {
    group
        .iter()
        .map(|s| (s.position, grid.center_marks(s.position)))
        .filter(|(_, marks)| !marks.is_empty())
        .collect()
}

fn members_of(cells: &[(Position, DigitSet)], host: usize) -> Vec<Position> {
    let digits = cells[host].1;
    let mut members = vec![cells[host].0];
    members.extend(
        cells
            .iter()
            .enumerate()
            .filter(|&(i, (_, marks))| i != host && marks.is_subset(digits))
            .map(|(_, (pos, _))| *pos),
    );
    members
}

fn seen_tuples(grid: &Grid, context: Context, group: &[SeenCell], out: &mut Vec<Tuple>) {
    let mut cells = marked_cells(grid, group);
    cells.sort_by_key(|(_, marks)| std::cmp::Reverse(marks.len()));

    for host in 0..cells.len() {
        let digits = cells[host].1;
        if out.iter().any(|t| t.context == context && t.digits == digits) {
            continue;
        }
        let members = members_of(&cells, host);
        if members.len() == digits.len() {
            log::trace!("tuple {digits} in {context}: {members:?}");
            out.push(Tuple {
                digits,
                context,
                cells: members,
            });
        }
    }
}

fn anchored_tuple(
    grid: &Grid,
    context: Context,
    group: &[SeenCell],
    anchor: Position,
) -> Option<Tuple> {
    let mut cells = marked_cells(grid, group);
    if cells.is_empty() {
        return None;
    }
    cells.insert(0, (anchor, grid.center_marks(anchor)));
    cells.sort_by_key(|(_, marks)| marks.len());

    (0..cells.len()).find_map(|host| {
        let digits = cells[host].1;
        let members = members_of(&cells, host);
        (members.len() == digits.len() && members.contains(&anchor)).then(|| Tuple {
            digits,
            context,
            cells: members,
        })
    })
}
