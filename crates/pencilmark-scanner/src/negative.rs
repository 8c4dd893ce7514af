//! Negative constraints between orthogonal neighbors.
//!
//! A negative constraint states that *every* clue of some kind is given, so
//! two neighbors without such a clue between them may not satisfy the clue's
//! relation. For example, with all white Kropki dots given, undotted
//! neighbors cannot be consecutive.

use pencilmark_core::{BorderClueKind, Digit, DigitSet, Grid, Position, RuleFlags, RuleModel};
use tinyvec::ArrayVec;

use crate::ScannerSettings;

/// A relation forbidden between neighbors that lack the matching clue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum NegativeRule {
    /// No consecutive neighbors (non-consecutive or negative white dots).
    #[display("consecutive")]
    Consecutive,
    /// No neighbor holding double or half the value (negative black dots).
    #[display("ratio 2")]
    Double,
    /// No neighbors summing to 10 (negative X).
    #[display("sum 10")]
    SumTen,
    /// No neighbors summing to 5 (negative V).
    #[display("sum 5")]
    SumFive,
}

impl NegativeRule {
    /// Returns the clue whose presence lifts the restriction.
    #[must_use]
    pub const fn exempting_clue(self) -> BorderClueKind {
        match self {
            Self::Consecutive => BorderClueKind::KropkiWhite,
            Self::Double => BorderClueKind::KropkiBlack,
            Self::SumTen => BorderClueKind::XvX,
            Self::SumFive => BorderClueKind::XvV,
        }
    }

    /// Returns `true` if two values satisfy the forbidden relation.
    #[must_use]
    pub const fn relates(self, a: u32, b: u32) -> bool {
        match self {
            Self::Consecutive => a.abs_diff(b) == 1,
            Self::Double => a == 2 * b || b == 2 * a,
            Self::SumTen => a + b == 10,
            Self::SumFive => a + b == 5,
        }
    }
}

/// Returns the negative rules enabled by the puzzle flags and the settings.
#[must_use]
pub fn active_rules(rules: &RuleModel, settings: &ScannerSettings) -> Vec<NegativeRule> {
    let flags = rules.flags();
    let mut active = vec![];
    let consecutive = (settings.scan_non_consecutive && flags.contains(RuleFlags::NON_CONSECUTIVE))
        || (settings.scan_negative_kropki && flags.contains(RuleFlags::NEGATIVE_WHITE));
    if consecutive {
        active.push(NegativeRule::Consecutive);
    }
    if settings.scan_negative_kropki && flags.contains(RuleFlags::NEGATIVE_BLACK) {
        active.push(NegativeRule::Double);
    }
    if settings.scan_negative_xv && flags.contains(RuleFlags::NEGATIVE_X) {
        active.push(NegativeRule::SumTen);
    }
    if settings.scan_negative_xv && flags.contains(RuleFlags::NEGATIVE_V) {
        active.push(NegativeRule::SumFive);
    }
    active
}

/// Returns the candidates of `cell` ruled out by negative constraints, each
/// paired with the neighbor responsible.
///
/// Only neighbors holding a given or placed digit are considered.
#[must_use]
pub fn forbidden_candidates(
    rules: &RuleModel,
    settings: &ScannerSettings,
    grid: &Grid,
    cell: Position,
    candidates: DigitSet,
) -> Vec<(Digit, Position)> {
    let active = active_rules(rules, settings);
    if active.is_empty() {
        return vec![];
    }

    let dims = rules.dimensions();
    let neighbors: ArrayVec<[(Position, u32); 4]> = [(-1, 0), (1, 0), (0, -1), (0, 1)]
        .into_iter()
        .filter_map(|(dr, dc)| cell.offset(dr, dc))
        .filter(|&n| dims.is_playable(n))
        .filter_map(|n| grid.digit_at(n).map(|d| (n, d.numeric_value())))
        .collect();

    let mut forbidden = vec![];
    for (neighbor, value) in neighbors {
        for &rule in &active {
            if rules.has_border_clue(cell, neighbor, rule.exempting_clue()) {
                continue;
            }
            for digit in candidates {
                if rule.relates(digit.numeric_value(), value)
                    && !forbidden.iter().any(|&(d, _)| d == digit)
                {
                    log::trace!("{digit} at {cell} breaks {rule} with {neighbor}");
                    forbidden.push((digit, neighbor));
                }
            }
        }
    }
    forbidden
}
