//! Visibility resolution: which cells constrain a given cell.
//!
//! Two cells *see* each other when a constraint forbids them from holding the
//! same digit. Each relationship is tagged with the [`Context`] that produced
//! it; the tuple detector treats every context as an independent house.

use pencilmark_core::{Position, RegionKind, RuleFlags, RuleModel};

use crate::ScannerSettings;

/// Orientation of a main diagonal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum DiagonalSign {
    /// Bottom-left to top-right.
    #[display("+")]
    Positive,
    /// Top-left to bottom-right.
    #[display("-")]
    Negative,
}

/// The constraint that makes two cells see each other.
///
/// Indices refer to the position of the cage, path or region in the
/// [`RuleModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Context {
    /// Same row.
    #[display("ROW")]
    Row,
    /// Same column.
    #[display("COLUMN")]
    Column,
    /// Same normal region.
    #[display("REGION")]
    Region,
    /// Same main diagonal.
    #[display("DIAGONAL{_0}")]
    Diagonal(DiagonalSign),
    /// A king's move apart.
    #[display("ANTIKING")]
    AntiKing,
    /// A knight's move apart.
    #[display("ANTIKNIGHT")]
    AntiKnight,
    /// Same offset in different blocks.
    #[display("DISJOINTSET")]
    DisjointSet,
    /// Same unique cage.
    #[display("CAGE[{_0}]")]
    Cage(usize),
    /// Same unique path.
    #[display("PATH[{_0}]")]
    Path(usize),
    /// Same unique non-normal region.
    #[display("REGION[{_0}]")]
    ExtraRegion(usize),
}

/// A cell seen from another cell, with the constraint responsible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeenCell {
    /// The seen cell.
    pub position: Position,
    /// The constraint shared with the origin cell.
    pub context: Context,
}

const KING_OFFSETS: [(i16, i16); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const KNIGHT_OFFSETS: [(i16, i16); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

struct SeenBuilder<'a> {
    rules: &'a RuleModel,
    origin: Position,
    seen: Vec<SeenCell>,
}

impl SeenBuilder<'_> {
    /// Appends a context group. Cells outside the playable area, the origin
    /// itself and repeats within the group are skipped.
    fn push_group<I>(&mut self, context: Context, cells: I)
    where
        I: IntoIterator<Item = Position>,
    {
        let dims = self.rules.dimensions();
        let start = self.seen.len();
        for position in cells {
            if position == self.origin || !dims.is_playable(position) {
                continue;
            }
            if self.seen[start..].iter().any(|s| s.position == position) {
                continue;
            }
            self.seen.push(SeenCell { position, context });
        }
    }

    fn push_offsets(&mut self, context: Context, offsets: &[(i16, i16)]) {
        let origin = self.origin;
        self.push_group(
            context,
            offsets
                .iter()
                .filter_map(|&(dr, dc)| origin.offset(dr, dc)),
        );
    }
}

/// Returns every cell that constrains `cell` under the enabled rules.
///
/// Cells sharing a context are contiguous in the result, and no cell appears
/// twice within one context. Rows, columns and normal regions always apply
/// (unless the puzzle is non-standard); every other rule family applies only
/// outside [`ScanMode::Basic`] and when its `scan_*` switch is on.
///
/// Frame cells and cells outside the grid see nothing.
///
/// [`ScanMode::Basic`]: crate::ScanMode::Basic
///
/// # Examples
///
/// ```
/// use pencilmark_core::{Dimensions, Position, RuleModel};
/// use pencilmark_scanner::{ScannerSettings, visibility::seen_cells};
///
/// let rules = RuleModel::new(Dimensions::square(9));
/// let seen = seen_cells(&rules, &ScannerSettings::default(), Position::new(0, 0));
/// // 8 in the row, 8 in the column, 8 in the box
/// assert_eq!(seen.len(), 24);
/// ```
#[must_use]
pub fn seen_cells(rules: &RuleModel, settings: &ScannerSettings, cell: Position) -> Vec<SeenCell> {
    let dims = rules.dimensions();
    let Some((i, j)) = dims.to_playable(cell) else {
        return vec![];
    };
    let (rows, columns) = (dims.playable_rows(), dims.playable_columns());
    let flags = rules.flags();
    let non_standard = rules.is_non_standard();

    let mut builder = SeenBuilder {
        rules,
        origin: cell,
        seen: Vec::with_capacity(usize::from(rows) * 3),
    };

    if !non_standard {
        builder.push_group(
            Context::Row,
            (0..columns).filter_map(|c| dims.from_playable(i, c)),
        );
        builder.push_group(
            Context::Column,
            (0..rows).filter_map(|r| dims.from_playable(r, j)),
        );
    }

    let normal_members = rules
        .regions()
        .iter()
        .filter(|r| r.kind == RegionKind::Normal)
        .filter(|r| r.is_unique(non_standard) && r.contains(cell))
        .flat_map(|r| r.positions.iter().copied());
    builder.push_group(Context::Region, normal_members);

    if settings.mode.is_basic() {
        return builder.seen;
    }

    if settings.scan_diagonals && dims.is_square() {
        if flags.contains(RuleFlags::DIAGONAL_NEG) && i == j {
            builder.push_group(
                Context::Diagonal(DiagonalSign::Negative),
                (0..rows).filter_map(|k| dims.from_playable(k, k)),
            );
        }
        if flags.contains(RuleFlags::DIAGONAL_POS)
            && u16::from(i) + u16::from(j) + 1 == u16::from(rows)
        {
            builder.push_group(
                Context::Diagonal(DiagonalSign::Positive),
                (0..rows).filter_map(|k| dims.from_playable(k, rows - 1 - k)),
            );
        }
    }

    if settings.scan_anti_king && flags.contains(RuleFlags::ANTI_KING) {
        builder.push_offsets(Context::AntiKing, &KING_OFFSETS);
    }

    if settings.scan_anti_knight && flags.contains(RuleFlags::ANTI_KNIGHT) {
        builder.push_offsets(Context::AntiKnight, &KNIGHT_OFFSETS);
    }

    if settings.scan_disjoint_sets && flags.contains(RuleFlags::DISJOINT_SETS) {
        if let Some(block) = dims.default_block_size() {
            let (h, w) = (block.height, block.width);
            let (own_m, own_n) = (i / h, j / w);
            let members = (0..rows / h)
                .flat_map(|m| (0..columns / w).map(move |n| (m, n)))
                .filter(|&(m, n)| (m, n) != (own_m, own_n))
                .filter_map(|(m, n)| dims.from_playable(i % h + m * h, j % w + n * w));
            builder.push_group(Context::DisjointSet, members);
        }
    }

    if settings.scan_cages {
        for (index, cage) in rules.cages().iter().enumerate() {
            if cage.is_unique() && cage.contains(cell) {
                builder.push_group(Context::Cage(index), cage.positions.iter().copied());
            }
        }
    }

    if settings.scan_paths {
        for (index, path) in rules.paths().iter().enumerate() {
            if path.is_unique() && path.contains(cell) {
                builder.push_group(Context::Path(index), path.positions.iter().copied());
            }
        }
    }

    if settings.scan_extra_regions {
        for (index, region) in rules.regions().iter().enumerate() {
            if region.kind != RegionKind::Normal
                && region.is_unique(non_standard)
                && region.contains(cell)
            {
                builder.push_group(
                    Context::ExtraRegion(index),
                    region.positions.iter().copied(),
                );
            }
        }
    }

    builder.seen
}

/// Returns the distinct positions seen from `cell`, in first-seen order.
#[must_use]
pub fn seen_positions(
    rules: &RuleModel,
    settings: &ScannerSettings,
    cell: Position,
) -> Vec<Position> {
    let mut positions: Vec<Position> = Vec::new();
    for seen in seen_cells(rules, settings, cell) {
        if !positions.contains(&seen.position) {
            positions.push(seen.position);
        }
    }
    positions
}

/// Returns `true` if `a` sees `b`.
#[must_use]
pub fn sees(rules: &RuleModel, settings: &ScannerSettings, a: Position, b: Position) -> bool {
    seen_cells(rules, settings, a)
        .iter()
        .any(|s| s.position == b)
}

#[cfg(test)]
mod tests {
    use pencilmark_core::{Cage, CageKind, Dimensions, Margins, Path, PathKind, Region};
    use proptest::prelude::*;

    use super::*;
    use crate::ScanMode;

    fn advanced() -> ScannerSettings {
        ScannerSettings::default().with_mode(ScanMode::Advanced)
    }

    fn contexts_of(seen: &[SeenCell], pos: Position) -> Vec<Context> {
        seen.iter()
            .filter(|s| s.position == pos)
            .map(|s| s.context)
            .collect()
    }

    fn assert_contiguous(seen: &[SeenCell]) {
        let mut finished: Vec<Context> = vec![];
        let mut current = None;
        for s in seen {
            if current != Some(s.context) {
                assert!(
                    !finished.contains(&s.context),
                    "context {} is split",
                    s.context
                );
                if let Some(c) = current {
                    finished.push(c);
                }
                current = Some(s.context);
            }
        }
    }

    #[test]
    fn test_classic_visibility() {
        let rules = RuleModel::new(Dimensions::square(9));
        let seen = seen_cells(&rules, &ScannerSettings::default(), Position::new(4, 4));
        assert_eq!(seen.len(), 24);
        assert!(seen.iter().all(|s| s.position != Position::new(4, 4)));
        assert_eq!(
            contexts_of(&seen, Position::new(3, 4)),
            vec![Context::Column, Context::Region]
        );
        assert_eq!(contexts_of(&seen, Position::new(3, 3)), vec![Context::Region]);
        assert!(contexts_of(&seen, Position::new(0, 0)).is_empty());
        assert_contiguous(&seen);
    }

    #[test]
    fn test_non_square_rows_use_column_count() {
        let rules = RuleModel::new(Dimensions::new(4, 6));
        let seen = seen_cells(&rules, &ScannerSettings::default(), Position::new(0, 0));
        let row: Vec<_> = seen
            .iter()
            .filter(|s| s.context == Context::Row)
            .collect();
        assert_eq!(row.len(), 5);
        let column: Vec<_> = seen
            .iter()
            .filter(|s| s.context == Context::Column)
            .collect();
        assert_eq!(column.len(), 3);
    }

    #[test]
    fn test_non_standard_drops_rows_columns_and_regions() {
        let rules = RuleModel::new(Dimensions::square(9)).with_flags(RuleFlags::NON_STANDARD);
        assert!(seen_cells(&rules, &ScannerSettings::default(), Position::new(4, 4)).is_empty());
    }

    #[test]
    fn test_basic_mode_ignores_variant_rules() {
        let rules = RuleModel::new(Dimensions::square(9))
            .with_flags(RuleFlags::ANTI_KING | RuleFlags::DIAGONAL_NEG);
        let seen = seen_cells(&rules, &ScannerSettings::default(), Position::new(4, 4));
        assert_eq!(seen.len(), 24);
    }

    #[test]
    fn test_diagonals() {
        let rules = RuleModel::new(Dimensions::square(9))
            .with_flags(RuleFlags::DIAGONAL_POS | RuleFlags::DIAGONAL_NEG);
        let seen = seen_cells(&rules, &advanced(), Position::new(4, 4));
        assert!(contexts_of(&seen, Position::new(0, 0))
            .contains(&Context::Diagonal(DiagonalSign::Negative)));
        assert!(contexts_of(&seen, Position::new(0, 8))
            .contains(&Context::Diagonal(DiagonalSign::Positive)));

        let off = seen_cells(&rules, &advanced(), Position::new(0, 1));
        assert!(off.iter().all(|s| !matches!(s.context, Context::Diagonal(_))));

        let disabled = ScannerSettings {
            scan_diagonals: false,
            ..advanced()
        };
        let seen = seen_cells(&rules, &disabled, Position::new(4, 4));
        assert!(seen.iter().all(|s| !matches!(s.context, Context::Diagonal(_))));
    }

    #[test]
    fn test_anti_king_and_anti_knight() {
        let rules = RuleModel::new(Dimensions::square(9))
            .with_flags(RuleFlags::ANTI_KING | RuleFlags::ANTI_KNIGHT);
        let seen = seen_cells(&rules, &advanced(), Position::new(0, 0));
        let kings: Vec<_> = seen
            .iter()
            .filter(|s| s.context == Context::AntiKing)
            .map(|s| s.position)
            .collect();
        assert_eq!(kings, vec![Position::new(1, 1)]);
        let knights: Vec<_> = seen
            .iter()
            .filter(|s| s.context == Context::AntiKnight)
            .map(|s| s.position)
            .collect();
        assert_eq!(knights, vec![Position::new(1, 2), Position::new(2, 1)]);

        let center = seen_cells(&rules, &advanced(), Position::new(4, 4));
        assert_eq!(
            center.iter().filter(|s| s.context == Context::AntiKnight).count(),
            8
        );
        assert_eq!(
            center.iter().filter(|s| s.context == Context::AntiKing).count(),
            4
        );
    }

    #[test]
    fn test_disjoint_sets() {
        let rules = RuleModel::new(Dimensions::square(6)).with_flags(RuleFlags::DISJOINT_SETS);
        let seen = seen_cells(&rules, &advanced(), Position::new(1, 4));
        let mut members: Vec<_> = seen
            .iter()
            .filter(|s| s.context == Context::DisjointSet)
            .map(|s| s.position)
            .collect();
        members.sort();
        assert_eq!(
            members,
            vec![
                Position::new(1, 1),
                Position::new(3, 1),
                Position::new(3, 4),
                Position::new(5, 1),
                Position::new(5, 4),
            ]
        );
    }

    #[test]
    fn test_cages_paths_and_extra_regions() {
        let a = Position::new(0, 0);
        let b = Position::new(4, 4);
        let c = Position::new(8, 8);
        let rules = RuleModel::new(Dimensions::square(9))
            .with_cage(Cage::new(CageKind::Killer, vec![a, b]))
            .with_cage(Cage::new(CageKind::Custom, vec![a, c]))
            .with_path(Path::new(PathKind::Arrow, vec![a, c]))
            .with_path(Path::new(PathKind::Thermo, vec![c, a]))
            .with_region(Region::new(RegionKind::Extra, vec![a, b, c]));
        let seen = seen_cells(&rules, &advanced(), a);
        assert_eq!(
            contexts_of(&seen, b),
            vec![Context::Cage(0), Context::ExtraRegion(9)]
        );
        assert_eq!(
            contexts_of(&seen, c),
            vec![Context::Path(1), Context::ExtraRegion(9)]
        );
        assert_contiguous(&seen);

        let no_cages = ScannerSettings {
            scan_cages: false,
            scan_extra_regions: false,
            ..advanced()
        };
        assert!(contexts_of(&seen_cells(&rules, &no_cages, a), b).is_empty());
    }

    #[test]
    fn test_frame_cells_see_nothing_and_are_never_seen() {
        let dims = Dimensions::with_margins(
            8,
            8,
            Margins {
                top: 1,
                right: 1,
                bottom: 1,
                left: 1,
            },
        );
        let rules = RuleModel::new(dims)
            .with_cage(Cage::new(CageKind::Killer, vec![Position::new(0, 1), Position::new(1, 1)]));
        assert!(seen_cells(&rules, &advanced(), Position::new(0, 1)).is_empty());
        let seen = seen_cells(&rules, &advanced(), Position::new(1, 1));
        assert!(seen.iter().all(|s| dims.is_playable(s.position)));
        assert_eq!(seen.iter().filter(|s| s.context == Context::Row).count(), 5);
    }

    #[test]
    fn test_context_display() {
        assert_eq!(Context::Diagonal(DiagonalSign::Positive).to_string(), "DIAGONAL+");
        assert_eq!(Context::Cage(3).to_string(), "CAGE[3]");
        assert_eq!(Context::ExtraRegion(10).to_string(), "REGION[10]");
    }

    proptest! {
        #[test]
        fn test_standard_visibility_is_symmetric(
            side in prop::sample::select(vec![4u8, 6, 8, 9]),
            flag_bits in 0u16..64,
            a in (0u8..9, 0u8..9),
            b in (0u8..9, 0u8..9),
        ) {
            let flags = RuleFlags::from_bits_truncate(flag_bits << 1)
                & (RuleFlags::DIAGONAL_POS
                    | RuleFlags::DIAGONAL_NEG
                    | RuleFlags::ANTI_KNIGHT
                    | RuleFlags::ANTI_KING
                    | RuleFlags::DISJOINT_SETS);
            let rules = RuleModel::new(Dimensions::square(side)).with_flags(flags);
            let a = Position::new(a.0 % side, a.1 % side);
            let b = Position::new(b.0 % side, b.1 % side);
            let settings = advanced();
            prop_assert_eq!(sees(&rules, &settings, a, b), sees(&rules, &settings, b, a));
        }
    }
}
