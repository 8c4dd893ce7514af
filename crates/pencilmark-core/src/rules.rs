//! The rule model: flags, regions, cages, paths and border clues.

use serde::{Deserialize, Serialize};

use crate::{DigitAlphabet, Dimensions, Position};

bitflags::bitflags! {
    /// Boolean rule toggles of a puzzle.
    ///
    /// Serialized as a `|`-separated list of flag names, e.g.
    /// `"DIAGONAL_POS | ANTI_KING"`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct RuleFlags: u16 {
        /// Rows, columns and normal regions do not require unique digits.
        const NON_STANDARD = 1 << 0;
        /// The bottom-left to top-right diagonal holds unique digits.
        const DIAGONAL_POS = 1 << 1;
        /// The top-left to bottom-right diagonal holds unique digits.
        const DIAGONAL_NEG = 1 << 2;
        /// Cells a chess knight's move apart may not hold the same digit.
        const ANTI_KNIGHT = 1 << 3;
        /// Cells a chess king's move apart may not hold the same digit.
        const ANTI_KING = 1 << 4;
        /// Cells at the same offset inside different blocks hold unique digits.
        const DISJOINT_SETS = 1 << 5;
        /// Orthogonal neighbors may not hold consecutive digits.
        const NON_CONSECUTIVE = 1 << 6;
        /// All white Kropki dots are given.
        const NEGATIVE_WHITE = 1 << 7;
        /// All black Kropki dots are given.
        const NEGATIVE_BLACK = 1 << 8;
        /// All X clues are given.
        const NEGATIVE_X = 1 << 9;
        /// All V clues are given.
        const NEGATIVE_V = 1 << 10;
    }
}

/// Kind of a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RegionKind {
    /// A block of the main partition.
    Normal,
    /// An additional region with unique digits (e.g. windoku windows).
    Extra,
    /// A region whose digits repeat in another region.
    Clone,
    /// A 3×3 magic square.
    MagicSquare,
    /// Any other region.
    #[default]
    #[serde(other)]
    Custom,
}

/// Kind of a cage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CageKind {
    /// A killer cage: digits are unique and sum to the clue.
    Killer,
    /// Any other cage.
    #[default]
    #[serde(other)]
    Custom,
}

/// Kind of a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PathKind {
    /// Digits on the arrow sum to the digit in the circle.
    Arrow,
    /// Digits strictly increase from the bulb.
    Thermo,
    /// Digits lie strictly between the two end digits.
    Between,
    /// Digits form a consecutive set.
    Renban,
    /// Neighboring digits differ by at least a fixed amount.
    Whisper,
    /// The path reads the same in both directions.
    Palindrome,
    /// Segments between region borders share a sum.
    EqualSum,
    /// Every digit is odd.
    Odd,
    /// Every digit is even.
    Even,
    /// Digits lie outside the range of the two end digits.
    Lockout,
    /// Any other path.
    #[default]
    #[serde(other)]
    Custom,
}

/// Kind of a clue on the border between two cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BorderClueKind {
    /// White dot: the digits are consecutive.
    KropkiWhite,
    /// Black dot: one digit is double the other.
    KropkiBlack,
    /// X: the digits sum to 10.
    XvX,
    /// V: the digits sum to 5.
    XvV,
    /// Inequality sign.
    Inequality,
    /// Four digits around a corner.
    Quadruple,
    /// A drawn border.
    Border,
    /// Any other clue.
    #[default]
    #[serde(other)]
    Custom,
}

/// A region of cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    /// Member cells in declaration order.
    pub positions: Vec<Position>,
    /// Region kind.
    #[serde(rename = "type", default)]
    pub kind: RegionKind,
    /// Explicit uniqueness override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_digits: Option<bool>,
}

impl Region {
    /// Creates a region with kind-defaulted uniqueness.
    #[must_use]
    pub fn new(kind: RegionKind, positions: Vec<Position>) -> Self {
        Self {
            positions,
            kind,
            unique_digits: None,
        }
    }

    /// Returns `true` if digits may not repeat inside the region.
    ///
    /// Without an explicit override, normal regions are unique unless the
    /// puzzle is non-standard, extra regions and magic squares are unique,
    /// and clone and custom regions are not.
    #[must_use]
    pub fn is_unique(&self, non_standard: bool) -> bool {
        self.unique_digits.unwrap_or(match self.kind {
            RegionKind::Normal => !non_standard,
            RegionKind::Extra | RegionKind::MagicSquare => true,
            RegionKind::Clone | RegionKind::Custom => false,
        })
    }

    /// Returns `true` if the region contains `pos`.
    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        self.positions.contains(&pos)
    }
}

/// A cage of cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cage {
    /// Member cells.
    pub positions: Vec<Position>,
    /// Cage kind.
    #[serde(rename = "type", default)]
    pub kind: CageKind,
    /// Explicit uniqueness override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_digits: Option<bool>,
}

impl Cage {
    /// Creates a cage with kind-defaulted uniqueness.
    #[must_use]
    pub fn new(kind: CageKind, positions: Vec<Position>) -> Self {
        Self {
            positions,
            kind,
            unique_digits: None,
        }
    }

    /// Returns `true` if digits may not repeat inside the cage.
    #[must_use]
    pub fn is_unique(&self) -> bool {
        self.unique_digits
            .unwrap_or(matches!(self.kind, CageKind::Killer))
    }

    /// Returns `true` if the cage contains `pos`.
    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        self.positions.contains(&pos)
    }
}

/// A line drawn through cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Path {
    /// Cells along the path, in drawing order.
    pub positions: Vec<Position>,
    /// Path kind.
    #[serde(rename = "type", default)]
    pub kind: PathKind,
    /// Explicit uniqueness override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_digits: Option<bool>,
}

impl Path {
    /// Creates a path with kind-defaulted uniqueness.
    #[must_use]
    pub fn new(kind: PathKind, positions: Vec<Position>) -> Self {
        Self {
            positions,
            kind,
            unique_digits: None,
        }
    }

    /// Returns `true` if digits may not repeat along the path.
    ///
    /// Thermometers and renban lines are unique by default.
    #[must_use]
    pub fn is_unique(&self) -> bool {
        self.unique_digits
            .unwrap_or(matches!(self.kind, PathKind::Thermo | PathKind::Renban))
    }

    /// Returns `true` if the path passes through `pos`.
    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        self.positions.contains(&pos)
    }
}

/// A clue on the border between two cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorderClue {
    /// The two cells the clue sits between.
    pub positions: [Position; 2],
    /// Clue kind.
    #[serde(rename = "type", default)]
    pub kind: BorderClueKind,
}

impl BorderClue {
    /// Creates a border clue between two cells.
    #[must_use]
    pub const fn new(kind: BorderClueKind, a: Position, b: Position) -> Self {
        Self {
            positions: [a, b],
            kind,
        }
    }

    /// Returns `true` if the clue sits between `a` and `b`, in either order.
    #[must_use]
    pub fn is_between(&self, a: Position, b: Position) -> bool {
        let [p, q] = self.positions;
        (p == a && q == b) || (p == b && q == a)
    }
}

/// The immutable description of a puzzle's rules.
///
/// # Examples
///
/// ```
/// use pencilmark_core::{Dimensions, Position, RuleFlags, RuleModel};
///
/// let rules = RuleModel::new(Dimensions::square(9)).with_flags(RuleFlags::ANTI_KING);
/// assert_eq!(rules.alphabet().len(), 9);
/// assert_eq!(rules.regions().len(), 9);
/// assert!(rules.normal_region_of(Position::new(4, 4)).is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleModel {
    dimensions: Dimensions,
    alphabet: DigitAlphabet,
    flags: RuleFlags,
    regions: Vec<Region>,
    cages: Vec<Cage>,
    paths: Vec<Path>,
    border_clues: Vec<BorderClue>,
}

impl RuleModel {
    /// Creates a rule model with the default alphabet and default region partition.
    #[must_use]
    pub fn new(dimensions: Dimensions) -> Self {
        let regions = dimensions
            .default_blocks()
            .into_iter()
            .map(|cells| Region::new(RegionKind::Normal, cells))
            .collect();
        Self {
            dimensions,
            alphabet: DigitAlphabet::default_for_side(dimensions.playable_rows()),
            flags: RuleFlags::empty(),
            regions,
            cages: vec![],
            paths: vec![],
            border_clues: vec![],
        }
    }

    /// Replaces the digit alphabet.
    #[must_use]
    pub fn with_alphabet(mut self, alphabet: DigitAlphabet) -> Self {
        self.alphabet = alphabet;
        self
    }

    /// Replaces the rule flags.
    #[must_use]
    pub fn with_flags(mut self, flags: RuleFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Replaces every region, including the normal partition.
    #[must_use]
    pub fn with_regions(mut self, regions: Vec<Region>) -> Self {
        self.regions = regions;
        self
    }

    /// Appends a region.
    #[must_use]
    pub fn with_region(mut self, region: Region) -> Self {
        self.regions.push(region);
        self
    }

    /// Appends a cage.
    #[must_use]
    pub fn with_cage(mut self, cage: Cage) -> Self {
        self.cages.push(cage);
        self
    }

    /// Appends a path.
    #[must_use]
    pub fn with_path(mut self, path: Path) -> Self {
        self.paths.push(path);
        self
    }

    /// Appends a border clue.
    #[must_use]
    pub fn with_border_clue(mut self, clue: BorderClue) -> Self {
        self.border_clues.push(clue);
        self
    }

    /// Returns the grid dimensions.
    #[must_use]
    pub fn dimensions(&self) -> &Dimensions {
        &self.dimensions
    }

    /// Returns the digit alphabet.
    #[must_use]
    pub fn alphabet(&self) -> &DigitAlphabet {
        &self.alphabet
    }

    /// Returns the rule flags.
    #[must_use]
    pub fn flags(&self) -> RuleFlags {
        self.flags
    }

    /// Returns `true` if the non-standard flag is set.
    #[must_use]
    pub fn is_non_standard(&self) -> bool {
        self.flags.contains(RuleFlags::NON_STANDARD)
    }

    /// Returns every region.
    #[must_use]
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Returns every cage.
    #[must_use]
    pub fn cages(&self) -> &[Cage] {
        &self.cages
    }

    /// Returns every path.
    #[must_use]
    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    /// Returns every border clue.
    #[must_use]
    pub fn border_clues(&self) -> &[BorderClue] {
        &self.border_clues
    }

    /// Returns the first unique normal region containing `pos`.
    ///
    /// Pointing sets are always looked up in this region.
    #[must_use]
    pub fn normal_region_of(&self, pos: Position) -> Option<&Region> {
        self.regions.iter().find(|r| {
            r.kind == RegionKind::Normal && r.unique_digits.unwrap_or(true) && r.contains(pos)
        })
    }

    /// Returns `true` if a border clue of `kind` sits between `a` and `b`.
    #[must_use]
    pub fn has_border_clue(&self, a: Position, b: Position, kind: BorderClueKind) -> bool {
        self.border_clues
            .iter()
            .any(|c| c.kind == kind && c.is_between(a, b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_uniqueness_defaults() {
        let normal = Region::new(RegionKind::Normal, vec![]);
        assert!(normal.is_unique(false));
        assert!(!normal.is_unique(true));
        assert!(Region::new(RegionKind::Extra, vec![]).is_unique(true));
        assert!(Region::new(RegionKind::MagicSquare, vec![]).is_unique(false));
        assert!(!Region::new(RegionKind::Clone, vec![]).is_unique(false));
        let forced = Region {
            unique_digits: Some(true),
            ..Region::new(RegionKind::Clone, vec![])
        };
        assert!(forced.is_unique(false));
    }

    #[test]
    fn test_cage_and_path_uniqueness_defaults() {
        assert!(Cage::new(CageKind::Killer, vec![]).is_unique());
        assert!(!Cage::new(CageKind::Custom, vec![]).is_unique());
        assert!(Path::new(PathKind::Thermo, vec![]).is_unique());
        assert!(Path::new(PathKind::Renban, vec![]).is_unique());
        assert!(!Path::new(PathKind::Arrow, vec![]).is_unique());
        assert!(!Path::new(PathKind::Whisper, vec![]).is_unique());
    }

    #[test]
    fn test_border_clue_is_unordered() {
        let a = Position::new(0, 0);
        let b = Position::new(0, 1);
        let rules = RuleModel::new(Dimensions::square(4))
            .with_border_clue(BorderClue::new(BorderClueKind::KropkiWhite, a, b));
        assert!(rules.has_border_clue(b, a, BorderClueKind::KropkiWhite));
        assert!(!rules.has_border_clue(a, b, BorderClueKind::KropkiBlack));
        assert!(!rules.has_border_clue(a, Position::new(1, 0), BorderClueKind::KropkiWhite));
    }

    #[test]
    fn test_normal_region_lookup_skips_non_unique() {
        let cell = Position::new(0, 0);
        let rules = RuleModel::new(Dimensions::square(4)).with_regions(vec![
            Region {
                unique_digits: Some(false),
                ..Region::new(RegionKind::Normal, vec![cell])
            },
            Region::new(RegionKind::Extra, vec![cell]),
        ]);
        assert!(rules.normal_region_of(cell).is_none());
    }

    #[test]
    fn test_flags_serde() {
        let flags = RuleFlags::DIAGONAL_POS | RuleFlags::ANTI_KING;
        let json = serde_json::to_string(&flags).unwrap();
        let back: RuleFlags = serde_json::from_str(&json).unwrap();
        assert_eq!(back, flags);
        let parsed: RuleFlags = serde_json::from_str("\"NON_STANDARD | NEGATIVE_X\"").unwrap();
        assert_eq!(parsed, RuleFlags::NON_STANDARD | RuleFlags::NEGATIVE_X);
    }

    #[test]
    fn test_unknown_kind_is_custom() {
        let path: Path =
            serde_json::from_str(r#"{"positions":[],"type":"Entropic"}"#).unwrap();
        assert_eq!(path.kind, PathKind::Custom);
    }
}
