//! Scanner configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Which rule families the scanner considers.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    derive_more::IsVariant,
)]
pub enum ScanMode {
    /// Rows, columns and normal regions only.
    #[default]
    Basic,
    /// Adds diagonals, adjacency rules, disjoint sets, cages, paths and extra regions.
    Advanced,
    /// Adds negative Kropki, XV and non-consecutive constraints.
    Extreme,
}

/// Pause between animated scan steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ScannerSpeed {
    /// One step per second.
    #[default]
    Slow,
    /// Two steps per second.
    Fast,
    /// No pause between steps.
    Instant,
}

impl ScannerSpeed {
    /// Returns the pause after each step.
    #[must_use]
    pub const fn delay(self) -> Duration {
        match self {
            Self::Slow => Duration::from_millis(1000),
            Self::Fast => Duration::from_millis(500),
            Self::Instant => Duration::ZERO,
        }
    }
}

/// Which auxiliary cells to emphasize around the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HighlightMode {
    /// No highlighting.
    #[default]
    None,
    /// Cells seen by every selected cell.
    Seen,
    /// Members of tuples anchored at the selection.
    Tuples,
}

/// Scanner configuration.
///
/// Missing fields deserialize to their defaults, so a partial settings file
/// only overrides what it names.
///
/// # Examples
///
/// ```
/// use pencilmark_scanner::{ScanMode, ScannerSettings};
///
/// let settings: ScannerSettings = serde_json::from_str(r#"{ "mode": "Advanced" }"#).unwrap();
/// assert_eq!(settings.mode, ScanMode::Advanced);
/// assert!(settings.use_centre_marks);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[expect(clippy::struct_excessive_bools)]
pub struct ScannerSettings {
    /// Highlight mode for the selection.
    pub highlight_mode: HighlightMode,
    /// Rule families to consider.
    pub mode: ScanMode,
    /// Start a scan whenever the grid changes.
    pub auto_scan: bool,
    /// Pause between animated steps.
    pub scanner_speed: ScannerSpeed,
    /// Use center marks for tuple eliminations.
    pub use_centre_marks: bool,
    /// Use corner marks for pointing-set eliminations.
    pub use_corner_marks: bool,
    /// Consider diagonal constraints.
    pub scan_diagonals: bool,
    /// Consider the anti-knight constraint.
    pub scan_anti_knight: bool,
    /// Consider the anti-king constraint.
    pub scan_anti_king: bool,
    /// Consider disjoint sets.
    pub scan_disjoint_sets: bool,
    /// Consider unique cages.
    pub scan_cages: bool,
    /// Consider unique paths.
    pub scan_paths: bool,
    /// Consider unique extra regions.
    pub scan_extra_regions: bool,
    /// Consider missing X and V clues.
    #[serde(rename = "scanNegativeXV")]
    pub scan_negative_xv: bool,
    /// Consider missing Kropki dots.
    pub scan_negative_kropki: bool,
    /// Consider the non-consecutive constraint.
    pub scan_non_consecutive: bool,
}

impl Default for ScannerSettings {
    fn default() -> Self {
        Self {
            highlight_mode: HighlightMode::None,
            mode: ScanMode::Basic,
            auto_scan: false,
            scanner_speed: ScannerSpeed::Slow,
            use_centre_marks: true,
            use_corner_marks: true,
            scan_diagonals: true,
            scan_anti_knight: true,
            scan_anti_king: true,
            scan_disjoint_sets: true,
            scan_cages: true,
            scan_paths: true,
            scan_extra_regions: true,
            scan_negative_xv: true,
            scan_negative_kropki: true,
            scan_non_consecutive: true,
        }
    }
}

impl ScannerSettings {
    /// Returns the settings with `mode` replaced.
    #[must_use]
    pub fn with_mode(mut self, mode: ScanMode) -> Self {
        self.mode = mode;
        self
    }

    /// Returns the settings with `scanner_speed` replaced.
    #[must_use]
    pub fn with_speed(mut self, speed: ScannerSpeed) -> Self {
        self.scanner_speed = speed;
        self
    }

    /// Returns the settings with `highlight_mode` replaced.
    #[must_use]
    pub fn with_highlight(mut self, mode: HighlightMode) -> Self {
        self.highlight_mode = mode;
        self
    }
}
