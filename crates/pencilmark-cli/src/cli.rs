use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use pencilmark_scanner::{HighlightMode, ScanMode, ScannerSettings, ScannerSpeed};

/// Scan a variant sudoku puzzle for candidate eliminations.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// Puzzle document (JSON).
    #[arg(value_name = "PUZZLE")]
    pub puzzle: PathBuf,

    /// Scanner settings file (JSON); missing fields keep their defaults.
    #[arg(long, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Rule families to consider.
    #[arg(long, value_name = "MODE")]
    pub mode: Option<ModeArg>,

    /// Pause between animated scan steps.
    #[arg(long, value_name = "SPEED")]
    pub speed: Option<SpeedArg>,

    /// Do not use center marks for tuple eliminations.
    #[arg(long)]
    pub no_centre_marks: bool,

    /// Do not use corner marks for pointing-set eliminations.
    #[arg(long)]
    pub no_corner_marks: bool,

    /// Write the updated puzzle document here.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run a single scanner step.
    Step {
        /// Prioritize cells seen from this cell, e.g. `r1c1`.
        #[arg(long, value_name = "CELL")]
        seed: Option<String>,
    },
    /// Step until no cell changes, pausing between steps.
    Scan {
        /// Stop after this many changed cells.
        #[arg(long, value_name = "COUNT")]
        max_steps: Option<usize>,
    },
    /// List the cells seen from a cell, with the constraint responsible.
    Seen {
        /// The cell to inspect, e.g. `r1c1`.
        #[arg(long, value_name = "CELL")]
        cell: String,
    },
    /// List the cells highlighted for a selection.
    Highlight {
        /// Highlight mode.
        #[arg(long, value_name = "MODE", default_value = "seen")]
        highlight: HighlightArg,
        /// Selected cells, e.g. `r1c1`. Repeatable.
        #[arg(long = "cell", value_name = "CELL", num_args = 1.., required = true)]
        cells: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModeArg {
    Basic,
    Advanced,
    Extreme,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SpeedArg {
    Slow,
    Fast,
    Instant,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum HighlightArg {
    Seen,
    Tuples,
}

impl From<ModeArg> for ScanMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Basic => Self::Basic,
            ModeArg::Advanced => Self::Advanced,
            ModeArg::Extreme => Self::Extreme,
        }
    }
}

impl From<SpeedArg> for ScannerSpeed {
    fn from(speed: SpeedArg) -> Self {
        match speed {
            SpeedArg::Slow => Self::Slow,
            SpeedArg::Fast => Self::Fast,
            SpeedArg::Instant => Self::Instant,
        }
    }
}

impl From<HighlightArg> for HighlightMode {
    fn from(mode: HighlightArg) -> Self {
        match mode {
            HighlightArg::Seen => Self::Seen,
            HighlightArg::Tuples => Self::Tuples,
        }
    }
}

impl Args {
    /// Applies the command-line overrides to `settings`.
    #[must_use]
    pub fn apply(&self, mut settings: ScannerSettings) -> ScannerSettings {
        if let Some(mode) = self.mode {
            settings.mode = mode.into();
        }
        if let Some(speed) = self.speed {
            settings.scanner_speed = speed.into();
        }
        if self.no_centre_marks {
            settings.use_centre_marks = false;
        }
        if self.no_corner_marks {
            settings.use_corner_marks = false;
        }
        settings
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_overrides_apply_to_settings() {
        let args = Args::parse_from([
            "pencilmark",
            "--mode",
            "extreme",
            "--speed",
            "instant",
            "--no-corner-marks",
            "puzzle.json",
            "scan",
            "--max-steps",
            "3",
        ]);
        let settings = args.apply(ScannerSettings::default());
        assert_eq!(settings.mode, ScanMode::Extreme);
        assert_eq!(settings.scanner_speed, ScannerSpeed::Instant);
        assert!(settings.use_centre_marks);
        assert!(!settings.use_corner_marks);
        assert!(matches!(args.command, Command::Scan { max_steps: Some(3) }));
    }
}
