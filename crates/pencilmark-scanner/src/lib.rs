//! Candidate elimination for variant sudoku puzzles.
//!
//! The scanner narrows the candidate digits of unsolved cells using the rules
//! a puzzle declares and the pencil marks a solver has written, and writes
//! the result back as placed digits and trimmed marks.
//!
//! - [`visibility`]: which cells see each other under the enabled rules.
//! - [`tuples`], [`pointing`] and [`negative`]: the detectors feeding the
//!   elimination passes.
//! - [`engine`]: the per-cell elimination passes and commit logic.
//! - [`driver`]: the worklist loop behind a single step.
//! - [`highlight`]: auxiliary cells to emphasize around a selection.
//! - [`session`], [`store`] and [`scheduler`]: observable session state and
//!   cancellable timed scans.
//!
//! # Examples
//!
//! ```
//! use pencilmark_core::{Dimensions, Grid, Position, RuleModel};
//! use pencilmark_scanner::Session;
//!
//! let rules = RuleModel::new(Dimensions::square(6));
//! let grid = Grid::from_givens(*rules.dimensions(), "
//!     12345.
//!     ......
//!     ......
//!     ......
//!     ......
//!     ......
//! ").unwrap();
//! let mut session = Session::new(rules, grid);
//!
//! assert!(session.step(None));
//! assert_eq!(session.grid().digit_at(Position::new(0, 5)).map(|d| d.to_char()), Some('6'));
//! ```

pub mod context;
pub mod driver;
pub mod engine;
pub mod highlight;
pub mod negative;
pub mod pointing;
pub mod scheduler;
pub mod session;
pub mod settings;
pub mod store;
pub mod testing;
pub mod tuples;
pub mod visibility;

pub use self::{
    context::ScanContext,
    driver::{ScanDriver, StepOutcome},
    engine::{CellChange, Eliminator},
    highlight::highlighted_cells,
    negative::NegativeRule,
    pointing::PointingSet,
    scheduler::{CancelToken, Scheduler, Task, TimerQueue},
    session::Session,
    settings::{HighlightMode, ScanMode, ScannerSettings, ScannerSpeed},
    store::{Store, SubscriptionId},
    tuples::{DetectScope, Tuple},
    visibility::{Context, DiagonalSign, SeenCell},
};
