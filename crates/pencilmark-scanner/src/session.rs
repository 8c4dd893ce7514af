//! A puzzle-editing session: the rule model, observable grid state and the
//! scanner that works on it.

use pencilmark_core::{
    Digit, DigitSet, DocumentError, Grid, GridError, Position, PuzzleDocument, RuleModel,
};

use crate::{
    CancelToken, CellChange, HighlightMode, ScanDriver, ScannerSettings, ScannerSpeed, Scheduler,
    Store, highlight,
};

/// Owns one puzzle's rules and state for the duration of an editing session.
///
/// Grid, selection, highlights and the scanning flag live in [`Store`]s so a
/// front end can subscribe to them. Every scanner step writes the grid once,
/// so each revision is a consistent state.
///
/// # Examples
///
/// ```
/// use pencilmark_core::{Dimensions, Grid, RuleModel};
/// use pencilmark_scanner::{ScannerSpeed, ScannerSettings, Session, TimerQueue};
///
/// let rules = RuleModel::new(Dimensions::square(4));
/// let grid = Grid::from_givens(*rules.dimensions(), "
///     12.4
///     34.2
///     2.43
///     .321
/// ").unwrap();
/// let mut session = Session::new(rules, grid);
/// session.configure(ScannerSettings::default().with_speed(ScannerSpeed::Instant));
///
/// let mut timers = TimerQueue::new();
/// session.start_scan(&mut timers);
/// timers.run_until_idle(&mut session);
/// assert!(!session.is_scanning());
/// assert!(session.grid().is_filled());
/// ```
#[derive(Debug)]
pub struct Session {
    rules: RuleModel,
    settings: ScannerSettings,
    grid: Store<Grid>,
    selection: Store<Vec<Position>>,
    highlighted: Store<Vec<Position>>,
    scanning: Store<bool>,
    driver: ScanDriver,
    pending: Option<CancelToken>,
    scanned_revision: Option<u64>,
    last_change: Option<CellChange>,
}

impl Session {
    /// Creates a session with default settings.
    #[must_use]
    pub fn new(rules: RuleModel, grid: Grid) -> Self {
        Self {
            rules,
            settings: ScannerSettings::default(),
            grid: Store::new(grid),
            selection: Store::default(),
            highlighted: Store::default(),
            scanning: Store::new(false),
            driver: ScanDriver::new(),
            pending: None,
            scanned_revision: None,
            last_change: None,
        }
    }

    /// Creates a session from a puzzle document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document's grid layers do not match its dimensions.
    pub fn from_document(document: PuzzleDocument) -> Result<Self, DocumentError> {
        let (rules, grid) = document.into_parts()?;
        Ok(Self::new(rules, grid))
    }

    /// Returns the rule model.
    #[must_use]
    pub fn rules(&self) -> &RuleModel {
        &self.rules
    }

    /// Returns the scanner settings.
    #[must_use]
    pub fn settings(&self) -> &ScannerSettings {
        &self.settings
    }

    /// Replaces the settings and recomputes the highlights.
    pub fn configure(&mut self, settings: ScannerSettings) {
        self.settings = settings;
        self.refresh_highlights();
    }

    /// Switches between seen-cell highlighting and none.
    pub fn toggle_seen(&mut self) {
        self.toggle_highlight(HighlightMode::Seen);
    }

    /// Switches between tuple highlighting and none.
    pub fn toggle_tuples(&mut self) {
        self.toggle_highlight(HighlightMode::Tuples);
    }

    fn toggle_highlight(&mut self, mode: HighlightMode) {
        let next = if self.settings.highlight_mode == mode {
            HighlightMode::None
        } else {
            mode
        };
        self.configure(self.settings.with_highlight(next));
    }

    /// Returns the current grid.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        self.grid.get()
    }

    /// Returns the grid store.
    #[must_use]
    pub fn grid_store(&self) -> &Store<Grid> {
        &self.grid
    }

    /// Returns the grid store for subscribing or external writes.
    pub fn grid_store_mut(&mut self) -> &mut Store<Grid> {
        &mut self.grid
    }

    /// Returns the selection store.
    #[must_use]
    pub fn selection(&self) -> &Store<Vec<Position>> {
        &self.selection
    }

    /// Returns the selection store for subscribing.
    pub fn selection_mut(&mut self) -> &mut Store<Vec<Position>> {
        &mut self.selection
    }

    /// Returns the highlight store.
    #[must_use]
    pub fn highlighted(&self) -> &Store<Vec<Position>> {
        &self.highlighted
    }

    /// Returns the highlight store for subscribing.
    pub fn highlighted_mut(&mut self) -> &mut Store<Vec<Position>> {
        &mut self.highlighted
    }

    /// Returns the scanning-flag store.
    #[must_use]
    pub fn scanning(&self) -> &Store<bool> {
        &self.scanning
    }

    /// Returns the scanning-flag store for subscribing.
    pub fn scanning_mut(&mut self) -> &mut Store<bool> {
        &mut self.scanning
    }

    /// Replaces the whole grid.
    pub fn set_grid(&mut self, grid: Grid) {
        self.grid.set(grid);
        self.refresh_highlights();
    }

    /// Returns the scanner's candidates for `pos`, if a scan context is live.
    #[must_use]
    pub fn candidates(&self, pos: Position) -> Option<DigitSet> {
        self.driver.context()?.candidates(pos)
    }

    /// Returns the change made by the most recent successful step.
    #[must_use]
    pub fn last_change(&self) -> Option<&CellChange> {
        self.last_change.as_ref()
    }

    fn check_digits(&self, digits: DigitSet) -> Result<(), GridError> {
        match digits.difference(self.rules.alphabet().as_set()).first() {
            Some(digit) => Err(GridError::DigitNotInAlphabet { digit }),
            None => Ok(()),
        }
    }

    fn edit<F>(&mut self, f: F) -> Result<(), GridError>
    where
        F: FnOnce(&mut Grid) -> Result<(), GridError>,
    {
        let mut next = self.grid.get().clone();
        f(&mut next)?;
        self.set_grid(next);
        Ok(())
    }

    /// Places a digit in a cell.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::DigitNotInAlphabet`] for foreign digits, plus the
    /// errors of [`Grid::set_placed`].
    pub fn place_value(&mut self, pos: Position, digit: Digit) -> Result<(), GridError> {
        self.check_digits(DigitSet::from_elem(digit))?;
        self.edit(|grid| grid.set_placed(pos, digit))
    }

    /// Clears a cell's value or marks.
    ///
    /// # Errors
    ///
    /// See [`Grid::clear`].
    pub fn clear_cell(&mut self, pos: Position) -> Result<(), GridError> {
        self.edit(|grid| grid.clear(pos))
    }

    /// Replaces a cell's center marks.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::DigitNotInAlphabet`] for foreign digits, plus the
    /// errors of [`Grid::set_center_marks`].
    pub fn set_center_marks(&mut self, pos: Position, marks: DigitSet) -> Result<(), GridError> {
        self.check_digits(marks)?;
        self.edit(|grid| grid.set_center_marks(pos, marks))
    }

    /// Replaces a cell's corner marks.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::DigitNotInAlphabet`] for foreign digits, plus the
    /// errors of [`Grid::set_corner_marks`].
    pub fn set_corner_marks(&mut self, pos: Position, marks: DigitSet) -> Result<(), GridError> {
        self.check_digits(marks)?;
        self.edit(|grid| grid.set_corner_marks(pos, marks))
    }

    /// Replaces the selection and recomputes the highlights.
    pub fn select(&mut self, cells: Vec<Position>) {
        self.selection.set(cells);
        self.refresh_highlights();
    }

    fn refresh_highlights(&mut self) {
        let cells = highlight::highlighted_cells(
            &self.rules,
            &self.settings,
            self.grid.get(),
            self.selection.get(),
        );
        if *self.highlighted.get() != cells {
            self.highlighted.set(cells);
        }
    }

    /// Runs one scanner step, optionally seeding a fresh worklist around a cell.
    ///
    /// Returns `false` when nothing changed, and while a timed scan is
    /// running.
    pub fn step(&mut self, seed: Option<Position>) -> bool {
        if self.is_scanning() {
            return false;
        }
        self.advance(seed)
    }

    fn advance(&mut self, seed: Option<Position>) -> bool {
        let revision = self.grid.revision();
        let Some(outcome) =
            self.driver
                .step(&self.rules, &self.settings, self.grid.get(), revision, seed)
        else {
            return false;
        };
        self.grid.set(outcome.grid);
        let revision = self.grid.revision();
        self.driver.acknowledge(revision);
        self.scanned_revision = Some(revision);

        if self.settings.scanner_speed != ScannerSpeed::Instant {
            self.selection.set(vec![outcome.change.cell]);
            self.highlighted.set(outcome.change.highlights.clone());
        }
        self.last_change = Some(outcome.change);
        true
    }

    /// Returns `true` while a timed scan is running.
    #[must_use]
    pub fn is_scanning(&self) -> bool {
        *self.scanning.get()
    }

    /// Starts a timed scan that steps until a fixed point.
    ///
    /// The first step runs immediately; each successful step schedules the
    /// next after the configured delay. Does nothing if a scan is running.
    pub fn start_scan(&mut self, scheduler: &mut dyn Scheduler<Self>) {
        if self.is_scanning() {
            return;
        }
        log::info!("scan started");
        self.scanning.set(true);
        self.scanned_revision = Some(self.grid.revision());
        self.continue_scan(scheduler);
    }

    fn continue_scan(&mut self, scheduler: &mut dyn Scheduler<Self>) {
        self.pending = None;
        if !self.is_scanning() {
            return;
        }
        if self.advance(None) {
            let delay = self.settings.scanner_speed.delay();
            self.pending = Some(scheduler.schedule_after(delay, Box::new(Self::continue_scan)));
        } else {
            log::info!("scan reached a fixed point");
            self.stop_scan();
        }
    }

    /// Stops a timed scan and discards the scan context.
    ///
    /// Eliminations already written to the grid stay.
    pub fn stop_scan(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
        if self.is_scanning() {
            log::info!("scan stopped");
            self.scanning.set(false);
        }
        self.driver.reset();
    }

    /// Starts a scan if auto scan is on and the grid changed since the last
    /// scan. Returns `true` if a scan was started.
    pub fn poll_auto_scan(&mut self, scheduler: &mut dyn Scheduler<Self>) -> bool {
        if !self.settings.auto_scan
            || self.is_scanning()
            || self.scanned_revision == Some(self.grid.revision())
        {
            return false;
        }
        self.start_scan(scheduler);
        true
    }
}
