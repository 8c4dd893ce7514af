//! Cancellable delayed tasks.
//!
//! Continuous scanning reschedules itself after every step. The
//! [`Scheduler`] trait abstracts the timer so a scan can run under a virtual
//! clock in tests and under real sleeps in the command-line tool.

use std::{cell::Cell, collections::BTreeMap, fmt, rc::Rc, time::Duration};

/// A handle that stops a scheduled task from running.
///
/// Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    /// Creates a live token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels the task.
    pub fn cancel(&self) {
        self.0.set(true);
    }

    /// Returns `true` once [`cancel`](Self::cancel) has been called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// A deferred continuation operating on a target.
pub type Task<T> = Box<dyn FnOnce(&mut T, &mut dyn Scheduler<T>)>;

/// Runs tasks on a target after a delay.
pub trait Scheduler<T> {
    /// Schedules `task` to run after `delay`.
    fn schedule_after(&mut self, delay: Duration, task: Task<T>) -> CancelToken;
}

struct Entry<T> {
    token: CancelToken,
    task: Task<T>,
}

/// A single-threaded timer queue driven by an explicit clock.
///
/// Tasks run in order of due time, ties in scheduling order. Cancelled tasks
/// are dropped without running.
pub struct TimerQueue<T> {
    now: Duration,
    seq: u64,
    entries: BTreeMap<(Duration, u64), Entry<T>>,
}

impl<T> fmt::Debug for TimerQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerQueue")
            .field("now", &self.now)
            .field("pending", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            seq: 0,
            entries: BTreeMap::new(),
        }
    }
}

impl<T> Scheduler<T> for TimerQueue<T> {
    fn schedule_after(&mut self, delay: Duration, task: Task<T>) -> CancelToken {
        let token = CancelToken::new();
        let key = (self.now + delay, self.seq);
        self.seq += 1;
        self.entries.insert(
            key,
            Entry {
                token: token.clone(),
                task,
            },
        );
        token
    }
}

impl<T> TimerQueue<T> {
    /// Creates an empty queue at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Returns the number of pending tasks, cancelled ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no task is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if no live task is pending.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.entries.values().all(|e| e.token.is_cancelled())
    }

    /// Moves the clock forward by `elapsed`, running every task that falls
    /// due on the way. Returns the number of tasks run.
    pub fn advance(&mut self, target: &mut T, elapsed: Duration) -> usize {
        let until = self.now + elapsed;
        let mut ran = 0;
        while let Some(entry) = self.entries.first_entry() {
            let (due, _) = *entry.key();
            if due > until {
                break;
            }
            let entry = entry.remove();
            self.now = due;
            ran += usize::from(self.run(target, entry));
        }
        self.now = until;
        ran
    }

    /// Runs tasks, jumping the clock to each due time, until none is left.
    /// Returns the number of tasks run.
    pub fn run_until_idle(&mut self, target: &mut T) -> usize {
        self.run_until_idle_with(target, |_| {})
    }

    /// Like [`run_until_idle`](Self::run_until_idle), but calls `wait` with
    /// the gap before each task that is not yet due.
    pub fn run_until_idle_with<W>(&mut self, target: &mut T, mut wait: W) -> usize
    where
        W: FnMut(Duration),
    {
        let mut ran = 0;
        while self.run_next_with(target, &mut wait) {
            ran += 1;
        }
        ran
    }

    /// Runs the next live task, calling `wait` with the gap before it if it
    /// is not yet due. Returns `false` if no live task was pending.
    pub fn run_next_with<W>(&mut self, target: &mut T, mut wait: W) -> bool
    where
        W: FnMut(Duration),
    {
        while let Some(((due, _), entry)) = self.entries.pop_first() {
            if entry.token.is_cancelled() {
                continue;
            }
            if due > self.now {
                wait(due - self.now);
                self.now = due;
            }
            return self.run(target, entry);
        }
        false
    }

    fn run(&mut self, target: &mut T, entry: Entry<T>) -> bool {
        if entry.token.is_cancelled() {
            return false;
        }
        (entry.task)(target, self);
        true
    }
}
