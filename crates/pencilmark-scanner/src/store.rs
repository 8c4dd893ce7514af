//! An observable state container.

use std::fmt;

/// Identifies a subscription for [`Store::unsubscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber<T> = Box<dyn FnMut(&T)>;

/// A value with push-based change notification.
///
/// Every [`set`](Self::set) bumps the revision and notifies subscribers in
/// subscription order. The revision lets consumers tell their own writes
/// from external ones.
///
/// # Examples
///
/// ```
/// use std::{cell::RefCell, rc::Rc};
///
/// use pencilmark_scanner::Store;
///
/// let mut store = Store::new(1);
/// let seen = Rc::new(RefCell::new(vec![]));
/// let sink = Rc::clone(&seen);
/// store.subscribe(move |v: &i32| sink.borrow_mut().push(*v));
/// store.set(2);
/// assert_eq!(*seen.borrow(), [1, 2]);
/// assert_eq!(store.revision(), 1);
/// ```
pub struct Store<T> {
    value: T,
    revision: u64,
    subscribers: Vec<(SubscriptionId, Subscriber<T>)>,
    next_id: u64,
}

impl<T: fmt::Debug> fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("value", &self.value)
            .field("revision", &self.revision)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl<T: Default> Default for Store<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Store<T> {
    /// Creates a store at revision 0.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            value,
            revision: 0,
            subscribers: vec![],
            next_id: 0,
        }
    }

    /// Returns the current value.
    #[must_use]
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Returns the number of writes so far.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replaces the value and notifies subscribers.
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.revision += 1;
        for (_, subscriber) in &mut self.subscribers {
            subscriber(&self.value);
        }
    }

    /// Registers a callback, calling it once with the current value.
    pub fn subscribe<F>(&mut self, mut f: F) -> SubscriptionId
    where
        F: FnMut(&T) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        f(&self.value);
        self.subscribers.push((id, Box::new(f)));
        id
    }

    /// Removes a subscription. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }
}
