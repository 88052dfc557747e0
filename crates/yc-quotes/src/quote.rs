//! `Quote` trait and the `SimpleQuote` implementation.

use std::sync::{Mutex, Weak};

use yc_core::observable::{Observable, Observer, ObserverList};
use yc_core::Real;

/// A market-observable value.
///
/// A quote may be *empty* (no current value); consumers that require a value
/// must handle the `None` case.  Quotes notify their observers whenever the
/// value changes.
pub trait Quote: Observable + std::fmt::Debug + Send + Sync {
    /// The current value, or `None` if the quote is empty.
    fn value(&self) -> Option<Real>;

    /// Return `true` if the quote currently holds a value.
    fn is_valid(&self) -> bool {
        self.value().is_some()
    }
}

/// A simple, settable market quote.
///
/// Mutation goes through `&self`; the quote is meant to be shared as
/// `Arc<SimpleQuote>` between the market-data owner and any number of
/// consumers.
#[derive(Debug)]
pub struct SimpleQuote {
    value: Mutex<Option<Real>>,
    observers: ObserverList,
}

impl SimpleQuote {
    /// Create a quote holding `value`.
    pub fn new(value: Real) -> Self {
        Self {
            value: Mutex::new(Some(value)),
            observers: ObserverList::new(),
        }
    }

    /// Create an empty quote.
    pub fn empty() -> Self {
        Self {
            value: Mutex::new(None),
            observers: ObserverList::new(),
        }
    }

    /// Set a new value, notifying observers if it differs from the old one.
    ///
    /// Returns the difference to the previous value, or `None` if the quote
    /// was empty before.
    pub fn set_value(&self, value: Real) -> Option<Real> {
        let (diff, changed) = {
            let mut guard = self.value.lock().expect("quote mutex poisoned");
            let old = *guard;
            let changed = old != Some(value);
            *guard = Some(value);
            (old.map(|o| value - o), changed)
        };
        if changed {
            self.observers.notify();
        }
        diff
    }

    /// Clear the value, making the quote empty, and notify observers.
    pub fn reset(&self) {
        let changed = {
            let mut guard = self.value.lock().expect("quote mutex poisoned");
            let changed = guard.is_some();
            *guard = None;
            changed
        };
        if changed {
            self.observers.notify();
        }
    }
}

impl Quote for SimpleQuote {
    fn value(&self) -> Option<Real> {
        *self.value.lock().expect("quote mutex poisoned")
    }
}

impl Observable for SimpleQuote {
    fn register_observer(&self, observer: Weak<dyn Observer>) {
        self.observers.register(observer);
    }

    fn unregister_observer(&self, observer: &Weak<dyn Observer>) {
        self.observers.unregister(observer);
    }

    fn notify_observers(&self) {
        self.observers.notify();
    }
}
