//! The evaluation-date context.
//!
//! Instead of a process-wide singleton, the date "as of which" everything is
//! valued is an explicit shared object.  Components that derive dates from
//! today (relative-date rate helpers, mostly) hold an `Arc<EvaluationDate>`
//! and register themselves as observers; advancing the date notifies them.

use std::sync::{Mutex, Weak};

use crate::date::Date;
use yc_core::observable::{Observable, Observer, ObserverList};

/// A shared, observable evaluation date.
pub struct EvaluationDate {
    today: Mutex<Date>,
    observers: ObserverList,
}

impl EvaluationDate {
    /// Create a context starting at `today`.
    pub fn new(today: Date) -> Self {
        Self {
            today: Mutex::new(today),
            observers: ObserverList::new(),
        }
    }

    /// The current evaluation date.
    pub fn value(&self) -> Date {
        *self
            .today
            .lock()
            .expect("evaluation date mutex poisoned")
    }

    /// Move the evaluation date to `date`, notifying observers if it changed.
    pub fn set(&self, date: Date) {
        let changed = {
            let mut guard = self
                .today
                .lock()
                .expect("evaluation date mutex poisoned");
            let changed = *guard != date;
            *guard = date;
            changed
        };
        if changed {
            self.observers.notify();
        }
    }
}

impl Observable for EvaluationDate {
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    struct CountingObserver {
        count: AtomicU32,
    }

    impl Observer for CountingObserver {
        fn update(&self) {
            self.count.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn set_notifies_on_change_only() {
        let eval = EvaluationDate::new(date(2024, 3, 1));
        let obs = Arc::new(CountingObserver {
            count: AtomicU32::new(0),
        });
        eval.register_observer(Arc::downgrade(&obs) as Weak<dyn Observer>);

        eval.set(date(2024, 3, 1));
        assert_eq!(obs.count.load(Ordering::Relaxed), 0);

        eval.set(date(2024, 3, 4));
        assert_eq!(obs.count.load(Ordering::Relaxed), 1);
        assert_eq!(eval.value(), date(2024, 3, 4));
    }
}
