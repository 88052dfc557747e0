//! Observer / Observable pattern.
//!
//! The library's change-propagation mechanism: an **Observable** object
//! notifies registered **Observer**s whenever it changes state, and observers
//! react in `update()`.  Registration holds `Weak` references so observer
//! lifetime stays with its owner; dead entries are pruned during
//! notification.
//!
//! All methods take `&self` so the pattern works through shared `Arc`s; the
//! observer list lives behind a `Mutex` to keep observables `Sync`.

use std::sync::{Arc, Mutex, Weak};

/// An object that can notify interested parties when it changes.
pub trait Observable {
    /// Register an observer to receive future change notifications.
    fn register_observer(&self, observer: Weak<dyn Observer>);

    /// Remove a previously registered observer.
    fn unregister_observer(&self, observer: &Weak<dyn Observer>);

    /// Notify all currently registered observers that this object has changed.
    fn notify_observers(&self);
}

/// An object that reacts to changes in [`Observable`]s it has subscribed to.
///
/// `update` must be cheap and must not fail: implementations mark caches
/// stale or record a deferred error rather than recompute or propagate.
pub trait Observer: Send + Sync {
    /// Called by every observable this observer is registered with when that
    /// observable changes state.
    fn update(&self);
}

/// Embeddable observer-list management.
///
/// Any type that wants to be an [`Observable`] holds one of these and
/// forwards the trait methods to it.
#[derive(Default)]
pub struct ObserverList {
    observers: Mutex<Vec<Weak<dyn Observer>>>,
}

impl ObserverList {
    /// Create a new, empty observer list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer.
    pub fn register(&self, observer: Weak<dyn Observer>) {
        self.observers
            .lock()
            .expect("observer list mutex poisoned")
            .push(observer);
    }

    /// Remove an observer (by pointer equality of the `Weak`).
    pub fn unregister(&self, observer: &Weak<dyn Observer>) {
        self.observers
            .lock()
            .expect("observer list mutex poisoned")
            .retain(|o| !Weak::ptr_eq(o, observer));
    }

    /// Notify all live observers, pruning dead `Weak` references.
    ///
    /// Each live observer receives exactly one `update` call.  The lock is
    /// released before any `update` runs, so observers may re-register or
    /// trigger further notifications without deadlocking.
    pub fn notify(&self) {
        let live: Vec<Arc<dyn Observer>> = {
            let mut guard = self
                .observers
                .lock()
                .expect("observer list mutex poisoned");
            guard.retain(|w| w.strong_count() > 0);
            guard.iter().filter_map(Weak::upgrade).collect()
        };
        for obs in live {
            obs.update();
        }
    }

    /// Number of currently registered (live or dead) entries.
    pub fn len(&self) -> usize {
        self.observers
            .lock()
            .expect("observer list mutex poisoned")
            .len()
    }

    /// Whether no observers are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for ObserverList {
    // The entries are `Weak<dyn Observer>`; only the count is printable.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverList")
            .field("observers", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct CountingObserver {
        count: AtomicU32,
    }

    impl Observer for CountingObserver {
        fn update(&self) {
            self.count.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[test]
    fn register_and_notify() {
        let obs = Arc::new(CountingObserver {
            count: AtomicU32::new(0),
        });
        let list = ObserverList::new();
        list.register(Arc::downgrade(&obs) as Weak<dyn Observer>);
        list.notify();
        assert_eq!(obs.count.load(Ordering::Relaxed), 1);
        list.notify();
        assert_eq!(obs.count.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn each_notification_delivered_once() {
        let a = Arc::new(CountingObserver {
            count: AtomicU32::new(0),
        });
        let b = Arc::new(CountingObserver {
            count: AtomicU32::new(0),
        });
        let list = ObserverList::new();
        list.register(Arc::downgrade(&a) as Weak<dyn Observer>);
        list.register(Arc::downgrade(&b) as Weak<dyn Observer>);
        list.notify();
        assert_eq!(a.count.load(Ordering::Relaxed), 1);
        assert_eq!(b.count.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn dead_observer_pruned() {
        let list = ObserverList::new();
        {
            let obs = Arc::new(CountingObserver {
                count: AtomicU32::new(0),
            });
            list.register(Arc::downgrade(&obs) as Weak<dyn Observer>);
        }
        list.notify();
        assert!(list.is_empty());
    }

    #[test]
    fn debug_shows_the_entry_count() {
        let obs = Arc::new(CountingObserver {
            count: AtomicU32::new(0),
        });
        let list = ObserverList::new();
        list.register(Arc::downgrade(&obs) as Weak<dyn Observer>);
        assert_eq!(format!("{list:?}"), "ObserverList { observers: 1 }");
    }

    #[test]
    fn unregister() {
        let obs = Arc::new(CountingObserver {
            count: AtomicU32::new(0),
        });
        let weak = Arc::downgrade(&obs) as Weak<dyn Observer>;
        let list = ObserverList::new();
        list.register(weak.clone());
        list.unregister(&weak);
        list.notify();
        assert_eq!(obs.count.load(Ordering::Relaxed), 0);
    }
}
