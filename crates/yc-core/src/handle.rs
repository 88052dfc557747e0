//! Shared, late-bound references to market objects.
//!
//! A [`Handle`] is a reference-counted pointer that may be empty; consumers
//! check emptiness before use.  A [`RelinkableHandle`] additionally allows
//! the pointed-to object to be swapped at runtime: all clones of the handle
//! see the new target, and registered observers are told about the switch.
//!
//! Both are parameterised over `T: ?Sized` so they can hold trait objects
//! (`RelinkableHandle<dyn YieldTermStructure>` is the usual case).

use std::sync::{Arc, Mutex, Weak};

use crate::observable::{Observable, Observer, ObserverList};

/// A shared, optionally-empty reference to a value of type `T`.
///
/// The handle itself is read-only; to repoint it at runtime use a
/// [`RelinkableHandle`].
pub struct Handle<T: ?Sized> {
    inner: Option<Arc<T>>,
}

impl<T: ?Sized> Handle<T> {
    /// Create a handle from an existing `Arc`.
    pub fn from_arc(arc: Arc<T>) -> Self {
        Self { inner: Some(arc) }
    }

    /// Create an empty handle.
    pub fn empty() -> Self {
        Self { inner: None }
    }

    /// Return `true` if the handle contains no value.
    pub fn is_empty(&self) -> bool {
        self.inner.is_none()
    }

    /// Return a clone of the inner `Arc<T>`, or `None` if empty.
    pub fn as_arc(&self) -> Option<Arc<T>> {
        self.inner.clone()
    }

    /// Borrow the contained value, or `None` if empty.
    pub fn get(&self) -> Option<&T> {
        self.inner.as_deref()
    }
}

impl<T: ?Sized> Clone for Handle<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: ?Sized> Default for Handle<T> {
    fn default() -> Self {
        Self::empty()
    }
}

struct LinkState<T: ?Sized> {
    target: Mutex<Option<Arc<T>>>,
    observers: ObserverList,
}

/// A [`Handle`] whose target can be relinked at runtime.
///
/// Clones share the link cell and the observer list: relinking through one
/// clone repoints every clone and notifies every observer registered through
/// any clone.
pub struct RelinkableHandle<T: ?Sized> {
    state: Arc<LinkState<T>>,
}

impl<T: ?Sized> RelinkableHandle<T> {
    /// Create a new relinkable handle, initially empty.
    pub fn empty() -> Self {
        Self {
            state: Arc::new(LinkState {
                target: Mutex::new(None),
                observers: ObserverList::new(),
            }),
        }
    }

    /// Create a new relinkable handle already pointing at `arc`.
    pub fn linked_to(arc: Arc<T>) -> Self {
        let handle = Self::empty();
        handle.link_to_quietly(arc);
        handle
    }

    /// Repoint the handle at `arc` and notify observers of the switch.
    pub fn link_to(&self, arc: Arc<T>) {
        self.link_to_quietly(arc);
        self.state.observers.notify();
    }

    /// Repoint the handle at `arc` without notifying observers.
    ///
    /// Used where the caller is itself reacting to the target (a bootstrap
    /// linking a helper to the curve under construction must not trigger the
    /// helper's observers back into the curve).
    pub fn link_to_quietly(&self, arc: Arc<T>) {
        let mut guard = self
            .state
            .target
            .lock()
            .expect("relinkable handle mutex poisoned");
        *guard = Some(arc);
    }

    /// Detach the handle from any target and notify observers.
    pub fn unlink(&self) {
        {
            let mut guard = self
                .state
                .target
                .lock()
                .expect("relinkable handle mutex poisoned");
            *guard = None;
        }
        self.state.observers.notify();
    }

    /// Return `true` if the handle currently has no target.
    pub fn is_empty(&self) -> bool {
        self.state
            .target
            .lock()
            .expect("relinkable handle mutex poisoned")
            .is_none()
    }

    /// Snapshot the current target.
    pub fn current(&self) -> Option<Arc<T>> {
        self.state
            .target
            .lock()
            .expect("relinkable handle mutex poisoned")
            .clone()
    }

    /// Execute a closure with a reference to the current target.
    ///
    /// Returns `None` if the handle is empty.
    pub fn with<F, R>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&T) -> R,
    {
        self.current().map(|arc| f(&arc))
    }
}

impl<T: ?Sized> Clone for RelinkableHandle<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<T: ?Sized> Default for RelinkableHandle<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: ?Sized> Observable for RelinkableHandle<T> {
    fn register_observer(&self, observer: Weak<dyn Observer>) {
        self.state.observers.register(observer);
    }

    fn unregister_observer(&self, observer: &Weak<dyn Observer>) {
        self.state.observers.unregister(observer);
    }

    fn notify_observers(&self) {
        self.state.observers.notify();
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
    fn empty_handle() {
        let h: Handle<f64> = Handle::empty();
        assert!(h.is_empty());
        assert!(h.get().is_none());
    }

    #[test]
    fn clones_share_link() {
        let h: RelinkableHandle<f64> = RelinkableHandle::empty();
        let h2 = h.clone();
        h.link_to(Arc::new(4.0));
        assert_eq!(h2.current().as_deref(), Some(&4.0));
        h2.link_to(Arc::new(5.0));
        assert_eq!(h.current().as_deref(), Some(&5.0));
    }

    #[test]
    fn relink_notifies() {
        let obs = Arc::new(CountingObserver {
            count: AtomicU32::new(0),
        });
        let h: RelinkableHandle<f64> = RelinkableHandle::empty();
        h.register_observer(Arc::downgrade(&obs) as Weak<dyn Observer>);
        h.link_to(Arc::new(1.0));
        assert_eq!(obs.count.load(Ordering::Relaxed), 1);
        h.unlink();
        assert_eq!(obs.count.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn quiet_relink_does_not_notify() {
        let obs = Arc::new(CountingObserver {
            count: AtomicU32::new(0),
        });
        let h: RelinkableHandle<f64> = RelinkableHandle::empty();
        h.register_observer(Arc::downgrade(&obs) as Weak<dyn Observer>);
        h.link_to_quietly(Arc::new(1.0));
        assert_eq!(obs.count.load(Ordering::Relaxed), 0);
        assert!(!h.is_empty());
    }

    #[test]
    fn observers_shared_across_clones() {
        let obs = Arc::new(CountingObserver {
            count: AtomicU32::new(0),
        });
        let h: RelinkableHandle<f64> = RelinkableHandle::empty();
        let h2 = h.clone();
        h.register_observer(Arc::downgrade(&obs) as Weak<dyn Observer>);
        h2.link_to(Arc::new(1.0));
        assert_eq!(obs.count.load(Ordering::Relaxed), 1);
    }
}
