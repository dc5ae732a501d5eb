//! Global loading state.
//!
//! A [`LoadingTracker`] counts in-flight requests. It is a cheap handle that
//! gets cloned into the HTTP client and into whatever UI wants to show a
//! spinner; every clone shares the same counter. Separate trackers created
//! with [`LoadingTracker::new`] are fully independent.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

type Listener = Rc<dyn Fn(bool)>;

#[derive(Default)]
struct Inner {
    pending: Cell<usize>,
    next_listener: Cell<u64>,
    listeners: RefCell<Vec<(u64, Listener)>>,
}

/// Counter of in-flight requests with a derived "is anything loading" flag.
#[derive(Clone, Default)]
pub struct LoadingTracker {
    inner: Rc<Inner>,
}

impl LoadingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the start of a request.
    pub fn begin_request(&self) {
        let before = self.inner.pending.get();
        self.inner.pending.set(before.saturating_add(1));
        if before == 0 {
            self.notify(true);
        }
    }

    /// Record the end of a request. Never drops below zero, so an unmatched
    /// call is harmless.
    pub fn end_request(&self) {
        let before = self.inner.pending.get();
        self.inner.pending.set(before.saturating_sub(1));
        if before == 1 {
            self.notify(false);
        }
    }

    /// Begin a request and return a guard that ends it when dropped.
    pub fn begin(&self) -> RequestGuard {
        self.begin_request();
        RequestGuard {
            tracker: self.clone(),
        }
    }

    pub fn pending(&self) -> usize {
        self.inner.pending.get()
    }

    pub fn is_loading(&self) -> bool {
        self.pending() > 0
    }

    /// Register a listener called with the new loading flag each time it flips.
    ///
    /// The listener stays registered until the returned [`Subscription`] is dropped.
    pub fn subscribe(&self, listener: impl Fn(bool) + 'static) -> Subscription {
        let id = self.inner.next_listener.get();
        self.inner.next_listener.set(id.wrapping_add(1));
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));

        Subscription {
            tracker: Rc::downgrade(&self.inner),
            id,
        }
    }

    fn notify(&self, loading: bool) {
        // Snapshot first: a listener may subscribe or unsubscribe while running.
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();

        for listener in listeners {
            listener(loading);
        }
    }
}

impl PartialEq for LoadingTracker {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for LoadingTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadingTracker")
            .field("pending", &self.pending())
            .finish()
    }
}

/// Ends the request it was created for exactly once, on drop.
#[must_use = "dropping the guard immediately ends the request"]
pub struct RequestGuard {
    tracker: LoadingTracker,
}

impl Drop for RequestGuard {
    fn drop(&mut self) {
        self.tracker.end_request();
    }
}

/// Handle returned by [`LoadingTracker::subscribe`].
pub struct Subscription {
    tracker: Weak<Inner>,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.tracker.upgrade() {
            inner
                .listeners
                .borrow_mut()
                .retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_tracks_begin_and_end() {
        let tracker = LoadingTracker::new();
        assert!(!tracker.is_loading());

        tracker.begin_request();
        tracker.begin_request();
        assert_eq!(tracker.pending(), 2);
        assert!(tracker.is_loading());

        tracker.end_request();
        assert!(tracker.is_loading());
        tracker.end_request();
        assert_eq!(tracker.pending(), 0);
        assert!(!tracker.is_loading());
    }

    #[test]
    fn end_without_begin_stays_at_zero() {
        let tracker = LoadingTracker::new();
        tracker.end_request();
        tracker.end_request();
        assert_eq!(tracker.pending(), 0);

        tracker.begin_request();
        assert_eq!(tracker.pending(), 1);
    }

    #[test]
    fn arbitrary_sequences_never_go_negative() {
        let tracker = LoadingTracker::new();
        let mut model: i64 = 0;
        // begin = true, end = false
        let steps = [
            false, true, true, false, false, false, true, false, true, true, true, false, false,
            false, false, true,
        ];

        for begin in steps {
            if begin {
                tracker.begin_request();
                model += 1;
            } else {
                tracker.end_request();
                model = (model - 1).max(0);
            }
            assert_eq!(tracker.pending() as i64, model);
            assert_eq!(tracker.is_loading(), model > 0);
        }
    }

    #[test]
    fn guard_ends_request_on_drop() {
        let tracker = LoadingTracker::new();
        {
            let _guard = tracker.begin();
            assert_eq!(tracker.pending(), 1);
        }
        assert_eq!(tracker.pending(), 0);
    }

    #[test]
    fn trackers_are_independent() {
        let first = LoadingTracker::new();
        let second = LoadingTracker::new();
        first.begin_request();

        assert!(first.is_loading());
        assert!(!second.is_loading());
        assert_ne!(first, second);
        assert_eq!(first, first.clone());
    }

    #[test]
    fn listeners_see_flag_flips_only() {
        let tracker = LoadingTracker::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let subscription = {
            let seen = seen.clone();
            tracker.subscribe(move |loading| seen.borrow_mut().push(loading))
        };

        tracker.begin_request();
        tracker.begin_request();
        tracker.end_request();
        tracker.end_request();
        tracker.end_request();
        assert_eq!(*seen.borrow(), vec![true, false]);

        drop(subscription);
        tracker.begin_request();
        assert_eq!(seen.borrow().len(), 2);
    }
}
