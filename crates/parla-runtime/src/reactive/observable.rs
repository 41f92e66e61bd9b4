#![forbid(unsafe_code)]

//! Observable value wrapper with change notification and version tracking.
//!
//! # Design
//!
//! [`Observable<T>`] wraps a value of type `T` in shared, reference-counted
//! storage (`Rc<RefCell<..>>`). When the value changes (determined by
//! `PartialEq`), every live subscriber is notified.
//!
//! Notification is snapshot-then-dispatch: the subscriber list is copied
//! (as weak handles) before any callback runs, and no borrow is held while
//! callbacks execute. Callbacks may therefore subscribe, unsubscribe, or
//! read the observable freely.
//!
//! # Performance
//!
//! | Operation    | Complexity               |
//! |-------------|--------------------------|
//! | `get()`     | O(1) + clone of `T`      |
//! | `set()`     | O(S) where S = subscribers |
//! | `subscribe()` | O(S) (prunes dead entries) |
//! | drop `Subscription` | O(S)               |
//!
//! # Failure Modes
//!
//! - **Unsubscribe during dispatch**: a subscriber dropped by an earlier
//!   callback in the same dispatch is skipped; its weak handle no longer
//!   upgrades.
//! - **Subscribe during dispatch**: the new callback is not part of the
//!   snapshot and first fires on the next change.
//! - **Nested set**: a callback that calls `set()` with a different value
//!   starts a nested dispatch. The outer dispatch then stops, so no
//!   subscriber observes the superseded value after the newer one.
//! - **Subscriber leak**: if `Subscription` guards are stored indefinitely,
//!   callbacks accumulate. A dropped guard removes its own entry; if the
//!   list is borrowed at that moment (a drop inside [`Observable::with`]),
//!   the entry is pruned by the next `subscribe()` or `notify()`.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// A subscriber callback stored as a strong `Rc` internally, handed out
/// as `Weak` to the observable.
type CallbackRc<T> = Rc<dyn Fn(&T)>;
type CallbackWeak<T> = Weak<dyn Fn(&T)>;

struct ObservableInner<T> {
    value: T,
    version: u64,
    next_id: u64,
    /// Entries are keyed by subscription id so a guard can remove its own.
    subscribers: Vec<(u64, CallbackWeak<T>)>,
}

impl<T> ObservableInner<T> {
    fn prune(&mut self) {
        self.subscribers.retain(|(_, w)| w.strong_count() > 0);
    }
}

/// A shared, version-tracked value with change notification.
///
/// Cloning an `Observable` creates a new handle to the **same** inner state:
/// both handles see the same value and share subscribers.
///
/// # Invariants
///
/// 1. `version` increments by exactly 1 on each value-changing mutation.
/// 2. `set(v)` where `v == current` is a no-op.
/// 3. Each subscription is an independent entry; subscribing the same
///    logic twice yields two notifications per change.
/// 4. A dropped [`Subscription`] is never invoked again.
pub struct Observable<T> {
    inner: Rc<RefCell<ObservableInner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .field("subscriber_count", &inner.subscribers.len())
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    /// Create a new observable with the given initial value.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ObservableInner {
                value,
                version: 0,
                next_id: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Get a clone of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Access the current value by reference without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Set a new value. Returns `true` if the value changed, in which case
    /// the version was bumped and subscribers were notified before return.
    pub fn set(&self, value: T) -> bool {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.value == value {
                return false;
            }
            inner.value = value;
            inner.version += 1;
        }
        self.notify();
        true
    }

    /// Subscribe to value changes. The callback receives the new value each
    /// time it changes.
    ///
    /// Dropping the returned guard (or calling [`Subscription::unsubscribe`])
    /// removes the callback.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let strong: CallbackRc<T> = Rc::new(callback);
        let id = {
            let mut inner = self.inner.borrow_mut();
            inner.prune();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.subscribers.push((id, Rc::downgrade(&strong)));
            id
        };

        let state = Rc::downgrade(&self.inner);
        Subscription {
            _guard: Box::new(strong),
            detach: Some(Box::new(move || {
                let Some(state) = state.upgrade() else {
                    return;
                };
                // Busy only when dropped inside `with`; the dead entry is
                // pruned on the next subscribe or notify.
                if let Ok(mut inner) = state.try_borrow_mut() {
                    inner.subscribers.retain(|(entry, _)| *entry != id);
                }
            })),
        }
    }

    /// Current version number; increments by 1 on each change.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Number of subscribers whose guards are still alive.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .borrow()
            .subscribers
            .iter()
            .filter(|(_, w)| w.strong_count() > 0)
            .count()
    }

    /// Raw length of the subscriber list, dead entries included.
    #[cfg(test)]
    pub(crate) fn entry_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    fn notify(&self) {
        let (snapshot, value, version) = {
            let mut inner = self.inner.borrow_mut();
            inner.prune();
            (
                inner
                    .subscribers
                    .iter()
                    .map(|(_, w)| w.clone())
                    .collect::<Vec<_>>(),
                inner.value.clone(),
                inner.version,
            )
        };

        for weak in &snapshot {
            if self.version() != version {
                // A callback set a newer value; its own dispatch has run.
                tracing::trace!(version, "dispatch superseded by nested change");
                break;
            }
            if let Some(callback) = weak.upgrade() {
                callback(&value);
            }
        }
    }
}

/// RAII guard for a subscriber callback.
///
/// Dropping the `Subscription` removes its entry from the observable and
/// drops the only strong reference to the callback, so a snapshot taken by
/// an in-flight dispatch no longer upgrades it either.
#[must_use = "dropping a subscription unsubscribes its callback"]
pub struct Subscription {
    /// Type-erased strong `Rc<dyn Fn(&T)>`.
    _guard: Box<dyn std::any::Any>,
    detach: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Remove the callback now. Equivalent to dropping the guard.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}
