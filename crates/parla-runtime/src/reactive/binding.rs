#![forbid(unsafe_code)]

//! Read bindings and subscription scopes for views.
//!
//! A [`Binding<T>`] wraps an evaluation closure so a view can pull a
//! derived display value (a translated label, a locale badge) without
//! caching it. A [`BindingScope`] owns every [`Subscription`] a view holds
//! and releases them together when the view is torn down.
//!
//! # Invariants
//!
//! 1. `Binding::get()` re-evaluates on every call; it never returns a
//!    stale value.
//! 2. After a `BindingScope` is dropped or cleared, none of its callbacks
//!    fire again.

use std::rc::Rc;

use super::observable::{Observable, Subscription};

/// A read-only, lazily evaluated value.
pub struct Binding<T> {
    eval: Rc<dyn Fn() -> T>,
}

impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Self {
            eval: Rc::clone(&self.eval),
        }
    }
}

impl<T> std::fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding").finish_non_exhaustive()
    }
}

impl<T: 'static> Binding<T> {
    /// Create a binding that evaluates `f` on each `get()` call.
    pub fn new(f: impl Fn() -> T + 'static) -> Self {
        Self { eval: Rc::new(f) }
    }

    /// Evaluate the binding.
    #[must_use]
    pub fn get(&self) -> T {
        (self.eval)()
    }

    /// Apply a further transform, returning a new `Binding`.
    pub fn then<U: 'static>(self, f: impl Fn(T) -> U + 'static) -> Binding<U> {
        Binding {
            eval: Rc::new(move || f((self.eval)())),
        }
    }
}

/// Bind to an observable's value, transformed by `map` on every read.
pub fn bind_mapped<S: Clone + PartialEq + 'static, T: 'static>(
    source: &Observable<S>,
    map: impl Fn(&S) -> T + 'static,
) -> Binding<T> {
    let src = source.clone();
    Binding::new(move || src.with(|v| map(v)))
}

/// Owns the subscriptions of one logical consumer (typically a view).
///
/// Dropping the scope is the view's teardown: every held subscription is
/// released.
#[derive(Default)]
pub struct BindingScope {
    subscriptions: Vec<Subscription>,
}

impl BindingScope {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of an existing subscription.
    pub fn hold(&mut self, sub: Subscription) {
        self.subscriptions.push(sub);
    }

    /// Subscribe to `source` for the lifetime of this scope.
    pub fn subscribe<T: Clone + PartialEq + 'static>(
        &mut self,
        source: &Observable<T>,
        callback: impl Fn(&T) + 'static,
    ) -> &mut Self {
        self.subscriptions.push(source.subscribe(callback));
        self
    }

    /// Number of held subscriptions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Release every subscription now; the scope stays usable.
    pub fn clear(&mut self) {
        self.subscriptions.clear();
    }
}

impl std::fmt::Debug for BindingScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BindingScope")
            .field("len", &self.subscriptions.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn mapped_binding_tracks_source() {
        let locale = Observable::new("en".to_string());
        let badge = bind_mapped(&locale, |code| code.to_uppercase());
        assert_eq!(badge.get(), "EN");

        locale.set("it".to_string());
        assert_eq!(badge.get(), "IT");
    }

    #[test]
    fn then_chains_transforms() {
        let n = Observable::new(2);
        let label = bind_mapped(&n, |v| v * 10).then(|v| format!("{v} chats"));
        assert_eq!(label.get(), "20 chats");
        n.set(3);
        assert_eq!(label.get(), "30 chats");
    }

    #[test]
    fn binding_is_not_cached() {
        let calls = Rc::new(Cell::new(0));
        let c = Rc::clone(&calls);
        let b = Binding::new(move || {
            c.set(c.get() + 1);
            c.get()
        });
        assert_eq!(b.get(), 1);
        assert_eq!(b.clone().get(), 2);
    }

    #[test]
    fn debug_does_not_evaluate() {
        let calls = Rc::new(Cell::new(0));
        let c = Rc::clone(&calls);
        let b = Binding::new(move || c.set(c.get() + 1));
        assert_eq!(format!("{b:?}"), "Binding { .. }");
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn scope_drop_releases_subscriptions() {
        let obs = Observable::new(0);
        let seen = Rc::new(Cell::new(0));

        {
            let mut scope = BindingScope::new();
            let s = Rc::clone(&seen);
            scope.subscribe(&obs, move |v| s.set(*v));
            let s = Rc::clone(&seen);
            scope.hold(obs.subscribe(move |v| s.set(*v * 100)));
            assert_eq!(scope.len(), 2);

            obs.set(1);
            assert_eq!(seen.get(), 100);
        }

        obs.set(2);
        assert_eq!(seen.get(), 100, "callbacks must not fire after teardown");
        assert_eq!(obs.subscriber_count(), 0);
    }

    #[test]
    fn scope_clear_is_reusable() {
        let obs = Observable::new(0);
        let hits = Rc::new(Cell::new(0));
        let mut scope = BindingScope::new();

        let h = Rc::clone(&hits);
        scope.subscribe(&obs, move |_| h.set(h.get() + 1));
        scope.clear();
        assert!(scope.is_empty());
        obs.set(1);
        assert_eq!(hits.get(), 0);

        let h = Rc::clone(&hits);
        scope.subscribe(&obs, move |_| h.set(h.get() + 1));
        obs.set(2);
        assert_eq!(hits.get(), 1);
        assert_eq!(format!("{scope:?}"), "BindingScope { len: 1 }");
    }
}
