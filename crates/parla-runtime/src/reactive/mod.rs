#![forbid(unsafe_code)]

//! Reactive primitives for locale-driven re-rendering.
//!
//! - [`Observable`]: a shared, version-tracked value with change
//!   notification via subscriber callbacks.
//! - [`Subscription`]: RAII guard that unsubscribes on drop.
//! - [`Binding`]: a lazily evaluated derived value.
//! - [`BindingScope`]: owns a view's subscriptions and releases them on
//!   teardown.
//!
//! # Architecture
//!
//! `Observable<T>` uses `Rc<RefCell<..>>` for single-threaded shared
//! ownership. Subscribers are stored as `Weak` function pointers and pruned
//! lazily during notification. Nothing here is `Send`; the model is a single
//! UI event loop.
//!
//! # Invariants
//!
//! 1. Version increments exactly once per mutation that changes the value.
//! 2. Setting a value equal to the current value is a no-op (no version
//!    bump, no notifications).
//! 3. Dropping a [`Subscription`] removes the callback before the next
//!    delivery, including a delivery already in progress.

pub mod binding;
pub mod observable;

pub use binding::{Binding, BindingScope, bind_mapped};
pub use observable::{Observable, Subscription};
