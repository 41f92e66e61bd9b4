#![forbid(unsafe_code)]

//! Runtime locale state for parla.
//!
//! - [`LocaleStore`] owns the translation tables and the active locale and
//!   notifies subscribers when it changes.
//! - [`Translator`] binds one view to the store and removes its
//!   subscription on teardown.
//! - [`reactive`] holds the observable primitives both are built on.

pub mod locale;
pub mod reactive;
pub mod translator;

pub use locale::{FixedLocale, Locale, LocaleSource, LocaleStore, SystemLocale, resolve_locale};
pub use reactive::{Binding, BindingScope, Observable, Subscription};
pub use translator::Translator;
