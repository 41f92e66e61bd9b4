#![forbid(unsafe_code)]

//! parla public facade.
//!
//! Re-exports the locale table ([`i18n`]) and, with the default `runtime`
//! feature, the reactive locale store ([`runtime`]). The [`bundled`] module
//! carries the application's own `en` and `it` tables.
//!
//! ```
//! use parla::prelude::*;
//!
//! let store = parla::bundled::store(&FixedLocale::new("it_IT.UTF-8")).unwrap();
//! assert_eq!(store.translate("common.back", &[]), "Indietro");
//!
//! store.set_active_locale("en");
//! assert_eq!(store.translate("greeting", &[("name", "Ana")]), "Hi Ana");
//! ```

pub mod bundled;

pub use parla_i18n as i18n;
#[cfg(feature = "runtime")]
pub use parla_runtime as runtime;

pub use parla_i18n::{I18nError, LocaleStrings, LocaleTable};
#[cfg(feature = "runtime")]
pub use parla_runtime::{LocaleStore, Translator};

/// Common imports for views.
pub mod prelude {
    pub use parla_i18n::{Locale, LocaleTable};
    #[cfg(feature = "runtime")]
    pub use parla_runtime::{
        BindingScope, FixedLocale, LocaleSource, LocaleStore, Subscription, SystemLocale,
        Translator,
    };
}
