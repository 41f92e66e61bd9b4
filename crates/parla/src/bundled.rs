//! Translation tables shipped with the application.
//!
//! Resources are embedded at compile time from `locales/` and parsed by
//! [`table`] on each call. `en` is the fallback locale.

use parla_i18n::{I18nError, LocaleTable, parse_json};

#[cfg(feature = "runtime")]
use parla_runtime::{LocaleSource, LocaleStore, SystemLocale};

/// Locale consulted when a key is missing from the active locale.
pub const FALLBACK_LOCALE: &str = "en";

/// Embedded resources as `(locale code, JSON document)`.
pub const RESOURCES: &[(&str, &str)] = &[
    ("en", include_str!("../locales/en.json")),
    ("it", include_str!("../locales/it.json")),
];

/// Locale codes with a bundled table.
pub fn locale_codes() -> impl Iterator<Item = &'static str> {
    RESOURCES.iter().map(|&(code, _)| code)
}

/// Parse the bundled resources into a table.
///
/// # Errors
///
/// Fails only if an embedded resource is malformed.
pub fn table() -> Result<LocaleTable, I18nError> {
    table_with_fallback(FALLBACK_LOCALE)
}

/// Parse the bundled resources with a different fallback locale.
///
/// # Errors
///
/// Fails if `fallback` has no bundled table.
pub fn table_with_fallback(fallback: &str) -> Result<LocaleTable, I18nError> {
    let mut builder = LocaleTable::builder().fallback(fallback);
    for &(code, json) in RESOURCES {
        let strings = parse_json(json)?;
        tracing::trace!(locale = code, keys = strings.len(), "parsed bundled locale");
        builder = builder.locale(code, strings);
    }
    builder.build()
}

/// Build a store over the bundled tables, resolving the initial locale from
/// `source`.
///
/// # Errors
///
/// See [`table`].
#[cfg(feature = "runtime")]
pub fn store(source: &dyn LocaleSource) -> Result<LocaleStore, I18nError> {
    Ok(LocaleStore::new(table()?, source))
}

/// Build a store over the bundled tables using the process environment's
/// locale.
///
/// # Errors
///
/// See [`table`].
#[cfg(feature = "runtime")]
pub fn system_store() -> Result<LocaleStore, I18nError> {
    store(&SystemLocale)
}
