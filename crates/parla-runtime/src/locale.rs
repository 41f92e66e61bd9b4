#![forbid(unsafe_code)]

//! Locale store: the active locale, the translation tables, and change
//! notification.
//!
//! A [`LocaleStore`] is constructed explicitly and passed by handle to the
//! views that need it; cloning a store yields another handle to the same
//! state. Locale changes are versioned so render loops can dirty-check, and
//! subscribers are notified synchronously before `set_active_locale`
//! returns.
//!
//! The initial locale is resolved once, at construction, from a
//! [`LocaleSource`]: the host's preferred language if the table supports it,
//! otherwise the table's fallback locale.

use std::env;
use std::rc::Rc;

pub use parla_i18n::Locale;
use parla_i18n::LocaleTable;

use crate::reactive::{Observable, Subscription};

/// Host accessor for the device's preferred language.
///
/// Queried exactly once, when a [`LocaleStore`] is constructed.
pub trait LocaleSource {
    /// Raw preferred locale (e.g. `"it_IT.UTF-8"`, `"pt-BR"`), if known.
    fn preferred_locale(&self) -> Option<String>;
}

impl<F: Fn() -> Option<String>> LocaleSource for F {
    fn preferred_locale(&self) -> Option<String> {
        self()
    }
}

/// Reads the POSIX locale environment: `LC_ALL`, then `LC_MESSAGES`, then
/// `LANG`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLocale;

impl LocaleSource for SystemLocale {
    fn preferred_locale(&self) -> Option<String> {
        let lc_all = env::var("LC_ALL").ok();
        let lc_messages = env::var("LC_MESSAGES").ok();
        let lang = env::var("LANG").ok();
        detect_system_locale_from(&[lc_all.as_deref(), lc_messages.as_deref(), lang.as_deref()])
    }
}

/// A fixed answer, for tests and for hosts that already know the locale.
#[derive(Debug, Clone, Default)]
pub struct FixedLocale(pub Option<String>);

impl FixedLocale {
    #[must_use]
    pub fn new(locale: impl Into<String>) -> Self {
        Self(Some(locale.into()))
    }

    /// A source that reports no preference.
    #[must_use]
    pub fn unknown() -> Self {
        Self(None)
    }
}

impl LocaleSource for FixedLocale {
    fn preferred_locale(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Shared locale state: translation tables plus the observable active locale.
#[derive(Clone, Debug)]
pub struct LocaleStore {
    table: Rc<LocaleTable>,
    active: Observable<Locale>,
}

impl LocaleStore {
    /// Create a store, resolving the initial locale from `source`.
    #[must_use]
    pub fn new(table: LocaleTable, source: &dyn LocaleSource) -> Self {
        let preferred = source.preferred_locale();
        let active = resolve_locale(&table, preferred.as_deref());
        tracing::debug!(
            preferred = preferred.as_deref().unwrap_or("<none>"),
            active = %active,
            "resolved initial locale"
        );
        Self {
            table: Rc::new(table),
            active: Observable::new(active),
        }
    }

    /// Create a store whose initial locale comes from the environment.
    #[must_use]
    pub fn from_system(table: LocaleTable) -> Self {
        Self::new(table, &SystemLocale)
    }

    /// Translate `key` in the active locale, substituting `{{name}}`
    /// placeholders from `params`.
    ///
    /// Falls back to the fallback locale, then to the raw key. Never fails.
    #[must_use]
    pub fn translate(&self, key: &str, params: &[(&str, &str)]) -> String {
        self.active
            .with(|locale| self.table.translate(locale, key, params))
    }

    /// The active locale.
    #[must_use]
    pub fn active_locale(&self) -> Locale {
        self.active.get()
    }

    /// Switch the active locale.
    ///
    /// Unknown codes are ignored. Setting the current code again is a no-op.
    /// Returns `true` if the locale changed; subscribers have then been
    /// notified exactly once.
    pub fn set_active_locale(&self, code: &str) -> bool {
        if !self.table.contains_locale(code) {
            tracing::debug!(
                requested = code,
                active = %self.active_locale(),
                "ignoring unknown locale"
            );
            return false;
        }
        let previous_version = self.active.version();
        let changed = self.active.set(code.to_string());
        if changed {
            tracing::debug!(
                locale = code,
                version = previous_version + 1,
                "active locale changed"
            );
        }
        changed
    }

    /// Subscribe to active-locale changes.
    ///
    /// Every call registers an independent entry. Dropping the returned
    /// guard or calling [`Subscription::unsubscribe`] removes it.
    pub fn subscribe(&self, callback: impl Fn(&str) + 'static) -> Subscription {
        self.active.subscribe(move |locale: &Locale| callback(locale))
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.active.subscriber_count()
    }

    #[cfg(test)]
    pub(crate) fn subscriber_entries(&self) -> usize {
        self.active.entry_count()
    }

    /// Version counter; advances once per effective locale change.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.active.version()
    }

    /// Locale codes with a translation table, sorted.
    #[must_use]
    pub fn supported_locales(&self) -> Vec<&str> {
        self.table.locales()
    }

    #[must_use]
    pub fn fallback_locale(&self) -> &str {
        self.table.fallback_locale()
    }

    #[must_use]
    pub fn table(&self) -> &LocaleTable {
        &self.table
    }
}

/// Pick the initial locale for `table` given the host's raw preference.
///
/// Tries the normalized tag, then its primary language subtag, both
/// case-insensitively; otherwise the fallback locale.
#[must_use]
pub fn resolve_locale(table: &LocaleTable, preferred: Option<&str>) -> Locale {
    let Some(normalized) = preferred.and_then(normalize_locale_raw) else {
        return table.fallback_locale().to_string();
    };
    let primary = normalized.split('-').next().unwrap_or(&normalized);

    for candidate in [normalized.as_str(), primary] {
        if let Some(code) = table
            .locales()
            .into_iter()
            .find(|code| code.eq_ignore_ascii_case(candidate))
        {
            return code.to_string();
        }
    }
    table.fallback_locale().to_string()
}

fn detect_system_locale_from(vars: &[Option<&str>]) -> Option<Locale> {
    vars.iter().flatten().find_map(|raw| normalize_locale_raw(raw))
}

/// Normalize a POSIX-style locale (`it_IT.UTF-8@euro`) into a BCP 47-ish
/// tag (`it-IT`). `C` and `POSIX` map to `en`.
fn normalize_locale_raw(raw: &str) -> Option<Locale> {
    let raw = raw.trim();
    let raw = raw.split('@').next().unwrap_or(raw);
    let raw = raw.split('.').next().unwrap_or(raw);
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if raw.eq_ignore_ascii_case("c") || raw.eq_ignore_ascii_case("posix") {
        return Some("en".to_string());
    }
    Some(raw.replace('_', "-"))
}
