//! Locale table with fallback lookup and placeholder interpolation.
//!
//! # Invariants
//!
//! 1. **Lookup terminates in two steps**: the requested locale is tried,
//!    then the fallback locale. No other chain is walked.
//!
//! 2. **Translation never fails**: [`LocaleTable::translate`] returns the
//!    raw key when neither locale provides it.
//!
//! 3. **Interpolation is single-pass**: `{{name}}` tokens are replaced once;
//!    substituted values are never re-scanned.
//!
//! 4. **Immutable after load**: a table is built once and then only read.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Missing key | Key not in requested locale | Fallback locale consulted |
//! | Missing everywhere | Key in neither table | Raw key returned |
//! | Unknown locale | Locale not loaded | Fallback locale consulted |
//! | Bad interpolation arg | `{{name}}` but no `name` param | Token left as-is |

use std::collections::HashMap;

use crate::error::I18nError;

/// Locale identifier (e.g., `"en"`, `"it"`, `"pt-BR"`).
pub type Locale = String;

/// Locale used when no other fallback is configured.
pub const DEFAULT_FALLBACK_LOCALE: &str = "en";

/// Templates for a single locale, keyed by dotted translation key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleStrings {
    strings: HashMap<String, String>,
}

impl LocaleStrings {
    /// Create an empty string set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a template, replacing any previous value for `key`.
    pub fn insert(&mut self, key: impl Into<String>, template: impl Into<String>) {
        self.strings.insert(key.into(), template.into());
    }

    /// Look up a template by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.strings.get(key).map(String::as_str)
    }

    /// Whether `key` has a template.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.strings.contains_key(key)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Whether the set has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Iterate over all keys (unordered).
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.strings.keys().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LocaleStrings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut strings = Self::new();
        for (key, template) in iter {
            strings.insert(key, template);
        }
        strings
    }
}

/// Translation tables for every supported locale plus the fallback code.
///
/// # Example
///
/// ```
/// use parla_i18n::{LocaleStrings, LocaleTable};
///
/// let table = LocaleTable::builder()
///     .locale("en", LocaleStrings::from_iter([("greet", "Hi {{name}}"), ("bye", "Bye")]))
///     .locale("it", LocaleStrings::from_iter([("greet", "Ciao {{name}}")]))
///     .build()
///     .unwrap();
///
/// assert_eq!(table.translate("it", "greet", &[("name", "Ana")]), "Ciao Ana");
/// assert_eq!(table.translate("it", "bye", &[]), "Bye");
/// assert_eq!(table.translate("it", "nope", &[]), "nope");
/// ```
#[derive(Debug, Clone)]
pub struct LocaleTable {
    locales: HashMap<Locale, LocaleStrings>,
    fallback: Locale,
}

impl Default for LocaleTable {
    fn default() -> Self {
        Self::new(DEFAULT_FALLBACK_LOCALE)
    }
}

impl LocaleTable {
    /// Create an empty table with the given fallback locale.
    #[must_use]
    pub fn new(fallback: impl Into<Locale>) -> Self {
        Self {
            locales: HashMap::new(),
            fallback: fallback.into(),
        }
    }

    /// Start a validating builder. The fallback defaults to `"en"`.
    #[must_use]
    pub fn builder() -> LocaleTableBuilder {
        LocaleTableBuilder::default()
    }

    /// Add (or replace) the strings for a locale.
    pub fn add_locale(&mut self, locale: impl Into<Locale>, strings: LocaleStrings) {
        self.locales.insert(locale.into(), strings);
    }

    /// The locale consulted when a key is missing.
    #[must_use]
    pub fn fallback_locale(&self) -> &str {
        &self.fallback
    }

    /// Whether `locale` has a table.
    #[must_use]
    pub fn contains_locale(&self, locale: &str) -> bool {
        self.locales.contains_key(locale)
    }

    /// Strings for one locale, without fallback.
    #[must_use]
    pub fn strings(&self, locale: &str) -> Option<&LocaleStrings> {
        self.locales.get(locale)
    }

    /// All registered locale codes, sorted.
    #[must_use]
    pub fn locales(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.locales.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    /// Look up a template in `locale`, then in the fallback locale.
    #[must_use]
    pub fn lookup(&self, locale: &str, key: &str) -> Option<&str> {
        if let Some(template) = self.locales.get(locale).and_then(|ls| ls.get(key)) {
            return Some(template);
        }
        if locale == self.fallback {
            return None;
        }
        let template = self
            .locales
            .get(self.fallback.as_str())
            .and_then(|ls| ls.get(key));
        if template.is_some() {
            tracing::trace!(locale, key, fallback = %self.fallback, "resolved via fallback locale");
        }
        template
    }

    /// Resolve `key` for `locale` and substitute `params`.
    ///
    /// Returns the raw key if no table provides it.
    #[must_use]
    pub fn translate(&self, locale: &str, key: &str, params: &[(&str, &str)]) -> String {
        match self.lookup(locale, key) {
            Some(template) => interpolate(template, params),
            None => {
                tracing::trace!(locale, key, "translation missing, returning key");
                key.to_string()
            }
        }
    }

    // -----------------------------------------------------------------
    // Coverage
    // -----------------------------------------------------------------

    /// All unique keys across every locale, sorted.
    #[must_use]
    pub fn all_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .locales
            .values()
            .flat_map(|ls| ls.keys().map(String::from))
            .collect();
        keys.sort_unstable();
        keys.dedup();
        keys
    }

    /// Keys known to some locale but absent from `locale`'s own table.
    ///
    /// The fallback locale is not consulted: a key served only through
    /// fallback counts as missing. An unknown locale misses every key.
    #[must_use]
    pub fn missing_keys(&self, locale: &str) -> Vec<String> {
        let own = self.locales.get(locale);
        self.all_keys()
            .into_iter()
            .filter(|key| !own.is_some_and(|ls| ls.contains_key(key)))
            .collect()
    }

    /// Per-locale coverage against the union of all keys.
    #[must_use]
    pub fn coverage_report(&self) -> CoverageReport {
        let total_keys = self.all_keys().len();
        let locales = self
            .locales()
            .into_iter()
            .map(|code| {
                let missing = self.missing_keys(code);
                let present = total_keys.saturating_sub(missing.len());
                let coverage_percent = if total_keys == 0 {
                    100.0
                } else {
                    (present as f32 / total_keys as f32) * 100.0
                };
                LocaleCoverage {
                    locale: code.to_string(),
                    present,
                    missing,
                    coverage_percent,
                }
            })
            .collect();

        CoverageReport {
            total_keys,
            locales,
        }
    }
}

/// Validating constructor for [`LocaleTable`].
#[derive(Debug)]
pub struct LocaleTableBuilder {
    fallback: Locale,
    locales: Vec<(Locale, LocaleStrings)>,
}

impl Default for LocaleTableBuilder {
    fn default() -> Self {
        Self {
            fallback: DEFAULT_FALLBACK_LOCALE.to_string(),
            locales: Vec::new(),
        }
    }
}

impl LocaleTableBuilder {
    /// Override the fallback locale.
    #[must_use]
    pub fn fallback(mut self, locale: impl Into<Locale>) -> Self {
        self.fallback = locale.into();
        self
    }

    /// Register strings for a locale.
    #[must_use]
    pub fn locale(mut self, locale: impl Into<Locale>, strings: LocaleStrings) -> Self {
        self.locales.push((locale.into(), strings));
        self
    }

    /// Build the table.
    ///
    /// # Errors
    ///
    /// Fails on an empty or whitespace locale code, on a locale registered
    /// twice, or when the fallback locale has no strings registered.
    pub fn build(self) -> Result<LocaleTable, I18nError> {
        let mut table = LocaleTable::new(self.fallback);
        for (code, strings) in self.locales {
            if code.trim().is_empty() || code.chars().any(char::is_whitespace) {
                return Err(I18nError::InvalidLocale(code));
            }
            if table.contains_locale(&code) {
                return Err(I18nError::DuplicateLocale(code));
            }
            table.add_locale(code, strings);
        }
        if !table.contains_locale(&table.fallback) {
            return Err(I18nError::MissingFallback(table.fallback));
        }
        Ok(table)
    }
}

/// Coverage of each locale relative to the union of all keys.
#[derive(Debug, Clone)]
pub struct CoverageReport {
    /// Number of unique keys across all locales.
    pub total_keys: usize,
    /// Per-locale statistics, sorted by locale code.
    pub locales: Vec<LocaleCoverage>,
}

impl CoverageReport {
    /// Locales whose coverage is strictly below `min_percent`.
    #[must_use]
    pub fn below(&self, min_percent: f32) -> Vec<&LocaleCoverage> {
        self.locales
            .iter()
            .filter(|lc| lc.coverage_percent < min_percent)
            .collect()
    }
}

/// Per-locale coverage statistics.
#[derive(Debug, Clone)]
pub struct LocaleCoverage {
    /// Locale code.
    pub locale: String,
    /// Keys present in the locale's own table.
    pub present: usize,
    /// Keys missing from the locale's own table, sorted.
    pub missing: Vec<String>,
    /// Coverage as a percentage (0.0–100.0).
    pub coverage_percent: f32,
}

/// Single-pass `{{name}}` interpolation.
///
/// Whitespace inside the braces is ignored. Tokens without a matching
/// parameter and unclosed `{{` are emitted unchanged.
#[must_use]
pub fn interpolate(template: &str, params: &[(&str, &str)]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        result.push_str(&rest[..open]);
        let after_open = &rest[open + 2..];
        let Some(close) = after_open.find("}}") else {
            // Unclosed: emit the remainder verbatim.
            result.push_str(&rest[open..]);
            return result;
        };

        let name = after_open[..close].trim();
        match params.iter().find(|&&(param, _)| param == name) {
            Some(&(_, value)) => result.push_str(value),
            None => result.push_str(&rest[open..open + 2 + close + 2]),
        }
        rest = &after_open[close + 2..];
    }

    result.push_str(rest);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn greeting_table() -> LocaleTable {
        let mut en = LocaleStrings::new();
        en.insert("greet", "Hi {{name}}");
        en.insert("onboarding.title", "Welcome");
        en.insert("onboarding.skip", "Skip");
        en.insert("farewell", "Goodbye, {{name}}. See you {{when}}.");

        let mut it = LocaleStrings::new();
        it.insert("greet", "Ciao {{name}}");
        it.insert("onboarding.title", "Benvenuto");

        LocaleTable::builder()
            .locale("en", en)
            .locale("it", it)
            .build()
            .unwrap()
    }

    #[test]
    fn lookup_hits_requested_locale() {
        let table = greeting_table();
        assert_eq!(table.lookup("it", "onboarding.title"), Some("Benvenuto"));
        assert_eq!(table.lookup("en", "onboarding.title"), Some("Welcome"));
    }

    #[test]
    fn lookup_falls_back_to_fallback_locale() {
        let table = greeting_table();
        assert_eq!(table.lookup("it", "onboarding.skip"), Some("Skip"));
    }

    #[test]
    fn unknown_locale_uses_fallback() {
        let table = greeting_table();
        assert_eq!(table.lookup("fr", "onboarding.title"), Some("Welcome"));
    }

    #[test]
    fn missing_everywhere_is_none() {
        let table = greeting_table();
        assert_eq!(table.lookup("it", "nope"), None);
        assert_eq!(table.lookup("en", "nope"), None);
    }

    #[test]
    fn translate_returns_raw_key_when_missing() {
        let table = greeting_table();
        assert_eq!(table.translate("it", "settings.title", &[]), "settings.title");
        assert_eq!(table.translate("en", "", &[]), "");
    }

    #[test]
    fn translate_substitutes_params() {
        let table = greeting_table();
        assert_eq!(table.translate("en", "greet", &[("name", "Ana")]), "Hi Ana");
        assert_eq!(table.translate("it", "greet", &[("name", "Ana")]), "Ciao Ana");
    }

    #[test]
    fn translate_multiple_params_via_fallback() {
        let table = greeting_table();
        assert_eq!(
            table.translate("it", "farewell", &[("name", "Bob"), ("when", "tomorrow")]),
            "Goodbye, Bob. See you tomorrow."
        );
    }

    #[test]
    fn custom_fallback_locale() {
        let table = LocaleTable::builder()
            .fallback("it")
            .locale("it", LocaleStrings::from_iter([("only.it", "Solo")]))
            .locale("en", LocaleStrings::new())
            .build()
            .unwrap();
        assert_eq!(table.fallback_locale(), "it");
        assert_eq!(table.lookup("en", "only.it"), Some("Solo"));
    }

    #[test]
    fn builder_rejects_missing_fallback() {
        let err = LocaleTable::builder()
            .locale("it", LocaleStrings::new())
            .build()
            .unwrap_err();
        assert!(matches!(err, I18nError::MissingFallback(code) if code == "en"));
    }

    #[test]
    fn builder_rejects_duplicate_locale() {
        let err = LocaleTable::builder()
            .locale("en", LocaleStrings::new())
            .locale("en", LocaleStrings::new())
            .build()
            .unwrap_err();
        assert!(matches!(err, I18nError::DuplicateLocale(code) if code == "en"));
    }

    #[test]
    fn builder_rejects_blank_locale() {
        let err = LocaleTable::builder()
            .locale("en", LocaleStrings::new())
            .locale("  ", LocaleStrings::new())
            .build()
            .unwrap_err();
        assert!(matches!(err, I18nError::InvalidLocale(_)));
    }

    #[test]
    fn locales_are_sorted() {
        let table = greeting_table();
        assert_eq!(table.locales(), vec!["en", "it"]);
        assert!(table.contains_locale("it"));
        assert!(!table.contains_locale("fr"));
    }

    #[test]
    fn interpolation_edge_cases() {
        // Unclosed
        assert_eq!(interpolate("Hello {{world", &[]), "Hello {{world");
        // Single braces are literal
        assert_eq!(interpolate("Hello {name}", &[("name", "x")]), "Hello {name}");
        // Unknown token kept
        assert_eq!(interpolate("Hi {{who}}!", &[("name", "x")]), "Hi {{who}}!");
        // Whitespace inside braces
        assert_eq!(interpolate("Hi {{ name }}", &[("name", "Ana")]), "Hi Ana");
        // Repeated token
        assert_eq!(interpolate("{{x}} and {{x}}", &[("x", "A")]), "A and A");
        // Adjacent tokens
        assert_eq!(interpolate("{{a}}{{b}}", &[("a", "1"), ("b", "2")]), "12");
        // No braces
        assert_eq!(interpolate("plain", &[]), "plain");
    }

    #[test]
    fn interpolation_does_not_rescan_values() {
        assert_eq!(
            interpolate("{{a}}", &[("a", "{{b}}"), ("b", "nope")]),
            "{{b}}"
        );
    }

    #[test]
    fn coverage_counts_only_own_keys() {
        let table = greeting_table();
        let report = table.coverage_report();
        assert_eq!(report.total_keys, 4);

        let en = &report.locales[0];
        assert_eq!(en.locale, "en");
        assert_eq!(en.present, 4);
        assert!(en.missing.is_empty());

        let it = &report.locales[1];
        assert_eq!(it.locale, "it");
        assert_eq!(it.present, 2);
        assert_eq!(it.missing, vec!["farewell", "onboarding.skip"]);
        assert!((it.coverage_percent - 50.0).abs() < f32::EPSILON);

        let below = report.below(75.0);
        assert_eq!(below.len(), 1);
        assert_eq!(below[0].locale, "it");
    }

    #[test]
    fn coverage_of_empty_table() {
        let table = LocaleTable::builder()
            .locale("en", LocaleStrings::new())
            .build()
            .unwrap();
        let report = table.coverage_report();
        assert_eq!(report.total_keys, 0);
        assert!((report.locales[0].coverage_percent - 100.0).abs() < f32::EPSILON);
        assert!(table.missing_keys("fr").is_empty());
    }

    proptest! {
        #[test]
        fn templates_without_braces_are_unchanged(template in "[^{}]{0,64}") {
            prop_assert_eq!(interpolate(&template, &[("name", "x")]), template);
        }

        #[test]
        fn known_token_is_replaced(
            prefix in "[a-z ]{0,16}",
            name in "[a-z]{1,8}",
            value in "[A-Za-z ]{0,16}",
            suffix in "[a-z ]{0,16}",
        ) {
            let template = format!("{prefix}{{{{{name}}}}}{suffix}");
            let rendered = interpolate(&template, &[(name.as_str(), value.as_str())]);
            prop_assert_eq!(rendered, format!("{prefix}{value}{suffix}"));
        }

        #[test]
        fn translate_never_loses_a_missing_key(key in "[a-z.]{1,24}") {
            let table = greeting_table();
            let rendered = table.translate("it", &key, &[]);
            match table.lookup("it", &key) {
                Some(template) => prop_assert_eq!(rendered, template),
                None => prop_assert_eq!(rendered, key),
            }
        }
    }
}
