#![forbid(unsafe_code)]

//! Locale tables for parla.
//!
//! Provides per-locale string sets keyed by dotted translation keys,
//! lookup with a fallback locale, `{{name}}` placeholder interpolation,
//! and loading of JSON/TOML resource files.

pub mod catalog;
pub mod error;
pub mod loader;

pub use catalog::{
    CoverageReport, DEFAULT_FALLBACK_LOCALE, Locale, LocaleCoverage, LocaleStrings, LocaleTable,
    LocaleTableBuilder, interpolate,
};
pub use error::I18nError;
pub use loader::{ResourceFormat, load_dir, load_file, parse_json, parse_toml};
