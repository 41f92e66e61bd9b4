//! Errors raised while building a [`LocaleTable`](crate::LocaleTable).
//!
//! Lookups never fail; only loading and table construction do.

use std::path::PathBuf;

/// Errors from loading or assembling locale tables.
#[derive(Debug, thiserror::Error)]
pub enum I18nError {
    /// A resource file could not be read.
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A JSON resource could not be parsed.
    #[error("invalid JSON resource")]
    Json(#[from] serde_json::Error),
    /// A TOML resource could not be parsed.
    #[error("invalid TOML resource")]
    Toml(#[from] toml::de::Error),
    /// The resource root was not a table.
    #[error("resource root must be a table of keys")]
    NotATable,
    /// A value that cannot be rendered as a template (array, null, datetime).
    #[error("unsupported {kind} value at key '{key}'")]
    UnsupportedValue { key: String, kind: &'static str },
    /// Two paths in one resource flatten to the same dotted key.
    #[error("key '{0}' is defined more than once")]
    DuplicateKey(String),
    /// The file extension does not name a known resource format.
    #[error("unsupported resource format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
    /// The same locale code was registered twice.
    #[error("locale '{0}' is defined more than once")]
    DuplicateLocale(String),
    /// The fallback locale has no table.
    #[error("fallback locale '{0}' has no resource table")]
    MissingFallback(String),
    /// A locale code was empty or otherwise unusable.
    #[error("invalid locale code: {0:?}")]
    InvalidLocale(String),
}
