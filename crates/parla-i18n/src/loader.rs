//! Loading locale resources from JSON and TOML documents.
//!
//! A resource is a table whose leaves are templates. Nested tables flatten
//! into dotted keys, so `{"onboarding": {"title": "Welcome"}}` defines
//! `onboarding.title`. Numbers and booleans are stored in display form;
//! arrays, nulls and datetimes are rejected. A literal dotted key that
//! collides with a nested path (`"a.b"` next to `{"a": {"b": ..}}`) is an
//! error rather than a silent overwrite.
//!
//! [`load_dir`] treats every `<code>.json` / `<code>.toml` file in a
//! directory as the table for locale `<code>`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::{Locale, LocaleStrings, LocaleTable};
use crate::error::I18nError;

/// On-disk encoding of a resource file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceFormat {
    Json,
    Toml,
}

impl ResourceFormat {
    /// Pick the format from a file extension (case-insensitive).
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("json") {
            Some(Self::Json)
        } else if ext.eq_ignore_ascii_case("toml") {
            Some(Self::Toml)
        } else {
            None
        }
    }

    /// Parse `text` in this format.
    ///
    /// # Errors
    ///
    /// See [`parse_json`] and [`parse_toml`].
    pub fn parse(self, text: &str) -> Result<LocaleStrings, I18nError> {
        match self {
            Self::Json => parse_json(text),
            Self::Toml => parse_toml(text),
        }
    }
}

/// Parse a JSON resource into a flat string set.
///
/// # Errors
///
/// Returns [`I18nError::Json`] on malformed input, [`I18nError::NotATable`]
/// when the root is not an object, [`I18nError::UnsupportedValue`] for
/// arrays and nulls, and [`I18nError::DuplicateKey`] when two paths flatten
/// to the same key.
pub fn parse_json(text: &str) -> Result<LocaleStrings, I18nError> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    let serde_json::Value::Object(root) = value else {
        return Err(I18nError::NotATable);
    };
    let mut strings = LocaleStrings::new();
    for (key, value) in &root {
        flatten_json(key, value, &mut strings)?;
    }
    Ok(strings)
}

fn flatten_json(
    key: &str,
    value: &serde_json::Value,
    out: &mut LocaleStrings,
) -> Result<(), I18nError> {
    use serde_json::Value;

    match value {
        Value::String(s) => insert_leaf(out, key, s.as_str())?,
        Value::Number(n) => insert_leaf(out, key, n.to_string())?,
        Value::Bool(b) => insert_leaf(out, key, b.to_string())?,
        Value::Object(map) => {
            for (child, value) in map {
                flatten_json(&join_key(key, child), value, out)?;
            }
        }
        Value::Array(_) => return Err(unsupported(key, "array")),
        Value::Null => return Err(unsupported(key, "null")),
    }
    Ok(())
}

/// Parse a TOML resource into a flat string set.
///
/// # Errors
///
/// Returns [`I18nError::Toml`] on malformed input,
/// [`I18nError::UnsupportedValue`] for arrays and datetimes, and
/// [`I18nError::DuplicateKey`] when two paths flatten to the same key.
pub fn parse_toml(text: &str) -> Result<LocaleStrings, I18nError> {
    let root: toml::Table = toml::from_str(text)?;
    let mut strings = LocaleStrings::new();
    for (key, value) in &root {
        flatten_toml(key, value, &mut strings)?;
    }
    Ok(strings)
}

fn flatten_toml(key: &str, value: &toml::Value, out: &mut LocaleStrings) -> Result<(), I18nError> {
    use toml::Value;

    match value {
        Value::String(s) => insert_leaf(out, key, s.as_str())?,
        Value::Integer(i) => insert_leaf(out, key, i.to_string())?,
        Value::Float(f) => insert_leaf(out, key, f.to_string())?,
        Value::Boolean(b) => insert_leaf(out, key, b.to_string())?,
        Value::Table(table) => {
            for (child, value) in table {
                flatten_toml(&join_key(key, child), value, out)?;
            }
        }
        Value::Array(_) => return Err(unsupported(key, "array")),
        Value::Datetime(_) => return Err(unsupported(key, "datetime")),
    }
    Ok(())
}

fn insert_leaf(
    out: &mut LocaleStrings,
    key: &str,
    template: impl Into<String>,
) -> Result<(), I18nError> {
    if out.contains_key(key) {
        return Err(I18nError::DuplicateKey(key.to_string()));
    }
    out.insert(key, template);
    Ok(())
}

fn join_key(prefix: &str, child: &str) -> String {
    format!("{prefix}.{child}")
}

fn unsupported(key: &str, kind: &'static str) -> I18nError {
    I18nError::UnsupportedValue {
        key: key.to_string(),
        kind,
    }
}

/// Load one resource file, choosing the format from its extension.
///
/// # Errors
///
/// Fails when the extension is unknown, the file cannot be read, or the
/// contents do not parse.
pub fn load_file(path: &Path) -> Result<LocaleStrings, I18nError> {
    let format = ResourceFormat::from_path(path)
        .ok_or_else(|| I18nError::UnsupportedFormat(path.to_path_buf()))?;
    let text = fs::read_to_string(path).map_err(|source| I18nError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    format.parse(&text)
}

/// Load every resource file in `dir` into a table with the given fallback.
///
/// Files with other extensions are skipped. The locale code is the file
/// stem, so `it.json` defines locale `it`.
///
/// # Errors
///
/// Fails when the directory cannot be listed, a resource fails to load,
/// two files share a stem, or the fallback locale has no file.
pub fn load_dir(dir: &Path, fallback: impl Into<Locale>) -> Result<LocaleTable, I18nError> {
    let io_err = |source| I18nError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_file() && ResourceFormat::from_path(&path).is_some() {
            paths.push(path);
        } else {
            tracing::debug!(path = %path.display(), "skipping non-resource entry");
        }
    }
    paths.sort();

    let mut builder = LocaleTable::builder().fallback(fallback);
    for path in &paths {
        let Some(code) = path.file_stem().and_then(|s| s.to_str()) else {
            return Err(I18nError::InvalidLocale(path.display().to_string()));
        };
        let strings = load_file(path)?;
        tracing::debug!(locale = code, keys = strings.len(), path = %path.display(), "loaded locale resource");
        builder = builder.locale(code, strings);
    }
    builder.build()
}
