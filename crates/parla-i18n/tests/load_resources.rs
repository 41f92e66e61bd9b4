use std::fs;

use parla_i18n::{I18nError, load_dir, load_file};

#[test]
fn load_dir_builds_table_from_mixed_formats() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("en.json"),
        r#"{"greet": "Hi {{name}}", "chat": {"empty": "No chats yet"}}"#,
    )
    .unwrap();
    fs::write(dir.path().join("it.toml"), "greet = \"Ciao {{name}}\"\n").unwrap();
    fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
    fs::create_dir(dir.path().join("nested")).unwrap();

    let table = load_dir(dir.path(), "en").unwrap();
    assert_eq!(table.locales(), vec!["en", "it"]);
    assert_eq!(table.fallback_locale(), "en");
    assert_eq!(table.translate("it", "greet", &[("name", "Ana")]), "Ciao Ana");
    assert_eq!(table.translate("it", "chat.empty", &[]), "No chats yet");
}

#[test]
fn load_dir_requires_fallback_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("it.json"), r#"{"greet": "Ciao"}"#).unwrap();

    let err = load_dir(dir.path(), "en").unwrap_err();
    assert!(matches!(err, I18nError::MissingFallback(code) if code == "en"));
}

#[test]
fn load_dir_rejects_same_locale_twice() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("en.json"), r#"{"a": "A"}"#).unwrap();
    fs::write(dir.path().join("en.toml"), "a = \"A\"\n").unwrap();

    let err = load_dir(dir.path(), "en").unwrap_err();
    assert!(matches!(err, I18nError::DuplicateLocale(code) if code == "en"));
}

#[test]
fn load_dir_reports_bad_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("en.json"), r#"{"steps": ["one"]}"#).unwrap();

    let err = load_dir(dir.path(), "en").unwrap_err();
    assert_eq!(err.to_string(), "unsupported array value at key 'steps'");
}

#[test]
fn load_missing_dir_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");
    let err = load_dir(&missing, "en").unwrap_err();
    assert!(matches!(err, I18nError::Io { path, .. } if path == missing));
}

#[test]
fn load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_file(&dir.path().join("en.json")).unwrap_err();
    assert!(matches!(err, I18nError::Io { .. }));
}
