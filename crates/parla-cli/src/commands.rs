//! Subcommand implementations. Each writes its report to `out`.

use std::io::Write;

use parla_i18n::{LocaleTable, load_dir};
use parla_runtime::{FixedLocale, LocaleSource, LocaleStore, SystemLocale};

use crate::cli::{CheckArgs, TranslateArgs};
use crate::config::Settings;
use crate::error::CliError;

/// Load the table named by `settings`: a resource directory, or the
/// bundled tables with the configured fallback.
pub fn load_table(settings: &Settings) -> Result<LocaleTable, CliError> {
    let table = match &settings.dir {
        Some(dir) => load_dir(dir, settings.fallback.as_str())?,
        None => parla::bundled::table_with_fallback(&settings.fallback)?,
    };
    tracing::debug!(locales = ?table.locales(), fallback = table.fallback_locale(), "loaded table");
    Ok(table)
}

/// Build the store, taking the initial locale from settings or the
/// environment.
pub fn open_store(settings: &Settings, table: LocaleTable) -> LocaleStore {
    let source: Box<dyn LocaleSource> = match &settings.locale {
        Some(code) => Box::new(FixedLocale::new(code.as_str())),
        None => Box::new(SystemLocale),
    };
    LocaleStore::new(table, source.as_ref())
}

pub fn run_locales(table: &LocaleTable, out: &mut impl Write) -> Result<(), CliError> {
    for code in table.locales() {
        let keys = table.strings(code).map_or(0, |s| s.len());
        let marker = if code == table.fallback_locale() {
            " (fallback)"
        } else {
            ""
        };
        writeln!(out, "{code}\t{keys} keys{marker}")?;
    }
    Ok(())
}

pub fn run_translate(
    store: &LocaleStore,
    args: &TranslateArgs,
    out: &mut impl Write,
) -> Result<(), CliError> {
    if let Some(code) = &args.locale {
        if !store.set_active_locale(code) && store.active_locale() != *code {
            tracing::warn!(
                requested = %code,
                active = %store.active_locale(),
                "unknown locale, keeping active locale"
            );
        }
    }
    let params: Vec<(&str, &str)> = args
        .params
        .iter()
        .map(|(name, value)| (name.as_str(), value.as_str()))
        .collect();
    writeln!(out, "{}", store.translate(&args.key, &params))?;
    Ok(())
}

pub fn run_check(
    table: &LocaleTable,
    args: &CheckArgs,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let report = table.coverage_report();
    writeln!(out, "{} keys", report.total_keys)?;
    for lc in &report.locales {
        writeln!(
            out,
            "{}\t{}/{}\t{:.1}%",
            lc.locale, lc.present, report.total_keys, lc.coverage_percent
        )?;
        for key in &lc.missing {
            writeln!(out, "  missing: {key}")?;
        }
    }

    let below = report.below(args.min_coverage);
    if below.is_empty() {
        return Ok(());
    }
    for lc in &below {
        tracing::warn!(locale = %lc.locale, coverage = lc.coverage_percent, "below threshold");
    }
    Err(CliError::CoverageBelow {
        count: below.len(),
        threshold: args.min_coverage,
    })
}
