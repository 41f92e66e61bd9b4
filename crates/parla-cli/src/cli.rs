//! Command-line surface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "parla")]
#[command(about = "Inspect and exercise parla locale resources")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Directory of `<locale>.json` / `<locale>.toml` resources
    /// (defaults to the bundled tables).
    #[arg(long, global = true, env = "PARLA_DIR")]
    pub dir: Option<PathBuf>,

    /// TOML config file providing `dir`, `fallback`, and `locale`.
    #[arg(long, global = true, env = "PARLA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Fallback locale code.
    #[arg(long, global = true)]
    pub fallback: Option<String>,

    /// Log at debug level (overridden by `RUST_LOG`).
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List loaded locales.
    Locales,

    /// Resolve one translation key.
    Translate(TranslateArgs),

    /// Report per-locale key coverage.
    Check(CheckArgs),
}

#[derive(Debug, Args)]
pub struct TranslateArgs {
    /// Translation key, e.g. `chat.list.title`.
    pub key: String,

    /// Locale to switch to before translating. Unknown codes are ignored.
    #[arg(long, short)]
    pub locale: Option<String>,

    /// Placeholder value as `name=value`; repeatable.
    #[arg(long = "param", short, value_parser = parse_param)]
    pub params: Vec<(String, String)>,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Fail when any locale's coverage is below this percentage.
    #[arg(long, default_value_t = 0.0)]
    pub min_coverage: f32,
}

/// Parse `name=value`. The value may itself contain `=`.
pub fn parse_param(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected name=value, got {raw:?}")),
    }
}
