#![forbid(unsafe_code)]

//! Library half of the `parla` binary: argument definitions, settings,
//! and subcommands, kept separate from `main` so they can be tested.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;

use std::io::Write;

pub use cli::{Cli, Command};
pub use config::Settings;
pub use error::CliError;

/// Execute a parsed command line, writing results to `out`.
pub fn run(cli: &Cli, out: &mut impl Write) -> Result<(), CliError> {
    let settings = Settings::resolve(&cli.global)?;
    let table = commands::load_table(&settings)?;
    match &cli.command {
        Command::Locales => commands::run_locales(&table, out),
        Command::Translate(args) => {
            let store = commands::open_store(&settings, table);
            commands::run_translate(&store, args, out)
        }
        Command::Check(args) => commands::run_check(&table, args, out),
    }
}
