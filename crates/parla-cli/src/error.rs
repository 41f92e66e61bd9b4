use std::path::PathBuf;

use parla_i18n::I18nError;

/// Exit status for configuration and load failures.
pub const EXIT_FAILURE: u8 = 1;
/// Exit status when `check` finds a locale below the coverage threshold.
pub const EXIT_COVERAGE: u8 = 2;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("failed to read config file {}", path.display())]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {}", path.display())]
    ParseConfig {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to load locale resources")]
    Load(#[from] I18nError),
    #[error("failed to write output")]
    Output(#[from] std::io::Error),
    #[error("{count} locale(s) below {threshold}% coverage")]
    CoverageBelow { count: usize, threshold: f32 },
}

impl CliError {
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::CoverageBelow { .. } => EXIT_COVERAGE,
            _ => EXIT_FAILURE,
        }
    }
}
