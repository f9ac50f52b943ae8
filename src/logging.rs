//! Diagnostic logging setup.

use tracing_subscriber::EnvFilter;

/// Verbosity level for diagnostic output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
}

impl Verbosity {
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        match (quiet, verbose) {
            (_, true) => Verbosity::Verbose,
            (true, false) => Verbosity::Quiet,
            (false, false) => Verbosity::Normal,
        }
    }

    /// Default filter directive when `RUST_LOG` is unset.
    #[must_use]
    pub fn filter(self) -> &'static str {
        match self {
            Verbosity::Quiet => "git_genius=error",
            Verbosity::Normal => "git_genius=warn",
            Verbosity::Verbose => "git_genius=debug",
        }
    }
}

/// Installs a stderr subscriber. `RUST_LOG` takes precedence over `verbosity`.
pub fn init(verbosity: Verbosity) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity.filter()));

    // Ignore a second init (e.g. from tests).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
