//! Git command gateway.
//!
//! Every git invocation goes through [`Git`], which resolves the working
//! directory from the stored configuration on each call (falling back to the
//! directory the process started in) and records failed commands in the
//! error log.

use crate::config::ConfigStore;
use crate::error_log::ErrorLog;
use crate::output;
use crate::prompt::Prompt;
use std::io;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum GitError {
    #[error("git {command} failed")]
    CommandFailed { command: String },
}

#[derive(Debug, Clone)]
pub struct Git {
    store: ConfigStore,
    log: ErrorLog,
    cwd: PathBuf,
}

impl Git {
    pub fn new(store: ConfigStore, log: ErrorLog, cwd: PathBuf) -> Self {
        Self { store, log, cwd }
    }

    /// The configured working directory, or the launch directory.
    #[must_use]
    pub fn workdir(&self) -> PathBuf {
        self.store.load().resolve_workdir(&self.cwd)
    }

    fn command(&self, args: &[&str]) -> Command {
        let dir = self.workdir();
        debug!(command = %display_args(args), dir = %dir.display(), "running git");
        let mut cmd = Command::new("git");
        cmd.args(args).current_dir(dir);
        cmd
    }

    /// Runs git with output streamed to the terminal.
    pub fn run(&self, args: &[&str]) -> Result<(), GitError> {
        let status = self
            .command(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status();

        let failure = match status {
            Ok(status) if status.success() => return Ok(()),
            Ok(status) => status.to_string(),
            Err(e) => e.to_string(),
        };

        let command = display_args(args);
        self.log.record(&format!("git {command}"), &failure);
        Err(GitError::CommandFailed { command })
    }

    /// Runs git and returns its trimmed stdout.
    ///
    /// A failed or empty result means "not set"; nothing is logged.
    pub fn run_capture(&self, args: &[&str]) -> Option<String> {
        let output = self
            .command(args)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .ok()?;

        if !output.status.success() {
            return None;
        }
        let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if text.is_empty() { None } else { Some(text) }
    }

    /// True when the working directory is inside a git working tree.
    #[must_use]
    pub fn is_repo(&self) -> bool {
        self.command(&["rev-parse", "--is-inside-work-tree"])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }

    /// Makes sure the working directory is a repository, offering `git init`.
    ///
    /// Returns false when the user declines or initialization fails.
    pub fn ensure_repo(&self, prompt: &dyn Prompt) -> io::Result<bool> {
        if self.is_repo() {
            return Ok(true);
        }

        output::warn("Selected directory is not a git repository");
        if !prompt.confirm("Do you want to initialize a git repository here?")? {
            output::error("Git repository required to continue");
            return Ok(false);
        }

        match self.run(&["init"]) {
            Ok(()) => {
                output::success("Git repository initialized");
                Ok(true)
            }
            Err(_) => {
                output::error("Failed to initialize git repository");
                Ok(false)
            }
        }
    }

    #[must_use]
    pub fn config_value(&self, key: &str) -> Option<String> {
        self.run_capture(&["config", "--get", key])
    }

    #[must_use]
    pub fn remote_exists(&self, name: &str) -> bool {
        self.run_capture(&["remote", "get-url", name]).is_some()
    }

    #[must_use]
    pub fn has_uncommitted_changes(&self) -> bool {
        self.run_capture(&["status", "--porcelain"]).is_some()
    }
}

/// Joins arguments for logging, hiding credentials embedded in URLs.
fn display_args(args: &[&str]) -> String {
    args.iter()
        .map(|arg| redact_url(arg))
        .collect::<Vec<_>>()
        .join(" ")
}

fn redact_url(arg: &str) -> String {
    let Some((scheme, rest)) = arg.split_once("://") else {
        return arg.to_string();
    };
    let authority_end = rest.find('/').unwrap_or(rest.len());
    match rest[..authority_end].rfind('@') {
        Some(at) => format!("{scheme}://***{}", &rest[at..]),
        None => arg.to_string(),
    }
}

/// True when a `git` executable can be found on the search path.
#[must_use]
pub fn is_installed() -> bool {
    which::which("git").is_ok()
}
