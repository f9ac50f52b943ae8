//! Read-only health check.
//!
//! Every check runs regardless of the others, and none of them changes
//! configuration, credentials or repository state.

use crate::config::ConfigStore;
use crate::credentials::CredentialStore;
use crate::error_log::ErrorLog;
use crate::git::{self, Git};
use crate::github::{TokenValidator, Validation, ValidationError};
use crate::network::NetworkStatus;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Check {
    pub name: &'static str,
    pub status: CheckStatus,
    pub message: String,
    /// Follow-up lines such as a remediation command.
    pub hints: Vec<String>,
}

impl Check {
    fn new(name: &'static str, status: CheckStatus, message: impl Into<String>) -> Self {
        Self {
            name,
            status,
            message: message.into(),
            hints: Vec::new(),
        }
    }

    pub fn success(name: &'static str, message: impl Into<String>) -> Self {
        Self::new(name, CheckStatus::Success, message)
    }

    pub fn warning(name: &'static str, message: impl Into<String>) -> Self {
        Self::new(name, CheckStatus::Warning, message)
    }

    pub fn error(name: &'static str, message: impl Into<String>) -> Self {
        Self::new(name, CheckStatus::Error, message)
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(hint.into());
        self
    }
}

pub struct Doctor<'a> {
    store: &'a ConfigStore,
    credentials: &'a CredentialStore,
    validator: &'a TokenValidator,
    git: &'a Git,
    error_log: &'a ErrorLog,
    network: NetworkStatus,
    cwd: PathBuf,
}

impl<'a> Doctor<'a> {
    pub fn new(
        store: &'a ConfigStore,
        credentials: &'a CredentialStore,
        validator: &'a TokenValidator,
        git: &'a Git,
        error_log: &'a ErrorLog,
        network: NetworkStatus,
        cwd: PathBuf,
    ) -> Self {
        Self {
            store,
            credentials,
            validator,
            git,
            error_log,
            network,
            cwd,
        }
    }

    /// Runs every check in order.
    pub fn run(&self) -> Vec<Check> {
        let mut checks = vec![
            self.check_git_installed(),
            self.check_workdir(),
            self.check_repository(),
        ];
        checks.extend(self.check_identity());
        checks.push(self.check_defaults());
        checks.push(self.check_network());
        checks.push(self.check_token());
        checks.push(self.check_error_log());
        checks
    }

    fn check_git_installed(&self) -> Check {
        if git::is_installed() {
            Check::success("Git", "installed")
        } else {
            Check::error("Git", "not installed")
        }
    }

    fn check_workdir(&self) -> Check {
        let config = self.store.load();
        match config.workdir() {
            None => Check::success(
                "Project directory",
                format!("{} (current)", self.cwd.display()),
            ),
            Some(dir) if dir.is_dir() => Check::success("Project directory", dir.display().to_string()),
            Some(dir) => Check::error(
                "Project directory",
                format!("configured directory not found: {}", dir.display()),
            )
            .with_hint("Run Setup to choose a project directory"),
        }
    }

    fn check_repository(&self) -> Check {
        if self.git.is_repo() {
            Check::success("Repository", "git repository detected")
        } else {
            Check::warning("Repository", "no git repository found in project directory")
                .with_hint("Run Setup to initialize a git repository")
        }
    }

    fn check_identity(&self) -> [Check; 2] {
        let name = match self.git.config_value("user.name") {
            Some(name) => Check::success("git user.name", name),
            None => Check::warning("git user.name", "not set")
                .with_hint("Run: git config --global user.name \"Your Name\""),
        };
        let email = match self.git.config_value("user.email") {
            Some(email) => Check::success("git user.email", email),
            None => Check::warning("git user.email", "not set")
                .with_hint("Run: git config --global user.email \"you@example.com\""),
        };
        [name, email]
    }

    fn check_defaults(&self) -> Check {
        let config = self.store.load();
        let check = Check::success(
            "Defaults",
            format!("branch {}, remote {}", config.branch, config.remote),
        );
        match config.repo_url() {
            Some(url) => check.with_hint(format!("GitHub repo: {url}")),
            None => check,
        }
    }

    fn check_network(&self) -> Check {
        match self.network {
            NetworkStatus::Online => Check::success("Network", "internet connection available"),
            NetworkStatus::Offline => Check::warning("Network", "offline")
                .with_hint("GitHub validation & push may fail"),
        }
    }

    fn check_token(&self) -> Check {
        if !self.credentials.has_token() {
            return Check::warning("GitHub token", "not configured")
                .with_hint("Run Setup to configure GitHub authentication");
        }

        match self.validator.validate() {
            Ok(Validation::Offline) => {
                Check::warning("GitHub token", "validation skipped (offline)")
            }
            Ok(Validation::User(login)) => {
                Check::success("GitHub token", format!("valid as {login}"))
            }
            Err(ValidationError::Network(e)) => {
                Check::warning(
                    "GitHub token",
                    format!("could not reach GitHub, token not checked: {e}"),
                )
                .with_hint("Check your internet connection and run Doctor again")
            }
            Err(e) => Check::error("GitHub token", format!("invalid or expired: {e}"))
                .with_hint("Run Setup to reconfigure the token"),
        }
    }

    fn check_error_log(&self) -> Check {
        if self.error_log.exists() {
            Check::warning("Error log", "error log exists")
                .with_hint(format!("Check: {}", self.error_log.path().display()))
        } else {
            Check::success("Error log", "no log found")
        }
    }
}
