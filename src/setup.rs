//! Guided setup.
//!
//! Steps run in a fixed order and the first failure aborts the rest. The
//! working directory is saved as soon as it is chosen; everything else is
//! saved in [`SetupStep::Finalize`]. The only rollback is deleting a token
//! that failed validation.

use crate::config::{Config, ConfigStore};
use crate::constants::TOKEN_SETTINGS_URL;
use crate::credentials::{CredentialError, CredentialStore};
use crate::git::Git;
use crate::github::{TokenValidator, Validation, ValidationError, authenticated_remote_url};
use crate::output;
use crate::prompt::{Prompt, keep_if_empty};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupStep {
    SelectWorkDir,
    EnsureRepo,
    CaptureGitBasics,
    SelectRepoIdentity,
    ConfigureToken,
    Finalize,
}

impl fmt::Display for SetupStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SetupStep::SelectWorkDir => "select project directory",
            SetupStep::EnsureRepo => "ensure git repository",
            SetupStep::CaptureGitBasics => "git basics",
            SetupStep::SelectRepoIdentity => "GitHub repository",
            SetupStep::ConfigureToken => "GitHub authentication",
            SetupStep::Finalize => "finalize",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("directory path cannot be empty")]
    EmptyDirectory,

    #[error("invalid directory path: {}", .0.display())]
    InvalidDirectory(PathBuf),

    #[error("git repository required to continue")]
    RepositoryRequired,

    #[error("owner and repository name are required")]
    MissingIdentity,

    #[error("failed to save token: {0}")]
    Credential(#[from] CredentialError),

    #[error("invalid GitHub token: {0}")]
    TokenRejected(#[source] ValidationError),

    #[error("failed to configure git remote '{0}'")]
    Remote(String),

    #[error("prompt failed: {0}")]
    Prompt(#[from] io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupSummary {
    pub workdir: PathBuf,
    pub repo_url: Option<String>,
    pub remote: String,
    pub branch: String,
}

#[derive(Debug)]
pub enum SetupOutcome {
    Completed(SetupSummary),
    Aborted { step: SetupStep, error: SetupError },
}

impl SetupOutcome {
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, SetupOutcome::Completed(_))
    }
}

/// What happened in the token step when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenStep {
    Skipped,
    /// Token accepted; `remote_configured` is false when the user kept an
    /// existing remote.
    Configured {
        validation: Validation,
        remote_configured: bool,
    },
}

pub struct Setup<'a> {
    store: &'a ConfigStore,
    credentials: &'a CredentialStore,
    validator: &'a TokenValidator,
    git: &'a Git,
    prompt: &'a dyn Prompt,
    cwd: PathBuf,
}

impl<'a> Setup<'a> {
    pub fn new(
        store: &'a ConfigStore,
        credentials: &'a CredentialStore,
        validator: &'a TokenValidator,
        git: &'a Git,
        prompt: &'a dyn Prompt,
        cwd: PathBuf,
    ) -> Self {
        Self {
            store,
            credentials,
            validator,
            git,
            prompt,
            cwd,
        }
    }

    /// Runs every step in order.
    pub fn run(&self) -> SetupOutcome {
        output::header("Git Genius Setup");
        match self.run_steps() {
            Ok(summary) => {
                output::print_setup_summary(&summary);
                SetupOutcome::Completed(summary)
            }
            Err((step, error)) => {
                output::error(&format!("Setup aborted at {step}: {error}"));
                SetupOutcome::Aborted { step, error }
            }
        }
    }

    fn run_steps(&self) -> Result<SetupSummary, (SetupStep, SetupError)> {
        fn at<T>(step: SetupStep, result: Result<T, SetupError>) -> Result<T, (SetupStep, SetupError)> {
            result.map_err(|e| (step, e))
        }

        at(SetupStep::SelectWorkDir, self.select_workdir())?;

        let is_repo = at(
            SetupStep::EnsureRepo,
            self.git.ensure_repo(self.prompt).map_err(SetupError::from),
        )?;
        if !is_repo {
            return Err((SetupStep::EnsureRepo, SetupError::RepositoryRequired));
        }

        let mut config = self.store.load();
        at(SetupStep::CaptureGitBasics, self.capture_git_basics(&mut config))?;
        at(
            SetupStep::SelectRepoIdentity,
            self.select_repo_identity(&mut config),
        )?;
        at(SetupStep::ConfigureToken, self.configure_token(&config))?;

        Ok(self.finalize(&config))
    }

    /// Chooses the project directory and saves it immediately.
    pub fn select_workdir(&self) -> Result<PathBuf, SetupError> {
        output::info(&format!("Current directory: {}", self.cwd.display()));

        let dir = if self
            .prompt
            .confirm("Do you want to use a DIFFERENT project directory?")?
        {
            let answer = self.prompt.input("Enter full path of project directory")?;
            if answer.is_empty() {
                return Err(SetupError::EmptyDirectory);
            }
            let dir = self.cwd.join(answer);
            if !dir.is_dir() {
                return Err(SetupError::InvalidDirectory(dir));
            }
            output::success(&format!("Project directory set to: {}", dir.display()));
            dir
        } else {
            self.cwd.clone()
        };

        self.store
            .update(|config| config.workdir = dir.to_string_lossy().into_owned());
        Ok(dir)
    }

    /// Branch and remote overrides; empty answers keep the current values.
    pub fn capture_git_basics(&self, config: &mut Config) -> Result<(), SetupError> {
        let branch = self
            .prompt
            .input(&format!("Default branch [{}]", config.branch))?;
        config.branch = keep_if_empty(branch, &config.branch);

        let remote = self
            .prompt
            .input(&format!("Remote name [{}]", config.remote))?;
        config.remote = keep_if_empty(remote, &config.remote);
        Ok(())
    }

    /// Owner and repository name, suggesting the directory name for the repo.
    pub fn select_repo_identity(&self, config: &mut Config) -> Result<(), SetupError> {
        output::header("GitHub Repository");

        let owner = self
            .prompt
            .input(&format!("GitHub username or organisation [{}]", config.owner))?;
        config.owner = keep_if_empty(owner, &config.owner);

        if config.repo.is_empty() {
            let suggested = suggested_repo_name(&config.resolve_workdir(&self.cwd));
            let repo = self
                .prompt
                .input(&format!("Repository name [{suggested}]"))?;
            config.repo = keep_if_empty(repo, &suggested);
        }

        if config.owner.is_empty() || config.repo.is_empty() {
            return Err(SetupError::MissingIdentity);
        }

        if let Some(url) = config.repo_url() {
            output::info(&format!("Target repo: {url}"));
        }
        Ok(())
    }

    /// Optional token entry, validation, and remote configuration.
    pub fn configure_token(&self, config: &Config) -> Result<TokenStep, SetupError> {
        output::header("GitHub Authentication");
        output::info("A GitHub token is required for HTTPS authentication");
        output::info(&format!("1. Open: {TOKEN_SETTINGS_URL}"));
        output::info("2. Generate new token (classic) with the 'repo' scope");
        output::info("3. Copy the token and paste it below");

        if !self
            .prompt
            .confirm("Do you want to configure GitHub token now?")?
        {
            output::warn("Skipping GitHub token setup");
            return Ok(TokenStep::Skipped);
        }

        let token = self.prompt.secret("Paste GitHub token")?;
        if token.is_empty() {
            output::warn("Empty token, skipping");
            return Ok(TokenStep::Skipped);
        }

        self.credentials.save(&token)?;

        let validation = match self.validator.validate() {
            Ok(validation) => validation,
            Err(e) => {
                self.credentials.delete();
                return Err(SetupError::TokenRejected(e));
            }
        };

        match &validation {
            Validation::User(login) => {
                output::success(&format!("GitHub authenticated as: {login}"))
            }
            Validation::Offline => output::warn("Offline: token saved without validation"),
        }

        let exists = self.git.remote_exists(&config.remote);
        if exists
            && !self
                .prompt
                .confirm(&format!("Remote '{}' already exists. Overwrite it?", config.remote))?
        {
            output::warn("Keeping existing remote");
            return Ok(TokenStep::Configured {
                validation,
                remote_configured: false,
            });
        }

        let url = authenticated_remote_url(&token, &config.owner, &config.repo);
        if exists {
            self.git
                .run(&["remote", "remove", &config.remote])
                .map_err(|_| SetupError::Remote(config.remote.clone()))?;
        }
        self.git
            .run(&["remote", "add", &config.remote, &url])
            .map_err(|_| SetupError::Remote(config.remote.clone()))?;

        debug!(remote = %config.remote, "remote configured with token");
        output::success("Git remote configured with token");
        Ok(TokenStep::Configured {
            validation,
            remote_configured: true,
        })
    }

    /// Persists the whole record and describes the result.
    pub fn finalize(&self, config: &Config) -> SetupSummary {
        self.store.save(config);
        SetupSummary {
            workdir: config.resolve_workdir(&self.cwd),
            repo_url: config.repo_url(),
            remote: config.remote.clone(),
            branch: config.branch.clone(),
        }
    }
}

/// Repository name suggested from a directory's base name.
pub fn suggested_repo_name(dir: &Path) -> String {
    dir.file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default()
        .to_string()
}
