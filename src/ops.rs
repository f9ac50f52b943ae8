//! Everyday git operations offered by the menu.
//!
//! Input is validated before anything is spawned. Git's own output streams
//! to the terminal; callers only learn pass/fail.

use crate::config::ConfigStore;
use crate::constants::AUTO_STASH_MESSAGE;
use crate::git::{Git, GitError};
use crate::output;
use crate::prompt::Prompt;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OpError {
    #[error("commit message cannot be empty")]
    EmptyCommitMessage,

    #[error("branch name cannot be empty")]
    EmptyBranchName,

    #[error("remote name and URL are required")]
    MissingRemote,

    #[error("git repository required to continue")]
    RepositoryRequired,

    #[error("nothing to commit")]
    NothingToCommit,

    #[error("{0}")]
    Cancelled(&'static str),

    #[error("{what} (see error.log)")]
    Git {
        what: &'static str,
        #[source]
        source: GitError,
    },

    #[error("prompt failed: {0}")]
    Prompt(#[from] io::Error),
}

impl OpError {
    /// Outcomes reported as warnings rather than errors.
    #[must_use]
    pub fn is_warning(&self) -> bool {
        matches!(self, OpError::NothingToCommit | OpError::Cancelled(_))
    }
}

trait GitContext<T> {
    fn during(self, what: &'static str) -> Result<T, OpError>;
}

impl<T> GitContext<T> for Result<T, GitError> {
    fn during(self, what: &'static str) -> Result<T, OpError> {
        self.map_err(|source| OpError::Git { what, source })
    }
}

pub struct GitOps<'a> {
    git: &'a Git,
    store: &'a ConfigStore,
    prompt: &'a dyn Prompt,
}

impl<'a> GitOps<'a> {
    pub fn new(git: &'a Git, store: &'a ConfigStore, prompt: &'a dyn Prompt) -> Self {
        Self { git, store, prompt }
    }

    fn require_repo(&self) -> Result<(), OpError> {
        if self.git.ensure_repo(self.prompt)? {
            Ok(())
        } else {
            Err(OpError::RepositoryRequired)
        }
    }

    pub fn status(&self) -> Result<(), OpError> {
        self.require_repo()?;
        self.git.run(&["status"]).during("Failed to get git status")
    }

    /// Stages everything, commits with `message` and pushes to the configured remote.
    pub fn push(&self, message: &str) -> Result<String, OpError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(OpError::EmptyCommitMessage);
        }
        self.require_repo()?;

        self.git.run(&["add", "."]).during("Failed to stage files")?;
        self.git
            .run(&["commit", "-m", message])
            .map_err(|_| OpError::NothingToCommit)?;

        let config = self.store.load();
        self.git
            .run(&["push", &config.remote, &config.branch])
            .during("Push failed")?;
        Ok("Changes pushed successfully".to_string())
    }

    /// Fetches the configured branch and merges it.
    pub fn pull(&self) -> Result<String, OpError> {
        self.require_repo()?;
        let config = self.store.load();

        output::info("Fetching latest changes...");
        self.git
            .run(&["fetch", &config.remote, &config.branch])
            .during("Fetch failed")?;

        output::info("Merging changes...");
        let tracking = format!("{}/{}", config.remote, config.branch);
        self.git
            .run(&["merge", &tracking])
            .during("Merge failed, resolve conflicts manually")?;
        Ok("Pulled latest changes".to_string())
    }

    /// Stashes local changes if needed, pulls, then restores them.
    pub fn smart_pull(&self) -> Result<String, OpError> {
        self.require_repo()?;

        let mut stashed = false;
        if self.git.has_uncommitted_changes() {
            output::warn("Uncommitted changes detected");
            if !self.prompt.confirm("Stash changes and continue pull?")? {
                return Err(OpError::Cancelled("Smart pull cancelled"));
            }
            self.git
                .run(&["stash", "push", "-m", AUTO_STASH_MESSAGE])
                .during("Auto-stash failed")?;
            stashed = true;
            output::success("Changes auto-stashed");
        }

        let config = self.store.load();
        output::info("Pulling latest changes...");
        self.git
            .run(&["pull", &config.remote, &config.branch])
            .during("Pull failed")?;

        if stashed {
            output::info("Restoring stashed changes...");
            if self.git.run(&["stash", "pop"]).is_err() {
                output::warn("Failed to auto-apply stash, apply it manually");
                return Ok("Smart pull completed with stash left in place".to_string());
            }
            output::success("Stash restored successfully");
        }
        Ok("Smart pull completed".to_string())
    }

    pub fn fetch_all(&self) -> Result<String, OpError> {
        self.require_repo()?;
        self.git.run(&["fetch", "--all"]).during("Fetch failed")?;
        Ok("Fetched all remotes".to_string())
    }

    /// Creates or resets `name` at HEAD, switches to it, and makes it the default branch.
    pub fn switch_branch(&self, name: &str) -> Result<String, OpError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(OpError::EmptyBranchName);
        }
        self.require_repo()?;

        self.git
            .run(&["checkout", "-B", name])
            .during("Failed to switch branch")?;
        self.store.update(|config| config.branch = name.to_string());
        Ok(format!("Switched to branch: {name}"))
    }

    /// Points remote `name` at `url` and makes it the default remote.
    pub fn switch_remote(&self, name: &str, url: &str) -> Result<String, OpError> {
        let (name, url) = (name.trim(), url.trim());
        if name.is_empty() || url.is_empty() {
            return Err(OpError::MissingRemote);
        }
        self.require_repo()?;

        if self.git.remote_exists(name) {
            self.git
                .run(&["remote", "remove", name])
                .during("Failed to remove existing remote")?;
        }
        self.git
            .run(&["remote", "add", name, url])
            .during("Failed to add remote")?;
        self.store.update(|config| config.remote = name.to_string());
        Ok(format!("Remote set to: {name}"))
    }

    pub fn stash_save(&self, message: Option<&str>) -> Result<String, OpError> {
        self.require_repo()?;

        let mut args = vec!["stash", "push"];
        if let Some(message) = message.map(str::trim).filter(|m| !m.is_empty()) {
            args.extend(["-m", message]);
        }
        self.git.run(&args).during("Failed to stash changes")?;
        Ok("Changes stashed successfully".to_string())
    }

    pub fn stash_list(&self) -> Result<(), OpError> {
        self.require_repo()?;
        self.git
            .run(&["stash", "list"])
            .during("Failed to list stashes")
    }

    pub fn stash_pop(&self) -> Result<String, OpError> {
        self.require_repo()?;
        self.git
            .run(&["stash", "pop"])
            .during("Failed to apply stash")?;
        Ok("Stash applied successfully".to_string())
    }

    /// Undoes the last commit, keeping its changes staged.
    pub fn undo_last_commit(&self) -> Result<String, OpError> {
        self.require_repo()?;
        if !self
            .prompt
            .confirm("Undo last commit? (changes will be kept)")?
        {
            return Err(OpError::Cancelled("Undo cancelled"));
        }
        self.git
            .run(&["reset", "--soft", "HEAD~1"])
            .during("Failed to undo last commit")?;
        Ok("Last commit undone (changes preserved)".to_string())
    }
}

/// Prints the outcome of an operation. Returns false when it failed.
pub fn report<T>(result: Result<T, OpError>, on_success: impl FnOnce(T)) -> bool {
    match result {
        Ok(value) => {
            on_success(value);
            true
        }
        Err(e) if e.is_warning() => {
            output::warn(&capitalize(&e.to_string()));
            true
        }
        Err(e) => {
            output::error(&capitalize(&e.to_string()));
            false
        }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
