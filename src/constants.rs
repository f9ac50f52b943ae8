//! Application-wide constants.
//!
//! Centralized configuration values to avoid magic strings throughout the codebase.

use std::time::Duration;

/// Branch used when none is configured.
pub const DEFAULT_BRANCH: &str = "main";

/// Remote used when none is configured.
pub const DEFAULT_REMOTE: &str = "origin";

/// Git directory name; the private metadata directory lives inside it.
pub const GIT_DIR: &str = ".git";

/// Private metadata directory, relative to the git directory.
pub const GENIUS_DIR: &str = ".genius";

pub const CONFIG_FILE: &str = "config.json";
pub const TOKEN_FILE: &str = "token";
pub const ERROR_LOG_FILE: &str = "error.log";

/// Value reported in place of a GitHub login when validation is skipped offline.
pub const OFFLINE_SENTINEL: &str = "offline-mode";

/// User agent sent with every HTTP request.
pub const USER_AGENT: &str = "git-genius";

pub const GITHUB_HOST: &str = "github.com";
pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_PROBE_URL: &str = "https://github.com";

/// Message used for the stash created by smart pull.
pub const AUTO_STASH_MESSAGE: &str = "git-genius-auto-stash";

/// Timeout for the GitHub identity request.
pub const VALIDATION_TIMEOUT: Duration = Duration::from_secs(5);

/// Timeout for the startup reachability probe.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Spinner tick interval in milliseconds.
pub const PROGRESS_TICK_MS: u64 = 80;

/// Name used when a project name cannot be determined from its path.
pub const DEFAULT_PROJECT_NAME: &str = "project";

pub const GIT_DOWNLOAD_URL: &str = "https://git-scm.com/downloads";
pub const TOKEN_SETTINGS_URL: &str = "https://github.com/settings/tokens";
