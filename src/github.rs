//! GitHub token validation against the authenticated-user endpoint.

use crate::constants::{GITHUB_HOST, OFFLINE_SENTINEL, USER_AGENT, VALIDATION_TIMEOUT};
use crate::credentials::CredentialStore;
use crate::error_log::ErrorLog;
use crate::network::NetworkStatus;
use serde::Deserialize;
use std::fmt;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("no GitHub token found")]
    NoToken,

    #[error("invalid or expired GitHub token (HTTP {status})")]
    InvalidToken { status: u16 },

    #[error("unable to read GitHub username from response")]
    MalformedResponse,

    #[error("GitHub API request failed: {0}")]
    Network(String),
}

/// Result of a successful validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    /// The token is live and belongs to this login.
    User(String),
    /// No network call was made because the process is offline.
    Offline,
}

impl fmt::Display for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Validation::User(login) => f.write_str(login),
            Validation::Offline => f.write_str(OFFLINE_SENTINEL),
        }
    }
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    #[serde(default)]
    login: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TokenValidator {
    credentials: CredentialStore,
    network: NetworkStatus,
    api_url: String,
    log: ErrorLog,
}

impl TokenValidator {
    pub fn new(
        credentials: CredentialStore,
        network: NetworkStatus,
        api_url: impl Into<String>,
        log: ErrorLog,
    ) -> Self {
        Self {
            credentials,
            network,
            api_url: api_url.into(),
            log,
        }
    }

    fn user_endpoint(&self) -> String {
        format!("{}/user", self.api_url.trim_end_matches('/'))
    }

    /// Confirms the stored token and returns the login it belongs to.
    pub fn validate(&self) -> Result<Validation, ValidationError> {
        let token = self.credentials.get();
        if token.is_empty() {
            return Err(ValidationError::NoToken);
        }

        if !self.network.is_online() {
            debug!("offline, skipping token validation");
            return Ok(Validation::Offline);
        }

        let url = self.user_endpoint();
        debug!(%url, "validating GitHub token");

        let response = reqwest::blocking::Client::builder()
            .timeout(VALIDATION_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .and_then(|client| {
                client
                    .get(&url)
                    .header(reqwest::header::AUTHORIZATION, format!("token {token}"))
                    .send()
            })
            .map_err(|e| {
                self.log.record("github api request failed", &e);
                ValidationError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "GitHub rejected token");
            return Err(ValidationError::InvalidToken {
                status: status.as_u16(),
            });
        }

        let body = response.text().map_err(|e| {
            self.log.record("github api response failed", &e);
            ValidationError::Network(e.to_string())
        })?;
        let user: UserResponse =
            serde_json::from_str(&body).map_err(|_| ValidationError::MalformedResponse)?;

        match user.login {
            Some(login) if !login.trim().is_empty() => Ok(Validation::User(login)),
            _ => Err(ValidationError::MalformedResponse),
        }
    }
}

/// Remote URL carrying the token as HTTPS credentials.
pub fn authenticated_remote_url(token: &str, owner: &str, repo: &str) -> String {
    format!("https://{token}@{GITHUB_HOST}/{owner}/{repo}.git")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn validator(temp: &TempDir, network: NetworkStatus) -> TokenValidator {
        let dir = temp.path().join(".git").join(".genius");
        TokenValidator::new(
            CredentialStore::new(dir.join("token")),
            network,
            // Nothing listens here; offline paths must never reach it.
            "http://127.0.0.1:9",
            ErrorLog::new(dir.join("error.log")),
        )
    }

    #[test]
    fn test_no_token_fails_even_offline() {
        let temp = TempDir::new().unwrap();
        let offline = validator(&temp, NetworkStatus::Offline);
        assert!(matches!(offline.validate(), Err(ValidationError::NoToken)));

        let online = validator(&temp, NetworkStatus::Online);
        assert!(matches!(online.validate(), Err(ValidationError::NoToken)));
    }

    #[test]
    fn test_offline_with_token_short_circuits() {
        let temp = TempDir::new().unwrap();
        let validator = validator(&temp, NetworkStatus::Offline);
        validator.credentials.save("ghp_token").unwrap();

        let result = validator.validate().unwrap();
        assert_eq!(result, Validation::Offline);
        assert_eq!(result.to_string(), "offline-mode");
        // No request was attempted, so nothing was logged.
        assert!(!validator.log.exists());
    }

    #[test]
    fn test_user_endpoint_tolerates_trailing_slash() {
        let temp = TempDir::new().unwrap();
        let mut validator = validator(&temp, NetworkStatus::Offline);
        validator.api_url = "https://api.github.com/".to_string();
        assert_eq!(validator.user_endpoint(), "https://api.github.com/user");
    }

    #[test]
    fn test_authenticated_remote_url_embeds_token() {
        assert_eq!(
            authenticated_remote_url("ghp_abc", "alice", "myproj"),
            "https://ghp_abc@github.com/alice/myproj.git"
        );
    }
}
