//! Storage for the GitHub token, kept apart from the configuration file.

use crate::paths::write_private_atomic;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("empty token")]
    EmptyToken,

    #[error("failed to write token to {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A single opaque token stored as raw bytes with owner-only permissions.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the stored token, or an empty string when there is none.
    #[must_use]
    pub fn get(&self) -> String {
        std::fs::read_to_string(&self.path).unwrap_or_default()
    }

    #[must_use]
    pub fn has_token(&self) -> bool {
        !self.get().is_empty()
    }

    pub fn save(&self, token: &str) -> Result<(), CredentialError> {
        if token.is_empty() {
            return Err(CredentialError::EmptyToken);
        }
        write_private_atomic(&self.path, token.as_bytes()).map_err(|source| {
            CredentialError::Io {
                path: self.path.clone(),
                source,
            }
        })
    }

    /// Removes the token; a missing file is not an error.
    pub fn delete(&self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(error = %e, path = %self.path.display(), "failed to delete token"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(temp: &TempDir) -> CredentialStore {
        CredentialStore::new(temp.path().join(".git").join(".genius").join("token"))
    }

    #[test]
    fn test_get_without_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        assert_eq!(store.get(), "");
        assert!(!store.has_token());
    }

    #[test]
    fn test_save_empty_token_fails_without_touching_file() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);

        assert!(matches!(store.save(""), Err(CredentialError::EmptyToken)));
        assert!(!store.path().exists());

        store.save("ghp_existing").unwrap();
        assert!(matches!(store.save(""), Err(CredentialError::EmptyToken)));
        assert_eq!(store.get(), "ghp_existing");
    }

    #[test]
    fn test_save_get_delete() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);

        store.save("ghp_secret").unwrap();
        assert_eq!(store.get(), "ghp_secret");
        assert!(store.has_token());

        store.delete();
        assert!(!store.path().exists());
        assert_eq!(store.get(), "");

        // Deleting again is fine.
        store.delete();
    }

    #[cfg(unix)]
    #[test]
    fn test_token_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        store.save("ghp_secret").unwrap();

        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
    }
}
