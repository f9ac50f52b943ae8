//! Append-only diagnostic log kept next to the configuration.
//!
//! Doctor only checks whether the file exists, so nothing here reads it back.

use crate::paths::{ensure_private_dir, open_private};
use std::fmt::Display;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct ErrorLog {
    path: PathBuf,
}

impl ErrorLog {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Appends one timestamped entry. Never fails the caller.
    pub fn record(&self, context: &str, failure: &dyn Display) {
        debug!(context, %failure, "recording failure");

        let line = format_entry(&chrono::Local::now().to_rfc3339(), context, failure);
        if let Err(e) = self.append(&line) {
            warn!(error = %e, path = %self.path.display(), "failed to write error log");
        }
    }

    fn append(&self, line: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            ensure_private_dir(parent)?;
        }
        let mut file = open_private(&self.path, true)?;
        file.write_all(line.as_bytes())
    }
}

fn format_entry(timestamp: &str, context: &str, failure: &dyn Display) -> String {
    let failure = failure.to_string().replace('\n', " ");
    format!("{timestamp} [ERROR] {context}: {failure}\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_format_entry_is_single_line() {
        let entry = format_entry("2026-01-01T00:00:00+00:00", "git push origin main", &"exit\nstatus: 1");
        assert_eq!(
            entry,
            "2026-01-01T00:00:00+00:00 [ERROR] git push origin main: exit status: 1\n"
        );
    }

    #[test]
    fn test_record_appends_entries() {
        let temp = TempDir::new().unwrap();
        let log = ErrorLog::new(temp.path().join(".genius").join("error.log"));
        assert!(!log.exists());

        log.record("git fetch", &"exit status: 128");
        log.record("github api request failed", &"connection refused");

        assert!(log.exists());
        let content = std::fs::read_to_string(log.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("[ERROR] git fetch: exit status: 128"));
        assert!(lines[1].contains("connection refused"));
    }
}
