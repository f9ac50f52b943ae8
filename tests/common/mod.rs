//! Test infrastructure for git-genius integration tests.
#![allow(dead_code)]

use anyhow::{Context, Result};
use git_genius::app::App;
use git_genius::network::NetworkStatus;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::thread::{self, JoinHandle};
use tempfile::TempDir;

/// Runs git in `dir` and returns trimmed stdout, failing on a non-zero exit.
pub fn run_git(dir: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .current_dir(dir)
        .args(args)
        .output()
        .context("Failed to execute git command")?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!("git {} failed: {}", args.join(" "), stderr)
    }
}

/// A temporary git repository on `main` with one commit.
/// Automatically cleaned up when dropped.
pub struct TestRepo {
    _temp_dir: TempDir,
    path: PathBuf,
}

impl TestRepo {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().to_path_buf();

        run_git(&path, &["init"])?;
        run_git(&path, &["symbolic-ref", "HEAD", "refs/heads/main"])?;
        run_git(&path, &["config", "user.email", "test@example.com"])?;
        run_git(&path, &["config", "user.name", "Test User"])?;

        std::fs::write(path.join("README.md"), "# Test Repo\n")?;
        run_git(&path, &["add", "README.md"])?;
        run_git(&path, &["commit", "-m", "Initial commit"])?;

        Ok(Self {
            _temp_dir: temp_dir,
            path,
        })
    }

    /// Creates a test repository whose `origin` is a bare repository.
    /// Returns the repo and the remote TempDir (must be kept alive).
    pub fn with_remote() -> Result<(Self, TempDir)> {
        let remote_dir = TempDir::new()?;
        run_git(remote_dir.path(), &["init", "--bare"])?;

        let local = Self::new()?;
        let remote_path = remote_dir
            .path()
            .to_str()
            .context("non-UTF-8 temp path")?;
        run_git(&local.path, &["remote", "add", "origin", remote_path])?;
        run_git(&local.path, &["push", "-u", "origin", "main"])?;

        Ok((local, remote_dir))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> String {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string()
    }

    pub fn git(&self, args: &[&str]) -> Result<String> {
        run_git(&self.path, args)
    }

    pub fn make_dirty(&self) -> Result<()> {
        std::fs::write(self.path.join("README.md"), "# Modified\n")?;
        Ok(())
    }

    pub fn commit_file(&self, name: &str, content: &str, message: &str) -> Result<()> {
        std::fs::write(self.path.join(name), content)?;
        self.git(&["add", name])?;
        self.git(&["commit", "-m", message])?;
        Ok(())
    }

    pub fn is_dirty(&self) -> Result<bool> {
        Ok(!self.git(&["status", "--porcelain"])?.is_empty())
    }

    pub fn commit_count(&self) -> Result<usize> {
        Ok(self.git(&["rev-list", "--count", "HEAD"])?.parse()?)
    }

    pub fn current_branch(&self) -> Result<String> {
        self.git(&["rev-parse", "--abbrev-ref", "HEAD"])
    }
}

/// An API URL nothing listens on.
pub fn unused_url() -> Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let port = listener.local_addr()?.port();
    drop(listener);
    Ok(format!("http://127.0.0.1:{port}"))
}

/// Components anchored at `dir` with an unreachable API.
pub fn app_in(dir: &Path, network: NetworkStatus) -> Result<App> {
    Ok(App::new(dir, network, &unused_url()?))
}

/// Serves a single HTTP response, returning the base URL and a handle
/// yielding the raw request that was received.
pub fn serve_once(status: &str, body: &str) -> Result<(String, JoinHandle<String>)> {
    serve_raw(format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    ))
}

/// Writes `response` verbatim to the first connection, then closes it.
pub fn serve_raw(response: String) -> Result<(String, JoinHandle<String>)> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let url = format!("http://{}", listener.local_addr()?);

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept connection");
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).expect("read request");
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        stream
            .write_all(response.as_bytes())
            .expect("write response");
        String::from_utf8_lossy(&request).into_owned()
    });

    Ok((url, handle))
}
