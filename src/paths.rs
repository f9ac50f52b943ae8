//! Locations of the private metadata files and owner-only file helpers.

use crate::constants::{CONFIG_FILE, ERROR_LOG_FILE, GENIUS_DIR, GIT_DIR, TOKEN_FILE};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Paths of the metadata files, resolved once from the anchor directory
/// the process started in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeniusPaths {
    dir: PathBuf,
}

impl GeniusPaths {
    pub fn new(anchor: &Path) -> Self {
        Self {
            dir: anchor.join(GIT_DIR).join(GENIUS_DIR),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE)
    }

    pub fn token_file(&self) -> PathBuf {
        self.dir.join(TOKEN_FILE)
    }

    pub fn error_log(&self) -> PathBuf {
        self.dir.join(ERROR_LOG_FILE)
    }
}

/// Creates `dir` and its parents, restricting the leaf to its owner.
pub fn ensure_private_dir(dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(dir, fs::Permissions::from_mode(0o700))?;
    }
    Ok(())
}

/// Opens `path` for writing with owner read/write permission only.
pub fn open_private(path: &Path, append: bool) -> io::Result<fs::File> {
    let mut options = OpenOptions::new();
    options.create(true);
    if append {
        options.append(true);
    } else {
        options.write(true).truncate(true);
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let file = options.open(path)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }
    Ok(file)
}

/// Replaces the whole content of `path` via a sibling temp file and a rename,
/// so readers never observe a partial write.
pub fn write_private_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        ensure_private_dir(parent)?;
    }

    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = PathBuf::from(temp_name);

    // A temp file left by an interrupted write is never reused.
    match fs::remove_file(&temp_path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => return Err(e),
        _ => {}
    }

    let mut file = open_private(&temp_path, false)?;
    file.write_all(contents)?;
    file.sync_all()?;
    drop(file);

    fs::rename(&temp_path, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_paths_live_under_private_git_dir() {
        let paths = GeniusPaths::new(Path::new("/work/proj"));
        assert_eq!(paths.dir(), Path::new("/work/proj/.git/.genius"));
        assert_eq!(
            paths.config_file(),
            PathBuf::from("/work/proj/.git/.genius/config.json")
        );
        assert_eq!(
            paths.token_file(),
            PathBuf::from("/work/proj/.git/.genius/token")
        );
        assert_eq!(
            paths.error_log(),
            PathBuf::from("/work/proj/.git/.genius/error.log")
        );
    }

    #[test]
    fn test_atomic_write_replaces_content_and_leaves_no_temp_file() -> anyhow::Result<()> {
        let temp = TempDir::new()?;
        let path = temp.path().join("nested").join("file.json");

        write_private_atomic(&path, b"first")?;
        write_private_atomic(&path, b"second")?;

        assert_eq!(fs::read_to_string(&path)?, "second");
        assert!(!temp.path().join("nested").join("file.json.tmp").exists());
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_private_files_are_owner_only() -> anyhow::Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new()?;
        let dir = temp.path().join("secret");
        let path = dir.join("value");
        write_private_atomic(&path, b"x")?;

        let dir_mode = fs::metadata(&dir)?.permissions().mode() & 0o777;
        let file_mode = fs::metadata(&path)?.permissions().mode() & 0o777;
        assert_eq!(dir_mode, 0o700);
        assert_eq!(file_mode, 0o600);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_stale_temp_file_does_not_widen_permissions() -> anyhow::Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new()?;
        let path = temp.path().join("token");
        let stale = temp.path().join("token.tmp");
        fs::write(&stale, "leftover")?;
        fs::set_permissions(&stale, fs::Permissions::from_mode(0o644))?;

        write_private_atomic(&path, b"secret")?;

        assert_eq!(fs::read_to_string(&path)?, "secret");
        assert_eq!(fs::metadata(&path)?.permissions().mode() & 0o777, 0o600);
        assert!(!stale.exists());
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_open_private_tightens_existing_file() -> anyhow::Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new()?;
        let path = temp.path().join("error.log");
        fs::write(&path, "old\n")?;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o666))?;

        open_private(&path, true)?;

        assert_eq!(fs::metadata(&path)?.permissions().mode() & 0o777, 0o600);
        Ok(())
    }
}
