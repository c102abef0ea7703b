use std::{
    fs,
    path::{Path, PathBuf},
};

use eyre::{Result, WrapErr};

/// Outcome of [`File::write`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    Written,
    /// The module on disk already matched.
    Unchanged,
}

/// A rendered module bound to its destination path.
#[derive(Debug, Clone)]
pub struct File {
    path: PathBuf,
    content: String,
}

impl File {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the destination already holds exactly this content.
    fn is_current(&self) -> bool {
        fs::read(&self.path).is_ok_and(|bytes| bytes == self.content.as_bytes())
    }

    /// Write the module, creating missing parent folders.
    ///
    /// Recompiling an unchanged descriptor leaves the file (and its mtime) alone.
    pub fn write(&self) -> Result<WriteResult> {
        if self.is_current() {
            return Ok(WriteResult::Unchanged);
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .wrap_err_with(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&self.path, &self.content)
            .wrap_err_with(|| format!("Failed to write {}", self.path.display()))?;
        Ok(WriteResult::Written)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_write_creates_package_folders() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("fsl").join("bet.py");

        let result = File::new(&path, "nested").write().unwrap();

        assert_eq!(result, WriteResult::Written);
        assert_eq!(fs::read_to_string(&path).unwrap(), "nested");
    }

    #[test]
    fn test_write_replaces_stale_module() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bet.py");
        fs::write(&path, "stale").unwrap();

        let result = File::new(&path, "fresh").write().unwrap();

        assert_eq!(result, WriteResult::Written);
        assert_eq!(fs::read_to_string(&path).unwrap(), "fresh");
    }

    #[test]
    fn test_write_skips_identical_module() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bet.py");
        fs::write(&path, "same").unwrap();

        assert_eq!(File::new(&path, "same").write().unwrap(), WriteResult::Unchanged);
    }

    #[test]
    fn test_write_reports_blocked_path() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("fsl");
        fs::write(&blocker, "not a folder").unwrap();

        let err = File::new(blocker.join("bet.py"), "x").write().unwrap_err();

        assert!(err.to_string().contains("Failed to create"));
    }
}
