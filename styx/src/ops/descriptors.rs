//! Descriptor discovery and loading.

use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use styx_ir::Interface;
use walkdir::WalkDir;

/// A `*.json` descriptor found under the input folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorFile {
    pub path: PathBuf,
    /// Path relative to the input folder.
    pub relative: PathBuf,
}

/// All descriptors under `root`, sorted by path.
pub fn discover(root: &Path) -> Result<Vec<DescriptorFile>> {
    let mut found = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.wrap_err_with(|| format!("Failed to walk {}", root.display()))?;
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "json") {
            continue;
        }
        let relative = path.strip_prefix(root).unwrap_or(path).to_path_buf();
        found.push(DescriptorFile {
            path: path.to_path_buf(),
            relative,
        });
    }
    tracing::debug!(root = %root.display(), count = found.len(), "discovered descriptors");
    Ok(found)
}

pub fn load(path: &Path) -> Result<Interface> {
    let text = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).wrap_err_with(|| format!("Invalid descriptor {}", path.display()))
}
