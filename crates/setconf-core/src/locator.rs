//! Config file discovery
//!
//! Looks for well-known config file names directly inside a directory.

use std::path::{Path, PathBuf};

/// File stems recognized as config files
pub const CONFIG_NAMES: &[&str] = &["setconf", "config", "app", "application"];

/// Extensions recognized as config files
pub const CONFIG_EXTENSIONS: &[&str] = &["yaml", "yml", "json", "properties", "conf"];

/// Finds config files in a base directory
#[derive(Debug, Clone)]
pub struct ConfigFileLocator {
    base_path: PathBuf,
}

impl Default for ConfigFileLocator {
    fn default() -> Self {
        Self::new(".")
    }
}

impl ConfigFileLocator {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Readable config files in the base directory, sorted by file name
    ///
    /// Subdirectories are not searched. A missing or unreadable base
    /// directory yields no files.
    pub fn config_files(&self) -> Vec<PathBuf> {
        let entries = match std::fs::read_dir(&self.base_path) {
            Ok(entries) => entries,
            Err(e) => {
                log::debug!(
                    "Not searching '{}' for config files: {}",
                    self.base_path.display(),
                    e
                );
                return Vec::new();
            }
        };

        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| is_config_file(path) && is_readable_file(path))
            .collect();
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        files
    }
}

fn is_config_file(path: &Path) -> bool {
    let stem = path.file_stem().and_then(|s| s.to_str());
    let extension = path.extension().and_then(|e| e.to_str());
    match (stem, extension) {
        (Some(stem), Some(extension)) => {
            CONFIG_NAMES.contains(&stem) && CONFIG_EXTENSIONS.contains(&extension)
        }
        _ => false,
    }
}

fn is_readable_file(path: &Path) -> bool {
    path.is_file() && std::fs::File::open(path).is_ok()
}
