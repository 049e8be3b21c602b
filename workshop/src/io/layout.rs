//! Workshop directory layout and app discovery.

use std::fs;
use std::path::{self, Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, instrument, warn};

use super::config::{CONFIG_FILE_NAME, WorkshopConfig};
use crate::core::types::DirectoryEntry;

/// Canonical paths for a workshop root.
#[derive(Debug, Clone)]
pub struct WorkshopPaths {
    pub root: PathBuf,
    pub config_path: PathBuf,
}

impl WorkshopPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            config_path: root.join(CONFIG_FILE_NAME),
            root,
        }
    }

    pub fn with_config(root: impl Into<PathBuf>, config_path: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            config_path: config_path.into(),
        }
    }

    pub fn root_dir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Absolute location of a listed app.
    pub fn entry_dir(&self, entry: &DirectoryEntry) -> PathBuf {
        self.root.join(&entry.root).join(&entry.name)
    }

    pub fn workspace_dir(&self, config: &WorkshopConfig) -> PathBuf {
        self.root.join(&config.workspace_dir)
    }

    /// Turn an absolute token under the workshop root into a relative one.
    ///
    /// Relative tokens and paths outside the root pass through unchanged.
    pub fn relativize_token(&self, token: &str) -> String {
        let path = Path::new(token);
        if !path.is_absolute() {
            return token.to_string();
        }
        let rel = path.strip_prefix(&self.root).ok().map(Path::to_path_buf).or_else(|| {
            let canonical = fs::canonicalize(path).ok()?;
            canonical.strip_prefix(&self.root).ok().map(Path::to_path_buf)
        });
        match rel {
            Some(rel) => rel.to_string_lossy().replace('\\', "/"),
            None => token.to_string(),
        }
    }
}

/// Make `root` absolute so absolute tokens can be matched against it.
///
/// Existing roots are canonicalized; a missing root is joined onto the
/// current directory and left for listing to report.
pub fn absolute_root(root: &Path) -> Result<PathBuf> {
    match fs::canonicalize(root) {
        Ok(canonical) => Ok(canonical),
        Err(err) => {
            debug!(root = %root.display(), err = %err, "root not canonicalized");
            path::absolute(root)
                .with_context(|| format!("resolve workshop root {}", root.display()))
        }
    }
}

/// List immediate subdirectories of `dir`, tagged with `root` and sorted by name.
///
/// A missing or unreadable directory yields an empty list.
#[instrument(skip_all, fields(root = %root))]
pub fn list_dirs(dir: &Path, root: &str) -> Vec<DirectoryEntry> {
    let read = match fs::read_dir(dir) {
        Ok(read) => read,
        Err(err) => {
            warn!(dir = %dir.display(), err = %err, "cannot list root; treating as empty");
            return Vec::new();
        }
    };
    let mut entries: Vec<DirectoryEntry> = read
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!(dir = %dir.display(), err = %err, "skipping unreadable entry");
                None
            }
        })
        .filter(|entry| entry.path().is_dir())
        .map(|entry| DirectoryEntry::new(root, entry.file_name().to_string_lossy()))
        .collect();
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    debug!(count = entries.len(), "listed root");
    entries
}

/// Every app under every configured root, in listing order.
pub fn list_all(paths: &WorkshopPaths, config: &WorkshopConfig) -> Vec<DirectoryEntry> {
    config
        .root_names()
        .flat_map(|root| list_dirs(&paths.root_dir(root), root))
        .collect()
}
