//! Shared deterministic types for workshop core logic.
//!
//! These types are rebuilt from the filesystem on every invocation and never
//! persisted.

use std::fmt;

/// One immediate subdirectory of a workshop root (`exercise/`, `final/`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DirectoryEntry {
    /// Root category the entry was listed from, e.g. `exercise`.
    pub root: String,
    /// Directory basename, e.g. `03-dynamic-params.extra-01-marked`.
    pub name: String,
}

impl DirectoryEntry {
    pub fn new(root: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            name: name.into(),
        }
    }

    /// Build an entry from a `./root/name` style relative path.
    ///
    /// Returns `None` unless the path has exactly two non-empty segments.
    #[cfg(any(test, feature = "test-support"))]
    pub fn from_rel_path(rel_path: &str) -> Option<Self> {
        let trimmed = rel_path.strip_prefix("./").unwrap_or(rel_path);
        let (root, name) = trimmed.trim_end_matches('/').split_once('/')?;
        if root.is_empty() || name.is_empty() || name.contains('/') {
            return None;
        }
        Some(Self::new(root, name))
    }

    /// `root/name`, the form used for prefix matching.
    pub fn path_key(&self) -> String {
        format!("{}/{}", self.root, self.name)
    }

    /// `./root/name`, the form printed to operators.
    pub fn rel_path(&self) -> String {
        format!("./{}/{}", self.root, self.name)
    }

    /// Whether the basename marks an extra-credit variant.
    pub fn is_extra_credit(&self) -> bool {
        self.name.contains(".extra-")
    }
}

impl fmt::Display for DirectoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "./{}/{}", self.root, self.name)
    }
}

/// Result of resolving an operator token against the listed directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveOutcome {
    Found(DirectoryEntry),
    /// No candidate qualified; carries the token as typed.
    NotFound { token: String },
}

impl ResolveOutcome {
    pub fn into_found(self) -> Option<DirectoryEntry> {
        match self {
            Self::Found(entry) => Some(entry),
            Self::NotFound { .. } => None,
        }
    }
}
